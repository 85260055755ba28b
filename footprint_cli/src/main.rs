use clap::{Parser, Subcommand};
use footprint_core::config::OutputFormat;
use footprint_core::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "provo")]
#[command(about = "Personal CO2 footprint calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a footprint from a profile (default)
    Calculate {
        /// Profile JSON file ("-" reads stdin); defaults are used if omitted
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Store the profile and record the result in the history
        #[arg(long)]
        save: bool,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the emission factor table and its sources
    Factors {
        #[arg(long)]
        json: bool,
    },

    /// Show the reference averages used for comparison
    Averages {
        #[arg(long)]
        json: bool,
    },

    /// Score an annual total without a full profile
    Score {
        /// Annual emissions in kg CO2e
        total_kg: f64,
    },

    /// Summarize the most recent stored calculation
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// List stored calculations, newest first
    History {
        /// Number of records (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Export the stored history as CSV
    Export {
        /// Destination CSV file
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    footprint_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());

    // A corrupted table must never produce numbers
    let calc = FootprintCalculator::default();
    let errors = calc.factors().validate();
    if !errors.is_empty() {
        eprintln!("Emission factor table validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::FactorTable(errors.join("; ")));
    }

    let json_default = config.output.format == OutputFormat::Json;

    match cli.command {
        Some(Commands::Calculate {
            profile,
            save,
            json,
        }) => cmd_calculate(&calc, &data_dir, profile, save, json || json_default),
        Some(Commands::Factors { json }) => cmd_factors(&calc, json || json_default),
        Some(Commands::Averages { json }) => cmd_averages(json || json_default),
        Some(Commands::Score { total_kg }) => cmd_score(&calc, total_kg),
        Some(Commands::Summary { json }) => cmd_summary(&data_dir, json || json_default),
        Some(Commands::History { limit, json }) => cmd_history(
            &data_dir,
            limit.unwrap_or(config.history.limit),
            json || json_default,
        ),
        Some(Commands::Export { out }) => cmd_export(&data_dir, &out),
        None => cmd_calculate(&calc, &data_dir, None, false, json_default),
    }
}

fn read_profile(source: Option<&Path>, data_dir: &Path) -> Result<LifestyleProfile> {
    let contents = match source {
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            // Recalculate from the stored profile when there is one
            let stored = LifestyleProfile::load(&Config::profile_path(data_dir))?;
            return Ok(stored.unwrap_or_default());
        }
    };

    let profile: LifestyleProfile = serde_json::from_str(&contents)
        .map_err(|e| Error::Validation(format!("could not parse profile: {}", e)))?;
    Ok(profile)
}

fn cmd_calculate(
    calc: &FootprintCalculator<'_>,
    data_dir: &Path,
    profile_path: Option<PathBuf>,
    save: bool,
    json: bool,
) -> Result<()> {
    let profile = read_profile(profile_path.as_deref(), data_dir)?;
    profile.validate()?;

    let mut result = calc.calculate(&profile);

    if save {
        let profile_path = Config::profile_path(data_dir);
        let history_path = Config::history_path(data_dir);

        profile.save(&profile_path)?;
        let record = JsonlHistory::new(&history_path).record_result(&result)?;
        result.profile_complete = true;

        tracing::info!(
            "Stored footprint {} ({}) in {:?}",
            record.id,
            record.trigger.as_str(),
            history_path
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_result(&result);
        if save {
            println!("✓ Footprint saved");
        }
    }

    Ok(())
}

fn cmd_factors(calc: &FootprintCalculator<'_>, json: bool) -> Result<()> {
    let entries = calc.factors().entries();

    if json {
        let doc = serde_json::json!({
            "version": calc.version(),
            "factors": entries,
            "sources": FACTOR_SOURCES,
            "note": "All values in kg CO2-equivalent unless a unit says otherwise.",
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Emission factors v{}", calc.version());
    println!();
    for e in &entries {
        println!(
            "  {:<18} {:<28} {:>10} {}",
            e.category, e.subcategory, e.value, e.unit
        );
    }
    println!();
    println!("Sources:");
    for source in FACTOR_SOURCES {
        println!("  {} ({})", source.name, source.url);
    }
    Ok(())
}

fn cmd_averages(json: bool) -> Result<()> {
    let averages = REFERENCE_AVERAGES;

    if json {
        println!("{}", serde_json::to_string_pretty(&averages)?);
        return Ok(());
    }

    println!("Reference footprints ({})", averages.source);
    println!("  Germany average : {:>8.0} kg", averages.germany_average_kg);
    println!("  World average   : {:>8.0} kg", averages.world_average_kg);
    println!("  Paris target    : {:>8.0} kg", averages.paris_target_kg);
    println!();
    println!("Germany by category:");
    for category in FootprintCategory::ALL {
        println!(
            "  {:<12} {:>8.0} kg",
            category,
            averages.breakdown_germany.kg(category)
        );
    }
    Ok(())
}

fn cmd_score(calc: &FootprintCalculator<'_>, total_kg: f64) -> Result<()> {
    if !total_kg.is_finite() || total_kg < 0.0 {
        return Err(Error::Validation(format!(
            "total must be a non-negative number of kg, got {}",
            total_kg
        )));
    }

    println!("{:.1}", calc.score_for(total_kg));
    Ok(())
}

fn cmd_summary(data_dir: &Path, json: bool) -> Result<()> {
    let history_path = Config::history_path(data_dir);
    let Some(record) = history::latest(&history_path)? else {
        println!("No footprint calculated yet. Run `provo calculate --save` first.");
        return Ok(());
    };

    let summary = FootprintSummary::from_record(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Footprint    : {:.1} kg CO2e/year", summary.total_co2_kg_year);
    println!("Main source  : {}", summary.main_category);
    println!("vs Germany   : {:+.1}%", summary.vs_germany_percent);
    println!("SEC-score    : {:.1} / 10", summary.sec_score);
    if let Some(at) = summary.last_calculated {
        println!("Calculated   : {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    if record.calculation_version != standard_table().version() {
        println!(
            "Note: calculated with factors v{}, current is v{}",
            record.calculation_version,
            standard_table().version()
        );
    }
    Ok(())
}

fn cmd_history(data_dir: &Path, limit: usize, json: bool) -> Result<()> {
    let records = history::load_recent(&Config::history_path(data_dir), limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    println!(
        "{:<17} {:<8} {:>10} {:>9} {:>9} {:>9} {:>9}  v",
        "recorded", "trigger", "total", "housing", "mobility", "food", "goods"
    );
    for r in &records {
        println!(
            "{:<17} {:<8} {:>10.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1}  {}",
            r.recorded_at.format("%Y-%m-%d %H:%M"),
            r.trigger.as_str(),
            r.co2_total_kg_year,
            r.co2_housing_kg,
            r.co2_mobility_kg,
            r.co2_nutrition_kg,
            r.co2_consumption_kg,
            r.calculation_version
        );
    }
    Ok(())
}

fn cmd_export(data_dir: &Path, out: &Path) -> Result<()> {
    let records = history::read_records(&Config::history_path(data_dir))?;

    if records.is_empty() {
        println!("No history found - nothing to export.");
        return Ok(());
    }

    let count = export::records_to_csv(&records, out)?;
    println!("✓ Exported {} records to CSV", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn display_result(result: &FootprintResult) {
    let b = &result.breakdown;
    let c = &result.comparison;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CO2 FOOTPRINT  {:>10.1} kg / year     │", result.total_co2_kg_year);
    println!("╰─────────────────────────────────────────╯");
    println!();
    for category in FootprintCategory::ALL {
        println!(
            "  {:<12} {:>9.1} kg  {:>5.1}%",
            category,
            b.kg(category),
            b.percent(category)
        );
    }
    println!();
    println!("  vs Germany average : {:+.1}%", c.vs_germany_percent);
    println!("  vs world average   : {:+.1}%", c.vs_world_percent);
    println!("  vs Paris target    : {:+.1}%", c.vs_paris_percent);
    println!();
    println!("  SEC-score: {:.1} / 10", result.sec_score);

    if !result.recommendations.is_empty() {
        println!();
        println!("  Recommendations:");
        for rec in &result.recommendations {
            let challenge = rec
                .challenge_id
                .as_deref()
                .map(|id| format!(" [{}]", id))
                .unwrap_or_default();
            println!(
                "  → {} (−{:.0} kg, {}){}",
                rec.action, rec.potential_savings_kg, rec.difficulty, challenge
            );
        }
    }
    println!();
}
