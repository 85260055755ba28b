//! Footprint history log.
//!
//! Every stored calculation is appended to a JSONL (JSON Lines) file together
//! with the factor-table version and a timestamp, so totals from different
//! table versions can be told apart later. Appends take an exclusive lock,
//! reads a shared one.

use crate::{FootprintResult, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Why a record was written
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// First stored calculation for this profile
    Initial,
    /// Recalculation after the profile changed
    Update,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::Initial => "initial",
            Trigger::Update => "update",
        }
    }
}

/// One stored calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FootprintRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub calculation_version: String,
    pub trigger: Trigger,
    pub co2_total_kg_year: f64,
    pub co2_housing_kg: f64,
    pub co2_mobility_kg: f64,
    pub co2_nutrition_kg: f64,
    pub co2_consumption_kg: f64,
}

impl FootprintRecord {
    /// Snapshot the totals of a result
    pub fn from_result(result: &FootprintResult, trigger: Trigger) -> Self {
        let b = &result.breakdown;
        Self {
            id: Uuid::new_v4(),
            recorded_at: result.calculated_at,
            calculation_version: result.calculation_version.clone(),
            trigger,
            co2_total_kg_year: result.total_co2_kg_year,
            co2_housing_kg: b.housing_kg,
            co2_mobility_kg: b.mobility_kg,
            co2_nutrition_kg: b.nutrition_kg,
            co2_consumption_kg: b.consumption_kg,
        }
    }
}

/// Destination for stored calculations
pub trait HistorySink {
    fn append(&mut self, record: &FootprintRecord) -> Result<()>;
}

/// JSONL-based history log with file locking
pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    /// Create a new history log for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists
    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl JsonlHistory {
    /// Store a calculation, choosing its trigger under the append lock
    ///
    /// The record is `Initial` while the log holds no readable record and
    /// `Update` afterwards, so concurrent first saves yield one `Initial`.
    pub fn record_result(&mut self, result: &FootprintResult) -> Result<FootprintRecord> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let trigger = if parse_records(BufReader::new(&file))?.is_empty() {
            Trigger::Initial
        } else {
            Trigger::Update
        };
        let record = FootprintRecord::from_result(result, trigger);
        write_record(&file, &record)?;

        file.unlock()?;

        tracing::debug!(
            "Appended footprint record {} ({}) to history",
            record.id,
            trigger.as_str()
        );
        Ok(record)
    }
}

impl HistorySink for JsonlHistory {
    fn append(&mut self, record: &FootprintRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;
        write_record(&file, record)?;
        file.unlock()?;

        tracing::debug!("Appended footprint record {} to history", record.id);
        Ok(())
    }
}

/// Write one JSON line; the caller holds the exclusive lock
fn write_record(file: &File, record: &FootprintRecord) -> Result<()> {
    let mut writer = std::io::BufWriter::new(file);
    let line = serde_json::to_string(record)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn parse_records(reader: impl BufRead) -> Result<Vec<FootprintRecord>> {
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<FootprintRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse history record at line {}: {}", line_num + 1, e);
            }
        }
    }

    Ok(records)
}

/// Read all records in file order (oldest first)
///
/// Lines that fail to parse are skipped with a warning.
pub fn read_records(path: &Path) -> Result<Vec<FootprintRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;
    let records = parse_records(BufReader::new(&file))?;
    file.unlock()?;

    tracing::debug!("Read {} records from history", records.len());
    Ok(records)
}

/// Load the newest `limit` records, newest first
pub fn load_recent(path: &Path, limit: usize) -> Result<Vec<FootprintRecord>> {
    let mut records = read_records(path)?;
    records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    records.truncate(limit);
    Ok(records)
}

/// The most recent record, if any
pub fn latest(path: &Path) -> Result<Option<FootprintRecord>> {
    Ok(load_recent(path, 1)?.into_iter().next())
}
