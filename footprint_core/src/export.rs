//! CSV export of the footprint history.
//!
//! The history log is never drained, so every export is a full snapshot: the
//! target file is truncated and rewritten with a header and one row per
//! record.

use crate::history::FootprintRecord;
use crate::Result;
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    id: String,
    recorded_at: String,
    calculation_version: String,
    trigger: &'static str,
    total_kg: f64,
    housing_kg: f64,
    mobility_kg: f64,
    nutrition_kg: f64,
    consumption_kg: f64,
}

impl From<&FootprintRecord> for CsvRow {
    fn from(record: &FootprintRecord) -> Self {
        CsvRow {
            id: record.id.to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            calculation_version: record.calculation_version.clone(),
            trigger: record.trigger.as_str(),
            total_kg: crate::rounding::round_to(record.co2_total_kg_year, 1),
            housing_kg: crate::rounding::round_to(record.co2_housing_kg, 1),
            mobility_kg: crate::rounding::round_to(record.co2_mobility_kg, 1),
            nutrition_kg: crate::rounding::round_to(record.co2_nutrition_kg, 1),
            consumption_kg: crate::rounding::round_to(record.co2_consumption_kg, 1),
        }
    }
}

/// Write records to a CSV file, replacing its contents, and sync it to disk
///
/// Returns the number of rows written.
pub fn records_to_csv(records: &[FootprintRecord], csv_path: &Path) -> Result<usize> {
    if records.is_empty() {
        tracing::info!("No footprint records to export");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(csv_path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} footprint records to {:?}", records.len(), csv_path);
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Trigger;
    use crate::{FootprintCalculator, LifestyleProfile};

    fn record(trigger: Trigger) -> FootprintRecord {
        let result = FootprintCalculator::default().calculate(&LifestyleProfile::default());
        FootprintRecord::from_result(&result, trigger)
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let written = records_to_csv(&[record(Trigger::Initial)], &csv_path).unwrap();
        assert_eq!(written, 1);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,recorded_at,calculation_version,trigger,total_kg"));
        assert!(lines[1].contains(",1.0,initial,5568.8,1458.8,0.0,1760.0,2350.0"));
    }

    #[test]
    fn test_repeated_export_keeps_one_row_per_record() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        let first = record(Trigger::Initial);
        let history = vec![first.clone()];
        records_to_csv(&history, &csv_path).unwrap();
        records_to_csv(&history, &csv_path).unwrap();

        let grown = vec![first.clone(), record(Trigger::Update)];
        assert_eq!(records_to_csv(&grown, &csv_path).unwrap(), 2);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.matches("recorded_at").count(), 1);
        assert_eq!(contents.matches(&first.id.to_string()).count(), 1);
    }

    #[test]
    fn test_export_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("history.csv");

        assert_eq!(records_to_csv(&[], &csv_path).unwrap(), 0);
        assert!(!csv_path.exists());
    }
}
