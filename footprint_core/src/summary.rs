//! Short profile summary built from a stored record.

use crate::averages::{percent_vs, GERMANY_AVERAGE_KG};
use crate::history::FootprintRecord;
use crate::score::score_for;
use crate::types::FootprintCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a profile page shows without recalculating
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FootprintSummary {
    pub total_co2_kg_year: f64,
    /// Largest emitting category
    pub main_category: FootprintCategory,
    pub vs_germany_percent: f64,
    pub last_calculated: Option<DateTime<Utc>>,
    pub sec_score: f64,
}

impl FootprintSummary {
    pub fn from_record(record: &FootprintRecord) -> Self {
        let total = record.co2_total_kg_year;

        Self {
            total_co2_kg_year: crate::rounding::round_to(total, 1),
            main_category: main_category(record),
            vs_germany_percent: percent_vs(total, GERMANY_AVERAGE_KG),
            last_calculated: Some(record.recorded_at),
            sec_score: score_for(total),
        }
    }
}

/// Category with the highest emissions; the first one wins a tie
fn main_category(record: &FootprintRecord) -> FootprintCategory {
    let kg = |category: FootprintCategory| match category {
        FootprintCategory::Housing => record.co2_housing_kg,
        FootprintCategory::Mobility => record.co2_mobility_kg,
        FootprintCategory::Nutrition => record.co2_nutrition_kg,
        FootprintCategory::Consumption => record.co2_consumption_kg,
    };

    let mut best = FootprintCategory::Housing;
    for category in FootprintCategory::ALL {
        if kg(category) > kg(best) {
            best = category;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Trigger;
    use crate::{FootprintCalculator, LifestyleProfile};

    #[test]
    fn test_summary_of_default_profile() {
        let result = FootprintCalculator::default().calculate(&LifestyleProfile::default());
        let record = FootprintRecord::from_result(&result, Trigger::Initial);
        let summary = FootprintSummary::from_record(&record);

        assert_eq!(summary.total_co2_kg_year, 5568.8);
        assert_eq!(summary.main_category, FootprintCategory::Consumption);
        assert_eq!(summary.vs_germany_percent, -48.4);
        assert_eq!(summary.sec_score, result.sec_score);
        assert_eq!(summary.last_calculated, Some(result.calculated_at));
    }

    #[test]
    fn test_main_category_tie_keeps_first() {
        let mut profile = LifestyleProfile::default();
        profile.mobility.flights_long_haul = 10;
        let result = FootprintCalculator::default().calculate(&profile);
        let mut record = FootprintRecord::from_result(&result, Trigger::Update);
        assert_eq!(
            FootprintSummary::from_record(&record).main_category,
            FootprintCategory::Mobility
        );

        record.co2_housing_kg = 1000.0;
        record.co2_mobility_kg = 1000.0;
        record.co2_nutrition_kg = 1000.0;
        record.co2_consumption_kg = 1000.0;
        assert_eq!(main_category(&record), FootprintCategory::Housing);
    }
}
