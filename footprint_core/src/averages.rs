//! Reference footprints used for peer comparison.
//!
//! Consumers comparing stored totals must read these constants instead of
//! declaring their own copies.

use crate::rounding::round_to;
use crate::types::{FootprintCategory, FootprintComparison};
use serde::Serialize;

/// German per-capita average (kg CO₂e/year)
pub const GERMANY_AVERAGE_KG: f64 = 10_800.0;

/// World per-capita average (kg CO₂e/year)
pub const WORLD_AVERAGE_KG: f64 = 4_800.0;

/// Paris-compatible per-capita budget (kg CO₂e/year)
pub const PARIS_TARGET_KG: f64 = 2_000.0;

/// German average split across the four categories
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct CategoryAverages {
    pub housing_kg: f64,
    pub mobility_kg: f64,
    pub nutrition_kg: f64,
    pub consumption_kg: f64,
}

impl CategoryAverages {
    pub fn kg(&self, category: FootprintCategory) -> f64 {
        match category {
            FootprintCategory::Housing => self.housing_kg,
            FootprintCategory::Mobility => self.mobility_kg,
            FootprintCategory::Nutrition => self.nutrition_kg,
            FootprintCategory::Consumption => self.consumption_kg,
        }
    }
}

/// Everything a display needs to put a footprint in context
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct ReferenceAverages {
    pub germany_average_kg: f64,
    pub world_average_kg: f64,
    pub paris_target_kg: f64,
    pub breakdown_germany: CategoryAverages,
    pub source: &'static str,
}

pub const REFERENCE_AVERAGES: ReferenceAverages = ReferenceAverages {
    germany_average_kg: GERMANY_AVERAGE_KG,
    world_average_kg: WORLD_AVERAGE_KG,
    paris_target_kg: PARIS_TARGET_KG,
    breakdown_germany: CategoryAverages {
        housing_kg: 2400.0,
        mobility_kg: 3200.0,
        nutrition_kg: 1800.0,
        consumption_kg: 3400.0,
    },
    source: "UBA 2024",
};

/// Signed deviation from a reference, in percent, one decimal
pub fn percent_vs(total_kg: f64, reference_kg: f64) -> f64 {
    debug_assert!(reference_kg > 0.0);
    round_to((total_kg - reference_kg) / reference_kg * 100.0, 1)
}

/// Compare an annual total against all three references
pub fn compare(total_kg: f64) -> FootprintComparison {
    FootprintComparison {
        user_total_kg: round_to(total_kg, 1),
        germany_average_kg: GERMANY_AVERAGE_KG,
        world_average_kg: WORLD_AVERAGE_KG,
        paris_target_kg: PARIS_TARGET_KG,
        vs_germany_percent: percent_vs(total_kg, GERMANY_AVERAGE_KG),
        vs_world_percent: percent_vs(total_kg, WORLD_AVERAGE_KG),
        vs_paris_percent: percent_vs(total_kg, PARIS_TARGET_KG),
    }
}
