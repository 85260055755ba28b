#![forbid(unsafe_code)]

//! CO₂ footprint engine for the Provolution climate-action platform.
//!
//! This crate provides:
//! - Lifestyle questionnaire and result types
//! - The versioned emission factor table
//! - The footprint calculator, SEC-score and recommendation rules
//! - Profile validation for callers building profiles from external input
//! - Local history, profile storage and CSV export for consumers

pub mod types;
pub mod error;
pub mod rounding;
pub mod factors;
pub mod averages;
pub mod score;
pub mod calculator;
pub mod recommendations;
pub mod validation;
pub mod summary;
pub mod config;
pub mod logging;
pub mod history;
pub mod profile_store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use factors::{standard_table, EmissionFactorTable, FactorEntry, FACTOR_SOURCES};
pub use averages::{
    compare, GERMANY_AVERAGE_KG, PARIS_TARGET_KG, REFERENCE_AVERAGES, WORLD_AVERAGE_KG,
};
pub use score::score_for;
pub use calculator::FootprintCalculator;
pub use recommendations::{RecommendationRule, MAX_RECOMMENDATIONS};
pub use summary::FootprintSummary;
pub use config::Config;
pub use history::{FootprintRecord, HistorySink, JsonlHistory, Trigger};
