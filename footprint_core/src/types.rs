//! Core domain types for the footprint engine.
//!
//! This module defines:
//! - The lifestyle questionnaire (housing, mobility, nutrition, consumption)
//! - The calculation result (breakdown, comparison, recommendations, score)
//!
//! Every questionnaire field carries the default the web form starts from, so
//! partial JSON documents deserialize into a complete profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

// ============================================================================
// Housing
// ============================================================================

/// Kind of dwelling
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    #[default]
    Apartment,
    House,
    Shared,
}

/// Heating fuel
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HeatingType {
    #[default]
    Gas,
    Oil,
    District,
    Heatpump,
    Wood,
    Electric,
}

impl HeatingType {
    pub const ALL: [HeatingType; 6] = [
        HeatingType::Gas,
        HeatingType::Oil,
        HeatingType::District,
        HeatingType::Heatpump,
        HeatingType::Wood,
        HeatingType::Electric,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HeatingType::Gas => "gas",
            HeatingType::Oil => "oil",
            HeatingType::District => "district",
            HeatingType::Heatpump => "heatpump",
            HeatingType::Wood => "wood",
            HeatingType::Electric => "electric",
        }
    }
}

/// Housing and household energy answers
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HousingProfile {
    pub housing_type: HousingType,
    pub housing_size_sqm: u32,
    /// Zero occupants cannot be represented, so per-person division is always safe.
    pub household_members: NonZeroU8,
    pub heating_type: HeatingType,
    /// Whole-household heating energy (kWh/year), if known
    pub heating_consumption_kwh: Option<u32>,
    /// Whole-household electricity use (kWh/year), if known
    pub electricity_kwh: Option<u32>,
    pub green_electricity: bool,
}

impl Default for HousingProfile {
    fn default() -> Self {
        Self {
            housing_type: HousingType::Apartment,
            housing_size_sqm: 80,
            household_members: NonZeroU8::new(2).unwrap_or(NonZeroU8::MIN),
            heating_type: HeatingType::Gas,
            heating_consumption_kwh: None,
            electricity_kwh: None,
            green_electricity: false,
        }
    }
}

// ============================================================================
// Mobility
// ============================================================================

/// Car drivetrain
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CarFuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

impl CarFuelType {
    pub const ALL: [CarFuelType; 4] = [
        CarFuelType::Petrol,
        CarFuelType::Diesel,
        CarFuelType::Hybrid,
        CarFuelType::Electric,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CarFuelType::Petrol => "petrol",
            CarFuelType::Diesel => "diesel",
            CarFuelType::Hybrid => "hybrid",
            CarFuelType::Electric => "electric",
        }
    }

    /// Petrol and diesel, the drivetrains a modal shift pays off for
    pub fn is_fossil(self) -> bool {
        matches!(self, CarFuelType::Petrol | CarFuelType::Diesel)
    }
}

/// Travel answers
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MobilityProfile {
    pub has_car: bool,
    pub car_fuel_type: Option<CarFuelType>,
    pub car_km_year: u32,
    /// Informational only; emissions use the per-km fuel factor
    pub car_consumption_l_100km: Option<f64>,
    pub public_transport_km_year: u32,
    /// Emission-free, kept for recommendations and display
    pub bike_km_year: u32,
    /// Flights under 1,500 km per year
    pub flights_short_haul: u32,
    /// Flights over 1,500 km per year
    pub flights_long_haul: u32,
}

// ============================================================================
// Nutrition
// ============================================================================

/// Diet category, ordered from lowest to highest emissions
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Flexitarian,
    #[default]
    Mixed,
    MeatHeavy,
}

impl DietType {
    pub const ALL: [DietType; 5] = [
        DietType::Vegan,
        DietType::Vegetarian,
        DietType::Flexitarian,
        DietType::Mixed,
        DietType::MeatHeavy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DietType::Vegan => "vegan",
            DietType::Vegetarian => "vegetarian",
            DietType::Flexitarian => "flexitarian",
            DietType::Mixed => "mixed",
            DietType::MeatHeavy => "meat_heavy",
        }
    }
}

/// How much food ends up in the bin
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodWasteLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl FoodWasteLevel {
    pub const ALL: [FoodWasteLevel; 3] =
        [FoodWasteLevel::Low, FoodWasteLevel::Medium, FoodWasteLevel::High];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodWasteLevel::Low => "low",
            FoodWasteLevel::Medium => "medium",
            FoodWasteLevel::High => "high",
        }
    }
}

/// Food answers
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NutritionProfile {
    pub diet_type: DietType,
    pub regional_seasonal: bool,
    pub food_waste_level: FoodWasteLevel,
}

// ============================================================================
// Consumption
// ============================================================================

/// How often new goods are bought
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShoppingFrequency {
    Minimal,
    #[default]
    Moderate,
    Frequent,
}

impl ShoppingFrequency {
    pub const ALL: [ShoppingFrequency; 3] = [
        ShoppingFrequency::Minimal,
        ShoppingFrequency::Moderate,
        ShoppingFrequency::Frequent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShoppingFrequency::Minimal => "minimal",
            ShoppingFrequency::Moderate => "moderate",
            ShoppingFrequency::Frequent => "frequent",
        }
    }
}

/// Streaming, devices and cloud usage
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DigitalConsumption {
    Low,
    #[default]
    Medium,
    High,
}

impl DigitalConsumption {
    pub const ALL: [DigitalConsumption; 3] = [
        DigitalConsumption::Low,
        DigitalConsumption::Medium,
        DigitalConsumption::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DigitalConsumption::Low => "low",
            DigitalConsumption::Medium => "medium",
            DigitalConsumption::High => "high",
        }
    }
}

/// Shopping answers
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsumptionProfile {
    pub shopping_frequency: ShoppingFrequency,
    pub secondhand_preference: bool,
    pub digital_consumption: DigitalConsumption,
}

/// The complete questionnaire fed to the calculator
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LifestyleProfile {
    pub housing: HousingProfile,
    pub mobility: MobilityProfile,
    pub nutrition: NutritionProfile,
    pub consumption: ConsumptionProfile,
}

// ============================================================================
// Result Types
// ============================================================================

/// One of the four independent footprint dimensions
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FootprintCategory {
    Housing,
    Mobility,
    Nutrition,
    Consumption,
}

impl FootprintCategory {
    pub const ALL: [FootprintCategory; 4] = [
        FootprintCategory::Housing,
        FootprintCategory::Mobility,
        FootprintCategory::Nutrition,
        FootprintCategory::Consumption,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FootprintCategory::Housing => "housing",
            FootprintCategory::Mobility => "mobility",
            FootprintCategory::Nutrition => "nutrition",
            FootprintCategory::Consumption => "consumption",
        }
    }
}

impl fmt::Display for FootprintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-category emissions.
///
/// Category values are kept unrounded so `total_kg` is exactly their sum;
/// percentages are rounded to one decimal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FootprintBreakdown {
    pub housing_kg: f64,
    pub mobility_kg: f64,
    pub nutrition_kg: f64,
    pub consumption_kg: f64,
    pub total_kg: f64,

    pub housing_percent: f64,
    pub mobility_percent: f64,
    pub nutrition_percent: f64,
    pub consumption_percent: f64,
}

impl FootprintBreakdown {
    /// Emissions for a single category
    pub fn kg(&self, category: FootprintCategory) -> f64 {
        match category {
            FootprintCategory::Housing => self.housing_kg,
            FootprintCategory::Mobility => self.mobility_kg,
            FootprintCategory::Nutrition => self.nutrition_kg,
            FootprintCategory::Consumption => self.consumption_kg,
        }
    }

    /// Share of the total for a single category
    pub fn percent(&self, category: FootprintCategory) -> f64 {
        match category {
            FootprintCategory::Housing => self.housing_percent,
            FootprintCategory::Mobility => self.mobility_percent,
            FootprintCategory::Nutrition => self.nutrition_percent,
            FootprintCategory::Consumption => self.consumption_percent,
        }
    }
}

/// User total against the three reference footprints
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FootprintComparison {
    pub user_total_kg: f64,
    pub germany_average_kg: f64,
    pub world_average_kg: f64,
    pub paris_target_kg: f64,

    /// Signed: positive means above the reference
    pub vs_germany_percent: f64,
    pub vs_world_percent: f64,
    pub vs_paris_percent: f64,
}

/// Effort tier of a recommendation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single actionable reduction with its independent savings estimate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub category: FootprintCategory,
    pub action: String,
    pub potential_savings_kg: f64,
    pub difficulty: Difficulty,
    /// Challenge that trains this behaviour, if one exists
    pub challenge_id: Option<String>,
}

/// Complete output of one calculation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FootprintResult {
    pub calculation_version: String,
    pub calculated_at: DateTime<Utc>,

    pub total_co2_kg_year: f64,
    pub breakdown: FootprintBreakdown,
    pub comparison: FootprintComparison,

    /// At most five, highest savings first
    pub recommendations: Vec<Recommendation>,

    /// 0-10, 10 being Paris-compatible
    pub sec_score: f64,

    /// Set by callers that stored the profile; the calculator leaves it false
    pub profile_complete: bool,
}
