//! Recommendation rules.
//!
//! Each rule is an independent predicate over the profile plus a savings
//! estimate derived from the same factor table the calculator uses. Rules are
//! evaluated in declaration order, then the emitted recommendations are
//! re-sorted by savings, so evaluation order never decides what is shown.
//!
//! Savings are independent estimates. They do not compose and must not be
//! summed into a combined potential.

use crate::calculator::FootprintCalculator;
use crate::rounding::round_to;
use crate::types::{
    Difficulty, DietType, FootprintBreakdown, FootprintCategory, HeatingType, LifestyleProfile,
    Recommendation, ShoppingFrequency,
};

/// Most recommendations returned for one calculation
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Short-haul flights per year that are not flagged
const SHORT_HAUL_ALLOWANCE: u32 = 2;

/// Annual car km above which a modal shift is suggested
const CAR_SHIFT_THRESHOLD_KM: u32 = 5_000;

/// Share of car km moved to public transport or bike
const CAR_SHIFT_SHARE: f64 = 0.3;

/// Share of long-haul flights dropped
const LONG_HAUL_REDUCTION_SHARE: f64 = 0.5;

/// Housing emissions removed by replacing oil or electric heating
const HEATING_SWITCH_SHARE: f64 = 0.4;

/// The fixed rule set, in declaration order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecommendationRule {
    ReduceLongHaulFlights,
    ReplaceShortHaulFlights,
    ShiftCarTrips,
    SwitchToGreenElectricity,
    ReplaceFossilHeating,
    ReduceMeat,
    BuyRegionalSeasonal,
    BuyLess,
    PreferSecondhand,
}

impl RecommendationRule {
    pub const ALL: [RecommendationRule; 9] = [
        RecommendationRule::ReduceLongHaulFlights,
        RecommendationRule::ReplaceShortHaulFlights,
        RecommendationRule::ShiftCarTrips,
        RecommendationRule::SwitchToGreenElectricity,
        RecommendationRule::ReplaceFossilHeating,
        RecommendationRule::ReduceMeat,
        RecommendationRule::BuyRegionalSeasonal,
        RecommendationRule::BuyLess,
        RecommendationRule::PreferSecondhand,
    ];

    pub fn category(self) -> FootprintCategory {
        match self {
            RecommendationRule::ReduceLongHaulFlights
            | RecommendationRule::ReplaceShortHaulFlights
            | RecommendationRule::ShiftCarTrips => FootprintCategory::Mobility,
            RecommendationRule::SwitchToGreenElectricity
            | RecommendationRule::ReplaceFossilHeating => FootprintCategory::Housing,
            RecommendationRule::ReduceMeat | RecommendationRule::BuyRegionalSeasonal => {
                FootprintCategory::Nutrition
            }
            RecommendationRule::BuyLess | RecommendationRule::PreferSecondhand => {
                FootprintCategory::Consumption
            }
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            RecommendationRule::ReduceLongHaulFlights => {
                "Halve long-haul flights or replace them with rail"
            }
            RecommendationRule::ReplaceShortHaulFlights => "Replace short-haul flights with rail",
            RecommendationRule::ShiftCarTrips => {
                "Replace 30% of car trips with public transport or cycling"
            }
            RecommendationRule::SwitchToGreenElectricity => "Switch to green electricity",
            RecommendationRule::ReplaceFossilHeating => {
                "Move heating to a heat pump or district heating"
            }
            RecommendationRule::ReduceMeat => "Eat less meat (flexitarian diet)",
            RecommendationRule::BuyRegionalSeasonal => "Buy more regional and seasonal produce",
            RecommendationRule::BuyLess => "Shop more consciously and buy fewer new products",
            RecommendationRule::PreferSecondhand => "Prefer secondhand products",
        }
    }

    pub fn difficulty(self) -> Difficulty {
        match self {
            RecommendationRule::ReduceLongHaulFlights | RecommendationRule::ReplaceFossilHeating => {
                Difficulty::Hard
            }
            RecommendationRule::ReplaceShortHaulFlights
            | RecommendationRule::ShiftCarTrips
            | RecommendationRule::ReduceMeat
            | RecommendationRule::BuyLess => Difficulty::Medium,
            RecommendationRule::SwitchToGreenElectricity
            | RecommendationRule::BuyRegionalSeasonal
            | RecommendationRule::PreferSecondhand => Difficulty::Easy,
        }
    }

    /// Challenge that trains this behaviour
    pub fn challenge_id(self) -> Option<&'static str> {
        match self {
            RecommendationRule::ReduceLongHaulFlights => Some("MO-3"),
            RecommendationRule::ReplaceShortHaulFlights => Some("MO-2"),
            RecommendationRule::ShiftCarTrips => Some("MO-1"),
            RecommendationRule::SwitchToGreenElectricity => Some("EN-1"),
            RecommendationRule::ReplaceFossilHeating => Some("EN-2"),
            _ => None,
        }
    }

    /// Estimated annual savings (kg CO₂e) if the rule fires, `None` otherwise
    pub fn savings_kg(
        self,
        calc: &FootprintCalculator<'_>,
        profile: &LifestyleProfile,
        breakdown: &FootprintBreakdown,
    ) -> Option<f64> {
        let factors = calc.factors();
        let housing = &profile.housing;
        let mobility = &profile.mobility;
        let nutrition = &profile.nutrition;
        let consumption = &profile.consumption;

        match self {
            RecommendationRule::ReduceLongHaulFlights => (mobility.flights_long_haul > 0).then(|| {
                f64::from(mobility.flights_long_haul)
                    * factors.flight_long_haul()
                    * LONG_HAUL_REDUCTION_SHARE
            }),

            RecommendationRule::ReplaceShortHaulFlights => {
                (mobility.flights_short_haul > SHORT_HAUL_ALLOWANCE).then(|| {
                    f64::from(mobility.flights_short_haul - SHORT_HAUL_ALLOWANCE)
                        * factors.flight_short_haul()
                })
            }

            RecommendationRule::ShiftCarTrips => {
                if !mobility.has_car || mobility.car_km_year <= CAR_SHIFT_THRESHOLD_KM {
                    return None;
                }
                let fuel = mobility.car_fuel_type.filter(|f| f.is_fossil())?;
                // Shifted km still emit at the public-transport rate
                Some(
                    f64::from(mobility.car_km_year)
                        * CAR_SHIFT_SHARE
                        * (factors.car(fuel) - factors.public_transport()),
                )
            }

            RecommendationRule::SwitchToGreenElectricity => (!housing.green_electricity).then(|| {
                // Whole-household consumption, unlike the per-person housing total
                let kwh = housing
                    .electricity_kwh
                    .filter(|kwh| *kwh > 0)
                    .map(f64::from)
                    .unwrap_or_else(|| factors.electricity_kwh_per_person());
                kwh * (factors.electricity(false) - factors.electricity(true))
            }),

            RecommendationRule::ReplaceFossilHeating => matches!(
                housing.heating_type,
                HeatingType::Oil | HeatingType::Electric
            )
            .then(|| breakdown.housing_kg * HEATING_SWITCH_SHARE),

            // Diet baselines only; sourcing and waste multipliers are left out
            RecommendationRule::ReduceMeat => matches!(
                nutrition.diet_type,
                DietType::Mixed | DietType::MeatHeavy
            )
            .then(|| factors.diet(nutrition.diet_type) - factors.diet(DietType::Flexitarian)),

            RecommendationRule::BuyRegionalSeasonal => (!nutrition.regional_seasonal)
                .then(|| breakdown.nutrition_kg * (1.0 - factors.regional_multiplier())),

            RecommendationRule::BuyLess => (consumption.shopping_frequency
                == ShoppingFrequency::Frequent)
                .then(|| {
                    factors.shopping(ShoppingFrequency::Frequent)
                        - factors.shopping(ShoppingFrequency::Moderate)
                }),

            RecommendationRule::PreferSecondhand => (!consumption.secondhand_preference)
                .then(|| breakdown.consumption_kg * (1.0 - factors.secondhand_multiplier())),
        }
    }

    /// Evaluate the rule against a profile
    pub fn evaluate(
        self,
        calc: &FootprintCalculator<'_>,
        profile: &LifestyleProfile,
        breakdown: &FootprintBreakdown,
    ) -> Option<Recommendation> {
        let savings = self.savings_kg(calc, profile, breakdown)?;

        Some(Recommendation {
            category: self.category(),
            action: self.action().to_string(),
            potential_savings_kg: round_to(savings, 0),
            difficulty: self.difficulty(),
            challenge_id: self.challenge_id().map(str::to_string),
        })
    }
}

/// Run every rule, sort by savings (highest first) and keep the top five
///
/// The sort is stable, so equal savings keep declaration order.
pub fn generate_recommendations(
    calc: &FootprintCalculator<'_>,
    profile: &LifestyleProfile,
    breakdown: &FootprintBreakdown,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RecommendationRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(calc, profile, breakdown))
        .collect();

    tracing::debug!("{} recommendation rules fired", recommendations.len());

    recommendations.sort_by(|a, b| b.potential_savings_kg.total_cmp(&a.potential_savings_kg));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
