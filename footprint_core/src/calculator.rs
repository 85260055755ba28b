//! Footprint calculation engine.
//!
//! Maps a [`LifestyleProfile`] to a [`FootprintResult`]:
//! - Housing: heating and electricity, normalized per household member
//! - Mobility: car, public transport, flights (cycling is emission-free)
//! - Nutrition: diet baseline with sourcing and food-waste multipliers
//! - Consumption: shopping baseline with secondhand discount, plus digital
//!
//! The calculator holds nothing but a borrowed, immutable factor table, so it
//! is `Copy` and can be shared freely across threads. Input is expected to be
//! validated already (see [`LifestyleProfile::validate`]); there is no error
//! path.

use crate::averages::compare;
use crate::factors::{standard_table, EmissionFactorTable};
use crate::recommendations::generate_recommendations;
use crate::rounding::round_to;
use crate::score::score_for;
use crate::types::{
    ConsumptionProfile, FootprintBreakdown, FootprintResult, HousingProfile, LifestyleProfile,
    MobilityProfile, NutritionProfile,
};
use chrono::{DateTime, Utc};

/// Deterministic footprint engine bound to one factor table
#[derive(Clone, Copy, Debug)]
pub struct FootprintCalculator<'t> {
    factors: &'t EmissionFactorTable,
}

impl Default for FootprintCalculator<'static> {
    fn default() -> Self {
        Self::new(standard_table())
    }
}

impl<'t> FootprintCalculator<'t> {
    pub fn new(factors: &'t EmissionFactorTable) -> Self {
        Self { factors }
    }

    /// Version tag of the factor table in use
    pub fn version(&self) -> &'t str {
        self.factors.version()
    }

    /// The full factor table, for display
    pub fn factors(&self) -> &'t EmissionFactorTable {
        self.factors
    }

    /// Score a total without a full profile (e.g. a stored historical total)
    pub fn score_for(&self, total_kg: f64) -> f64 {
        score_for(total_kg)
    }

    /// Calculate the complete footprint, stamped with the current time
    pub fn calculate(&self, profile: &LifestyleProfile) -> FootprintResult {
        self.calculate_at(profile, Utc::now())
    }

    /// Calculate the complete footprint with an explicit timestamp
    ///
    /// Identical inputs give bit-identical results.
    pub fn calculate_at(
        &self,
        profile: &LifestyleProfile,
        calculated_at: DateTime<Utc>,
    ) -> FootprintResult {
        let breakdown = self.breakdown(profile);
        let total_kg = breakdown.total_kg;

        let comparison = compare(total_kg);
        let recommendations = generate_recommendations(self, profile, &breakdown);
        let sec_score = score_for(total_kg);

        tracing::debug!(
            total_kg,
            sec_score,
            recommendations = recommendations.len(),
            "Calculated footprint with factors v{}",
            self.version()
        );

        FootprintResult {
            calculation_version: self.version().to_string(),
            calculated_at,
            total_co2_kg_year: total_kg,
            breakdown,
            comparison,
            recommendations,
            sec_score,
            profile_complete: false,
        }
    }

    /// Category totals and their shares of the overall footprint
    pub fn breakdown(&self, profile: &LifestyleProfile) -> FootprintBreakdown {
        let housing_kg = self.housing_kg(&profile.housing);
        let mobility_kg = self.mobility_kg(&profile.mobility);
        let nutrition_kg = self.nutrition_kg(&profile.nutrition);
        let consumption_kg = self.consumption_kg(&profile.consumption);

        let total_kg = housing_kg + mobility_kg + nutrition_kg + consumption_kg;
        debug_assert!(
            total_kg.is_finite() && total_kg >= 0.0,
            "footprint total must be finite and non-negative, got {}",
            total_kg
        );

        let share = |kg: f64| {
            if total_kg > 0.0 {
                round_to(kg / total_kg * 100.0, 1)
            } else {
                0.0
            }
        };

        FootprintBreakdown {
            housing_kg,
            mobility_kg,
            nutrition_kg,
            consumption_kg,
            total_kg,
            housing_percent: share(housing_kg),
            mobility_percent: share(mobility_kg),
            nutrition_percent: share(nutrition_kg),
            consumption_percent: share(consumption_kg),
        }
    }

    /// Heating plus electricity, per household member
    pub fn housing_kg(&self, housing: &HousingProfile) -> f64 {
        let members = f64::from(housing.household_members.get());

        // A reported consumption of 0 counts as "not reported"
        let heating_kwh = match housing.heating_consumption_kwh {
            Some(kwh) if kwh > 0 => f64::from(kwh),
            _ => f64::from(housing.housing_size_sqm) * self.factors.heating_kwh_per_sqm(),
        };
        let heating = heating_kwh / members * self.factors.heating(housing.heating_type);

        let electricity = self.electricity_kwh_per_person(housing)
            * self.factors.electricity(housing.green_electricity);

        heating + electricity
    }

    /// Electricity attributed to one household member (kWh/year)
    pub fn electricity_kwh_per_person(&self, housing: &HousingProfile) -> f64 {
        match housing.electricity_kwh {
            Some(kwh) if kwh > 0 => f64::from(kwh) / f64::from(housing.household_members.get()),
            _ => self.factors.electricity_kwh_per_person(),
        }
    }

    /// Car, public transport and flights
    pub fn mobility_kg(&self, mobility: &MobilityProfile) -> f64 {
        let car = match (mobility.has_car, mobility.car_fuel_type) {
            (true, Some(fuel)) if mobility.car_km_year > 0 => {
                f64::from(mobility.car_km_year) * self.factors.car(fuel)
            }
            _ => 0.0,
        };

        let public_transport =
            f64::from(mobility.public_transport_km_year) * self.factors.public_transport();

        let flights = f64::from(mobility.flights_short_haul) * self.factors.flight_short_haul()
            + f64::from(mobility.flights_long_haul) * self.factors.flight_long_haul();

        car + public_transport + flights
    }

    /// Diet baseline with sourcing and food-waste adjustments
    pub fn nutrition_kg(&self, nutrition: &NutritionProfile) -> f64 {
        let mut co2 = self.factors.diet(nutrition.diet_type);

        if nutrition.regional_seasonal {
            co2 *= self.factors.regional_multiplier();
        }
        co2 *= self.factors.food_waste_multiplier(nutrition.food_waste_level);

        co2
    }

    /// Shopping baseline (discounted for secondhand) plus the digital term
    pub fn consumption_kg(&self, consumption: &ConsumptionProfile) -> f64 {
        self.shopping_kg(consumption) + self.factors.digital(consumption.digital_consumption)
    }

    /// Shopping part of consumption only; the digital term is never discounted
    pub fn shopping_kg(&self, consumption: &ConsumptionProfile) -> f64 {
        let base = self.factors.shopping(consumption.shopping_frequency);
        if consumption.secondhand_preference {
            base * self.factors.secondhand_multiplier()
        } else {
            base
        }
    }
}
