//! Upstream validation of lifestyle profiles.
//!
//! The calculator trusts its input. Anything built from external data (a JSON
//! file, a form submission) goes through [`LifestyleProfile::validate`] first.

use crate::{Error, LifestyleProfile, Result};
use std::ops::RangeInclusive;

pub const HOUSING_SIZE_SQM: RangeInclusive<u32> = 10..=500;
pub const HOUSEHOLD_MEMBERS: RangeInclusive<u8> = 1..=10;
pub const HEATING_CONSUMPTION_KWH: RangeInclusive<u32> = 0..=50_000;
pub const ELECTRICITY_KWH: RangeInclusive<u32> = 0..=20_000;
pub const CAR_KM_YEAR: RangeInclusive<u32> = 0..=100_000;
pub const CAR_CONSUMPTION_L_100KM: RangeInclusive<f64> = 3.0..=20.0;
pub const PUBLIC_TRANSPORT_KM_YEAR: RangeInclusive<u32> = 0..=50_000;
pub const BIKE_KM_YEAR: RangeInclusive<u32> = 0..=30_000;
pub const FLIGHTS_SHORT_HAUL: RangeInclusive<u32> = 0..=50;
pub const FLIGHTS_LONG_HAUL: RangeInclusive<u32> = 0..=20;

impl LifestyleProfile {
    /// Check ranges and cross-field rules
    ///
    /// All violations are reported together in a single
    /// [`Error::Validation`].
    pub fn validate(&self) -> Result<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!("Profile rejected with {} errors", errors.len());
            Err(Error::Validation(errors.join("; ")))
        }
    }

    /// Every violated constraint, one message each (empty if valid)
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let h = &self.housing;
        let m = &self.mobility;

        check(&mut errors, "housing.housing_size_sqm", h.housing_size_sqm, &HOUSING_SIZE_SQM);
        check(
            &mut errors,
            "housing.household_members",
            h.household_members.get(),
            &HOUSEHOLD_MEMBERS,
        );
        if let Some(kwh) = h.heating_consumption_kwh {
            check(&mut errors, "housing.heating_consumption_kwh", kwh, &HEATING_CONSUMPTION_KWH);
        }
        if let Some(kwh) = h.electricity_kwh {
            check(&mut errors, "housing.electricity_kwh", kwh, &ELECTRICITY_KWH);
        }

        match (m.has_car, m.car_fuel_type) {
            (true, None) => errors.push("mobility.car_fuel_type is required when has_car is set".to_string()),
            (false, Some(fuel)) => errors.push(format!(
                "mobility.car_fuel_type '{}' given without a car",
                fuel.as_str()
            )),
            _ => {}
        }
        check(&mut errors, "mobility.car_km_year", m.car_km_year, &CAR_KM_YEAR);
        if let Some(consumption) = m.car_consumption_l_100km {
            if !CAR_CONSUMPTION_L_100KM.contains(&consumption) {
                errors.push(format!(
                    "mobility.car_consumption_l_100km {} outside {}..={}",
                    consumption,
                    CAR_CONSUMPTION_L_100KM.start(),
                    CAR_CONSUMPTION_L_100KM.end()
                ));
            }
        }
        check(
            &mut errors,
            "mobility.public_transport_km_year",
            m.public_transport_km_year,
            &PUBLIC_TRANSPORT_KM_YEAR,
        );
        check(&mut errors, "mobility.bike_km_year", m.bike_km_year, &BIKE_KM_YEAR);
        check(&mut errors, "mobility.flights_short_haul", m.flights_short_haul, &FLIGHTS_SHORT_HAUL);
        check(&mut errors, "mobility.flights_long_haul", m.flights_long_haul, &FLIGHTS_LONG_HAUL);

        errors
    }
}

fn check<T>(errors: &mut Vec<String>, field: &str, value: T, range: &RangeInclusive<T>)
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        errors.push(format!(
            "{} {} outside {}..={}",
            field,
            value,
            range.start(),
            range.end()
        ));
    }
}
