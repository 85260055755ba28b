//! Emission factor table.
//!
//! The table is the single source of truth for every intensity the calculator
//! and the recommendation rules use. Values follow UBA/TREMOD/ifeu 2024 and
//! only change together with a version bump.

use crate::types::{
    CarFuelType, DietType, DigitalConsumption, FoodWasteLevel, HeatingType, ShoppingFrequency,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Version tag stored alongside every result computed with the standard table
pub const FACTOR_TABLE_VERSION: &str = "1.0";

/// Representative short-haul trip (< 1,500 km)
pub const SHORT_HAUL_DISTANCE_KM: f64 = 750.0;
/// Short-haul kg CO₂e per km, radiative forcing included
pub const SHORT_HAUL_KG_PER_KM: f64 = 0.380;
/// Representative long-haul trip (> 1,500 km)
pub const LONG_HAUL_DISTANCE_KM: f64 = 6000.0;
/// Long-haul kg CO₂e per km, radiative forcing included
pub const LONG_HAUL_KG_PER_KM: f64 = 0.280;

/// Built once per process and never mutated afterwards
static STANDARD_TABLE: Lazy<EmissionFactorTable> = Lazy::new(build_standard_table);

/// Get a reference to the process-wide standard factor table
pub fn standard_table() -> &'static EmissionFactorTable {
    &STANDARD_TABLE
}

/// Unit of a factor entry
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FactorUnit {
    KgCo2PerKwh,
    KgCo2PerKm,
    KgCo2PerFlight,
    KgCo2PerYear,
    KwhPerSqmYear,
    KwhPerPersonYear,
    Multiplier,
}

impl FactorUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            FactorUnit::KgCo2PerKwh => "kg CO2e/kWh",
            FactorUnit::KgCo2PerKm => "kg CO2e/km",
            FactorUnit::KgCo2PerFlight => "kg CO2e/flight",
            FactorUnit::KgCo2PerYear => "kg CO2e/year",
            FactorUnit::KwhPerSqmYear => "kWh/m²/year",
            FactorUnit::KwhPerPersonYear => "kWh/person/year",
            FactorUnit::Multiplier => "×",
        }
    }
}

impl fmt::Display for FactorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One (category, subcategory) row of the table, for display
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FactorEntry {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub value: f64,
    pub unit: FactorUnit,
}

/// Where the factors come from
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FactorSource {
    pub name: &'static str,
    pub url: &'static str,
}

pub const FACTOR_SOURCES: [FactorSource; 4] = [
    FactorSource {
        name: "UBA",
        url: "https://www.umweltbundesamt.de/themen/klima-energie/energieverbrauch",
    },
    FactorSource {
        name: "TREMOD",
        url: "https://www.ifeu.de/en/methods/models/tremod/",
    },
    FactorSource {
        name: "ifeu",
        url: "https://www.ifeu.de/",
    },
    FactorSource {
        name: "atmosfair",
        url: "https://www.atmosfair.de/de/kompensieren/fliegen/",
    },
];

/// Immutable intensity table, indexed by the questionnaire enums
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionFactorTable {
    version: String,
    heating: [f64; 6],
    electricity_grid: f64,
    electricity_green: f64,
    car: [f64; 4],
    public_transport: f64,
    flight_short_haul: f64,
    flight_long_haul: f64,
    diet: [f64; 5],
    shopping: [f64; 3],
    digital: [f64; 3],
    heating_kwh_per_sqm: f64,
    electricity_kwh_per_person: f64,
    regional_multiplier: f64,
    food_waste: [f64; 3],
    secondhand_multiplier: f64,
}

fn build_standard_table() -> EmissionFactorTable {
    tracing::debug!("Building emission factor table v{}", FACTOR_TABLE_VERSION);

    EmissionFactorTable {
        version: FACTOR_TABLE_VERSION.to_string(),
        // gas, oil, district, heatpump, wood, electric
        heating: [0.201, 0.266, 0.183, 0.097, 0.023, 0.380],
        electricity_grid: 0.380,
        electricity_green: 0.020,
        // petrol, diesel, hybrid, electric
        car: [0.152, 0.142, 0.105, 0.053],
        public_transport: 0.055,
        flight_short_haul: SHORT_HAUL_DISTANCE_KM * SHORT_HAUL_KG_PER_KM,
        flight_long_haul: LONG_HAUL_DISTANCE_KM * LONG_HAUL_KG_PER_KM,
        // vegan, vegetarian, flexitarian, mixed, meat_heavy
        diet: [940.0, 1220.0, 1580.0, 1760.0, 2400.0],
        // minimal, moderate, frequent
        shopping: [1200.0, 2200.0, 3500.0],
        // low, medium, high
        digital: [50.0, 150.0, 350.0],
        heating_kwh_per_sqm: 120.0,
        electricity_kwh_per_person: 1300.0,
        regional_multiplier: 0.90,
        food_waste: [0.95, 1.00, 1.10],
        secondhand_multiplier: 0.85,
    }
}

impl EmissionFactorTable {
    pub fn version(&self) -> &str {
        &self.version
    }

    /// kg CO₂e per kWh of heat
    pub fn heating(&self, fuel: HeatingType) -> f64 {
        self.heating[fuel as usize]
    }

    /// kg CO₂e per kWh of electricity
    pub fn electricity(&self, green: bool) -> f64 {
        if green {
            self.electricity_green
        } else {
            self.electricity_grid
        }
    }

    /// kg CO₂e per car km
    pub fn car(&self, fuel: CarFuelType) -> f64 {
        self.car[fuel as usize]
    }

    /// kg CO₂e per public-transport km, all modes averaged
    pub fn public_transport(&self) -> f64 {
        self.public_transport
    }

    /// kg CO₂e per average short-haul flight
    pub fn flight_short_haul(&self) -> f64 {
        self.flight_short_haul
    }

    /// kg CO₂e per average long-haul flight
    pub fn flight_long_haul(&self) -> f64 {
        self.flight_long_haul
    }

    /// Annual baseline for a diet
    pub fn diet(&self, diet: DietType) -> f64 {
        self.diet[diet as usize]
    }

    /// Annual baseline for a shopping tier
    pub fn shopping(&self, frequency: ShoppingFrequency) -> f64 {
        self.shopping[frequency as usize]
    }

    /// Annual digital consumption term
    pub fn digital(&self, level: DigitalConsumption) -> f64 {
        self.digital[level as usize]
    }

    /// Heating estimate when no consumption is supplied
    pub fn heating_kwh_per_sqm(&self) -> f64 {
        self.heating_kwh_per_sqm
    }

    /// Electricity estimate when no consumption is supplied
    pub fn electricity_kwh_per_person(&self) -> f64 {
        self.electricity_kwh_per_person
    }

    pub fn regional_multiplier(&self) -> f64 {
        self.regional_multiplier
    }

    pub fn food_waste_multiplier(&self, level: FoodWasteLevel) -> f64 {
        self.food_waste[level as usize]
    }

    pub fn secondhand_multiplier(&self) -> f64 {
        self.secondhand_multiplier
    }

    /// Flatten the table into display rows, in a stable order
    pub fn entries(&self) -> Vec<FactorEntry> {
        let mut entries = Vec::with_capacity(40);

        for fuel in HeatingType::ALL {
            entries.push(entry("heating", fuel.as_str(), self.heating(fuel), FactorUnit::KgCo2PerKwh));
        }
        entries.push(entry("electricity", "mix", self.electricity_grid, FactorUnit::KgCo2PerKwh));
        entries.push(entry("electricity", "green", self.electricity_green, FactorUnit::KgCo2PerKwh));
        for fuel in CarFuelType::ALL {
            entries.push(entry("car", fuel.as_str(), self.car(fuel), FactorUnit::KgCo2PerKm));
        }
        entries.push(entry(
            "public_transport",
            "average",
            self.public_transport,
            FactorUnit::KgCo2PerKm,
        ));
        entries.push(entry("flight", "short", self.flight_short_haul, FactorUnit::KgCo2PerFlight));
        entries.push(entry("flight", "long", self.flight_long_haul, FactorUnit::KgCo2PerFlight));
        for diet in DietType::ALL {
            entries.push(entry("diet", diet.as_str(), self.diet(diet), FactorUnit::KgCo2PerYear));
        }
        for frequency in ShoppingFrequency::ALL {
            entries.push(entry(
                "consumption",
                frequency.as_str(),
                self.shopping(frequency),
                FactorUnit::KgCo2PerYear,
            ));
        }
        for level in DigitalConsumption::ALL {
            entries.push(entry("digital", level.as_str(), self.digital(level), FactorUnit::KgCo2PerYear));
        }
        entries.push(entry(
            "defaults",
            "heating_kwh_per_sqm",
            self.heating_kwh_per_sqm,
            FactorUnit::KwhPerSqmYear,
        ));
        entries.push(entry(
            "defaults",
            "electricity_kwh_per_person",
            self.electricity_kwh_per_person,
            FactorUnit::KwhPerPersonYear,
        ));
        entries.push(entry("adjustments", "regional_seasonal", self.regional_multiplier, FactorUnit::Multiplier));
        for level in FoodWasteLevel::ALL {
            entries.push(entry(
                "food_waste",
                level.as_str(),
                self.food_waste_multiplier(level),
                FactorUnit::Multiplier,
            ));
        }
        entries.push(entry("adjustments", "secondhand", self.secondhand_multiplier, FactorUnit::Multiplier));

        entries
    }

    /// Look up a single row by its display key
    pub fn get(&self, category: &str, subcategory: &str) -> Option<FactorEntry> {
        self.entries()
            .into_iter()
            .find(|e| e.category == category && e.subcategory == subcategory)
    }

    /// Validate the table for internal consistency
    ///
    /// Returns a list of error messages (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.version.trim().is_empty() {
            errors.push("Factor table has an empty version tag".to_string());
        }

        for e in self.entries() {
            if !e.value.is_finite() {
                errors.push(format!(
                    "Factor {}/{} is not finite ({})",
                    e.category, e.subcategory, e.value
                ));
            } else if e.value < 0.0 {
                errors.push(format!(
                    "Factor {}/{} is negative ({})",
                    e.category, e.subcategory, e.value
                ));
            }
        }

        if self.electricity_green >= self.electricity_grid {
            errors.push(format!(
                "Green electricity factor {} must be below grid mix {}",
                self.electricity_green, self.electricity_grid
            ));
        }

        for (name, multiplier) in [
            ("regional_seasonal", self.regional_multiplier),
            ("secondhand", self.secondhand_multiplier),
        ] {
            if multiplier > 1.0 {
                errors.push(format!(
                    "Reduction multiplier {} must not exceed 1.0 ({})",
                    name, multiplier
                ));
            }
        }

        errors
    }
}

fn entry(category: &'static str, subcategory: &'static str, value: f64, unit: FactorUnit) -> FactorEntry {
    FactorEntry {
        category,
        subcategory,
        value,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_validates() {
        let errors = standard_table().validate();
        assert!(
            errors.is_empty(),
            "Standard table has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_enum_indexed_lookups() {
        let table = standard_table();
        assert_eq!(table.heating(HeatingType::Gas), 0.201);
        assert_eq!(table.heating(HeatingType::Heatpump), 0.097);
        assert_eq!(table.heating(HeatingType::Electric), 0.380);
        assert_eq!(table.car(CarFuelType::Diesel), 0.142);
        assert_eq!(table.car(CarFuelType::Electric), 0.053);
        assert_eq!(table.diet(DietType::Vegan), 940.0);
        assert_eq!(table.diet(DietType::MeatHeavy), 2400.0);
        assert_eq!(table.shopping(ShoppingFrequency::Frequent), 3500.0);
        assert_eq!(table.digital(DigitalConsumption::High), 350.0);
        assert_eq!(table.food_waste_multiplier(FoodWasteLevel::High), 1.10);
    }

    #[test]
    fn test_flight_factors_are_distance_times_intensity() {
        let table = standard_table();
        assert_eq!(table.flight_short_haul(), 750.0 * 0.380);
        assert_eq!(table.flight_long_haul(), 6000.0 * 0.280);
        assert!((table.flight_long_haul() - 1680.0).abs() < 1e-9);
    }

    #[test]
    fn test_entries_cover_every_variant() {
        let table = standard_table();
        let entries = table.entries();

        for fuel in HeatingType::ALL {
            assert!(table.get("heating", fuel.as_str()).is_some());
        }
        for diet in DietType::ALL {
            assert!(table.get("diet", diet.as_str()).is_some());
        }
        assert_eq!(
            table.get("electricity", "green").map(|e| e.value),
            Some(0.020)
        );
        assert!(entries.iter().all(|e| e.value.is_finite()));
    }

    #[test]
    fn test_corrupted_table_is_reported() {
        let mut table = standard_table().clone();
        table.car[0] = f64::NAN;
        table.electricity_green = 0.5;
        table.version = String::new();

        let errors = table.validate();
        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert!(errors.iter().any(|e| e.contains("car/petrol")));
    }

    #[test]
    fn test_standard_table_is_shared() {
        assert!(std::ptr::eq(standard_table(), standard_table()));
    }
}
