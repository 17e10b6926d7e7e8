//! The calculator answer sheet

use serde::{Deserialize, Serialize};

/// Vehicle driven most often
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CarType {
    Electric,
    Hybrid,
    Gasoline,
    Diesel,
}

/// How often public transport replaces the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublicTransport {
    Never,
    Sometimes,
    Often,
    Always,
}

/// Primary home heating source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeatingType {
    Electric,
    Gas,
    Oil,
    Renewable,
}

/// Share of household electricity from renewable sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenewableEnergy {
    Yes,
    Partial,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietType {
    Vegan,
    Vegetarian,
    Pescatarian,
    Mixed,
    MeatHeavy,
}

/// How often food is bought locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalFood {
    Always,
    Often,
    Sometimes,
    Rarely,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FoodWaste {
    None,
    Some,
    Lots,
}

/// How often new clothes are bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClothesFrequency {
    Rarely,
    Quarterly,
    Monthly,
    Weekly,
}

/// How often new electronics are bought
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElectronicsFrequency {
    Rarely,
    Yearly,
    Often,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecyclingLevel {
    All,
    Most,
    Some,
    None,
}

/// Inclusive slider range with its UI step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl SliderRange {
    /// Clamp a value into the range
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

pub const CAR_MILES_RANGE: SliderRange = SliderRange { min: 0, max: 500, step: 10 };
pub const ELECTRICITY_BILL_RANGE: SliderRange = SliderRange { min: 0, max: 500, step: 10 };
pub const SHORT_FLIGHTS_RANGE: SliderRange = SliderRange { min: 0, max: 20, step: 1 };
pub const LONG_FLIGHTS_RANGE: SliderRange = SliderRange { min: 0, max: 10, step: 1 };

/// One complete answer sheet
///
/// Categorical answers are enums, so only the four sliders need range
/// checks; [`FootprintAnswers::clamped`] pulls them into range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootprintAnswers {
    // Transportation
    pub car_miles_per_week: u32,
    pub car_type: CarType,
    pub public_transport_frequency: PublicTransport,

    // Home energy
    pub monthly_electricity_bill: u32,
    pub heating_type: HeatingType,
    pub uses_renewable_energy: RenewableEnergy,

    // Food
    pub diet_type: DietType,
    pub local_food_frequency: LocalFood,
    pub food_waste_level: FoodWaste,

    // Shopping
    pub new_clothes_frequency: ClothesFrequency,
    pub electronics_frequency: ElectronicsFrequency,
    pub recycling_level: RecyclingLevel,

    // Air travel
    pub short_flights_per_year: u32,
    pub long_flights_per_year: u32,
}

impl FootprintAnswers {
    /// Copy with every slider clamped to its documented range
    pub fn clamped(&self) -> Self {
        Self {
            car_miles_per_week: CAR_MILES_RANGE.clamp(self.car_miles_per_week),
            monthly_electricity_bill: ELECTRICITY_BILL_RANGE.clamp(self.monthly_electricity_bill),
            short_flights_per_year: SHORT_FLIGHTS_RANGE.clamp(self.short_flights_per_year),
            long_flights_per_year: LONG_FLIGHTS_RANGE.clamp(self.long_flights_per_year),
            ..self.clone()
        }
    }
}

impl Default for FootprintAnswers {
    fn default() -> Self {
        Self {
            car_miles_per_week: 50,
            car_type: CarType::Gasoline,
            public_transport_frequency: PublicTransport::Sometimes,
            monthly_electricity_bill: 100,
            heating_type: HeatingType::Gas,
            uses_renewable_energy: RenewableEnergy::No,
            diet_type: DietType::Mixed,
            local_food_frequency: LocalFood::Sometimes,
            food_waste_level: FoodWaste::Some,
            new_clothes_frequency: ClothesFrequency::Monthly,
            electronics_frequency: ElectronicsFrequency::Yearly,
            recycling_level: RecyclingLevel::Most,
            short_flights_per_year: 0,
            long_flights_per_year: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_sliders() {
        let answers = FootprintAnswers {
            car_miles_per_week: 900,
            monthly_electricity_bill: 501,
            short_flights_per_year: 25,
            long_flights_per_year: 11,
            ..FootprintAnswers::default()
        }
        .clamped();

        assert_eq!(answers.car_miles_per_week, 500);
        assert_eq!(answers.monthly_electricity_bill, 500);
        assert_eq!(answers.short_flights_per_year, 20);
        assert_eq!(answers.long_flights_per_year, 10);
        assert_eq!(answers.car_type, CarType::Gasoline);
    }

    #[test]
    fn test_answer_sheet_from_ron() {
        let answers: FootprintAnswers =
            ron::from_str("(dietType: meatHeavy, carType: diesel, longFlightsPerYear: 2)").unwrap();

        assert_eq!(answers.diet_type, DietType::MeatHeavy);
        assert_eq!(answers.car_type, CarType::Diesel);
        assert_eq!(answers.long_flights_per_year, 2);
        // Unspecified fields fall back to the default sheet
        assert_eq!(answers.recycling_level, RecyclingLevel::Most);
    }
}
