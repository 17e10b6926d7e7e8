//! Scoring tables
//!
//! Every weight the calculator uses, keyed by answer enum. The constants are
//! fixed; changing any of them changes every published result.

use super::answers::{
    CarType, ClothesFrequency, DietType, ElectronicsFrequency, FoodWaste, HeatingType, LocalFood,
    PublicTransport, RecyclingLevel, RenewableEnergy,
};

/// Weeks per year for weekly driving
pub const WEEKS_PER_YEAR: f64 = 52.0;
/// Months per year for the electricity bill
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// kg CO2 per dollar of electricity
pub const ELECTRICITY_KG_PER_DOLLAR: f64 = 0.5;
/// kg CO2 per year of a reference heating system
pub const HEATING_BASE_KG: f64 = 2000.0;
/// kg CO2 per short-haul flight
pub const SHORT_FLIGHT_KG: f64 = 250.0;
/// kg CO2 per long-haul flight
pub const LONG_FLIGHT_KG: f64 = 1500.0;
/// kg CO2 one tree absorbs per year
pub const TREE_ABSORPTION_KG: f64 = 22.0;

impl CarType {
    /// kg CO2 per mile
    pub const fn emission_factor(self) -> f64 {
        match self {
            CarType::Electric => 0.1,
            CarType::Hybrid => 0.15,
            CarType::Gasoline => 0.25,
            CarType::Diesel => 0.27,
        }
    }
}

impl PublicTransport {
    /// Flat yearly adjustment in kg; negative values reduce the total
    pub const fn adjustment(self) -> f64 {
        match self {
            PublicTransport::Never => 0.0,
            PublicTransport::Sometimes => -200.0,
            PublicTransport::Often => -500.0,
            PublicTransport::Always => -800.0,
        }
    }
}

impl HeatingType {
    pub const fn factor(self) -> f64 {
        match self {
            HeatingType::Electric => 1.0,
            HeatingType::Gas => 1.2,
            HeatingType::Oil => 1.5,
            HeatingType::Renewable => 0.3,
        }
    }
}

impl RenewableEnergy {
    /// Multiplier on the running total
    pub const fn multiplier(self) -> f64 {
        match self {
            RenewableEnergy::Yes => 0.7,
            RenewableEnergy::Partial => 0.85,
            RenewableEnergy::No => 1.0,
        }
    }
}

impl DietType {
    /// Flat yearly kg
    pub const fn base_kg(self) -> f64 {
        match self {
            DietType::Vegan => 1500.0,
            DietType::Vegetarian => 1700.0,
            DietType::Pescatarian => 2000.0,
            DietType::Mixed => 2500.0,
            DietType::MeatHeavy => 3500.0,
        }
    }
}

impl LocalFood {
    /// Multiplier on the running total
    pub const fn multiplier(self) -> f64 {
        match self {
            LocalFood::Always => 0.8,
            LocalFood::Often => 0.9,
            LocalFood::Sometimes => 1.0,
            LocalFood::Rarely => 1.1,
        }
    }
}

impl FoodWaste {
    /// Multiplier on the running total
    pub const fn multiplier(self) -> f64 {
        match self {
            FoodWaste::None => 0.9,
            FoodWaste::Some => 1.0,
            FoodWaste::Lots => 1.2,
        }
    }
}

impl ClothesFrequency {
    pub const fn base_kg(self) -> f64 {
        match self {
            ClothesFrequency::Rarely => 100.0,
            ClothesFrequency::Quarterly => 200.0,
            ClothesFrequency::Monthly => 400.0,
            ClothesFrequency::Weekly => 800.0,
        }
    }
}

impl ElectronicsFrequency {
    pub const fn base_kg(self) -> f64 {
        match self {
            ElectronicsFrequency::Rarely => 50.0,
            ElectronicsFrequency::Yearly => 150.0,
            ElectronicsFrequency::Often => 400.0,
        }
    }
}

impl RecyclingLevel {
    /// Multiplier on the running total
    pub const fn multiplier(self) -> f64 {
        match self {
            RecyclingLevel::All => 0.85,
            RecyclingLevel::Most => 0.9,
            RecyclingLevel::Some => 1.0,
            RecyclingLevel::None => 1.15,
        }
    }
}
