//! Footprint scoring engine
//!
//! A single running total walks through the five answer categories. Each
//! multiplier scales the whole total accumulated so far, not just its own
//! category, so the order of the steps below is part of the result.

use super::answers::{
    CarType, DietType, FoodWaste, FootprintAnswers, LocalFood, PublicTransport, RecyclingLevel,
    RenewableEnergy,
};
use super::tables::{
    ELECTRICITY_KG_PER_DOLLAR, HEATING_BASE_KG, LONG_FLIGHT_KG, MONTHS_PER_YEAR, SHORT_FLIGHT_KG,
    TREE_ABSORPTION_KG, WEEKS_PER_YEAR,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of tips in a result
pub const MAX_TIPS: usize = 5;

/// Severity bucket for a yearly total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootprintTier {
    Excellent,
    Good,
    Average,
    High,
    VeryHigh,
}

impl FootprintTier {
    /// Classify a yearly total in kg CO2
    ///
    /// Intervals are half-open with the low bound inclusive: 4000 is Good.
    pub fn classify(total_kg: i64) -> Self {
        match total_kg {
            t if t < 4000 => FootprintTier::Excellent,
            t if t < 8000 => FootprintTier::Good,
            t if t < 12000 => FootprintTier::Average,
            t if t < 16000 => FootprintTier::High,
            _ => FootprintTier::VeryHigh,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FootprintTier::Excellent => "Excellent",
            FootprintTier::Good => "Good",
            FootprintTier::Average => "Average",
            FootprintTier::High => "High",
            FootprintTier::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for FootprintTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a tip is about; no two tips in a result share a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipTopic {
    Vehicle,
    PublicTransport,
    RenewableEnergy,
    Diet,
    LocalFood,
    FoodWaste,
    Recycling,
    Flights,
}

impl TipTopic {
    /// Icon name for the front end
    pub fn icon(&self) -> &'static str {
        match self {
            TipTopic::Vehicle | TipTopic::PublicTransport => "car",
            TipTopic::RenewableEnergy => "zap",
            TipTopic::Diet => "utensils",
            TipTopic::LocalFood => "leaf",
            TipTopic::FoodWaste => "trash",
            TipTopic::Recycling => "recycle",
            TipTopic::Flights => "plane",
        }
    }
}

/// A reduction suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub topic: TipTopic,
    pub text: String,
}

struct TipRule {
    topic: TipTopic,
    applies: fn(&FootprintAnswers) -> bool,
    text: &'static str,
}

/// Tip rules in the order their tips are listed
const TIP_RULES: [TipRule; 8] = [
    TipRule {
        topic: TipTopic::Vehicle,
        applies: |a| matches!(a.car_type, CarType::Gasoline | CarType::Diesel),
        text: "Consider switching to an electric or hybrid vehicle",
    },
    TipRule {
        topic: TipTopic::PublicTransport,
        applies: |a| {
            matches!(
                a.public_transport_frequency,
                PublicTransport::Never | PublicTransport::Sometimes
            )
        },
        text: "Use public transportation more often",
    },
    TipRule {
        topic: TipTopic::RenewableEnergy,
        applies: |a| a.uses_renewable_energy == RenewableEnergy::No,
        text: "Switch to renewable energy sources",
    },
    TipRule {
        topic: TipTopic::Diet,
        applies: |a| matches!(a.diet_type, DietType::MeatHeavy | DietType::Mixed),
        text: "Reduce meat consumption, try meatless days",
    },
    TipRule {
        topic: TipTopic::LocalFood,
        applies: |a| matches!(a.local_food_frequency, LocalFood::Rarely | LocalFood::Sometimes),
        text: "Buy more local and seasonal produce",
    },
    TipRule {
        topic: TipTopic::FoodWaste,
        applies: |a| a.food_waste_level == FoodWaste::Lots,
        text: "Plan meals to reduce food waste",
    },
    TipRule {
        topic: TipTopic::Recycling,
        applies: |a| a.recycling_level != RecyclingLevel::All,
        text: "Improve your recycling habits",
    },
    TipRule {
        topic: TipTopic::Flights,
        applies: |a| a.short_flights_per_year > 2 || a.long_flights_per_year > 1,
        text: "Consider video calls instead of flying for meetings",
    },
];

/// Outcome of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    /// Rounded yearly total; not clamped at zero
    pub total_kg_co2_per_year: i64,
    pub tier: FootprintTier,
    pub trees_to_offset: i64,
    /// At most [`MAX_TIPS`], in rule order
    pub tips: Vec<Tip>,
}

/// Round half toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Unrounded yearly total for an answer sheet
pub fn running_total(answers: &FootprintAnswers) -> f64 {
    let a = answers.clamped();
    let mut total = 0.0;

    // Transportation
    total += a.car_miles_per_week as f64 * WEEKS_PER_YEAR * a.car_type.emission_factor();
    total += a.public_transport_frequency.adjustment();

    // Home energy
    total += a.monthly_electricity_bill as f64 * MONTHS_PER_YEAR * ELECTRICITY_KG_PER_DOLLAR;
    total += HEATING_BASE_KG * a.heating_type.factor();
    total *= a.uses_renewable_energy.multiplier();

    // Food
    total += a.diet_type.base_kg();
    total *= a.local_food_frequency.multiplier();
    total *= a.food_waste_level.multiplier();

    // Shopping
    total += a.new_clothes_frequency.base_kg();
    total += a.electronics_frequency.base_kg();
    total *= a.recycling_level.multiplier();

    // Air travel
    total += a.short_flights_per_year as f64 * SHORT_FLIGHT_KG;
    total += a.long_flights_per_year as f64 * LONG_FLIGHT_KG;

    total
}

/// Trees needed to absorb a yearly total
pub fn trees_to_offset(total_kg: i64) -> i64 {
    round_half_up(total_kg as f64 / TREE_ABSORPTION_KG)
}

/// Tips that apply to an answer sheet, in rule order, at most [`MAX_TIPS`]
pub fn tips_for(answers: &FootprintAnswers) -> Vec<Tip> {
    let answers = answers.clamped();
    let mut tips: Vec<Tip> = Vec::new();

    for rule in TIP_RULES.iter() {
        if tips.len() == MAX_TIPS {
            break;
        }
        if (rule.applies)(&answers) && !tips.iter().any(|t| t.topic == rule.topic) {
            tips.push(Tip {
                topic: rule.topic,
                text: rule.text.to_string(),
            });
        }
    }

    tips
}

/// Compute the footprint for an answer sheet
///
/// Pure: the same sheet always yields the same result.
pub fn compute_footprint(answers: &FootprintAnswers) -> FootprintResult {
    let total = round_half_up(running_total(answers));

    tracing::debug!(total, "computed footprint");

    FootprintResult {
        total_kg_co2_per_year: total,
        tier: FootprintTier::classify(total),
        trees_to_offset: trees_to_offset(total),
        tips: tips_for(answers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::answers::{ClothesFrequency, ElectronicsFrequency, HeatingType};

    #[test]
    fn test_default_sheet_baseline() {
        let result = compute_footprint(&FootprintAnswers::default());

        assert_eq!(result.total_kg_co2_per_year, 5850);
        assert_eq!(result.tier, FootprintTier::Good);
        assert_eq!(result.trees_to_offset, 266);
    }

    #[test]
    fn test_pure() {
        let answers = FootprintAnswers {
            car_type: CarType::Diesel,
            short_flights_per_year: 4,
            ..FootprintAnswers::default()
        };
        assert_eq!(compute_footprint(&answers), compute_footprint(&answers));
    }

    #[test]
    fn test_renewable_multiplier_scales_transport_too() {
        let answers = FootprintAnswers {
            uses_renewable_energy: RenewableEnergy::Partial,
            ..FootprintAnswers::default()
        };
        // (450 + 3000) * 0.85 = 2932.5, then +2500, +550, *0.9
        assert_eq!(compute_footprint(&answers).total_kg_co2_per_year, 5384);
    }

    #[test]
    fn test_highest_sheet() {
        let answers = FootprintAnswers {
            car_miles_per_week: 500,
            car_type: CarType::Diesel,
            public_transport_frequency: PublicTransport::Never,
            monthly_electricity_bill: 500,
            heating_type: HeatingType::Oil,
            uses_renewable_energy: RenewableEnergy::No,
            diet_type: DietType::MeatHeavy,
            local_food_frequency: LocalFood::Rarely,
            food_waste_level: FoodWaste::Lots,
            new_clothes_frequency: ClothesFrequency::Weekly,
            electronics_frequency: ElectronicsFrequency::Often,
            recycling_level: RecyclingLevel::None,
            short_flights_per_year: 20,
            long_flights_per_year: 10,
        };
        let result = compute_footprint(&answers);

        assert_eq!(result.total_kg_co2_per_year, 46457);
        assert_eq!(result.tier, FootprintTier::VeryHigh);
        assert_eq!(result.trees_to_offset, 2112);
        assert_eq!(result.tips.len(), MAX_TIPS);
    }

    #[test]
    fn test_lowest_sheet_has_no_tips() {
        let answers = FootprintAnswers {
            car_miles_per_week: 0,
            car_type: CarType::Electric,
            public_transport_frequency: PublicTransport::Always,
            monthly_electricity_bill: 0,
            heating_type: HeatingType::Renewable,
            uses_renewable_energy: RenewableEnergy::Yes,
            diet_type: DietType::Vegan,
            local_food_frequency: LocalFood::Always,
            food_waste_level: FoodWaste::None,
            new_clothes_frequency: ClothesFrequency::Rarely,
            electronics_frequency: ElectronicsFrequency::Rarely,
            recycling_level: RecyclingLevel::All,
            short_flights_per_year: 0,
            long_flights_per_year: 0,
        };
        let result = compute_footprint(&answers);

        // (-800 + 600) * 0.7 goes negative before the diet is added
        assert_eq!(result.total_kg_co2_per_year, 960);
        assert_eq!(result.tier, FootprintTier::Excellent);
        assert_eq!(result.trees_to_offset, 44);
        assert!(result.tips.is_empty());
    }

    #[test]
    fn test_out_of_range_sliders_are_clamped() {
        let wild = FootprintAnswers {
            car_miles_per_week: 10_000,
            ..FootprintAnswers::default()
        };
        let capped = FootprintAnswers {
            car_miles_per_week: 500,
            ..FootprintAnswers::default()
        };
        assert_eq!(compute_footprint(&wild), compute_footprint(&capped));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(FootprintTier::classify(3999), FootprintTier::Excellent);
        assert_eq!(FootprintTier::classify(4000), FootprintTier::Good);
        assert_eq!(FootprintTier::classify(7999), FootprintTier::Good);
        assert_eq!(FootprintTier::classify(8000), FootprintTier::Average);
        assert_eq!(FootprintTier::classify(12000), FootprintTier::High);
        assert_eq!(FootprintTier::classify(15999), FootprintTier::High);
        assert_eq!(FootprintTier::classify(16000), FootprintTier::VeryHigh);
        assert_eq!(FootprintTier::classify(-50), FootprintTier::Excellent);
        assert_eq!(FootprintTier::VeryHigh.to_string(), "Very High");
    }

    #[test]
    fn test_trees_to_offset() {
        assert_eq!(trees_to_offset(0), 0);
        assert_eq!(trees_to_offset(11), 1);
        assert_eq!(trees_to_offset(10), 0);
        assert_eq!(trees_to_offset(22), 1);
        assert_eq!(trees_to_offset(5850), 266);
    }

    #[test]
    fn test_default_tips_are_first_five_rules() {
        let tips = tips_for(&FootprintAnswers::default());
        let topics: Vec<TipTopic> = tips.iter().map(|t| t.topic).collect();

        // Recycling also applies but falls past the cut
        assert_eq!(
            topics,
            vec![
                TipTopic::Vehicle,
                TipTopic::PublicTransport,
                TipTopic::RenewableEnergy,
                TipTopic::Diet,
                TipTopic::LocalFood,
            ]
        );
    }

    #[test]
    fn test_flight_tip_thresholds() {
        let quiet = FootprintAnswers {
            car_type: CarType::Electric,
            public_transport_frequency: PublicTransport::Always,
            uses_renewable_energy: RenewableEnergy::Yes,
            diet_type: DietType::Vegan,
            local_food_frequency: LocalFood::Always,
            recycling_level: RecyclingLevel::All,
            short_flights_per_year: 2,
            long_flights_per_year: 1,
            ..FootprintAnswers::default()
        };
        assert!(tips_for(&quiet).is_empty());

        let flyer = FootprintAnswers {
            long_flights_per_year: 2,
            ..quiet
        };
        let tips = tips_for(&flyer);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].topic, TipTopic::Flights);
        assert_eq!(tips[0].topic.icon(), "plane");
    }
}
