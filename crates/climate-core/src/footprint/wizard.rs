//! Five-step calculator questionnaire
//!
//! Holds an answer sheet while the user walks Transport → Home Energy →
//! Food & Diet → Shopping → Air Travel, then produces a [`FootprintResult`].

use super::answers::{
    CarType, ClothesFrequency, DietType, ElectronicsFrequency, FoodWaste, FootprintAnswers,
    HeatingType, LocalFood, PublicTransport, RecyclingLevel, RenewableEnergy, SliderRange,
    CAR_MILES_RANGE, ELECTRICITY_BILL_RANGE, LONG_FLIGHTS_RANGE, SHORT_FLIGHTS_RANGE,
};
use super::engine::{compute_footprint, FootprintResult};

/// A categorical answer that can be cycled through
trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];
    fn label(self) -> &'static str;
}

macro_rules! impl_choice {
    ($ty:ty { $($variant:path => $label:literal),+ $(,)? }) => {
        impl Choice for $ty {
            const ALL: &'static [Self] = &[$($variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($variant => $label),+
                }
            }
        }
    };
}

impl_choice!(CarType {
    CarType::Electric => "Electric",
    CarType::Hybrid => "Hybrid",
    CarType::Gasoline => "Gasoline",
    CarType::Diesel => "Diesel",
});
impl_choice!(PublicTransport {
    PublicTransport::Never => "Never",
    PublicTransport::Sometimes => "Sometimes",
    PublicTransport::Often => "Often",
    PublicTransport::Always => "Always",
});
impl_choice!(HeatingType {
    HeatingType::Electric => "Electric",
    HeatingType::Gas => "Gas",
    HeatingType::Oil => "Oil",
    HeatingType::Renewable => "Renewable",
});
impl_choice!(RenewableEnergy {
    RenewableEnergy::Yes => "Yes",
    RenewableEnergy::Partial => "Partially",
    RenewableEnergy::No => "No",
});
impl_choice!(DietType {
    DietType::Vegan => "Vegan",
    DietType::Vegetarian => "Vegetarian",
    DietType::Pescatarian => "Pescatarian",
    DietType::Mixed => "Mixed",
    DietType::MeatHeavy => "Meat Heavy",
});
impl_choice!(LocalFood {
    LocalFood::Always => "Always",
    LocalFood::Often => "Often",
    LocalFood::Sometimes => "Sometimes",
    LocalFood::Rarely => "Rarely",
});
impl_choice!(FoodWaste {
    FoodWaste::None => "Almost None",
    FoodWaste::Some => "Some",
    FoodWaste::Lots => "A Lot",
});
impl_choice!(ClothesFrequency {
    ClothesFrequency::Rarely => "Rarely",
    ClothesFrequency::Quarterly => "Quarterly",
    ClothesFrequency::Monthly => "Monthly",
    ClothesFrequency::Weekly => "Weekly",
});
impl_choice!(ElectronicsFrequency {
    ElectronicsFrequency::Rarely => "Rarely",
    ElectronicsFrequency::Yearly => "Yearly",
    ElectronicsFrequency::Often => "Often",
});
impl_choice!(RecyclingLevel {
    RecyclingLevel::All => "All",
    RecyclingLevel::Most => "Most",
    RecyclingLevel::Some => "Some",
    RecyclingLevel::None => "None",
});

fn position<T: Choice>(value: T) -> usize {
    T::ALL.iter().position(|v| *v == value).unwrap_or(0)
}

fn cycle<T: Choice>(value: T, forward: bool) -> T {
    let len = T::ALL.len();
    let i = position(value);
    let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
    T::ALL[next]
}

fn choice_view<T: Choice>(value: T) -> FieldKind {
    FieldKind::Choice {
        options: T::ALL.iter().map(|v| v.label()).collect(),
        selected: position(value),
    }
}

fn nudge(value: u32, range: SliderRange, up: bool) -> u32 {
    let moved = if up {
        value.saturating_add(range.step)
    } else {
        value.saturating_sub(range.step)
    };
    range.clamp(moved)
}

/// Questionnaire step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Transport,
    Home,
    Food,
    Shopping,
    Travel,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Transport,
        Step::Home,
        Step::Food,
        Step::Shopping,
        Step::Travel,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Step::Transport => "Transportation",
            Step::Home => "Home Energy",
            Step::Food => "Food & Diet",
            Step::Shopping => "Shopping",
            Step::Travel => "Air Travel",
        }
    }

    /// Fields asked on this step, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Step::Transport => &[Field::CarMiles, Field::CarType, Field::PublicTransport],
            Step::Home => &[
                Field::ElectricityBill,
                Field::HeatingType,
                Field::RenewableEnergy,
            ],
            Step::Food => &[Field::Diet, Field::LocalFood, Field::FoodWaste],
            Step::Shopping => &[Field::NewClothes, Field::Electronics, Field::Recycling],
            Step::Travel => &[Field::ShortFlights, Field::LongFlights],
        }
    }
}

/// One question on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    CarMiles,
    CarType,
    PublicTransport,
    ElectricityBill,
    HeatingType,
    RenewableEnergy,
    Diet,
    LocalFood,
    FoodWaste,
    NewClothes,
    Electronics,
    Recycling,
    ShortFlights,
    LongFlights,
}

impl Field {
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::CarMiles => "How many miles do you drive per week?",
            Field::CarType => "What type of car do you drive?",
            Field::PublicTransport => "How often do you use public transportation?",
            Field::ElectricityBill => "What's your monthly electricity bill? ($)",
            Field::HeatingType => "What's your primary heating source?",
            Field::RenewableEnergy => "Do you use renewable energy?",
            Field::Diet => "What's your diet type?",
            Field::LocalFood => "How often do you buy local food?",
            Field::FoodWaste => "How much food do you waste?",
            Field::NewClothes => "How often do you buy new clothes?",
            Field::Electronics => "How often do you buy new electronics?",
            Field::Recycling => "How much do you recycle?",
            Field::ShortFlights => "Short flights per year (< 3 hours)",
            Field::LongFlights => "Long flights per year (> 3 hours)",
        }
    }
}

/// How a field is answered and its current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Choice {
        options: Vec<&'static str>,
        selected: usize,
    },
    Slider {
        value: u32,
        range: SliderRange,
        unit: &'static str,
    },
}

/// Multi-step calculator state
#[derive(Debug, Clone)]
pub struct CalculatorWizard {
    step_index: usize,
    answers: FootprintAnswers,
    result: Option<FootprintResult>,
}

impl CalculatorWizard {
    /// Start on the first step with the default answer sheet
    pub fn new() -> Self {
        Self {
            step_index: 0,
            answers: FootprintAnswers::default(),
            result: None,
        }
    }

    pub fn answers(&self) -> &FootprintAnswers {
        &self.answers
    }

    pub fn current_step(&self) -> Step {
        Step::ALL[self.step_index]
    }

    /// Zero-based step index
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Completion of the questionnaire, counting the current step
    pub fn progress_percent(&self) -> f64 {
        (self.step_index + 1) as f64 / Step::ALL.len() as f64 * 100.0
    }

    pub fn is_last_step(&self) -> bool {
        self.step_index + 1 == Step::ALL.len()
    }

    /// Advance one step; on the last step, calculate the result
    pub fn next(&mut self) -> Option<&FootprintResult> {
        if self.result.is_some() {
            return self.result.as_ref();
        }
        if self.is_last_step() {
            return Some(self.finish());
        }
        self.step_index += 1;
        None
    }

    /// Go back one step; returns false on the first step
    pub fn back(&mut self) -> bool {
        if self.result.is_some() || self.step_index == 0 {
            return false;
        }
        self.step_index -= 1;
        true
    }

    /// Calculate and keep the result
    pub fn finish(&mut self) -> &FootprintResult {
        let result = compute_footprint(&self.answers);
        tracing::info!(
            total = result.total_kg_co2_per_year,
            tier = %result.tier,
            "footprint calculated"
        );
        self.result.insert(result)
    }

    pub fn result(&self) -> Option<&FootprintResult> {
        self.result.as_ref()
    }

    /// Start over with the default sheet
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current answer for a field
    pub fn field_kind(&self, field: Field) -> FieldKind {
        let a = &self.answers;
        match field {
            Field::CarMiles => FieldKind::Slider {
                value: a.car_miles_per_week,
                range: CAR_MILES_RANGE,
                unit: "mi",
            },
            Field::CarType => choice_view(a.car_type),
            Field::PublicTransport => choice_view(a.public_transport_frequency),
            Field::ElectricityBill => FieldKind::Slider {
                value: a.monthly_electricity_bill,
                range: ELECTRICITY_BILL_RANGE,
                unit: "$",
            },
            Field::HeatingType => choice_view(a.heating_type),
            Field::RenewableEnergy => choice_view(a.uses_renewable_energy),
            Field::Diet => choice_view(a.diet_type),
            Field::LocalFood => choice_view(a.local_food_frequency),
            Field::FoodWaste => choice_view(a.food_waste_level),
            Field::NewClothes => choice_view(a.new_clothes_frequency),
            Field::Electronics => choice_view(a.electronics_frequency),
            Field::Recycling => choice_view(a.recycling_level),
            Field::ShortFlights => FieldKind::Slider {
                value: a.short_flights_per_year,
                range: SHORT_FLIGHTS_RANGE,
                unit: "flights",
            },
            Field::LongFlights => FieldKind::Slider {
                value: a.long_flights_per_year,
                range: LONG_FLIGHTS_RANGE,
                unit: "flights",
            },
        }
    }

    /// Move a field to its next (or previous) option, or one slider step
    ///
    /// Ignored once the result has been calculated.
    pub fn adjust(&mut self, field: Field, forward: bool) {
        if self.result.is_some() {
            return;
        }
        let a = &mut self.answers;
        match field {
            Field::CarMiles => {
                a.car_miles_per_week = nudge(a.car_miles_per_week, CAR_MILES_RANGE, forward)
            }
            Field::CarType => a.car_type = cycle(a.car_type, forward),
            Field::PublicTransport => {
                a.public_transport_frequency = cycle(a.public_transport_frequency, forward)
            }
            Field::ElectricityBill => {
                a.monthly_electricity_bill =
                    nudge(a.monthly_electricity_bill, ELECTRICITY_BILL_RANGE, forward)
            }
            Field::HeatingType => a.heating_type = cycle(a.heating_type, forward),
            Field::RenewableEnergy => {
                a.uses_renewable_energy = cycle(a.uses_renewable_energy, forward)
            }
            Field::Diet => a.diet_type = cycle(a.diet_type, forward),
            Field::LocalFood => a.local_food_frequency = cycle(a.local_food_frequency, forward),
            Field::FoodWaste => a.food_waste_level = cycle(a.food_waste_level, forward),
            Field::NewClothes => {
                a.new_clothes_frequency = cycle(a.new_clothes_frequency, forward)
            }
            Field::Electronics => {
                a.electronics_frequency = cycle(a.electronics_frequency, forward)
            }
            Field::Recycling => a.recycling_level = cycle(a.recycling_level, forward),
            Field::ShortFlights => {
                a.short_flights_per_year =
                    nudge(a.short_flights_per_year, SHORT_FLIGHTS_RANGE, forward)
            }
            Field::LongFlights => {
                a.long_flights_per_year =
                    nudge(a.long_flights_per_year, LONG_FLIGHTS_RANGE, forward)
            }
        }
    }
}

impl Default for CalculatorWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::FootprintTier;

    #[test]
    fn test_walk_through_defaults() {
        let mut wizard = CalculatorWizard::new();
        assert_eq!(wizard.current_step(), Step::Transport);
        assert!((wizard.progress_percent() - 20.0).abs() < 1e-9);
        assert!(!wizard.back());

        for _ in 0..4 {
            assert!(wizard.next().is_none());
        }
        assert_eq!(wizard.current_step(), Step::Travel);
        assert!((wizard.progress_percent() - 100.0).abs() < 1e-9);

        let result = wizard.next().cloned().unwrap();
        assert_eq!(result.total_kg_co2_per_year, 5850);
        assert_eq!(result.tier, FootprintTier::Good);
        assert!(!wizard.back());
    }

    #[test]
    fn test_choice_cycles_both_ways() {
        let mut wizard = CalculatorWizard::new();
        wizard.adjust(Field::CarType, true);
        assert_eq!(wizard.answers().car_type, CarType::Diesel);
        wizard.adjust(Field::CarType, true);
        assert_eq!(wizard.answers().car_type, CarType::Electric);
        wizard.adjust(Field::CarType, false);
        assert_eq!(wizard.answers().car_type, CarType::Diesel);

        match wizard.field_kind(Field::Diet) {
            FieldKind::Choice { options, selected } => {
                assert_eq!(options.len(), 5);
                assert_eq!(options[selected], "Mixed");
            }
            other => panic!("Expected choice, got {:?}", other),
        }
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let mut wizard = CalculatorWizard::new();
        wizard.adjust(Field::CarMiles, true);
        assert_eq!(wizard.answers().car_miles_per_week, 60);

        for _ in 0..100 {
            wizard.adjust(Field::CarMiles, false);
        }
        assert_eq!(wizard.answers().car_miles_per_week, 0);

        for _ in 0..30 {
            wizard.adjust(Field::ShortFlights, true);
        }
        assert_eq!(wizard.answers().short_flights_per_year, 20);
    }

    #[test]
    fn test_reset_after_result() {
        let mut wizard = CalculatorWizard::new();
        wizard.adjust(Field::Diet, false);
        wizard.finish();

        // Frozen once calculated
        wizard.adjust(Field::Diet, false);
        assert_eq!(wizard.answers().diet_type, DietType::Pescatarian);

        wizard.reset();
        assert!(wizard.result().is_none());
        assert_eq!(wizard.step_index(), 0);
        assert_eq!(wizard.answers(), &FootprintAnswers::default());
    }

    #[test]
    fn test_every_field_on_exactly_one_step() {
        let count: usize = Step::ALL.iter().map(|s| s.fields().len()).sum();
        assert_eq!(count, 14);
    }
}
