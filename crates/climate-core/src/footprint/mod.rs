//! Carbon footprint calculator
//!
//! - [`FootprintAnswers`] - the answer sheet (enums and clamped sliders)
//! - [`compute_footprint`] - pure scoring over the [`tables`]
//! - [`CalculatorWizard`] - the five-step questionnaire around it

mod answers;
mod engine;
pub mod tables;
mod wizard;

pub use answers::{
    CarType, ClothesFrequency, DietType, ElectronicsFrequency, FoodWaste, FootprintAnswers,
    HeatingType, LocalFood, PublicTransport, RecyclingLevel, RenewableEnergy, SliderRange,
    CAR_MILES_RANGE, ELECTRICITY_BILL_RANGE, LONG_FLIGHTS_RANGE, SHORT_FLIGHTS_RANGE,
};
pub use engine::{
    compute_footprint, running_total, tips_for, trees_to_offset, FootprintResult, FootprintTier,
    Tip, TipTopic, MAX_TIPS,
};
pub use wizard::{CalculatorWizard, Field, FieldKind, Step};
