//! Climate Core - scoring and game engines with Elm-style updates
//!
//! This crate holds every rule of the climate site and nothing else:
//! - Carbon footprint scoring over a fixed answer sheet (`footprint`)
//! - The five-step calculator questionnaire around it
//! - A timed quiz with lives, streaks, achievements and grades (`quiz`)
//! - A waste-sorting mini-game (`sorting`)
//!
//! ## Hosting the engines
//!
//! Sessions are plain values updated by `update(&mut self, msg) -> Cmd<Msg>`.
//! They never sleep or read a clock. The host executes the returned [`Cmd`]:
//! it starts a one-second ticker for `StartTimer`, feeds `Tick(generation)`
//! messages back, delivers `Schedule` messages after their delay and shows
//! `Notify` popups. Every timer and scheduled message carries the session's
//! [`Generation`]; anything stamped with an older one is ignored, so a
//! restart never has to chase down callbacks still in flight.

mod cmd;
mod error;
pub mod footprint;
mod identity;
pub mod quiz;
mod rng;
pub mod sorting;
pub mod time;

pub use cmd::{Cmd, Notification};
pub use error::{Error, Result};
pub use footprint::{compute_footprint, CalculatorWizard, FootprintAnswers, FootprintResult};
pub use identity::{Category, QuestionId};
pub use quiz::{QuizBank, QuizMsg, QuizSession};
pub use rng::GameRng;
pub use sorting::{SortingCatalog, SortingMsg, SortingSession};
pub use time::{Countdown, Generation, Seconds};
