//! techquiz-core — session state machine, scenario generation and glossary.
//!
//! This crate defines the data model, the provider traits, the grounded
//! scenario generator with its fallback contract, the quiz session state
//! machine and its async controller, and the glossary annotator used to
//! display generated text.

pub mod controller;
pub mod error;
pub mod generator;
pub mod glossary;
pub mod material;
pub mod model;
pub mod session;
pub mod traits;

pub use controller::{Intent, QuizController, QuizHandle};
pub use generator::{GeneratorSettings, ScenarioGenerator};
pub use glossary::{Glossary, Segment};
pub use model::{AnswerOption, Level, Scenario, Topic};
pub use session::{Phase, Session, SessionState};
