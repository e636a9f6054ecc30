//! HealthBot Core
//!
//! The patient-education session engine: a fixed conversation graph that
//! walks a patient from topic selection through retrieval, summarization,
//! a comprehension quiz, and graded feedback, optionally looping to a new
//! topic. Surfaces (CLI, web) drive the engine through the capability
//! traits in [`capabilities`] and never reimplement transition or grading
//! logic themselves.

pub mod capabilities;
pub mod generation;
pub mod grading;
pub mod machine;
pub mod prompts;
pub mod quiz;
pub mod search;
pub mod session;

pub use capabilities::{PromptError, SearchProvider, SearchResult, TextGenerator, UserInterface};
pub use grading::Tier;
pub use machine::{EngineError, SessionEngine, SessionOutcome, StateId};
pub use session::{QuizItem, Session};
