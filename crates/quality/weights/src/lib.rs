#![deny(unsafe_code)]
//! # quality-weights
//!
//! Second stage of the grading pipeline: one indicator weight vector per
//! timestamp, blending a static expert panel with CRITIC weights computed
//! over the growing window of all rows observed so far.

pub mod critic;
pub mod engine;
pub mod error;
pub mod expert;
pub mod window;

pub use critic::{critic_weights, CriticOutcome};
pub use engine::{WeightConfig, WeightEngine, WeightTable};
pub use error::WeightError;
pub use expert::ExpertPanel;
pub use window::GrowingWindow;
