#![deny(unsafe_code)]
//! # quality-pipeline
//!
//! Runs the three grading stages over an ingested metric table and
//! assembles the report:
//!
//! 1. [`ingest`] parses JSON rows and checks the schema
//! 2. `quality-normalizer` smooths and scales each indicator
//! 3. `quality-weights` computes per-timestamp weights from the raw rows
//! 4. [`scoring`] joins the two into station scores
//! 5. `quality-grader` grades each period
//! 6. [`export`] emits [`GradeRow`]s and diagnostics

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod scoring;

pub use config::{LoggingConfig, PipelineConfig, ScoringConfig, ENV_PREFIX};
pub use error::PipelineError;
pub use export::{GradeRow, PipelineReport};
pub use ingest::{parse_rows, read_rows};
pub use pipeline::QualityPipeline;
pub use scoring::{score_stations, Scoring, StationScore};
