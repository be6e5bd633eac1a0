//! Heuristic quality, popularity and adoption tiers for hub datasets.
//!
//! Records come from `model`, scores are computed by the passes in [`pass`],
//! and [`manager::EvaluationManager`] aggregates them into an
//! [`report::EvaluationReport`] that can be counted or exported.

pub mod config;
pub mod manager;
pub mod pass;
pub mod quality;
pub mod report;
pub mod signal;
pub mod tier;

pub use config::EvaluationContext;
pub use manager::EvaluationManager;
pub use pass::documentation::DocumentationStrategy;
pub use pass::Evaluation;
pub use quality::ReadmeQuality;
pub use report::{EvaluatedRow, EvaluationReport, ReportError};
pub use tier::{Classification, Tier};
