//! Scoring core for the TalentAI questionnaires.
//!
//! The [`assessment`] module turns raw answer vectors into dimension scores, fuses the
//! traditional and potential tiers into the eight island scores, and ranks catalog entries.
//! The remaining modules carry the service plumbing shared with `services/api`.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
