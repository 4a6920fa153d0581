//! Questionnaire scoring, island fusion, and career ranking.
//!
//! Answer vectors are bound to question forms by slot, aggregated into 0–100 dimension
//! scores, fused across the free and pro tiers into the eight island scores, and joined
//! to the career catalog. Every step is a pure function of its inputs; the
//! [`AssessmentEngine`] only holds the read-only tables they share.

pub mod aggregate;
pub mod answers;
pub mod bank;
pub mod catalog;
pub mod engine;
pub mod export;
pub mod fusion;
pub mod islands;
pub mod polarity;
pub mod ranking;
pub mod router;
pub mod scores;
pub(crate) mod standard;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, answered_slots};
pub use answers::AnswerVector;
pub use bank::{
    AssessmentForm, BoundItem, BoundModule, LikertScale, ModuleKind, PolarityAxis, Pole,
    QuestionBank, QuestionBankError, QuestionItem, QuestionModule, ScaleKind,
};
pub use catalog::{
    CareerCatalog, CareerKind, CareerRecord, CatalogError, LocalizedList, LocalizedText,
};
pub use engine::{
    AssessmentEngine, Completion, FreeCompletion, FreeReport, IslandSummary, ProReport,
};
pub use export::write_recommendations_csv;
pub use fusion::{
    fuse, FusionOutcome, FusionTable, IslandMapping, IslandTrace, PotentialTier, TraditionalTier,
};
pub use islands::{dimension_label, IslandCode, IslandScores};
pub use polarity::{resolve_polarity, AxisTally, PolarityProfile};
pub use ranking::{rank, RankingPolicy, Recommendation};
pub use router::{assessment_router, FreeAssessmentRequest, ProAssessmentRequest};
pub use scores::DimensionScores;
pub use standard::{BIG_FIVE_TRAITS, INTEREST_LETTERS, META_DIMENSIONS};
