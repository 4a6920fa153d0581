use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_ai::assessment::{
    AnswerVector, AssessmentEngine, CareerCatalog, FreeReport, ProReport, QuestionBank,
    TraditionalTier,
};
use talent_ai::config::AssessmentConfig;
use talent_ai::error::AppError;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the engine from the bundled tables, swapping in any configured overrides.
pub(crate) fn load_engine(config: &AssessmentConfig) -> Result<AssessmentEngine, AppError> {
    let bank = match &config.question_bank {
        Some(path) => {
            info!(path = %path.display(), "loading question bank override");
            QuestionBank::from_path(path)?
        }
        None => QuestionBank::standard(),
    };
    let catalog = match &config.career_catalog {
        Some(path) => {
            info!(path = %path.display(), "loading career catalog override");
            CareerCatalog::from_path(path)?
        }
        None => CareerCatalog::bundled()?,
    };

    info!(
        pro_items = bank.pro.slot_count(),
        careers = catalog.len(),
        "assessment engine ready"
    );
    Ok(AssessmentEngine::new(bank, catalog))
}

/// A scoring request read from disk by the `score` command. Either tier may be omitted.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) intelligences: Option<AnswerVector>,
    #[serde(default)]
    pub(crate) interests: Option<AnswerVector>,
    #[serde(default)]
    pub(crate) answers: Option<AnswerVector>,
    #[serde(default)]
    pub(crate) traditional: Option<TraditionalTier>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) free: Option<FreeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pro: Option<ProReport>,
}

impl ScoreRequest {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Scores whichever tiers are present. Without explicit traditional scores, a pro run
    /// reuses the free report from the same request.
    pub(crate) fn score(self, engine: &AssessmentEngine) -> ScoreResponse {
        let free = if self.intelligences.is_some() || self.interests.is_some() {
            Some(engine.score_free(
                &self.intelligences.unwrap_or_default(),
                &self.interests.unwrap_or_default(),
            ))
        } else {
            None
        };

        let pro = self.answers.map(|answers| {
            let traditional = self
                .traditional
                .or_else(|| free.as_ref().map(FreeReport::traditional_tier));
            engine.score_pro(&answers, traditional.as_ref())
        });

        ScoreResponse { free, pro }
    }
}
