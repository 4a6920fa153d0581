use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::answers::AnswerVector;
use super::engine::AssessmentEngine;
use super::fusion::TraditionalTier;

/// Body of a free-tier scoring request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreeAssessmentRequest {
    #[serde(default)]
    pub intelligences: AnswerVector,
    #[serde(default)]
    pub interests: AnswerVector,
}

/// Body of a pro-tier scoring request. `traditional` carries earlier free-tier scores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProAssessmentRequest {
    #[serde(default)]
    pub answers: AnswerVector,
    #[serde(default)]
    pub traditional: Option<TraditionalTier>,
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    generated_at: DateTime<Utc>,
    report: T,
}

fn enveloped<T: Serialize>(report: T) -> Response {
    let body = Envelope {
        generated_at: Utc::now(),
        report,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

/// Router builder exposing the scoring endpoints.
pub fn assessment_router(engine: Arc<AssessmentEngine>) -> Router {
    Router::new()
        .route("/api/v1/assessments/free", post(free_handler))
        .route("/api/v1/assessments/pro", post(pro_handler))
        .route("/api/v1/islands", get(islands_handler))
        .with_state(engine)
}

pub(crate) async fn free_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    axum::Json(request): axum::Json<FreeAssessmentRequest>,
) -> Response {
    enveloped(engine.score_free(&request.intelligences, &request.interests))
}

pub(crate) async fn pro_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    axum::Json(request): axum::Json<ProAssessmentRequest>,
) -> Response {
    enveloped(engine.score_pro(&request.answers, request.traditional.as_ref()))
}

pub(crate) async fn islands_handler(State(engine): State<Arc<AssessmentEngine>>) -> Response {
    let payload = json!({
        "islands": engine.island_overview(),
        "careers": engine.catalog().len(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
