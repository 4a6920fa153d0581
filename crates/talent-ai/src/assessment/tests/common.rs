use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::{AnswerVector, AssessmentEngine, IslandCode};

pub(super) const PRO_ITEMS: usize = 72;
/// First slot of the island module in the bundled pro form.
pub(super) const ISLAND_SLOT: usize = 18;
pub(super) const ISLAND_ITEMS: usize = 3;

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::standard().expect("bundled catalog parses")
}

pub(super) fn shared_engine() -> Arc<AssessmentEngine> {
    Arc::new(engine())
}

/// Interest answers endorsing every item of the listed letters and nothing else.
pub(super) fn interest_answers(endorsed: &[&str]) -> AnswerVector {
    let letters = ["R", "I", "A", "S", "E", "C"];
    let codes: Vec<i64> = letters
        .iter()
        .flat_map(|letter| {
            let code = i64::from(endorsed.contains(letter));
            std::iter::repeat_n(code, 5)
        })
        .collect();
    AnswerVector::answered(&codes)
}

/// Intelligence answers where every item is endorsed.
pub(super) fn all_yes_intelligences() -> AnswerVector {
    AnswerVector::answered(&[1; 32])
}

/// Pro answers with every item at `code`.
pub(super) fn uniform_pro_answers(code: i64) -> AnswerVector {
    AnswerVector::answered(&[code; PRO_ITEMS])
}

/// Pro answers at `base`, except the island items of `island`, which use `island_code`.
pub(super) fn pro_answers_favoring(
    island: IslandCode,
    base: i64,
    island_code: i64,
) -> AnswerVector {
    let mut codes = vec![base; PRO_ITEMS];
    let index = IslandCode::ordered()
        .iter()
        .position(|candidate| *candidate == island)
        .expect("island is ordered");
    let start = ISLAND_SLOT + index * ISLAND_ITEMS;
    for code in &mut codes[start..start + ISLAND_ITEMS] {
        *code = island_code;
    }
    AnswerVector::answered(&codes)
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
