use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Raw answer codes for one form, positionally matching the form's slots. `None` marks an
/// unanswered position, which never counts toward any score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Vec<Option<i64>>")]
pub struct AnswerVector {
    codes: Vec<Option<i64>>,
}

impl AnswerVector {
    pub fn new(codes: Vec<Option<i64>>) -> Self {
        Self { codes }
    }

    /// Builds a fully answered vector.
    pub fn answered(codes: &[i64]) -> Self {
        Self::new(codes.iter().copied().map(Some).collect())
    }

    pub fn get(&self, slot: usize) -> Option<i64> {
        self.codes.get(slot).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    /// Interprets stored JSON leniently: anything other than an array is an empty vector,
    /// and elements that are not integral numbers are unanswered positions.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(elements) => Self::new(elements.iter().map(code_from_json).collect()),
            Value::Null => Self::default(),
            other => {
                debug!(kind = json_kind(other), "answer payload is not a sequence");
                Self::default()
            }
        }
    }
}

fn code_from_json(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(code) = number.as_i64() {
        return Some(code);
    }
    number
        .as_f64()
        .filter(|code| code.is_finite() && code.fract() == 0.0 && code.abs() <= i64::MAX as f64)
        .map(|code| code as i64)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<Value> for AnswerVector {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<Vec<Option<i64>>> for AnswerVector {
    fn from(codes: Vec<Option<i64>>) -> Self {
        Self::new(codes)
    }
}

impl From<AnswerVector> for Vec<Option<i64>> {
    fn from(answers: AnswerVector) -> Self {
        answers.codes
    }
}
