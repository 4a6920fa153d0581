use std::cmp::Reverse;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dimension key to a 0–100 score, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct DimensionScores {
    entries: Vec<(String, u8)>,
}

impl DimensionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a score, clamping it to 100.
    pub fn insert(&mut self, dimension: impl Into<String>, score: u8) {
        let dimension = dimension.into();
        let score = score.min(100);
        match self.entries.iter_mut().find(|(key, _)| *key == dimension) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((dimension, score)),
        }
    }

    /// Score for a dimension; dimensions that were never scored read as 0.
    pub fn get(&self, dimension: &str) -> u8 {
        self.entries
            .iter()
            .find(|(key, _)| key == dimension)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(key, score)| (key.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn any_nonzero(&self) -> bool {
        self.entries.iter().any(|(_, score)| *score > 0)
    }

    /// Arithmetic mean over every stored dimension, 0 when empty.
    pub fn mean(&self) -> f64 {
        mean(self.entries.iter().map(|(_, score)| f64::from(*score)))
    }

    /// Arithmetic mean over the listed dimensions, 0 when the list is empty.
    pub fn mean_of<S: AsRef<str>>(&self, dimensions: &[S]) -> f64 {
        mean(
            dimensions
                .iter()
                .map(|dimension| f64::from(self.get(dimension.as_ref()))),
        )
    }

    /// Highest scoring dimensions. Ties keep declaration order.
    pub fn top(&self, count: usize) -> Vec<&str> {
        let mut ranked: Vec<&(String, u8)> = self.entries.iter().collect();
        ranked.sort_by_key(|(_, score)| Reverse(*score));
        ranked
            .into_iter()
            .take(count)
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl<K: Into<String>> FromIterator<(K, u8)> for DimensionScores {
    fn from_iter<T: IntoIterator<Item = (K, u8)>>(iter: T) -> Self {
        let mut scores = Self::new();
        for (dimension, score) in iter {
            scores.insert(dimension, score);
        }
        scores
    }
}

impl Serialize for DimensionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(key, score)| (key, score)))
    }
}

/// Reads caller-supplied score maps leniently: non-object payloads are empty, numeric
/// strings are accepted, anything else scores 0, and values are clamped to 0–100.
impl From<Value> for DimensionScores {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(dimension, raw)| (dimension, coerce_score(&raw)))
                .collect(),
            _ => Self::new(),
        }
    }
}

fn coerce_score(raw: &Value) -> u8 {
    let value = match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(value) if value.is_finite() => value.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}
