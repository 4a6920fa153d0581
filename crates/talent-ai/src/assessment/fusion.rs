use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::islands::{IslandCode, IslandScores};
use super::scores::DimensionScores;

/// Share of the interest signal inside the traditional core.
const TRADITIONAL_INTEREST_WEIGHT: f64 = 0.6;
/// Share of the overall intelligence average inside the traditional core.
const TRADITIONAL_INTELLIGENCE_WEIGHT: f64 = 0.4;
/// Share of the island's own potential score inside the future core.
const FUTURE_ISLAND_WEIGHT: f64 = 0.7;
/// Share of the mapped meta-intelligence average inside the future core.
const FUTURE_META_WEIGHT: f64 = 0.3;
/// Final blend of traditional and future cores.
const FUSED_TRADITIONAL_WEIGHT: f64 = 0.6;
const FUSED_FUTURE_WEIGHT: f64 = 0.4;

/// Dimensions feeding one island from each tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandMapping {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub meta: Vec<String>,
}

impl IslandMapping {
    fn from_static(interests: &[&str], meta: &[&str]) -> Self {
        Self {
            interests: interests.iter().map(|key| key.to_string()).collect(),
            meta: meta.iter().map(|key| key.to_string()).collect(),
        }
    }
}

/// Static island → dimension table. Islands without an entry average over an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionTable {
    mappings: BTreeMap<IslandCode, IslandMapping>,
}

impl FusionTable {
    pub fn standard() -> Self {
        const TABLE: &[(IslandCode, &[&str], &[&str])] = &[
            (
                IslandCode::CreativeCulture,
                &["A", "I"],
                &["CQ", "XQ", "DQ"],
            ),
            (
                IslandCode::EntrepreneurialLeadership,
                &["E", "S"],
                &["CQ", "FQ", "DQ"],
            ),
            (
                IslandCode::ThinkingPhilosophy,
                &["I", "A"],
                &["AQ", "SEQ", "XQ"],
            ),
            (IslandCode::HealthLife, &["S", "A"], &["AQ", "SEQ", "DQ"]),
            (
                IslandCode::Sustainability,
                &["R", "I", "C"],
                &["SEQ", "DQ", "FQ"],
            ),
            (
                IslandCode::FinanceFuture,
                &["I", "E", "C"],
                &["FQ", "DQ", "SEQ"],
            ),
            (
                IslandCode::FutureExploration,
                &["A", "I"],
                &["CQ", "DQ", "XQ", "AQ"],
            ),
            (
                IslandCode::PublicGovernance,
                &["S", "E", "C"],
                &["SEQ", "DQ", "CQ", "AQ"],
            ),
        ];

        Self {
            mappings: TABLE
                .iter()
                .map(|(island, interests, meta)| {
                    (*island, IslandMapping::from_static(interests, meta))
                })
                .collect(),
        }
    }

    /// A table with no mappings at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_mapping(mut self, island: IslandCode, mapping: IslandMapping) -> Self {
        self.mappings.insert(island, mapping);
        self
    }

    pub fn mapping(&self, island: IslandCode) -> Option<&IslandMapping> {
        self.mappings.get(&island)
    }
}

/// Free-tier results: RIASEC interests and multiple intelligences. Either map may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct TraditionalTier {
    pub interests: DimensionScores,
    pub intelligences: DimensionScores,
}

/// Any payload that is not an object reads as an empty tier, which fuses as absent.
impl From<Value> for TraditionalTier {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let mut take = |key: &str| {
            map.remove(key)
                .map(DimensionScores::from)
                .unwrap_or_default()
        };
        Self {
            interests: take("interests"),
            intelligences: take("intelligences"),
        }
    }
}

impl TraditionalTier {
    /// True when any traditional score in the profile is nonzero.
    pub fn is_present(&self) -> bool {
        self.interests.any_nonzero() || self.intelligences.any_nonzero()
    }
}

/// Pro-tier results feeding the future core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PotentialTier {
    pub islands: DimensionScores,
    pub meta: DimensionScores,
}

/// Intermediate values behind one island's fused score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslandTrace {
    pub island: IslandCode,
    pub traditional_interest: f64,
    pub potential_raw: f64,
    pub meta_average: f64,
    pub traditional_core: f64,
    pub future_core: f64,
    pub fused: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionOutcome {
    pub scores: IslandScores,
    pub traditional_present: bool,
    pub traces: Vec<IslandTrace>,
}

/// Blends the traditional and potential tiers into the eight island scores.
///
/// When no traditional score is present the traditional core falls back to the island's
/// own potential score, so skipping the free tier does not zero every island. Clamping
/// to 0–100 and rounding happen after all weighted sums.
pub fn fuse(
    table: &FusionTable,
    traditional: Option<&TraditionalTier>,
    potential: &PotentialTier,
) -> FusionOutcome {
    let traditional_present = traditional.is_some_and(TraditionalTier::is_present);
    let overall_intelligence = traditional
        .map(|tier| tier.intelligences.mean())
        .unwrap_or(0.0);

    let mut scores = IslandScores::default();
    let traces = IslandCode::ordered()
        .into_iter()
        .map(|island| {
            let mapping = table.mapping(island);
            let traditional_interest = match (traditional, mapping) {
                (Some(tier), Some(mapping)) => tier.interests.mean_of(&mapping.interests),
                _ => 0.0,
            };
            let potential_raw = f64::from(potential.islands.get(island.code()));
            let meta_average = mapping
                .map(|mapping| potential.meta.mean_of(&mapping.meta))
                .unwrap_or(0.0);

            let traditional_core = if traditional_present {
                let interest = if traditional_interest > 0.0 {
                    traditional_interest
                } else {
                    potential_raw
                };
                TRADITIONAL_INTEREST_WEIGHT * interest
                    + TRADITIONAL_INTELLIGENCE_WEIGHT * overall_intelligence
            } else {
                potential_raw
            };
            let future_core =
                FUTURE_ISLAND_WEIGHT * potential_raw + FUTURE_META_WEIGHT * meta_average;
            let fused = clamp_score(
                FUSED_TRADITIONAL_WEIGHT * traditional_core + FUSED_FUTURE_WEIGHT * future_core,
            );
            scores.set(island, fused);

            IslandTrace {
                island,
                traditional_interest,
                potential_raw,
                meta_average,
                traditional_core,
                future_core,
                fused,
            }
        })
        .collect();

    FusionOutcome {
        scores,
        traditional_present,
        traces,
    }
}

fn clamp_score(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn potential(island_score: u8, meta_score: u8) -> PotentialTier {
        PotentialTier {
            islands: IslandCode::ordered()
                .into_iter()
                .map(|island| (island.code(), island_score))
                .collect(),
            meta: ["CQ", "AQ", "XQ", "FQ", "DQ", "SEQ"]
                .into_iter()
                .map(|key| (key, meta_score))
                .collect(),
        }
    }

    #[test]
    fn non_object_traditional_payloads_read_as_an_empty_tier() {
        for raw in [json!("garbage"), json!([1, 2]), json!(42)] {
            let tier: TraditionalTier = serde_json::from_value(raw).expect("lenient tier");
            assert_eq!(tier, TraditionalTier::default());
            assert!(!tier.is_present());
        }

        let raw = json!({"interests": "oops", "intelligences": {"logical": 70}});
        let tier: TraditionalTier = serde_json::from_value(raw).expect("lenient tier");
        assert!(tier.interests.is_empty());
        assert_eq!(tier.intelligences.get("logical"), 70);
    }

    #[test]
    fn empty_mappings_with_traditional_data_blend_the_overall_average() {
        let traditional = TraditionalTier {
            interests: DimensionScores::new(),
            intelligences: [("logical", 50u8), ("spatial", 50)].into_iter().collect(),
        };

        let outcome = fuse(&FusionTable::empty(), Some(&traditional), &potential(40, 0));

        assert!(outcome.traditional_present);
        for trace in &outcome.traces {
            assert_eq!(trace.traditional_core, 44.0);
            assert_eq!(trace.future_core, 28.0);
            assert_eq!(trace.fused, 38);
        }
        assert!(outcome.scores.iter().all(|(_, score)| score == 38));
    }

    #[test]
    fn missing_traditional_tier_falls_back_to_potential() {
        let table = FusionTable::standard();
        let potential = potential(70, 40);

        let absent = fuse(&table, None, &potential);
        let zeroed = fuse(
            &table,
            Some(&TraditionalTier {
                interests: [("R", 0u8), ("I", 0)].into_iter().collect(),
                intelligences: [("logical", 0u8)].into_iter().collect(),
            }),
            &potential,
        );

        // 0.6 * 70 + 0.4 * (0.7 * 70 + 0.3 * 40) = 66.4
        for outcome in [&absent, &zeroed] {
            assert!(!outcome.traditional_present);
            assert!(outcome.scores.iter().all(|(_, score)| score == 66));
        }
    }

    #[test]
    fn nonzero_interest_replaces_the_potential_substitute() {
        let table = FusionTable::standard();
        let traditional = TraditionalTier {
            interests: [("A", 90u8), ("I", 70)].into_iter().collect(),
            intelligences: [("logical", 60u8)].into_iter().collect(),
        };

        let outcome = fuse(&table, Some(&traditional), &potential(50, 50));
        let creative = &outcome.traces[0];

        assert_eq!(creative.island, IslandCode::CreativeCulture);
        assert_eq!(creative.traditional_interest, 80.0);
        // traditional 0.6 * 80 + 0.4 * 60 = 72, future 50, fused 0.6 * 72 + 0.4 * 50 = 63.2
        assert_eq!(creative.fused, 63);

        // Sustainability maps to R, I, C; only I is present, averaging 70 / 3.
        let sustainability = outcome
            .traces
            .iter()
            .find(|trace| trace.island == IslandCode::Sustainability)
            .expect("sustainability trace");
        assert!((sustainability.traditional_interest - 70.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn custom_mapping_replaces_the_standard_entry() {
        let table = FusionTable::standard().with_mapping(
            IslandCode::PublicGovernance,
            IslandMapping {
                interests: vec!["S".to_string()],
                meta: Vec::new(),
            },
        );
        let traditional = TraditionalTier {
            interests: [("S", 90u8), ("E", 10)].into_iter().collect(),
            intelligences: DimensionScores::new(),
        };

        let outcome = fuse(&table, Some(&traditional), &potential(50, 80));
        let governance = outcome
            .traces
            .iter()
            .find(|trace| trace.island == IslandCode::PublicGovernance)
            .expect("governance trace");

        assert_eq!(governance.traditional_interest, 90.0);
        assert_eq!(governance.meta_average, 0.0);
    }

    #[test]
    fn fused_scores_stay_in_range_for_saturated_inputs() {
        let traditional = TraditionalTier {
            interests: ["R", "I", "A", "S", "E", "C"]
                .into_iter()
                .map(|key| (key, 100u8))
                .collect(),
            intelligences: [("logical", 100u8)].into_iter().collect(),
        };

        let table = FusionTable::standard();
        let outcome = fuse(&table, Some(&traditional), &potential(100, 100));

        assert!(outcome.scores.iter().all(|(_, score)| score == 100));
    }
}
