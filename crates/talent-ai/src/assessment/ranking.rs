use serde::{Deserialize, Serialize};

use super::catalog::{CareerCatalog, CareerRecord};
use super::islands::{IslandCode, IslandScores};

/// Weights and limits applied when joining island scores to the career catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingPolicy {
    pub top_islands: usize,
    pub max_recommendations: usize,
    pub affinity_weight: f64,
    pub trend_weight: f64,
    pub default_trend: f64,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            top_islands: 3,
            max_recommendations: 6,
            affinity_weight: 0.7,
            trend_weight: 0.3,
            default_trend: 75.0,
        }
    }
}

impl RankingPolicy {
    /// Trend used for a record: missing or non-finite values take the default, and the
    /// result is held to 0–100.
    pub fn trend_for(&self, record: &CareerRecord) -> f64 {
        record
            .trend_score
            .filter(|trend| trend.is_finite())
            .unwrap_or(self.default_trend)
            .clamp(0.0, 100.0)
    }

    pub fn match_score(&self, island_score: u8, record: &CareerRecord) -> f64 {
        f64::from(island_score) * self.affinity_weight + self.trend_for(record) * self.trend_weight
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub island: IslandCode,
    pub match_score: f64,
    pub record: CareerRecord,
}

/// Ranks the catalog records attached to the highest scoring islands.
///
/// Islands are picked by descending score with canonical order on ties, records are
/// gathered island by island in that order, then stably sorted by descending match
/// score and truncated.
pub fn rank(
    scores: &IslandScores,
    catalog: &CareerCatalog,
    policy: &RankingPolicy,
) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = scores
        .top(policy.top_islands)
        .into_iter()
        .flat_map(|island| {
            let island_score = scores.get(island);
            catalog
                .records_for(island)
                .iter()
                .map(move |record| Recommendation {
                    island,
                    match_score: policy.match_score(island_score, record),
                    record: record.clone(),
                })
        })
        .collect();

    ranked.sort_by(|left, right| right.match_score.total_cmp(&left.match_score));
    ranked.truncate(policy.max_recommendations);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{CareerKind, LocalizedText};

    fn record(title: &str, trend: Option<f64>) -> CareerRecord {
        CareerRecord {
            kind: CareerKind::Job,
            title: LocalizedText {
                zh: title.to_string(),
                en: title.to_string(),
            },
            category: None,
            trend_score: trend,
            ai_trend: None,
            skills: None,
        }
    }

    fn scores() -> IslandScores {
        [
            (IslandCode::CreativeCulture, 90),
            (IslandCode::EntrepreneurialLeadership, 60),
            (IslandCode::ThinkingPhilosophy, 80),
            (IslandCode::HealthLife, 70),
            (IslandCode::Sustainability, 10),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn ranks_records_from_the_top_three_islands() {
        let catalog = CareerCatalog::new()
            .with_records(
                IslandCode::CreativeCulture,
                vec![record("cc-low", Some(40.0)), record("cc-high", Some(100.0))],
            )
            .with_records(IslandCode::ThinkingPhilosophy, vec![record("tp", None)])
            .with_records(
                IslandCode::HealthLife,
                vec![
                    record("hl-a", Some(90.0)),
                    record("hl-b", Some(80.0)),
                    record("hl-c", Some(70.0)),
                    record("hl-d", Some(0.0)),
                ],
            )
            .with_records(
                IslandCode::EntrepreneurialLeadership,
                vec![record("el", Some(100.0))],
            );

        let ranked = rank(&scores(), &catalog, &RankingPolicy::default());

        assert_eq!(ranked.len(), 6);
        assert!(ranked.iter().all(|rec| rec.record.title.en != "hl-d"));
        assert!(ranked
            .windows(2)
            .all(|pair| pair[0].match_score >= pair[1].match_score));
        assert!(ranked
            .iter()
            .all(|rec| rec.island != IslandCode::EntrepreneurialLeadership));
        assert_eq!(ranked[0].record.title.en, "cc-high");
        assert!((ranked[0].match_score - 93.0).abs() < 1e-9);
        let tp = ranked
            .iter()
            .find(|rec| rec.record.title.en == "tp")
            .expect("tp ranked");
        // 80 * 0.7 + 75 * 0.3
        assert!((tp.match_score - 78.5).abs() < 1e-9);
    }

    #[test]
    fn equal_matches_follow_canonical_island_order() {
        let catalog = CareerCatalog::new()
            .with_records(IslandCode::ThinkingPhilosophy, vec![record("tp", Some(50.0))])
            .with_records(IslandCode::CreativeCulture, vec![record("cc", Some(50.0))]);
        let scores: IslandScores = [
            (IslandCode::CreativeCulture, 70),
            (IslandCode::ThinkingPhilosophy, 70),
        ]
        .into_iter()
        .collect();

        let ranked = rank(&scores, &catalog, &RankingPolicy::default());

        assert_eq!(ranked[0].match_score, ranked[1].match_score);
        assert_eq!(ranked[0].island, IslandCode::CreativeCulture);
        assert_eq!(ranked[0].record.title.en, "cc");
        assert_eq!(ranked[1].record.title.en, "tp");
    }

    #[test]
    fn empty_catalog_yields_no_recommendations() {
        assert!(rank(&scores(), &CareerCatalog::new(), &RankingPolicy::default()).is_empty());
    }

    #[test]
    fn out_of_range_trends_are_clamped() {
        let policy = RankingPolicy::default();
        assert_eq!(policy.trend_for(&record("hot", Some(250.0))), 100.0);
        assert_eq!(policy.trend_for(&record("cold", Some(-5.0))), 0.0);
        assert_eq!(policy.trend_for(&record("broken", Some(f64::NAN))), 75.0);
    }
}
