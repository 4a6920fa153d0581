use serde::Serialize;
use tracing::debug;

use super::aggregate::{aggregate, answered_slots};
use super::answers::AnswerVector;
use super::bank::{AssessmentForm, ModuleKind, QuestionBank};
use super::catalog::{CareerCatalog, CatalogError};
use super::fusion::{fuse, FusionTable, IslandTrace, PotentialTier, TraditionalTier};
use super::islands::{IslandCode, IslandScores};
use super::polarity::{resolve_polarity, PolarityProfile};
use super::ranking::{rank, RankingPolicy, Recommendation};
use super::scores::DimensionScores;

/// Number of RIASEC letters reported as the respondent's leading interests.
const TOP_INTERESTS: usize = 3;

/// Answered versus declared items for one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub answered: usize,
    pub total: usize,
}

impl Completion {
    fn for_form(form: &AssessmentForm, answers: &AnswerVector) -> Self {
        let answered = form
            .modules()
            .iter()
            .map(|module| answered_slots(module.items(), answers))
            .sum();
        Self {
            answered,
            total: form.slot_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeCompletion {
    pub intelligences: Completion,
    pub interests: Completion,
}

/// Free-tier results: the traditional tier plus the leading interest letters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeReport {
    pub intelligences: DimensionScores,
    pub interests: DimensionScores,
    pub top_interests: Vec<String>,
    pub completion: FreeCompletion,
}

impl FreeReport {
    /// The traditional tier to hand to a later pro scoring run.
    pub fn traditional_tier(&self) -> TraditionalTier {
        TraditionalTier {
            interests: self.interests.clone(),
            intelligences: self.intelligences.clone(),
        }
    }
}

/// Pro-tier results, including the fused islands and ranked careers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProReport {
    pub meta: DimensionScores,
    pub islands_raw: DimensionScores,
    pub big_five: DimensionScores,
    pub enneagram: DimensionScores,
    pub composite: DimensionScores,
    pub polarity_dimensions: DimensionScores,
    pub polarity: PolarityProfile,
    pub islands: IslandScores,
    pub traditional_present: bool,
    pub fusion: Vec<IslandTrace>,
    pub top_islands: Vec<IslandCode>,
    pub recommendations: Vec<Recommendation>,
    pub completion: Completion,
}

/// Static description of one island for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IslandSummary {
    pub code: IslandCode,
    pub label: &'static str,
    pub interests: Vec<String>,
    pub meta: Vec<String>,
    pub careers: usize,
}

/// Stateless scorer over a question bank, career catalog, fusion table and ranking policy.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    bank: QuestionBank,
    catalog: CareerCatalog,
    fusion: FusionTable,
    ranking: RankingPolicy,
}

impl AssessmentEngine {
    pub fn new(bank: QuestionBank, catalog: CareerCatalog) -> Self {
        Self {
            bank,
            catalog,
            fusion: FusionTable::standard(),
            ranking: RankingPolicy::default(),
        }
    }

    /// Engine over the bundled question bank and career catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        let catalog = CareerCatalog::bundled()?;
        Ok(Self::new(QuestionBank::standard(), catalog))
    }

    pub fn with_fusion_table(mut self, fusion: FusionTable) -> Self {
        self.fusion = fusion;
        self
    }

    pub fn with_ranking_policy(mut self, ranking: RankingPolicy) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub fn score_free(&self, intelligences: &AnswerVector, interests: &AnswerVector) -> FreeReport {
        let mi_form = &self.bank.intelligences;
        let interest_form = &self.bank.interests;

        let intelligence_scores = module_scores(mi_form, ModuleKind::Intelligences, intelligences);
        let interest_scores = module_scores(interest_form, ModuleKind::Interests, interests);
        let top_interests = interest_scores
            .top(TOP_INTERESTS)
            .into_iter()
            .map(str::to_string)
            .collect();

        let completion = FreeCompletion {
            intelligences: Completion::for_form(mi_form, intelligences),
            interests: Completion::for_form(interest_form, interests),
        };
        debug!(
            intelligences_answered = completion.intelligences.answered,
            interests_answered = completion.interests.answered,
            "scored free assessment"
        );

        FreeReport {
            intelligences: intelligence_scores,
            interests: interest_scores,
            top_interests,
            completion,
        }
    }

    pub fn score_pro(
        &self,
        answers: &AnswerVector,
        traditional: Option<&TraditionalTier>,
    ) -> ProReport {
        let form = &self.bank.pro;

        let meta = module_scores(form, ModuleKind::MetaIntelligence, answers);
        let islands_raw = module_scores(form, ModuleKind::Islands, answers);
        let polarity_items = form
            .module(ModuleKind::Polarity)
            .map(|module| module.items())
            .unwrap_or_default();

        let outcome = fuse(
            &self.fusion,
            traditional,
            &PotentialTier {
                islands: islands_raw.clone(),
                meta: meta.clone(),
            },
        );
        let top_islands = outcome.scores.top(self.ranking.top_islands);
        let recommendations = rank(&outcome.scores, &self.catalog, &self.ranking);
        let completion = Completion::for_form(form, answers);

        debug!(
            answered = completion.answered,
            total = completion.total,
            traditional_present = outcome.traditional_present,
            recommendations = recommendations.len(),
            "scored pro assessment"
        );

        ProReport {
            big_five: module_scores(form, ModuleKind::BigFive, answers),
            enneagram: module_scores(form, ModuleKind::Enneagram, answers),
            composite: module_scores(form, ModuleKind::Composite, answers),
            polarity_dimensions: aggregate(polarity_items, answers, form.scale()),
            polarity: resolve_polarity(polarity_items, answers, form.scale()),
            meta,
            islands_raw,
            islands: outcome.scores,
            traditional_present: outcome.traditional_present,
            fusion: outcome.traces,
            top_islands,
            recommendations,
            completion,
        }
    }

    pub fn island_overview(&self) -> Vec<IslandSummary> {
        IslandCode::ordered()
            .into_iter()
            .map(|island| {
                let mapping = self.fusion.mapping(island);
                IslandSummary {
                    code: island,
                    label: island.label(),
                    interests: mapping
                        .map(|mapping| mapping.interests.clone())
                        .unwrap_or_default(),
                    meta: mapping
                        .map(|mapping| mapping.meta.clone())
                        .unwrap_or_default(),
                    careers: self.catalog.records_for(island).len(),
                }
            })
            .collect()
    }
}

/// Scores one module of a form; a module the form does not declare scores as empty.
fn module_scores(
    form: &AssessmentForm,
    kind: ModuleKind,
    answers: &AnswerVector,
) -> DimensionScores {
    form.module(kind)
        .map(|module| aggregate(module.items(), answers, form.scale()))
        .unwrap_or_default()
}
