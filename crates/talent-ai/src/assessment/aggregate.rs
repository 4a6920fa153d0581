use super::answers::AnswerVector;
use super::bank::{declared_dimensions, BoundItem, LikertScale};
use super::scores::DimensionScores;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    answered: usize,
    earned: f64,
    possible: f64,
}

/// Normalizes the answers for a set of bound items into one 0–100 score per dimension.
///
/// Each item contributes according to its [`ScaleKind`](super::bank::ScaleKind):
/// endorsement and expected-answer items earn 0 or 1 of a possible 1, four-level items earn
/// their scale weight of a possible maximum weight. Unanswered slots and codes that fall
/// outside the scale are skipped entirely, so they move neither numerator nor denominator.
/// Every declared dimension appears in the result, scoring 0 when nothing was answered.
pub fn aggregate(
    items: &[BoundItem],
    answers: &AnswerVector,
    scale: &LikertScale,
) -> DimensionScores {
    let dimensions = declared_dimensions(items);
    let mut tallies = vec![Tally::default(); dimensions.len()];

    for bound in items {
        let Some(code) = answers.get(bound.slot) else {
            continue;
        };
        let Some(credit) = bound.item.scale.credit(code, scale) else {
            continue;
        };
        let Some(index) = dimensions
            .iter()
            .position(|dimension| *dimension == bound.item.dimension)
        else {
            continue;
        };
        let tally = &mut tallies[index];
        tally.answered += 1;
        tally.earned += credit.earned;
        tally.possible += credit.possible;
    }

    dimensions
        .into_iter()
        .zip(tallies)
        .map(|(dimension, tally)| (dimension, percent(tally)))
        .collect()
}

fn percent(tally: Tally) -> u8 {
    if tally.answered == 0 {
        return 0;
    }
    let ratio = tally.earned / tally.possible.max(1.0);
    (100.0 * ratio).round().clamp(0.0, 100.0) as u8
}

/// Counts the form positions that carry an answer.
pub fn answered_slots(items: &[BoundItem], answers: &AnswerVector) -> usize {
    items
        .iter()
        .filter(|bound| answers.get(bound.slot).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::bank::{AssessmentForm, ModuleKind, QuestionItem, QuestionModule};

    fn bind(kind: ModuleKind, items: Vec<QuestionItem>) -> Vec<BoundItem> {
        let module = QuestionModule { kind, items };
        let form = AssessmentForm::bind(LikertScale::default(), vec![module])
            .expect("form binds");
        form.modules()[0].items().to_vec()
    }

    fn score_codes(items: &[BoundItem], codes: &[i64]) -> DimensionScores {
        let answers = AnswerVector::answered(codes);
        aggregate(items, &answers, &LikertScale::default())
    }

    fn endorsement_items(count: usize, dimension: &str) -> Vec<BoundItem> {
        bind(
            ModuleKind::Interests,
            (0..count)
                .map(|n| QuestionItem::endorsement(format!("q{n}"), dimension))
                .collect(),
        )
    }

    #[test]
    fn endorsement_excludes_unanswered_positions() {
        let items = endorsement_items(4, "R");
        let answers = AnswerVector::new(vec![Some(1), Some(1), Some(0), None]);

        let scores = aggregate(&items, &answers, &LikertScale::default());

        assert_eq!(scores.get("R"), 67);
    }

    #[test]
    fn trailing_absent_positions_do_not_shift_scores() {
        let items = endorsement_items(4, "R");
        let short = AnswerVector::new(vec![Some(1), Some(0), Some(1)]);
        let padded = AnswerVector::new(vec![Some(1), Some(0), Some(1), None]);

        assert_eq!(
            aggregate(&items, &short, &LikertScale::default()),
            aggregate(&items, &padded, &LikertScale::default())
        );
    }

    #[test]
    fn expected_false_item_scores_a_no_as_a_hit() {
        let items = bind(
            ModuleKind::Intelligences,
            vec![QuestionItem::expected("ability", "logical", false)],
        );

        let no = score_codes(&items, &[0]);
        let yes = score_codes(&items, &[1]);

        assert_eq!(no.get("logical"), 100);
        assert_eq!(yes.get("logical"), 0);
    }

    #[test]
    fn expected_true_item_keeps_the_usual_direction() {
        let items = bind(
            ModuleKind::Intelligences,
            vec![QuestionItem::expected("ability", "spatial", true)],
        );

        let yes = score_codes(&items, &[3]);
        let no = score_codes(&items, &[0]);

        assert_eq!(yes.get("spatial"), 100);
        assert_eq!(no.get("spatial"), 0);
    }

    #[test]
    fn four_level_divides_by_answered_times_max_weight() {
        let items = bind(
            ModuleKind::MetaIntelligence,
            vec![
                QuestionItem::likert("m1", "CQ"),
                QuestionItem::likert("m2", "CQ"),
                QuestionItem::likert("m3", "CQ"),
                QuestionItem::likert("m4", "AQ"),
            ],
        );
        // CQ: weights 3 + 1 over two answered items, third unanswered.
        let answers = AnswerVector::new(vec![Some(0), Some(2), None, Some(9)]);

        let scores = aggregate(&items, &answers, &LikertScale::default());

        assert_eq!(scores.get("CQ"), 67);
        assert!(scores.contains("AQ"));
        assert_eq!(scores.get("AQ"), 0);
    }

    #[test]
    fn absent_answers_score_every_dimension_zero() {
        let items = bind(
            ModuleKind::MetaIntelligence,
            vec![
                QuestionItem::likert("m1", "CQ"),
                QuestionItem::likert("m2", "XQ"),
            ],
        );

        let scores = aggregate(&items, &AnswerVector::default(), &LikertScale::default());

        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|(_, score)| score == 0));
        assert_eq!(answered_slots(&items, &AnswerVector::default()), 0);
    }

    #[test]
    fn degenerate_scale_never_divides_by_zero() {
        let form = AssessmentForm::bind(
            LikertScale::new(vec![0, 0]),
            vec![QuestionModule {
                kind: ModuleKind::Composite,
                items: vec![QuestionItem::likert("c1", "grit")],
            }],
        )
        .expect("form binds");
        let items = form.modules()[0].items();

        let scores = aggregate(items, &AnswerVector::answered(&[1]), form.scale());

        assert_eq!(scores.get("grit"), 0);
    }
}
