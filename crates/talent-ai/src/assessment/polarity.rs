use serde::Serialize;

use super::answers::AnswerVector;
use super::bank::{BoundItem, LikertScale, PolarityAxis, Pole};

/// Weighted sums collected for one axis and the pole they resolve to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTally {
    pub axis: PolarityAxis,
    pub first: Pole,
    pub second: Pole,
    pub first_sum: f64,
    pub second_sum: f64,
    pub resolved: Pole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarityProfile {
    /// Four letters, one per axis in [`PolarityAxis::ordered`] order.
    pub code: String,
    pub axes: Vec<AxisTally>,
}

/// Resolves each axis to the pole with the larger weighted response sum. Items without a
/// pole are ignored; unanswered items add nothing. The axis's first pole wins a tie, which
/// includes the all-unanswered case.
pub fn resolve_polarity(
    items: &[BoundItem],
    answers: &AnswerVector,
    scale: &LikertScale,
) -> PolarityProfile {
    let axes: Vec<AxisTally> = PolarityAxis::ordered()
        .into_iter()
        .map(|axis| {
            let (first, second) = axis.poles();
            let mut first_sum = 0.0;
            let mut second_sum = 0.0;

            for bound in items {
                let Some(pole) = bound.item.pole.filter(|pole| pole.axis() == axis) else {
                    continue;
                };
                let Some(credit) = answers
                    .get(bound.slot)
                    .and_then(|code| bound.item.scale.credit(code, scale))
                else {
                    continue;
                };
                if pole == first {
                    first_sum += credit.earned;
                } else {
                    second_sum += credit.earned;
                }
            }

            let resolved = if first_sum >= second_sum {
                first
            } else {
                second
            };
            AxisTally {
                axis,
                first,
                second,
                first_sum,
                second_sum,
                resolved,
            }
        })
        .collect();

    let code = axes.iter().map(|tally| tally.resolved.letter()).collect();
    PolarityProfile { code, axes }
}
