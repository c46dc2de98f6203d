use crate::error::ScoreError;
use crate::models::Profile;

/// Points tallied from one profile's perspective on a partner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectedView {
    pub points_possible: u32,
    pub points_earned: u32,
    pub common_questions: u32,
}

impl DirectedView {
    /// Share of the owner's possible points the partner earned
    #[inline]
    fn ratio(&self) -> f64 {
        self.points_earned as f64 / self.points_possible as f64
    }
}

/// Tally `owner`'s view of `other`.
///
/// Every question the owner answered adds its importance to the possible
/// points. When `other` answered it too and gave an answer the owner
/// accepts, the same weight is earned. Weights and acceptable answers come
/// from the owner only.
pub fn directed_view(owner: &Profile, other: &Profile) -> DirectedView {
    let mut view = DirectedView::default();

    for (question_id, response) in owner.responses() {
        let weight = response.importance.weight();
        view.points_possible += weight;

        if let Some(theirs) = other.response(*question_id) {
            view.common_questions += 1;
            if response.accepts(theirs.chosen_answer) {
                view.points_earned += weight;
            }
        }
    }

    view
}

/// Calculate the match score for a pair of profiles
///
/// Scoring formula:
/// score = sqrt(ratio_a * ratio_b) - 1 / common_a
///
/// where `ratio_x = earned_x / possible_x` and `common_a` is the number of
/// questions both profiles answered, counted from `a`'s side. The result is
/// not clamped and may be negative.
///
/// # Errors
/// `NoPossiblePoints` when either profile has zero possible points, and
/// `NoCommonQuestions` when the margin would divide by zero. Neither case
/// ever yields a NaN or infinite score.
pub fn score_pair(a: &Profile, b: &Profile) -> Result<f64, ScoreError> {
    let view_a = directed_view(a, b);
    let view_b = directed_view(b, a);

    if view_a.points_possible == 0 {
        return Err(ScoreError::NoPossiblePoints { profile_id: a.id() });
    }
    if view_b.points_possible == 0 {
        return Err(ScoreError::NoPossiblePoints { profile_id: b.id() });
    }
    if view_a.common_questions == 0 {
        return Err(ScoreError::NoCommonQuestions {
            profile_a: a.id(),
            profile_b: b.id(),
        });
    }

    let combined = (view_a.ratio() * view_b.ratio()).sqrt();
    let margin = 1.0 / view_a.common_questions as f64;

    Ok(combined - margin)
}
