use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, ValidationError};

/// How much a respondent cares about a partner's answer to one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Importance {
    Irrelevant,
    Little,
    Somewhat,
    Very,
    Mandatory,
}

impl Importance {
    /// Map a wire code (0-4) to its importance level
    pub fn from_code(code: i64) -> Result<Self, ValidationError> {
        match code {
            0 => Ok(Self::Irrelevant),
            1 => Ok(Self::Little),
            2 => Ok(Self::Somewhat),
            3 => Ok(Self::Very),
            4 => Ok(Self::Mandatory),
            other => Err(ValidationError::InvalidImportance(other)),
        }
    }

    /// Points this level contributes to a directed score
    #[inline]
    pub fn weight(self) -> u32 {
        match self {
            Self::Irrelevant => 0,
            Self::Little => 1,
            Self::Somewhat => 10,
            Self::Very => 50,
            Self::Mandatory => 250,
        }
    }
}

/// One respondent's answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    pub question_id: i64,
    pub chosen_answer: i64,
    /// Partner answers this respondent accepts. Empty means none are.
    pub acceptable_answers: HashSet<i64>,
    pub importance: Importance,
}

impl QuestionResponse {
    pub fn new(
        question_id: i64,
        chosen_answer: i64,
        acceptable_answers: impl IntoIterator<Item = i64>,
        importance: Importance,
    ) -> Self {
        Self {
            question_id,
            chosen_answer,
            acceptable_answers: acceptable_answers.into_iter().collect(),
            importance,
        }
    }

    #[inline]
    pub fn accepts(&self, answer: i64) -> bool {
        self.acceptable_answers.contains(&answer)
    }
}

/// One respondent and the questions they answered.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    profile_id: i64,
    responses: HashMap<i64, QuestionResponse>,
}

impl Profile {
    /// Build a profile. A question answered twice keeps the last response.
    pub fn new(profile_id: i64, responses: impl IntoIterator<Item = QuestionResponse>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| (r.question_id, r))
            .collect();
        Self {
            profile_id,
            responses,
        }
    }

    pub fn id(&self) -> i64 {
        self.profile_id
    }

    pub fn responses(&self) -> &HashMap<i64, QuestionResponse> {
        &self.responses
    }

    pub fn response(&self, question_id: i64) -> Option<&QuestionResponse> {
        self.responses.get(&question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }
}

/// Unordered pair of two distinct profile ids.
///
/// Stored as `(low, high)` so both insertion orders compare and hash equal.
/// The derived ordering is the tie-break rule used by selection.
/// Serialized as a `[low, high]` array; deserializing goes through
/// `PairKey::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct PairKey {
    low: i64,
    high: i64,
}

impl PairKey {
    pub fn new(a: i64, b: i64) -> Result<Self, MatchError> {
        if a == b {
            return Err(MatchError::SelfPair(a));
        }
        Ok(Self {
            low: a.min(b),
            high: a.max(b),
        })
    }

    /// The lower id, which is always the scorer's "A" side
    pub fn first(&self) -> i64 {
        self.low
    }

    pub fn second(&self) -> i64 {
        self.high
    }
}

impl TryFrom<(i64, i64)> for PairKey {
    type Error = MatchError;

    fn try_from((a, b): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(a, b)
    }
}

impl From<PairKey> for (i64, i64) {
    fn from(key: PairKey) -> Self {
        (key.low, key.high)
    }
}

/// A scored pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScore {
    pub key: PairKey,
    pub score: f64,
}
