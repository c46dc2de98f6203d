use thiserror::Error;

/// Per-record validation failures. These never abort a run; the loader
/// collects them as warnings and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid importance code {0}, expected 0-4")]
    InvalidImportance(i64),

    #[error("Malformed answer record: {0}")]
    MalformedAnswer(String),

    #[error("Question {0} answered more than once, keeping the last answer")]
    DuplicateQuestion(i64),
}

/// Precondition violations raised while scoring a single pair
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Profile {profile_id} has no possible points (no weighted answers)")]
    NoPossiblePoints { profile_id: i64 },

    #[error("Profiles {profile_a} and {profile_b} share no common questions")]
    NoCommonQuestions { profile_a: i64, profile_b: i64 },
}

/// Errors from the ranking engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Scoring failed: {0}")]
    Score(#[from] ScoreError),

    #[error("Requested {requested} matches but only {available} pairs are available")]
    SelectionUnderflow { requested: usize, available: usize },

    #[error("Duplicate profile id: {0}")]
    DuplicateProfile(i64),

    #[error("A profile cannot be paired with itself (id {0})")]
    SelfPair(i64),
}

/// Errors from loading the input document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate profile id in input: {0}")]
    DuplicateProfile(i64),
}
