use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input document: `{"profiles": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesDocument {
    pub profiles: Vec<ProfileRecord>,
}

/// One profile as it appears on the wire.
///
/// Answers stay as raw JSON so a single malformed record can be skipped
/// without rejecting the whole profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    #[serde(default)]
    pub answers: Vec<serde_json::Value>,
}

/// One answer record as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerRecord {
    #[serde(rename = "questionId")]
    pub question_id: i64,
    pub answer: i64,
    #[serde(rename = "acceptableAnswers")]
    pub acceptable_answers: Vec<i64>,
    /// Importance code, 0 (irrelevant) to 4 (mandatory)
    #[validate(range(min = 0, max = 4))]
    pub importance: i64,
}
