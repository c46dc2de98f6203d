use serde::{Deserialize, Serialize};

/// Output document: `{"results": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub results: Vec<ProfileMatches>,
}

/// Selected matches reported under one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMatches {
    #[serde(rename = "profileId")]
    pub profile_id: i64,
    pub matches: Vec<MatchEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    #[serde(rename = "profileId")]
    pub profile_id: i64,
    pub score: f64,
}
