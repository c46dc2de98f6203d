// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Importance, PairKey, PairScore, Profile, QuestionResponse};
pub use requests::{AnswerRecord, ProfileRecord, ProfilesDocument};
pub use responses::{MatchEntry, MatchReport, ProfileMatches};
