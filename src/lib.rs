//! Lume Compat - question-based compatibility scoring for Lume
//!
//! Scores every pair of survey-answer profiles by weighted mutual agreement
//! and selects the top-K pairs. Input parsing and report rendering live in
//! `services`; the scoring and ranking logic in `core` does no I/O.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{score_pair, select_top_k, Matcher, MatcherOptions, SelectionOrder};
pub use error::{LoadError, MatchError, ScoreError, ValidationError};
pub use models::{Importance, MatchReport, PairKey, PairScore, Profile, QuestionResponse};
