use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::{LoadError, ValidationError};
use crate::models::{AnswerRecord, Importance, Profile, ProfilesDocument, QuestionResponse};

/// A skipped or overridden answer record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub profile_id: i64,
    /// Position of the record in the profile's `answers` array
    pub index: usize,
    pub error: ValidationError,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "profile {} answer #{}: {}",
            self.profile_id, self.index, self.error
        )
    }
}

/// Profiles parsed from an input document, plus everything that was skipped
#[derive(Debug, Clone, Default)]
pub struct LoadedProfiles {
    pub profiles: Vec<Profile>,
    pub issues: Vec<ValidationIssue>,
}

/// Read and parse the input document at `path`
pub fn load_profiles(path: &Path) -> Result<LoadedProfiles, LoadError> {
    info!("Reading profiles from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_profiles(&text)
}

/// Parse an input document.
///
/// The document envelope must be well formed. Individual answer records
/// that fail to parse or validate are skipped and reported in `issues`.
pub fn parse_profiles(text: &str) -> Result<LoadedProfiles, LoadError> {
    let document: ProfilesDocument = serde_json::from_str(text)?;
    convert_document(document)
}

/// Convert a parsed document into validated profiles
pub fn convert_document(document: ProfilesDocument) -> Result<LoadedProfiles, LoadError> {
    let mut loaded = LoadedProfiles::default();
    let mut profile_ids = HashSet::with_capacity(document.profiles.len());

    for record in document.profiles {
        if !profile_ids.insert(record.id) {
            return Err(LoadError::DuplicateProfile(record.id));
        }

        let mut responses = Vec::with_capacity(record.answers.len());
        let mut question_ids = HashSet::with_capacity(record.answers.len());

        for (index, value) in record.answers.into_iter().enumerate() {
            match parse_answer(value) {
                Ok(response) => {
                    if !question_ids.insert(response.question_id) {
                        loaded.issues.push(ValidationIssue {
                            profile_id: record.id,
                            index,
                            error: ValidationError::DuplicateQuestion(response.question_id),
                        });
                    }
                    responses.push(response);
                }
                Err(error) => loaded.issues.push(ValidationIssue {
                    profile_id: record.id,
                    index,
                    error,
                }),
            }
        }

        loaded.profiles.push(Profile::new(record.id, responses));
    }

    for issue in &loaded.issues {
        warn!("Input defect in {}", issue);
    }
    info!(
        "Loaded {} profiles ({} answer records skipped or overridden)",
        loaded.profiles.len(),
        loaded.issues.len()
    );

    Ok(loaded)
}

/// Parse and validate a single answer record
pub fn parse_answer(value: Value) -> Result<QuestionResponse, ValidationError> {
    let record: AnswerRecord = serde_json::from_value(value)
        .map_err(|e| ValidationError::MalformedAnswer(e.to_string()))?;

    if let Err(errors) = record.validate() {
        debug!("Answer record failed validation: {:?}", errors);
        return Err(ValidationError::InvalidImportance(record.importance));
    }
    let importance = Importance::from_code(record.importance)?;

    Ok(QuestionResponse::new(
        record.question_id,
        record.answer,
        record.acceptable_answers,
        importance,
    ))
}
