// Boundary adapters: input document in, report out
pub mod loader;
pub mod report;

pub use loader::{convert_document, load_profiles, parse_answer, parse_profiles, LoadedProfiles, ValidationIssue};
pub use report::{build_report, to_json};
