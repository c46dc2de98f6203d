use std::collections::HashMap;

use crate::models::{MatchEntry, MatchReport, PairScore, ProfileMatches};

/// Group selected pairs into the output document.
///
/// Each pair is reported under its lower profile id. Groups appear in the
/// rank order of their first pair and matches keep rank order inside a
/// group.
pub fn build_report(selected: &[PairScore]) -> MatchReport {
    let mut results: Vec<ProfileMatches> = Vec::new();
    let mut group_index: HashMap<i64, usize> = HashMap::new();

    for pair in selected {
        let owner = pair.key.first();
        let idx = *group_index.entry(owner).or_insert_with(|| {
            results.push(ProfileMatches {
                profile_id: owner,
                matches: Vec::new(),
            });
            results.len() - 1
        });

        results[idx].matches.push(MatchEntry {
            profile_id: pair.key.second(),
            score: pair.score,
        });
    }

    MatchReport { results }
}

/// Render the report as JSON
pub fn to_json(report: &MatchReport, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
