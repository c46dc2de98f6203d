// Integration tests for Lume Compat

use lume_compat::core::{Matcher, MatcherOptions, SelectionOrder};
use lume_compat::error::MatchError;
use lume_compat::models::{Importance, PairKey, Profile, QuestionResponse};
use lume_compat::services::{build_report, parse_profiles, to_json};

const SAMPLE_INPUT: &str = r#"{
  "profiles": [
    {"id": 1, "answers": [
      {"questionId": 1, "answer": 1, "acceptableAnswers": [1, 2], "importance": 3},
      {"questionId": 2, "answer": 2, "acceptableAnswers": [2], "importance": 4},
      {"questionId": 3, "answer": 1, "acceptableAnswers": [1], "importance": 1}
    ]},
    {"id": 2, "answers": [
      {"questionId": 1, "answer": 2, "acceptableAnswers": [1], "importance": 2},
      {"questionId": 2, "answer": 2, "acceptableAnswers": [2, 3], "importance": 3},
      {"questionId": 3, "answer": 3, "acceptableAnswers": [3], "importance": 0}
    ]},
    {"id": 3, "answers": [
      {"questionId": 1, "answer": 3, "acceptableAnswers": [3], "importance": 4},
      {"questionId": 2, "answer": 1, "acceptableAnswers": [1], "importance": 4},
      {"questionId": 3, "answer": 1, "acceptableAnswers": [1, 2, 3], "importance": 2}
    ]},
    {"id": 4, "answers": [
      {"questionId": 1, "answer": 1, "acceptableAnswers": [1, 2, 3], "importance": 1},
      {"questionId": 2, "answer": 2, "acceptableAnswers": [1, 2], "importance": 2},
      {"questionId": 3, "answer": 1, "acceptableAnswers": [1], "importance": 7}
    ]}
  ]
}"#;

fn create_test_profile(id: i64, answers: &[i64], accept: &[i64]) -> Profile {
    let responses = answers.iter().enumerate().map(|(idx, &answer)| {
        QuestionResponse::new(idx as i64 + 1, answer, accept.iter().copied(), Importance::Somewhat)
    });
    Profile::new(id, responses)
}

#[test]
fn test_integration_end_to_end_ranking() {
    let loaded = parse_profiles(SAMPLE_INPUT).unwrap();

    // Profile 4's third answer has an invalid importance code
    assert_eq!(loaded.profiles.len(), 4);
    assert_eq!(loaded.issues.len(), 1);
    assert_eq!(loaded.issues[0].profile_id, 4);

    let matcher = Matcher::default();
    let all = matcher.score_all(&loaded.profiles).unwrap();
    assert_eq!(all.len(), 6);

    let selected = matcher.rank(&loaded.profiles, 3).unwrap();
    assert_eq!(selected.len(), 3);

    // Rank order is ascending score
    for window in selected.windows(2) {
        assert!(window[0].score <= window[1].score);
    }

    // Nothing unselected scores below the worst selected pair
    let worst = selected[2].score;
    let below = all.values().filter(|&&s| s < worst).count();
    assert!(below <= 2);

    let report = build_report(&selected);
    let reported: usize = report.results.iter().map(|r| r.matches.len()).sum();
    assert_eq!(reported, 3);
}

#[test]
fn test_integration_known_scores() {
    let loaded = parse_profiles(SAMPLE_INPUT).unwrap();
    let all = Matcher::default().score_all(&loaded.profiles).unwrap();

    // 1 -> 2: q1 2 ok (50), q2 2 ok (250), q3 3 no (1): 300/301
    // 2 -> 1: q1 1 ok (10), q2 2 ok (50), q3 weight 0:   60/60
    let expected = (300.0f64 / 301.0).sqrt() - 1.0 / 3.0;
    let score = all[&PairKey::new(1, 2).unwrap()];
    assert!((score - expected).abs() < 1e-12);

    // 1 and 3 never accept each other's answers on q1/q2
    // 1 -> 3: q3 ok (1) of 301; 3 -> 1: q3 ok (10) of 510
    let expected = ((1.0f64 / 301.0) * (10.0 / 510.0)).sqrt() - 1.0 / 3.0;
    let score = all[&PairKey::new(1, 3).unwrap()];
    assert!((score - expected).abs() < 1e-12);
}

#[test]
fn test_integration_repeated_runs_are_identical() {
    let loaded = parse_profiles(SAMPLE_INPUT).unwrap();
    let matcher = Matcher::default();

    let first = matcher.rank(&loaded.profiles, 6).unwrap();
    for _ in 0..5 {
        assert_eq!(matcher.rank(&loaded.profiles, 6).unwrap(), first);
    }

    let json_a = to_json(&build_report(&first), false).unwrap();
    let again = parse_profiles(SAMPLE_INPUT).unwrap();
    let json_b = to_json(&build_report(&matcher.rank(&again.profiles, 6).unwrap()), false).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_integration_three_profiles_k1() {
    let profiles = vec![
        create_test_profile(10, &[1, 2, 3], &[1, 2, 3]),
        create_test_profile(20, &[1, 2, 3], &[1]),
        create_test_profile(30, &[3, 3, 3], &[3]),
    ];

    let matcher = Matcher::default();
    let all = matcher.score_all(&profiles).unwrap();
    let selected = matcher.rank(&profiles, 1).unwrap();

    assert_eq!(selected.len(), 1);
    let (min_key, min_score) = all
        .iter()
        .min_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, s)| (*k, *s))
        .unwrap();
    assert_eq!(selected[0].key, min_key);
    assert_eq!(selected[0].score, min_score);
}

#[test]
fn test_integration_result_size_invariant() {
    let profiles: Vec<Profile> = (1..=6)
        .map(|id| create_test_profile(id, &[id % 3, id % 2, 1], &[0, 1]))
        .collect();
    let pair_count = 6 * 5 / 2;

    let matcher = Matcher::default();
    for k in [0, 1, 7, pair_count] {
        assert_eq!(matcher.rank(&profiles, k).unwrap().len(), k);
    }

    assert_eq!(
        matcher.rank(&profiles, pair_count + 1),
        Err(MatchError::SelectionUnderflow {
            requested: pair_count + 1,
            available: pair_count
        })
    );
}

#[test]
fn test_integration_highest_order_reverses_ranking() {
    let profiles: Vec<Profile> = (1..=5)
        .map(|id| create_test_profile(id, &[id % 3, id % 2, 1], &[0, 1]))
        .collect();

    let highest = Matcher::new(MatcherOptions {
        order: SelectionOrder::Highest,
        ..MatcherOptions::default()
    })
    .rank(&profiles, 10)
    .unwrap();
    let mut lowest = Matcher::default().rank(&profiles, 10).unwrap();

    let highest_scores: Vec<f64> = highest.iter().map(|p| p.score).collect();
    lowest.reverse();
    let lowest_scores: Vec<f64> = lowest.iter().map(|p| p.score).collect();
    assert_eq!(highest_scores, lowest_scores);
}

#[test]
fn test_integration_profile_without_valid_answers_aborts() {
    let input = r#"{"profiles": [
        {"id": 1, "answers": [{"questionId": 1, "answer": 1, "acceptableAnswers": [1], "importance": 9}]},
        {"id": 2, "answers": [{"questionId": 1, "answer": 1, "acceptableAnswers": [1], "importance": 3}]}
    ]}"#;

    let loaded = parse_profiles(input).unwrap();
    assert_eq!(loaded.issues.len(), 1);
    assert_eq!(loaded.profiles[0].answered_count(), 0);

    let result = Matcher::default().rank(&loaded.profiles, 1);
    assert!(matches!(result, Err(MatchError::Score(_))));
}
