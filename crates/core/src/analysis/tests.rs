use super::*;
use serde_json::json;

#[test]
fn non_object_payloads_normalize_to_defaults() {
    for payload in [json!(null), json!("garbage"), json!(42), json!([1, 2, 3])] {
        assert_eq!(Analysis::from_raw(&payload), Analysis::default());
    }
}

#[test]
fn empty_object_normalizes_to_defaults() {
    let analysis = Analysis::from_raw(&json!({}));
    assert_eq!(analysis, Analysis::default());
    assert_eq!(analysis.executive_summary.overall_health_status, "unknown");
    assert_eq!(analysis.classification.risk_level, "unknown");
    assert_eq!(analysis.author.identity, "unknown");
    assert!(analysis.reviewers.is_empty());
    assert!(analysis.badges.is_empty());
    assert!(analysis.technical_debt.is_none());
}

#[test]
fn nested_paths_win_over_flat_paths() {
    let analysis = Analysis::from_raw(&json!({
        "executive_summary": {"business_value_clarity": 90, "overall_health_status": "healthy"},
        "business_value_clarity": 10,
        "health_status": "critical",
    }));

    assert_eq!(analysis.executive_summary.business_value_clarity, 90);
    assert_eq!(analysis.executive_summary.overall_health_status, "healthy");
}

#[test]
fn flat_paths_fill_in_when_nested_sections_are_missing() {
    let analysis = Analysis::from_raw(&json!({
        "business_value_clarity": 55,
        "solid_compliance_score": 40,
        "risk_level": "high",
        "is_blocking": true,
        "recurring_mistakes": ["missing tests"],
    }));

    assert_eq!(analysis.executive_summary.business_value_clarity, 55);
    assert_eq!(analysis.author.quality_metrics.solid_compliance, 40);
    assert_eq!(analysis.classification.risk_level, "high");
    assert!(analysis.is_blocking());
    assert_eq!(analysis.recurring_mistakes(), ["missing tests"]);
}

#[test]
fn null_nested_leaf_falls_through_to_flat_path() {
    let analysis = Analysis::from_raw(&json!({
        "classification": {"risk_level": null},
        "risk_level": "medium",
    }));

    assert_eq!(analysis.classification.risk_level, "medium");
}

#[test]
fn numeric_coercion_is_permissive() {
    let analysis = Analysis::from_raw(&json!({
        "business_value_clarity": "85",
        "solid_compliance_score": 72.9,
    }));

    assert_eq!(analysis.executive_summary.business_value_clarity, 85);
    assert_eq!(analysis.author.quality_metrics.solid_compliance, 72);
}

#[test]
fn non_coercible_values_fall_back_to_defaults() {
    let analysis = Analysis::from_raw(&json!({
        "business_value_clarity": {"oops": true},
        "health_status": 17,
        "is_blocking": "maybe",
    }));

    assert_eq!(analysis.executive_summary.business_value_clarity, 0);
    assert_eq!(analysis.executive_summary.overall_health_status, "unknown");
    assert!(!analysis.is_blocking());
}

#[test]
fn malformed_reviewer_elements_are_skipped() {
    let analysis = Analysis::from_raw(&json!({
        "reviewers_analytics": [
            {"reviewer_login": "alice", "behavioral_metrics": {"tone_score": 80}},
            "not an object",
            17,
            {"reviewer": "bob", "tone_score": 6},
        ]
    }));

    assert_eq!(analysis.reviewers.len(), 2);
    assert_eq!(analysis.reviewers[0].login, "alice");
    assert_eq!(analysis.reviewers[1].login, "bob");
}

#[test]
fn reviewer_tone_is_rescaled_to_the_canonical_scale() {
    let analysis = Analysis::from_raw(&json!({
        "reviewers_analytics": [
            {"behavioral_metrics": {"tone_score": 80}},
            {"tone_score": 8},
            {"reviewer_login": "silent"},
        ]
    }));

    assert_eq!(analysis.reviewers[0].behavioral.tone_score, Some(8.0));
    assert_eq!(analysis.reviewers[1].behavioral.tone_score, Some(8.0));
    assert_eq!(analysis.reviewers[2].behavioral.tone_score, None);
}

#[test]
fn reviewer_login_fallback_chain() {
    let analysis = Analysis::from_raw(&json!({
        "reviewers_analytics": [
            {"reviewer_login": "a"},
            {"reviewer_name": "b"},
            {"reviewer": "c"},
            {"name": "d"},
            {"tone_score": 5},
        ]
    }));

    let logins: Vec<&str> = analysis
        .reviewers
        .iter()
        .map(|reviewer| reviewer.login.as_str())
        .collect();
    assert_eq!(logins, ["a", "b", "c", "d", "unknown"]);
}

#[test]
fn recurring_mistakes_accept_strings_and_objects() {
    let analysis = Analysis::from_raw(&json!({
        "recurring_mistakes": [
            "missing tests",
            {"description": "poor naming"},
            {"message": "no docs"},
            {"unrelated": true},
            7,
        ]
    }));

    assert_eq!(
        analysis.recurring_mistakes(),
        ["missing tests", "poor naming", "no docs"]
    );
}

#[test]
fn badges_normalize_with_legacy_reason_key() {
    let analysis = Analysis::from_raw(&json!({
        "gamification_badges": [
            {"badge_name": "Clean Coder", "recipient": "alice", "type": "positive", "reason_fa": "tidy"},
            "bogus",
            {},
        ]
    }));

    assert_eq!(analysis.badges.len(), 2);
    assert_eq!(analysis.badges[0].badge_name, "Clean Coder");
    assert_eq!(analysis.badges[0].kind, "positive");
    assert_eq!(analysis.badges[0].reason, "tidy");
    assert_eq!(analysis.badges[1].badge_name, "unknown");
    assert_eq!(analysis.badges[1].kind, "neutral");
}

#[test]
fn technical_debt_section_is_optional() {
    assert!(Analysis::from_raw(&json!({})).technical_debt.is_none());

    let nested = Analysis::from_raw(&json!({
        "technical_debt_analysis": {
            "added_debt_level": "high",
            "over_engineering_detected": true,
            "suggestions_for_refactor": ["split the service"],
        }
    }));
    let debt = nested.technical_debt.as_ref().expect("nested section must materialize");
    assert_eq!(debt.added_debt_level, "high");
    assert!(nested.is_over_engineered());

    let flat = Analysis::from_raw(&json!({"over_engineering": true}));
    assert!(flat.is_over_engineered());
}

#[test]
fn management_section_reads_both_generations() {
    let analysis = Analysis::from_raw(&json!({
        "management_decision_assist": {
            "final_verdict_fa": "solid work",
            "performance_review_topic": "code review tone",
            "hr_flag": true,
        }
    }));

    assert_eq!(analysis.management.final_verdict, "solid work");
    assert_eq!(analysis.management.performance_review_topic, "code review tone");
    assert!(analysis.requires_hr_attention());
}

#[test]
fn author_velocity_and_educational_path_are_optional() {
    let bare = Analysis::from_raw(&json!({"author_analytics": {"identity": "alice"}}));
    assert_eq!(bare.author.identity, "alice");
    assert!(bare.author.velocity_metrics.is_none());
    assert!(bare.author.educational_path.is_empty());

    let full = Analysis::from_raw(&json!({
        "author_analytics": {
            "identity": "alice",
            "velocity_metrics": {"avg_response_time_hours": 3.5, "rework_cycles": 2},
            "educational_path": [
                {"topic": "SOLID", "reason": "recurring violations", "link": "https://example.com"},
                "malformed entry",
            ],
        }
    }));

    let velocity = full.author.velocity_metrics.as_ref().expect("velocity must materialize");
    assert_eq!(velocity.avg_response_time_hours, Some(3.5));
    assert_eq!(velocity.rework_cycles, Some(2));
    assert_eq!(full.educational_path().len(), 1);
    assert_eq!(full.educational_path()[0].topic, "SOLID");
}

#[test]
fn normalized_serialization_round_trips_through_from_raw() {
    let original = Analysis::from_raw(&json!({
        "meta_data": {"model_version": "v7"},
        "executive_summary": {"title_summary": "adds caching", "business_value_clarity": 77, "overall_health_status": "healthy"},
        "classification": {"change_type": "feature", "risk_level": "low", "is_blocking": false},
        "author_analytics": {
            "identity": "alice",
            "quality_metrics": {"solid_compliance": 81, "bug_potential": "low"},
            "trend_analysis": {"improvement_status": "improved", "recurring_mistakes": ["missing tests"]},
        },
        "reviewers_analytics": [
            {"reviewer_login": "bob", "behavioral_metrics": {"tone_score": 80, "mentorship_score": 60},
             "category_breakdown": {"code_style": 3, "security": 1}},
        ],
        "gamification_badges": [{"badge_name": "Mentor", "recipient": "bob", "type": "positive", "reason": "mentoring"}],
        "technical_debt_analysis": {"added_debt_level": "low", "over_engineering_detected": false},
        "management_decision_assist": {"final_verdict": "keep it up", "hr_flag": false},
    }));

    let serialized = serde_json::to_value(&original).expect("analysis must serialize");
    let reparsed = Analysis::from_raw(&serialized);
    assert_eq!(reparsed, original);
}
