use praxis_instruments::instruments::gad7::Gad7;
use praxis_instruments::instruments::phq9::Phq9;
use praxis_instruments::scoring::{ItemResponses, Severity};
use praxis_instruments::{Instrument, assess, get_instrument};
use serde_json::json;

fn responses(value: serde_json::Value) -> ItemResponses {
    serde_json::from_value(value).unwrap()
}

#[test]
fn phq9_scenario_scores_moderate() {
    let result = Phq9.assess(responses(json!([3, 2, 1, 0, 2, 1, 0, 1, 2])));
    assert_eq!(result.score, 12);
    assert_eq!(result.severity, Severity::Moderate);
}

#[test]
fn gad7_all_zero_is_minimal() {
    let result = Gad7.assess(responses(json!([0, 0, 0, 0, 0, 0, 0])));
    assert_eq!(result.score, 0);
    assert_eq!(result.severity, Severity::Minimal);
}

#[test]
fn score_is_sum_of_items() {
    let items = [1u8, 3, 0, 2, 2, 3, 1, 0, 3];
    let result = Phq9.assess(ItemResponses::new(items.to_vec()));
    let expected: u32 = items.iter().map(|v| u32::from(*v)).sum();
    assert_eq!(result.score, expected);
    assert_eq!(result.responses.as_slice(), &items);
}

#[test]
fn phq9_bands_partition_the_full_range() {
    let expected = [
        (0..=4, Severity::Minimal),
        (5..=9, Severity::Mild),
        (10..=14, Severity::Moderate),
        (15..=19, Severity::ModeratelySevere),
        (20..=27, Severity::Severe),
    ];
    for (range, severity) in expected {
        for score in range {
            assert_eq!(Phq9.severity(score), severity, "score {score}");
        }
    }
}

#[test]
fn gad7_bands_partition_the_full_range() {
    let expected = [
        (0..=4, Severity::Minimal),
        (5..=9, Severity::Mild),
        (10..=14, Severity::Moderate),
        (15..=21, Severity::Severe),
    ];
    for (range, severity) in expected {
        for score in range {
            assert_eq!(Gad7.severity(score), severity, "score {score}");
        }
    }
}

#[test]
fn severity_is_monotonic_in_score() {
    for instrument in praxis_instruments::all_instruments() {
        let mut previous = instrument.severity(0);
        for score in 1..=instrument.max_score() {
            let current = instrument.severity(score);
            assert!(current >= previous, "{} dropped at {score}", instrument.name());
            previous = current;
        }
    }
}

#[test]
fn bands_have_no_gaps_or_overlaps() {
    for instrument in praxis_instruments::all_instruments() {
        let bands = instrument.bands();
        assert_eq!(bands.first().unwrap().min, 0);
        assert_eq!(bands.last().unwrap().max, instrument.max_score());
        for pair in bands.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min, "{}", instrument.name());
        }
    }
}

#[test]
fn exact_boundary_five_is_mild() {
    assert_eq!(Phq9.severity(5), Severity::Mild);
    assert_eq!(Gad7.severity(5), Severity::Mild);
    assert_eq!(Phq9.severity(4), Severity::Minimal);
}

#[test]
fn non_array_responses_score_zero() {
    for value in [json!(null), json!("3,2,1"), json!({"a": 1}), json!(7)] {
        let result = Phq9.assess(responses(value));
        assert!(result.responses.is_empty());
        assert_eq!(result.score, 0);
    }
}

#[test]
fn invalid_entries_are_excluded() {
    let result = Gad7.assess(responses(json!([3, "x", null, 2.0, 7, -1, 1.5, 1])));
    assert_eq!(result.responses.as_slice(), &[3, 2, 1]);
    assert_eq!(result.score, 6);
}

#[test]
fn extra_items_are_trimmed_to_instrument_length() {
    let result = Gad7.assess(responses(json!([3, 3, 3, 3, 3, 3, 3, 3, 3])));
    assert_eq!(result.responses.len(), 7);
    assert_eq!(result.score, 21);
    assert_eq!(result.severity, Severity::Severe);
}

#[test]
fn severity_serializes_as_display_label() {
    assert_eq!(
        serde_json::to_value(Severity::ModeratelySevere).unwrap(),
        json!("Moderately Severe")
    );
    assert_eq!(Severity::Mild.to_string(), "Mild");
}

#[test]
fn lookup_by_id() {
    assert_eq!(get_instrument("phq9").unwrap().item_count(), 9);
    assert_eq!(get_instrument("gad7").unwrap().item_count(), 7);
    assert!(get_instrument("basc3").is_none());
    assert!(assess("nope", ItemResponses::default()).is_err());
}
