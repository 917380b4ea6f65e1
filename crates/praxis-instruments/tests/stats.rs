use praxis_instruments::instruments::phq9::Phq9;
use praxis_instruments::scoring::Severity;
use praxis_instruments::stats::{average_score, frequency, severity_distribution};

#[test]
fn average_of_nothing_is_zero() {
    assert_eq!(average_score(Vec::<u32>::new()), 0);
}

#[test]
fn average_rounds_to_nearest() {
    assert_eq!(average_score([10, 11]), 11);
    assert_eq!(average_score([10, 10, 11]), 10);
    assert_eq!(average_score([4, 5, 6]), 5);
}

#[test]
fn frequency_orders_by_count_then_first_seen() {
    let codes = ["90837", "90834", "90791", "90834", "90837", "90837", "90791"];
    let counts = frequency(codes);
    let flat: Vec<(&str, usize)> = counts.iter().map(|f| (f.value.as_str(), f.count)).collect();
    assert_eq!(flat, vec![("90837", 3), ("90834", 2), ("90791", 2)]);
}

#[test]
fn frequency_ignores_blank_values() {
    let counts = frequency(["F41.1", "", "  ", "F41.1"]);
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 2);
}

#[test]
fn distribution_includes_empty_bands() {
    let dist = severity_distribution(&Phq9, [0, 3, 12, 27]);
    let counts: Vec<(Severity, usize)> = dist.iter().map(|b| (b.severity, b.count)).collect();
    assert_eq!(
        counts,
        vec![
            (Severity::Minimal, 2),
            (Severity::Mild, 0),
            (Severity::Moderate, 1),
            (Severity::ModeratelySevere, 0),
            (Severity::Severe, 1),
        ]
    );
}
