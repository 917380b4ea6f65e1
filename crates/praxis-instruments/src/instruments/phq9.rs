use crate::Instrument;
use crate::scoring::{Severity, SeverityBand};

/// PHQ-9: Patient Health Questionnaire, nine depression items.
/// Each item is rated 0–3; total range 0–27.
pub struct Phq9;

const BANDS: [SeverityBand; 5] = [
    SeverityBand::new(0, 4, Severity::Minimal),
    SeverityBand::new(5, 9, Severity::Mild),
    SeverityBand::new(10, 14, Severity::Moderate),
    SeverityBand::new(15, 19, Severity::ModeratelySevere),
    SeverityBand::new(20, 27, Severity::Severe),
];

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn item_count(&self) -> usize {
        9
    }

    fn bands(&self) -> &[SeverityBand] {
        &BANDS
    }
}
