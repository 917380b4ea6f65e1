use crate::Instrument;
use crate::scoring::{Severity, SeverityBand};

/// GAD-7: Generalized Anxiety Disorder scale, seven items.
/// Each item is rated 0–3; total range 0–21.
pub struct Gad7;

const BANDS: [SeverityBand; 4] = [
    SeverityBand::new(0, 4, Severity::Minimal),
    SeverityBand::new(5, 9, Severity::Mild),
    SeverityBand::new(10, 14, Severity::Moderate),
    SeverityBand::new(15, 21, Severity::Severe),
];

impl Instrument for Gad7 {
    fn id(&self) -> &str {
        "gad7"
    }

    fn name(&self) -> &str {
        "GAD-7"
    }

    fn item_count(&self) -> usize {
        7
    }

    fn bands(&self) -> &[SeverityBand] {
        &BANDS
    }
}
