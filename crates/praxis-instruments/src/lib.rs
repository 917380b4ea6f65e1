//! praxis-instruments
//!
//! Standardized questionnaire definitions and the scoring rules around them.
//! Pure data and arithmetic, no I/O. Defines PHQ-9 and GAD-7, their severity
//! bands, the risk flag derived from the ideation fields, and the aggregate
//! statistics used by the dashboard.

pub mod error;
pub mod instruments;
pub mod risk;
pub mod scoring;
pub mod stats;

use serde::Serialize;
use ts_rs::TS;

use error::InstrumentError;
use scoring::{ItemResponses, Severity, SeverityBand};

/// Trait implemented by each standardized questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9", "gad7").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    /// Number of items the questionnaire asks.
    fn item_count(&self) -> usize;

    /// Severity bands in ascending order. Together they cover `0..=max_score()`.
    fn bands(&self) -> &[SeverityBand];

    fn max_score(&self) -> u32 {
        self.item_count() as u32 * u32::from(scoring::MAX_ITEM_VALUE)
    }

    /// Trim responses to this instrument's item count.
    fn normalize(&self, mut responses: ItemResponses) -> ItemResponses {
        let count = self.item_count();
        if responses.len() > count {
            tracing::warn!(
                instrument = self.id(),
                received = responses.len(),
                expected = count,
                "discarding item responses beyond instrument length"
            );
            responses.truncate(count);
        }
        responses
    }

    /// Total score: the arithmetic sum of the item responses.
    fn score(&self, responses: &ItemResponses) -> u32 {
        responses.sum()
    }

    /// Classify a total score. Scores past the top band saturate into it.
    fn severity(&self, score: u32) -> Severity {
        let bands = self.bands();
        bands
            .iter()
            .find(|band| band.contains(score))
            .or_else(|| bands.last())
            .map(|band| band.severity)
            .unwrap_or(Severity::Minimal)
    }

    /// Normalize, score, and classify in one step.
    fn assess(&self, responses: ItemResponses) -> Assessment {
        let responses = self.normalize(responses);
        let score = self.score(&responses);
        Assessment {
            instrument_id: self.id().to_string(),
            severity: self.severity(score),
            score,
            responses,
        }
    }
}

/// The outcome of scoring one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub instrument_id: String,
    pub responses: ItemResponses,
    pub score: u32,
    pub severity: Severity,
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Score raw responses against the instrument with the given ID.
pub fn assess(id: &str, responses: ItemResponses) -> Result<Assessment, InstrumentError> {
    let instrument =
        get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))?;
    Ok(instrument.assess(responses))
}
