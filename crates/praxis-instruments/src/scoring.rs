use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Highest rating a single questionnaire item accepts.
pub const MAX_ITEM_VALUE: u8 = 3;

/// Named classification of an instrument total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    #[serde(rename = "Moderately Severe")]
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately Severe",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An inclusive score range mapped to a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SeverityBand {
    pub min: u32,
    pub max: u32,
    pub severity: Severity,
}

impl SeverityBand {
    pub const fn new(min: u32, max: u32, severity: Severity) -> Self {
        Self { min, max, severity }
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// Ordered item ratings for one questionnaire.
///
/// Deserialization never fails: a missing, null, or non-array value is an
/// empty list, and entries that are not whole numbers in
/// `0..=MAX_ITEM_VALUE` are dropped. The stored list is therefore always
/// exactly what the score is summed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ItemResponses(Vec<u8>);

impl ItemResponses {
    pub fn new(items: Vec<u8>) -> Self {
        Self(items.into_iter().filter(|v| *v <= MAX_ITEM_VALUE).collect())
    }

    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                tracing::warn!("questionnaire responses are not a list; scoring as empty");
            }
            return Self::default();
        };

        let items: Vec<u8> = entries.iter().filter_map(item_value).collect();
        if items.len() != entries.len() {
            tracing::warn!(
                dropped = entries.len() - items.len(),
                "dropped invalid questionnaire item responses"
            );
        }
        Self(items)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|v| u32::from(*v)).sum()
    }
}

fn item_value(value: &serde_json::Value) -> Option<u8> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64()?;
            if f < 0.0 || f.fract() != 0.0 {
                return None;
            }
            f as u64
        }
    };
    u8::try_from(n).ok().filter(|v| *v <= MAX_ITEM_VALUE)
}

impl<'de> Deserialize<'de> for ItemResponses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
