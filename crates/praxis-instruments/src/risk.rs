use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Reported level of suicidal or homicidal ideation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    #[default]
    Denied,
    Passive,
    Active,
}

/// A note is risk flagged when either ideation field is anything but `Denied`.
pub fn risk_flagged(suicidal: RiskLevel, homicidal: RiskLevel) -> bool {
    suicidal != RiskLevel::Denied || homicidal != RiskLevel::Denied
}
