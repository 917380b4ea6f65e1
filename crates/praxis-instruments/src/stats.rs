//! Aggregate statistics over collections of scored notes.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::Instrument;
use crate::scoring::Severity;

/// Mean of the given scores rounded to the nearest integer. Empty input is 0.
pub fn average_score<I>(scores: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// How often a value occurs in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Frequency {
    pub value: String,
    pub count: usize,
}

/// Count occurrences, most frequent first. Ties keep first-seen order.
/// Blank values are ignored.
pub fn frequency<'a, I>(values: I) -> Vec<Frequency>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<Frequency> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(Frequency {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in insertion order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Number of scores falling in one severity band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BandCount {
    pub severity: Severity,
    pub count: usize,
}

/// Count scores per severity band, in band order, including empty bands.
pub fn severity_distribution<I>(instrument: &dyn Instrument, scores: I) -> Vec<BandCount>
where
    I: IntoIterator<Item = u32>,
{
    let mut distribution: Vec<BandCount> = instrument
        .bands()
        .iter()
        .map(|band| BandCount {
            severity: band.severity,
            count: 0,
        })
        .collect();

    for score in scores {
        let severity = instrument.severity(score);
        if let Some(entry) = distribution.iter_mut().find(|b| b.severity == severity) {
            entry.count += 1;
        }
    }
    distribution
}
