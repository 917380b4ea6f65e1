use axum::body::Bytes;
use axum::extract::Path;
use axum::Json;
use serde::{Deserialize, Serialize};

use praxis_core::draft::{self, Draft};
use praxis_instruments::scoring::{ItemResponses, SeverityBand};
use praxis_instruments::{Assessment, Instrument, all_instruments, get_instrument};

use crate::error::ApiError;
use crate::extract::json_body;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSummary {
    id: String,
    name: String,
    item_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDetail {
    id: String,
    name: String,
    item_count: usize,
    max_score: u32,
    bands: Vec<SeverityBand>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRequest {
    #[serde(default)]
    items: ItemResponses,
}

impl Draft for ScoreRequest {}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            item_count: i.item_count(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = lookup(&id)?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        item_count: instrument.item_count(),
        max_score: instrument.max_score(),
        bands: instrument.bands().to_vec(),
    }))
}

/// Score item responses without storing anything, for live preview.
pub async fn score_items(
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Assessment>, ApiError> {
    let request: ScoreRequest = draft::parse(json_body(&body)?)?;
    Ok(Json(praxis_instruments::assess(&id, request.items)?))
}

fn lookup(id: &str) -> Result<Box<dyn Instrument>, ApiError> {
    get_instrument(id).ok_or_else(|| ApiError::NotFound(format!("instrument not found: {id}")))
}
