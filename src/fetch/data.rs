// src/fetch/data.rs

use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, instrument};

use super::{decode_response, RawResult};
use crate::error::Result;

/// POST the query descriptor to the table URL and decode the result.
#[instrument(level = "info", skip(client, query))]
pub async fn fetch_data(client: &Client, url: &str, query: &Value) -> Result<RawResult> {
    let start = Instant::now();
    let resp = client.post(url).json(query).send().await?;
    let raw: RawResult = decode_response(resp).await?;
    info!(
        columns = raw.columns.len(),
        rows = raw.data.len(),
        elapsed = ?start.elapsed(),
        "fetched data"
    );
    Ok(raw)
}
