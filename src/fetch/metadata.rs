// src/fetch/metadata.rs

use reqwest::Client;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use super::{decode_response, TableMetadata, Variable};
use crate::error::Result;

pub const REGION_CODE: &str = "Region";
pub const CIVIL_STATUS_CODE: &str = "Civilstand";

/// Code → display text for one coded dimension.
pub type LabelMap = HashMap<String, String>;

/// Label lookups for the two coded dimensions resolved from metadata.
///
/// A field stays `None` when the metadata has no variable with that code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mappings {
    pub regions: Option<LabelMap>,
    pub civil_status: Option<LabelMap>,
}

impl Mappings {
    pub fn from_metadata(meta: &TableMetadata) -> Self {
        let mut out = Mappings::default();
        for var in &meta.variables {
            match var.code.as_str() {
                REGION_CODE => out.regions = Some(zip_labels(var)),
                CIVIL_STATUS_CODE => out.civil_status = Some(zip_labels(var)),
                _ => {}
            }
        }
        out
    }
}

/// Pair each raw value code with its display text, positionally.
fn zip_labels(var: &Variable) -> LabelMap {
    if var.values.len() != var.value_texts.len() {
        warn!(
            code = %var.code,
            values = var.values.len(),
            texts = var.value_texts.len(),
            "values/valueTexts length mismatch; extra entries dropped"
        );
    }
    var.values
        .iter()
        .cloned()
        .zip(var.value_texts.iter().cloned())
        .collect()
}

/// GET the table metadata and pull out the region and civil-status labels.
#[instrument(level = "info", skip(client))]
pub async fn fetch_mappings(client: &Client, url: &str) -> Result<Mappings> {
    let resp = client.get(url).send().await?;
    let meta: TableMetadata = decode_response(resp).await?;
    let mappings = Mappings::from_metadata(&meta);

    info!(
        variables = meta.variables.len(),
        regions = ?mappings.regions.as_ref().map(|m| m.len()),
        civil_status = ?mappings.civil_status.as_ref().map(|m| m.len()),
        "fetched label mappings"
    );
    if mappings.regions.is_none() || mappings.civil_status.is_none() {
        warn!("metadata lacks Region and/or Civilstand variables");
    }
    Ok(mappings)
}
