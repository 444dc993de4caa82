// src/fetch/mod.rs

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::{EtlError, Result};

pub mod data;
pub mod metadata;
pub mod types;

pub use data::fetch_data;
pub use metadata::{fetch_mappings, LabelMap, Mappings};
pub use types::{ColumnInfo, DataRow, RawResult, TableMetadata, Variable};

/// Check the status, then decode the body as `T`.
///
/// Non-2xx answers become `Remote` with the body text kept for the log,
/// so an error page is never mistaken for data.
async fn decode_response<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let url = resp.url().to_string();
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        return Err(EtlError::Remote {
            url,
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    // PX-Web prefixes its JSON with a UTF-8 BOM
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
    serde_json::from_slice(body).map_err(|source| EtlError::RemoteShape { url, source })
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
