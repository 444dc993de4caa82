//! Error type shared by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Error, Debug)]
pub enum EtlError {
    /// Query descriptor missing or unreadable.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local input is not valid structured data.
    #[error("parse error: {0}")]
    Parse(String),

    /// Transport-level failure talking to the statistics API.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("remote error: HTTP {status} from {url}: {body}")]
    Remote {
        url: String,
        status: u16,
        body: String,
    },

    /// API answered 2xx but the body is not the expected document.
    #[error("unexpected response shape from {url}: {source}")]
    RemoteShape {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Raw result rows do not line up with the column descriptors.
    #[error("data shape error: {0}")]
    DataShape(String),

    /// A year or population field is not in the expected form.
    #[error("invalid {column} value {value:?} in row {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        row: usize,
    },

    /// Metadata did not carry the variable needed to label a column.
    #[error("no label mapping for {0}; metadata response lacks that variable")]
    MissingMapping(&'static str),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Object-storage or local sink write failed.
    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_column_and_row() {
        let err = EtlError::InvalidValue {
            column: "Population",
            value: "..".to_string(),
            row: 7,
        };
        assert_eq!(err.to_string(), r#"invalid Population value ".." in row 7"#);
    }

    #[test]
    fn file_access_keeps_io_source() {
        let err = EtlError::FileAccess {
            path: PathBuf::from("api.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("cannot read api.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
