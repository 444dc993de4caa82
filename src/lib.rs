pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod query;
pub mod sink;
pub mod table;

pub use config::EtlConfig;
pub use error::{EtlError, Result};
pub use pipeline::{Pipeline, RunSummary};
