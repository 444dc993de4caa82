// src/sink/mod.rs

use arrow::record_batch::RecordBatch;
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};

use crate::error::Result;

pub mod local;
pub mod s3;

pub use local::LocalSink;
pub use s3::S3Sink;

/// Terminal stage: persists the flat table somewhere durable.
#[allow(async_fn_in_trait)]
pub trait TableSink {
    /// Human-readable location, for logs.
    fn destination(&self) -> String;

    /// Write the whole table, replacing whatever was there. Returns bytes written.
    async fn write(&self, batch: &RecordBatch) -> Result<usize>;
}

/// Serialize one batch as a complete Parquet file in memory.
pub fn encode_parquet(batch: &RecordBatch) -> Result<Vec<u8>> {
    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .set_dictionary_enabled(true)
        .build();

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(buf)
}
