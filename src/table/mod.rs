// src/table/mod.rs
use arrow::{
    array::{
        Array, ArrayRef, Date32Array, Date32Builder, Int64Array, Int64Builder, StringArray,
        StringBuilder,
    },
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{EtlError, Result};
use crate::fetch::{
    metadata::{CIVIL_STATUS_CODE, REGION_CODE},
    Mappings, RawResult,
};

pub mod date_parser;
pub mod labels;
pub mod schema;

pub use schema::{
    flat_schema, CIVIL_STATUS_COLUMN, FLAT_COLUMNS, POPULATION_COLUMN, REGION_COLUMN, SEX_COLUMN,
    TIME_COLUMN,
};

/// One output row, for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    pub sex: String,
    pub region: String,
    pub civil_status: String,
    pub date: NaiveDate,
    pub population: i64,
}

/// Positions of the needed dimensions inside each row's `key` array.
#[derive(Debug, Clone, Copy)]
struct KeyLayout {
    width: usize,
    sex: usize,
    region: usize,
    civil_status: usize,
    time: usize,
}

impl KeyLayout {
    /// Key columns are the non-content descriptors, in response order.
    fn from_columns(raw: &RawResult) -> Result<Self> {
        let keys: Vec<&str> = raw
            .columns
            .iter()
            .filter(|c| !c.is_content())
            .map(|c| c.code.as_str())
            .collect();
        let find = |name: &str| {
            keys.iter().position(|k| *k == name).ok_or_else(|| {
                EtlError::DataShape(format!(
                    "column {:?} missing from response columns {:?}",
                    name, keys
                ))
            })
        };
        Ok(Self {
            width: keys.len(),
            sex: find(SEX_COLUMN)?,
            region: find(REGION_COLUMN)?,
            civil_status: find(CIVIL_STATUS_COLUMN)?,
            time: find(TIME_COLUMN)?,
        })
    }
}

/// Unpack the nested PX-Web rows into the five-column flat table.
///
/// Rows keep the API's order. Region and civil-status codes absent from
/// their mapping pass through unchanged; a mapping that was never
/// resolved is an error.
#[instrument(level = "info", skip_all, fields(rows = raw.data.len()))]
pub fn build_table(raw: &RawResult, mappings: &Mappings) -> Result<RecordBatch> {
    let regions = mappings
        .regions
        .as_ref()
        .ok_or(EtlError::MissingMapping(REGION_CODE))?;
    let civil_status = mappings
        .civil_status
        .as_ref()
        .ok_or(EtlError::MissingMapping(CIVIL_STATUS_CODE))?;
    let layout = KeyLayout::from_columns(raw)?;

    let n = raw.data.len();
    let mut sex_b = StringBuilder::with_capacity(n, n * 4);
    let mut region_b = StringBuilder::with_capacity(n, n * 16);
    let mut civil_b = StringBuilder::with_capacity(n, n * 8);
    let mut tid_b = Date32Builder::with_capacity(n);
    let mut pop_b = Int64Builder::with_capacity(n);

    for (i, row) in raw.data.iter().enumerate() {
        if row.key.len() != layout.width {
            return Err(EtlError::DataShape(format!(
                "row {} has {} key values but {} key columns are declared",
                i,
                row.key.len(),
                layout.width
            )));
        }
        let population = row.values.first().ok_or_else(|| {
            EtlError::DataShape(format!("row {} has an empty values array", i))
        })?;

        let year = &row.key[layout.time];
        let days = date_parser::parse_year_days(year).ok_or_else(|| EtlError::InvalidValue {
            column: TIME_COLUMN,
            value: year.clone(),
            row: i,
        })?;
        let count: i64 = population.parse().map_err(|_| EtlError::InvalidValue {
            column: POPULATION_COLUMN,
            value: population.clone(),
            row: i,
        })?;

        sex_b.append_value(labels::sex_label(&row.key[layout.sex]));
        region_b.append_value(labels::relabel(regions, &row.key[layout.region]));
        civil_b.append_value(labels::relabel(civil_status, &row.key[layout.civil_status]));
        tid_b.append_value(days);
        pop_b.append_value(count);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(sex_b.finish()),
        Arc::new(region_b.finish()),
        Arc::new(civil_b.finish()),
        Arc::new(tid_b.finish()),
        Arc::new(pop_b.finish()),
    ];
    let batch = RecordBatch::try_new(flat_schema(), columns)?;
    debug!(rows = batch.num_rows(), "built flat table");
    Ok(batch)
}

/// Read a flat-table batch back into rows.
pub fn rows(batch: &RecordBatch) -> Result<Vec<FlatRow>> {
    let sex = utf8_column(batch, 0)?;
    let region = utf8_column(batch, 1)?;
    let civil = utf8_column(batch, 2)?;
    let tid = batch
        .column(3)
        .as_any()
        .downcast_ref::<Date32Array>()
        .ok_or_else(|| EtlError::DataShape(format!("column {} is not Date32", TIME_COLUMN)))?;
    let pop = batch
        .column(4)
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| EtlError::DataShape(format!("column {} is not Int64", POPULATION_COLUMN)))?;

    (0..batch.num_rows())
        .map(|i| {
            let date = tid.value_as_date(i).ok_or_else(|| {
                EtlError::DataShape(format!("row {} has an out-of-range date", i))
            })?;
            Ok(FlatRow {
                sex: sex.value(i).to_string(),
                region: region.value(i).to_string(),
                civil_status: civil.value(i).to_string(),
                date,
                population: pop.value(i),
            })
        })
        .collect()
}

fn utf8_column(batch: &RecordBatch, idx: usize) -> Result<&StringArray> {
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| EtlError::DataShape(format!("column {} is not Utf8", FLAT_COLUMNS[idx])))
}
