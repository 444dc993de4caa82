// src/table/schema.rs

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::sync::Arc;

pub const SEX_COLUMN: &str = "Kon";
pub const REGION_COLUMN: &str = "Region";
pub const CIVIL_STATUS_COLUMN: &str = "Civilstand";
pub const TIME_COLUMN: &str = "Tid";
pub const POPULATION_COLUMN: &str = "Population";

/// Output column order.
pub const FLAT_COLUMNS: [&str; 5] = [
    SEX_COLUMN,
    REGION_COLUMN,
    CIVIL_STATUS_COLUMN,
    TIME_COLUMN,
    POPULATION_COLUMN,
];

/// Arrow schema of the flat table:
/// - Kon, Region, Civilstand → Utf8 labels
/// - Tid                     → Date32 (January 1st)
/// - Population              → Int64
pub fn flat_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SEX_COLUMN, DataType::Utf8, false),
        Field::new(REGION_COLUMN, DataType::Utf8, false),
        Field::new(CIVIL_STATUS_COLUMN, DataType::Utf8, false),
        Field::new(TIME_COLUMN, DataType::Date32, false),
        Field::new(POPULATION_COLUMN, DataType::Int64, false),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_field_order_matches_flat_columns() {
        let schema = flat_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, FLAT_COLUMNS);
    }
}
