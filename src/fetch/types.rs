// src/fetch/types.rs

use serde::{Deserialize, Serialize};

/// One column descriptor from a PX-Web JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub code: String,
    #[serde(default)]
    pub text: Option<String>,
    /// `d` dimension, `t` time, `c` content (a measure carried in `values`).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ColumnInfo {
    /// Content columns describe `values`, not `key`.
    pub fn is_content(&self) -> bool {
        self.kind.as_deref() == Some("c")
    }
}

/// A single data row: coded dimension values plus measure strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    pub key: Vec<String>,
    pub values: Vec<String>,
}

/// Body returned by POSTing a query with `response.format = json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    pub columns: Vec<ColumnInfo>,
    pub data: Vec<DataRow>,
}

/// One variable from the table metadata (GET on the table URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub code: String,
    #[serde(default)]
    pub text: Option<String>,
    pub values: Vec<String>,
    pub value_texts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(default)]
    pub title: Option<String>,
    pub variables: Vec<Variable>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_px_web_data_response() {
        let body = r#"{
            "columns": [
                {"code": "Region", "text": "region", "type": "d"},
                {"code": "Tid", "text": "år", "type": "t"},
                {"code": "BE0101N1", "text": "Folkmängd", "type": "c"}
            ],
            "comments": [],
            "data": [{"key": ["0114", "2020"], "values": ["33000"]}],
            "metadata": [{"infofile": "BE0101", "updated": "2021-02-22T09:30:00Z"}]
        }"#;
        let raw: RawResult = serde_json::from_str(body).unwrap();
        assert_eq!(raw.columns.len(), 3);
        assert!(!raw.columns[0].is_content());
        assert!(raw.columns[2].is_content());
        assert_eq!(raw.data[0].key, vec!["0114", "2020"]);
    }

    #[test]
    fn columns_without_type_are_keys() {
        let raw: RawResult =
            serde_json::from_str(r#"{"columns":[{"code":"Kon"}],"data":[]}"#).unwrap();
        assert_eq!(raw.columns[0].kind, None);
        assert!(!raw.columns[0].is_content());
    }

    #[test]
    fn parses_metadata_variables() {
        let body = r#"{
            "title": "Folkmängden efter region",
            "variables": [{
                "code": "Civilstand", "text": "civilstånd",
                "values": ["OG", "G"], "valueTexts": ["ogifta", "gifta"],
                "elimination": true
            }]
        }"#;
        let meta: TableMetadata = serde_json::from_str(body).unwrap();
        assert_eq!(meta.variables[0].value_texts, vec!["ogifta", "gifta"]);
    }

    #[test]
    fn missing_data_field_is_an_error() {
        assert!(serde_json::from_str::<RawResult>(r#"{"columns":[]}"#).is_err());
        assert!(serde_json::from_str::<TableMetadata>(r#"{"title":"x"}"#).is_err());
    }
}
