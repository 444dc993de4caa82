// src/query.rs

use serde_json::{Map, Value};
use std::{fs, path::Path};
use tracing::{debug, instrument};

use crate::error::{EtlError, Result};

/// Response format the table builder understands.
pub const RESPONSE_FORMAT: &str = "json";

/// Read the PX-Web query descriptor and force `response.format` to JSON.
///
/// The override lives only in memory; the file on disk is left untouched.
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| EtlError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut query: Value = serde_json::from_str(&text)
        .map_err(|e| EtlError::Parse(format!("{}: {}", path.display(), e)))?;
    force_json_response(&mut query)?;
    debug!("query descriptor loaded");
    Ok(query)
}

/// Set `response.format`, creating the `response` object when absent.
pub fn force_json_response(query: &mut Value) -> Result<()> {
    let root = query
        .as_object_mut()
        .ok_or_else(|| EtlError::Parse("query descriptor must be a JSON object".into()))?;
    let response = root
        .entry("response")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| EtlError::Parse("`response` must be a JSON object".into()))?;
    response.insert("format".into(), Value::String(RESPONSE_FORMAT.into()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_tmp(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn overrides_format_and_keeps_selection() {
        let f = write_tmp(
            r#"{"query":[{"code":"Tid","selection":{"filter":"item","values":["2020"]}}],
                "response":{"format":"px"}}"#,
        );
        let q = load_query(f.path()).unwrap();
        assert_eq!(q["response"]["format"], "json");
        assert_eq!(q["query"][0]["code"], "Tid");

        // on-disk copy is not rewritten
        let on_disk = fs::read_to_string(f.path()).unwrap();
        assert!(on_disk.contains(r#""format":"px""#));
    }

    #[test]
    fn creates_missing_response_block() {
        let mut q = json!({"query": []});
        force_json_response(&mut q).unwrap();
        assert_eq!(q, json!({"query": [], "response": {"format": "json"}}));
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let err = load_query("/definitely/not/here/api.json").unwrap_err();
        assert!(matches!(err, EtlError::FileAccess { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let f = write_tmp(r#"{"query": [ "#);
        assert!(matches!(load_query(f.path()), Err(EtlError::Parse(_))));
    }

    #[test]
    fn non_object_descriptors_are_rejected() {
        assert!(matches!(
            force_json_response(&mut json!([1, 2])),
            Err(EtlError::Parse(_))
        ));
        assert!(matches!(
            force_json_response(&mut json!({"response": "px"})),
            Err(EtlError::Parse(_))
        ));
    }
}
