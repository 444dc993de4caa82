use crate::fetch::LabelMap;

/// Fixed `Kon` labels; the API's own texts are Swedish.
pub fn sex_label(code: &str) -> &str {
    match code {
        "1" => "Man",
        "2" => "Woman",
        other => other,
    }
}

/// Mapped text for `code`, or `code` itself when the map has no entry.
pub fn relabel<'a>(map: &'a LabelMap, code: &'a str) -> &'a str {
    map.get(code).map(String::as_str).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_codes() {
        assert_eq!(sex_label("1"), "Man");
        assert_eq!(sex_label("2"), "Woman");
        assert_eq!(sex_label("1+2"), "1+2");
        assert_eq!(sex_label(""), "");
    }

    #[test]
    fn sex_label_is_idempotent_on_unknown() {
        for code in ["Man", "Woman", "3", "x"] {
            assert_eq!(sex_label(sex_label(code)), sex_label(code));
        }
    }

    #[test]
    fn relabel_is_pure_lookup() {
        let map: LabelMap = [("00", "Riket"), ("0114", "Upplands Väsby")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(relabel(&map, "0114"), "Upplands Väsby");
        assert_eq!(relabel(&map, "00"), "Riket");
        assert_eq!(relabel(&map, "9999"), "9999");
        assert_eq!(relabel(&LabelMap::new(), "00"), "00");
    }
}
