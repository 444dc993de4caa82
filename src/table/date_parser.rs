use chrono::{Datelike, NaiveDate};

/// Days from 0001-01-01 (CE) to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// `"YYYY"` → January 1st of that year. Anything but four ASCII digits is `None`.
pub fn parse_year(s: &str) -> Option<NaiveDate> {
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// `"YYYY"` → days since the epoch, ready for a `Date32` column.
pub fn parse_year_days(s: &str) -> Option<i32> {
    parse_year(s).map(|d| d.num_days_from_ce() - EPOCH_DAYS_FROM_CE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_maps_to_new_years_day() {
        assert_eq!(parse_year("2020"), NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(parse_year("1968"), NaiveDate::from_ymd_opt(1968, 1, 1));
    }

    #[test]
    fn formatting_back_reproduces_input() {
        for y in ["0001", "1900", "1968", "2000", "2024", "9999"] {
            let d = parse_year(y).unwrap();
            assert_eq!(d.format("%Y").to_string(), y);
        }
    }

    #[test]
    fn epoch_days() {
        assert_eq!(parse_year_days("1970"), Some(0));
        assert_eq!(parse_year_days("1971"), Some(365));
        assert_eq!(parse_year_days("1969"), Some(-365));
    }

    #[test]
    fn rejects_non_years() {
        for bad in ["", "20", "20200", "2020M01", "-202", "+202", " 2020", "abcd", ".."] {
            assert_eq!(parse_year(bad), None, "{bad:?}");
        }
    }
}
