//! Date parsing for invoice billing periods.

use chrono::NaiveDate;

use super::patterns::DATE_DMY;
use crate::error::ExtractionError;
use crate::invoice::Result;

/// Parse a `DD.MM.YYYY` invoice date into a calendar date.
pub fn parse_invoice_date(field: &'static str, raw: &str) -> Result<NaiveDate> {
    let caps = DATE_DMY.captures(raw).ok_or_else(|| ExtractionError::Parse {
        field,
        value: raw.to_string(),
    })?;

    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ExtractionError::Parse {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_dmy_reordered_to_iso() {
        let date = parse_invoice_date("start_date", "05.03.2024").unwrap();
        assert_eq!(date.to_string(), "2024-03-05");
    }

    #[test]
    fn test_single_digit_day_and_month() {
        let date = parse_invoice_date("start_date", "1.2.2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        assert!(parse_invoice_date("end_date", "31.02.2024").is_err());
    }

    #[test]
    fn test_non_date_text_is_rejected() {
        let err = parse_invoice_date("end_date", "next month").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Parse { field: "end_date", .. }
        ));
    }
}
