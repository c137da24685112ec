//! Amount parsing for invoice totals.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ExtractionError;
use crate::invoice::Result;

/// Parse a Bulgarian-formatted amount ("45,67") into a decimal.
///
/// The comma is the decimal separator on these invoices; the normalized
/// form replaces it with a period before conversion.
pub fn parse_bulgarian_amount(field: &'static str, raw: &str) -> Result<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ExtractionError::Parse {
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(
            parse_bulgarian_amount("total_cost_bgn", "123,45").unwrap(),
            Decimal::from_str("123.45").unwrap()
        );
    }

    #[test]
    fn test_whole_amount_without_separator() {
        assert_eq!(
            parse_bulgarian_amount("total_cost_bgn", "200").unwrap(),
            Decimal::from_str("200").unwrap()
        );
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(parse_bulgarian_amount("total_cost_bgn", "n/a").is_err());
    }
}
