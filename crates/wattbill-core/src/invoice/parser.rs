//! Rule-based parser for Electrohold invoice text.

use regex::Regex;
use tracing::{debug, info};

use super::rules::patterns::{BILLING_PERIOD, DAY_KWH, NIGHT_KWH, TOTAL_COST, TOTAL_KWH};
use super::rules::{parse_bulgarian_amount, parse_invoice_date};
use super::Result;
use crate::error::ExtractionError;
use crate::models::invoice::InvoiceRecord;

/// Trait for invoice text parsing.
pub trait InvoiceParser {
    /// Parse one invoice's text into a complete record.
    fn parse(&self, text: &str) -> Result<InvoiceRecord>;
}

/// Parser for Electrohold Sales invoices.
///
/// Five independent extractions, all required: the billing period, the
/// day and night tariff readings, the total consumption and the amount
/// due. A text missing any one of them produces no record.
#[derive(Debug, Default)]
pub struct ElectroholdParser;

impl ElectroholdParser {
    pub fn new() -> Self {
        Self
    }
}

impl InvoiceParser for ElectroholdParser {
    fn parse(&self, text: &str) -> Result<InvoiceRecord> {
        debug!(chars = text.len(), "parsing invoice text");

        let period = BILLING_PERIOD
            .captures(text)
            .ok_or(ExtractionError::MissingField("billing_period"))?;
        let start_date = parse_invoice_date("start_date", &period[1])?;
        let end_date = parse_invoice_date("end_date", &period[2])?;

        let day_kwh = parse_consumption("day_kwh", require(&DAY_KWH, text, "day_kwh")?)?;
        let night_kwh = parse_consumption("night_kwh", require(&NIGHT_KWH, text, "night_kwh")?)?;
        let total_kwh = parse_consumption("total_kwh", require(&TOTAL_KWH, text, "total_kwh")?)?;

        let total_cost_bgn =
            parse_bulgarian_amount("total_cost_bgn", require(&TOTAL_COST, text, "total_cost_bgn")?)?;

        // Day + night is not reconciled against the printed total and the
        // period bounds are not ordered-checked; the invoice is the source
        // of truth.
        let record = InvoiceRecord {
            start_date,
            end_date,
            day_kwh,
            night_kwh,
            total_kwh,
            total_cost_bgn,
        };
        info!(
            start = %record.start_date,
            end = %record.end_date,
            total_kwh = record.total_kwh,
            "invoice parsed"
        );
        Ok(record)
    }
}

/// First capture group of `pattern`, or a missing-field error.
fn require<'t>(pattern: &Regex, text: &'t str, field: &'static str) -> Result<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ExtractionError::MissingField(field))
}

fn parse_consumption(field: &'static str, raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| ExtractionError::Parse {
        field,
        value: raw.to_string(),
    })
}
