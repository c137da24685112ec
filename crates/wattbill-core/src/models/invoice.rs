//! Invoice data model for Electrohold electricity bills.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully extracted monthly electricity invoice.
///
/// A record exists only when every field was extracted; a bill missing any
/// field never produces one. Values are passed through as printed on the
/// invoice — day + night is not reconciled against the total, and the
/// period end is not checked against the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// First day of the billing period.
    pub start_date: NaiveDate,

    /// Last day of the billing period. Also the timestamp of the
    /// published time-series point.
    pub end_date: NaiveDate,

    /// Day-tariff consumption in kWh.
    pub day_kwh: u64,

    /// Night-tariff consumption in kWh.
    pub night_kwh: u64,

    /// Total consumption in kWh as printed on the invoice.
    pub total_kwh: u64,

    /// Amount due in BGN, two fraction digits.
    pub total_cost_bgn: Decimal,
}
