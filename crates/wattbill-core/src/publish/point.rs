//! Line-protocol point for one parsed invoice.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;

use crate::models::invoice::InvoiceRecord;

/// Measurement name every invoice point is written under.
pub const MEASUREMENT: &str = "electricity_invoice";

/// A single time-series point: the fixed invoice field set plus the
/// billing-period-end timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    day_kwh: u64,
    night_kwh: u64,
    total_kwh: u64,
    total_cost_bgn: Decimal,
    timestamp: DateTime<Utc>,
}

impl Point {
    /// Map an invoice record onto the field set, timestamped at the end
    /// date at midnight UTC.
    pub fn from_record(record: &InvoiceRecord) -> Self {
        Self {
            day_kwh: record.day_kwh,
            night_kwh: record.night_kwh,
            total_kwh: record.total_kwh,
            total_cost_bgn: record.total_cost_bgn,
            timestamp: record.end_date.and_time(NaiveTime::MIN).and_utc(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Render the point as one line of InfluxDB line protocol with a
    /// nanosecond timestamp. No tags; integer fields carry the `i`
    /// suffix.
    pub fn to_line_protocol(&self) -> String {
        format!(
            "{} day_kwh={}i,night_kwh={}i,total_kwh={}i,total_cost_bgn={} {}",
            MEASUREMENT,
            self.day_kwh,
            self.night_kwh,
            self.total_kwh,
            self.total_cost_bgn,
            self.timestamp.timestamp_nanos_opt().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_record() -> InvoiceRecord {
        InvoiceRecord {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            day_kwh: 120,
            night_kwh: 80,
            total_kwh: 200,
            total_cost_bgn: Decimal::from_str("45.67").unwrap(),
        }
    }

    #[test]
    fn test_timestamp_is_end_date_midnight_utc() {
        let point = Point::from_record(&sample_record());
        assert_eq!(point.timestamp().to_rfc3339(), "2024-01-31T00:00:00+00:00");
    }

    #[test]
    fn test_line_protocol_rendering() {
        let point = Point::from_record(&sample_record());
        assert_eq!(
            point.to_line_protocol(),
            "electricity_invoice day_kwh=120i,night_kwh=80i,total_kwh=200i,\
             total_cost_bgn=45.67 1706659200000000000"
        );
    }
}
