//! Regex patterns for Electrohold invoice text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Billing period: "от DD.MM.YYYY до DD.MM.YYYY".
    pub static ref BILLING_PERIOD: Regex = Regex::new(r"от ([\d.]+) до ([\d.]+)").unwrap();

    /// Day-tariff row: label, two numeric meter columns, then the kWh reading.
    pub static ref DAY_KWH: Regex = Regex::new(r"Дневна\s+\d+\s+\d+\s+(\d+)").unwrap();

    /// Night-tariff row, same column layout as the day row.
    pub static ref NIGHT_KWH: Regex = Regex::new(r"Нощна\s+\d+\s+\d+\s+(\d+)").unwrap();

    /// Total consumption: "Общо: N".
    pub static ref TOTAL_KWH: Regex = Regex::new(r"Общо:\s+(\d+)").unwrap();

    /// Amount due in BGN, comma as the decimal separator.
    pub static ref TOTAL_COST: Regex = Regex::new(r"СУМА ЗА ПЛАЩАНЕ\s+([\d,]+)").unwrap();

    /// Invoice dates are day.month.year.
    pub static ref DATE_DMY: Regex = Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.(\d{4})\b").unwrap();
}
