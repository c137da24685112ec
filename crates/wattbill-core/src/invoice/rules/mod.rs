//! Rule-based field extraction for Bulgarian electricity invoices.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::parse_bulgarian_amount;
pub use dates::parse_invoice_date;
