//! Invoice field extraction.

mod parser;
pub mod rules;

pub use parser::{ElectroholdParser, InvoiceParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
