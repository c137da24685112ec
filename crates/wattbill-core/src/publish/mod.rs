//! Time-series publishing: point construction and the InfluxDB write
//! client.

mod influx;
mod point;

pub use influx::InfluxWriter;
pub use point::{Point, MEASUREMENT};

use crate::error::PublishError;

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;
