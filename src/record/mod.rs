//! Record model for rowsift
//!
//! Records arrive fully materialized from the host's storage layer.
//! The engine never mutates them; every operation returns new records.

mod record;
mod value;

pub use record::Record;
pub use value::{parse_timestamp, Value, TIMESTAMP_FORMAT};
