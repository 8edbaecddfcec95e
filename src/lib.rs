//! rowsift - a deterministic in-memory analytical query engine
//!
//! Sorts, filters, groups, ranks and scans tabular records for statistical
//! outliers. Records are field maps of typed values; every operation is a
//! pure function of its inputs and fails loudly on incomparable data.

pub mod config;
pub mod errors;
pub mod executor;
pub mod observability;
pub mod query;
pub mod record;

pub use config::EngineConfig;
pub use errors::{EngineError, EngineResult};
pub use executor::{AnalyticsExecutor, AnomalyReport, GroupKey};
pub use observability::{Logger, Severity};
pub use query::{Criterion, FilterSpec, SortOrder};
pub use record::{Record, Value};
