//! Observability for rowsift
//!
//! - Structured logging (JSON lines) to a sink chosen by the host
//! - Atomic operation counters
//!
//! Observability is read-only: it never changes an operation's result and a
//! failing log sink never fails an operation.

mod logger;
mod metrics;

pub use logger::{Logger, MemorySink, Severity};
pub use metrics::{EngineMetrics, MetricsSnapshot, Operation};
