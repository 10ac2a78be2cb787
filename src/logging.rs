//! Logger sink the executor reports statements and warnings to.

use std::time::Duration;

use crate::kind::StatementKind;

/// Structured context passed along with every logged line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub connection_id: String,
    pub kind: Option<StatementKind>,
    /// Present on "Executed" lines when benchmarking.
    pub elapsed: Option<Duration>,
}

/// Receives formatted log lines. Implementations must be cheap; they are called
/// on the statement path.
pub trait QueryLogger: Send + Sync {
    fn log(&self, line: &str, context: &LogContext);
}

/// Default sink: forwards every line to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl QueryLogger for TracingLogger {
    fn log(&self, line: &str, context: &LogContext) {
        match context.elapsed {
            Some(elapsed) => tracing::info!(
                target: "sql_query_adapter::query",
                connection = %context.connection_id,
                elapsed_ms = elapsed.as_millis() as u64,
                "{line}"
            ),
            None => tracing::info!(
                target: "sql_query_adapter::query",
                connection = %context.connection_id,
                "{line}"
            ),
        }
    }
}
