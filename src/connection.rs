use crate::error::DriverError;
use crate::results::RawDriverResult;
use crate::types::RowValues;

/// Completion callback the driver invokes exactly once per submission.
pub type Completion = Box<dyn FnOnce(Result<RawDriverResult, DriverError>) + Send + 'static>;

/// Raw driver connection the executor submits statements to.
///
/// The connection is held exclusively by the caller for the duration of a
/// statement. Implementations may invoke `done` synchronously or from another
/// thread; dropping it without calling it surfaces as a connection error.
pub trait DriverConnection: Send + Sync {
    /// Identifier used in log lines; `None` logs as `default`.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Prepared execution with positional `?` parameters.
    fn execute(&self, sql: &str, params: &[RowValues], done: Completion);

    /// Text protocol execution without parameters.
    fn query(&self, sql: &str, done: Completion);
}
