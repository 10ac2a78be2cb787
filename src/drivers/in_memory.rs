use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use crate::connection::{Completion, DriverConnection};
use crate::error::DriverError;
use crate::results::{RawDriverResult, ResultSet, WriteAck};
use crate::types::RowValues;

/// Which driver entry point a statement went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Prepared execution with parameters.
    Execute,
    /// Plain text query.
    Query,
}

/// A recorded submission for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedStatement {
    pub mode: SubmitMode,
    pub sql: String,
    pub params: Vec<RowValues>,
}

enum Scripted {
    Reply(Result<RawDriverResult, DriverError>),
    /// Drop the completion without calling it.
    Hang,
}

/// A scripted driver connection for tests and demos.
///
/// Replies are handed out in FIFO order; once the script runs dry every
/// statement is acknowledged with an empty write.
///
/// ```
/// use sql_query_adapter::drivers::{InMemoryConnection, RowsBuilder};
///
/// let conn = InMemoryConnection::new("conn-1").with_rows(
///     RowsBuilder::new(&["version"]).row(vec!["8.0.36".into()]).build(),
/// );
/// assert_eq!(conn.submitted().len(), 0);
/// ```
pub struct InMemoryConnection {
    id: Option<String>,
    script: Mutex<VecDeque<Scripted>>,
    submitted: Mutex<Vec<SubmittedStatement>>,
    threaded: bool,
}

impl InMemoryConnection {
    /// Create a connection with the given identifier and an empty script.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            script: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            threaded: false,
        }
    }

    /// Connection without an identifier; logs show `default`.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            id: None,
            ..Self::new(String::new())
        }
    }

    /// Invoke completions from a separate thread, like a socket reader would.
    #[must_use]
    pub fn threaded(mut self) -> Self {
        self.threaded = true;
        self
    }

    #[must_use]
    pub fn with_reply(self, reply: Result<RawDriverResult, DriverError>) -> Self {
        lock(&self.script).push_back(Scripted::Reply(reply));
        self
    }

    #[must_use]
    pub fn with_rows(self, rows: ResultSet) -> Self {
        self.with_reply(Ok(RawDriverResult::Rows(rows)))
    }

    #[must_use]
    pub fn with_ack(self, ack: WriteAck) -> Self {
        self.with_reply(Ok(RawDriverResult::Ack(ack)))
    }

    #[must_use]
    pub fn with_error(self, error: DriverError) -> Self {
        self.with_reply(Err(error))
    }

    /// Next statement never completes; its callback is dropped.
    #[must_use]
    pub fn with_dropped_completion(self) -> Self {
        lock(&self.script).push_back(Scripted::Hang);
        self
    }

    /// Every statement submitted so far.
    pub fn submitted(&self) -> Vec<SubmittedStatement> {
        lock(&self.submitted).clone()
    }

    pub fn last_submitted(&self) -> Option<SubmittedStatement> {
        lock(&self.submitted).last().cloned()
    }

    fn submit(&self, mode: SubmitMode, sql: &str, params: &[RowValues], done: Completion) {
        lock(&self.submitted).push(SubmittedStatement {
            mode,
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        let next = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Scripted::Reply(Ok(RawDriverResult::Ack(WriteAck::default()))));

        match next {
            Scripted::Hang => drop(done),
            Scripted::Reply(reply) if self.threaded => {
                thread::spawn(move || done(reply));
            }
            Scripted::Reply(reply) => done(reply),
        }
    }
}

impl DriverConnection for InMemoryConnection {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn execute(&self, sql: &str, params: &[RowValues], done: Completion) {
        self.submit(SubmitMode::Execute, sql, params, done);
    }

    fn query(&self, sql: &str, done: Completion) {
        self.submit(SubmitMode::Query, sql, &[], done);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Builder for scripted row sets.
pub struct RowsBuilder {
    set: ResultSet,
}

impl RowsBuilder {
    /// Start a row set with the given column names.
    pub fn new(columns: &[&str]) -> Self {
        let mut set = ResultSet::default();
        set.set_column_names(Arc::new(
            columns.iter().map(|c| (*c).to_string()).collect(),
        ));
        Self { set }
    }

    /// Add a row; values are matched to columns by position.
    #[must_use]
    pub fn row(mut self, values: Vec<RowValues>) -> Self {
        self.set.add_row_values(values);
        self
    }

    #[must_use]
    pub fn build(self) -> ResultSet {
        self.set
    }
}
