use std::sync::Arc;
use std::time::Instant;

use tokio::sync::oneshot;

use crate::config::{AdapterConfig, QueryOptions};
use crate::connection::{Completion, DriverConnection};
use crate::error::{DriverError, SqlAdapterError};
use crate::kind::resolve_kind;
use crate::logging::{LogContext, QueryLogger, TracingLogger};
use crate::normalize::{QueryResult, normalize};
use crate::results::RawDriverResult;
use crate::translate::{ErrorContext, ErrorTranslator, MysqlErrorTranslator};
use crate::types::RowValues;

const DEFAULT_CONNECTION_ID: &str = "default";

/// Executes one statement against a driver connection and normalizes the outcome.
///
/// A `Query` is built per statement with the options recorded when the
/// statement was built:
/// ```rust
/// use std::sync::Arc;
/// use sql_query_adapter::drivers::InMemoryConnection;
/// use sql_query_adapter::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let conn = Arc::new(InMemoryConnection::new("c1").with_ack(WriteAck::new(7, 1)));
/// let query = Query::new(conn, QueryOptions::new(StatementKind::Insert));
///
/// let rt = tokio::runtime::Runtime::new()?;
/// let result = rt.block_on(query.run("INSERT INTO t (a) VALUES (?)", Some(&[RowValues::Int(1)])))?;
/// assert_eq!(result.affected_rows(), Some(1));
/// # Ok(()) }
/// ```
pub struct Query {
    connection: Arc<dyn DriverConnection>,
    config: Arc<AdapterConfig>,
    logger: Arc<dyn QueryLogger>,
    translator: Arc<dyn ErrorTranslator>,
    options: QueryOptions,
}

impl Query {
    /// Query with the default config, a `tracing` logger and the MySQL translator.
    pub fn new(connection: Arc<dyn DriverConnection>, options: QueryOptions) -> Self {
        Self {
            connection,
            config: Arc::new(AdapterConfig::default()),
            logger: Arc::new(TracingLogger),
            translator: Arc::new(MysqlErrorTranslator),
            options,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Arc<AdapterConfig>) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn QueryLogger>) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn ErrorTranslator>) -> Self {
        self.translator = translator;
        self
    }

    #[must_use]
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub(crate) fn connection_id(&self) -> &str {
        self.connection.id().unwrap_or(DEFAULT_CONNECTION_ID)
    }

    pub(crate) fn log_line(&self, line: &str, elapsed: Option<std::time::Duration>) {
        if !self.options.logging {
            return;
        }
        let context = LogContext {
            connection_id: self.connection_id().to_string(),
            kind: self.options.kind,
            elapsed,
        };
        self.logger.log(line, &context);
    }

    /// Run the statement and return its normalized result.
    ///
    /// # Errors
    /// Returns the translated driver error (unique constraint, foreign key or
    /// generic database error), or `ConnectionError` if the driver dropped the
    /// completion without answering.
    pub async fn run(
        &self,
        sql: &str,
        parameters: Option<&[RowValues]>,
    ) -> Result<QueryResult, SqlAdapterError> {
        let mut raw = self.execute_raw(sql, parameters).await?;

        let show_warnings = self.options.show_warnings.resolve(self.config.show_warnings);
        if show_warnings && raw.warning_count() > 0 {
            raw = self.log_warnings(raw).await;
        }

        let kind = resolve_kind(self.options.kind, sql, Some(&raw));
        Ok(normalize(
            kind,
            self.options.instance.clone(),
            self.options.model.as_deref(),
            raw,
        ))
    }

    /// Submit the statement and wait for the driver, without warnings or
    /// normalization.
    ///
    /// An empty parameter list is treated as no parameters.
    ///
    /// # Errors
    /// Same as [`Query::run`].
    pub async fn execute_raw(
        &self,
        sql: &str,
        parameters: Option<&[RowValues]>,
    ) -> Result<RawDriverResult, SqlAdapterError> {
        let parameters = parameters.filter(|params| !params.is_empty());
        let timer = self.log_query(sql, parameters);

        let outcome = self.submit(sql, parameters).await;
        timer.complete(self);

        match outcome? {
            Ok(raw) => Ok(raw),
            Err(mut err) => {
                err.attach_statement(sql, parameters);
                Err(self.fail(err))
            }
        }
    }

    async fn submit(
        &self,
        sql: &str,
        parameters: Option<&[RowValues]>,
    ) -> Result<Result<RawDriverResult, DriverError>, SqlAdapterError> {
        let (tx, rx) = oneshot::channel();
        let done: Completion = Box::new(move |outcome| {
            // The receiver only goes away if the caller stopped waiting.
            let _ = tx.send(outcome);
        });

        match parameters {
            Some(params) => {
                tracing::debug!(target: "sql_query_adapter::query", ?params, "parameters");
                self.connection.execute(sql, params, done);
            }
            None => self.connection.query(sql, done),
        }

        rx.await.map_err(|_| {
            SqlAdapterError::ConnectionError(format!(
                "connection {} dropped the completion for: {sql}",
                self.connection_id()
            ))
        })
    }

    fn fail(&self, err: DriverError) -> SqlAdapterError {
        // MySQL rolls the whole transaction back when it picks a deadlock victim.
        if let Some(transaction) = &self.options.transaction
            && self.translator.is_deadlock(&err)
        {
            tracing::debug!(
                target: "sql_query_adapter::query",
                transaction = transaction.id(),
                "deadlock; transaction marked rolled back"
            );
            transaction.mark_rollback();
        }

        let ctx = ErrorContext {
            instance: self.options.instance.as_ref(),
            model: self.options.model.as_deref(),
        };
        self.translator.translate(err, &ctx)
    }

    fn log_query(&self, sql: &str, parameters: Option<&[RowValues]>) -> StatementTimer {
        let benchmark = self.options.benchmark.resolve(self.config.benchmark);
        let log_parameters = self
            .options
            .log_query_parameters
            .resolve(self.config.log_query_parameters);

        let mut statement = format!("({}): {sql}", self.connection_id());
        if log_parameters && let Some(params) = parameters {
            let delimiter = if sql.ends_with(';') { "" } else { ";" };
            let rendered: Vec<String> = params
                .iter()
                .map(|p| serde_json::to_string(p).unwrap_or_else(|_| p.to_string()))
                .collect();
            statement.push_str(&format!("{delimiter} {}", rendered.join(", ")));
        }

        let line = format!("Executing {statement}");
        tracing::debug!(target: "sql_query_adapter::query", "{line}");
        if !benchmark {
            self.log_line(&line, None);
        }

        StatementTimer {
            statement,
            started: Instant::now(),
            benchmark,
        }
    }
}

struct StatementTimer {
    statement: String,
    started: Instant,
    benchmark: bool,
}

impl StatementTimer {
    fn complete(self, query: &Query) {
        let line = format!("Executed {}", self.statement);
        let elapsed = self.started.elapsed();
        tracing::debug!(
            target: "sql_query_adapter::query",
            elapsed_ms = elapsed.as_millis() as u64,
            "{line}"
        );
        if self.benchmark {
            query.log_line(&line, Some(elapsed));
        }
    }
}
