use crate::query::Query;
use crate::results::{RawDriverResult, ResultSet};

const SHOW_WARNINGS: &str = "SHOW WARNINGS";
const MESSAGE_COLUMN: &str = "Message";

impl Query {
    /// Fetch `SHOW WARNINGS` for the statement that produced `results`, log the
    /// messages and hand `results` back untouched.
    pub async fn log_warnings(&self, results: RawDriverResult) -> RawDriverResult {
        match self.execute_raw(SHOW_WARNINGS, None).await {
            Ok(warnings) => {
                let messages = warning_messages(&warnings);
                let line = format!(
                    "MySQL Warnings ({}): {}",
                    self.connection_id(),
                    messages.join("; ")
                );
                tracing::debug!(target: "sql_query_adapter::warnings", count = messages.len(), "{line}");
                self.log_line(&line, None);
            }
            Err(err) => {
                tracing::warn!(
                    target: "sql_query_adapter::warnings",
                    error = %err,
                    "could not fetch warnings"
                );
            }
        }
        results
    }
}

/// Messages from a `SHOW WARNINGS` payload.
///
/// Rows with a `Message` column contribute it; other rows contribute every
/// column as `key: value`. Acknowledgements carry no rows and contribute nothing.
#[must_use]
pub fn warning_messages(warnings: &RawDriverResult) -> Vec<String> {
    warnings
        .as_rows()
        .map(messages_from_rows)
        .unwrap_or_default()
}

fn messages_from_rows(rows: &ResultSet) -> Vec<String> {
    let mut messages = Vec::new();
    for row in &rows.results {
        if let Some(message) = row.get(MESSAGE_COLUMN) {
            messages.push(message.to_string());
        } else {
            messages.extend(row.iter().map(|(key, value)| format!("{key}: {value}")));
        }
    }
    messages
}
