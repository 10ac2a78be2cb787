use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SqlAdapterError;
use crate::kind::StatementKind;
use crate::model::{Instance, ModelDefinition};
use crate::transaction::Transaction;

/// Adapter-wide settings shared by every statement run through it.
///
/// ```rust
/// use sql_query_adapter::prelude::*;
///
/// let config = AdapterConfig::from_json(r#"{ "show_warnings": true }"#)?;
/// assert!(config.show_warnings);
/// assert!(!config.benchmark);
/// # Ok::<(), SqlAdapterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Fetch and log `SHOW WARNINGS` after statements that report warnings.
    pub show_warnings: bool,
    /// Log elapsed time with the "Executed" line instead of logging "Executing".
    pub benchmark: bool,
    /// Append bound values to logged statements.
    pub log_query_parameters: bool,
}

impl AdapterConfig {
    /// Parse a JSON document; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` if the document is not valid JSON
    /// for this shape.
    pub fn from_json(json: &str) -> Result<Self, SqlAdapterError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// How to resolve a per-call switch relative to the adapter default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Toggle {
    /// Follow the adapter's setting.
    #[default]
    Default,
    ForceOn,
    ForceOff,
}

impl Toggle {
    #[must_use]
    pub fn resolve(self, adapter_default: bool) -> bool {
        match self {
            Toggle::Default => adapter_default,
            Toggle::ForceOn => true,
            Toggle::ForceOff => false,
        }
    }
}

/// Per-statement options recorded when the statement was built.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub kind: Option<StatementKind>,
    pub model: Option<Arc<ModelDefinition>>,
    /// Record being persisted; insert populates its auto-increment attribute.
    pub instance: Option<Instance>,
    pub transaction: Option<Arc<Transaction>>,
    pub show_warnings: Toggle,
    pub benchmark: Toggle,
    pub log_query_parameters: Toggle,
    /// Send statement lines to the logger sink at all.
    pub logging: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            kind: None,
            model: None,
            instance: None,
            transaction: None,
            show_warnings: Toggle::Default,
            benchmark: Toggle::Default,
            log_query_parameters: Toggle::Default,
            logging: true,
        }
    }
}

impl QueryOptions {
    #[must_use]
    pub fn new(kind: StatementKind) -> Self {
        Self::default().with_kind(kind)
    }

    #[must_use]
    pub fn with_kind(mut self, kind: StatementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: Arc<ModelDefinition>) -> Self {
        self.model = Some(model);
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    #[must_use]
    pub fn with_transaction(mut self, transaction: Arc<Transaction>) -> Self {
        self.transaction = Some(transaction);
        self
    }

    #[must_use]
    pub fn with_show_warnings(mut self, show_warnings: Toggle) -> Self {
        self.show_warnings = show_warnings;
        self
    }

    #[must_use]
    pub fn with_benchmark(mut self, benchmark: Toggle) -> Self {
        self.benchmark = benchmark;
        self
    }

    #[must_use]
    pub fn with_log_query_parameters(mut self, log_query_parameters: Toggle) -> Self {
        self.log_query_parameters = log_query_parameters;
        self
    }

    #[must_use]
    pub fn without_logging(mut self) -> Self {
        self.logging = false;
        self
    }
}
