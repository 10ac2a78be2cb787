use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::model::Instance;
use crate::types::RowValues;

/// Error exactly as the driver reported it, plus the statement that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverError {
    /// Numeric server error number (`errno`), e.g. 1062.
    pub errno: Option<u16>,
    /// Symbolic code, e.g. `ER_DUP_ENTRY`.
    pub code: Option<String>,
    pub sql_state: Option<String>,
    pub message: String,
    /// Statement text attached by the executor.
    pub sql: Option<String>,
    /// Bind values attached by the executor.
    pub parameters: Option<Vec<RowValues>>,
}

impl DriverError {
    pub fn new(errno: u16, message: impl Into<String>) -> Self {
        Self {
            errno: Some(errno),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }

    pub(crate) fn attach_statement(&mut self, sql: &str, parameters: Option<&[RowValues]>) {
        self.sql = Some(sql.to_string());
        self.parameters = parameters.map(<[RowValues]>::to_vec);
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.errno) {
            (Some(code), _) => write!(f, "{code}: {}", self.message),
            (None, Some(errno)) => write!(f, "{errno}: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for DriverError {}

/// Which side of a foreign key relation a write violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    /// A referenced (parent) row would be deleted or updated away.
    Parent,
    /// A referencing (child) row points to a missing parent.
    Child,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationType::Parent => "parent",
            RelationType::Child => "child",
        })
    }
}

/// One offending field of a unique constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrorItem {
    pub message: String,
    /// Origin of the item, always `unique violation` for server-side uniqueness.
    pub kind: String,
    /// Field (attribute) name.
    pub path: String,
    pub value: Option<String>,
    pub validator_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniqueConstraintError {
    pub message: String,
    pub errors: Vec<ValidationErrorItem>,
    /// Field name → offending value. Values the message did not supply are `None`.
    pub fields: BTreeMap<String, Option<String>>,
    /// Key identifier as reported by the server, if the message could be parsed.
    pub constraint: Option<String>,
    pub instance: Option<Instance>,
    pub parent: DriverError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyConstraintError {
    pub reltype: RelationType,
    pub table: Option<String>,
    pub fields: Option<Vec<String>>,
    /// Instance value of the first referencing field.
    pub value: Option<RowValues>,
    /// Constraint name.
    pub index: Option<String>,
    pub parent: DriverError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseError {
    pub parent: DriverError,
}

impl DatabaseError {
    #[must_use]
    pub fn original_code(&self) -> Option<String> {
        self.parent
            .code
            .clone()
            .or_else(|| self.parent.errno.map(|errno| errno.to_string()))
    }

    #[must_use]
    pub fn original_message(&self) -> &str {
        &self.parent.message
    }
}

#[derive(Debug, Error)]
pub enum SqlAdapterError {
    #[error("{}", .0.message)]
    UniqueConstraint(UniqueConstraintError),

    #[error("{}", .0.parent.message)]
    ForeignKeyConstraint(ForeignKeyConstraintError),

    #[error("{}", .0.parent)]
    Database(DatabaseError),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SqlAdapterError {
    /// The driver error behind a translated failure.
    #[must_use]
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            SqlAdapterError::UniqueConstraint(err) => Some(&err.parent),
            SqlAdapterError::ForeignKeyConstraint(err) => Some(&err.parent),
            SqlAdapterError::Database(err) => Some(&err.parent),
            SqlAdapterError::ConnectionError(_) | SqlAdapterError::ConfigError(_) => None,
        }
    }

    /// Statement text that failed, when the failure came from the driver.
    #[must_use]
    pub fn sql(&self) -> Option<&str> {
        self.driver_error().and_then(|err| err.sql.as_deref())
    }
}

impl From<serde_json::Error> for SqlAdapterError {
    fn from(err: serde_json::Error) -> Self {
        SqlAdapterError::ConfigError(err.to_string())
    }
}
