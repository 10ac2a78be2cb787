//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::bind::{BindMarker, BindValues, format_bind_parameters, format_bind_parameters_with};
pub use crate::config::{AdapterConfig, QueryOptions, Toggle};
pub use crate::connection::{Completion, DriverConnection};
pub use crate::error::{
    DatabaseError, DriverError, ForeignKeyConstraintError, RelationType, SqlAdapterError,
    UniqueConstraintError, ValidationErrorItem,
};
pub use crate::kind::{StatementKind, resolve_kind};
pub use crate::logging::{LogContext, QueryLogger, TracingLogger};
pub use crate::model::{Instance, ModelDefinition, UniqueKey};
pub use crate::normalize::{
    ColumnDescription, IndexDescriptor, IndexField, QueryResult, TableDescription, WriteResult,
    aggregate_indexes, describe_table, normalize,
};
pub use crate::query::Query;
pub use crate::results::{CustomDbRow, RawDriverResult, ResultSet, WriteAck};
pub use crate::transaction::{Transaction, TxFinished};
pub use crate::translate::{ErrorContext, ErrorTranslator, MysqlErrorTranslator};
pub use crate::types::RowValues;
