//! Query adapter core for MySQL-family drivers.
//!
//! Formats bind parameters, submits statements to a driver connection, logs
//! them, translates driver errors into typed constraint errors and reshapes raw
//! payloads into the result each statement kind promises.

pub mod bind;
pub mod config;
pub mod connection;
pub mod drivers;
pub mod error;
pub mod kind;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod prelude;
pub mod query;
pub mod results;
pub mod transaction;
pub mod translate;
pub mod types;
pub mod warnings;

pub use bind::{BindMarker, BindValues, format_bind_parameters, format_bind_parameters_with};
pub use config::{AdapterConfig, QueryOptions, Toggle};
pub use connection::{Completion, DriverConnection};
pub use error::{DriverError, SqlAdapterError};
pub use kind::{StatementKind, resolve_kind};
pub use normalize::{QueryResult, WriteResult, aggregate_indexes, describe_table, normalize};
pub use query::Query;
pub use results::{CustomDbRow, RawDriverResult, ResultSet, WriteAck};
pub use types::RowValues;
