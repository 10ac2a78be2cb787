//! Turn driver errors into the structured error taxonomy.

mod mysql;

pub use mysql::MysqlErrorTranslator;

use crate::error::{DriverError, SqlAdapterError};
use crate::model::{Instance, ModelDefinition};

/// `ER_DUP_ENTRY`
pub const ER_DUP_ENTRY: u16 = 1062;
/// `ER_ROW_IS_REFERENCED_2`: deleting/updating a referenced parent row.
pub const ER_ROW_IS_REFERENCED: u16 = 1451;
/// `ER_NO_REFERENCED_ROW_2`: child row points at a missing parent.
pub const ER_NO_REFERENCED_ROW: u16 = 1452;
/// `ER_LOCK_DEADLOCK`: the server rolled the transaction back.
pub const ER_LOCK_DEADLOCK: u16 = 1213;

/// Statement context the translator may consult.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorContext<'a> {
    pub instance: Option<&'a Instance>,
    pub model: Option<&'a ModelDefinition>,
}

/// Strategy for translating one driver's error reports.
///
/// Message formats drift between server versions; swapping the translator
/// leaves the executor untouched. Translation must not fail: anything it
/// cannot classify becomes `SqlAdapterError::Database`.
pub trait ErrorTranslator: Send + Sync {
    fn translate(&self, err: DriverError, ctx: &ErrorContext<'_>) -> SqlAdapterError;

    /// Whether the error means the server already rolled back the transaction.
    fn is_deadlock(&self, err: &DriverError) -> bool {
        error_number(err) == Some(ER_LOCK_DEADLOCK)
    }
}

/// Numeric error code: `errno` first, then the symbolic or numeric `code`.
#[must_use]
pub fn error_number(err: &DriverError) -> Option<u16> {
    if let Some(errno) = err.errno {
        return Some(errno);
    }
    let code = err.code.as_deref()?;
    match code {
        "ER_DUP_ENTRY" => Some(ER_DUP_ENTRY),
        "ER_ROW_IS_REFERENCED_2" | "ER_ROW_IS_REFERENCED" => Some(ER_ROW_IS_REFERENCED),
        "ER_NO_REFERENCED_ROW_2" | "ER_NO_REFERENCED_ROW" => Some(ER_NO_REFERENCED_ROW),
        "ER_LOCK_DEADLOCK" => Some(ER_LOCK_DEADLOCK),
        other => other.parse().ok(),
    }
}
