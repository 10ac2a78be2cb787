mod in_memory;

pub use self::in_memory::{InMemoryConnection, RowsBuilder, SubmitMode, SubmittedStatement};
