//! Reshape raw driver payloads into the result each statement kind promises.

mod describe;
mod indexes;
mod insert;

pub use describe::{ColumnDescription, TableDescription, describe_table};
pub use indexes::{IndexDescriptor, IndexField, PRIMARY_INDEX_NAME, aggregate_indexes};
pub use insert::WriteResult;

use crate::kind::StatementKind;
use crate::model::{Instance, ModelDefinition};
use crate::results::{CustomDbRow, RawDriverResult, ResultSet};

/// Normalized result of one statement; the variant depends only on the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Unclassified statement without an attached instance.
    Empty,
    /// Unclassified statement with an attached instance.
    Instance(Instance),
    /// Select, ShowTables, ForeignKeys, ShowConstraints.
    Rows(ResultSet),
    /// Call: first row only.
    Row(Option<CustomDbRow>),
    Description(TableDescription),
    Indexes(Vec<IndexDescriptor>),
    /// BulkUpdate, BulkDelete, Upsert.
    AffectedRows(u64),
    Version(Option<String>),
    /// Insert and Update.
    Write {
        result: WriteResult,
        affected_rows: u64,
    },
    /// The driver payload twice, as data and as metadata.
    Raw {
        rows: RawDriverResult,
        metadata: RawDriverResult,
    },
}

impl QueryResult {
    /// Rows of a row-shaped result.
    #[must_use]
    pub fn rows(&self) -> Option<&ResultSet> {
        match self {
            QueryResult::Rows(set) => Some(set),
            _ => None,
        }
    }

    #[must_use]
    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            QueryResult::AffectedRows(count) | QueryResult::Write { affected_rows: count, .. } => {
                Some(*count)
            }
            _ => None,
        }
    }
}

/// Build the normalized result for an already resolved kind.
///
/// `instance` is the record attached to the statement, if any; `model` the
/// model it targets.
#[must_use]
pub fn normalize(
    kind: Option<StatementKind>,
    instance: Option<Instance>,
    model: Option<&ModelDefinition>,
    raw: RawDriverResult,
) -> QueryResult {
    let Some(kind) = kind else {
        return match instance {
            Some(instance) => QueryResult::Instance(instance),
            None => QueryResult::Empty,
        };
    };

    match kind {
        StatementKind::Insert => {
            let result = insert::insert_result(instance, model, &raw);
            QueryResult::Write {
                result,
                affected_rows: raw.affected_rows(),
            }
        }
        StatementKind::Select
        | StatementKind::ShowTables
        | StatementKind::ForeignKeys
        | StatementKind::ShowConstraints => QueryResult::Rows(raw.into_rows()),
        StatementKind::Describe => QueryResult::Description(describe_table(&raw.into_rows())),
        StatementKind::ShowIndexes => QueryResult::Indexes(aggregate_indexes(&raw.into_rows())),
        StatementKind::Call => QueryResult::Row(raw.into_rows().results.into_iter().next()),
        StatementKind::BulkUpdate | StatementKind::BulkDelete | StatementKind::Upsert => {
            QueryResult::AffectedRows(raw.affected_rows())
        }
        StatementKind::Version => QueryResult::Version(
            raw.as_rows()
                .and_then(ResultSet::first)
                .and_then(|row| row.get("version"))
                .filter(|value| !value.is_null())
                .map(ToString::to_string),
        ),
        StatementKind::Update => QueryResult::Write {
            result: instance.map_or(WriteResult::None, WriteResult::Instance),
            affected_rows: raw.affected_rows(),
        },
        StatementKind::Raw => QueryResult::Raw {
            metadata: raw.clone(),
            rows: raw,
        },
    }
}
