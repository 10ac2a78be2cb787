use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::results::RawDriverResult;

/// Semantic category of a statement, recorded when the statement was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    BulkUpdate,
    BulkDelete,
    Upsert,
    Describe,
    ShowTables,
    ShowIndexes,
    ShowConstraints,
    Call,
    Version,
    ForeignKeys,
    Raw,
}

/// Decide the kind the normalizer dispatches on.
///
/// A declared kind that dispatches ahead of the insert/update branch keeps its
/// own shape, so an `INSERT ... ON DUPLICATE KEY UPDATE` declared as `Upsert`
/// still reports a row count. For the rest (`Insert`, `Update`,
/// `ShowConstraints`, `Raw` and unclassified statements) SQL starting with
/// `insert into` whose payload (when there is one) carries an insert id
/// resolves to `Insert`.
#[must_use]
pub fn resolve_kind(
    declared: Option<StatementKind>,
    sql: &str,
    payload: Option<&RawDriverResult>,
) -> Option<StatementKind> {
    match declared {
        Some(StatementKind::Insert) => Some(StatementKind::Insert),
        None
        | Some(StatementKind::Update | StatementKind::ShowConstraints | StatementKind::Raw)
            if is_insert_text(sql, payload) =>
        {
            Some(StatementKind::Insert)
        }
        _ => declared,
    }
}

fn is_insert_text(sql: &str, payload: Option<&RawDriverResult>) -> bool {
    starts_with_insert_into(sql) && payload.is_none_or(|raw| raw.insert_id().is_some())
}

fn starts_with_insert_into(sql: &str) -> bool {
    let trimmed = sql.trim_start();
    trimmed
        .get(..11)
        .is_some_and(|head| head.eq_ignore_ascii_case("insert into"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ResultSet, WriteAck};

    #[test]
    fn declared_kind_passes_through() {
        assert_eq!(
            resolve_kind(Some(StatementKind::Describe), "DESCRIBE `users`;", None),
            Some(StatementKind::Describe)
        );
        assert_eq!(resolve_kind(None, "SELECT 1", None), None);
    }

    #[test]
    fn insert_text_with_ack_overrides_late_kinds() {
        let ack = RawDriverResult::Ack(WriteAck::new(4, 1));
        for declared in [
            None,
            Some(StatementKind::Update),
            Some(StatementKind::ShowConstraints),
            Some(StatementKind::Raw),
        ] {
            assert_eq!(
                resolve_kind(declared, "  INSERT INTO t VALUES (1)", Some(&ack)),
                Some(StatementKind::Insert),
                "{declared:?}"
            );
        }
    }

    #[test]
    fn insert_text_keeps_earlier_declared_kinds() {
        let ack = RawDriverResult::Ack(WriteAck::new(4, 2));
        for declared in [
            StatementKind::Select,
            StatementKind::Call,
            StatementKind::BulkUpdate,
            StatementKind::BulkDelete,
            StatementKind::Upsert,
            StatementKind::ForeignKeys,
        ] {
            assert_eq!(
                resolve_kind(
                    Some(declared),
                    "insert into t values (1) on duplicate key update a = 1",
                    Some(&ack)
                ),
                Some(declared)
            );
        }
    }

    #[test]
    fn kinds_parse_from_cli_names() {
        assert_eq!(
            StatementKind::from_str("bulk-update", true),
            Ok(StatementKind::BulkUpdate)
        );
        assert_eq!(
            StatementKind::from_str("SHOW-INDEXES", true),
            Ok(StatementKind::ShowIndexes)
        );
        assert!(StatementKind::from_str("merge", true).is_err());
    }

    #[test]
    fn kinds_serialize_as_query_type_names() {
        let json = serde_json::to_string(&StatementKind::ForeignKeys).unwrap();
        assert_eq!(json, "\"FOREIGN_KEYS\"");
        let kind: StatementKind = serde_json::from_str("\"BULK_DELETE\"").unwrap();
        assert_eq!(kind, StatementKind::BulkDelete);
    }

    #[test]
    fn insert_text_with_rows_is_not_insert() {
        let rows = RawDriverResult::Rows(ResultSet::default());
        assert_eq!(
            resolve_kind(Some(StatementKind::Raw), "INSERT INTO t SELECT 1", Some(&rows)),
            Some(StatementKind::Raw)
        );
    }

    #[test]
    fn declared_insert_always_wins() {
        let rows = RawDriverResult::Rows(ResultSet::default());
        assert_eq!(
            resolve_kind(Some(StatementKind::Insert), "REPLACE INTO t VALUES (1)", Some(&rows)),
            Some(StatementKind::Insert)
        );
    }
}
