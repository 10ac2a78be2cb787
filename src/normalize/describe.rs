use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

static ENUM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^enum").expect("enum prefix pattern"));

/// A column as reported by `DESCRIBE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescription {
    #[serde(rename = "type")]
    pub column_type: String,
    pub allow_null: bool,
    pub default_value: RowValues,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub comment: Option<String>,
}

/// Column name → description, in table column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableDescription {
    columns: Vec<(String, ColumnDescription)>,
}

impl TableDescription {
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&ColumnDescription> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, description)| description)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnDescription)> {
        self.columns.iter().map(|(name, d)| (name.as_str(), d))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn insert(&mut self, name: String, description: ColumnDescription) {
        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = description,
            None => self.columns.push((name, description)),
        }
    }
}

/// Build the table description from `DESCRIBE` rows.
#[must_use]
pub fn describe_table(rows: &ResultSet) -> TableDescription {
    let mut description = TableDescription::default();
    for row in &rows.results {
        let name = row.get("Field").map(RowValues::to_string).unwrap_or_default();
        description.insert(name, describe_column(row));
    }
    description
}

fn describe_column(row: &CustomDbRow) -> ColumnDescription {
    ColumnDescription {
        column_type: normalize_type(row.text("Type").unwrap_or_default()),
        allow_null: row.text("Null") == Some("YES"),
        default_value: row.get("Default").cloned().unwrap_or(RowValues::Null),
        primary_key: row.text("Key") == Some("PRI"),
        auto_increment: row
            .text("Extra")
            .is_some_and(|extra| extra.eq_ignore_ascii_case("auto_increment")),
        comment: row
            .text("Comment")
            .filter(|comment| !comment.is_empty())
            .map(str::to_string),
    }
}

/// `enum(...)` keeps its member list as declared; every other type is uppercased.
pub(crate) fn normalize_type(raw: &str) -> String {
    if ENUM_PREFIX.is_match(raw) {
        ENUM_PREFIX.replace(raw, "ENUM").into_owned()
    } else {
        raw.to_uppercase()
    }
}
