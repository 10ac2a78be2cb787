use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{
    ER_DUP_ENTRY, ER_NO_REFERENCED_ROW, ER_ROW_IS_REFERENCED, ErrorContext, ErrorTranslator,
    error_number,
};
use crate::error::{
    DatabaseError, DriverError, ForeignKeyConstraintError, RelationType, SqlAdapterError,
    UniqueConstraintError, ValidationErrorItem,
};
use crate::model::{ModelDefinition, UniqueKey};

static DUPLICATE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Duplicate entry '(.*)' for key '?(.*?)'?$").expect("duplicate entry pattern")
});

// The regex crate has no backreferences, so each quote style gets its own pattern.
static FOREIGN_KEY_BACKTICK: LazyLock<ForeignKeyPattern> =
    LazyLock::new(|| ForeignKeyPattern::new('`'));
static FOREIGN_KEY_DOUBLE_QUOTE: LazyLock<ForeignKeyPattern> =
    LazyLock::new(|| ForeignKeyPattern::new('"'));

const DEFAULT_UNIQUE_MESSAGE: &str = "Validation error";
const VALUE_DELIMITER: char = '-';

struct ForeignKeyPattern {
    constraint: Regex,
    field_separator: Regex,
}

impl ForeignKeyPattern {
    fn new(quote: char) -> Self {
        let q = regex::escape(&quote.to_string());
        Self {
            constraint: Regex::new(&format!(
                r"CONSTRAINT {q}(.*){q} FOREIGN KEY \({q}(.*){q}\) REFERENCES {q}(.*){q} \({q}(.*){q}\)"
            ))
            .expect("foreign key pattern"),
            field_separator: Regex::new(&format!("{q}, *{q}")).expect("field separator pattern"),
        }
    }
}

struct ParsedForeignKey {
    index: String,
    fields: Vec<String>,
    table: String,
}

/// Translator for MySQL / MariaDB error reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlErrorTranslator;

impl ErrorTranslator for MysqlErrorTranslator {
    fn translate(&self, err: DriverError, ctx: &ErrorContext<'_>) -> SqlAdapterError {
        match error_number(&err) {
            Some(ER_DUP_ENTRY) => SqlAdapterError::UniqueConstraint(unique_violation(err, ctx)),
            Some(code @ (ER_ROW_IS_REFERENCED | ER_NO_REFERENCED_ROW)) => {
                let reltype = if code == ER_ROW_IS_REFERENCED {
                    RelationType::Parent
                } else {
                    RelationType::Child
                };
                SqlAdapterError::ForeignKeyConstraint(foreign_key_violation(err, reltype, ctx))
            }
            _ => SqlAdapterError::Database(DatabaseError { parent: err }),
        }
    }
}

fn unique_violation(err: DriverError, ctx: &ErrorContext<'_>) -> UniqueConstraintError {
    let (entry, key) = match DUPLICATE_ENTRY.captures(&err.message) {
        Some(captures) => (
            captures.get(1).map(|m| m.as_str().to_string()),
            captures.get(2).map(|m| m.as_str().to_string()),
        ),
        None => (None, None),
    };

    let mut message = DEFAULT_UNIQUE_MESSAGE.to_string();
    let mut ordered: Vec<(String, Option<String>)> = Vec::new();

    if let (Some(entry), Some(key)) = (&entry, &key) {
        match ctx.model.and_then(|model| find_unique_key(model, key)) {
            Some(unique_key) => {
                if let Some(msg) = &unique_key.msg {
                    message.clone_from(msg);
                }
                let values: Vec<&str> = entry.split(VALUE_DELIMITER).collect();
                ordered = unique_key
                    .fields
                    .iter()
                    .enumerate()
                    .map(|(i, field)| (field.clone(), values.get(i).map(|v| (*v).to_string())))
                    .collect();
            }
            None => ordered.push((key.clone(), Some(entry.clone()))),
        }
    }

    let errors = ordered
        .iter()
        .map(|(field, value)| ValidationErrorItem {
            message: unique_field_message(ctx.model, field),
            kind: "unique violation".to_string(),
            path: field.clone(),
            value: value.clone(),
            validator_key: "not_unique".to_string(),
        })
        .collect();

    UniqueConstraintError {
        message,
        errors,
        fields: ordered.into_iter().collect::<BTreeMap<_, _>>(),
        constraint: key,
        instance: ctx.instance.cloned(),
        parent: err,
    }
}

/// MySQL 8 reports keys as `table.key`; models declare the bare key name.
fn find_unique_key<'m>(model: &'m ModelDefinition, key: &str) -> Option<&'m UniqueKey> {
    model.unique_keys.get(key).or_else(|| {
        key.rsplit_once('.')
            .and_then(|(_, bare)| model.unique_keys.get(bare))
    })
}

fn unique_field_message(model: Option<&ModelDefinition>, field: &str) -> String {
    let mut message = format!("{field} must be unique");
    if let Some(model) = model {
        let unquoted = field.replace('"', "");
        for key in model.unique_keys.values() {
            if key.fields.iter().any(|f| *f == unquoted)
                && let Some(msg) = &key.msg
            {
                message.clone_from(msg);
            }
        }
    }
    message
}

fn foreign_key_violation(
    err: DriverError,
    reltype: RelationType,
    ctx: &ErrorContext<'_>,
) -> ForeignKeyConstraintError {
    let parsed = parse_foreign_key(&err.message);
    // Only NULL counts as missing; a zero key is still a value.
    let value = parsed
        .as_ref()
        .and_then(|p| p.fields.first())
        .and_then(|field| ctx.instance.and_then(|instance| instance.get(field)))
        .filter(|value| !value.is_null())
        .cloned();

    match parsed {
        Some(parsed) => ForeignKeyConstraintError {
            reltype,
            table: Some(parsed.table),
            fields: Some(parsed.fields),
            value,
            index: Some(parsed.index),
            parent: err,
        },
        None => ForeignKeyConstraintError {
            reltype,
            table: None,
            fields: None,
            value: None,
            index: None,
            parent: err,
        },
    }
}

fn parse_foreign_key(message: &str) -> Option<ParsedForeignKey> {
    [&*FOREIGN_KEY_BACKTICK, &*FOREIGN_KEY_DOUBLE_QUOTE]
        .into_iter()
        .find_map(|pattern| {
            let captures = pattern.constraint.captures(message)?;
            Some(ParsedForeignKey {
                index: captures.get(1)?.as_str().to_string(),
                fields: pattern
                    .field_separator
                    .split(captures.get(2)?.as_str())
                    .map(str::to_string)
                    .collect(),
                table: captures.get(3)?.as_str().to_string(),
            })
        })
}
