use std::borrow::Cow;
use std::collections::HashMap;

mod scanner;

use scanner::{
    State, closes_quote, is_block_comment_end, is_block_comment_start, is_line_comment_start,
    scan_key,
};

use crate::types::RowValues;

/// Marker syntax recognised in bind templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindMarker {
    /// `:name` / `:1`; `::` emits a literal `:`.
    #[default]
    Colon,
    /// `$name` / `$1`; `$$` emits a literal `$`.
    Dollar,
}

impl BindMarker {
    fn byte(self) -> u8 {
        match self {
            BindMarker::Colon => b':',
            BindMarker::Dollar => b'$',
        }
    }
}

/// Values to bind, looked up by marker key.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValues {
    /// Keys are names; all-digit keys never match.
    Named(HashMap<String, RowValues>),
    /// Keys are 1-based positions (`[1-9][0-9]*`).
    Positional(Vec<RowValues>),
}

impl BindValues {
    fn lookup(&self, key: &str) -> Option<&RowValues> {
        match self {
            BindValues::Named(map) => {
                if key.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    map.get(key)
                }
            }
            BindValues::Positional(list) => {
                if key.starts_with('0') {
                    return None;
                }
                let position: usize = key.parse().ok()?;
                list.get(position.checked_sub(1)?)
            }
        }
    }
}

impl<K: Into<String>> FromIterator<(K, RowValues)> for BindValues {
    fn from_iter<T: IntoIterator<Item = (K, RowValues)>>(iter: T) -> Self {
        BindValues::Named(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Vec<RowValues>> for BindValues {
    fn from(values: Vec<RowValues>) -> Self {
        BindValues::Positional(values)
    }
}

/// Rewrite `:name` markers into `?` placeholders.
///
/// Returns the rewritten SQL and the bind list in marker order. Markers with no
/// value are left in place and not counted. The bind list is `None` when no
/// marker resolved, so the caller can take the parameter-less path.
///
/// This is not a plain text replace: markers inside string literals, quoted
/// identifiers and comments are never rewritten, so `WHERE note = ':a'` keeps
/// its literal and binds nothing.
/// ```rust
/// use sql_query_adapter::prelude::*;
///
/// let values: BindValues = [("a", RowValues::Int(1))].into_iter().collect();
/// let (sql, binds) = format_bind_parameters("SELECT :a, :b", &values);
/// assert_eq!(sql, "SELECT ?, :b");
/// assert_eq!(binds, Some(vec![RowValues::Int(1)]));
/// ```
#[must_use]
pub fn format_bind_parameters<'a>(
    sql: &'a str,
    values: &BindValues,
) -> (Cow<'a, str>, Option<Vec<RowValues>>) {
    format_bind_parameters_with(sql, values, BindMarker::Colon)
}

/// Same as [`format_bind_parameters`] with an explicit marker syntax.
///
/// Markers inside quoted strings, backticked identifiers and comments are left
/// alone.
#[must_use]
pub fn format_bind_parameters_with<'a>(
    sql: &'a str,
    values: &BindValues,
    marker: BindMarker,
) -> (Cow<'a, str>, Option<Vec<RowValues>>) {
    let marker_byte = marker.byte();
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut binds = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::Backticked,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment;
                    idx += 1;
                }
                _ if b == marker_byte => {
                    if bytes.get(idx + 1) == Some(&marker_byte) {
                        let buf = out.get_or_insert_with(String::new);
                        buf.push_str(&sql[copied..=idx]);
                        copied = idx + 2;
                        idx += 2;
                        continue;
                    }
                    if let Some((key_end, key)) = scan_key(bytes, idx + 1) {
                        if let Some(value) = values.lookup(key) {
                            let buf = out.get_or_insert_with(String::new);
                            buf.push_str(&sql[copied..idx]);
                            buf.push('?');
                            binds.push(value.clone());
                            copied = key_end;
                        }
                        idx = key_end;
                        continue;
                    }
                }
                _ => {}
            },
            State::SingleQuoted | State::DoubleQuoted | State::Backticked => {
                let quote = match state {
                    State::SingleQuoted => b'\'',
                    State::DoubleQuoted => b'"',
                    _ => b'`',
                };
                let (closed, at) = closes_quote(bytes, idx, quote);
                if closed {
                    state = State::Normal;
                }
                idx = at;
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    let binds = if binds.is_empty() { None } else { Some(binds) };
    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            (Cow::Owned(buf), binds)
        }
        None => (Cow::Borrowed(sql), binds),
    }
}
