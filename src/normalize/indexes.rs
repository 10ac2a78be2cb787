use serde::Serialize;

use crate::results::{CustomDbRow, ResultSet};
use crate::types::RowValues;

/// Name MySQL reserves for the primary key index.
pub const PRIMARY_INDEX_NAME: &str = "PRIMARY";

/// One column of an index, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexField {
    pub attribute: String,
    /// Prefix length for partially indexed columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    /// `ASC` when the column is stored ascending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// An index as reported by `SHOW INDEX`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub table: Option<String>,
    pub primary: bool,
    pub unique: bool,
    #[serde(rename = "type")]
    pub index_type: Option<String>,
    pub fields: Vec<IndexField>,
}

struct Group {
    descriptor: IndexDescriptor,
    slots: Vec<Option<IndexField>>,
}

/// Group `SHOW INDEX` rows (one per index column) into index descriptors.
///
/// Groups keep first-seen order. Within a group each row lands in slot
/// `Seq_in_index - 1`, so input row order does not matter and a repeated
/// sequence number replaces the earlier column. Slots no row filled are dropped.
#[must_use]
pub fn aggregate_indexes(rows: &ResultSet) -> Vec<IndexDescriptor> {
    let mut groups: Vec<Group> = Vec::new();

    for row in &rows.results {
        let name = row.get("Key_name").map(RowValues::to_string).unwrap_or_default();
        let position = match groups.iter().position(|g| g.descriptor.name == name) {
            Some(position) => position,
            None => {
                groups.push(Group {
                    descriptor: descriptor_for(name, row),
                    slots: Vec::new(),
                });
                groups.len() - 1
            }
        };

        let Some(slot) = sequence_slot(row) else {
            continue;
        };
        let group = &mut groups[position];
        if group.slots.len() <= slot {
            group.slots.resize(slot + 1, None);
        }
        group.slots[slot] = Some(index_field(row));
    }

    groups
        .into_iter()
        .map(|group| IndexDescriptor {
            fields: group.slots.into_iter().flatten().collect(),
            ..group.descriptor
        })
        .collect()
}

fn descriptor_for(name: String, row: &CustomDbRow) -> IndexDescriptor {
    IndexDescriptor {
        primary: name == PRIMARY_INDEX_NAME,
        unique: !is_non_unique(row.get("Non_unique")),
        table: row.text("Table").map(str::to_string),
        index_type: row.text("Index_type").map(str::to_string),
        fields: Vec::new(),
        name,
    }
}

fn sequence_slot(row: &CustomDbRow) -> Option<usize> {
    let seq = row.get("Seq_in_index")?.to_i64_lossy()?;
    usize::try_from(seq).ok()?.checked_sub(1)
}

fn index_field(row: &CustomDbRow) -> IndexField {
    IndexField {
        attribute: row
            .get("Column_name")
            .map(RowValues::to_string)
            .unwrap_or_default(),
        length: row
            .get("Sub_part")
            .and_then(RowValues::to_i64_lossy)
            .filter(|len| *len != 0),
        order: (row.text("Collation") == Some("A")).then(|| "ASC".to_string()),
    }
}

fn is_non_unique(value: Option<&RowValues>) -> bool {
    value.and_then(RowValues::to_i64_lossy) == Some(1)
}
