use crate::model::{Instance, ModelDefinition};
use crate::results::RawDriverResult;
use crate::types::RowValues;

/// What an insert produced, before the affected-row count is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteResult {
    /// Nothing to report (update without an instance, or no insert id).
    None,
    /// The attached instance, populated with the generated id on insert.
    Instance(Instance),
    /// Raw `LAST_INSERT_ID()`.
    InsertId(u64),
    /// One record per inserted row, holding the generated primary key.
    Generated(Vec<Instance>),
}

/// Compute the insert result from the driver payload.
pub(crate) fn insert_result(
    instance: Option<Instance>,
    model: Option<&ModelDefinition>,
    raw: &RawDriverResult,
) -> WriteResult {
    if let Some(mut instance) = instance {
        if let Some(attribute) = model.and_then(|m| m.auto_increment_attribute.as_deref()) {
            let id = raw
                .insert_id()
                .and_then(|id| i64::try_from(id).ok())
                .map_or(RowValues::Null, RowValues::Int);
            instance.set(attribute, id);
        }
        return WriteResult::Instance(instance);
    }

    let RawDriverResult::Ack(ack) = raw else {
        return WriteResult::None;
    };

    match model {
        Some(model) if model.has_auto_increment_primary_key() => {
            let Some(column) = model.primary_key_column() else {
                return WriteResult::InsertId(ack.insert_id);
            };
            let generated = (ack.insert_id..ack.insert_id.saturating_add(ack.affected_rows))
                .filter_map(|id| i64::try_from(id).ok())
                .map(|id| Instance::new().with(column, RowValues::Int(id)))
                .collect();
            WriteResult::Generated(generated)
        }
        _ => WriteResult::InsertId(ack.insert_id),
    }
}
