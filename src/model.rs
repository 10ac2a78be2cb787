//! Model metadata and instances handed in by the entity layer.

use std::collections::BTreeMap;

use crate::types::RowValues;

/// A declared unique key of a model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UniqueKey {
    /// Attribute names in key order.
    pub fields: Vec<String>,
    /// Custom violation message.
    pub msg: Option<String>,
}

impl UniqueKey {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            msg: None,
        }
    }

    #[must_use]
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }
}

/// What the adapter needs to know about the model a statement targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelDefinition {
    pub name: String,
    pub primary_key_attribute: Option<String>,
    /// Column name of the primary key when it differs from the attribute name.
    pub primary_key_field: Option<String>,
    pub auto_increment_attribute: Option<String>,
    pub unique_keys: BTreeMap<String, UniqueKey>,
}

impl ModelDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declare an auto-increment primary key stored in a column of the same name.
    #[must_use]
    pub fn with_auto_increment_primary_key(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        self.primary_key_attribute = Some(attribute.clone());
        self.auto_increment_attribute = Some(attribute);
        self
    }

    #[must_use]
    pub fn with_primary_key_field(mut self, field: impl Into<String>) -> Self {
        self.primary_key_field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_unique_key(mut self, name: impl Into<String>, key: UniqueKey) -> Self {
        self.unique_keys.insert(name.into(), key);
        self
    }

    /// Column holding the primary key.
    #[must_use]
    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_key_field
            .as_deref()
            .or(self.primary_key_attribute.as_deref())
    }

    /// True when the auto-increment attribute is the primary key.
    #[must_use]
    pub fn has_auto_increment_primary_key(&self) -> bool {
        matches!(
            (&self.auto_increment_attribute, &self.primary_key_attribute),
            (Some(ai), Some(pk)) if ai == pk
        )
    }
}

/// Attribute values of a record being persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    values: BTreeMap<String, RowValues>,
}

impl Instance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<RowValues>) {
        self.values.insert(attribute.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&RowValues> {
        self.values.get(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, RowValues)> for Instance {
    fn from_iter<T: IntoIterator<Item = (K, RowValues)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
