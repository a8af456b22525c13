//! Schema registry
//!
//! Maps filterable field names to their declared data types. A registry is
//! validated once when it is built and is read-only afterwards, so a single
//! instance can be shared by any number of concurrent compile calls.

use super::data_type::DataType;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Per-tenant field name → data type table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, String>", into = "BTreeMap<String, String>")]
pub struct SchemaRegistry {
    fields: HashMap<String, DataType>,
}

impl SchemaRegistry {
    /// Build a registry from declared type tags.
    ///
    /// Fails on the first field whose tag is not one of
    /// `int`, `float`, `string`, `datetime`, `boolean`.
    pub fn build<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (name, tag) in fields {
            let name = name.into();
            let dtype = DataType::parse_for(&name, tag.as_ref())?;
            map.insert(name, dtype);
        }
        log::debug!("built schema registry with {} fields", map.len());
        Ok(Self { fields: map })
    }

    /// Build a registry from already-typed fields
    pub fn from_types<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, DataType)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Get the declared type of a field
    pub fn lookup(&self, field: &str) -> Option<DataType> {
        self.fields.get(field).copied()
    }

    /// Check if a field is declared
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, DataType)> {
        let mut entries: Vec<_> = self.fields.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Field name → type tag, sorted by name
    pub fn type_names(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.as_str().to_string()))
            .collect()
    }
}

impl TryFrom<HashMap<String, String>> for SchemaRegistry {
    type Error = CoreError;

    fn try_from(fields: HashMap<String, String>) -> Result<Self> {
        Self::build(fields)
    }
}

impl From<SchemaRegistry> for BTreeMap<String, String> {
    fn from(schema: SchemaRegistry) -> Self {
        schema.type_names()
    }
}
