//! Property containers and statement property payloads
//!
//! `TableProperties` is built incrementally by the parser and rejects
//! structurally invalid definitions as soon as they are added, so a
//! constructed statement never carries an inconsistent payload.

use std::fmt;

use crate::error::{ConvertError, Result};

use super::{CqlType, Identifier};

/// Insertion-ordered map that rejects duplicate keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for PropertyMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq + fmt::Display, V> PropertyMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, failing if the key was already defined.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        if self.contains_key(&key) {
            return Err(ConvertError::schema(format!(
                "multiple definition for property '{}'",
                key
            )));
        }
        self.entries.push((key, value));
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a property, keeping the remaining entries in order.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K, V> IntoIterator for PropertyMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Options of a map-valued property, e.g. `replication` or a custom property.
pub type OptionMap = PropertyMap<String, String>;

/// The `CUSTOM_PROPERTIES` block: property name to its options.
pub type CustomProperties = PropertyMap<String, OptionMap>;

/// Value of a regular CQL property.
///
/// Constants (strings, numbers, booleans) are kept as their source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Map(OptionMap),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&OptionMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            PropertyValue::Text(_) => None,
        }
    }
}

/// Regular and custom properties shared by keyspaces and tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonProperties {
    regular: PropertyMap<Identifier, PropertyValue>,
    custom: Option<CustomProperties>,
}

impl CommonProperties {
    pub fn add_property(&mut self, key: Identifier, value: PropertyValue) -> Result<()> {
        self.regular.add(key, value)
    }

    pub fn define_custom_properties(&mut self, custom: CustomProperties) -> Result<()> {
        if self.custom.is_some() {
            return Err(ConvertError::schema(
                "multiple definition for property 'custom_properties'",
            ));
        }
        self.custom = Some(custom);
        Ok(())
    }

    pub fn regular(&self) -> &PropertyMap<Identifier, PropertyValue> {
        &self.regular
    }

    pub fn custom(&self) -> Option<&CustomProperties> {
        self.custom.as_ref()
    }
}

/// Properties of a `CREATE KEYSPACE` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyspaceProperties {
    pub common: CommonProperties,
}

impl KeyspaceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Direction declared in `CLUSTERING ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusteringOrder {
    Asc,
    Desc,
}

impl ClusteringOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusteringOrder::Asc => "ASC",
            ClusteringOrder::Desc => "DESC",
        }
    }
}

/// Properties and structure of a `CREATE TABLE` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableProperties {
    pub common: CommonProperties,
    columns: PropertyMap<Identifier, CqlType>,
    static_columns: Vec<Identifier>,
    partition_key: Vec<Identifier>,
    clustering_key: Vec<Identifier>,
    clustering_orders: Vec<(Identifier, ClusteringOrder)>,
    primary_key_defined: bool,
    clustering_order_defined: bool,
    compact_storage: bool,
}

impl TableProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the invariants that can only be judged once the definition is complete.
    pub fn validate(&self) -> Result<()> {
        if self.partition_key.is_empty() {
            return Err(ConvertError::schema(
                "no PRIMARY KEY specified; exactly one required",
            ));
        }
        if self.clustering_key.is_empty() && !self.static_columns.is_empty() {
            return Err(ConvertError::schema(
                "static columns not allowed if table has no clustering column",
            ));
        }
        Ok(())
    }

    pub fn add_column(&mut self, name: Identifier, column_type: CqlType) -> Result<()> {
        if self.columns.contains_key(&name) {
            return Err(ConvertError::schema(format!(
                "multiple definition of column '{}'",
                name
            )));
        }
        self.columns.add(name, column_type)
    }

    pub fn add_static_column(&mut self, name: Identifier) -> Result<()> {
        if !self.columns.contains_key(&name) {
            return Err(ConvertError::schema(format!(
                "unknown column '{}' declared STATIC",
                name
            )));
        }
        if self.is_key_column(&name) {
            return Err(ConvertError::schema(format!(
                "static column '{}' referenced in PRIMARY KEY",
                name
            )));
        }
        if !self.static_columns.contains(&name) {
            self.static_columns.push(name);
        }
        Ok(())
    }

    pub fn start_primary_key(&mut self) -> Result<()> {
        if self.primary_key_defined {
            return Err(ConvertError::schema(
                "multiple definition of PRIMARY KEY; exactly one required",
            ));
        }
        self.primary_key_defined = true;
        Ok(())
    }

    pub fn add_partition_key_column(&mut self, name: Identifier) -> Result<()> {
        self.check_key_column(&name)?;
        self.partition_key.push(name);
        Ok(())
    }

    pub fn add_clustering_key_column(&mut self, name: Identifier) -> Result<()> {
        self.check_key_column(&name)?;
        self.clustering_key.push(name);
        Ok(())
    }

    fn check_key_column(&self, name: &Identifier) -> Result<()> {
        if !self.columns.contains_key(name) {
            return Err(ConvertError::schema(format!(
                "unknown column '{}' referenced in PRIMARY KEY",
                name
            )));
        }
        if self.static_columns.contains(name) {
            return Err(ConvertError::schema(format!(
                "static column '{}' referenced in PRIMARY KEY",
                name
            )));
        }
        if self.is_key_column(name) {
            return Err(ConvertError::schema(format!(
                "column '{}' referenced more than once in PRIMARY KEY",
                name
            )));
        }
        Ok(())
    }

    fn is_key_column(&self, name: &Identifier) -> bool {
        self.partition_key.contains(name) || self.clustering_key.contains(name)
    }

    pub fn start_clustering_order(&mut self) -> Result<()> {
        if self.clustering_order_defined {
            return Err(ConvertError::schema("multiple definition of CLUSTERING ORDER"));
        }
        self.clustering_order_defined = true;
        Ok(())
    }

    /// Assign the order of the next clustering column.
    ///
    /// Orders must be given for a prefix of the clustering key, in key order.
    pub fn add_clustering_order(&mut self, name: Identifier, order: ClusteringOrder) -> Result<()> {
        let Some(position) = self.clustering_key.iter().position(|c| *c == name) else {
            return Err(ConvertError::schema(
                "only clustering key columns can be referenced in CLUSTERING ORDER",
            ));
        };
        if self.clustering_orders.iter().any(|(c, _)| *c == name) {
            return Err(ConvertError::schema(format!(
                "column '{}' referenced more than once in CLUSTERING ORDER",
                name
            )));
        }
        let assigned = self.clustering_orders.len();
        if assigned != position {
            return Err(ConvertError::schema(format!(
                "missing CLUSTERING ORDER for column '{}'",
                self.clustering_key[assigned]
            )));
        }
        self.clustering_orders.push((name, order));
        Ok(())
    }

    pub fn define_compact_storage(&mut self) -> Result<()> {
        if self.compact_storage {
            return Err(ConvertError::schema("multiple definition of COMPACT STORAGE"));
        }
        self.compact_storage = true;
        Ok(())
    }

    pub fn columns(&self) -> &PropertyMap<Identifier, CqlType> {
        &self.columns
    }

    pub fn static_columns(&self) -> &[Identifier] {
        &self.static_columns
    }

    pub fn partition_key(&self) -> &[Identifier] {
        &self.partition_key
    }

    pub fn clustering_key(&self) -> &[Identifier] {
        &self.clustering_key
    }

    pub fn clustering_order(&self, name: &Identifier) -> Option<ClusteringOrder> {
        self.clustering_orders
            .iter()
            .find(|(c, _)| c == name)
            .map(|(_, order)| *order)
    }

    pub fn compact_storage(&self) -> bool {
        self.compact_storage
    }
}
