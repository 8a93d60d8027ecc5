//! CloudFormation template model and rendering

mod expr;
mod resources;

use serde::ser::Serializer;
use serde::Serialize;

use crate::error::{ConvertError, Result};

pub use expr::Expr;
pub use resources::{
    BillingMode, BillingModeKind, ClusteringKeyColumn, Column, KeyspaceResource,
    ProvisionedThroughput, Resource, TableResource,
};

/// The set of resources produced by one conversion, in creation order
#[derive(Debug, Clone, Default)]
pub struct Template {
    resources: Vec<(String, Resource)>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under a logical id unique within the template.
    pub fn add_resource(&mut self, logical_id: impl Into<String>, resource: Resource) -> Result<()> {
        let logical_id = logical_id.into();
        if self.resource(&logical_id).is_some() {
            return Err(ConvertError::Render {
                message: format!("duplicate logical id '{}'", logical_id),
            });
        }
        self.resources.push((logical_id, resource));
        Ok(())
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|(id, _)| id == logical_id)
            .map(|(_, resource)| resource)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources.iter().map(|(id, resource)| (id.as_str(), resource))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Render the template as pretty-printed JSON.
    pub fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

struct ResourceMap<'a>(&'a [(String, Resource)]);

impl Serialize for ResourceMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, resource)| (id, resource)))
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("Resources", &ResourceMap(&self.resources))?;
        map.end()
    }
}
