//! Amazon Keyspaces resource definitions

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::Expr;

/// A resource destined for the template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Keyspace(KeyspaceResource),
    Table(TableResource),
}

impl Resource {
    /// CloudFormation resource type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::Keyspace(_) => "AWS::Cassandra::Keyspace",
            Resource::Table(_) => "AWS::Cassandra::Table",
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Type", self.type_name())?;
        match self {
            Resource::Keyspace(keyspace) => map.serialize_entry("Properties", keyspace)?,
            Resource::Table(table) => map.serialize_entry("Properties", table)?,
        }
        map.end()
    }
}

/// `AWS::Cassandra::Keyspace`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyspaceResource {
    pub keyspace_name: String,
}

/// `AWS::Cassandra::Table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableResource {
    pub keyspace_name: Expr,
    pub table_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub partition_key_columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clustering_key_columns: Vec<ClusteringKeyColumn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regular_columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
}

impl TableResource {
    pub fn new(keyspace_name: Expr, table_name: impl Into<String>) -> Self {
        Self {
            keyspace_name,
            table_name: table_name.into(),
            partition_key_columns: Vec::new(),
            clustering_key_columns: Vec::new(),
            regular_columns: Vec::new(),
            billing_mode: None,
        }
    }
}

/// Column name and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    pub column_name: String,
    pub column_type: Expr,
}

/// Clustering column with its optional sort direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusteringKeyColumn {
    pub column: Column,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingModeKind {
    OnDemand,
    Provisioned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillingMode {
    pub mode: BillingModeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

impl BillingMode {
    pub fn on_demand() -> Self {
        Self {
            mode: BillingModeKind::OnDemand,
            provisioned_throughput: None,
        }
    }

    pub fn provisioned(read_capacity_units: i32, write_capacity_units: i32) -> Self {
        Self {
            mode: BillingModeKind::Provisioned,
            provisioned_throughput: Some(ProvisionedThroughput {
                read_capacity_units,
                write_capacity_units,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    pub read_capacity_units: i32,
    pub write_capacity_units: i32,
}
