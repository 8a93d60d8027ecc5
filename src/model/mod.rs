//! CQL statement model

mod data_type;
mod identifier;
mod properties;
mod statement;

pub use data_type::CqlType;
pub use identifier::Identifier;
pub use properties::{
    ClusteringOrder, CommonProperties, CustomProperties, KeyspaceProperties, OptionMap,
    PropertyMap, PropertyValue, TableProperties,
};
pub use statement::{CreateKeyspaceStatement, CreateTableStatement, Statement, UseStatement};
