//! Parsed CQL statements

use crate::error::Result;

use super::{Identifier, KeyspaceProperties, TableProperties};

/// A statement supported by the converter.
///
/// Constructors validate the property payload, so a `Statement` value is
/// always structurally sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Use(UseStatement),
    CreateKeyspace(CreateKeyspaceStatement),
    CreateTable(CreateTableStatement),
}

/// `USE ks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    pub keyspace: Identifier,
}

/// `CREATE KEYSPACE [IF NOT EXISTS] ks WITH ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeyspaceStatement {
    pub keyspace: Identifier,
    pub if_not_exists: bool,
    pub properties: KeyspaceProperties,
}

/// `CREATE TABLE [IF NOT EXISTS] [ks.]name (...) [WITH ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTableStatement {
    pub keyspace: Option<Identifier>,
    pub table: Identifier,
    pub if_not_exists: bool,
    pub properties: TableProperties,
}

impl Statement {
    pub fn use_keyspace(keyspace: Identifier) -> Self {
        Statement::Use(UseStatement { keyspace })
    }

    pub fn create_keyspace(
        keyspace: Identifier,
        if_not_exists: bool,
        properties: KeyspaceProperties,
    ) -> Result<Self> {
        properties.validate()?;
        Ok(Statement::CreateKeyspace(CreateKeyspaceStatement {
            keyspace,
            if_not_exists,
            properties,
        }))
    }

    pub fn create_table(
        keyspace: Option<Identifier>,
        table: Identifier,
        if_not_exists: bool,
        properties: TableProperties,
    ) -> Result<Self> {
        properties.validate()?;
        Ok(Statement::CreateTable(CreateTableStatement {
            keyspace,
            table,
            if_not_exists,
            properties,
        }))
    }

    /// Short description used in log output
    pub fn describe(&self) -> String {
        match self {
            Statement::Use(s) => format!("USE '{}'", s.keyspace),
            Statement::CreateKeyspace(s) => format!("CREATE KEYSPACE '{}'", s.keyspace),
            Statement::CreateTable(s) => match &s.keyspace {
                Some(keyspace) => format!("CREATE TABLE '{}.{}'", keyspace, s.table),
                None => format!("CREATE TABLE '{}'", s.table),
            },
        }
    }
}
