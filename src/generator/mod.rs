//! Mapping of CQL statements to Amazon Keyspaces resources
//!
//! The `Generator` owns a `GeneratorContext` for exactly one conversion run.
//! Statements are handled strictly in script order because later statements
//! depend on what earlier ones registered (keyspaces, tables, the keyspace in
//! use). Any fatal diagnostic ends the run; there is no partial result.

mod diagnostics;
mod keyspace_handler;
mod table_handler;
mod use_handler;

use std::collections::HashMap;

use tracing::info;

use crate::error::Result;
use crate::model::{Identifier, Statement};
use crate::template::Template;

pub use diagnostics::Diagnostics;

/// Options affecting how diagnostics are treated
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratorOptions {
    /// Treat warnings as fatal errors
    pub strict: bool,
}

/// Mutable state threaded through every statement handler
#[derive(Debug, Default)]
pub struct GeneratorContext {
    pub template: Template,
    pub diagnostics: Diagnostics,
    /// Keyspace selected by the last USE statement
    pub used_keyspace: Option<Identifier>,
    /// Logical ids of created keyspaces
    pub created_keyspaces: HashMap<Identifier, String>,
    /// Logical ids of created user types, by (keyspace, type)
    pub created_types: HashMap<(Identifier, Identifier), String>,
    /// Logical ids of created tables, by (keyspace, table)
    pub created_tables: HashMap<(Identifier, Identifier), String>,
}

/// Converts a sequence of statements into a template
#[derive(Debug)]
pub struct Generator {
    context: GeneratorContext,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            context: GeneratorContext {
                diagnostics: Diagnostics::new(options.strict),
                ..GeneratorContext::default()
            },
        }
    }

    /// Map one statement, updating the registry.
    pub fn handle(&mut self, statement: &Statement) -> Result<()> {
        info!("Processing {} statement", statement.describe());
        match statement {
            Statement::Use(s) => use_handler::handle(&mut self.context, s),
            Statement::CreateKeyspace(s) => keyspace_handler::handle(&mut self.context, s),
            Statement::CreateTable(s) => table_handler::handle(&mut self.context, s),
        }
    }

    /// Render the accumulated resources.
    pub fn generate(&self) -> Result<String> {
        self.context.template.render()
    }

    pub fn template(&self) -> &Template {
        &self.context.template
    }

    pub fn used_keyspace(&self) -> Option<&Identifier> {
        self.context.used_keyspace.as_ref()
    }

    pub fn warnings(&self) -> &[String] {
        self.context.diagnostics.warnings()
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.context.diagnostics.into_warnings()
    }
}
