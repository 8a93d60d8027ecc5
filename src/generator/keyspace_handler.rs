//! CREATE KEYSPACE statement handling

use tracing::{debug, info};

use crate::error::Result;
use crate::model::{CreateKeyspaceStatement, CustomProperties, Identifier, PropertyMap, PropertyValue};
use crate::template::{KeyspaceResource, Resource};

use super::diagnostics::fatal;
use super::GeneratorContext;

/// Replication class understood by Amazon Keyspaces
const SINGLE_REGION_STRATEGY: &str = "SingleRegionStrategy";

pub fn handle(context: &mut GeneratorContext, statement: &CreateKeyspaceStatement) -> Result<()> {
    if context.created_keyspaces.contains_key(&statement.keyspace) {
        if statement.if_not_exists {
            info!(
                "Skipping keyspace '{}': already created and IF NOT EXISTS specified",
                statement.keyspace
            );
            return Ok(());
        }
        return fatal(
            "Cannot create more than one keyspace with the same name unless IF NOT EXISTS is specified",
        );
    }

    let logical_id = format!("Keyspace{}", context.created_keyspaces.len() + 1);
    let keyspace = KeyspaceResource {
        keyspace_name: statement.keyspace.to_string(),
    };

    process_regular_properties(context, statement.properties.common.regular())?;
    process_custom_properties(statement.properties.common.custom())?;

    context
        .template
        .add_resource(logical_id.clone(), Resource::Keyspace(keyspace))?;
    context
        .created_keyspaces
        .insert(statement.keyspace.clone(), logical_id);
    Ok(())
}

fn process_regular_properties(
    context: &mut GeneratorContext,
    properties: &PropertyMap<Identifier, PropertyValue>,
) -> Result<()> {
    if !properties.contains_key(&Identifier::from("replication")) {
        return fatal("Missing required property 'replication'");
    }

    for (key, value) in properties.iter() {
        match key.as_str() {
            "replication" => process_replication(context, value)?,
            "tags" => {
                let Some(tags) = value.as_map() else {
                    return fatal("Invalid value for property 'tags'; it should be a map");
                };
                debug!("Keyspace declares {} tag(s)", tags.len());
                return fatal("Property 'tags' currently cannot be set via CloudFormation");
            }
            _ => context
                .diagnostics
                .warn(format!("Property '{}' is not applicable to Keyspaces", key))?,
        }
    }
    Ok(())
}

fn process_replication(context: &mut GeneratorContext, value: &PropertyValue) -> Result<()> {
    let Some(replication) = value.as_map() else {
        return fatal("Invalid value for property 'replication'; it should be a map");
    };
    let mut replication = replication.clone();

    match replication.remove(&"class".to_string()) {
        None => fatal("Missing required option 'class' of property 'replication'"),
        Some(class) if class == SINGLE_REGION_STRATEGY => match replication.first_key() {
            Some(option) => fatal(format!(
                "Unrecognized option '{}' for replication class '{}'",
                option, SINGLE_REGION_STRATEGY
            )),
            None => Ok(()),
        },
        Some(class) => context.diagnostics.warn(format!(
            "Replication class '{}' is not applicable to Keyspaces",
            class
        )),
    }
}

fn process_custom_properties(custom: Option<&CustomProperties>) -> Result<()> {
    if custom.is_some() {
        return fatal("Custom properties are not supported for keyspace yet");
    }
    Ok(())
}
