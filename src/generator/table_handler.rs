//! CREATE TABLE statement handling
//!
//! Columns are emitted in three groups: partition key columns and clustering
//! key columns in key order, then every remaining column in declaration
//! order. Each declared column lands in exactly one group.

use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::model::{
    CqlType, CreateTableStatement, CustomProperties, Identifier, OptionMap, PropertyMap,
    PropertyValue, TableProperties,
};
use crate::template::{
    BillingMode, ClusteringKeyColumn, Column, Expr, Resource, TableResource,
};

use super::diagnostics::fatal;
use super::GeneratorContext;

pub fn handle(context: &mut GeneratorContext, statement: &CreateTableStatement) -> Result<()> {
    let keyspace = resolve_keyspace(context, statement.keyspace.as_ref())?;
    let key = (keyspace.clone(), statement.table.clone());

    if context.created_tables.contains_key(&key) {
        if statement.if_not_exists {
            info!(
                "Skipping table '{}.{}': already created and IF NOT EXISTS specified",
                keyspace, statement.table
            );
            return Ok(());
        }
        return fatal(
            "Cannot create more than one table with the same name unless IF NOT EXISTS is specified",
        );
    }

    let logical_id = format!("Table{}", context.created_tables.len() + 1);
    let keyspace_name = keyspace_name_or_ref(context, &keyspace)?;
    let mut table = TableResource::new(keyspace_name, statement.table.to_string());

    let properties = &statement.properties;
    process_columns(context, &keyspace, properties, &mut table)?;
    process_regular_properties(context, properties.common.regular())?;
    if let Some(custom) = properties.common.custom() {
        process_custom_properties(custom, &mut table)?;
    }
    if properties.compact_storage() {
        context
            .diagnostics
            .warn("COMPACT STORAGE is not applicable to Keyspaces")?;
    }

    context
        .template
        .add_resource(logical_id.clone(), Resource::Table(table))?;
    context.created_tables.insert(key, logical_id);
    Ok(())
}

fn resolve_keyspace(context: &GeneratorContext, keyspace: Option<&Identifier>) -> Result<Identifier> {
    match keyspace.or(context.used_keyspace.as_ref()) {
        Some(keyspace) => Ok(keyspace.clone()),
        None => fatal("No keyspace specified for table"),
    }
}

/// Reference the keyspace resource if this script created it, else use its name.
fn keyspace_name_or_ref(context: &mut GeneratorContext, keyspace: &Identifier) -> Result<Expr> {
    if let Some(logical_id) = context.created_keyspaces.get(keyspace) {
        return Ok(Expr::reference(logical_id.clone()));
    }
    context.diagnostics.warn(format!(
        "Attempted to create table in keyspace '{}' before creating it first",
        keyspace
    ))?;
    Ok(Expr::literal(keyspace.to_string()))
}

fn process_columns(
    context: &GeneratorContext,
    keyspace: &Identifier,
    properties: &TableProperties,
    table: &mut TableResource,
) -> Result<()> {
    let mut remaining = properties.columns().clone();

    for name in properties.partition_key() {
        let column_type = take_column(&mut remaining, name)?;
        table
            .partition_key_columns
            .push(column(context, keyspace, name, &column_type)?);
    }

    for name in properties.clustering_key() {
        let column_type = take_column(&mut remaining, name)?;
        table.clustering_key_columns.push(ClusteringKeyColumn {
            column: column(context, keyspace, name, &column_type)?,
            order_by: properties
                .clustering_order(name)
                .map(|order| order.as_str().to_string()),
        });
    }

    if !properties.static_columns().is_empty() {
        return fatal("Static columns are not supported by Keyspaces yet");
    }

    for (name, column_type) in remaining.iter() {
        table
            .regular_columns
            .push(column(context, keyspace, name, column_type)?);
    }
    Ok(())
}

fn take_column(remaining: &mut PropertyMap<Identifier, CqlType>, name: &Identifier) -> Result<CqlType> {
    remaining.remove(name).ok_or_else(|| {
        ConvertError::schema(format!("unknown column '{}' referenced in PRIMARY KEY", name))
    })
}

fn column(
    context: &GeneratorContext,
    keyspace: &Identifier,
    name: &Identifier,
    column_type: &CqlType,
) -> Result<Column> {
    Ok(Column {
        column_name: name.to_string(),
        column_type: type_name_or_ref(context, keyspace, column_type)?,
    })
}

/// Resolve a column type to the type name expression used by the template.
fn type_name_or_ref(context: &GeneratorContext, keyspace: &Identifier, column_type: &CqlType) -> Result<Expr> {
    match column_type {
        CqlType::Simple(name) => Ok(Expr::literal(name.clone())),
        CqlType::Composite {
            kind,
            element_types,
        } => {
            let elements = element_types
                .iter()
                .map(|element| type_name_or_ref(context, keyspace, element))
                .collect::<Result<Vec<_>>>()?;
            Ok(Expr::sub(
                format!("{}<${{Types}}>", kind),
                vec![("Types".to_string(), Expr::join(",", elements))],
            ))
        }
        CqlType::User {
            keyspace: type_keyspace,
            name,
        } => {
            if let Some(type_keyspace) = type_keyspace {
                if type_keyspace != keyspace {
                    return fatal(format!(
                        "Cannot reference user type '{}' in another keyspace '{}'",
                        name, type_keyspace
                    ));
                }
            }
            // Resolution is in place for when Keyspaces accepts user types.
            let type_name = match context.created_types.get(&(keyspace.clone(), name.clone())) {
                Some(logical_id) => Expr::select(1, Expr::split("|", Expr::reference(logical_id.clone()))),
                None => Expr::literal(name.to_string()),
            };
            debug!("User type '{}' resolves to {:?}", name, type_name);
            fatal("User types are not supported by Keyspaces yet")
        }
        CqlType::Custom(_) => fatal("Custom types are not supported by Keyspaces"),
    }
}

fn process_regular_properties(
    context: &mut GeneratorContext,
    properties: &PropertyMap<Identifier, PropertyValue>,
) -> Result<()> {
    for (key, value) in properties.iter() {
        match key.as_str() {
            "comment" => {
                if value.as_text().is_none() {
                    return fatal("Invalid value for property 'comment'; it should be a string");
                }
                return fatal("Property 'comment' currently cannot be set via CloudFormation");
            }
            "default_time_to_live" => {
                if parse_int(value.as_text()).is_none() {
                    return fatal(
                        "Invalid value for property 'default_time_to_live'; it should be an integer",
                    );
                }
                return fatal("Property 'default_time_to_live' is not supported by Keyspaces yet");
            }
            "tags" => {
                if value.as_map().is_none() {
                    return fatal("Invalid value for property 'tags'; it should be a map");
                }
                return fatal("Property 'tags' currently cannot be set via CloudFormation");
            }
            _ => context
                .diagnostics
                .warn(format!("Property '{}' is not applicable to Keyspaces", key))?,
        }
    }
    Ok(())
}

fn process_custom_properties(custom: &CustomProperties, table: &mut TableResource) -> Result<()> {
    for (key, options) in custom.iter() {
        match key.as_str() {
            "capacity_mode" => table.billing_mode = Some(capacity_mode(options.clone())?),
            "point_in_time_recovery" => point_in_time_recovery(options.clone())?,
            _ => {
                return fatal(format!(
                    "Custom property '{}' is not recognized by Keyspaces",
                    key
                ))
            }
        }
    }
    Ok(())
}

fn capacity_mode(mut options: OptionMap) -> Result<BillingMode> {
    let Some(throughput_mode) = options.remove(&"throughput_mode".to_string()) else {
        return fatal("Missing required option 'throughput_mode' of custom property 'capacity_mode'");
    };

    match throughput_mode.as_str() {
        "PAY_PER_REQUEST" => {
            reject_remaining_options(&options, "for capacity mode throughput mode 'PAY_PER_REQUEST'")?;
            Ok(BillingMode::on_demand())
        }
        "PROVISIONED" => {
            let read_capacity_units = capacity_units(&mut options, "read_capacity_units")?;
            let write_capacity_units = capacity_units(&mut options, "write_capacity_units")?;
            reject_remaining_options(&options, "for capacity mode throughput mode 'PROVISIONED'")?;
            Ok(BillingMode::provisioned(read_capacity_units, write_capacity_units))
        }
        other => fatal(format!(
            "Capacity mode throughput mode '{}' is not recognized by Keyspaces",
            other
        )),
    }
}

fn capacity_units(options: &mut OptionMap, name: &str) -> Result<i32> {
    match options.remove(&name.to_string()) {
        None => fatal(format!(
            "Missing required option '{}' for capacity mode throughput mode 'PROVISIONED'",
            name
        )),
        Some(value) => match parse_int(Some(value.as_str())) {
            Some(units) => Ok(units),
            None => fatal(format!(
                "Invalid value for option '{}' of custom property 'capacity_mode'; it should be an integer",
                name
            )),
        },
    }
}

fn point_in_time_recovery(mut options: OptionMap) -> Result<()> {
    let enabled = match options.remove(&"status".to_string()).as_deref() {
        None => {
            return fatal(
                "Missing required option 'status' of custom property 'point_in_time_recovery'",
            )
        }
        Some("enabled") => true,
        Some("disabled") => false,
        Some(status) => {
            return fatal(format!(
                "Point in time recovery status '{}' is not recognized by Keyspaces",
                status
            ))
        }
    };
    reject_remaining_options(&options, "of custom property 'point_in_time_recovery'")?;
    debug!("Point in time recovery requested: enabled={}", enabled);
    fatal("Custom property 'point_in_time_recovery' currently cannot be set via CloudFormation")
}

fn reject_remaining_options(options: &OptionMap, context: &str) -> Result<()> {
    match options.first_key() {
        Some(option) => fatal(format!("Unrecognized option '{}' {}", option, context)),
        None => Ok(()),
    }
}

fn parse_int(text: Option<&str>) -> Option<i32> {
    text.and_then(|text| text.parse::<i32>().ok())
}
