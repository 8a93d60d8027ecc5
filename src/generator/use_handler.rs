//! USE statement handling

use tracing::debug;

use crate::error::Result;
use crate::model::UseStatement;

use super::GeneratorContext;

/// Select the keyspace for later unqualified table names.
///
/// The keyspace does not need to exist; USE only affects name resolution.
pub fn handle(context: &mut GeneratorContext, statement: &UseStatement) -> Result<()> {
    debug!("Using keyspace '{}'", statement.keyspace);
    context.used_keyspace = Some(statement.keyspace.clone());
    Ok(())
}
