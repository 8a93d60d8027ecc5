//! Token-based parsing of USE and CREATE KEYSPACE statements
//!
//! ## Supported Syntax
//!
//! ```sql
//! USE ks
//! CREATE KEYSPACE [IF NOT EXISTS] ks
//!     WITH replication = {'class': 'SingleRegionStrategy'}
//!     AND tags = {'team': 'payments'}
//! ```

use crate::error::Result;
use crate::model::{KeyspaceProperties, Statement};

use super::property_parser::parse_property;
use super::token_parser_base::TokenParser;

/// Parse an optional `IF NOT EXISTS`.
pub fn parse_if_not_exists(parser: &mut TokenParser) -> Result<bool> {
    if parser.consume_word_ci("IF") {
        parser.expect_word_ci("NOT")?;
        parser.expect_word_ci("EXISTS")?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Parse the remainder of a USE statement (after `USE`).
pub fn parse_use_tokens(parser: &mut TokenParser) -> Result<Statement> {
    let keyspace = parser.parse_identifier()?;
    parser.expect_end()?;
    Ok(Statement::use_keyspace(keyspace))
}

/// Parse the remainder of a CREATE KEYSPACE statement (after `CREATE KEYSPACE`).
pub fn parse_create_keyspace_tokens(parser: &mut TokenParser) -> Result<Statement> {
    let if_not_exists = parse_if_not_exists(parser)?;
    let keyspace = parser.parse_identifier()?;

    let mut properties = KeyspaceProperties::new();
    if parser.consume_word_ci("WITH") {
        loop {
            parse_property(parser, &mut properties.common)?;
            if !parser.consume_word_ci("AND") {
                break;
            }
        }
    }
    parser.expect_end()?;

    Statement::create_keyspace(keyspace, if_not_exists, properties)
}
