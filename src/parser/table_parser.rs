//! Token-based parsing of CREATE TABLE statements
//!
//! ## Supported Syntax
//!
//! ```sql
//! CREATE TABLE [IF NOT EXISTS] [ks.]name (
//!     id uuid PRIMARY KEY,
//!     ...
//! )
//!
//! CREATE TABLE ks.events (
//!     device text,
//!     day date,
//!     at timestamp,
//!     owner text STATIC,
//!     reading double,
//!     PRIMARY KEY ((device, day), at)
//! ) WITH CLUSTERING ORDER BY (at DESC)
//!   AND COMPACT STORAGE
//!   AND comment = 'readings'
//!   AND CUSTOM_PROPERTIES = {'capacity_mode': {'throughput_mode': 'PAY_PER_REQUEST'}};
//! ```

use sqlparser::tokenizer::Token;
use tracing::debug;

use crate::error::Result;
use crate::model::{ClusteringOrder, Statement, TableProperties};

use super::keyspace_parser::parse_if_not_exists;
use super::property_parser::parse_property;
use super::token_parser_base::TokenParser;
use super::type_parser::parse_type;

/// Parse the remainder of a CREATE TABLE statement (after `CREATE TABLE`).
pub fn parse_create_table_tokens(parser: &mut TokenParser) -> Result<Statement> {
    let if_not_exists = parse_if_not_exists(parser)?;
    let (keyspace, table) = parser.parse_qualified_name()?;

    let mut properties = TableProperties::new();
    parse_table_definition(parser, &mut properties)?;
    if parser.consume_word_ci("WITH") {
        loop {
            parse_table_option(parser, &mut properties)?;
            if !parser.consume_word_ci("AND") {
                break;
            }
        }
    }
    parser.expect_end()?;

    debug!(
        "Parsed table '{}' with {} column(s)",
        table,
        properties.columns().len()
    );
    Statement::create_table(keyspace, table, if_not_exists, properties)
}

/// Parse the parenthesized column and PRIMARY KEY definitions.
fn parse_table_definition(parser: &mut TokenParser, properties: &mut TableProperties) -> Result<()> {
    parser.expect_token(&Token::LParen)?;
    loop {
        if parser.consume_words_ci(&["PRIMARY", "KEY"]) {
            parse_primary_key_clause(parser, properties)?;
        } else {
            parse_column_definition(parser, properties)?;
        }
        if !parser.consume_token(&Token::Comma) {
            break;
        }
    }
    parser.expect_token(&Token::RParen)
}

/// `name type [STATIC] [PRIMARY KEY]`
fn parse_column_definition(parser: &mut TokenParser, properties: &mut TableProperties) -> Result<()> {
    let name = parser.parse_identifier()?;
    let column_type = parse_type(parser)?;
    properties.add_column(name.clone(), column_type)?;

    if parser.consume_word_ci("STATIC") {
        properties.add_static_column(name.clone())?;
    }
    if parser.consume_words_ci(&["PRIMARY", "KEY"]) {
        properties.start_primary_key()?;
        properties.add_partition_key_column(name)?;
    }
    Ok(())
}

/// `( pk | (pk1, pk2, ...) [, ck1, ck2, ...] )`
fn parse_primary_key_clause(parser: &mut TokenParser, properties: &mut TableProperties) -> Result<()> {
    properties.start_primary_key()?;
    parser.expect_token(&Token::LParen)?;

    if parser.consume_token(&Token::LParen) {
        loop {
            properties.add_partition_key_column(parser.parse_identifier()?)?;
            if !parser.consume_token(&Token::Comma) {
                break;
            }
        }
        parser.expect_token(&Token::RParen)?;
    } else {
        properties.add_partition_key_column(parser.parse_identifier()?)?;
    }

    while parser.consume_token(&Token::Comma) {
        properties.add_clustering_key_column(parser.parse_identifier()?)?;
    }
    parser.expect_token(&Token::RParen)
}

/// One table option after WITH.
fn parse_table_option(parser: &mut TokenParser, properties: &mut TableProperties) -> Result<()> {
    if parser.consume_words_ci(&["CLUSTERING", "ORDER", "BY"]) {
        parse_clustering_order(parser, properties)
    } else if parser.consume_words_ci(&["COMPACT", "STORAGE"]) {
        properties.define_compact_storage()
    } else {
        parse_property(parser, &mut properties.common)
    }
}

/// `( col ASC|DESC, ... )`
fn parse_clustering_order(parser: &mut TokenParser, properties: &mut TableProperties) -> Result<()> {
    properties.start_clustering_order()?;
    parser.expect_token(&Token::LParen)?;
    loop {
        let column = parser.parse_identifier()?;
        let order = if parser.consume_word_ci("ASC") {
            ClusteringOrder::Asc
        } else if parser.consume_word_ci("DESC") {
            ClusteringOrder::Desc
        } else {
            return Err(parser.unexpected("ASC or DESC"));
        };
        properties.add_clustering_order(column, order)?;
        if !parser.consume_token(&Token::Comma) {
            break;
        }
    }
    parser.expect_token(&Token::RParen)
}
