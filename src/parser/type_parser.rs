//! Token-based parsing of CQL column types
//!
//! ## Supported Syntax
//!
//! ```sql
//! int | text | timestamp | ...          -- built-in types
//! list<int> | map<text, frozen<set<int>>> | tuple<int, text>
//! address | ks.address                   -- user-defined types
//! 'org.apache.cassandra.db.marshal.DateType'  -- custom types
//! ```

use sqlparser::tokenizer::Token;

use crate::error::Result;
use crate::model::CqlType;

use super::token_parser_base::TokenParser;

/// Built-in CQL types
const SIMPLE_TYPES: &[&str] = &[
    "ascii",
    "bigint",
    "blob",
    "boolean",
    "counter",
    "date",
    "decimal",
    "double",
    "duration",
    "float",
    "inet",
    "int",
    "smallint",
    "text",
    "time",
    "timestamp",
    "timeuuid",
    "tinyint",
    "uuid",
    "varchar",
    "varint",
];

/// Parametrized collection types
const COMPOSITE_TYPES: &[&str] = &["list", "set", "map", "tuple", "frozen"];

/// Parse a column type.
pub fn parse_type(parser: &mut TokenParser) -> Result<CqlType> {
    if parser.check_token(&Token::SingleQuotedString(String::new())) {
        return Ok(CqlType::Custom(parser.parse_string()?));
    }

    if let Some(kind) = COMPOSITE_TYPES
        .iter()
        .find(|kind| parser.check_word_ci(kind) && parser.peek_token(1, &Token::Lt))
    {
        parser.advance();
        parser.advance();
        let element_types = parse_type_list(parser)?;
        parser.expect_closing_angle()?;
        return Ok(CqlType::composite(*kind, element_types));
    }

    if let Some(name) = SIMPLE_TYPES.iter().find(|name| parser.check_word_ci(name)) {
        parser.advance();
        return Ok(CqlType::simple(*name));
    }

    let (keyspace, name) = parser.parse_qualified_name()?;
    Ok(CqlType::User { keyspace, name })
}

fn parse_type_list(parser: &mut TokenParser) -> Result<Vec<CqlType>> {
    let mut types = vec![parse_type(parser)?];
    while parser.consume_token(&Token::Comma) {
        types.push(parse_type(parser)?);
    }
    Ok(types)
}
