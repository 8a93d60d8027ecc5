//! CQL script parser
//!
//! Splits a script into `;`-terminated statements and dispatches each one to
//! the matching statement parser.

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use sqlparser::tokenizer::{Token, TokenWithSpan};
use tracing::debug;

use super::keyspace_parser::{parse_create_keyspace_tokens, parse_use_tokens};
use super::table_parser::parse_create_table_tokens;
use super::token_parser_base::{tokenize, TokenParser};
use crate::error::{ConvertError, Result};
use crate::model::Statement;

/// Read a script as a string, trying UTF-8 first, then Windows-1252 as fallback
pub fn read_script_file(path: &Path) -> Result<String> {
    let read_error = |source| ConvertError::ScriptRead {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(read_error)?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(e.as_bytes());
            if had_errors {
                return Err(read_error(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                )));
            }
            decoded.into_owned()
        }
    };

    Ok(content
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(content))
}

/// Parse a CQL script file into statements
pub fn parse_script_file(path: &Path) -> Result<Vec<Statement>> {
    let script = read_script_file(path)?;
    parse_script(&script)
}

/// Parse a CQL script into statements, in script order
pub fn parse_script(script: &str) -> Result<Vec<Statement>> {
    let tokens = tokenize(script)?;
    let mut statements = Vec::new();

    for statement_tokens in split_statements(tokens) {
        let mut parser = TokenParser::from_tokens(statement_tokens);
        if parser.is_at_end() {
            continue;
        }
        let statement = parse_statement(&mut parser)?;
        debug!("Parsed {}", statement.describe());
        statements.push(statement);
    }

    Ok(statements)
}

/// Split a token stream on `;`, dropping the separators.
fn split_statements(tokens: Vec<TokenWithSpan>) -> Vec<Vec<TokenWithSpan>> {
    let mut statements = vec![Vec::new()];
    for token in tokens {
        if token.token == Token::SemiColon {
            statements.push(Vec::new());
        } else if let Some(current) = statements.last_mut() {
            current.push(token);
        }
    }
    statements
}

fn parse_statement(parser: &mut TokenParser) -> Result<Statement> {
    if parser.consume_word_ci("USE") {
        return parse_use_tokens(parser);
    }
    if parser.consume_word_ci("CREATE") {
        if parser.consume_word_ci("KEYSPACE") || parser.consume_word_ci("SCHEMA") {
            return parse_create_keyspace_tokens(parser);
        }
        if parser.consume_word_ci("TABLE") || parser.consume_word_ci("COLUMNFAMILY") {
            return parse_create_table_tokens(parser);
        }
        return Err(parser.unexpected("KEYSPACE or TABLE"));
    }
    Err(parser.unexpected("USE or CREATE statement"))
}
