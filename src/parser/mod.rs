//! CQL parsing

mod cql_parser;
mod keyspace_parser;
mod property_parser;
mod table_parser;
mod token_parser_base;
mod type_parser;

pub use cql_parser::{parse_script, parse_script_file, read_script_file};
