//! Token-based parsing of CQL property definitions
//!
//! ## Supported Syntax
//!
//! ```sql
//! replication = {'class': 'SingleRegionStrategy'}
//! comment = 'audit log'
//! default_time_to_live = 100
//! CUSTOM_PROPERTIES = {'capacity_mode': {'throughput_mode': 'PAY_PER_REQUEST'}}
//! ```

use sqlparser::tokenizer::Token;

use crate::error::Result;
use crate::model::{CommonProperties, CustomProperties, OptionMap, PropertyMap, PropertyValue};

use super::token_parser_base::TokenParser;

/// Name of the property holding vendor-specific options
const CUSTOM_PROPERTIES: &str = "custom_properties";

/// Parse one `name = value` property into `properties`.
pub fn parse_property(parser: &mut TokenParser, properties: &mut CommonProperties) -> Result<()> {
    let name = parser.parse_identifier()?;
    parser.expect_token(&Token::Eq)?;

    if name.as_str() == CUSTOM_PROPERTIES {
        let custom = parse_custom_properties(parser)?;
        return properties.define_custom_properties(custom);
    }

    let value = parse_property_value(parser)?;
    properties.add_property(name, value)
}

/// Parse a constant or a `{ 'key': 'value', ... }` map.
pub fn parse_property_value(parser: &mut TokenParser) -> Result<PropertyValue> {
    if parser.check_token(&Token::LBrace) {
        Ok(PropertyValue::Map(parse_option_map(parser)?))
    } else {
        Ok(PropertyValue::Text(parser.parse_constant()?))
    }
}

/// Parse `{ 'key': constant, ... }`.
pub fn parse_option_map(parser: &mut TokenParser) -> Result<OptionMap> {
    parse_map(parser, |parser| parser.parse_constant())
}

/// Parse `{ 'name': { 'option': constant, ... }, ... }`.
fn parse_custom_properties(parser: &mut TokenParser) -> Result<CustomProperties> {
    parse_map(parser, parse_option_map)
}

fn parse_map<V>(
    parser: &mut TokenParser,
    mut parse_value: impl FnMut(&mut TokenParser) -> Result<V>,
) -> Result<PropertyMap<String, V>> {
    parser.expect_token(&Token::LBrace)?;
    let mut map = PropertyMap::new();
    if parser.consume_token(&Token::RBrace) {
        return Ok(map);
    }
    loop {
        let key = parser.parse_constant()?;
        parser.expect_token(&Token::Colon)?;
        let value = parse_value(parser)?;
        map.add(key, value)?;
        if !parser.consume_token(&Token::Comma) {
            break;
        }
    }
    parser.expect_token(&Token::RBrace)?;
    Ok(map)
}
