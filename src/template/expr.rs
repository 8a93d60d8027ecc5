//! Deferred-value expressions rendered as CloudFormation intrinsic functions
//!
//! Expressions are plain data. A `Ref` names another resource by logical id
//! and is only resolved by CloudFormation at deploy time.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A template value that may reference other resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Plain string value
    Literal(String),
    /// `{ "Ref": logical_id }`
    Ref(String),
    /// `{ "Fn::Join": [delimiter, [items...]] }`
    Join { delimiter: String, items: Vec<Expr> },
    /// `{ "Fn::Select": [index, list] }`
    Select { index: usize, list: Box<Expr> },
    /// `{ "Fn::Split": [delimiter, source] }`
    Split { delimiter: String, source: Box<Expr> },
    /// `{ "Fn::Sub": [template, { name: value, ... }] }`
    Sub {
        template: String,
        variables: Vec<(String, Expr)>,
    },
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn reference(logical_id: impl Into<String>) -> Self {
        Expr::Ref(logical_id.into())
    }

    pub fn join(delimiter: impl Into<String>, items: Vec<Expr>) -> Self {
        Expr::Join {
            delimiter: delimiter.into(),
            items,
        }
    }

    pub fn select(index: usize, list: Expr) -> Self {
        Expr::Select {
            index,
            list: Box::new(list),
        }
    }

    pub fn split(delimiter: impl Into<String>, source: Expr) -> Self {
        Expr::Split {
            delimiter: delimiter.into(),
            source: Box::new(source),
        }
    }

    pub fn sub(template: impl Into<String>, variables: Vec<(String, Expr)>) -> Self {
        Expr::Sub {
            template: template.into(),
            variables,
        }
    }

    /// The literal value, if this expression needs no resolution.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Expr::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::literal(value)
    }
}

struct Variables<'a>(&'a [(String, Expr)]);

impl Serialize for Variables<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expr::Literal(value) => serializer.serialize_str(value),
            Expr::Ref(logical_id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", logical_id)?;
                map.end()
            }
            Expr::Join { delimiter, items } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &(delimiter, items))?;
                map.end()
            }
            Expr::Select { index, list } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Select", &(index, list))?;
                map.end()
            }
            Expr::Split { delimiter, source } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Split", &(delimiter, source))?;
                map.end()
            }
            Expr::Sub {
                template,
                variables,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Sub", &(template, Variables(variables)))?;
                map.end()
            }
        }
    }
}
