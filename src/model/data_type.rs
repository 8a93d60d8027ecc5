//! CQL column types

use std::fmt;

use super::Identifier;

/// A column type as written in a CQL script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CqlType {
    /// Built-in type such as `int` or `text`
    Simple(String),
    /// Parametrized collection type such as `map<text, int>`
    Composite {
        kind: String,
        element_types: Vec<CqlType>,
    },
    /// User-defined type, optionally keyspace-qualified
    User {
        keyspace: Option<Identifier>,
        name: Identifier,
    },
    /// Custom type given by its Java class name
    Custom(String),
}

impl CqlType {
    pub fn simple(name: impl Into<String>) -> Self {
        CqlType::Simple(name.into())
    }

    pub fn composite(kind: impl Into<String>, element_types: Vec<CqlType>) -> Self {
        CqlType::Composite {
            kind: kind.into(),
            element_types,
        }
    }
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CqlType::Simple(name) => f.write_str(name),
            CqlType::Composite {
                kind,
                element_types,
            } => {
                write!(f, "{}<", kind)?;
                for (i, element) in element_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str(">")
            }
            CqlType::User {
                keyspace: Some(keyspace),
                name,
            } => write!(f, "{}.{}", keyspace, name),
            CqlType::User {
                keyspace: None,
                name,
            } => write!(f, "{}", name),
            CqlType::Custom(class_name) => write!(f, "'{}'", class_name),
        }
    }
}
