//! Case-normalizing CQL identifiers

use std::fmt;

/// A CQL name as used for lookups.
///
/// Unquoted identifiers are folded to lower case; quoted identifiers keep
/// their case. Equality and hashing use the stored (normalized) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier, folding case unless `keep_case` is set.
    pub fn new(name: impl AsRef<str>, keep_case: bool) -> Self {
        let name = name.as_ref();
        if keep_case {
            Self(name.to_string())
        } else {
            Self(name.to_lowercase())
        }
    }

    /// Create an identifier from an unquoted name.
    pub fn unquoted(name: impl AsRef<str>) -> Self {
        Self::new(name, false)
    }

    /// Create an identifier from a quoted name, preserving case.
    pub fn quoted(name: impl AsRef<str>) -> Self {
        Self::new(name, true)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::unquoted(name)
    }
}
