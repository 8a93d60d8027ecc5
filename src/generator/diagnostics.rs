//! Warning and error reporting for the mapping pass

use tracing::warn;

use crate::error::{ConvertError, Result};

/// Collects warnings raised while mapping statements.
///
/// Warnings are logged and recorded; in strict mode they abort the
/// conversion instead.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    strict: bool,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            warnings: Vec::new(),
        }
    }

    /// Report a non-fatal issue.
    pub fn warn(&mut self, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        warn!("{}", message);
        if self.strict {
            return Err(ConvertError::StrictWarning { message });
        }
        self.warnings.push(message);
        Ok(())
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

/// Abort the conversion with a fatal diagnostic.
pub fn fatal<T>(message: impl Into<String>) -> Result<T> {
    Err(ConvertError::diagnostic(message))
}
