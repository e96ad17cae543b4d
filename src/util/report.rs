//! Warning reporter threaded through orchestration code.

use crate::error::Error;

/// Routes recoverable warnings to the logger and optionally escalates them.
///
/// Passed explicitly wherever a deterministic fallback may be taken, so the
/// strictness of a run is part of its configuration rather than global
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    fail_on_warning: bool,
}

impl Reporter {
    /// Create a reporter; with `fail_on_warning` every warning becomes an
    /// [`Error::WarningAsError`].
    #[must_use]
    pub fn new(fail_on_warning: bool) -> Self {
        Self { fail_on_warning }
    }

    /// Whether warnings are escalated.
    #[must_use]
    pub fn fail_on_warning(&self) -> bool {
        self.fail_on_warning
    }

    /// Log a warning, failing if this reporter is strict.
    pub fn warn(&self, message: impl Into<String>) -> Result<(), Error> {
        let message = message.into();
        log::warn!("{message}");
        if self.fail_on_warning {
            Err(Error::WarningAsError(message))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_reporter_continues() {
        assert!(Reporter::default().warn("ambiguous").is_ok());
    }

    #[test]
    fn strict_reporter_escalates() {
        let err = Reporter::new(true).warn("ambiguous").unwrap_err();
        assert_eq!(err.to_string(), "warning treated as error: ambiguous");
    }
}
