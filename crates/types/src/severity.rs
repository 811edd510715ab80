//! Severity types for diagnostics.

/// Diagnostic severity level for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the mapper cannot work as written
    Error,
    /// Warning - a reference that probably will not resolve at runtime
    Warning,
    /// Information - informational message
    Information,
    /// Hint - a suggestion
    Hint,
}

impl DiagnosticSeverity {
    /// Returns true if this severity indicates an error.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns true if this severity is at least a warning (warning or error).
    #[must_use]
    pub const fn is_warning_or_higher(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Information => write!(f, "info"),
            Self::Hint => write!(f, "hint"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_levels() {
        assert!(DiagnosticSeverity::Error.is_error());
        assert!(DiagnosticSeverity::Warning.is_warning_or_higher());
        assert!(!DiagnosticSeverity::Hint.is_warning_or_higher());
        assert_eq!(DiagnosticSeverity::Information.to_string(), "info");
    }
}
