//! Exit codes for the mapper CLI.
//!
//! Scripts and CI jobs can tell "the check found problems" apart from "the
//! project could not be loaded" by the exit status alone.

use mapper_config::ConfigError;
use mapper_hir::TypeModelError;

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - nothing to report
    Success = 0,
    /// `check` found unresolved references, or `resolve` found nothing
    Findings = 1,
    /// Configuration error (invalid config file or glob pattern)
    ConfigError = 2,
    /// Type model load error (malformed or unsupported model file)
    TypeModelError = 3,
    /// I/O error (file read failure)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify an error by the first cause in its chain that we recognise.
    #[must_use]
    pub fn from_error(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(config_error) = cause.downcast_ref::<ConfigError>() {
                return match config_error {
                    ConfigError::Io(_) => Self::IoError,
                    _ => Self::ConfigError,
                };
            }
            if let Some(model_error) = cause.downcast_ref::<TypeModelError>() {
                return match model_error {
                    TypeModelError::Io { .. } => Self::IoError,
                    _ => Self::TypeModelError,
                };
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return Self::IoError;
            }
        }
        Self::IoError
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Findings => write!(f, "findings reported"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::TypeModelError => write!(f, "type model load error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;
    use std::path::PathBuf;

    #[test]
    fn test_config_error_in_chain() {
        let error = Err::<(), _>(ConfigError::Invalid {
            path: PathBuf::from(".mapperrc.yml"),
            message: "separator must not be empty".to_string(),
        })
        .context("Failed to load config")
        .unwrap_err();
        assert_eq!(ExitCode::from_error(&error), ExitCode::ConfigError);
        assert_eq!(ExitCode::from_error(&error).code(), 2);
    }

    #[test]
    fn test_type_model_errors() {
        let parse = anyhow::Error::new(TypeModelError::Parse {
            path: PathBuf::from("model.json"),
            message: "expected value".to_string(),
        });
        assert_eq!(ExitCode::from_error(&parse), ExitCode::TypeModelError);

        let io = anyhow::Error::new(TypeModelError::Io {
            path: PathBuf::from("model.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(ExitCode::from_error(&io), ExitCode::IoError);
    }

    #[test]
    fn test_plain_io_error() {
        let error = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::NotFound))
            .context("Failed to read Mapper.xml");
        assert_eq!(ExitCode::from_error(&error), ExitCode::IoError);
        assert_eq!(ExitCode::IoError.to_string(), "I/O error");
    }
}
