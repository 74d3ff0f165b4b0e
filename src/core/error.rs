use std::process::ExitCode;
use thiserror::Error;

/// Errors raised while turning parsed command-line values into runtime options.
///
/// Both variants are terminal: they are detected before any document is read
/// and the binary exits with [`RunStatus::Misconfigured`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration for {field}: {message}")]
    InvalidConfiguration { field: String, message: String },

    #[error("no expression provided: pass one as an argument, with --expression or with --from-file")]
    NoExpressionProvided,
}

impl ConfigError {
    /// Shorthand used by the parsers and the validator.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable numeric code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::InvalidConfiguration { .. } => 20,
            ConfigError::NoExpressionProvided => 21,
        }
    }
}

/// The process exit status of one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RunStatus {
    /// The run finished, or `--exit-status` is off.
    Success = 0,
    /// `--exit-status` is on and the run did not complete successfully.
    NoMatch = 1,
    /// The configuration was rejected before any document was touched.
    Misconfigured = 2,
}

impl RunStatus {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_message_names_field() {
        let err = ConfigError::invalid("front_matter", "unknown mode 'split'");
        assert_eq!(
            err.to_string(),
            "invalid configuration for front_matter: unknown mode 'split'"
        );
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn test_run_status_codes_are_distinct() {
        assert_eq!(RunStatus::Success.code(), 0);
        assert_eq!(RunStatus::NoMatch.code(), 1);
        assert_eq!(RunStatus::Misconfigured.code(), 2);
    }
}
