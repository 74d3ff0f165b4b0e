use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// The expression used when the user supplies none: return the input as is.
pub const IDENTITY_EXPRESSION: &str = ".";

/// Where the expression to evaluate comes from.
///
/// Exactly one source is authoritative per invocation; see
/// `RuntimeOptions::resolve_expression_source` for the precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum ExpressionSource {
    /// Given with `--expression`.
    Inline(String),
    /// Path given with `--from-file`.
    File(PathBuf),
    /// First positional argument.
    Positional(String),
    /// Nothing supplied; the tool's default.
    Identity,
}

impl ExpressionSource {
    /// Returns the expression text, reading it from disk for file sources.
    ///
    /// A single trailing newline is dropped from file contents, since editors
    /// add one.
    pub fn load(&self) -> Result<String> {
        match self {
            ExpressionSource::Inline(text) | ExpressionSource::Positional(text) => {
                Ok(text.clone())
            }
            ExpressionSource::File(path) => {
                let content = fs::read_to_string(path).with_context(|| {
                    format!("Failed to read expression file {}", path.display())
                })?;
                let trimmed = content
                    .strip_suffix("\r\n")
                    .or_else(|| content.strip_suffix('\n'))
                    .unwrap_or(&content);
                Ok(trimmed.to_string())
            }
            ExpressionSource::Identity => Ok(IDENTITY_EXPRESSION.to_string()),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ExpressionSource::File(_))
    }
}

impl fmt::Display for ExpressionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionSource::Inline(text) => write!(f, "--expression '{text}'"),
            ExpressionSource::File(path) => write!(f, "--from-file {}", path.display()),
            ExpressionSource::Positional(text) => write!(f, "'{text}'"),
            ExpressionSource::Identity => write!(f, "'{IDENTITY_EXPRESSION}' (default)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_inline_and_identity() {
        let inline = ExpressionSource::Inline(".a.b".to_string());
        assert_eq!(inline.load().unwrap(), ".a.b");
        assert_eq!(ExpressionSource::Identity.load().unwrap(), ".");
    }

    #[test]
    fn test_load_file_trims_one_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expr.yq");
        fs::write(&path, ".items[] | select(.on)\n\n").unwrap();

        let source = ExpressionSource::File(path);
        assert_eq!(source.load().unwrap(), ".items[] | select(.on)\n");
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let source = ExpressionSource::File(PathBuf::from("/definitely/not/here.yq"));
        let err = source.load().unwrap_err();
        assert!(format!("{err}").contains("Failed to read expression file"));
    }
}
