use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::error::ConfigError;
use crate::core::modes::{ColorMode, Format, FrontMatter, UnwrapScalarFlag};

/// Raw option values as the command-line parser (or a settings file) hands
/// them over.
///
/// Nothing here is validated. Codec names and the front-matter mode stay
/// strings until `RuntimeOptions::apply_options` turns them into closed enums,
/// so that a bad value surfaces as a configuration error rather than a parse
/// failure in whichever front-end produced the struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParsedOptions {
    pub unwrap_scalar: Option<bool>,
    pub write_inplace: bool,
    pub output_to_json: bool,
    pub output_format: Option<String>,
    pub input_format: Option<String>,
    pub exit_status: bool,
    pub force_color: bool,
    pub force_no_color: bool,
    pub indent: Option<usize>,
    pub no_doc_separators: bool,
    pub null_input: bool,
    pub nul_sep_output: bool,
    pub verbose: bool,
    pub version: bool,
    pub pretty_print: bool,
    pub front_matter: Option<String>,
    pub split_file_exp: Option<String>,
    pub split_file_exp_file: Option<PathBuf>,
    pub force_expression: Option<String>,
    pub expression_file: Option<PathBuf>,
    pub positional_expression: Option<String>,
    pub files: Vec<PathBuf>,
}

impl ParsedOptions {
    /// Layers `overrides` on top of `self`.
    ///
    /// Values present in `overrides` win, a non-empty file list replaces the
    /// base list, and switches are on if either side turned them on.
    pub fn merge(self, overrides: ParsedOptions) -> ParsedOptions {
        ParsedOptions {
            unwrap_scalar: overrides.unwrap_scalar.or(self.unwrap_scalar),
            write_inplace: self.write_inplace || overrides.write_inplace,
            output_to_json: self.output_to_json || overrides.output_to_json,
            output_format: overrides.output_format.or(self.output_format),
            input_format: overrides.input_format.or(self.input_format),
            exit_status: self.exit_status || overrides.exit_status,
            force_color: self.force_color || overrides.force_color,
            force_no_color: self.force_no_color || overrides.force_no_color,
            indent: overrides.indent.or(self.indent),
            no_doc_separators: self.no_doc_separators || overrides.no_doc_separators,
            null_input: self.null_input || overrides.null_input,
            nul_sep_output: self.nul_sep_output || overrides.nul_sep_output,
            verbose: self.verbose || overrides.verbose,
            version: self.version || overrides.version,
            pretty_print: self.pretty_print || overrides.pretty_print,
            front_matter: overrides.front_matter.or(self.front_matter),
            split_file_exp: overrides.split_file_exp.or(self.split_file_exp),
            split_file_exp_file: overrides.split_file_exp_file.or(self.split_file_exp_file),
            force_expression: overrides.force_expression.or(self.force_expression),
            expression_file: overrides.expression_file.or(self.expression_file),
            positional_expression: overrides
                .positional_expression
                .or(self.positional_expression),
            files: if overrides.files.is_empty() {
                self.files
            } else {
                overrides.files
            },
        }
    }

    /// Splits raw positional arguments into the expression and input files.
    ///
    /// Must run after every layer is merged: once an inline or file
    /// expression is known, all positionals are input files.
    pub fn with_positionals(mut self, args: Vec<String>) -> ParsedOptions {
        let mut args = args.into_iter();
        if self.force_expression.is_none()
            && self.expression_file.is_none()
            && let Some(first) = args.next()
        {
            self.positional_expression = Some(first);
        }
        let files: Vec<PathBuf> = args.map(PathBuf::from).collect();
        if !files.is_empty() {
            self.files = files;
        }
        self
    }

    pub fn parsed_input_format(&self) -> Result<Format, ConfigError> {
        match self.input_format.as_deref() {
            Some(name) => Format::parse_input(name),
            None => Ok(Format::Yaml),
        }
    }

    /// The effective output codec; `output_to_json` overrides the named one.
    pub fn parsed_output_format(&self) -> Result<Format, ConfigError> {
        let named = match self.output_format.as_deref() {
            Some(name) => Format::parse_output(name)?,
            None => Format::Yaml,
        };
        Ok(if self.output_to_json { Format::Json } else { named })
    }

    pub fn parsed_front_matter(&self) -> Result<FrontMatter, ConfigError> {
        self.front_matter
            .as_deref()
            .map_or(Ok(FrontMatter::Off), |mode| mode.parse())
    }

    pub fn color_mode(&self) -> ColorMode {
        ColorMode::from_flags(self.force_color, self.force_no_color)
    }

    pub fn unwrap_flag(&self) -> UnwrapScalarFlag {
        UnwrapScalarFlag::from(self.unwrap_scalar)
    }

    /// Number of expression sources the user supplied.
    pub fn expression_source_count(&self) -> usize {
        [
            self.force_expression.is_some(),
            self.expression_file.is_some(),
            self.positional_expression.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_overrides() {
        let base = ParsedOptions {
            output_format: Some("json".into()),
            indent: Some(4),
            verbose: true,
            files: vec![PathBuf::from("a.yaml")],
            ..Default::default()
        };
        let flags = ParsedOptions {
            output_format: Some("xml".into()),
            exit_status: true,
            ..Default::default()
        };

        let merged = base.merge(flags);
        assert_eq!(merged.output_format.as_deref(), Some("xml"));
        assert_eq!(merged.indent, Some(4));
        assert!(merged.verbose);
        assert!(merged.exit_status);
        assert_eq!(merged.files, vec![PathBuf::from("a.yaml")]);
    }

    #[test]
    fn test_tojson_overrides_output_format() {
        let parsed = ParsedOptions {
            output_format: Some("xml".into()),
            output_to_json: true,
            ..Default::default()
        };
        assert_eq!(parsed.parsed_output_format().unwrap(), Format::Json);
    }

    #[test]
    fn test_tojson_still_rejects_unknown_format() {
        let parsed = ParsedOptions {
            output_format: Some("nope".into()),
            output_to_json: true,
            ..Default::default()
        };
        assert!(parsed.parsed_output_format().is_err());
    }

    #[test]
    fn test_expression_source_count() {
        let mut parsed = ParsedOptions::default();
        assert_eq!(parsed.expression_source_count(), 0);
        parsed.force_expression = Some(".a".into());
        parsed.positional_expression = Some(".b".into());
        assert_eq!(parsed.expression_source_count(), 2);
    }

    #[test]
    fn test_positionals_split_after_merge() {
        let settings = ParsedOptions {
            force_expression: Some(".a".into()),
            ..Default::default()
        };
        let parsed = settings
            .merge(ParsedOptions::default())
            .with_positionals(vec!["in.yaml".into()]);
        assert_eq!(parsed.positional_expression, None);
        assert_eq!(parsed.files, vec![PathBuf::from("in.yaml")]);

        let parsed = ParsedOptions::default().with_positionals(vec![".b".into(), "x.json".into()]);
        assert_eq!(parsed.positional_expression.as_deref(), Some(".b"));
        assert_eq!(parsed.files, vec![PathBuf::from("x.json")]);
    }

    #[test]
    fn test_no_positionals_keep_settings_files() {
        let settings = ParsedOptions {
            files: vec![PathBuf::from("base.yaml")],
            ..Default::default()
        };
        let parsed = settings.with_positionals(Vec::new());
        assert_eq!(parsed.files, vec![PathBuf::from("base.yaml")]);
        assert_eq!(parsed.positional_expression, None);
    }
}
