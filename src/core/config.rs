use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

use crate::builders::validator::{OptionsValidator, StandardValidator};
use crate::core::error::{ConfigError, RunStatus};
use crate::core::expression::ExpressionSource;
use crate::core::modes::{ColorMode, Format, FrontMatter};
use crate::core::options::ParsedOptions;
use crate::core::terminal::TerminalProbe;

/// Default indent width for pretty-printed nested structure.
pub const DEFAULT_INDENT: usize = 2;

/// A frozen registry, shared read-only with every consumer.
pub type SharedOptions = Arc<RuntimeOptions>;

/// The tool-wide settings of one invocation.
///
/// Created with defaults by [`RuntimeOptions::initialize`], filled once by
/// [`RuntimeOptions::apply_options`], then frozen with [`RuntimeOptions::freeze`]
/// and only read from there on. The outcome recorded by
/// [`RuntimeOptions::mark_completed`] is the single value written after
/// freezing, and it can be written once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeOptions {
    unwrap_scalar: bool,
    write_inplace: bool,
    output_to_json: bool,
    output_format: Format,
    input_format: Format,
    exit_status: bool,
    color: ColorMode,
    colors_enabled: bool,
    indent: usize,
    no_doc_separators: bool,
    null_input: bool,
    nul_sep_output: bool,
    verbose: bool,
    version: bool,
    pretty_print: bool,
    front_matter: FrontMatter,
    split_file_exp: Option<String>,
    split_file_exp_file: Option<PathBuf>,
    #[serde(skip)]
    completed_successfully: OnceLock<bool>,
    force_expression: Option<String>,
    expression_file: Option<PathBuf>,
    positional_expression: Option<String>,
    files: Vec<PathBuf>,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            unwrap_scalar: false,
            write_inplace: false,
            output_to_json: false,
            output_format: Format::Yaml,
            input_format: Format::Yaml,
            exit_status: false,
            color: ColorMode::Unset,
            colors_enabled: false,
            indent: DEFAULT_INDENT,
            no_doc_separators: false,
            null_input: false,
            nul_sep_output: false,
            verbose: false,
            version: false,
            pretty_print: false,
            front_matter: FrontMatter::Off,
            split_file_exp: None,
            split_file_exp_file: None,
            completed_successfully: OnceLock::new(),
            force_expression: None,
            expression_file: None,
            positional_expression: None,
            files: Vec::new(),
        }
    }
}

impl RuntimeOptions {
    /// Every setting at its default: YAML in and out, indent 2, all switches off.
    pub fn initialize() -> Self {
        Self::default()
    }

    /// Applies the parsed command-line values, validating them as a whole.
    ///
    /// On error nothing is changed. Derived settings (`colors_enabled` and
    /// `unwrap_scalar`) are computed here, and applying the same options twice
    /// leaves the registry in the same state.
    pub fn apply_options(
        &mut self,
        parsed: &ParsedOptions,
        probe: &dyn TerminalProbe,
    ) -> Result<(), ConfigError> {
        let warnings = StandardValidator::new().validate(parsed)?;
        for warning in &warnings {
            warn!("{warning}");
        }

        let output_format = parsed.parsed_output_format()?;
        let input_format = parsed.parsed_input_format()?;
        let front_matter = parsed.parsed_front_matter()?;
        let color = parsed.color_mode();

        let resolved = RuntimeOptions {
            unwrap_scalar: parsed.unwrap_flag().resolve(output_format),
            write_inplace: parsed.write_inplace,
            output_to_json: parsed.output_to_json,
            output_format,
            input_format,
            exit_status: parsed.exit_status,
            color,
            colors_enabled: color.resolve(probe.supports_color()),
            indent: parsed.indent.unwrap_or(DEFAULT_INDENT),
            no_doc_separators: parsed.no_doc_separators,
            null_input: parsed.null_input,
            nul_sep_output: parsed.nul_sep_output,
            verbose: parsed.verbose,
            version: parsed.version,
            pretty_print: parsed.pretty_print,
            front_matter,
            split_file_exp: parsed.split_file_exp.clone(),
            split_file_exp_file: parsed.split_file_exp_file.clone(),
            completed_successfully: std::mem::take(&mut self.completed_successfully),
            force_expression: parsed.force_expression.clone(),
            expression_file: parsed.expression_file.clone(),
            positional_expression: parsed.positional_expression.clone(),
            files: parsed.files.clone(),
        };

        debug!(
            input = %resolved.input_format,
            output = %resolved.output_format,
            indent = resolved.indent,
            colors = resolved.colors_enabled,
            unwrap_scalar = resolved.unwrap_scalar,
            front_matter = ?resolved.front_matter,
            "options applied"
        );

        *self = resolved;
        Ok(())
    }

    /// Ends the configuration phase. Only `&self` methods are reachable on
    /// the returned snapshot.
    pub fn freeze(self) -> SharedOptions {
        Arc::new(self)
    }

    /// Picks the expression to evaluate.
    ///
    /// `--expression` wins over `--from-file`, which wins over the positional
    /// argument. Extra sources are ignored (the validator warns about them).
    pub fn resolve_expression_source(&self) -> Result<ExpressionSource, ConfigError> {
        if let Some(text) = &self.force_expression {
            return Ok(ExpressionSource::Inline(text.clone()));
        }
        if let Some(path) = &self.expression_file {
            return Ok(ExpressionSource::File(path.clone()));
        }
        if let Some(text) = &self.positional_expression {
            return Ok(ExpressionSource::Positional(text.clone()));
        }
        Err(ConfigError::NoExpressionProvided)
    }

    /// Like [`Self::resolve_expression_source`], falling back to the identity
    /// expression when nothing was supplied.
    pub fn resolve_expression_source_or_identity(&self) -> ExpressionSource {
        self.resolve_expression_source()
            .unwrap_or(ExpressionSource::Identity)
    }

    /// The expression used to name output files when splitting, if any.
    /// An inline `--split-exp` wins over `--split-exp-file`.
    pub fn split_expression_source(&self) -> Option<ExpressionSource> {
        if let Some(text) = &self.split_file_exp {
            return Some(ExpressionSource::Inline(text.clone()));
        }
        self.split_file_exp_file
            .as_ref()
            .map(|path| ExpressionSource::File(path.clone()))
    }

    /// The decoder to use for `path`, or for stdin when `path` is `None`.
    pub fn input_format_for(&self, path: Option<&Path>) -> Format {
        match (self.input_format, path) {
            (Format::Auto, Some(path)) => Format::from_path(path),
            (Format::Auto, None) => Format::Yaml,
            (format, _) => format,
        }
    }

    /// Records how the run ended. Must be called exactly once.
    ///
    /// A second call is a bug in the caller: it panics in debug builds and is
    /// ignored in release builds, keeping the first outcome.
    pub fn mark_completed(&self, success: bool) {
        let first = self.completed_successfully.set(success).is_ok();
        debug_assert!(first, "run outcome recorded twice");
        if !first {
            warn!(success, "run outcome already recorded; keeping the first one");
        }
    }

    /// The process exit status for this run.
    pub fn exit_code(&self) -> RunStatus {
        if self.exit_status && !self.completed_successfully() {
            RunStatus::NoMatch
        } else {
            RunStatus::Success
        }
    }

    pub fn unwrap_scalar(&self) -> bool {
        self.unwrap_scalar
    }

    pub fn write_inplace(&self) -> bool {
        self.write_inplace
    }

    pub fn output_to_json(&self) -> bool {
        self.output_to_json
    }

    pub fn output_format(&self) -> Format {
        self.output_format
    }

    /// The configured input codec, possibly [`Format::Auto`];
    /// see [`Self::input_format_for`].
    pub fn input_format(&self) -> Format {
        self.input_format
    }

    pub fn exit_status(&self) -> bool {
        self.exit_status
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color
    }

    pub fn force_color(&self) -> bool {
        self.color == ColorMode::Force
    }

    pub fn force_no_color(&self) -> bool {
        self.color == ColorMode::Suppress
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn no_doc_separators(&self) -> bool {
        self.no_doc_separators
    }

    pub fn null_input(&self) -> bool {
        self.null_input
    }

    pub fn nul_sep_output(&self) -> bool {
        self.nul_sep_output
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn pretty_print(&self) -> bool {
        self.pretty_print
    }

    pub fn front_matter(&self) -> FrontMatter {
        self.front_matter
    }

    pub fn split_file_exp(&self) -> Option<&str> {
        self.split_file_exp.as_deref()
    }

    pub fn split_file_exp_file(&self) -> Option<&Path> {
        self.split_file_exp_file.as_deref()
    }

    /// False until the run is marked completed.
    pub fn completed_successfully(&self) -> bool {
        self.completed_successfully.get().copied().unwrap_or(false)
    }

    pub fn force_expression(&self) -> Option<&str> {
        self.force_expression.as_deref()
    }

    pub fn expression_file(&self) -> Option<&Path> {
        self.expression_file.as_deref()
    }

    pub fn positional_expression(&self) -> Option<&str> {
        self.positional_expression.as_deref()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}
