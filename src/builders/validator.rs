use crate::core::error::ConfigError;
use crate::core::modes::Format;
use crate::core::options::ParsedOptions;

/// Largest indent accepted; anything above is almost certainly a typo.
pub const MAX_INDENT: usize = 9999;

/// The `OptionsValidator` trait defines the public interface for checking a
/// set of parsed options before they are applied to the registry.
///
/// Implementations separate hard failures, returned as `ConfigError`, from
/// soft conflicts that are resolved by a precedence rule and only reported.
pub trait OptionsValidator {
    /// Validates `parsed` as a whole.
    ///
    /// # Arguments
    /// * `parsed`: The options as handed over by the command-line parser.
    ///
    /// # Returns
    /// `Ok` with a list of warnings (possibly empty) when the options can be
    /// applied, or the first `ConfigError::InvalidConfiguration` found.
    fn validate(&self, parsed: &ParsedOptions) -> Result<Vec<String>, ConfigError>;
}

/// The `StandardValidator` is the validator used by `apply_options`.
///
/// It checks every single-field constraint (codec names, front-matter mode,
/// indent bounds, blank strings) and the combinations the document pipeline
/// cannot honor, such as writing in place with no file to write to.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Rejects strings that are present but contain nothing but whitespace.
    fn check_not_blank(&self, field: &str, value: Option<&str>) -> Result<(), ConfigError> {
        match value {
            Some(text) if text.trim().is_empty() => {
                Err(ConfigError::invalid(field, "must not be empty"))
            }
            _ => Ok(()),
        }
    }

    /// Checks combinations of switches that contradict each other.
    fn check_combinations(&self, parsed: &ParsedOptions) -> Result<(), ConfigError> {
        let splitting = parsed.split_file_exp.is_some() || parsed.split_file_exp_file.is_some();

        if parsed.write_inplace && parsed.files.is_empty() {
            return Err(ConfigError::invalid(
                "write_inplace",
                "writing in place needs at least one input file",
            ));
        }
        if parsed.write_inplace && splitting {
            return Err(ConfigError::invalid(
                "write_inplace",
                "cannot write in place and split output into files at the same time",
            ));
        }
        if parsed.null_input && !parsed.files.is_empty() {
            return Err(ConfigError::invalid(
                "null_input",
                "input files cannot be given together with null input",
            ));
        }
        Ok(())
    }

    /// Collects conflicts that have a defined resolution.
    fn collect_warnings(&self, parsed: &ParsedOptions) -> Vec<String> {
        let mut warnings = Vec::new();

        if parsed.force_color && parsed.force_no_color {
            warnings.push("both --colors and --no-colors given; colors are disabled".to_string());
        }
        if parsed.expression_source_count() > 1 {
            warnings.push(
                "more than one expression source given; using --expression, then --from-file, \
                 then the positional expression"
                    .to_string(),
            );
        }
        if parsed.output_to_json
            && let Some(name) = parsed.output_format.as_deref()
            && name.parse::<Format>().is_ok_and(|format| format != Format::Json)
        {
            warnings.push(format!("--tojson overrides output format '{name}'"));
        }
        if parsed.split_file_exp.is_some() && parsed.split_file_exp_file.is_some() {
            warnings.push(
                "both --split-exp and --split-exp-file given; using --split-exp".to_string(),
            );
        }
        warnings
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsValidator for StandardValidator {
    /// Runs the field checks first, then the cross-field checks, then gathers
    /// warnings. The first hard failure stops validation.
    fn validate(&self, parsed: &ParsedOptions) -> Result<Vec<String>, ConfigError> {
        parsed.parsed_input_format()?;
        parsed.parsed_output_format()?;
        parsed.parsed_front_matter()?;

        if let Some(indent) = parsed.indent
            && indent > MAX_INDENT
        {
            return Err(ConfigError::invalid(
                "indent",
                format!("{indent} is larger than the maximum of {MAX_INDENT}"),
            ));
        }

        self.check_not_blank("force_expression", parsed.force_expression.as_deref())?;
        self.check_not_blank("split_file_exp", parsed.split_file_exp.as_deref())?;
        self.check_not_blank(
            "expression_file",
            parsed.expression_file.as_deref().and_then(|p| p.to_str()),
        )?;
        self.check_not_blank(
            "split_file_exp_file",
            parsed.split_file_exp_file.as_deref().and_then(|p| p.to_str()),
        )?;

        self.check_combinations(parsed)?;

        Ok(self.collect_warnings(parsed))
    }
}
