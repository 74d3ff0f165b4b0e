use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::core::config::RuntimeOptions;
use crate::core::expression::ExpressionSource;
use crate::core::modes::Format;
use crate::core::version;

/// Everything downstream subsystems would be handed for one invocation:
/// the frozen settings plus the resolved expression sources.
#[derive(Debug, Serialize)]
pub struct InvocationPlan<'a> {
    pub version: &'static str,
    pub options: &'a RuntimeOptions,
    pub expression: ExpressionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_expression: Option<ExpressionSource>,
}

impl<'a> InvocationPlan<'a> {
    /// Builds the plan, falling back to the identity expression.
    pub fn from_options(options: &'a RuntimeOptions) -> Self {
        Self {
            version: version::local_version(),
            options,
            expression: options.resolve_expression_source_or_identity(),
            split_expression: options.split_expression_source(),
        }
    }
}

pub trait PlanReporter {
    fn report(&self, plan: &InvocationPlan<'_>, out: &mut dyn Write) -> Result<()>;
}

/// Renders the plan with the codec the options select.
///
/// JSON, YAML and TOML are rendered natively; every other codec's encoder
/// lives outside this crate, so those fall back to YAML.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Serializes `plan` without the trailing separator.
    pub fn render(&self, plan: &InvocationPlan<'_>) -> Result<String> {
        let options = plan.options;
        let rendered = match options.output_format() {
            Format::Json => self.render_json(plan, options.indent())?,
            Format::Toml => toml::to_string_pretty(plan).context("Failed to serialize to TOML")?,
            _ => serde_yaml::to_string(plan).context("Failed to serialize to YAML")?,
        };
        Ok(rendered.trim_end_matches('\n').to_string())
    }

    /// Indent 0 gives compact single-line JSON.
    fn render_json(&self, plan: &InvocationPlan<'_>, indent: usize) -> Result<String> {
        if indent == 0 {
            return serde_json::to_string(plan).context("Failed to serialize to JSON");
        }
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        plan.serialize(&mut serializer)
            .context("Failed to serialize to JSON")?;
        String::from_utf8(buf).context("JSON output was not valid UTF-8")
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanReporter for ConsoleReporter {
    fn report(&self, plan: &InvocationPlan<'_>, out: &mut dyn Write) -> Result<()> {
        let rendered = self.render(plan)?;
        let terminator: &[u8] = if plan.options.nul_sep_output() { b"\0" } else { b"\n" };
        out.write_all(rendered.as_bytes())
            .context("Failed to write plan")?;
        out.write_all(terminator).context("Failed to write plan")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::ParsedOptions;
    use crate::core::terminal::FixedProbe;

    fn options_from(parsed: ParsedOptions) -> RuntimeOptions {
        let mut options = RuntimeOptions::initialize();
        options.apply_options(&parsed, &FixedProbe::piped()).unwrap();
        options
    }

    #[test]
    fn test_json_plan_uses_indent() {
        let options = options_from(ParsedOptions {
            output_format: Some("json".into()),
            indent: Some(4),
            positional_expression: Some(".a".into()),
            ..Default::default()
        });
        let rendered = ConsoleReporter::new()
            .render(&InvocationPlan::from_options(&options))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["options"]["output_format"], "json");
        assert_eq!(value["expression"]["source"], "positional");
        assert_eq!(value["expression"]["value"], ".a");
        assert!(rendered.contains("\n    \"version\""));
    }

    #[test]
    fn test_compact_json_at_zero_indent() {
        let options = options_from(ParsedOptions {
            output_to_json: true,
            indent: Some(0),
            ..Default::default()
        });
        let rendered = ConsoleReporter::new()
            .render(&InvocationPlan::from_options(&options))
            .unwrap();
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_yaml_fallback_for_external_codecs() {
        let options = options_from(ParsedOptions {
            output_format: Some("xml".into()),
            front_matter: Some("extract".into()),
            ..Default::default()
        });
        let rendered = ConsoleReporter::new()
            .render(&InvocationPlan::from_options(&options))
            .unwrap();

        let value: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(value["options"]["output_format"].as_str(), Some("xml"));
        assert_eq!(value["options"]["front_matter"].as_str(), Some("extract"));
        assert_eq!(value["expression"]["source"].as_str(), Some("identity"));
    }

    #[test]
    fn test_toml_plan() {
        let options = options_from(ParsedOptions {
            output_format: Some("toml".into()),
            split_file_exp: Some(".name".into()),
            ..Default::default()
        });
        let rendered = ConsoleReporter::new()
            .render(&InvocationPlan::from_options(&options))
            .unwrap();

        let value: toml::Table = toml::from_str(&rendered).unwrap();
        assert_eq!(value["split_expression"]["value"].as_str(), Some(".name"));
    }

    #[test]
    fn test_nul_separated_report() {
        let options = options_from(ParsedOptions {
            nul_sep_output: true,
            ..Default::default()
        });
        let mut out = Vec::new();
        ConsoleReporter::new()
            .report(&InvocationPlan::from_options(&options), &mut out)
            .unwrap();
        assert_eq!(out.last(), Some(&0u8));
        assert!(!out.ends_with(b"\n\0"));
    }
}
