use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::error::ConfigError;

/// The document codecs known to the tool.
///
/// Encoders and decoders live outside this crate; the registry only decides
/// which one is selected. Names are matched case-insensitively and each codec
/// accepts the short aliases users type on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Pick the input codec from the file extension. Input only.
    Auto,
    Yaml,
    Json,
    /// Java-style `.properties` files.
    Props,
    Csv,
    Tsv,
    Xml,
    Base64,
    Uri,
    Toml,
    /// `key=value` lines for sourcing into a shell. Output only.
    Shell,
    /// Lua table literals. Output only.
    Lua,
}

impl Format {
    /// Whether a decoder exists for this codec.
    pub fn supports_input(self) -> bool {
        !matches!(self, Format::Shell | Format::Lua)
    }

    /// Whether an encoder exists for this codec.
    pub fn supports_output(self) -> bool {
        !matches!(self, Format::Auto)
    }

    /// Parses an input codec name, rejecting output-only codecs.
    pub fn parse_input(name: &str) -> Result<Self, ConfigError> {
        let format = Self::parse_named("input_format", name)?;
        if !format.supports_input() {
            return Err(ConfigError::invalid(
                "input_format",
                format!("'{format}' can only be used as an output format"),
            ));
        }
        Ok(format)
    }

    /// Parses an output codec name, rejecting `auto`.
    pub fn parse_output(name: &str) -> Result<Self, ConfigError> {
        let format = Self::parse_named("output_format", name)?;
        if !format.supports_output() {
            return Err(ConfigError::invalid(
                "output_format",
                format!("'{format}' can only be used as an input format"),
            ));
        }
        Ok(format)
    }

    fn parse_named(field: &str, name: &str) -> Result<Self, ConfigError> {
        name.parse::<Format>()
            .map_err(|_| ConfigError::invalid(field, format!("unknown format '{name}'")))
    }

    /// Guesses the input codec of a document from its file extension.
    ///
    /// Extensions without a decoder, and files without an extension, fall back
    /// to YAML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") | Some("ndjson") => Format::Json,
            Some("xml") => Format::Xml,
            Some("properties") => Format::Props,
            Some("csv") => Format::Csv,
            Some("tsv") => Format::Tsv,
            Some("toml") => Format::Toml,
            Some("b64") | Some("base64") => Format::Base64,
            _ => Format::Yaml,
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "a" => Ok(Format::Auto),
            "yaml" | "yml" | "y" => Ok(Format::Yaml),
            "json" | "j" => Ok(Format::Json),
            "props" | "properties" | "p" => Ok(Format::Props),
            "csv" | "c" => Ok(Format::Csv),
            "tsv" | "t" => Ok(Format::Tsv),
            "xml" | "x" => Ok(Format::Xml),
            "base64" => Ok(Format::Base64),
            "uri" => Ok(Format::Uri),
            "toml" => Ok(Format::Toml),
            "shell" | "sh" | "s" => Ok(Format::Shell),
            "lua" | "l" => Ok(Format::Lua),
            _ => Err(ConfigError::invalid("format", format!("unknown format '{s}'"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Auto => "auto",
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Props => "props",
            Format::Csv => "csv",
            Format::Tsv => "tsv",
            Format::Xml => "xml",
            Format::Base64 => "base64",
            Format::Uri => "uri",
            Format::Toml => "toml",
            Format::Shell => "shell",
            Format::Lua => "lua",
        };
        write!(f, "{name}")
    }
}

/// How a front-matter block at the top of a document is handled.
///
/// Serialized with the same spellings `FromStr` accepts, so a rendered plan
/// can be fed back as a settings file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatter {
    /// Treat the whole input as one document.
    #[default]
    #[serde(rename = "")]
    Off,
    /// Evaluate against the front matter only and emit just that.
    Extract,
    /// Evaluate against the front matter and re-emit the rest untouched.
    Process,
}

impl FromStr for FrontMatter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(FrontMatter::Off),
            "extract" => Ok(FrontMatter::Extract),
            "process" => Ok(FrontMatter::Process),
            other => Err(ConfigError::invalid(
                "front_matter",
                format!("'{other}' is not one of \"\", \"extract\" or \"process\""),
            )),
        }
    }
}

impl fmt::Display for FrontMatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontMatter::Off => write!(f, ""),
            FrontMatter::Extract => write!(f, "extract"),
            FrontMatter::Process => write!(f, "process"),
        }
    }
}

/// The user's color override, replacing the `--colors`/`--no-colors` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Follow the terminal probe.
    #[default]
    Unset,
    Force,
    Suppress,
}

impl ColorMode {
    /// Folds the two command-line flags into one mode.
    ///
    /// `force_no_color` takes precedence when both are set.
    pub const fn from_flags(force_color: bool, force_no_color: bool) -> Self {
        if force_no_color {
            ColorMode::Suppress
        } else if force_color {
            ColorMode::Force
        } else {
            ColorMode::Unset
        }
    }

    /// Resolves the final color state given what the terminal probe reported.
    pub const fn resolve(self, terminal_supports_color: bool) -> bool {
        match self {
            ColorMode::Force => true,
            ColorMode::Suppress => false,
            ColorMode::Unset => terminal_supports_color,
        }
    }
}

/// Tracks whether `--unwrapScalar` was given explicitly.
///
/// When it was not, the effective value depends on the output format, so the
/// flag cannot be collapsed into a plain `bool` at parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnwrapScalarFlag(Option<bool>);

impl UnwrapScalarFlag {
    pub const fn unset() -> Self {
        Self(None)
    }

    pub const fn set(value: bool) -> Self {
        Self(Some(value))
    }

    /// Scalars are unwrapped by default for every output codec except JSON,
    /// where quoting keeps the output valid JSON.
    pub fn resolve(self, output_format: Format) -> bool {
        self.0.unwrap_or(output_format != Format::Json)
    }
}

impl From<Option<bool>> for UnwrapScalarFlag {
    fn from(value: Option<bool>) -> Self {
        Self(value)
    }
}
