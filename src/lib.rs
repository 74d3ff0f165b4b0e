//! Runtime configuration registry for a structured-document query tool.
//!
//! Every subsystem of the tool (decoders, the expression engine, encoders, the
//! file splitter) reads its settings from one [`RuntimeOptions`] value. It is
//! filled once from the command line and then frozen:
//!
//! ```
//! use docq::{FixedProbe, ParsedOptions, RuntimeOptions, RunStatus};
//!
//! let parsed = ParsedOptions {
//!     output_format: Some("json".to_string()),
//!     positional_expression: Some(".items[0]".to_string()),
//!     ..Default::default()
//! };
//!
//! let mut options = RuntimeOptions::initialize();
//! options.apply_options(&parsed, &FixedProbe::piped()).unwrap();
//! let options = options.freeze();
//!
//! assert!(!options.unwrap_scalar());
//! options.mark_completed(true);
//! assert_eq!(options.exit_code(), RunStatus::Success);
//! ```
pub mod builders;
pub mod core;
pub mod utils;


pub use crate::core::config::{RuntimeOptions, SharedOptions};
pub use crate::core::error::{ConfigError, RunStatus};
pub use crate::core::expression::ExpressionSource;
pub use crate::core::modes::{ColorMode, Format, FrontMatter};
pub use crate::core::options::ParsedOptions;
pub use crate::core::terminal::{FixedProbe, SystemProbe, TerminalProbe};
