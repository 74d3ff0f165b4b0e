// This file is the module declaration file for the `core` module.
// It declares the submodules that make up the configuration registry and
// exposes them to the rest of the crate (and to the binary through `lib.rs`).

// `config` module:
// The registry itself. It defines `RuntimeOptions`, which holds every
// tool-wide setting, the `apply_options` step that fills it from parsed
// command-line values, expression-source resolution, and the write-once
// run outcome that decides the exit code.
pub mod config;

// `error` module:
// The typed `ConfigError` returned by the registry and the `RunStatus`
// exit codes of the process.
pub mod error;

// `expression` module:
// `ExpressionSource`, the single authoritative place an expression comes
// from, and the helper that loads its text.
pub mod expression;

// `modes` module:
// The closed enumerations that replace free-form strings and boolean pairs:
// codecs (`Format`), front-matter handling, the color override and the
// tri-state unwrap flag.
pub mod modes;

// `options` module:
// `ParsedOptions`, the unvalidated values handed over by the command-line
// parser or a settings file.
pub mod options;

// `terminal` module:
// The `TerminalProbe` trait used to derive whether colors are enabled.
pub mod terminal;

// `version` module:
// The version line printed by `--version`.
pub mod version;
