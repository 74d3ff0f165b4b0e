// This file is the module declaration file for the `builders` module.
// It declares the helpers that sit around the registry: getting option values
// in, checking them, and rendering the result.

// `importer` module:
// Loads `ParsedOptions` from a settings file written in TOML, YAML or JSON,
// so a saved set of options can be layered under the command-line flags.
pub mod importer;

// `reporter` module:
// Renders the frozen registry and the resolved expression sources as an
// `InvocationPlan` in the configured output format.
pub mod reporter;

// `validator` module:
// Cross-field validation of parsed options. It defines the `OptionsValidator`
// trait and the `StandardValidator` used by `apply_options`, separating hard
// configuration errors from conflicts that a precedence rule resolves.
pub mod validator;
