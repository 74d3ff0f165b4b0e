use is_terminal::IsTerminal;
use std::ffi::OsStr;

/// Trait describing what the registry needs to know about the environment
/// to decide whether output should be colored.
/// This abstraction keeps `apply_options` free of process-global state in tests.
pub trait TerminalProbe {
    /// Returns true when stdout is an interactive terminal.
    fn stdout_is_terminal(&self) -> bool;

    /// Returns true when stderr, where diagnostics go, is a terminal.
    fn stderr_is_terminal(&self) -> bool;

    /// Returns true when the environment asks for plain output
    /// (`NO_COLOR` set, or `TERM=dumb`).
    fn env_disables_color(&self) -> bool;

    /// Whether colors should be used when the user expressed no preference.
    fn supports_color(&self) -> bool {
        !self.env_disables_color() && self.stdout_is_terminal()
    }

    /// Same as `supports_color`, for the log stream.
    fn stderr_supports_color(&self) -> bool {
        !self.env_disables_color() && self.stderr_is_terminal()
    }
}

/// `NO_COLOR` with any non-empty value, or `TERM=dumb`.
/// See https://no-color.org/.
fn color_disabled_by(no_color: Option<&OsStr>, term: Option<&OsStr>) -> bool {
    no_color.is_some_and(|v| !v.is_empty()) || term.is_some_and(|t| t == "dumb")
}

/// Probe backed by the real process environment.
pub struct SystemProbe;

impl TerminalProbe for SystemProbe {
    fn stdout_is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    fn stderr_is_terminal(&self) -> bool {
        std::io::stderr().is_terminal()
    }

    fn env_disables_color(&self) -> bool {
        color_disabled_by(
            std::env::var_os("NO_COLOR").as_deref(),
            std::env::var_os("TERM").as_deref(),
        )
    }
}

/// Probe with fixed answers, for tests and for callers that already know
/// where output is going.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe {
    pub terminal: bool,
    pub no_color_env: bool,
}

impl FixedProbe {
    pub const fn terminal() -> Self {
        Self {
            terminal: true,
            no_color_env: false,
        }
    }

    pub const fn piped() -> Self {
        Self {
            terminal: false,
            no_color_env: false,
        }
    }
}

impl TerminalProbe for FixedProbe {
    fn stdout_is_terminal(&self) -> bool {
        self.terminal
    }

    fn stderr_is_terminal(&self) -> bool {
        self.terminal
    }

    fn env_disables_color(&self) -> bool {
        self.no_color_env
    }
}
