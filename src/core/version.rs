use colored::Colorize;

/// Version compiled in from Cargo.toml.
pub fn local_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// The line printed for `--version`.
///
/// Whether the number is highlighted is decided by `colored`'s global
/// override, which the binary sets from the resolved color state.
pub fn version_line() -> String {
    format!(
        "docq version {}",
        format!("v{}", local_version()).bright_green().bold()
    )
}
