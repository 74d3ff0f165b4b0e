use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global tracing subscriber on stderr.
///
/// `--verbose` switches to DEBUG; otherwise only warnings and errors are shown
/// so stdout and stderr stay clean for pipelines. `ansi` follows the same
/// color decision as the rest of the output, applied to stderr.
pub fn initialize_logging(verbose: bool, ansi: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Points `colored` at the resolved color state so every highlighted string
/// in the process agrees with the registry.
pub fn apply_color_override(colors_enabled: bool) {
    color_control::set_override(colors_enabled);
}
