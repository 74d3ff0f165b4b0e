//! docq resolves the settings of one document-query invocation.
//! Flags are parsed here and handed to the configuration registry as
//! plain values. The registry validates them, derives the color and unwrap
//! state, picks the authoritative expression and decides the exit code.
//! The resolved plan is printed in the configured output format.
use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use docq::builders::importer::{FileImporter, OptionsImporter};
use docq::builders::reporter::{ConsoleReporter, InvocationPlan, PlanReporter};
use docq::core::version;
use docq::utils;
use docq::{ParsedOptions, RunStatus, RuntimeOptions, SystemProbe, TerminalProbe};

#[derive(Parser, Debug)]
#[command(name = "docq")]
#[command(about = "Query and transform YAML, JSON and friends")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Output format (yaml, json, props, csv, tsv, xml, base64, uri, toml, shell, lua)
    #[arg(short = 'o', long = "output-format")]
    output_format: Option<String>,

    /// Input format (auto, yaml, json, props, csv, tsv, xml, base64, uri, toml)
    #[arg(short = 'p', long = "input-format")]
    input_format: Option<String>,

    /// Output as JSON (same as -o json)
    #[arg(short = 'j', long = "tojson")]
    output_to_json: bool,

    /// Update the first file in place
    #[arg(short = 'i', long = "inplace")]
    write_inplace: bool,

    /// Exit with status 1 unless the run completes successfully
    #[arg(short = 'e', long = "exit-status")]
    exit_status: bool,

    /// Force colored output
    #[arg(short = 'C', long = "colors")]
    force_color: bool,

    /// Force plain output (wins over --colors)
    #[arg(short = 'M', long = "no-colors")]
    force_no_color: bool,

    /// Indent width for nested structure
    #[arg(short = 'I', long = "indent")]
    indent: Option<usize>,

    /// Don't print document separators (---)
    #[arg(short = 'N', long = "no-doc")]
    no_doc_separators: bool,

    /// Evaluate against a null document instead of reading input
    #[arg(short = 'n', long = "null-input")]
    null_input: bool,

    /// Separate outputs with NUL instead of newline
    #[arg(short = '0', long = "nul-output")]
    nul_sep_output: bool,

    /// Verbose diagnostics on stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print the version and exit
    #[arg(short = 'V', long = "version")]
    version: bool,

    /// Pretty print the output
    #[arg(short = 'P', long = "prettyPrint")]
    pretty_print: bool,

    /// Front matter handling: extract or process
    #[arg(short = 'f', long = "front-matter")]
    front_matter: Option<String>,

    /// Expression naming the output file of each document
    #[arg(short = 's', long = "split-exp")]
    split_file_exp: Option<String>,

    /// File holding the split expression
    #[arg(long = "split-exp-file")]
    split_file_exp_file: Option<PathBuf>,

    /// Expression to evaluate; all positional arguments become files
    #[arg(long = "expression")]
    force_expression: Option<String>,

    /// File holding the expression; all positional arguments become files
    #[arg(long = "from-file")]
    expression_file: Option<PathBuf>,

    /// Unwrap scalars (defaults to true unless the output is JSON)
    #[arg(
        short = 'r',
        long = "unwrapScalar",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    unwrap_scalar: Option<bool>,

    /// Settings file (toml, yaml or json) applied underneath the flags
    #[arg(long = "options-file")]
    options_file: Option<PathBuf>,

    /// Expression followed by input files
    args: Vec<String>,
}

impl Cli {
    /// Flag values plus the raw positionals, which are only split into
    /// expression and files once settings-file values are merged in.
    fn into_parsed(self) -> (ParsedOptions, Vec<String>) {
        let flags = ParsedOptions {
            unwrap_scalar: self.unwrap_scalar,
            write_inplace: self.write_inplace,
            output_to_json: self.output_to_json,
            output_format: self.output_format,
            input_format: self.input_format,
            exit_status: self.exit_status,
            force_color: self.force_color,
            force_no_color: self.force_no_color,
            indent: self.indent,
            no_doc_separators: self.no_doc_separators,
            null_input: self.null_input,
            nul_sep_output: self.nul_sep_output,
            verbose: self.verbose,
            version: self.version,
            pretty_print: self.pretty_print,
            front_matter: self.front_matter,
            split_file_exp: self.split_file_exp,
            split_file_exp_file: self.split_file_exp_file,
            force_expression: self.force_expression,
            expression_file: self.expression_file,
            positional_expression: None,
            files: Vec::new(),
        };
        (flags, self.args)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(status) => status.as_exit_code(),
        Err(err) => {
            eprintln!("Error: {err:#}");
            RunStatus::Misconfigured.as_exit_code()
        }
    }
}

fn run(mut cli: Cli) -> Result<RunStatus> {
    let options_file = cli.options_file.take();
    let (flags, positionals) = cli.into_parsed();
    let parsed = match options_file {
        Some(path) => FileImporter::new().import(&path)?.merge(flags),
        None => flags,
    }
    .with_positionals(positionals);

    let color_mode = parsed.color_mode();
    utils::initialize_logging(
        parsed.verbose,
        color_mode.resolve(SystemProbe.stderr_supports_color()),
    )?;

    // --version is answered before the options are validated.
    if parsed.version {
        utils::apply_color_override(color_mode.resolve(SystemProbe.supports_color()));
        println!("{}", version::version_line());
        return Ok(RunStatus::Success);
    }

    let mut options = RuntimeOptions::initialize();
    options.apply_options(&parsed, &SystemProbe)?;
    let options = options.freeze();
    utils::apply_color_override(options.colors_enabled());

    let plan = InvocationPlan::from_options(&options);
    // Unreadable expression files are a configuration error, caught before any output.
    for source in std::iter::once(&plan.expression).chain(plan.split_expression.as_ref()) {
        if source.is_file() {
            let text = source.load()?;
            debug!(%source, expression = %text, "expression file loaded");
        }
    }

    let mut stdout = io::stdout().lock();
    ConsoleReporter::new().report(&plan, &mut stdout)?;

    options.mark_completed(true);
    Ok(options.exit_code())
}
