mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Exit status: no findings.
pub(crate) const EXIT_OK: i32 = 0;
/// Exit status: violations (check) or diagnostics (parse) were reported.
pub(crate) const EXIT_FINDINGS: i32 = 1;
/// Exit status: an input could not be read or the configuration is invalid.
pub(crate) const EXIT_IO: i32 = 2;

/// API signature linter.
#[derive(Parser)]
#[command(name = "apilint", version, about = "API signature linter")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a signature file, optionally against baselines and a previous release
    Check {
        /// Path to the current signature file
        current: PathBuf,
        /// Signature file the current surface builds upon (e.g. current.txt for system-current.txt)
        #[arg(long)]
        base_current: Option<PathBuf>,
        /// Signature file of the previous release; its findings are not reported again
        #[arg(long)]
        previous: Option<PathBuf>,
        /// Baseline of the previous release
        #[arg(long, requires = "previous")]
        base_previous: Option<PathBuf>,
        /// TOML file with disabled_rules / ignored_packages
        #[arg(long)]
        config: Option<PathBuf>,
        /// List classes that changed instead of violations
        #[arg(long)]
        show_noticed: bool,
    },

    /// Parse a signature file and dump the model
    Parse {
        /// Path to the signature file
        file: PathBuf,
    },

    /// List the built-in rules
    Rules,
}

fn init_logging(quiet: bool) {
    let default = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let code = match cli.command {
        Commands::Check {
            current,
            base_current,
            previous,
            base_previous,
            config,
            show_noticed,
        } => commands::check::cmd_check(
            &commands::check::CheckArgs {
                current,
                base_current,
                previous,
                base_previous,
                config,
                show_noticed,
            },
            cli.output,
            cli.quiet,
        ),
        Commands::Parse { file } => commands::parse::cmd_parse(&file, cli.output, cli.quiet),
        Commands::Rules => commands::rules::cmd_rules(cli.output),
    };
    process::exit(code);
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
