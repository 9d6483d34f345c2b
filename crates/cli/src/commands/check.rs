use std::path::{Path, PathBuf};

use apilint_analyze::{check_api, LintConfig, LintReport, SignatureFile};

use crate::{report_error, OutputFormat, EXIT_FINDINGS, EXIT_IO, EXIT_OK};

pub(crate) struct CheckArgs {
    pub current: PathBuf,
    pub base_current: Option<PathBuf>,
    pub previous: Option<PathBuf>,
    pub base_previous: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub show_noticed: bool,
}

type Inputs = (
    SignatureFile,
    Option<SignatureFile>,
    Option<SignatureFile>,
    Option<SignatureFile>,
);

fn read(path: &Path) -> Result<SignatureFile, String> {
    SignatureFile::read(path).map_err(|e| format!("could not read '{}': {}", path.display(), e))
}

fn read_inputs(args: &CheckArgs) -> Result<Inputs, String> {
    Ok((
        read(&args.current)?,
        args.base_current.as_deref().map(read).transpose()?,
        args.previous.as_deref().map(read).transpose()?,
        args.base_previous.as_deref().map(read).transpose()?,
    ))
}

pub(crate) fn cmd_check(args: &CheckArgs, output: OutputFormat, quiet: bool) -> i32 {
    // Step 1: Load configuration
    let config = match &args.config {
        Some(path) => match LintConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                report_error(&format!("config error: {}", e), output, quiet);
                return EXIT_IO;
            }
        },
        None => LintConfig::default(),
    };

    // Step 2: Read every signature file up front
    let (current, base_current, previous, base_previous) = match read_inputs(args) {
        Ok(inputs) => inputs,
        Err(msg) => {
            report_error(&msg, output, quiet);
            return EXIT_IO;
        }
    };

    // Step 3: Lint
    let report = check_api(
        &current,
        base_current.as_ref(),
        previous.as_ref(),
        base_previous.as_ref(),
        &config,
    );

    // Step 4: Format output
    if !quiet {
        match output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report.to_json_value())
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => print_text(&report, args.show_noticed),
        }
    }

    if args.show_noticed || report.is_clean() {
        EXIT_OK
    } else {
        EXIT_FINDINGS
    }
}

fn print_text(report: &LintReport, show_noticed: bool) {
    for diagnostic in &report.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    if show_noticed {
        for class in report.noticed.keys() {
            println!("{}", class);
        }
        return;
    }

    for violation in report.violations() {
        println!("{}", violation);
        println!();
    }
    println!(
        "{} violation(s), {} error(s), {} diagnostic(s)",
        report.violation_count(),
        report.error_count(),
        report.diagnostics.len()
    );
}
