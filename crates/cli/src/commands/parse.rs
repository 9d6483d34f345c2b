use std::path::Path;

use apilint_core::Api;

use crate::{report_error, OutputFormat, EXIT_FINDINGS, EXIT_IO, EXIT_OK};

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) -> i32 {
    let text = match std::fs::read_to_string(file) {
        Ok(t) => t,
        Err(e) => {
            report_error(
                &format!("could not read '{}': {}", file.display(), e),
                output,
                quiet,
            );
            return EXIT_IO;
        }
    };
    let api = Api::from_lines(text.lines(), &file.display().to_string());

    if !quiet {
        match output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&api.to_json_value())
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!("Signature format {}", api.format.number());
                for package in api.packages.values() {
                    println!("package {}", package.name);
                    for class in api.classes_in(&package.name) {
                        println!(
                            "  {} {} ({} methods, {} fields)",
                            class.kind(),
                            class.fullname,
                            class.methods.len(),
                            class.fields.len()
                        );
                    }
                }
                for diagnostic in &api.diagnostics {
                    eprintln!("error: {}", diagnostic);
                }
            }
        }
    }

    if api.diagnostics.is_empty() {
        EXIT_OK
    } else {
        EXIT_FINDINGS
    }
}
