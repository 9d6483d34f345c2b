use apilint_analyze::builtin_rules;

use crate::{OutputFormat, EXIT_OK};

pub(crate) fn cmd_rules(output: OutputFormat) -> i32 {
    let rules = builtin_rules();
    match output {
        OutputFormat::Json => {
            let list: Vec<serde_json::Value> = rules
                .iter()
                .map(|r| serde_json::json!({ "ids": r.ids(), "description": r.describe() }))
                .collect();
            let json = serde_json::to_string_pretty(&list)
                .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
            println!("{}", json);
        }
        OutputFormat::Text => {
            for rule in &rules {
                println!("{:<8} {}", rule.ids().join(","), rule.describe());
            }
        }
    }
    EXIT_OK
}
