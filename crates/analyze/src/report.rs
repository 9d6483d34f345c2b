//! LintReport -- violations, change fingerprints and line diagnostics of
//! one examination pass, plus the current/previous subtraction.

use apilint_core::{Blame, ClassName, Diagnostic};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Severity level for a violation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

/// One rule violation, attributed to a class and optionally to a member.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    /// Fullname of the offending class.
    pub class: String,
    /// Identity of the offending member (`Method::ident`/`Field::ident`).
    pub member: Option<String>,
    pub line: u32,
    /// Declaration text of the member, or of the class when there is none.
    pub raw: String,
    pub blame: Option<Blame>,
    /// Whitespace-free `class:member:rule:message`; stable across line moves
    /// and used to match violations between two passes.
    pub signature: String,
}

impl Violation {
    pub fn make_signature(class: &str, member: Option<&str>, rule: &str, message: &str) -> String {
        format!("{}:{}:{}:{}", class, member.unwrap_or(""), rule, message)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        writeln!(f, "{} {}: {}", head, self.rule, self.message)?;
        write!(f, "    {}\n    in {} (line {})", self.raw, self.class, self.line)?;
        if let Some(blame) = &self.blame {
            write!(f, " [{} {}]", blame.commit, blame.author)?;
        }
        Ok(())
    }
}

/// Aggregated output of one examination pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Rule id -> violations in examination order.
    pub failures: BTreeMap<String, Vec<Violation>>,
    /// Class fullname -> change fingerprint, for every examined class.
    pub noticed: BTreeMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Current classes that had a baseline counterpart.
    pub classes_with_base: Vec<ClassName>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.failures
            .entry(violation.rule.clone())
            .or_default()
            .push(violation);
    }

    /// All violations, grouped by rule id.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.failures.values().flatten()
    }

    pub fn violation_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    pub fn error_count(&self) -> usize {
        self.violations().filter(|v| v.is_error()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Drop what `previous` already had: violations with the same
    /// signature, and noticed classes whose fingerprint did not change.
    pub fn without_previous(mut self, previous: &LintReport) -> LintReport {
        let known: BTreeSet<&str> = previous.violations().map(|v| v.signature.as_str()).collect();
        for violations in self.failures.values_mut() {
            violations.retain(|v| !known.contains(v.signature.as_str()));
        }
        self.failures.retain(|_, violations| !violations.is_empty());
        self.noticed
            .retain(|class, fingerprint| {
                previous.noticed.get(class).map(String::as_str) != Some(fingerprint.as_str())
            });
        self
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "failures": self.failures,
            "noticed": self.noticed,
            "diagnostics": self.diagnostics.iter().map(Diagnostic::to_json_value).collect::<Vec<_>>(),
            "classes_with_base": self.classes_with_base,
            "summary": {
                "violations": self.violation_count(),
                "errors": self.error_count(),
                "diagnostics": self.diagnostics.len(),
            },
        })
    }
}
