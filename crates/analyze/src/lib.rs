//! apilint-analyze -- API guideline checks over signature dumps.
//!
//! [`examine_stream`] reconciles a current dump against an optional
//! baseline and runs every enabled [`Rule`] over each resulting class
//! view. [`check_api`] is the full current/previous comparison: it lints
//! the current surface, lints the previous surface the same way, and keeps
//! only what is new.

pub mod c2_constants;
pub mod config;
pub mod fingerprint;
pub mod fw3_parcelable;
pub mod l1_callbacks;
pub mod m8_equality;
pub mod report;
pub mod rules;
pub mod s1_exceptions;

pub use config::{ConfigError, LintConfig, DEFAULT_IGNORED_PACKAGES};
pub use report::{LintReport, Severity, Violation};
pub use rules::{builtin_rules, enabled_rules, Detail, Findings, Rule};

use apilint_core::{reconcile, ClassName, ClassStream, ClassView};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A signature dump held in memory, with the name diagnostics cite.
#[derive(Debug, Clone)]
pub struct SignatureFile {
    pub path: PathBuf,
    pub text: String,
}

impl SignatureFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SignatureFile {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> std::io::Result<Self> {
        Ok(SignatureFile {
            path: path.to_path_buf(),
            text: std::fs::read_to_string(path)?,
        })
    }

    fn stream(&self) -> ClassStream<std::str::Lines<'_>> {
        ClassStream::new(self.text.lines(), &self.path.display().to_string())
    }
}

/// Lint `current`, pairing each class with its counterpart in `base`.
///
/// `known_base` names classes known to exist in the baseline; those absent
/// from `current` are examined from `base` on their own. The returned
/// report lists the current classes that had a baseline counterpart in
/// `classes_with_base`.
pub fn examine_stream(
    current: &SignatureFile,
    base: Option<&SignatureFile>,
    known_base: &[ClassName],
    config: &LintConfig,
) -> LintReport {
    let rules = enabled_rules(config);
    let mut findings = Findings::new(config);
    let mut noticed = BTreeMap::new();
    let mut classes_with_base = Vec::new();

    let mut current_stream = current.stream();
    let mut base_stream = base.map(SignatureFile::stream);

    let stats = reconcile(
        current_stream.by_ref(),
        base_stream.as_mut(),
        known_base.iter().cloned(),
        &mut classes_with_base,
        |view: ClassView<'_>| {
            noticed.insert(
                view.fullname.clone(),
                fingerprint::class_fingerprint(view.class),
            );
            if config.is_package_ignored(&view.package) {
                debug!(class = %view.fullname, "package ignored");
                return;
            }
            for rule in &rules {
                rule.check(&view, &mut findings);
            }
        },
    );

    let mut report = findings.into_report();
    report.noticed = noticed;
    report.classes_with_base = classes_with_base;
    let (_, diagnostics) = current_stream.into_parts();
    report.diagnostics = diagnostics;
    if let Some(mut stream) = base_stream {
        let unmatched = stream.by_ref().count();
        debug!(unmatched, "baseline classes past the last current class");
        report.diagnostics.extend(stream.into_parts().1);
    }

    info!(
        file = %current.path.display(),
        classes = stats.current,
        violations = report.violation_count(),
        diagnostics = report.diagnostics.len(),
        "examined signature file"
    );
    report
}

/// Lint `current` against `base_current`; when `previous` is given, lint it
/// against `base_previous` too and subtract its violations and unchanged
/// classes from the result.
///
/// Classes of the current surface that had a base counterpart are fed to
/// the previous pass as known base classes, so both passes judge those
/// classes with the same baseline facts.
pub fn check_api(
    current: &SignatureFile,
    base_current: Option<&SignatureFile>,
    previous: Option<&SignatureFile>,
    base_previous: Option<&SignatureFile>,
    config: &LintConfig,
) -> LintReport {
    let report = examine_stream(current, base_current, &[], config);
    let Some(previous) = previous else {
        return report;
    };
    let previous_report =
        examine_stream(previous, base_previous, &report.classes_with_base, config);
    let diagnostics = previous_report.diagnostics.clone();
    let mut report = report.without_previous(&previous_report);
    report.diagnostics.extend(diagnostics);
    report
}
