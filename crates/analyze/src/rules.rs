//! Rule plumbing: the [`Rule`] trait, the [`Findings`] sink rules write
//! into, and the built-in rule set.

use crate::config::LintConfig;
use crate::report::{LintReport, Severity, Violation};
use apilint_core::{Class, ClassView, Declaration, Field, Method};
use std::collections::BTreeSet;

/// A member a violation can point at.
pub trait Detail: Declaration {
    fn ident(&self) -> String;
}

impl Detail for Method {
    fn ident(&self) -> String {
        Method::ident(self)
    }
}

impl Detail for Field {
    fn ident(&self) -> String {
        Field::ident(self)
    }
}

/// One API guideline check, run against every examined class.
pub trait Rule {
    /// Rule ids this check can report (`FW3`, `C2`, ...).
    fn ids(&self) -> &'static [&'static str];
    fn describe(&self) -> &'static str;
    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>);
}

/// Collects violations for a pass, dropping disabled rules and repeated
/// signatures.
pub struct Findings<'c> {
    config: &'c LintConfig,
    seen: BTreeSet<String>,
    report: LintReport,
}

impl<'c> Findings<'c> {
    pub fn new(config: &'c LintConfig) -> Self {
        Findings {
            config,
            seen: BTreeSet::new(),
            report: LintReport::new(),
        }
    }

    pub fn error(&mut self, class: &Class, detail: Option<&dyn Detail>, rule: &str, message: &str) {
        self.record(Severity::Error, class, detail, rule, message);
    }

    pub fn warn(&mut self, class: &Class, detail: Option<&dyn Detail>, rule: &str, message: &str) {
        self.record(Severity::Warning, class, detail, rule, message);
    }

    fn record(
        &mut self,
        severity: Severity,
        class: &Class,
        detail: Option<&dyn Detail>,
        rule: &str,
        message: &str,
    ) {
        if !self.config.is_rule_enabled(rule) {
            return;
        }
        let member = detail.map(|d| d.ident());
        let signature = Violation::make_signature(&class.fullname, member.as_deref(), rule, message);
        if !self.seen.insert(signature.clone()) {
            return;
        }
        let (line, raw, blame) = match detail {
            Some(d) => (d.line(), d.raw(), d.blame()),
            None => (class.line(), class.raw(), class.blame()),
        };
        self.report.push(Violation {
            rule: rule.to_string(),
            severity,
            message: message.to_string(),
            class: class.fullname.clone(),
            member,
            line,
            raw: raw.to_string(),
            blame: blame.cloned(),
            signature,
        });
    }

    pub fn into_report(self) -> LintReport {
        self.report
    }
}

/// Every built-in rule, in the order they run.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(crate::fw3_parcelable::ParcelableRule),
        Box::new(crate::c2_constants::ConstantsRule),
        Box::new(crate::s1_exceptions::ExceptionsRule),
        Box::new(crate::m8_equality::EqualityRule),
        Box::new(crate::l1_callbacks::CallbacksRule),
    ]
}

/// Built-in rules with at least one id still enabled by `config`.
pub fn enabled_rules(config: &LintConfig) -> Vec<Box<dyn Rule>> {
    builtin_rules()
        .into_iter()
        .filter(|rule| rule.ids().iter().any(|id| config.is_rule_enabled(id)))
        .collect()
}
