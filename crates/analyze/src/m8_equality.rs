//! M8 -- `equals` and `hashCode` are overridden together.

use crate::rules::{Findings, Rule};
use apilint_core::{ClassView, Declaration};

pub struct EqualityRule;

impl Rule for EqualityRule {
    fn ids(&self) -> &'static [&'static str] {
        &["M8"]
    }

    fn describe(&self) -> &'static str {
        "equals(Object) and hashCode() are overridden together"
    }

    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>) {
        let mut equals = false;
        let mut hash_code = false;
        for method in view.plain_methods() {
            if method.modifiers().contains("static") {
                continue;
            }
            equals |= method.sig_matches("boolean", "equals", &["java.lang.Object"]);
            hash_code |= method.sig_matches("int", "hashCode", &[]);
        }
        if equals != hash_code {
            findings.error(
                view.class,
                None,
                "M8",
                "Must override both equals and hashCode; missing one",
            );
        }
    }
}
