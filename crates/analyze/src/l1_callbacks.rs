//! L1 -- callback class naming.

use crate::rules::{Findings, Rule};
use apilint_core::ClassView;

pub struct CallbacksRule;

impl Rule for CallbacksRule {
    fn ids(&self) -> &'static [&'static str] {
        &["L1"]
    }

    fn describe(&self) -> &'static str {
        "Callback classes are named FooCallback"
    }

    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>) {
        let class = view.class;
        if class.fullname == "android.speech.tts.SynthesisCallback" {
            return;
        }
        if class.name.ends_with("Callbacks") {
            findings.error(class, None, "L1", "Callback class names should be singular");
        }
        if class.name.ends_with("Observer") {
            findings.warn(class, None, "L1", "Class should be named FooCallback");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use crate::rules::testing::check_one;

    fn check(name: &str) -> Vec<Severity> {
        let text = format!("package android.app {{\n  public abstract class {} {{\n  }}\n}}", name);
        check_one(&CallbacksRule, &text)
            .violations()
            .map(|v| v.severity)
            .collect()
    }

    #[test]
    fn naming() {
        assert_eq!(check("SessionCallback"), vec![]);
        assert_eq!(check("SessionCallbacks"), vec![Severity::Error]);
        assert_eq!(check("ContentObserver"), vec![Severity::Warning]);
        assert_eq!(check("Session.StateCallbacks"), vec![Severity::Error]);
    }
}
