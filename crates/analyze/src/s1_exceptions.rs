//! S1 -- generic exceptions in `throws` clauses.

use crate::rules::{Findings, Rule};
use apilint_core::ClassView;

const GENERIC_EXCEPTIONS: &[&str] = &[
    "java.lang.Exception",
    "java.lang.Throwable",
    "java.lang.Error",
];

pub struct ExceptionsRule;

impl Rule for ExceptionsRule {
    fn ids(&self) -> &'static [&'static str] {
        &["S1"]
    }

    fn describe(&self) -> &'static str {
        "Methods throw specific exception types"
    }

    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>) {
        for method in view.methods() {
            if method
                .throws
                .iter()
                .any(|t| GENERIC_EXCEPTIONS.contains(&t.as_str()))
            {
                findings.error(
                    view.class,
                    Some(method),
                    "S1",
                    "Methods must not throw generic exceptions",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{check_one, rule_ids};

    #[test]
    fn generic_throws_are_flagged() {
        let report = check_one(
            &ExceptionsRule,
            "// Signature format: 2.0
package p {
  public class A {
    ctor public A() throws Exception;
    method public void close() throws java.io.IOException;
    method public void run() throws java.io.IOException, Throwable;
    method public void fail() throws java.lang.Error;
  }
}",
        );
        assert_eq!(rule_ids(&report), vec!["S1", "S1", "S1"]);
        let members: Vec<&str> = report.failures["S1"]
            .iter()
            .filter_map(|v| v.member.as_deref())
            .collect();
        assert_eq!(members, vec!["ctor-A", "void-run", "void-fail"]);
    }

    #[test]
    fn legacy_format_elides_java_lang_too() {
        let report = check_one(
            &ExceptionsRule,
            "package p {
  public class A {
    method public void run() throws Exception;
  }
}",
        );
        assert_eq!(report.violation_count(), 1);
    }
}
