//! C2/C8 -- constant naming and compile-time values.

use crate::rules::{Findings, Rule};
use apilint_core::{ClassView, Declaration};

/// Types whose `static final` fields must carry a compile-time value.
const COMPILE_TIME_TYPES: &[&str] = &[
    "java.lang.String",
    "byte",
    "short",
    "int",
    "long",
    "float",
    "double",
    "boolean",
    "char",
];

pub struct ConstantsRule;

fn is_constant_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// `android.R.attr`, `android.R.id`, ... keep their resource naming.
fn is_resource_class(fullname: &str) -> bool {
    fullname
        .strip_prefix("android.R.")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_lowercase()))
}

impl Rule for ConstantsRule {
    fn ids(&self) -> &'static [&'static str] {
        &["C2", "C8"]
    }

    fn describe(&self) -> &'static str {
        "Constants are named FOO_NAME and defined at compile time"
    }

    fn check(&self, view: &ClassView<'_>, findings: &mut Findings<'_>) {
        let class = view.class;
        if is_resource_class(&class.fullname)
            || class.fullname.starts_with("android.os.Build")
            || class.fullname == "android.system.OsConstants"
        {
            return;
        }

        for field in view.fields() {
            let modifiers = field.modifiers();
            if !(modifiers.contains("static") && modifiers.contains("final")) {
                continue;
            }
            if !is_constant_name(&field.name) {
                findings.error(class, Some(field), "C2", "Constant field names must be FOO_NAME");
            }
            if field.typ != "java.lang.String"
                && (field.name.starts_with("MIN_") || field.name.starts_with("MAX_"))
            {
                findings.warn(
                    class,
                    Some(field),
                    "C8",
                    "If min/max could change in future, make them dynamic methods",
                );
            }
            if COMPILE_TIME_TYPES.contains(&field.typ.as_str()) && field.value.is_none() {
                findings.error(class, Some(field), "C2", "All constants must be defined at compile time");
            }
        }
    }
}
