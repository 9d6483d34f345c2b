//! Whole-file lookup index over a parsed signature dump.

use crate::error::Diagnostic;
use crate::model::{Class, Package, SignatureFormat};
use crate::stream::ClassStream;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Every package and class of one dump, keyed by name.
///
/// Classes resolve their package through [`Api::package_of`]; entities
/// hold names, not references, so the index owns everything.
#[derive(Debug, Default, Serialize)]
pub struct Api {
    pub format: SignatureFormat,
    pub packages: BTreeMap<String, Package>,
    pub classes: BTreeMap<String, Class>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Api {
    /// Parse the whole of `lines` and index the result. Later duplicates of
    /// a package or class name are dropped with a warning.
    pub fn from_lines<L, S>(lines: L, file: &str) -> Self
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stream = ClassStream::new(lines, file);
        let mut classes = BTreeMap::new();
        for class in stream.by_ref() {
            if classes.contains_key(&class.fullname) {
                warn!(file, class = %class.fullname, line = class.line, "duplicate class ignored");
                continue;
            }
            classes.insert(class.fullname.clone(), class);
        }
        let format = stream.format();
        let (package_list, diagnostics) = stream.into_parts();

        let mut packages = BTreeMap::new();
        for package in package_list {
            if packages.contains_key(&package.name) {
                warn!(file, package = %package.name, line = package.line, "duplicate package ignored");
                continue;
            }
            packages.insert(package.name.clone(), package);
        }

        Api {
            format,
            packages,
            classes,
            diagnostics,
        }
    }

    pub fn class(&self, fullname: &str) -> Option<&Class> {
        self.classes.get(fullname)
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn package_of(&self, class: &Class) -> Option<&Package> {
        self.packages.get(&class.package)
    }

    /// Classes declared in `package`, ordered by fullname.
    pub fn classes_in<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Class> + 'a {
        self.classes.values().filter(move |c| c.package == package)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "format": self.format.number(),
            "packages": self.packages.values().collect::<Vec<_>>(),
            "classes": self.classes.values().collect::<Vec<_>>(),
            "diagnostics": self.diagnostics.iter().map(Diagnostic::to_json_value).collect::<Vec<_>>(),
        })
    }
}
