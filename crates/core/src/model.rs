//! Structured entities parsed from a signature dump.
//!
//! Entities are built once from a declaration line and never mutated after
//! the class stream hands them out. Ownership runs strictly downward
//! (class -> members); upward links are names resolved through
//! [`crate::api::Api`].

use serde::Serialize;
use std::collections::BTreeSet;

// ──────────────────────────────────────────────
// Shared attributes
// ──────────────────────────────────────────────

/// Signature-file layout version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SignatureFormat {
    /// Whitespace-separated legacy layout (no header line).
    #[default]
    V1,
    /// `// Signature format: 2.0` and later: annotations and generics inline.
    V2,
}

impl SignatureFormat {
    pub const HEADER_PREFIX: &'static str = "// Signature format: ";

    /// Resolve the version named in a `// Signature format: X` header.
    pub fn from_header_version(version: &str) -> Option<Self> {
        match version.trim() {
            "2.0" | "3.0" => Some(SignatureFormat::V2),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            SignatureFormat::V1 => 1,
            SignatureFormat::V2 => 2,
        }
    }
}

/// `git blame` attribution carried by a line: abbreviated commit and author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Blame {
    pub commit: String,
    pub author: String,
}

/// Modifier words, annotation-derived markers (`deprecated`) and the
/// declaration kind keyword (`class`, `method`, `ctor`, `field`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Modifiers(BTreeSet<String>);

impl Modifiers {
    pub fn new() -> Self {
        Modifiers(BTreeSet::new())
    }

    pub fn insert(&mut self, word: impl Into<String>) {
        self.0.insert(word.into());
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Modifiers {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Modifiers(iter.into_iter().map(Into::into).collect())
    }
}

/// Common read-only view over every declaration kind.
pub trait Declaration {
    fn line(&self) -> u32;
    fn raw(&self) -> &str;
    fn blame(&self) -> Option<&Blame>;
    fn modifiers(&self) -> &Modifiers;
}

// ──────────────────────────────────────────────
// Package
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub line: u32,
    pub raw: String,
    pub blame: Option<Blame>,
    pub name: String,
    #[serde(skip)]
    pub modifiers: Modifiers,
}

// ──────────────────────────────────────────────
// Class
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    /// Name of the owning package.
    pub package: String,
    pub line: u32,
    pub raw: String,
    pub blame: Option<Blame>,
    pub format: SignatureFormat,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    /// `package + "." + declared name`; nested classes keep their dotted name.
    pub fullname: String,
    /// Last segment of `fullname`.
    pub name: String,
    pub extends: Option<String>,
    pub extends_all: Vec<String>,
    /// First implemented interface only; rules rely on this single value.
    pub implements: Option<String>,
    pub implements_all: Vec<String>,
    /// Constructors and methods in declaration order.
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
}

impl Class {
    /// The `class`/`interface`/`@interface`/`enum` keyword of this declaration.
    pub fn kind(&self) -> &str {
        ["@interface", "interface", "enum", "class"]
            .into_iter()
            .find(|k| self.modifiers.contains(k))
            .unwrap_or("class")
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers.contains("interface")
    }

    pub fn is_annotation_type(&self) -> bool {
        self.modifiers.contains("@interface")
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.kind == MethodKind::Ctor)
    }

    /// Methods proper, constructors excluded.
    pub fn plain_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.kind == MethodKind::Method)
    }

    pub fn class_name(&self) -> ClassName {
        ClassName {
            package: self.package.clone(),
            fullname: self.fullname.clone(),
        }
    }
}

/// Identity of a class without its body: enough to key a lookup or to
/// align two class streams.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClassName {
    pub package: String,
    pub fullname: String,
}

impl ClassName {
    /// `ClassName::new("android.app", "Notification.Action")` names
    /// `android.app.Notification.Action`.
    pub fn new(package: &str, declared: &str) -> Self {
        ClassName {
            package: package.to_owned(),
            fullname: format!("{}.{}", package, declared),
        }
    }
}

// ──────────────────────────────────────────────
// Members
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Ctor,
    Method,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Type with `[]` suffixes and a trailing `...` for varargs.
    pub typ: String,
    pub name: Option<String>,
    pub annotations: Vec<String>,
    pub default: Option<String>,
}

impl Parameter {
    pub fn of_type(typ: impl Into<String>) -> Self {
        Parameter {
            typ: typ.into(),
            name: None,
            annotations: Vec::new(),
            default: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    /// Fullname of the owning class.
    pub owner: String,
    pub line: u32,
    pub raw: String,
    pub blame: Option<Blame>,
    pub kind: MethodKind,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    /// Return type, or `ctor` for constructors.
    pub typ: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<String>,
    /// `default` value of an annotation-type element.
    pub default_value: Option<String>,
}

impl Method {
    pub fn arg_types(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.typ.as_str()).collect()
    }

    pub fn sig_matches(&self, typ: &str, name: &str, args: &[&str]) -> bool {
        self.typ == typ && self.name == name && self.arg_types() == args
    }

    /// Stable identity within a class: `typ-name-arg1-arg2...`.
    pub fn ident(&self) -> String {
        let mut parts = vec![self.typ.as_str(), self.name.as_str()];
        parts.extend(self.arg_types());
        parts.join("-")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Fullname of the owning class.
    pub owner: String,
    pub line: u32,
    pub raw: String,
    pub blame: Option<Blame>,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub typ: String,
    pub name: String,
    /// String literals keep their quotes; other expressions are joined by
    /// single spaces (`( 0.0 / 0.0 )`).
    pub value: Option<String>,
}

impl Field {
    /// The value with surrounding string quotes removed.
    pub fn unquoted_value(&self) -> Option<&str> {
        self.value.as_deref().map(|v| {
            if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
                &v[1..v.len() - 1]
            } else {
                v
            }
        })
    }

    pub fn ident(&self) -> String {
        format!(
            "{}-{}-{}",
            self.typ,
            self.name,
            self.value.as_deref().unwrap_or("")
        )
    }
}

macro_rules! impl_declaration {
    ($($ty:ty),*) => {
        $(
            impl Declaration for $ty {
                fn line(&self) -> u32 {
                    self.line
                }
                fn raw(&self) -> &str {
                    &self.raw
                }
                fn blame(&self) -> Option<&Blame> {
                    self.blame.as_ref()
                }
                fn modifiers(&self) -> &Modifiers {
                    &self.modifiers
                }
            }
        )*
    };
}

impl_declaration!(Package, Class, Method, Field);

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: Option<&str>) -> Field {
        Field {
            owner: "pkg.C".into(),
            line: 1,
            raw: String::new(),
            blame: None,
            modifiers: Modifiers::new(),
            annotations: Vec::new(),
            typ: "java.lang.String".into(),
            name: "NAME".into(),
            value: value.map(str::to_owned),
        }
    }

    #[test]
    fn unquoted_value_strips_string_quotes_only() {
        assert_eq!(field(Some("\"value\"")).unquoted_value(), Some("value"));
        assert_eq!(field(Some("123")).unquoted_value(), Some("123"));
        assert_eq!(field(None).unquoted_value(), None);
    }

    #[test]
    fn field_ident() {
        assert_eq!(field(Some("1")).ident(), "java.lang.String-NAME-1");
        assert_eq!(field(None).ident(), "java.lang.String-NAME-");
    }

    #[test]
    fn class_name_joins_package() {
        let n = ClassName::new("android.app", "Notification.Action");
        assert_eq!(n.fullname, "android.app.Notification.Action");
        assert_eq!(n.package, "android.app");
    }

    #[test]
    fn format_header_versions() {
        assert_eq!(
            SignatureFormat::from_header_version("2.0"),
            Some(SignatureFormat::V2)
        );
        assert_eq!(
            SignatureFormat::from_header_version("3.0"),
            Some(SignatureFormat::V2)
        );
        assert_eq!(SignatureFormat::from_header_version("9.9"), None);
        assert_eq!(SignatureFormat::default().number(), 1);
    }
}
