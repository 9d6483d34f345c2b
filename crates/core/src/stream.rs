//! Line-oriented driver over a signature dump.
//!
//! [`ClassStream`] recognizes declaration lines by their indentation and
//! leading keyword, hands each one to the entity parser, and yields every
//! class (members attached) as soon as its closing `  }` is seen. A line
//! that fails to lex or parse becomes a [`Diagnostic`]; the stream moves on
//! to the next line.

use crate::error::{Diagnostic, ParseError};
use crate::model::{Blame, Class, Package, SignatureFormat};
use crate::parser;
use tracing::{debug, warn};

const METHOD_PREFIXES: &[&str] = &["    ctor", "    method"];
const FIELD_PREFIXES: &[&str] = &["    field", "    property", "    enum_constant"];

/// Lazily parses classes out of signature lines, in file order.
pub struct ClassStream<I> {
    lines: I,
    file: String,
    line: u32,
    format: SignatureFormat,
    package: Option<Package>,
    class: Option<Class>,
    /// Set while the members of a class whose header failed to parse are skipped.
    orphaned: bool,
    packages: Vec<Package>,
    diagnostics: Vec<Diagnostic>,
}

impl<I, S> ClassStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// `file` is only used to attribute diagnostics.
    pub fn new<L>(lines: L, file: &str) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        ClassStream {
            lines: lines.into_iter(),
            file: file.to_owned(),
            line: 0,
            format: SignatureFormat::V1,
            package: None,
            class: None,
            orphaned: false,
            packages: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn format(&self) -> SignatureFormat {
        self.format
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Packages seen so far, in file order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn into_parts(self) -> (Vec<Package>, Vec<Diagnostic>) {
        (self.packages, self.diagnostics)
    }

    fn report(&mut self, raw: &str, err: ParseError) {
        let diag = Diagnostic::new(&self.file, self.line, raw, &err);
        debug!(file = %diag.file, line = diag.line, "{}", diag.message);
        self.diagnostics.push(diag);
    }

    fn report_unclosed(&mut self, class: Class) {
        warn!(class = %class.fullname, line = class.line, "class was never closed; dropping it");
        let err = ParseError::UnclosedClass(class.fullname);
        self.diagnostics
            .push(Diagnostic::new(&self.file, class.line, &class.raw, &err));
    }

    /// Handle one line; returns a class when the line closes one.
    fn feed(&mut self, raw: &str) -> Option<Class> {
        let raw = raw.trim_end();
        let (blame, raw) = match split_blame(raw) {
            Some((blame, text)) => (Some(blame), text),
            None => (None, raw),
        };

        if self.line == 1 {
            if let Some(version) = raw.strip_prefix(SignatureFormat::HEADER_PREFIX) {
                self.format = match SignatureFormat::from_header_version(version) {
                    Some(format) => format,
                    None => {
                        self.report(raw, ParseError::UnknownFormat(version.to_owned()));
                        SignatureFormat::V2
                    }
                };
                return None;
            }
        }

        if raw.starts_with("package") {
            match parser::parse_package(self.line, raw, blame) {
                Ok(package) => {
                    self.packages.push(package.clone());
                    self.package = Some(package);
                }
                Err(e) => {
                    self.package = None;
                    self.report(raw, e);
                }
            }
        } else if raw.starts_with("  ") && !raw.starts_with("    ") && raw.ends_with('{') {
            if let Some(unclosed) = self.class.take() {
                self.report_unclosed(unclosed);
            }
            self.orphaned = false;
            let parsed = match &self.package {
                Some(package) => parser::parse_class(package, self.line, raw, blame, self.format),
                None => Err(ParseError::OutsidePackage),
            };
            match parsed {
                Ok(class) => self.class = Some(class),
                Err(e) => {
                    self.orphaned = true;
                    self.report(raw, e);
                }
            }
        } else if METHOD_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            let parsed = match &self.class {
                Some(class) => parser::parse_method(class, self.line, raw, blame),
                None if self.orphaned => return None,
                None => Err(ParseError::OutsideClass),
            };
            match (parsed, self.class.as_mut()) {
                (Ok(method), Some(class)) => class.methods.push(method),
                (Ok(_), None) => {}
                (Err(e), _) => self.report(raw, e),
            }
        } else if FIELD_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            let parsed = match &self.class {
                Some(class) => parser::parse_field(class, self.line, raw, blame),
                None if self.orphaned => return None,
                None => Err(ParseError::OutsideClass),
            };
            match (parsed, self.class.as_mut()) {
                (Ok(field), Some(class)) => class.fields.push(field),
                (Ok(_), None) => {}
                (Err(e), _) => self.report(raw, e),
            }
        } else if raw.starts_with("  }") {
            self.orphaned = false;
            return self.class.take();
        }
        None
    }
}

impl<I, S> Iterator for ClassStream<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Class;

    fn next(&mut self) -> Option<Class> {
        while let Some(raw) = self.lines.next() {
            self.line += 1;
            if let Some(class) = self.feed(raw.as_ref()) {
                return Some(class);
            }
        }
        if let Some(unclosed) = self.class.take() {
            self.report_unclosed(unclosed);
        }
        None
    }
}

/// Split a `git blame` prefix (`<sha> (<author> ...) <text>`) off a line.
fn split_blame(raw: &str) -> Option<(Blame, &str)> {
    let (commit, rest) = raw.split_once(' ')?;
    if commit.len() < 7
        || !commit
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return None;
    }
    let rest = rest.strip_prefix("(<")?;
    let (author, rest) = rest.split_once('>')?;
    if author.is_empty() {
        return None;
    }
    let close = rest.get(1..)?.find(") ")? + 1;
    let text = &rest[close + 2..];
    if text.is_empty() {
        return None;
    }
    Some((
        Blame {
            commit: commit.to_owned(),
            author: author.to_owned(),
        },
        text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;

    const V2_DUMP: &str = r#"// Signature format: 2.0
package android.app {

  public final class Activity {
    ctor public Activity();
    method public void finish();
    field public static final int RESULT_OK = -1; // 0xffffffff
  }

  public final class WallpaperColors implements android.os.Parcelable {
    ctor public WallpaperColors(android.os.Parcel);
    method public int describeContents();
    field public static final android.os.Parcelable.Creator<android.app.WallpaperColors> CREATOR;
  }

}

"#;

    #[test]
    fn yields_classes_with_members_in_file_order() {
        let mut stream = ClassStream::new(V2_DUMP.lines(), "current.txt");
        let classes: Vec<Class> = stream.by_ref().collect();
        assert_eq!(stream.format(), SignatureFormat::V2);
        assert!(stream.diagnostics().is_empty(), "{:?}", stream.diagnostics());

        let names: Vec<&str> = classes.iter().map(|c| c.fullname.as_str()).collect();
        assert_eq!(
            names,
            vec!["android.app.Activity", "android.app.WallpaperColors"]
        );

        let activity = &classes[0];
        assert_eq!(activity.line, 4);
        assert_eq!(activity.constructors().count(), 1);
        assert_eq!(activity.plain_methods().count(), 1);
        assert_eq!(activity.fields[0].value.as_deref(), Some("-1"));
        assert_eq!(activity.fields[0].owner, "android.app.Activity");

        let colors = &classes[1];
        assert_eq!(colors.implements.as_deref(), Some("android.os.Parcelable"));
        assert_eq!(
            colors.constructors().next().unwrap().arg_types(),
            vec!["android.os.Parcel"]
        );
        assert_eq!(colors.fields[0].typ, "android.os.Parcelable.Creator");

        let (packages, _) = stream.into_parts();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name, "android.app");
    }

    #[test]
    fn no_header_means_legacy_format() {
        let dump = "package a {\n  public class B {\n    method public java.lang.String name();\n  }\n}\n";
        let mut stream = ClassStream::new(dump.lines(), "legacy.txt");
        let class = stream.next().expect("class");
        assert_eq!(class.format, SignatureFormat::V1);
        assert_eq!(class.methods[0].typ, "java.lang.String");
        assert!(stream.next().is_none());
    }

    #[test]
    fn bad_lines_become_diagnostics_and_parsing_continues() {
        let dump = [
            "// Signature format: 2.0",
            "package p {",
            "  public class A {",
            "    method public void ok();",
            "    method public void broken(;",
            "    field public String S = \"unterminated;",
            "    field public int N = 1;",
            "  }",
            "  public widget W {",
            "    method public void skipped();",
            "  }",
            "  public class C {",
            "  }",
            "}",
        ];
        let mut stream = ClassStream::new(dump, "bad.txt");
        let classes: Vec<Class> = stream.by_ref().collect();
        let names: Vec<&str> = classes.iter().map(|c| c.fullname.as_str()).collect();
        assert_eq!(names, vec!["p.A", "p.C"]);
        assert_eq!(classes[0].methods.len(), 1);
        assert_eq!(classes[0].fields.len(), 1);

        let diags = stream.diagnostics();
        let lines: Vec<u32> = diags.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![5, 6, 9]);
        assert_eq!(diags[0].kind, DiagnosticKind::Parse);
        assert_eq!(diags[1].kind, DiagnosticKind::Lex);
        assert!(diags.iter().all(|d| d.file == "bad.txt"));
    }

    #[test]
    fn unknown_format_is_reported() {
        let dump = ["// Signature format: 9.0", "package p {", "  public class A {", "  }"];
        let mut stream = ClassStream::new(dump, "f.txt");
        assert_eq!(stream.by_ref().count(), 1);
        assert_eq!(stream.diagnostics().len(), 1);
        assert!(stream.diagnostics()[0].message.contains("9.0"));
    }

    #[test]
    fn unclosed_class_at_end_of_input_is_reported() {
        let dump = [
            "package p {",
            "  public class Foo {",
            "  }",
            "  public class Unclosed {",
            "    method public void f();",
        ];
        let mut stream = ClassStream::new(dump, "f.txt");
        let names: Vec<String> = stream.by_ref().map(|c| c.fullname).collect();
        assert_eq!(names, vec!["p.Foo"]);
        assert!(stream.next().is_none());

        let diags = stream.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 4);
        assert_eq!(diags[0].kind, DiagnosticKind::Parse);
        assert!(diags[0].message.contains("p.Unclosed"));
    }

    #[test]
    fn class_interrupted_by_another_header_is_reported() {
        let dump = [
            "package p {",
            "  public class First {",
            "  public class Second {",
            "  }",
        ];
        let mut stream = ClassStream::new(dump, "f.txt");
        let names: Vec<String> = stream.by_ref().map(|c| c.fullname).collect();
        assert_eq!(names, vec!["p.Second"]);
        let lines: Vec<u32> = stream.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2]);
    }

    #[test]
    fn member_outside_class_is_reported() {
        let dump = ["package p {", "    method public void f();"];
        let mut stream = ClassStream::new(dump, "f.txt");
        assert!(stream.next().is_none());
        assert_eq!(stream.diagnostics().len(), 1);
    }

    #[test]
    fn blame_prefix_is_split_off() {
        let dump = [
            "package p {",
            "1a2b3c4d (<dev@example.com> 2018-01-01 12:00:00 +0000 3)   public class A {",
            "1a2b3c4d (<dev@example.com> 2018-01-01 12:00:00 +0000 4)     method public void f();",
            "  }",
        ];
        let class = ClassStream::new(dump, "blame.txt").next().expect("class");
        let blame = class.blame.as_ref().expect("blame");
        assert_eq!(blame.commit, "1a2b3c4d");
        assert_eq!(blame.author, "dev@example.com");
        assert_eq!(class.fullname, "p.A");
        assert_eq!(class.methods.len(), 1);
        assert!(class.methods[0].blame.is_some());
    }

    #[test]
    fn split_blame_rejects_plain_lines() {
        assert!(split_blame("package android.app {").is_none());
        assert!(split_blame("  public class A {").is_none());
        assert!(split_blame("abc (<x> y) z").is_none());
    }
}
