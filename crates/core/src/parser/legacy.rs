//! Format 1 ("legacy") declarations.
//!
//! The old layout is positional rather than grammatical: generics are
//! dropped wholesale, modifier words may appear in any order and the first
//! two remaining words are the type and the name.
use super::declarations::{FIELD_KINDS, METHOD_KINDS};
use super::types::elide_java_lang;
use super::{ClassHeader, FieldSig, LineParser, MethodSig};
use crate::error::ParseError;
use crate::lexer::{self, Token, TokenKind};
use crate::model::{MethodKind, Modifiers, Parameter};

const CLASS_KINDS: &[&str] = &["class", "interface", "@interface", "enum"];

const METHOD_MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "static",
    "final",
    "deprecated",
    "abstract",
    "default",
    "operator",
    "synchronized",
    "native",
    "strictfp",
];

const FIELD_MODIFIERS: &[&str] = &[
    "volatile",
    "transient",
    "public",
    "protected",
    "static",
    "final",
    "deprecated",
];

/// Tokenize and drop `<...>` groups and `@Annotation(...)` usages.
fn simplified_tokens(raw: &str) -> Result<Vec<Token>, ParseError> {
    let tokens = lexer::tokenize(raw)?;
    let mut out = Vec::with_capacity(tokens.len());
    let mut generic_depth = 0usize;
    let mut iter = tokens.into_iter().peekable();
    while let Some(t) = iter.next() {
        match t.kind {
            TokenKind::Punct if t.is("<") => generic_depth += 1,
            TokenKind::Punct if t.is(">") && generic_depth > 0 => generic_depth -= 1,
            _ if generic_depth > 0 => {}
            TokenKind::At => {
                // annotation name, then an optional argument list
                iter.next();
                if iter.peek().is_some_and(|n| n.is("(")) {
                    let mut depth = 0usize;
                    for n in iter.by_ref() {
                        if n.is("(") {
                            depth += 1;
                        } else if n.is(")") {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                    }
                }
            }
            _ => out.push(t),
        }
    }
    Ok(out)
}

fn type_with_suffixes(p: &mut LineParser) -> Result<String, ParseError> {
    let mut typ = elide_java_lang(&p.parse_name()?);
    while p.lookahead_kind() == Some(TokenKind::Array) {
        p.pos += 1;
        typ.push_str("[]");
    }
    Ok(typ)
}

fn take_modifiers(p: &mut LineParser, allowed: &[&str], modifiers: &mut Modifiers) {
    while let Some(t) = p.lookahead() {
        if !allowed.contains(&t.text.as_str()) {
            break;
        }
        modifiers.insert(t.text.clone());
        p.pos += 1;
    }
}

pub(super) fn parse_class_header(raw: &str) -> Result<ClassHeader, ParseError> {
    let tokens = simplified_tokens(raw)?;
    let kind_at = tokens
        .iter()
        .position(|t| CLASS_KINDS.contains(&t.text.as_str()))
        .ok_or_else(|| ParseError::Unrecognized(format!("funky class type {}", raw.trim())))?;

    let mut modifiers: Modifiers = tokens[..=kind_at].iter().map(|t| t.text.clone()).collect();
    if tokens[kind_at].is("enum") {
        modifiers.insert("final");
    }

    let mut p = LineParser::from_tokens(tokens[kind_at + 1..].to_vec());
    let name = p.parse_name()?;
    let mut extends_all = Vec::new();
    let mut implements_all = Vec::new();
    while let Some(t) = p.lookahead() {
        let clause = t.text.clone();
        p.pos += 1;
        match clause.as_str() {
            "extends" => extends_all.push(elide_java_lang(&p.parse_name()?)),
            "implements" => implements_all.push(elide_java_lang(&p.parse_name()?)),
            _ => {}
        }
    }

    Ok(ClassHeader {
        modifiers,
        annotations: Vec::new(),
        name,
        extends_all,
        implements_all,
    })
}

pub(super) fn parse_method(raw: &str) -> Result<MethodSig, ParseError> {
    let mut p = LineParser::from_tokens(simplified_tokens(raw)?);
    let kind_word = p.expect_one_of(METHOD_KINDS)?;
    let mut modifiers = Modifiers::new();
    modifiers.insert(kind_word.as_str());
    take_modifiers(&mut p, METHOD_MODIFIERS, &mut modifiers);

    let (kind, typ) = if kind_word == "ctor" {
        (MethodKind::Ctor, "ctor".to_owned())
    } else {
        (MethodKind::Method, type_with_suffixes(&mut p)?)
    };
    let name = p.parse_name()?;

    let mut parameters = Vec::new();
    p.expect("(")?;
    if !p.parse_if(")") {
        loop {
            let mut typ = type_with_suffixes(&mut p)?;
            if p.parse_if("...") {
                typ.push_str("...");
            }
            let mut param = Parameter::of_type(typ);
            if p.lookahead_kind() == Some(TokenKind::Word) {
                param.name = Some(p.parse_name()?);
            }
            parameters.push(param);
            if p.parse_if(")") {
                break;
            }
            p.expect(",")?;
        }
    }

    let mut throws = Vec::new();
    if p.parse_if("throws") {
        loop {
            throws.push(type_with_suffixes(&mut p)?);
            if !p.parse_if(",") {
                break;
            }
        }
    }
    // annotation type elements
    let default_value = if p.parse_if("default") {
        Some(p.parse_expression(&[";"])?)
    } else {
        None
    };
    p.expect(";")?;
    p.expect_eof()?;

    Ok(MethodSig {
        kind,
        modifiers,
        annotations: Vec::new(),
        typ,
        name,
        parameters,
        throws,
        default_value,
    })
}

pub(super) fn parse_field(raw: &str) -> Result<FieldSig, ParseError> {
    let mut p = LineParser::from_tokens(simplified_tokens(raw)?);
    let kind = p.expect_one_of(FIELD_KINDS)?;
    let mut modifiers = Modifiers::new();
    modifiers.insert(kind.as_str());
    take_modifiers(&mut p, FIELD_MODIFIERS, &mut modifiers);

    let typ = type_with_suffixes(&mut p)?;
    let name = p.parse_name()?;
    let value = if p.parse_if("=") {
        Some(p.parse_expression(&[";"])?)
    } else {
        None
    };
    p.expect(";")?;
    p.expect_eof()?;

    Ok(FieldSig {
        modifiers,
        annotations: Vec::new(),
        typ,
        name,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_header() {
        let h = parse_class_header(
            "  public static final deprecated class Foo.Bar extends java.util.AbstractList<E> \
             implements java.util.List<E> java.io.Serializable {",
        )
        .unwrap();
        assert_eq!(h.name, "Foo.Bar");
        for m in ["public", "static", "final", "deprecated", "class"] {
            assert!(h.modifiers.contains(m), "missing {}", m);
        }
        assert_eq!(h.extends_all, vec!["java.util.AbstractList"]);
        assert_eq!(h.implements_all, vec!["java.util.List"]);
    }

    #[test]
    fn class_header_without_kind_fails() {
        assert!(matches!(
            parse_class_header("  public Foo {"),
            Err(ParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn method() {
        let m = parse_method(
            "    method public static <T> java.util.List<T> of(T[], int...) throws java.io.IOException, Exception;",
        )
        .unwrap();
        assert_eq!(m.kind, MethodKind::Method);
        assert_eq!(m.typ, "java.util.List");
        assert_eq!(m.name, "of");
        let args: Vec<&str> = m.parameters.iter().map(|p| p.typ.as_str()).collect();
        assert_eq!(args, vec!["T[]", "int..."]);
        assert_eq!(m.throws, vec!["java.io.IOException", "java.lang.Exception"]);
        assert!(m.modifiers.contains("static"));
    }

    #[test]
    fn ctor() {
        let m = parse_method("    ctor public deprecated Foo(android.content.Context);").unwrap();
        assert_eq!(m.kind, MethodKind::Ctor);
        assert_eq!(m.typ, "ctor");
        assert_eq!(m.name, "Foo");
        assert!(m.modifiers.contains("deprecated"));
        assert_eq!(m.parameters[0].typ, "android.content.Context");
    }

    #[test]
    fn annotation_element_default() {
        let m = parse_method(r#"    method public abstract java.lang.String value() default "";"#).unwrap();
        assert_eq!(m.name, "value");
        assert_eq!(m.typ, "java.lang.String");
        assert_eq!(m.default_value.as_deref(), Some(r#""""#));

        let m = parse_method("    method public abstract int[] ids() default {1, 2};").unwrap();
        assert_eq!(m.typ, "int[]");
        assert_eq!(m.default_value.as_deref(), Some("{ 1 , 2 }"));
    }

    #[test]
    fn strictfp_method() {
        let m = parse_method("    method public static strictfp double abs(double);").unwrap();
        assert_eq!(m.name, "abs");
        assert_eq!(m.typ, "double");
        assert!(m.modifiers.contains("strictfp"));
        assert!(m.default_value.is_none());
    }

    #[test]
    fn field() {
        let f = parse_field(
            r#"    field public static final java.lang.String ACTION = "android.intent.action.MAIN";"#,
        )
        .unwrap();
        assert_eq!(f.typ, "java.lang.String");
        assert_eq!(f.name, "ACTION");
        assert_eq!(f.value.as_deref(), Some(r#""android.intent.action.MAIN""#));

        let f = parse_field("    field public static final int FLAG = 16; // 0x10").unwrap();
        assert_eq!(f.typ, "int");
        assert_eq!(f.value.as_deref(), Some("16"));
        assert!(f.modifiers.contains("final"));
    }
}
