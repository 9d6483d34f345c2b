//! Declaration-line parser.
//!
//! Each entry point takes one line of signature text plus the context the
//! line lives in (owning package or class, signature format) and builds a
//! single entity. Format 2 lines go through a token-level grammar; format 1
//! lines are parsed positionally (see `legacy`).
use crate::error::ParseError;
use crate::lexer::{self, Token, TokenKind};
use crate::model::{Blame, Class, Field, Method, Modifiers, Package, SignatureFormat};

mod declarations;
mod expressions;
mod legacy;
mod types;

pub use types::{elide_java_lang, JAVA_LANG_TYPES};

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

pub(crate) struct LineParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl LineParser {
    pub(crate) fn new(raw: &str) -> Result<Self, ParseError> {
        Ok(LineParser {
            tokens: lexer::tokenize(raw)?,
            pos: 0,
        })
    }

    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        LineParser { tokens, pos: 0 }
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn lookahead(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn lookahead_is(&self, text: &str) -> bool {
        self.lookahead().is_some_and(|t| t.is(text))
    }

    fn lookahead_kind(&self) -> Option<TokenKind> {
        self.lookahead().map(|t| t.kind)
    }

    fn texts(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    fn unexpected_end(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedEnd {
            expected: expected.to_owned(),
            tokens: self.texts(),
        }
    }

    fn expect(&mut self, text: &str) -> Result<(), ParseError> {
        match self.lookahead() {
            Some(t) if t.is(text) => {
                self.pos += 1;
                Ok(())
            }
            Some(t) => Err(ParseError::Expected {
                expected: text.to_owned(),
                found: t.text.clone(),
                tokens: self.texts(),
            }),
            None => Err(self.unexpected_end(&format!("`{}`", text))),
        }
    }

    fn expect_one_of(&mut self, options: &[&'static str]) -> Result<String, ParseError> {
        match self.lookahead() {
            Some(t) if options.contains(&t.text.as_str()) => {
                let text = t.text.clone();
                self.pos += 1;
                Ok(text)
            }
            Some(t) => Err(ParseError::ExpectedOneOf {
                expected: options.to_vec(),
                found: t.text.clone(),
                tokens: self.texts(),
            }),
            None => Err(self.unexpected_end(&format!("one of {:?}", options))),
        }
    }

    /// Consume the next token if it is `text`.
    fn parse_if(&mut self, text: &str) -> bool {
        if self.lookahead_is(text) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.eof() {
            Ok(())
        } else {
            Err(ParseError::Trailing {
                rest: self.tokens[self.pos..]
                    .iter()
                    .map(|t| t.text.clone())
                    .collect(),
            })
        }
    }

    /// An identifier-like token: class, member or parameter name.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        match self.lookahead() {
            Some(t) if t.kind == TokenKind::Word => {
                let name = t.text.clone();
                self.pos += 1;
                Ok(name)
            }
            Some(t) => Err(ParseError::Expected {
                expected: "name".to_owned(),
                found: t.text.clone(),
                tokens: self.texts(),
            }),
            None => Err(self.unexpected_end("name")),
        }
    }

    /// If the next token is `open`, consume through its matching `close`
    /// (nesting aware) and return the consumed tokens including both ends.
    fn skip_group(&mut self, open: &str, close: &str) -> Result<Option<Vec<String>>, ParseError> {
        let start = self.pos;
        if !self.parse_if(open) {
            return Ok(None);
        }
        let mut depth = 1usize;
        while depth > 0 {
            let Some(t) = self.lookahead() else {
                return Err(ParseError::Unclosed {
                    open: open.to_owned(),
                    tokens: self.tokens[start..].iter().map(|t| t.text.clone()).collect(),
                });
            };
            if t.is(open) {
                depth += 1;
            } else if t.is(close) {
                depth -= 1;
            }
            self.pos += 1;
        }
        Ok(Some(
            self.tokens[start..self.pos]
                .iter()
                .map(|t| t.text.clone())
                .collect(),
        ))
    }
}

// ──────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────

/// Parse a `package <name> {` line.
pub fn parse_package(line: u32, raw: &str, blame: Option<Blame>) -> Result<Package, ParseError> {
    let mut p = LineParser::new(raw)?;
    p.expect("package")?;
    let mut modifiers = Modifiers::new();
    modifiers.insert("package");
    for annotation in p.parse_annotations()? {
        if annotation == "@Deprecated" {
            modifiers.insert("deprecated");
        }
    }
    let name = p.parse_name()?;
    p.expect("{")?;
    p.expect_eof()?;
    Ok(Package {
        line,
        raw: trim_raw(raw),
        blame,
        name,
        modifiers,
    })
}

/// Parse a class header line inside `package`.
pub fn parse_class(
    package: &Package,
    line: u32,
    raw: &str,
    blame: Option<Blame>,
    format: SignatureFormat,
) -> Result<Class, ParseError> {
    let header = match format {
        SignatureFormat::V2 => LineParser::new(raw)?.parse_class_header()?,
        SignatureFormat::V1 => legacy::parse_class_header(raw)?,
    };
    let fullname = format!("{}.{}", package.name, header.name);
    let name = fullname
        .rsplit('.')
        .next()
        .unwrap_or(&header.name)
        .to_owned();
    Ok(Class {
        package: package.name.clone(),
        line,
        raw: trim_raw(raw),
        blame,
        format,
        modifiers: header.modifiers,
        annotations: header.annotations,
        fullname,
        name,
        extends: header.extends_all.first().cloned(),
        extends_all: header.extends_all,
        implements: header.implements_all.first().cloned(),
        implements_all: header.implements_all,
        methods: Vec::new(),
        fields: Vec::new(),
    })
}

/// Parse a `ctor` or `method` line belonging to `owner`.
pub fn parse_method(
    owner: &Class,
    line: u32,
    raw: &str,
    blame: Option<Blame>,
) -> Result<Method, ParseError> {
    let sig = match owner.format {
        SignatureFormat::V2 => LineParser::new(raw)?.parse_method(owner.is_annotation_type())?,
        SignatureFormat::V1 => legacy::parse_method(raw)?,
    };
    Ok(Method {
        owner: owner.fullname.clone(),
        line,
        raw: trim_raw(raw),
        blame,
        kind: sig.kind,
        modifiers: sig.modifiers,
        annotations: sig.annotations,
        typ: sig.typ,
        name: sig.name,
        parameters: sig.parameters,
        throws: sig.throws,
        default_value: sig.default_value,
    })
}

/// Parse a `field`, `property` or `enum_constant` line belonging to `owner`.
pub fn parse_field(
    owner: &Class,
    line: u32,
    raw: &str,
    blame: Option<Blame>,
) -> Result<Field, ParseError> {
    let sig = match owner.format {
        SignatureFormat::V2 => LineParser::new(raw)?.parse_field()?,
        SignatureFormat::V1 => legacy::parse_field(raw)?,
    };
    Ok(Field {
        owner: owner.fullname.clone(),
        line,
        raw: trim_raw(raw),
        blame,
        modifiers: sig.modifiers,
        annotations: sig.annotations,
        typ: sig.typ,
        name: sig.name,
        value: sig.value,
    })
}

/// Declaration text without indentation or the trailing `{`/`;`.
fn trim_raw(raw: &str) -> String {
    raw.trim_matches(|c: char| c == ' ' || c == '{' || c == ';')
        .to_owned()
}

// ──────────────────────────────────────────────
// Intermediate shapes shared by both formats
// ──────────────────────────────────────────────

pub(crate) struct ClassHeader {
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub name: String,
    pub extends_all: Vec<String>,
    pub implements_all: Vec<String>,
}

pub(crate) struct MethodSig {
    pub kind: crate::model::MethodKind,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub typ: String,
    pub name: String,
    pub parameters: Vec<crate::model::Parameter>,
    pub throws: Vec<String>,
    pub default_value: Option<String>,
}

pub(crate) struct FieldSig {
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub typ: String,
    pub name: String,
    pub value: Option<String>,
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
