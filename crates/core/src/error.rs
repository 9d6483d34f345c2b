use serde::{Deserialize, Serialize};

/// A malformed token stream on a single line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unterminated string literal starting at column {column}")]
    UnterminatedString { column: usize },
}

/// A declaration line whose tokens do not match any recognized shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected `{expected}` but found `{found}` in {tokens:?}")]
    Expected {
        expected: String,
        found: String,
        tokens: Vec<String>,
    },

    #[error("expected one of {expected:?} but found `{found}` in {tokens:?}")]
    ExpectedOneOf {
        expected: Vec<&'static str>,
        found: String,
        tokens: Vec<String>,
    },

    #[error("unexpected end of declaration while looking for {expected} in {tokens:?}")]
    UnexpectedEnd {
        expected: String,
        tokens: Vec<String>,
    },

    #[error("unclosed `{open}` group in {tokens:?}")]
    Unclosed { open: String, tokens: Vec<String> },

    #[error("expected end of declaration, but {rest:?} has not been parsed")]
    Trailing { rest: Vec<String> },

    #[error("unrecognized declaration: {0}")]
    Unrecognized(String),

    #[error("member declared outside of a class")]
    OutsideClass,

    #[error("class declared outside of a package")]
    OutsidePackage,

    #[error("class `{0}` is never closed; its declaration is dropped")]
    UnclosedClass(String),

    #[error("unknown signature format `{0}`")]
    UnknownFormat(String),
}

/// Misuse of the retry cursor. This is an implementation defect in the
/// caller, never a property of the input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatchProtocolError {
    #[error("retry requested before any element was yielded")]
    NothingToRetry,
    #[error("retry requested twice without an intervening next()")]
    DoubleRetry,
    #[error("retry requested after the cursor was exhausted")]
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Lex,
    Parse,
}

/// A lexical or parse failure, attributed to the file and line it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub kind: DiagnosticKind,
    pub message: String,
    pub raw: String,
}

impl Diagnostic {
    pub fn new(file: &str, line: u32, raw: &str, err: &ParseError) -> Self {
        let kind = match err {
            ParseError::Lex(_) => DiagnosticKind::Lex,
            _ => DiagnosticKind::Parse,
        };
        Diagnostic {
            file: file.to_owned(),
            line,
            kind,
            message: err.to_string(),
            raw: raw.trim().to_owned(),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.file,
            "kind":    self.kind,
            "line":    self.line,
            "message": self.message,
            "raw":     self.raw,
        })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}
