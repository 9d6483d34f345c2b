use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifiers, dotted names, keywords and numbers -- distinguished in the parser
    Word,
    /// Double-quoted string literal, quotes and escapes kept verbatim
    Str,
    /// Annotation marker `@`
    At,
    /// The `@interface` keyword
    AtInterface,
    /// Array dimension marker `[]`
    Array,
    /// Varargs marker `...`
    Ellipsis,
    /// Any other single character: `( ) , ; = { } < > ? !` ...
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

/// Tokenize one line of signature text.
pub fn tokenize(raw: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut pos = 0usize;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        // Line comment
        if c == '/' && chars.get(pos + 1) == Some(&'/') {
            break;
        }

        // String literal
        if c == '"' {
            let start = pos;
            pos += 1;
            loop {
                match chars.get(pos).copied() {
                    None => return Err(LexError::UnterminatedString { column: start }),
                    Some('\\') => {
                        if pos + 1 >= chars.len() {
                            return Err(LexError::UnterminatedString { column: start });
                        }
                        pos += 2;
                    }
                    Some('"') => {
                        pos += 1;
                        break;
                    }
                    Some(_) => pos += 1,
                }
            }
            let s: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::Str, s));
            continue;
        }

        if c == '@' {
            let word: String = chars[pos + 1..]
                .iter()
                .take_while(|c| is_word_char(**c))
                .collect();
            if word == "interface" {
                pos += 1 + word.len();
                tokens.push(Token::new(TokenKind::AtInterface, "@interface"));
            } else {
                pos += 1;
                tokens.push(Token::new(TokenKind::At, "@"));
            }
            continue;
        }

        // Array dimension: `[` whitespace* `]`
        if c == '[' {
            let mut end = pos + 1;
            while end < chars.len() && chars[end].is_whitespace() {
                end += 1;
            }
            if chars.get(end) == Some(&']') {
                pos = end + 1;
                tokens.push(Token::new(TokenKind::Array, "[]"));
            } else {
                pos += 1;
                tokens.push(Token::new(TokenKind::Punct, "["));
            }
            continue;
        }

        if starts_ellipsis(&chars, pos) {
            pos += 3;
            tokens.push(Token::new(TokenKind::Ellipsis, "..."));
            continue;
        }

        // Signed numeric literal, e.g. `= -1` or `(-0.5f)`
        let signed = c == '-'
            && chars.get(pos + 1).is_some_and(|n| n.is_ascii_digit())
            && !tokens.last().is_some_and(ends_operand);

        if signed || is_word_char(c) {
            let start = pos;
            pos += 1;
            let numeric = signed || c.is_ascii_digit();
            while pos < chars.len() {
                let ch = chars[pos];
                if ch == '.' && starts_ellipsis(&chars, pos) {
                    break;
                }
                if is_word_char(ch) {
                    pos += 1;
                } else if numeric && (ch == '-' || ch == '+') && is_exponent(&chars[start..pos]) {
                    pos += 1;
                } else {
                    break;
                }
            }
            let word: String = chars[start..pos].iter().collect();
            tokens.push(Token::new(TokenKind::Word, word));
            continue;
        }

        tokens.push(Token::new(TokenKind::Punct, c.to_string()));
        pos += 1;
    }

    Ok(tokens)
}

/// Tokenize and keep only the token text.
pub fn tokenize_text(raw: &str) -> Result<Vec<String>, LexError> {
    Ok(tokenize(raw)?.into_iter().map(|t| t.text).collect())
}

fn starts_ellipsis(chars: &[char], pos: usize) -> bool {
    chars.len() >= pos + 3 && chars[pos..pos + 3] == ['.', '.', '.']
}

fn ends_operand(tok: &Token) -> bool {
    match tok.kind {
        TokenKind::Word | TokenKind::Str => true,
        TokenKind::Punct => tok.text == ")" || tok.text == "]",
        _ => false,
    }
}

/// True when the numeric literal scanned so far ends in a decimal exponent marker.
fn is_exponent(literal: &[char]) -> bool {
    let hex = literal.iter().any(|c| *c == 'x' || *c == 'X');
    !hex && matches!(literal.last(), Some('e' | 'E'))
}
