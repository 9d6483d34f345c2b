use super::LineParser;
use crate::error::ParseError;

impl LineParser {
    /// Collect a value expression up to (not including) one of `terminators`
    /// at bracket depth zero.
    ///
    /// Tokens are joined with single spaces, so `(0.0/0.0)` becomes
    /// `( 0.0 / 0.0 )` regardless of the original spacing. A lone string
    /// literal is returned verbatim, quotes included.
    pub(super) fn parse_expression(&mut self, terminators: &[&str]) -> Result<String, ParseError> {
        let mut parts: Vec<String> = Vec::new();
        let mut depth = 0usize;
        loop {
            let Some(t) = self.lookahead() else {
                let expected = terminators
                    .iter()
                    .map(|t| format!("`{}`", t))
                    .collect::<Vec<_>>()
                    .join(" or ");
                return Err(self.unexpected_end(&expected));
            };
            if depth == 0 && terminators.contains(&t.text.as_str()) {
                break;
            }
            match t.text.as_str() {
                "(" | "{" => depth += 1,
                ")" | "}" => depth = depth.saturating_sub(1),
                _ => {}
            }
            parts.push(t.text.clone());
            self.pos += 1;
        }
        if parts.is_empty() {
            return Err(ParseError::Unrecognized(
                "missing value expression".to_owned(),
            ));
        }
        Ok(parts.join(" "))
    }
}
