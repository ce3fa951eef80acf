mod lexer_state;
mod tokenizer;

pub use self::lexer_state::LexerState;
pub use self::tokenizer::tokenize;

use crate::util::LineBoundaries;
use syntect::parsing::Scope;

/// A scope-annotated range of a single line.
///
/// `start` and `end` are byte offsets forming a half-open range into the
/// line the token was produced from. `scopes` runs from the innermost
/// (most specific) scope to the outermost one, and is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub scopes: Vec<Scope>,
}

impl Token {
    /// Returns the token's slice of `line`, with its offsets clamped so that
    /// they always describe a valid (possibly empty) range of the line.
    ///
    /// # Examples
    ///
    /// ```
    /// use shcat::token::Token;
    /// use syntect::parsing::Scope;
    ///
    /// let token = Token{ start: 4, end: 99, scopes: vec![Scope::new("source").unwrap()] };
    /// assert_eq!(token.text("let value"), "value");
    /// ```
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        self.text_in(&LineBoundaries::new(line))
    }

    /// Like `text`, reusing boundaries already computed for the line.
    pub fn text_in<'a>(&self, line: &LineBoundaries<'a>) -> &'a str {
        line.slice(self.start, self.end)
    }

    /// Whether any of the token's scopes falls under `prefix`,
    /// using dot-delimited prefix matching.
    pub fn has_scope(&self, prefix: &str) -> bool {
        match Scope::new(prefix) {
            Ok(prefix) => self.scopes.iter().any(|&scope| prefix.is_prefix_of(scope)),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Token;
    use crate::util::LineBoundaries;
    use syntect::parsing::Scope;

    fn token(start: usize, end: usize, scopes: &[&str]) -> Token {
        Token{
            start,
            end,
            scopes: scopes.iter().map(|s| Scope::new(s).unwrap()).collect()
        }
    }

    #[test]
    fn text_returns_the_token_range() {
        assert_eq!(token(0, 3, &["source"]).text("let x"), "let");
    }

    #[test]
    fn text_clamps_end_offsets_past_the_line() {
        assert_eq!(token(2, 40, &["source"]).text("abcd"), "cd");
    }

    #[test]
    fn text_is_empty_when_start_is_past_the_line() {
        assert_eq!(token(10, 40, &["source"]).text("abcd"), "");
    }

    #[test]
    fn text_is_empty_when_start_is_after_end() {
        assert_eq!(token(3, 1, &["source"]).text("abcd"), "");
    }

    #[test]
    fn text_in_matches_text() {
        let line = "let value = 1;";
        let boundaries = LineBoundaries::new(line);
        let token = token(4, 9, &["source"]);
        assert_eq!(token.text_in(&boundaries), token.text(line));
        assert_eq!(token.text_in(&boundaries), "value");
    }

    #[test]
    fn has_scope_uses_prefix_matching() {
        let comment = token(0, 2, &["comment.line.double-slash.rust", "source.rust"]);
        assert!(comment.has_scope("comment"));
        assert!(comment.has_scope("comment.line"));
        assert!(comment.has_scope("source.rust"));
        assert!(!comment.has_scope("comment.block"));
        assert!(!comment.has_scope("source.c"));
    }
}
