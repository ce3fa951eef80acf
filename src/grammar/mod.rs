mod type_detection;

pub use self::type_detection::language_for_path;

use crate::errors::*;
use crate::token::{self, LexerState, Token};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::{event, Level};

/// Something that can hand out grammars by language identifier.
pub trait GrammarProvider {
    /// Looks up the grammar for `language`. A miss isn't an error;
    /// callers are expected to fall back to unstyled output.
    fn resolve_grammar(&self, language: &str) -> Option<Grammar<'_>>;
}

/// Anything that tokenizes a stream one line at a time, threading an
/// opaque state from each line to the next.
pub trait LineTokenizer {
    fn tokenize_line(&self, line: &str, prior: Option<LexerState>) -> Result<(Vec<Token>, LexerState)>;
}

/// A language's lexical rules, able to tokenize one line at a time.
#[derive(Clone, Copy)]
pub struct Grammar<'a> {
    syntax: &'a SyntaxReference,
    syntax_set: &'a SyntaxSet,
}

impl<'a> Grammar<'a> {
    pub fn new(syntax: &'a SyntaxReference, syntax_set: &'a SyntaxSet) -> Grammar<'a> {
        Grammar{ syntax, syntax_set }
    }

    /// The grammar's human-readable name (e.g. "Rust").
    pub fn name(&self) -> &str {
        &self.syntax.name
    }

    /// Tokenizes `line`, resuming from `prior` (`None` for a stream's first
    /// line), and returns the line's tokens along with the state to use for
    /// the next line.
    ///
    /// # Examples
    ///
    /// ```
    /// use shcat::grammar::{GrammarProvider, SyntaxLibrary};
    ///
    /// let library = SyntaxLibrary::new();
    /// let grammar = library.resolve_grammar("rs").unwrap();
    /// let (tokens, state) = grammar.tokenize_line("/* open", None).unwrap();
    /// let (tokens, _) = grammar.tokenize_line("still open */", Some(state)).unwrap();
    /// assert!(tokens[0].has_scope("comment.block"));
    /// ```
    pub fn tokenize_line(&self, line: &str, prior: Option<LexerState>) -> Result<(Vec<Token>, LexerState)> {
        token::tokenize(line, prior, self.syntax, self.syntax_set)
    }
}

impl<'a> LineTokenizer for Grammar<'a> {
    fn tokenize_line(&self, line: &str, prior: Option<LexerState>) -> Result<(Vec<Token>, LexerState)> {
        Grammar::tokenize_line(self, line, prior)
    }
}

/// The grammars bundled with syntect, in their newline-aware form.
pub struct SyntaxLibrary {
    syntax_set: SyntaxSet,
}

impl SyntaxLibrary {
    pub fn new() -> SyntaxLibrary {
        SyntaxLibrary{ syntax_set: SyntaxSet::load_defaults_newlines() }
    }

    pub fn from_syntax_set(syntax_set: SyntaxSet) -> SyntaxLibrary {
        SyntaxLibrary{ syntax_set }
    }
}

impl Default for SyntaxLibrary {
    fn default() -> Self {
        SyntaxLibrary::new()
    }
}

impl GrammarProvider for SyntaxLibrary {
    fn resolve_grammar(&self, language: &str) -> Option<Grammar<'_>> {
        // Extensions are the common case; fall back to syntax names
        // so that identifiers like "rust" or "Makefile" resolve too.
        let syntax = self.syntax_set.find_syntax_by_extension(language)
            .or_else(|| self.syntax_set.find_syntax_by_token(language));

        match syntax {
            Some(syntax) => {
                event!(Level::DEBUG, "Resolved grammar {} for {}", syntax.name, language);
                Some(Grammar::new(syntax, &self.syntax_set))
            },
            None => {
                event!(Level::DEBUG, "No grammar available for {}", language);
                None
            }
        }
    }
}
