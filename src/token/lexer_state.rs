use syntect::parsing::{ParseState, ScopeStack, SyntaxReference};

/// The grammar's position at a line boundary.
///
/// Produced by tokenizing one line and consumed when tokenizing the next one
/// from the same stream. It can't be inspected or built from the outside;
/// the only way to get one is to tokenize a line.
pub struct LexerState {
    pub(super) parser: ParseState,
    pub(super) scopes: ScopeStack,
}

impl LexerState {
    pub(super) fn new(syntax: &SyntaxReference) -> LexerState {
        LexerState {
            parser: ParseState::new(syntax),
            scopes: ScopeStack::new(),
        }
    }
}
