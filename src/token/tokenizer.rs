use crate::errors::*;
use crate::token::{LexerState, Token};
use crate::util::LineBoundaries;
use syntect::parsing::{Scope, ScopeStack, ScopeStackOp, SyntaxReference, SyntaxSet};

/// Tokenizes a single line (without its terminator), picking up from the
/// state left behind by the previous line of the same stream. Pass `None`
/// for the first line.
///
/// The returned tokens partition the line exactly; an empty line yields a
/// single, empty token. The returned state must be handed to the call for
/// the following line.
pub fn tokenize(
    line: &str,
    prior: Option<LexerState>,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
) -> Result<(Vec<Token>, LexerState)> {
    let mut state = prior.unwrap_or_else(|| LexerState::new(syntax));

    // The syntax set expects lines to carry their newline; multi-line rules
    // rely on matching it. Offsets that land on it are clamped off below.
    let mut terminated = String::with_capacity(line.len() + 1);
    terminated.push_str(line);
    terminated.push('\n');
    let events = state.parser.parse_line(&terminated, syntax_set)?;

    let tokens = build_tokens(line, &events, &mut state.scopes, syntax.scope)?;

    Ok((tokens, state))
}

fn build_tokens(
    line: &str,
    events: &[(usize, ScopeStackOp)],
    scopes: &mut ScopeStack,
    root: Scope,
) -> Result<Vec<Token>> {
    let boundaries = LineBoundaries::new(line);
    let mut tokens = Vec::new();
    let mut start = 0;

    for (event_offset, scope_change) in events {
        // Several events can share an offset; apply all of them and only
        // capture a token once we've moved past its start.
        let offset = boundaries.clamp(*event_offset);
        if offset > start {
            tokens.push(Token{
                start,
                end: offset,
                scopes: innermost_first(scopes, root),
            });
            start = offset;
        }

        scopes.apply(scope_change).map_err(|error| {
            ErrorKind::InvalidScopeOperation(format!("{:?}", error))
        })?;
    }

    // The rest of the line didn't trigger a scope change;
    // categorize it with the last known scopes.
    if start < line.len() || tokens.is_empty() {
        tokens.push(Token{
            start,
            end: line.len(),
            scopes: innermost_first(scopes, root),
        });
    }

    Ok(tokens)
}

fn innermost_first(scopes: &ScopeStack, root: Scope) -> Vec<Scope> {
    let mut list: Vec<Scope> = scopes.as_slice().iter().rev().cloned().collect();
    if list.is_empty() {
        list.push(root);
    }

    list
}
