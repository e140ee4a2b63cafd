//! Phase explosion for the `LC Phase` column.
//!
//! Upstream exports write multiple phases as a bracketed list of quoted
//! tokens, e.g. `[ "Design", 'Build' ]`. Anything not wrapped in brackets is
//! a single scalar phase.

use crate::config::EmptyPhasePolicy;

/// Parse a bracketed list.
///
/// Returns `None` when the trimmed value does not both start with `[` and
/// end with `]`; the caller then treats it as a scalar. Inside the brackets
/// pieces are split on `,`, trimmed, stripped of one layer of double then
/// single quotes, and dropped when empty.
pub fn parse_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;

    Some(
        inner
            .split(',')
            .map(clean_token)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn clean_token(piece: &str) -> &str {
    let token = piece.trim();
    let token = strip_layer(token, '"');
    strip_layer(token, '\'')
}

fn strip_layer(s: &str, quote: char) -> &str {
    let s = s.strip_prefix(quote).unwrap_or(s);
    s.strip_suffix(quote).unwrap_or(s)
}

/// Split a raw `LC Phase` value into phases, in source order.
///
/// An empty scalar yields no phases.
pub fn explode_phases(raw: &str) -> Vec<String> {
    match parse_list(raw) {
        Some(tokens) => tokens,
        None => {
            let scalar = raw.trim();
            if scalar.is_empty() {
                Vec::new()
            } else {
                vec![scalar.to_string()]
            }
        }
    }
}

/// Phases to emit for a row, after applying the empty-phase policy.
pub fn resolve_phases(raw: &str, policy: EmptyPhasePolicy) -> Vec<String> {
    let phases = explode_phases(raw);
    match (phases.is_empty(), policy) {
        (true, EmptyPhasePolicy::Blank) => vec![String::new()],
        _ => phases,
    }
}
