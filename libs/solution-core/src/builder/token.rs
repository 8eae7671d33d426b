//! Token parsing for vertex groups.

use std::cmp::Ordering;

use ahash::AHashSet;

use crate::locale::Collator;
use crate::text;
use crate::types::{Token, TokenValue, Vertex};

/// Values contributed by one vertex.
///
/// `orig` stays distinct from `lenient` only when the two differ beyond case
/// and punctuation; `lenient` then becomes an automatic fallback.
pub(crate) fn vertex_values<C: Collator>(
    vertex: &Vertex,
    locale: &str,
    collator: &C,
) -> Vec<TokenValue> {
    let lenient = text::nfc(&vertex.lenient);

    match vertex.orig.as_deref().map(text::nfc) {
        Some(orig) if collator.compare(&orig, &lenient, locale) != Ordering::Equal => vec![
            TokenValue::new(orig, false),
            TokenValue::new(lenient, true),
        ],
        Some(orig) => vec![TokenValue::new(orig, vertex.auto)],
        None => vec![TokenValue::new(lenient, vertex.auto)],
    }
}

/// Parse the token for a group of vertices sharing the same next position.
///
/// Returns `None` when no value survives, which prunes every path through
/// the group.
pub(crate) fn parse_group<C: Collator>(
    group: &[&Vertex],
    locale: &str,
    whitespace_delimited: bool,
    collator: &C,
) -> Option<Token> {
    let mut values: Vec<TokenValue> = group
        .iter()
        .flat_map(|vertex| vertex_values(vertex, locale, collator))
        .filter(|value| !whitespace_delimited || !text::has_inner_whitespace(&value.value))
        .collect();

    values.sort_by(|x, y| {
        collator
            .compare(&x.value, &y.value, locale)
            .then(x.is_automatic.cmp(&y.is_automatic))
            .then_with(|| x.value.cmp(&y.value))
    });

    let mut seen = AHashSet::new();
    values.retain(|value| seen.insert(value.value.clone()));

    let reference = values
        .iter()
        .position(|value| !value.is_automatic)
        .unwrap_or(0);
    if reference < values.len() {
        let value = values.remove(reference);
        values.insert(0, value);
    }

    Token::from_values(values.into_iter().map(|value| value.value).collect())
}
