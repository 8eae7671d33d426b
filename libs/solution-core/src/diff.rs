//! Character-level diff between an answer and a solution variation.
//!
//! Changed spans are split into a leading punctuation/whitespace run, the core
//! content and a trailing run. The leading and trailing runs are ignorable.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::text;
use crate::types::DiffToken;

static CHANGE_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([\p{P}\p{Z}\s]*)(.*?)([\p{P}\p{Z}\s]*)$").expect("valid change regex")
});

/// Result of diffing two strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tokens", rename_all = "snake_case")]
pub enum DiffOutcome {
    /// No significant difference.
    Equivalent,
    Changes(Vec<DiffToken>),
}

impl DiffOutcome {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Self::Equivalent)
    }

    pub fn tokens(&self) -> Option<&[DiffToken]> {
        match self {
            Self::Equivalent => None,
            Self::Changes(tokens) => Some(tokens),
        }
    }
}

/// Diff `x` (the old string) against `y` (the new string).
pub fn diff_strings(x: &str, y: &str) -> DiffOutcome {
    let x: Vec<char> = text::nfc(x).chars().collect();
    let y: Vec<char> = text::nfc(y).chars().collect();

    let tokens: Vec<DiffToken> = char_diff(&x, &y)
        .into_iter()
        .flat_map(|chunk| match chunk.kind {
            ChunkKind::Common => vec![DiffToken::common(chunk.value)],
            ChunkKind::Added | ChunkKind::Removed => split_change(&chunk),
        })
        .collect();

    if tokens.iter().any(DiffToken::is_significant) {
        DiffOutcome::Changes(tokens)
    } else {
        DiffOutcome::Equivalent
    }
}

/// Number of characters in significant tokens.
pub fn significant_char_count(tokens: &[DiffToken]) -> usize {
    tokens
        .iter()
        .filter(|token| token.is_significant())
        .map(|token| token.count)
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Common,
    Added,
    Removed,
}

#[derive(Debug)]
struct Chunk {
    kind: ChunkKind,
    value: String,
}

/// Largest LCS table filled for the changed middle of two strings. Beyond it
/// the middle is reported as one removal and one addition.
const MAX_TABLE_CELLS: usize = 1 << 22;

/// Longest-common-subsequence diff. Removals come before additions at each
/// point of change.
fn char_diff(x: &[char], y: &[char]) -> Vec<Chunk> {
    let prefix = x.iter().zip(y).take_while(|(a, b)| a == b).count();
    let suffix = x[prefix..]
        .iter()
        .rev()
        .zip(y[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let x_middle = &x[prefix..x.len() - suffix];
    let y_middle = &y[prefix..y.len() - suffix];

    let mut chunks: Vec<Chunk> = Vec::new();
    push_run(&mut chunks, ChunkKind::Common, &x[..prefix]);
    if (x_middle.len() + 1).saturating_mul(y_middle.len() + 1) > MAX_TABLE_CELLS {
        push_run(&mut chunks, ChunkKind::Removed, x_middle);
        push_run(&mut chunks, ChunkKind::Added, y_middle);
    } else {
        lcs_diff(x_middle, y_middle, &mut chunks);
    }
    push_run(&mut chunks, ChunkKind::Common, &x[x.len() - suffix..]);

    reorder_changes(chunks)
}

fn lcs_diff(x: &[char], y: &[char], chunks: &mut Vec<Chunk>) {
    let (n, m) = (x.len(), y.len());
    let width = m + 1;

    // lcs[i * width + j] = LCS length of x[i..] and y[j..]
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if x[i] == y[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        if i < n && j < m && x[i] == y[j] {
            push_char(chunks, ChunkKind::Common, x[i]);
            i += 1;
            j += 1;
        } else if j == m || (i < n && lcs[(i + 1) * width + j] >= lcs[i * width + j + 1]) {
            push_char(chunks, ChunkKind::Removed, x[i]);
            i += 1;
        } else {
            push_char(chunks, ChunkKind::Added, y[j]);
            j += 1;
        }
    }
}

fn push_char(chunks: &mut Vec<Chunk>, kind: ChunkKind, c: char) {
    if let Some(last) = chunks.last_mut() {
        if last.kind == kind {
            last.value.push(c);
            return;
        }
    }
    chunks.push(Chunk {
        kind,
        value: c.to_string(),
    });
}

fn push_run(chunks: &mut Vec<Chunk>, kind: ChunkKind, run: &[char]) {
    for &c in run {
        push_char(chunks, kind, c);
    }
}

/// Within each run of consecutive changes, merge removals and additions so
/// that a single removed chunk precedes a single added chunk.
fn reorder_changes(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut result = Vec::with_capacity(chunks.len());
    let mut removed = String::new();
    let mut added = String::new();

    let flush = |result: &mut Vec<Chunk>, removed: &mut String, added: &mut String| {
        if !removed.is_empty() {
            result.push(Chunk {
                kind: ChunkKind::Removed,
                value: std::mem::take(removed),
            });
        }
        if !added.is_empty() {
            result.push(Chunk {
                kind: ChunkKind::Added,
                value: std::mem::take(added),
            });
        }
    };

    for chunk in chunks {
        match chunk.kind {
            ChunkKind::Removed => removed.push_str(&chunk.value),
            ChunkKind::Added => added.push_str(&chunk.value),
            ChunkKind::Common => {
                flush(&mut result, &mut removed, &mut added);
                result.push(chunk);
            }
        }
    }
    flush(&mut result, &mut removed, &mut added);

    result
}

fn split_change(chunk: &Chunk) -> Vec<DiffToken> {
    let make = |value: &str, ignorable: bool| match chunk.kind {
        ChunkKind::Added => DiffToken::added(value, ignorable),
        _ => DiffToken::removed(value, ignorable),
    };

    let Some(parts) = CHANGE_PARTS.captures(&chunk.value) else {
        return vec![make(&chunk.value, false)];
    };

    [(1, true), (2, false), (3, true)]
        .into_iter()
        .filter_map(|(group, ignorable)| {
            parts
                .get(group)
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
                .map(|value| make(value, ignorable))
        })
        .collect()
}
