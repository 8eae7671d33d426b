//! Core types for solution graphs, expanded solutions and diffs.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One option at one position of a raw solution graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position of the vertex group that continues the sentence.
    #[serde(default)]
    pub to: Option<usize>,
    pub lenient: String,
    #[serde(default)]
    pub orig: Option<String>,
    #[serde(default)]
    pub auto: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Vertex {
    /// Create a non-automatic vertex leading to `to`.
    pub fn new(lenient: impl Into<String>, to: Option<usize>) -> Self {
        Self {
            to,
            lenient: lenient.into(),
            orig: None,
            auto: false,
            kind: None,
        }
    }

    /// Set the original (display) value.
    pub fn with_orig(mut self, orig: impl Into<String>) -> Self {
        self.orig = Some(orig.into());
        self
    }

    /// Mark the vertex as automatically derived.
    pub fn automatic(mut self) -> Self {
        self.auto = true;
        self
    }

    /// Set the vertex type (e.g. `"typo"`).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether the vertex is a low-quality variant.
    pub fn is_typo(&self) -> bool {
        self.kind.as_deref() == Some("typo")
    }
}

/// A candidate value for a token, before sorting and deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValue {
    pub value: String,
    pub is_automatic: bool,
}

impl TokenValue {
    pub fn new(value: impl Into<String>, is_automatic: bool) -> Self {
        Self {
            value: value.into(),
            is_automatic,
        }
    }
}

/// The alternatives that may occupy one position of a solution.
///
/// Never empty. The first alternative is the reference value of the token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Token {
    values: Vec<String>,
}

impl Token {
    /// Create an unambiguous token.
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    /// Create a token from its alternatives, reference value first.
    ///
    /// Returns `None` when there are no alternatives.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            None
        } else {
            Some(Self { values })
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn reference(&self) -> &str {
        &self.values[0]
    }

    /// Whether the token is a branch point (more than one alternative).
    pub fn is_choice(&self) -> bool {
        self.values.len() > 1
    }

    /// Whether the token is a single blank or whitespace-only value.
    pub fn is_blank(&self) -> bool {
        !self.is_choice() && self.values[0].trim().is_empty()
    }
}

impl TryFrom<Vec<String>> for Token {
    type Error = &'static str;

    fn try_from(values: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_values(values).ok_or("a token needs at least one value")
    }
}

impl From<Token> for Vec<String> {
    fn from(token: Token) -> Self {
        token.values
    }
}

/// One fully expanded accepted answer.
///
/// Equality and hashing cover the identity of the solution (locale,
/// reference and tokens) and ignore the transient score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub locale: String,
    pub reference: String,
    pub tokens: Vec<Token>,
    pub is_complex: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Solution {
    /// Build a solution whose reference is the concatenation of the token references.
    pub fn from_tokens(locale: &str, tokens: Vec<Token>) -> Self {
        let reference = tokens.iter().map(Token::reference).collect::<String>();
        Self::with_reference(locale, reference, tokens)
    }

    pub fn with_reference(locale: &str, reference: String, tokens: Vec<Token>) -> Self {
        let is_complex = tokens.iter().any(Token::is_choice);
        Self {
            locale: locale.to_string(),
            reference,
            tokens,
            is_complex,
            score: None,
        }
    }

    /// Whether `other` denotes the same solution, scores aside.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.reference == other.reference
            && self.locale == other.locale
            && self.tokens == other.tokens
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Solution {}

impl Hash for Solution {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.locale.hash(state);
        self.reference.hash(state);
        self.tokens.hash(state);
    }
}

/// One unit of a character-level diff between two strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffToken {
    pub value: String,
    /// Number of characters in `value`.
    pub count: usize,
    pub added: bool,
    pub removed: bool,
    /// Leading or trailing punctuation/whitespace of a change.
    pub ignorable: bool,
}

impl DiffToken {
    pub fn common(value: impl Into<String>) -> Self {
        Self::build(value.into(), false, false, false)
    }

    pub fn added(value: impl Into<String>, ignorable: bool) -> Self {
        Self::build(value.into(), true, false, ignorable)
    }

    pub fn removed(value: impl Into<String>, ignorable: bool) -> Self {
        Self::build(value.into(), false, true, ignorable)
    }

    fn build(value: String, added: bool, removed: bool, ignorable: bool) -> Self {
        Self {
            count: value.chars().count(),
            value,
            added,
            removed,
            ignorable,
        }
    }

    /// Added or removed, and not ignorable.
    pub fn is_significant(&self) -> bool {
        (self.added || self.removed) && !self.ignorable
    }
}
