//! Decoding of raw challenge data.
//!
//! # Format
//! ```json
//! {
//!   "targetLanguage": "fr",
//!   "grader": {
//!     "vertices": [
//!       [{ "lenient": "bonjour", "orig": "Bonjour", "to": 1, "auto": false }],
//!       [{ "lenient": "!" }]
//!     ]
//!   }
//! }
//! ```
//!
//! Naming challenges carry `correctSolutions` (or `solutions`) instead of a
//! graph, and word-bank challenges `correctTokens` (or `tokens`). Entries of
//! the wrong type are skipped; only a document that is not an object, or that
//! has none of the three forms, is rejected.

use serde_json::{Map, Value};
use tracing::debug;

use crate::builder::{GraphOptions, SolutionBuilder};
use crate::error::{ChallengeError, Result};
use crate::locale::{is_whitespace_delimited, Collator};
use crate::settings::MatcherSettings;
use crate::types::{Solution, Vertex};

/// Locale used when a challenge names none.
pub const DEFAULT_LOCALE: &str = "en";

const LOCALE_KEYS: [&str; 3] = ["targetLanguage", "learningLanguage", "locale"];
const NAMING_KEYS: [&str; 2] = ["correctSolutions", "solutions"];
const WORD_BANK_KEYS: [&str; 2] = ["correctTokens", "tokens"];

/// Accepted answers of a challenge, in one of the supported forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeInput {
    Graph(Vec<Vec<Vertex>>),
    NamingSolutions(Vec<String>),
    WordBank(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChallenge {
    pub locale: String,
    pub input: ChallengeInput,
}

impl RawChallenge {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(ChallengeError::NotAnObject {
                found: json_type(value),
            });
        };

        let locale = LOCALE_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
            .to_string();

        let input = if let Some(rows) = graph_rows(object) {
            ChallengeInput::Graph(rows.iter().map(decode_row).collect())
        } else if let Some(entries) = first_array(object, &NAMING_KEYS) {
            ChallengeInput::NamingSolutions(
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            )
        } else if let Some(entries) = first_array(object, &WORD_BANK_KEYS) {
            ChallengeInput::WordBank(entries.iter().filter_map(decode_word).collect())
        } else {
            return Err(ChallengeError::MissingSolutions);
        };

        Ok(Self { locale, input })
    }

    /// Build the solutions of the challenge.
    pub fn solutions<C: Collator>(
        &self,
        builder: &SolutionBuilder<C>,
        settings: &MatcherSettings,
    ) -> Vec<Solution> {
        let locale = self.locale.as_str();
        let solutions = match &self.input {
            ChallengeInput::Graph(vertices) => builder.build_from_graph(
                vertices,
                locale,
                GraphOptions {
                    include_automatic: settings.include_automatic,
                    whitespace_delimited: is_whitespace_delimited(locale),
                },
            ),
            ChallengeInput::NamingSolutions(strings) => {
                builder.build_from_naming_solutions(strings, locale)
            }
            ChallengeInput::WordBank(words) => builder.build_from_word_bank_tokens(words, locale),
        };

        debug!(locale, count = solutions.len(), "built challenge solutions");
        solutions
    }
}

fn graph_rows(object: &Map<String, Value>) -> Option<&Vec<Value>> {
    object
        .get("grader")
        .and_then(|grader| grader.get("vertices"))
        .or_else(|| object.get("vertices"))
        .and_then(Value::as_array)
}

fn first_array<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
}

/// A row that is not an array stays in place as an empty position, so that
/// `to` indices keep pointing at the right rows.
fn decode_row(row: &Value) -> Vec<Vertex> {
    row.as_array()
        .map(|vertices| vertices.iter().filter_map(decode_vertex).collect())
        .unwrap_or_default()
}

fn decode_vertex(value: &Value) -> Option<Vertex> {
    let object = value.as_object()?;
    let lenient = object.get("lenient")?.as_str()?;

    Some(Vertex {
        to: object
            .get("to")
            .and_then(Value::as_u64)
            .and_then(|to| usize::try_from(to).ok()),
        lenient: lenient.to_string(),
        orig: object.get("orig").and_then(Value::as_str).map(str::to_string),
        auto: object.get("auto").and_then(Value::as_bool).unwrap_or(false),
        kind: object.get("type").and_then(Value::as_str).map(str::to_string),
    })
}

fn decode_word(value: &Value) -> Option<String> {
    match value {
        Value::String(word) => Some(word.clone()),
        Value::Object(object) => object.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
