//! Raw challenge documents used across integration tests.

use serde_json::{json, Value};

/// "I am / I'm a cat" with a cat/kitty branch, one typo and one automatic vertex.
///
/// Positions: 0 subject, 1 space, 2 verb, 3 space, 4 article, 5 noun, 6 end.
pub fn branching_graph_challenge() -> Value {
    json!({
        "targetLanguage": "en",
        "grader": { "vertices": [
            [
                { "lenient": "i", "orig": "I", "to": 1 },
                { "lenient": "i'm", "orig": "I'm", "to": 3 }
            ],
            [{ "lenient": " ", "to": 2 }],
            [
                { "lenient": "am", "to": 3 },
                { "lenient": "ma", "to": 3, "type": "typo" }
            ],
            [{ "lenient": " ", "to": 4 }],
            [
                { "lenient": "a ", "to": 5 },
                { "lenient": "one ", "to": 5, "auto": true }
            ],
            [
                { "lenient": "grey cat", "to": 6 },
                { "lenient": "cat", "to": 6 },
                { "lenient": "kitty", "to": 6 }
            ],
            []
        ]}
    })
}

/// The smallest graph producing "Hi!".
pub fn minimal_graph_challenge() -> Value {
    json!({
        "targetLanguage": "en",
        "vertices": [
            [{ "lenient": "Hi", "to": 1, "auto": false }],
            [{ "lenient": "!", "to": null, "auto": false }]
        ]
    })
}

pub fn naming_challenge(locale: &str, solutions: &[&str]) -> Value {
    json!({ "targetLanguage": locale, "correctSolutions": solutions })
}

pub fn word_bank_challenge(locale: &str, words: &[&str]) -> Value {
    json!({ "targetLanguage": locale, "correctTokens": words })
}
