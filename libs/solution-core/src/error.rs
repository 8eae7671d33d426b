//! Error types for solution-core.

use thiserror::Error;

/// Result type alias using ChallengeError.
pub type Result<T> = std::result::Result<T, ChallengeError>;

/// Errors that can occur while decoding raw challenge data.
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("invalid challenge JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("challenge must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("challenge has no solution graph, solution list or word bank")]
    MissingSolutions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let error = ChallengeError::NotAnObject { found: "array" };
        assert_eq!(error.to_string(), "challenge must be a JSON object, found array");
        assert_eq!(
            ChallengeError::MissingSolutions.to_string(),
            "challenge has no solution graph, solution list or word bank"
        );
    }
}
