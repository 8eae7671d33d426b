//! Solution compiler and answer matcher for language-learning challenges.
//!
//! Provides:
//! - Solution builder for solution graphs, naming solutions and word banks
//! - Bigram similarity between answers and solutions
//! - Character diffs and correction selection for display
//! - Solution list sorting, filtering and pagination
//! - Decoding of raw challenge JSON

pub mod builder;
pub mod challenge;
pub mod correction;
pub mod diff;
pub mod error;
pub mod listing;
pub mod locale;
pub mod matching;
pub mod product;
pub mod settings;
pub mod text;
pub mod types;

pub use builder::{
    build_from_graph, build_from_naming_solutions, build_from_word_bank_tokens, GraphOptions,
    SolutionBuilder,
};
pub use challenge::{ChallengeInput, RawChallenge};
pub use correction::Correction;
pub use diff::{diff_strings, DiffOutcome};
pub use error::{ChallengeError, Result};
pub use listing::{filter_solutions, paginate, sort_solutions, Page, SortOrder};
pub use locale::{Collator, DefaultCollator};
pub use matching::{
    closest_solution, match_against_answer, MatchingData, Matcher, SolutionProfile,
};
pub use settings::MatcherSettings;
pub use types::{DiffToken, Solution, Token, TokenValue, Vertex};
