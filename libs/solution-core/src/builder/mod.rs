//! Compilation of raw challenge data into solutions.
//!
//! Three input forms are supported:
//! - solution graphs (`vertices`), expanded by [`SolutionBuilder::build_from_graph`]
//! - flat naming solutions, see [`SolutionBuilder::build_from_naming_solutions`]
//! - word banks, see [`SolutionBuilder::build_from_word_bank_tokens`]

mod graph;
mod token;

use ahash::AHashMap;
use tracing::debug;

use crate::locale::{Collator, DefaultCollator};
use crate::text;
use crate::types::{Solution, Token, Vertex};

use graph::GraphExpander;

/// Options for graph expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Keep vertices marked as automatically derived.
    pub include_automatic: bool,
    /// Drop values with inner whitespace (space-delimited languages).
    pub whitespace_delimited: bool,
}

/// Builds solution lists using a given collator.
#[derive(Debug, Clone, Default)]
pub struct SolutionBuilder<C: Collator = DefaultCollator> {
    collator: C,
}

impl SolutionBuilder<DefaultCollator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Collator> SolutionBuilder<C> {
    pub fn with_collator(collator: C) -> Self {
        Self { collator }
    }

    pub fn collator(&self) -> &C {
        &self.collator
    }

    /// Expand a solution graph into deduplicated solutions.
    ///
    /// The order of the result is unspecified.
    pub fn build_from_graph(
        &self,
        vertices: &[Vec<Vertex>],
        locale: &str,
        options: GraphOptions,
    ) -> Vec<Solution> {
        if vertices.is_empty() {
            return Vec::new();
        }

        let mut expander = GraphExpander::new(
            vertices,
            locale,
            options.include_automatic,
            options.whitespace_delimited,
            &self.collator,
        );
        let solutions: Vec<Solution> = expander
            .expand_all()
            .into_iter()
            .map(|tokens| Solution::from_tokens(locale, tokens))
            .collect();

        let expanded = solutions.len();
        let solutions = deduplicate(solutions);
        debug!(
            locale,
            positions = vertices.len(),
            expanded,
            kept = solutions.len(),
            pruned_groups = expander.pruned(),
            "built solutions from graph"
        );
        solutions
    }

    /// One simple solution per non-blank string.
    pub fn build_from_naming_solutions<S: AsRef<str>>(
        &self,
        strings: &[S],
        locale: &str,
    ) -> Vec<Solution> {
        let solutions: Vec<Solution> = strings
            .iter()
            .filter_map(|value| {
                let reference = text::normalize(value.as_ref());
                if reference.is_empty() {
                    return None;
                }
                let tokens = text::split_words_and_separators(&reference)
                    .into_iter()
                    .map(Token::single)
                    .collect();
                Some(Solution::with_reference(locale, reference, tokens))
            })
            .collect();

        debug!(locale, count = solutions.len(), "built naming solutions");
        solutions
    }

    /// A single solution assembled from word-bank words, separated by spaces.
    pub fn build_from_word_bank_tokens<S: AsRef<str>>(
        &self,
        words: &[S],
        locale: &str,
    ) -> Vec<Solution> {
        let words: Vec<String> = words
            .iter()
            .map(|word| text::normalize(word.as_ref()))
            .filter(|word| !word.is_empty())
            .collect();

        let reference = words.join(" ");
        if text::is_blank(&reference) {
            return Vec::new();
        }

        let mut tokens = Vec::with_capacity(words.len() * 2);
        for word in words {
            if !tokens.is_empty() {
                tokens.push(Token::single(" "));
            }
            tokens.push(Token::single(word));
        }

        vec![Solution::with_reference(locale, reference, tokens)]
    }
}

/// Expand a solution graph with the default collator.
pub fn build_from_graph(
    vertices: &[Vec<Vertex>],
    locale: &str,
    include_automatic: bool,
    whitespace_delimited: bool,
) -> Vec<Solution> {
    SolutionBuilder::new().build_from_graph(
        vertices,
        locale,
        GraphOptions {
            include_automatic,
            whitespace_delimited,
        },
    )
}

pub fn build_from_naming_solutions<S: AsRef<str>>(strings: &[S], locale: &str) -> Vec<Solution> {
    SolutionBuilder::new().build_from_naming_solutions(strings, locale)
}

pub fn build_from_word_bank_tokens<S: AsRef<str>>(words: &[S], locale: &str) -> Vec<Solution> {
    SolutionBuilder::new().build_from_word_bank_tokens(words, locale)
}

/// Group solutions by reference. A group with complex members keeps only its
/// (distinct) complex members; otherwise only its last member is kept.
///
/// Complex solutions with different references are never merged, even when
/// one covers the other.
fn deduplicate(solutions: Vec<Solution>) -> Vec<Solution> {
    let mut order = Vec::new();
    let mut groups: AHashMap<String, Vec<Solution>> = AHashMap::new();

    for solution in solutions {
        let group = groups.entry(solution.reference.clone()).or_insert_with(|| {
            order.push(solution.reference.clone());
            Vec::new()
        });
        group.push(solution);
    }

    let mut result = Vec::with_capacity(order.len());
    for reference in order {
        let Some(mut group) = groups.remove(&reference) else {
            continue;
        };

        if group.iter().any(|solution| solution.is_complex) {
            let mut kept: Vec<Solution> = Vec::new();
            for solution in group.into_iter().filter(|solution| solution.is_complex) {
                if !kept.iter().any(|other| other.tokens == solution.tokens) {
                    kept.push(solution);
                }
            }
            result.extend(kept);
        } else if let Some(last) = group.pop() {
            result.push(last);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn choice(values: &[&str]) -> Token {
        Token::from_values(values.iter().map(|v| v.to_string()).collect()).unwrap()
    }

    #[test]
    fn minimal_graph() {
        let vertices = vec![
            vec![Vertex::new("Hi", Some(1))],
            vec![Vertex::new("!", None)],
        ];
        let solutions = build_from_graph(&vertices, "en", false, false);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].reference, "Hi!");
        assert!(!solutions[0].is_complex);
    }

    #[test]
    fn empty_graph() {
        assert!(build_from_graph(&[], "en", false, false).is_empty());
    }

    #[test]
    fn automatic_vertices_are_opt_in() {
        let vertices = vec![vec![
            Vertex::new("hello", None),
            Vertex::new("hallo", None).automatic(),
        ]];
        let without = build_from_graph(&vertices, "en", false, false);
        assert_eq!(without.len(), 1);
        assert!(!without[0].is_complex);

        let with = build_from_graph(&vertices, "en", true, false);
        assert_eq!(with.len(), 1);
        assert!(with[0].is_complex);
        assert_eq!(with[0].reference, "hello");
    }

    #[test]
    fn dedup_keeps_only_complex_members() {
        let simple = Solution::from_tokens("en", vec![Token::single("a")]);
        let complex_a = Solution::from_tokens("en", vec![choice(&["a", "b"])]);
        let complex_b = Solution::from_tokens("en", vec![choice(&["a", "c"])]);
        let result = deduplicate(vec![
            simple.clone(),
            complex_a.clone(),
            complex_a.clone(),
            complex_b.clone(),
            simple,
        ]);
        assert_eq!(result, vec![complex_a, complex_b]);
    }

    #[test]
    fn dedup_keeps_last_simple_member() {
        let first = Solution::from_tokens("en", vec![Token::single("a"), Token::single("b")]);
        let last = Solution::from_tokens("en", vec![Token::single("ab")]);
        let other = Solution::from_tokens("en", vec![Token::single("c")]);
        let result = deduplicate(vec![first, other.clone(), last.clone()]);
        assert_eq!(result, vec![last, other]);
    }

    #[test]
    fn naming_solutions() {
        let solutions = build_from_naming_solutions(&["Москва", "  ", "New  York "], "ru");
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].reference, "Москва");
        assert!(!solutions[0].is_complex);
        assert_eq!(solutions[1].reference, "New  York");
        assert_eq!(solutions[1].tokens.len(), 3);
    }

    #[test]
    fn word_bank() {
        let solutions = build_from_word_bank_tokens(&["I", "like", "cats"], "en");
        assert_eq!(solutions.len(), 1);
        let solution = &solutions[0];
        assert_eq!(solution.reference, "I like cats");
        let references: Vec<&str> = solution.tokens.iter().map(Token::reference).collect();
        assert_eq!(references, vec!["I", " ", "like", " ", "cats"]);
    }

    #[test]
    fn blank_word_bank_has_no_solution() {
        assert!(build_from_word_bank_tokens(&["", "  "], "en").is_empty());
        assert!(build_from_word_bank_tokens::<&str>(&[], "en").is_empty());
    }
}
