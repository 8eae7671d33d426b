//! Answer matching against solutions (bigram similarity).
//!
//! Strings are profiled into [`MatchingData`]: the words of the case-folded,
//! NFC-normalized string, their character count and the counts of their
//! bigrams. A single-character word counts as one bigram equal to itself.
//!
//! The score of an answer against a profile is the Dice coefficient
//! `2 * intersection / (answer bigrams + solution bigrams)`. For words of two
//! or more characters the bigram total of a profile is its character count
//! minus its word count.

use std::hash::BuildHasher;
use std::sync::Arc;

use ahash::{AHashMap, RandomState};
use tracing::trace;

use crate::locale::{Collator, DefaultCollator};
use crate::product::CartesianIndices;
use crate::settings::MatcherSettings;
use crate::text;
use crate::types::Solution;

/// Word, character and bigram profile of a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingData {
    pub char_count: usize,
    pub word_count: usize,
    pub bigram_map: AHashMap<String, usize>,
}

impl MatchingData {
    pub fn from_text<C: Collator>(value: &str, locale: &str, collator: &C) -> Self {
        let folded = collator.fold_case(&text::nfc(value), locale);
        let mut data = Self::default();
        for word in text::words(&folded) {
            data.add_word(word);
        }
        data
    }

    fn add_word(&mut self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        self.char_count += chars.len();
        self.word_count += 1;

        if chars.len() == 1 {
            *self.bigram_map.entry(word.to_string()).or_insert(0) += 1;
        } else {
            for pair in chars.windows(2) {
                *self.bigram_map.entry(pair.iter().collect()).or_insert(0) += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.char_count += other.char_count;
        self.word_count += other.word_count;
        for (bigram, count) in &other.bigram_map {
            *self.bigram_map.entry(bigram.clone()).or_insert(0) += count;
        }
    }

    /// Total number of bigrams.
    pub fn bigram_count(&self) -> usize {
        self.bigram_map.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    fn count(&self, bigram: &str) -> usize {
        self.bigram_map.get(bigram).copied().unwrap_or(0)
    }
}

/// Number of bigrams shared by `answer` and `solution`, with multiplicity.
pub fn intersection_size(answer: &MatchingData, solution: &MatchingData) -> usize {
    answer
        .bigram_map
        .iter()
        .map(|(bigram, &count)| count.min(solution.count(bigram)))
        .sum()
}

/// Dice similarity between two profiles.
pub fn similarity(answer: &MatchingData, solution: &MatchingData) -> f64 {
    dice(
        intersection_size(answer, solution),
        answer.bigram_count() + solution.bigram_count(),
    )
}

/// Share of the bigrams of `part` that also occur in `answer`.
pub(crate) fn containment(answer: &MatchingData, part: &MatchingData) -> f64 {
    let total = part.bigram_count();
    if total == 0 {
        return 0.0;
    }
    intersection_size(part, answer) as f64 / total as f64
}

fn dice(intersection: usize, bigram_total: usize) -> f64 {
    if bigram_total == 0 {
        return 0.0;
    }
    2.0 * intersection as f64 / bigram_total as f64
}

/// Matching profile of a solution: the merged profile of its unambiguous
/// tokens, and the profiles of each alternative of each choice token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionProfile {
    pub shared: MatchingData,
    pub choices: Vec<Vec<MatchingData>>,
}

impl SolutionProfile {
    /// Score of the best-fitting path through the choice tokens.
    pub fn best_score(&self, answer: &MatchingData) -> f64 {
        if self.choices.is_empty() {
            return similarity(answer, &self.shared);
        }

        let fixed_total = answer.bigram_count() + self.shared.bigram_count();
        let lengths = self.choices.iter().map(Vec::len).collect();
        let mut best = 0.0_f64;
        for indices in CartesianIndices::new(lengths) {
            let chosen: Vec<&MatchingData> = self
                .choices
                .iter()
                .zip(&indices)
                .map(|(alternatives, &index)| &alternatives[index])
                .collect();

            let score = self.path_score(answer, &chosen, fixed_total);
            trace!(?indices, score, "scored solution path");
            if score > best {
                best = score;
                if best >= 1.0 {
                    break;
                }
            }
        }
        best
    }

    /// `fixed_total` is the bigram total of the answer and the shared profile.
    fn path_score(
        &self,
        answer: &MatchingData,
        chosen: &[&MatchingData],
        fixed_total: usize,
    ) -> f64 {
        let bigram_total =
            fixed_total + chosen.iter().map(|data| data.bigram_count()).sum::<usize>();
        let intersection = answer
            .bigram_map
            .iter()
            .map(|(bigram, &count)| {
                let available = self.shared.count(bigram)
                    + chosen.iter().map(|data| data.count(bigram)).sum::<usize>();
                count.min(available)
            })
            .sum();

        dice(intersection, bigram_total)
    }
}

struct CachedProfile {
    solution: Solution,
    profile: Arc<SolutionProfile>,
}

/// Scores answers against solutions.
///
/// Holds two memoization caches (per string and per solution). Both can be
/// cleared at any time without changing results.
pub struct Matcher<C: Collator = DefaultCollator> {
    collator: C,
    settings: MatcherSettings,
    hasher: RandomState,
    strings: AHashMap<String, AHashMap<String, Arc<MatchingData>>>,
    string_count: usize,
    solutions: AHashMap<u64, CachedProfile>,
}

impl Matcher<DefaultCollator> {
    pub fn new(settings: MatcherSettings) -> Self {
        Self::with_collator(DefaultCollator, settings)
    }
}

impl Default for Matcher<DefaultCollator> {
    fn default() -> Self {
        Self::new(MatcherSettings::default())
    }
}

impl<C: Collator> Matcher<C> {
    pub fn with_collator(collator: C, settings: MatcherSettings) -> Self {
        Self {
            collator,
            settings,
            hasher: RandomState::new(),
            strings: AHashMap::new(),
            string_count: 0,
            solutions: AHashMap::new(),
        }
    }

    pub fn settings(&self) -> &MatcherSettings {
        &self.settings
    }

    pub fn collator(&self) -> &C {
        &self.collator
    }

    pub fn clear_caches(&mut self) {
        self.strings.clear();
        self.string_count = 0;
        self.solutions.clear();
    }

    /// Memoized profile of a string.
    pub fn matching_data(&mut self, value: &str, locale: &str) -> Arc<MatchingData> {
        if let Some(data) = self.strings.get(locale).and_then(|by_text| by_text.get(value)) {
            return Arc::clone(data);
        }

        if self.string_count >= self.settings.string_cache_capacity {
            self.strings.clear();
            self.string_count = 0;
        }

        let data = Arc::new(MatchingData::from_text(value, locale, &self.collator));
        self.strings
            .entry(locale.to_string())
            .or_default()
            .insert(value.to_string(), Arc::clone(&data));
        self.string_count += 1;
        data
    }

    /// Memoized profile of a solution. Blank tokens are left out.
    pub fn solution_profile(&mut self, solution: &Solution) -> Arc<SolutionProfile> {
        let key = self.hasher.hash_one(solution);
        if let Some(cached) = self.solutions.get(&key) {
            if cached.solution.same_identity(solution) {
                return Arc::clone(&cached.profile);
            }
        }

        let locale = solution.locale.as_str();
        let mut profile = SolutionProfile::default();
        for token in solution.tokens.iter().filter(|token| !token.is_blank()) {
            if token.is_choice() {
                let alternatives = token
                    .values()
                    .iter()
                    .map(|value| MatchingData::clone(&self.matching_data(value, locale)))
                    .collect();
                profile.choices.push(alternatives);
            } else {
                let data = self.matching_data(token.reference(), locale);
                profile.shared.merge(&data);
            }
        }

        if self.solutions.len() >= self.settings.string_cache_capacity {
            self.solutions.clear();
        }
        let profile = Arc::new(profile);
        let mut cached_solution = solution.clone();
        cached_solution.score = None;
        self.solutions.insert(
            key,
            CachedProfile {
                solution: cached_solution,
                profile: Arc::clone(&profile),
            },
        );
        profile
    }

    /// Similarity in `[0, 1]` between a solution and an answer.
    ///
    /// A blank answer scores `0` without being profiled, and so does an answer
    /// without any word.
    pub fn match_against_answer(&mut self, solution: &Solution, answer: &str) -> f64 {
        if text::is_blank(answer) {
            return 0.0;
        }
        let answer_data = self.matching_data(answer, &solution.locale);
        if answer_data.is_empty() {
            return 0.0;
        }
        let profile = self.solution_profile(solution);
        profile.best_score(&answer_data)
    }

    /// Set the score of every solution against `answer`.
    pub fn score_solutions(&mut self, solutions: &mut [Solution], answer: &str) {
        for solution in solutions.iter_mut() {
            solution.score = Some(self.match_against_answer(solution, answer));
        }
    }
}

/// Similarity between a solution and an answer, without caching.
pub fn match_against_answer(solution: &Solution, answer: &str) -> f64 {
    Matcher::default().match_against_answer(solution, answer)
}

/// The best-scored solution; the first one on ties.
pub fn closest_solution(solutions: &[Solution]) -> Option<&Solution> {
    solutions
        .iter()
        .filter(|solution| solution.score.is_some())
        .fold(None, |best: Option<&Solution>, solution| match best {
            Some(current) if current.score >= solution.score => Some(current),
            _ => Some(solution),
        })
}

/// Solutions sharing the maximum score. Unscored solutions are ignored.
pub fn best_scored(solutions: &[Solution]) -> Vec<&Solution> {
    let Some(max) = solutions.iter().filter_map(|solution| solution.score).reduce(f64::max) else {
        return Vec::new();
    };
    solutions
        .iter()
        .filter(|solution| solution.score == Some(max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_from_graph, build_from_naming_solutions};
    use crate::types::{Token, Vertex};

    fn profile(value: &str) -> MatchingData {
        MatchingData::from_text(value, "en", &DefaultCollator)
    }

    fn choice(values: &[&str]) -> Token {
        Token::from_values(values.iter().map(|v| v.to_string()).collect()).unwrap()
    }

    #[test]
    fn profile_counts_words_and_bigrams() {
        let data = profile("Hello, a world!");
        assert_eq!(data.word_count, 3);
        assert_eq!(data.char_count, 11);
        assert_eq!(data.bigram_map.get("he"), Some(&1));
        assert_eq!(data.bigram_map.get("l"), None);
        assert_eq!(data.bigram_map.get("a"), Some(&1));
        assert_eq!(data.bigram_count(), 4 + 1 + 4);
    }

    #[test]
    fn profile_is_case_folded_and_normalized() {
        assert_eq!(profile("CAFE\u{301}"), profile("café"));
    }

    #[test]
    fn identical_strings_score_one() {
        let data = profile("night");
        assert!((similarity(&data, &data) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unrelated_strings_score_zero() {
        assert_eq!(similarity(&profile("abc"), &profile("xyz")), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // "night" {ni, ig, gh, ht} vs "nacht" {na, ac, ch, ht}: one shared bigram.
        let score = similarity(&profile("night"), &profile("nacht"));
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn single_character_words_stay_bounded() {
        let score = similarity(&profile("I a"), &profile("I a"));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn blank_answer_scores_zero() {
        let mut matcher = Matcher::default();
        let solution = Solution::from_tokens("en", vec![Token::single("cat")]);
        assert_eq!(matcher.match_against_answer(&solution, "   "), 0.0);
    }

    #[test]
    fn best_path_is_used() {
        let mut matcher = Matcher::default();
        let solution = Solution::from_tokens(
            "en",
            vec![
                Token::single("the"),
                Token::single(" "),
                choice(&["color", "colour"]),
            ],
        );
        let british = matcher.match_against_answer(&solution, "the colour");
        let american = matcher.match_against_answer(&solution, "the color");
        assert!((british - 1.0).abs() < 1e-9);
        assert!((american - 1.0).abs() < 1e-9);
        assert!(matcher.match_against_answer(&solution, "the colr") < 1.0);
    }

    #[test]
    fn self_similarity_is_maximal() {
        let mut matcher = Matcher::default();
        let solutions = build_from_naming_solutions(&["The quick brown fox"], "en");
        let own = matcher.match_against_answer(&solutions[0], "The quick brown fox");
        let other = matcher.match_against_answer(&solutions[0], "The quick brown box");
        assert!((own - 1.0).abs() < 1e-9);
        assert!(other < own);
    }

    #[test]
    fn scores_stay_in_bounds() {
        let vertices = vec![
            vec![Vertex::new("I", Some(1))],
            vec![Vertex::new(" ", Some(2))],
            vec![Vertex::new("am", Some(3)), Vertex::new("was", Some(3))],
            vec![Vertex::new(" a cat", None)],
        ];
        let solutions = build_from_graph(&vertices, "en", false, false);
        let mut matcher = Matcher::default();
        for answer in ["i", "I am a cat", "a", "zzz", "I I I I I a a a cat cat", "!"] {
            for solution in &solutions {
                let score = matcher.match_against_answer(solution, answer);
                assert!((0.0..=1.0).contains(&score), "{answer}: {score}");
            }
        }
    }

    #[test]
    fn cached_profiles_follow_identity() {
        let mut matcher = Matcher::default();
        let a = Solution::from_tokens("en", vec![Token::single("cat")]);
        let b = Solution::from_tokens("en", vec![Token::single("dog")]);
        let first = matcher.solution_profile(&a);
        assert!(Arc::ptr_eq(&first, &matcher.solution_profile(&a)));
        assert_ne!(*first, *matcher.solution_profile(&b));
    }

    #[test]
    fn string_cache_is_bounded() {
        let settings = MatcherSettings {
            string_cache_capacity: 2,
            ..MatcherSettings::default()
        };
        let mut matcher = Matcher::new(settings);
        let first = matcher.matching_data("a", "en");
        matcher.matching_data("b", "en");
        matcher.matching_data("c", "en");
        assert_eq!(*matcher.matching_data("a", "en"), *first);
        assert!(matcher.string_count <= 2);
    }

    #[test]
    fn answer_without_words_scores_zero() {
        let mut matcher = Matcher::default();
        let solution = Solution::from_tokens("en", vec![Token::single("?!")]);
        assert_eq!(matcher.match_against_answer(&solution, "?!"), 0.0);
        assert!(profile("?!").is_empty());
    }

    #[test]
    fn clearing_caches_keeps_scores() {
        let mut matcher = Matcher::default();
        let solution = Solution::from_tokens(
            "en",
            vec![Token::single("the"), Token::single(" "), choice(&["color", "colour"])],
        );
        let before = matcher.match_against_answer(&solution, "the colr");
        let cached = matcher.solution_profile(&solution);

        matcher.clear_caches();
        assert_eq!(matcher.string_count, 0);
        assert!(matcher.solutions.is_empty());

        let rebuilt = matcher.solution_profile(&solution);
        assert!(!Arc::ptr_eq(&cached, &rebuilt));
        assert_eq!(*cached, *rebuilt);
        assert_eq!(matcher.match_against_answer(&solution, "the colr"), before);
    }

    #[test]
    fn scoring_and_closest() {
        let mut solutions = build_from_naming_solutions(&["cat", "cats", "dog"], "en");
        let mut matcher = Matcher::default();
        matcher.score_solutions(&mut solutions, "cats");
        let closest = closest_solution(&solutions).unwrap();
        assert_eq!(closest.reference, "cats");
        assert_eq!(best_scored(&solutions).len(), 1);
        assert_eq!(solutions[2].score, Some(0.0));
    }

    #[test]
    fn closest_requires_scores() {
        let solutions = build_from_naming_solutions(&["cat"], "en");
        assert!(closest_solution(&solutions).is_none());
        assert!(best_scored(&solutions).is_empty());
    }
}
