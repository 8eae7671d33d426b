//! Selection of the correction shown for an answer.
//!
//! The correction is taken from the best-scored solutions. Each of them is
//! expanded into the variations whose choices best fit the answer, and every
//! variation is diffed against the answer. If any variation is equivalent to
//! the answer there is nothing to correct; otherwise the diff with the fewest
//! significant characters wins, then the one with the fewest tokens.

use serde::Serialize;
use tracing::debug;

use crate::diff::{diff_strings, significant_char_count, DiffOutcome};
use crate::locale::Collator;
use crate::matching::{best_scored, containment, Matcher};
use crate::product::CartesianIndices;
use crate::types::{DiffToken, Solution};

/// Correction to display for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Correction {
    /// Corrections are disabled for the locale of the solutions.
    Skipped,
    /// No scored solution, or the answer matches one of the variations.
    NotNeeded,
    Diff {
        variation: String,
        tokens: Vec<DiffToken>,
    },
}

impl<C: Collator> Matcher<C> {
    /// Pick the correction for `answer` among already scored `solutions`.
    pub fn correction(&mut self, solutions: &[Solution], answer: &str) -> Correction {
        if let Some(first) = solutions.first() {
            if self.settings().is_correction_excluded(&first.locale) {
                debug!(locale = %first.locale, "correction skipped for locale");
                return Correction::Skipped;
            }
        }

        let mut chosen: Option<(String, Vec<DiffToken>, usize)> = None;
        for solution in best_scored(solutions) {
            for variation in self.variations_for_answer(solution, answer) {
                let DiffOutcome::Changes(tokens) = diff_strings(answer, &variation) else {
                    debug!(%variation, "answer is equivalent to a variation");
                    return Correction::NotNeeded;
                };

                let weight = significant_char_count(&tokens);
                let better = match &chosen {
                    None => true,
                    Some((_, best_tokens, best_weight)) => {
                        weight < *best_weight
                            || (weight == *best_weight && tokens.len() < best_tokens.len())
                    }
                };
                if better {
                    chosen = Some((variation, tokens, weight));
                }
            }
        }

        match chosen {
            Some((variation, tokens, _)) => Correction::Diff { variation, tokens },
            None => Correction::NotNeeded,
        }
    }

    /// Concrete sentences of `solution` whose choices fit `answer` best.
    ///
    /// For every choice token only the alternatives with the highest share of
    /// their bigrams found in the answer are kept. At most
    /// `max_variations_per_solution` distinct variations are produced.
    pub fn variations_for_answer(&mut self, solution: &Solution, answer: &str) -> Vec<String> {
        let locale = solution.locale.as_str();
        let answer_data = self.matching_data(answer, locale);

        let mut candidates: Vec<Vec<&str>> = Vec::with_capacity(solution.tokens.len());
        for token in &solution.tokens {
            if !token.is_choice() {
                candidates.push(vec![token.reference()]);
                continue;
            }

            let scored: Vec<(&str, f64)> = token
                .values()
                .iter()
                .map(|value| {
                    let data = self.matching_data(value, locale);
                    (value.as_str(), containment(&answer_data, &data))
                })
                .collect();
            let best = scored
                .iter()
                .map(|(_, score)| *score)
                .fold(0.0_f64, f64::max);
            candidates.push(
                scored
                    .into_iter()
                    .filter(|(_, score)| (best - score).abs() < f64::EPSILON)
                    .map(|(value, _)| value)
                    .collect(),
            );
        }

        let lengths = candidates.iter().map(Vec::len).collect();
        let product = CartesianIndices::new(lengths);
        let limit = self.settings().max_variations_per_solution;
        if product.len_hint() > limit {
            debug!(
                reference = %solution.reference,
                combinations = product.len_hint(),
                limit,
                "variations truncated"
            );
        }

        let mut variations: Vec<String> = Vec::new();
        for indices in product {
            if variations.len() >= limit {
                break;
            }
            let variation: String = candidates
                .iter()
                .zip(&indices)
                .map(|(values, &index)| values[index])
                .collect();
            if !variations.contains(&variation) {
                variations.push(variation);
            }
        }
        variations
    }
}
