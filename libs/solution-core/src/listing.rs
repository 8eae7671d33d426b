//! Sorting, filtering and pagination of solution lists.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::locale::Collator;
use crate::text;
use crate::types::Solution;

/// Sort order of a solution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Alphabetical,
    /// Best score first; unscored solutions last.
    Score,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Alphabetical
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alphabetical => "alphabetical",
            Self::Score => "score",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "alphabetical" => Some(Self::Alphabetical),
            "score" => Some(Self::Score),
            _ => None,
        }
    }
}

pub fn sort_solutions<C: Collator>(solutions: &mut [Solution], order: SortOrder, collator: &C) {
    let alphabetical = |x: &Solution, y: &Solution| {
        collator
            .compare(&x.reference, &y.reference, &x.locale)
            .then_with(|| x.reference.cmp(&y.reference))
    };

    match order {
        SortOrder::Alphabetical => solutions.sort_by(alphabetical),
        SortOrder::Score => solutions.sort_by(|x, y| {
            let by_score = match (x.score, y.score) {
                (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            by_score.then_with(|| alphabetical(x, y))
        }),
    }
}

/// Solutions whose case-folded reference contains every word of `query`.
/// A query without words keeps everything.
pub fn filter_solutions<'a, C: Collator>(
    solutions: &'a [Solution],
    query: &str,
    collator: &C,
) -> Vec<&'a Solution> {
    let query = text::nfc(query);
    solutions
        .iter()
        .filter(|solution| {
            let folded = collator.fold_case(&query, &solution.locale);
            let reference = collator.fold_case(&solution.reference, &solution.locale);
            let keep = text::words(&folded).all(|word| reference.contains(word));
            keep
        })
        .collect()
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Page `page` (1-based) of `items`. Page numbers are clamped to the
/// available range.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let page_count = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);
    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        page_count,
        total: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from_naming_solutions;
    use crate::locale::DefaultCollator;

    fn references(solutions: &[Solution]) -> Vec<&str> {
        solutions.iter().map(|s| s.reference.as_str()).collect()
    }

    #[test]
    fn alphabetical_sort_ignores_case() {
        let mut solutions = build_from_naming_solutions(&["banana", "Apple", "cherry"], "en");
        sort_solutions(&mut solutions, SortOrder::Alphabetical, &DefaultCollator);
        assert_eq!(references(&solutions), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn score_sort_puts_unscored_last() {
        let mut solutions = build_from_naming_solutions(&["a", "b", "c"], "en");
        solutions[0].score = Some(0.2);
        solutions[2].score = Some(0.9);
        sort_solutions(&mut solutions, SortOrder::Score, &DefaultCollator);
        assert_eq!(references(&solutions), vec!["c", "a", "b"]);
    }

    #[test]
    fn filter_requires_every_word() {
        let solutions =
            build_from_naming_solutions(&["I like cats", "I like dogs", "You like cats"], "en");
        let found = filter_solutions(&solutions, "LIKE, cats", &DefaultCollator);
        let found: Vec<&str> = found.iter().map(|s| s.reference.as_str()).collect();
        assert_eq!(found, vec!["I like cats", "You like cats"]);
        assert_eq!(filter_solutions(&solutions, " ? ", &DefaultCollator).len(), 3);
    }

    #[test]
    fn filter_folds_query_per_solution_locale() {
        let mut solutions = build_from_naming_solutions(&["Kış geldi"], "tr");
        solutions.extend(build_from_naming_solutions(&["Kiş", "Kış"], "en"));
        let found = filter_solutions(&solutions, "KIŞ", &DefaultCollator);
        let found: Vec<&str> = found.iter().map(|s| s.reference.as_str()).collect();
        assert_eq!(found, vec!["Kış geldi", "Kiş"]);
    }

    #[test]
    fn pagination_clamps() {
        let items: Vec<u32> = (1..=45).collect();
        let page = paginate(&items, 3, 20);
        assert_eq!(page.items, &[41, 42, 43, 44, 45]);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total, 45);
        assert_eq!(paginate(&items, 99, 20).page, 3);
        assert_eq!(paginate(&items, 0, 20).items[0], 1);

        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn sort_order_names() {
        assert_eq!(SortOrder::from_str("score"), Some(SortOrder::Score));
        assert_eq!(SortOrder::from_str(SortOrder::Alphabetical.as_str()), Some(SortOrder::Alphabetical));
        assert_eq!(SortOrder::from_str("random"), None);
    }
}
