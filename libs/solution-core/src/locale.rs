//! Locale-sensitive comparison and case folding.
//!
//! The builder and matcher never compare user-facing strings directly; they go
//! through a [`Collator`] so the comparison rules can be swapped in tests or by
//! hosts with access to a full collation library.

use std::cmp::Ordering;

/// Locale-aware string comparison and case folding.
pub trait Collator: Send + Sync {
    /// Compare two strings, ignoring case and punctuation.
    fn compare(&self, x: &str, y: &str, locale: &str) -> Ordering;

    /// Lower-case a string according to the rules of `locale`.
    fn fold_case(&self, value: &str, locale: &str) -> String;
}

/// Generic collation: case-insensitive, punctuation-insensitive and
/// numeric-aware. Unknown locale tags use the generic rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCollator;

impl Collator for DefaultCollator {
    fn compare(&self, x: &str, y: &str, locale: &str) -> Ordering {
        let x = collation_units(&self.fold_case(x, locale));
        let y = collation_units(&self.fold_case(y, locale));
        x.cmp(&y)
    }

    fn fold_case(&self, value: &str, locale: &str) -> String {
        match primary_subtag(locale).as_str() {
            "tr" | "az" => value
                .chars()
                .map(|c| match c {
                    'I' => 'ı',
                    'İ' => 'i',
                    other => other,
                })
                .collect::<String>()
                .to_lowercase(),
            _ => value.to_lowercase(),
        }
    }
}

/// Numbers sort before letters; runs of digits compare by numeric value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CollationUnit {
    Number { digits: usize, value: String },
    Char(char),
}

fn collation_units(folded: &str) -> Vec<CollationUnit> {
    let mut units = Vec::new();
    let mut chars = folded.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut value = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                value.push(next);
                chars.next();
            }
            let trimmed = value.trim_start_matches('0');
            let value = if trimmed.is_empty() { "0" } else { trimmed }.to_string();
            units.push(CollationUnit::Number {
                digits: value.len(),
                value,
            });
        } else if c.is_alphanumeric() {
            units.push(CollationUnit::Char(c));
        }
    }

    units
}

/// Primary language subtag of a locale tag, lower-cased (`"pt-BR"` -> `"pt"`).
pub fn primary_subtag(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether two locale tags name the same language.
pub fn same_language(x: &str, y: &str) -> bool {
    primary_subtag(x) == primary_subtag(y)
}

/// Whether words of the language are separated by spaces.
pub fn is_whitespace_delimited(locale: &str) -> bool {
    !matches!(
        primary_subtag(locale).as_str(),
        "ja" | "zh" | "th" | "lo" | "km" | "my"
    )
}
