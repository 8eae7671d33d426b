//! Inspection report and its plain-text rendering.

use std::fmt::Write;

use serde::Serialize;
use solution_core::{Correction, DiffToken, Solution};

#[derive(Debug, Clone, Serialize)]
pub struct ListedSolution {
    pub reference: String,
    pub is_complex: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl From<&Solution> for ListedSolution {
    fn from(solution: &Solution) -> Self {
        Self {
            reference: solution.reference.clone(),
            is_complex: solution.is_complex,
            score: solution.score,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub locale: String,
    /// Number of solutions of the challenge.
    pub total: usize,
    /// Number of solutions left after filtering.
    pub matching: usize,
    pub page: usize,
    pub page_count: usize,
    pub solutions: Vec<ListedSolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closest: Option<ListedSolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<Correction>,
}

impl Report {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "locale: {}  solutions: {} ({} listed)  page {}/{}",
            self.locale, self.total, self.matching, self.page, self.page_count
        );

        for solution in &self.solutions {
            let marker = if solution.is_complex { "*" } else { " " };
            match solution.score {
                Some(score) => {
                    let _ = writeln!(out, "{} {:.3}  {}", marker, score, solution.reference);
                }
                None => {
                    let _ = writeln!(out, "{} {}", marker, solution.reference);
                }
            }
        }

        if let Some(answer) = &self.answer {
            let _ = writeln!(out, "answer: {}", answer);
            if let Some(closest) = &self.closest {
                let _ = writeln!(
                    out,
                    "closest: {} ({:.3})",
                    closest.reference,
                    closest.score.unwrap_or_default()
                );
            }
            match &self.correction {
                Some(Correction::Diff { tokens, .. }) => {
                    let _ = writeln!(out, "correction: {}", render_diff(tokens));
                }
                Some(Correction::NotNeeded) => {
                    let _ = writeln!(out, "correction: none needed");
                }
                Some(Correction::Skipped) => {
                    let _ = writeln!(out, "correction: disabled for this locale");
                }
                None => {}
            }
        }

        out
    }
}

/// `[-removed-]` and `{+added+}` markup.
pub fn render_diff(tokens: &[DiffToken]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.removed {
                format!("[-{}-]", token.value)
            } else if token.added {
                format!("{{+{}+}}", token.value)
            } else {
                token.value.clone()
            }
        })
        .collect()
}
