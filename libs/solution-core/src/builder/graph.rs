//! Expansion of a solution graph into token sequences.
//!
//! Position `0` starts every sentence. A vertex leads to the group at its `to`
//! position; a missing `to`, or an empty group at the last index, ends the
//! sentence. A `to` past the end of the graph leads nowhere.

use std::collections::BTreeMap;
use std::rc::Rc;

use ahash::{AHashMap, AHashSet};

use super::token::parse_group;
use crate::locale::Collator;
use crate::types::{Token, Vertex};

type Paths = Rc<Vec<Vec<Token>>>;

pub(crate) struct GraphExpander<'a, C: Collator> {
    /// For each position, the surviving vertices grouped by next position.
    groups: Vec<BTreeMap<Option<usize>, Vec<&'a Vertex>>>,
    last_position: usize,
    locale: &'a str,
    whitespace_delimited: bool,
    collator: &'a C,
    memo: AHashMap<usize, Paths>,
    visiting: AHashSet<usize>,
    pruned: usize,
}

impl<'a, C: Collator> GraphExpander<'a, C> {
    /// `vertices` must not be empty.
    pub(crate) fn new(
        vertices: &'a [Vec<Vertex>],
        locale: &'a str,
        include_automatic: bool,
        whitespace_delimited: bool,
        collator: &'a C,
    ) -> Self {
        let groups = vertices
            .iter()
            .map(|position| {
                let mut by_next: BTreeMap<Option<usize>, Vec<&Vertex>> = BTreeMap::new();
                for vertex in position
                    .iter()
                    .filter(|v| !v.is_typo() && (include_automatic || !v.auto))
                {
                    by_next.entry(vertex.to).or_default().push(vertex);
                }
                by_next
            })
            .collect();

        Self {
            groups,
            last_position: vertices.len().saturating_sub(1),
            locale,
            whitespace_delimited,
            collator,
            memo: AHashMap::new(),
            visiting: AHashSet::new(),
            pruned: 0,
        }
    }

    /// Every complete token sequence starting at position 0.
    pub(crate) fn expand_all(&mut self) -> Vec<Vec<Token>> {
        let paths = self.expand(Some(0));
        paths.iter().filter(|path| !path.is_empty()).cloned().collect()
    }

    /// Number of vertex groups that produced no token.
    pub(crate) fn pruned(&self) -> usize {
        self.pruned
    }

    fn expand(&mut self, position: Option<usize>) -> Paths {
        let Some(position) = position else {
            return Rc::new(vec![Vec::new()]);
        };
        if let Some(paths) = self.memo.get(&position) {
            return Rc::clone(paths);
        }
        // A cycle can only come from malformed data; such a path never ends.
        if !self.visiting.insert(position) {
            return Rc::new(Vec::new());
        }

        let Some(by_next) = self.groups.get(position) else {
            self.visiting.remove(&position);
            return Rc::new(Vec::new());
        };
        let branches: Vec<(Option<usize>, Vec<&'a Vertex>)> = by_next
            .iter()
            .map(|(next, group)| (*next, group.clone()))
            .collect();

        let mut paths = Vec::new();
        if branches.is_empty() {
            if position == self.last_position {
                paths.push(Vec::new());
            }
        } else {
            for (next, group) in branches {
                let Some(token) =
                    parse_group(&group, self.locale, self.whitespace_delimited, self.collator)
                else {
                    self.pruned += 1;
                    continue;
                };

                for tail in self.expand(next).iter() {
                    let mut path = Vec::with_capacity(tail.len() + 1);
                    path.push(token.clone());
                    path.extend(tail.iter().cloned());
                    paths.push(path);
                }
            }
        }

        self.visiting.remove(&position);
        let paths = Rc::new(paths);
        self.memo.insert(position, Rc::clone(&paths));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::DefaultCollator;

    fn expand(vertices: &[Vec<Vertex>]) -> Vec<String> {
        let mut expander = GraphExpander::new(vertices, "en", false, true, &DefaultCollator);
        let mut references: Vec<String> = expander
            .expand_all()
            .iter()
            .map(|path| path.iter().map(Token::reference).collect())
            .collect();
        references.sort();
        references
    }

    #[test]
    fn null_target_ends_the_sentence() {
        let vertices = vec![
            vec![Vertex::new("Hi", Some(1))],
            vec![Vertex::new("!", None)],
        ];
        assert_eq!(expand(&vertices), vec!["Hi!"]);
    }

    #[test]
    fn empty_last_position_ends_the_sentence() {
        let vertices = vec![
            vec![Vertex::new("I", Some(1))],
            vec![Vertex::new(" ", Some(2))],
            vec![Vertex::new("run", Some(3)), Vertex::new("walk", Some(3))],
            vec![],
        ];
        let mut expander = GraphExpander::new(&vertices, "en", false, true, &DefaultCollator);
        let paths = expander.expand_all();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0][2].values(), ["run", "walk"]);
    }

    #[test]
    fn branches_by_next_position() {
        // "I am" / "I'm"
        let vertices = vec![
            vec![Vertex::new("I", Some(1)), Vertex::new("I'm", Some(3))],
            vec![Vertex::new(" ", Some(2))],
            vec![Vertex::new("am", Some(3))],
            vec![Vertex::new(" here", None)],
        ];
        assert_eq!(expand(&vertices), vec!["I am here", "I'm here"]);
    }

    #[test]
    fn dead_ends_produce_nothing() {
        let vertices = vec![
            vec![Vertex::new("a", Some(1)), Vertex::new("b", Some(2))],
            vec![],
            vec![Vertex::new("c", None)],
        ];
        assert_eq!(expand(&vertices), vec!["bc"]);
    }

    #[test]
    fn target_past_the_end_leads_nowhere() {
        let vertices = vec![
            vec![Vertex::new("a", Some(5)), Vertex::new("b", Some(1))],
            vec![Vertex::new("!", None)],
        ];
        assert_eq!(expand(&vertices), vec!["b!"]);
    }

    #[test]
    fn typo_only_group_prunes_the_path() {
        let vertices = vec![
            vec![
                Vertex::new("cta", Some(1)).with_kind("typo"),
                Vertex::new("dog", Some(2)),
            ],
            vec![Vertex::new("!", None)],
            vec![Vertex::new("?", None)],
        ];
        let mut expander = GraphExpander::new(&vertices, "en", false, true, &DefaultCollator);
        let paths = expander.expand_all();
        assert_eq!(paths.len(), 1);
        assert_eq!(expander.pruned(), 0);
        assert_eq!(paths[0][0].reference(), "dog");
    }

    #[test]
    fn filtered_values_count_as_pruned() {
        let vertices = vec![vec![Vertex::new("a b", None)]];
        let mut expander = GraphExpander::new(&vertices, "en", false, true, &DefaultCollator);
        assert!(expander.expand_all().is_empty());
        assert_eq!(expander.pruned(), 1);
    }

    #[test]
    fn cycles_do_not_recurse_forever() {
        let vertices = vec![
            vec![Vertex::new("a", Some(1))],
            vec![Vertex::new("b", Some(0)), Vertex::new("c", None)],
        ];
        assert_eq!(expand(&vertices), vec!["ac"]);
    }
}
