//! Reversed-label suffix trie.
//!
//! Rules are stored as label paths read from the rightmost label inward, so
//! `co.uk` becomes root -> "uk" -> "co" and `*.ck` becomes root -> "ck" -> "*".
//! Lookup cost is bounded by the number of labels in the hostname, not by the
//! number of rules.

use std::collections::HashMap;

use crate::compile::RuleSet;
use crate::types::{MatchResult, Rule, RuleKind, TldType};

/// Label used for wildcard edges
const WILDCARD: &str = "*";

/// A node in the reversed-label trie.
///
/// A node can be a terminal for more than one rule kind at once, e.g. `ck`
/// may be an exact rule while also hosting the `*` edge of `*.ck`.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    exact: Option<TldType>,
    wildcard: Option<TldType>,
    exception: Option<TldType>,
}

impl TrieNode {
    fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }
}

/// Immutable suffix trie built from a RuleSet
#[derive(Debug, Clone, Default)]
pub struct SuffixTrie {
    root: TrieNode,
}

impl SuffixTrie {
    /// Build a trie from all rules in the set.
    pub fn new(rules: &RuleSet) -> Self {
        let mut trie = Self::default();
        for rule in rules.rules() {
            trie.insert(rule);
        }
        trie
    }

    fn insert(&mut self, rule: &Rule) {
        let mut node = &mut self.root;
        // Traverse labels in reverse order (uk -> co -> ...)
        for label in rule.labels.iter().rev() {
            node = node.children.entry(label.clone()).or_default();
        }
        let slot = match rule.kind {
            RuleKind::Exact => &mut node.exact,
            RuleKind::Wildcard => &mut node.wildcard,
            RuleKind::Exception => &mut node.exception,
        };
        *slot = Some(rule.origin);
    }

    /// Check if the trie holds no rules
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of nodes, root excluded
    pub fn node_count(&self) -> usize {
        self.root.count() - 1
    }

    /// Find the prevailing rule for `labels` (hostname order, lowercased).
    ///
    /// The deepest exact or wildcard terminal on the walked path wins. An
    /// exception terminal reached on a verbatim edge wins outright, and its
    /// suffix is the exception minus its leftmost label. With no terminal on
    /// the path the implicit `*` rule applies and the suffix is the last label.
    ///
    /// Returns `None` only for an empty label slice.
    pub fn find_match(&self, labels: &[&str]) -> Option<MatchResult> {
        if labels.is_empty() {
            return None;
        }

        let mut node = &self.root;
        // (suffix length, origin, kind)
        let mut best: Option<(usize, TldType, RuleKind)> = None;

        for (i, label) in labels.iter().rev().enumerate() {
            let depth = i + 1;
            let verbatim = node.children.get(*label);
            let wildcard = node.children.get(WILDCARD);

            if let Some(child) = verbatim {
                if let Some(origin) = child.exception.filter(|_| depth > 1) {
                    return Some(make_result(
                        labels,
                        depth - 1,
                        origin,
                        Some(RuleKind::Exception),
                    ));
                }
                if let Some(origin) = child.exact {
                    best = Some((depth, origin, RuleKind::Exact));
                }
            }

            if let Some(origin) = wildcard.and_then(|w| w.wildcard) {
                if best.map_or(true, |(len, _, _)| len < depth) {
                    best = Some((depth, origin, RuleKind::Wildcard));
                }
            }

            match verbatim.or(wildcard) {
                Some(next) => node = next,
                None => break,
            }
        }

        Some(match best {
            Some((len, origin, kind)) => make_result(labels, len, origin, Some(kind)),
            None => make_result(labels, 1, TldType::Icann, None),
        })
    }
}

fn make_result(
    labels: &[&str],
    suffix_len: usize,
    origin: TldType,
    rule_kind: Option<RuleKind>,
) -> MatchResult {
    let start = labels.len() - suffix_len;
    MatchResult {
        suffix_labels: labels[start..].iter().map(|l| l.to_string()).collect(),
        origin,
        rule_kind,
    }
}
