mod trie;

pub use trie::SuffixTrie;

use crate::compile::RuleSet;
use crate::types::MatchResult;

/// Suffix matcher over a full rule set and its ICANN-only subset.
///
/// Built once and never mutated, so it can be shared across threads without
/// locking.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    all: SuffixTrie,
    icann: SuffixTrie,
}

impl Matcher {
    /// Build both tries from a rule set.
    pub fn build(rules: &RuleSet) -> Self {
        let all = SuffixTrie::new(rules);
        let icann = SuffixTrie::new(&rules.icann_only());
        log::debug!(
            "built suffix matcher: {} nodes ({} ICANN-only)",
            all.node_count(),
            icann.node_count()
        );
        Self { all, icann }
    }

    /// Match labels against every rule.
    pub fn find_match(&self, labels: &[&str]) -> Option<MatchResult> {
        self.all.find_match(labels)
    }

    /// Match labels against ICANN rules only.
    pub fn find_icann_match(&self, labels: &[&str]) -> Option<MatchResult> {
        self.icann.find_match(labels)
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

impl From<&RuleSet> for Matcher {
    fn from(rules: &RuleSet) -> Self {
        Self::build(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use crate::types::{RuleKind, TldType};

    const LIST: &str = "===BEGIN ICANN DOMAINS===\nio\n===END ICANN DOMAINS===\n\
                        ===BEGIN PRIVATE DOMAINS===\ngithub.io\n===END PRIVATE DOMAINS===\n";

    #[test]
    fn test_icann_view_skips_private_rules() {
        let matcher = Matcher::build(&compile(LIST).unwrap());
        let labels = ["user", "github", "io"];

        let m = matcher.find_match(&labels).unwrap();
        assert_eq!(m.suffix(), "github.io");
        assert_eq!(m.origin, TldType::Private);

        let m = matcher.find_icann_match(&labels).unwrap();
        assert_eq!(m.suffix(), "io");
        assert_eq!(m.origin, TldType::Icann);
        assert_eq!(m.rule_kind, Some(RuleKind::Exact));
    }

    #[test]
    fn test_default_matcher_uses_implicit_rule() {
        let matcher = Matcher::default();
        assert!(matcher.is_empty());
        let m = matcher.find_match(&["example", "com"]).unwrap();
        assert_eq!(m.suffix(), "com");
        assert_eq!(m.rule_kind, None);
    }
}
