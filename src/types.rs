use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a suffix rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Plain rule: `co.uk`
    Exact,
    /// Wildcard rule: `*.ck`
    Wildcard,
    /// Exception rule: `!www.ck`
    Exception,
}

/// Section of the list a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TldType {
    Icann,
    Private,
}

impl fmt::Display for TldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TldType::Icann => f.write_str("icann"),
            TldType::Private => f.write_str("private"),
        }
    }
}

/// A single compiled line of the suffix list.
///
/// `labels` are stored left-to-right as written, lowercased. Wildcard rules keep
/// the literal `*` label; exception rules drop the leading `!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub labels: Vec<String>,
    pub origin: TldType,
}

impl Rule {
    /// Rule text without the `!` prefix, e.g. `*.ck` or `www.ck`
    pub fn dotted(&self) -> String {
        self.labels.join(".")
    }

    /// Number of labels, which is the trie depth of the rule's terminal
    pub fn depth(&self) -> usize {
        self.labels.len()
    }
}

/// Outcome of a trie lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Public suffix labels in hostname order (`["co", "uk"]`)
    pub suffix_labels: Vec<String>,
    /// Origin of the prevailing rule
    pub origin: TldType,
    /// Kind of the prevailing rule, `None` when the implicit `*` rule applied
    pub rule_kind: Option<RuleKind>,
}

impl MatchResult {
    /// Number of labels in the public suffix
    pub fn suffix_len(&self) -> usize {
        self.suffix_labels.len()
    }

    /// Public suffix as a dotted string
    pub fn suffix(&self) -> String {
        self.suffix_labels.join(".")
    }
}

/// Hostname split into host, registrable domain and public suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Labels left of the registered domain, if any (`www.dept1`)
    pub host: Option<String>,
    /// The single label immediately left of the suffix
    pub domain: String,
    /// Public suffix (`co.uk`)
    pub tld: String,
    pub tld_type: TldType,
    /// `domain` + "." + `tld`
    pub registered_domain: String,
}

impl ParseResult {
    pub(crate) fn from_labels(labels: &[&str], suffix_len: usize, tld_type: TldType) -> Self {
        let split = labels.len() - suffix_len;
        let domain = labels[split - 1].to_string();
        let tld = labels[split..].join(".");
        let host = if split > 1 {
            Some(labels[..split - 1].join("."))
        } else {
            None
        };
        let registered_domain = format!("{}.{}", domain, tld);

        Self {
            host,
            domain,
            tld,
            tld_type,
            registered_domain,
        }
    }

    /// Full hostname reassembled from its parts
    pub fn hostname(&self) -> String {
        match &self.host {
            Some(host) => format!("{}.{}", host, self.registered_domain),
            None => self.registered_domain.clone(),
        }
    }
}

/// Per-query options for hostname resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResolveOptions {
    /// Resolve against ICANN rules only when a private rule prevails
    pub ignore_private: bool,
}

impl ResolveOptions {
    /// Create new resolve options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether private-section rules are ignored.
    pub fn with_ignore_private(mut self, ignore_private: bool) -> Self {
        self.ignore_private = ignore_private;
        self
    }
}

/// Cache key for LRU cache
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    pub name: String, // already lowercased
    pub ignore_private: bool,
}
