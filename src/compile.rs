use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{PslError, Result};
use crate::parser::{parse_line, ParsedLine, SectionMarker};
use crate::types::{Rule, RuleKind, TldType};

/// Rules keyed by their label sequence
type RuleMap = HashMap<Vec<String>, Rule>;

/// Compiled suffix rules, partitioned by kind.
///
/// Each label sequence appears at most once per kind; a later duplicate line
/// replaces the earlier one.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    exact: RuleMap,
    wildcard: RuleMap,
    exception: RuleMap,
}

impl RuleSet {
    /// Insert a rule, replacing any previous rule of the same kind and labels.
    pub fn insert(&mut self, rule: Rule) {
        let map = match rule.kind {
            RuleKind::Exact => &mut self.exact,
            RuleKind::Wildcard => &mut self.wildcard,
            RuleKind::Exception => &mut self.exception,
        };
        map.insert(rule.labels.clone(), rule);
    }

    /// Look up a rule by kind and labels.
    pub fn get(&self, kind: RuleKind, labels: &[String]) -> Option<&Rule> {
        match kind {
            RuleKind::Exact => self.exact.get(labels),
            RuleKind::Wildcard => self.wildcard.get(labels),
            RuleKind::Exception => self.exception.get(labels),
        }
    }

    pub fn exact(&self) -> impl Iterator<Item = &Rule> {
        self.exact.values()
    }

    pub fn wildcard(&self) -> impl Iterator<Item = &Rule> {
        self.wildcard.values()
    }

    pub fn exception(&self) -> impl Iterator<Item = &Rule> {
        self.exception.values()
    }

    /// Iterate over all rules, exact first, then wildcard, then exception.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.exact().chain(self.wildcard()).chain(self.exception())
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcard.len() + self.exception.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of this set restricted to ICANN rules.
    pub fn icann_only(&self) -> RuleSet {
        let mut set = RuleSet::default();
        for rule in self.rules().filter(|r| r.origin == TldType::Icann) {
            set.insert(rule.clone());
        }
        set
    }
}

/// Where the compiler is within the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Icann,
    Private,
}

/// Compile raw suffix list text into a RuleSet.
///
/// The text must contain the ICANN section markers; the private section is
/// optional. Every rule line must sit inside a section.
pub fn compile(text: &str) -> Result<RuleSet> {
    let mut rules = RuleSet::default();
    let mut section = Section::Outside;
    let mut seen_icann = false;
    let mut seen_private = false;

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers

        match parse_line(line, line_num)? {
            ParsedLine::Blank => {}
            ParsedLine::Marker(marker) => {
                section = next_section(section, marker, seen_icann, seen_private, line_num)?;
                match marker {
                    SectionMarker::BeginIcann => seen_icann = true,
                    SectionMarker::BeginPrivate => seen_private = true,
                    _ => {}
                }
            }
            ParsedLine::Rule { kind, labels } => {
                let origin = match section {
                    Section::Icann => TldType::Icann,
                    Section::Private => TldType::Private,
                    Section::Outside => {
                        return Err(PslError::MalformedRuleListAtLine {
                            line: line_num,
                            message: format!(
                                "rule outside of ICANN/PRIVATE section: {}",
                                labels.join(".")
                            ),
                        })
                    }
                };
                rules.insert(Rule {
                    kind,
                    labels,
                    origin,
                });
            }
        }
    }

    if !seen_icann {
        return Err(PslError::MalformedRuleList(
            "missing ===BEGIN ICANN DOMAINS=== marker".to_string(),
        ));
    }
    if section != Section::Outside {
        return Err(PslError::MalformedRuleList(format!(
            "unterminated {:?} section",
            section
        )));
    }
    if rules.is_empty() {
        return Err(PslError::MalformedRuleList(
            "list contains no rules".to_string(),
        ));
    }

    log::debug!(
        "compiled suffix list: {} exact, {} wildcard, {} exception rules",
        rules.exact.len(),
        rules.wildcard.len(),
        rules.exception.len()
    );

    Ok(rules)
}

/// Compile a suffix list read from a file.
pub fn compile_from_file(path: impl AsRef<Path>) -> Result<RuleSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    log::debug!("loaded suffix list from {}", path.display());
    compile(&text)
}

fn next_section(
    current: Section,
    marker: SectionMarker,
    seen_icann: bool,
    seen_private: bool,
    line_num: usize,
) -> Result<Section> {
    let next = match (current, marker) {
        (Section::Outside, SectionMarker::BeginIcann) if !seen_icann => Some(Section::Icann),
        (Section::Outside, SectionMarker::BeginPrivate) if !seen_private => {
            Some(Section::Private)
        }
        (Section::Icann, SectionMarker::EndIcann) => Some(Section::Outside),
        (Section::Private, SectionMarker::EndPrivate) => Some(Section::Outside),
        _ => None,
    };

    next.ok_or_else(|| PslError::MalformedRuleListAtLine {
        line: line_num,
        message: format!("unexpected {:?} marker in {:?} section", marker, current),
    })
}
