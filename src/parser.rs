use crate::error::{PslError, Result};
use crate::types::RuleKind;

const BEGIN_ICANN: &str = "===BEGIN ICANN DOMAINS===";
const END_ICANN: &str = "===END ICANN DOMAINS===";
const BEGIN_PRIVATE: &str = "===BEGIN PRIVATE DOMAINS===";
const END_PRIVATE: &str = "===END PRIVATE DOMAINS===";

/// Section boundary markers of the suffix list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMarker {
    BeginIcann,
    EndIcann,
    BeginPrivate,
    EndPrivate,
}

/// One tokenized line of the suffix list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Comment, whitespace, or a line with nothing usable on it
    Blank,
    Marker(SectionMarker),
    Rule { kind: RuleKind, labels: Vec<String> },
}

/// Parse a single line of the suffix list.
///
/// Markers are recognized with or without the `//` comment prefix used by the
/// published list. Everything after `//` is discarded, and only the first
/// whitespace-separated token is read as the rule.
pub fn parse_line(line: &str, line_num: usize) -> Result<ParsedLine> {
    let trimmed = line.trim();

    if let Some(marker) = parse_marker(trimmed) {
        return Ok(ParsedLine::Marker(marker));
    }

    // Remove comments and trim whitespace
    let content = match trimmed.find("//") {
        Some(comment_pos) => &trimmed[..comment_pos],
        None => trimmed,
    };
    let token = match content.split_whitespace().next() {
        Some(token) => token,
        None => return Ok(ParsedLine::Blank),
    };

    let (kind, body) = if let Some(rest) = token.strip_prefix('!') {
        (RuleKind::Exception, rest)
    } else if token == "*" || token.starts_with("*.") {
        (RuleKind::Wildcard, token)
    } else {
        (RuleKind::Exact, token)
    };

    let labels: Vec<String> = body.split('.').map(|l| l.to_ascii_lowercase()).collect();
    if labels.iter().any(|l| l.is_empty()) {
        log::trace!("skipping line {}: empty label in {:?}", line_num, token);
        return Ok(ParsedLine::Blank);
    }

    if kind == RuleKind::Exception && labels.len() < 2 {
        return Err(PslError::MalformedRuleListAtLine {
            line: line_num,
            message: format!("exception rule needs at least two labels: {}", token),
        });
    }

    Ok(ParsedLine::Rule { kind, labels })
}

fn parse_marker(line: &str) -> Option<SectionMarker> {
    let text = line.strip_prefix("//").unwrap_or(line).trim();
    match text {
        BEGIN_ICANN => Some(SectionMarker::BeginIcann),
        END_ICANN => Some(SectionMarker::EndIcann),
        BEGIN_PRIVATE => Some(SectionMarker::BeginPrivate),
        END_PRIVATE => Some(SectionMarker::EndPrivate),
        _ => None,
    }
}
