//! PSL Engine - public suffix resolution for Rust
//!
//! This library splits hostnames at the boundary between the registrable
//! domain and its public suffix, using the rules of the Public Suffix List:
//! - Exact rules (`co.uk`)
//! - Wildcard rules (`*.ck`)
//! - Exception rules (`!www.ck`)
//! - ICANN / private section tagging
//! - Reversed-label trie lookup bounded by hostname length
//! - LRU caching of resolved hostnames
//!
//! Fetching the list is left to the caller; the engine consumes its text.
//!
//! # Example
//!
//! ```rust
//! use psl_engine_r::{Resolver, ResolverOptions, ResolveOptions, TldType};
//!
//! let list = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! io
//! co.uk
//! // ===END ICANN DOMAINS===
//! // ===BEGIN PRIVATE DOMAINS===
//! github.io
//! // ===END PRIVATE DOMAINS===
//! ";
//!
//! let resolver = Resolver::from_text(list, ResolverOptions::default()).unwrap();
//!
//! let result = resolver.resolve("www.dept1.foo.co.uk", ResolveOptions::default()).unwrap();
//! assert_eq!(result.host.as_deref(), Some("www.dept1"));
//! assert_eq!(result.registered_domain, "foo.co.uk");
//!
//! let result = resolver
//!     .resolve("username.github.io", ResolveOptions::new().with_ignore_private(true))
//!     .unwrap();
//! assert_eq!(result.tld, "io");
//! assert_eq!(result.tld_type, TldType::Icann);
//! ```
//!
//! # Rule Syntax
//!
//! | Line | Kind | Meaning |
//! |------|------|---------|
//! | `com` | Exact | `com` is a public suffix |
//! | `*.ck` | Wildcard | any label under `ck` is a public suffix |
//! | `!www.ck` | Exception | `www.ck` is registrable despite `*.ck` |
//! | `// text` | Comment | ignored |
//!
//! Rules must appear between `===BEGIN ICANN DOMAINS===` / `===END ICANN DOMAINS===`
//! or `===BEGIN PRIVATE DOMAINS===` / `===END PRIVATE DOMAINS===` marker lines.

pub mod compile;
pub mod error;
pub mod global;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod types;

// Re-export commonly used items
pub use compile::{compile, compile_from_file, RuleSet};
pub use error::{ErrorKind, PslError, Result};
pub use matcher::{Matcher, SuffixTrie};
pub use parser::{parse_line, ParsedLine, SectionMarker};
pub use types::{MatchResult, ParseResult, ResolveOptions, Rule, RuleKind, TldType};

// Re-export resolver types
pub use resolver::{Resolver, ResolverOptions, DEFAULT_CACHE_SIZE};
