//! Hostname resolver module.
//!
//! Splits hostnames into host, registrable domain and public suffix using a
//! compiled [`Matcher`].

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use lru::LruCache;
use parking_lot::Mutex;

use crate::compile::{compile, RuleSet};
use crate::error::{PslError, Result};
use crate::matcher::Matcher;
use crate::types::{CacheKey, ParseResult, ResolveOptions, TldType};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Resolver builder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// LRU cache size for resolution results, 0 disables caching
    pub cache_size: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl ResolverOptions {
    /// Create new resolver options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }
}

/// Resolves hostnames against a compiled suffix list.
///
/// The rule set and matcher are immutable after construction; only the
/// optional result cache is behind a lock.
pub struct Resolver {
    rules: RuleSet,
    matcher: Matcher,
    cache: Option<Mutex<LruCache<CacheKey, ParseResult>>>,
}

impl Resolver {
    /// Create a resolver from a compiled rule set.
    pub fn new(rules: RuleSet, options: ResolverOptions) -> Self {
        let matcher = Matcher::build(&rules);
        let cache = NonZeroUsize::new(options.cache_size).map(|n| Mutex::new(LruCache::new(n)));
        Self {
            rules,
            matcher,
            cache,
        }
    }

    /// Create a resolver from raw suffix list text.
    pub fn from_text(text: &str, options: ResolverOptions) -> Result<Self> {
        let rules = compile(text)?;
        Ok(Self::new(rules, options))
    }

    /// Create a resolver from a suffix list file.
    pub fn from_file(path: impl AsRef<Path>, options: ResolverOptions) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_text(&text, options)
    }

    /// Rule set the resolver was built from
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Matcher the resolver queries
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Split a hostname into host, domain and public suffix.
    ///
    /// The hostname is ASCII-lowercased before matching. With
    /// `ignore_private`, a hostname whose prevailing rule is private is
    /// matched again against ICANN rules only.
    pub fn resolve(&self, hostname: &str, options: ResolveOptions) -> Result<ParseResult> {
        if hostname.trim().is_empty() {
            return Err(PslError::InvalidInput);
        }

        let name = hostname.to_ascii_lowercase();
        let key = CacheKey {
            name,
            ignore_private: options.ignore_private,
        };

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.lock().get(&key) {
                return Ok(cached.clone());
            }
        }

        // Resolution is pure, so it runs outside the cache lock.
        let result = self.resolve_uncached(&key.name, options)?;

        if let Some(cache) = &self.cache {
            cache.lock().put(key, result.clone());
        }

        Ok(result)
    }

    fn resolve_uncached(&self, name: &str, options: ResolveOptions) -> Result<ParseResult> {
        let labels: Vec<&str> = name.split('.').collect();
        if labels.iter().any(|l| l.is_empty()) {
            return Err(PslError::InvalidHostname(name.to_string()));
        }

        let matched = self
            .matcher
            .find_match(&labels)
            .ok_or(PslError::InvalidInput)?;
        if matched.suffix_len() >= labels.len() {
            return Err(PslError::IsPublicSuffix(name.to_string()));
        }

        if options.ignore_private && matched.origin == TldType::Private {
            let icann = self
                .matcher
                .find_icann_match(&labels)
                .ok_or(PslError::InvalidInput)?;
            log::trace!(
                "{}: private suffix {} replaced by {}",
                name,
                matched.suffix(),
                icann.suffix()
            );
            if icann.suffix_len() >= labels.len() {
                return Err(PslError::IsPublicSuffix(name.to_string()));
            }
            return Ok(ParseResult::from_labels(
                &labels,
                icann.suffix_len(),
                icann.origin,
            ));
        }

        Ok(ParseResult::from_labels(
            &labels,
            matched.suffix_len(),
            matched.origin,
        ))
    }

    /// Registered domain of a hostname (`foo.co.uk` for `www.foo.co.uk`).
    pub fn registered_domain(&self, hostname: &str) -> Result<String> {
        self.resolve(hostname, ResolveOptions::default())
            .map(|r| r.registered_domain)
    }

    /// Public suffix of a hostname (`co.uk` for `www.foo.co.uk`).
    pub fn public_suffix(&self, hostname: &str) -> Result<String> {
        self.resolve(hostname, ResolveOptions::default())
            .map(|r| r.tld)
    }

    /// Check if the hostname is exactly a public suffix.
    pub fn is_public_suffix(&self, hostname: &str) -> bool {
        matches!(
            self.resolve(hostname, ResolveOptions::default()),
            Err(PslError::IsPublicSuffix(_))
        )
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    /// Number of cached results
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.lock().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const LIST: &str = r#"
// ===BEGIN ICANN DOMAINS===
com
uk
co.uk
ck
*.ck
!www.ck
io
// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===
github.io
blogspot.co.uk
*.platform.example.io
// ===END PRIVATE DOMAINS===
"#;

    fn resolver() -> Resolver {
        Resolver::from_text(LIST, ResolverOptions::default()).unwrap()
    }

    fn resolve(host: &str) -> Result<ParseResult> {
        resolver().resolve(host, ResolveOptions::default())
    }

    fn resolve_icann(host: &str) -> Result<ParseResult> {
        resolver().resolve(host, ResolveOptions::new().with_ignore_private(true))
    }

    #[test]
    fn test_resolve_with_host() {
        let r = resolve("www.dept1.foo.co.uk").unwrap();
        assert_eq!(r.host.as_deref(), Some("www.dept1"));
        assert_eq!(r.domain, "foo");
        assert_eq!(r.tld, "co.uk");
        assert_eq!(r.tld_type, TldType::Icann);
        assert_eq!(r.registered_domain, "foo.co.uk");
    }

    #[test]
    fn test_resolve_without_host() {
        let r = resolve("example.com").unwrap();
        assert!(r.host.is_none());
        assert_eq!(r.domain, "example");
        assert_eq!(r.tld, "com");
        assert_eq!(r.registered_domain, "example.com");
    }

    #[test]
    fn test_resolve_mixed_case() {
        assert_eq!(resolve("WWW.Example.COM").unwrap(), resolve("www.example.com").unwrap());
    }

    #[test]
    fn test_resolve_exception() {
        let r = resolve("www.ck").unwrap();
        assert_eq!(r.tld, "ck");
        assert_eq!(r.domain, "www");
        assert!(r.host.is_none());

        let r = resolve("a.b.ck").unwrap();
        assert_eq!(r.tld, "b.ck");
        assert_eq!(r.domain, "a");
    }

    #[test]
    fn test_resolve_public_suffix_rejected() {
        for host in ["com", "co.uk", "github.io", "foo.ck", "unknowntld"] {
            let err = resolve(host).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IsPublicSuffix, "host: {}", host);
        }
    }

    #[test]
    fn test_resolve_invalid_input() {
        assert!(matches!(resolve(""), Err(PslError::InvalidInput)));
        assert!(matches!(resolve("   "), Err(PslError::InvalidInput)));
    }

    #[test]
    fn test_resolve_invalid_hostname() {
        for host in [".example.com", "example.com.", "www..example.com", "."] {
            let err = resolve(host).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidHostname, "host: {}", host);
        }
    }

    #[test]
    fn test_resolve_private() {
        let r = resolve("username.github.io").unwrap();
        assert!(r.host.is_none());
        assert_eq!(r.domain, "username");
        assert_eq!(r.tld, "github.io");
        assert_eq!(r.tld_type, TldType::Private);
        assert_eq!(r.registered_domain, "username.github.io");
    }

    #[test]
    fn test_ignore_private_promotes_icann_parent() {
        let r = resolve_icann("username.github.io").unwrap();
        assert_eq!(r.host.as_deref(), Some("username"));
        assert_eq!(r.domain, "github");
        assert_eq!(r.tld, "io");
        assert_eq!(r.tld_type, TldType::Icann);
        assert_eq!(r.registered_domain, "github.io");
    }

    #[test]
    fn test_ignore_private_multi_label_suffix() {
        // ICANN parent of blogspot.co.uk is co.uk, not uk
        let r = resolve_icann("me.blogspot.co.uk").unwrap();
        assert_eq!(r.host.as_deref(), Some("me"));
        assert_eq!(r.domain, "blogspot");
        assert_eq!(r.tld, "co.uk");

        let r = resolve_icann("a.b.platform.example.io").unwrap();
        assert_eq!(r.host.as_deref(), Some("a.b.platform"));
        assert_eq!(r.domain, "example");
        assert_eq!(r.tld, "io");
    }

    #[test]
    fn test_ignore_private_keeps_icann_results() {
        assert_eq!(
            resolve_icann("www.foo.co.uk").unwrap(),
            resolve("www.foo.co.uk").unwrap()
        );
    }

    #[test]
    fn test_ignore_private_bare_private_suffix() {
        let err = resolve_icann("github.io").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IsPublicSuffix);
    }

    #[test]
    fn test_projections() {
        let resolver = resolver();
        assert_eq!(
            resolver.registered_domain("www.foo.co.uk").unwrap(),
            "foo.co.uk"
        );
        assert_eq!(resolver.public_suffix("www.foo.co.uk").unwrap(), "co.uk");
        assert!(resolver.public_suffix("co.uk").is_err());
        assert!(resolver.is_public_suffix("co.uk"));
        assert!(!resolver.is_public_suffix("foo.co.uk"));
        assert!(!resolver.is_public_suffix(""));
    }

    #[test]
    fn test_cache_hit_returns_same_result() {
        let resolver = resolver();
        let first = resolver.resolve("www.Example.com", ResolveOptions::default()).unwrap();
        assert_eq!(resolver.cached_len(), 1);
        let second = resolver.resolve("WWW.example.COM", ResolveOptions::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.cached_len(), 1);

        // ignore_private is part of the cache key
        resolver
            .resolve("www.example.com", ResolveOptions::new().with_ignore_private(true))
            .unwrap();
        assert_eq!(resolver.cached_len(), 2);

        resolver.clear_cache();
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_errors_not_cached() {
        let resolver = resolver();
        assert!(resolver.resolve("co.uk", ResolveOptions::default()).is_err());
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_cache_disabled() {
        let options = ResolverOptions::new().with_cache_size(0);
        let resolver = Resolver::from_text(LIST, options).unwrap();
        resolver.resolve("example.com", ResolveOptions::default()).unwrap();
        assert_eq!(resolver.cached_len(), 0);
    }

    #[test]
    fn test_from_text_rejects_malformed_list() {
        let result = Resolver::from_text("com\n", ResolverOptions::default());
        assert!(matches!(
            result.map(|_| ()).unwrap_err().kind(),
            ErrorKind::MalformedRuleList
        ));
    }

    #[test]
    fn test_from_file_not_found() {
        let result = Resolver::from_file("/nonexistent/list.dat", ResolverOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_resolver_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Resolver>();
    }
}
