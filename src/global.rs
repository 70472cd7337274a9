//! Process-wide default resolver.
//!
//! The list is compiled once by [`init`] and published through a `OnceCell`;
//! after that every thread reads the same immutable resolver.

use once_cell::sync::OnceCell;

use crate::compile::compile;
use crate::error::{PslError, Result};
use crate::resolver::{Resolver, ResolverOptions};
use crate::types::{ParseResult, ResolveOptions};

static DEFAULT_RESOLVER: OnceCell<Resolver> = OnceCell::new();

/// Compile `text` and publish it as the default resolver.
///
/// Fails with `MalformedRuleList` if the text does not compile, and with
/// `AlreadyInitialized` if a resolver was already published.
pub fn init(text: &str) -> Result<()> {
    init_with_options(text, ResolverOptions::default())
}

/// Like [`init`], with explicit resolver options.
pub fn init_with_options(text: &str, options: ResolverOptions) -> Result<()> {
    if DEFAULT_RESOLVER.get().is_some() {
        return Err(PslError::AlreadyInitialized);
    }
    let resolver = Resolver::new(compile(text)?, options);
    DEFAULT_RESOLVER
        .set(resolver)
        .map_err(|_| PslError::AlreadyInitialized)?;
    log::debug!("default suffix resolver initialized");
    Ok(())
}

/// The default resolver, if initialized
pub fn get() -> Option<&'static Resolver> {
    DEFAULT_RESOLVER.get()
}

fn resolver() -> Result<&'static Resolver> {
    get().ok_or(PslError::NotInitialized)
}

/// Resolve a hostname with the default resolver.
pub fn resolve(hostname: &str, options: ResolveOptions) -> Result<ParseResult> {
    resolver()?.resolve(hostname, options)
}

/// Registered domain of a hostname, using the default resolver.
pub fn registered_domain(hostname: &str) -> Result<String> {
    resolver()?.registered_domain(hostname)
}

/// Public suffix of a hostname, using the default resolver.
pub fn public_suffix(hostname: &str) -> Result<String> {
    resolver()?.public_suffix(hostname)
}
