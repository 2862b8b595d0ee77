//! Hosted-domain prefix derived from a tenant's pool name.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::{DEGENERATE_SLUG_DIGEST_LENGTH, MAX_DOMAIN_PREFIX_LENGTH};

/// Longest namespace tag accepted, leaving room for a meaningful slug
const MAX_NAMESPACE_LENGTH: usize = 32;

static NAMESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("namespace regex is valid"));

static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$").expect("prefix regex is valid")
});

/// Check that a namespace tag only uses characters the provider accepts in a domain prefix.
pub fn is_valid_namespace(namespace: &str) -> bool {
    namespace.len() <= MAX_NAMESPACE_LENGTH && NAMESPACE_REGEX.is_match(namespace)
}

/// Domain prefix under which a pool's hosted login pages are served.
///
/// Always lowercase alphanumerics and hyphens, never empty, at most
/// [`MAX_DOMAIN_PREFIX_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DomainPrefix(String);

impl DomainPrefix {
    /// Derive the prefix for `pool_name` inside `namespace`.
    ///
    /// Same input always yields the same prefix; names differing only in case
    /// or surrounding whitespace collide on purpose.
    pub fn derive(pool_name: &str, namespace: &str) -> Self {
        let name = pool_name.trim();

        let mut slug = slug::slugify(name);
        if slug.is_empty() {
            slug = degenerate_slug(name);
        }

        let budget = MAX_DOMAIN_PREFIX_LENGTH.saturating_sub(namespace.len());
        if slug.len() > budget {
            // slugify output is ASCII, so byte truncation is char-safe
            slug.truncate(budget);
            let kept = slug.trim_end_matches('-').len();
            slug.truncate(kept);
        }

        let prefix = DomainPrefix(format!("{}{}", namespace, slug));
        debug_assert!(
            !is_valid_namespace(namespace) || prefix.is_well_formed(),
            "derived malformed domain prefix {}",
            prefix
        );
        prefix
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the prefix satisfies the provider's domain-prefix rules.
    fn is_well_formed(&self) -> bool {
        PREFIX_REGEX.is_match(&self.0)
    }
}

/// Stand-in slug for names with no transliterable characters (emoji, punctuation).
fn degenerate_slug(name: &str) -> String {
    let digest = Sha256::digest(name.to_lowercase().as_bytes());
    let mut slug = hex::encode(digest);
    slug.truncate(DEGENERATE_SLUG_DIGEST_LENGTH);
    slug
}

impl AsRef<str> for DomainPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DomainPrefix> for String {
    fn from(prefix: DomainPrefix) -> Self {
        prefix.0
    }
}
