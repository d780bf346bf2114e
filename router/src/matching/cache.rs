use super::{MatchOptions, Matcher, PathMatch, PatternError};
use once_cell::sync::Lazy;
use or_poisoned::OrPoisoned;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// A memo table for compiled patterns.
///
/// The same literal pattern is re-matched on every navigation, so compiled
/// matchers are kept for the life of the cache; the pattern space of an
/// application is small and static, so no eviction is needed. Compilation is
/// a pure function of the pattern string, which keeps racing inserts
/// harmless: both writers store value-equal matchers.
#[derive(Debug, Default)]
pub struct MatcherCache {
    matchers: RwLock<HashMap<String, Arc<Matcher>>>,
}

impl MatcherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled matcher for a pattern, compiling it on first use.
    pub fn matcher(&self, pattern: &str) -> Result<Arc<Matcher>, PatternError> {
        if let Some(found) = self.matchers.read().or_poisoned().get(pattern) {
            return Ok(Arc::clone(found));
        }
        let compiled = Arc::new(Matcher::new(pattern)?);
        #[cfg(feature = "tracing")]
        tracing::trace!(pattern, "compiled route pattern");
        self.matchers
            .write()
            .or_poisoned()
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// The number of compiled patterns currently stored.
    pub fn len(&self) -> usize {
        self.matchers.read().or_poisoned().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.read().or_poisoned().is_empty()
    }

    /// Drops every compiled pattern.
    pub fn clear(&self) {
        self.matchers.write().or_poisoned().clear();
    }
}

static GLOBAL_CACHE: Lazy<MatcherCache> = Lazy::new(MatcherCache::default);

/// The process-wide pattern cache used by the convenience entry points.
pub fn global_cache() -> &'static MatcherCache {
    &GLOBAL_CACHE
}

/// Matches a pathname against a pattern, compiling (or reusing) the pattern
/// through the process-wide cache.
///
/// A structurally invalid pattern is an error; a pathname that simply does
/// not match is `Ok(None)`.
pub fn match_path(
    pattern: &str,
    location: &str,
    options: &MatchOptions,
) -> Result<Option<PathMatch>, PatternError> {
    Ok(global_cache().matcher(pattern)?.test_with(location, options))
}
