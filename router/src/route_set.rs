use crate::matching::{
    global_cache, join_paths, MatchOptions, MatcherCache, PathMatch,
    PatternError,
};
use std::borrow::Cow;

/// One route definition in a [`RouteSet`]: a pattern (possibly relative to
/// the set's base) plus the options it should be matched with.
///
/// A definition without a path matches every pathname, which is how a
/// fallback ("not found") route is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    path: Option<Cow<'static, str>>,
    options: MatchOptions,
}

impl RouteDef {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: Some(path.into()),
            options: MatchOptions::default(),
        }
    }

    /// A definition that matches unconditionally.
    pub fn fallback() -> Self {
        Self {
            path: None,
            options: MatchOptions::default(),
        }
    }

    pub fn exact(mut self, exact: bool) -> Self {
        self.options.exact = exact;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// An ordered list of route definitions matched first-to-last: the first
/// definition that matches the pathname wins, regardless of how specific a
/// later one might be.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RouteSet {
    base: Option<Cow<'static, str>>,
    routes: Vec<RouteDef>,
}

impl RouteSet {
    pub fn new(routes: impl IntoIterator<Item = RouteDef>) -> Self {
        Self {
            base: None,
            routes: routes.into_iter().collect(),
        }
    }

    /// A route set mounted under a base path. The base must prefix the
    /// pathname or nothing matches; definitions see the pathname with the
    /// base stripped.
    pub fn with_base(
        routes: impl IntoIterator<Item = RouteDef>,
        base: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            base: Some(base.into()),
            routes: routes.into_iter().collect(),
        }
    }

    /// Matches against the process-wide pattern cache.
    pub fn match_route(
        &self,
        pathname: &str,
    ) -> Result<Option<(usize, PathMatch)>, PatternError> {
        self.match_route_in(global_cache(), pathname)
    }

    /// Returns the index and match of the first definition that matches.
    ///
    /// A structurally invalid pattern in any definition reached during the
    /// scan is a configuration error, surfaced immediately.
    pub fn match_route_in(
        &self,
        cache: &MatcherCache,
        pathname: &str,
    ) -> Result<Option<(usize, PathMatch)>, PatternError> {
        let pathname = match &self.base {
            None => pathname,
            Some(base) => {
                let (base, pathname) = if base.starts_with('/') {
                    (
                        base.trim_start_matches('/'),
                        pathname.trim_start_matches('/'),
                    )
                } else {
                    (base.as_ref(), pathname)
                };
                match pathname.strip_prefix(base) {
                    Some(rest) => rest,
                    None => return Ok(None),
                }
            }
        };

        for (index, route) in self.routes.iter().enumerate() {
            let pattern = match route.path() {
                None => Cow::Borrowed(""),
                Some(path) if path.starts_with('/') => Cow::Borrowed(path),
                Some(path) => Cow::Owned(join_paths("", path)),
            };
            let matcher = cache.matcher(&pattern)?;
            if let Some(matched) =
                matcher.test_with(pathname, &route.options)
            {
                return Ok(Some((index, matched)));
            }
        }
        Ok(None)
    }
}
