use crate::{
    location::Location,
    matching::{global_cache, join_paths, MatcherCache},
    params::ParamsMap,
};
use std::borrow::Cow;

/// One frame in the chain of currently rendered routes, outermost first.
/// Each frame carries its own pattern, possibly relative to its parent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActiveRoute {
    pub path: Option<Cow<'static, str>>,
}

impl ActiveRoute {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A frame rendered without a pattern of its own.
    pub fn pathless() -> Self {
        Self { path: None }
    }
}

/// Returns true if a link to `path` should be highlighted as active for the
/// given location and rendered route chain.
///
/// This checks the path only; combine with [`is_query_active`] when the link
/// carries a query.
pub fn is_path_active(
    path: &str,
    active_location: &Location,
    active_routes: &[ActiveRoute],
    active_params: &ParamsMap,
) -> bool {
    is_path_active_in(
        global_cache(),
        path,
        active_location,
        active_routes,
        active_params,
    )
}

/// [`is_path_active`], matching through the given pattern cache.
pub fn is_path_active_in(
    cache: &MatcherCache,
    path: &str,
    active_location: &Location,
    active_routes: &[ActiveRoute],
    active_params: &ParamsMap,
) -> bool {
    let active_pathname = active_location.pathname.as_str();

    // ancestor-of-current-location fast path, no pattern matching needed
    if path == active_pathname
        || (active_pathname.starts_with(path)
            && active_pathname[path.len()..].starts_with('/'))
    {
        return true;
    }

    let mut base = String::new();
    for route in active_routes {
        let own = route.path.as_deref().unwrap_or("");
        let pattern = if own.starts_with('/') {
            own.to_string()
        } else {
            // relative patterns build on the parent's accumulated path
            join_paths(&base, own)
        };

        let matched = cache
            .matcher(&pattern)
            .ok()
            .and_then(|matcher| matcher.test(path));
        if let Some(matched) = matched {
            if matched.is_exact {
                return matched.params.iter().all(|(name, value)| {
                    active_params.get_str(name) == Some(value)
                });
            }
        }

        base = pattern;
    }

    false
}

/// Returns true if every key present in `query` is present in
/// `active_query` with an equal value (both sides compared as strings).
///
/// An absent candidate query is active against anything; a present one is
/// never active against an absent active query.
pub fn is_query_active(
    query: Option<&ParamsMap>,
    active_query: Option<&ParamsMap>,
) -> bool {
    match (query, active_query) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(query), Some(active_query)) => query
            .iter()
            .all(|(key, value)| active_query.get_str(key) == Some(value)),
    }
}
