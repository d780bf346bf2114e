use super::{
    resolve_path::join_paths,
    segment::{expand_optionals, parse_pattern, PatternSegment},
    PatternError,
};
use crate::params::ParamsMap;

/// Per-match options layered on a compiled pattern.
///
/// `exact` requires the match to consume the entire pathname. `strict`
/// requires trailing-slash presence to mirror the pattern literally; when
/// false a single trailing slash at the end of the pathname is tolerated and
/// a trailing slash in the pattern is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    pub exact: bool,
    pub strict: bool,
}

/// A successful match of a pathname against a pattern.
///
/// A failed match is `None` from [`Matcher::test`], never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// The pattern that was matched.
    pub path: String,
    /// The prefix of the pathname the match consumed.
    pub url: String,
    /// Whether the match consumed the entire pathname.
    pub is_exact: bool,
    /// Captured parameters, in declaration order. Splat captures appear
    /// under their positional keys (`"0"`, `"1"`, …).
    pub params: ParamsMap,
}

/// A compiled route pattern.
///
/// Compilation is a pure function of the pattern string: the same pattern
/// always yields a behaviorally identical matcher, which is what makes
/// process-wide memoization safe. `exact`/`strict` are applied per match,
/// not baked into the compiled form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    path: String,
    leading_slash: bool,
    trailing_slash: bool,
    segments: Vec<PatternSegment>,
    // candidate segment lists: one per combination of optional params,
    // capturing variants first
    variants: Vec<Vec<PatternSegment>>,
    param_names: Vec<String>,
}

impl Matcher {
    /// Compiles a pattern string.
    pub fn new(path: &str) -> Result<Self, PatternError> {
        let parsed = parse_pattern(path)?;
        Ok(Self {
            path: path.to_string(),
            leading_slash: parsed.leading_slash,
            trailing_slash: parsed.trailing_slash,
            variants: expand_optionals(&parsed.segments),
            segments: parsed.segments,
            param_names: parsed.param_names,
        })
    }

    /// Compiles a pattern that may be relative, first resolving it against
    /// the accumulated base path of its ancestors.
    pub fn with_base(base: &str, path: &str) -> Result<Self, PatternError> {
        if path.starts_with('/') {
            Self::new(path)
        } else {
            Self::new(&join_paths(base, path))
        }
    }

    /// The raw pattern this matcher was compiled from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The pattern's tokens in order, as written (optionals unexpanded).
    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    /// Parameter names in declaration order, splats under positional keys.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Tests a pathname with default options.
    pub fn test(&self, location: &str) -> Option<PathMatch> {
        self.test_with(location, &MatchOptions::default())
    }

    /// Tests a pathname, anchored at its start.
    pub fn test_with(
        &self,
        location: &str,
        options: &MatchOptions,
    ) -> Option<PathMatch> {
        for segments in &self.variants {
            let Some((remaining, params)) =
                self.test_variant(segments, location, options)
            else {
                continue;
            };
            let is_exact = remaining.is_empty();
            if options.exact && !is_exact {
                continue;
            }
            let url = &location[..location.len() - remaining.len()];
            return Some(PathMatch {
                path: self.path.clone(),
                url: url.to_string(),
                is_exact,
                params,
            });
        }
        None
    }

    fn test_variant<'a>(
        &self,
        segments: &[PatternSegment],
        location: &'a str,
        options: &MatchOptions,
    ) -> Option<(&'a str, ParamsMap)> {
        let mut remaining = location;
        let mut params = ParamsMap::with_capacity(self.param_names.len());

        // a bare "/" has no segments but still consumes the root slash
        if segments.is_empty() && self.leading_slash {
            if let Some(rest) = remaining.strip_prefix('/') {
                remaining = rest;
            }
        }

        for (i, segment) in segments.iter().enumerate() {
            let expect_slash = i > 0 || self.leading_slash;
            remaining = match segment {
                PatternSegment::Static(text) => {
                    let rest = if expect_slash {
                        remaining.strip_prefix('/')?
                    } else {
                        remaining
                    };
                    let rest = rest.strip_prefix(text.as_str())?;
                    // the segment must end on a boundary, not mid-text
                    if !rest.is_empty() && !rest.starts_with('/') {
                        return None;
                    }
                    rest
                }
                PatternSegment::Param(name) => {
                    let rest = if expect_slash {
                        remaining.strip_prefix('/')?
                    } else {
                        remaining
                    };
                    let len = rest.find('/').unwrap_or(rest.len());
                    if len == 0 {
                        return None;
                    }
                    params.insert(name.clone(), rest[..len].to_string());
                    &rest[len..]
                }
                // expanded away by compilation; nothing to consume
                PatternSegment::OptionalParam(_) => remaining,
                PatternSegment::Splat(index) => {
                    let rest = if expect_slash {
                        match remaining.strip_prefix('/') {
                            Some(rest) => rest,
                            // a splat may match an empty remainder without
                            // its leading slash
                            None if remaining.is_empty() => remaining,
                            None => return None,
                        }
                    } else {
                        remaining
                    };
                    params.insert(index.to_string(), rest.to_string());
                    &rest[rest.len()..]
                }
                PatternSegment::PartialSplat { prefix, index } => {
                    let rest = if expect_slash {
                        remaining.strip_prefix('/')?
                    } else {
                        remaining
                    };
                    let rest = rest.strip_prefix(prefix.as_str())?;
                    params.insert(index.to_string(), rest.to_string());
                    &rest[rest.len()..]
                }
            };
        }

        if options.strict {
            if self.trailing_slash {
                // the pattern's trailing slash must be mirrored literally
                remaining = remaining.strip_prefix('/')?;
            }
        } else if remaining == "/" {
            // tolerate one trailing slash, but only at the very end
            remaining = "";
        }

        // the match must end on a segment boundary: at the end of the
        // pathname, before a slash, or directly after a consumed one
        let consumed = &location[..location.len() - remaining.len()];
        if !remaining.is_empty()
            && !remaining.starts_with('/')
            && !consumed.ends_with('/')
        {
            return None;
        }

        Some((remaining, params))
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchOptions, Matcher};

    #[test]
    fn static_match_consumes_whole_segments_only() {
        let matcher = Matcher::new("/tests/abc").unwrap();
        assert!(matcher.test("/tests/abc").is_some());
        assert!(matcher.test("/tes/abc").is_none());
        assert!(matcher.test("/tests/ab").is_none());
        assert!(matcher.test("/tests/abcd").is_none());
    }

    #[test]
    fn url_is_the_consumed_prefix() {
        let matcher = Matcher::new("/users/:id").unwrap();
        let m = matcher.test("/users/42/edit").unwrap();
        assert_eq!(m.url, "/users/42");
        assert!(!m.is_exact);
    }

    #[test]
    fn exact_option_rejects_partial_matches() {
        let matcher = Matcher::new("/users/:id").unwrap();
        let options = MatchOptions {
            exact: true,
            ..Default::default()
        };
        assert!(matcher.test_with("/users/42/edit", &options).is_none());
        assert!(matcher.test_with("/users/42", &options).is_some());
    }

    #[test]
    fn optional_param_backtracks_before_static() {
        let matcher = Matcher::new("/a/:b?/c").unwrap();
        let with = matcher.test("/a/x/c").unwrap();
        assert_eq!(with.params.get_str("b"), Some("x"));
        assert!(with.is_exact);

        let without = matcher.test("/a/c").unwrap();
        assert_eq!(without.params.get_str("b"), None);
        assert!(without.is_exact);
    }

    #[test]
    fn params_do_not_cross_slashes() {
        let matcher = Matcher::new("/users/:id").unwrap();
        assert!(matcher.test("/users/1/2").unwrap().params.get("id")
            == Some("1".to_string()));
    }

    #[test]
    fn relative_pattern_needs_a_base() {
        let bare = Matcher::new("users").unwrap();
        assert!(bare.test("/users").is_none());

        let based = Matcher::with_base("/admin", "users").unwrap();
        assert_eq!(based.path(), "/admin/users");
        assert!(based.test("/admin/users").unwrap().is_exact);
    }

    #[test]
    fn partial_splat_captures_after_literal_prefix() {
        let matcher = Matcher::new("/files/archive-*").unwrap();
        let m = matcher.test("/files/archive-2024/q1").unwrap();
        assert_eq!(m.params.get_str("0"), Some("2024/q1"));
        assert!(m.is_exact);
        assert!(matcher.test("/files/other").is_none());
    }

    #[test]
    fn doubled_slash_matches_empty_segment() {
        let matcher = Matcher::new("/a//b").unwrap();
        assert!(matcher.test("/a//b").unwrap().is_exact);
        assert!(matcher.test("/a/b").is_none());
    }

    #[test]
    fn param_names_are_ordered() {
        let matcher = Matcher::new("/:a/:b/*").unwrap();
        assert_eq!(matcher.param_names(), &["a", "b", "0"]);
    }

    #[test]
    fn segments_report_the_pattern_as_written() {
        use crate::matching::PatternSegment;
        let matcher = Matcher::new("/docs/:page?/*").unwrap();
        assert_eq!(
            matcher.segments(),
            &[
                PatternSegment::Static("docs".into()),
                PatternSegment::OptionalParam("page".into()),
                PatternSegment::Splat(0),
            ]
        );
    }
}
