use waymark_router::{params_map, MatchOptions, Matcher, PathMatch};

fn exact() -> MatchOptions {
    MatchOptions {
        exact: true,
        ..Default::default()
    }
}

#[test]
fn matcher_should_return_no_params_when_location_matches_exactly() {
    let matcher = Matcher::new("/foo/bar").unwrap();
    let matched = matcher.test("/foo/bar");
    assert_eq!(
        matched,
        Some(PathMatch {
            path: "/foo/bar".into(),
            url: "/foo/bar".into(),
            is_exact: true,
            params: params_map!(),
        })
    );
}

#[test]
fn matcher_should_return_none_when_location_doesnt_match() {
    let matcher = Matcher::new("/foo/bar").unwrap();
    assert_eq!(matcher.test("/foo/baz"), None);
}

#[test]
fn matcher_should_build_params_collection() {
    let matcher = Matcher::new("/foo/:id").unwrap();
    let matched = matcher.test("/foo/abc-123");
    assert_eq!(
        matched,
        Some(PathMatch {
            path: "/foo/:id".into(),
            url: "/foo/abc-123".into(),
            is_exact: true,
            params: params_map!("id" => "abc-123"),
        })
    );
}

#[test]
fn matcher_should_decode_param_values() {
    let matcher = Matcher::new("/users/:name").unwrap();
    let matched = matcher.test("/users/jane%20doe").unwrap();
    assert_eq!(matched.params.get_str("name"), Some("jane doe"));
    // the url reports the raw consumed prefix
    assert_eq!(matched.url, "/users/jane%20doe");
}

#[test]
fn prefix_match_reports_consumed_url_and_inexactness() {
    let matcher = Matcher::new("/users/:id").unwrap();
    let matched = matcher.test("/users/42/edit").unwrap();
    assert_eq!(matched.params, params_map!("id" => "42"));
    assert_eq!(matched.url, "/users/42");
    assert!(!matched.is_exact);
}

#[test]
fn exact_match_reports_full_url() {
    let matcher = Matcher::new("/users/:id").unwrap();
    let matched = matcher.test("/users/42").unwrap();
    assert_eq!(matched.params, params_map!("id" => "42"));
    assert_eq!(matched.url, "/users/42");
    assert!(matched.is_exact);
}

#[test]
fn exact_option_turns_partial_matches_into_no_match() {
    let matcher = Matcher::new("/users/:id").unwrap();
    assert_eq!(matcher.test_with("/users/42/edit", &exact()), None);
}

#[test]
fn exact_results_are_stable_under_the_exact_option() {
    // if a default match is exact, requesting exactness yields the same thing
    for (pattern, location) in [
        ("/users/:id", "/users/42"),
        ("/files/*", "/files/a/b/c"),
        ("/", "/"),
        ("/docs/:page?", "/docs"),
    ] {
        let matcher = Matcher::new(pattern).unwrap();
        let relaxed = matcher.test(location).unwrap();
        assert!(relaxed.is_exact, "{pattern} vs {location}");
        let strict_exact = matcher.test_with(location, &exact()).unwrap();
        assert_eq!(relaxed, strict_exact);
    }
}

#[test]
fn compiling_twice_yields_identical_matchers() {
    let first = Matcher::new("/users/:id/posts/:post?").unwrap();
    let second = Matcher::new("/users/:id/posts/:post?").unwrap();
    assert_eq!(first, second);
    for location in ["/users/1/posts/2", "/users/1/posts", "/users/1", "/"] {
        assert_eq!(first.test(location), second.test(location));
    }
}

#[test]
fn splat_should_capture_the_remainder_positionally() {
    let matcher = Matcher::new("/files/*").unwrap();
    let matched = matcher.test("/files/a/b/c").unwrap();
    assert_eq!(matched.params, params_map!("0" => "a/b/c"));
    assert_eq!(matched.url, "/files/a/b/c");
    assert!(matched.is_exact);
}

#[test]
fn splat_should_capture_empty_remainder() {
    let matcher = Matcher::new("/files/*").unwrap();
    let matched = matcher.test("/files").unwrap();
    assert_eq!(matched.params, params_map!("0" => ""));

    let matched = matcher.test("/files/").unwrap();
    assert_eq!(matched.params, params_map!("0" => ""));
}

#[test]
fn splat_capture_includes_inner_trailing_slashes() {
    let matcher = Matcher::new("/foo/bar/*").unwrap();
    let matched = matcher.test("/foo/bar/////").unwrap();
    assert_eq!(matched.params, params_map!("0" => "////"));
}

#[test]
fn splat_does_not_match_a_different_prefix() {
    let matcher = Matcher::new("/files/*").unwrap();
    assert_eq!(matcher.test("/file/a"), None);
}

#[test]
fn static_pattern_does_not_match_past_its_end() {
    let matcher = Matcher::new("/foo/bar").unwrap();
    let matched = matcher.test("/foo/bar/baz").unwrap();
    assert_eq!(matched.url, "/foo/bar");
    assert!(!matched.is_exact);
}

#[test]
fn optional_param_may_be_absent() {
    let matcher = Matcher::new("/docs/:page?").unwrap();

    let present = matcher.test("/docs/intro").unwrap();
    assert_eq!(present.params, params_map!("page" => "intro"));
    assert!(present.is_exact);

    let absent = matcher.test("/docs").unwrap();
    assert!(absent.params.is_empty());
    assert!(absent.is_exact);
}

#[test]
fn empty_pattern_matches_everything_inexactly() {
    let matcher = Matcher::new("").unwrap();
    let matched = matcher.test("/anything/at/all").unwrap();
    assert_eq!(matched.url, "");
    assert!(!matched.is_exact);

    let root = Matcher::new("/").unwrap();
    let matched = root.test("/anything/at/all").unwrap();
    assert_eq!(matched.url, "/");
    assert!(!matched.is_exact);
    assert!(root.test("/").unwrap().is_exact);
}

#[test]
fn relative_patterns_resolve_against_a_base() {
    let matcher = Matcher::with_base("/settings", "profile/:tab").unwrap();
    assert_eq!(matcher.path(), "/settings/profile/:tab");
    let matched = matcher.test("/settings/profile/privacy").unwrap();
    assert_eq!(matched.params, params_map!("tab" => "privacy"));

    // absolute patterns ignore the base
    let absolute = Matcher::with_base("/settings", "/about").unwrap();
    assert_eq!(absolute.path(), "/about");
}
