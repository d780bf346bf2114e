use std::borrow::Cow;

/// Resolves a (possibly relative) target path against a router base and the
/// matched path of the current route.
///
/// Returns `None` when the target carries a scheme or authority and should
/// be left to the host environment untouched.
pub fn resolve_path<'a>(
    base: &'a str,
    path: &'a str,
    from: Option<&'a str>,
) -> Option<Cow<'a, str>> {
    if has_scheme(path) {
        return None;
    }

    let base_path = normalize(base, false);
    let from_path = from.map(|from| normalize(from, false));
    let result = match from_path {
        Some(from_path) => {
            if path.starts_with('/') {
                base_path
            } else if from_path.to_lowercase().find(&base_path.to_lowercase())
                != Some(0)
            {
                base_path + from_path
            } else {
                from_path
            }
        }
        None => base_path,
    };

    let result_empty = result.is_empty();
    let prefix = if result_empty { "/".into() } else { result };

    Some(prefix + normalize(path, result_empty))
}

/// Joins a child pattern onto an accumulated base pattern with a single
/// slash, dropping any trailing splat from the base first: the splat stands
/// for the part of the pathname the child pattern describes.
pub fn join_paths<'a>(from: &'a str, to: &'a str) -> String {
    let from = strip_splat(&normalize(from, false));
    from + &normalize(to, false)
}

fn has_scheme(path: &str) -> bool {
    path.starts_with("//")
        || path.starts_with("tel:")
        || path.starts_with("mailto:")
        || path
            .split_once("://")
            .map(|(prefix, _)| {
                prefix.chars().all(|c: char| c.is_ascii_alphanumeric())
            })
            .unwrap_or(false)
}

fn normalize(path: &str, omit_slash: bool) -> Cow<'_, str> {
    let s = path.trim_start_matches('/').trim_end_matches('/');
    let begins_with_query_or_hash =
        matches!(s.chars().next(), Some('#') | Some('?'));
    if s.is_empty() || omit_slash || begins_with_query_or_hash {
        s.into()
    } else {
        format!("/{s}").into()
    }
}

fn strip_splat(text: &str) -> String {
    text.split_once('*')
        .map(|(prefix, _)| prefix.trim_end_matches('/'))
        .unwrap_or(text)
        .to_string()
}
