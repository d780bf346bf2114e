use thiserror::Error;

/// One token of a compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternSegment {
    /// A literal path segment that must match exactly.
    Static(String),
    /// `:name` — captures one non-empty path segment.
    Param(String),
    /// `:name?` — like `Param`, but the segment may be absent.
    OptionalParam(String),
    /// `*` — greedily captures the remainder of the pathname. Splats are
    /// positional: the capture is exposed under the key `"0"`, `"1"`, … in
    /// capture order.
    Splat(usize),
    /// `text*` — a literal prefix followed by a greedy capture of the
    /// remainder, exposed under a positional key like `Splat`.
    PartialSplat {
        prefix: String,
        index: usize,
    },
}

/// A structurally invalid route pattern. Raised at compile time only; a
/// pathname that simply fails to match is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `:` segment with an empty or non-`[A-Za-z0-9_]` parameter name.
    #[error("invalid parameter name in pattern segment `{0}`")]
    InvalidParamName(String),
    /// The same parameter name declared twice in one pattern.
    #[error("duplicate parameter name `{0}`")]
    DuplicateParam(String),
    /// A `*` that is not a whole segment or the tail of one.
    #[error("invalid wildcard in pattern segment `{0}`")]
    InvalidWildcard(String),
    /// Pattern content after a wildcard, which could never match.
    #[error("pattern `{0}` continues after a wildcard")]
    SegmentAfterWildcard(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPattern {
    pub segments: Vec<PatternSegment>,
    pub leading_slash: bool,
    pub trailing_slash: bool,
    pub param_names: Vec<String>,
}

/// Tokenizes a route-pattern string. A single leading and trailing `/` are
/// recorded as flags rather than segments; everything between is split on `/`
/// and classified chunk by chunk. Empty interior chunks (doubled slashes)
/// become empty static segments, which match only a literal empty segment.
pub(crate) fn parse_pattern(
    pattern: &str,
) -> Result<ParsedPattern, PatternError> {
    let (body, leading_slash) = match pattern.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    let (body, trailing_slash) = match body.strip_suffix('/') {
        Some(rest) => (rest, true),
        None => (body, false),
    };

    let mut segments = Vec::new();
    let mut param_names: Vec<String> = Vec::new();
    let mut splats = 0;

    // "".split('/') still yields one empty chunk, so skip the empty body
    let chunks = (!body.is_empty())
        .then(|| body.split('/'))
        .into_iter()
        .flatten();
    for chunk in chunks {
        if matches!(
            segments.last(),
            Some(
                PatternSegment::Splat(_) | PatternSegment::PartialSplat { .. }
            )
        ) {
            return Err(PatternError::SegmentAfterWildcard(
                pattern.to_string(),
            ));
        }

        let segment = if let Some(name) = chunk.strip_prefix(':') {
            let (name, optional) = match name.strip_suffix('?') {
                Some(name) => (name, true),
                None => (name, false),
            };
            if name.is_empty()
                || !name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(PatternError::InvalidParamName(
                    chunk.to_string(),
                ));
            }
            if param_names.iter().any(|existing| existing == name) {
                return Err(PatternError::DuplicateParam(name.to_string()));
            }
            param_names.push(name.to_string());
            if optional {
                PatternSegment::OptionalParam(name.to_string())
            } else {
                PatternSegment::Param(name.to_string())
            }
        } else if chunk == "*" {
            let name = splats.to_string();
            if param_names.contains(&name) {
                return Err(PatternError::DuplicateParam(name));
            }
            param_names.push(name);
            splats += 1;
            PatternSegment::Splat(splats - 1)
        } else if let Some(prefix) = chunk.strip_suffix('*') {
            if prefix.contains('*') {
                return Err(PatternError::InvalidWildcard(chunk.to_string()));
            }
            let name = splats.to_string();
            if param_names.contains(&name) {
                return Err(PatternError::DuplicateParam(name));
            }
            param_names.push(name);
            splats += 1;
            PatternSegment::PartialSplat {
                prefix: prefix.to_string(),
                index: splats - 1,
            }
        } else if chunk.contains('*') {
            return Err(PatternError::InvalidWildcard(chunk.to_string()));
        } else {
            PatternSegment::Static(chunk.to_string())
        };
        segments.push(segment);
    }

    Ok(ParsedPattern {
        segments,
        leading_slash,
        trailing_slash,
        param_names,
    })
}

/// Expands a segment list containing optional params into the candidate
/// lists to try in order: for each optional, one variant where it captures
/// and one where it is absent, capturing variants first.
pub(crate) fn expand_optionals(
    segments: &[PatternSegment],
) -> Vec<Vec<PatternSegment>> {
    let mut queue = vec![segments.to_vec()];
    let mut expanded = Vec::new();
    while let Some(next) = queue.pop() {
        let optional = next.iter().enumerate().find_map(|(idx, segment)| {
            match segment {
                PatternSegment::OptionalParam(name) => {
                    Some((idx, name.clone()))
                }
                _ => None,
            }
        });
        match optional {
            Some((idx, name)) => {
                let mut absent = next.clone();
                absent.remove(idx);
                let mut present = next;
                present[idx] = PatternSegment::Param(name);
                queue.push(absent);
                queue.push(present);
            }
            None => expanded.push(next),
        }
    }
    expanded
}
