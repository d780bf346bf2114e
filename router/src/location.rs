use crate::params::ParamsMap;
use percent_encoding::{
    percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC,
};

// Base origin used so that path-only strings parse as absolute URLs.
pub(crate) const BASE: &str = "https://waymark.invalid";

/// A parsed URL, holding the local parts a router cares about.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Url {
    origin: String,
    path: String,
    search: String,
    search_params: ParamsMap,
    hash: String,
}

impl Url {
    /// Parses a path (`/users/42?tab=posts#bio`) or a full URL.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Self::parse_with_base(input, BASE)
    }

    /// Parses `input` relative to the given base origin.
    pub fn parse_with_base(
        input: &str,
        base: &str,
    ) -> Result<Self, url::ParseError> {
        let base = url::Url::parse(base)?;
        let url = url::Url::options().base_url(Some(&base)).parse(input)?;

        let search_params = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<ParamsMap>();

        Ok(Url {
            origin: url.origin().unicode_serialization(),
            path: url.path().to_string(),
            search: url.query().unwrap_or_default().to_string(),
            search_params,
            hash: url.fragment().unwrap_or_default().to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut String {
        &mut self.path
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_params(&self) -> &ParamsMap {
        &self.search_params
    }

    pub fn search_params_mut(&mut self) -> &mut ParamsMap {
        &mut self.search_params
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// The path with query string and hash fragment appended.
    pub fn to_full_path(&self) -> String {
        let mut path = self.path.clone();
        if !self.search.is_empty() {
            path.push('?');
            path.push_str(&self.search);
        }
        if !self.hash.is_empty() {
            path.push('#');
            path.push_str(&self.hash);
        }
        path
    }

    /// Percent-encodes a string for use in a URL component.
    pub fn escape(s: &str) -> String {
        utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
    }
}

impl From<&Url> for Location {
    fn from(url: &Url) -> Self {
        Location {
            pathname: url.path.clone(),
            search: url.search.clone(),
            query: url.search_params.clone(),
            hash: url.hash.clone(),
        }
    }
}

pub(crate) fn unescape(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().to_string()
}

/// A plain snapshot of the current location, as handed to route matching and
/// active-link checks. Externally supplied; the router only reads it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Location {
    /// The path, not containing the query string or hash fragment.
    pub pathname: String,
    /// The raw query string.
    pub search: String,
    /// The query string parsed into its key-value pairs.
    pub query: ParamsMap,
    /// The hash fragment.
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Default::default()
        }
    }
}

/// A description of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationChange {
    /// The new URL.
    pub value: String,
    /// If true, the new location will replace the current one in the history
    /// stack, i.e., going back will not return to the current location.
    pub replace: bool,
    /// If true, the host should scroll to the top of the page at the end of
    /// the navigation.
    pub scroll: bool,
}

impl Default for LocationChange {
    fn default() -> Self {
        Self {
            value: Default::default(),
            replace: true,
            scroll: true,
        }
    }
}
