use crate::location::unescape;
use std::{borrow::Cow, str::FromStr, sync::Arc};
use thiserror::Error;

/// An insertion-ordered map of parameter names to values.
///
/// Used both for parameters captured from a pathname and for query-string
/// pairs. Keys are not required to be unique: inserting an existing key adds
/// another value for it, and [`get`](Self::get) returns the most recently
/// added one. Iteration order is insertion order, which for route params is
/// their declaration order in the pattern.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ParamsMap(Vec<(Cow<'static, str>, String)>);

impl ParamsMap {
    /// Creates an empty map.
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the given capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Appends a value to the map, percent-decoding it first.
    ///
    /// An existing value for the same key is kept; to drop it, see
    /// [`replace`](Self::replace).
    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: String) {
        self.0.push((key.into(), unescape(&value)));
    }

    /// Inserts a value, removing any values previously stored for the key.
    pub fn replace(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        value: String,
    ) {
        let key = key.into();
        self.0.retain(|(k, _)| k != &key);
        self.0.push((key, unescape(&value)));
    }

    /// Gets the most-recently-added value for this key, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_str(key).map(ToOwned::to_owned)
    }

    /// Gets a reference to the most-recently-added value for this key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find_map(|(k, v)| (k == key).then_some(v.as_str()))
    }

    /// Gets every value stored for this key, oldest first.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|(k, v)| (k == key).then_some(v.as_str()))
            .collect()
    }

    /// Removes every value for the key, returning them oldest first.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        let mut removed = Vec::new();
        self.0.retain_mut(|(k, v)| {
            if k == key {
                removed.push(std::mem::take(v));
                false
            } else {
                true
            }
        });
        removed
    }

    /// The number of key-value pairs stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Renders the map as a query string, with a leading `?` if non-empty.
    pub fn to_query_string(&self) -> String {
        let mut buf = String::new();
        for (k, v) in &self.0 {
            buf.push(if buf.is_empty() { '?' } else { '&' });
            buf.push_str(&crate::location::Url::escape(k));
            buf.push('=');
            buf.push_str(&crate::location::Url::escape(v));
        }
        buf
    }
}

impl<K, V> FromIterator<(K, V)> for ParamsMap
where
    K: Into<Cow<'static, str>>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value.into());
        }
        map
    }
}

impl IntoIterator for ParamsMap {
    type Item = (Cow<'static, str>, String);
    type IntoIter = std::vec::IntoIter<(Cow<'static, str>, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Builds a [`ParamsMap`] from `key => value` pairs.
#[macro_export]
macro_rules! params_map {
    ($($key:expr => $val:expr),* $(,)?) => ({
        #[allow(unused_mut)]
        let mut map = $crate::ParamsMap::new();
        $( map.insert($key, ::std::string::ToString::to_string(&$val)); )*
        map
    });
}

/// A simple method of deserializing key-value data (like route params or the
/// query string) into a concrete data type. `Self` should typically be a
/// struct in which each field's type implements [`FromStr`].
pub trait Params
where
    Self: Sized,
{
    /// Attempts to deserialize the map into the given type.
    fn from_map(map: &ParamsMap) -> Result<Self, ParamsError>;
}

impl Params for () {
    #[inline(always)]
    fn from_map(_map: &ParamsMap) -> Result<Self, ParamsError> {
        Ok(())
    }
}

/// Converts a single captured value into a typed field.
pub trait IntoParam
where
    Self: Sized,
{
    fn into_param(value: Option<&str>, name: &str)
        -> Result<Self, ParamsError>;
}

impl<T> IntoParam for Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    fn into_param(
        value: Option<&str>,
        _name: &str,
    ) -> Result<Self, ParamsError> {
        match value {
            None => Ok(None),
            Some(value) => match T::from_str(value) {
                Ok(value) => Ok(Some(value)),
                Err(e) => Err(ParamsError::Params(Arc::new(e))),
            },
        }
    }
}

/// Errors that can occur while parsing params using [`Params`].
#[derive(Error, Debug, Clone)]
pub enum ParamsError {
    /// A field was missing from the route params.
    #[error("could not find parameter {0}")]
    MissingParam(String),
    /// Something went wrong while deserializing a field.
    #[error("failed to deserialize parameters")]
    Params(Arc<dyn std::error::Error + Send + Sync>),
}

impl PartialEq for ParamsError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingParam(l0), Self::MissingParam(r0)) => l0 == r0,
            _ => false,
        }
    }
}
