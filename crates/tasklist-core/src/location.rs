//! Page location model: a path plus a form-encoded query string, and a
//! history that accepts non-navigating pushes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Query parameter mirroring the search box.
pub const SEARCH_PARAM: &str = "search";

/// Ordered query parameters with `URLSearchParams`-style set/delete semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a query string, with or without the leading `?`. Never fails:
    /// malformed escapes decode lossily.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the first `key` entry in place and drop any duplicates, or append.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut replaced = false;
        self.pairs.retain_mut(|(k, v)| {
            if k.as_str() != key {
                return true;
            }
            if replaced {
                return false;
            }
            *v = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Remove every entry under `key`.
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(&self.pairs);
        f.write_str(&serializer.finish())
    }
}

/// A page URL split into the part before `?`, the query, and an optional fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    pub query: QueryParams,
    pub fragment: Option<String>,
}

impl Location {
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (url, None),
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            query: QueryParams::parse(query),
            fragment,
        }
    }

    /// Same path and fragment with a different query.
    pub fn with_query(&self, query: QueryParams) -> Self {
        Self {
            path: self.path.clone(),
            query,
            fragment: self.fragment.clone(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::parse("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Session history of the page hosting the task list.
pub trait History {
    /// Location currently shown.
    fn location(&self) -> &Location;

    /// Record a new current location without navigating or reloading.
    fn push(&mut self, location: Location);
}

/// In-process history stack. Always holds at least the initial location.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<Location>,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self::new(Location::parse(url))
    }

    /// Every location ever shown, oldest first.
    pub fn entries(&self) -> &[Location] {
        &self.entries
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl History for MemoryHistory {
    fn location(&self) -> &Location {
        // `entries` is seeded in every constructor and only ever grows.
        &self.entries[self.entries.len() - 1]
    }

    fn push(&mut self, location: Location) {
        debug!(url = %location, "history push");
        self.entries.push(location);
    }
}
