//! # Session Headers
//!
//! Metadata persisted next to the workspace.
//!
//! - `Header` is free-form and user editable. Saving writes its `filename`
//!   and `savedate` entries.
//! - `CommonHeader` is fixed when the session is created and records the
//!   format and library versions. Only loading a file replaces it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::persistence::FORMAT_VERSION;

/// Header key holding the path of the last save or load
pub const FILENAME_KEY: &str = "filename";

/// Header key holding the time of the last save
pub const SAVEDATE_KEY: &str = "savedate";

/// Common header key for the library version that wrote the file
pub const LIBRARY_VERSION_KEY: &str = "geomspace version";

/// Common header key for the persisted format version
pub const FORMAT_VERSION_KEY: &str = "format version";

/// A header entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum HeaderValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Path(PathBuf),
    Timestamp(DateTime<Utc>),
}

impl HeaderValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            HeaderValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// A `Path`, or a `Text` read as one
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            HeaderValue::Path(p) => Some(p),
            HeaderValue::Text(s) => Some(Path::new(s)),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            HeaderValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Text(s) => f.write_str(s),
            HeaderValue::Integer(i) => write!(f, "{}", i),
            HeaderValue::Real(r) => write!(f, "{:?}", r),
            HeaderValue::Bool(b) => write!(f, "{}", b),
            HeaderValue::Path(p) => write!(f, "{}", p.display()),
            HeaderValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Integer(value)
    }
}

impl From<f64> for HeaderValue {
    fn from(value: f64) -> Self {
        HeaderValue::Real(value)
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Bool(value)
    }
}

impl From<PathBuf> for HeaderValue {
    fn from(value: PathBuf) -> Self {
        HeaderValue::Path(value)
    }
}

impl From<&Path> for HeaderValue {
    fn from(value: &Path) -> Self {
        HeaderValue::Path(value.to_path_buf())
    }
}

impl From<DateTime<Utc>> for HeaderValue {
    fn from(value: DateTime<Utc>) -> Self {
        HeaderValue::Timestamp(value)
    }
}

/// Free-form key/value metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    entries: BTreeMap<String, HeaderValue>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.get(key)
    }

    /// Insert or overwrite one entry, returning the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<HeaderValue>,
    ) -> Option<HeaderValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        self.entries.remove(key)
    }

    /// Merge entries, overwriting existing keys
    pub fn merge<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<HeaderValue>,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stored `filename`, if it reads as a path
    pub fn filename(&self) -> Option<&Path> {
        self.get(FILENAME_KEY).and_then(HeaderValue::as_path)
    }

    /// Stored `savedate`, if it is a timestamp
    pub fn savedate(&self) -> Option<DateTime<Utc>> {
        self.get(SAVEDATE_KEY).and_then(HeaderValue::as_timestamp)
    }

    pub(crate) fn stamp_save(&mut self, path: &Path, at: DateTime<Utc>) {
        self.insert(FILENAME_KEY, path);
        self.insert(SAVEDATE_KEY, at);
    }
}

impl<K, V> FromIterator<(K, V)> for Header
where
    K: Into<String>,
    V: Into<HeaderValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut header = Header::new();
        header.merge(iter);
        header
    }
}

/// Version metadata fixed at session creation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommonHeader {
    entries: Header,
}

impl CommonHeader {
    /// Common header describing this build
    pub fn current() -> Self {
        let mut entries = Header::new();
        entries.insert(LIBRARY_VERSION_KEY, env!("CARGO_PKG_VERSION"));
        entries.insert(FORMAT_VERSION_KEY, i64::from(FORMAT_VERSION));
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Library version that produced this header
    pub fn library_version(&self) -> Option<&str> {
        self.get(LIBRARY_VERSION_KEY).and_then(HeaderValue::as_text)
    }

    /// Format version recorded in this header
    pub fn format_version(&self) -> Option<i64> {
        self.get(FORMAT_VERSION_KEY).and_then(HeaderValue::as_integer)
    }
}

impl Default for CommonHeader {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_insert_and_merge() {
        let mut header = Header::new();
        assert!(header.is_empty());
        header.insert("prop_1", "a");
        header.merge([("prop_1", "b"), ("prop_2", "c")]);
        assert_eq!(header.len(), 2);
        assert_eq!(header.get("prop_1"), Some(&HeaderValue::from("b")));
    }

    #[test]
    fn test_filename_reads_text_or_path() {
        let mut header = Header::new();
        assert!(header.filename().is_none());
        header.insert(FILENAME_KEY, "a/b.gsw");
        assert_eq!(header.filename(), Some(Path::new("a/b.gsw")));
        header.insert(FILENAME_KEY, PathBuf::from("c.gsw"));
        assert_eq!(header.filename(), Some(Path::new("c.gsw")));
        header.insert(FILENAME_KEY, 3_i64);
        assert!(header.filename().is_none());
    }

    #[test]
    fn test_stamp_save() {
        let mut header = Header::new();
        let now = Utc::now();
        header.stamp_save(Path::new("x.gsw"), now);
        assert_eq!(header.filename(), Some(Path::new("x.gsw")));
        assert_eq!(header.savedate(), Some(now));
    }

    #[test]
    fn test_common_header_versions() {
        let common = CommonHeader::current();
        assert_eq!(common.library_version(), Some(env!("CARGO_PKG_VERSION")));
        assert_eq!(common.format_version(), Some(i64::from(FORMAT_VERSION)));
        assert_eq!(common.len(), 2);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(HeaderValue::from(2.0).to_string(), "2.0");
        assert_eq!(HeaderValue::from(true).to_string(), "true");
        assert_eq!(HeaderValue::from("text").to_string(), "text");
    }

    #[test]
    fn test_collect_header() {
        let header: Header = vec![("author", "someone"), ("project", "bracket")]
            .into_iter()
            .collect();
        assert_eq!(header.len(), 2);
    }
}
