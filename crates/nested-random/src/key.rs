//! Address components and textual paths.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// One step from a parent node to a child.
///
/// Keys only need to be unique among the children of a single parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Positional child, as used for repeated elements.
    Index(u64),
    /// Named child, as used for record fields.
    Name(String),
}

impl Key {
    /// Returns the index if this is a positional key.
    pub fn as_index(&self) -> Option<u64> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(_) => None,
        }
    }

    /// Returns the label if this is a named key.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Key {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<u32> for Key {
    fn from(index: u32) -> Self {
        Self::Index(u64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// Error type for key path parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyPathError {
    /// Two separators with nothing between them
    #[error("Empty segment at position {position} in key path")]
    EmptySegment { position: usize },

    /// All-digit segment that does not fit in a u64
    #[error("Index segment '{segment}' does not fit in 64 bits")]
    IndexOverflow { segment: String },

    /// Quoted segment that is unterminated, badly escaped or not followed
    /// by a separator
    #[error("Malformed quoted segment at position {position} in key path")]
    BadQuote { position: usize },
}

/// A `/`-separated address relative to some node, e.g. `users/17/email`.
///
/// Segments made only of ASCII digits are parsed as [`Key::Index`], anything
/// else as [`Key::Name`]. The empty string and `/` both denote the node itself.
///
/// A name that would otherwise read back as something else (empty, all digits,
/// containing `/`, or starting with `"`) is written in double quotes, with `"`
/// and `\` escaped by a backslash. `users/"17"/email` therefore addresses the
/// child named `17`, not index 17. Displayed paths always parse back to the
/// same keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    /// Create a path from a list of keys.
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// The keys of this path, root side first.
    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return a new path with `key` appended.
    pub fn join(&self, key: impl Into<Key>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Self(keys)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Key> for KeyPath {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix('/').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let mut keys = Vec::new();
        let mut rest = trimmed;
        loop {
            let position = keys.len();
            let (key, tail) = match rest.strip_prefix('"') {
                Some(quoted) => {
                    let (name, tail) = parse_quoted(position, quoted)?;
                    (Key::Name(name), tail)
                }
                None => {
                    let end = rest.find('/').unwrap_or(rest.len());
                    (parse_segment(position, &rest[..end])?, &rest[end..])
                }
            };
            keys.push(key);

            match tail.strip_prefix('/') {
                Some(next) => rest = next,
                None if tail.is_empty() => return Ok(Self(keys)),
                None => return Err(KeyPathError::BadQuote { position }),
            }
        }
    }
}

fn parse_segment(position: usize, segment: &str) -> Result<Key, KeyPathError> {
    if segment.is_empty() {
        return Err(KeyPathError::EmptySegment { position });
    }
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        return segment
            .parse::<u64>()
            .map(Key::Index)
            .map_err(|_| KeyPathError::IndexOverflow {
                segment: segment.to_string(),
            });
    }
    Ok(Key::Name(segment.to_string()))
}

/// Read a quoted name whose opening quote is already consumed. Returns the
/// name and the input after the closing quote.
fn parse_quoted(position: usize, s: &str) -> Result<(String, &str), KeyPathError> {
    let mut name = String::new();
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((name, &s[i + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => name.push(escaped),
                _ => return Err(KeyPathError::BadQuote { position }),
            },
            c => name.push(c),
        }
    }
    Err(KeyPathError::BadQuote { position })
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty()
        || name.bytes().all(|b| b.is_ascii_digit())
        || name.contains('/')
        || name.starts_with('"')
}

fn write_segment(f: &mut fmt::Formatter<'_>, key: &Key) -> fmt::Result {
    match key {
        Key::Name(name) if needs_quotes(name) => {
            f.write_char('"')?;
            for c in name.chars() {
                if c == '"' || c == '\\' {
                    f.write_char('\\')?;
                }
                f.write_char(c)?;
            }
            f.write_char('"')
        }
        key => write!(f, "{key}"),
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write_segment(f, key)?;
        }
        Ok(())
    }
}
