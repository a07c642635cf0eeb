use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator that replaces `.` when a token is embedded in a flat port id.
///
/// Must be a character no identifier can contain, so distinct paths never
/// flatten to the same suffix.
pub const PATH_SEPARATOR_ESCAPE: &str = "-";

/// A dotted reference path such as `input_1` or `llm.response.text`.
///
/// The first segment is the base used for resolution; the rest is an opaque
/// field path that this crate never interprets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceToken(String);

impl ReferenceToken {
    /// Wraps an already-validated path. Use [`crate::reference::parse`] for raw text.
    pub(crate) fn new_unchecked(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first path segment.
    pub fn base(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Segments after the base, in order.
    pub fn field_path(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').skip(1)
    }

    /// Flat form of the token, safe to embed in a port id.
    pub fn port_suffix(&self) -> String {
        self.0.replace('.', PATH_SEPARATOR_ESCAPE)
    }
}

impl fmt::Display for ReferenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReferenceToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ReferenceToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ReferenceToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Insertion-ordered, duplicate-free collection of references found in a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceSet(Vec<ReferenceToken>);

impl ReferenceSet {
    pub(crate) fn from_unique(tokens: Vec<ReferenceToken>) -> Self {
        Self(tokens)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceToken> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ReferenceToken] {
        &self.0
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|t| t.as_str() == path)
    }

    /// The references as plain strings, in first-seen order.
    pub fn paths(&self) -> Vec<&str> {
        self.0.iter().map(ReferenceToken::as_str).collect()
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a ReferenceToken;
    type IntoIter = std::slice::Iter<'a, ReferenceToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ReferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_and_field_path_split_on_dots() {
        let token = ReferenceToken::new_unchecked("llm.response.text");
        assert_eq!(token.base(), "llm");
        assert_eq!(token.field_path().collect::<Vec<_>>(), vec!["response", "text"]);
        assert_eq!(token.port_suffix(), "llm-response-text");
    }

    #[test]
    fn single_segment_token_is_its_own_base() {
        let token = ReferenceToken::new_unchecked("user_name");
        assert_eq!(token.base(), "user_name");
        assert_eq!(token.field_path().count(), 0);
        assert_eq!(token.port_suffix(), "user_name");
    }

    #[test]
    fn dotted_and_underscored_paths_flatten_differently() {
        let dotted = ReferenceToken::new_unchecked("a.b");
        let underscored = ReferenceToken::new_unchecked("a__b");
        assert_ne!(dotted.port_suffix(), underscored.port_suffix());
    }
}
