//! Validated text primitives shared by the catalog crates.
//!
//! Reference records are loaded from YAML, so every identifier and display name goes through one
//! of these wrappers at deserialisation time. A record that reaches the query engine therefore
//! never carries a blank name or a malformed identifier.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    #[error("text is blank")]
    Empty,

    #[error("invalid slug '{0}': expected lowercase ASCII letters, digits and single hyphens")]
    InvalidSlug(String),
}

/// Display text with surrounding whitespace removed; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyText> for String {
    fn from(text: NonEmptyText) -> Self {
        text.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stable, lowercase-hyphenated identifier such as `viral-pneumonia` or `covid-19`.
///
/// Slugs are used as record identities and as URL path segments, so the accepted alphabet is
/// narrow: `a-z`, `0-9` and `-`, never leading, trailing or doubled hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    const MAX_LEN: usize = 64;

    /// Parses a slug, rejecting anything outside the canonical form.
    ///
    /// Unlike [`NonEmptyText::new`] the input is not trimmed or lowercased: a caller supplying
    /// `" Covid-19"` has a bug worth surfacing.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for an empty input and `TextError::InvalidSlug` otherwise.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(TextError::Empty);
        }

        let well_formed = input.len() <= Self::MAX_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-'))
            && !input.starts_with('-')
            && !input.ends_with('-')
            && !input.contains("--");

        if !well_formed {
            return Err(TextError::InvalidSlug(input.to_owned()));
        }
        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
