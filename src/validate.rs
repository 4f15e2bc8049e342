//! BCP 47 validity checks over a tag and its decomposition.
//!
//! Only part of RFC 5646 validity is checked here: duplicate subtags,
//! subtag ordering and scripts made redundant by `Suppress-Script` are not.

use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::registry::Kind;
use crate::tag::Tag;

/// Longest code allowed after a singleton.
const MAX_EXTENSION_LEN: usize = 8;

/// One reason a tag is not valid. Serialized as its `ERR_*` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationError {
    /// The tag, or one of its subtags, is deprecated in the registry.
    #[serde(rename = "ERR_DEPRECATED")]
    Deprecated,
    /// The tag does not start with a registered language.
    #[serde(rename = "ERR_NO_LANGUAGE")]
    NoLanguage,
    /// A code before the first singleton is not registered at all.
    #[serde(rename = "ERR_UNKNOWN")]
    Unknown,
    /// A code from the first singleton on is longer than eight characters.
    #[serde(rename = "ERR_TOO_LONG")]
    TooLong,
}

impl ValidationError {
    pub fn code(self) -> &'static str {
        match self {
            ValidationError::Deprecated => "ERR_DEPRECATED",
            ValidationError::NoLanguage => "ERR_NO_LANGUAGE",
            ValidationError::Unknown => "ERR_UNKNOWN",
            ValidationError::TooLong => "ERR_TOO_LONG",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub(crate) fn errors(tag: &Tag<'_>) -> Vec<ValidationError> {
    // A deprecated grandfathered or redundant tag needs no further checks
    if tag.deprecated().is_some() {
        return vec![ValidationError::Deprecated];
    }

    let registry = tag.registry();
    let codes: Vec<&str> = tag.as_str().split('-').collect();
    let mut errors = Vec::new();

    for (position, code) in codes.iter().enumerate() {
        if code.chars().count() < 2 {
            let too_long = codes[position..]
                .iter()
                .filter(|code| code.chars().count() > MAX_EXTENSION_LEN)
                .map(|_| ValidationError::TooLong);
            errors.extend(too_long);
            break;
        }
        if registry.kinds_of(code).is_empty() {
            errors.push(ValidationError::Unknown);
        }
    }

    let subtags = tag.subtags();
    if subtags.first().is_none_or(|subtag| subtag.kind() != Kind::Language) {
        errors.push(ValidationError::NoLanguage);
    }
    if subtags.iter().any(|subtag| subtag.deprecated().is_some()) {
        errors.push(ValidationError::Deprecated);
    }

    errors
}
