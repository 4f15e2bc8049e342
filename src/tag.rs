//! Whole language tags and their structural decomposition.
//!
//! A hyphen-joined tag is ambiguous without the registry: `mt` may be the
//! Maltese language or the Malta region. Decomposition resolves each code by
//! its position and length, trying the statistically dominant kind first and
//! keeping the first kind under which the code is registered.

use std::fmt;
use std::hash::{ Hash, Hasher };

use serde::{ Deserialize, Serialize, Serializer };

use crate::registry::{ Kind, Registry, TagRecord };
use crate::subtag::{ format_by_length, lowercase, SubTag };
use crate::validate::{ self, ValidationError };

/// How a whole tag is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Registered verbatim, not decomposable into subtags.
    Grandfathered,
    /// Registered verbatim, but also a valid sequence of subtags.
    Redundant,
    /// An ordinary tag, known only through its subtags.
    Tag,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Grandfathered => "grandfathered",
            Classification::Redundant => "redundant",
            Classification::Tag => "tag",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate kinds for a code, in the order they are tried.
fn candidate_kinds(position: usize, len: usize) -> &'static [Kind] {
    match (position, len) {
        (0, _) => &[Kind::Language],
        // A language out of position still yields a typed value
        (_, 2) => &[Kind::Region, Kind::Language],
        // Numeric regions such as 001 come first
        (_, 3) => &[Kind::Region, Kind::Extlang, Kind::Language],
        // Numeric variants such as 1901 come first
        (_, 4) => &[Kind::Variant, Kind::Script],
        _ => &[Kind::Variant],
    }
}

/// A user-supplied language tag, trimmed and lowercased.
///
/// Constructing a tag never fails. When the whole string is a grandfathered
/// or redundant registry entry the tag carries that record.
///
/// Equality and hashing only consider the normalized string.
#[derive(Clone)]
pub struct Tag<'r> {
    registry: &'r Registry,
    code: String,
    record: Option<&'r TagRecord>,
}

impl<'r> Tag<'r> {
    pub fn new(registry: &'r Registry, tag: &str) -> Self {
        let code = lowercase(tag.trim());
        let record = registry.tag_record(&code);
        Self { registry, code, record }
    }

    /// The normalized (lowercase) tag.
    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn record(&self) -> Option<&'r TagRecord> {
        self.record
    }

    pub(crate) fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn tag_type(&self) -> Classification {
        match self.record.map(|r| r.kind) {
            Some(Kind::Grandfathered) => Classification::Grandfathered,
            Some(Kind::Redundant) => Classification::Redundant,
            _ => Classification::Tag,
        }
    }

    pub fn is_grandfathered(&self) -> bool {
        self.tag_type() == Classification::Grandfathered
    }

    /// The registered subtags of this tag, left to right.
    ///
    /// Grandfathered tags have none. The walk stops at the first singleton
    /// (`x`, `u`, ...), and codes that resolve to no registered kind at their
    /// position are skipped. Computed on every call.
    pub fn subtags(&self) -> Vec<SubTag<'r>> {
        if self.is_grandfathered() {
            return Vec::new();
        }

        let mut subtags = Vec::new();
        for (position, code) in self.code.split('-').enumerate() {
            let len = code.chars().count();
            if len < 2 {
                break;
            }

            let resolved = candidate_kinds(position, len)
                .iter()
                .find_map(|&kind| SubTag::find(self.registry, code, kind));
            subtags.extend(resolved);
        }
        subtags
    }

    /// The first subtag of `kind`.
    pub fn find(&self, kind: Kind) -> Option<SubTag<'r>> {
        self.subtags().into_iter().find(|subtag| subtag.kind() == kind)
    }

    pub fn language(&self) -> Option<SubTag<'r>> {
        self.find(Kind::Language)
    }

    pub fn extlang(&self) -> Option<SubTag<'r>> {
        self.find(Kind::Extlang)
    }

    pub fn script(&self) -> Option<SubTag<'r>> {
        self.find(Kind::Script)
    }

    pub fn region(&self) -> Option<SubTag<'r>> {
        self.find(Kind::Region)
    }

    pub fn variants(&self) -> Vec<SubTag<'r>> {
        self.subtags()
            .into_iter()
            .filter(|subtag| subtag.kind() == Kind::Variant)
            .collect()
    }

    /// The tag a grandfathered or redundant entry should be replaced with.
    pub fn preferred(&self) -> Option<Tag<'r>> {
        let value = self.record?.preferred_value.as_deref()?;
        Some(Tag::new(self.registry, value))
    }

    pub fn added(&self) -> Option<&'r str> {
        self.record.and_then(|r| r.added.as_deref())
    }

    pub fn deprecated(&self) -> Option<&'r str> {
        self.record.and_then(|r| r.deprecated.as_deref())
    }

    pub fn descriptions(&self) -> &'r [String] {
        self.record.map(|r| r.descriptions.as_slice()).unwrap_or(&[])
    }

    /// Canonical casing, e.g. `en-GB`, `az-Arab`.
    ///
    /// Casing is inferred from length, so it applies to unregistered codes
    /// too. Everything after a singleton is left as is.
    pub fn format(&self) -> String {
        let mut formatted = Vec::new();
        let mut verbatim = false;

        for (position, code) in self.code.split('-').enumerate() {
            if position == 0 || verbatim {
                formatted.push(code.to_string());
            } else {
                formatted.push(format_by_length(code));
            }
            if code.chars().count() == 1 {
                verbatim = true;
            }
        }

        formatted.join("-")
    }

    /// Why this tag is not valid BCP 47; empty when it is.
    pub fn errors(&self) -> Vec<ValidationError> {
        validate::errors(self)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }
}

impl PartialEq for Tag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Tag<'_> {}

impl Hash for Tag<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Debug for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("code", &self.code)
            .field("type", &self.tag_type())
            .finish()
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for Tag<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
