use std::fmt;
use std::hash::{ Hash, Hasher };

use serde::{ Serialize, Serializer };

use crate::error::{ Error, Result };
use crate::registry::{ Kind, Registry, Scope, SubtagRecord };

/// One classified code, e.g. the `GB` region in `en-GB`.
///
/// A `SubTag` built with [`SubTag::new`] may carry no registry record: an
/// unknown subtag is still a value. Use [`SubTag::find`] or [`SubTag::get`]
/// when only registered subtags are wanted.
///
/// Equality and hashing only consider the code and the kind.
#[derive(Clone)]
pub struct SubTag<'r> {
    registry: &'r Registry,
    code: String,
    kind: Kind,
    record: Option<&'r SubtagRecord>,
}

impl<'r> SubTag<'r> {
    /// Builds a subtag, registered or not.
    pub fn new(registry: &'r Registry, code: &str, kind: Kind) -> Self {
        let code = lowercase(code);
        let record = registry.subtag_record(&code, kind);
        Self { registry, code, kind, record }
    }

    /// The registered subtag for `code` and `kind`, or `None`.
    pub fn find(registry: &'r Registry, code: &str, kind: Kind) -> Option<Self> {
        let subtag = Self::new(registry, code, kind);
        subtag.record.is_some().then_some(subtag)
    }

    /// Like [`SubTag::find`] but fails with [`Error::NotFound`].
    pub fn get(registry: &'r Registry, code: &str, kind: Kind) -> Result<Self> {
        Self::find(registry, code, kind).ok_or_else(|| Error::NotFound {
            code: lowercase(code),
            kind,
        })
    }

    /// The lowercase code.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn record(&self) -> Option<&'r SubtagRecord> {
        self.record
    }

    pub fn is_registered(&self) -> bool {
        self.record.is_some()
    }

    pub fn descriptions(&self) -> &'r [String] {
        self.record.map(|r| r.descriptions.as_slice()).unwrap_or(&[])
    }

    /// `None` for an unregistered subtag, `Individual` when the record has
    /// no explicit scope.
    pub fn scope(&self) -> Option<Scope> {
        self.record.map(|r| r.scope.unwrap_or(Scope::Individual))
    }

    pub fn deprecated(&self) -> Option<&'r str> {
        self.record.and_then(|r| r.deprecated.as_deref())
    }

    pub fn added(&self) -> Option<&'r str> {
        self.record.and_then(|r| r.added.as_deref())
    }

    pub fn comments(&self) -> &'r [String] {
        self.record.map(|r| r.comments.as_slice()).unwrap_or(&[])
    }

    /// The subtag this one should be replaced with.
    ///
    /// Extlang preferred values are always languages; every other kind keeps
    /// its own kind.
    pub fn preferred(&self) -> Option<SubTag<'r>> {
        let value = self.record?.preferred_value.as_deref()?;
        let kind = match self.kind {
            Kind::Extlang => Kind::Language,
            kind => kind,
        };
        Some(SubTag::new(self.registry, value, kind))
    }

    /// The script implied by this language, which tags may omit.
    pub fn suppressed_script(&self) -> Option<SubTag<'r>> {
        let script = self.record?.suppress_script.as_deref()?;
        Some(SubTag::new(self.registry, script, Kind::Script))
    }

    /// The macrolanguage this language or extlang belongs to.
    pub fn macrolanguage(&self) -> Option<SubTag<'r>> {
        let macrolanguage = self.record?.macrolanguage.as_deref()?;
        Some(SubTag::new(self.registry, macrolanguage, Kind::Language))
    }

    /// Canonical casing: `MN` for regions, `Cyrl` for scripts, lowercase
    /// otherwise.
    pub fn format(&self) -> String {
        match self.kind {
            Kind::Region => uppercase(&self.code),
            Kind::Script => titlecase(&self.code),
            _ => self.code.clone(),
        }
    }
}

impl PartialEq for SubTag<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.code == other.code
    }
}

impl Eq for SubTag<'_> {}

impl Hash for SubTag<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Debug for SubTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubTag")
            .field("code", &self.code)
            .field("kind", &self.kind)
            .field("registered", &self.record.is_some())
            .finish()
    }
}

impl fmt::Display for SubTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Serialize for SubTag<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------- Casing ----------
//
// Case mappings that expand a character (`ß` to `SS`) would change a code's
// length and with it the kind inferred from that length, so such characters
// are kept as they are.

fn map_char<I: Iterator<Item = char>>(c: char, mut mapped: I) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn upper(c: char) -> char {
    map_char(c, c.to_uppercase())
}

fn lower(c: char) -> char {
    map_char(c, c.to_lowercase())
}

pub(crate) fn lowercase(code: &str) -> String {
    code.chars().map(lower).collect()
}

pub(crate) fn uppercase(code: &str) -> String {
    code.chars().map(upper).collect()
}

/// First code point uppercase, the rest lowercase.
pub(crate) fn titlecase(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper(first)).chain(chars.map(lower)).collect(),
        None => String::new(),
    }
}

/// Casing inferred from length alone: two letters read as a region, four as
/// a script.
pub(crate) fn format_by_length(code: &str) -> String {
    match code.chars().count() {
        2 => uppercase(code),
        4 => titlecase(code),
        _ => code.to_string(),
    }
}
