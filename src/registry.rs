//! The IANA Language Subtag Registry, parsed once into lookup indices.
//!
//! The registry file uses the "record-jar" format: records separated by a
//! `%%` line, each record made of `Key: Value` lines. Lines that carry no key
//! (folded continuations) are collected as comments of the current record.

use std::collections::{ BTreeSet, HashMap };
use std::fmt;
use std::io::BufRead;
use std::iter;
use std::mem;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{ Deserialize, Serialize };
use tracing::{ debug, warn };

use crate::error::{ Error, Result };

const RECORD_SEPARATOR: &str = "%%";

static FIELD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9-]*): (.*)$").unwrap());

static NO_KINDS: BTreeSet<Kind> = BTreeSet::new();
static NO_CODES: BTreeSet<String> = BTreeSet::new();

// ---------- Kinds & scopes ----------

/// The registry `Type` of an entry.
///
/// The first five are subtag kinds; `Grandfathered` and `Redundant` classify
/// whole tags registered verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Language,
    Extlang,
    Script,
    Region,
    Variant,
    Grandfathered,
    Redundant,
}

impl Kind {
    /// The kinds a single subtag can have.
    pub const SUBTAGS: [Kind; 5] = [
        Kind::Language,
        Kind::Extlang,
        Kind::Script,
        Kind::Region,
        Kind::Variant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Language => "language",
            Kind::Extlang => "extlang",
            Kind::Script => "script",
            Kind::Region => "region",
            Kind::Variant => "variant",
            Kind::Grandfathered => "grandfathered",
            Kind::Redundant => "redundant",
        }
    }

    /// Whether this kind classifies a single subtag rather than a whole tag.
    pub fn is_subtag(self) -> bool {
        !matches!(self, Kind::Grandfathered | Kind::Redundant)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "language" => Kind::Language,
            "extlang" => Kind::Extlang,
            "script" => Kind::Script,
            "region" => Kind::Region,
            "variant" => Kind::Variant,
            "grandfathered" => Kind::Grandfathered,
            "redundant" => Kind::Redundant,
            _ => {
                return Err(Error::UnknownKind(s.to_string()));
            }
        };
        Ok(kind)
    }
}

/// The registry `Scope` of a language or extlang subtag.
///
/// Entries without a `Scope` field are individual languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    Individual,
    Collection,
    Macrolanguage,
    Special,
    PrivateUse,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Individual => "individual",
            Scope::Collection => "collection",
            Scope::Macrolanguage => "macrolanguage",
            Scope::Special => "special",
            Scope::PrivateUse => "private-use",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "individual" => Ok(Scope::Individual),
            "collection" => Ok(Scope::Collection),
            "macrolanguage" => Ok(Scope::Macrolanguage),
            "special" => Ok(Scope::Special),
            "private-use" => Ok(Scope::PrivateUse),
            _ => Err(Error::InvalidArgument(format!("unknown scope '{s}'"))),
        }
    }
}

// ---------- Records ----------

/// A registered subtag entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtagRecord {
    /// Always the kind this record is indexed under.
    pub kind: Kind,
    pub descriptions: Vec<String>,
    pub added: Option<String>,
    pub deprecated: Option<String>,
    pub preferred_value: Option<String>,
    pub suppress_script: Option<String>,
    pub macrolanguage: Option<String>,
    pub scope: Option<Scope>,
    pub comments: Vec<String>,
}

/// A whole tag registered verbatim, either grandfathered or redundant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub kind: Kind,
    pub descriptions: Vec<String>,
    pub added: Option<String>,
    pub deprecated: Option<String>,
    pub preferred_value: Option<String>,
    pub comments: Vec<String>,
}

/// Fields of the record currently being read.
#[derive(Debug, Default)]
struct RawRecord {
    fields: HashMap<String, String>,
    descriptions: Vec<String>,
    comments: Vec<String>,
}

impl RawRecord {
    fn push_line(&mut self, line: &str) {
        let Some(caps) = FIELD_RE.captures(line) else {
            let comment = line.trim();
            if !comment.is_empty() {
                self.comments.push(comment.to_string());
            }
            return;
        };

        let (key, value) = (&caps[1], &caps[2]);
        match key {
            "Description" => self.descriptions.push(value.to_string()),
            "Comments" => self.comments.push(value.to_string()),
            // Case is a formatting convention only
            "Tag" | "Subtag" | "Type" => {
                self.fields.insert(key.to_string(), value.to_lowercase());
            }
            _ => {
                self.fields.insert(key.to_string(), value.to_string());
            }
        }
    }

    fn take(&mut self, key: &str) -> Option<String> {
        self.fields.remove(key)
    }
}

// ---------- Registry ----------

/// Immutable lookup indices over the registry.
///
/// Built once by [`Registry::parse`] or [`Registry::from_reader`]; every
/// query afterwards is a read-only lookup. Codes are matched
/// case-insensitively.
#[derive(Debug, Default)]
pub struct Registry {
    subtags: HashMap<(String, Kind), SubtagRecord>,
    tags: HashMap<String, TagRecord>,
    kinds: HashMap<String, BTreeSet<Kind>>,
    scopes: HashMap<Scope, BTreeSet<String>>,
    macrolanguages: HashMap<String, Vec<(String, Kind)>>,
    file_date: String,
}

impl Registry {
    /// Parses registry text held in memory.
    pub fn parse(text: &str) -> Self {
        let mut builder = RegistryBuilder::default();
        // The last record is not always followed by a separator
        for line in text.lines().chain(iter::once(RECORD_SEPARATOR)) {
            builder.push_line(line);
        }
        builder.finish()
    }

    /// Parses registry text from a reader, line by line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = RegistryBuilder::default();
        for line in reader.lines() {
            builder.push_line(&line?);
        }
        builder.push_line(RECORD_SEPARATOR);
        Ok(builder.finish())
    }

    /// The record registered for `code` under `kind`, if any.
    pub fn subtag_record(&self, code: &str, kind: Kind) -> Option<&SubtagRecord> {
        self.subtags.get(&(code.to_lowercase(), kind))
    }

    /// The grandfathered or redundant record for a whole tag, if any.
    pub fn tag_record(&self, code: &str) -> Option<&TagRecord> {
        self.tags.get(&code.to_lowercase())
    }

    /// Every kind `code` is registered under; empty when unregistered.
    pub fn kinds_of(&self, code: &str) -> &BTreeSet<Kind> {
        self.kinds.get(&code.to_lowercase()).unwrap_or(&NO_KINDS)
    }

    /// Language and extlang codes registered with `scope`.
    pub fn scope_members(&self, scope: Scope) -> &BTreeSet<String> {
        self.scopes.get(&scope).unwrap_or(&NO_CODES)
    }

    /// The `(code, kind)` pairs naming `code` as their macrolanguage, in
    /// registry order.
    pub fn macrolanguage_members(&self, code: &str) -> &[(String, Kind)] {
        self.macrolanguages
            .get(&code.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The registry's `File-Date`, `YYYY-MM-DD`. Empty if the source had none.
    pub fn file_date(&self) -> &str {
        &self.file_date
    }

    pub fn subtag_count(&self) -> usize {
        self.subtags.len()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Every grandfathered and redundant record with its lowercase tag, in
    /// no particular order.
    pub fn tag_records(&self) -> impl Iterator<Item = (&str, &TagRecord)> {
        self.tags.iter().map(|(code, record)| (code.as_str(), record))
    }

    pub fn is_kind(&self, code: &str, kind: Kind) -> bool {
        self.kinds_of(code).contains(&kind)
    }

    pub fn is_language(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Language)
    }

    pub fn is_extlang(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Extlang)
    }

    pub fn is_script(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Script)
    }

    pub fn is_region(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Region)
    }

    pub fn is_variant(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Variant)
    }

    pub fn is_grandfathered(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Grandfathered)
    }

    pub fn is_redundant(&self, code: &str) -> bool {
        self.is_kind(code, Kind::Redundant)
    }

    pub fn in_scope(&self, code: &str, scope: Scope) -> bool {
        self.scope_members(scope).contains(&code.to_lowercase())
    }

    pub fn is_collection(&self, code: &str) -> bool {
        self.in_scope(code, Scope::Collection)
    }

    pub fn is_macrolanguage(&self, code: &str) -> bool {
        self.in_scope(code, Scope::Macrolanguage)
    }

    pub fn is_special(&self, code: &str) -> bool {
        self.in_scope(code, Scope::Special)
    }

    pub fn is_private_use(&self, code: &str) -> bool {
        self.in_scope(code, Scope::PrivateUse)
    }

    // Index a completed record. Only called while building.
    fn insert(&mut self, mut record: RawRecord) {
        if let Some(date) = record.take("File-Date") {
            self.file_date = date;
            return;
        }

        let Some(kind) = record.take("Type") else {
            return;
        };
        let kind = match kind.parse::<Kind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!(%kind, "Skipping registry record with unknown type");
                return;
            }
        };

        if let Some(code) = record.take("Subtag") {
            self.insert_subtag(code, kind, record);
        } else if let Some(code) = record.take("Tag") {
            self.insert_tag(code, kind, record);
        }
    }

    fn insert_subtag(&mut self, code: String, kind: Kind, mut record: RawRecord) {
        let scope = record.take("Scope").and_then(|scope| match scope.parse::<Scope>() {
            Ok(scope) => Some(scope),
            Err(_) => {
                warn!(%code, %scope, "Ignoring unknown scope in registry record");
                None
            }
        });
        if let Some(scope) = scope {
            if matches!(kind, Kind::Language | Kind::Extlang) {
                self.scopes.entry(scope).or_default().insert(code.clone());
            }
        }

        let macrolanguage = record.take("Macrolanguage").map(|m| m.to_lowercase());
        if let Some(macrolanguage) = &macrolanguage {
            let members = self.macrolanguages.entry(macrolanguage.clone()).or_default();
            let member = (code.clone(), kind);
            if !members.contains(&member) {
                members.push(member);
            }
        }

        self.kinds.entry(code.clone()).or_default().insert(kind);
        self.subtags.insert((code, kind), SubtagRecord {
            kind,
            added: record.take("Added"),
            deprecated: record.take("Deprecated"),
            preferred_value: record.take("Preferred-Value"),
            suppress_script: record.take("Suppress-Script"),
            macrolanguage,
            scope,
            descriptions: record.descriptions,
            comments: record.comments,
        });
    }

    fn insert_tag(&mut self, code: String, kind: Kind, mut record: RawRecord) {
        let added = record.take("Added");
        if added.is_none() {
            warn!(%code, %kind, "Registry tag record has no Added date");
        }

        self.kinds.entry(code.clone()).or_default().insert(kind);
        self.tags.insert(code, TagRecord {
            kind,
            added,
            deprecated: record.take("Deprecated"),
            preferred_value: record.take("Preferred-Value"),
            descriptions: record.descriptions,
            comments: record.comments,
        });
    }
}

#[derive(Debug, Default)]
struct RegistryBuilder {
    registry: Registry,
    record: RawRecord,
}

impl RegistryBuilder {
    fn push_line(&mut self, line: &str) {
        if line == RECORD_SEPARATOR {
            let record = mem::take(&mut self.record);
            self.registry.insert(record);
        } else {
            self.record.push_line(line);
        }
    }

    fn finish(self) -> Registry {
        debug!(
            file_date = %self.registry.file_date,
            subtags = self.registry.subtags.len(),
            tags = self.registry.tags.len(),
            "Loaded language subtag registry"
        );
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
File-Date: 2024-03-07
%%
Type: language
Subtag: zh
Description: Chinese
Added: 2005-10-16
Scope: macrolanguage
%%
Type: language
Subtag: cmn
Description: Mandarin Chinese
Added: 2009-07-29
Macrolanguage: zh
%%
Type: extlang
Subtag: cmn
Description: Mandarin Chinese
Added: 2009-07-29
Preferred-Value: cmn
Prefix: zh
Macrolanguage: zh
%%
Type: language
Subtag: mt
Description: Maltese
Added: 2005-10-16
Suppress-Script: Latn
%%
Type: region
Subtag: MT
Description: Malta
Added: 2005-10-16
Comments: first line
  a folded line: with a colon
%%
Type: grandfathered
Tag: en-GB-oed
Description: English
Description: Oxford English Dictionary spelling
Added: 2003-07-09
Deprecated: 2015-04-17
Preferred-Value: en-GB-oxendict
%%
Type: script
Subtag: Latn
Description: Latin
Added: 2005-10-16";

    #[test]
    fn test_file_date() {
        let registry = Registry::parse(SAMPLE);
        assert_eq!(registry.file_date(), "2024-03-07");
    }

    #[test]
    fn test_last_record_without_separator_is_kept() {
        let registry = Registry::parse(SAMPLE);
        let latn = registry.subtag_record("Latn", Kind::Script).expect("Latn should be indexed");
        assert_eq!(latn.descriptions, vec!["Latin".to_string()]);
    }

    #[test]
    fn test_trailing_separator_adds_nothing() {
        let with_separator = format!("{SAMPLE}\n%%\n");
        let registry = Registry::parse(&with_separator);
        assert_eq!(registry.subtag_count(), Registry::parse(SAMPLE).subtag_count());
    }

    #[test]
    fn test_codes_are_case_folded() {
        let registry = Registry::parse(SAMPLE);
        assert!(registry.subtag_record("mt", Kind::Region).is_some());
        assert!(registry.subtag_record("MT", Kind::Region).is_some());
        assert!(registry.tag_record("EN-gb-OED").is_some());
        assert!(registry.is_script("LATN"));
    }

    #[test]
    fn test_code_with_several_kinds() {
        let registry = Registry::parse(SAMPLE);
        let kinds: Vec<Kind> = registry.kinds_of("mt").iter().copied().collect();
        assert_eq!(kinds, vec![Kind::Language, Kind::Region]);
        assert!(registry.kinds_of("xx").is_empty());
    }

    #[test]
    fn test_tag_records() {
        let registry = Registry::parse(SAMPLE);
        let tags: Vec<(&str, Kind)> = registry.tag_records().map(|(code, r)| (code, r.kind)).collect();
        assert_eq!(tags, vec![("en-gb-oed", Kind::Grandfathered)]);
        assert_eq!(Registry::default().tag_records().count(), 0);
    }

    #[test]
    fn test_multi_valued_fields() {
        let registry = Registry::parse(SAMPLE);
        let oed = registry.tag_record("en-gb-oed").unwrap();
        assert_eq!(oed.kind, Kind::Grandfathered);
        assert_eq!(oed.descriptions.len(), 2);
        assert_eq!(oed.deprecated.as_deref(), Some("2015-04-17"));
        assert_eq!(oed.preferred_value.as_deref(), Some("en-GB-oxendict"));
    }

    #[test]
    fn test_continuation_lines_become_comments() {
        let registry = Registry::parse(SAMPLE);
        let malta = registry.subtag_record("mt", Kind::Region).unwrap();
        assert_eq!(malta.comments, vec![
            "first line".to_string(),
            "a folded line: with a colon".to_string(),
        ]);
    }

    #[test]
    fn test_scope_and_macrolanguage_indices() {
        let registry = Registry::parse(SAMPLE);
        assert!(registry.is_macrolanguage("zh"));
        assert!(!registry.is_macrolanguage("cmn"));
        assert_eq!(registry.macrolanguage_members("ZH"), &[
            ("cmn".to_string(), Kind::Language),
            ("cmn".to_string(), Kind::Extlang),
        ]);
        assert!(registry.macrolanguage_members("mt").is_empty());
        assert!(registry.scope_members(Scope::Special).is_empty());
    }

    #[test]
    fn test_record_kind_matches_index() {
        let registry = Registry::parse(SAMPLE);
        for kind in Kind::SUBTAGS {
            if let Some(record) = registry.subtag_record("cmn", kind) {
                assert_eq!(record.kind, kind);
            }
        }
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let registry = Registry::parse("Type: dialect\nSubtag: xx\nDescription: Nothing\n%%\n");
        assert_eq!(registry.subtag_count(), 0);
        assert!(registry.kinds_of("xx").is_empty());
    }

    #[test]
    fn test_from_reader_matches_parse() {
        let registry = Registry::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(registry.subtag_count(), 6);
        assert_eq!(registry.tag_count(), 1);
        assert_eq!(registry.file_date(), "2024-03-07");
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in Kind::SUBTAGS {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
        assert_eq!("Redundant".parse::<Kind>().unwrap(), Kind::Redundant);
        assert!(matches!("dialect".parse::<Kind>(), Err(Error::UnknownKind(_))));
        assert_eq!("private-use".parse::<Scope>().unwrap(), Scope::PrivateUse);
    }
}
