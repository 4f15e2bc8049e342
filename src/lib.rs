#![doc = include_str!("../README.md")]

//! # intl-langtag
//!
//! BCP 47 (RFC 5646) language tags checked against the IANA Language Subtag
//! Registry:
//!
//! - **Decomposition**: `en-mt-arab` reads as language `en`, region `MT`,
//!   script `Arab`, using the position and length of each code
//! - **Classification**: ordinary tags, grandfathered tags and redundant tags
//! - **Deprecations**: preferred replacements for deprecated tags and subtags
//! - **Formatting**: canonical casing (`zh-cmn-Hant`, `sr-Latn-RS`)
//! - **Validation**: `ERR_*` codes explaining why a tag is not valid
//!
//! ## Quick Start
//!
//! ```rust
//! use intl_langtag::{ Classification, Kind, ValidationError };
//!
//! let tag = intl_langtag::tag("EN-mt-ARAB");
//! let parts: Vec<String> = tag.subtags().iter().map(|s| s.format()).collect();
//! assert_eq!(parts, ["en", "MT", "Arab"]);
//! assert_eq!(tag.region().map(|s| s.kind()), Some(Kind::Region));
//!
//! assert_eq!(intl_langtag::tag_type("en-GB-oed"), Classification::Grandfathered);
//! assert_eq!(intl_langtag::errors("mo"), [ValidationError::Deprecated]);
//! assert_eq!(intl_langtag::format("sr-latn-rs"), "sr-Latn-RS");
//! ```
//!
//! ## Registry loading
//!
//! The registry text is bundled at build time from
//! `data/language-subtag-registry`, or from the file named by the
//! `LANGUAGE_SUBTAG_REGISTRY` environment variable. At runtime the same
//! variable switches to reading that file instead; call [`init`] with a
//! [`RegistryConfig`] to choose explicitly. The registry is parsed once and
//! never changes afterwards.
//!
//! The free functions below query the process-wide registry. A [`Registry`]
//! built with [`Registry::parse`] offers the same queries as methods.

mod config;
mod error;
mod lookup;
mod registry;
mod subtag;
mod tag;
mod validate;

use std::collections::BTreeSet;

pub use config::{ init, load_registry, registry, RegistryConfig, DEFAULT_REGISTRY_PATH, REGISTRY_PATH_ENV };
pub use error::{ Error, Result };
pub use registry::{ Kind, Registry, Scope, SubtagRecord, TagRecord };
pub use subtag::SubTag;
pub use tag::{ Classification, Tag };
pub use validate::ValidationError;

// ---------- Tags ----------

/// Builds a tag; never fails.
pub fn tag(tag: &str) -> Tag<'static> {
    registry().tag(tag)
}

/// Whether `tag` passes every validation check.
///
/// ```rust
/// assert!(intl_langtag::is_valid("en-GB"));
/// assert!(!intl_langtag::is_valid("jj-GB"));
/// ```
pub fn is_valid(tag: &str) -> bool {
    registry().tag(tag).is_valid()
}

/// The validation errors of `tag`, empty when it is valid.
pub fn errors(tag: &str) -> Vec<ValidationError> {
    registry().tag(tag).errors()
}

/// `grandfathered`, `redundant`, or an ordinary `tag`.
pub fn tag_type(tag: &str) -> Classification {
    registry().tag(tag).tag_type()
}

/// Canonical casing of `tag`.
///
/// ```rust
/// assert_eq!(intl_langtag::format("AZ-arab"), "az-Arab");
/// assert_eq!(intl_langtag::format("en-gb-x-foo-gb"), "en-GB-x-foo-gb");
/// ```
pub fn format(tag: &str) -> String {
    registry().tag(tag).format()
}

/// The replacement for a deprecated grandfathered or redundant tag.
///
/// ```rust
/// let preferred = intl_langtag::preferred("zh-cmn-Hant").unwrap();
/// assert_eq!(preferred.format(), "cmn-Hant");
/// assert!(intl_langtag::preferred("zh-Hans").is_none());
/// ```
pub fn preferred(tag: &str) -> Option<Tag<'static>> {
    registry().tag(tag).preferred()
}

// ---------- Subtags ----------

/// The registered subtag `code` of `kind`, or [`Error::NotFound`].
pub fn subtag(code: &str, kind: Kind) -> Result<SubTag<'static>> {
    registry().subtag(code, kind)
}

/// The registered subtag `code` of `kind`, if any.
pub fn find_subtag(code: &str, kind: Kind) -> Option<SubTag<'static>> {
    registry().find_subtag(code, kind)
}

/// One subtag per kind `code` is registered under.
pub fn subtags(code: &str) -> Vec<SubTag<'static>> {
    registry().subtags(code)
}

/// Subtags for every code, unregistered codes left out.
pub fn subtags_of<I, S>(codes: I) -> Vec<SubTag<'static>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    registry().subtags_of(codes)
}

/// The codes that are not registered at all.
///
/// ```rust
/// assert_eq!(intl_langtag::unregistered(["en", "jj", "Latn"]), ["jj"]);
/// ```
pub fn unregistered<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    registry().unregistered(codes)
}

/// Subtag kinds of `code`, without grandfathered/redundant.
pub fn types(code: &str) -> BTreeSet<Kind> {
    registry().types(code, false)
}

/// Every kind of `code`, grandfathered/redundant included.
pub fn types_with_tags(code: &str) -> BTreeSet<Kind> {
    registry().types(code, true)
}

/// The registered language subtag `code`, if any.
pub fn language(code: &str) -> Option<SubTag<'static>> {
    registry().language(code)
}

/// The registered region subtag `code`, if any.
pub fn region(code: &str) -> Option<SubTag<'static>> {
    registry().region(code)
}

/// The registered script subtag `code`, if any.
pub fn script(code: &str) -> Option<SubTag<'static>> {
    registry().script(code)
}

/// Members of the macrolanguage `code`.
///
/// ```rust
/// assert!(!intl_langtag::languages("zh").unwrap().is_empty());
/// assert!(intl_langtag::languages("en").is_err());
/// ```
pub fn languages(code: &str) -> Result<Vec<SubTag<'static>>> {
    registry().languages(code)
}

/// The registry's `File-Date`.
pub fn file_date() -> &'static str {
    registry().file_date()
}

// ---------- Predicates ----------

/// Whether `code` is a registered language subtag.
pub fn is_language(code: &str) -> bool {
    registry().is_language(code)
}

/// Whether `code` is a registered extlang subtag.
pub fn is_extlang(code: &str) -> bool {
    registry().is_extlang(code)
}

/// Whether `code` is a registered script subtag.
pub fn is_script(code: &str) -> bool {
    registry().is_script(code)
}

/// Whether `code` is a registered region subtag.
pub fn is_region(code: &str) -> bool {
    registry().is_region(code)
}

/// Whether `code` is a registered variant subtag.
pub fn is_variant(code: &str) -> bool {
    registry().is_variant(code)
}

/// Whether the whole tag `code` is registered as grandfathered.
pub fn is_grandfathered(code: &str) -> bool {
    registry().is_grandfathered(code)
}

/// Whether the whole tag `code` is registered as redundant.
pub fn is_redundant(code: &str) -> bool {
    registry().is_redundant(code)
}

/// Whether `code` is a language or extlang with scope `collection`.
pub fn is_collection(code: &str) -> bool {
    registry().is_collection(code)
}

/// Whether `code` is a language or extlang with scope `macrolanguage`.
pub fn is_macrolanguage(code: &str) -> bool {
    registry().is_macrolanguage(code)
}

/// Whether `code` is a language or extlang with scope `special`, e.g. `und`.
pub fn is_special(code: &str) -> bool {
    registry().is_special(code)
}

/// Whether `code` is a language or extlang with scope `private-use`.
pub fn is_private_use(code: &str) -> bool {
    registry().is_private_use(code)
}
