//! Convenience queries composing the registry indices with `Tag`/`SubTag`.

use std::collections::BTreeSet;

use crate::error::{ Error, Result };
use crate::registry::{ Kind, Registry };
use crate::subtag::SubTag;
use crate::tag::Tag;

impl Registry {
    pub fn tag(&self, tag: &str) -> Tag<'_> {
        Tag::new(self, tag)
    }

    /// The registered subtag, or [`Error::NotFound`].
    pub fn subtag(&self, code: &str, kind: Kind) -> Result<SubTag<'_>> {
        SubTag::get(self, code, kind)
    }

    pub fn find_subtag(&self, code: &str, kind: Kind) -> Option<SubTag<'_>> {
        SubTag::find(self, code, kind)
    }

    /// One subtag per kind `code` is registered under, e.g. both the `mt`
    /// language and the `MT` region.
    pub fn subtags(&self, code: &str) -> Vec<SubTag<'_>> {
        self.kinds_of(code)
            .iter()
            .filter(|kind| kind.is_subtag())
            .map(|&kind| SubTag::new(self, code, kind))
            .collect()
    }

    /// [`Registry::subtags`] for each code, flattened. Unregistered codes
    /// contribute nothing.
    pub fn subtags_of<I, S>(&self, codes: I) -> Vec<SubTag<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .flat_map(|code| self.subtags(code.as_ref()))
            .collect()
    }

    /// The codes not registered under any kind, as given.
    pub fn unregistered<I, S>(&self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .filter(|code| self.kinds_of(code.as_ref()).is_empty())
            .map(|code| code.as_ref().to_string())
            .collect()
    }

    /// The kinds of `code`. Grandfathered and redundant are only reported
    /// when `include_tags` is set.
    pub fn types(&self, code: &str, include_tags: bool) -> BTreeSet<Kind> {
        self.kinds_of(code)
            .iter()
            .copied()
            .filter(|kind| include_tags || kind.is_subtag())
            .collect()
    }

    pub fn language(&self, code: &str) -> Option<SubTag<'_>> {
        SubTag::find(self, code, Kind::Language)
    }

    pub fn region(&self, code: &str) -> Option<SubTag<'_>> {
        SubTag::find(self, code, Kind::Region)
    }

    pub fn script(&self, code: &str) -> Option<SubTag<'_>> {
        SubTag::find(self, code, Kind::Script)
    }

    /// Members of a macrolanguage, in registry order.
    ///
    /// Fails with [`Error::InvalidArgument`] when `code` is not a registered
    /// macrolanguage, so an empty result always means "no members".
    pub fn languages(&self, code: &str) -> Result<Vec<SubTag<'_>>> {
        if !self.is_macrolanguage(code) {
            return Err(Error::InvalidArgument(format!("'{code}' is not a macrolanguage")));
        }

        Ok(self.macrolanguage_members(code)
            .iter()
            .map(|(member, kind)| SubTag::new(self, member, *kind))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_subtags_of_single_code() {
        let subtags = registry().subtags("MT");
        let kinds: Vec<Kind> = subtags.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![Kind::Language, Kind::Region]);
        assert!(registry().subtags("jj").is_empty());
    }

    #[test]
    fn test_subtags_of_skips_unregistered_and_tags() {
        let subtags = registry().subtags_of(["en", "jj", "az-Arab", "Latn"]);
        let formatted: Vec<String> = subtags.iter().map(|s| s.format()).collect();
        assert_eq!(formatted, vec!["en", "Latn"]);
    }

    #[test]
    fn test_unregistered() {
        let codes = vec!["en".to_string(), "JJ".to_string(), "ZZ".to_string(), "en-GB-oed".to_string()];
        assert_eq!(registry().unregistered(&codes), vec!["JJ".to_string()]);
    }

    #[test]
    fn test_types() {
        let registry = registry();
        assert_eq!(registry.types("mt", false), BTreeSet::from([Kind::Language, Kind::Region]));
        assert!(registry.types("az-Arab", false).is_empty());
        assert_eq!(registry.types("az-Arab", true), BTreeSet::from([Kind::Redundant]));
        assert!(registry.types("zzzzzzzzz", true).is_empty());
    }

    #[test]
    fn test_shortcuts() {
        let registry = registry();
        assert_eq!(registry.language("EN").map(|s| s.format()), Some("en".to_string()));
        assert_eq!(registry.region("gb").map(|s| s.format()), Some("GB".to_string()));
        assert_eq!(registry.script("latn").map(|s| s.format()), Some("Latn".to_string()));
        assert_eq!(registry.region("en"), None);
    }

    #[test]
    fn test_macrolanguage_expansion() {
        let registry = registry();
        let members = registry.languages("zh").unwrap();
        assert!(!members.is_empty());
        assert!(members.contains(&SubTag::new(registry, "cmn", Kind::Language)));
        assert!(members.iter().all(|m| m.is_registered()));

        let serbo_croatian: Vec<String> = registry
            .languages("sh")
            .unwrap()
            .iter()
            .map(|s| s.code().to_string())
            .collect();
        for member in ["bs", "cnr", "hr", "sr"] {
            assert!(serbo_croatian.iter().any(|code| code == member), "sh should include {member}");
        }
    }

    #[test]
    fn test_expansion_of_non_macrolanguage_fails() {
        assert!(matches!(registry().languages("en"), Err(Error::InvalidArgument(_))));
        assert!(matches!(registry().languages("jj"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_strict_subtag() {
        assert!(registry().subtag("en", Kind::Language).is_ok());
        assert!(matches!(registry().subtag("en", Kind::Region), Err(Error::NotFound { .. })));
    }
}
