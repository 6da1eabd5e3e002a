//! Language resource directories (`values-<qualifier>`).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

lazy_static! {
    // `fr`, `pt-rBR`, `es-r419`
    static ref LEGACY_QUALIFIER: Regex =
        Regex::new(r"^([a-zA-Z]{2,3})(?:-r([a-zA-Z]{2}|[0-9]{3}))?$").unwrap();
    // `b+sr+Latn`, `b+es+419`
    static ref BCP47_QUALIFIER: Regex = Regex::new(r"^b\+([a-zA-Z0-9]+(?:\+[a-zA-Z0-9]+)*)$").unwrap();
}

/// A `values-*` directory holding one language's resource file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageDir {
    /// Directory name, e.g. `values-pt-rBR`.
    pub name: String,
    /// Everything after `values-`, e.g. `pt-rBR`.
    pub qualifier: String,
}

impl LanguageDir {
    /// Returns `None` unless `name` is `<base_dir>-<non-empty suffix>`.
    pub fn parse(base_dir: &str, name: &str) -> Option<Self> {
        let qualifier = name.strip_prefix(base_dir)?.strip_prefix('-')?;
        if qualifier.is_empty() {
            return None;
        }
        Some(LanguageDir {
            name: name.to_string(),
            qualifier: qualifier.to_string(),
        })
    }

    /// The language the qualifier names, if it is a locale qualifier.
    pub fn language(&self) -> Option<LanguageIdentifier> {
        qualifier_to_language(&self.qualifier)
    }

    /// Whether this directory is one of `filter`. An empty filter matches everything.
    pub fn matches(&self, filter: &[LanguageIdentifier]) -> bool {
        if filter.is_empty() {
            return true;
        }
        match self.language() {
            Some(lang) => filter.iter().any(|wanted| *wanted == lang),
            None => false,
        }
    }
}

/// Maps an Android resource qualifier to a BCP 47 identifier.
pub fn qualifier_to_language(qualifier: &str) -> Option<LanguageIdentifier> {
    let tag = if let Some(caps) = LEGACY_QUALIFIER.captures(qualifier) {
        match caps.get(2) {
            Some(region) => format!("{}-{}", &caps[1], region.as_str()),
            None => caps[1].to_string(),
        }
    } else if let Some(caps) = BCP47_QUALIFIER.captures(qualifier) {
        caps[1].replace('+', "-")
    } else {
        return None;
    };
    tag.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(s: &str) -> LanguageIdentifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_requires_suffix() {
        assert!(LanguageDir::parse("values", "values").is_none());
        assert!(LanguageDir::parse("values", "values-").is_none());
        assert!(LanguageDir::parse("values", "valuesfr").is_none());
        assert!(LanguageDir::parse("values", "drawable-fr").is_none());
        let fr = LanguageDir::parse("values", "values-fr").unwrap();
        assert_eq!(fr.qualifier, "fr");
        assert_eq!(fr.name, "values-fr");
    }

    #[test]
    fn test_legacy_region_qualifier() {
        assert_eq!(qualifier_to_language("pt-rBR"), Some(lang("pt-BR")));
        assert_eq!(qualifier_to_language("es-r419"), Some(lang("es-419")));
        assert_eq!(qualifier_to_language("ar"), Some(lang("ar")));
    }

    #[test]
    fn test_bcp47_qualifier() {
        assert_eq!(qualifier_to_language("b+sr+Latn"), Some(lang("sr-Latn")));
    }

    #[test]
    fn test_non_locale_qualifier() {
        assert_eq!(qualifier_to_language("v21"), None);
        assert_eq!(qualifier_to_language("fr-v21"), None);
    }

    #[test]
    fn test_matches_filter() {
        let dir = LanguageDir::parse("values", "values-pt-rBR").unwrap();
        assert!(dir.matches(&[]));
        assert!(dir.matches(&[lang("pt-BR")]));
        assert!(!dir.matches(&[lang("pt")]));
        assert!(!dir.matches(&[lang("fr")]));
    }
}
