//! Composite keys of the combined catalog: `<module>.<local-name>`.

use crate::error::Error;

pub const SEPARATOR: char = '.';

/// Joins a module name and a local key.
pub fn compose(module: &str, local: &str) -> String {
    format!("{}{}{}", module, SEPARATOR, local)
}

/// Splits a composite key at its first separator into `(module, local)`.
///
/// The local part may itself contain dots. A key without a separator, or whose module part
/// could not name a directory, is malformed.
pub fn split(key: &str) -> Result<(&str, &str), Error> {
    let (module, local) = key
        .split_once(SEPARATOR)
        .ok_or_else(|| Error::malformed_key(key, "no module separator"))?;
    if module.is_empty() {
        return Err(Error::malformed_key(key, "empty module name"));
    }
    if module.contains(['/', '\\']) {
        return Err(Error::malformed_key(key, "module name is not a directory name"));
    }
    Ok((module, local))
}

/// Checks that a module directory name survives a compose/split round trip.
pub fn validate_module_name(module: &str) -> Result<(), Error> {
    if module.is_empty() || module.contains(SEPARATOR) {
        return Err(Error::InvalidModuleName(module.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        assert_eq!(compose("core", "app_name"), "core.app_name");
    }

    #[test]
    fn test_split_recovers_parts() {
        assert_eq!(split("core.app_name").unwrap(), ("core", "app_name"));
    }

    #[test]
    fn test_split_keeps_dots_in_local_name() {
        assert_eq!(
            split("settings.pref.title.short").unwrap(),
            ("settings", "pref.title.short")
        );
    }

    #[test]
    fn test_split_without_separator_fails() {
        let err = split("app_name").unwrap_err();
        assert!(matches!(err, Error::MalformedKey { ref key, .. } if key == "app_name"));
    }

    #[test]
    fn test_split_rejects_unusable_module() {
        assert!(split(".app_name").is_err());
        assert!(split("a/b.app_name").is_err());
        assert!(split("a\\b.app_name").is_err());
    }

    #[test]
    fn test_split_allows_empty_local_name() {
        assert_eq!(split("core.").unwrap(), ("core", ""));
    }

    #[test]
    fn test_validate_module_name() {
        assert!(validate_module_name("feature-login").is_ok());
        assert!(validate_module_name("com.example").is_err());
        assert!(validate_module_name("").is_err());
    }
}
