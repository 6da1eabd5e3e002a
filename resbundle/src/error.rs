//! All error types for the resbundle crate.
//!
//! These are returned from every fallible operation (parsing, discovery, extraction, splitting, writing).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid UTF-8 in resource file: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("malformed key `{key}`: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("key `{key}` targets the reserved aggregation module `{module}`")]
    ReservedModule { key: String, module: String },

    #[error("invalid module name `{0}`: module names must not contain '.'")]
    InvalidModuleName(String),

    #[error("missing directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("invalid module pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a malformed key error with a short reason.
    pub fn malformed_key(key: impl Into<String>, reason: &'static str) -> Self {
        Error::MalformedKey {
            key: key.into(),
            reason,
        }
    }

    /// Attaches the file being processed to an error.
    pub fn in_file(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid resource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_malformed_key_error() {
        let error = Error::malformed_key("app_name", "no module separator");
        assert_eq!(
            error.to_string(),
            "malformed key `app_name`: no module separator"
        );
    }

    #[test]
    fn test_reserved_module_error() {
        let error = Error::ReservedModule {
            key: "i18n.title".to_string(),
            module: "i18n".to_string(),
        };
        assert!(error.to_string().contains("reserved aggregation module `i18n`"));
    }

    #[test]
    fn test_invalid_module_name_error() {
        let error = Error::InvalidModuleName("com.example".to_string());
        assert!(error.to_string().contains("com.example"));
    }

    #[test]
    fn test_missing_directory_error() {
        let error = Error::MissingDirectory(PathBuf::from("i18n/src/main/res"));
        assert_eq!(error.to_string(), "missing directory: i18n/src/main/res");
    }

    #[test]
    fn test_error_in_file() {
        let error = Error::in_file(
            "core/src/main/res/values/strings.xml",
            Error::invalid_resource("document has no root element"),
        );
        assert_eq!(
            error.to_string(),
            "core/src/main/res/values/strings.xml: invalid resource: document has no root element"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_resource_error() {
        let error = Error::invalid_resource("document has no root element");
        assert_eq!(
            error.to_string(),
            "invalid resource: document has no root element"
        );
    }
}
