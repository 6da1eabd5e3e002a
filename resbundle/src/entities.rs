//! Internal entities declared in a document's DOCTYPE.
//!
//! Entry markup is kept raw and written files carry no DOCTYPE, so references to declared entities
//! are replaced by their text while parsing. References the document never declares are rejected.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::error::Error;

const PREDEFINED: [&str; 5] = ["lt", "gt", "amp", "quot", "apos"];
const MAX_DEPTH: usize = 16;

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(
        r#"<!ENTITY\s+(%\s*)?([A-Za-z_:][\w.:-]*)\s+(?:"([^"]*)"|'([^']*)'|(\S+))"#
    )
    .unwrap();
    // CDATA sections and comments are matched only to be passed over
    static ref REFERENCE: Regex =
        Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>|<!--.*?-->|&([A-Za-z_:][\w.:-]*);").unwrap();
}

/// General entities of one document, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Entities {
    values: HashMap<String, String>,
}

impl Entities {
    /// Collects the `<!ENTITY name "value">` declarations of a DOCTYPE.
    ///
    /// Parameter and external entities cannot be expanded and are an error.
    pub fn from_doctype(doctype: &str) -> Result<Self, Error> {
        let mut values = HashMap::new();
        for caps in DECLARATION.captures_iter(doctype) {
            let name = &caps[2];
            if caps.get(1).is_some() {
                return Err(Error::invalid_resource(format!(
                    "parameter entity `{}` is not supported",
                    name
                )));
            }
            let value = caps.get(3).or_else(|| caps.get(4)).ok_or_else(|| {
                Error::invalid_resource(format!("external entity `{}` is not supported", name))
            })?;
            // the first declaration binds
            values
                .entry(name.to_string())
                .or_insert_with(|| value.as_str().to_string());
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Replaces every reference to a declared entity in `markup` with the entity's text.
    ///
    /// Predefined entities and character references stay as written, as does anything inside CDATA
    /// sections and comments.
    pub fn expand(&self, markup: &str) -> Result<String, Error> {
        self.expand_at(markup, 0)
    }

    fn expand_at(&self, markup: &str, depth: usize) -> Result<String, Error> {
        if !markup.contains('&') {
            return Ok(markup.to_string());
        }

        let mut out = String::with_capacity(markup.len());
        let mut last = 0;
        for caps in REFERENCE.captures_iter(markup) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str();
            if PREDEFINED.contains(&name) {
                continue;
            }
            let value = self.values.get(name).ok_or_else(|| {
                Error::invalid_resource(format!("undefined entity `&{};`", name))
            })?;
            if depth >= MAX_DEPTH {
                return Err(Error::invalid_resource(format!(
                    "entity `{}` expands recursively",
                    name
                )));
            }
            out.push_str(&markup[last..whole.start()]);
            out.push_str(&self.expand_at(value, depth + 1)?);
            last = whole.end();
        }
        out.push_str(&markup[last..]);
        Ok(out)
    }
}
