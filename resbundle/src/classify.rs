//! Decides which nodes of a module file are handed to translators.

use serde::Serialize;

use crate::types::{Entry, EntryKind, Node, TOOLS_NAMESPACE};

/// Why an entry was left out of the combined catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `translatable="false"`
    NotTranslatable,
    /// A tag other than `string`, `string-array` or `plurals`.
    UnrecognizedTag,
    /// `tools:ignore` with the tooling namespace declared.
    ToolsIgnore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Comment,
    Includable(EntryKind),
    Skipped(SkipReason),
}

impl Classification {
    pub fn is_includable(&self) -> bool {
        matches!(self, Classification::Includable(_))
    }
}

/// Classifies one child of `<resources>`.
///
/// `tools_prefix` is the prefix the document binds to the Android tooling namespace, if any
/// (see [`crate::ResourceTree::tools_prefix`]). A declaration made on the entry itself is
/// honoured as well.
pub fn classify(node: &Node, tools_prefix: Option<&str>) -> Classification {
    match node {
        Node::Comment(_) => Classification::Comment,
        Node::Entry(entry) => classify_entry(entry, tools_prefix),
    }
}

pub fn classify_entry(entry: &Entry, tools_prefix: Option<&str>) -> Classification {
    if entry.attribute("translatable") == Some("false") {
        return Classification::Skipped(SkipReason::NotTranslatable);
    }

    let Some(kind) = entry.kind() else {
        return Classification::Skipped(SkipReason::UnrecognizedTag);
    };

    let local_prefix = entry
        .namespaces()
        .find(|ns| ns.uri == TOOLS_NAMESPACE)
        .and_then(|ns| ns.prefix);
    let prefix = local_prefix.as_deref().or(tools_prefix);
    if let Some(prefix) = prefix {
        let ignored = entry
            .attribute(&format!("{}:ignore", prefix))
            .is_some_and(|value| !value.is_empty());
        if ignored {
            return Classification::Skipped(SkipReason::ToolsIgnore);
        }
    }

    Classification::Includable(kind)
}
