//! Core types shared by the extractor and the splitter.
//!
//! A [`ResourceTree`] is the in-memory form of one `strings.xml` file: the namespace
//! declarations of its `<resources>` root and the ordered comment and entry nodes below it.
//! Entry content and attribute values are kept exactly as written so that a tree can be
//! written back without touching the translatable text.

use std::{collections::BTreeSet, fmt::Display, str::FromStr};

use serde::Serialize;

use crate::error::Error;

/// URI of the Android tooling namespace (`xmlns:tools`).
pub const TOOLS_NAMESPACE: &str = "http://schemas.android.com/tools";

/// Tag of the root container element.
pub const ROOT_TAG: &str = "resources";

/// The entry tags that are handed to translators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// `<string>`
    String,
    /// `<string-array>`
    StringArray,
    /// `<plurals>`
    Plurals,
}

impl EntryKind {
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::String => "string",
            EntryKind::StringArray => "string-array",
            EntryKind::Plurals => "plurals",
        }
    }

    /// Maps an element tag to its kind, `None` for anything that is not translated.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(EntryKind::String),
            "string-array" => Some(EntryKind::StringArray),
            "plurals" => Some(EntryKind::Plurals),
            _ => None,
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EntryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::from_tag(s)
            .ok_or_else(|| Error::invalid_resource(format!("unrecognized entry tag `{}`", s)))
    }
}

/// A namespace declaration on the root element, e.g. `xmlns:tools="..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// `None` for the default namespace (`xmlns="..."`).
    pub prefix: Option<String>,
    pub uri: String,
}

impl Namespace {
    pub fn new(prefix: Option<&str>, uri: impl Into<String>) -> Self {
        Namespace {
            prefix: prefix.map(str::to_string),
            uri: uri.into(),
        }
    }

    /// Parses an attribute into a declaration if it is one (`xmlns` or `xmlns:*`).
    pub fn from_attribute(attribute: &Attribute) -> Option<Self> {
        if attribute.name == "xmlns" {
            Some(Namespace::new(None, attribute.value.clone()))
        } else {
            attribute
                .name
                .strip_prefix("xmlns:")
                .map(|prefix| Namespace::new(Some(prefix), attribute.value.clone()))
        }
    }

    /// The attribute name this declaration is written as.
    pub fn attribute_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        }
    }
}

/// An attribute as written in the source: qualified name and still-escaped value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A standalone XML comment between entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Text between `<!--` and `-->`, untouched.
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Comment { text: text.into() }
    }
}

/// An element directly below `<resources>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Raw inner markup; `None` for a self-closing element.
    pub content: Option<String>,
}

impl Entry {
    pub fn new(tag: impl Into<String>) -> Self {
        Entry {
            tag: tag.into(),
            attributes: Vec::new(),
            content: None,
        }
    }

    /// Builds a `<string name="..">text</string>` entry. `text` must already be escaped.
    pub fn string(name: &str, text: &str) -> Self {
        Entry::new(EntryKind::String.tag())
            .with_attribute("name", name)
            .with_content(text)
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn kind(&self) -> Option<EntryKind> {
        EntryKind::from_tag(&self.tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Replaces the value of an existing attribute in place, or appends a new one.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// The `name` attribute.
    pub fn key(&self) -> Option<&str> {
        self.attribute("name")
    }

    pub fn set_key(&mut self, key: &str) {
        self.set_attribute("name", key);
    }

    /// The `product` qualifier, passed through untouched by every transform.
    pub fn product(&self) -> Option<&str> {
        self.attribute("product")
    }

    /// Namespace declarations made on the entry element itself.
    pub fn namespaces(&self) -> impl Iterator<Item = Namespace> + '_ {
        self.attributes.iter().filter_map(Namespace::from_attribute)
    }

    /// Whether the entry needs `prefix` bound by an enclosing element: a prefixed attribute on the
    /// entry, or a prefixed element or attribute in its content. A prefix the entry declares
    /// itself does not count.
    pub fn uses_prefix(&self, prefix: &str) -> bool {
        if self
            .namespaces()
            .any(|ns| ns.prefix.as_deref() == Some(prefix))
        {
            return false;
        }
        let qualified = format!("{}:", prefix);
        self.attributes
            .iter()
            .any(|attr| attr.name.starts_with(&qualified))
            || self
                .content
                .as_deref()
                .is_some_and(|markup| markup_uses_prefix(markup, &qualified))
    }
}

fn markup_uses_prefix(markup: &str, qualified: &str) -> bool {
    markup.split('<').skip(1).any(|tail| {
        let tag = tail.split('>').next().unwrap_or_default();
        if tag.starts_with('!') || tag.starts_with('?') {
            return false;
        }
        let name = tag.strip_prefix('/').unwrap_or(tag);
        name.starts_with(qualified)
            || tag
                .split_whitespace()
                .skip(1)
                .any(|attr| attr.starts_with(qualified))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Comment(Comment),
    Entry(Entry),
}

impl Node {
    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(comment) => Some(comment),
            Node::Entry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Node::Entry(entry) => Some(entry),
            Node::Comment(_) => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment(_))
    }
}

impl From<Comment> for Node {
    fn from(value: Comment) -> Self {
        Node::Comment(value)
    }
}

impl From<Entry> for Node {
    fn from(value: Entry) -> Self {
        Node::Entry(value)
    }
}

/// One `strings.xml` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTree {
    /// Declarations carried on the `<resources>` root, in document order.
    pub namespaces: Vec<Namespace>,
    /// Comments and entries in document order.
    pub nodes: Vec<Node>,
    /// Node indices followed by a blank line when rendered.
    section_breaks: BTreeSet<usize>,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty tree carrying the given root declarations.
    pub fn with_namespaces(namespaces: Vec<Namespace>) -> Self {
        ResourceTree {
            namespaces,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.nodes.push(node.into());
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.nodes.iter().filter_map(Node::as_entry)
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.nodes.iter().filter_map(Node::as_comment)
    }

    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.entries().find(|entry| entry.key() == Some(key))
    }

    /// Adds a root declaration unless the same prefix is already declared.
    ///
    /// Returns `false` when the prefix is already bound, to a different URI or not.
    pub fn declare_namespace(&mut self, namespace: Namespace) -> bool {
        if self
            .namespaces
            .iter()
            .any(|existing| existing.prefix == namespace.prefix)
        {
            return false;
        }
        self.namespaces.push(namespace);
        true
    }

    /// Whether any entry relies on this root declaration. The default namespace always applies.
    pub fn uses_namespace(&self, namespace: &Namespace) -> bool {
        match &namespace.prefix {
            Some(prefix) => self.entries().any(|entry| entry.uses_prefix(prefix)),
            None => true,
        }
    }

    /// Drops root declarations that no entry relies on.
    pub fn retain_used_namespaces(&mut self) {
        let used: Vec<Namespace> = self
            .namespaces
            .iter()
            .filter(|ns| self.uses_namespace(ns))
            .cloned()
            .collect();
        self.namespaces = used;
    }

    /// Prefix bound to the Android tooling namespace on the root, if declared.
    pub fn tools_prefix(&self) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|ns| ns.uri == TOOLS_NAMESPACE)
            .and_then(|ns| ns.prefix.as_deref())
    }

    /// Marks the current last node as the end of a section. No-op on an empty tree.
    pub fn end_section(&mut self) {
        if let Some(last) = self.nodes.len().checked_sub(1) {
            self.section_breaks.insert(last);
        }
    }

    pub fn is_section_break(&self, index: usize) -> bool {
        self.section_breaks.contains(&index)
    }

    /// Keys that occur more than once with the same `product` qualifier.
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        for entry in self.entries() {
            if let Some(key) = entry.key() {
                if !seen.insert((key, entry.product())) && !duplicates.iter().any(|d| d == key) {
                    duplicates.push(key.to_string());
                }
            }
        }
        duplicates
    }
}
