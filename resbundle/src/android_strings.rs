//! Reading and writing Android `strings.xml` documents.
//!
//! Children of `<resources>` are kept as comments and raw entries: the inner markup of an entry
//! (text, `<item>` children, inline `xliff:g` tags, character references) is sliced straight from the
//! source and written back verbatim, so translations pass through the tool byte for byte. Entities
//! declared in a DOCTYPE are the exception: they are expanded, since the DOCTYPE is not written back.

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use crate::{
    entities::Entities,
    error::Error,
    style::Style,
    traits::{Parser, read_all},
    types::{Attribute, Comment, Entry, Namespace, Node, ROOT_TAG, ResourceTree},
};

impl Parser for ResourceTree {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let source = read_all(reader)?;
        parse_document(&source)
    }

    /// Write with the default style (tab indentation).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        self.to_writer_with_style(writer, &Style::default())
    }
}

impl ResourceTree {
    /// Write to any writer, laying out whitespace with `style`.
    ///
    /// Root declarations are written default namespace first, then by prefix.
    pub fn to_writer_with_style<W: Write>(&self, mut writer: W, style: &Style) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        let mut namespaces: Vec<&Namespace> = self.namespaces.iter().collect();
        namespaces.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        let root_attributes: Vec<Attribute> = namespaces
            .into_iter()
            .map(|ns| Attribute::new(ns.attribute_name(), ns.uri.clone()))
            .collect();
        xml_writer.write_event(Event::Start(start_tag(ROOT_TAG, &root_attributes)))?;
        xml_writer.write_event(Event::Text(BytesText::new(&style.leading(self))))?;

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Comment(comment) => {
                    xml_writer.write_event(Event::Comment(BytesText::from_escaped(
                        comment.text.as_str(),
                    )))?;
                }
                Node::Entry(entry) => write_entry(&mut xml_writer, entry)?,
            }
            xml_writer.write_event(Event::Text(BytesText::new(&style.trailing(self, index))))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        writer.flush()?;
        Ok(())
    }

    /// Write to a file path, laying out whitespace with `style`.
    pub fn write_to_with_style<P: AsRef<Path>>(&self, path: P, style: &Style) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        self.to_writer_with_style(BufWriter::new(file), style)
    }

    /// Reads a resource file, naming the file in any error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::read_from(path).map_err(|e| Error::in_file(path, e))
    }

    /// Writes a resource file, creating missing parent directories and replacing any existing file.
    pub fn save(&self, path: &Path, style: &Style) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::in_file(parent, e.into()))?;
        }
        self.write_to_with_style(path, style)
            .map_err(|e| Error::in_file(path, e))
    }

    /// Render the whole document to a string.
    pub fn to_xml_string(&self, style: &Style) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer_with_style(&mut out, style)?;
        String::from_utf8(out).map_err(|e| Error::Utf8(e.utf8_error()))
    }
}

fn write_entry<W: Write>(xml_writer: &mut Writer<W>, entry: &Entry) -> Result<(), Error> {
    let start = start_tag(&entry.tag, &entry.attributes);
    match &entry.content {
        Some(content) => {
            xml_writer.write_event(Event::Start(start))?;
            xml_writer.write_event(Event::Text(BytesText::from_escaped(content.as_str())))?;
            xml_writer.write_event(Event::End(BytesEnd::new(entry.tag.as_str())))?;
        }
        None => xml_writer.write_event(Event::Empty(start))?,
    }
    Ok(())
}

/// Builds a start tag from attributes whose values are already escaped.
fn start_tag<'a>(tag: &str, attributes: &[Attribute]) -> BytesStart<'a> {
    let mut content = String::from(tag);
    for attr in attributes {
        content.push(' ');
        content.push_str(&attr.name);
        content.push_str("=\"");
        // single-quoted source values may hold a literal double quote
        content.push_str(&attr.value.replace('"', "&quot;"));
        content.push('"');
    }
    BytesStart::from_content(content, tag.len())
}

fn parse_document(source: &str) -> Result<ResourceTree, Error> {
    let mut reader = Reader::from_str(source);
    let mut tree = ResourceTree::new();
    let mut entities = Entities::default();

    loop {
        match reader.read_event()? {
            Event::DocType(doctype) => {
                entities = Entities::from_doctype(std::str::from_utf8(&doctype)?)?;
                tracing::debug!(entities = entities.len(), "read DOCTYPE entity declarations");
            }
            Event::Start(root) => {
                tree.namespaces = root_namespaces(&root, &entities)?;
                parse_children(&mut reader, source, &entities, &mut tree)?;
                break;
            }
            Event::Empty(root) => {
                tree.namespaces = root_namespaces(&root, &entities)?;
                break;
            }
            Event::Eof => return Err(Error::invalid_resource("document has no root element")),
            _ => {}
        }
    }

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(_) | Event::Empty(_) => {
                return Err(Error::invalid_resource(
                    "document has more than one root element",
                ));
            }
            _ => {}
        }
    }

    Ok(tree)
}

fn parse_children(
    reader: &mut Reader<&[u8]>,
    source: &str,
    entities: &Entities,
    tree: &mut ResourceTree,
) -> Result<(), Error> {
    loop {
        match reader.read_event()? {
            Event::Comment(text) => {
                tree.push(Comment::new(std::str::from_utf8(&text)?));
            }
            Event::Start(start) => {
                let mut entry = parse_entry(&start, entities)?;
                let span = reader.read_to_end(start.name())?;
                let inner = &source[span.start as usize..span.end as usize];
                entry.content = Some(entities.expand(inner)?);
                tree.push(entry);
            }
            Event::Empty(start) => tree.push(parse_entry(&start, entities)?),
            Event::End(_) => return Ok(()),
            Event::Text(text) => {
                let text = std::str::from_utf8(&text)?;
                if !text.trim().is_empty() {
                    tracing::debug!(text = text.trim(), "dropping stray text between entries");
                }
            }
            Event::Eof => {
                return Err(Error::invalid_resource(
                    "unexpected end of document inside <resources>",
                ));
            }
            _ => {}
        }
    }
}

fn parse_entry(start: &BytesStart, entities: &Entities) -> Result<Entry, Error> {
    let name = start.name();
    let mut entry = Entry::new(std::str::from_utf8(name.as_ref())?);
    for attr in start.attributes().with_checks(false) {
        let attr = attr?;
        let value = entities.expand(std::str::from_utf8(&attr.value)?)?;
        if value.contains('<') {
            return Err(Error::invalid_resource(format!(
                "attribute `{}` of <{}> expands to markup",
                String::from_utf8_lossy(attr.key.as_ref()),
                entry.tag
            )));
        }
        entry
            .attributes
            .push(Attribute::new(std::str::from_utf8(attr.key.as_ref())?, value));
    }
    Ok(entry)
}

fn root_namespaces(root: &BytesStart, entities: &Entities) -> Result<Vec<Namespace>, Error> {
    let root = parse_entry(root, entities)?;
    if root.tag != ROOT_TAG {
        tracing::warn!(tag = %root.tag, "root element is not <resources>");
    }
    Ok(root
        .attributes
        .iter()
        .filter_map(|attr| {
            let namespace = Namespace::from_attribute(attr);
            if namespace.is_none() {
                tracing::warn!(
                    attribute = %attr.name,
                    value = %attr.value,
                    "dropping non-namespace root attribute"
                );
            }
            namespace
        })
        .collect())
}
