//! Whitespace layout applied when a tree is written.
//!
//! The transforms never touch whitespace. Indentation is derived from the node positions
//! and the section breaks recorded on the tree, so the same tree always renders the same bytes.

use crate::types::ResourceTree;

/// Indentation settings for written files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Prefix written before every node directly below `<resources>`.
    pub indent: String,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            indent: "\t".to_string(),
        }
    }
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Whitespace between `<resources>` and the first node.
    pub fn leading(&self, tree: &ResourceTree) -> String {
        if tree.is_empty() {
            "\n".to_string()
        } else {
            format!("\n{}", self.indent)
        }
    }

    /// Whitespace after the node at `index`.
    ///
    /// The last node is followed by a bare newline so `</resources>` is not indented.
    pub fn trailing(&self, tree: &ResourceTree, index: usize) -> String {
        if index + 1 >= tree.len() {
            "\n".to_string()
        } else if tree.is_section_break(index) {
            format!("\n\n{}", self.indent)
        } else {
            format!("\n{}", self.indent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, Entry};

    fn tree_of(n: usize) -> ResourceTree {
        let mut tree = ResourceTree::new();
        for i in 0..n {
            tree.push(Entry::string(&format!("k{}", i), "v"));
        }
        tree
    }

    #[test]
    fn test_empty_tree_has_unindented_close() {
        let style = Style::default();
        assert_eq!(style.leading(&ResourceTree::new()), "\n");
    }

    #[test]
    fn test_last_node_closes_cleanly() {
        let style = Style::default();
        let tree = tree_of(3);
        assert_eq!(style.leading(&tree), "\n\t");
        assert_eq!(style.trailing(&tree, 0), "\n\t");
        assert_eq!(style.trailing(&tree, 1), "\n\t");
        assert_eq!(style.trailing(&tree, 2), "\n");
    }

    #[test]
    fn test_section_break_adds_blank_line() {
        let style = Style::default().with_indent("    ");
        let mut tree = tree_of(1);
        tree.end_section();
        tree.push(Comment::new(" next module "));
        tree.push(Entry::string("b", "B"));
        tree.end_section();
        assert_eq!(style.trailing(&tree, 0), "\n\n    ");
        assert_eq!(style.trailing(&tree, 1), "\n    ");
        // a break on the last node still closes the container without indentation
        assert_eq!(style.trailing(&tree, 2), "\n");
    }
}
