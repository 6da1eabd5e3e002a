//! Appends entries to a growing tree while keeping comments bound to the entry they annotate.

use crate::types::{Entry, Node, ResourceTree};

/// What happens to a comment whose following entry is left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// The comment belongs to the next node only and is dropped with it.
    #[default]
    AttachToNext,
    /// The comment is kept where the excluded entry was.
    KeepOrphaned,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeAssembler {
    policy: CommentPolicy,
}

impl TreeAssembler {
    pub fn new(policy: CommentPolicy) -> Self {
        TreeAssembler { policy }
    }

    /// Appends `entry` to `target`, preceded by `preceding` when that node is a comment.
    ///
    /// `preceding` is the sibling directly before `entry` in its source tree, whether or not
    /// it was emitted itself. Returns the number of nodes added.
    pub fn append(&self, entry: Entry, preceding: Option<&Node>, target: &mut ResourceTree) -> usize {
        let mut added = 1;
        if let Some(Node::Comment(comment)) = preceding {
            target.push(comment.clone());
            added += 1;
        }
        target.push(entry);
        added
    }

    /// Records that the entry after `preceding` was excluded.
    ///
    /// Returns `true` if an orphaned comment was kept.
    pub fn skip(&self, preceding: Option<&Node>, target: &mut ResourceTree) -> bool {
        match (self.policy, preceding) {
            (CommentPolicy::KeepOrphaned, Some(Node::Comment(comment))) => {
                target.push(comment.clone());
                true
            }
            _ => false,
        }
    }
}
