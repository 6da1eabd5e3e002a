#![forbid(unsafe_code)]
//! Translation bundling for multi-module Android projects.
//!
//! Every module of a project owns its own `strings.xml`. Translation vendors want a single file per
//! language. `resbundle` merges the base-language files of all modules into one catalog held by an
//! aggregation module (keys become `<module>.<key>`), and splits each translated catalog back into
//! per-module, per-language files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resbundle::{ExtractOptions, ProjectLayout, SplitOptions, extract, split};
//!
//! let layout = ProjectLayout::new("/path/to/project");
//!
//! // <module>/src/main/res/values/strings.xml -> i18n/src/main/res/values/strings.xml
//! let report = extract(&layout, &ExtractOptions::default())?;
//! println!("{} entries", report.total_entries());
//!
//! // i18n/src/main/res/values-fr/strings.xml -> <module>/src/main/res/values-fr/strings.xml
//! split(&layout, &SplitOptions::default())?;
//! # Ok::<(), resbundle::Error>(())
//! ```
//!
//! # What is translated
//!
//! - `<string>`, `<string-array>` and `<plurals>` entries
//! - except entries with `translatable="false"`
//! - except entries carrying `tools:ignore` when the tooling namespace is declared
//!
//! A comment directly above an entry travels with it in both directions.
//!
//! Files written by the tool use a fixed layout (see [`Style`]). A module file already in that layout
//! comes back byte-for-byte after an extract and split.

mod android_strings;
pub mod assemble;
pub mod classify;
mod entities;
pub mod error;
pub mod extract;
pub mod key;
pub mod language;
pub mod options;
pub mod project;
pub mod report;
pub mod split;
pub mod style;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    assemble::{CommentPolicy, TreeAssembler},
    classify::{Classification, SkipReason, classify},
    error::Error,
    extract::{extract, merge_module, merge_modules},
    language::LanguageDir,
    options::{ExtractOptions, SplitOptions},
    project::ProjectLayout,
    report::{ExtractReport, SplitReport},
    split::{split, split_tree},
    style::Style,
    traits::Parser,
    types::{Comment, Entry, EntryKind, Namespace, Node, ResourceTree},
};
