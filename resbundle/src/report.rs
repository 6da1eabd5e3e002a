//! Summaries of extraction and split runs.

use std::{collections::BTreeMap, path::PathBuf};

use serde::Serialize;

use crate::{classify::SkipReason, error::Error};

/// Counts for one module merged into the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub module: String,
    pub included: usize,
    pub comments: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl ModuleSummary {
    pub fn new(module: impl Into<String>) -> Self {
        ModuleSummary {
            module: module.into(),
            ..Self::default()
        }
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub output: PathBuf,
    pub modules: Vec<ModuleSummary>,
    /// Modules that own a base file but were excluded by pattern.
    pub excluded: Vec<String>,
}

impl ExtractReport {
    pub fn total_entries(&self) -> usize {
        self.modules.iter().map(|m| m.included).sum()
    }
}

/// One file written by a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOutput {
    pub module: String,
    pub entries: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub directory: String,
    pub language: Option<String>,
    pub modules: Vec<ModuleOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub languages: Vec<LanguageSummary>,
}

impl SplitReport {
    pub fn files_written(&self) -> usize {
        self.languages.iter().map(|l| l.modules.len()).sum()
    }
}

/// Writes any report as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: impl AsRef<std::path::Path>, report: &T) -> Result<(), Error> {
    let text = serde_json::to_string_pretty(report)?;
    std::fs::write(path, text)?;
    Ok(())
}
