//! Where resource files live in a multi-module project.
//!
//! ```text
//! <root>/<module>/src/main/res/values/strings.xml        module base file
//! <root>/<module>/src/main/res/values-fr/strings.xml     module translation
//! <root>/i18n/src/main/res/values/strings.xml            combined base file
//! <root>/i18n/src/main/res/values-fr/strings.xml         combined translation from the vendor
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{error::Error, language::LanguageDir};

pub const DEFAULT_AGGREGATION_MODULE: &str = "i18n";
pub const DEFAULT_RESOURCE_DIR: &str = "src/main/res";
pub const DEFAULT_BASE_DIR: &str = "values";
pub const DEFAULT_FILE_NAME: &str = "strings.xml";

/// Path conventions of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Directory holding the modules and the aggregation module.
    pub root: PathBuf,
    /// Reserved module that holds the combined catalog.
    pub aggregation_module: String,
    /// Resource directory relative to a module.
    pub resource_dir: PathBuf,
    /// Base-language directory name; language directories are `<base_dir>-<lang>`.
    pub base_dir: String,
    pub file_name: String,
}

impl ProjectLayout {
    /// Layout with the conventional Android paths rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout {
            root: root.into(),
            aggregation_module: DEFAULT_AGGREGATION_MODULE.to_string(),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            base_dir: DEFAULT_BASE_DIR.to_string(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_aggregation_module(mut self, module: impl Into<String>) -> Self {
        self.aggregation_module = module.into();
        self
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Infers the project root from `start`, typically the current directory.
    ///
    /// Walks up from `start` to the first directory that contains `aggregation_module`.
    /// Started from inside the aggregation module itself, its parent is the root. Falls back to
    /// `start` when nothing matches, which is where a first extraction creates the module.
    pub fn discover_root(start: &Path, aggregation_module: &str) -> PathBuf {
        for dir in start.ancestors() {
            if dir.file_name().is_some_and(|name| name == aggregation_module) {
                if let Some(parent) = dir.parent() {
                    return parent.to_path_buf();
                }
            }
            if dir.join(aggregation_module).is_dir() {
                return dir.to_path_buf();
            }
        }
        start.to_path_buf()
    }

    /// `<root>/<module>/<resource_dir>`
    pub fn resource_root(&self, module: &str) -> PathBuf {
        self.root.join(module).join(&self.resource_dir)
    }

    /// The resource file of `module`; `lang_dir` of `None` is the base language.
    pub fn resource_file(&self, module: &str, lang_dir: Option<&LanguageDir>) -> PathBuf {
        let dir = match lang_dir {
            Some(lang) => lang.name.as_str(),
            None => self.base_dir.as_str(),
        };
        self.resource_root(module).join(dir).join(&self.file_name)
    }

    pub fn base_resource_file(&self, module: &str) -> PathBuf {
        self.resource_file(module, None)
    }

    /// The combined file handed to (or received from) the translation vendor.
    pub fn combined_file(&self, lang_dir: Option<&LanguageDir>) -> PathBuf {
        self.resource_file(&self.aggregation_module, lang_dir)
    }

    /// Directories below the root that own a base resource file, sorted by name.
    ///
    /// The aggregation module is never a candidate.
    pub fn modules(&self) -> Result<Vec<String>, Error> {
        let mut modules = Vec::new();
        for dir_entry in fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %dir_entry.path().display(), "skipping directory with non UTF-8 name");
                continue;
            };
            if name == self.aggregation_module {
                continue;
            }
            if self.base_resource_file(&name).is_file() {
                modules.push(name);
            }
        }
        modules.sort();
        Ok(modules)
    }

    /// Language directories of the aggregation module that hold a resource file, sorted by name.
    pub fn languages(&self) -> Result<Vec<LanguageDir>, Error> {
        let parent = self.resource_root(&self.aggregation_module);
        if !parent.is_dir() {
            return Err(Error::MissingDirectory(parent));
        }
        let mut languages = Vec::new();
        for dir_entry in fs::read_dir(&parent)? {
            let dir_entry = dir_entry?;
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %dir_entry.path().display(), "skipping directory with non UTF-8 name");
                continue;
            };
            let Some(lang) = LanguageDir::parse(&self.base_dir, &name) else {
                continue;
            };
            if dir_entry.path().join(&self.file_name).is_file() {
                languages.push(lang);
            }
        }
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(languages)
    }
}
