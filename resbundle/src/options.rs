//! Options for extraction and splitting runs.

use globset::{Glob, GlobSet, GlobSetBuilder};
use unic_langid::LanguageIdentifier;

use crate::{assemble::CommentPolicy, error::Error, style::Style};

/// Behavior options for [`crate::extract`].
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// What happens to comments above excluded entries.
    pub comment_policy: CommentPolicy,
    /// Modules left out of the catalog even though they own a base file.
    pub excluded_modules: Option<GlobSet>,
    pub style: Style,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comment_policy(mut self, policy: CommentPolicy) -> Self {
        self.comment_policy = policy;
        self
    }

    /// Excludes modules whose directory name matches any of the glob `patterns`.
    pub fn with_excluded_modules<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, Error> {
        if patterns.is_empty() {
            self.excluded_modules = None;
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        self.excluded_modules = Some(builder.build()?);
        Ok(self)
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn is_excluded(&self, module: &str) -> bool {
        self.excluded_modules
            .as_ref()
            .is_some_and(|set| set.is_match(module))
    }
}

/// Behavior options for [`crate::split`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// Only split these languages; empty means every language directory.
    pub languages: Vec<LanguageIdentifier>,
    pub style: Style,
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(mut self, languages: Vec<LanguageIdentifier>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
