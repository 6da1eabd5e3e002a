use std::path::{Path, PathBuf};

use resbundle::{
    CommentPolicy, ExtractOptions, ExtractReport, ProjectLayout, SplitOptions, SplitReport, Style,
    extract, language::qualifier_to_language, report::write_json, split,
};
use unic_langid::LanguageIdentifier;

use crate::config::ResbundleConfig;

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub aggregation_module: Option<String>,
    pub languages: Vec<String>,
    pub keep_orphan_comments: bool,
    pub report: Option<PathBuf>,
}

/// Everything a run needs, resolved from flags, config and defaults.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub layout: ProjectLayout,
    pub extract: ExtractOptions,
    pub split: SplitOptions,
    pub report: Option<PathBuf>,
}

impl RunSettings {
    /// `cwd` anchors relative paths and root discovery.
    pub fn resolve(
        overrides: Overrides,
        config: ResbundleConfig,
        cwd: &Path,
    ) -> Result<Self, String> {
        let aggregation = overrides
            .aggregation_module
            .or(config.aggregation_module)
            .unwrap_or_else(|| resbundle::project::DEFAULT_AGGREGATION_MODULE.to_string());
        let root = match overrides.root.or(config.root) {
            Some(root) => cwd.join(root),
            None => ProjectLayout::discover_root(cwd, &aggregation),
        };

        let mut layout = ProjectLayout::new(root).with_aggregation_module(aggregation);
        if let Some(dir) = config.resource_dir {
            layout = layout.with_resource_dir(dir);
        }
        if let Some(dir) = config.base_dir {
            layout = layout.with_base_dir(dir);
        }
        if let Some(name) = config.file_name {
            layout = layout.with_file_name(name);
        }

        let style = match config.indent {
            Some(indent) => Style::default().with_indent(indent),
            None => Style::default(),
        };

        let policy = if overrides.keep_orphan_comments || config.keep_orphan_comments == Some(true)
        {
            CommentPolicy::KeepOrphaned
        } else {
            CommentPolicy::AttachToNext
        };
        let extract = ExtractOptions::new()
            .with_comment_policy(policy)
            .with_excluded_modules(&config.exclude_modules.unwrap_or_default())
            .map_err(|e| e.to_string())?
            .with_style(style.clone());

        let language_args = if overrides.languages.is_empty() {
            config.languages.unwrap_or_default()
        } else {
            overrides.languages
        };
        let languages = language_args
            .iter()
            .map(|lang| parse_language(lang))
            .collect::<Result<Vec<_>, _>>()?;
        let split = SplitOptions::new()
            .with_languages(languages)
            .with_style(style);

        Ok(RunSettings {
            layout,
            extract,
            split,
            report: overrides.report.map(|path| cwd.join(path)),
        })
    }
}

/// Accepts an Android qualifier (`pt-rBR`, `b+sr+Latn`) or a BCP 47 tag (`pt-BR`).
pub fn parse_language(value: &str) -> Result<LanguageIdentifier, String> {
    qualifier_to_language(value)
        .or_else(|| value.parse().ok())
        .ok_or_else(|| format!("Invalid language '{}'", value))
}

pub fn run_extract_command(settings: &RunSettings) -> Result<ExtractReport, String> {
    let report = extract(&settings.layout, &settings.extract).map_err(|e| e.to_string())?;
    println!(
        "Extracted {} entries from {} modules into {}",
        report.total_entries(),
        report.modules.len(),
        report.output.display()
    );
    if let Some(path) = &settings.report {
        write_json(path, &report).map_err(|e| e.to_string())?;
    }
    Ok(report)
}

pub fn run_split_command(settings: &RunSettings) -> Result<SplitReport, String> {
    let report = split(&settings.layout, &settings.split).map_err(|e| e.to_string())?;
    for language in &report.languages {
        println!(
            "{}: {} module files",
            language.directory,
            language.modules.len()
        );
    }
    println!(
        "Split {} languages into {} files",
        report.languages.len(),
        report.files_written()
    );
    if let Some(path) = &settings.report {
        write_json(path, &report).map_err(|e| e.to_string())?;
    }
    Ok(report)
}
