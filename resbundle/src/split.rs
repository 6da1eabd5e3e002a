//! Splitting a translated catalog back into per-module files.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    assemble::TreeAssembler,
    error::Error,
    key,
    options::SplitOptions,
    project::ProjectLayout,
    report::{LanguageSummary, ModuleOutput, SplitReport},
    types::{Node, ResourceTree},
};

/// Regroups the entries of a combined tree by the module named in their key.
///
/// Keys lose their module prefix. Every module tree holds its entries in the order they appear in
/// `combined`, each with the comment directly above it, and declares the combined root's namespaces
/// its own entries use. Fails on the first key that does not name a module, or that names
/// `aggregation_module`.
pub fn split_tree(
    combined: &ResourceTree,
    aggregation_module: &str,
) -> Result<BTreeMap<String, ResourceTree>, Error> {
    let assembler = TreeAssembler::default();
    let mut modules: BTreeMap<String, ResourceTree> = BTreeMap::new();
    let mut previous: Option<&Node> = None;

    for node in &combined.nodes {
        if let Node::Entry(entry) = node {
            let full_key = entry.key().ok_or_else(|| {
                Error::invalid_resource(format!("<{}> has no name attribute", entry.tag))
            })?;
            let (module, local) = key::split(full_key)?;
            if module == aggregation_module {
                return Err(Error::ReservedModule {
                    key: full_key.to_string(),
                    module: module.to_string(),
                });
            }

            let mut relocated = entry.clone();
            relocated.set_key(local);
            let target = modules
                .entry(module.to_string())
                .or_insert_with(|| ResourceTree::with_namespaces(combined.namespaces.clone()));
            assembler.append(relocated, previous, target);
        }
        previous = Some(node);
    }

    for tree in modules.values_mut() {
        tree.retain_used_namespaces();
    }
    Ok(modules)
}

/// Splits the combined file of every language directory of the aggregation module.
///
/// Languages are processed in directory-name order. A language whose catalog fails to parse or
/// split stops the run; files written for earlier languages are kept.
#[instrument(level = "info", skip_all, fields(root = %layout.root.display()))]
pub fn split(layout: &ProjectLayout, options: &SplitOptions) -> Result<SplitReport, Error> {
    let mut report = SplitReport::default();

    for lang in layout.languages()? {
        if !lang.matches(&options.languages) {
            debug!(directory = %lang.name, "language not selected");
            continue;
        }

        let source = layout.combined_file(Some(&lang));
        let combined = ResourceTree::load(&source)?;
        let trees = split_tree(&combined, &layout.aggregation_module)
            .map_err(|e| Error::in_file(&source, e))?;

        let mut outputs = Vec::with_capacity(trees.len());
        for (module, tree) in trees {
            if !layout.root.join(&module).is_dir() {
                warn!(module = %module, directory = %lang.name, "module directory does not exist, creating it");
            }
            let path = layout.resource_file(&module, Some(&lang));
            tree.save(&path, &options.style)?;
            debug!(path = %path.display(), entries = tree.entries().count(), "wrote module file");
            outputs.push(ModuleOutput {
                entries: tree.entries().count(),
                module,
                path,
            });
        }

        info!(directory = %lang.name, modules = outputs.len(), "split language");
        report.languages.push(LanguageSummary {
            directory: lang.name.clone(),
            language: lang.language().map(|l| l.to_string()),
            modules: outputs,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use crate::types::{Comment, Entry, Namespace, TOOLS_NAMESPACE};

    fn combined(keys: &[&str]) -> ResourceTree {
        let mut tree = ResourceTree::new();
        for key in keys {
            tree.push(Entry::string(key, "value"));
        }
        tree
    }

    fn keys(tree: &ResourceTree) -> Vec<&str> {
        tree.entries().filter_map(Entry::key).collect()
    }

    #[test]
    fn test_grouping_keeps_relative_order() {
        let trees = split_tree(&combined(&["a.x", "b.y", "a.z"]), "i18n").unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(keys(&trees["a"]), vec!["x", "z"]);
        assert_eq!(keys(&trees["b"]), vec!["y"]);
    }

    #[test]
    fn test_local_name_keeps_its_dots() {
        let trees = split_tree(&combined(&["settings.pref.title"]), "i18n").unwrap();
        assert_eq!(keys(&trees["settings"]), vec!["pref.title"]);
    }

    #[test]
    fn test_key_without_module_is_fatal() {
        let result = split_tree(&combined(&["a.x", "app_name"]), "i18n");
        assert!(matches!(result, Err(Error::MalformedKey { ref key, .. }) if key == "app_name"));
    }

    #[test]
    fn test_aggregation_module_is_reserved() {
        let result = split_tree(&combined(&["i18n.title"]), "i18n");
        assert!(matches!(result, Err(Error::ReservedModule { .. })));
    }

    #[test]
    fn test_comment_goes_to_module_of_next_entry() {
        let mut tree = ResourceTree::new();
        tree.push(Entry::string("a.x", "X"));
        tree.push(Comment::new(" for b "));
        tree.push(Entry::string("b.y", "Y"));
        tree.push(Comment::new(" dangling "));
        let trees = split_tree(&tree, "i18n").unwrap();
        assert_eq!(trees["a"].len(), 1);
        assert_eq!(
            trees["b"].nodes,
            vec![
                Node::Comment(Comment::new(" for b ")),
                Node::Entry(Entry::string("y", "Y")),
            ]
        );
    }

    #[test]
    fn test_module_trees_declare_only_used_namespaces() {
        let mut tree = ResourceTree::with_namespaces(vec![Namespace::new(
            Some("tools"),
            TOOLS_NAMESPACE,
        )]);
        tree.push(Entry::string("a.x", "X").with_attribute("tools:locale", "en"));
        tree.push(Entry::string("b.y", "Y"));
        let trees = split_tree(&tree, "i18n").unwrap();
        assert_eq!(trees["a"].tools_prefix(), Some("tools"));
        assert!(trees["b"].namespaces.is_empty());
    }

    #[test]
    fn test_bare_module_stays_bare_after_round_trip() {
        let a = ResourceTree::from_str(indoc::indoc! {r#"
            <resources xmlns:tools="http://schemas.android.com/tools">
                <string name="x" tools:ignore="MissingTranslation">X</string>
                <string name="kept">K</string>
            </resources>
        "#})
        .unwrap();
        let b_source = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n\t<string name=\"y\">Y</string>\n</resources>\n";
        let b = ResourceTree::from_str(b_source).unwrap();
        let (combined, _) = crate::extract::merge_modules(
            [("a", &a), ("b", &b)],
            &crate::assemble::TreeAssembler::default(),
        )
        .unwrap();
        let trees = split_tree(&combined, "i18n").unwrap();
        let style = crate::style::Style::default();
        assert_eq!(trees["b"].to_xml_string(&style).unwrap(), b_source);
        assert!(trees["a"].namespaces.is_empty());
    }

    #[test]
    fn test_other_attributes_survive() {
        let mut tree = ResourceTree::new();
        tree.push(
            Entry::new("plurals")
                .with_attribute("name", "a.count")
                .with_attribute("product", "tablet")
                .with_content("<item quantity=\"other\">%d</item>"),
        );
        let trees = split_tree(&tree, "i18n").unwrap();
        let entry = trees["a"].find_entry("count").unwrap();
        assert_eq!(entry.product(), Some("tablet"));
        assert_eq!(entry.content.as_deref(), Some("<item quantity=\"other\">%d</item>"));
    }

    #[test]
    fn test_empty_catalog_yields_no_modules() {
        assert!(split_tree(&ResourceTree::new(), "i18n").unwrap().is_empty());
    }
}
