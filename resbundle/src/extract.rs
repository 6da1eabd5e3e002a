//! Merging module files into the combined catalog.

use tracing::{debug, info, instrument, warn};

use crate::{
    assemble::TreeAssembler,
    classify::{Classification, classify},
    error::Error,
    key,
    options::ExtractOptions,
    project::ProjectLayout,
    report::{ExtractReport, ModuleSummary},
    types::{Node, ResourceTree},
};

/// Appends the includable entries of one module to `combined`, keyed `<module>.<key>`.
///
/// Entries keep their source order; a comment directly above an includable entry moves with it.
/// The module's entries end a section so the written catalog shows a blank line between modules.
/// Root namespace declarations of the module are carried over only when a merged entry uses them.
pub fn merge_module(
    combined: &mut ResourceTree,
    module: &str,
    tree: &ResourceTree,
    assembler: &TreeAssembler,
) -> Result<ModuleSummary, Error> {
    key::validate_module_name(module)?;

    let first_new = combined.len();
    let tools_prefix = tree.tools_prefix();
    let mut summary = ModuleSummary::new(module);
    let mut previous: Option<&Node> = None;

    for node in &tree.nodes {
        match (node, classify(node, tools_prefix)) {
            (Node::Entry(entry), Classification::Includable(_)) => {
                let local = entry.key().ok_or_else(|| {
                    Error::invalid_resource(format!(
                        "<{}> in module `{}` has no name attribute",
                        entry.tag, module
                    ))
                })?;
                let mut relocated = entry.clone();
                relocated.set_key(&key::compose(module, local));
                let added = assembler.append(relocated, previous, combined);
                summary.included += 1;
                summary.comments += added - 1;
            }
            (Node::Entry(entry), Classification::Skipped(reason)) => {
                debug!(module, key = entry.key().unwrap_or_default(), ?reason, "skipping entry");
                *summary.skipped.entry(reason).or_default() += 1;
                if assembler.skip(previous, combined) {
                    summary.comments += 1;
                }
            }
            _ => {}
        }
        previous = Some(node);
    }

    for namespace in &tree.namespaces {
        let used = match &namespace.prefix {
            Some(prefix) => combined.nodes[first_new..]
                .iter()
                .filter_map(Node::as_entry)
                .any(|entry| entry.uses_prefix(prefix)),
            None => true,
        };
        if !used {
            continue;
        }
        let conflicting = combined
            .namespaces
            .iter()
            .any(|ns| ns.prefix == namespace.prefix && ns.uri != namespace.uri);
        if conflicting {
            warn!(module, prefix = ?namespace.prefix, uri = %namespace.uri, "namespace prefix already bound to another URI");
        }
        combined.declare_namespace(namespace.clone());
    }

    combined.end_section();
    Ok(summary)
}

/// Merges modules in the given order into a fresh combined tree.
pub fn merge_modules<'a, I>(
    modules: I,
    assembler: &TreeAssembler,
) -> Result<(ResourceTree, Vec<ModuleSummary>), Error>
where
    I: IntoIterator<Item = (&'a str, &'a ResourceTree)>,
{
    let mut combined = ResourceTree::new();
    let mut summaries = Vec::new();
    for (module, tree) in modules {
        summaries.push(merge_module(&mut combined, module, tree, assembler)?);
    }
    Ok((combined, summaries))
}

/// Builds the base-language catalog of every module in `layout` and writes it to the
/// aggregation module.
#[instrument(level = "info", skip_all, fields(root = %layout.root.display()))]
pub fn extract(layout: &ProjectLayout, options: &ExtractOptions) -> Result<ExtractReport, Error> {
    let assembler = TreeAssembler::new(options.comment_policy);
    let mut combined = ResourceTree::new();
    let mut modules = Vec::new();
    let mut excluded = Vec::new();

    for module in layout.modules()? {
        if options.is_excluded(&module) {
            info!(module = %module, "module excluded by pattern");
            excluded.push(module);
            continue;
        }

        let path = layout.base_resource_file(&module);
        let tree = ResourceTree::load(&path)?;
        for duplicate in tree.duplicate_keys() {
            warn!(module = %module, key = %duplicate, "duplicate key in module");
        }

        let summary = merge_module(&mut combined, &module, &tree, &assembler)?;
        info!(
            module = %module,
            included = summary.included,
            skipped = summary.skipped_total(),
            "merged module"
        );
        modules.push(summary);
    }

    let output = layout.combined_file(None);
    combined.save(&output, &options.style)?;
    let report = ExtractReport {
        output,
        modules,
        excluded,
    };
    info!(
        path = %report.output.display(),
        entries = report.total_entries(),
        "wrote combined catalog"
    );
    Ok(report)
}
