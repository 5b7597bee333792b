//! Extraction context: the owning data source and run options.

use crate::tree::Node;

/// Tunables for a documentation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Cap on formula expansion passes; `None` uses entity count + 1.
    pub max_resolve_passes: Option<usize>,
}

/// Extraction state passed through the per-data-source extractors.
pub(crate) struct ExtractionContext<'a> {
    /// Display name of the data source being walked.
    pub datasource: String,
    pub options: &'a ExtractOptions,
}

impl<'a> ExtractionContext<'a> {
    pub fn for_datasource(node: &Node, options: &'a ExtractOptions) -> Self {
        Self {
            datasource: datasource_display_name(node).to_string(),
            options,
        }
    }
}

/// A data source is shown by `caption`, then `formatted-name`, then `name`.
pub fn datasource_display_name(node: &Node) -> &str {
    node.attr_opt("caption")
        .or_else(|| node.attr_opt("formatted-name"))
        .unwrap_or_else(|| node.attr("name"))
}

/// Join the text of every `run` below `node`, space separated, left-trimmed.
pub(crate) fn collect_runs(node: &Node) -> String {
    join_runs(node.descendants_named("run").map(Node::text))
}

pub(crate) fn join_runs<S: AsRef<str>>(runs: impl IntoIterator<Item = S>) -> String {
    let mut text = String::new();
    for run in runs {
        text.push(' ');
        text.push_str(run.as_ref());
    }
    text.trim_start().to_string()
}
