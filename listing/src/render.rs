//! Text projection of an annotated listing tree.
//!
//! Directories print as `name/` with their children indented one level
//! deeper, files as `name (size)`. Within a level directories come before
//! files and names sort lexicographically, so identical trees always render
//! to identical text. A directory carrying a pattern summary prints one
//! compacted line in place of its children:
//!
//! ```text
//! year={2020,2021,2022} (3 total)/
//!   data.parquet (5.1 MB)
//! [0-99].parquet (100 files, 1.0 MB–1.2 MB, total: 110.3 MB)
//! {2024-01-01,2024-01-02} (2 temporal snapshots)
//!   2024-01-01/ (example)
//!     scene.tif (20.0 MB)
//! ```
//!
//! When every member of a partition or date group is a file there is no
//! subtree to show; the summary line carries the group's total size instead.

use crate::config::CompactionConfig;
use crate::pattern::{PatternDetail, PatternSummary, summarize_values};
use crate::stats::format_size;
use crate::tree::{Directory, TreeNode};

/// Renders trees into indented text.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    indent_width: usize,
    max_listed_values: usize,
    root_label: Option<String>,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new(&CompactionConfig::default())
    }
}

impl TreeRenderer {
    /// Create a renderer from `config`.
    pub fn new(config: &CompactionConfig) -> Self {
        Self {
            indent_width: config.indent_width.max(1),
            max_listed_values: config.max_listed_values.max(3),
            root_label: config.root_label.clone(),
        }
    }

    /// Render `root` and everything below it.
    pub fn render(&self, root: &Directory) -> String {
        let mut lines = Vec::new();
        let depth = match &self.root_label {
            Some(label) => {
                lines.push(label.trim_end().to_string());
                1
            }
            None => 0,
        };
        self.render_children(root, depth, &mut lines);
        lines.join("\n")
    }

    fn render_children(&self, dir: &Directory, depth: usize, lines: &mut Vec<String>) {
        if let Some(summary) = &dir.pattern {
            self.render_summary(dir, summary, depth, lines);
            return;
        }

        let indent = self.indent(depth);
        for node in dir.children.values() {
            if let TreeNode::Directory(child) = node {
                lines.push(format!("{indent}{}/", display_name(&child.name)));
                self.render_children(child, depth + 1, lines);
            }
        }
        for node in dir.children.values() {
            if let TreeNode::File(file) = node {
                lines.push(format!(
                    "{indent}{} ({})",
                    display_name(&file.name),
                    format_size(file.size)
                ));
            }
        }
    }

    fn render_summary(
        &self,
        dir: &Directory,
        summary: &PatternSummary,
        depth: usize,
        lines: &mut Vec<String>,
    ) {
        let indent = self.indent(depth);
        let count = summary.count;
        match &summary.detail {
            PatternDetail::Partition { key, values } => {
                let list = summarize_values(values, self.max_listed_values);
                let elided = values.len() > self.max_listed_values;
                match dir.representative() {
                    Some(sample) => {
                        if elided {
                            lines.push(format!("{indent}{key}={{{list}}}/"));
                        } else {
                            lines.push(format!("{indent}{key}={{{list}}} ({count} total)/"));
                        }
                        self.render_children(sample, depth + 1, lines);
                    }
                    // Every member is a file: no trailing slash, sizes folded into the line.
                    None => {
                        let size = format_size(dir.total_size());
                        if elided {
                            lines.push(format!("{indent}{key}={{{list}}} ({size})"));
                        } else {
                            lines.push(format!("{indent}{key}={{{list}}} ({count} total, {size})"));
                        }
                    }
                }
            }
            PatternDetail::NumericRun {
                suffix,
                min,
                max,
                min_size,
                max_size,
                total_size,
            } => {
                lines.push(format!(
                    "{indent}[{min}-{max}]{} ({count} files, {}–{}, total: {})",
                    display_name(suffix),
                    format_size(*min_size),
                    format_size(*max_size),
                    format_size(*total_size),
                ));
            }
            PatternDetail::DateRun { dates } => {
                let dates: Vec<String> = dates.iter().map(ToString::to_string).collect();
                let list = summarize_values(&dates, self.max_listed_values);
                match dir.representative() {
                    Some(sample) => {
                        lines.push(format!("{indent}{{{list}}} ({count} temporal snapshots)"));
                        let inner = self.indent(depth + 1);
                        lines.push(format!("{inner}{}/ (example)", sample.name));
                        self.render_children(sample, depth + 2, lines);
                    }
                    None => {
                        let size = format_size(dir.total_size());
                        lines.push(format!(
                            "{indent}{{{list}}} ({count} temporal snapshots, {size})"
                        ));
                    }
                }
            }
        }
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }
}

/// Render a tree with the default layout.
pub fn render(root: &Directory) -> String {
    TreeRenderer::default().render(root)
}

/// Escape control characters so one node always stays on one line.
fn display_name(name: &str) -> String {
    if name.chars().any(char::is_control) {
        name.escape_debug().to_string()
    } else {
        name.to_string()
    }
}
