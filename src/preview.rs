use crate::config::{Configuration, Entry, StructureNode};
use colored::Colorize;
use std::path::Path;

/// Render the configured structure as an ASCII tree, rooted at the project name.
///
/// Levels past `max_depth` are summarized instead of listed, mirroring what the builder
/// will actually create.
pub fn render_tree(config: &Configuration, max_depth: usize) -> String {
    let mut out = format!("{}\n", config.project_name().blue());

    render_nodes(&mut out, config.structure(), "", 1, max_depth);

    out
}

fn render_nodes(
    out: &mut String,
    nodes: &[StructureNode],
    prefix: &str,
    depth: usize,
    max_depth: usize,
) {
    let len = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == len - 1;
        let connector = if is_last { "└── " } else { "├── " };

        let entry = node.entry();
        let label = match &entry {
            Some(Entry::Folder { .. }) => node.name.blue(),
            Some(Entry::File { .. }) => node.name.green(),
            Some(Entry::Unknown { kind }) => {
                format!("{} (unknown type '{}')", node.name, kind).dimmed()
            }
            None => format!("{} (missing type)", node.name).red(),
        };

        out.push_str(&format!("{}{}{}\n", prefix.yellow(), connector.yellow(), label));

        let Some(Entry::Folder { children }) = entry else {
            continue;
        };
        if children.is_empty() {
            continue;
        }

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });

        if depth + 1 > max_depth {
            let summary = format!("… {} entries beyond max depth", children.len());
            out.push_str(&format!(
                "{}{}{}\n",
                child_prefix.yellow(),
                "└── ".yellow(),
                summary.dimmed()
            ));
        } else {
            render_nodes(out, children, &child_prefix, depth + 1, max_depth);
        }
    }
}

pub fn preview_structure(config: &Configuration, destination: &Path, max_depth: usize) {
    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
        destination.display()
    );

    println!("{}", fancy_prompt);

    print!("{}", render_tree(config, max_depth));

    println!();
}
