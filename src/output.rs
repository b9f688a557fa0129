//! CLI output formatting.
//!
//! The `tree` format prints a render tree as an indented outline, one node
//! per line, kind first, then classes and the attributes that matter:
//!
//! ```text
//! container .figureContainer .figureContainer--home
//!     wrapper .figureWrapper .figureWrapper--home
//!         figure .figure .figure--home
//!             picture
//!                 source d.jpg (min-width:1026px) 1920x600
//!                 source m.jpg (max-width:1025px) 750x900
//!                 image .figureImage .figureImage--home d.jpg 1920x600 loading=lazy
//!             caption .figureCaption .figureCaption--home
//!                 caption-text .figureCaptionText .figureCaptionText--home "Sale"
//! ```
//!
//! `format_*` functions return lines and do no I/O; `print_*` wrappers write
//! them to stdout.

use crate::tree::{Node, NodeKind, RenderTree};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `WxH`, `Wx?`, `?xH`, or nothing when both are unknown.
fn format_size(width: Option<u32>, height: Option<u32>) -> Option<String> {
    match (width, height) {
        (None, None) => None,
        (w, h) => Some(format!(
            "{}x{}",
            w.map_or("?".to_string(), |w| w.to_string()),
            h.map_or("?".to_string(), |h| h.to_string())
        )),
    }
}

fn node_details(node: &Node) -> Vec<String> {
    let mut parts: Vec<String> = node.classes.iter().map(|c| format!(".{c}")).collect();
    match &node.kind {
        NodeKind::Wrapper { background } | NodeKind::Figure { background } => {
            if let Some(style) = background {
                parts.push(format!("[{style}]"));
            }
        }
        NodeKind::Link { href, target } => {
            parts.push(href.clone());
            parts.push(target.as_attr().to_string());
        }
        NodeKind::Source {
            srcset,
            media,
            width,
            height,
        } => {
            parts.push(srcset.clone());
            parts.push(media.clone());
            parts.extend(format_size(*width, *height));
        }
        NodeKind::Image(attrs) => {
            parts.push(attrs.src.clone());
            parts.extend(format_size(attrs.width, attrs.height));
            parts.push(format!("loading={}", attrs.loading.as_str()));
            if let Some(priority) = attrs.fetch_priority {
                parts.push(format!("fetchpriority={priority}"));
            }
        }
        NodeKind::CaptionText { text } => parts.push(format!("{text:?}")),
        NodeKind::Container | NodeKind::Picture | NodeKind::Caption => {}
    }
    parts
}

fn format_node(node: &Node, depth: usize, lines: &mut Vec<String>) {
    let details = node_details(node);
    let line = if details.is_empty() {
        format!("{}{}", indent(depth), node.kind.name())
    } else {
        format!("{}{} {}", indent(depth), node.kind.name(), details.join(" "))
    };
    lines.push(line);
    for child in &node.children {
        format_node(child, depth + 1, lines);
    }
}

/// Format a render tree as an indented outline.
pub fn format_tree(tree: &RenderTree) -> Vec<String> {
    let mut lines = Vec::new();
    match tree.root() {
        Some(root) => format_node(root, 0, &mut lines),
        None => lines.push("(empty)".to_string()),
    }
    lines
}

pub fn print_tree(tree: &RenderTree) {
    for line in format_tree(tree) {
        println!("{line}");
    }
}
