//! HTML rendering of a render tree.
//!
//! Stands in for the host's rendering layer: maps each node kind to its
//! element and emits the attributes the node carries.
//!
//! | Node | Element |
//! |---|---|
//! | container, wrapper | `div` |
//! | figure | `figure` |
//! | link | `a` |
//! | picture / source / image | `picture` / `source` / `img` |
//! | caption / caption-text | `figcaption` / `span` |
//!
//! Uses [maud](https://maud.lambda.xyz/), so caption text and every
//! attribute value are escaped. Captions are plain text; nothing here
//! parses markdown or passes markup through.

use crate::tree::{LinkWindow, Node, NodeKind, RenderTree};
use maud::{Markup, html};

/// Render a tree to markup. An empty tree renders to nothing.
pub fn to_markup(tree: &RenderTree) -> Markup {
    html! {
        @if let Some(root) = tree.root() {
            (render_node(root))
        }
    }
}

/// Render a tree straight to an HTML string.
pub fn to_html(tree: &RenderTree) -> String {
    to_markup(tree).into_string()
}

/// Space-separated class list, or `None` when the node has no classes.
fn class_attr(classes: &[String]) -> Option<String> {
    (!classes.is_empty()).then(|| classes.join(" "))
}

fn render_node(node: &Node) -> Markup {
    let class = class_attr(&node.classes);
    let children = html! {
        @for child in &node.children {
            (render_node(child))
        }
    };

    match &node.kind {
        NodeKind::Container => html! {
            div class=[class] { (children) }
        },
        NodeKind::Wrapper { background } => html! {
            div class=[class] style=[background.as_deref()] { (children) }
        },
        NodeKind::Figure { background } => html! {
            figure class=[class] style=[background.as_deref()] { (children) }
        },
        NodeKind::Link { href, target } => {
            let rel = (*target == LinkWindow::NewTab).then_some("noopener noreferrer");
            html! {
                a href=(href) target=(target.as_attr()) rel=[rel] { (children) }
            }
        }
        NodeKind::Picture => html! {
            picture { (children) }
        },
        NodeKind::Source {
            srcset,
            media,
            width,
            height,
        } => html! {
            source srcset=(srcset) media=(media) width=[*width] height=[*height];
        },
        NodeKind::Image(attrs) => html! {
            img class=[class]
                src=(attrs.src)
                alt=(attrs.alt)
                width=[attrs.width]
                height=[attrs.height]
                loading=(attrs.loading.as_str())
                fetchpriority=[attrs.fetch_priority];
        },
        NodeKind::Caption => html! {
            figcaption class=[class] { (children) }
        },
        NodeKind::CaptionText { text } => html! {
            span class=[class] { (text) }
        },
    }
}
