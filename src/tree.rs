//! Render tree produced by the composition engine.
//!
//! A markup-agnostic hierarchy of typed nodes. Each node has a kind with
//! kind-specific attributes, the class identifiers it carries, and its
//! children in document order. Nodes carry data only; turning them into
//! HTML is [`crate::render`]'s job (or the host's).
//!
//! ```text
//! container
//! └── wrapper
//!     └── figure
//!         ├── link            (optional)
//!         │   └── picture     (responsive) / image (plain)
//!         └── caption         (optional)
//!             └── caption-text
//! ```

use crate::config::LoadingMode;
use crate::resolve::FetchPriority;
use serde::Serialize;

/// Target window of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkWindow {
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    NewTab,
}

impl LinkWindow {
    pub fn as_attr(self) -> &'static str {
        match self {
            LinkWindow::SameTab => "_self",
            LinkWindow::NewTab => "_blank",
        }
    }
}

/// Attributes of the inline image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAttrs {
    pub src: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub loading: LoadingMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_priority: Option<&'static str>,
}

impl ImageAttrs {
    pub(crate) fn with_priority(mut self, priority: FetchPriority) -> Self {
        self.fetch_priority = priority.as_attr();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    Container,
    Wrapper {
        #[serde(skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    Figure {
        #[serde(skip_serializing_if = "Option::is_none")]
        background: Option<String>,
    },
    Link {
        href: String,
        target: LinkWindow,
    },
    /// Responsive media: `source` children followed by the fallback `image`.
    Picture,
    Source {
        srcset: String,
        media: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
    },
    Image(ImageAttrs),
    Caption,
    CaptionText {
        text: String,
    },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Wrapper { .. } => "wrapper",
            NodeKind::Figure { .. } => "figure",
            NodeKind::Link { .. } => "link",
            NodeKind::Picture => "picture",
            NodeKind::Source { .. } => "source",
            NodeKind::Image(_) => "image",
            NodeKind::Caption => "caption",
            NodeKind::CaptionText { .. } => "caption-text",
        }
    }

    /// Structural nodes are the ones that carry slot classes.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            NodeKind::Container
                | NodeKind::Wrapper { .. }
                | NodeKind::Figure { .. }
                | NodeKind::Image(_)
                | NodeKind::Caption
                | NodeKind::CaptionText { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        walk_recursive(self, &mut out);
        out
    }
}

fn walk_recursive<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    out.push(node);
    for child in &node.children {
        walk_recursive(child, out);
    }
}

fn path_recursive<'a>(
    node: &'a Node,
    pred: &dyn Fn(&Node) -> bool,
    path: &mut Vec<&'a Node>,
) -> bool {
    path.push(node);
    if pred(node) {
        return true;
    }
    for child in &node.children {
        if path_recursive(child, pred, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// The composed output: no root at all, or a single root node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderTree {
    root: Option<Node>,
}

impl RenderTree {
    pub fn empty() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: Node) -> Self {
        Self { root: Some(root) }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Every node, pre-order. Empty for an empty tree.
    pub fn nodes(&self) -> Vec<&Node> {
        self.root.as_ref().map(Node::walk).unwrap_or_default()
    }

    /// First node (pre-order) matching `pred`.
    pub fn find(&self, pred: impl Fn(&Node) -> bool) -> Option<&Node> {
        self.nodes().into_iter().find(|&n| pred(n))
    }

    /// Nodes from the root down to the first node matching `pred`, inclusive.
    pub fn path_to(&self, pred: impl Fn(&Node) -> bool) -> Option<Vec<&Node>> {
        let root = self.root.as_ref()?;
        let mut path = Vec::new();
        path_recursive(root, &pred, &mut path).then_some(path)
    }
}
