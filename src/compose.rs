//! Composition engine.
//!
//! A pure function from a resolved configuration and a viewport class to a
//! [`RenderTree`]. Same inputs, same tree.
//!
//! ## Modes
//!
//! | Mode | Condition | Media subtree |
//! |---|---|---|
//! | `Empty` | config resolved to [`Resolved::Empty`] | none, the tree is empty |
//! | `PlainImage` | no mobile source | a single `image` with the desktop source |
//! | `ResponsiveMedia` | mobile source present | `picture` with desktop + mobile `source`s and a fallback `image` |
//! | `HeroBackground` | `hero` set | as above, plus a `background-image` on the wrapper |
//!
//! Both sources are always in a responsive subtree so the browser can pick
//! via media queries even when the viewport class is `Unknown`. The viewport
//! class only refines the fallback image's `src`, intrinsic size and loading
//! hints; `Unknown` is treated like `Desktop`.
//!
//! ## Shell
//!
//! [`LayoutEmbedding`] picks how many ancestors surround the figure:
//! `None` (figure is root), `WrapperOnly`, or `ContainerAndWrapper`. The hero
//! background goes on the wrapper, or on the figure when there is no wrapper.
//! The container never carries it.

use crate::classes::Slot;
use crate::config::LayoutEmbedding;
use crate::resolve::{LoadingAttrs, NormalizedFigure, Resolved, SourceRef};
use crate::tree::{ImageAttrs, LinkWindow, Node, NodeKind, RenderTree};
use crate::viewport::{ViewportClass, desktop_media_query, mobile_media_query};

/// Structural mode selected for one composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeMode {
    Empty,
    PlainImage,
    ResponsiveMedia,
    HeroBackground,
}

/// Pick the mode for a resolved configuration. Hero wins over responsive.
pub fn select_mode(resolved: &Resolved) -> ComposeMode {
    match resolved {
        Resolved::Empty => ComposeMode::Empty,
        Resolved::Figure(f) if f.hero => ComposeMode::HeroBackground,
        Resolved::Figure(f) if f.mobile.is_some() => ComposeMode::ResponsiveMedia,
        Resolved::Figure(_) => ComposeMode::PlainImage,
    }
}

/// Compose the render tree for a figure.
pub fn compose(resolved: &Resolved, viewport: ViewportClass) -> RenderTree {
    let mode = select_mode(resolved);
    tracing::debug!(?mode, ?viewport, "Composing figure");

    let figure = match resolved {
        Resolved::Empty => return RenderTree::empty(),
        Resolved::Figure(f) => &**f,
    };

    let media = wrap_in_link(figure, media_node(figure, viewport));
    let mut figure_children = vec![media];
    if let Some(caption) = caption_node(figure) {
        figure_children.push(caption);
    }

    let background = figure.hero.then(|| hero_background(figure, viewport));
    let (figure_background, wrapper_background) = match figure.embedding {
        LayoutEmbedding::None => (background, None),
        LayoutEmbedding::WrapperOnly | LayoutEmbedding::ContainerAndWrapper => (None, background),
    };

    let figure_node = Node::new(NodeKind::Figure {
        background: figure_background,
    })
    .with_classes(figure.classes.for_slot(Slot::Figure))
    .with_children(figure_children);

    let root = match figure.embedding {
        LayoutEmbedding::None => figure_node,
        LayoutEmbedding::WrapperOnly => wrapper_node(figure, wrapper_background, figure_node),
        LayoutEmbedding::ContainerAndWrapper => Node::new(NodeKind::Container)
            .with_classes(figure.classes.for_slot(Slot::Container))
            .with_child(wrapper_node(figure, wrapper_background, figure_node)),
    };

    RenderTree::with_root(root)
}

fn wrapper_node(figure: &NormalizedFigure, background: Option<String>, child: Node) -> Node {
    Node::new(NodeKind::Wrapper { background })
        .with_classes(figure.classes.for_slot(Slot::Wrapper))
        .with_child(child)
}

/// Inline media: a bare image, or a picture with both sources.
fn media_node(figure: &NormalizedFigure, viewport: ViewportClass) -> Node {
    let loading = loading_for(figure, viewport);

    let Some(mobile) = &figure.mobile else {
        return image_node(figure, &figure.desktop, loading);
    };

    let fallback = match viewport {
        ViewportClass::Mobile => mobile,
        ViewportClass::Desktop | ViewportClass::Unknown => &figure.desktop,
    };

    Node::new(NodeKind::Picture)
        .with_child(source_node(&figure.desktop, desktop_media_query()))
        .with_child(source_node(mobile, mobile_media_query()))
        .with_child(image_node(figure, fallback, loading))
}

fn source_node(source: &SourceRef, media: String) -> Node {
    Node::new(NodeKind::Source {
        srcset: source.url.clone(),
        media,
        width: source.width,
        height: source.height,
    })
}

fn image_node(figure: &NormalizedFigure, source: &SourceRef, loading: LoadingAttrs) -> Node {
    let attrs = ImageAttrs {
        src: source.url.clone(),
        alt: figure.alt.clone(),
        width: source.width,
        height: source.height,
        loading: loading.mode,
        fetch_priority: None,
    }
    .with_priority(loading.fetch_priority);
    Node::new(NodeKind::Image(attrs)).with_classes(figure.classes.for_slot(Slot::Media))
}

fn loading_for(figure: &NormalizedFigure, viewport: ViewportClass) -> LoadingAttrs {
    match (viewport, figure.mobile_loading) {
        (ViewportClass::Mobile, Some(mobile)) => mobile,
        _ => figure.loading,
    }
}

/// Wrap the media in a link only when the link URL is non-empty.
fn wrap_in_link(figure: &NormalizedFigure, media: Node) -> Node {
    match &figure.link {
        Some(link) if !link.url.is_empty() => {
            let target = if link.open_in_new_tab {
                LinkWindow::NewTab
            } else {
                LinkWindow::SameTab
            };
            Node::new(NodeKind::Link {
                href: link.url.clone(),
                target,
            })
            .with_child(media)
        }
        _ => media,
    }
}

/// Caption shell and inner text. Not trimmed: `"  "` renders.
fn caption_node(figure: &NormalizedFigure) -> Option<Node> {
    if figure.caption.is_empty() {
        return None;
    }
    let text = Node::new(NodeKind::CaptionText {
        text: figure.caption.clone(),
    })
    .with_classes(figure.classes.for_slot(Slot::CaptionText));
    Some(
        Node::new(NodeKind::Caption)
            .with_classes(figure.classes.for_slot(Slot::Caption))
            .with_child(text),
    )
}

/// `background-image` declaration for hero mode.
///
/// Uses the mobile source on a mobile viewport when one exists, otherwise
/// the desktop source.
fn hero_background(figure: &NormalizedFigure, viewport: ViewportClass) -> String {
    let url = match (viewport, &figure.mobile) {
        (ViewportClass::Mobile, Some(mobile)) => &mobile.url,
        _ => &figure.desktop.url,
    };
    format!("background-image: url(\"{}\")", css_url_escape(url))
}

/// Percent-encode the characters that would end or break a quoted CSS `url()`.
fn css_url_escape(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '"' => out.push_str("%22"),
            '\\' => out.push_str("%5C"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            '\x0C' => out.push_str("%0C"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FigureConfig, LinkTarget, LoadingMode, LoadingPolicy, MediaSource};
    use crate::resolve::resolve;
    use crate::test_helpers::*;

    fn config(desktop: &str) -> FigureConfig {
        FigureConfig {
            image: MediaSource {
                desktop_url: desktop.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn responsive() -> FigureConfig {
        let mut c = config("d.jpg");
        c.image.mobile_url = Some("m.jpg".into());
        c.image.desktop_width = Some(1920);
        c.image.desktop_height = Some(600);
        c.image.mobile_width = Some(750);
        c.image.mobile_height = Some(900);
        c
    }

    fn run(c: &FigureConfig, viewport: ViewportClass) -> RenderTree {
        compose(&resolve(c), viewport)
    }

    // =========================================================================
    // Mode selection
    // =========================================================================

    #[test]
    fn mode_empty_without_desktop() {
        assert_eq!(select_mode(&resolve(&config(""))), ComposeMode::Empty);
    }

    #[test]
    fn mode_plain_without_mobile() {
        assert_eq!(
            select_mode(&resolve(&config("d.jpg"))),
            ComposeMode::PlainImage
        );
    }

    #[test]
    fn mode_responsive_with_mobile() {
        assert_eq!(
            select_mode(&resolve(&responsive())),
            ComposeMode::ResponsiveMedia
        );
    }

    #[test]
    fn mode_hero_takes_precedence() {
        let mut c = responsive();
        c.hero = true;
        assert_eq!(select_mode(&resolve(&c)), ComposeMode::HeroBackground);
    }

    // =========================================================================
    // Media
    // =========================================================================

    #[test]
    fn empty_desktop_gives_empty_tree() {
        let mut c = responsive();
        c.image.desktop_url = String::new();
        c.caption = Some("caption".into());
        c.hero = true;
        assert!(run(&c, ViewportClass::Mobile).is_empty());
    }

    #[test]
    fn plain_image_uses_desktop_only() {
        let mut c = config("d.jpg");
        c.alt = Some("A lake".into());
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(count_kind(&tree, "image"), 1);
        assert_eq!(count_kind(&tree, "picture"), 0);
        let img = image_attrs(&tree);
        assert_eq!(img.src, "d.jpg");
        assert_eq!(img.alt, "A lake");
        assert_eq!(img.loading, LoadingMode::Lazy);
        assert_eq!(img.fetch_priority, None);
    }

    #[test]
    fn responsive_contains_both_sources_when_unknown() {
        let tree = run(&responsive(), ViewportClass::Unknown);
        assert_eq!(source_srcsets(&tree), vec!["d.jpg", "m.jpg"]);
        let img = image_attrs(&tree);
        assert_eq!(img.src, "d.jpg");
        assert_eq!((img.width, img.height), (Some(1920), Some(600)));
    }

    #[test]
    fn responsive_source_media_queries() {
        let tree = run(&responsive(), ViewportClass::Desktop);
        let medias: Vec<String> = find_all(&tree, "source")
            .into_iter()
            .map(|n| match &n.kind {
                NodeKind::Source { media, .. } => media.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(medias, vec!["(min-width:1026px)", "(max-width:1025px)"]);
    }

    #[test]
    fn responsive_mobile_viewport_uses_mobile_fallback() {
        let tree = run(&responsive(), ViewportClass::Mobile);
        assert_eq!(source_srcsets(&tree), vec!["d.jpg", "m.jpg"]);
        let img = image_attrs(&tree);
        assert_eq!(img.src, "m.jpg");
        assert_eq!((img.width, img.height), (Some(750), Some(900)));
    }

    #[test]
    fn mobile_viewport_without_mobile_dimensions_omits_size() {
        let mut c = responsive();
        c.image.mobile_width = None;
        c.image.mobile_height = None;
        let tree = run(&c, ViewportClass::Mobile);
        let img = image_attrs(&tree);
        assert_eq!((img.width, img.height), (None, None));
    }

    #[test]
    fn plain_image_ignores_viewport_for_size() {
        let mut c = config("d.jpg");
        c.image.desktop_width = Some(1200);
        let tree = run(&c, ViewportClass::Mobile);
        let img = image_attrs(&tree);
        assert_eq!(img.src, "d.jpg");
        assert_eq!(img.width, Some(1200));
    }

    #[test]
    fn legacy_priority_sets_fetch_priority() {
        let mut c = config("d.jpg");
        c.loading = Some(LoadingPolicy::Priority(true));
        let tree = run(&c, ViewportClass::Unknown);
        let img = image_attrs(&tree);
        assert_eq!(img.loading, LoadingMode::Eager);
        assert_eq!(img.fetch_priority, Some("high"));
    }

    #[test]
    fn mobile_loading_applies_only_on_mobile() {
        let mut c = responsive();
        c.loading = Some(LoadingPolicy::Mode(LoadingMode::Lazy));
        c.mobile_loading = Some(LoadingPolicy::Priority(true));

        let desktop_tree = run(&c, ViewportClass::Desktop);
        let desktop = image_attrs(&desktop_tree);
        assert_eq!(desktop.loading, LoadingMode::Lazy);
        assert_eq!(desktop.fetch_priority, None);

        let unknown_tree = run(&c, ViewportClass::Unknown);
        let unknown = image_attrs(&unknown_tree);
        assert_eq!(unknown.loading, LoadingMode::Lazy);

        let mobile_tree = run(&c, ViewportClass::Mobile);
        let mobile = image_attrs(&mobile_tree);
        assert_eq!(mobile.loading, LoadingMode::Eager);
        assert_eq!(mobile.fetch_priority, Some("high"));
    }

    // =========================================================================
    // Link
    // =========================================================================

    #[test]
    fn link_wraps_media() {
        let mut c = responsive();
        c.link = Some(LinkTarget {
            url: "/sale".into(),
            open_in_new_tab: false,
        });
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            path_kinds(&tree, "picture"),
            vec!["container", "wrapper", "figure", "link", "picture"]
        );
        let link = find_kind(&tree, "link");
        assert_eq!(
            link.kind,
            NodeKind::Link {
                href: "/sale".into(),
                target: LinkWindow::SameTab
            }
        );
    }

    #[test]
    fn link_new_tab_targets_blank() {
        let mut c = config("d.jpg");
        c.link = Some(LinkTarget {
            url: "https://example.com".into(),
            open_in_new_tab: true,
        });
        let tree = run(&c, ViewportClass::Unknown);
        assert!(matches!(
            find_kind(&tree, "link").kind,
            NodeKind::Link {
                target: LinkWindow::NewTab,
                ..
            }
        ));
    }

    #[test]
    fn empty_link_url_is_not_wrapped() {
        let mut c = config("d.jpg");
        c.link = Some(LinkTarget {
            url: String::new(),
            open_in_new_tab: true,
        });
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(count_kind(&tree, "link"), 0);
    }

    // =========================================================================
    // Caption
    // =========================================================================

    #[test]
    fn caption_follows_media_inside_figure() {
        let mut c = config("d.jpg");
        c.caption = Some("Sunset".into());
        c.embedding = LayoutEmbedding::None;
        let tree = run(&c, ViewportClass::Unknown);
        let root = tree.root().unwrap();
        let kinds: Vec<&str> = root.children.iter().map(|n| n.kind.name()).collect();
        assert_eq!(kinds, vec!["image", "caption"]);
        assert_eq!(
            path_kinds(&tree, "caption-text"),
            vec!["figure", "caption", "caption-text"]
        );
    }

    #[test]
    fn empty_caption_renders_nothing() {
        let mut c = config("d.jpg");
        c.caption = Some(String::new());
        assert_eq!(count_kind(&run(&c, ViewportClass::Unknown), "caption"), 0);
    }

    #[test]
    fn whitespace_caption_renders() {
        let mut c = config("d.jpg");
        c.caption = Some("  ".into());
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            find_kind(&tree, "caption-text").kind,
            NodeKind::CaptionText { text: "  ".into() }
        );
    }

    // =========================================================================
    // Shell and hero
    // =========================================================================

    #[test]
    fn embedding_shapes() {
        let mut c = config("d.jpg");
        c.embedding = LayoutEmbedding::None;
        assert_eq!(
            path_kinds(&run(&c, ViewportClass::Unknown), "figure"),
            vec!["figure"]
        );

        c.embedding = LayoutEmbedding::WrapperOnly;
        assert_eq!(
            path_kinds(&run(&c, ViewportClass::Unknown), "figure"),
            vec!["wrapper", "figure"]
        );

        c.embedding = LayoutEmbedding::ContainerAndWrapper;
        assert_eq!(
            path_kinds(&run(&c, ViewportClass::Unknown), "figure"),
            vec!["container", "wrapper", "figure"]
        );
    }

    #[test]
    fn hero_background_on_wrapper_not_container() {
        let mut c = config("d.jpg");
        c.hero = true;
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            find_kind(&tree, "wrapper").kind,
            NodeKind::Wrapper {
                background: Some("background-image: url(\"d.jpg\")".into())
            }
        );
        assert_eq!(find_kind(&tree, "container").kind, NodeKind::Container);
        assert_eq!(
            find_kind(&tree, "figure").kind,
            NodeKind::Figure { background: None }
        );
        // The inline image stays for semantics.
        assert_eq!(count_kind(&tree, "image"), 1);
    }

    #[test]
    fn hero_background_prefers_mobile_on_mobile() {
        let mut c = responsive();
        c.hero = true;
        c.embedding = LayoutEmbedding::WrapperOnly;
        let mobile = run(&c, ViewportClass::Mobile);
        assert_eq!(
            find_kind(&mobile, "wrapper").kind,
            NodeKind::Wrapper {
                background: Some("background-image: url(\"m.jpg\")".into())
            }
        );
        let desktop = run(&c, ViewportClass::Desktop);
        assert_eq!(
            find_kind(&desktop, "wrapper").kind,
            NodeKind::Wrapper {
                background: Some("background-image: url(\"d.jpg\")".into())
            }
        );
        assert_eq!(count_kind(&desktop, "picture"), 1);
    }

    #[test]
    fn hero_without_shell_styles_figure() {
        let mut c = config("d.jpg");
        c.hero = true;
        c.embedding = LayoutEmbedding::None;
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            tree.root().unwrap().kind,
            NodeKind::Figure {
                background: Some("background-image: url(\"d.jpg\")".into())
            }
        );
    }

    #[test]
    fn hero_background_escapes_quotes() {
        let mut c = config("a\"b.jpg");
        c.hero = true;
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            find_kind(&tree, "wrapper").kind,
            NodeKind::Wrapper {
                background: Some("background-image: url(\"a%22b.jpg\")".into())
            }
        );
    }

    #[test]
    fn hero_background_escapes_backslash_and_newlines() {
        let mut c = config("a\\b\nc\rd.jpg");
        c.hero = true;
        c.embedding = LayoutEmbedding::None;
        let tree = run(&c, ViewportClass::Unknown);
        assert_eq!(
            tree.root().unwrap().kind,
            NodeKind::Figure {
                background: Some("background-image: url(\"a%5Cb%0Ac%0Dd.jpg\")".into())
            }
        );
    }

    #[test]
    fn css_url_escape_leaves_plain_urls_alone() {
        assert_eq!(
            css_url_escape("https://cdn.example.com/a b(1).jpg?w=800&h=600"),
            "https://cdn.example.com/a b(1).jpg?w=800&h=600"
        );
        assert_eq!(css_url_escape("\"\\\n"), "%22%5C%0A");
    }

    // =========================================================================
    // Classes
    // =========================================================================

    #[test]
    fn variant_applies_to_every_structural_node() {
        let mut c = responsive();
        c.block_class = Some("home".into());
        c.caption = Some("Caption".into());
        c.link = Some(LinkTarget {
            url: "/x".into(),
            open_in_new_tab: false,
        });
        let tree = run(&c, ViewportClass::Mobile);
        assert_dual_classes(&tree, "home");
        assert_eq!(
            find_kind(&tree, "caption-text").classes,
            vec!["figureCaptionText", "figureCaptionText--home"]
        );
    }

    #[test]
    fn no_variant_gives_base_only() {
        let mut c = config("d.jpg");
        c.caption = Some("Caption".into());
        let tree = run(&c, ViewportClass::Unknown);
        for node in tree.nodes().into_iter().filter(|n| n.kind.is_structural()) {
            assert_eq!(node.classes.len(), 1, "{}", node.kind.name());
        }
        assert_eq!(find_kind(&tree, "image").classes, vec!["figureImage"]);
    }

    #[test]
    fn compose_is_idempotent() {
        let mut c = responsive();
        c.caption = Some("x".into());
        c.hero = true;
        let resolved = resolve(&c);
        for viewport in [
            ViewportClass::Unknown,
            ViewportClass::Mobile,
            ViewportClass::Desktop,
        ] {
            assert_eq!(compose(&resolved, viewport), compose(&resolved, viewport));
        }
    }
}
