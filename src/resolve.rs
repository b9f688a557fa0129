//! Configuration resolver.
//!
//! Turns a raw [`FigureConfig`] into the normalized form the composition
//! engine consumes. Pure and total: no I/O, no errors.
//!
//! The empty-source check runs first. A config without a desktop URL
//! becomes [`Resolved::Empty`] and nothing else is derived from it.
//!
//! Preconditions are the host's business: the config is assumed well typed
//! (serde already guarantees that for anything loaded through [`crate::config`]).

use crate::classes::SlotClasses;
use crate::config::{FigureConfig, LayoutEmbedding, LinkTarget, LoadingMode, LoadingPolicy};

/// Fetch priority hint; `Unset` emits no attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPriority {
    Low,
    High,
    Unset,
}

impl FetchPriority {
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            FetchPriority::Low => Some("low"),
            FetchPriority::High => Some("high"),
            FetchPriority::Unset => None,
        }
    }
}

/// Canonical loading attributes, whichever policy shape produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingAttrs {
    pub mode: LoadingMode,
    pub fetch_priority: FetchPriority,
}

impl Default for LoadingAttrs {
    fn default() -> Self {
        Self {
            mode: LoadingMode::Lazy,
            fetch_priority: FetchPriority::Unset,
        }
    }
}

impl From<LoadingPolicy> for LoadingAttrs {
    fn from(policy: LoadingPolicy) -> Self {
        match policy {
            LoadingPolicy::Priority(true) => Self {
                mode: LoadingMode::Eager,
                fetch_priority: FetchPriority::High,
            },
            LoadingPolicy::Priority(false) => Self {
                mode: LoadingMode::Lazy,
                fetch_priority: FetchPriority::Low,
            },
            LoadingPolicy::Mode(mode) => Self {
                mode,
                fetch_priority: FetchPriority::Unset,
            },
        }
    }
}

/// One image source with its optional intrinsic size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A figure with a usable desktop source.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFigure {
    pub desktop: SourceRef,
    /// Present only when the mobile URL is non-empty.
    pub mobile: Option<SourceRef>,
    /// Passed through untouched; the engine decides on URL emptiness.
    pub link: Option<LinkTarget>,
    /// Empty string means no caption.
    pub caption: String,
    pub alt: String,
    pub classes: SlotClasses,
    pub loading: LoadingAttrs,
    pub mobile_loading: Option<LoadingAttrs>,
    pub hero: bool,
    pub embedding: LayoutEmbedding,
}

/// Output of [`resolve`]: either the empty sentinel or a figure to compose.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Empty,
    Figure(Box<NormalizedFigure>),
}

impl Resolved {
    pub fn is_empty(&self) -> bool {
        matches!(self, Resolved::Empty)
    }
}

/// Normalize a raw configuration.
pub fn resolve(raw: &FigureConfig) -> Resolved {
    if raw.image.desktop_url.is_empty() {
        tracing::debug!("No desktop source, resolving to empty figure");
        return Resolved::Empty;
    }

    let image = &raw.image;
    let mobile = image
        .mobile_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| SourceRef {
            url: url.to_string(),
            width: image.mobile_width,
            height: image.mobile_height,
        });

    Resolved::Figure(Box::new(NormalizedFigure {
        desktop: SourceRef {
            url: image.desktop_url.clone(),
            width: image.desktop_width,
            height: image.desktop_height,
        },
        mobile,
        link: raw.link.clone(),
        caption: raw.caption.clone().unwrap_or_default(),
        alt: raw.alt.clone().unwrap_or_default(),
        classes: SlotClasses::new(raw.block_class.as_deref()),
        loading: raw.loading.map(LoadingAttrs::from).unwrap_or_default(),
        mobile_loading: raw.mobile_loading.map(LoadingAttrs::from),
        hero: raw.hero,
        embedding: raw.embedding,
    }))
}
