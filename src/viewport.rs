//! Viewport probe: one-shot mobile/desktop classification.
//!
//! The probe reads the client viewport width once, after the first paint,
//! and never again for the lifetime of the mounted figure. Resizing the
//! window later does not change the classification; the browser's own media
//! query evaluation on `<source>` elements handles the actual source swap.
//!
//! The breakpoint is shared with the composition engine's media queries, both
//! derived from [`MOBILE_MAX_WIDTH`]:
//!
//! ```text
//! width <= 1025  →  mobile   (max-width:1025px)
//! width >  1025  →  desktop  (min-width:1026px)
//! ```

use serde::Serialize;

/// Largest viewport width, in CSS pixels, classified as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 1025;

/// Media query selecting the mobile source.
pub fn mobile_media_query() -> String {
    format!("(max-width:{MOBILE_MAX_WIDTH}px)")
}

/// Media query selecting the desktop source.
pub fn desktop_media_query() -> String {
    format!("(min-width:{}px)", MOBILE_MAX_WIDTH + 1)
}

/// Coarse viewport bucket. `Unknown` until the probe has run on a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    #[default]
    Unknown,
    Mobile,
    Desktop,
}

/// Classify a viewport width against the shared breakpoint.
pub fn classify_width(width: u32) -> ViewportClass {
    if width <= MOBILE_MAX_WIDTH {
        ViewportClass::Mobile
    } else {
        ViewportClass::Desktop
    }
}

/// Live viewport geometry of a client display surface.
pub trait ViewportSurface {
    /// Current inner width in CSS pixels.
    fn inner_width(&self) -> u32;
}

/// A surface with a fixed width, e.g. from a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSurface(pub u32);

impl ViewportSurface for FixedSurface {
    fn inner_width(&self) -> u32 {
        self.0
    }
}

/// Where the figure is being rendered.
#[derive(Clone, Copy)]
pub enum ExecutionContext<'a> {
    /// Server-side or otherwise headless: no display surface exists.
    Server,
    /// A client with a live viewport.
    Client(&'a dyn ViewportSurface),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProbeState {
    Unresolved,
    Resolved(ViewportClass),
}

/// One-shot classification gate owned by a single mounted figure.
///
/// `Unresolved → Resolved` is the only transition. Once resolved, every
/// [`classify`](Self::classify) call returns the stored class without
/// touching the surface.
#[derive(Debug, Clone)]
pub struct ViewportProbe {
    state: ProbeState,
}

impl Default for ViewportProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportProbe {
    pub fn new() -> Self {
        Self {
            state: ProbeState::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, ProbeState::Resolved(_))
    }

    /// The classification so far, without probing.
    pub fn current(&self) -> ViewportClass {
        match self.state {
            ProbeState::Unresolved => ViewportClass::Unknown,
            ProbeState::Resolved(class) => class,
        }
    }

    /// Classify the viewport, reading geometry at most once.
    ///
    /// In a server context this is a no-op returning `Unknown`, and the gate
    /// stays open so a later client-side call can still resolve it.
    pub fn classify(&mut self, ctx: ExecutionContext<'_>) -> ViewportClass {
        if let ProbeState::Resolved(class) = self.state {
            return class;
        }
        match ctx {
            ExecutionContext::Server => ViewportClass::Unknown,
            ExecutionContext::Client(surface) => {
                let width = surface.inner_width();
                let class = classify_width(width);
                tracing::debug!(width, ?class, "Viewport classified");
                self.state = ProbeState::Resolved(class);
                class
            }
        }
    }
}
