//! # Figure Composer
//!
//! Renders a single "figure": an image with an optional responsive mobile
//! variant, caption, link and surrounding layout shell. The crate is the
//! decision logic only. It takes a configuration object and produces a
//! typed render tree; the host turns that tree into markup (or uses
//! [`render`] for plain HTML).
//!
//! # Architecture: Resolve → Probe → Compose
//!
//! ```text
//! 1. Resolve   FigureConfig             →  Resolved (Empty | NormalizedFigure)
//! 2. Probe     client viewport width    →  ViewportClass (once per instance)
//! 3. Compose   Resolved + ViewportClass →  RenderTree
//! ```
//!
//! Resolve and compose are pure functions. The probe is the only stateful
//! piece, and its state is a one-way gate owned by each mounted figure
//! ([`instance::MountedFigure`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Configuration types, TOML/JSON loading, layered merge, stock config |
//! | [`classes`] | The six structural base classes and the `base` + `base--variant` pair |
//! | [`resolve`] | Configuration resolver: defaults, empty-source short-circuit, loading normalization |
//! | [`viewport`] | One-shot mobile/desktop probe and the shared 1025px breakpoint |
//! | [`compose`] | Composition engine: mode selection, media/link/caption, structural shell |
//! | [`tree`] | Render tree node types and traversal |
//! | [`instance`] | Mount → paint → re-render-once lifecycle of one figure |
//! | [`render`] | Render tree → HTML using Maud |
//! | [`schema`] | Editor schema describing every accepted config field |
//! | [`output`] | CLI outline formatting of a render tree |
//!
//! # Design Decisions
//!
//! ## One Engine, Explicit Modes
//!
//! Every optional behavior is a field of one [`config::FigureConfig`]. The
//! engine selects one of four modes (`Empty`, `PlainImage`,
//! `ResponsiveMedia`, `HeroBackground`) and one of three shells
//! ([`config::LayoutEmbedding`]) rather than branching on ad-hoc flags.
//!
//! ## Empty Source Renders Nothing
//!
//! A figure without a desktop URL produces an empty tree no matter what else
//! is configured. The check happens in the resolver before anything else is
//! derived.
//!
//! ## The Browser Picks the Source
//!
//! Responsive output always contains both sources behind media queries, so
//! the right image loads even when the viewport is unknown (server render).
//! The probe only refines intrinsic size and loading hints on the fallback
//! image.
//!
//! ## Captions Are Text
//!
//! Captions are escaped and emitted verbatim. No markdown, no HTML
//! passthrough, no trimming: a whitespace-only caption still renders.

pub mod classes;
pub mod compose;
pub mod config;
pub mod instance;
pub mod output;
pub mod render;
pub mod resolve;
pub mod schema;
pub mod tree;
pub mod viewport;

pub use compose::{ComposeMode, compose};
pub use config::{FigureConfig, LayoutEmbedding, LinkTarget, LoadingMode, LoadingPolicy, MediaSource};
pub use instance::MountedFigure;
pub use resolve::{Resolved, resolve};
pub use tree::{Node, NodeKind, RenderTree};
pub use viewport::{ExecutionContext, ViewportClass, ViewportProbe, ViewportSurface};

#[cfg(test)]
pub(crate) mod test_helpers;
