//! Lifecycle of one mounted figure.
//!
//! ```text
//! mount()          render #1 with viewport Unknown
//!   │
//! after_paint()    probe runs (client only) → render #2 with the class
//!   │
//! after_paint()…   no-op: the probe is resolved, nothing re-renders
//! ```
//!
//! Each instance owns its probe; nothing is shared between figures.

use crate::compose::compose;
use crate::config::FigureConfig;
use crate::resolve::{Resolved, resolve};
use crate::tree::RenderTree;
use crate::viewport::{ExecutionContext, ViewportClass, ViewportProbe};

#[derive(Debug, Clone)]
pub struct MountedFigure {
    resolved: Resolved,
    probe: ViewportProbe,
    renders: u32,
    tree: RenderTree,
}

impl MountedFigure {
    /// Resolve the config and produce the initial render.
    pub fn mount(config: &FigureConfig) -> Self {
        let resolved = resolve(config);
        let tree = compose(&resolved, ViewportClass::Unknown);
        Self {
            resolved,
            probe: ViewportProbe::new(),
            renders: 1,
            tree,
        }
    }

    /// Run the probe after a paint. Returns the new tree the first time the
    /// classification resolves, `None` on every other call.
    pub fn after_paint(&mut self, ctx: ExecutionContext<'_>) -> Option<&RenderTree> {
        if self.probe.is_resolved() {
            return None;
        }
        let class = self.probe.classify(ctx);
        if !self.probe.is_resolved() {
            return None;
        }
        self.tree = compose(&self.resolved, class);
        self.renders += 1;
        tracing::debug!(?class, renders = self.renders, "Figure re-rendered");
        Some(&self.tree)
    }

    /// The most recent render.
    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn viewport(&self) -> ViewportClass {
        self.probe.current()
    }

    pub fn render_count(&self) -> u32 {
        self.renders
    }
}
