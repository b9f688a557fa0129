//! Structural class names and the dual-class convention.
//!
//! Every structural node of a figure gets a fixed base class. When the caller
//! supplies a style variant token (`block_class`), the node gets a second
//! class formed as `base--token`, *in addition to* the base class:
//!
//! ```text
//! block_class = ""        →  class="figure"
//! block_class = "hero1"   →  class="figure figure--hero1"
//! ```
//!
//! Consuming stylesheets target both forms, so the base class must never be
//! dropped when a variant is present. All nodes go through [`class_pair`];
//! no other code concatenates class strings.

use serde::Serialize;

/// The six structural slots of a figure, each with a fixed base class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    Container,
    Wrapper,
    Figure,
    Media,
    Caption,
    CaptionText,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Container,
        Slot::Wrapper,
        Slot::Figure,
        Slot::Media,
        Slot::Caption,
        Slot::CaptionText,
    ];

    /// Base class name the stylesheet keys on.
    pub fn base_class(self) -> &'static str {
        match self {
            Slot::Container => "figureContainer",
            Slot::Wrapper => "figureWrapper",
            Slot::Figure => "figure",
            Slot::Media => "figureImage",
            Slot::Caption => "figureCaption",
            Slot::CaptionText => "figureCaptionText",
        }
    }
}

/// Derive the variant suffix from a style token: `"--token"`, or empty.
pub fn style_suffix(block_class: Option<&str>) -> String {
    match block_class {
        Some(token) if !token.is_empty() => format!("--{token}"),
        _ => String::new(),
    }
}

/// Ordered class identifiers for a base name: `[base]` or `[base, base + suffix]`.
pub fn class_pair(base: &str, suffix: &str) -> Vec<String> {
    if suffix.is_empty() {
        vec![base.to_string()]
    } else {
        vec![base.to_string(), format!("{base}{suffix}")]
    }
}

/// Pre-computed class pairs for all six slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotClasses {
    suffix: String,
}

impl SlotClasses {
    pub fn new(block_class: Option<&str>) -> Self {
        Self {
            suffix: style_suffix(block_class),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn for_slot(&self, slot: Slot) -> Vec<String> {
        class_pair(slot.base_class(), &self.suffix)
    }
}
