//! Vessel Layout Engine
//!
//! Page document with flexbox layout powered by Taffy, plus the
//! viewport-driven pieces built on it: scroll triggers and magnetic
//! pointer-follow.

pub mod builder;
pub mod document;
pub mod magnetic;
pub mod refs;
pub mod scroll_trigger;
pub mod stage;
pub mod tree;
pub mod viewport;

pub use builder::{div, el, text, ElementBuilder};
pub use document::{Document, Element};
pub use magnetic::{MagneticConfig, MagneticGroup, MAGNETIC_CLASS};
pub use refs::ElementRefs;
pub use scroll_trigger::{
    ReplayPolicy, TriggerCallback, TriggerConfig, TriggerEvent, TriggerHost, TriggerId,
    TriggerRegistry, TriggerState,
};
pub use stage::Stage;
pub use tree::LayoutTree;
pub use viewport::{Anchor, AnchorParseError, ScrollAnchor, Viewport};
