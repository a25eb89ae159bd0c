//! Vessel Animation System
//!
//! Easing curves, tweens, and timeline orchestration.
//!
//! # Features
//!
//! - **Easing**: power, elastic, back and cubic-bezier curves, parseable from
//!   GSAP-style names
//! - **Timelines**: ordered steps with overlap offsets and per-element stagger
//! - **Entrance tweens**: animate from a perturbed state back to rest
//! - **Ownership**: one timeline owns an element property at a time, newer
//!   animations supersede older ones
//! - **Revert**: restore pre-animation inline styles at any point

pub mod easing;
pub mod presets;
pub mod properties;
pub mod scheduler;
pub mod target;
pub mod timeline;
pub mod tween;

#[cfg(test)]
pub(crate) mod test_support;

pub use easing::{Easing, EasingParseError};
pub use presets::AnimationPreset;
pub use properties::{KeyframeProperties, Property};
pub use scheduler::{AnimationScheduler, TimelineId};
pub use target::{AnimationTarget, Selector};
pub use timeline::{
    PlayDirection, Position, Timeline, TimelineBuilder, TimelineStep, TweenKind,
};
pub use tween::Tween;
