//! Single-element tweens

use crate::easing::Easing;
use crate::properties::{KeyframeProperties, Property};
use vessel_core::ElementId;

/// One element's animation inside a timeline, with concrete start and end values
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: ElementId,
    /// Start time relative to the timeline start
    pub start_ms: f32,
    pub duration_ms: f32,
    pub easing: Easing,
    pub from: KeyframeProperties,
    pub to: KeyframeProperties,
}

impl Tween {
    pub fn end_ms(&self) -> f32 {
        self.start_ms + self.duration_ms
    }

    pub fn has_started(&self, time_ms: f32) -> bool {
        time_ms >= self.start_ms
    }

    /// Linear progress (0.0 to 1.0) at a timeline time
    pub fn progress_at(&self, time_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.has_started(time_ms) { 1.0 } else { 0.0 };
        }
        ((time_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Interpolated properties at a timeline time.
    ///
    /// Endpoints return `from` and `to` exactly.
    pub fn sample(&self, time_ms: f32) -> KeyframeProperties {
        let progress = self.progress_at(time_ms);
        if progress >= 1.0 {
            return self.to;
        }
        if progress <= 0.0 {
            return self.from;
        }
        self.from.lerp(&self.to, self.easing.apply(progress))
    }

    /// Properties this tween animates
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL
            .into_iter()
            .filter(|p| self.from.get(*p).is_some() || self.to.get(*p).is_some())
    }
}
