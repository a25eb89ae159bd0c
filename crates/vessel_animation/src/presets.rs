//! Animation presets for common entrance states
//!
//! Each preset is the perturbed starting state of a `TimelineStep::from`
//! step; the element animates from it back to its resting values.

use crate::properties::KeyframeProperties;

/// Pre-built entrance states
pub struct AnimationPreset;

impl AnimationPreset {
    /// Fully transparent
    pub fn fade_in() -> KeyframeProperties {
        KeyframeProperties::opacity(0.0)
    }

    /// Transparent and pushed down by `distance`
    pub fn rise(distance: f32) -> KeyframeProperties {
        KeyframeProperties::default()
            .with_translate_y(distance)
            .with_opacity(0.0)
    }

    /// Transparent and pulled up by `distance`
    pub fn drop(distance: f32) -> KeyframeProperties {
        Self::rise(-distance)
    }

    /// Transparent and scaled to `scale`
    pub fn pop(scale: f32) -> KeyframeProperties {
        KeyframeProperties::default()
            .with_scale(scale)
            .with_opacity(0.0)
    }

    /// Rise combined with a scale-up
    pub fn rise_scaled(distance: f32, scale: f32) -> KeyframeProperties {
        Self::rise(distance).with_scale(scale)
    }

    /// Rise while tilting up from `degrees` around the X axis
    pub fn flip_up(distance: f32, degrees: f32) -> KeyframeProperties {
        Self::rise(distance).with_rotate_x(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_start_hidden() {
        for preset in [
            AnimationPreset::fade_in(),
            AnimationPreset::rise(60.0),
            AnimationPreset::drop(80.0),
            AnimationPreset::pop(0.8),
            AnimationPreset::rise_scaled(80.0, 0.9),
            AnimationPreset::flip_up(200.0, 90.0),
        ] {
            assert_eq!(preset.opacity, Some(0.0));
        }
    }

    #[test]
    fn test_drop_moves_up() {
        assert_eq!(AnimationPreset::drop(80.0).translate_y, Some(-80.0));
        assert_eq!(AnimationPreset::drop(80.0).translate_x, None);
    }
}
