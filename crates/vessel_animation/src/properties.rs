//! Animated visual properties
//!
//! `KeyframeProperties` doubles as an element's inline style: a property set
//! to `None` is not applied inline and renders at its rest value.

/// A single animatable property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    Rotate,
    RotateX,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Property::Opacity,
        Property::TranslateX,
        Property::TranslateY,
        Property::Scale,
        Property::Rotate,
        Property::RotateX,
    ];

    /// Value of the property when nothing is applied inline
    pub fn rest_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale => 1.0,
            Property::TranslateX | Property::TranslateY | Property::Rotate | Property::RotateX => {
                0.0
            }
        }
    }

    /// CSS-ish name, used in logs and reports
    pub fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::TranslateX => "x",
            Property::TranslateY => "y",
            Property::Scale => "scale",
            Property::Rotate => "rotate",
            Property::RotateX => "rotateX",
        }
    }
}

/// Properties that can be animated on an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Translation X in pixels
    pub translate_x: Option<f32>,
    /// Translation Y in pixels
    pub translate_y: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation in degrees (Z-axis)
    pub rotate: Option<f32>,
    /// Rotation X in degrees (3D tilt)
    pub rotate_x: Option<f32>,
}

impl KeyframeProperties {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with uniform scale
    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    /// Builder: set Y translation only
    pub fn with_translate_y(mut self, y: f32) -> Self {
        self.translate_y = Some(y);
        self
    }

    /// Builder: set rotation
    pub fn with_rotate(mut self, degrees: f32) -> Self {
        self.rotate = Some(degrees);
        self
    }

    /// Builder: set X rotation (3D tilt)
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        match property {
            Property::Opacity => self.opacity,
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Scale => self.scale,
            Property::Rotate => self.rotate,
            Property::RotateX => self.rotate_x,
        }
    }

    pub fn set(&mut self, property: Property, value: Option<f32>) {
        let slot = match property {
            Property::Opacity => &mut self.opacity,
            Property::TranslateX => &mut self.translate_x,
            Property::TranslateY => &mut self.translate_y,
            Property::Scale => &mut self.scale,
            Property::Rotate => &mut self.rotate,
            Property::RotateX => &mut self.rotate_x,
        };
        *slot = value;
    }

    /// Value of a property, falling back to its rest value
    pub fn resolved(&self, property: Property) -> f32 {
        self.get(property).unwrap_or_else(|| property.rest_value())
    }

    /// Iterate over the properties that are set
    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .into_iter()
            .filter_map(move |property| self.get(property).map(|value| (property, value)))
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Whether the element renders exactly as it would with no inline style
    pub fn is_at_rest(&self) -> bool {
        self.iter().all(|(property, value)| value == property.rest_value())
    }

    /// Take the resolved values of `self` for every property set in `mask`
    pub fn resolved_for(&self, mask: &KeyframeProperties) -> KeyframeProperties {
        let mut out = KeyframeProperties::default();
        for (property, _) in mask.iter() {
            out.set(property, Some(self.resolved(property)));
        }
        out
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate: lerp_opt(self.rotate, other.rotate, t),
            rotate_x: lerp_opt(self.rotate_x, other.rotate_x, t),
        }
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
