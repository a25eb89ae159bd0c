//! Easing functions for animations

use std::f32::consts::TAU;
use std::str::FromStr;
use thiserror::Error;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    /// Decaying sine oscillation that overshoots the target before settling
    ElasticOut { amplitude: f32, period: f32 },
    /// Single overshoot past the target
    BackOut { overshoot: f32 },
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// `elastic.out(1, 0.3)`
    pub const ELASTIC: Easing = Easing::ElasticOut {
        amplitude: 1.0,
        period: 0.3,
    };

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::EaseInQuint => t.powi(5),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseInOutQuint => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, *amplitude, *period),
            Easing::BackOut { overshoot } => back_out(t, *overshoot),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Errors produced when parsing an easing identifier
#[derive(Debug, Error, PartialEq)]
pub enum EasingParseError {
    #[error("unknown easing `{0}`")]
    Unknown(String),
    #[error("invalid parameters for easing `{0}`")]
    InvalidParameters(String),
}

impl FromStr for Easing {
    type Err = EasingParseError;

    /// Parse GSAP-style identifiers such as `power3.out`, `quad.inOut`,
    /// `elastic.out(1, 0.3)`, `back.out(1.7)` or `cubic-bezier(0.2, 0, 0, 1)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let invalid = || EasingParseError::InvalidParameters(s.trim().to_string());

        let (name, params) = match normalized.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.strip_suffix(')').ok_or_else(invalid)?;
                let params = inner
                    .split(',')
                    .map(|p| p.trim())
                    .filter(|p| !p.is_empty())
                    .map(|p| p.parse::<f32>().map_err(|_| invalid()))
                    .collect::<Result<Vec<_>, _>>()?;
                (name.trim(), params)
            }
            None => (normalized.as_str(), Vec::new()),
        };

        let (family, variant) = name.split_once('.').unwrap_or((name, "out"));
        let unknown = || EasingParseError::Unknown(s.trim().to_string());

        let degree = match family {
            "none" | "linear" | "power0" => {
                return params.is_empty().then_some(Easing::Linear).ok_or_else(invalid)
            }
            "power1" | "quad" => 2,
            "power2" | "cubic" => 3,
            "power3" | "quart" => 4,
            "power4" | "quint" | "strong" => 5,
            "elastic" => {
                if variant != "out" {
                    return Err(unknown());
                }
                let amplitude = params.first().copied().unwrap_or(1.0);
                let period = params.get(1).copied().unwrap_or(0.3);
                if params.len() > 2 || amplitude <= 0.0 || period <= 0.0 {
                    return Err(invalid());
                }
                return Ok(Easing::ElasticOut { amplitude, period });
            }
            "back" => {
                if variant != "out" {
                    return Err(unknown());
                }
                if params.len() > 1 {
                    return Err(invalid());
                }
                let overshoot = params.first().copied().unwrap_or(1.70158);
                return Ok(Easing::BackOut { overshoot });
            }
            "cubic-bezier" => {
                return match params[..] {
                    [x1, y1, x2, y2] => Ok(Easing::CubicBezier(x1, y1, x2, y2)),
                    _ => Err(invalid()),
                };
            }
            _ => return Err(unknown()),
        };

        if !params.is_empty() {
            return Err(invalid());
        }

        let easing = match (degree, variant) {
            (2, "in") => Easing::EaseInQuad,
            (2, "out") => Easing::EaseOutQuad,
            (2, "inout") => Easing::EaseInOutQuad,
            (3, "in") => Easing::EaseInCubic,
            (3, "out") => Easing::EaseOutCubic,
            (3, "inout") => Easing::EaseInOutCubic,
            (4, "in") => Easing::EaseInQuart,
            (4, "out") => Easing::EaseOutQuart,
            (4, "inout") => Easing::EaseInOutQuart,
            (5, "in") => Easing::EaseInQuint,
            (5, "out") => Easing::EaseOutQuint,
            (5, "inout") => Easing::EaseInOutQuint,
            _ => return Err(unknown()),
        };
        Ok(easing)
    }
}

/// Exponentially decaying sine, pinned to exact endpoints.
fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let amplitude = amplitude.max(f32::EPSILON);
    let a = amplitude.max(1.0);
    let p = period / amplitude.min(1.0);
    let shift = p / TAU * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / p).sin() + 1.0
}

fn back_out(t: f32, overshoot: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let p = t - 1.0;
    p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 17] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseInQuart,
        Easing::EaseOutQuart,
        Easing::EaseInOutQuart,
        Easing::EaseInQuint,
        Easing::EaseOutQuint,
        Easing::EaseInOutQuint,
        Easing::ELASTIC,
        Easing::BackOut { overshoot: 1.70158 },
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
        Easing::ElasticOut {
            amplitude: 0.5,
            period: 0.45,
        },
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::EaseOutQuart.apply(1.5), 1.0);
        assert_eq!(Easing::EaseOutQuart.apply(-0.5), 0.0);
    }

    #[test]
    fn test_elastic_overshoots_target() {
        let peak = (1..100)
            .map(|i| Easing::ELASTIC.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "elastic should overshoot, peak = {peak}");
    }

    #[test]
    fn test_out_curves_lead_linear() {
        for easing in [Easing::EaseOutQuad, Easing::EaseOutCubic, Easing::EaseOutQuart] {
            assert!(easing.apply(0.3) > 0.3);
        }
    }

    #[test]
    fn test_parse_power_names() {
        assert_eq!("power2.out".parse(), Ok(Easing::EaseOutCubic));
        assert_eq!("power3.out".parse(), Ok(Easing::EaseOutQuart));
        assert_eq!("power4.out".parse(), Ok(Easing::EaseOutQuint));
        assert_eq!("Power1.inOut".parse(), Ok(Easing::EaseInOutQuad));
        assert_eq!("cubic".parse(), Ok(Easing::EaseOutCubic));
        assert_eq!("none".parse(), Ok(Easing::Linear));
    }

    #[test]
    fn test_parse_parameterized() {
        assert_eq!("elastic.out(1, 0.3)".parse(), Ok(Easing::ELASTIC));
        assert_eq!(
            "back.out(2)".parse(),
            Ok(Easing::BackOut { overshoot: 2.0 })
        );
        assert_eq!(
            "cubic-bezier(0.2, 0, 0, 1)".parse(),
            Ok(Easing::CubicBezier(0.2, 0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "bounce.out".parse::<Easing>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "power2.sideways".parse::<Easing>(),
            Err(EasingParseError::Unknown(_))
        ));
        assert!(matches!(
            "elastic.out(1, 0.3".parse::<Easing>(),
            Err(EasingParseError::InvalidParameters(_))
        ));
        assert!(matches!(
            "cubic-bezier(0.2, 0)".parse::<Easing>(),
            Err(EasingParseError::InvalidParameters(_))
        ));
        assert!(matches!(
            "power3.out(2)".parse::<Easing>(),
            Err(EasingParseError::InvalidParameters(_))
        ));
    }
}
