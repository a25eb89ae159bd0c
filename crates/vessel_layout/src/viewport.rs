//! Viewport and scroll anchors
//!
//! A `ScrollAnchor` pairs a point on an element with a point on the viewport,
//! written the way scroll-driven animation libraries write them:
//! `"top 85%"` reads "when the element's top reaches 85% down the viewport".

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use vessel_core::{Point, Rect};

/// Visible window onto the document
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    scroll_y: f32,
    content_height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            content_height: height,
        }
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.height).max(0.0)
    }

    /// Scroll to `y`, clamped to the document. Returns the applied offset.
    pub fn set_scroll(&mut self, y: f32) -> f32 {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
        self.scroll_y
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    /// Page coordinates to client (viewport) coordinates
    pub fn to_client(&self, point: Point) -> Point {
        Point::new(point.x, point.y - self.scroll_y)
    }

    /// Client (viewport) coordinates to page coordinates
    pub fn to_page(&self, point: Point) -> Point {
        Point::new(point.x, point.y + self.scroll_y)
    }

    /// Whether any part of a page rectangle is on screen
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.bottom() > self.scroll_y && rect.top() < self.scroll_y + self.height
    }
}

/// A position along one axis of a box
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the box length (`top` = 0, `center` = 0.5, `bottom` = 1)
    Fraction(f32),
    /// Fixed distance from the box start
    Pixels(f32),
}

impl Anchor {
    pub fn resolve(&self, length: f32) -> f32 {
        match self {
            Anchor::Fraction(fraction) => length * fraction,
            Anchor::Pixels(px) => *px,
        }
    }
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let anchor = match token {
            "top" => Anchor::Fraction(0.0),
            "center" => Anchor::Fraction(0.5),
            "bottom" => Anchor::Fraction(1.0),
            _ => {
                let invalid = || AnchorParseError::InvalidPosition(token.to_string());
                if let Some(percent) = token.strip_suffix('%') {
                    Anchor::Fraction(percent.parse::<f32>().map_err(|_| invalid())? / 100.0)
                } else {
                    let px = token.strip_suffix("px").unwrap_or(token);
                    Anchor::Pixels(px.parse::<f32>().map_err(|_| invalid())?)
                }
            }
        };
        Ok(anchor)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Fraction(x) if *x == 0.0 => write!(f, "top"),
            Anchor::Fraction(x) if *x == 0.5 => write!(f, "center"),
            Anchor::Fraction(x) if *x == 1.0 => write!(f, "bottom"),
            Anchor::Fraction(x) => write!(f, "{}%", x * 100.0),
            Anchor::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// Errors from parsing anchors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnchorParseError {
    #[error("empty scroll anchor")]
    Empty,
    #[error("scroll anchor `{0}` must have an element and a viewport position")]
    Arity(String),
    #[error("invalid anchor position `{0}`")]
    InvalidPosition(String),
}

/// Element position meeting a viewport position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl ScrollAnchor {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the anchor points meet
    pub fn scroll_position(&self, rect: &Rect, viewport_height: f32) -> f32 {
        rect.top() + self.element.resolve(rect.height()) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for ScrollAnchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let element = tokens.next().ok_or(AnchorParseError::Empty)?;
        let viewport = tokens
            .next()
            .ok_or_else(|| AnchorParseError::Arity(s.to_string()))?;
        if tokens.next().is_some() {
            return Err(AnchorParseError::Arity(s.to_string()));
        }
        Ok(Self::new(element.parse()?, viewport.parse()?))
    }
}

impl fmt::Display for ScrollAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}
