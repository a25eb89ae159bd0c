//! Element builders
//!
//! Fluent construction of document subtrees:
//!
//! ```ignore
//! let hero = div()
//!     .class("hero")
//!     .h(720.0)
//!     .child(text("h1", "Enter the Future.").h(64.0).bind("hero_text"))
//!     .build(&mut doc, &mut refs);
//! ```

use crate::document::Document;
use crate::refs::ElementRefs;
use smallvec::SmallVec;
use taffy::prelude::{
    AlignItems, Dimension, Display, FlexDirection, FlexWrap, JustifyContent, LengthPercentage,
    LengthPercentageAuto, Position, Rect as TaffyRect, Size, Style,
};
use vessel_core::ElementId;

enum Binding {
    Named(String),
    Indexed(String, usize),
}

/// Builder for one element and its children
pub struct ElementBuilder {
    tag: String,
    classes: SmallVec<[String; 2]>,
    anchor: Option<String>,
    text: Option<String>,
    attrs: Vec<(String, String)>,
    style: Style,
    children: Vec<ElementBuilder>,
    binding: Option<Binding>,
}

/// A flex column container
pub fn div() -> ElementBuilder {
    el("div")
}

/// An element with the given tag, laid out as a flex column
pub fn el(tag: &str) -> ElementBuilder {
    ElementBuilder {
        tag: tag.to_string(),
        classes: SmallVec::new(),
        anchor: None,
        text: None,
        attrs: Vec::new(),
        style: Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            ..Default::default()
        },
        children: Vec::new(),
        binding: None,
    }
}

/// An element holding text content
pub fn text(tag: &str, content: &str) -> ElementBuilder {
    el(tag).text(content)
}

impl ElementBuilder {
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Fragment id for in-page links
    pub fn anchor(mut self, anchor: &str) -> Self {
        self.anchor = Some(anchor.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.text = Some(content.to_string());
        self
    }

    /// Set width in pixels
    pub fn w(mut self, px: f32) -> Self {
        self.style.size.width = Dimension::Length(px);
        self
    }

    /// Set height in pixels
    pub fn h(mut self, px: f32) -> Self {
        self.style.size.height = Dimension::Length(px);
        self
    }

    /// Set width to 100%
    pub fn w_full(mut self) -> Self {
        self.style.size.width = Dimension::Percent(1.0);
        self
    }

    /// Set width as a fraction of the parent
    pub fn w_fraction(mut self, fraction: f32) -> Self {
        self.style.size.width = Dimension::Percent(fraction);
        self
    }

    /// Take the element out of flow and stretch it over its parent
    pub fn absolute_fill(mut self) -> Self {
        self.style.position = Position::Absolute;
        self.style.inset = TaffyRect {
            left: LengthPercentageAuto::Length(0.0),
            right: LengthPercentageAuto::Length(0.0),
            top: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(0.0),
        };
        self
    }

    pub fn min_h(mut self, px: f32) -> Self {
        self.style.min_size.height = Dimension::Length(px);
        self
    }

    pub fn flex_row(mut self) -> Self {
        self.style.flex_direction = FlexDirection::Row;
        self
    }

    pub fn flex_col(mut self) -> Self {
        self.style.flex_direction = FlexDirection::Column;
        self
    }

    pub fn flex_wrap(mut self) -> Self {
        self.style.flex_wrap = FlexWrap::Wrap;
        self
    }

    pub fn flex_grow(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self
    }

    pub fn items_center(mut self) -> Self {
        self.style.align_items = Some(AlignItems::Center);
        self
    }

    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = Some(JustifyContent::Center);
        self
    }

    pub fn justify_between(mut self) -> Self {
        self.style.justify_content = Some(JustifyContent::SpaceBetween);
        self
    }

    /// Gap between children in pixels
    pub fn gap(mut self, px: f32) -> Self {
        self.style.gap = Size {
            width: LengthPercentage::Length(px),
            height: LengthPercentage::Length(px),
        };
        self
    }

    /// Padding on all sides in pixels
    pub fn p(mut self, px: f32) -> Self {
        self.style.padding = TaffyRect {
            left: LengthPercentage::Length(px),
            right: LengthPercentage::Length(px),
            top: LengthPercentage::Length(px),
            bottom: LengthPercentage::Length(px),
        };
        self
    }

    /// Horizontal and vertical padding in pixels
    pub fn pxy(mut self, x: f32, y: f32) -> Self {
        self.style.padding = TaffyRect {
            left: LengthPercentage::Length(x),
            right: LengthPercentage::Length(x),
            top: LengthPercentage::Length(y),
            bottom: LengthPercentage::Length(y),
        };
        self
    }

    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = ElementBuilder>,
    {
        self.children.extend(children);
        self
    }

    /// Register the built element as a named ref
    pub fn bind(mut self, name: &str) -> Self {
        self.binding = Some(Binding::Named(name.to_string()));
        self
    }

    /// Register the built element as slot `index` of an indexed ref
    pub fn bind_indexed(mut self, name: &str, index: usize) -> Self {
        self.binding = Some(Binding::Indexed(name.to_string(), index));
        self
    }

    /// Create the subtree in `doc`, detached, and register its refs
    pub fn build(self, doc: &mut Document, refs: &mut ElementRefs) -> ElementId {
        let id = doc.create(&self.tag, self.style);
        for class in &self.classes {
            doc.add_class(id, class);
        }
        if let Some(anchor) = &self.anchor {
            doc.set_anchor(id, anchor);
        }
        if let Some(content) = &self.text {
            doc.set_text(id, content);
        }
        for (name, value) in &self.attrs {
            doc.set_attr(id, name, value);
        }

        for child in self.children {
            let child_id = child.build(doc, refs);
            doc.append_child(id, child_id);
        }

        match self.binding {
            Some(Binding::Named(name)) => refs.register(&name, id),
            Some(Binding::Indexed(name, index)) => refs.register_indexed(&name, index, id),
            None => {}
        }
        id
    }
}
