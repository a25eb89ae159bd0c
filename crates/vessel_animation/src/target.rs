//! Animation targets
//!
//! The scheduler never owns elements. It reads and writes inline styles
//! through `AnimationTarget`, which the page document implements.

use crate::properties::KeyframeProperties;
use vessel_core::ElementId;

/// Which elements a timeline step animates
#[derive(Clone, Debug, PartialEq)]
pub enum Selector {
    Element(ElementId),
    Elements(Vec<ElementId>),
    Class(String),
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Selector::Class(name.into())
    }

    /// A possibly-missing element. `None` selects nothing.
    pub fn optional(element: Option<ElementId>) -> Self {
        Selector::Elements(element.into_iter().collect())
    }
}

impl From<ElementId> for Selector {
    fn from(element: ElementId) -> Self {
        Selector::Element(element)
    }
}

impl From<Vec<ElementId>> for Selector {
    fn from(elements: Vec<ElementId>) -> Self {
        Selector::Elements(elements)
    }
}

impl From<&str> for Selector {
    fn from(class: &str) -> Self {
        Selector::Class(class.to_string())
    }
}

/// Something holding animatable elements
pub trait AnimationTarget {
    /// Elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Vec<ElementId>;

    /// Current inline style, or `None` if the element does not exist
    fn inline_style(&self, element: ElementId) -> Option<KeyframeProperties>;

    /// Replace the inline style of an existing element
    fn set_inline_style(&mut self, element: ElementId, style: KeyframeProperties);

    /// Resolve a selector to existing elements
    fn resolve(&self, selector: &Selector) -> Vec<ElementId> {
        match selector {
            Selector::Element(id) => self
                .inline_style(*id)
                .map(|_| vec![*id])
                .unwrap_or_default(),
            Selector::Elements(ids) => ids
                .iter()
                .copied()
                .filter(|id| self.inline_style(*id).is_some())
                .collect(),
            Selector::Class(name) => self.elements_with_class(name),
        }
    }
}
