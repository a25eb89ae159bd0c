//! Page document
//!
//! An element tree with classes, text, attributes, a flexbox layout and an
//! inline animated style per element. Rectangles are in page coordinates and
//! ignore inline transforms; `visual_rect` adds the accumulated translation.

use crate::tree::{LayoutNodeId, LayoutTree};
use indexmap::IndexMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use taffy::prelude::Style;
use vessel_animation::{AnimationTarget, KeyframeProperties};
use vessel_core::{ElementId, Point, Rect};

/// A node of the page document
#[derive(Debug)]
pub struct Element {
    tag: String,
    anchor: Option<String>,
    classes: SmallVec<[String; 2]>,
    text: Option<String>,
    attrs: IndexMap<String, String>,
    /// Inline animated style
    pub style: KeyframeProperties,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    layout_node: Option<LayoutNodeId>,
    rect: Rect,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Fragment id used by in-page links (`#features`)
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Layout rectangle in page coordinates
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Element tree plus its layout
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    root: Option<ElementId>,
    layout: LayoutTree,
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: SlotMap::with_key(),
            root: None,
            layout: LayoutTree::new(),
        }
    }

    /// Create a detached element
    pub fn create(&mut self, tag: &str, layout_style: Style) -> ElementId {
        let layout_node = self.layout.create_node(layout_style);
        self.elements.insert(Element {
            tag: tag.to_string(),
            anchor: None,
            classes: SmallVec::new(),
            text: None,
            attrs: IndexMap::new(),
            style: KeyframeProperties::default(),
            parent: None,
            children: Vec::new(),
            layout_node,
            rect: Rect::ZERO,
        })
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            if !element.has_class(class) {
                element.classes.push(class.to_string());
            }
        }
    }

    pub fn set_anchor(&mut self, id: ElementId, anchor: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.anchor = Some(anchor.to_string());
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = Some(text.to_string());
        }
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_root(&mut self, id: ElementId) {
        if self.elements.contains_key(id) {
            self.root = Some(id);
        }
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Attach `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if parent == child || !self.elements.contains_key(parent) {
            return false;
        }
        let Some(child_element) = self.elements.get_mut(child) else {
            return false;
        };
        if child_element.parent.is_some() {
            return false;
        }
        child_element.parent = Some(parent);
        let child_node = child_element.layout_node;

        let parent_element = &mut self.elements[parent];
        parent_element.children.push(child);
        if let (Some(parent_node), Some(child_node)) = (parent_element.layout_node, child_node) {
            self.layout.add_child(parent_node, child_node);
        }
        true
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pre-order traversal from the root
    pub fn descendants(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack: Vec<ElementId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(element.children.iter().rev().copied());
        }
        order
    }

    /// Elements carrying `class`, in document order
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.descendants()
            .into_iter()
            .filter(|id| self.elements[*id].has_class(class))
            .collect()
    }

    /// Element whose anchor matches `#anchor` or `anchor`
    pub fn find_anchor(&self, anchor: &str) -> Option<ElementId> {
        let anchor = anchor.trim_start_matches('#');
        self.descendants()
            .into_iter()
            .find(|id| self.elements[*id].anchor() == Some(anchor))
    }

    /// Remove an element and its subtree. Returns the number removed.
    pub fn remove(&mut self, id: ElementId) -> usize {
        let Some(parent) = self.elements.get(id).map(|element| element.parent) else {
            return 0;
        };
        if let Some(parent) = parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        if self.root == Some(id) {
            self.root = None;
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.remove(current) {
                if let Some(node) = element.layout_node {
                    self.layout.remove_node(node);
                }
                stack.extend(element.children);
                removed += 1;
            }
        }
        removed
    }

    /// Lay the tree out for a viewport width and store page rectangles
    pub fn compute_layout(&mut self, width: f32) {
        let Some(root) = self.root else {
            return;
        };
        if let Some(node) = self.elements[root].layout_node {
            self.layout.compute_layout(node, width);
        }

        let mut stack = vec![(root, Point::ZERO)];
        while let Some((id, parent_origin)) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            let rect = match element.layout_node.and_then(|n| self.layout.get_layout(n)) {
                Some(layout) => Rect::new(
                    parent_origin.x + layout.location.x,
                    parent_origin.y + layout.location.y,
                    layout.size.width,
                    layout.size.height,
                ),
                None => Rect::new(parent_origin.x, parent_origin.y, 0.0, 0.0),
            };
            for child in element.children.iter().copied() {
                stack.push((child, rect.origin));
            }
            self.elements[id].rect = rect;
        }
    }

    /// Layout rectangle in page coordinates
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|element| element.rect)
    }

    /// Layout rectangle shifted by the element's and its ancestors' translation
    pub fn visual_rect(&self, id: ElementId) -> Option<Rect> {
        let rect = self.rect(id)?;
        let (mut dx, mut dy) = (0.0, 0.0);
        let mut current = Some(id);
        while let Some(element) = current.and_then(|c| self.elements.get(c)) {
            dx += element.style.translate_x.unwrap_or(0.0);
            dy += element.style.translate_y.unwrap_or(0.0);
            current = element.parent;
        }
        Some(rect.offset(dx, dy))
    }

    /// Total document height
    pub fn content_height(&self) -> f32 {
        self.root
            .and_then(|root| self.rect(root))
            .map(|rect| rect.bottom())
            .unwrap_or(0.0)
    }

    /// Elements whose visual rectangle contains a page point, outermost first
    pub fn hit_test(&self, point: Point) -> Vec<ElementId> {
        self.descendants()
            .into_iter()
            .filter(|id| {
                self.visual_rect(*id)
                    .is_some_and(|rect| rect.contains(point))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationTarget for Document {
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.query_class(class)
    }

    fn inline_style(&self, element: ElementId) -> Option<KeyframeProperties> {
        self.elements.get(element).map(|e| e.style)
    }

    fn set_inline_style(&mut self, element: ElementId, style: KeyframeProperties) {
        if let Some(e) = self.elements.get_mut(element) {
            e.style = style;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taffy::prelude::{Dimension, FlexDirection};

    fn block(height: f32) -> Style {
        Style {
            flex_direction: FlexDirection::Column,
            size: taffy::prelude::Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    fn column() -> Style {
        Style {
            flex_direction: FlexDirection::Column,
            ..Default::default()
        }
    }

    fn page() -> Style {
        Style {
            flex_direction: FlexDirection::Column,
            size: taffy::prelude::Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Auto,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_layout_stacks_children() {
        let mut doc = Document::new();
        let root = doc.create("main", page());
        let a = doc.create("section", block(100.0));
        let b = doc.create("section", block(250.0));
        doc.set_root(root);
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.compute_layout(800.0);

        assert_eq!(doc.rect(a), Some(Rect::new(0.0, 0.0, 800.0, 100.0)));
        assert_eq!(doc.rect(b), Some(Rect::new(0.0, 100.0, 800.0, 250.0)));
        assert_eq!(doc.content_height(), 350.0);
    }

    #[test]
    fn test_query_class_in_document_order() {
        let mut doc = Document::new();
        let root = doc.create("main", page());
        doc.set_root(root);
        let mut links = Vec::new();
        for _ in 0..3 {
            let link = doc.create("a", block(10.0));
            doc.add_class(link, "nav-link");
            doc.append_child(root, link);
            links.push(link);
        }
        let detached = doc.create("a", block(10.0));
        doc.add_class(detached, "nav-link");

        assert_eq!(doc.query_class("nav-link"), links);
    }

    #[test]
    fn test_visual_rect_accumulates_translation() {
        let mut doc = Document::new();
        let root = doc.create("main", page());
        let child = doc.create("button", block(40.0));
        doc.set_root(root);
        doc.append_child(root, child);
        doc.compute_layout(100.0);

        doc.set_inline_style(root, KeyframeProperties::translate(0.0, 10.0));
        doc.set_inline_style(child, KeyframeProperties::translate(5.0, 0.0));
        assert_eq!(doc.visual_rect(child), Some(Rect::new(5.0, 10.0, 100.0, 40.0)));
        assert_eq!(doc.rect(child), Some(Rect::new(0.0, 0.0, 100.0, 40.0)));
    }

    #[test]
    fn test_remove_subtree() {
        let mut doc = Document::new();
        let root = doc.create("main", page());
        let section = doc.create("section", column());
        let inner = doc.create("p", block(10.0));
        doc.set_root(root);
        doc.append_child(root, section);
        doc.append_child(section, inner);

        assert_eq!(doc.remove(section), 2);
        assert!(!doc.contains(inner));
        assert!(doc.get(root).unwrap().children().is_empty());
        assert_eq!(doc.remove(section), 0);
    }

    #[test]
    fn test_find_anchor_accepts_hash() {
        let mut doc = Document::new();
        let root = doc.create("main", page());
        let features = doc.create("section", column());
        doc.set_root(root);
        doc.append_child(root, features);
        doc.set_anchor(features, "features");

        assert_eq!(doc.find_anchor("#features"), Some(features));
        assert_eq!(doc.find_anchor("download"), None);
    }

    #[test]
    fn test_append_child_rejects_reparenting() {
        let mut doc = Document::new();
        let a = doc.create("div", column());
        let b = doc.create("div", column());
        let c = doc.create("div", column());
        assert!(doc.append_child(a, c));
        assert!(!doc.append_child(b, c));
        assert!(!doc.append_child(a, a));
    }
}
