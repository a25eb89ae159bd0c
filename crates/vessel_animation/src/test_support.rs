//! In-memory animation target for unit tests

use crate::properties::KeyframeProperties;
use crate::target::AnimationTarget;
use slotmap::SlotMap;
use vessel_core::ElementId;

#[derive(Default)]
pub struct TestStage {
    elements: SlotMap<ElementId, (String, KeyframeProperties)>,
    order: Vec<ElementId>,
}

impl TestStage {
    pub fn add(&mut self, class: &str) -> ElementId {
        let id = self
            .elements
            .insert((class.to_string(), KeyframeProperties::default()));
        self.order.push(id);
        id
    }

    pub fn add_many(&mut self, class: &str, n: usize) -> Vec<ElementId> {
        (0..n).map(|_| self.add(class)).collect()
    }

    pub fn style(&self, id: ElementId) -> KeyframeProperties {
        self.elements[id].1
    }

    pub fn remove(&mut self, id: ElementId) {
        self.elements.remove(id);
        self.order.retain(|e| *e != id);
    }
}

impl AnimationTarget for TestStage {
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.elements[*id].0 == class)
            .collect()
    }

    fn inline_style(&self, element: ElementId) -> Option<KeyframeProperties> {
        self.elements.get(element).map(|(_, style)| *style)
    }

    fn set_inline_style(&mut self, element: ElementId, style: KeyframeProperties) {
        if let Some((_, slot)) = self.elements.get_mut(element) {
            *slot = style;
        }
    }
}
