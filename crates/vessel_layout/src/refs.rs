//! Element reference registry
//!
//! Filled during the render pass and sealed before setup runs, so setup only
//! ever sees a complete set of refs. Repeated elements (feature cards) are
//! registered by index.

use indexmap::IndexMap;
use vessel_core::ElementId;

#[derive(Debug, Default)]
pub struct ElementRefs {
    named: IndexMap<String, ElementId>,
    indexed: IndexMap<String, Vec<Option<ElementId>>>,
    sealed: bool,
}

impl ElementRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named ref. Ignored once sealed.
    pub fn register(&mut self, name: &str, element: ElementId) {
        if self.sealed {
            tracing::warn!(name, "ref registered after setup, ignoring");
            return;
        }
        self.named.insert(name.to_string(), element);
    }

    /// Register slot `index` of an indexed ref. Ignored once sealed.
    pub fn register_indexed(&mut self, name: &str, index: usize, element: ElementId) {
        if self.sealed {
            tracing::warn!(name, index, "indexed ref registered after setup, ignoring");
            return;
        }
        let slots = self.indexed.entry(name.to_string()).or_default();
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(element);
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn get(&self, name: &str) -> Option<ElementId> {
        self.named.get(name).copied()
    }

    /// Registered slots of an indexed ref as `(index, element)`, skipping holes
    pub fn indexed(&self, name: &str) -> Vec<(usize, ElementId)> {
        self.indexed
            .get(name)
            .map(|slots| {
                slots
                    .iter()
                    .enumerate()
                    .filter_map(|(i, slot)| slot.map(|id| (i, id)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.named.len()
            + self
                .indexed
                .values()
                .map(|slots| slots.iter().flatten().count())
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<ElementId> {
        let mut map: SlotMap<ElementId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_indexed_skips_holes() {
        let ids = ids(2);
        let mut refs = ElementRefs::new();
        refs.register_indexed("card", 0, ids[0]);
        refs.register_indexed("card", 3, ids[1]);

        assert_eq!(refs.indexed("card"), vec![(0, ids[0]), (3, ids[1])]);
        assert!(refs.indexed("missing").is_empty());
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_sealed_ignores_registration() {
        let ids = ids(2);
        let mut refs = ElementRefs::new();
        refs.register("hero", ids[0]);
        refs.seal();
        refs.register("late", ids[1]);
        refs.register_indexed("card", 0, ids[1]);

        assert_eq!(refs.get("hero"), Some(ids[0]));
        assert_eq!(refs.get("late"), None);
        assert!(refs.indexed("card").is_empty());
    }
}
