//! Event dispatch system
//!
//! Listeners are registered per (target element, event type) and receive a
//! mutable context alongside the event, so handlers can drive animations
//! without capturing shared state. Window-level events (scroll, resize) use
//! `None` as their target.

use crate::ElementId;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
}

/// A page event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: Option<ElementId>,
    pub data: EventData,
}

impl Event {
    /// Pointer event in client coordinates
    pub fn pointer(event_type: EventType, target: ElementId, x: f32, y: f32) -> Self {
        Self {
            event_type,
            target: Some(target),
            data: EventData::Pointer { x, y },
        }
    }

    /// Window scroll event
    pub fn scroll(offset_y: f32, delta_y: f32) -> Self {
        Self {
            event_type: event_types::SCROLL,
            target: None,
            data: EventData::Scroll { offset_y, delta_y },
        }
    }

    /// Window resize event
    pub fn resize(width: f32, height: f32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: None,
            data: EventData::Resize { width, height },
        }
    }

    /// Event without payload, targeted at an element
    pub fn element(event_type: EventType, target: ElementId) -> Self {
        Self {
            event_type,
            target: Some(target),
            data: EventData::None,
        }
    }
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Scroll { offset_y: f32, delta_y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

new_key_type! {
    /// Handle of a registered listener
    pub struct ListenerId;
}

/// Event handler taking the dispatch context and the event
pub type EventHandler<C> = Box<dyn FnMut(&mut C, &Event)>;

struct Listener<C> {
    target: Option<ElementId>,
    event_type: EventType,
    handler: EventHandler<C>,
}

/// Listener registry and dispatcher
pub struct EventDispatcher<C> {
    listeners: SlotMap<ListenerId, Listener<C>>,
    index: FxHashMap<(Option<ElementId>, EventType), SmallVec<[ListenerId; 2]>>,
}

impl<C> EventDispatcher<C> {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            index: FxHashMap::default(),
        }
    }

    /// Register an event handler for a target and event type
    pub fn register<F>(
        &mut self,
        target: Option<ElementId>,
        event_type: EventType,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&mut C, &Event) + 'static,
    {
        let id = self.listeners.insert(Listener {
            target,
            event_type,
            handler: Box::new(handler),
        });
        self.index.entry((target, event_type)).or_default().push(id);
        id
    }

    /// Remove a listener. Returns false if it was already removed.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };

        let key = (listener.target, listener.event_type);
        if let Some(ids) = self.index.get_mut(&key) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.index.remove(&key);
            }
        }
        true
    }

    /// Dispatch an event to every listener registered for its target and type.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&mut self, ctx: &mut C, event: &Event) -> usize {
        let Some(ids) = self.index.get(&(event.target, event.event_type)) else {
            return 0;
        };

        let ids = ids.clone();
        let mut invoked = 0;
        for id in ids {
            if let Some(listener) = self.listeners.get_mut(id) {
                (listener.handler)(ctx, event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Whether any listener is registered for the target and event type
    pub fn has_listeners(&self, target: Option<ElementId>, event_type: EventType) -> bool {
        self.index.contains_key(&(target, event_type))
    }

    /// Total number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
