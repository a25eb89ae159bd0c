//! Integration tests for scopes releasing dispatcher listeners
//!
//! These tests verify that:
//! - Listeners registered during a mount are removed when its scope is disposed
//! - No handler fires for events delivered after disposal

use slotmap::SlotMap;
use vessel_core::events::event_types;
use vessel_core::{ElementId, Event, EventDispatcher, Scope};

struct Host {
    dispatcher: EventDispatcher<u32>,
    hits: u32,
}

impl Host {
    fn dispatch(&mut self, event: &Event) -> usize {
        self.dispatcher.dispatch(&mut self.hits, event)
    }
}

#[test]
fn test_scope_removes_registered_listeners() {
    let mut keys: SlotMap<ElementId, ()> = SlotMap::with_key();
    let button = keys.insert(());

    let mut host = Host {
        dispatcher: EventDispatcher::new(),
        hits: 0,
    };
    let mut scope: Scope<Host> = Scope::new("mount");

    for event_type in [event_types::POINTER_MOVE, event_types::POINTER_LEAVE] {
        let id = host
            .dispatcher
            .register(Some(button), event_type, |hits, _| *hits += 1);
        scope.defer("listener", move |host| {
            host.dispatcher.remove(id);
        });
    }

    let moved = Event::pointer(event_types::POINTER_MOVE, button, 4.0, 4.0);
    assert_eq!(host.dispatch(&moved), 1);
    assert_eq!(host.hits, 1);

    assert_eq!(scope.dispose(&mut host), 2);
    assert_eq!(host.dispatcher.listener_count(), 0);

    assert_eq!(host.dispatch(&moved), 0);
    let left = Event::element(event_types::POINTER_LEAVE, button);
    assert_eq!(host.dispatch(&left), 0);
    assert_eq!(host.hits, 1);
}
