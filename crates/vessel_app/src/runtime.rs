//! Page runtime
//!
//! Owns the stage, the trigger registry and the pointer listeners of one
//! rendered page, and feeds them frames, scroll, resize and pointer input.

use crate::choreography;
use crate::content::PageContent;
use crate::media::{MediaBackend, PlaybackState, VideoPlayer};
use crate::page;
use vessel_animation::KeyframeProperties;
use vessel_core::events::event_types;
use vessel_core::{ElementId, Event, EventDispatcher, EventType, Point, Scope};
use vessel_layout::{
    ElementRefs, MagneticGroup, Stage, TriggerEvent, TriggerId, TriggerRegistry,
};

/// Everything mount registers into
pub struct Runtime {
    pub stage: Stage,
    pub triggers: TriggerRegistry<Stage>,
    pub events: EventDispatcher<Stage>,
    pub magnetic: Option<MagneticGroup>,
}

impl Runtime {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            triggers: TriggerRegistry::new(),
            events: EventDispatcher::new(),
            magnetic: None,
        }
    }

    /// Run one trigger evaluation pass
    pub fn evaluate_triggers(&mut self) -> Vec<(TriggerId, TriggerEvent)> {
        self.triggers.evaluate(&mut self.stage)
    }
}

/// A rendered page and its mount lifecycle
pub struct Page {
    content: PageContent,
    refs: ElementRefs,
    runtime: Runtime,
    scope: Option<Scope<Runtime>>,
    video: VideoPlayer,
    hovered: Vec<ElementId>,
}

impl Page {
    /// Render `content` into a `width` x `height` viewport. Nothing animates
    /// until `mount`.
    pub fn new(content: PageContent, width: f32, height: f32) -> Self {
        let (document, refs) = page::render(&content);
        let video = VideoPlayer::new(content.video.clone());
        Self {
            content,
            refs,
            runtime: Runtime::new(Stage::new(document, width, height)),
            scope: None,
            video,
            hovered: Vec::new(),
        }
    }

    /// Wire the choreography. Returns false if already mounted.
    pub fn mount(&mut self) -> bool {
        if self.scope.is_some() {
            return false;
        }
        self.scope = Some(choreography::mount(&mut self.runtime, &self.refs));
        true
    }

    /// Tear down everything mount registered. Returns the number of release
    /// actions run.
    pub fn unmount(&mut self) -> usize {
        let Some(scope) = self.scope.take() else {
            return 0;
        };
        self.hovered.clear();
        let released = scope.dispose(&mut self.runtime);
        tracing::info!(
            released,
            triggers = self.runtime.triggers.len(),
            listeners = self.runtime.events.listener_count(),
            timelines = self.runtime.stage.scheduler().timeline_count(),
            "page unmounted"
        );
        released
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_some()
    }

    /// Evaluate triggers, then advance animations by `dt_ms`. Returns the
    /// crossings seen before the frame.
    pub fn tick(&mut self, dt_ms: f32) -> Vec<(TriggerId, TriggerEvent)> {
        let crossings = self.runtime.evaluate_triggers();
        self.runtime.stage.tick(dt_ms);
        crossings
    }

    /// Tick in `frame_ms` steps until nothing is playing, up to `max_ms`.
    /// Returns the simulated time.
    pub fn settle(&mut self, frame_ms: f32, max_ms: f32) -> f32 {
        let mut elapsed = 0.0;
        loop {
            self.tick(frame_ms);
            elapsed += frame_ms;
            if !self.runtime.stage.has_active_animations() || elapsed >= max_ms {
                return elapsed;
            }
        }
    }

    /// Scroll and evaluate triggers. Returns the clamped offset and the
    /// crossings it caused.
    pub fn scroll_to(&mut self, y: f32) -> (f32, Vec<(TriggerId, TriggerEvent)>) {
        let before = self.runtime.stage.viewport().scroll_y();
        let offset = self.runtime.stage.scroll_to(y);
        let scroll = Event::scroll(offset, offset - before);
        self.runtime
            .events
            .dispatch(&mut self.runtime.stage, &scroll);
        (offset, self.runtime.evaluate_triggers())
    }

    /// Follow an in-page link
    pub fn navigate(&mut self, href: &str) -> Option<f32> {
        let offset = self.runtime.stage.scroll_to_anchor(href)?;
        self.runtime.evaluate_triggers();
        Some(offset)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.runtime.stage.resize(width, height);
        let resize = Event::resize(width, height);
        self.runtime
            .events
            .dispatch(&mut self.runtime.stage, &resize);
        self.runtime.evaluate_triggers();
    }

    /// Pointer moved to a client position. Returns the number of handlers run.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> usize {
        let hits = self.runtime.stage.hit_test_client(Point::new(x, y));
        let mut invoked = 0;

        let left: Vec<ElementId> = self
            .hovered
            .iter()
            .copied()
            .filter(|id| !hits.contains(id))
            .collect();
        for element in left {
            invoked += self.dispatch_pointer(event_types::POINTER_LEAVE, element, x, y);
        }
        for &element in &hits {
            if !self.hovered.contains(&element) {
                invoked += self.dispatch_pointer(event_types::POINTER_ENTER, element, x, y);
            }
        }
        for &element in &hits {
            invoked += self.dispatch_pointer(event_types::POINTER_MOVE, element, x, y);
        }

        self.hovered = hits;
        invoked
    }

    /// Pointer left the window
    pub fn pointer_exit(&mut self) -> usize {
        let hovered = std::mem::take(&mut self.hovered);
        hovered
            .into_iter()
            .map(|element| {
                self.dispatch_pointer(event_types::POINTER_LEAVE, element, -1.0, -1.0)
            })
            .sum()
    }

    fn dispatch_pointer(
        &mut self,
        event_type: EventType,
        element: ElementId,
        x: f32,
        y: f32,
    ) -> usize {
        let event = Event::pointer(event_type, element, x, y);
        self.runtime.events.dispatch(&mut self.runtime.stage, &event)
    }

    /// The demo video's data finished loading
    pub fn media_loaded(&mut self, backend: &mut dyn MediaBackend) -> PlaybackState {
        self.video.on_loaded_data(backend)
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn refs(&self) -> &ElementRefs {
        &self.refs
    }

    pub fn stage(&self) -> &Stage {
        &self.runtime.stage
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn video(&self) -> &VideoPlayer {
        &self.video
    }

    /// Live scroll triggers
    pub fn trigger_count(&self) -> usize {
        self.runtime.triggers.len()
    }

    /// Attached event listeners
    pub fn listener_count(&self) -> usize {
        self.runtime.events.listener_count()
    }

    /// Inline style of an element
    pub fn style(&self, element: ElementId) -> Option<KeyframeProperties> {
        self.runtime
            .stage
            .document()
            .get(element)
            .map(|element| element.style)
    }

    /// Inline style of a named ref
    pub fn style_of(&self, name: &str) -> Option<KeyframeProperties> {
        self.refs.get(name).and_then(|element| self.style(element))
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if self.is_mounted() {
            self.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::HeadlessMedia;
    use crate::page::names;

    fn page() -> Page {
        Page::new(PageContent::default(), 1440.0, 900.0)
    }

    #[test]
    fn test_mount_is_not_reentrant() {
        let mut page = page();
        assert!(page.mount());
        assert!(!page.mount());
        assert!(page.unmount() > 0);
        assert_eq!(page.unmount(), 0);
    }

    #[test]
    fn test_mount_hides_entrance_targets() {
        let mut page = page();
        page.mount();
        assert_eq!(page.style_of(names::NAV).and_then(|s| s.opacity), Some(0.0));
        assert_eq!(page.style_of(names::STATEMENT).and_then(|s| s.opacity), Some(0.0));
    }

    #[test]
    fn test_media_loaded_swallows_rejection() {
        let mut page = page();
        page.mount();
        let mut backend = HeadlessMedia::rejecting();
        assert_eq!(page.media_loaded(&mut backend), PlaybackState::Blocked);
        assert_eq!(backend.requests, vec!["/media/vessel-preview.mp4".to_string()]);
    }

    #[test]
    fn test_navigate_to_anchor() {
        let mut page = page();
        let features = page.stage().document().find_anchor("features").unwrap();
        let top = page.stage().document().rect(features).unwrap().top();
        assert_eq!(page.navigate("#features"), Some(top));
        assert_eq!(page.navigate("#nowhere"), None);
    }
}
