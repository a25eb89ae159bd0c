//! Stage
//!
//! The document, its animation scheduler and the viewport, advanced together
//! one frame at a time.

use crate::document::Document;
use crate::scroll_trigger::TriggerHost;
use crate::viewport::Viewport;
use vessel_animation::{
    AnimationScheduler, Easing, KeyframeProperties, TimelineBuilder, TimelineId, TimelineStep,
};
use vessel_core::{ElementId, Point, Rect};

pub struct Stage {
    document: Document,
    scheduler: AnimationScheduler,
    viewport: Viewport,
}

impl Stage {
    /// Lay out `document` for a `width` x `height` viewport
    pub fn new(document: Document, width: f32, height: f32) -> Self {
        let mut stage = Self {
            document,
            scheduler: AnimationScheduler::new(),
            viewport: Viewport::new(width, height),
        };
        stage.relayout();
        stage
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AnimationScheduler {
        &mut self.scheduler
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Register a paused timeline and render its starting values
    pub fn animate(&mut self, builder: &TimelineBuilder) -> TimelineId {
        self.scheduler.create(builder, &mut self.document)
    }

    pub fn play(&mut self, id: TimelineId) -> bool {
        self.scheduler.play(id, &mut self.document)
    }

    pub fn reverse(&mut self, id: TimelineId) -> bool {
        self.scheduler.reverse(id, &mut self.document)
    }

    pub fn replay(&mut self, id: TimelineId) -> bool {
        self.scheduler.replay(id, &mut self.document)
    }

    pub fn restart(&mut self, id: TimelineId) -> bool {
        self.scheduler.restart(id, &mut self.document)
    }

    pub fn pause(&mut self, id: TimelineId) -> bool {
        self.scheduler.pause(id)
    }

    pub fn revert(&mut self, id: TimelineId) -> bool {
        self.scheduler.revert(id, &mut self.document)
    }

    pub fn kill(&mut self, id: TimelineId) -> bool {
        self.scheduler.kill(id)
    }

    /// Tween an element from its current values to `props`, superseding any
    /// earlier tween on the same properties
    pub fn tween_to(
        &mut self,
        element: ElementId,
        props: KeyframeProperties,
        duration_ms: u32,
        easing: Easing,
    ) -> TimelineId {
        let builder = TimelineBuilder::new("tween")
            .step(TimelineStep::to(element, props, duration_ms).ease(easing));
        self.scheduler.animate_transient(&builder, &mut self.document)
    }

    /// Advance every playing timeline by `dt_ms`
    pub fn tick(&mut self, dt_ms: f32) {
        self.scheduler.tick(dt_ms, &mut self.document);
    }

    pub fn has_active_animations(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    /// Scroll the viewport, returning the clamped offset
    pub fn scroll_to(&mut self, y: f32) -> f32 {
        self.viewport.set_scroll(y)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.relayout();
    }

    /// Recompute layout for the current viewport width
    pub fn relayout(&mut self) {
        self.document.compute_layout(self.viewport.width);
        self.viewport
            .set_content_height(self.document.content_height());
    }

    /// Rendered rectangle of an element in client coordinates
    pub fn client_rect(&self, element: ElementId) -> Option<Rect> {
        let rect = self.document.visual_rect(element)?;
        Some(rect.offset(0.0, -self.viewport.scroll_y()))
    }

    /// Rendered centre of an element in client coordinates
    pub fn client_center(&self, element: ElementId) -> Option<Point> {
        self.client_rect(element).map(|rect| rect.center())
    }

    /// Elements under a client point, outermost first
    pub fn hit_test_client(&self, point: Point) -> Vec<ElementId> {
        self.document.hit_test(self.viewport.to_page(point))
    }

    /// Scroll so an anchored element sits at the top of the viewport
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> Option<f32> {
        let element = self.document.find_anchor(anchor)?;
        let top = self.document.rect(element)?.top();
        Some(self.scroll_to(top))
    }
}

impl TriggerHost for Stage {
    fn trigger_rect(&self, element: ElementId) -> Option<Rect> {
        self.document.rect(element)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn cancel_animation(&mut self, animation: TimelineId) {
        self.scheduler.pause(animation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::div;
    use crate::refs::ElementRefs;
    use vessel_animation::{AnimationTarget, Property};

    fn stage() -> (Stage, ElementRefs) {
        let mut doc = Document::new();
        let mut refs = ElementRefs::new();
        let root = div()
            .w_full()
            .child(div().h(600.0).bind("hero"))
            .child(div().h(300.0).anchor("features").child(div().w(100.0).h(40.0).bind("button")))
            .child(div().h(1000.0))
            .build(&mut doc, &mut refs);
        doc.set_root(root);
        (Stage::new(doc, 800.0, 600.0), refs)
    }

    #[test]
    fn test_new_lays_out_and_bounds_scroll() {
        let (mut stage, _) = stage();
        assert_eq!(stage.document().content_height(), 1900.0);
        assert_eq!(stage.scroll_to(10_000.0), 1300.0);
    }

    #[test]
    fn test_client_center_follows_scroll_and_translation() {
        let (mut stage, refs) = stage();
        let button = refs.get("button").unwrap();
        assert_eq!(stage.client_center(button), Some(Point::new(50.0, 620.0)));

        stage.scroll_to(100.0);
        stage.document_mut().set_inline_style(
            button,
            KeyframeProperties {
                translate_x: Some(10.0),
                ..Default::default()
            },
        );
        assert_eq!(stage.client_center(button), Some(Point::new(60.0, 520.0)));
    }

    #[test]
    fn test_tween_to_lands_exactly() {
        let (mut stage, refs) = stage();
        let button = refs.get("button").unwrap();
        stage.tween_to(button, KeyframeProperties::translate(12.0, -4.0), 400, Easing::EaseOutCubic);
        for _ in 0..30 {
            stage.tick(16.0);
        }
        let style = stage.document().get(button).unwrap().style;
        assert_eq!(style.translate_x, Some(12.0));
        assert_eq!(style.translate_y, Some(-4.0));
        assert_eq!(stage.scheduler().owner(button, Property::TranslateX), None);
    }

    #[test]
    fn test_scroll_to_anchor() {
        let (mut stage, _) = stage();
        assert_eq!(stage.scroll_to_anchor("#features"), Some(600.0));
        assert_eq!(stage.scroll_to_anchor("#missing"), None);
    }

    #[test]
    fn test_hit_test_client() {
        let (mut stage, refs) = stage();
        let button = refs.get("button").unwrap();
        stage.scroll_to(500.0);
        let hits = stage.hit_test_client(Point::new(20.0, 110.0));
        assert_eq!(hits.last(), Some(&button));
    }
}
