//! Magnetic pointer-follow
//!
//! While the pointer is over a bound element the element drifts toward it by
//! a fraction of the pointer's offset from its centre; on leave it springs
//! back to its resting position. Every move starts a fresh transient tween,
//! which supersedes the one before it.

use crate::stage::Stage;
use std::cell::Cell;
use std::rc::Rc;
use vessel_animation::{AnimationTarget, Easing, KeyframeProperties, Property};
use vessel_core::events::event_types;
use vessel_core::{ElementId, Event, EventData, EventDispatcher, ListenerId};

/// Class marking elements that follow the pointer
pub const MAGNETIC_CLASS: &str = "magnetic-btn";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticConfig {
    /// Fraction of the pointer offset the element travels
    pub strength: f32,
    pub follow_ms: u32,
    pub follow_easing: Easing,
    pub release_ms: u32,
    pub release_easing: Easing,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            strength: 0.3,
            follow_ms: 400,
            follow_easing: Easing::EaseOutCubic,
            release_ms: 700,
            release_easing: Easing::ELASTIC,
        }
    }
}

struct Binding {
    element: ElementId,
    rest_x: Option<f32>,
    rest_y: Option<f32>,
    listeners: [ListenerId; 2],
    engaged: Rc<Cell<bool>>,
}

/// Pointer listeners attached to a set of elements
pub struct MagneticGroup {
    bindings: Vec<Binding>,
}

impl MagneticGroup {
    /// Attach move and leave listeners to each element
    pub fn bind(
        stage: &Stage,
        events: &mut EventDispatcher<Stage>,
        elements: &[ElementId],
        config: MagneticConfig,
    ) -> Self {
        let mut bindings = Vec::with_capacity(elements.len());
        for &element in elements {
            let Some(style) = stage.document().inline_style(element) else {
                tracing::debug!(?element, "magnetic target missing, skipping");
                continue;
            };
            let engaged = Rc::new(Cell::new(false));

            let follow = {
                let engaged = engaged.clone();
                events.register(
                    Some(element),
                    event_types::POINTER_MOVE,
                    move |stage: &mut Stage, event: &Event| {
                        let EventData::Pointer { x, y } = event.data else {
                            return;
                        };
                        let Some(center) = stage.client_center(element) else {
                            return;
                        };
                        engaged.set(true);
                        let offset = KeyframeProperties::translate(
                            (x - center.x) * config.strength,
                            (y - center.y) * config.strength,
                        );
                        stage.tween_to(element, offset, config.follow_ms, config.follow_easing);
                    },
                )
            };

            let release = events.register(
                Some(element),
                event_types::POINTER_LEAVE,
                move |stage: &mut Stage, _: &Event| {
                    stage.tween_to(
                        element,
                        KeyframeProperties::translate(0.0, 0.0),
                        config.release_ms,
                        config.release_easing,
                    );
                },
            );

            bindings.push(Binding {
                element,
                rest_x: style.translate_x,
                rest_y: style.translate_y,
                listeners: [follow, release],
                engaged,
            });
        }

        tracing::debug!(count = bindings.len(), "magnetic elements bound");
        Self { bindings }
    }

    /// Bind every element currently carrying `class`. Elements added later
    /// are not picked up.
    pub fn bind_class(
        stage: &Stage,
        events: &mut EventDispatcher<Stage>,
        class: &str,
        config: MagneticConfig,
    ) -> Self {
        let elements = stage.document().query_class(class);
        Self::bind(stage, events, &elements, config)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.bindings.iter().map(|binding| binding.element)
    }

    /// Translation an element returns to on unbind
    pub fn rest_translation(&self, element: ElementId) -> Option<(Option<f32>, Option<f32>)> {
        self.bindings
            .iter()
            .find(|binding| binding.element == element)
            .map(|binding| (binding.rest_x, binding.rest_y))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Remove the listeners, stop in-flight tweens and put each element back
    /// at its bind-time translation. Returns the number of listeners removed.
    pub fn unbind(self, stage: &mut Stage, events: &mut EventDispatcher<Stage>) -> usize {
        let mut removed = 0;
        for binding in self.bindings {
            removed += binding
                .listeners
                .iter()
                .filter(|id| events.remove(**id))
                .count();

            for property in [Property::TranslateX, Property::TranslateY] {
                let owner = stage.scheduler().owner(binding.element, property);
                if let Some(owner) = owner.filter(|id| stage.scheduler().is_transient(*id)) {
                    stage.kill(owner);
                }
            }

            if binding.engaged.get() {
                let document = stage.document_mut();
                if let Some(mut style) = document.inline_style(binding.element) {
                    style.translate_x = binding.rest_x;
                    style.translate_y = binding.rest_y;
                    document.set_inline_style(binding.element, style);
                }
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::div;
    use crate::document::Document;
    use crate::refs::ElementRefs;
    use vessel_core::Point;

    fn setup() -> (Stage, EventDispatcher<Stage>, ElementId) {
        let mut doc = Document::new();
        let mut refs = ElementRefs::new();
        let root = div()
            .w_full()
            .child(div().h(200.0))
            .child(
                div()
                    .class(MAGNETIC_CLASS)
                    .w(100.0)
                    .h(40.0)
                    .bind("button"),
            )
            .build(&mut doc, &mut refs);
        doc.set_root(root);
        let stage = Stage::new(doc, 800.0, 600.0);
        let button = refs.get("button").unwrap();
        (stage, EventDispatcher::new(), button)
    }

    fn run(stage: &mut Stage, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            stage.tick(16.0);
            elapsed += 16.0;
        }
    }

    fn translation(stage: &Stage, element: ElementId) -> (f32, f32) {
        let style = stage.document().get(element).unwrap().style;
        (
            style.resolved(Property::TranslateX),
            style.resolved(Property::TranslateY),
        )
    }

    #[test]
    fn test_follows_fraction_of_offset() {
        let (mut stage, mut events, button) = setup();
        let group = MagneticGroup::bind_class(&stage, &mut events, MAGNETIC_CLASS, MagneticConfig::default());
        assert_eq!(group.len(), 1);

        // Centre is (50, 220)
        let center = stage.client_center(button).unwrap();
        assert_eq!(center, Point::new(50.0, 220.0));
        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 90.0, 230.0));
        run(&mut stage, 500.0);

        let (x, y) = translation(&stage, button);
        assert!((x - 12.0).abs() < 1e-4, "x = {x}");
        assert!((y - 3.0).abs() < 1e-4, "y = {y}");
    }

    #[test]
    fn test_second_move_supersedes_first() {
        let (mut stage, mut events, button) = setup();
        MagneticGroup::bind(&stage, &mut events, &[button], MagneticConfig::default());

        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 90.0, 220.0));
        let first = stage.scheduler().owner(button, Property::TranslateX).unwrap();
        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 10.0, 220.0));
        let second = stage.scheduler().owner(button, Property::TranslateX).unwrap();

        assert_ne!(first, second);
        assert!(!stage.scheduler().contains(first));
    }

    #[test]
    fn test_leave_settles_exactly_at_origin() {
        let (mut stage, mut events, button) = setup();
        MagneticGroup::bind(&stage, &mut events, &[button], MagneticConfig::default());

        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 95.0, 235.0));
        run(&mut stage, 100.0);
        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_LEAVE, button, 200.0, 300.0));
        run(&mut stage, 800.0);

        assert_eq!(translation(&stage, button), (0.0, 0.0));
        assert!(!stage.has_active_animations());
    }

    #[test]
    fn test_unbind_silences_and_restores() {
        let (mut stage, mut events, button) = setup();
        let group = MagneticGroup::bind(&stage, &mut events, &[button], MagneticConfig::default());

        events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 95.0, 235.0));
        run(&mut stage, 100.0);
        assert_eq!(group.unbind(&mut stage, &mut events), 2);

        assert_eq!(events.listener_count(), 0);
        assert_eq!(stage.scheduler().timeline_count(), 0);
        let style = stage.document().get(button).unwrap().style;
        assert_eq!(style.translate_x, None);
        assert_eq!(style.translate_y, None);

        let invoked = events.dispatch(&mut stage, &Event::pointer(event_types::POINTER_MOVE, button, 95.0, 235.0));
        assert_eq!(invoked, 0);
    }
}
