//! Viewport trigger registry
//!
//! Observes trigger elements against the scroll position and fires
//! callbacks as they cross their start and end anchors. Each trigger is a
//! small state machine:
//!
//! ```text
//! Before ──Enter──▶ Active ──Leave──▶ After
//!    ◀──LeaveBack──        ◀─EnterBack──
//! ```
//!
//! Positions are evaluated from layout rectangles, so an element's own
//! entrance translation never moves its trigger.

use crate::viewport::{Anchor, ScrollAnchor, Viewport};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use vessel_animation::TimelineId;
use vessel_core::{ElementId, Rect};

new_key_type! {
    pub struct TriggerId;
}

/// Which crossings reach the callbacks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// First Enter only, then the trigger goes dormant
    Once,
    /// Enter calls `on_enter`, LeaveBack calls `on_exit`, every time
    #[default]
    Reversible,
}

/// Scroll position relative to a trigger's region
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Never evaluated
    Pending,
    Before,
    Active,
    After,
    /// A `Once` trigger that already fired
    Dormant,
}

/// A region boundary crossing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Start crossed scrolling down
    Enter,
    /// End crossed scrolling down
    Leave,
    /// End crossed scrolling up
    EnterBack,
    /// Start crossed scrolling up
    LeaveBack,
}

/// What to observe
#[derive(Clone, Copy, Debug)]
pub struct TriggerConfig {
    pub trigger: ElementId,
    pub start: ScrollAnchor,
    pub end: ScrollAnchor,
    pub policy: ReplayPolicy,
}

impl TriggerConfig {
    /// Observe `trigger` from `start` until its bottom leaves the top of the
    /// viewport
    pub fn new(trigger: ElementId, start: ScrollAnchor) -> Self {
        Self {
            trigger,
            start,
            end: ScrollAnchor::new(Anchor::Fraction(1.0), Anchor::Fraction(0.0)),
            policy: ReplayPolicy::Reversible,
        }
    }

    pub fn end(mut self, end: ScrollAnchor) -> Self {
        self.end = end;
        self
    }

    pub fn once(mut self) -> Self {
        self.policy = ReplayPolicy::Once;
        self
    }

    pub fn policy(mut self, policy: ReplayPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// What the registry needs from the page
pub trait TriggerHost {
    /// Layout rectangle of an element in page coordinates
    fn trigger_rect(&self, element: ElementId) -> Option<Rect>;

    fn viewport(&self) -> Viewport;

    /// Stop an animation that belonged to an unregistered trigger
    fn cancel_animation(&mut self, animation: TimelineId);
}

/// Trigger callback
pub type TriggerCallback<C> = Box<dyn FnMut(&mut C)>;

struct Trigger<C> {
    config: TriggerConfig,
    state: TriggerState,
    on_enter: Option<TriggerCallback<C>>,
    on_exit: Option<TriggerCallback<C>>,
    animation: Option<TimelineId>,
}

/// All live triggers of a page
pub struct TriggerRegistry<C> {
    triggers: SlotMap<TriggerId, Trigger<C>>,
    order: Vec<TriggerId>,
}

impl<C: TriggerHost> TriggerRegistry<C> {
    pub fn new() -> Self {
        Self {
            triggers: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Start observing. Nothing fires until the next `evaluate`.
    pub fn register(
        &mut self,
        config: TriggerConfig,
        on_enter: Option<TriggerCallback<C>>,
        on_exit: Option<TriggerCallback<C>>,
    ) -> TriggerId {
        let id = self.triggers.insert(Trigger {
            config,
            state: TriggerState::Pending,
            on_enter,
            on_exit,
            animation: None,
        });
        self.order.push(id);
        tracing::debug!(?id, start = %config.start, end = %config.end, "trigger registered");
        id
    }

    /// Tie an animation to a trigger so unregistering cancels it
    pub fn attach_animation(&mut self, id: TriggerId, animation: TimelineId) -> bool {
        match self.triggers.get_mut(id) {
            Some(trigger) => {
                trigger.animation = Some(animation);
                true
            }
            None => false,
        }
    }

    /// Stop observing and cancel the attached animation
    pub fn unregister(&mut self, id: TriggerId, host: &mut C) -> bool {
        let Some(trigger) = self.triggers.remove(id) else {
            return false;
        };
        self.order.retain(|t| *t != id);
        if let Some(animation) = trigger.animation {
            host.cancel_animation(animation);
        }
        tracing::debug!(?id, "trigger unregistered");
        true
    }

    /// Run one evaluation pass against the current scroll position and
    /// return the crossings in firing order
    pub fn evaluate(&mut self, host: &mut C) -> Vec<(TriggerId, TriggerEvent)> {
        let mut fired = Vec::new();
        let ids: SmallVec<[TriggerId; 16]> = self.order.iter().copied().collect();

        for id in ids {
            let Some(trigger) = self.triggers.get(id) else {
                continue;
            };
            if trigger.state == TriggerState::Dormant {
                continue;
            }
            let Some(rect) = host.trigger_rect(trigger.config.trigger) else {
                tracing::debug!(?id, "trigger element missing, skipping");
                continue;
            };
            let viewport = host.viewport();
            let next = region_state(&trigger.config, &rect, &viewport);
            let events = transition(trigger.state, next);

            let Some(trigger) = self.triggers.get_mut(id) else {
                continue;
            };
            trigger.state = next;
            for event in events {
                tracing::debug!(?id, ?event, scroll_y = viewport.scroll_y(), "trigger crossed");
                fired.push((id, event));
                match (trigger.config.policy, event) {
                    (ReplayPolicy::Once, TriggerEvent::Enter) => {
                        trigger.state = TriggerState::Dormant;
                        if let Some(on_enter) = trigger.on_enter.as_mut() {
                            on_enter(host);
                        }
                        break;
                    }
                    (ReplayPolicy::Reversible, TriggerEvent::Enter) => {
                        if let Some(on_enter) = trigger.on_enter.as_mut() {
                            on_enter(host);
                        }
                    }
                    (ReplayPolicy::Reversible, TriggerEvent::LeaveBack) => {
                        if let Some(on_exit) = trigger.on_exit.as_mut() {
                            on_exit(host);
                        }
                    }
                    _ => {}
                }
            }
        }
        fired
    }

    pub fn state(&self, id: TriggerId) -> Option<TriggerState> {
        self.triggers.get(id).map(|trigger| trigger.state)
    }

    pub fn config(&self, id: TriggerId) -> Option<TriggerConfig> {
        self.triggers.get(id).map(|trigger| trigger.config)
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl<C: TriggerHost> Default for TriggerRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn region_state(config: &TriggerConfig, rect: &Rect, viewport: &Viewport) -> TriggerState {
    let scroll = viewport.scroll_y();
    let start = config.start.scroll_position(rect, viewport.height);
    let end = config.end.scroll_position(rect, viewport.height);
    if scroll < start {
        TriggerState::Before
    } else if scroll > end {
        TriggerState::After
    } else {
        TriggerState::Active
    }
}

fn transition(from: TriggerState, to: TriggerState) -> SmallVec<[TriggerEvent; 2]> {
    use TriggerEvent::*;
    use TriggerState::*;

    let events: &[TriggerEvent] = match (from, to) {
        (Pending | Before, Active) => &[Enter],
        (Pending | Before, After) => &[Enter, Leave],
        (Active, After) => &[Leave],
        (After, Active) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBack],
        (Active, Before) => &[LeaveBack],
        _ => &[],
    };
    events.iter().copied().collect()
}
