//! Animation scheduler
//!
//! Owns every live timeline and applies their values to an `AnimationTarget`
//! each frame. Each (element, property) pair has at most one owning
//! timeline: playing a timeline claims its pairs, and only the owner may
//! write them. A transient timeline (one-shot interaction tweens) is dropped
//! as soon as it loses every pair or finishes.

use crate::properties::Property;
use crate::target::AnimationTarget;
use crate::timeline::{Timeline, TimelineBuilder};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use vessel_core::ElementId;

new_key_type! {
    pub struct TimelineId;
}

type PropertyKey = (ElementId, Property);

struct ScheduledTimeline {
    timeline: Timeline,
    /// Inline values before the timeline first touched them
    snapshot: FxHashMap<PropertyKey, Option<f32>>,
    transient: bool,
}

/// The animation scheduler that ticks all active timelines
pub struct AnimationScheduler {
    timelines: SlotMap<TimelineId, ScheduledTimeline>,
    owners: FxHashMap<PropertyKey, TimelineId>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            timelines: SlotMap::with_key(),
            owners: FxHashMap::default(),
        }
    }

    /// Build and register a paused timeline.
    ///
    /// Its starting values are rendered immediately, so entrance targets are
    /// hidden before playback begins.
    pub fn create<T>(&mut self, builder: &TimelineBuilder, target: &mut T) -> TimelineId
    where
        T: AnimationTarget + ?Sized,
    {
        let timeline = builder.build(target);
        self.insert(timeline, false, target)
    }

    /// Build, register and play a one-shot timeline that is dropped when it
    /// finishes or is superseded
    pub fn animate_transient<T>(&mut self, builder: &TimelineBuilder, target: &mut T) -> TimelineId
    where
        T: AnimationTarget + ?Sized,
    {
        let timeline = builder.build(target);
        let id = self.insert(timeline, true, target);
        self.play(id, target);
        id
    }

    fn insert<T>(&mut self, timeline: Timeline, transient: bool, target: &mut T) -> TimelineId
    where
        T: AnimationTarget + ?Sized,
    {
        let mut snapshot = FxHashMap::default();
        for key in timeline.keys() {
            snapshot.entry(key).or_insert_with(|| {
                target
                    .inline_style(key.0)
                    .and_then(|style| style.get(key.1))
            });
        }

        tracing::trace!(
            timeline = timeline.label(),
            tweens = timeline.tweens().len(),
            duration_ms = timeline.duration_ms(),
            "timeline registered"
        );

        let id = self.timelines.insert(ScheduledTimeline {
            timeline,
            snapshot,
            transient,
        });
        self.claim(id);
        self.render(id, target);
        id
    }

    /// Play forward from the current playhead
    pub fn play<T>(&mut self, id: TimelineId, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        self.start(id, target, Timeline::play)
    }

    /// Play backward from the current playhead
    pub fn reverse<T>(&mut self, id: TimelineId, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        self.start(id, target, Timeline::reverse)
    }

    /// Play forward again without waiting out the lead-in
    pub fn replay<T>(&mut self, id: TimelineId, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        self.start(id, target, Timeline::replay)
    }

    /// Rewind and play forward
    pub fn restart<T>(&mut self, id: TimelineId, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        self.start(id, target, Timeline::restart)
    }

    fn start<T, F>(&mut self, id: TimelineId, target: &mut T, action: F) -> bool
    where
        T: AnimationTarget + ?Sized,
        F: FnOnce(&mut Timeline),
    {
        let Some(entry) = self.timelines.get_mut(id) else {
            return false;
        };
        action(&mut entry.timeline);
        self.claim(id);
        self.render(id, target);
        true
    }

    /// Stop the playhead where it is. The timeline stays revertible.
    pub fn pause(&mut self, id: TimelineId) -> bool {
        match self.timelines.get_mut(id) {
            Some(entry) => {
                entry.timeline.pause();
                true
            }
            None => false,
        }
    }

    /// Move the playhead and render
    pub fn seek<T>(&mut self, id: TimelineId, time_ms: f32, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        let Some(entry) = self.timelines.get_mut(id) else {
            return false;
        };
        entry.timeline.seek(time_ms);
        self.render(id, target);
        true
    }

    /// Restore every property the timeline animated to its value before the
    /// timeline existed, then drop the timeline.
    ///
    /// Safe mid-playback; reverting twice is a no-op.
    pub fn revert<T>(&mut self, id: TimelineId, target: &mut T) -> bool
    where
        T: AnimationTarget + ?Sized,
    {
        let Some(entry) = self.timelines.remove(id) else {
            return false;
        };

        for ((element, property), value) in entry.snapshot {
            if self.owners.get(&(element, property)) == Some(&id) {
                self.owners.remove(&(element, property));
            }
            if let Some(mut style) = target.inline_style(element) {
                style.set(property, value);
                target.set_inline_style(element, style);
            }
        }

        tracing::debug!(timeline = entry.timeline.label(), "timeline reverted");
        true
    }

    /// Drop a timeline, leaving its last rendered values in place
    pub fn kill(&mut self, id: TimelineId) -> bool {
        if self.timelines.remove(id).is_none() {
            return false;
        }
        self.owners.retain(|_, owner| *owner != id);
        true
    }

    /// Advance all playing timelines and render them
    pub fn tick<T>(&mut self, dt_ms: f32, target: &mut T)
    where
        T: AnimationTarget + ?Sized,
    {
        let playing: SmallVec<[TimelineId; 16]> = self
            .timelines
            .iter()
            .filter(|(_, entry)| entry.timeline.is_playing())
            .map(|(id, _)| id)
            .collect();

        for id in playing {
            let Some(entry) = self.timelines.get_mut(id) else {
                continue;
            };
            let still_playing = entry.timeline.tick(dt_ms);
            let transient = entry.transient;
            self.render(id, target);

            if !still_playing && transient {
                self.kill(id);
            }
        }
    }

    /// Check if any timeline is still playing
    pub fn has_active_animations(&self) -> bool {
        self.timelines.values().any(|entry| entry.timeline.is_playing())
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id).map(|entry| &entry.timeline)
    }

    pub fn contains(&self, id: TimelineId) -> bool {
        self.timelines.contains_key(id)
    }

    /// Whether the timeline was started with `animate_transient`
    pub fn is_transient(&self, id: TimelineId) -> bool {
        self.timelines.get(id).is_some_and(|entry| entry.transient)
    }

    /// Get the number of timelines in the scheduler
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// Iterate over all timelines
    pub fn timelines_iter(&self) -> impl Iterator<Item = (TimelineId, &Timeline)> {
        self.timelines.iter().map(|(id, entry)| (id, &entry.timeline))
    }

    /// Timeline currently allowed to write a property
    pub fn owner(&self, element: ElementId, property: Property) -> Option<TimelineId> {
        self.owners.get(&(element, property)).copied()
    }

    /// Make `id` the owner of every pair it animates
    fn claim(&mut self, id: TimelineId) {
        let Some(entry) = self.timelines.get(id) else {
            return;
        };
        let keys: FxHashSet<PropertyKey> = entry.timeline.keys().collect();

        let mut displaced: SmallVec<[TimelineId; 4]> = SmallVec::new();
        for key in keys {
            if let Some(previous) = self.owners.insert(key, id) {
                if previous != id && !displaced.contains(&previous) {
                    displaced.push(previous);
                }
            }
        }

        for previous in displaced {
            let transient = self
                .timelines
                .get(previous)
                .is_some_and(|entry| entry.transient);
            let still_owns = self.owners.values().any(|owner| *owner == previous);
            if transient && !still_owns {
                tracing::trace!(?previous, superseded_by = ?id, "transient timeline superseded");
                self.timelines.remove(previous);
            }
        }
    }

    /// Write the timeline's current values for every pair it owns
    fn render<T>(&self, id: TimelineId, target: &mut T)
    where
        T: AnimationTarget + ?Sized,
    {
        let Some(entry) = self.timelines.get(id) else {
            return;
        };

        for ((element, property), value) in entry.timeline.sample() {
            if self.owners.get(&(element, property)) != Some(&id) {
                continue;
            }
            if let Some(mut style) = target.inline_style(element) {
                style.set(property, Some(value));
                target.set_inline_style(element, style);
            }
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::properties::KeyframeProperties;
    use crate::test_support::TestStage;
    use crate::timeline::TimelineStep;

    fn entrance(selector: &str, n_stagger: u32) -> TimelineBuilder {
        TimelineBuilder::new("entrance")
            .defaults(Easing::EaseOutQuint)
            .step(
                TimelineStep::from(
                    selector,
                    KeyframeProperties::translate(0.0, 200.0)
                        .with_opacity(0.0)
                        .with_rotate_x(90.0),
                    1200,
                )
                .stagger(n_stagger),
            )
    }

    fn run(scheduler: &mut AnimationScheduler, stage: &mut TestStage, ms: f32) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            scheduler.tick(16.0, stage);
            elapsed += 16.0;
        }
    }

    #[test]
    fn test_create_renders_from_state_immediately() {
        let mut stage = TestStage::default();
        let letters = stage.add_many("letter", 6);
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("letter", 60), &mut stage);
        assert!(!scheduler.timeline(id).unwrap().is_playing());
        for letter in &letters {
            assert_eq!(stage.style(*letter).opacity, Some(0.0));
            assert_eq!(stage.style(*letter).translate_y, Some(200.0));
        }
    }

    #[test]
    fn test_playback_ends_at_rest() {
        let mut stage = TestStage::default();
        let letters = stage.add_many("letter", 6);
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("letter", 60), &mut stage);
        scheduler.play(id, &mut stage);
        run(&mut scheduler, &mut stage, 2000.0);

        assert!(!scheduler.has_active_animations());
        for letter in &letters {
            let style = stage.style(*letter);
            assert!(style.is_at_rest(), "{style:?}");
            assert_eq!(style.opacity, Some(1.0));
        }
    }

    #[test]
    fn test_revert_mid_playback_restores_inline_style() {
        let mut stage = TestStage::default();
        let letters = stage.add_many("letter", 3);
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("letter", 60), &mut stage);
        scheduler.play(id, &mut stage);
        run(&mut scheduler, &mut stage, 400.0);

        assert!(scheduler.revert(id, &mut stage));
        for letter in &letters {
            assert!(stage.style(*letter).is_empty());
        }
        assert_eq!(scheduler.timeline_count(), 0);
        assert_eq!(scheduler.owner(letters[0], Property::Opacity), None);

        // Idempotent
        assert!(!scheduler.revert(id, &mut stage));
        assert!(stage.style(letters[0]).is_empty());
    }

    #[test]
    fn test_revert_keeps_preexisting_inline_values() {
        let mut stage = TestStage::default();
        let card = stage.add("card");
        stage.set_inline_style(card, KeyframeProperties::opacity(0.8));
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("card", 0), &mut stage);
        scheduler.play(id, &mut stage);
        run(&mut scheduler, &mut stage, 1500.0);
        assert_eq!(stage.style(card).opacity, Some(0.8));

        scheduler.revert(id, &mut stage);
        assert_eq!(stage.style(card), KeyframeProperties::opacity(0.8));
    }

    #[test]
    fn test_transient_tween_supersedes_previous() {
        let mut stage = TestStage::default();
        let button = stage.add("button");
        let mut scheduler = AnimationScheduler::new();

        let follow = |x: f32| {
            TimelineBuilder::new("follow").step(TimelineStep::to(
                button,
                KeyframeProperties::translate(x, 0.0),
                400,
            ))
        };

        let first = scheduler.animate_transient(&follow(30.0), &mut stage);
        scheduler.tick(16.0, &mut stage);
        let second = scheduler.animate_transient(&follow(-30.0), &mut stage);

        assert!(!scheduler.contains(first));
        assert_eq!(scheduler.owner(button, Property::TranslateX), Some(second));

        run(&mut scheduler, &mut stage, 500.0);
        assert_eq!(stage.style(button).translate_x, Some(-30.0));
        // Finished transients are dropped
        assert_eq!(scheduler.timeline_count(), 0);
    }

    #[test]
    fn test_non_owner_does_not_write() {
        let mut stage = TestStage::default();
        let card = stage.add("card");
        let mut scheduler = AnimationScheduler::new();

        let entrance_id = scheduler.create(&entrance("card", 0), &mut stage);
        scheduler.play(entrance_id, &mut stage);

        let nudge = TimelineBuilder::new("nudge").step(TimelineStep::to(
            card,
            KeyframeProperties::translate(0.0, -10.0),
            100,
        ));
        scheduler.animate_transient(&nudge, &mut stage);
        run(&mut scheduler, &mut stage, 1500.0);

        // The entrance still owns opacity but lost translate_y to the nudge
        assert_eq!(stage.style(card).translate_y, Some(-10.0));
        assert_eq!(stage.style(card).opacity, Some(1.0));
        assert_eq!(scheduler.owner(card, Property::Opacity), Some(entrance_id));
    }

    #[test]
    fn test_reverse_returns_to_from_state() {
        let mut stage = TestStage::default();
        let card = stage.add("card");
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("card", 0), &mut stage);
        scheduler.play(id, &mut stage);
        run(&mut scheduler, &mut stage, 600.0);
        scheduler.reverse(id, &mut stage);
        run(&mut scheduler, &mut stage, 1500.0);

        assert_eq!(stage.style(card).opacity, Some(0.0));
        assert!(scheduler.timeline(id).unwrap().is_complete());
    }

    #[test]
    fn test_kill_leaves_values() {
        let mut stage = TestStage::default();
        let card = stage.add("card");
        let mut scheduler = AnimationScheduler::new();

        let id = scheduler.create(&entrance("card", 0), &mut stage);
        assert!(scheduler.kill(id));
        assert!(!scheduler.kill(id));
        assert_eq!(stage.style(card).opacity, Some(0.0));
        assert_eq!(scheduler.owner(card, Property::Opacity), None);
    }
}
