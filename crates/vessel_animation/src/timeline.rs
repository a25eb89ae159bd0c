//! Timeline orchestration for multiple animations
//!
//! A `TimelineBuilder` is a declarative list of steps. Building it against an
//! `AnimationTarget` resolves every selector and fans collection steps out
//! into one `Tween` per matched element, producing a playable `Timeline`.
//!
//! # Example
//!
//! ```ignore
//! let builder = TimelineBuilder::new("hero")
//!     .defaults(Easing::EaseOutQuint)
//!     .step(TimelineStep::from(navbar, AnimationPreset::drop(80.0), 1000))
//!     .step(
//!         TimelineStep::from("nav-link", AnimationPreset::drop(20.0), 600)
//!             .stagger(80)
//!             .offset(-500),
//!     );
//! ```

use crate::easing::Easing;
use crate::properties::{KeyframeProperties, Property};
use crate::target::{AnimationTarget, Selector};
use crate::tween::Tween;
use rustc_hash::FxHashMap;
use vessel_core::ElementId;

/// Where a step starts, relative to the steps before it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Offset (ms) from the previous step's end. Negative values overlap.
    AfterPrevious(i32),
    /// Offset (ms) from the previous step's start
    WithPrevious(i32),
    /// Absolute time (ms) from the timeline start
    At(u32),
}

impl Default for Position {
    fn default() -> Self {
        Position::AfterPrevious(0)
    }
}

/// Direction a step animates in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenKind {
    /// From the given values to the element's current values
    From,
    /// From the element's current values to the given values
    To,
}

/// A declared animation step
#[derive(Clone, Debug)]
pub struct TimelineStep {
    pub selector: Selector,
    pub kind: TweenKind,
    pub props: KeyframeProperties,
    pub duration_ms: u32,
    /// Falls back to the timeline default when unset
    pub easing: Option<Easing>,
    pub position: Position,
    /// Delay between consecutive matched elements
    pub stagger_ms: u32,
    /// Delay before the first matched element
    pub delay_ms: u32,
}

impl TimelineStep {
    fn new(
        selector: impl Into<Selector>,
        kind: TweenKind,
        props: KeyframeProperties,
        duration_ms: u32,
    ) -> Self {
        Self {
            selector: selector.into(),
            kind,
            props,
            duration_ms,
            easing: None,
            position: Position::default(),
            stagger_ms: 0,
            delay_ms: 0,
        }
    }

    /// Entrance step: animate from `props` back to the element's current values
    pub fn from(selector: impl Into<Selector>, props: KeyframeProperties, duration_ms: u32) -> Self {
        Self::new(selector, TweenKind::From, props, duration_ms)
    }

    /// Animate from the element's current values to `props`
    pub fn to(selector: impl Into<Selector>, props: KeyframeProperties, duration_ms: u32) -> Self {
        Self::new(selector, TweenKind::To, props, duration_ms)
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Start relative to the previous step's end
    pub fn offset(mut self, offset_ms: i32) -> Self {
        self.position = Position::AfterPrevious(offset_ms);
        self
    }

    /// Start relative to the previous step's start
    pub fn with_previous(mut self, offset_ms: i32) -> Self {
        self.position = Position::WithPrevious(offset_ms);
        self
    }

    /// Start at an absolute time
    pub fn at(mut self, time_ms: u32) -> Self {
        self.position = Position::At(time_ms);
        self
    }

    pub fn stagger(mut self, stagger_ms: u32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Start offset of the element at `index`, relative to the step start
    pub fn element_offset_ms(&self, index: usize) -> u32 {
        self.delay_ms + self.stagger_ms * index as u32
    }

    /// Time from the step start until its last element finishes
    pub fn span_ms(&self, count: usize) -> u32 {
        match count {
            0 => 0,
            n => self.element_offset_ms(n - 1) + self.duration_ms,
        }
    }
}

/// Declarative timeline description
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    label: String,
    defaults: Easing,
    steps: Vec<TimelineStep>,
}

impl TimelineBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            defaults: Easing::EaseOutQuad,
            steps: Vec::new(),
        }
    }

    /// Default easing for steps that don't set one
    pub fn defaults(mut self, easing: Easing) -> Self {
        self.defaults = easing;
        self
    }

    pub fn step(mut self, step: TimelineStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn steps(&self) -> &[TimelineStep] {
        &self.steps
    }

    /// Resolve every step against `target` into a playable timeline.
    ///
    /// Steps matching no element are skipped and take no time.
    pub fn build<T: AnimationTarget + ?Sized>(&self, target: &T) -> Timeline {
        let mut timeline = Timeline::new(self.label.clone());
        let mut prev_start = 0.0f32;
        let mut prev_end = 0.0f32;

        for (index, step) in self.steps.iter().enumerate() {
            let elements = target.resolve(&step.selector);
            if elements.is_empty() {
                tracing::debug!(timeline = %self.label, step = index, "no element matched, step skipped");
                continue;
            }

            let start = match step.position {
                Position::AfterPrevious(offset) => (prev_end + offset as f32).max(0.0),
                Position::WithPrevious(offset) => (prev_start + offset as f32).max(0.0),
                Position::At(time) => time as f32,
            };
            let easing = step.easing.unwrap_or(self.defaults);

            for (i, element) in elements.iter().enumerate() {
                let Some(style) = target.inline_style(*element) else {
                    continue;
                };
                let current = style.resolved_for(&step.props);
                let (from, to) = match step.kind {
                    TweenKind::From => (step.props, current),
                    TweenKind::To => (current, step.props),
                };
                timeline.push(Tween {
                    target: *element,
                    start_ms: start + step.element_offset_ms(i) as f32,
                    duration_ms: step.duration_ms as f32,
                    easing,
                    from,
                    to,
                });
            }

            prev_start = start;
            prev_end = start + step.span_ms(elements.len()) as f32;
        }

        timeline
    }
}

/// Playback direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayDirection {
    #[default]
    Forward,
    Reverse,
}

/// A playable sequence of tweens
#[derive(Clone, Debug)]
pub struct Timeline {
    label: String,
    /// Sorted by start time; ties keep insertion order
    tweens: Vec<Tween>,
    duration_ms: f32,
    current_time: f32,
    direction: PlayDirection,
    playing: bool,
}

impl Timeline {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tweens: Vec::new(),
            duration_ms: 0.0,
            current_time: 0.0,
            direction: PlayDirection::Forward,
            playing: false,
        }
    }

    /// Add a tween, keeping start order
    pub fn push(&mut self, tween: Tween) {
        self.duration_ms = self.duration_ms.max(tween.end_ms());
        let index = self
            .tweens
            .partition_point(|existing| existing.start_ms <= tween.start_ms);
        self.tweens.insert(index, tween);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Idle time before the first tween starts
    pub fn lead_in_ms(&self) -> f32 {
        self.tweens.first().map_or(0.0, |tween| tween.start_ms)
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn direction(&self) -> PlayDirection {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Stopped at the end of its current direction
    pub fn is_complete(&self) -> bool {
        !self.playing
            && match self.direction {
                PlayDirection::Forward => self.current_time >= self.duration_ms,
                PlayDirection::Reverse => self.current_time <= 0.0,
            }
    }

    /// Playhead position (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Play forward from the current playhead
    pub fn play(&mut self) {
        self.direction = PlayDirection::Forward;
        self.playing = true;
    }

    /// Play backward from the current playhead
    pub fn reverse(&mut self) {
        self.direction = PlayDirection::Reverse;
        self.playing = true;
    }

    /// Play forward, skipping the lead-in if the playhead is still inside it
    pub fn replay(&mut self) {
        self.current_time = self.current_time.max(self.lead_in_ms());
        self.play();
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn restart(&mut self) {
        self.current_time = 0.0;
        self.play();
    }

    pub fn seek(&mut self, time_ms: f32) {
        self.current_time = time_ms.clamp(0.0, self.duration_ms);
    }

    /// Advance the playhead. Returns whether the timeline is still playing.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }

        match self.direction {
            PlayDirection::Forward => {
                self.current_time += dt_ms;
                if self.current_time >= self.duration_ms {
                    self.current_time = self.duration_ms;
                    self.playing = false;
                }
            }
            PlayDirection::Reverse => {
                self.current_time -= dt_ms;
                if self.current_time <= 0.0 {
                    self.current_time = 0.0;
                    self.playing = false;
                }
            }
        }

        self.playing
    }

    /// Every (element, property) pair this timeline animates
    pub fn keys(&self) -> impl Iterator<Item = (ElementId, Property)> + '_ {
        self.tweens
            .iter()
            .flat_map(|tween| tween.properties().map(move |p| (tween.target, p)))
    }

    /// Values at the current playhead
    pub fn sample(&self) -> FxHashMap<(ElementId, Property), f32> {
        self.sample_at(self.current_time)
    }

    /// Values at a given time.
    ///
    /// A tween that hasn't started only contributes its `from` values when it
    /// is the first tween touching that property; otherwise the earlier
    /// tween's values hold.
    pub fn sample_at(&self, time_ms: f32) -> FxHashMap<(ElementId, Property), f32> {
        let mut values = FxHashMap::default();
        for tween in &self.tweens {
            let started = tween.has_started(time_ms);
            for (property, value) in tween.sample(time_ms).iter() {
                let key = (tween.target, property);
                if started || !values.contains_key(&key) {
                    values.insert(key, value);
                }
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStage;

    fn rise() -> KeyframeProperties {
        KeyframeProperties::translate(0.0, 40.0).with_opacity(0.0)
    }

    #[test]
    fn test_sequential_steps_with_overlap() {
        let mut stage = TestStage::default();
        let a = stage.add("a");
        let b = stage.add("b");

        let timeline = TimelineBuilder::new("seq")
            .step(TimelineStep::from(a, rise(), 1000))
            .step(TimelineStep::from(b, rise(), 600).offset(-500))
            .build(&stage);

        let starts: Vec<_> = timeline.tweens().iter().map(|t| t.start_ms).collect();
        assert_eq!(starts, vec![0.0, 500.0]);
        assert_eq!(timeline.duration_ms(), 1100.0);
    }

    #[test]
    fn test_collection_fans_out_with_stagger() {
        let mut stage = TestStage::default();
        let lead = stage.add("lead");
        let links = stage.add_many("link", 4);

        let timeline = TimelineBuilder::new("stagger")
            .step(TimelineStep::from(lead, rise(), 1000))
            .step(TimelineStep::from("link", rise(), 600).stagger(80).offset(-500))
            .build(&stage);

        let link_starts: Vec<_> = timeline
            .tweens()
            .iter()
            .filter(|t| links.contains(&t.target))
            .map(|t| t.start_ms)
            .collect();
        assert_eq!(link_starts, vec![500.0, 580.0, 660.0, 740.0]);
        // Step end covers the last staggered element
        assert_eq!(timeline.duration_ms(), 1340.0);
    }

    #[test]
    fn test_missing_target_step_is_skipped() {
        let mut stage = TestStage::default();
        let a = stage.add("a");
        let c = stage.add("c");

        let timeline = TimelineBuilder::new("gaps")
            .step(TimelineStep::from(a, rise(), 1000))
            .step(TimelineStep::from("missing", rise(), 5000).offset(-200))
            .step(TimelineStep::from(Selector::optional(None), rise(), 5000))
            .step(TimelineStep::from(c, rise(), 500).offset(-300))
            .build(&stage);

        assert_eq!(timeline.tweens().len(), 2);
        assert_eq!(timeline.tweens()[1].start_ms, 700.0);
    }

    #[test]
    fn test_removed_element_is_skipped() {
        let mut stage = TestStage::default();
        let gone = stage.add("a");
        stage.remove(gone);

        let timeline = TimelineBuilder::new("gone")
            .step(TimelineStep::from(gone, rise(), 1000))
            .build(&stage);
        assert!(timeline.tweens().is_empty());
        assert_eq!(timeline.duration_ms(), 0.0);
    }

    #[test]
    fn test_from_step_ends_at_current_values() {
        let mut stage = TestStage::default();
        let a = stage.add("a");

        let timeline = TimelineBuilder::new("from")
            .step(TimelineStep::from(a, rise(), 100))
            .build(&stage);
        let tween = &timeline.tweens()[0];
        assert_eq!(tween.from, rise());
        assert_eq!(tween.to, KeyframeProperties::translate(0.0, 0.0).with_opacity(1.0));
    }

    #[test]
    fn test_positions_with_previous_and_absolute() {
        let mut stage = TestStage::default();
        let a = stage.add("a");
        let b = stage.add("b");
        let c = stage.add("c");

        let timeline = TimelineBuilder::new("positions")
            .step(TimelineStep::from(a, rise(), 1000).at(200))
            .step(TimelineStep::from(b, rise(), 100).with_previous(50))
            .step(TimelineStep::from(c, rise(), 100).offset(-10_000))
            .build(&stage);

        let starts: Vec<_> = timeline.tweens().iter().map(|t| t.start_ms).collect();
        // Negative offsets clamp at the timeline start
        assert_eq!(starts, vec![0.0, 200.0, 250.0]);
    }

    #[test]
    fn test_unstarted_later_tween_does_not_override() {
        let mut stage = TestStage::default();
        let a = stage.add("a");

        let timeline = TimelineBuilder::new("chain")
            .step(TimelineStep::from(a, KeyframeProperties::opacity(0.0), 100))
            .step(TimelineStep::to(a, KeyframeProperties::opacity(0.5), 100).offset(100))
            .build(&stage);

        let opacity = |t: f32| timeline.sample_at(t)[&(a, Property::Opacity)];
        assert_eq!(opacity(0.0), 0.0);
        assert_eq!(opacity(150.0), 1.0);
        assert_eq!(opacity(300.0), 0.5);
    }

    #[test]
    fn test_tick_forward_and_reverse() {
        let mut stage = TestStage::default();
        let a = stage.add("a");
        let mut timeline = TimelineBuilder::new("tick")
            .step(TimelineStep::from(a, rise(), 100))
            .build(&stage);

        timeline.play();
        assert!(timeline.tick(60.0));
        assert!(!timeline.tick(60.0));
        assert!(timeline.is_complete());
        assert_eq!(timeline.progress(), 1.0);

        timeline.reverse();
        assert!(timeline.tick(30.0));
        assert_eq!(timeline.current_time(), 70.0);
        assert!(!timeline.tick(100.0));
        assert!(timeline.is_complete());
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn test_replay_skips_lead_in() {
        let mut stage = TestStage::default();
        let a = stage.add("a");
        let mut timeline = TimelineBuilder::new("delayed")
            .step(TimelineStep::from(a, rise(), 800).delay(300))
            .build(&stage);
        assert_eq!(timeline.lead_in_ms(), 300.0);

        timeline.play();
        timeline.tick(200.0);
        assert_eq!(timeline.current_time(), 200.0);
        timeline.tick(900.0);
        timeline.reverse();
        timeline.tick(2000.0);
        assert_eq!(timeline.current_time(), 0.0);

        timeline.replay();
        assert_eq!(timeline.current_time(), 300.0);
        assert!(timeline.tick(16.0));
        assert!(timeline.sample()[&(a, Property::Opacity)] > 0.0);

        // Past the lead-in the playhead is left alone
        timeline.seek(700.0);
        timeline.replay();
        assert_eq!(timeline.current_time(), 700.0);
    }
}
