//! Mount-time choreography
//!
//! Everything the page animates: the hero entrance, scroll reveals for each
//! section and the magnetic buttons. `mount` records every registration in a
//! `Scope`, and disposing that scope undoes them in reverse order.

use crate::page::{classes, names};
use crate::runtime::Runtime;
use vessel_animation::{AnimationPreset, Easing, Selector, TimelineBuilder, TimelineStep};
use vessel_core::{ElementId, Scope};
use vessel_layout::{
    Anchor, ElementRefs, MagneticConfig, MagneticGroup, ScrollAnchor, Stage, TriggerConfig,
    MAGNETIC_CLASS,
};

/// `top 85%`
const SECTION_START: ScrollAnchor =
    ScrollAnchor::new(Anchor::Fraction(0.0), Anchor::Fraction(0.85));
/// `top 90%`
const CARD_START: ScrollAnchor = ScrollAnchor::new(Anchor::Fraction(0.0), Anchor::Fraction(0.9));

/// Load-time hero sequence
pub fn hero_timeline(refs: &ElementRefs) -> TimelineBuilder {
    TimelineBuilder::new("hero")
        .defaults(Easing::EaseOutQuint)
        .step(TimelineStep::from(
            Selector::optional(refs.get(names::NAV)),
            AnimationPreset::drop(80.0),
            1000,
        ))
        .step(
            TimelineStep::from(classes::NAV_LINK, AnimationPreset::drop(20.0), 600)
                .stagger(80)
                .offset(-500),
        )
        .step(TimelineStep::from(classes::NAV_CTA, AnimationPreset::pop(0.8), 500).offset(-300))
        .step(
            TimelineStep::from(
                Selector::optional(refs.get(names::HERO_TEXT)),
                AnimationPreset::rise(60.0),
                1000,
            )
            .ease(Easing::EaseOutQuart)
            .offset(-200),
        )
        .step(
            TimelineStep::from(classes::VESSEL_LETTER, AnimationPreset::flip_up(200.0, 90.0), 1200)
                .stagger(60)
                .ease(Easing::EaseOutQuint)
                .offset(-600),
        )
        .step(
            TimelineStep::from(
                Selector::optional(refs.get(names::DESCRIPTION)),
                AnimationPreset::rise(40.0),
                800,
            )
            .ease(Easing::EaseOutQuart)
            .offset(-500),
        )
        .step(
            TimelineStep::from(
                Selector::optional(refs.get(names::HERO_CTA)),
                AnimationPreset::rise(30.0),
                600,
            )
            .ease(Easing::EaseOutQuart)
            .offset(-400),
        )
}

/// Statement banner reveal
pub fn statement_timeline(statement: ElementId) -> TimelineBuilder {
    TimelineBuilder::new("statement").step(
        TimelineStep::from(statement, AnimationPreset::rise_scaled(80.0, 0.9), 1200)
            .ease(Easing::EaseOutQuart),
    )
}

/// Feature card reveal; cards further along the grid wait a little longer
pub fn card_timeline(index: usize, card: ElementId) -> TimelineBuilder {
    TimelineBuilder::new("feature-card").step(
        TimelineStep::from(card, AnimationPreset::rise_scaled(80.0, 0.95), 800)
            .delay(index as u32 * 100)
            .ease(Easing::EaseOutQuart),
    )
}

/// Download panel: title, subtitle, then the buttons one after another
pub fn download_timeline(refs: &ElementRefs) -> TimelineBuilder {
    TimelineBuilder::new("download")
        .defaults(Easing::EaseOutQuart)
        .step(TimelineStep::from(
            Selector::optional(refs.get(names::DOWNLOAD_TITLE)),
            AnimationPreset::rise(60.0),
            1000,
        ))
        .step(
            TimelineStep::from(
                Selector::optional(refs.get(names::DOWNLOAD_SUBTITLE)),
                AnimationPreset::rise(40.0),
                800,
            )
            .with_previous(200),
        )
        .step(
            TimelineStep::from(classes::DOWNLOAD_BUTTON, AnimationPreset::rise(30.0), 600)
                .stagger(100)
                .with_previous(200),
        )
}

/// Wire every animation, trigger and listener of the page
pub fn mount(runtime: &mut Runtime, refs: &ElementRefs) -> Scope<Runtime> {
    let mut scope = Scope::new("page");

    // Rest positions are read here, before any timeline renders a from-state
    runtime.magnetic = Some(MagneticGroup::bind_class(
        &runtime.stage,
        &mut runtime.events,
        MAGNETIC_CLASS,
        MagneticConfig::default(),
    ));

    let hero = runtime.stage.animate(&hero_timeline(refs));
    runtime.stage.play(hero);
    scope.defer("revert hero timeline", move |rt: &mut Runtime| {
        rt.stage.revert(hero);
    });

    match refs.get(names::STATEMENT) {
        Some(statement) => {
            let timeline = statement_timeline(statement);
            reveal(runtime, &mut scope, statement, SECTION_START, &timeline);
        }
        None => tracing::debug!("statement missing, reveal skipped"),
    }

    match refs.get(names::FEATURES_HEADER) {
        Some(header) => {
            let title = TimelineBuilder::new("features-title").step(
                TimelineStep::from(
                    Selector::optional(refs.get(names::FEATURES_TITLE)),
                    AnimationPreset::rise(60.0),
                    1000,
                )
                .ease(Easing::EaseOutQuart),
            );
            let subtitle = TimelineBuilder::new("features-subtitle").step(
                TimelineStep::from(
                    Selector::optional(refs.get(names::FEATURES_SUBTITLE)),
                    AnimationPreset::rise(40.0),
                    800,
                )
                .delay(200)
                .ease(Easing::EaseOutQuart),
            );
            reveal(runtime, &mut scope, header, SECTION_START, &title);
            reveal(runtime, &mut scope, header, SECTION_START, &subtitle);
        }
        None => tracing::debug!("features header missing, reveal skipped"),
    }

    for (index, card) in refs.indexed(names::FEATURE_CARD) {
        reveal(runtime, &mut scope, card, CARD_START, &card_timeline(index, card));
    }

    match refs.get(names::DOWNLOAD_HEADER) {
        Some(header) => {
            let timeline = download_timeline(refs);
            reveal(runtime, &mut scope, header, SECTION_START, &timeline);
        }
        None => tracing::debug!("download header missing, reveal skipped"),
    }

    scope.defer("unbind magnetic buttons", |rt: &mut Runtime| {
        if let Some(magnetic) = rt.magnetic.take() {
            magnetic.unbind(&mut rt.stage, &mut rt.events);
        }
    });

    tracing::info!(
        timelines = runtime.stage.scheduler().timeline_count(),
        triggers = runtime.triggers.len(),
        listeners = runtime.events.listener_count(),
        "page mounted"
    );
    scope
}

/// Play `builder` when `trigger` scrolls into view, reverse it on the way
/// back up. A step delay only holds back the first play.
fn reveal(
    runtime: &mut Runtime,
    scope: &mut Scope<Runtime>,
    trigger: ElementId,
    start: ScrollAnchor,
    builder: &TimelineBuilder,
) {
    let timeline = runtime.stage.animate(builder);
    let mut entered = false;
    let id = runtime.triggers.register(
        TriggerConfig::new(trigger, start),
        Some(Box::new(move |stage: &mut Stage| {
            if entered {
                stage.replay(timeline);
            } else {
                entered = true;
                stage.play(timeline);
            }
        })),
        Some(Box::new(move |stage: &mut Stage| {
            stage.reverse(timeline);
        })),
    );
    runtime.triggers.attach_animation(id, timeline);

    scope.defer("revert reveal", move |rt: &mut Runtime| {
        rt.stage.revert(timeline);
    });
    scope.defer("unregister trigger", move |rt: &mut Runtime| {
        rt.triggers.unregister(id, &mut rt.stage);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageContent;
    use crate::page::render;

    #[test]
    fn test_hero_schedule() {
        let (doc, refs) = render(&PageContent::default());
        let timeline = hero_timeline(&refs).build(&doc);

        let start_of = |id| {
            timeline
                .tweens()
                .iter()
                .find(|tween| tween.target == id)
                .map(|tween| tween.start_ms)
                .unwrap()
        };

        let nav = refs.get(names::NAV).unwrap();
        assert_eq!(start_of(nav), 0.0);

        // Links start 500ms before the navbar finishes, 80ms apart
        let links = doc.query_class(classes::NAV_LINK);
        let link_starts: Vec<f32> = links.iter().map(|id| start_of(*id)).collect();
        assert_eq!(link_starts, vec![500.0, 580.0, 660.0, 740.0]);

        // Links end at 1340, CTA at 1040..1540, tagline from 1340
        assert_eq!(start_of(doc.query_class(classes::NAV_CTA)[0]), 1040.0);
        assert_eq!(start_of(refs.get(names::HERO_TEXT).unwrap()), 1340.0);

        let letters = doc.query_class(classes::VESSEL_LETTER);
        assert_eq!(letters.len(), 6);
        assert_eq!(start_of(letters[0]), 1740.0);
        assert_eq!(start_of(letters[5]), 2040.0);

        assert_eq!(start_of(refs.get(names::DESCRIPTION).unwrap()), 2740.0);
        assert_eq!(start_of(refs.get(names::HERO_CTA).unwrap()), 3140.0);
        assert_eq!(timeline.duration_ms(), 3740.0);
    }

    #[test]
    fn test_download_schedule_staggers_buttons() {
        let (doc, refs) = render(&PageContent::default());
        let timeline = download_timeline(&refs).build(&doc);
        let buttons = doc.query_class(classes::DOWNLOAD_BUTTON);
        let starts: Vec<f32> = buttons
            .iter()
            .map(|id| {
                timeline
                    .tweens()
                    .iter()
                    .find(|tween| tween.target == *id)
                    .map(|tween| tween.start_ms)
                    .unwrap()
            })
            .collect();
        assert_eq!(starts, vec![400.0, 500.0, 600.0]);
    }

    #[test]
    fn test_card_delay_grows_with_index() {
        let (doc, refs) = render(&PageContent::default());
        let cards = refs.indexed(names::FEATURE_CARD);
        let (index, card) = cards[3];
        let timeline = card_timeline(index, card).build(&doc);
        assert_eq!(timeline.tweens()[0].start_ms, 300.0);
        assert_eq!(timeline.duration_ms(), 1100.0);
    }
}
