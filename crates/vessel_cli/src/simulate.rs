//! Headless page runs and schedule dumps

use crate::config::ScrollStep;
use serde::Serialize;
use vessel_animation::{KeyframeProperties, Property};
use vessel_app::choreography::hero_timeline;
use vessel_app::{classes, names, render, Page, PageContent};
use vessel_core::ElementId;
use vessel_layout::{Document, TriggerEvent, TriggerId};

/// Refs reported by name
const NAMED: [&str; 13] = [
    names::NAV,
    names::HERO_TEXT,
    names::DESCRIPTION,
    names::HERO_CTA,
    names::STATEMENT,
    names::FEATURES_HEADER,
    names::FEATURES_TITLE,
    names::FEATURES_SUBTITLE,
    names::DEMO_VIDEO,
    names::DOWNLOAD_HEADER,
    names::DOWNLOAD_TITLE,
    names::DOWNLOAD_SUBTITLE,
    names::BACKGROUND,
];

/// Classes reported element by element
const GROUPS: [&str; 4] = [
    classes::NAV_LINK,
    classes::NAV_CTA,
    classes::VESSEL_LETTER,
    classes::DOWNLOAD_BUTTON,
];

#[derive(Debug)]
pub struct SimulationOptions {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    pub duration_ms: u32,
    pub scroll: Vec<ScrollStep>,
    pub unmount: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
    pub elapsed_ms: f32,
    pub frames: u32,
    pub mounted: bool,
    pub timelines: usize,
    pub playing: bool,
    pub triggers: usize,
    pub listeners: usize,
    pub crossings: Vec<Crossing>,
    pub elements: Vec<ElementReport>,
}

#[derive(Debug, Serialize)]
pub struct Crossing {
    pub at_ms: f32,
    pub element: String,
    pub event: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ElementReport {
    pub name: String,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate_x: f32,
    pub at_rest: bool,
}

impl ElementReport {
    fn new(name: String, style: KeyframeProperties) -> Self {
        Self {
            name,
            opacity: style.resolved(Property::Opacity),
            x: style.resolved(Property::TranslateX),
            y: style.resolved(Property::TranslateY),
            scale: style.resolved(Property::Scale),
            rotate_x: style.resolved(Property::RotateX),
            at_rest: style.is_at_rest(),
        }
    }
}

/// Mount the page, play `duration_ms` of frames with the scripted scrolls
/// and report where everything ended up
pub fn run(content: PageContent, options: &SimulationOptions) -> SimulationReport {
    let mut page = Page::new(content, options.width, options.height);
    page.mount();

    let frame_ms = 1000.0 / options.fps.max(1) as f32;
    let mut scroll = options.scroll.clone();
    scroll.sort_by_key(|step| step.at_ms);
    let mut scroll = scroll.into_iter().peekable();

    let mut crossings = Vec::new();
    let mut elapsed = 0.0f32;
    let mut frames = 0;
    while elapsed < options.duration_ms as f32 {
        while let Some(step) = scroll.next_if(|step| step.at_ms as f32 <= elapsed) {
            let (offset, fired) = page.scroll_to(step.y);
            tracing::debug!(at_ms = elapsed, y = offset, "scrolled");
            record(&page, elapsed, fired, &mut crossings);
        }
        let fired = page.tick(frame_ms);
        record(&page, elapsed, fired, &mut crossings);
        elapsed += frame_ms;
        frames += 1;
    }

    if options.unmount {
        page.unmount();
    }

    tracing::info!(frames, elapsed_ms = elapsed, "simulation finished");

    let stage = page.stage();
    SimulationReport {
        width: stage.viewport().width,
        height: stage.viewport().height,
        scroll_y: stage.viewport().scroll_y(),
        elapsed_ms: elapsed,
        frames,
        mounted: page.is_mounted(),
        timelines: stage.scheduler().timeline_count(),
        playing: stage.has_active_animations(),
        triggers: page.trigger_count(),
        listeners: page.listener_count(),
        crossings,
        elements: element_reports(&page),
    }
}

fn record(
    page: &Page,
    at_ms: f32,
    fired: Vec<(TriggerId, TriggerEvent)>,
    crossings: &mut Vec<Crossing>,
) {
    let triggers = &page.runtime().triggers;
    let document = page.stage().document();
    crossings.extend(fired.into_iter().map(|(id, event)| Crossing {
        at_ms,
        element: triggers
            .config(id)
            .map(|config| describe(document, config.trigger))
            .unwrap_or_else(|| "?".to_string()),
        event: event_name(event),
    }));
}

fn element_reports(page: &Page) -> Vec<ElementReport> {
    let mut reports = Vec::new();
    for name in NAMED {
        if let Some(style) = page.style_of(name) {
            reports.push(ElementReport::new(name.to_string(), style));
        }
    }
    for (index, card) in page.refs().indexed(names::FEATURE_CARD) {
        if let Some(style) = page.style(card) {
            reports.push(ElementReport::new(
                format!("{}[{index}]", names::FEATURE_CARD),
                style,
            ));
        }
    }
    let document = page.stage().document();
    for class in GROUPS {
        for (index, element) in document.query_class(class).into_iter().enumerate() {
            if let Some(style) = page.style(element) {
                reports.push(ElementReport::new(format!(".{class}[{index}]"), style));
            }
        }
    }
    reports
}

fn event_name(event: TriggerEvent) -> &'static str {
    match event {
        TriggerEvent::Enter => "enter",
        TriggerEvent::Leave => "leave",
        TriggerEvent::EnterBack => "enter-back",
        TriggerEvent::LeaveBack => "leave-back",
    }
}

/// `tag.class` label for an element
fn describe(document: &Document, element: ElementId) -> String {
    match document.get(element) {
        Some(el) => match el.classes().first() {
            Some(class) => format!("{}.{class}", el.tag()),
            None => el.tag().to_string(),
        },
        None => "?".to_string(),
    }
}

/// One tween of the hero entrance
#[derive(Debug, Serialize)]
pub struct ScheduledTween {
    pub element: String,
    pub start_ms: f32,
    pub end_ms: f32,
    pub easing: String,
    pub properties: Vec<&'static str>,
}

/// Resolved hero entrance, in build order
pub fn hero_schedule(content: &PageContent) -> (Vec<ScheduledTween>, f32) {
    let (document, refs) = render(content);
    let timeline = hero_timeline(&refs).build(&document);
    let tweens = timeline
        .tweens()
        .iter()
        .map(|tween| ScheduledTween {
            element: describe(&document, tween.target),
            start_ms: tween.start_ms,
            end_ms: tween.end_ms(),
            easing: format!("{:?}", tween.easing),
            properties: tween.properties().map(Property::name).collect(),
        })
        .collect();
    (tweens, timeline.duration_ms())
}

pub fn print_report(report: &SimulationReport) {
    println!(
        "{} frames, {:.0}ms, viewport {}x{} at scroll {:.0}",
        report.frames, report.elapsed_ms, report.width, report.height, report.scroll_y
    );
    println!(
        "mounted: {}  timelines: {}  playing: {}  triggers: {}  listeners: {}",
        report.mounted, report.timelines, report.playing, report.triggers, report.listeners
    );

    if !report.crossings.is_empty() {
        println!();
        for crossing in &report.crossings {
            println!(
                "{:>8.0}ms  {:<12} {}",
                crossing.at_ms, crossing.event, crossing.element
            );
        }
    }

    println!();
    println!(
        "{:<24} {:>7} {:>8} {:>8} {:>6} {:>8}",
        "element", "opacity", "x", "y", "scale", "rotateX"
    );
    for element in &report.elements {
        println!(
            "{:<24} {:>7.2} {:>8.1} {:>8.1} {:>6.2} {:>8.1}{}",
            element.name,
            element.opacity,
            element.x,
            element.y,
            element.scale,
            element.rotate_x,
            if element.at_rest { "" } else { "  *" }
        );
    }
}

pub fn print_schedule(tweens: &[ScheduledTween], duration_ms: f32) {
    for tween in tweens {
        println!(
            "{:>6.0} → {:>6.0}  {:<24} {:<16} {}",
            tween.start_ms,
            tween.end_ms,
            tween.element,
            tween.easing,
            tween.properties.join(", ")
        );
    }
    println!("total {duration_ms:.0}ms");
}
