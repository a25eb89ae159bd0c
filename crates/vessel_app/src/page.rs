//! Page rendering
//!
//! Builds the document for a `PageContent` and records the refs that setup
//! needs. Sizes approximate the shipped stylesheet at desktop widths.

use crate::content::{CardSize, FeatureCard, Link, PageContent};
use vessel_layout::{div, el, text, Document, ElementBuilder, ElementRefs, MAGNETIC_CLASS};

/// Named refs registered by `render`
pub mod names {
    pub const NAV: &str = "nav";
    pub const HERO_TEXT: &str = "hero_text";
    pub const TITLE: &str = "vessel_title";
    pub const DESCRIPTION: &str = "hero_desc";
    pub const HERO_CTA: &str = "hero_cta";
    pub const STATEMENT: &str = "statement";
    pub const FEATURES_HEADER: &str = "features_header";
    pub const FEATURES_TITLE: &str = "features_title";
    pub const FEATURES_SUBTITLE: &str = "features_subtitle";
    pub const FEATURE_CARD: &str = "feature_card";
    pub const DEMO_VIDEO: &str = "demo_video";
    pub const DOWNLOAD_HEADER: &str = "download_header";
    pub const DOWNLOAD_TITLE: &str = "download_title";
    pub const DOWNLOAD_SUBTITLE: &str = "download_subtitle";
    pub const BACKGROUND: &str = "background";
}

/// Classes the choreography selects by
pub mod classes {
    pub const NAV_LINK: &str = "nav-link";
    pub const NAV_CTA: &str = "nav-cta";
    pub const VESSEL_LETTER: &str = "vessel-letter";
    pub const DOWNLOAD_BUTTON: &str = "download-btn";
}

/// Build the page document. The returned refs are sealed.
pub fn render(content: &PageContent) -> (Document, ElementRefs) {
    let mut doc = Document::new();
    let mut refs = ElementRefs::new();

    let root = div()
        .class("page")
        .w_full()
        .child(background(content))
        .child(
            div()
                .class("content-layer")
                .w_full()
                .child(navbar(content))
                .child(hero(content))
                .child(statement(content))
                .child(features(content))
                .child(download(content))
                .child(footer(content)),
        )
        .build(&mut doc, &mut refs);
    doc.set_root(root);
    refs.seal();

    tracing::debug!(elements = doc.len(), refs = refs.len(), "page rendered");
    (doc, refs)
}

fn link(link: &Link, class: &str) -> ElementBuilder {
    text("a", &link.label)
        .class(class)
        .attr("href", &link.href)
        .w(96.0)
        .h(20.0)
}

fn background(content: &PageContent) -> ElementBuilder {
    content
        .background
        .to_attrs()
        .into_iter()
        .fold(
            div().class("bg-layer").absolute_fill().bind(names::BACKGROUND),
            |layer, (name, value)| layer.attr(name, &value),
        )
}

fn navbar(content: &PageContent) -> ElementBuilder {
    el("nav")
        .class("navbar")
        .bind(names::NAV)
        .flex_row()
        .justify_between()
        .items_center()
        .pxy(48.0, 0.0)
        .h(88.0)
        .child(
            div()
                .class("nav-left")
                .flex_row()
                .gap(32.0)
                .children(content.nav.links.iter().map(|l| link(l, classes::NAV_LINK))),
        )
        .child(
            div()
                .class("nav-center")
                .child(text("span", &content.brand).class("logo").w(120.0).h(32.0)),
        )
        .child(
            div().class("nav-right").child(
                text("button", &content.nav.cta.label)
                    .class(classes::NAV_CTA)
                    .class(MAGNETIC_CLASS)
                    .attr("href", &content.nav.cta.href)
                    .w(156.0)
                    .h(44.0),
            ),
        )
}

fn hero(content: &PageContent) -> ElementBuilder {
    let hero = &content.hero;
    el("section")
        .class("hero-section")
        .pxy(48.0, 48.0)
        .min_h(760.0)
        .justify_between()
        .child(
            div().class("hero-right").items_center().child(
                text("p", &hero.tagline)
                    .class("hero-tagline")
                    .bind(names::HERO_TEXT)
                    .w(420.0)
                    .h(48.0),
            ),
        )
        .child(
            div()
                .class("hero-bottom")
                .gap(32.0)
                .child(
                    el("h1")
                        .class("vessel-title")
                        .bind(names::TITLE)
                        .flex_row()
                        .h(220.0)
                        .children(content.title_letters().iter().map(|letter| {
                            text("span", letter)
                                .class(classes::VESSEL_LETTER)
                                .w(128.0)
                                .h(200.0)
                        })),
                )
                .child(
                    div()
                        .class("hero-info")
                        .flex_row()
                        .justify_between()
                        .items_center()
                        .child(
                            text("p", &hero.description)
                                .class("hero-desc")
                                .bind(names::DESCRIPTION)
                                .w(480.0)
                                .h(96.0),
                        )
                        .child(
                            text("button", &hero.cta.label)
                                .class("hero-cta")
                                .class(MAGNETIC_CLASS)
                                .bind(names::HERO_CTA)
                                .attr("href", &hero.cta.href)
                                .w(184.0)
                                .h(56.0),
                        ),
                ),
        )
}

fn statement(content: &PageContent) -> ElementBuilder {
    let statement = &content.statement;
    el("section")
        .class("statement-section")
        .bind(names::STATEMENT)
        .items_center()
        .justify_center()
        .pxy(48.0, 120.0)
        .child(
            el("p")
                .class("statement-text")
                .flex_row()
                .flex_wrap()
                .gap(16.0)
                .w_fraction(0.8)
                .child(text("span", &statement.lead).h(160.0))
                .child(
                    text("span", &statement.highlight)
                        .class("statement-highlight")
                        .h(160.0),
                )
                .child(text("span", &statement.tail).h(160.0)),
        )
}

fn feature_card(index: usize, card: &FeatureCard, content: &PageContent) -> ElementBuilder {
    let (size_class, width, height) = match card.size {
        CardSize::Large => (Some("bento-card--large"), 0.6, 480.0),
        CardSize::Wide => (Some("bento-card--wide"), 0.36, 480.0),
        CardSize::Regular => (None, 0.48, 280.0),
    };

    let mut builder = div()
        .class("bento-card")
        .bind_indexed(names::FEATURE_CARD, index)
        .w_fraction(width)
        .h(height)
        .p(32.0)
        .gap(16.0)
        .child(
            div()
                .class("bento-card-icon")
                .attr("icon", &card.icon)
                .w(48.0)
                .h(48.0),
        );
    if let Some(size_class) = size_class {
        builder = builder.class(size_class);
    }
    if card.preview {
        let video = &content.video;
        let mut player = el("video")
            .class("bento-card-video")
            .bind(names::DEMO_VIDEO)
            .attr("src", &video.src)
            .attr("muted", &video.muted.to_string())
            .attr("autoplay", &video.autoplay.to_string())
            .attr("loop", &video.looped.to_string())
            .attr("playsinline", "true")
            .flex_grow();
        if let Some(poster) = &video.poster {
            player = player.attr("poster", poster);
        }
        builder = builder.child(player);
    }
    builder.child(
        div()
            .class("bento-card-content")
            .gap(8.0)
            .child(text("h3", &card.title).class("bento-card-title").h(32.0))
            .child(text("p", &card.description).class("bento-card-desc").h(72.0)),
    )
}

fn features(content: &PageContent) -> ElementBuilder {
    let features = &content.features;
    el("section")
        .class("bento-section")
        .anchor("features")
        .pxy(48.0, 120.0)
        .gap(64.0)
        .child(
            div()
                .class("bento-section-header")
                .bind(names::FEATURES_HEADER)
                .gap(16.0)
                .child(
                    text("h2", &features.title)
                        .class("bento-section-title")
                        .bind(names::FEATURES_TITLE)
                        .h(64.0),
                )
                .child(
                    text("p", &features.subtitle)
                        .class("bento-section-subtitle")
                        .bind(names::FEATURES_SUBTITLE)
                        .h(28.0),
                ),
        )
        .child(
            div()
                .class("bento-grid")
                .flex_row()
                .flex_wrap()
                .justify_between()
                .gap(24.0)
                .children(
                    features
                        .cards
                        .iter()
                        .enumerate()
                        .map(|(i, card)| feature_card(i, card, content)),
                ),
        )
}

fn download(content: &PageContent) -> ElementBuilder {
    let download = &content.download;
    el("section")
        .class("download-section")
        .anchor("download")
        .items_center()
        .pxy(48.0, 120.0)
        .gap(48.0)
        .child(
            div()
                .class("download-header")
                .bind(names::DOWNLOAD_HEADER)
                .items_center()
                .gap(16.0)
                .child(
                    text("h2", &download.title)
                        .class("download-title")
                        .bind(names::DOWNLOAD_TITLE)
                        .w(640.0)
                        .h(64.0),
                )
                .child(
                    text("p", &download.subtitle)
                        .class("download-subtitle")
                        .bind(names::DOWNLOAD_SUBTITLE)
                        .w(640.0)
                        .h(28.0),
                ),
        )
        .child(
            div()
                .class("download-buttons")
                .flex_row()
                .gap(16.0)
                .children(download.buttons.iter().map(|button| {
                    text("a", &button.label)
                        .class(classes::DOWNLOAD_BUTTON)
                        .class(MAGNETIC_CLASS)
                        .attr("href", &button.href)
                        .attr("data-platform", &button.platform)
                        .w(220.0)
                        .h(56.0)
                })),
        )
}

fn footer(content: &PageContent) -> ElementBuilder {
    let footer = &content.footer;
    el("footer")
        .class("footer")
        .anchor("contact")
        .flex_row()
        .justify_between()
        .items_center()
        .pxy(48.0, 64.0)
        .child(
            div()
                .class("footer-brand")
                .gap(8.0)
                .child(text("span", &content.brand).class("logo").w(120.0).h(32.0))
                .child(text("p", &footer.tagline).class("footer-tagline").w(320.0).h(24.0)),
        )
        .child(
            div()
                .class("footer-links")
                .flex_row()
                .gap(24.0)
                .children(footer.links.iter().map(|l| link(l, "footer-link"))),
        )
        .child(
            text("p", &footer.copyright)
                .class("footer-copyright")
                .w(200.0)
                .h(20.0),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_registers_every_ref() {
        let (doc, refs) = render(&PageContent::default());
        assert!(refs.is_sealed());
        for name in [
            names::NAV,
            names::HERO_TEXT,
            names::TITLE,
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
        ] {
            let id = refs.get(name).unwrap_or_else(|| panic!("missing ref {name}"));
            assert!(doc.contains(id));
        }
        assert_eq!(refs.indexed(names::FEATURE_CARD).len(), 4);
    }

    #[test]
    fn test_title_is_split_into_letters() {
        let (doc, _) = render(&PageContent::default());
        let letters: String = doc
            .query_class(classes::VESSEL_LETTER)
            .into_iter()
            .filter_map(|id| doc.get(id).and_then(|e| e.text()).map(str::to_string))
            .collect();
        assert_eq!(letters, "Vessel");
    }

    #[test]
    fn test_anchors_exist() {
        let (doc, _) = render(&PageContent::default());
        for anchor in ["#features", "#download", "#contact"] {
            assert!(doc.find_anchor(anchor).is_some(), "{anchor}");
        }
    }

    #[test]
    fn test_magnetic_buttons() {
        let (doc, _) = render(&PageContent::default());
        // Nav CTA, hero CTA and one per download button
        assert_eq!(doc.query_class(MAGNETIC_CLASS).len(), 5);
    }

    #[test]
    fn test_video_only_in_preview_card() {
        let (doc, refs) = render(&PageContent::default());
        let video = refs.get(names::DEMO_VIDEO).unwrap();
        let card = refs.indexed(names::FEATURE_CARD)[0].1;
        assert_eq!(doc.get(video).unwrap().parent(), Some(card));
        assert_eq!(doc.get(video).unwrap().attr("loop"), Some("true"));
        assert_eq!(doc.query_class("bento-card-video").len(), 1);
    }
}
