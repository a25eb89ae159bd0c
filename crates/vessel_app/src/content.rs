//! Page content
//!
//! Every piece of copy, link and media parameter on the page. Content is
//! plain configuration data: it loads from TOML, and any section left out
//! falls back to the shipped page.

use crate::media::{ColorBendsParams, DemoVideo};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("brand name must not be empty")]
    EmptyBrand,
    #[error("hero title must not be empty")]
    EmptyTitle,
    #[error("{section}: `{href}` is neither an in-page anchor nor an absolute URL")]
    InvalidHref { section: &'static str, href: String },
    #[error("background: invalid colours {0:?}")]
    InvalidColors(Vec<String>),
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize content: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavContent {
    pub links: Vec<Link>,
    pub cta: Link,
}

impl Default for NavContent {
    fn default() -> Self {
        Self {
            links: vec![
                Link::new("Home", "#"),
                Link::new("Features", "#features"),
                Link::new("Download", "#download"),
                Link::new("Contact", "#contact"),
            ],
            cta: Link::new("Get Started", "#download"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub tagline: String,
    /// Rendered one letter per element
    pub title: String,
    pub description: String,
    pub cta: Link,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            tagline: "Enter the Future.".to_string(),
            title: "Vessel".to_string(),
            description: "Vessel is a multi-agent management system that helps you manage and \
                          create your agents in one place seamlessly using hero-mode or grid-view."
                .to_string(),
            cta: Link::new("Get Started", "#download"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementContent {
    pub lead: String,
    pub highlight: String,
    pub tail: String,
}

impl Default for StatementContent {
    fn default() -> Self {
        Self {
            lead: "Because dealing with a gazillion terminals".to_string(),
            highlight: "FUCKING".to_string(),
            tail: "sucks.".to_string(),
        }
    }
}

/// Footprint of a card in the feature grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Large,
    Wide,
    #[default]
    Regular,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub size: CardSize,
    /// Icon name understood by the renderer
    #[serde(default)]
    pub icon: String,
    /// Whether the demo video plays inside this card
    #[serde(default)]
    pub preview: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesContent {
    pub title: String,
    pub subtitle: String,
    pub cards: Vec<FeatureCard>,
}

impl Default for FeaturesContent {
    fn default() -> Self {
        let card = |title: &str, description: &str, size, icon: &str, preview| FeatureCard {
            title: title.to_string(),
            description: description.to_string(),
            size,
            icon: icon.to_string(),
            preview,
        };
        Self {
            title: "What We Build".to_string(),
            subtitle: "The building blocks of perception-driven technology.".to_string(),
            cards: vec![
                card(
                    "Perception-Driven Environments",
                    "Digital spaces that adapt in real-time to user behavior, context, and intent \
                     \u{2014} environments that feel alive and responsive to every interaction.",
                    CardSize::Large,
                    "globe",
                    true,
                ),
                card(
                    "AI-Native Architecture",
                    "Intelligence woven into every layer. Not bolted on, but built in from the \
                     ground up.",
                    CardSize::Wide,
                    "layers",
                    false,
                ),
                card(
                    "System Design",
                    "Robust, scalable systems engineered for the demands of tomorrow.",
                    CardSize::Regular,
                    "monitor",
                    false,
                ),
                card(
                    "Intuitive Interfaces",
                    "Experiences that feel natural, reducing friction between human intent and \
                     digital response.",
                    CardSize::Regular,
                    "bell",
                    false,
                ),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadButton {
    pub platform: String,
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadContent {
    pub title: String,
    pub subtitle: String,
    pub buttons: Vec<DownloadButton>,
}

impl Default for DownloadContent {
    fn default() -> Self {
        let button = |platform: &str, label: &str| DownloadButton {
            platform: platform.to_string(),
            label: label.to_string(),
            href: format!("https://github.com/vessel-app/vessel/releases/latest#{platform}"),
        };
        Self {
            title: "Download Vessel".to_string(),
            subtitle: "Every agent, every terminal, one window.".to_string(),
            buttons: vec![
                button("macos", "Download for macOS"),
                button("windows", "Download for Windows"),
                button("linux", "Download for Linux"),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterContent {
    pub tagline: String,
    pub links: Vec<Link>,
    pub copyright: String,
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            tagline: "Perception-driven technology.".to_string(),
            links: vec![
                Link::new("Features", "#features"),
                Link::new("Download", "#download"),
                Link::new("GitHub", "https://github.com/vessel-app/vessel"),
            ],
            copyright: "\u{a9} 2025 Vessel".to_string(),
        }
    }
}

/// The whole page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub brand: String,
    pub nav: NavContent,
    pub hero: HeroContent,
    pub statement: StatementContent,
    pub features: FeaturesContent,
    pub download: DownloadContent,
    pub footer: FooterContent,
    pub background: ColorBendsParams,
    pub video: DemoVideo,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            brand: "Vessel".to_string(),
            nav: NavContent::default(),
            hero: HeroContent::default(),
            statement: StatementContent::default(),
            features: FeaturesContent::default(),
            download: DownloadContent::default(),
            footer: FooterContent::default(),
            background: ColorBendsParams::default(),
            video: DemoVideo::default(),
        }
    }
}

impl PageContent {
    /// Parse and validate TOML content
    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let content: PageContent = toml::from_str(source)?;
        content.validate()?;
        Ok(content)
    }

    pub fn to_toml(&self) -> Result<String, ContentError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.brand.trim().is_empty() {
            return Err(ContentError::EmptyBrand);
        }
        if self.hero.title.trim().is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        let hrefs = self
            .nav
            .links
            .iter()
            .map(|link| ("nav", link.href.as_str()))
            .chain([("nav", self.nav.cta.href.as_str())])
            .chain([("hero", self.hero.cta.href.as_str())])
            .chain(
                self.download
                    .buttons
                    .iter()
                    .map(|button| ("download", button.href.as_str())),
            )
            .chain(self.footer.links.iter().map(|link| ("footer", link.href.as_str())));
        for (section, href) in hrefs {
            if !is_valid_href(href) {
                return Err(ContentError::InvalidHref {
                    section,
                    href: href.to_string(),
                });
            }
        }

        let invalid = self.background.invalid_colors();
        if !invalid.is_empty() {
            return Err(ContentError::InvalidColors(
                invalid.into_iter().map(str::to_string).collect(),
            ));
        }
        Ok(())
    }

    /// Hero title split into the letters that animate independently
    pub fn title_letters(&self) -> Vec<String> {
        self.hero.title.chars().map(String::from).collect()
    }
}

/// `#fragment` or `scheme://...`
fn is_valid_href(href: &str) -> bool {
    if href.starts_with('#') {
        return !href.contains(char::is_whitespace);
    }
    match href.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
                && !rest.is_empty()
        }
        None => false,
    }
}
