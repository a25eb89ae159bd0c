//! Vessel Marketing Page
//!
//! The Vessel landing page as a headless document: content, composition and
//! the animation choreography wired up on mount.
//!
//! # Example
//!
//! ```rust
//! use vessel_app::{Page, PageContent};
//!
//! let mut page = Page::new(PageContent::default(), 1440.0, 900.0);
//! page.mount();
//!
//! // Let the hero entrance play out
//! page.settle(16.0, 10_000.0);
//! assert!(!page.stage().has_active_animations());
//!
//! page.unmount();
//! assert_eq!(page.trigger_count(), 0);
//! assert_eq!(page.listener_count(), 0);
//! ```

pub mod choreography;
pub mod content;
pub mod media;
pub mod page;
pub mod runtime;

pub use content::{
    CardSize, ContentError, DownloadButton, DownloadContent, FeatureCard, FeaturesContent,
    FooterContent, HeroContent, Link, NavContent, PageContent, StatementContent,
};
pub use media::{
    ColorBendsParams, DemoVideo, HeadlessMedia, MediaBackend, PlaybackError, PlaybackState,
    VideoPlayer,
};
pub use page::{classes, names, render};
pub use runtime::{Page, Runtime};
