//! Media collaborators
//!
//! The decorative background and the demo video are rendered elsewhere. The
//! page only carries their parameters and asks the video to start once its
//! data has loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the warped colour-band background
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorBendsParams {
    /// Palette as CSS hex colours; empty uses the effect's built-in palette
    pub colors: Vec<String>,
    pub speed: f32,
    pub scale: f32,
    pub frequency: f32,
    pub warp_strength: f32,
    pub mouse_influence: f32,
    pub parallax: f32,
    pub noise: f32,
    pub transparent: bool,
    /// Degrees per second
    pub auto_rotate: f32,
    /// Degrees
    pub rotation: f32,
}

impl Default for ColorBendsParams {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            speed: 0.2,
            scale: 1.0,
            frequency: 1.0,
            warp_strength: 1.0,
            mouse_influence: 1.0,
            parallax: 0.5,
            noise: 0.1,
            transparent: false,
            auto_rotate: 0.0,
            rotation: 45.0,
        }
    }
}

impl ColorBendsParams {
    /// Parameters as element attributes, for the renderer to pick up
    pub fn to_attrs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data-colors", self.colors.join(",")),
            ("data-speed", self.speed.to_string()),
            ("data-scale", self.scale.to_string()),
            ("data-frequency", self.frequency.to_string()),
            ("data-warp-strength", self.warp_strength.to_string()),
            ("data-mouse-influence", self.mouse_influence.to_string()),
            ("data-parallax", self.parallax.to_string()),
            ("data-noise", self.noise.to_string()),
            ("data-transparent", self.transparent.to_string()),
            ("data-auto-rotate", self.auto_rotate.to_string()),
            ("data-rotation", self.rotation.to_string()),
        ]
    }

    /// Colours that are not `#rgb` or `#rrggbb`
    pub fn invalid_colors(&self) -> Vec<&str> {
        self.colors
            .iter()
            .map(String::as_str)
            .filter(|color| !is_hex_color(color))
            .collect()
    }
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// The feature preview video
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoVideo {
    pub src: String,
    pub poster: Option<String>,
    pub muted: bool,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for DemoVideo {
    fn default() -> Self {
        Self {
            src: "/media/vessel-preview.mp4".to_string(),
            poster: None,
            muted: true,
            autoplay: true,
            looped: true,
        }
    }
}

/// Why a playback request failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    #[error("autoplay rejected: {0}")]
    AutoplayRejected(String),
    #[error("media source unavailable: {0}")]
    Unavailable(String),
}

/// Something that can start a video
pub trait MediaBackend {
    fn play(&mut self, video: &DemoVideo) -> Result<(), PlaybackError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Waiting for data
    #[default]
    Idle,
    Playing,
    /// Playback was refused; the poster stays up
    Blocked,
}

/// Autoplay handling for the demo video
#[derive(Debug, Default)]
pub struct VideoPlayer {
    video: DemoVideo,
    state: PlaybackState,
}

impl VideoPlayer {
    pub fn new(video: DemoVideo) -> Self {
        Self {
            video,
            state: PlaybackState::Idle,
        }
    }

    pub fn video(&self) -> &DemoVideo {
        &self.video
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Try to start playback once data has loaded. Rejections are swallowed.
    pub fn on_loaded_data(&mut self, backend: &mut dyn MediaBackend) -> PlaybackState {
        if !self.video.autoplay || self.state == PlaybackState::Playing {
            return self.state;
        }
        self.state = match backend.play(&self.video) {
            Ok(()) => PlaybackState::Playing,
            Err(err) => {
                tracing::debug!(src = %self.video.src, error = %err, "video playback refused");
                PlaybackState::Blocked
            }
        };
        self.state
    }
}

/// Backend without a renderer: records requests, optionally refusing them
#[derive(Debug, Default)]
pub struct HeadlessMedia {
    pub reject_autoplay: bool,
    pub requests: Vec<String>,
}

impl HeadlessMedia {
    pub fn rejecting() -> Self {
        Self {
            reject_autoplay: true,
            requests: Vec::new(),
        }
    }
}

impl MediaBackend for HeadlessMedia {
    fn play(&mut self, video: &DemoVideo) -> Result<(), PlaybackError> {
        self.requests.push(video.src.clone());
        if video.src.trim().is_empty() {
            return Err(PlaybackError::Unavailable("no source".to_string()));
        }
        if self.reject_autoplay {
            return Err(PlaybackError::AutoplayRejected(
                "autoplay disabled by user agent".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_defaults() {
        let params = ColorBendsParams::default();
        assert_eq!(params.speed, 0.2);
        assert_eq!(params.rotation, 45.0);
        assert!(!params.transparent);
        assert_eq!(params.to_attrs().len(), 11);
    }

    #[test]
    fn test_invalid_colors() {
        let params = ColorBendsParams {
            colors: vec!["#fff".into(), "#12ab9F".into(), "red".into(), "#12345".into()],
            ..Default::default()
        };
        assert_eq!(params.invalid_colors(), vec!["red", "#12345"]);
    }

    #[test]
    fn test_rejected_autoplay_is_swallowed() {
        let mut player = VideoPlayer::new(DemoVideo::default());
        let mut backend = HeadlessMedia::rejecting();
        assert_eq!(player.on_loaded_data(&mut backend), PlaybackState::Blocked);
        assert_eq!(backend.requests.len(), 1);
    }

    #[test]
    fn test_plays_once_loaded() {
        let mut player = VideoPlayer::new(DemoVideo::default());
        let mut backend = HeadlessMedia::default();
        assert_eq!(player.state(), PlaybackState::Idle);
        assert_eq!(player.on_loaded_data(&mut backend), PlaybackState::Playing);
        // Further loadeddata events don't restart playback
        player.on_loaded_data(&mut backend);
        assert_eq!(backend.requests.len(), 1);
    }

    #[test]
    fn test_missing_source_is_blocked() {
        let video = DemoVideo {
            src: String::new(),
            ..Default::default()
        };
        let mut backend = HeadlessMedia::default();
        assert_eq!(
            backend.play(&video),
            Err(PlaybackError::Unavailable("no source".to_string()))
        );

        let mut player = VideoPlayer::new(video);
        assert_eq!(player.on_loaded_data(&mut backend), PlaybackState::Blocked);
    }

    #[test]
    fn test_no_autoplay_stays_idle() {
        let video = DemoVideo {
            autoplay: false,
            ..Default::default()
        };
        let mut player = VideoPlayer::new(video);
        let mut backend = HeadlessMedia::default();
        assert_eq!(player.on_loaded_data(&mut backend), PlaybackState::Idle);
        assert!(backend.requests.is_empty());
    }
}
