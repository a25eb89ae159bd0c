//! Vessel configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use vessel_app::PageContent;

/// Top-level Vessel configuration (vessel.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct VesselConfig {
    /// Content file, relative to the config file
    #[serde(default)]
    pub content: Option<String>,
    pub project: ProjectConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Project metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Simulated browser window
#[derive(Debug, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1440.0
}

fn default_height() -> f32 {
    900.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Headless run settings
#[derive(Debug, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_duration")]
    pub duration_ms: u32,
    /// Scroll positions applied during the run
    #[serde(default)]
    pub scroll: Vec<ScrollStep>,
}

fn default_fps() -> u32 {
    60
}

fn default_duration() -> u32 {
    5000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_ms: default_duration(),
            scroll: Vec::new(),
        }
    }
}

/// Scroll to `y` once `at_ms` of simulated time has passed
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScrollStep {
    pub at_ms: u32,
    pub y: f32,
}

impl FromStr for ScrollStep {
    type Err = String;

    /// `MS:Y`, e.g. `1500:900`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at_ms, y) = s
            .split_once(':')
            .ok_or_else(|| format!("expected MS:Y, got `{s}`"))?;
        let at_ms = at_ms
            .trim()
            .parse()
            .map_err(|_| format!("invalid time `{at_ms}`"))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| format!("invalid scroll offset `{y}`"))?;
        Ok(Self { at_ms, y })
    }
}

impl VesselConfig {
    /// Load configuration from a directory (looks for vessel.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = Self::config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No vessel.toml found in {}. Run `vessel init` to create one.",
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: VesselConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise from the working directory when it
    /// has a vessel.toml, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        match path {
            Some(path) => Ok((Self::load_from_dir(path)?, Self::base_dir(path))),
            None => {
                let cwd = std::env::current_dir().context("Failed to read working directory")?;
                if cwd.join("vessel.toml").exists() {
                    Ok((Self::load_from_dir(&cwd)?, cwd))
                } else {
                    Ok((Self::new("vessel-site"), cwd))
                }
            }
        }
    }

    fn config_path(path: &Path) -> PathBuf {
        if path.is_file() {
            path.to_path_buf()
        } else {
            path.join("vessel.toml")
        }
    }

    fn base_dir(path: &Path) -> PathBuf {
        if path.is_file() {
            path.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            path.to_path_buf()
        }
    }

    /// Create a new configuration with the given project name
    pub fn new(name: &str) -> Self {
        Self {
            content: None,
            project: ProjectConfig {
                name: name.to_string(),
                version: default_version(),
                description: None,
            },
            viewport: ViewportConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Read and validate a content file
pub fn load_content(path: &Path) -> Result<PageContent> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PageContent::from_toml_str(&source)
        .with_context(|| format!("Invalid content in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: VesselConfig = toml::from_str("[project]\nname = \"site\"\n").unwrap();
        assert_eq!(config.project.version, "0.1.0");
        assert_eq!(config.viewport.width, 1440.0);
        assert_eq!(config.simulation.fps, 60);
        assert!(config.simulation.scroll.is_empty());
        assert!(config.content.is_none());
    }

    #[test]
    fn test_full_config() {
        let config: VesselConfig = toml::from_str(
            r#"
content = "page.toml"

[project]
name = "site"

[viewport]
width = 1280
height = 720

[simulation]
duration_ms = 8000
scroll = [{ at_ms = 4000, y = 900 }, { at_ms = 6000, y = 0 }]
"#,
        )
        .unwrap();
        assert_eq!(config.content.as_deref(), Some("page.toml"));
        assert_eq!(config.viewport.height, 720.0);
        assert_eq!(config.simulation.duration_ms, 8000);
        assert_eq!(
            config.simulation.scroll,
            vec![
                ScrollStep { at_ms: 4000, y: 900.0 },
                ScrollStep { at_ms: 6000, y: 0.0 },
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let mut config = VesselConfig::new("site");
        config.content = Some("page.toml".to_string());
        let source = config.to_toml().unwrap();
        let parsed: VesselConfig = toml::from_str(&source).unwrap();
        assert_eq!(parsed.project.name, "site");
        assert_eq!(parsed.content.as_deref(), Some("page.toml"));
    }

    #[test]
    fn test_scroll_step_parse() {
        assert_eq!(
            "1500:900".parse::<ScrollStep>(),
            Ok(ScrollStep { at_ms: 1500, y: 900.0 })
        );
        assert!("1500".parse::<ScrollStep>().is_err());
        assert!("soon:900".parse::<ScrollStep>().is_err());
    }

    #[test]
    fn test_missing_config_is_reported() {
        let dir = std::env::temp_dir().join("vessel-config-missing");
        let err = VesselConfig::load_from_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("No vessel.toml found"));
    }
}
