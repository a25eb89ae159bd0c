//! Site scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vessel_app::PageContent;

use crate::config::VesselConfig;

/// File name `vessel init` gives the content
pub const CONTENT_FILE: &str = "page.toml";

/// Create a new site directory with a config and the default content
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    if path.join("vessel.toml").exists() {
        anyhow::bail!("{} already contains a vessel.toml", path.display());
    }
    fs::create_dir_all(path.join("media"))
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut config = VesselConfig::new(name);
    config.content = Some(CONTENT_FILE.to_string());
    fs::write(path.join("vessel.toml"), config.to_toml()?)?;

    write_content(&path.join(CONTENT_FILE))?;

    fs::write(
        path.join("README.md"),
        format!(
            r#"# {name}

The Vessel landing page.

## Simulate

```bash
vessel simulate --scroll 4000:900
```

## Project Structure

```
{name}/
├── vessel.toml      # Viewport and simulation settings
├── {CONTENT_FILE}        # Page copy, links and media
└── media/           # Demo video and poster
```
"#
        ),
    )?;

    Ok(())
}

/// Write the default page content as TOML
pub fn write_content(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let source = PageContent::default()
        .to_toml()
        .context("Failed to serialize default content")?;
    fs::write(path, source).with_context(|| format!("Failed to write {}", path.display()))
}
