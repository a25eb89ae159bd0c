//! Vessel CLI
//!
//! Runs the landing page headlessly and manages its content:
//! - `vessel simulate` mounts the page and plays scripted frames and scrolls
//! - `vessel init` scaffolds a site directory
//! - `vessel content` writes or validates content files
//! - `vessel timeline` prints the hero entrance schedule

mod config;
mod project;
mod simulate;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vessel_app::PageContent;

use crate::config::{load_content, ScrollStep, VesselConfig};
use crate::simulate::SimulationOptions;

#[derive(Parser, Debug)]
#[command(name = "vessel")]
#[command(about = "Headless runner for the Vessel landing page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the page and play frames without a renderer
    Simulate {
        /// vessel.toml, or a directory containing one
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Content file; overrides the config's `content`
        #[arg(long)]
        content: Option<PathBuf>,

        #[arg(long)]
        width: Option<f32>,

        #[arg(long)]
        height: Option<f32>,

        #[arg(long)]
        fps: Option<u32>,

        #[arg(long)]
        duration_ms: Option<u32>,

        /// Scroll to Y at MS, e.g. `4000:900`; repeatable
        #[arg(long = "scroll", value_name = "MS:Y")]
        scroll: Vec<ScrollStep>,

        /// Unmount before reporting
        #[arg(long)]
        unmount: bool,

        #[arg(long)]
        json: bool,
    },

    /// Create a site directory with a vessel.toml and the default content
    Init {
        path: PathBuf,

        /// Project name; defaults to the directory name
        #[arg(long)]
        name: Option<String>,
    },

    /// Page content files
    Content {
        #[command(subcommand)]
        command: ContentCommand,
    },

    /// Print the hero entrance schedule
    Timeline {
        #[arg(long)]
        content: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// Write the default content
    Init {
        #[arg(default_value = project::CONTENT_FILE)]
        path: PathBuf,
    },

    /// Validate a content file
    Check { path: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            config,
            content,
            width,
            height,
            fps,
            duration_ms,
            scroll,
            unmount,
            json,
        } => {
            let (config, base_dir) = VesselConfig::load_or_default(config.as_deref())?;
            let content_path =
                content.or_else(|| config.content.as_ref().map(|file| base_dir.join(file)));
            let content = match content_path {
                Some(path) => load_content(&path)?,
                None => PageContent::default(),
            };

            let options = SimulationOptions {
                width: width.unwrap_or(config.viewport.width),
                height: height.unwrap_or(config.viewport.height),
                fps: fps.unwrap_or(config.simulation.fps),
                duration_ms: duration_ms.unwrap_or(config.simulation.duration_ms),
                scroll: if scroll.is_empty() {
                    config.simulation.scroll
                } else {
                    scroll
                },
                unmount,
            };
            tracing::info!(project = %config.project.name, ?options, "simulating");

            let report = simulate::run(content, &options);
            if json {
                let output =
                    serde_json::to_string_pretty(&report).context("Failed to encode report")?;
                println!("{output}");
            } else {
                simulate::print_report(&report);
            }
        }
        Command::Init { path, name } => {
            let name = name.unwrap_or_else(|| project_name(&path));
            project::create_project(&path, &name)?;
            tracing::info!(path = %path.display(), %name, "site created");
        }
        Command::Content { command } => match command {
            ContentCommand::Init { path } => {
                project::write_content(&path)?;
                tracing::info!(path = %path.display(), "default content written");
            }
            ContentCommand::Check { path } => {
                let content = load_content(&path)?;
                println!(
                    "{}: ok ({} nav links, {} feature cards, {} download buttons)",
                    path.display(),
                    content.nav.links.len(),
                    content.features.cards.len(),
                    content.download.buttons.len()
                );
            }
        },
        Command::Timeline { content, json } => {
            let content = match content {
                Some(path) => load_content(&path)?,
                None => PageContent::default(),
            };
            let (tweens, duration_ms) = simulate::hero_schedule(&content);
            if json {
                let output =
                    serde_json::to_string_pretty(&tweens).context("Failed to encode schedule")?;
                println!("{output}");
            } else {
                simulate::print_schedule(&tweens, duration_ms);
            }
        }
    }

    Ok(())
}

fn project_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("vessel-site")
        .to_string()
}
