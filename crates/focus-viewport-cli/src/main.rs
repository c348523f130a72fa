//! Focus Viewport CLI
//!
//! Replays canvas input (clicks, slider moves, frames) through a viewport
//! without a UI and prints what the canvas would be told to draw.
//!
//! # Usage
//!
//! ```bash
//! # Built-in six-node walkthrough
//! focus-viewport demo
//!
//! # Replay a script against a diagram, JSON lines on stdout
//! focus-viewport replay --diagram demos/six_nodes.yaml \
//!     --script demos/focus_walkthrough.yaml --format json
//!
//! # Validate a configuration file
//! focus-viewport check-config config/viewport.yaml
//! ```
//!
//! Logs go to stderr; set `RUST_LOG=focus_viewport=debug` to see focus
//! transitions and camera commands.

mod diagram;
mod report;
mod script;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use focus_viewport::{Viewport, ViewportConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use diagram::Diagram;
use report::OutputFormat;
use script::Script;

#[derive(Parser)]
#[command(name = "focus-viewport")]
#[command(version)]
#[command(about = "Replay click and zoom scripts through a semantic-zoom viewport")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Viewport configuration (YAML); defaults apply when omitted
    #[arg(long, short, global = true, env = "FOCUS_VIEWPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script against a diagram
    Replay {
        /// Diagram file (nodes and edges)
        #[arg(long, short)]
        diagram: PathBuf,

        /// Event script
        #[arg(long, short)]
        script: PathBuf,
    },

    /// Run the built-in six-node walkthrough
    Demo,

    /// Load and validate a configuration file
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { diagram, script } => {
            let config = load_config(cli.config.as_deref())?;
            let diagram = Diagram::load(&diagram)?;
            let script = Script::load(&script)?;
            run(config, diagram, &script, cli.format)
        }
        Commands::Demo => {
            let config = load_config(cli.config.as_deref())?;
            run(config, Diagram::demo()?, &diagram::demo_script()?, cli.format)
        }
        Commands::CheckConfig { path } => {
            let config = ViewportConfig::load(&path)
                .with_context(|| format!("invalid configuration {}", path.display()))?;
            println!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ViewportConfig> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading viewport config");
            ViewportConfig::load(path)
                .with_context(|| format!("loading viewport config {}", path.display()))
        }
        None => Ok(ViewportConfig::default()),
    }
}

fn run(config: ViewportConfig, diagram: Diagram, script: &Script, format: OutputFormat) -> Result<()> {
    for edge in diagram.dangling_edges() {
        warn!(edge = %edge.id, "edge references a missing node");
    }
    info!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        events = script.events.len(),
        "replaying script"
    );

    let mut viewport = Viewport::new(config, diagram.nodes, diagram.edges);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    report::write_frame(&mut out, format, 0, None, &viewport.frame())?;
    let mut commands = 0;
    for (i, event) in script.events.iter().enumerate() {
        for frame in event.apply(&mut viewport) {
            commands += usize::from(frame.camera.is_some());
            report::write_frame(&mut out, format, i + 1, Some(event), &frame)?;
        }
    }
    out.flush()?;

    info!(
        revision = viewport.revision(),
        camera_commands = commands,
        "replay finished"
    );
    Ok(())
}
