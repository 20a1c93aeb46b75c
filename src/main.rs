//! Rasterizer demo (default binary).
//!
//! Runs the animated demo scene full-screen until `q`, `Esc`, or `Ctrl-C`.
//! Logs go to a file because the terminal itself is the render surface.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tui_raster::demo::DemoScene;
use tui_raster::engine::{Engine, EngineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Grid width in cells (clamped to the terminal)
    #[arg(long)]
    width: Option<u16>,
    /// Grid height in cells (clamped to the terminal)
    #[arg(long)]
    height: Option<u16>,
    /// Window title prefix
    #[arg(short, long)]
    title: Option<String>,
    /// Keep depth and edge buffers
    #[arg(long, default_value_t = false)]
    three_d: bool,
    /// Frame rate cap (0 = uncapped)
    #[arg(short, long)]
    fps: Option<u32>,
    /// Log file path
    #[arg(long, default_value = "tui-raster.log")]
    log_file: PathBuf,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if self.three_d {
            config.three_d = true;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.engine_config()?;
    info!("starting with {config:?}");

    let mut engine = Engine::new(config)?;
    let mut scene = DemoScene::new();
    engine.run(&mut scene)?;

    info!("demo drew {} frames", scene.frames());
    Ok(())
}
