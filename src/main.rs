use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod color;
mod config;
mod display;
mod geometry;
mod nutrients;
mod ui;

use config::Config;
use display::DisplayMode;
use ui::ScreenKind;

#[derive(Parser, Debug)]
#[command(name = "steiner")]
#[command(author, version, about = "Hydroponic nutrient planner with a Steiner triangle plot")]
pub struct Args {
    /// Display mode: terminal or report
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a commented config template to the default path and exit
    #[arg(long)]
    init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Start screen
    #[arg(short, long)]
    screen: Option<ScreenKind>,

    /// Nitrogen share (percent)
    #[arg(short = 'n', long = "nitrogen")]
    n: Option<f32>,

    /// Phosphorus share (percent)
    #[arg(short = 'p', long = "phosphorus")]
    p: Option<f32>,

    /// Potassium share (percent)
    #[arg(short = 'k', long = "potassium")]
    k: Option<f32>,

    /// Crop for recommended ranges
    #[arg(long)]
    crop: Option<String>,

    /// Growth stage for recommended ranges
    #[arg(long)]
    stage: Option<String>,

    /// Color scheme: classic, spectrum, fire, ocean, forest, monochrome
    #[arg(long)]
    colors: Option<String>,

    /// Space around the triangle
    #[arg(long)]
    padding: Option<f32>,

    /// Hide the 20% grid lines
    #[arg(long)]
    no_grid: bool,

    /// Report surface width
    #[arg(long)]
    width: Option<f32>,

    /// Report surface height
    #[arg(long)]
    height: Option<f32>,
}

fn log_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("steiner=info".parse()?))
}

/// Interactive sessions log to a file so output never lands on the
/// alternate screen; everything else logs to stderr.
fn init_logging(mode: DisplayMode) -> Result<()> {
    let log_path = dirs::cache_dir().map(|p| p.join("steiner").join("steiner.log"));

    match (mode, log_path) {
        (DisplayMode::Terminal, Some(path)) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::File::create(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(log_filter()?)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (DisplayMode::Terminal, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(log_filter()?)
                .with_writer(std::io::sink)
                .init();
        }
        (DisplayMode::Report, _) => {
            tracing_subscriber::fmt()
                .with_env_filter(log_filter()?)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "steiner", &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    init_logging(config.display.mode)?;
    info!("Starting Steiner in {:?} mode", config.display.mode);

    let selection = nutrients::resolve(&config.nutrients.crop, config.nutrients.stage.as_deref())?;

    match config.display.mode {
        DisplayMode::Terminal => {
            display::terminal::run(config, selection).await?;
        }
        DisplayMode::Report => {
            display::report::run(&config, selection)?;
        }
    }

    Ok(())
}
