use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use blocksnake::config::{Config, ConfigError};
use blocksnake::engine::Engine;
use blocksnake::palette::Palette;
use blocksnake::term::{Keyboard, Terminal};

const LOG_FILE: &str = "log.txt";
const PALETTES_FILE: &str = "data/palettes.json";

#[derive(Parser)]
#[command(name = "blocksnake", about = "A terminal snake game")]
struct Args {
    /// Path of the config file to use
    #[arg(short = 'C', long, default_value = "data/config.json")]
    config: PathBuf,

    /// Log level written to log.txt
    #[arg(short = 'V', long, value_enum, default_value_t = Verbosity::Info)]
    verbosity: Verbosity,

    /// Palette name, overriding the config selection
    #[arg(long)]
    palette: Option<String>,
}

#[derive(Copy, Clone, ValueEnum)]
enum Verbosity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Verbosity {
    fn filter(self) -> &'static str {
        match self {
            Verbosity::Debug => "debug",
            Verbosity::Info => "info",
            Verbosity::Warn => "warn",
            Verbosity::Error => "error",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbosity)?;

    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    let palette = load_palette(&config, args.palette.as_deref())?;

    let mut terminal = Terminal::new(palette);
    terminal.setup().context("failed to prepare the terminal")?;

    // Restore the terminal before reporting any engine failure; the player
    // quitting (or pressing Ctrl-C) lands here too, as a clean Exit.
    let mut engine = Engine::new(&config, &mut terminal, Keyboard);
    let outcome = engine.run();
    drop(engine);
    terminal.restore().context("failed to restore the terminal")?;

    outcome.context("the game loop failed")?;
    tracing::info!("clean shutdown");
    Ok(())
}

fn init_logging(verbosity: Verbosity) -> anyhow::Result<()> {
    // stdout belongs to the game screen, so logs go to a file
    let file = File::create(LOG_FILE)
        .with_context(|| format!("failed to create {LOG_FILE}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity.filter()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_palette(config: &Config, override_name: Option<&str>) -> anyhow::Result<Palette> {
    let name = override_name.unwrap_or(&config.palette);
    let path = Path::new(PALETTES_FILE);

    if !path.exists() {
        tracing::warn!(path = PALETTES_FILE, "palette file not found, using the built-in palette");
        return Ok(Palette::classic());
    }

    let palettes = Palette::load_all(path).context("failed to load palettes")?;
    let palette = palettes
        .get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownPalette(name.to_string()))?;
    Ok(palette)
}
