//! gridfall: classic falling-block puzzle game in the terminal.

mod app;
mod config;
mod input;
mod piece;
mod playfield;
mod session;
mod shapes;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::GameConfig;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref())
        .with_context(|| format!("failed to load theme {:?}", args.theme))?;
    let config = args.game_config();
    let mut app = App::new(config, theme)?;
    app.run()?;
    Ok(())
}

/// Log to a file; stderr would draw over the alternate screen. Level comes from `RUST_LOG`.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "gridfall",
    version,
    about = "Classic falling-block puzzle in the terminal. Fill a row edge to edge to clear it.",
    long_about = "gridfall is a minimal falling-block puzzle game for the terminal.\n\n\
        Steer the falling piece; when it can't fall any further it lands. Full rows vanish and \
        everything above moves down. If a new piece has no room, the board is wiped and play \
        goes on.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move    Up or k  Rotate    Down or j  Drop one row\n  \
        Q / Esc / Ctrl-C   Quit\n\n\
        Use --theme to load a btop-style colour file (theme[shape_1]=\"#00f0f0\", ...)."
)]
pub struct Args {
    /// Playfield width in columns.
    #[arg(long, default_value_t = config::DEFAULT_WIDTH, value_name = "COLS")]
    pub width: usize,

    /// Playfield height in rows.
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT, value_name = "ROWS")]
    pub height: usize,

    /// Time between automatic drops, in milliseconds.
    #[arg(long, default_value_t = config::DEFAULT_DROP_INTERVAL.as_millis() as u64, value_name = "MS")]
    pub drop_interval_ms: u64,

    /// Terminal columns per playfield cell.
    #[arg(long, default_value_t = config::DEFAULT_CELL_WIDTH, value_name = "COLS")]
    pub cell_width: u16,

    /// Path to theme file (btop-style theme[key]="value"). Uses the classic palette if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Seed for the piece generator (repeatable games).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            drop_interval: Duration::from_millis(self.drop_interval_ms),
            cell_width: self.cell_width,
            seed: self.seed,
        }
    }
}
