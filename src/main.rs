//! Gomoku against a minimax AI, in a window or on the console.
//!
//! - `gomoku` / `gomoku gui` - graphical board
//! - `gomoku console` - read `black 8 8` style commands from stdin

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Context as _};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use gomoku::console::Console;
use gomoku::game::GameConfig;
use gomoku::search::{SearchConfig, DEFAULT_DEPTH, MAX_SEARCH_DEPTH};
use gomoku::ui::GomokuApp;
use gomoku::Stone;

#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u8).range(1..=i64::from(MAX_SEARCH_DEPTH)))]
    depth: u8,

    /// Which color the AI plays
    #[arg(long, value_enum, default_value_t = AiSide::White)]
    ai: AiSide,

    /// Stop the AI search after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the graphical board (default)
    Gui,
    /// Play through text commands on stdin
    Console,
}

#[derive(Clone, Copy, ValueEnum)]
enum AiSide {
    Black,
    White,
    /// Two humans, no AI
    None,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        let search = SearchConfig::default()
            .with_depth(self.depth)
            .with_time_limit(self.time_limit_ms.map(Duration::from_millis));
        let config = match self.ai {
            AiSide::Black => GameConfig::against_ai(Stone::Black),
            AiSide::White => GameConfig::against_ai(Stone::White),
            AiSide::None => GameConfig::two_player(),
        };
        let ai_color = config.ai_color.unwrap_or(Stone::White);
        config.with_search(search.with_ai_color(ai_color))
    }
}

fn run_gui(config: GameConfig) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let config = cli.game_config();
    log::info!(
        "starting with AI {:?}, depth {}",
        config.ai_color,
        config.search.effective_depth()
    );

    match cli.command {
        Some(Commands::Console) => {
            let stdin = io::stdin();
            Console::new(config)
                .run(stdin.lock(), io::stdout())
                .context("console I/O failed")
        }
        Some(Commands::Gui) | None => run_gui(config),
    }
}
