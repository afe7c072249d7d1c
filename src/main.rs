//! Terminal game runner (default binary).
//!
//! Runs the crossterm TUI by default; `--serve` runs the remote-control
//! JSON adapter instead. Gravity is driven here: the loop re-reads the
//! game's fall interval every iteration since it shrinks with level.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::adapter;
use tui_blockfall::core::{GameConfig, GameState, ShapeCatalog};
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::term::{GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::{Direction, GameAction, TICK_MS};

#[derive(Debug, Parser)]
#[command(version, about = "Terminal falling-block puzzle game")]
struct Cli {
    /// Run the JSON adapter server instead of the terminal game.
    #[arg(long)]
    serve: bool,

    /// Shape catalog to play with.
    #[arg(long, value_enum, default_value_t = CatalogArg::Extended)]
    catalog: CatalogArg,

    /// Difficulty preset (changes gravity curve and score multiplier).
    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// RNG seed for the piece sequence (defaults to a time-derived seed).
    #[arg(long)]
    seed: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogArg {
    /// The classic 7 tetrominoes.
    Standard,
    /// All 12 shapes, including 3-block and 5-block pieces.
    Extended,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

fn build_config(cli: &Cli) -> GameConfig {
    let mut config = match cli.difficulty {
        None => GameConfig::default(),
        Some(DifficultyArg::Easy) => GameConfig::easy(),
        Some(DifficultyArg::Medium) => GameConfig::medium(),
        Some(DifficultyArg::Hard) => GameConfig::hard(),
    };
    config.catalog = match cli.catalog {
        CatalogArg::Standard => ShapeCatalog::standard(),
        CatalogArg::Extended => ShapeCatalog::extended(),
    };
    config
}

fn pick_seed(cli: &Cli) -> u32 {
    cli.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u32)
            .unwrap_or(1)
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    let seed = pick_seed(&cli);

    if cli.serve {
        let server_config = adapter::ServerConfig::from_env();
        let game = adapter::shared_game(config, seed);
        let runtime = tokio::runtime::Runtime::new()?;
        println!("listening on {}", server_config.addr());
        return runtime.block_on(adapter::run(&server_config, game));
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u32) -> Result<()> {
    let mut game = GameState::with_config(config, seed);
    let view = GameView::new(config.catalog);
    let mut paused = false;

    let mut last_fall = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game.snapshot(), paused, Viewport::new(w, h));
        term.draw(&fb)?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply(&mut game, &mut paused, action);
                        if matches!(action, GameAction::SoftDrop | GameAction::HardDrop) {
                            // Player-driven descent restarts the gravity clock.
                            last_fall = Instant::now();
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity; the interval shrinks with level, so re-read it each pass.
        let fall_interval = Duration::from_millis(game.fall_interval_ms() as u64);
        if !paused && !game.game_over() && last_fall.elapsed() >= fall_interval {
            game.tick();
            last_fall = Instant::now();
        }
    }
}

fn apply(game: &mut GameState, paused: &mut bool, action: GameAction) {
    match action {
        GameAction::Pause => *paused = !*paused,
        GameAction::Restart => {
            game.reset();
            *paused = false;
        }
        _ if *paused => {}
        GameAction::MoveLeft => {
            game.shift(Direction::Left);
        }
        GameAction::MoveRight => {
            game.shift(Direction::Right);
        }
        GameAction::SoftDrop => {
            game.soft_drop_step();
        }
        GameAction::HardDrop => {
            game.hard_drop();
        }
        GameAction::Rotate => {
            game.rotate();
        }
    }
}
