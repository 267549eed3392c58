use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_blaster::assets::AssetStore;
use space_blaster::clock::FrameClock;
use space_blaster::compute::{init_state, tick, GameState, GameStatus};
use space_blaster::config::{GameConfig, DEFAULT_CONFIG_FILE};
use space_blaster::display::{render, Canvas, Scene, TerminalPresenter};
use space_blaster::input::{hold_window, KeyTracker};
use space_blaster::{GameError, Result};

const TITLE: &str = "Simon's Space Blaster Game";

/// Space Blaster: defend against descending waves of enemy ships.
///
/// Move with WASD or the arrow keys, fire with Space, quit with Q.
#[derive(Parser, Debug)]
#[command(name = "space-blaster", version)]
struct Cli {
    /// Config file (TOML); defaults to ./space_blaster.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the sprite PNGs (overrides the config)
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Seed for a reproducible session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// The terminal is the game screen, so logs only go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GameError::LogFile { path: path.to_path_buf(), source })?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path, true)?,
        None => GameConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    if let Some(dir) = &cli.assets {
        config.assets_dir = dir.clone();
    }
    Ok(config)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Render, then advance, once per frame until the session ends.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    scene: &Scene,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> Result<()> {
    let mut clock = FrameClock::new(state.config.screen.fps);
    let mut canvas = Canvas::new(state.config.screen.width, state.config.screen.height);
    let mut presenter = TerminalPresenter::new();
    let mut keys = KeyTracker::new(hold_window(state.config.screen.fps));

    while state.status != GameStatus::Ended {
        clock.tick();

        render(&mut canvas, state, scene);
        let (cols, rows) = terminal::size()?;
        presenter.present(out, &canvas, cols, rows)?;

        // Drain all pending input events (non-blocking).
        while let Ok(event) = rx.try_recv() {
            if let Event::Resize(..) = event {
                presenter.invalidate();
            }
            keys.handle(&event, state.frame);
        }

        let input = keys.snapshot(state.frame);
        *state = tick(state, &input, rng);
    }
    Ok(())
}

fn run<W: Write>(out: &mut W, config: &GameConfig, seed: Option<u64>) -> Result<()> {
    // Assets load before the terminal is touched so a failure prints cleanly.
    let mut store = AssetStore::new(&config.assets_dir);
    let sprites = store.load_sprites()?;
    let scene = Scene::load(&mut store, config.screen.width, config.screen.height)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(config, &sprites);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Dedicate a thread to blocking event reads so the loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(out, &mut state, &scene, &rx, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("session over: level {}, lives {}", state.level, state.lives);
    result
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn try_main(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    let config = load_config(cli)?;
    if cli.print_config {
        print!("{}", config.to_toml());
        return Ok(());
    }
    let mut out = BufWriter::new(stdout());
    run(&mut out, &config, cli.seed)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("space-blaster: {e}");
            if let GameError::Asset { .. } = e {
                eprintln!("(use --assets to point at the sprite directory)");
            }
            ExitCode::FAILURE
        }
    }
}
