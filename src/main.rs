use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pop_connect_four::ai::Difficulty;
use pop_connect_four::config::AppConfig;
use pop_connect_four::game::Player;
use pop_connect_four::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play Connect Four with drop and pop moves in the terminal.
#[derive(Parser)]
#[command(name = "pop-connect-four", about = "Connect Four with pop moves")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "pop-connect-four.toml")]
    config: PathBuf,

    /// Override board height
    #[arg(long)]
    rows: Option<usize>,

    /// Play against the computer
    #[arg(long)]
    computer: bool,

    /// Computer difficulty, 1 (weakest) to 5
    #[arg(long)]
    difficulty: Option<u8>,

    /// Let the computer move first (it plays Yellow)
    #[arg(long)]
    computer_first: bool,

    /// Allow popping the opponent's pieces
    #[arg(long)]
    pop_any: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.game.rows = rows;
    }
    if cli.pop_any {
        config.game.pop_own_pieces_only = false;
    }
    if cli.computer {
        config.computer.enabled = true;
    }
    if let Some(level) = cli.difficulty {
        config.computer.difficulty = Difficulty::new(level)?;
    }
    if cli.computer_first {
        config.computer.enabled = true;
        config.computer.plays = Player::Yellow;
    }
    config.validate()?;

    run(config).context("terminal UI failed")
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(config: AppConfig) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
