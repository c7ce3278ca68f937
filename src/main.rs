use anyhow::{Context, Result};
use chess_explorer::navigator::Navigator;
use chess_explorer::openings::OpeningBook;
use chess_explorer::tree::{GameIndex, MoveTree};
use chess_explorer::{reader, snapshot};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

mod config;

use crate::config::Config;

/// Logs go to stderr, filtered by `CHESS_LOG` (default `warn`).
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CHESS_LOG", "warn"))
        .format_timestamp(None)
        .init();
}

fn is_exit(line: &str) -> bool {
    matches!(line, "quit" | "exit")
}

fn run_line(navigator: &mut Navigator<'_, '_>, line: &str) {
    match navigator.handle_line(line) {
        Ok(Some(output)) if !output.is_empty() => println!("{}", output),
        Ok(_) => {}
        Err(err) => println!("{}", err),
    }
}

fn run_interactive(navigator: &mut Navigator<'_, '_>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}: ", navigator.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        let input = line.trim();
        if is_exit(input) {
            return Ok(());
        }
        run_line(navigator, input);
    }
}

/// Echoes each command before running it. Blank lines and `#` comments are
/// skipped.
fn run_script(navigator: &mut Navigator<'_, '_>, path: &Path) -> Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script '{}'", path.display()))?;

    for line in script.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("> {}", line);
        if is_exit(line) {
            break;
        }
        run_line(navigator, line);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::parse();
    config.validate()?;

    let games = reader::read_games(&config.games, config.compression)
        .context("Failed to load games")?;
    if let Some(path) = &config.save_games {
        snapshot::write_snapshot(path, &games)
            .with_context(|| format!("Failed to write snapshot '{}'", path.display()))?;
    }
    let index = GameIndex::new(games);
    if index.is_empty() {
        log::warn!("No decided games loaded; every rate reads 0.00%");
    }

    let openings = OpeningBook::load_dir(&config.openings, config.max_moves)
        .context("Failed to load opening tables")?;
    if openings.is_empty() {
        log::warn!(
            "No openings found in '{}'; the tree has only its root",
            config.openings.display()
        );
    }

    let tree = MoveTree::build(&index, &openings).context("Failed to build move tree")?;
    let mut navigator = Navigator::at_root(&tree, config.time_control);

    match &config.script {
        Some(path) => run_script(&mut navigator, path),
        None => run_interactive(&mut navigator),
    }
}
