//! Twisty Cube
//!
//! Renders a 3x3x3 twisty cube and animates its face turns. Faces can be
//! turned from the keyboard or left to an endless random shuffle. A headless
//! mode plays a shuffle without a window and prints where every cublet ended
//! up.

mod visualization;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use twister::lattice::format_lattice;
use twister::sequencer::{run_headless, RandomMoves};
use twister::{EngineConfig, PuzzleEngine};

/// Fixed tick used by the headless shuffle (60 Hz).
const HEADLESS_TICK: f32 = 1.0 / 60.0;

/// Animates face turns of a 3x3x3 twisty cube.
#[derive(Parser)]
#[command(name = "twister")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with engine settings (missing fields use defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    View,
    /// Play random moves without a window and print the final lattice.
    Shuffle {
        /// Number of random moves to play.
        #[arg(long, default_value_t = 25)]
        moves: usize,
        /// Seed for the move sequence.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Command::View) {
        Command::View => {
            println!("Controls: R L U D F B turn faces, I invert, Space shuffle, Backspace reset");
            match visualization::display(config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Shuffle { moves, seed } => match run_shuffle(config, moves, seed) {
            Ok(output) => {
                print!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Loads the configuration file if one was given, otherwise the defaults.
fn load_config(path: Option<&Path>) -> Result<EngineConfig, twister::ConfigError> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Plays `moves` random moves headlessly and formats the resulting lattice.
fn run_shuffle(
    config: EngineConfig,
    moves: usize,
    seed: Option<u64>,
) -> Result<String, Box<dyn std::error::Error>> {
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);
    let spacing = config.spacing;
    let mut engine = PuzzleEngine::new(config)?;

    let played = run_headless(
        &mut engine,
        RandomMoves::new(seed).take(moves),
        HEADLESS_TICK,
    )?;
    engine.verify_lattice()?;

    let mut output = format!("Played {played} moves (seed {seed})\n\n");
    output.push_str(&format_lattice(engine.cublets(), spacing));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_move_shuffle_is_solved() {
        let output = run_shuffle(EngineConfig::default(), 0, Some(1)).unwrap();
        insta::assert_snapshot!(output, @r"
        Played 0 moves (seed 1)

        z=0  z=1  z=2
        6FO  7GP  8HQ
        3CL  4DM  5EN
        09I  1AJ  2BK
        ");
    }

    #[test]
    fn test_shuffle_keeps_every_cublet_on_the_lattice() {
        let output = run_shuffle(EngineConfig::default(), 40, Some(2024)).unwrap();
        assert!(output.starts_with("Played 40 moves (seed 2024)"));
        assert!(!output.contains('.'), "{output}");
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let first = run_shuffle(EngineConfig::default(), 15, Some(99)).unwrap();
        let second = run_shuffle(EngineConfig::default(), 15, Some(99)).unwrap();
        assert_eq!(first, second);
    }
}
