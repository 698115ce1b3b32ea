//! Twisty Cube Rotation Engine
//!
//! Tracks the 27 cublets of a 3x3x3 twisty cube, animates quarter turns of
//! its faces as rigid group rotations and chains turns into unattended
//! sequences such as an endless random shuffle.
//!
//! The engine is tick driven: a caller owns a [`PuzzleEngine`], requests moves
//! on it and calls [`PuzzleEngine::tick`] once per rendered frame.

pub mod classifier;
pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod moves;
pub mod sequencer;
pub mod session;

pub use config::EngineConfig;
pub use engine::{PuzzleEngine, TickOutcome, TransitionObserver};
pub use error::{ConfigError, MoveAborted, MoveError};
pub use moves::{Direction, Face, Move};
pub use sequencer::{MoveSequencer, RandomMoves, SequencerStatus, StopHandle};
pub use session::{MoveCompletion, MoveReport, SessionState};
