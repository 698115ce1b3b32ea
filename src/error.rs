//! Error types for the rotation engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::lattice::Coord;
use crate::session::SessionState;

/// A move request that was refused without touching any state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoveError {
    /// Face/direction pair outside the 12 canonical moves.
    #[error("invalid move request: face {face}, direction {direction}")]
    InvalidMoveRequest { face: usize, direction: i32 },
    /// A move was requested while another one is still in flight.
    #[error("a move is already in flight (session is {active:?})")]
    ConcurrentMoveConflict { active: SessionState },
}

/// The continuation of a move was dropped before the move completed.
///
/// Happens when the engine is reset (or dropped) mid-rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("move aborted before completion")]
pub struct MoveAborted;

/// The cublets do not sit one-per-point on the lattice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeViolation {
    #[error("cublet {id} is not on a lattice point (at {position:?})")]
    OffLattice { id: usize, position: [f32; 3] },
    #[error("cublets {first} and {second} both occupy {coord:?}")]
    Collision {
        coord: Coord,
        first: usize,
        second: usize,
    },
}

/// Invalid or unreadable engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("spacing {spacing} must be positive and at least twice the cublet size {cublet_size}")]
    InvalidSpacing { spacing: f32, cublet_size: f32 },
    #[error("face threshold {threshold} must lie strictly between {min} and {max}")]
    InvalidThreshold { threshold: f32, min: f32, max: f32 },
    #[error("quarter turn duration {seconds}s must be positive and finite")]
    InvalidDuration { seconds: f32 },
}
