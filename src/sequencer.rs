//! Unattended move sequences.
//!
//! A [`MoveSequencer`] pulls moves from a lazy iterator and feeds them to the
//! engine one at a time. It is driven from the same per-frame loop as the
//! engine: each call to [`MoveSequencer::drive`] checks whether the previous
//! move has completed and, if so, issues the next one. Stopping is cooperative
//! and only observed between moves.

use std::cell::Cell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::PuzzleEngine;
use crate::error::MoveError;
use crate::moves::Move;
use crate::session::MoveCompletion;

/// Infinite stream of uniformly random canonical moves.
///
/// Restartable: [`RandomMoves::restart`] replays the same sequence.
#[derive(Clone, Debug)]
pub struct RandomMoves {
    seed: u64,
    rng: StdRng,
}

impl RandomMoves {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Rewinds to the first move of the sequence.
    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}

impl Iterator for RandomMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        Some(Move::ALL[self.rng.random_range(0..Move::ALL.len())])
    }
}

/// Shared stop flag, checked by the sequencer between moves.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

/// Where a sequencer stands after one drive step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerStatus {
    /// A move was issued on this step.
    Issued(Move),
    /// Waiting for the in-flight move (or someone else's) to finish.
    Waiting,
    /// Stopped, aborted by a reset, or the move stream ran out.
    Finished,
}

/// Chains moves so that each one starts only after the previous completed.
pub struct MoveSequencer<I> {
    moves: I,
    stop: StopHandle,
    pending: Option<MoveCompletion>,
    issued: usize,
    finished: bool,
    /// Engine reset count seen on the first drive.
    reset_epoch: Option<u64>,
}

impl MoveSequencer<RandomMoves> {
    /// An endless random shuffle.
    pub fn random(seed: u64) -> Self {
        Self::new(RandomMoves::new(seed))
    }

    /// Stops a running shuffle, or starts a new one when there is none or
    /// the current one is already winding down.
    pub fn toggle(current: Option<Self>, seed: u64) -> Self {
        match current {
            Some(sequencer) if !sequencer.stop.is_stopped() => {
                // finishes the turn in flight, then stops
                sequencer.stop.stop();
                sequencer
            }
            _ => Self::random(seed),
        }
    }
}

impl<I: Iterator<Item = Move>> MoveSequencer<I> {
    pub fn new(moves: I) -> Self {
        Self {
            moves,
            stop: StopHandle::default(),
            pending: None,
            issued: 0,
            finished: false,
            reset_epoch: None,
        }
    }

    /// Handle that stops this sequencer before its next move.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Number of moves issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the chain by at most one move. Call once per tick, after
    /// [`PuzzleEngine::tick`].
    pub fn drive(&mut self, engine: &mut PuzzleEngine) -> Result<SequencerStatus, MoveError> {
        if self.finished {
            return Ok(SequencerStatus::Finished);
        }

        let epoch = *self.reset_epoch.get_or_insert(engine.reset_count());
        if engine.reset_count() != epoch {
            log::debug!("sequence ended by reset after {} moves", self.issued);
            self.pending = None;
            self.finished = true;
            return Ok(SequencerStatus::Finished);
        }

        if let Some(completion) = self.pending.as_mut() {
            match completion.try_outcome() {
                None => return Ok(SequencerStatus::Waiting),
                Some(Ok(_)) => self.pending = None,
                Some(Err(aborted)) => {
                    log::debug!("sequence ended after {} moves: {aborted}", self.issued);
                    self.pending = None;
                    self.finished = true;
                    return Ok(SequencerStatus::Finished);
                }
            }
        }

        if self.stop.is_stopped() {
            log::debug!("sequence stopped after {} moves", self.issued);
            self.finished = true;
            return Ok(SequencerStatus::Finished);
        }

        if !engine.is_idle() {
            return Ok(SequencerStatus::Waiting);
        }

        let Some(mv) = self.moves.next() else {
            self.finished = true;
            return Ok(SequencerStatus::Finished);
        };
        self.pending = Some(engine.request_move(mv)?);
        self.issued += 1;
        Ok(SequencerStatus::Issued(mv))
    }
}

/// Runs `moves` to completion on `engine` with a fixed tick, without a window.
///
/// Returns the number of moves played.
pub fn run_headless<I: Iterator<Item = Move>>(
    engine: &mut PuzzleEngine,
    moves: I,
    dt: f32,
) -> Result<usize, MoveError> {
    let mut sequencer = MoveSequencer::new(moves);
    loop {
        engine.tick(dt);
        if sequencer.drive(engine)? == SequencerStatus::Finished {
            return Ok(sequencer.issued());
        }
    }
}
