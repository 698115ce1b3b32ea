//! The puzzle engine: arms face turns, animates them tick by tick and commits
//! them when they complete.
//!
//! Everything is driven from one place, the per-frame [`PuzzleEngine::tick`].
//! Move requests only arm a session; the turn itself happens over the
//! following ticks, and the returned [`MoveCompletion`] resolves on the tick
//! that commits it.

use glam::Mat3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::classifier;
use crate::config::EngineConfig;
use crate::error::{ConfigError, LatticeViolation, MoveError};
use crate::geometry::{axis_rotation, quarter_turn, settle};
use crate::lattice::{build_cublets, occupancy, Cublet};
use crate::moves::Move;
use crate::session::{MoveCompletion, MoveReport, RotationSession, SessionState};

/// Hook notified on every session state change.
pub trait TransitionObserver {
    fn on_transition(&mut self, from: SessionState, to: SessionState, mv: Move);
}

/// What one tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// No session was active.
    Idle,
    /// The active turn advanced to the given normalized progress.
    Animating { progress: f32 },
    /// The active turn finished and was committed on this tick.
    Completed(MoveReport),
}

/// Owns the 27 cublets and at most one in-flight rotation session.
pub struct PuzzleEngine {
    config: EngineConfig,
    threshold: f32,
    cublets: Vec<Cublet>,
    session: Option<RotationSession>,
    rng: StdRng,
    observer: Option<Box<dyn TransitionObserver>>,
    last_ambiguous: Vec<usize>,
    completed_moves: u64,
    resets: u64,
}

impl PuzzleEngine {
    /// Builds a solved cube.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            threshold: config.face_threshold(),
            cublets: build_cublets(config.spacing),
            session: None,
            rng,
            observer: None,
            last_ambiguous: Vec::new(),
            completed_moves: 0,
            resets: 0,
            config,
        })
    }

    /// Installs a hook that sees every session state change.
    pub fn set_observer(&mut self, observer: Box<dyn TransitionObserver>) {
        self.observer = Some(observer);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The cublets, indexed by id.
    pub fn cublets(&self) -> &[Cublet] {
        &self.cublets
    }

    pub fn state(&self) -> SessionState {
        self.session
            .as_ref()
            .map_or(SessionState::Idle, |session| session.state)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// The move currently turning, if any.
    pub fn active_move(&self) -> Option<Move> {
        self.session.as_ref().map(|session| session.mv)
    }

    /// Cublets found off every layer when the last move was armed.
    pub fn ambiguous_cublets(&self) -> &[usize] {
        &self.last_ambiguous
    }

    /// Number of moves committed since construction.
    pub fn completed_moves(&self) -> u64 {
        self.completed_moves
    }

    /// Number of times [`PuzzleEngine::reset`] has been called.
    ///
    /// Lets long-running sequences notice a reset that happened while they
    /// had no move of their own in flight.
    pub fn reset_count(&self) -> u64 {
        self.resets
    }

    /// Checks that every cublet sits on its own lattice point.
    pub fn verify_lattice(&self) -> Result<(), LatticeViolation> {
        occupancy(&self.cublets, self.config.spacing).map(|_| ())
    }

    /// Arms a face turn.
    ///
    /// Rejected with [`MoveError::ConcurrentMoveConflict`] while another turn
    /// is in flight; nothing changes in that case.
    pub fn request_move(&mut self, mv: Move) -> Result<MoveCompletion, MoveError> {
        if let Some(active) = &self.session {
            log::warn!("rejecting {mv}: {} is still turning", active.mv);
            return Err(MoveError::ConcurrentMoveConflict {
                active: active.state,
            });
        }

        let partition = classifier::partition(
            &self.cublets,
            mv.selector(),
            self.threshold,
            self.config.spacing,
        );
        for cublet in &mut self.cublets {
            cublet.snapshot = Some(cublet.rotation);
        }
        self.last_ambiguous = partition.ambiguous;

        log::debug!("arming {mv}: cublets {:?}", partition.affected);
        let (mut session, completion) = RotationSession::arm(
            mv,
            partition.affected,
            self.config.quarter_turn_seconds,
            self.config.easing,
        );
        self.notify(SessionState::Idle, SessionState::Armed, mv);
        session.state = SessionState::Animating;
        self.notify(SessionState::Armed, SessionState::Animating, mv);
        self.session = Some(session);

        Ok(completion)
    }

    /// Arms a move from a raw face index and signed direction.
    pub fn request_move_parts(
        &mut self,
        face: usize,
        direction: i32,
    ) -> Result<MoveCompletion, MoveError> {
        let mv = Move::from_parts(face, direction).inspect_err(|err| log::warn!("{err}"))?;
        self.request_move(mv)
    }

    /// Arms one of the 12 canonical moves, picked uniformly at random.
    pub fn request_random_move(&mut self) -> Result<MoveCompletion, MoveError> {
        let mv = Move::ALL[self.rng.random_range(0..Move::ALL.len())];
        self.request_move(mv)
    }

    /// Advances the active turn by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Idle;
        };

        let progress = session.advance(dt);
        if progress < 1.0 {
            // world-space turn about the lattice origin, re-applied to the
            // pre-turn snapshot every frame
            let turn = axis_rotation(session.selector.axis, session.applied_angle());
            for &id in &session.affected {
                let cublet = &mut self.cublets[id];
                if let Some(snapshot) = cublet.snapshot {
                    cublet.rotation = turn * snapshot;
                }
            }
            log::trace!("{} at {:.3}", session.mv, progress);
            return TickOutcome::Animating { progress };
        }

        match self.session.take() {
            Some(session) => TickOutcome::Completed(self.commit(session)),
            None => TickOutcome::Idle,
        }
    }

    /// Commits a finished session with an exact quarter turn.
    fn commit(&mut self, mut session: RotationSession) -> MoveReport {
        let mv = session.mv;
        session.state = SessionState::Completing;
        self.notify(SessionState::Animating, SessionState::Completing, mv);

        let turn = quarter_turn(session.selector.axis, session.selector.turn);
        for &id in &session.affected {
            let cublet = &mut self.cublets[id];
            if let Some(snapshot) = cublet.snapshot {
                cublet.rotation = settle(turn * snapshot);
            }
        }
        for cublet in &mut self.cublets {
            cublet.snapshot = None;
        }

        let report = session.complete();
        self.completed_moves += 1;
        log::debug!("completed {mv} (move #{})", self.completed_moves);
        self.notify(SessionState::Completing, SessionState::Idle, mv);
        report
    }

    /// Returns every cublet home and aborts any in-flight turn.
    ///
    /// The aborted turn's continuation is dropped, not resolved: its
    /// [`MoveCompletion`] yields [`crate::error::MoveAborted`].
    pub fn reset(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("reset aborts {} at {:.3}", session.mv, session.progress());
            self.notify(session.state, SessionState::Idle, session.mv);
        }
        for cublet in &mut self.cublets {
            cublet.rotation = Mat3::IDENTITY;
            cublet.snapshot = None;
        }
        self.last_ambiguous.clear();
        self.resets += 1;
    }

    fn notify(&mut self, from: SessionState, to: SessionState, mv: Move) {
        log::trace!("session {from:?} -> {to:?} ({mv})");
        if let Some(observer) = self.observer.as_mut() {
            observer.on_transition(from, to, mv);
        }
    }
}
