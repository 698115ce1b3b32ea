//! Transient state of one in-flight face turn.

use std::f32::consts::FRAC_PI_2;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::easing::Easing;
use crate::error::MoveAborted;
use crate::moves::{FaceSelector, Move};

/// Lifecycle of the rotation session.
///
/// `Idle -> Armed -> Animating -> Completing -> Idle`, where `Armed` and
/// `Completing` only last for the duration of the call that entered them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Armed,
    Animating,
    Completing,
}

/// Summary handed to the continuation of a completed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    /// Ids of the cublets that turned.
    pub affected: Vec<usize>,
}

/// Resolves when the requested move completes.
///
/// Resolves to [`MoveAborted`] when the session is dropped without completing
/// (engine reset). Dropping the future itself does not cancel the move.
#[derive(Debug)]
pub struct MoveCompletion {
    receiver: oneshot::Receiver<MoveReport>,
}

impl MoveCompletion {
    /// Non-blocking check: `None` while the move is still in flight.
    pub fn try_outcome(&mut self) -> Option<Result<MoveReport, MoveAborted>> {
        match self.receiver.try_recv() {
            Ok(report) => Some(Ok(report)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(MoveAborted)),
        }
    }
}

impl Future for MoveCompletion {
    type Output = Result<MoveReport, MoveAborted>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.map_err(|_| MoveAborted))
    }
}

/// One armed face turn.
#[derive(Debug)]
pub struct RotationSession {
    pub mv: Move,
    pub selector: FaceSelector,
    /// Frozen at arm time; positions change during the turn, membership does not.
    pub(crate) affected: Vec<usize>,
    /// Seconds since the session was armed.
    pub(crate) elapsed: f32,
    /// Seconds one quarter turn takes.
    pub duration: f32,
    pub easing: Easing,
    pub(crate) state: SessionState,
    continuation: Option<oneshot::Sender<MoveReport>>,
}

impl RotationSession {
    /// Total angle of a quarter turn.
    pub const TARGET_ANGLE: f32 = FRAC_PI_2;

    /// Arms a session and returns it along with its completion future.
    pub fn arm(
        mv: Move,
        affected: Vec<usize>,
        duration: f32,
        easing: Easing,
    ) -> (Self, MoveCompletion) {
        let (sender, receiver) = oneshot::channel();
        let session = Self {
            mv,
            selector: mv.selector(),
            affected,
            elapsed: 0.0,
            duration,
            easing,
            state: SessionState::Armed,
            continuation: Some(sender),
        };
        (session, MoveCompletion { receiver })
    }

    /// Advances elapsed time and returns the normalized progress in [0, 1].
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt.max(0.0);
        self.progress()
    }

    /// Ids of the cublets this session turns.
    pub fn affected(&self) -> &[usize] {
        &self.affected
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Signed angle about the positive selector axis at the current progress.
    ///
    /// Pinned to exactly +-pi/2 once progress reaches 1, whatever the easing
    /// curve evaluates to.
    pub fn applied_angle(&self) -> f32 {
        let sign = self.selector.turn as f32;
        if self.is_finished() {
            return sign * Self::TARGET_ANGLE;
        }
        self.easing.evaluate(self.progress()) * Self::TARGET_ANGLE * sign
    }

    /// Resolves the continuation, consuming the session.
    pub fn complete(mut self) -> MoveReport {
        let report = MoveReport {
            mv: self.mv,
            affected: std::mem::take(&mut self.affected),
        };
        if let Some(continuation) = self.continuation.take() {
            // the caller may have dropped the completion future; that is fine
            let _ = continuation.send(report.clone());
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Direction, Face};

    fn top_cw(easing: Easing) -> (RotationSession, MoveCompletion) {
        RotationSession::arm(
            Move::new(Face::Top, Direction::Clockwise),
            vec![2, 5, 8],
            0.75,
            easing,
        )
    }

    #[test]
    fn test_progress_is_clamped() {
        let (mut session, _completion) = top_cw(Easing::Linear);
        assert_eq!(session.advance(-1.0), 0.0);
        assert_eq!(session.elapsed(), 0.0);
        assert_eq!(session.advance(0.375), 0.5);
        assert_eq!(session.state(), SessionState::Armed);
        assert_eq!(session.affected(), &[2, 5, 8]);
        assert_eq!(session.advance(10.0), 1.0);
        assert!(session.is_finished());
    }

    #[test]
    fn test_applied_angle_is_exact_at_end() {
        for easing in [Easing::Linear, Easing::OutCubic, Easing::OutElastic] {
            let (mut session, _completion) = top_cw(easing);
            assert_eq!(session.applied_angle(), 0.0);
            session.advance(0.75);
            assert_eq!(session.applied_angle(), -FRAC_PI_2);
        }
    }

    #[test]
    fn test_elastic_overshoots_mid_turn() {
        let (mut session, _completion) = top_cw(Easing::OutElastic);
        session.advance(0.75 * 0.15);
        assert!(session.applied_angle() < -FRAC_PI_2);
    }

    #[test]
    fn test_completion_resolves_with_report() {
        let (session, mut completion) = top_cw(Easing::OutElastic);
        assert_eq!(completion.try_outcome(), None);
        let report = session.complete();
        assert_eq!(report.affected, vec![2, 5, 8]);
        assert_eq!(pollster::block_on(completion), Ok(report));
    }

    #[test]
    fn test_dropped_session_aborts_completion() {
        let (session, mut completion) = top_cw(Easing::OutElastic);
        drop(session);
        assert_eq!(completion.try_outcome(), Some(Err(MoveAborted)));
    }
}
