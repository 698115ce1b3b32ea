//! Face moves.
//!
//! A canonical move is one of the six faces turned a quarter turn clockwise or
//! counter-clockwise, as seen looking at that face from outside the cube.

use std::fmt;

use crate::error::MoveError;
use crate::geometry::Axis;

/// One of the six outer faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl Face {
    /// All faces in index order.
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    /// Looks up a face by its index in [`Face::ALL`].
    pub fn from_index(index: usize) -> Option<Face> {
        Face::ALL.get(index).copied()
    }

    /// Axis the face is perpendicular to.
    pub const fn axis(self) -> Axis {
        match self {
            Face::Right | Face::Left => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Sign of the face's outward normal along its axis.
    pub const fn side(self) -> i32 {
        match self {
            Face::Right | Face::Top | Face::Front => 1,
            Face::Left | Face::Bottom | Face::Back => -1,
        }
    }
}

/// Turn direction as seen from outside the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Parses a signed direction: +1 is clockwise, -1 counter-clockwise.
    pub fn from_sign(sign: i32) -> Option<Direction> {
        match sign {
            1 => Some(Direction::Clockwise),
            -1 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    pub const fn reversed(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A canonical quarter-turn face move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

impl Move {
    /// All 12 canonical moves: each face clockwise, then counter-clockwise.
    pub const ALL: [Move; 12] = {
        let mut moves = [Move::new(Face::Right, Direction::Clockwise); 12];
        let mut i = 0;
        while i < Face::ALL.len() {
            moves[2 * i] = Move::new(Face::ALL[i], Direction::Clockwise);
            moves[2 * i + 1] = Move::new(Face::ALL[i], Direction::CounterClockwise);
            i += 1;
        }
        moves
    };

    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    /// Validates a raw face index and signed direction from an input layer.
    pub fn from_parts(face: usize, direction: i32) -> Result<Move, MoveError> {
        match (Face::from_index(face), Direction::from_sign(direction)) {
            (Some(face), Some(direction)) => Ok(Move::new(face, direction)),
            _ => Err(MoveError::InvalidMoveRequest { face, direction }),
        }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Move {
        Move::new(self.face, self.direction.reversed())
    }

    /// Selector describing which cublets turn and which way.
    pub const fn selector(self) -> FaceSelector {
        let side = self.face.side();
        // clockwise seen from outside is a negative turn about the outward normal
        let turn = match self.direction {
            Direction::Clockwise => -side,
            Direction::CounterClockwise => side,
        };
        FaceSelector {
            axis: self.face.axis(),
            side,
            turn,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Clockwise => "CW",
            Direction::CounterClockwise => "CCW",
        };
        write!(f, "{:?} {}", self.face, direction)
    }
}

/// Which cublets a move turns, and the signed turn about the positive axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceSelector {
    /// Axis the face is perpendicular to.
    pub axis: Axis,
    /// +1 selects the layer on the positive side, -1 the negative side.
    pub side: i32,
    /// +1 turns counter-clockwise looking down the positive axis, -1 clockwise.
    pub turn: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_moves_are_distinct() {
        for (i, a) in Move::ALL.iter().enumerate() {
            for b in &Move::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_from_parts_rejects_non_canonical() {
        assert_eq!(
            Move::from_parts(2, 1),
            Ok(Move::new(Face::Top, Direction::Clockwise))
        );
        assert_eq!(
            Move::from_parts(6, 1),
            Err(MoveError::InvalidMoveRequest { face: 6, direction: 1 })
        );
        assert_eq!(
            Move::from_parts(0, 0),
            Err(MoveError::InvalidMoveRequest { face: 0, direction: 0 })
        );
        assert!(Move::from_parts(0, 2).is_err());
    }

    #[test]
    fn test_clockwise_turns_against_outward_normal() {
        let top = Move::new(Face::Top, Direction::Clockwise).selector();
        assert_eq!((top.axis, top.side, top.turn), (Axis::Y, 1, -1));

        let bottom = Move::new(Face::Bottom, Direction::Clockwise).selector();
        assert_eq!((bottom.axis, bottom.side, bottom.turn), (Axis::Y, -1, 1));
    }

    #[test]
    fn test_inverse_flips_turn_only() {
        for mv in Move::ALL {
            let (a, b) = (mv.selector(), mv.inverse().selector());
            assert_eq!((a.axis, a.side), (b.axis, b.side));
            assert_eq!(a.turn, -b.turn);
            assert_eq!(mv.inverse().inverse(), mv);
        }
    }
}
