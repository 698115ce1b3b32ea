//! 3D rotation utilities for face turns.
//!
//! Every face turn is a rotation about one of the three coordinate axes through
//! the lattice origin. While a turn is animating the angle is arbitrary; once it
//! completes the committed rotation is one of the exact quarter turns below, so
//! every accumulated cublet rotation stays a signed permutation matrix with
//! entries in {-1, 0, 1}.

use glam::{Mat3, Vec3};

/// One of the three coordinate axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Axis index (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Extracts this axis' component of a vector.
    #[inline]
    pub fn component(self, v: Vec3) -> f32 {
        v[self.index()]
    }
}

/// Exact +90 degree (right-handed) rotations about X, Y and Z.
///
/// Columns are the images of the basis vectors:
/// - X: Y -> Z, Z -> -Y
/// - Y: Z -> X, X -> -Z
/// - Z: X -> Y, Y -> -X
///
/// The -90 degree turns are the transposes.
const QUARTER_TURNS: [Mat3; 3] = [
    Mat3::from_cols(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, -1.0, 0.0),
    ),
    Mat3::from_cols(
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    ),
    Mat3::from_cols(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ),
];

/// Returns the exact quarter turn about `axis`.
///
/// `sign` > 0 turns by +90 degrees (counter-clockwise looking down the
/// positive axis), otherwise by -90 degrees.
#[inline]
pub fn quarter_turn(axis: Axis, sign: i32) -> Mat3 {
    let turn = QUARTER_TURNS[axis.index()];
    if sign > 0 {
        turn
    } else {
        turn.transpose()
    }
}

/// Rotation by an arbitrary `angle` (radians) about `axis`.
///
/// Used for the in-between frames of an animated turn only; the final frame
/// always uses [`quarter_turn`].
#[inline]
pub fn axis_rotation(axis: Axis, angle: f32) -> Mat3 {
    match axis {
        Axis::X => Mat3::from_rotation_x(angle),
        Axis::Y => Mat3::from_rotation_y(angle),
        Axis::Z => Mat3::from_rotation_z(angle),
    }
}

/// Rounds every entry of a near-quarter-turn rotation to -1, 0 or 1.
///
/// Accumulated cube rotations are always signed permutation matrices, so
/// rounding is lossless for them and removes any floating point residue.
pub fn settle(rotation: Mat3) -> Mat3 {
    Mat3::from_cols_array(&rotation.to_cols_array().map(f32::round))
}

/// Checks that a matrix is a signed permutation with determinant +1.
pub fn is_exact_quarter_turn(rotation: Mat3) -> bool {
    let entries = rotation.to_cols_array();
    let all_unit = entries.iter().all(|&e| e == 0.0 || e == 1.0 || e == -1.0);
    let one_per_column = [rotation.x_axis, rotation.y_axis, rotation.z_axis]
        .iter()
        .all(|column| column.abs().element_sum() == 1.0);
    all_unit && one_per_column && rotation.determinant() == 1.0
}
