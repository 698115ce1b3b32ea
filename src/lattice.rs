//! The 3x3x3 lattice and the cublets that occupy it.
//!
//! Lattice coordinates are integers in `0..=2` per axis. World positions are
//! centered on the origin: coordinate `c` maps to `(c - 1) * spacing`, so the
//! middle layer of every axis sits at zero and face turns pivot on the origin.

use glam::{Affine3A, Mat3, Vec3};
use rustc_hash::FxHashMap;

use crate::error::LatticeViolation;

/// A lattice coordinate, each component in `0..=DIM - 1`.
pub type Coord = (i32, i32, i32);

/// Cublets per lattice axis.
pub const DIM: usize = 3;

/// Total number of cublets.
pub const CUBLET_COUNT: usize = DIM * DIM * DIM;

/// Number of cublets turned by one face move.
pub const FACE_CUBLETS: usize = DIM * DIM;

/// Sticker color indices in face order: front, right, top, back, left, bottom.
///
/// `None` marks an interior face that carries no sticker.
pub type StickerColors = [Option<u8>; 6];

/// RGB values for the six sticker color indices.
pub const STICKER_PALETTE: [[f32; 3]; 6] = [
    [128.0 / 255.0, 24.0 / 255.0, 24.0 / 255.0],   // red
    [192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0], // white
    [192.0 / 255.0, 192.0 / 255.0, 24.0 / 255.0],  // yellow
    [24.0 / 255.0, 192.0 / 255.0, 24.0 / 255.0],   // green
    [24.0 / 255.0, 24.0 / 255.0, 192.0 / 255.0],   // blue
    [192.0 / 255.0, 96.0 / 255.0, 24.0 / 255.0],   // orange
];

/// Converts (x, y, z) coordinates to a linear slot index.
///
/// Index order is x-major: `idx = x * DIM * DIM + y * DIM + z`.
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    (x as usize) * DIM * DIM + (y as usize) * DIM + (z as usize)
}

/// Converts a linear slot index to (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(slot_index: usize) -> Coord {
    (
        (slot_index / (DIM * DIM)) as i32,
        ((slot_index / DIM) % DIM) as i32,
        (slot_index % DIM) as i32,
    )
}

/// World-space center of a lattice point.
#[inline]
pub fn lattice_point((x, y, z): Coord, spacing: f32) -> Vec3 {
    Vec3::new((x - 1) as f32, (y - 1) as f32, (z - 1) as f32) * spacing
}

/// Finds the lattice point a world position sits on.
///
/// Returns `None` if the position is outside the lattice or not on a point
/// (beyond a small fraction of the spacing).
pub fn nearest_lattice_coord(position: Vec3, spacing: f32) -> Option<Coord> {
    let scaled = (position / spacing).round();
    let coord = (
        scaled.x as i32 + 1,
        scaled.y as i32 + 1,
        scaled.z as i32 + 1,
    );
    let in_range = [coord.0, coord.1, coord.2]
        .iter()
        .all(|c| (0..DIM as i32).contains(c));
    let on_point = position.distance(scaled * spacing) <= spacing * 1e-4;
    (in_range && on_point).then_some(coord)
}

/// Sticker colors for the cublet built at `coord` on a solved cube.
///
/// Only faces on the outside of the cube get a sticker.
pub fn sticker_colors((x, y, z): Coord) -> StickerColors {
    let last = DIM as i32 - 1;
    [
        (z == last).then_some(0),
        (x == last).then_some(1),
        (y == last).then_some(2),
        (z == 0).then_some(3),
        (x == 0).then_some(4),
        (y == 0).then_some(5),
    ]
}

/// One of the 27 pieces of the cube.
///
/// The world transform is the accumulated `rotation` applied on top of a
/// translation to the construction-time lattice point, so turning a face
/// only ever touches `rotation`, and clearing it returns the cublet home.
#[derive(Clone, Debug, PartialEq)]
pub struct Cublet {
    /// Slot index at construction time. Never re-keyed after moves.
    pub id: usize,
    /// World position of the construction-time lattice point.
    pub offset: Vec3,
    /// Accumulated rotation about the lattice origin.
    pub rotation: Mat3,
    /// Rotation captured when the current session was armed.
    pub snapshot: Option<Mat3>,
    /// Sticker colors in front, right, top, back, left, bottom order.
    pub stickers: StickerColors,
}

impl Cublet {
    pub fn new(id: usize, spacing: f32) -> Self {
        let coord = idx_to_coord(id);
        Self {
            id,
            offset: lattice_point(coord, spacing),
            rotation: Mat3::IDENTITY,
            snapshot: None,
            stickers: sticker_colors(coord),
        }
    }

    /// Current world-space position of the cublet center.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.rotation * self.offset
    }

    /// Full world transform (rotation after the lattice offset).
    pub fn transform(&self) -> Affine3A {
        Affine3A::from_mat3(self.rotation) * Affine3A::from_translation(self.offset)
    }

    /// Lattice point the cublet currently occupies, if it is settled on one.
    pub fn lattice_coord(&self, spacing: f32) -> Option<Coord> {
        nearest_lattice_coord(self.world_position(), spacing)
    }
}

/// Builds the 27 cublets of a solved cube in slot order.
pub fn build_cublets(spacing: f32) -> Vec<Cublet> {
    (0..CUBLET_COUNT)
        .map(|id| Cublet::new(id, spacing))
        .collect()
}

/// Maps every occupied lattice point to the id of the cublet sitting on it.
///
/// Fails if a cublet is between lattice points or two cublets share one.
pub fn occupancy(
    cublets: &[Cublet],
    spacing: f32,
) -> Result<FxHashMap<Coord, usize>, LatticeViolation> {
    let mut occupied = FxHashMap::default();
    for cublet in cublets {
        let coord = cublet
            .lattice_coord(spacing)
            .ok_or(LatticeViolation::OffLattice {
                id: cublet.id,
                position: cublet.world_position().to_array(),
            })?;
        if let Some(first) = occupied.insert(coord, cublet.id) {
            return Err(LatticeViolation::Collision {
                coord,
                first,
                second: cublet.id,
            });
        }
    }
    Ok(occupied)
}

/// Formats which cublet occupies each lattice point.
///
/// Displays DIM z-slices side by side, rows from top (y = DIM-1) to bottom,
/// x increasing left to right. Cublet ids print in base 36; unoccupied or
/// unsettled points show as '.'.
pub fn format_lattice(cublets: &[Cublet], spacing: f32) -> String {
    let mut grid = [None; CUBLET_COUNT];
    for cublet in cublets {
        if let Some((x, y, z)) = cublet.lattice_coord(spacing) {
            grid[coord_to_idx(x, y, z)] = Some(cublet.id);
        }
    }

    let mut output = String::new();
    for z in 0..DIM {
        if z > 0 {
            output.push_str("  ");
        }
        output.push_str(&format!("z={z}"));
    }
    output.push('\n');

    for y in (0..DIM).rev() {
        for z in 0..DIM {
            if z > 0 {
                output.push_str("  ");
            }
            for x in 0..DIM {
                let cell = grid[x * DIM * DIM + y * DIM + z];
                let display_char = cell
                    .and_then(|id| char::from_digit(id as u32, 36))
                    .map_or('.', |c| c.to_ascii_uppercase());
                output.push(display_char);
            }
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACING: f32 = 20.0;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..CUBLET_COUNT {
            let (x, y, z) = idx_to_coord(idx);
            assert_eq!(coord_to_idx(x, y, z), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_lattice_is_centered_on_origin() {
        assert_eq!(lattice_point((1, 1, 1), SPACING), Vec3::ZERO);
        assert_eq!(
            lattice_point((0, 2, 1), SPACING),
            Vec3::new(-20.0, 20.0, 0.0)
        );
    }

    #[test]
    fn test_nearest_lattice_coord_rejects_between_points() {
        assert_eq!(
            nearest_lattice_coord(Vec3::new(20.0, -20.0, 0.0), SPACING),
            Some((2, 0, 1))
        );
        assert_eq!(nearest_lattice_coord(Vec3::new(10.0, 0.0, 0.0), SPACING), None);
        assert_eq!(nearest_lattice_coord(Vec3::new(40.0, 0.0, 0.0), SPACING), None);
    }

    #[test]
    fn test_sticker_counts() {
        let cublets = build_cublets(SPACING);
        let count = |stickers: &StickerColors| stickers.iter().flatten().count();

        // 8 corners, 12 edges, 6 centers, 1 core
        let mut by_count = [0usize; 4];
        for cublet in &cublets {
            by_count[count(&cublet.stickers)] += 1;
        }
        assert_eq!(by_count, [1, 6, 12, 8]);

        // the top-front-right corner shows front, right and top colors
        let corner = &cublets[coord_to_idx(2, 2, 2)];
        assert_eq!(corner.stickers, [Some(0), Some(1), Some(2), None, None, None]);
    }

    #[test]
    fn test_transform_places_center_at_world_position() {
        let mut cublet = Cublet::new(coord_to_idx(2, 1, 0), SPACING);
        cublet.rotation = Mat3::from_rotation_y(0.4);
        let center = cublet.transform().transform_point3(Vec3::ZERO);
        assert!(center.abs_diff_eq(cublet.world_position(), 1e-5));
    }

    #[test]
    fn test_solved_occupancy_is_identity() {
        let cublets = build_cublets(SPACING);
        let occupied = occupancy(&cublets, SPACING).unwrap();
        assert_eq!(occupied.len(), CUBLET_COUNT);
        for (coord, id) in occupied {
            assert_eq!(idx_to_coord(id), coord);
        }
    }

    #[test]
    fn test_occupancy_reports_collisions() {
        let mut cublets = build_cublets(SPACING);
        cublets[1].offset = cublets[0].offset;
        assert_eq!(
            occupancy(&cublets, SPACING),
            Err(LatticeViolation::Collision {
                coord: (0, 0, 0),
                first: 0,
                second: 1,
            })
        );
    }

    #[test]
    fn test_format_solved_lattice() {
        let cublets = build_cublets(SPACING);
        insta::assert_snapshot!(format_lattice(&cublets, SPACING), @r"
        z=0  z=1  z=2
        6FO  7GP  8HQ
        3CL  4DM  5EN
        09I  1AJ  2BK
        ");
    }
}
