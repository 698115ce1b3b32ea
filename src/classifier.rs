//! Spatial classification of cublets into the layer a move turns.
//!
//! Membership is decided purely from current world positions: a cublet belongs
//! to a face when its coordinate along the face axis lies beyond the face
//! threshold on the face's side. No permutation table is kept.

use glam::Vec3;

use crate::lattice::Cublet;
use crate::moves::FaceSelector;

/// Outcome of classifying one cublet against one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Affected,
    Unaffected,
    /// The coordinate is not near any layer center.
    Ambiguous,
}

/// Cublets selected by a face, split from the ones that could not be placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    /// Ids of the cublets the move turns.
    pub affected: Vec<usize>,
    /// Ids of cublets that were off every layer and therefore left alone.
    pub ambiguous: Vec<usize>,
}

/// Classifies a world position against a face.
///
/// `threshold` must sit strictly between the middle layer (0) and an outer
/// layer (+-spacing); a coordinate farther than a quarter spacing from every
/// layer center is reported as [`Classification::Ambiguous`].
pub fn classify(
    position: Vec3,
    selector: FaceSelector,
    threshold: f32,
    spacing: f32,
) -> Classification {
    let coordinate = selector.axis.component(position);

    let layer = (coordinate / spacing).round().clamp(-1.0, 1.0);
    if (coordinate - layer * spacing).abs() > spacing * 0.25 {
        return Classification::Ambiguous;
    }

    let on_face = if selector.side > 0 {
        coordinate > threshold
    } else {
        coordinate < -threshold
    };
    if on_face {
        Classification::Affected
    } else {
        Classification::Unaffected
    }
}

/// Classifies every cublet once and collects the affected ids.
pub fn partition(
    cublets: &[Cublet],
    selector: FaceSelector,
    threshold: f32,
    spacing: f32,
) -> Partition {
    let mut result = Partition::default();
    for cublet in cublets {
        let position = cublet.world_position();
        match classify(position, selector, threshold, spacing) {
            Classification::Affected => result.affected.push(cublet.id),
            Classification::Unaffected => {}
            Classification::Ambiguous => {
                log::warn!(
                    "cublet {} at {position} is off every layer of {:?}; leaving it in place",
                    cublet.id,
                    selector.axis
                );
                result.ambiguous.push(cublet.id);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Axis;
    use crate::lattice::{build_cublets, idx_to_coord, FACE_CUBLETS};
    use crate::moves::Move;

    const SPACING: f32 = 20.0;
    const THRESHOLD: f32 = 11.0;

    fn selector(axis: Axis, side: i32) -> FaceSelector {
        FaceSelector { axis, side, turn: 1 }
    }

    #[test]
    fn test_layers_on_each_side() {
        let right = selector(Axis::X, 1);
        let left = selector(Axis::X, -1);
        let at = |x: f32| Vec3::new(x, 0.0, 0.0);

        assert_eq!(classify(at(20.0), right, THRESHOLD, SPACING), Classification::Affected);
        assert_eq!(classify(at(0.0), right, THRESHOLD, SPACING), Classification::Unaffected);
        assert_eq!(classify(at(-20.0), right, THRESHOLD, SPACING), Classification::Unaffected);
        assert_eq!(classify(at(-20.0), left, THRESHOLD, SPACING), Classification::Affected);
        assert_eq!(classify(at(20.0), left, THRESHOLD, SPACING), Classification::Unaffected);
    }

    #[test]
    fn test_small_float_noise_is_tolerated() {
        let top = selector(Axis::Y, 1);
        let noisy = Vec3::new(-20.000_02, 19.999_98, 1e-5);
        assert_eq!(classify(noisy, top, THRESHOLD, SPACING), Classification::Affected);
    }

    #[test]
    fn test_between_layers_is_ambiguous() {
        let front = selector(Axis::Z, 1);
        for z in [10.0, -10.0, 30.0] {
            assert_eq!(
                classify(Vec3::new(0.0, 0.0, z), front, THRESHOLD, SPACING),
                Classification::Ambiguous,
                "z = {z}"
            );
        }
    }

    #[test]
    fn test_every_face_selects_nine() {
        let cublets = build_cublets(SPACING);
        for mv in Move::ALL {
            let selected = partition(&cublets, mv.selector(), THRESHOLD, SPACING);
            assert_eq!(selected.affected.len(), FACE_CUBLETS, "{mv}");
            assert!(selected.ambiguous.is_empty());

            let s = mv.selector();
            let expected_layer = if s.side > 0 { 2 } else { 0 };
            for id in selected.affected {
                let (x, y, z) = idx_to_coord(id);
                assert_eq!([x, y, z][s.axis.index()], expected_layer, "{mv}: cublet {id}");
            }
        }
    }

    #[test]
    fn test_ambiguous_cublets_are_never_affected() {
        let mut cublets = build_cublets(SPACING);
        // push the top-right-front corner halfway towards the middle layer
        cublets[26].offset.y = 10.0;
        let selected = partition(&cublets, selector(Axis::Y, 1), THRESHOLD, SPACING);
        assert_eq!(selected.ambiguous, vec![26]);
        assert_eq!(selected.affected.len(), FACE_CUBLETS - 1);
        assert!(!selected.affected.contains(&26));
    }
}
