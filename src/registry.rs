//! The 27 cubies and the lattice they occupy.
//!
//! Cubies live in a fixed arena indexed by their home slot. Each one carries
//! its logical lattice slot and, while not part of a turning layer, its world
//! transform. During a turn the transforms of the turning layer are owned by
//! the pivot group instead (see [`crate::pivot`]).

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::moves::MoveDescriptor;

/// A lattice slot, each component in `-1..=1`.
pub type Coord = (i32, i32, i32);

/// Position and orientation in the shared world frame.
pub type Transform = Isometry3<f32>;

/// Cells per axis.
pub const DIM: usize = 3;

/// Number of cubies.
pub const CUBIE_COUNT: usize = DIM * DIM * DIM;

/// Tolerance when matching a lattice coordinate against a slice.
pub const LAYER_EPSILON: f32 = 1e-7;

/// Converts a slot to its arena index.
///
/// Index order is x-major: `idx = x * 9 + y * 3 + z` on the `0..3` shifted slot.
#[inline(always)]
pub const fn coord_to_idx((x, y, z): Coord) -> usize {
    ((x + 1) as usize) * DIM * DIM + ((y + 1) as usize) * DIM + ((z + 1) as usize)
}

/// Converts an arena index back to its slot.
#[inline(always)]
pub const fn idx_to_coord(index: usize) -> Coord {
    (
        (index / (DIM * DIM)) as i32 - 1,
        ((index / DIM) % DIM) as i32 - 1,
        (index % DIM) as i32 - 1,
    )
}

/// Who currently owns a cubie's world transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Held by the registry.
    Free(Transform),
    /// Reparented into the pivot group for the duration of a turn.
    InPivot,
}

#[derive(Clone, Debug)]
pub struct Cubie {
    /// Slot occupied at construction; doubles as the cubie's identity.
    pub home: Coord,
    slot: Coord,
    lattice_position: Point3<f32>,
    placement: Placement,
}

impl Cubie {
    /// Current logical slot.
    pub fn slot(&self) -> Coord {
        self.slot
    }

    /// Current slot scaled to world units.
    pub fn lattice_position(&self) -> Point3<f32> {
        self.lattice_position
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// World transform, or `None` while the pivot group owns it.
    pub fn world_transform(&self) -> Option<Transform> {
        match self.placement {
            Placement::Free(transform) => Some(transform),
            Placement::InPivot => None,
        }
    }
}

/// Arena of the 27 cubies.
#[derive(Clone, Debug)]
pub struct Registry {
    cubies: Vec<Cubie>,
    boundary_size: f32,
}

impl Registry {
    /// Builds the solved 3x3x3 lattice with the given slot spacing.
    pub fn new(boundary_size: f32) -> Self {
        let cubies = (0..CUBIE_COUNT)
            .map(|index| {
                let home = idx_to_coord(index);
                let lattice_position = slot_to_point(home, boundary_size);
                Cubie {
                    home,
                    slot: home,
                    lattice_position,
                    placement: Placement::Free(Isometry3::from_parts(
                        Translation3::from(lattice_position.coords),
                        UnitQuaternion::identity(),
                    )),
                }
            })
            .collect();

        Self {
            cubies,
            boundary_size,
        }
    }

    pub fn boundary_size(&self) -> f32 {
        self.boundary_size
    }

    pub fn cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    pub fn cubie(&self, index: usize) -> &Cubie {
        &self.cubies[index]
    }

    /// Returns the indices of every cubie in the slice named by `descriptor`.
    ///
    /// Matches on the lattice position, not the live transform, so cubies in
    /// flight are still classified by the slot they left.
    pub fn select_layer(&self, descriptor: &MoveDescriptor) -> Vec<usize> {
        let axis = descriptor.axis.index();
        self.cubies
            .iter()
            .enumerate()
            .filter(|(_, cubie)| {
                (cubie.lattice_position[axis] - descriptor.slice_center).abs() < LAYER_EPSILON
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Hands a cubie's transform over to the pivot group.
    ///
    /// Returns `None` if the cubie is already in the pivot.
    pub(crate) fn take_transform(&mut self, index: usize) -> Option<Transform> {
        let cubie = &mut self.cubies[index];
        let transform = cubie.world_transform()?;
        cubie.placement = Placement::InPivot;
        Some(transform)
    }

    /// Returns a cubie from the pivot group and re-quantizes it.
    ///
    /// The slot becomes the nearest lattice point to the world translation,
    /// the translation is snapped onto that point and the orientation onto the
    /// nearest of the 24 cube rotations.
    pub(crate) fn settle(&mut self, index: usize, world: Transform) {
        let boundary_size = self.boundary_size;
        let cubie = &mut self.cubies[index];
        let slot = nearest_slot(&world.translation.vector, boundary_size);
        let lattice_position = slot_to_point(slot, boundary_size);

        cubie.slot = slot;
        cubie.lattice_position = lattice_position;
        cubie.placement = Placement::Free(Isometry3::from_parts(
            Translation3::from(lattice_position.coords),
            snap_rotation(&world.rotation),
        ));
    }

    /// True when every slot holds exactly one cubie.
    pub fn is_permutation(&self) -> bool {
        let occupied: FxHashSet<Coord> = self.cubies.iter().map(|cubie| cubie.slot).collect();
        occupied.len() == CUBIE_COUNT
    }

    /// True when every cubie is back in its home slot with its home orientation.
    pub fn is_solved(&self) -> bool {
        self.cubies.iter().all(|cubie| {
            cubie.slot == cubie.home
                && cubie
                    .world_transform()
                    .is_some_and(|transform| transform.rotation.angle() < 1e-4)
        })
    }

    /// Maps each occupied slot to the arena index of the cubie sitting in it.
    pub fn occupancy(&self) -> FxHashMap<Coord, usize> {
        self.cubies
            .iter()
            .enumerate()
            .map(|(index, cubie)| (cubie.slot, index))
            .collect()
    }
}

/// Scales a slot into world units.
pub fn slot_to_point((x, y, z): Coord, boundary_size: f32) -> Point3<f32> {
    Point3::new(
        x as f32 * boundary_size,
        y as f32 * boundary_size,
        z as f32 * boundary_size,
    )
}

/// Nearest of the 27 canonical slots to a world-space position.
fn nearest_slot(position: &Vector3<f32>, boundary_size: f32) -> Coord {
    let quantize = |value: f32| ((value / boundary_size).round() as i32).clamp(-1, 1);
    (
        quantize(position.x),
        quantize(position.y),
        quantize(position.z),
    )
}

/// Rounds a rotation onto the cube's rotation group.
///
/// Every quarter-turn composition has a rotation matrix with entries in
/// {-1, 0, 1}, so rounding each entry removes accumulated error.
fn snap_rotation(rotation: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    let snapped = rotation.to_rotation_matrix().into_inner().map(f32::round);
    UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(snapped))
}

/// Formats the lattice as three x-slices side by side.
///
/// Each cell shows the home index of the cubie occupying it, in base 27
/// (`0`-`9` then `A`-`Q`). Rows run from top (y=+1) to bottom (y=-1) and
/// columns from z=-1 to z=+1.
pub fn format_lattice(registry: &Registry) -> String {
    let occupancy = registry.occupancy();

    // header: x=-1, x=0, x=1
    let header: Vec<String> = (-1..=1)
        .map(|x| format!("{:<5}", format!("x={x}")))
        .collect();
    let mut output = header.join("  ").trim_end().to_owned();
    output.push('\n');

    // rows from top (y=+1) to bottom (y=-1)
    for y in (-1..=1).rev() {
        let slices: Vec<String> = (-1..=1)
            .map(|x| {
                let cells: String = (-1..=1)
                    .map(|z| match occupancy.get(&(x, y, z)) {
                        Some(&index) if index < 10 => char::from(b'0' + index as u8),
                        Some(&index) => char::from(b'A' + (index - 10) as u8),
                        None => '.',
                    })
                    .collect();
                format!("{cells:<5}")
            })
            .collect();
        output.push_str(slices.join("  ").trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::moves::{decode, Move};

    const BOUNDARY: f32 = 3.5;

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for idx in 0..CUBIE_COUNT {
            let coord = idx_to_coord(idx);
            assert!(
                [coord.0, coord.1, coord.2]
                    .iter()
                    .all(|c| (-1..=1).contains(c)),
                "idx_to_coord({idx}) produced out-of-range {coord:?}"
            );
            assert_eq!(coord_to_idx(coord), idx, "Roundtrip failed for index {idx}");
        }
    }

    #[test]
    fn test_fresh_registry_is_solved() {
        let registry = Registry::new(BOUNDARY);
        assert_eq!(registry.cubies().len(), CUBIE_COUNT);
        assert!(registry.is_permutation());
        assert!(registry.is_solved());
        for cubie in registry.cubies() {
            let transform = cubie.world_transform().unwrap();
            assert_eq!(transform.translation.vector, cubie.lattice_position().coords);
        }
    }

    #[test]
    fn test_each_face_selects_nine() {
        let registry = Registry::new(BOUNDARY);
        for mv in Move::ALL {
            let layer = registry.select_layer(&mv.descriptor(BOUNDARY));
            assert_eq!(layer.len(), 9, "layer for {mv}");
        }
    }

    #[test]
    fn test_invalid_token_selects_nothing() {
        let registry = Registry::new(BOUNDARY);
        let layer = decode("X", BOUNDARY)
            .map(|descriptor| registry.select_layer(&descriptor))
            .unwrap_or_default();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_corner_membership() {
        let registry = Registry::new(BOUNDARY);
        let corner = coord_to_idx((-1, -1, -1));
        assert_eq!(
            registry.cubie(corner).lattice_position(),
            Point3::new(-3.5, -3.5, -3.5)
        );

        let front = registry.select_layer(&decode("F", BOUNDARY).unwrap());
        let back = registry.select_layer(&decode("B", BOUNDARY).unwrap());
        assert!(front.contains(&corner));
        assert!(!back.contains(&corner));
    }

    #[test]
    fn test_settle_quantizes_drift() {
        let mut registry = Registry::new(BOUNDARY);
        let index = coord_to_idx((1, 0, -1));
        registry.take_transform(index).unwrap();

        let drifted = Isometry3::from_parts(
            Translation3::new(3.4999, 0.00002, 3.5001),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2 + 1e-4),
        );
        registry.settle(index, drifted);

        let cubie = registry.cubie(index);
        assert_eq!(cubie.slot(), (1, 0, 1));
        let transform = cubie.world_transform().unwrap();
        assert_eq!(transform.translation.vector, Vector3::new(3.5, 0.0, 3.5));
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
        assert!(transform.rotation.angle_to(&expected) < 1e-5);
    }

    #[test]
    fn test_take_transform_is_exclusive() {
        let mut registry = Registry::new(BOUNDARY);
        assert!(registry.take_transform(4).is_some());
        assert_eq!(registry.cubie(4).placement(), Placement::InPivot);
        assert!(registry.take_transform(4).is_none());
        assert!(registry.cubie(4).world_transform().is_none());
    }

    #[test]
    fn test_format_solved_lattice() {
        let registry = Registry::new(BOUNDARY);
        insta::assert_snapshot!(format_lattice(&registry), @r"
        x=-1   x=0    x=1
        678    FGH    OPQ
        345    CDE    LMN
        012    9AB    IJK
        ");
    }
}
