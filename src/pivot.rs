//! Ephemeral rotation frame for a turning layer.
//!
//! Attaching a layer moves each member's transform out of the registry and
//! into the pivot's local frame. Rotating the pivot then turns all members
//! rigidly with a single angle. Detaching composes each local transform with
//! the pivot's final transform and hands the result back to the registry.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::moves::Axis;
use crate::registry::{Registry, Transform};

#[derive(Clone, Debug, Default)]
pub struct PivotGroup {
    /// Rotation angle on each axis, in radians.
    angles: Vector3<f32>,
    /// Arena index and pivot-local transform of each member.
    members: Vec<(usize, Transform)>,
}

impl PivotGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pivot's own transform in the world frame.
    ///
    /// The pivot sits at the origin, so this is a pure rotation.
    pub fn world_transform(&self) -> Transform {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_euler_angles(self.angles.x, self.angles.y, self.angles.z),
        )
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.angles[axis.index()]
    }

    pub fn set_angle(&mut self, axis: Axis, angle: f32) {
        self.angles[axis.index()] = angle;
    }

    pub fn rotate(&mut self, axis: Axis, delta: f32) {
        self.angles[axis.index()] += delta;
    }

    pub fn members(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|&(index, _)| index)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resets the pivot and reparents `layer` into it.
    ///
    /// Each member's local transform is its world transform expressed in the
    /// pivot frame. Cubies the registry no longer owns are skipped.
    pub fn attach(&mut self, registry: &mut Registry, layer: &[usize]) {
        self.angles = Vector3::zeros();
        let inverse = self.world_transform().inverse();

        self.members.clear();
        self.members.extend(layer.iter().filter_map(|&index| {
            let world = registry.take_transform(index)?;
            Some((index, inverse * world))
        }));
    }

    /// Releases every member, returning its new world transform.
    pub fn detach(&mut self) -> Vec<(usize, Transform)> {
        let pivot_world = self.world_transform();
        self.members
            .drain(..)
            .map(|(index, local)| (index, pivot_world * local))
            .collect()
    }

    /// Current world transform of a member, or `None` if `index` is not in the pivot.
    pub fn resolve(&self, index: usize) -> Option<Transform> {
        let pivot_world = self.world_transform();
        self.members
            .iter()
            .find(|&&(member, _)| member == index)
            .map(|&(_, local)| pivot_world * local)
    }
}
