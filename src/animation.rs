//! Turn animation state machine.
//!
//! A turn starts by reparenting its layer into the pivot group. Each tick then
//! either advances the pivot angle by one step or, once the angle has reached
//! a quarter turn, clamps it, releases the layer and re-quantizes it.

use std::f32::consts::FRAC_PI_2;

use tracing::{debug, trace, warn};

use crate::moves::{Move, MoveDescriptor};
use crate::pivot::PivotGroup;
use crate::registry::{Registry, Transform, DIM};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationState {
    Idle,
    Rotating {
        mv: Move,
        descriptor: MoveDescriptor,
    },
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Nothing in flight.
    Idle,
    /// The active turn moved to the given angle.
    Advanced(f32),
    /// The active turn completed and the machine is idle again.
    Finished(Move),
}

#[derive(Clone, Debug)]
pub struct Animator {
    state: AnimationState,
    pivot: PivotGroup,
    /// Radians per tick.
    step: f32,
}

impl Animator {
    pub fn new(step: f32) -> Self {
        Self {
            state: AnimationState::Idle,
            pivot: PivotGroup::new(),
            step,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == AnimationState::Idle
    }

    pub fn pivot(&self) -> &PivotGroup {
        &self.pivot
    }

    /// Starts turning the layer for `mv`.
    ///
    /// Ignored while another turn is in flight.
    pub fn begin(&mut self, mv: Move, registry: &mut Registry) {
        if !self.is_idle() {
            warn!(%mv, "begin called while rotating; ignoring");
            return;
        }

        let descriptor = mv.descriptor(registry.boundary_size());
        let layer = registry.select_layer(&descriptor);
        if layer.len() != DIM * DIM {
            warn!(%mv, selected = layer.len(), "layer selection drifted");
        }

        self.pivot.attach(registry, &layer);
        self.state = AnimationState::Rotating { mv, descriptor };
        debug!(%mv, axis = ?descriptor.axis, direction = descriptor.direction, "turn started");
    }

    /// Advances the active turn by one frame.
    pub fn tick(&mut self, registry: &mut Registry) -> TickOutcome {
        let AnimationState::Rotating { mv, descriptor } = self.state else {
            return TickOutcome::Idle;
        };

        let angle = self.pivot.angle(descriptor.axis);
        if angle.abs() < FRAC_PI_2 {
            let delta = f32::from(descriptor.direction) * self.step;
            self.pivot.rotate(descriptor.axis, delta);
            let angle = self.pivot.angle(descriptor.axis);
            trace!(%mv, angle, "turn advanced");
            return TickOutcome::Advanced(angle);
        }

        // clamp to exactly a quarter turn before releasing the layer
        self.pivot.set_angle(descriptor.axis, FRAC_PI_2.copysign(angle));
        for (index, world) in self.pivot.detach() {
            registry.settle(index, world);
        }
        self.state = AnimationState::Idle;
        debug!(%mv, "turn finished");

        TickOutcome::Finished(mv)
    }

    /// World transform of a cubie, resolving pivot members through the pivot.
    pub fn world_transform(&self, registry: &Registry, index: usize) -> Option<Transform> {
        registry
            .cubie(index)
            .world_transform()
            .or_else(|| self.pivot.resolve(index))
    }
}
