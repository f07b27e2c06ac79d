//! Pending-move queue in front of the animator.
//!
//! Moves submitted while a turn is in flight wait in the queue. Whenever the
//! animator goes idle the scheduler admits the next move in the same tick, so
//! consecutive turns run back to back.

use std::collections::VecDeque;

use tracing::debug;

use crate::animation::{AnimationState, Animator, TickOutcome};
use crate::config::QueueOrder;
use crate::moves::Move;
use crate::registry::Registry;

#[derive(Clone, Debug)]
pub struct Scheduler {
    queue: VecDeque<Move>,
    order: QueueOrder,
    animator: Animator,
}

impl Scheduler {
    pub fn new(animator: Animator, order: QueueOrder) -> Self {
        Self {
            queue: VecDeque::new(),
            order,
            animator,
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Moves waiting to be admitted, front of the deque first.
    pub fn pending(&self) -> &VecDeque<Move> {
        &self.queue
    }

    /// True when nothing is animating and nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.animator.is_idle() && self.queue.is_empty()
    }

    /// The move currently animating, if any.
    pub fn active(&self) -> Option<Move> {
        match self.animator.state() {
            AnimationState::Rotating { mv, .. } => Some(mv),
            AnimationState::Idle => None,
        }
    }

    /// Queues a move and starts it right away if the animator is idle.
    pub fn submit(&mut self, mv: Move, registry: &mut Registry) {
        self.queue.push_back(mv);
        debug!(%mv, pending = self.queue.len(), "move queued");
        self.admit_next(registry);
    }

    /// Advances the animation by one frame.
    ///
    /// Returns the outcome of the animator's tick; a finished turn immediately
    /// makes room for the next queued move.
    pub fn tick(&mut self, registry: &mut Registry) -> TickOutcome {
        let outcome = self.animator.tick(registry);
        if let TickOutcome::Finished(_) = outcome {
            self.admit_next(registry);
        }
        outcome
    }

    fn admit_next(&mut self, registry: &mut Registry) {
        if !self.animator.is_idle() {
            return;
        }
        let next = match self.order {
            QueueOrder::Fifo => self.queue.pop_front(),
            QueueOrder::Lifo => self.queue.pop_back(),
        };
        if let Some(mv) = next {
            self.animator.begin(mv, registry);
        }
    }
}
