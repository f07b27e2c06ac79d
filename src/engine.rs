//! The engine object wiring registry, scheduler and presentation together.

use rand::Rng;
use tracing::{debug, info};

use crate::animation::{Animator, TickOutcome};
use crate::config::{ConfigError, EngineConfig};
use crate::moves::Move;
use crate::registry::{Coord, Registry, Transform};
use crate::scheduler::Scheduler;
use crate::shuffle::random_moves;
use crate::PresentationSink;

/// A cubie's identity and where it is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubiePose {
    pub home: Coord,
    pub transform: Transform,
}

pub struct Engine<S: PresentationSink> {
    config: EngineConfig,
    registry: Registry,
    scheduler: Scheduler,
    sink: S,
    history: Vec<Move>,
}

impl<S: PresentationSink> Engine<S> {
    /// Builds a solved cube. Fails only on an invalid configuration.
    pub fn new(config: EngineConfig, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            boundary = config.boundary_size(),
            speed = config.rotation_speed,
            order = ?config.queue_order,
            "cube engine initialized"
        );

        Ok(Self {
            config,
            registry: Registry::new(config.boundary_size()),
            scheduler: Scheduler::new(Animator::new(config.rotation_speed), config.queue_order),
            sink,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Finished turns, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Queues a turn by its token. Unknown tokens are ignored.
    pub fn request_move(&mut self, token: &str) {
        match token.parse::<Move>() {
            Ok(mv) => self.submit(mv),
            Err(error) => debug!(%error, "ignoring move request"),
        }
    }

    pub fn submit(&mut self, mv: Move) {
        self.scheduler.submit(mv, &mut self.registry);
    }

    /// Submits `count` random moves.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) {
        let moves = random_moves(rng, count);
        info!(count = moves.len(), "shuffling");
        for mv in moves {
            self.submit(mv);
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.sink.resize(width, height);
    }

    /// Advances one frame and redraws.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.scheduler.tick(&mut self.registry);
        if let TickOutcome::Finished(mv) = outcome {
            self.history.push(mv);
        }
        let poses = self.poses();
        self.sink.draw(&poses);
        outcome
    }

    /// Ticks until nothing is animating or queued, up to `max_ticks`.
    ///
    /// Returns the number of ticks taken, or `None` if the budget ran out.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> Option<usize> {
        for ticks in 0..=max_ticks {
            if self.is_idle() {
                return Some(ticks);
            }
            if ticks < max_ticks {
                self.tick();
            }
        }
        None
    }

    /// Current world pose of every cubie, in arena order.
    pub fn poses(&self) -> Vec<CubiePose> {
        let animator = self.scheduler.animator();
        self.registry
            .cubies()
            .iter()
            .enumerate()
            .filter_map(|(index, cubie)| {
                let transform = animator.world_transform(&self.registry, index)?;
                Some(CubiePose {
                    home: cubie.home,
                    transform,
                })
            })
            .collect()
    }
}
