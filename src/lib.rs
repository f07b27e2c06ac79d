//! 3x3x3 Twisty Cube Engine
//!
//! Holds the 27 cubies of a twisty cube, accepts face-turn commands and
//! animates each turn as a quarter rotation of the affected layer before
//! committing the new arrangement.

pub mod animation;
pub mod config;
pub mod engine;
pub mod moves;
pub mod pivot;
pub mod registry;
pub mod scheduler;
pub mod shuffle;

pub use config::{ConfigError, EngineConfig, QueueOrder};
pub use engine::{CubiePose, Engine};
pub use moves::{Move, ParseMoveError};

/// Where the engine sends each frame.
///
/// The engine pushes nothing but the current poses; camera, lighting and
/// window handling belong to the implementor.
pub trait PresentationSink {
    fn draw(&mut self, poses: &[CubiePose]);
    fn resize(&mut self, width: u32, height: u32);
}

/// Sink for headless runs; counts frames and remembers the last size.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pub frames: u64,
    pub size: Option<(u32, u32)>,
}

impl PresentationSink for HeadlessSink {
    fn draw(&mut self, _poses: &[CubiePose]) {
        self.frames += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
}
