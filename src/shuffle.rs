//! Random move sequences for the shuffle action.
//!
//! Moves are drawn uniformly and independently from the 12-token vocabulary;
//! no attempt is made to produce a well-mixed scramble.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::moves::Move;

/// Number of moves the shuffle action submits when none is given.
pub const DEFAULT_SHUFFLE_LENGTH: usize = 20;

pub fn random_moves<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Move> {
    (0..count)
        .filter_map(|_| Move::ALL.choose(rng).copied())
        .collect()
}
