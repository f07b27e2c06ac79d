//! Face-turn notation and decoding.
//!
//! A move token names one of the six outer faces, optionally followed by `'`
//! for the counter-rotation. Decoding a move yields the axis it turns around,
//! the coordinate of the slice it turns, and the direction of the turn.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A principal axis of the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis in a 3-vector.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six outer faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Up,
        Face::Down,
    ];

    /// Axis this face turns around and the sign of its slice coordinate.
    ///
    /// Front/back sit on the x axis, down/up on y, left/right on z.
    const fn placement(self) -> (Axis, f32) {
        match self {
            Face::Front => (Axis::X, -1.0),
            Face::Back => (Axis::X, 1.0),
            Face::Down => (Axis::Y, -1.0),
            Face::Up => (Axis::Y, 1.0),
            Face::Left => (Axis::Z, -1.0),
            Face::Right => (Axis::Z, 1.0),
        }
    }

    const fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }
}

/// A quarter-turn of one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    /// Counter-rotation (`'` suffix).
    pub prime: bool,
}

impl Move {
    /// The full 12-token vocabulary, in the order `F F' B B' L L' R R' U U' D D'`.
    pub const ALL: [Move; 12] = {
        let mut all = [Move::new(Face::Front, false); 12];
        let mut i = 0;
        while i < Face::ALL.len() {
            all[2 * i] = Move::new(Face::ALL[i], false);
            all[2 * i + 1] = Move::new(Face::ALL[i], true);
            i += 1;
        }
        all
    };

    pub const fn new(face: Face, prime: bool) -> Self {
        Self { face, prime }
    }

    /// The move that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::new(self.face, !self.prime)
    }

    /// Rotation parameters for this move on a lattice with the given spacing.
    pub fn descriptor(self, boundary_size: f32) -> MoveDescriptor {
        let (axis, slice_sign) = self.face.placement();
        MoveDescriptor {
            axis,
            slice_center: slice_sign * boundary_size,
            direction: if self.prime { -1 } else { 1 },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prime {
            write!(f, "{}'", self.face.letter())
        } else {
            write!(f, "{}", self.face.letter())
        }
    }
}

/// Returned when a token is not one of the 12 known moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move token {token:?}")]
pub struct ParseMoveError {
    pub token: String,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (letter, prime) = match token.strip_suffix('\'') {
            Some(letter) => (letter, true),
            None => (token, false),
        };
        let face = match letter {
            "F" => Face::Front,
            "B" => Face::Back,
            "L" => Face::Left,
            "R" => Face::Right,
            "U" => Face::Up,
            "D" => Face::Down,
            _ => {
                return Err(ParseMoveError {
                    token: token.to_owned(),
                })
            }
        };
        Ok(Move::new(face, prime))
    }
}

/// Axis, slice coordinate and turn direction of a decoded move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveDescriptor {
    pub axis: Axis,
    /// Coordinate of the turned slice along `axis`.
    pub slice_center: f32,
    /// `+1` for a plain move, `-1` for a primed one.
    pub direction: i8,
}

/// Decodes a raw token. Unknown tokens decode to `None`.
pub fn decode(token: &str, boundary_size: f32) -> Option<MoveDescriptor> {
    token
        .parse::<Move>()
        .ok()
        .map(|mv| mv.descriptor(boundary_size))
}

/// Parses a whitespace-separated sequence such as `"F U' R"`.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, ParseMoveError> {
    sequence.split_whitespace().map(str::parse).collect()
}
