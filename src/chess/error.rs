//! Errors produced by the board and coordinate primitives.
//!
//! Every fallible operation on [`crate::chess::board::Board`] validates its
//! input against the parent snapshot before anything is constructed, so
//! receiving one of these errors means no new snapshot exists and the parent is
//! exactly as it was.

use std::fmt;

use crate::chess::core::{Coord, BOARD_WIDTH};

/// Failure kinds of the board primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A coordinate was built from a file or rank outside of `1..=8`.
    OutOfRange {
        #[allow(missing_docs)]
        file: i8,
        #[allow(missing_docs)]
        rank: i8,
    },
    /// A piece was placed on (or moved to) a square that already holds one.
    OccupiedSquare(Coord),
    /// A piece was removed from (or moved from) a square that holds none.
    EmptySquare(Coord),
}

/// Renders a raw file value the way [`crate::chess::core::File`] would, falling
/// back to the number itself when it is not on the board. Only used for
/// diagnostics.
struct RawFile(i8);

impl fmt::Display for RawFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.0) {
            Ok(file @ 1..=BOARD_WIDTH) => write!(f, "{}", (b'A' + file - 1) as char),
            _ => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { file, rank } => write!(
                f,
                "coordinate ({}, {rank}) is outside of the board",
                RawFile(*file)
            ),
            Self::OccupiedSquare(coord) => write!(f, "{coord} is occupied"),
            Self::EmptySquare(coord) => write!(f, "{coord} is empty"),
        }
    }
}

impl std::error::Error for Error {}
