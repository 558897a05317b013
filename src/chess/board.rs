//! Persistent board: every state of the game is an immutable snapshot that
//! shares all of its history with the snapshot it was derived from.
//!
//! A [`Board`] is a cheap handle ([`Arc`]) to a snapshot. Snapshots form a
//! chain of deltas that ends in an initial placement:
//!
//! - *Initial*: a full placement of pieces, the root of every chain.
//! - *Added*: parent plus one piece.
//! - *Removed*: parent minus one piece.
//! - *Moved*: parent with one piece relocated.
//!
//! Deriving a snapshot allocates a single node and never touches the parent,
//! so every earlier state stays valid and queryable for as long as something
//! holds it. The price is paid on lookup: [`Board::at`] and
//! [`Board::move_history`] walk the chain towards the root, which is bounded by
//! the length of the game.
//!
//! ```
//! use portal_chess::chess::board::Board;
//! use portal_chess::chess::core::Coord;
//!
//! let e2 = Coord::try_from("e2").unwrap();
//! let e4 = Coord::try_from("e4").unwrap();
//! let before = Board::starting();
//! let after = before.move_piece(e2, e4, 1).unwrap();
//! assert!(after.at(e2).is_none());
//! assert!(before.at(e2).is_some());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::chess::core::{Coord, Move, Piece, Round, BOARD_SIZE};
use crate::chess::error::Error;
use crate::chess::movegen::MoveList;

/// One step of a piece's provenance: the round at which it arrived on
/// `coord`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    #[allow(missing_docs)]
    pub round: Round,
    #[allow(missing_docs)]
    pub coord: Coord,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.coord, self.round)
    }
}

type Squares = [Option<Piece>; BOARD_SIZE as usize];

enum Delta {
    Initial(Box<Squares>),
    Added {
        parent: Board,
        coord: Coord,
        piece: Piece,
    },
    Removed {
        parent: Board,
        coord: Coord,
    },
    Moved {
        parent: Board,
        from: Coord,
        to: Coord,
    },
}

struct Snapshot {
    round: Round,
    delta: Delta,
}

/// Handle to an immutable board snapshot. Cloning the handle is cheap and
/// shares the snapshot.
#[derive(Clone)]
pub struct Board(Arc<Snapshot>);

impl Board {
    fn derive(round: Round, delta: Delta) -> Self {
        Self(Arc::new(Snapshot { round, delta }))
    }

    /// Creates an initial snapshot (produced at round 0) holding given pieces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OccupiedSquare`] if two pieces share a coordinate.
    pub fn make(pieces: impl IntoIterator<Item = (Coord, Piece)>) -> Result<Self, Error> {
        let mut squares: Box<Squares> = Box::new([None; BOARD_SIZE as usize]);
        for (coord, piece) in pieces {
            let square = &mut squares[coord.index()];
            if square.is_some() {
                return Err(Error::OccupiedSquare(coord));
            }
            *square = Some(piece);
        }
        Ok(Self::derive(0, Delta::Initial(squares)))
    }

    /// Creates a board without any pieces.
    #[must_use]
    pub fn empty() -> Self {
        Self::derive(0, Delta::Initial(Box::new([None; BOARD_SIZE as usize])))
    }

    /// Round at which this snapshot was produced.
    #[must_use]
    pub fn round(&self) -> Round {
        self.0.round
    }

    /// The snapshot this one was derived from, `None` for initial snapshots.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        match &self.0.delta {
            Delta::Initial(_) => None,
            Delta::Added { parent, .. }
            | Delta::Removed { parent, .. }
            | Delta::Moved { parent, .. } => Some(parent),
        }
    }

    /// Number of deltas between this snapshot and the initial one.
    #[must_use]
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), |board| board.parent()).count()
    }

    /// Returns the piece on given square, if any.
    #[must_use]
    pub fn at(&self, coord: Coord) -> Option<Piece> {
        let mut board = self;
        let mut coord = coord;
        loop {
            match &board.0.delta {
                Delta::Initial(squares) => return squares[coord.index()],
                Delta::Added {
                    parent,
                    coord: added,
                    piece,
                } => {
                    if *added == coord {
                        return Some(*piece);
                    }
                    board = parent;
                },
                Delta::Removed {
                    parent,
                    coord: removed,
                } => {
                    if *removed == coord {
                        return None;
                    }
                    board = parent;
                },
                Delta::Moved { parent, from, to } => {
                    if *from == coord {
                        return None;
                    }
                    // The piece on `to` is whatever the parent had on `from`.
                    if *to == coord {
                        coord = *from;
                    }
                    board = parent;
                },
            }
        }
    }

    /// Iterates over all occupied squares from A1 to H8.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::iter().filter_map(|coord| self.at(coord).map(|piece| (coord, piece)))
    }

    /// Derives a snapshot with `piece` placed on `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OccupiedSquare`] if `coord` already holds a piece.
    pub fn add_piece(&self, coord: Coord, piece: Piece, round: Round) -> Result<Self, Error> {
        if self.at(coord).is_some() {
            return Err(Error::OccupiedSquare(coord));
        }
        Ok(Self::derive(
            round,
            Delta::Added {
                parent: self.clone(),
                coord,
                piece,
            },
        ))
    }

    /// Derives a snapshot without the piece on `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySquare`] if there is nothing to remove.
    pub fn remove_piece(&self, coord: Coord, round: Round) -> Result<Self, Error> {
        if self.at(coord).is_none() {
            return Err(Error::EmptySquare(coord));
        }
        Ok(Self::derive(
            round,
            Delta::Removed {
                parent: self.clone(),
                coord,
            },
        ))
    }

    /// Derives a snapshot with the piece on `from` relocated to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OccupiedSquare`] if `to` is occupied and
    /// [`Error::EmptySquare`] if `from` is empty.
    pub fn move_piece(&self, from: Coord, to: Coord, round: Round) -> Result<Self, Error> {
        if self.at(to).is_some() {
            return Err(Error::OccupiedSquare(to));
        }
        if self.at(from).is_none() {
            return Err(Error::EmptySquare(from));
        }
        Ok(Self::derive(
            round,
            Delta::Moved {
                parent: self.clone(),
                from,
                to,
            },
        ))
    }

    /// Performs a generated move: removes the captured piece (if any) and then
    /// relocates the moving piece, both at given round.
    ///
    /// The move is not checked against the move generator.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Board::remove_piece`] and
    /// [`Board::move_piece`].
    pub fn apply(&self, next_move: Move, round: Round) -> Result<Self, Error> {
        match next_move.capture {
            Some(capture) => self.remove_piece(capture, round)?,
            None => self.clone(),
        }
        .move_piece(next_move.from, next_move.to, round)
    }

    /// Reconstructs how the piece currently on `coord` got there, most recent
    /// arrival first. The last entry is where the piece entered the board
    /// (initial placement or [`Board::add_piece`]); every entry before it is a
    /// [`Board::move_piece`] step. Empty squares have no history.
    #[must_use]
    pub fn move_history(&self, coord: Coord) -> Vec<HistoryEntry> {
        let mut history = Vec::new();
        let mut board = self;
        let mut coord = coord;
        loop {
            let round = board.round();
            match &board.0.delta {
                Delta::Initial(squares) => {
                    if squares[coord.index()].is_none() {
                        return Vec::new();
                    }
                    history.push(HistoryEntry { round, coord });
                    return history;
                },
                Delta::Added {
                    parent,
                    coord: added,
                    ..
                } => {
                    if *added == coord {
                        history.push(HistoryEntry { round, coord });
                        return history;
                    }
                    board = parent;
                },
                Delta::Removed {
                    parent,
                    coord: removed,
                } => {
                    if *removed == coord {
                        return Vec::new();
                    }
                    board = parent;
                },
                Delta::Moved { parent, from, to } => {
                    if *from == coord {
                        return Vec::new();
                    }
                    if *to == coord {
                        history.push(HistoryEntry { round, coord });
                        coord = *from;
                    }
                    board = parent;
                },
            }
        }
    }

    /// Generates moves of the piece standing on `from`. Empty squares have no
    /// moves.
    #[must_use]
    pub fn generate_moves(&self, from: Coord, round: Round) -> MoveList {
        self.at(from)
            .map_or_else(MoveList::new, |piece| piece.valid_moves(from, self, round))
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, piece symbol
    /// otherwise) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares: Vec<Option<Piece>> = Coord::iter().map(|coord| self.at(coord)).collect();
        for (rank, row) in squares.chunks(8).enumerate().rev() {
            for (file, square) in row.iter().enumerate() {
                match square {
                    Some(piece) => write!(f, "{piece}"),
                    None => write!(f, "."),
                }?;
                if file != row.len() - 1 {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != 0 {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
