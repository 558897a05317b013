//! Seeding boards: the standard starting position and the piece placement
//! field of [Forsyth-Edwards Notation] (FEN).
//!
//! Only the placement is understood: side to move, castling rights and the
//! rest of FEN are either the business of the game loop or are derived from
//! the board history (en passant).
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation

use std::fmt::{self, Write};

use anyhow::{bail, Context};
use strum::IntoEnumIterator;

use crate::chess::board::Board;
use crate::chess::core::{Color, Coord, File, Piece, PieceKind, Rank, BOARD_WIDTH};

/// Placement of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Parses the piece placement field of FEN into a list of pieces, ranks from 8
/// to 1 and files from A to H within each rank.
///
/// # Errors
///
/// Returns [`anyhow::Error`] if the input does not describe exactly 8 ranks of
/// exactly 8 squares each or contains unknown symbols.
pub fn parse_placement(placement: &str) -> anyhow::Result<Vec<(Coord, Piece)>> {
    let mut pieces = Vec::new();
    let mut ranks = Rank::iter().rev();
    for rank_placement in placement.split('/') {
        let Some(rank) = ranks.next() else {
            bail!("incorrect placement: expected 8 ranks, got {placement}");
        };
        let mut files = File::iter();
        let mut width: u8 = 0;
        for symbol in rank_placement.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                if skip == 0 {
                    bail!("increment can not be 0");
                }
                for _ in 0..skip {
                    if files.next().is_none() {
                        bail!("incorrect placement: rank {rank_placement} exceeds {BOARD_WIDTH} files");
                    }
                }
                width += u8::try_from(skip)?;
                continue;
            }
            let piece = Piece::try_from(symbol)
                .with_context(|| format!("incorrect placement: rank {rank_placement}"))?;
            let Some(file) = files.next() else {
                bail!("incorrect placement: rank {rank_placement} exceeds {BOARD_WIDTH} files");
            };
            pieces.push((Coord::new(file, rank), piece));
            width += 1;
        }
        if width != BOARD_WIDTH {
            bail!(
                "incorrect placement: rank size should be exactly {BOARD_WIDTH}, got \
                 {rank_placement} of length {width}"
            );
        }
    }
    if ranks.next().is_some() {
        bail!("incorrect placement: there should be 8 ranks, got {placement}");
    }
    Ok(pieces)
}

impl Board {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use portal_chess::chess::board::Board;
    ///
    /// assert_eq!(
    ///     &Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        let pieces = File::iter().zip(BACK_RANK).flat_map(|(file, kind)| {
            [
                (Rank::One, Piece::new(kind, Color::White)),
                (Rank::Two, Piece::new(PieceKind::Pawn, Color::White)),
                (Rank::Seven, Piece::new(PieceKind::Pawn, Color::Black)),
                (Rank::Eight, Piece::new(kind, Color::Black)),
            ]
            .map(|(rank, piece)| (Coord::new(file, rank), piece))
        });
        Self::make(pieces).expect("starting position has one piece per square")
    }

    /// Creates an initial snapshot from the piece placement field of FEN.
    /// Surrounding whitespace and any FEN fields following the placement are
    /// ignored.
    ///
    /// # Errors
    ///
    /// See [`parse_placement`].
    pub fn from_placement(input: &str) -> anyhow::Result<Self> {
        let Some(placement) = input.split_whitespace().next() else {
            bail!("incorrect placement: empty input");
        };
        Ok(Self::make(parse_placement(placement)?)?)
    }
}

impl fmt::Display for Board {
    /// Prints the board as the piece placement field of FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0;
            for file in File::iter() {
                match self.at(Coord::new(file, rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}
