//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::{bail, Context};
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::chess::error::Error;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Half-move counter supplied by the caller whenever a new snapshot is
/// produced. Initial snapshots are produced at round 0.
///
/// Rounds are expected to increase by one per half-move across the whole game.
/// The board does not validate this: the en passant rule is the only consumer
/// and it only compares rounds for equality.
pub type Round = u32;

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a letter.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::FromRepr,
)]
#[allow(missing_docs)]
pub enum File {
    A = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
    F = 6,
    G = 7,
    H = 8,
}

impl File {
    /// Numeric value of the file in `1..=8`.
    #[must_use]
    pub const fn number(self) -> i8 {
        self as i8
    }

    /// Uppercase letter of the file.
    #[must_use]
    pub const fn symbol(self) -> char {
        (b'A' + self as u8 - 1) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        let number = match file {
            'a'..='h' => file as u8 - b'a' + 1,
            'A'..='H' => file as u8 - b'A' + 1,
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        Self::from_repr(number).context("file letters map onto 1..=8")
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number.
#[repr(u8)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::FromRepr,
)]
#[allow(missing_docs)]
pub enum Rank {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
}

impl Rank {
    /// Numeric value of the rank in `1..=8`.
    #[must_use]
    pub const fn number(self) -> i8 {
        self as i8
    }

    /// The rank pawns of given color start the game on. Only from here they are
    /// allowed to advance two squares at once.
    #[must_use]
    pub const fn pawns_starting(color: Color) -> Self {
        match color {
            Color::White => Self::Two,
            Color::Black => Self::Seven,
        }
    }

    /// The rank a pawn of given color has to stand on to capture en passant.
    #[must_use]
    pub const fn en_passant(color: Color) -> Self {
        match color {
            Color::White => Self::Five,
            Color::Black => Self::Four,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::from_repr(rank as u8 - b'0').context("rank digits map onto 1..=8"),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

/// A square of the board, identified by its file and rank. Coordinates are
/// always on the board: the only way to get one from raw numbers is
/// [`Coord::from_indices`] which checks the bounds.
///
/// ```
/// use portal_chess::chess::core::{Coord, File, Rank};
///
/// let c4 = Coord::new(File::C, Rank::Four);
/// assert_eq!(c4.to_string(), "C4");
/// assert_eq!(c4.offset(1, 1), Some(Coord::new(File::D, Rank::Five)));
/// assert_eq!(c4.offset(-3, 0), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    #[allow(missing_docs)]
    pub file: File,
    #[allow(missing_docs)]
    pub rank: Rank,
}

impl Coord {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }

    /// Creates a coordinate from numeric file and rank values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either value is outside of `1..=8`.
    pub fn from_indices(file: i8, rank: i8) -> Result<Self, Error> {
        let out_of_range = Error::OutOfRange { file, rank };
        let file = u8::try_from(file)
            .ok()
            .and_then(File::from_repr)
            .ok_or(out_of_range)?;
        let rank = u8::try_from(rank)
            .ok()
            .and_then(Rank::from_repr)
            .ok_or(out_of_range)?;
        Ok(Self::new(file, rank))
    }

    /// Returns the coordinate shifted by given number of files and ranks or
    /// `None` if it would leave the board.
    #[must_use]
    pub fn offset(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = self.file.number().checked_add(d_file)?;
        let rank = self.rank.number().checked_add(d_rank)?;
        Self::from_indices(file, rank).ok()
    }

    /// Dense index of the square: A1 is 0, H1 is 7, A2 is 8 and H8 is 63.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.rank as usize - 1) * BOARD_WIDTH as usize + (self.file as usize - 1)
    }

    /// Iterates over all squares from A1 to H8, rank by rank.
    pub fn iter() -> impl Iterator<Item = Self> {
        Rank::iter().flat_map(|rank| File::iter().map(move |file| Self::new(file, rank)))
    }
}

impl TryFrom<&str> for Coord {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

/// Side owning a piece. White pawns advance towards rank 8, Black pawns
/// towards rank 1.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank offset of a single pawn push.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

/// Kinds of pieces the variant knows about.
///
/// [`PieceKind::Portal`] is reserved for the variant and does not move yet.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PieceKind {
    Bishop,
    King,
    Knight,
    Pawn,
    Portal,
    Queen,
    Rook,
}

impl PieceKind {
    const fn symbol(self) -> char {
        match self {
            Self::Bishop => 'B',
            Self::King => 'K',
            Self::Knight => 'N',
            Self::Pawn => 'P',
            Self::Portal => 'O',
            Self::Queen => 'Q',
            Self::Rook => 'R',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol().to_ascii_lowercase())
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub color: Color,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let upper = symbol.to_ascii_uppercase();
        match PieceKind::iter().find(|kind| kind.symbol() == upper) {
            Some(kind) => Ok(Self::new(kind, color)),
            None => bail!("piece symbol should be within \"BKNPOQRbknpoqr\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for Piece {
    /// White pieces are uppercase, Black pieces are lowercase.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        })
    }
}

/// A candidate move produced by the move generator. `capture` is the square of
/// the piece taken by the move: it is the destination for regular captures and
/// the square next to the destination for en passant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Coord,
    #[allow(missing_docs)]
    pub to: Coord,
    #[allow(missing_docs)]
    pub capture: Option<Coord>,
}

impl Move {
    /// Creates a move that doesn't take anything.
    #[must_use]
    pub const fn quiet(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            capture: None,
        }
    }

    /// Creates a move taking the piece on the destination square.
    #[must_use]
    pub const fn capture(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            capture: Some(to),
        }
    }

    /// Returns true if the taken piece is not on the destination square.
    #[must_use]
    pub fn is_en_passant(&self) -> bool {
        self.capture.is_some_and(|capture| capture != self.to)
    }
}

impl fmt::Display for Move {
    /// Serializes a move in [UCI format] (e.g. `e2e4`).
    ///
    /// [UCI format]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for square in [self.from, self.to] {
            f.write_char(square.file.symbol().to_ascii_lowercase())?;
            write!(f, "{}", square.rank)?;
        }
        Ok(())
    }
}
