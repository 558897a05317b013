//! Pseudo-move generation: moves allowed by the piece movement rules and the
//! occupancy of the board, without looking at checks.
//!
//! Castling and promotion are not part of the variant's rules yet, and
//! [`PieceKind::Portal`] does not move.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Color, Coord, Move, Piece, PieceKind, Rank, Round};

/// A queen in the center of an otherwise empty board has the most moves any
/// single piece can have.
pub const MAX_PIECE_MOVES: usize = 27;

/// Moves of a single piece, stored on the stack.
pub type MoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

type Offset = (i8, i8);

const BISHOP_DIRECTIONS: [Offset; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [Offset; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const QUEEN_DIRECTIONS: [Offset; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KING_STEPS: [Offset; 8] = QUEEN_DIRECTIONS;
const KNIGHT_STEPS: [Offset; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

impl Piece {
    /// Calculates the moves of this piece standing on `from`.
    ///
    /// `round` is the round the move would be played at. Only pawns need it:
    /// en passant is possible only right after the enemy pawn's double step,
    /// i.e. when its last move happened at `round - 1`.
    #[must_use]
    pub fn valid_moves(self, from: Coord, board: &Board, round: Round) -> MoveList {
        let mut moves = MoveList::new();
        match self.kind {
            PieceKind::Bishop => self.slide(from, board, &BISHOP_DIRECTIONS, &mut moves),
            PieceKind::Rook => self.slide(from, board, &ROOK_DIRECTIONS, &mut moves),
            PieceKind::Queen => self.slide(from, board, &QUEEN_DIRECTIONS, &mut moves),
            PieceKind::King => self.step(from, board, &KING_STEPS, &mut moves),
            PieceKind::Knight => self.step(from, board, &KNIGHT_STEPS, &mut moves),
            PieceKind::Pawn => self.pawn_moves(from, board, round, &mut moves),
            PieceKind::Portal => (),
        }
        moves
    }

    /// Records a move to `to` if it is empty or holds an enemy piece. Returns
    /// true if the square is occupied, i.e. sliding further is blocked.
    fn add_target(self, from: Coord, to: Coord, board: &Board, moves: &mut MoveList) -> bool {
        match board.at(to) {
            None => {
                moves.push(Move::quiet(from, to));
                false
            },
            Some(piece) => {
                if piece.color != self.color {
                    moves.push(Move::capture(from, to));
                }
                true
            },
        }
    }

    fn slide(self, from: Coord, board: &Board, directions: &[Offset], moves: &mut MoveList) {
        for &(d_file, d_rank) in directions {
            let ray = std::iter::successors(from.offset(d_file, d_rank), |square| {
                square.offset(d_file, d_rank)
            });
            for to in ray {
                if self.add_target(from, to, board, moves) {
                    break;
                }
            }
        }
    }

    fn step(self, from: Coord, board: &Board, offsets: &[Offset], moves: &mut MoveList) {
        for to in offsets
            .iter()
            .filter_map(|&(d_file, d_rank)| from.offset(d_file, d_rank))
        {
            let _blocked = self.add_target(from, to, board, moves);
        }
    }

    fn pawn_moves(self, from: Coord, board: &Board, round: Round, moves: &mut MoveList) {
        let forward = self.color.pawn_direction();

        if let Some(single) = from.offset(0, forward) {
            if board.at(single).is_none() {
                moves.push(Move::quiet(from, single));
                if from.rank == Rank::pawns_starting(self.color) {
                    if let Some(double) = single.offset(0, forward) {
                        if board.at(double).is_none() {
                            moves.push(Move::quiet(from, double));
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(diagonal) = from.offset(side, forward) else {
                continue;
            };
            match board.at(diagonal) {
                Some(target) => {
                    if target.color != self.color {
                        moves.push(Move::capture(from, diagonal));
                    }
                },
                None => {
                    if let Some(victim) = self.en_passant_victim(from, side, board, round) {
                        moves.push(Move {
                            from,
                            to: diagonal,
                            capture: Some(victim),
                        });
                    }
                },
            }
        }
    }

    /// Returns the square of the enemy pawn next to `from` (on the `side` file)
    /// that can be captured en passant.
    fn en_passant_victim(
        self,
        from: Coord,
        side: i8,
        board: &Board,
        round: Round,
    ) -> Option<Coord> {
        if from.rank != Rank::en_passant(self.color) {
            return None;
        }
        let victim = from.offset(side, 0)?;
        let target = board.at(victim)?;
        if target.color == self.color || target.kind != PieceKind::Pawn {
            return None;
        }
        // The pawn has to have entered the board and moved exactly once: in the
        // previous round and from its starting rank.
        let history = board.move_history(victim);
        let [last, entry] = history.as_slice() else {
            return None;
        };
        if round.checked_sub(1) != Some(last.round) {
            return None;
        }
        if entry.coord.rank != Rank::pawns_starting(target.color) {
            return None;
        }
        Some(victim)
    }
}

impl Color {
    /// Collects the moves of every piece of this color on the board.
    #[must_use]
    pub fn all_moves(self, board: &Board, round: Round) -> Vec<Move> {
        board
            .pieces()
            .filter(|(_, piece)| piece.color == self)
            .flat_map(|(from, piece)| piece.valid_moves(from, board, round))
            .collect()
    }
}
