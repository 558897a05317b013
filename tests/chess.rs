use itertools::Itertools;
use portal_chess::chess::board::{Board, HistoryEntry};
use portal_chess::chess::core::{Color, Coord, File, Move, Piece, PieceKind, Rank, Round};
use portal_chess::chess::error::Error;
use pretty_assertions::assert_eq;

fn square(input: &str) -> Coord {
    Coord::try_from(input).expect("valid square: {input}")
}

/// Plays the generated move of the piece on the source square that lands on
/// the destination square.
fn play(board: &Board, uci: &str, round: Round) -> Board {
    let (from, to) = uci.split_at(2);
    let (from, to) = (square(from), square(to));
    let next_move = board
        .generate_moves(from, round)
        .into_iter()
        .find(|m| m.to == to)
        .unwrap_or_else(|| panic!("{uci} should be generated at round {round}"));
    board.apply(next_move, round).unwrap()
}

fn play_all(moves: &[&str]) -> Board {
    moves
        .iter()
        .zip(1..)
        .fold(Board::starting(), |board, (uci, round)| play(&board, uci, round))
}

fn moves_of(board: &Board, from: &str, round: Round) -> Vec<String> {
    board
        .generate_moves(square(from), round)
        .iter()
        .map(Move::to_string)
        .sorted()
        .collect()
}

#[test]
fn removed_square_is_empty() {
    let board = Board::starting();
    for coord in [square("a1"), square("e8"), square("d2")] {
        let removed = board.remove_piece(coord, 1).unwrap();
        assert_eq!(removed.at(coord), None);
        assert!(board.at(coord).is_some());
    }
}

#[test]
fn snapshots_are_immutable() {
    let board1 = Board::empty();
    let c4 = square("c4");
    let rook = Piece::new(PieceKind::Rook, Color::White);
    let board2 = board1.add_piece(c4, rook, 1).unwrap();
    assert_eq!(board1.at(c4), None);
    assert_eq!(board2.at(c4), Some(rook));

    let board3 = board2.move_piece(c4, square("c8"), 2).unwrap();
    assert_eq!(board2.at(c4), Some(rook));
    assert_eq!(board3.at(c4), None);
    assert_eq!(board3.at(square("c8")), Some(rook));
}

#[test]
fn move_relocates_single_piece() {
    let board = Board::starting();
    let (from, to) = (square("g1"), square("f3"));
    let moved = board.move_piece(from, to, 1).unwrap();
    assert_eq!(moved.at(from), None);
    assert_eq!(moved.at(to), board.at(from));
    for coord in Coord::iter().filter(|&c| c != from && c != to) {
        assert_eq!(moved.at(coord), board.at(coord), "{coord}");
    }
}

#[test]
fn duplicate_seed() {
    let c4 = square("c4");
    let result = Board::make([
        (c4, Piece::new(PieceKind::Pawn, Color::White)),
        (square("c5"), Piece::new(PieceKind::Pawn, Color::Black)),
        (c4, Piece::new(PieceKind::Knight, Color::Black)),
    ]);
    assert_eq!(result.err(), Some(Error::OccupiedSquare(c4)));
}

#[test]
fn failed_mutations_keep_parent() {
    let board = Board::starting();
    let e2 = square("e2");
    let e4 = square("e4");
    let queen = Piece::new(PieceKind::Queen, Color::Black);

    assert_eq!(
        board.add_piece(e2, queen, 1).err(),
        Some(Error::OccupiedSquare(e2))
    );
    assert_eq!(board.remove_piece(e4, 1).err(), Some(Error::EmptySquare(e4)));
    assert_eq!(
        board.move_piece(e4, square("e5"), 1).err(),
        Some(Error::EmptySquare(e4))
    );
    assert_eq!(
        board.move_piece(e2, square("e1"), 1).err(),
        Some(Error::OccupiedSquare(square("e1")))
    );
    assert_eq!(board.depth(), 0);
    assert_eq!(board.at(e2), Some(Piece::new(PieceKind::Pawn, Color::White)));
    assert_eq!(board.at(e4), None);
}

#[test]
fn out_of_range_coordinates() {
    assert_eq!(
        Coord::from_indices(9, 1).err(),
        Some(Error::OutOfRange { file: 9, rank: 1 })
    );
    assert_eq!(
        Coord::from_indices(3, 0).err(),
        Some(Error::OutOfRange { file: 3, rank: 0 })
    );
    assert_eq!(
        Coord::from_indices(3, 4),
        Ok(Coord::new(File::C, Rank::Four))
    );
}

#[test]
fn rook_blocked_by_friendly_piece() {
    let board = Board::from_placement("8/8/8/8/N7/8/8/R7").unwrap();
    let along_file: Vec<Coord> = board
        .generate_moves(square("a1"), 1)
        .iter()
        .map(|m| m.to)
        .filter(|to| to.file == File::A)
        .collect();
    assert_eq!(along_file, vec![square("a2"), square("a3")]);
}

#[test]
fn history_of_game() {
    let board = play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(
        board.move_history(square("e5")),
        vec![
            HistoryEntry {
                round: 3,
                coord: square("e5")
            },
            HistoryEntry {
                round: 1,
                coord: square("e4")
            },
            HistoryEntry {
                round: 0,
                coord: square("e2")
            },
        ]
    );
    assert_eq!(board.move_history(square("d5")).iter().join(" "), "D5@4 D7@0");
    assert_eq!(board.move_history(square("a6")).iter().join(" "), "A6@2 A7@0");
    assert_eq!(board.move_history(square("g1")).iter().join(" "), "G1@0");
    assert!(board.move_history(square("e2")).is_empty());
    assert!(board.move_history(square("e4")).is_empty());
}

#[test]
fn en_passant_after_double_step() {
    let board = play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(moves_of(&board, "e5", 5), vec!["e5d6", "e5e6"]);

    let en_passant = board
        .generate_moves(square("e5"), 5)
        .into_iter()
        .find(Move::is_en_passant)
        .unwrap();
    assert_eq!(en_passant.capture, Some(square("d5")));

    let after = board.apply(en_passant, 5).unwrap();
    assert_eq!(after.at(square("d5")), None);
    assert_eq!(
        after.at(square("d6")),
        Some(Piece::new(PieceKind::Pawn, Color::White))
    );
    assert_eq!(
        after.to_string(),
        "rnbqkbnr/1pp1pppp/p2P4/8/8/8/PPPP1PPP/RNBQKBNR"
    );
}

#[test]
fn en_passant_expires() {
    let board = play_all(&["e2e4", "a7a6", "e4e5", "d7d5", "h2h3"]);
    assert_eq!(moves_of(&board, "e5", 6), vec!["e5e6"]);
}

#[test]
fn no_en_passant_after_two_single_steps() {
    let board = play_all(&["e2e4", "d7d6", "e4e5", "d6d5"]);
    assert_eq!(board.move_history(square("d5")).len(), 3);
    assert_eq!(moves_of(&board, "e5", 5), vec!["e5e6"]);
}

#[test]
fn black_en_passant() {
    let board = play_all(&["a2a3", "d7d5", "a3a4", "d5d4", "e2e4"]);
    assert_eq!(moves_of(&board, "d4", 6), vec!["d4d3", "d4e3"]);
    let after = play(&board, "d4e3", 6);
    assert_eq!(after.at(square("e4")), None);
    assert_eq!(
        after.at(square("e3")),
        Some(Piece::new(PieceKind::Pawn, Color::Black))
    );
}

#[test]
fn all_moves_of_both_sides() {
    let board = Board::starting();
    assert_eq!(Color::White.all_moves(&board, 1).len(), 20);
    assert_eq!(Color::Black.all_moves(&board, 1).len(), 20);

    let board = play_all(&["e2e4", "d7d5"]);
    let captures = Color::White
        .all_moves(&board, 3)
        .into_iter()
        .filter(|m| m.capture.is_some())
        .map(|m| m.to_string())
        .collect_vec();
    assert_eq!(captures, vec!["e4d5"]);
}

#[test]
fn portal_is_inert() {
    let board = Board::from_placement("8/8/8/3oO3/8/8/8/8").unwrap();
    assert!(board.generate_moves(square("d5"), 1).is_empty());
    assert!(board.generate_moves(square("e5"), 1).is_empty());
}

#[test]
fn shared_between_threads() {
    let board = play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    let handles = (0..4)
        .map(|_| {
            let board = board.clone();
            std::thread::spawn(move || moves_of(&board, "e5", 5))
        })
        .collect_vec();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["e5d6", "e5e6"]);
    }
}
