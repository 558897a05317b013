#![no_main]
use libfuzzer_sys::fuzz_target;
use portal_chess::chess::board::Board;
use portal_chess::chess::core::Color;
use pretty_assertions::assert_eq;

// Every generated move must be applicable and must move the piece it was
// generated for.
fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    for color in [Color::White, Color::Black] {
        for next_move in color.all_moves(&board, 1) {
            let piece = board.at(next_move.from);
            let after = board
                .apply(next_move, 1)
                .expect("generated moves should be applicable");
            assert_eq!(after.at(next_move.to), piece);
            assert_eq!(after.at(next_move.from), None);
        }
    }
});
