#![no_main]
use libfuzzer_sys::fuzz_target;
use portal_chess::chess::board::Board;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    let printed = board.to_string();
    let reparsed = Board::from_placement(&printed).expect("printed placement should be valid");
    assert_eq!(reparsed.to_string(), printed);
});
