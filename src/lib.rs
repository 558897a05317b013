//! Rules core of Portal Chess: an immutable, structurally shared board history
//! and the piece movement rules that query it.
//!
//! The entry point is [`chess::board::Board`]: seed it with
//! [`chess::board::Board::make`] (or [`chess::board::Board::starting`]) and
//! derive new snapshots with `add_piece`, `remove_piece` and `move_piece`.
//! Moves of a piece are enumerated by [`chess::core::Piece::valid_moves`].
//!
//! [`driver::Driver`] wraps the core into a line-oriented text protocol used
//! by the `portal-chess` binary.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]
// Rustdoc lints.
#![warn(
    rustdoc::private_doc_tests,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![deny(clippy::perf)]

pub mod chess;
pub mod driver;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the crate was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the version and the build type on driver startup.
pub fn print_build_info() {
    println!("Portal Chess {}", version());
    println!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        println!("Warning: built with uncommitted changes");
    }
}
