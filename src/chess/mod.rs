//! Implementation of the variant's board, its rules and specifics.

pub mod board;
pub mod core;
pub mod error;
pub mod layout;
pub mod movegen;
