//! The driver exposes the rules core over a line-oriented text protocol,
//! loosely following the [Universal Chess Interface] (UCI): a `position`
//! command seeds the board and `move` commands grow the board history.
//!
//! The driver does not sequence turns: any generated move of any piece can be
//! played at any point, and the round advances by one per applied move.
//!
//! [`Driver::run`] is the main loop which reads commands from the input stream
//! and replies to the output stream.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::core::{Coord, Move, Round};
use crate::driver::command::Command;

mod command;

/// Connects the persistent board with the text protocol, including I/O.
///
/// Every applied move pushes a new snapshot, so `undo` simply drops the most
/// recent one: the older snapshots are shared and never change.
pub struct Driver<'a, R: BufRead, W: Write> {
    /// Snapshots after every applied move, the seed comes first.
    snapshots: Vec<Board>,
    played: Vec<Move>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Driver<'a, R, W> {
    /// Creates a new driver with the starting position and provided I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            snapshots: vec![Board::starting()],
            played: Vec::new(),
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes commands until `quit`
    /// is sent or the input is exhausted.
    ///
    /// Invalid commands and illegal moves are reported as `Error: <message>`
    /// and do not change the board.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading the input or writing the output
    /// fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self
                .input
                .read_line(&mut line)
                .context("reading from input")?
                == 0
            {
                break;
            }
            let result = match Command::parse(&line) {
                Command::SetPosition { placement, moves } => {
                    self.handle_position(placement.as_deref(), &moves)
                },
                Command::Moves(square) => self.handle_moves(&square),
                Command::Move(uci) => self.handle_move(&uci),
                Command::History(square) => self.handle_history(&square),
                Command::Undo => self.handle_undo(),
                Command::Display => self.handle_display(),
                Command::Quit => break,
                Command::Unknown(command) if command.is_empty() => Ok(()),
                Command::Unknown(command) => Err(anyhow::anyhow!("unknown command: {command}")),
            };
            if let Err(e) = result {
                writeln!(self.output, "Error: {e:#}")?;
            }
        }
        Ok(())
    }

    fn current(&self) -> &Board {
        // The seed snapshot is never popped.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Round at which the next move will be played.
    fn next_round(&self) -> Round {
        self.current().round() + 1
    }

    /// Finds the generated move matching `uci` and applies it to the current
    /// snapshot.
    fn play(&mut self, uci: &str) -> anyhow::Result<Move> {
        let (from, to) = parse_uci(uci)?;
        let round = self.next_round();
        let Some(next_move) = self
            .current()
            .generate_moves(from, round)
            .into_iter()
            .find(|m| m.to == to)
        else {
            bail!("illegal move: {uci}");
        };
        let next = self.current().apply(next_move, round)?;
        self.snapshots.push(next);
        self.played.push(next_move);
        Ok(next_move)
    }

    /// Seeds a new game and replays `moves` on top of it. A failing move
    /// leaves the board after the last successful one.
    fn handle_position(&mut self, placement: Option<&str>, moves: &[String]) -> anyhow::Result<()> {
        let seed = match placement {
            Some(placement) => Board::from_placement(placement)?,
            None => Board::starting(),
        };
        self.snapshots = vec![seed];
        self.played.clear();
        for uci in moves {
            let _ = self.play(uci)?;
        }
        Ok(())
    }

    fn handle_moves(&mut self, square: &str) -> anyhow::Result<()> {
        let from = Coord::try_from(square)?;
        let moves = self.current().generate_moves(from, self.next_round());
        if moves.is_empty() {
            writeln!(self.output, "(none)")?;
            return Ok(());
        }
        writeln!(
            self.output,
            "{}",
            moves
                .iter()
                .map(|m| match m.capture {
                    Some(capture) if m.is_en_passant() => format!("{m} (en passant {capture})"),
                    Some(_) => format!("{m} (capture)"),
                    None => m.to_string(),
                })
                .sorted()
                .join(" ")
        )?;
        Ok(())
    }

    fn handle_move(&mut self, uci: &str) -> anyhow::Result<()> {
        let played = self.play(uci)?;
        writeln!(
            self.output,
            "{played} played at round {}",
            self.current().round()
        )?;
        Ok(())
    }

    fn handle_history(&mut self, square: &str) -> anyhow::Result<()> {
        let coord = Coord::try_from(square)?;
        let history = self.current().move_history(coord);
        if history.is_empty() {
            writeln!(self.output, "(empty)")?;
        } else {
            writeln!(self.output, "{}", history.iter().join(" "))?;
        }
        Ok(())
    }

    fn handle_undo(&mut self) -> anyhow::Result<()> {
        let Some(undone) = self.played.pop() else {
            bail!("nothing to undo");
        };
        drop(self.snapshots.pop());
        writeln!(
            self.output,
            "{undone} undone, back to round {}",
            self.current().round()
        )?;
        Ok(())
    }

    /// Dumps the board a-la Stockfish `d` command.
    fn handle_display(&mut self) -> anyhow::Result<()> {
        let debug = format!("{:?}", self.current());
        writeln!(self.output, "{debug}")?;
        writeln!(self.output, "Round: {}", self.current().round())?;
        let placement = self.current().to_string();
        writeln!(self.output, "Placement: {placement}")?;
        if !self.played.is_empty() {
            writeln!(self.output, "Moves: {}", self.played.iter().join(" "))?;
        }
        Ok(())
    }
}

/// Splits a move in UCI format (`e2e4`) into source and destination squares.
fn parse_uci(uci: &str) -> anyhow::Result<(Coord, Coord)> {
    if uci.len() == 5 {
        bail!("promotion is not supported: {uci}");
    }
    if uci.len() != 4 || !uci.is_ascii() {
        bail!("move should be 4 chars in UCI format (e.g. e2e4), got {uci}");
    }
    let (from, to) = uci.split_at(2);
    Ok((
        Coord::try_from(from).with_context(|| format!("move {uci}"))?,
        Coord::try_from(to).with_context(|| format!("move {uci}"))?,
    ))
}
