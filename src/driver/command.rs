#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    SetPosition {
        /// `None` stands for the starting position.
        placement: Option<String>,
        moves: Vec<String>,
    },
    Moves(String),
    Move(String),
    History(String),
    Undo,
    Display,
    Quit,
    Unknown(String),
}

fn parse_setposition(parts: &[&str]) -> Command {
    let moves_index = parts.iter().position(|&x| x == "moves");
    let setup = &parts[1..moves_index.unwrap_or(parts.len())];
    let placement = match setup {
        ["startpos"] => None,
        ["fen", fen @ ..] if !fen.is_empty() => Some(fen.join(" ")),
        [fen, ..] if *fen != "fen" => Some(setup.join(" ")),
        _ => return Command::Unknown(parts.join(" ")),
    };
    let moves = moves_index.map_or_else(Vec::new, |moves_index| {
        parts[moves_index + 1..]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    });
    Command::SetPosition { placement, moves }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["position", _, ..] => parse_setposition(&parts),
            ["moves", square] => Self::Moves((*square).to_string()),
            ["move", uci] => Self::Move((*uci).to_string()),
            ["history", square] => Self::History((*square).to_string()),
            ["undo"] => Self::Undo,
            ["d"] => Self::Display,
            ["quit"] => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_position() {
        assert_eq!(
            Command::parse("position startpos moves e2e4 e7e5"),
            Command::SetPosition {
                placement: None,
                moves: vec!["e2e4".to_string(), "e7e5".to_string()]
            }
        );
        assert_eq!(
            Command::parse("position startpos"),
            Command::SetPosition {
                placement: None,
                moves: vec![]
            }
        );
        assert_eq!(
            Command::parse("position fen 8/8/8/4P3/8/8/8/8 w - - 0 1 moves e5e6"),
            Command::SetPosition {
                placement: Some("8/8/8/4P3/8/8/8/8 w - - 0 1".to_string()),
                moves: vec!["e5e6".to_string()]
            }
        );
        assert_eq!(
            Command::parse("position 8/8/8/4P3/8/8/8/8"),
            Command::SetPosition {
                placement: Some("8/8/8/4P3/8/8/8/8".to_string()),
                moves: vec![]
            }
        );
    }

    #[test]
    fn parse_incomplete_position() {
        assert_eq!(
            Command::parse("position"),
            Command::Unknown("position".to_string())
        );
        assert_eq!(
            Command::parse("position fen"),
            Command::Unknown("position fen".to_string())
        );
        assert_eq!(
            Command::parse("position moves e2e4"),
            Command::Unknown("position moves e2e4".to_string())
        );
    }

    #[test]
    fn parse_queries() {
        assert_eq!(Command::parse("moves e2"), Command::Moves("e2".to_string()));
        assert_eq!(Command::parse("move e2e4\n"), Command::Move("e2e4".to_string()));
        assert_eq!(
            Command::parse("history d5"),
            Command::History("d5".to_string())
        );
        assert_eq!(Command::parse("undo"), Command::Undo);
        assert_eq!(Command::parse("d"), Command::Display);
        assert_eq!(Command::parse("  quit  "), Command::Quit);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(Command::parse(""), Command::Unknown(String::new()));
        assert_eq!(
            Command::parse("moves"),
            Command::Unknown("moves".to_string())
        );
        assert_eq!(
            Command::parse("go depth 3"),
            Command::Unknown("go depth 3".to_string())
        );
    }
}
