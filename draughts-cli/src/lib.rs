//! Shared helpers for the terminal binaries: flag parsing, applying moves
//! written in notation, and one-line summaries.

use draughts_core::{
    notation, Color, GameConfig, GameState, MoveKind, MoveOutcome, Result, Status, TurnChange,
};

/// Apply a `--red-first` / `--white-first` flag. Returns false for any other argument.
pub fn apply_side_flag(config: &mut GameConfig, arg: &str) -> bool {
    let color = match arg {
        "--red-first" => Color::Red,
        "--white-first" => Color::White,
        _ => return false,
    };
    config.starting_player = color;
    true
}

/// Parse "B3-A4" / "B3xD5" and apply it.
pub fn play_notation(game: &mut GameState, text: &str) -> Result<MoveOutcome> {
    let (from, to) = notation::parse_move(text)?;
    game.apply_move(from, to)
}

fn capitalize(color: Color) -> String {
    let name = color.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => name,
    }
}

pub fn describe_status(status: &Status) -> String {
    if let Some(winner) = status.winner {
        let winner = capitalize(winner);
        return format!("{winner} wins after {} moves", status.move_count);
    }
    let mut line = format!(
        "{} to move | white {}, red {} | move {}",
        capitalize(status.to_move),
        status.white_pieces,
        status.red_pieces,
        status.move_count
    );
    if let Some(piece) = status.continuation {
        line += &format!(" | {piece} must keep jumping");
    }
    if status.stalled {
        line += " | no legal moves";
    }
    line
}

pub fn describe_outcome(outcome: &MoveOutcome) -> String {
    let mut line = notation::format_move(outcome.from, outcome.to, outcome.kind);
    if outcome.kind == MoveKind::Jump {
        let captured: Vec<String> = outcome.captured.iter().map(|p| p.to_string()).collect();
        line += &format!(" takes {}", captured.join(", "));
    }
    if outcome.promoted {
        line += ", crowned";
    }
    match outcome.turn {
        TurnChange::Passed { next } => line += &format!("; {next} to move"),
        TurnChange::Continues { piece } => line += &format!("; {piece} jumps again"),
        TurnChange::GameOver { winner } => line += &format!("; {winner} wins"),
    }
    line
}

/// Every movable piece with its destinations, e.g. "B3: A4 C4".
pub fn describe_moves(game: &GameState) -> String {
    game.legal_move_table()
        .into_iter()
        .filter(|(_, moves)| !moves.is_empty())
        .map(|(from, moves)| {
            let targets: Vec<String> = moves
                .iter()
                .map(|(to, mv)| {
                    if mv.is_jump() {
                        format!("x{to}")
                    } else {
                        to.to_string()
                    }
                })
                .collect();
            format!("{from}: {}", targets.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
