//! Keyboard mapping
//!
//! The core only understands [`Command`]s; this is the single place that
//! knows about key names.

use crate::sim::{Facing, GamePhase, TickInput};

/// Abstract player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Restart,
}

impl Command {
    pub fn direction(self) -> Option<Facing> {
        match self {
            Command::MoveUp => Some(Facing::Up),
            Command::MoveDown => Some(Facing::Down),
            Command::MoveLeft => Some(Facing::Left),
            Command::MoveRight => Some(Facing::Right),
            Command::TogglePause | Command::Restart => None,
        }
    }

    /// Fold into the one-shot flags of the next tick
    pub fn apply(self, input: &mut TickInput) {
        match self {
            Command::TogglePause => input.pause = true,
            Command::Restart => input.restart = true,
            _ => input.movement = self.direction(),
        }
    }
}

/// Map a `KeyboardEvent.key` value to a command for the current phase.
///
/// Movement keys only count while playing and `r` only after game over;
/// `Escape` is always forwarded.
pub fn command_for_key(key: &str, phase: GamePhase) -> Option<Command> {
    if key == "Escape" {
        return Some(Command::TogglePause);
    }
    match phase {
        GamePhase::Playing => match key {
            "w" | "W" | "ArrowUp" => Some(Command::MoveUp),
            "s" | "S" | "ArrowDown" => Some(Command::MoveDown),
            "a" | "A" | "ArrowLeft" => Some(Command::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Command::MoveRight),
            _ => None,
        },
        GamePhase::GameOver => match key {
            "r" | "R" => Some(Command::Restart),
            _ => None,
        },
        GamePhase::Paused => None,
    }
}
