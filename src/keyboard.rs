//! Keyboard shortcut table.
//!
//! Accepts both DOM-style key names (`"ArrowLeft"`, `" "`) and the plain
//! words the headless harness reads from stdin. Each shortcut maps to
//! exactly one controller command; unknown keys map to nothing so the
//! caller can leave the event alone.

use crate::events::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    PlayPause,
    Previous,
    Next,
    CycleOrder,
    CycleFilter,
    ToggleMute,
    OpenFileManager,
}

impl Shortcut {
    #[must_use]
    pub fn command(self) -> Command {
        match self {
            Self::PlayPause => Command::PlayPause,
            Self::Previous => Command::Previous,
            Self::Next => Command::Next,
            Self::CycleOrder => Command::CycleDisplayOrder,
            Self::CycleFilter => Command::CycleFilter,
            Self::ToggleMute => Command::ToggleMute,
            Self::OpenFileManager => Command::OpenInFileManager,
        }
    }
}

/// Resolve a key name to its shortcut, if any.
#[must_use]
pub fn lookup(key: &str) -> Option<Shortcut> {
    match key {
        " " | "space" => Some(Shortcut::PlayPause),
        "ArrowLeft" | "left" => Some(Shortcut::Previous),
        "ArrowRight" | "right" => Some(Shortcut::Next),
        "s" | "S" => Some(Shortcut::CycleOrder),
        "f" | "F" => Some(Shortcut::CycleFilter),
        "m" | "M" => Some(Shortcut::ToggleMute),
        "o" | "O" => Some(Shortcut::OpenFileManager),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_space_resolve() {
        assert_eq!(lookup(" "), Some(Shortcut::PlayPause));
        assert_eq!(lookup("ArrowLeft"), Some(Shortcut::Previous));
        assert_eq!(lookup("ArrowRight"), Some(Shortcut::Next));
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(lookup("s"), lookup("S"));
        assert_eq!(lookup("f"), lookup("F"));
        assert_eq!(lookup("m"), lookup("M"));
        assert_eq!(lookup("o"), lookup("O"));
    }

    #[test]
    fn unknown_keys_resolve_to_nothing() {
        assert_eq!(lookup("Escape"), None);
        assert_eq!(lookup("x"), None);
    }
}
