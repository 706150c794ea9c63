use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rps_engine::{Command, Move, SessionPhase};

use crate::ui::widgets::KeyBinding;

pub(crate) const HELP: &[KeyBinding<'static>] = &[
    (&["R", "P", "S"], "Play Rock / Paper / Scissors"),
    (&["Space"], "Lock detected sign (training: train model)"),
    (&["T"], "Toggle training mode"),
    (&["1", "2", "3"], "Add Rock / Paper / Scissors sample"),
    (&["D"], "Cycle difficulty"),
    (&["C"], "Toggle theme"),
    (&["H"], "Show this help"),
    (&["Esc"], "Pause / resume"),
    (&["Q"], "Quit"),
];

const PLAY_FOOTER: &[KeyBinding<'static>] = &[
    (&["R", "P", "S"], "Play"),
    (&["Space"], "Lock"),
    (&["T"], "Train"),
    (&["D"], "Difficulty"),
    (&["Esc"], "Pause"),
    (&["H"], "Help"),
    (&["Q"], "Quit"),
];

const TRAINING_FOOTER: &[KeyBinding<'static>] = &[
    (&["1", "2", "3"], "Sample"),
    (&["Space"], "Train"),
    (&["T"], "Play"),
    (&["H"], "Help"),
    (&["Q"], "Quit"),
];

const PAUSED_FOOTER: &[KeyBinding<'static>] = &[(&["Esc"], "Resume"), (&["Q"], "Quit")];

/// Bindings shown in the footer for the current phase.
pub(crate) fn footer(phase: SessionPhase) -> &'static [KeyBinding<'static>] {
    match phase {
        SessionPhase::Training => TRAINING_FOOTER,
        SessionPhase::Paused => PAUSED_FOOTER,
        SessionPhase::Waiting
        | SessionPhase::Countdown
        | SessionPhase::Resolving
        | SessionPhase::Result => PLAY_FOOTER,
    }
}

/// Maps a key press to a session command.
///
/// Space trains the model in training mode and locks the detected sign
/// otherwise.
pub(crate) fn command_for(key: &KeyEvent, phase: SessionPhase) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Esc => Command::TogglePause,
        KeyCode::Char(' ') if phase.is_training() => Command::TrainNow,
        KeyCode::Char(' ') => Command::LockGesture,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'r' => Command::ManualMove(Move::Rock),
            'p' => Command::ManualMove(Move::Paper),
            's' => Command::ManualMove(Move::Scissors),
            '1' => Command::SampleLabel(Move::Rock),
            '2' => Command::SampleLabel(Move::Paper),
            '3' => Command::SampleLabel(Move::Scissors),
            't' => Command::ToggleTraining,
            'd' => Command::CycleDifficulty,
            'c' => Command::CycleTheme,
            'h' | '?' => Command::ShowHelp,
            'q' => Command::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_move_keys() {
        for (c, m) in [('r', Move::Rock), ('P', Move::Paper), ('s', Move::Scissors)] {
            assert_eq!(
                command_for(&key(KeyCode::Char(c)), SessionPhase::Waiting),
                Some(Command::ManualMove(m))
            );
        }
    }

    #[test]
    fn test_space_depends_on_phase() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(
            command_for(&space, SessionPhase::Waiting),
            Some(Command::LockGesture)
        );
        assert_eq!(
            command_for(&space, SessionPhase::Training),
            Some(Command::TrainNow)
        );
    }

    #[test]
    fn test_pause_does_not_collide_with_paper() {
        assert_eq!(
            command_for(&key(KeyCode::Esc), SessionPhase::Countdown),
            Some(Command::TogglePause)
        );
        assert_ne!(
            command_for(&key(KeyCode::Char('p')), SessionPhase::Waiting),
            Some(Command::TogglePause)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_c, SessionPhase::Paused), Some(Command::Quit));
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(command_for(&ctrl_r, SessionPhase::Waiting), None);
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(command_for(&key(KeyCode::Char('x')), SessionPhase::Waiting), None);
        assert_eq!(command_for(&key(KeyCode::Left), SessionPhase::Waiting), None);
    }
}
