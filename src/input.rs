//! Keyboard state as seen by the simulation.
//!
//! The host translates raw key codes into [`Action`]s and records whether each
//! one is held.  The core only ever reads this state.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Fire,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Up, Action::Down, Action::Fire];

    /// Look up an action by its key name.  Unrecognized names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Action::Up),
            "down" => Some(Action::Down),
            "fire" => Some(Action::Fire),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Fire => "fire",
        }
    }

    fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Fire => 2,
        }
    }
}

/// Pressed/released state for every [`Action`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; 3],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    /// Release every action.
    pub fn clear(&mut self) {
        self.pressed = [false; 3];
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// Query by key name; names outside the closed action set read as released.
    pub fn is_pressed_name(&self, name: &str) -> bool {
        Action::from_name(name)
            .map(|action| self.is_pressed(action))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.as_str()), Some(action));
        }
    }

    #[test]
    fn unknown_name_reads_as_released() {
        let mut input = InputState::new();
        input.press(Action::Fire);
        assert!(input.is_pressed_name("fire"));
        assert!(!input.is_pressed_name("ArrowLeft"));
        assert!(!input.is_pressed_name(""));
    }
}
