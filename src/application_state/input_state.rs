//! # Input State
//!
//! Per-frame button tracking for the input manager. A button is sampled once
//! per frame; comparing that sample with the previous frame's gives the
//! pressed / held / released transitions.

use std::{collections::HashMap, hash::Hash};

/// The state of a key or button within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawInputState {
    /// Up this frame and the last
    #[default]
    NotPressed,
    /// Went down this frame
    Pressed,
    /// Down this frame and the last
    Held,
    /// Went up this frame
    Released,
}

impl RawInputState {
    /// Down right now, whether just pressed or held.
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Went down this frame.
    pub fn is_just_pressed(&self) -> bool {
        matches!(self, RawInputState::Pressed)
    }

    /// Went up this frame.
    pub fn is_just_released(&self) -> bool {
        matches!(self, RawInputState::Released)
    }

    /// Derives the transition from the previous and current samples.
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// Up/down samples for a fixed set of buttons over two frames.
///
/// Buttons outside the tracked set are ignored.
#[derive(Debug, Clone)]
pub struct ButtonStates<K> {
    previous: HashMap<K, bool>,
    current: HashMap<K, bool>,
}

impl<K: Copy + Eq + Hash> ButtonStates<K> {
    /// Starts tracking `buttons`, all up.
    pub fn new(buttons: impl IntoIterator<Item = K>) -> Self {
        let current: HashMap<K, bool> = buttons.into_iter().map(|button| (button, false)).collect();
        ButtonStates {
            previous: current.clone(),
            current,
        }
    }

    /// Records the current sample for a button.
    ///
    /// # Returns
    /// `false` if the button is not tracked.
    pub fn set(&mut self, button: K, down: bool) -> bool {
        match self.current.get_mut(&button) {
            Some(state) => {
                *state = down;
                true
            }
            None => false,
        }
    }

    /// The transition for a button this frame.
    pub fn state(&self, button: K) -> RawInputState {
        let previous = self.previous.get(&button).copied().unwrap_or(false);
        let current = self.current.get(&button).copied().unwrap_or(false);
        RawInputState::from_raw_states(previous, current)
    }

    /// Whether a button is down right now.
    pub fn is_down(&self, button: K) -> bool {
        self.current.get(&button).copied().unwrap_or(false)
    }

    /// Ends the frame: the current samples become the previous ones.
    pub fn advance(&mut self) {
        for (button, down) in &self.current {
            self.previous.insert(*button, *down);
        }
    }

    /// Marks every button up, as when the window loses focus.
    pub fn release_all(&mut self) {
        self.current.values_mut().for_each(|down| *down = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(false, true, RawInputState::Pressed)]
    #[test_case(true, true, RawInputState::Held)]
    #[test_case(true, false, RawInputState::Released)]
    #[test_case(false, false, RawInputState::NotPressed)]
    fn transitions(previous: bool, current: bool, expected: RawInputState) {
        assert_eq!(RawInputState::from_raw_states(previous, current), expected);
    }

    #[test]
    fn tracks_frames() {
        let mut buttons = ButtonStates::new(['a', 'b']);
        assert!(buttons.set('a', true));
        assert!(!buttons.set('z', true));
        assert_eq!(buttons.state('a'), RawInputState::Pressed);

        buttons.advance();
        assert_eq!(buttons.state('a'), RawInputState::Held);
        assert!(buttons.state('a').is_active());

        buttons.release_all();
        assert_eq!(buttons.state('a'), RawInputState::Released);
        buttons.advance();
        assert_eq!(buttons.state('a'), RawInputState::NotPressed);
        assert_eq!(buttons.state('z'), RawInputState::NotPressed);
    }
}
