//! # Input Manager
//!
//! Turns winit window events into the per-tick [`InputSnapshot`]:
//! - WASD keys give the move vector, normalised on diagonals
//! - The cursor position relative to the window centre gives the aim
//! - The left mouse button fires
//!
//! On touch screens the window splits into two virtual sticks. A finger that
//! lands on the left half drives movement, one on the right half aims and
//! holds the trigger down until it lifts.

use cgmath::{InnerSpace, Vector2};
use winit::{
    event::{ElementState, KeyEvent, MouseButton, Touch, TouchPhase, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::{
    input_state::{ButtonStates, RawInputState},
    InputSnapshot, InputSource,
};

const KEY_CODES: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD];

const FIRE_BUTTON: MouseButton = MouseButton::Left;

/// Finger travel in pixels that gives a stick full deflection.
pub const STICK_RADIUS: f64 = 50.0;

/// A virtual stick anchored where its finger first touched.
#[derive(Debug, Clone, Copy)]
struct Stick {
    id: u64,
    anchor: (f64, f64),
    /// Screen convention, length clamped to 1
    vector: Vector2<f32>,
}

impl Stick {
    fn new(id: u64, x: f64, y: f64) -> Self {
        Stick {
            id,
            anchor: (x, y),
            vector: Vector2::new(0.0, 0.0),
        }
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        let dx = (x - self.anchor.0) / STICK_RADIUS;
        let dy = -(y - self.anchor.1) / STICK_RADIUS;
        let vector = Vector2::new(dx as f32, dy as f32);
        self.vector = if vector.magnitude2() > 1.0 {
            vector.normalize()
        } else {
            vector
        };
    }
}

/// Tracks keyboard, mouse and window state between ticks.
#[derive(Debug, Clone)]
pub struct InputManager {
    keys: ButtonStates<KeyCode>,
    buttons: ButtonStates<MouseButton>,
    window_size: (u32, u32),
    /// Last non-zero aim, in screen convention (y up)
    aim: Vector2<f32>,
    move_stick: Option<Stick>,
    aim_stick: Option<Stick>,
}

impl InputManager {
    /// Creates a manager for a window of the given size.
    ///
    /// The aim starts at zero, so nothing fires until the cursor moves.
    pub fn new(width: u32, height: u32) -> Self {
        InputManager {
            keys: ButtonStates::new(KEY_CODES),
            buttons: ButtonStates::new([FIRE_BUTTON]),
            window_size: (width, height),
            aim: Vector2::new(0.0, 0.0),
            move_stick: None,
            aim_stick: None,
        }
    }

    /// Processes a window event.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                self.set_key(*key, *state == ElementState::Pressed);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                self.set_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.set_cursor(position.x, position.y);
            }
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
            }
            WindowEvent::Touch(Touch { phase, location, id, .. }) => match phase {
                TouchPhase::Started => self.touch_start(*id, location.x, location.y),
                TouchPhase::Moved => self.touch_move(*id, location.x, location.y),
                TouchPhase::Ended | TouchPhase::Cancelled => self.touch_end(*id),
            },
            WindowEvent::Focused(false) => {
                self.reset_inputs();
            }
            _ => {}
        }
    }

    /// Records a key going up or down. Keys other than WASD are ignored.
    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        self.keys.set(key, pressed);
    }

    /// Records a mouse button going up or down.
    pub fn set_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    /// Updates the aim from a cursor position in window pixels.
    ///
    /// A cursor exactly on the centre keeps the previous aim.
    pub fn set_cursor(&mut self, x: f64, y: f64) {
        let (width, height) = self.window_size;
        let dx = x - f64::from(width) / 2.0;
        let dy = -(y - f64::from(height) / 2.0);
        let offset = Vector2::new(dx as f32, dy as f32);
        if offset.magnitude2() > 0.0 {
            self.aim = offset.normalize();
        }
    }

    /// Updates the window size the cursor and touches are measured against.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// A finger touched the window.
    ///
    /// The left half of the window holds the move stick and the right half
    /// the aim stick. A touch on a half whose stick is already held is
    /// ignored.
    pub fn touch_start(&mut self, id: u64, x: f64, y: f64) {
        let slot = if x < f64::from(self.window_size.0) / 2.0 {
            &mut self.move_stick
        } else {
            &mut self.aim_stick
        };
        if slot.is_none() {
            *slot = Some(Stick::new(id, x, y));
        }
    }

    /// A held finger moved.
    pub fn touch_move(&mut self, id: u64, x: f64, y: f64) {
        if let Some(stick) = self.move_stick.as_mut().filter(|stick| stick.id == id) {
            stick.drag_to(x, y);
        } else if let Some(stick) = self.aim_stick.as_mut().filter(|stick| stick.id == id) {
            stick.drag_to(x, y);
            if stick.vector.magnitude2() > 0.0 {
                self.aim = stick.vector.normalize();
            }
        }
    }

    /// A finger lifted. Releasing the aim stick stops firing but keeps the aim.
    pub fn touch_end(&mut self, id: u64) {
        if self.move_stick.is_some_and(|stick| stick.id == id) {
            self.move_stick = None;
        } else if self.aim_stick.is_some_and(|stick| stick.id == id) {
            self.aim_stick = None;
        }
    }

    /// The move vector: `x` right, `y` up.
    ///
    /// A held move stick wins over the keys and may be shorter than unit
    /// length. WASD gives unit length or zero.
    pub fn move_vector(&self) -> Vector2<f32> {
        if let Some(stick) = &self.move_stick {
            return stick.vector;
        }
        let axis = |positive: KeyCode, negative: KeyCode| {
            f32::from(u8::from(self.keys.is_down(positive))) - f32::from(u8::from(self.keys.is_down(negative)))
        };
        let vector = Vector2::new(axis(KeyCode::KeyD, KeyCode::KeyA), axis(KeyCode::KeyW, KeyCode::KeyS));
        if vector.magnitude2() > 0.0 {
            vector.normalize()
        } else {
            vector
        }
    }

    /// The last non-zero aim, unit length, or zero before any aim.
    pub fn aim_vector(&self) -> Vector2<f32> {
        self.aim
    }

    /// Whether the fire button or the aim stick is held.
    pub fn firing(&self) -> bool {
        self.buttons.is_down(FIRE_BUTTON) || self.aim_stick.is_some()
    }

    /// The transition of a movement key this frame.
    pub fn key_state(&self, key: KeyCode) -> RawInputState {
        self.keys.state(key)
    }

    /// The transition of the fire button this frame.
    pub fn fire_state(&self) -> RawInputState {
        self.buttons.state(FIRE_BUTTON)
    }

    /// Ends the frame so the next one sees fresh transitions.
    pub fn end_frame(&mut self) {
        self.keys.advance();
        self.buttons.advance();
    }

    /// Releases every key, button and stick.
    ///
    /// Called when the window loses focus so nothing stays stuck down.
    pub fn reset_inputs(&mut self) {
        self.keys.release_all();
        self.buttons.release_all();
        self.move_stick = None;
        self.aim_stick = None;
    }
}

impl InputSource for InputManager {
    fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            move_vector: self.move_vector(),
            aim_vector: self.aim_vector(),
            firing: self.firing(),
        };
        self.end_frame();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonals_are_normalised() {
        let mut input = InputManager::new(800, 600);
        input.set_key(KeyCode::KeyW, true);
        input.set_key(KeyCode::KeyD, true);
        let vector = input.move_vector();
        assert_relative_eq!(vector.x, std::f32::consts::FRAC_1_SQRT_2);
        assert_relative_eq!(vector.y, std::f32::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputManager::new(800, 600);
        input.set_key(KeyCode::KeyA, true);
        input.set_key(KeyCode::KeyD, true);
        assert_eq!(input.move_vector(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn cursor_above_centre_aims_up() {
        let mut input = InputManager::new(800, 600);
        assert_eq!(input.aim_vector(), Vector2::new(0.0, 0.0));
        input.set_cursor(400.0, 100.0);
        assert_relative_eq!(input.aim_vector().x, 0.0);
        assert_relative_eq!(input.aim_vector().y, 1.0);

        // the centre itself keeps the last aim
        input.set_cursor(400.0, 300.0);
        assert_relative_eq!(input.aim_vector().y, 1.0);
    }

    #[test]
    fn resize_moves_the_centre() {
        let mut input = InputManager::new(800, 600);
        input.set_window_size(200, 200);
        input.set_cursor(150.0, 100.0);
        assert_relative_eq!(input.aim_vector().x, 1.0);
        assert_relative_eq!(input.aim_vector().y, 0.0);
    }

    #[test]
    fn snapshot_reports_fire_and_ends_the_frame() {
        let mut input = InputManager::new(800, 600);
        input.set_mouse_button(MouseButton::Left, true);
        assert!(input.fire_state().is_just_pressed());

        let snapshot = input.snapshot();
        assert!(snapshot.firing);
        assert_eq!(input.fire_state(), RawInputState::Held);

        input.reset_inputs();
        assert!(!input.snapshot().firing);
    }

    #[test]
    fn move_stick_force_is_clamped() {
        let mut input = InputManager::new(800, 600);
        input.touch_start(1, 100.0, 400.0);
        input.touch_move(1, 100.0 + 3.0 * STICK_RADIUS, 400.0);
        assert_relative_eq!(input.move_vector().x, 1.0);
        assert_relative_eq!(input.move_vector().y, 0.0);

        // half deflection toward the top of the screen
        input.touch_move(1, 100.0, 400.0 - STICK_RADIUS / 2.0);
        assert_relative_eq!(input.move_vector().x, 0.0);
        assert_relative_eq!(input.move_vector().y, 0.5);
        assert!(!input.firing());
    }

    #[test]
    fn move_stick_overrides_keys_until_lifted() {
        let mut input = InputManager::new(800, 600);
        input.set_key(KeyCode::KeyD, true);
        input.touch_start(4, 200.0, 300.0);
        assert_eq!(input.move_vector(), Vector2::new(0.0, 0.0));

        input.touch_end(4);
        assert_relative_eq!(input.move_vector().x, 1.0);
        input.set_key(KeyCode::KeyD, false);
        assert_eq!(input.move_vector(), Vector2::new(0.0, 0.0));
    }

    #[test]
    fn aim_stick_aims_and_fires_while_held() {
        let mut input = InputManager::new(800, 600);
        input.touch_start(7, 600.0, 300.0);
        assert!(input.firing());

        input.touch_move(7, 600.0, 280.0);
        assert_relative_eq!(input.aim_vector().x, 0.0);
        assert_relative_eq!(input.aim_vector().y, 1.0);
        let snapshot = input.snapshot();
        assert!(snapshot.firing);
        assert_eq!(snapshot.move_vector, Vector2::new(0.0, 0.0));

        input.touch_end(7);
        assert!(!input.firing());
        assert_relative_eq!(input.aim_vector().y, 1.0);
    }

    #[test]
    fn both_sticks_track_their_own_fingers() {
        let mut input = InputManager::new(800, 600);
        input.touch_start(1, 100.0, 300.0);
        input.touch_start(2, 700.0, 300.0);
        // a second finger on a held half does nothing
        input.touch_start(3, 150.0, 300.0);
        input.touch_move(3, 150.0, 0.0);
        assert_eq!(input.move_vector(), Vector2::new(0.0, 0.0));

        input.touch_move(1, 100.0 - STICK_RADIUS, 300.0);
        input.touch_move(2, 700.0 + STICK_RADIUS, 300.0);
        assert_relative_eq!(input.move_vector().x, -1.0);
        assert_relative_eq!(input.aim_vector().x, 1.0);
        assert!(input.firing());

        input.reset_inputs();
        assert!(!input.firing());
        assert_eq!(input.move_vector(), Vector2::new(0.0, 0.0));
    }
}
