//! Edge-triggered input state

use crate::axis::Axis;
use ember_core::Vec2;
use std::collections::HashMap;

/// Per-key state machine, advanced once per frame.
///
/// `Pressed` and `Released` are one-frame pulses; `Up` and `Held` are the
/// steady states between them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyState {
    #[default]
    Up,
    Pressed,
    Held,
    Released,
}

impl KeyState {
    /// Advance one frame given the raw host flag sampled at the boundary
    pub fn advance(self, raw: bool) -> KeyState {
        match (raw, self) {
            (true, KeyState::Up | KeyState::Released) => KeyState::Pressed,
            (true, KeyState::Pressed | KeyState::Held) => KeyState::Held,
            (false, KeyState::Pressed | KeyState::Held) => KeyState::Released,
            (false, KeyState::Up | KeyState::Released) => KeyState::Up,
        }
    }

    /// Pressed this frame or held from an earlier one
    pub fn is_down(self) -> bool {
        matches!(self, KeyState::Pressed | KeyState::Held)
    }
}

/// One tracked key: the raw host flag and the resolved edge state
#[derive(Clone, Copy, Debug, Default)]
struct KeyRecord {
    raw: bool,
    state: KeyState,
}

/// Tracks keyboard, mouse and axis state per frame.
///
/// Hosts feed raw press/release flags between frames; `begin_frame`
/// samples them once and resolves the edge states that every query reads
/// for the rest of the frame. A tap that goes down and back up between
/// two boundaries is therefore not observable, which matches the
/// single-sample contract.
pub struct Input {
    /// Registered keys by identifier
    keys: HashMap<String, KeyRecord>,
    /// Aggregate state over all mouse buttons (last host event wins)
    mouse: KeyRecord,
    /// Pointer position in surface coordinates
    mouse_position: Vec2,
    /// Smoothed axes, in registration order
    axes: Vec<Axis>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            mouse: KeyRecord::default(),
            mouse_position: Vec2::ZERO,
            axes: Vec::new(),
        }
    }

    /// Track a key. Untracked identifiers are ignored by the intake calls
    /// and answer false to every query.
    pub fn add_key(&mut self, key: impl Into<String>) {
        self.keys.entry(key.into()).or_default();
    }

    /// Track several keys at once
    pub fn add_keys<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            self.add_key(key);
        }
    }

    /// Register an axis, tracking all of its keys
    pub fn add_axis(&mut self, axis: Axis) {
        if self.axes.iter().any(|a| a.name == axis.name) {
            log::warn!("axis '{}' is already registered; the earlier one shadows it in lookups", axis.name);
        }
        for key in axis.keys() {
            self.keys.entry(key.to_string()).or_default();
        }
        log::debug!("registered axis '{}'", axis.name);
        self.axes.push(axis);
    }

    // --- Host intake ---

    /// Record a host key-down event. Unregistered identifiers are ignored.
    pub fn press_key(&mut self, key: &str) {
        if let Some(rec) = self.keys.get_mut(key) {
            rec.raw = true;
        }
    }

    /// Record a host key-up event. Unregistered identifiers are ignored.
    pub fn release_key(&mut self, key: &str) {
        if let Some(rec) = self.keys.get_mut(key) {
            rec.raw = false;
        }
    }

    /// Record a press on any mouse button
    pub fn press_mouse(&mut self) {
        self.mouse.raw = true;
    }

    /// Record a release of the mouse buttons
    pub fn release_mouse(&mut self) {
        self.mouse.raw = false;
    }

    /// Record the pointer position
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Sample the raw flags, resolve every edge state, then advance the
    /// axes against the fresh states. Call once at each frame boundary,
    /// before any component hook runs.
    pub fn begin_frame(&mut self, dt: f32) {
        for rec in self.keys.values_mut() {
            rec.state = rec.state.advance(rec.raw);
        }
        self.mouse.state = self.mouse.state.advance(self.mouse.raw);

        // Axes query key states, so take them out for the duration
        let mut axes = std::mem::take(&mut self.axes);
        for axis in &mut axes {
            axis.advance(self, dt);
        }
        self.axes = axes;
    }

    // --- Query methods ---

    /// Did the key go down this frame?
    pub fn is_key_just_pressed(&self, key: &str) -> bool {
        self.key_state(key) == KeyState::Pressed
    }

    /// Is the key down, whether it just went down or is held?
    pub fn is_key_held(&self, key: &str) -> bool {
        self.key_state(key).is_down()
    }

    /// Did the key go up this frame?
    pub fn is_key_just_released(&self, key: &str) -> bool {
        self.key_state(key) == KeyState::Released
    }

    /// Resolved state for a key; `Up` for unregistered identifiers
    pub fn key_state(&self, key: &str) -> KeyState {
        self.keys.get(key).map(|r| r.state).unwrap_or_default()
    }

    /// Did any mouse button go down this frame?
    pub fn is_mouse_just_pressed(&self) -> bool {
        self.mouse.state == KeyState::Pressed
    }

    /// Is any mouse button down?
    pub fn is_mouse_held(&self) -> bool {
        self.mouse.state.is_down()
    }

    /// Did the mouse buttons go up this frame?
    pub fn is_mouse_just_released(&self) -> bool {
        self.mouse.state == KeyState::Released
    }

    /// Current pointer position
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Smoothed axis value in [-1, 1]; unknown names read 0.0
    pub fn axis(&self, name: &str) -> f32 {
        self.axes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value())
            .unwrap_or(0.0)
    }

    /// Registered axes in registration order
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    #[test]
    fn test_key_state_transitions() {
        use KeyState::*;
        assert_eq!(Up.advance(true), Pressed);
        assert_eq!(Released.advance(true), Pressed);
        assert_eq!(Pressed.advance(true), Held);
        assert_eq!(Held.advance(true), Held);
        assert_eq!(Pressed.advance(false), Released);
        assert_eq!(Held.advance(false), Released);
        assert_eq!(Up.advance(false), Up);
        assert_eq!(Released.advance(false), Up);
    }

    #[test]
    fn test_unregistered_keys_answer_false() {
        let mut input = Input::new();
        input.press_key("q");
        input.begin_frame(DT);

        assert!(!input.is_key_just_pressed("q"));
        assert!(!input.is_key_held("q"));
        assert!(!input.is_key_just_released("q"));
        assert_eq!(input.key_state("q"), KeyState::Up);
    }

    #[test]
    fn test_press_hold_release_sequence() {
        let mut input = Input::new();
        input.add_key("w");

        // Raw flag held for three frames, then released for two
        let mut states = Vec::new();
        for raw in [true, true, true, false, false] {
            if raw {
                input.press_key("w");
            } else {
                input.release_key("w");
            }
            input.begin_frame(DT);
            states.push(input.key_state("w"));
        }

        assert_eq!(
            states,
            vec![
                KeyState::Pressed,
                KeyState::Held,
                KeyState::Held,
                KeyState::Released,
                KeyState::Up,
            ]
        );
    }

    #[test]
    fn test_queries_track_edges() {
        let mut input = Input::new();
        input.add_key("w");

        input.press_key("w");
        input.begin_frame(DT);
        assert!(input.is_key_just_pressed("w"));
        assert!(input.is_key_held("w"));
        assert!(!input.is_key_just_released("w"));

        input.begin_frame(DT);
        assert!(!input.is_key_just_pressed("w"));
        assert!(input.is_key_held("w"));

        input.release_key("w");
        input.begin_frame(DT);
        assert!(input.is_key_just_released("w"));
        assert!(!input.is_key_held("w"));
    }

    #[test]
    fn test_repress_after_release() {
        let mut input = Input::new();
        input.add_key("w");

        input.press_key("w");
        input.begin_frame(DT);
        input.release_key("w");
        input.begin_frame(DT);
        assert_eq!(input.key_state("w"), KeyState::Released);

        input.press_key("w");
        input.begin_frame(DT);
        assert_eq!(input.key_state("w"), KeyState::Pressed);
    }

    #[test]
    fn test_tap_between_boundaries_is_missed() {
        let mut input = Input::new();
        input.add_key("w");

        // Down and back up before the boundary leaves raw = false
        input.press_key("w");
        input.release_key("w");
        input.begin_frame(DT);
        assert_eq!(input.key_state("w"), KeyState::Up);
    }

    #[test]
    fn test_mouse_button_edges() {
        let mut input = Input::new();

        input.press_mouse();
        input.begin_frame(DT);
        assert!(input.is_mouse_just_pressed());
        assert!(input.is_mouse_held());

        input.begin_frame(DT);
        assert!(!input.is_mouse_just_pressed());
        assert!(input.is_mouse_held());

        input.release_mouse();
        input.begin_frame(DT);
        assert!(input.is_mouse_just_released());
        assert!(!input.is_mouse_held());

        input.begin_frame(DT);
        assert!(!input.is_mouse_just_released());
    }

    #[test]
    fn test_mouse_position() {
        let mut input = Input::new();
        input.set_mouse_position(Vec2::new(120.0, 44.0));
        assert_eq!(input.mouse_position(), Vec2::new(120.0, 44.0));
    }

    fn horizontal() -> Axis {
        Axis::new("horizontal", vec!["a".into()], vec!["d".into()], 10.0, 5.0)
    }

    #[test]
    fn test_axis_keys_auto_registered() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("a");
        input.begin_frame(DT);
        assert!(input.is_key_held("a"));
    }

    #[test]
    fn test_axis_ramps_toward_held_side() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("d");
        let mut last = 0.0;
        for frame in 1..=5 {
            input.begin_frame(0.01);
            let v = input.axis("horizontal");
            assert!(v > last, "axis should rise every frame");
            assert!((v - frame as f32 * 0.1).abs() < 1e-5);
            last = v;
        }
    }

    #[test]
    fn test_axis_clamps_at_full_deflection() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("d");
        input.begin_frame(0.2);
        assert_eq!(input.axis("horizontal"), 1.0);
        input.begin_frame(0.2);
        assert_eq!(input.axis("horizontal"), 1.0);
    }

    #[test]
    fn test_axis_decays_to_zero_without_overshoot() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("d");
        input.begin_frame(0.2);
        assert_eq!(input.axis("horizontal"), 1.0);

        input.release_key("d");
        input.begin_frame(0.1);
        assert!((input.axis("horizontal") - 0.5).abs() < 1e-5);
        input.begin_frame(0.1);
        assert_eq!(input.axis("horizontal"), 0.0);
        input.begin_frame(0.1);
        assert_eq!(input.axis("horizontal"), 0.0);
    }

    #[test]
    fn test_axis_both_sides_held_decays() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("d");
        input.begin_frame(0.2);
        assert_eq!(input.axis("horizontal"), 1.0);

        input.press_key("a");
        input.begin_frame(0.1);
        assert!((input.axis("horizontal") - 0.5).abs() < 1e-5);
        input.begin_frame(0.1);
        assert_eq!(input.axis("horizontal"), 0.0);
    }

    #[test]
    fn test_axis_accelerates_through_zero() {
        let mut input = Input::new();
        input.add_axis(horizontal());

        input.press_key("a");
        input.begin_frame(0.05);
        assert!((input.axis("horizontal") + 0.5).abs() < 1e-5);

        // Swapping sides ramps at the acceleration rate, no decay phase
        input.release_key("a");
        input.press_key("d");
        input.begin_frame(0.05);
        assert!(input.axis("horizontal").abs() < 1e-5);
        input.begin_frame(0.05);
        assert!((input.axis("horizontal") - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_unknown_axis_reads_zero() {
        let input = Input::new();
        assert_eq!(input.axis("vertical"), 0.0);
    }
}
