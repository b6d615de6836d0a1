//! Keyboard input: raw key tracking plus the named controls the simulation
//! reads once per tick.

use std::collections::HashSet;

/// Named simulation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    DropWater,
    StartEngine,
    Reset,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Forward,
        Control::Back,
        Control::Left,
        Control::Right,
        Control::DropWater,
        Control::StartEngine,
        Control::Reset,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Anything that can answer "is this control currently held".
pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
}

/// Snapshot of the held controls for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSet(u8);

impl ControlSet {
    pub fn empty() -> Self {
        Self(0)
    }

    /// Query every control once.
    pub fn capture<S: InputSource + ?Sized>(source: &S) -> Self {
        Control::ALL
            .into_iter()
            .filter(|&c| source.is_held(c))
            .collect()
    }

    pub fn with(mut self, control: Control) -> Self {
        self.insert(control);
        self
    }

    pub fn insert(&mut self, control: Control) {
        self.0 |= control.bit();
    }

    pub fn remove(&mut self, control: Control) {
        self.0 &= !control.bit();
    }

    pub fn contains(&self, control: Control) -> bool {
        self.0 & control.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Control> + '_ {
        Control::ALL.into_iter().filter(|&c| self.contains(c))
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        let mut set = Self::empty();
        for control in iter {
            set.insert(control);
        }
        set
    }
}

impl InputSource for ControlSet {
    fn is_held(&self, control: Control) -> bool {
        self.contains(control)
    }
}

/// Key-to-control mapping. A control may have several keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Control)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::ArrowUp, Control::Forward),
                (KeyCode::KeyW, Control::Forward),
                (KeyCode::ArrowDown, Control::Back),
                (KeyCode::KeyS, Control::Back),
                (KeyCode::ArrowLeft, Control::Left),
                (KeyCode::KeyA, Control::Left),
                (KeyCode::ArrowRight, Control::Right),
                (KeyCode::KeyD, Control::Right),
                (KeyCode::Space, Control::DropWater),
                (KeyCode::KeyE, Control::StartEngine),
                (KeyCode::KeyR, Control::Reset),
            ],
        }
    }
}

impl KeyBindings {
    /// No keys bound.
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Bind `key` to `control`, replacing any previous use of that key.
    pub fn bind(&mut self, key: KeyCode, control: Control) {
        self.unbind(key);
        log::debug!("bound {:?} to {:?}", key, control);
        self.bindings.push((key, control));
    }

    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.retain(|&(k, _)| k != key);
    }

    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings.iter().find(|&&(k, _)| k == key).map(|&(_, c)| c)
    }

    pub fn keys_for(&self, control: Control) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |&&(_, c)| c == control)
            .map(|&(k, _)| k)
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,
    bindings: KeyBindings,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Self::default()
        }
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Drop every held key (e.g. when the window loses focus).
    pub fn release_all(&mut self) {
        self.keys_released.extend(self.keys_held.drain());
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Held controls right now.
    pub fn controls(&self) -> ControlSet {
        ControlSet::capture(self)
    }
}

impl InputSource for InputState {
    fn is_held(&self, control: Control) -> bool {
        self.bindings.keys_for(control).any(|k| self.keys_held.contains(&k))
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_map_to_controls() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);

        assert!(input.is_held(Control::Forward));
        assert!(input.is_held(Control::DropWater));
        assert!(!input.is_held(Control::Back));

        let controls = input.controls();
        assert_eq!(
            controls.iter().collect::<Vec<_>>(),
            vec![Control::Forward, Control::DropWater]
        );

        input.process_keyboard(KeyCode::KeyW, ElementState::Released);
        assert!(!input.is_held(Control::Forward));
        // The snapshot is unaffected by later events.
        assert!(controls.contains(Control::Forward));
    }

    #[test]
    fn pressed_and_released_are_per_frame() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyE, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::KeyE));
        input.begin_frame();
        assert!(!input.is_key_pressed(KeyCode::KeyE));
        assert!(input.is_key_held(KeyCode::KeyE));

        input.release_all();
        assert!(input.is_key_released(KeyCode::KeyE));
        assert!(!input.is_key_held(KeyCode::KeyE));
    }

    #[test]
    fn rebinding_replaces_previous_use() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::Space, Control::Reset);
        assert_eq!(bindings.control_for(KeyCode::Space), Some(Control::Reset));
        assert_eq!(bindings.keys_for(Control::DropWater).count(), 0);

        let mut input = InputState::with_bindings(KeyBindings::empty());
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.controls().is_empty());
    }

    #[test]
    fn control_set_basics() {
        let mut set = ControlSet::empty().with(Control::Left).with(Control::Reset);
        assert!(set.is_held(Control::Left));
        set.remove(Control::Left);
        assert!(!set.contains(Control::Left));
        assert_eq!(ControlSet::capture(&set), set);
    }
}
