use crate::engine::input::InputEvent;
use crate::game::Battle;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Control {
    Up,
    Down,
    Fire,
}

impl Control {
    /// Maps a KeyboardEvent.code onto a control, None for unbound keys
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Control::Up),
            "ArrowDown" => Some(Control::Down),
            "Space" => Some(Control::Fire),
            _ => None,
        }
    }

    fn is_movement(&self) -> bool {
        matches!(self, Control::Up | Control::Down)
    }
}

/// Movement keys currently held down
#[derive(Debug, Default, Clone, Serialize)]
pub struct HeldKeys {
    keys: HashSet<Control>,
}

impl HeldKeys {
    pub fn press(&mut self, control: Control) {
        self.keys.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.keys.remove(&control);
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.keys.contains(&control)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Applies input events to a battle
/// - movement key down -> held
/// - fire key down     -> shoot right away, once per event
/// - key up            -> released
pub struct InputHandler;

impl InputHandler {
    pub fn handle(event: &InputEvent, battle: &mut Battle) {
        match event {
            InputEvent::KeyDown(code) => match Control::from_code(code) {
                Some(control) if control.is_movement() => battle.keys_mut().press(control),
                Some(Control::Fire) => battle.shoot_top(),
                _ => {}
            },
            InputEvent::KeyUp(code) => {
                if let Some(control) = Control::from_code(code) {
                    battle.keys_mut().release(control);
                }
            }
            InputEvent::Inspect => battle.inspect(),
        }
    }
}
