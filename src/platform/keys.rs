//! Keyboard mapping for the native shell

use winit::keyboard::KeyCode;

use crate::sim::InputState;

/// What a key event meant to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Updated a held-key flag
    Held,
    /// Close the window
    Quit,
    Ignored,
}

/// Record a press/release of `code` in `input`
///
/// W/S/D/A drive +Y/-Y/+X/-X, Q is the speed modifier, Escape quits.
pub fn apply_key(input: &mut InputState, code: KeyCode, pressed: bool) -> KeyAction {
    let flag = match code {
        KeyCode::KeyW => &mut input.up,
        KeyCode::KeyS => &mut input.down,
        KeyCode::KeyA => &mut input.left,
        KeyCode::KeyD => &mut input.right,
        KeyCode::KeyQ => &mut input.boost,
        KeyCode::Escape if pressed => return KeyAction::Quit,
        _ => return KeyAction::Ignored,
    };
    *flag = pressed;
    KeyAction::Held
}
