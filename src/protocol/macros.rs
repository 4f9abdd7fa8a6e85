//! # Macro Control Commands
//!
//! PCL macros are device-resident command buffers identified by a number.
//! A macro is recorded once and can then be replayed any number of times,
//! which keeps static page furniture (boxes, headings) out of every page.
//!
//! ## Macro ID and Control
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `ESC & f # Y` | Select the macro ID for subsequent control commands |
//! | `ESC & f 0 X` | Start macro definition |
//! | `ESC & f 1 X` | Stop macro definition |
//! | `ESC & f 3 X` | Call macro (state saved and restored around the body) |
//! | `ESC & f 8 X` | Delete the macro with the current ID |
//!
//! The ID and the control value combine into one sequence, e.g.
//! `ESC & f 1 y 0 X` starts defining macro 1. Stop definition needs no ID:
//! it always closes the definition in progress.
//!
//! ## Reference
//!
//! PCL 5 Technical Reference, chapter "Macros".

use super::commands::escape;

/// Macro control action (`ESC & f # X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroAction {
    /// Begin recording commands into the macro
    StartDef,
    /// Close the definition in progress
    StopDef,
    /// Replay the macro at the current cursor and pattern context
    Call,
    /// Remove the macro from device memory
    Delete,
}

impl MacroAction {
    /// Value of the `ESC & f # X` control field.
    pub fn control_value(self) -> i32 {
        match self {
            MacroAction::StartDef => 0,
            MacroAction::StopDef => 1,
            MacroAction::Call => 3,
            MacroAction::Delete => 8,
        }
    }
}

/// # Macro Control (ESC & f # y # X)
///
/// ## Example
///
/// ```
/// use rotsample::protocol::macros::{macro_control, MacroAction};
///
/// assert_eq!(macro_control(1, MacroAction::StartDef), b"\x1b&f1y0X".to_vec());
/// assert_eq!(macro_control(1, MacroAction::StopDef), b"\x1b&f1X".to_vec());
/// ```
pub fn macro_control(id: u16, action: MacroAction) -> Vec<u8> {
    match action {
        MacroAction::StopDef => escape(b"&f", &[(action.control_value(), b'X')]),
        _ => escape(
            b"&f",
            &[(id as i32, b'Y'), (action.control_value(), b'X')],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_def() {
        assert_eq!(macro_control(1, MacroAction::StartDef), b"\x1b&f1y0X".to_vec());
    }

    #[test]
    fn test_stop_def_ignores_id() {
        assert_eq!(macro_control(0, MacroAction::StopDef), b"\x1b&f1X".to_vec());
        assert_eq!(macro_control(7, MacroAction::StopDef), b"\x1b&f1X".to_vec());
    }

    #[test]
    fn test_call() {
        assert_eq!(macro_control(1, MacroAction::Call), b"\x1b&f1y3X".to_vec());
    }

    #[test]
    fn test_delete() {
        assert_eq!(macro_control(32767, MacroAction::Delete), b"\x1b&f32767y8X".to_vec());
    }
}
