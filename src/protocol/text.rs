//! # PCL Font and Text Commands
//!
//! This module implements font selection and text placement for PCL.
//!
//! ## Font Selection Overview
//!
//! A PCL font is chosen by characteristics rather than by name. The primary
//! font is described with one combined `ESC ( s ... T` sequence:
//!
//! | Field | Terminator | Meaning |
//! |-------|------------|---------|
//! | Spacing | `P` | 0 = fixed, 1 = proportional |
//! | Pitch | `H` | characters per inch (fixed fonts only) |
//! | Height | `V` | point size |
//! | Style | `S` | 0 = upright, 1 = italic |
//! | Stroke weight | `B` | 0 = medium, 3 = bold |
//! | Typeface | `T` | typeface family number |
//!
//! The catalog in [`crate::printer::fonts`] produces the body of that
//! sequence (the "mnemonic", e.g. `s1p36v0s0b16602T`); this module only
//! prefixes it with `ESC (`.
//!
//! ## Symbol Sets
//!
//! The symbol set is selected separately with `ESC ( <id>`, where the ID is
//! a number plus a letter, e.g. `19U` (Windows 3.1 Latin 1) or `0N`
//! (ISO 8859-1 Latin 1).

use super::commands::{ESC, cursor_position};

/// Symbol set used by the sample job: Windows 3.1 Latin 1.
pub const SYMBOL_SET_WIN_LATIN1: &str = "19U";

/// # Select Symbol Set (ESC ( id)
///
/// ## Example
///
/// ```
/// use rotsample::protocol::text::symbol_set;
///
/// assert_eq!(symbol_set("19U"), b"\x1b(19U".to_vec());
/// ```
pub fn symbol_set(id: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(2 + id.len());
    cmd.extend([ESC, b'(']);
    cmd.extend(id.bytes());
    cmd
}

/// # Select Primary Font by Characteristics (ESC ( s ... T)
///
/// `mnemonic` is the sequence body starting at `s`, as produced by
/// [`crate::printer::FontCatalog::page_font_select`].
pub fn font_select(mnemonic: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(2 + mnemonic.len());
    cmd.extend([ESC, b'(']);
    cmd.extend(mnemonic.bytes());
    cmd
}

/// Text bytes placed at an absolute cursor position.
///
/// Text is sent as-is: characters outside ASCII are passed through as their
/// UTF-8 bytes and interpreted by the active symbol set.
pub fn positioned_text(x: i16, y: i16, text: &str) -> Vec<u8> {
    let mut cmd = cursor_position(x, y);
    cmd.extend(text.bytes());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_set() {
        assert_eq!(symbol_set("0N"), b"\x1b(0N".to_vec());
        assert_eq!(symbol_set(SYMBOL_SET_WIN_LATIN1), b"\x1b(19U".to_vec());
    }

    #[test]
    fn test_font_select() {
        assert_eq!(
            font_select("s1p36v0s0b16602T"),
            b"\x1b(s1p36v0s0b16602T".to_vec()
        );
    }

    #[test]
    fn test_positioned_text() {
        assert_eq!(
            positioned_text(450, 600, "Orthogonal:"),
            b"\x1b*p450x600YOrthogonal:".to_vec()
        );
    }
}
