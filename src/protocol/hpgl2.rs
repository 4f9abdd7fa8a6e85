//! # HP-GL/2 Commands
//!
//! HP-GL/2 is the vector language embedded in PCL 5. The printer switches
//! between the two with explicit escape sequences, and each language keeps
//! its own coordinate system.
//!
//! ## Mode Switching
//!
//! | Sequence | Effect |
//! |----------|--------|
//! | `ESC % 0 B` | Enter HP-GL/2, pen at its previous HP-GL/2 position |
//! | `ESC % 1 B` | Enter HP-GL/2, pen at the current PCL cursor |
//! | `ESC % 0 A` | Return to PCL, cursor at its previous PCL position |
//! | `ESC % 1 A` | Return to PCL, cursor at the current HP-GL/2 pen |
//!
//! ## Coordinate Systems
//!
//! ```text
//! PCL (logical units)            HP-GL/2 (plotter units, default)
//! (0,0) ────► X                  Y
//!   │                            ▲
//!   │                            │
//!   ▼                            │
//!   Y                          (0,0) ────► X   (picture frame, lower-left)
//! ```
//!
//! Plotter units are fixed at 1016 per inch. A scaling instruction
//! (`SC`) plus an input-window instruction (`IR`) can remap user units to
//! match PCL's 600 per inch with Y growing down the page.
//!
//! ## Instruction Format
//!
//! An instruction is a two-letter mnemonic followed by comma-separated
//! ASCII decimal parameters and an optional `;` terminator. Labels (`LB`)
//! run until the label terminator character declared by `DT` (ETX by
//! default).
//!
//! ## Text Direction
//!
//! HP-GL/2 has no degree-based rotation. `DI run,rise` sets the label
//! baseline direction from a vector; a unit vector `(cos θ, sin θ)` rotates
//! labels by θ.

use std::fmt;
use std::ops::Neg;

use super::commands::ESC;

/// Active page-description sub-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// PCL: top-left origin, Y increasing down the page
    #[default]
    Pcl,
    /// HP-GL/2: picture-frame origin, Y increasing up by default
    Hpgl2,
}

/// Where the HP-GL/2 pen starts when entering HP-GL/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenPosition {
    /// Previous HP-GL/2 pen position (`ESC % 0 B`)
    #[default]
    Previous,
    /// Current PCL cursor position (`ESC % 1 B`)
    PclCursor,
}

/// Where the PCL cursor lands when returning to PCL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPosition {
    /// Previous PCL cursor position (`ESC % 0 A`)
    #[default]
    Previous,
    /// Current HP-GL/2 pen position (`ESC % 1 A`)
    HpglPen,
}

/// Enter HP-GL/2 mode.
#[inline]
pub fn enter(pen: PenPosition) -> Vec<u8> {
    let n = match pen {
        PenPosition::Previous => b'0',
        PenPosition::PclCursor => b'1',
    };
    vec![ESC, b'%', n, b'B']
}

/// Return to PCL mode.
#[inline]
pub fn exit(cursor: CursorPosition) -> Vec<u8> {
    let n = match cursor {
        CursorPosition::Previous => b'0',
        CursorPosition::HpglPen => b'1',
    };
    vec![ESC, b'%', n, b'A']
}

/// # Frame an HP-GL/2 Instruction
///
/// Writes `mnemonic`, then `params` verbatim, then `;` when `terminate` is
/// set. Parameters are not interpreted: numeric formatting is the caller's
/// job (see [`fixed4`] and [`DirectionVector`]).
///
/// ## Returns
///
/// `None` if the mnemonic is not exactly two ASCII letters.
///
/// ## Example
///
/// ```
/// use rotsample::protocol::hpgl2::instruction;
///
/// assert_eq!(instruction("SP", "1", true), Some(b"SP1;".to_vec()));
/// assert_eq!(instruction("IN", "", false), Some(b"IN".to_vec()));
/// assert!(instruction("S", "1", true).is_none());
/// ```
pub fn instruction(mnemonic: &str, params: &str, terminate: bool) -> Option<Vec<u8>> {
    let m = mnemonic.as_bytes();
    if m.len() != 2 || !m.iter().all(u8::is_ascii_alphabetic) {
        return None;
    }

    let mut cmd = Vec::with_capacity(3 + params.len());
    cmd.extend(m.iter().map(u8::to_ascii_uppercase));
    cmd.extend(params.bytes());
    if terminate {
        cmd.push(b';');
    }
    Some(cmd)
}

/// Fixed four-decimal formatting used for `SC` scale factors.
///
/// ```
/// use rotsample::protocol::hpgl2::fixed4;
///
/// assert_eq!(fixed4(1016.0 / 600.0), "1.6933");
/// assert_eq!(fixed4(-1016.0 / 600.0), "-1.6933");
/// ```
pub fn fixed4(value: f64) -> String {
    format!("{:.4}", value)
}

// ============================================================================
// DIRECTION VECTOR
// ============================================================================

/// Label direction for the `DI` instruction.
///
/// Built from an angle in degrees as `(cos θ, sin θ)`. The label drawn at
/// `θ + 180` uses the negated vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionVector {
    pub run: f64,
    pub rise: f64,
}

impl DirectionVector {
    /// Unit direction vector for an angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        let angle = std::f64::consts::PI * degrees / 180.0;
        Self {
            run: angle.cos(),
            rise: angle.sin(),
        }
    }

    /// Horizontal baseline, `DI1,0`.
    pub const HORIZONTAL: Self = Self { run: 1.0, rise: 0.0 };
}

impl Neg for DirectionVector {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            run: -self.run,
            rise: -self.rise,
        }
    }
}

/// `run,rise`, each rounded to 15 significant digits and written in the
/// shortest decimal form, so `sin 30` prints as `0.5`.
impl fmt::Display for DirectionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", significant15(self.run), significant15(self.rise))
    }
}

/// Round to 15 significant digits; fractions of a unit vector carry no more
/// meaningful precision than that.
fn significant15(value: f64) -> f64 {
    format!("{:.14e}", value).parse().unwrap_or(value)
}
