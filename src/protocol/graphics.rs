//! # PCL Pattern and Rectangle Commands
//!
//! This module implements the current-pattern commands and rectangular area
//! fill ("rules"), which together draw the boxes of a page.
//!
//! ## Pattern Model
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `ESC * c # G` | Pattern ID: shading percentage or cross-hatch index |
//! | `ESC * v # T` | Current pattern type for text and rules |
//! | `ESC * c # A` / `# B` | Rectangle width / height in logical units |
//! | `ESC * c 5 P` | Fill the rectangle with the current pattern |
//!
//! The current pattern persists until explicitly changed, so a box drawn
//! after selecting 60% shading comes out grey, and so does any text that
//! follows until solid black is selected again.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (logical units, 600 per inch)
//!   │
//!   │   ┌──────────┐  ← rectangle anchored at the cursor,
//!   │   │          │    extending right and down
//!   │   └──────────┘
//!   ▼
//!   Y (down the page)
//! ```

use serde::{Deserialize, Serialize};

use super::commands::{cursor_position, escape};

/// Fill pattern family (`ESC * v # T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    #[default]
    SolidBlack,
    SolidWhite,
    /// Grey shading; level is a percentage (0-100)
    Shading,
    /// Cross-hatch; level picks one of the six built-in patterns (1-6)
    CrossHatch,
}

impl PatternType {
    /// Value of the `ESC * v # T` field.
    pub fn type_value(self) -> i32 {
        match self {
            PatternType::SolidBlack => 0,
            PatternType::SolidWhite => 1,
            PatternType::Shading => 2,
            PatternType::CrossHatch => 3,
        }
    }
}

/// Active pattern: family plus level (ignored for solid patterns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pattern {
    pub kind: PatternType,
    pub level: u16,
}

/// Rectangle fill value selecting "current pattern".
const FILL_CURRENT_PATTERN: i32 = 5;

/// # Select Current Pattern
///
/// Shading and cross-hatch patterns first set the pattern ID, then the type.
/// Solid patterns only set the type.
///
/// ## Returns
///
/// `None` if the level is out of range for the pattern family
/// (shading 0-100, cross-hatch 1-6).
///
/// ## Example
///
/// ```
/// use rotsample::protocol::graphics::{pattern_select, PatternType};
///
/// assert_eq!(pattern_select(PatternType::Shading, 60), Some(b"\x1b*c60G\x1b*v2T".to_vec()));
/// assert_eq!(pattern_select(PatternType::SolidBlack, 0), Some(b"\x1b*v0T".to_vec()));
/// ```
pub fn pattern_select(kind: PatternType, level: u16) -> Option<Vec<u8>> {
    let valid = match kind {
        PatternType::SolidBlack | PatternType::SolidWhite => true,
        PatternType::Shading => level <= 100,
        PatternType::CrossHatch => (1..=6).contains(&level),
    };
    if !valid {
        return None;
    }

    let mut cmd = Vec::new();
    if matches!(kind, PatternType::Shading | PatternType::CrossHatch) {
        cmd.extend(escape(b"*c", &[(level as i32, b'G')]));
    }
    cmd.extend(escape(b"*v", &[(kind.type_value(), b'T')]));
    Some(cmd)
}

/// # Rectangular Area Fill
///
/// Moves the cursor to `(x, y)` and fills a `width` x `height` rectangle
/// with the current pattern.
///
/// ```text
/// ESC * p x x y Y  ESC * c w a h b 5 P
/// ```
pub fn rule(x: i16, y: i16, width: i16, height: i16) -> Vec<u8> {
    let mut cmd = cursor_position(x, y);
    cmd.extend(escape(
        b"*c",
        &[
            (width as i32, b'A'),
            (height as i32, b'B'),
            (FILL_CURRENT_PATTERN, b'P'),
        ],
    ));
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_solid() {
        assert_eq!(pattern_select(PatternType::SolidBlack, 0), Some(b"\x1b*v0T".to_vec()));
        // Level is ignored for solid patterns
        assert_eq!(pattern_select(PatternType::SolidWhite, 999), Some(b"\x1b*v1T".to_vec()));
    }

    #[test]
    fn test_pattern_shading() {
        assert_eq!(
            pattern_select(PatternType::Shading, 60),
            Some(b"\x1b*c60G\x1b*v2T".to_vec())
        );
        assert!(pattern_select(PatternType::Shading, 101).is_none());
    }

    #[test]
    fn test_pattern_cross_hatch() {
        assert_eq!(
            pattern_select(PatternType::CrossHatch, 6),
            Some(b"\x1b*c6G\x1b*v3T".to_vec())
        );
        assert!(pattern_select(PatternType::CrossHatch, 0).is_none());
        assert!(pattern_select(PatternType::CrossHatch, 7).is_none());
    }

    #[test]
    fn test_rule() {
        assert_eq!(
            rule(150, 300, 4500, 1),
            b"\x1b*p150x300Y\x1b*c4500a1b5P".to_vec()
        );
    }
}
