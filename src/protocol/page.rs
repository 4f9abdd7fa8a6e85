//! # Page Setup Commands
//!
//! Page-level PCL commands: media selection, orientation, duplex, print
//! direction and the HP-GL/2 picture frame.
//!
//! ## Workflow
//!
//! 1. Select paper size, media type, orientation and plex
//! 2. Clear the top margin so Y = 0 is the physical top of the logical page
//! 3. Optionally set print direction (`print_direction`)
//! 4. Optionally declare a picture frame for HP-GL/2 drawing
//! 5. Compose content, then eject with a form feed
//!
//! ## Reference
//!
//! PCL 5 Technical Reference, chapters "Page Control Commands" and
//! "The PCL Picture Frame".

use serde::{Deserialize, Serialize};

use super::commands::{ESC, cursor_position, escape, units_to_decipoints};
use crate::error::PclError;

/// Logical page orientation (`ESC & l # O`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Portrait = 0,
    Landscape = 1,
    ReversePortrait = 2,
    ReverseLandscape = 3,
}

/// Short- or long-edge-first aspect of an orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    Portrait,
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Portrait,
        Orientation::Landscape,
        Orientation::ReversePortrait,
        Orientation::ReverseLandscape,
    ];

    /// Reverse orientations share the aspect of their base orientation.
    pub fn aspect(self) -> Aspect {
        match self {
            Orientation::Portrait | Orientation::ReversePortrait => Aspect::Portrait,
            Orientation::Landscape | Orientation::ReverseLandscape => Aspect::Landscape,
        }
    }

    /// Parse an orientation name (CLI args, config files).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "portrait" | "0" => Ok(Orientation::Portrait),
            "landscape" | "1" => Ok(Orientation::Landscape),
            "reverse_portrait" | "2" => Ok(Orientation::ReversePortrait),
            "reverse_landscape" | "3" => Ok(Orientation::ReverseLandscape),
            _ => Err(format!(
                "Unknown orientation '{}'. Use portrait, landscape, reverse-portrait or reverse-landscape",
                s
            )),
        }
    }
}

/// Simplex or duplex binding (`ESC & l # S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Plex {
    #[default]
    Simplex = 0,
    DuplexLongEdge = 1,
    DuplexShortEdge = 2,
}

impl Plex {
    /// Parse a plex name (CLI args, config files).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "simplex" => Ok(Plex::Simplex),
            "duplex_long_edge" | "long_edge" => Ok(Plex::DuplexLongEdge),
            "duplex_short_edge" | "short_edge" => Ok(Plex::DuplexShortEdge),
            _ => Err(format!(
                "Unknown plex '{}'. Use simplex, long-edge or short-edge",
                s
            )),
        }
    }
}

// ============================================================================
// PRINT DIRECTION
// ============================================================================

/// Counter-clockwise print direction accepted by `ESC & a # P`.
///
/// The primitive only understands right angles. Conversion from degrees is
/// exact: any value outside {0, 90, 180, 270} is rejected, never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quadrant {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Quadrant {
    pub fn degrees(self) -> i16 {
        match self {
            Quadrant::Deg0 => 0,
            Quadrant::Deg90 => 90,
            Quadrant::Deg180 => 180,
            Quadrant::Deg270 => 270,
        }
    }
}

impl TryFrom<i16> for Quadrant {
    type Error = PclError;

    fn try_from(degrees: i16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Quadrant::Deg0),
            90 => Ok(Quadrant::Deg90),
            180 => Ok(Quadrant::Deg180),
            270 => Ok(Quadrant::Deg270),
            other => Err(PclError::NonQuadrantAngle(other)),
        }
    }
}

/// # Print Direction (ESC & a # P)
///
/// Rotates the logical page coordinate system counter-clockwise for
/// subsequent text. The cursor keeps its physical position across the change.
///
/// ## Example
///
/// ```
/// use rotsample::protocol::page::{print_direction, Quadrant};
///
/// assert_eq!(print_direction(Quadrant::Deg90), b"\x1b&a90P".to_vec());
/// ```
pub fn print_direction(quadrant: Quadrant) -> Vec<u8> {
    escape(b"&a", &[(quadrant.degrees() as i32, b'P')])
}

// ============================================================================
// MEDIA SELECTION
// ============================================================================

/// Page size (`ESC & l # A`), by PCL page-size id.
#[inline]
pub fn page_size(pcl_id: u16) -> Vec<u8> {
    escape(b"&l", &[(pcl_id as i32, b'A')])
}

/// Orientation (`ESC & l # O`).
#[inline]
pub fn orientation(orientation: Orientation) -> Vec<u8> {
    escape(b"&l", &[(orientation as i32, b'O')])
}

/// Simplex/duplex (`ESC & l # S`).
#[inline]
pub fn plex(plex: Plex) -> Vec<u8> {
    escape(b"&l", &[(plex as i32, b'S')])
}

/// Top margin in lines (`ESC & l # E`).
#[inline]
pub fn top_margin(lines: u16) -> Vec<u8> {
    escape(b"&l", &[(lines as i32, b'E')])
}

/// # Media Type by Name (ESC & n # W d <name>)
///
/// The byte count covers the operation byte `d` plus the name.
pub fn media_type(name: &str) -> Vec<u8> {
    let mut cmd = escape(b"&n", &[(name.len() as i32 + 1, b'W')]);
    cmd.push(b'd');
    cmd.extend(name.bytes());
    cmd
}

// ============================================================================
// PICTURE FRAME
// ============================================================================

/// # Picture Frame (ESC * c 0 T, ESC * c # X, ESC * c # Y)
///
/// Anchors the HP-GL/2 picture frame at the given cursor position and sizes
/// it. Position is in logical units; the size fields are in decipoints.
///
/// ```text
/// ESC * p x X y Y     move cursor to the anchor
/// ESC * c 0 T         anchor picture frame at cursor
/// ESC * c w X h Y     frame size in decipoints
/// ```
pub fn picture_frame(x: i16, y: i16, height: i16, width: i16) -> Vec<u8> {
    let mut cmd = cursor_position(x, y);
    cmd.extend([ESC, b'*', b'c', b'0', b'T']);
    cmd.extend(escape(
        b"*c",
        &[
            (units_to_decipoints(width), b'X'),
            (units_to_decipoints(height), b'Y'),
        ],
    ));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_accepts_right_angles() {
        for deg in [0, 90, 180, 270] {
            let q = Quadrant::try_from(deg).unwrap();
            assert_eq!(q.degrees(), deg);
        }
    }

    #[test]
    fn test_quadrant_rejects_everything_else() {
        for deg in [-90, 1, 30, 45, 89, 91, 135, 179, 181, 269, 271, 360, 450] {
            assert!(
                matches!(Quadrant::try_from(deg), Err(PclError::NonQuadrantAngle(d)) if d == deg),
                "{} should be rejected",
                deg
            );
        }
    }

    #[test]
    fn test_print_direction() {
        assert_eq!(print_direction(Quadrant::Deg0), b"\x1b&a0P".to_vec());
        assert_eq!(print_direction(Quadrant::Deg270), b"\x1b&a270P".to_vec());
    }

    #[test]
    fn test_page_size() {
        assert_eq!(page_size(2), b"\x1b&l2A".to_vec());
    }

    #[test]
    fn test_orientation() {
        assert_eq!(orientation(Orientation::Landscape), b"\x1b&l1O".to_vec());
    }

    #[test]
    fn test_plex() {
        assert_eq!(plex(Plex::DuplexShortEdge), b"\x1b&l2S".to_vec());
    }

    #[test]
    fn test_media_type() {
        assert_eq!(media_type("Plain"), b"\x1b&n6WdPlain".to_vec());
    }

    #[test]
    fn test_picture_frame() {
        // Letter portrait logical page: 4800 x 6600 units
        assert_eq!(
            picture_frame(0, 0, 6600, 4800),
            b"\x1b*p0x0Y\x1b*c0T\x1b*c5760x7920Y".to_vec()
        );
    }

    #[test]
    fn test_orientation_aspect() {
        assert_eq!(Orientation::ReversePortrait.aspect(), Aspect::Portrait);
        assert_eq!(Orientation::ReverseLandscape.aspect(), Aspect::Landscape);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Orientation::parse("reverse-landscape"), Ok(Orientation::ReverseLandscape));
        assert_eq!(Plex::parse("Long-Edge"), Ok(Plex::DuplexLongEdge));
        assert!(Orientation::parse("sideways").is_err());
    }
}
