//! # PCL Core Commands
//!
//! This module implements the PCL 5 control sequences used to frame a job
//! and position the cursor.
//!
//! ## Escape Sequence Structure
//!
//! Parameterized PCL commands share one shape:
//!
//! ```text
//! ESC  parameterized-char  group-char  value  terminator
//! 1B   & * ( %             l p c f ...  ASCII   uppercase letter
//! ```
//!
//! Commands with the same parameterized and group characters may be
//! combined by lowercasing every terminator except the last:
//!
//! ```text
//! ESC * p 300 X  +  ESC * p 600 Y   ==   ESC * p 300 x 600 Y
//! ```
//!
//! ## Numeric Fields
//!
//! Values are **ASCII decimal**, not binary. Cursor coordinates are signed
//! 16-bit logical units; the caller's arithmetic wraps at the field width
//! rather than saturating, matching what the device accepts.
//!
//! ## Reference
//!
//! Based on "PCL 5 Printer Language Technical Reference Manual"
//! and "PJL Technical Reference Manual" by Hewlett-Packard.

// ============================================================================
// CONTROL CHARACTERS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// FF (Form Feed) - Print the current page and start a new one
pub const FF: u8 = 0x0C;

/// CR (Carriage Return)
pub const CR: u8 = 0x0D;

/// LF (Line Feed)
pub const LF: u8 = 0x0A;

/// ETX (End of Text) - default HP-GL/2 label terminator
pub const ETX: u8 = 0x03;

/// Universal Exit Language: `ESC % -12345 X`
///
/// Returns the printer to PJL control regardless of the active language.
pub const UEL: &[u8] = b"\x1b%-12345X";

/// Session resolution: logical units per inch declared by the job header.
pub const UNITS_PER_INCH: u16 = 600;

/// HP-GL/2 plotter units per inch (0.025 mm per unit).
pub const PLOTTER_UNITS_PER_INCH: u16 = 1016;

/// Decipoints per inch, the unit of picture frame dimensions.
pub const DECIPOINTS_PER_INCH: i32 = 720;

// ============================================================================
// SEQUENCE BUILDERS
// ============================================================================

/// Build a parameterized PCL sequence, combining every field into one escape.
///
/// `group` is the parameterized character followed by the group character
/// (e.g. `b"*p"`). Each field is a value and its uppercase terminator; all
/// terminators except the last are lowercased.
///
/// ## Example
///
/// ```
/// use rotsample::protocol::commands::escape;
///
/// assert_eq!(escape(b"*p", &[(300, b'X'), (600, b'Y')]), b"\x1b*p300x600Y".to_vec());
/// assert_eq!(escape(b"&l", &[(2, b'A')]), b"\x1b&l2A".to_vec());
/// ```
pub fn escape(group: &[u8], fields: &[(i32, u8)]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(1 + group.len() + fields.len() * 6);
    cmd.push(ESC);
    cmd.extend_from_slice(group);

    let last = fields.len().saturating_sub(1);
    for (i, (value, terminator)) in fields.iter().enumerate() {
        cmd.extend(value.to_string().bytes());
        if i == last {
            cmd.push(terminator.to_ascii_uppercase());
        } else {
            cmd.push(terminator.to_ascii_lowercase());
        }
    }
    cmd
}

// ============================================================================
// JOB FRAMING
// ============================================================================

/// # Printer Reset (ESC E)
///
/// Restores user defaults, deletes temporary fonts and macros, and ejects
/// any partial page.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC E |
/// | Hex     | 1B 45 |
///
/// ## Example
///
/// ```
/// use rotsample::protocol::commands;
///
/// assert_eq!(commands::reset(), vec![0x1B, 0x45]);
/// ```
#[inline]
pub fn reset() -> Vec<u8> {
    vec![ESC, b'E']
}

/// # Unit of Measure (ESC & u # D)
///
/// Declares how many PCL units make up one inch. Every cursor coordinate
/// in the job is expressed in these units.
#[inline]
pub fn unit_of_measure(units_per_inch: u16) -> Vec<u8> {
    escape(b"&u", &[(units_per_inch as i32, b'D')])
}

/// Universal Exit Language sequence as an owned command.
#[inline]
pub fn uel() -> Vec<u8> {
    UEL.to_vec()
}

/// `@PJL COMMENT <text>` line.
///
/// PJL lines end with CR LF. Embedded line breaks would start a new PJL
/// command, so they are replaced with spaces.
pub fn pjl_comment(text: &str) -> Vec<u8> {
    let clean: String = text
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();
    let mut cmd = Vec::with_capacity(14 + clean.len());
    cmd.extend_from_slice(b"@PJL COMMENT ");
    cmd.extend(clean.bytes());
    cmd.extend([CR, LF]);
    cmd
}

/// `@PJL ENTER LANGUAGE = PCL` line, switching the printer into PCL.
#[inline]
pub fn pjl_enter_pcl() -> Vec<u8> {
    b"@PJL ENTER LANGUAGE = PCL\r\n".to_vec()
}

// ============================================================================
// CURSOR AND PAGE CONTROL
// ============================================================================

/// # Cursor Position (ESC * p # X / ESC * p # Y)
///
/// Moves the cursor to an absolute position in logical units, measured
/// from the left edge of the logical page and the top margin.
///
/// ## Example
///
/// ```
/// use rotsample::protocol::commands;
///
/// assert_eq!(commands::cursor_position(450, 600), b"\x1b*p450x600Y".to_vec());
/// ```
#[inline]
pub fn cursor_position(x: i16, y: i16) -> Vec<u8> {
    escape(b"*p", &[(x as i32, b'X'), (y as i32, b'Y')])
}

/// # Form Feed (FF)
///
/// Prints the composed page and moves to the top of the next one.
#[inline]
pub fn form_feed() -> Vec<u8> {
    vec![FF]
}

/// Convert logical units (at [`UNITS_PER_INCH`]) to decipoints.
#[inline]
pub fn units_to_decipoints(units: i16) -> i32 {
    units as i32 * DECIPOINTS_PER_INCH / UNITS_PER_INCH as i32
}

// ============================================================================
// TESTS
// ============================================================================
