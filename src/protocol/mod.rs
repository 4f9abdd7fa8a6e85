//! # PCL 5 and HP-GL/2 Protocol Implementation
//!
//! This module provides low-level command builders for PCL 5 page printers
//! and the HP-GL/2 vector language embedded in them. Every builder returns
//! the exact bytes of one command; state and ordering rules live in
//! [`crate::writer`].
//!
//! ## Module Structure
//!
//! - [`commands`]: Job framing, cursor positioning, sequence builder
//! - [`page`]: Media selection, orientation, print direction, picture frame
//! - [`text`]: Symbol set and font selection, positioned text
//! - [`graphics`]: Current pattern and rectangle fills
//! - [`macros`]: Macro definition, call and deletion
//! - [`hpgl2`]: HP-GL/2 mode switching, instructions, direction vectors
//!
//! ## Usage Example
//!
//! ```
//! use rotsample::protocol::{commands, hpgl2, page, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::reset());
//! data.extend(commands::unit_of_measure(600));
//! data.extend(page::page_size(2));
//! data.extend(text::positioned_text(600, 600, "Hello"));
//!
//! // Switch to HP-GL/2 for a rotated label, then back
//! data.extend(hpgl2::enter(hpgl2::PenPosition::PclCursor));
//! data.extend(hpgl2::instruction("DI", "0,1", true).unwrap());
//! data.extend(hpgl2::instruction("LB", "up\x03", false).unwrap());
//! data.extend(hpgl2::exit(hpgl2::CursorPosition::Previous));
//!
//! data.extend(commands::form_feed());
//! ```
//!
//! ## Protocol Reference
//!
//! This implementation is based on the "PCL 5 Printer Language Technical
//! Reference Manual" and the "HP-GL/2 and HP RTL Reference Guide"
//! by Hewlett-Packard.

pub mod commands;
pub mod graphics;
pub mod hpgl2;
pub mod macros;
pub mod page;
pub mod text;
