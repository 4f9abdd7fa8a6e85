//! # Error Types
//!
//! This module defines error types used throughout the rotsample library.
//!
//! Precondition violations (bad macro transitions, non-quadrant angles, a
//! command issued in the wrong language mode) are reported before any byte
//! of the offending command reaches the sink.

use thiserror::Error;

use crate::protocol::hpgl2::Mode;
use crate::protocol::macros::MacroAction;
use crate::writer::MacroState;

/// Main error type for rotsample operations
#[derive(Debug, Error)]
pub enum PclError {
    /// Rotation outside {0, 90, 180, 270} sent to the print-direction primitive
    #[error("Angle {0} is not a quadrant (expected 0, 90, 180 or 270)")]
    NonQuadrantAngle(i16),

    /// Macro action not permitted from the macro's current state
    #[error("Macro {id}: cannot {action:?} while {state:?}")]
    MacroTransition {
        id: u16,
        action: MacroAction,
        state: MacroState,
    },

    /// Operation not allowed while a macro definition is open
    #[error("{operation} not allowed while macro {id} is being defined")]
    MacroDefinitionOpen { id: u16, operation: &'static str },

    /// Command issued in the wrong language mode
    #[error("{operation} requires {expected:?} mode (writer is in {actual:?} mode)")]
    WrongMode {
        operation: &'static str,
        expected: Mode,
        actual: Mode,
    },

    /// Drawing issued with no open page and no macro definition
    #[error("{0} requires an open page")]
    NoPage(&'static str),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Font name missing from the catalog
    #[error("Font not found: {0}")]
    FontNotFound(String),

    /// Configuration file or option error
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
