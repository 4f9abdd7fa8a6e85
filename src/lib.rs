//! # Rotsample - PCL + HP-GL/2 Text Rotation Sample Jobs
//!
//! Rotsample generates byte-exact test print jobs for PCL 5 page printers.
//! A job mixes PCL escape sequences with embedded HP-GL/2 vector
//! instructions to exercise text rotation two ways:
//!
//! - **Orthogonal text** through the PCL print-direction primitive
//!   (`ESC & a # P`), which only knows 0, 90, 180 and 270 degrees
//! - **Arbitrary angles** through the HP-GL/2 direction instruction (`DI`),
//!   which takes a direction-cosine pair instead of degrees
//!
//! It provides:
//!
//! - **Protocol implementation**: PCL and HP-GL/2 command builders
//! - **Command writer**: a stateful encoder enforcing mode, macro and page rules
//! - **Sample composer**: the complete rotation sample job
//! - **Printer tables**: paper geometry and font catalog
//!
//! ## Quick Start
//!
//! ```
//! use rotsample::{
//!     printer::{FontCatalog, StandardPaperTable},
//!     sample::{SampleComposer, SampleOptions},
//!     writer::CommandWriter,
//! };
//!
//! let catalog = FontCatalog::standard();
//! let composer = SampleComposer::new(&catalog, &StandardPaperTable);
//!
//! let mut writer = CommandWriter::new(Vec::new());
//! composer.generate_job(&mut writer, &SampleOptions::default())?;
//!
//! let job = writer.into_inner();
//! assert!(job.starts_with(b"\x1b%-12345X"));
//! # Ok::<(), rotsample::error::PclError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | PCL and HP-GL/2 command builders |
//! | [`writer`] | Stateful command-stream encoder |
//! | [`sample`] | Text rotation sample job composer |
//! | [`printer`] | Paper geometry and font tables |
//! | [`error`] | Error types |

pub mod error;
pub mod printer;
pub mod protocol;
pub mod sample;
pub mod writer;

// Re-exports for convenience
pub use error::PclError;
pub use printer::{FontCatalog, GeometryProvider, StandardPaperTable};
pub use sample::{SampleComposer, SampleOptions};
pub use writer::CommandWriter;
