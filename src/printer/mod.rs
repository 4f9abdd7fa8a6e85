//! # Printer Module
//!
//! Static printer data the composer queries before writing a job.
//!
//! ## Modules
//!
//! - [`paper`]: Paper sizes, media types and logical page geometry
//! - [`fonts`]: Font catalog and selection strings

pub mod fonts;
pub mod paper;

pub use fonts::FontCatalog;
pub use paper::{GeometryProvider, PageGeometry, PaperSize, PaperType, StandardPaperTable};
