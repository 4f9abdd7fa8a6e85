//! # Text Rotation Sample
//!
//! Composes the complete rotation sample job: a page showing orthogonal
//! text through the PCL print-direction primitive and labels at arbitrary
//! angles through HP-GL/2.
//!
//! ## Page Layout (portrait Letter)
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ░ 60% shaded outline, 1/2" in from the edges  │
//! │                                                │
//! │   PCL & HP-GL/2 Text Rotation:    (Courier 15B)│
//! │   Orthogonal:                                  │
//! │                 ccw 90                         │
//! │           ccw 180 ┼ angle 0       (Arial 36)   │
//! │                 ccw 270                        │
//! │   Non-orthogonal:                              │
//! │             +135 ╲ ╱ +30                       │
//! │             +210 ╱ ╲ +315                      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The overlay (shaded outline, heading, descriptions) is either stored as a
//! macro before the page and invoked on it, or written inline. Both routes
//! put the same drawing bytes on the page.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

use crate::error::PclError;
use crate::printer::fonts::{FontCatalog, FontVariant, HPGL2_SYMSET_LATIN1};
use crate::printer::paper::{GeometryProvider, PageGeometry, PaperSize, PaperType, StandardPaperTable};
use crate::protocol::commands::{PLOTTER_UNITS_PER_INCH, UNITS_PER_INCH};
use crate::protocol::graphics::PatternType;
use crate::protocol::hpgl2::{fixed4, CursorPosition, DirectionVector, PenPosition};
use crate::protocol::macros::MacroAction;
use crate::protocol::page::{Orientation, Plex, Quadrant};
use crate::protocol::text::SYMBOL_SET_WIN_LATIN1;
use crate::writer::CommandWriter;

/// Macro ID holding the page overlay.
pub const MACRO_ID: u16 = 1;

/// HP-GL/2 label terminator set by `DT~`: `~` is the terminator, the
/// preceding carriage return ends the label line.
pub const LABEL_TERMINATOR: &str = "\r~";

pub const HEADING: &str = "PCL & HP-GL/2 Text Rotation:";
pub const ORTHOGONAL_CAPTION: &str = "Orthogonal:";
pub const NON_ORTHOGONAL_CAPTION: &str = "Non-orthogonal:";

const INCH: i16 = UNITS_PER_INCH as i16;
const LINE: i16 = INCH * 5 / 6;

const DESC_X: i16 = INCH;
const DATA_X: i16 = INCH + (INCH * 9) / 2;
const HEADING_Y: i16 = INCH;
const ORTHOGONAL_Y: i16 = INCH * 2;
const NON_ORTHOGONAL_Y: i16 = INCH * 6;
const ORTHOGONAL_DATA_Y: i16 = INCH * 4;
const NON_ORTHOGONAL_DATA_Y: i16 = INCH * 8;

const OVERLAY_SHADE: u16 = 60;
const OVERLAY_PEN: i16 = 1;

/// Job options. Every field has a default, so a partial JSON object is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SampleOptions {
    pub paper_size: PaperSize,
    pub paper_type: PaperType,
    pub orientation: Orientation,
    pub plex: Plex,
    /// Store the overlay as a macro and call it, instead of drawing inline
    pub macro_backed: bool,
    /// Written as a PJL comment when not empty
    pub job_name: String,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            paper_type: PaperType::NotSet,
            orientation: Orientation::Portrait,
            plex: Plex::Simplex,
            macro_backed: true,
            job_name: String::new(),
        }
    }
}

impl SampleOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, PclError> {
        serde_json::from_str(json).map_err(|e| PclError::Config(e.to_string()))
    }
}

/// Page geometry in signed logical units, as the device fields take them.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x_offset: i16,
    logical_width: i16,
    logical_height: i16,
    paper_width: i16,
    paper_height: i16,
}

impl From<PageGeometry> for Layout {
    fn from(g: PageGeometry) -> Self {
        Self {
            x_offset: g.logical_x_offset as i16,
            logical_width: g.logical_width as i16,
            logical_height: g.logical_height as i16,
            paper_width: g.paper_width as i16,
            paper_height: g.paper_height as i16,
        }
    }
}

impl Layout {
    /// Paper-relative x to logical-page x.
    fn x(&self, paper_x: i16) -> i16 {
        paper_x.wrapping_sub(self.x_offset)
    }
}

/// Font indexes resolved once per job.
struct SampleFonts {
    arial: usize,
    courier: usize,
}

/// Builds the rotation sample job from a font catalog and a geometry source.
pub struct SampleComposer<'a> {
    catalog: &'a FontCatalog,
    geometry: &'a dyn GeometryProvider,
}

impl<'a> SampleComposer<'a> {
    pub fn new(catalog: &'a FontCatalog, geometry: &'a dyn GeometryProvider) -> Self {
        Self { catalog, geometry }
    }

    /// Write one complete job: header, optional overlay macro, one page,
    /// trailer.
    pub fn generate_job<W: Write>(
        &self,
        writer: &mut CommandWriter<W>,
        options: &SampleOptions,
    ) -> Result<(), PclError> {
        let geometry = self
            .geometry
            .resolve(options.paper_size.pcl_id(), options.orientation);
        let layout = Layout::from(geometry);
        let fonts = SampleFonts {
            arial: self.catalog.index_or_default("Arial"),
            courier: self.catalog.index_or_default("Courier"),
        };
        info!(
            paper = options.paper_size.name(),
            orientation = ?options.orientation,
            macro_backed = options.macro_backed,
            "generating rotation sample"
        );
        debug!(?geometry, "resolved page geometry");

        writer.job_header(&options.job_name)?;
        if options.macro_backed {
            writer.macro_control(MACRO_ID, MacroAction::StartDef)?;
            self.overlay(writer, &layout, &fonts)?;
            writer.macro_control(MACRO_ID, MacroAction::StopDef)?;
        }

        writer.page_header(
            options.paper_size,
            options.paper_type,
            options.orientation,
            options.plex,
        )?;
        if options.macro_backed {
            writer.macro_control(MACRO_ID, MacroAction::Call)?;
        } else {
            self.overlay(writer, &layout, &fonts)?;
        }

        self.vector_setup(writer, &layout)?;
        self.orthogonal_block(writer, &layout, &fonts)?;
        self.non_orthogonal_block(writer, &layout, &fonts)?;

        writer.form_feed()?;
        writer.job_trailer(options.macro_backed, MACRO_ID)
    }

    /// Shaded outline, heading and captions. Leaves the pattern solid black.
    fn overlay<W: Write>(
        &self,
        writer: &mut CommandWriter<W>,
        layout: &Layout,
        fonts: &SampleFonts,
    ) -> Result<(), PclError> {
        writer.pattern_set(PatternType::Shading, OVERLAY_SHADE)?;
        writer.rectangle_outline(
            layout.x(INCH / 2),
            INCH / 2,
            layout.paper_height.wrapping_sub(INCH),
            layout.paper_width.wrapping_sub(INCH),
            OVERLAY_PEN,
            false,
            false,
        )?;
        writer.pattern_set(PatternType::SolidBlack, 0)?;

        let x = layout.x(DESC_X);
        let heading = self
            .catalog
            .page_font_select(fonts.courier, FontVariant::Bold, 15.0, 0.0);
        writer.font(true, SYMBOL_SET_WIN_LATIN1, &heading)?;
        writer.text(x, HEADING_Y, Quadrant::Deg0, HEADING)?;

        let caption = self
            .catalog
            .page_font_select(fonts.courier, FontVariant::Regular, 12.0, 0.0);
        writer.font(true, SYMBOL_SET_WIN_LATIN1, &caption)?;
        writer.text(x, ORTHOGONAL_Y, Quadrant::Deg0, ORTHOGONAL_CAPTION)?;
        writer.text(x, NON_ORTHOGONAL_Y, Quadrant::Deg0, NON_ORTHOGONAL_CAPTION)?;

        writer.pattern_set(PatternType::SolidBlack, 0)
    }

    /// Picture frame over the logical page and an HP-GL/2 user coordinate
    /// system matching PCL: 600 units per inch, Y growing down the page.
    fn vector_setup<W: Write>(
        &self,
        writer: &mut CommandWriter<W>,
        layout: &Layout,
    ) -> Result<(), PclError> {
        writer.picture_frame(0, 0, layout.logical_height, layout.logical_width)?;

        let scale = PLOTTER_UNITS_PER_INCH as f64 / UNITS_PER_INCH as f64;
        writer.enter_vector_mode(false, PenPosition::Previous)?;
        writer.vector_command("IN", "", false)?;
        writer.vector_command("SP", "1", true)?;
        writer.vector_command("DT", "~", false)?;
        writer.vector_command(
            "SC",
            &format!("0,{},0,{},2", fixed4(scale), fixed4(-scale)),
            false,
        )?;
        writer.vector_command("IR", "0,100,100,0", false)?;
        writer.vector_command("PU", "0,0", true)?;
        writer.enter_page_mode(CursorPosition::HpglPen)
    }

    /// Four labels around one point through the print-direction primitive.
    fn orthogonal_block<W: Write>(
        &self,
        writer: &mut CommandWriter<W>,
        layout: &Layout,
        fonts: &SampleFonts,
    ) -> Result<(), PclError> {
        let font = self
            .catalog
            .page_font_select(fonts.arial, FontVariant::Regular, 36.0, 0.0);
        writer.font(true, SYMBOL_SET_WIN_LATIN1, &font)?;
        writer.print_direction(0)?;

        let mut x = layout.x(DATA_X).wrapping_add(LINE / 4);
        let mut y = ORTHOGONAL_DATA_Y;
        writer.text_rotated(x, y, Quadrant::Deg0, 0, true, "angle 0")?;

        x = x.wrapping_sub(LINE / 2);
        writer.text_rotated(x, y, Quadrant::Deg0, 180, true, "ccw 180")?;

        x = x.wrapping_add(LINE / 4);
        y = y.wrapping_sub(LINE / 4);
        writer.text_rotated(x, y, Quadrant::Deg0, 90, true, "ccw 90")?;

        y = y.wrapping_add(LINE / 2);
        writer.text_rotated(x, y, Quadrant::Deg0, 270, true, "ccw 270")
    }

    /// Two label pairs through HP-GL/2 direction vectors: 30/210 from one
    /// point, then 135/315 from two points a half inch apart.
    fn non_orthogonal_block<W: Write>(
        &self,
        writer: &mut CommandWriter<W>,
        layout: &Layout,
        fonts: &SampleFonts,
    ) -> Result<(), PclError> {
        let font = self.catalog.vector_font_def(
            fonts.arial,
            FontVariant::Regular,
            HPGL2_SYMSET_LATIN1,
            36.0,
            0.0,
        );

        let x = layout.x(DATA_X);
        let y = NON_ORTHOGONAL_DATA_Y;
        writer.enter_vector_mode(false, PenPosition::Previous)?;
        writer.vector_command("SD", &font, true)?;
        writer.vector_command("PA", &format!("{},{}", x, y), false)?;
        let v = DirectionVector::from_degrees(30.0);
        label(writer, v, "angle +30")?;
        label(writer, -v, "angle +210")?;
        writer.enter_page_mode(CursorPosition::HpglPen)?;

        let mut x = layout.x(DATA_X).wrapping_sub(INCH / 4);
        let mut y = NON_ORTHOGONAL_DATA_Y;
        writer.enter_vector_mode(false, PenPosition::Previous)?;
        writer.vector_command("SD", &font, true)?;
        writer.vector_command("PA", &format!("{},{}", x, y), false)?;
        let v = DirectionVector::from_degrees(135.0);
        label(writer, v, "angle +135")?;

        x = x.wrapping_add(INCH / 2);
        y = y.wrapping_add(LINE / 6);
        writer.vector_command("PA", &format!("{},{}", x, y), false)?;
        label(writer, -v, "angle +315")?;

        writer.vector_command("DI", &DirectionVector::HORIZONTAL.to_string(), false)?;
        writer.enter_page_mode(CursorPosition::HpglPen)
    }
}

/// `DI` for the direction, then the label with the `DT~` terminator.
fn label<W: Write>(
    writer: &mut CommandWriter<W>,
    direction: DirectionVector,
    text: &str,
) -> Result<(), PclError> {
    writer.vector_command("DI", &direction.to_string(), false)?;
    writer.vector_command("LB", &format!("{}{}", text, LABEL_TERMINATOR), true)
}

/// Generate the sample job with the standard font catalog and paper table.
pub fn generate(options: &SampleOptions) -> Result<Vec<u8>, PclError> {
    let catalog = FontCatalog::standard();
    let composer = SampleComposer::new(&catalog, &StandardPaperTable);
    let mut writer = CommandWriter::new(Vec::new());
    composer.generate_job(&mut writer, options)?;
    Ok(writer.into_inner())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MacroState;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_default_options() {
        let options = SampleOptions::default();
        assert_eq!(options.paper_size, PaperSize::Letter);
        assert_eq!(options.paper_type, PaperType::NotSet);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert_eq!(options.plex, Plex::Simplex);
        assert!(options.macro_backed);
        assert!(options.job_name.is_empty());
    }

    #[test]
    fn test_options_from_partial_json() {
        let options = SampleOptions::from_json(r#"{"paper_size": "a4", "macro_backed": false}"#).unwrap();
        assert_eq!(options.paper_size, PaperSize::A4);
        assert!(!options.macro_backed);
        assert_eq!(options.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_options_rejects_unknown_field() {
        assert!(matches!(
            SampleOptions::from_json(r#"{"papersize": "a4"}"#),
            Err(PclError::Config(_))
        ));
    }

    #[test]
    fn test_layout_offsets() {
        let g = StandardPaperTable::geometry(PaperSize::Letter, Orientation::Portrait);
        let layout = Layout::from(g);
        assert_eq!(layout.x(INCH / 2), 150);
        assert_eq!(layout.x(DATA_X), 3150);
        assert_eq!(layout.x(DATA_X) + LINE / 4, 3275);
    }

    #[test]
    fn test_overlay_outline_bytes() {
        let job = generate(&SampleOptions::default()).unwrap();
        assert!(contains(&job, b"\x1b*c60G\x1b*v2T"));
        assert!(contains(&job, b"\x1b*p150x300Y\x1b*c4501a1b5P"));
        assert!(contains(&job, b"\x1b*p4650x300Y\x1b*c1a6001b5P"));
    }

    #[test]
    fn test_vector_setup_bytes() {
        let job = generate(&SampleOptions::default()).unwrap();
        assert!(contains(
            &job,
            b"\x1b*p0x0Y\x1b*c0T\x1b*c5760x7920Y\x1b%0BINSP1;DT~SC0,1.6933,0,-1.6933,2IR0,100,100,0PU0,0;\x1b%1A"
        ));
    }

    #[test]
    fn test_orthogonal_labels() {
        let job = generate(&SampleOptions::default()).unwrap();
        assert!(contains(&job, b"\x1b*p3275x2400Y\x1b&a0Pangle 0\x1b&a0P"));
        assert!(contains(&job, b"\x1b*p3025x2400Y\x1b&a180Pccw 180\x1b&a0P"));
        assert!(contains(&job, b"\x1b*p3150x2275Y\x1b&a90Pccw 90\x1b&a0P"));
        assert!(contains(&job, b"\x1b*p3150x2525Y\x1b&a270Pccw 270\x1b&a0P"));
    }

    #[test]
    fn test_non_orthogonal_labels() {
        let job = generate(&SampleOptions::default()).unwrap();
        let v30 = DirectionVector::from_degrees(30.0);
        let v135 = DirectionVector::from_degrees(135.0);

        let pair1 = format!(
            "SD1,14,2,1,4,36,5,0,6,0,7,16602;PA3150,4800DI{}LBangle +30\r~;DI{}LBangle +210\r~;",
            v30, -v30
        );
        let pair2 = format!(
            "PA3000,4800DI{}LBangle +135\r~;PA3300,4883DI{}LBangle +315\r~;DI1,0\x1b%1A",
            v135, -v135
        );
        assert!(contains(&job, pair1.as_bytes()));
        assert!(contains(&job, pair2.as_bytes()));
    }

    #[test]
    fn test_macro_body_matches_inline_overlay() {
        let catalog = FontCatalog::standard();
        let composer = SampleComposer::new(&catalog, &StandardPaperTable);
        let layout = Layout::from(StandardPaperTable::geometry(PaperSize::A4, Orientation::Landscape));
        let fonts = SampleFonts { arial: 0, courier: 2 };

        let mut defined = CommandWriter::new(Vec::new());
        defined.job_header("").unwrap();
        defined.macro_control(MACRO_ID, MacroAction::StartDef).unwrap();
        composer.overlay(&mut defined, &layout, &fonts).unwrap();
        defined.macro_control(MACRO_ID, MacroAction::StopDef).unwrap();
        assert_eq!(defined.macro_state(MACRO_ID), MacroState::Defined);

        let mut inline = CommandWriter::new(Vec::new());
        inline.job_header("").unwrap();
        inline
            .page_header(PaperSize::A4, PaperType::NotSet, Orientation::Landscape, Plex::Simplex)
            .unwrap();
        let mark = inline.get_ref().len();
        composer.overlay(&mut inline, &layout, &fonts).unwrap();

        assert_eq!(defined.macro_body(MACRO_ID), Some(&inline.get_ref()[mark..]));
    }

    #[test]
    fn test_job_leaves_writer_closed() {
        let catalog = FontCatalog::standard();
        let composer = SampleComposer::new(&catalog, &StandardPaperTable);
        let mut writer = CommandWriter::new(Vec::new());
        composer.generate_job(&mut writer, &SampleOptions::default()).unwrap();
        assert!(!writer.is_page_open());
    }
}
