//! # Command Writer
//!
//! Stateful encoder that turns page-building calls into PCL / HP-GL/2 bytes
//! and enforces the ordering rules the printer relies on.
//!
//! ## State Machine
//!
//! ```text
//!                ESC % n B                          StartDef        StopDef
//!   ┌─────┐  ──────────────►  ┌────────┐    Undefined ──► Defining ──► Defined
//!   │ PCL │                   │ HP-GL/2│        ▲                         │
//!   └─────┘  ◄──────────────  └────────┘        │  StartDef        Delete │
//!                ESC % n A                     Deleted ◄───────────────────┘
//! ```
//!
//! - Mode transitions are single edges: entering HP-GL/2 from HP-GL/2 (or
//!   PCL from PCL) is rejected.
//! - Only one macro may be defined at a time. While a definition is open,
//!   everything written is captured into the macro body, and the job
//!   trailer, page framing and other macro actions are rejected.
//!   `job_header` is the exception: it discards the open definition, with a
//!   warning, as part of resetting the writer.
//! - A macro call runs with the print environment saved and restored by the
//!   device, so calling a macro leaves the tracked pattern, font and print
//!   direction unchanged.
//! - Drawing needs an open page (`page_header` .. `form_feed`) or an open
//!   macro definition.
//! - `job_header` resets every piece of state, so one writer can produce
//!   several jobs without carry-over.
//!
//! A rejected operation returns an error and writes nothing.
//!
//! ## Coordinates
//!
//! Positions are `i16` logical units, the device's native field width.
//! Derived positions (rectangle edges) use wrapping arithmetic.

use std::collections::BTreeMap;
use std::io::Write;

use tracing::{debug, warn};

use crate::error::PclError;
use crate::printer::paper::{PaperSize, PaperType};
use crate::protocol::commands::{self, UNITS_PER_INCH};
use crate::protocol::graphics::{self, Pattern, PatternType};
use crate::protocol::hpgl2::{self, CursorPosition, DirectionVector, Mode, PenPosition};
use crate::protocol::macros::{self, MacroAction};
use crate::protocol::page::{self, Orientation, Plex, Quadrant};
use crate::protocol::text;

/// Lifecycle of one macro ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroState {
    #[default]
    Undefined,
    Defining,
    Defined,
    Deleted,
}

/// Font most recently selected on the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSelection {
    pub symbol_set: Option<String>,
    pub mnemonic: String,
}

/// Print environment tracked across commands.
#[derive(Debug, Clone, Default, PartialEq)]
struct RenderState {
    pattern: Pattern,
    font: Option<FontSelection>,
    print_direction: Quadrant,
}

#[derive(Debug, Clone, Default)]
struct MacroRecord {
    state: MacroState,
    body: Vec<u8>,
}

#[derive(Debug, Clone)]
struct Definition {
    id: u16,
    saved: RenderState,
}

#[derive(Debug, Clone, Default)]
struct WriterState {
    mode: Mode,
    render: RenderState,
    page_open: bool,
    defining: Option<Definition>,
    macros: BTreeMap<u16, MacroRecord>,
}

/// Stateful PCL / HP-GL/2 encoder writing into a caller-owned sink.
///
/// ## Example
///
/// ```
/// use rotsample::writer::CommandWriter;
/// use rotsample::printer::{PaperSize, PaperType};
/// use rotsample::protocol::page::{Orientation, Plex};
///
/// let mut w = CommandWriter::new(Vec::new());
/// w.job_header("")?;
/// w.page_header(PaperSize::A4, PaperType::NotSet, Orientation::Portrait, Plex::Simplex)?;
/// w.text_rotated(600, 600, Default::default(), 90, true, "up")?;
/// w.form_feed()?;
/// w.job_trailer(false, 0)?;
///
/// let bytes = w.into_inner();
/// assert!(bytes.ends_with(b"\x1bE\x1b%-12345X"));
/// # Ok::<(), rotsample::PclError>(())
/// ```
pub struct CommandWriter<W: Write> {
    sink: W,
    state: WriterState,
}

impl<W: Write> CommandWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: WriterState::default(),
        }
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn pattern(&self) -> Pattern {
        self.state.render.pattern
    }

    pub fn current_font(&self) -> Option<&FontSelection> {
        self.state.render.font.as_ref()
    }

    pub fn current_print_direction(&self) -> Quadrant {
        self.state.render.print_direction
    }

    pub fn is_page_open(&self) -> bool {
        self.state.page_open
    }

    pub fn macro_state(&self, id: u16) -> MacroState {
        self.state
            .macros
            .get(&id)
            .map(|r| r.state)
            .unwrap_or_default()
    }

    /// Bytes captured between StartDef and StopDef, for a Defined macro.
    pub fn macro_body(&self, id: u16) -> Option<&[u8]> {
        self.state
            .macros
            .get(&id)
            .filter(|r| r.state == MacroState::Defined)
            .map(|r| r.body.as_slice())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    // ========================================================================
    // JOB AND PAGE FRAMING
    // ========================================================================

    /// Start a job: UEL, optional PJL comment, enter PCL, reset, and unit of
    /// measure. Resets all writer state to defaults.
    pub fn job_header(&mut self, name: &str) -> Result<(), PclError> {
        if let Some(def) = &self.state.defining {
            warn!(id = def.id, "job header discards an unterminated macro definition");
        }
        self.state = WriterState::default();

        let mut cmd = commands::uel();
        if !name.is_empty() {
            cmd.extend(commands::pjl_comment(name));
        }
        cmd.extend(commands::pjl_enter_pcl());
        cmd.extend(commands::reset());
        cmd.extend(commands::unit_of_measure(UNITS_PER_INCH));

        debug!(name, "job header");
        self.emit(&cmd)
    }

    /// End a job. When `macro_backed`, the macro is deleted first so nothing
    /// stays resident on the device.
    pub fn job_trailer(&mut self, macro_backed: bool, macro_id: u16) -> Result<(), PclError> {
        self.require_no_definition("job trailer")?;
        self.require_mode("job trailer", Mode::Pcl)?;

        if macro_backed {
            self.macro_control(macro_id, MacroAction::Delete)?;
        }
        if self.state.page_open {
            warn!("job trailer with an open page; printer reset will eject it");
        }

        let mut cmd = commands::reset();
        cmd.extend(commands::uel());
        self.emit(&cmd)?;

        debug!(macro_backed, macro_id, "job trailer");
        self.state = WriterState::default();
        Ok(())
    }

    /// Declare media and geometry for the next page and open it.
    pub fn page_header(
        &mut self,
        paper_size: PaperSize,
        paper_type: PaperType,
        orientation: Orientation,
        plex: Plex,
    ) -> Result<(), PclError> {
        self.require_no_definition("page header")?;
        self.require_mode("page header", Mode::Pcl)?;

        let mut cmd = page::page_size(paper_size.pcl_id());
        if let Some(name) = paper_type.media_name() {
            cmd.extend(page::media_type(name));
        }
        cmd.extend(page::orientation(orientation));
        cmd.extend(page::plex(plex));
        cmd.extend(page::top_margin(0));
        self.emit(&cmd)?;

        debug!(?paper_size, ?orientation, ?plex, "page header");
        self.state.page_open = true;
        Ok(())
    }

    /// Eject the current page.
    pub fn form_feed(&mut self) -> Result<(), PclError> {
        self.require_no_definition("form feed")?;
        self.require_mode("form feed", Mode::Pcl)?;
        if !self.state.page_open {
            return Err(PclError::NoPage("form feed"));
        }

        self.emit(&commands::form_feed())?;
        self.state.page_open = false;
        Ok(())
    }

    // ========================================================================
    // MACROS
    // ========================================================================

    /// Drive the macro state machine for `id`.
    ///
    /// | Action | Required state | Next state |
    /// |--------|----------------|------------|
    /// | StartDef | Undefined, Deleted | Defining |
    /// | StopDef | Defining | Defined |
    /// | Call | Defined | Defined |
    /// | Delete | Defined | Deleted |
    ///
    /// Call replays the body at the caller's current cursor and pattern; the
    /// body carries no position reset of its own. The device saves the print
    /// environment before the body and restores it afterwards, so the
    /// tracked render state is left as it was.
    pub fn macro_control(&mut self, id: u16, action: MacroAction) -> Result<(), PclError> {
        self.require_mode("macro control", Mode::Pcl)?;
        let current = self.macro_state(id);
        let transition = PclError::MacroTransition {
            id,
            action,
            state: current,
        };

        match action {
            MacroAction::StartDef => {
                self.require_no_definition("macro definition start")?;
                if !matches!(current, MacroState::Undefined | MacroState::Deleted) {
                    return Err(transition);
                }

                self.emit(&macros::macro_control(id, action))?;
                let record = self.state.macros.entry(id).or_default();
                record.state = MacroState::Defining;
                record.body.clear();
                self.state.defining = Some(Definition {
                    id,
                    saved: self.state.render.clone(),
                });
            }
            MacroAction::StopDef => {
                match &self.state.defining {
                    Some(def) if def.id == id => {}
                    _ => return Err(transition),
                }
                // Written past `emit` so the stop command stays out of the body
                self.sink.write_all(&macros::macro_control(id, action))?;
                if let Some(def) = self.state.defining.take() {
                    self.state.render = def.saved;
                }
                if let Some(record) = self.state.macros.get_mut(&id) {
                    record.state = MacroState::Defined;
                }
            }
            MacroAction::Call => {
                self.require_no_definition("macro call")?;
                if current != MacroState::Defined {
                    return Err(transition);
                }
                self.require_drawable("macro call")?;

                self.emit(&macros::macro_control(id, action))?;
            }
            MacroAction::Delete => {
                self.require_no_definition("macro delete")?;
                if current != MacroState::Defined {
                    return Err(transition);
                }

                self.emit(&macros::macro_control(id, action))?;
                if let Some(record) = self.state.macros.get_mut(&id) {
                    record.state = MacroState::Deleted;
                    record.body.clear();
                }
            }
        }

        debug!(id, ?action, "macro control");
        Ok(())
    }

    // ========================================================================
    // PCL DRAWING
    // ========================================================================

    /// Select the current fill pattern. Persists until changed.
    pub fn pattern_set(&mut self, kind: PatternType, level: u16) -> Result<(), PclError> {
        self.require_mode("pattern set", Mode::Pcl)?;
        let cmd = graphics::pattern_select(kind, level).ok_or_else(|| {
            PclError::InvalidCommand(format!("pattern level {} out of range for {:?}", level, kind))
        })?;

        self.emit(&cmd)?;
        self.state.render.pattern = Pattern { kind, level };
        Ok(())
    }

    /// Outlined rectangle drawn with the current pattern.
    ///
    /// With `clip`, the outline lies inside the `width` x `height` box;
    /// without it, the right and bottom edges are drawn just outside, so
    /// the outline spans `width + pen_width` by `height + pen_width`.
    /// With `fill`, the interior is filled with the current pattern before
    /// the outline is drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_outline(
        &mut self,
        x: i16,
        y: i16,
        height: i16,
        width: i16,
        pen_width: i16,
        fill: bool,
        clip: bool,
    ) -> Result<(), PclError> {
        self.require_mode("rectangle", Mode::Pcl)?;
        self.require_drawable("rectangle")?;

        let pen = pen_width;
        let (right_x, bottom_y, horizontal, vertical) = if clip {
            (
                x.wrapping_add(width).wrapping_sub(pen),
                y.wrapping_add(height).wrapping_sub(pen),
                width,
                height,
            )
        } else {
            (
                x.wrapping_add(width),
                y.wrapping_add(height),
                width.wrapping_add(pen),
                height.wrapping_add(pen),
            )
        };

        let mut cmd = Vec::new();
        if fill {
            let inset = if clip { pen.wrapping_mul(2) } else { pen };
            cmd.extend(graphics::rule(
                x.wrapping_add(pen),
                y.wrapping_add(pen),
                width.wrapping_sub(inset),
                height.wrapping_sub(inset),
            ));
        }
        cmd.extend(graphics::rule(x, y, horizontal, pen));
        cmd.extend(graphics::rule(x, y, pen, vertical));
        cmd.extend(graphics::rule(right_x, y, pen, vertical));
        cmd.extend(graphics::rule(x, bottom_y, horizontal, pen));
        self.emit(&cmd)
    }

    /// Select a font for subsequent text, optionally setting the symbol set
    /// first.
    pub fn font(
        &mut self,
        set_symbol_set: bool,
        symbol_set_id: &str,
        mnemonic: &str,
    ) -> Result<(), PclError> {
        self.require_mode("font", Mode::Pcl)?;

        let mut cmd = Vec::new();
        if set_symbol_set {
            cmd.extend(text::symbol_set(symbol_set_id));
        }
        cmd.extend(text::font_select(mnemonic));
        self.emit(&cmd)?;

        let symbol_set = if set_symbol_set {
            Some(symbol_set_id.to_string())
        } else {
            self.state.render.font.as_ref().and_then(|f| f.symbol_set.clone())
        };
        let selection = FontSelection {
            symbol_set,
            mnemonic: mnemonic.to_string(),
        };
        self.state.render.font = Some(selection);
        Ok(())
    }

    /// Place text at an absolute position.
    ///
    /// When `quadrant` differs from the current print direction, the text is
    /// bracketed by print-direction changes and the current direction is
    /// restored afterwards.
    pub fn text(&mut self, x: i16, y: i16, quadrant: Quadrant, s: &str) -> Result<(), PclError> {
        self.require_mode("text", Mode::Pcl)?;
        self.require_drawable("text")?;

        let base = self.state.render.print_direction;
        if quadrant == base {
            return self.emit(&text::positioned_text(x, y, s));
        }
        let mut cmd = commands::cursor_position(x, y);
        cmd.extend(page::print_direction(quadrant));
        cmd.extend(s.bytes());
        cmd.extend(page::print_direction(base));
        self.emit(&cmd)
    }

    /// Place rotated text at an absolute position.
    ///
    /// With `use_primitive`, rotation goes through the PCL print-direction
    /// command: `degrees` must be 0, 90, 180 or 270, and anything else is
    /// rejected. The position is taken in the `quadrant` direction, which is
    /// also the direction left in effect afterwards.
    ///
    /// Without it, the label is drawn through HP-GL/2 at any angle, with the
    /// pen placed at the PCL cursor and an ETX label terminator. The angle
    /// follows the HP-GL/2 user coordinate system in effect on the device.
    pub fn text_rotated(
        &mut self,
        x: i16,
        y: i16,
        quadrant: Quadrant,
        degrees: i16,
        use_primitive: bool,
        s: &str,
    ) -> Result<(), PclError> {
        let rotation = if use_primitive {
            Some(Quadrant::try_from(degrees)?)
        } else {
            None
        };
        self.require_mode("rotated text", Mode::Pcl)?;
        self.require_drawable("rotated text")?;

        let mut cmd = Vec::new();
        match rotation {
            Some(rotation) => {
                if quadrant != self.state.render.print_direction {
                    cmd.extend(page::print_direction(quadrant));
                }
                cmd.extend(commands::cursor_position(x, y));
                cmd.extend(page::print_direction(rotation));
                cmd.extend(s.bytes());
                cmd.extend(page::print_direction(quadrant));
            }
            None => {
                let direction = DirectionVector::from_degrees(degrees as f64);
                let mut label = s.to_string();
                label.push(commands::ETX as char);

                cmd.extend(commands::cursor_position(x, y));
                cmd.extend(hpgl2::enter(PenPosition::PclCursor));
                for (mnemonic, params) in [
                    ("DT", "\x03".to_string()),
                    ("DI", direction.to_string()),
                    ("LB", label),
                    ("DI", DirectionVector::HORIZONTAL.to_string()),
                ] {
                    cmd.extend(Self::instruction(mnemonic, &params, true)?);
                }
                cmd.extend(hpgl2::exit(CursorPosition::Previous));
            }
        }
        self.emit(&cmd)?;

        if use_primitive {
            self.set_print_direction(quadrant);
        }
        Ok(())
    }

    /// Set the baseline direction for subsequent orthogonal text.
    pub fn print_direction(&mut self, degrees: i16) -> Result<(), PclError> {
        let quadrant = Quadrant::try_from(degrees)?;
        self.require_mode("print direction", Mode::Pcl)?;

        self.emit(&page::print_direction(quadrant))?;
        self.set_print_direction(quadrant);
        Ok(())
    }

    /// Declare the logical-unit rectangle that clips and maps subsequent
    /// HP-GL/2 drawing.
    pub fn picture_frame(
        &mut self,
        x: i16,
        y: i16,
        height: i16,
        width: i16,
    ) -> Result<(), PclError> {
        self.require_mode("picture frame", Mode::Pcl)?;
        self.require_drawable("picture frame")?;
        self.emit(&page::picture_frame(x, y, height, width))
    }

    // ========================================================================
    // HP-GL/2
    // ========================================================================

    /// Switch from PCL to HP-GL/2. With `reset_pen`, `IN;` follows the
    /// switch and resets the plotter state.
    pub fn enter_vector_mode(&mut self, reset_pen: bool, pen: PenPosition) -> Result<(), PclError> {
        self.require_mode("enter HP-GL/2", Mode::Pcl)?;
        self.require_drawable("enter HP-GL/2")?;

        let mut cmd = hpgl2::enter(pen);
        if reset_pen {
            cmd.extend(Self::instruction("IN", "", true)?);
        }
        self.emit(&cmd)?;

        debug!(?pen, reset_pen, "entered HP-GL/2");
        self.state.mode = Mode::Hpgl2;
        Ok(())
    }

    /// Switch from HP-GL/2 back to PCL.
    pub fn enter_page_mode(&mut self, cursor: CursorPosition) -> Result<(), PclError> {
        self.require_mode("enter PCL", Mode::Hpgl2)?;

        self.emit(&hpgl2::exit(cursor))?;
        debug!(?cursor, "returned to PCL");
        self.state.mode = Mode::Pcl;
        Ok(())
    }

    /// Emit one HP-GL/2 instruction. Parameters are written verbatim.
    pub fn vector_command(
        &mut self,
        mnemonic: &str,
        params: &str,
        terminate: bool,
    ) -> Result<(), PclError> {
        self.require_mode("HP-GL/2 instruction", Mode::Hpgl2)?;
        let cmd = Self::instruction(mnemonic, params, terminate)?;
        self.emit(&cmd)
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn instruction(mnemonic: &str, params: &str, terminate: bool) -> Result<Vec<u8>, PclError> {
        hpgl2::instruction(mnemonic, params, terminate).ok_or_else(|| {
            PclError::InvalidCommand(format!("'{}' is not an HP-GL/2 mnemonic", mnemonic))
        })
    }

    /// Write to the sink, capturing into the open macro body if any.
    fn emit(&mut self, bytes: &[u8]) -> Result<(), PclError> {
        self.sink.write_all(bytes)?;
        if let Some(def) = &self.state.defining {
            if let Some(record) = self.state.macros.get_mut(&def.id) {
                record.body.extend_from_slice(bytes);
            }
        }
        Ok(())
    }

    fn set_print_direction(&mut self, quadrant: Quadrant) {
        self.state.render.print_direction = quadrant;
    }

    fn require_mode(&self, operation: &'static str, expected: Mode) -> Result<(), PclError> {
        if self.state.mode == expected {
            Ok(())
        } else {
            Err(PclError::WrongMode {
                operation,
                expected,
                actual: self.state.mode,
            })
        }
    }

    fn require_no_definition(&self, operation: &'static str) -> Result<(), PclError> {
        match &self.state.defining {
            Some(def) => Err(PclError::MacroDefinitionOpen {
                id: def.id,
                operation,
            }),
            None => Ok(()),
        }
    }

    fn require_drawable(&self, operation: &'static str) -> Result<(), PclError> {
        if self.state.page_open || self.state.defining.is_some() {
            Ok(())
        } else {
            Err(PclError::NoPage(operation))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
