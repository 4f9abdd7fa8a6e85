//! # Font Catalog
//!
//! Maps font names to PCL typeface numbers and produces the selection
//! strings both sub-languages need:
//!
//! - PCL: the body of `ESC ( s ... T` (e.g. `s1p36v0s0b16602T`)
//! - HP-GL/2: the parameter list of `SD` (e.g. `1,14,2,1,4,36,5,0,6,0,7,16602`)
//!
//! The catalog is an immutable value. Build it once with
//! [`FontCatalog::standard`] and pass it to whatever needs it.

use tracing::warn;

use crate::error::PclError;

/// Character spacing of a typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    Fixed,
    Proportional,
}

/// Style variant of a typeface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontVariant {
    #[default]
    Regular,
    Italic,
    Bold,
    BoldItalic,
}

impl FontVariant {
    /// PCL style / HP-GL/2 posture: 0 upright, 1 italic.
    pub fn style(self) -> u8 {
        match self {
            FontVariant::Regular | FontVariant::Bold => 0,
            FontVariant::Italic | FontVariant::BoldItalic => 1,
        }
    }

    /// PCL and HP-GL/2 stroke weight: 0 medium, 3 bold.
    pub fn weight(self) -> u8 {
        match self {
            FontVariant::Regular | FontVariant::Italic => 0,
            FontVariant::Bold | FontVariant::BoldItalic => 3,
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontEntry {
    pub name: &'static str,
    pub typeface: u16,
    pub spacing: Spacing,
}

/// HP-GL/2 symbol set number for ISO 8859-1 Latin 1 (`0N`).
pub const HPGL2_SYMSET_LATIN1: u16 = 14;

/// Immutable font catalog.
#[derive(Debug, Clone)]
pub struct FontCatalog {
    entries: Vec<FontEntry>,
    default_index: usize,
}

impl FontCatalog {
    /// The built-in catalog of common PCL 5 resident fonts. Courier is the
    /// default.
    pub fn standard() -> Self {
        let entries = vec![
            FontEntry { name: "Arial", typeface: 16602, spacing: Spacing::Proportional },
            FontEntry { name: "CG Times", typeface: 4101, spacing: Spacing::Proportional },
            FontEntry { name: "Courier", typeface: 4099, spacing: Spacing::Fixed },
            FontEntry { name: "Letter Gothic", typeface: 4102, spacing: Spacing::Fixed },
            FontEntry { name: "Times New Roman", typeface: 16901, spacing: Spacing::Proportional },
            FontEntry { name: "Univers", typeface: 4148, spacing: Spacing::Proportional },
        ];
        Self {
            entries,
            default_index: 2,
        }
    }

    pub fn entries(&self) -> &[FontEntry] {
        &self.entries
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Index of a font by name (case-insensitive).
    pub fn index_for_name(&self, name: &str) -> Result<usize, PclError> {
        self.entries
            .iter()
            .position(|e| e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PclError::FontNotFound(name.to_string()))
    }

    /// Index of a font by name, or the default index when it is missing.
    pub fn index_or_default(&self, name: &str) -> usize {
        self.index_for_name(name).unwrap_or_else(|e| {
            warn!(error = %e, fallback = self.entry(self.default_index).name, "using default font");
            self.default_index
        })
    }

    /// Entry at `index`; out-of-range indexes resolve to the default entry.
    pub fn entry(&self, index: usize) -> &FontEntry {
        self.entries
            .get(index)
            .unwrap_or(&self.entries[self.default_index])
    }

    /// # PCL Font Selection Mnemonic
    ///
    /// Body of the `ESC ( s ... T` sequence. `pitch` is only used for fixed
    /// fonts; pass `0.0` for the typeface default of `120 / point_size`
    /// characters per inch.
    ///
    /// ## Example
    ///
    /// ```
    /// use rotsample::printer::{FontCatalog, fonts::FontVariant};
    ///
    /// let catalog = FontCatalog::standard();
    /// let arial = catalog.index_for_name("Arial")?;
    /// let courier = catalog.index_for_name("Courier")?;
    ///
    /// assert_eq!(catalog.page_font_select(arial, FontVariant::Regular, 36.0, 0.0), "s1p36v0s0b16602T");
    /// assert_eq!(catalog.page_font_select(courier, FontVariant::Bold, 15.0, 0.0), "s0p8h15v0s3b4099T");
    /// # Ok::<(), rotsample::PclError>(())
    /// ```
    pub fn page_font_select(
        &self,
        index: usize,
        variant: FontVariant,
        point_size: f64,
        pitch: f64,
    ) -> String {
        let entry = self.entry(index);
        let spacing = match entry.spacing {
            Spacing::Proportional => "1p".to_string(),
            Spacing::Fixed => format!("0p{}h", decimal(effective_pitch(point_size, pitch))),
        };
        format!(
            "s{}{}v{}s{}b{}T",
            spacing,
            decimal(point_size),
            variant.style(),
            variant.weight(),
            entry.typeface
        )
    }

    /// # HP-GL/2 Font Definition
    ///
    /// Parameter list for the `SD` (standard font definition) instruction:
    ///
    /// | Kind | Meaning |
    /// |------|---------|
    /// | 1 | symbol set |
    /// | 2 | spacing (0 fixed, 1 proportional) |
    /// | 3 | pitch (fixed fonts only) |
    /// | 4 | height in points |
    /// | 5 | posture |
    /// | 6 | stroke weight |
    /// | 7 | typeface |
    pub fn vector_font_def(
        &self,
        index: usize,
        variant: FontVariant,
        symbol_set: u16,
        point_size: f64,
        pitch: f64,
    ) -> String {
        let entry = self.entry(index);
        let spacing = match entry.spacing {
            Spacing::Proportional => "2,1".to_string(),
            Spacing::Fixed => format!("2,0,3,{}", decimal(effective_pitch(point_size, pitch))),
        };
        format!(
            "1,{},{},4,{},5,{},6,{},7,{}",
            symbol_set,
            spacing,
            decimal(point_size),
            variant.style(),
            variant.weight(),
            entry.typeface
        )
    }
}

fn effective_pitch(point_size: f64, pitch: f64) -> f64 {
    if pitch > 0.0 {
        pitch
    } else {
        120.0 / point_size
    }
}

/// At most two decimals, trailing zeros dropped: 36 -> "36", 3.333 -> "3.33".
fn decimal(value: f64) -> String {
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_for_name() {
        let catalog = FontCatalog::standard();
        assert_eq!(catalog.index_for_name("Arial").unwrap(), 0);
        assert_eq!(catalog.index_for_name("courier").unwrap(), 2);
    }

    #[test]
    fn test_index_for_name_not_found() {
        let catalog = FontCatalog::standard();
        assert!(matches!(
            catalog.index_for_name("Comic Sans"),
            Err(PclError::FontNotFound(name)) if name == "Comic Sans"
        ));
        assert_eq!(catalog.index_or_default("Comic Sans"), catalog.default_index());
        assert_eq!(catalog.entry(catalog.default_index()).name, "Courier");
    }

    #[test]
    fn test_entry_out_of_range_uses_default() {
        let catalog = FontCatalog::standard();
        assert_eq!(catalog.entry(99).name, "Courier");
    }

    #[test]
    fn test_page_font_select_variants() {
        let catalog = FontCatalog::standard();
        let arial = catalog.index_for_name("Arial").unwrap();
        assert_eq!(catalog.page_font_select(arial, FontVariant::Italic, 10.0, 0.0), "s1p10v1s0b16602T");
        assert_eq!(catalog.page_font_select(arial, FontVariant::BoldItalic, 10.5, 0.0), "s1p10.5v1s3b16602T");
    }

    #[test]
    fn test_page_font_select_fixed_pitch() {
        let catalog = FontCatalog::standard();
        let courier = catalog.index_for_name("Courier").unwrap();
        assert_eq!(catalog.page_font_select(courier, FontVariant::Regular, 12.0, 0.0), "s0p10h12v0s0b4099T");
        // Explicit pitch wins over the derived default
        assert_eq!(catalog.page_font_select(courier, FontVariant::Regular, 12.0, 16.67), "s0p16.67h12v0s0b4099T");
    }

    #[test]
    fn test_vector_font_def() {
        let catalog = FontCatalog::standard();
        let arial = catalog.index_for_name("Arial").unwrap();
        let courier = catalog.index_for_name("Courier").unwrap();
        assert_eq!(
            catalog.vector_font_def(arial, FontVariant::Regular, HPGL2_SYMSET_LATIN1, 36.0, 0.0),
            "1,14,2,1,4,36,5,0,6,0,7,16602"
        );
        assert_eq!(
            catalog.vector_font_def(courier, FontVariant::Bold, HPGL2_SYMSET_LATIN1, 36.0, 0.0),
            "1,14,2,0,3,3.33,4,36,5,0,6,3,7,4099"
        );
    }

    #[test]
    fn test_decimal() {
        assert_eq!(decimal(36.0), "36");
        assert_eq!(decimal(8.0), "8");
        assert_eq!(decimal(10.5), "10.5");
        assert_eq!(decimal(120.0 / 36.0), "3.33");
    }
}
