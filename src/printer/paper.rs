//! # Paper Geometry
//!
//! This module defines the paper sizes and media types a job can request,
//! and resolves them to logical page geometry.
//!
//! ## Supported Paper Sizes
//!
//! | Size | PCL id | Dimensions | Logical offset (portrait / landscape) |
//! |------|--------|------------|---------------------------------------|
//! | Executive | 1 | 7.25 x 10.5 in | 1/4 in / 0.2 in |
//! | Letter | 2 | 8.5 x 11 in | 1/4 in / 0.2 in |
//! | Legal | 3 | 8.5 x 14 in | 1/4 in / 0.2 in |
//! | Ledger | 6 | 11 x 17 in | 1/4 in / 0.2 in |
//! | A5 | 25 | 148 x 210 mm | 142 / 118 units |
//! | A4 | 26 | 210 x 297 mm | 142 / 118 units |
//! | A3 | 27 | 297 x 420 mm | 142 / 118 units |
//! | JIS B5 | 45 | 182 x 257 mm | 142 / 118 units |
//!
//! ## Logical Page
//!
//! The PCL logical page spans the full paper length but is inset from the
//! left and right paper edges by the logical offset:
//!
//! ```text
//! ├─ offset ─┼──────── logical width ────────┼─ offset ─┤
//! │          │ X = 0                         │          │
//! ├──────────────────── paper width ─────────────────────┤
//! ```
//!
//! All values are in session units (600 per inch).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::protocol::page::{Aspect, Orientation};

/// Paper size with a PCL page-size id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    Executive,
    #[default]
    Letter,
    Legal,
    Ledger,
    A5,
    A4,
    A3,
    JisB5,
}

/// Static dimensions of one paper size, short edge first.
#[derive(Debug, Clone, Copy)]
struct PaperSpec {
    name: &'static str,
    pcl_id: u16,
    short_edge: u16,
    long_edge: u16,
    offset_portrait: u16,
    offset_landscape: u16,
}

impl PaperSize {
    pub const ALL: [PaperSize; 8] = [
        PaperSize::Executive,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Ledger,
        PaperSize::A5,
        PaperSize::A4,
        PaperSize::A3,
        PaperSize::JisB5,
    ];

    fn spec(self) -> PaperSpec {
        match self {
            PaperSize::Executive => PaperSpec {
                name: "Executive",
                pcl_id: 1,
                short_edge: 4350,
                long_edge: 6300,
                offset_portrait: 150,
                offset_landscape: 120,
            },
            PaperSize::Letter => PaperSpec {
                name: "Letter",
                pcl_id: 2,
                short_edge: 5100,
                long_edge: 6600,
                offset_portrait: 150,
                offset_landscape: 120,
            },
            PaperSize::Legal => PaperSpec {
                name: "Legal",
                pcl_id: 3,
                short_edge: 5100,
                long_edge: 8400,
                offset_portrait: 150,
                offset_landscape: 120,
            },
            PaperSize::Ledger => PaperSpec {
                name: "Ledger",
                pcl_id: 6,
                short_edge: 6600,
                long_edge: 10200,
                offset_portrait: 150,
                offset_landscape: 120,
            },
            PaperSize::A5 => PaperSpec {
                name: "A5",
                pcl_id: 25,
                short_edge: 3496,
                long_edge: 4961,
                offset_portrait: 142,
                offset_landscape: 118,
            },
            PaperSize::A4 => PaperSpec {
                name: "A4",
                pcl_id: 26,
                short_edge: 4961,
                long_edge: 7016,
                offset_portrait: 142,
                offset_landscape: 118,
            },
            PaperSize::A3 => PaperSpec {
                name: "A3",
                pcl_id: 27,
                short_edge: 7016,
                long_edge: 9921,
                offset_portrait: 142,
                offset_landscape: 118,
            },
            PaperSize::JisB5 => PaperSpec {
                name: "JIS B5",
                pcl_id: 45,
                short_edge: 4299,
                long_edge: 6071,
                offset_portrait: 142,
                offset_landscape: 118,
            },
        }
    }

    /// PCL page-size id (`ESC & l # A`).
    pub fn pcl_id(self) -> u16 {
        self.spec().pcl_id
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Look up a paper size by its PCL page-size id.
    pub fn from_pcl_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.pcl_id() == id)
    }

    /// Parse a paper size name (CLI args, config files).
    ///
    /// Accepts the display name in any case (`"Letter"`, `"a4"`, `"jis-b5"`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let wanted = s.to_lowercase().replace(['-', '_', ' '], "");
        Self::ALL
            .into_iter()
            .find(|p| p.name().to_lowercase().replace(' ', "") == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown paper size '{}'. Use one of: {}",
                    s,
                    Self::ALL.map(|p| p.name()).join(", ")
                )
            })
    }
}

/// Media type requested in the page header (`ESC & n # W d <name>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperType {
    /// No media type command is sent
    #[default]
    NotSet,
    Plain,
    Preprinted,
    Letterhead,
    Transparency,
    Bond,
    Recycled,
    Labels,
    Cardstock,
}

impl PaperType {
    pub const ALL: [PaperType; 9] = [
        PaperType::NotSet,
        PaperType::Plain,
        PaperType::Preprinted,
        PaperType::Letterhead,
        PaperType::Transparency,
        PaperType::Bond,
        PaperType::Recycled,
        PaperType::Labels,
        PaperType::Cardstock,
    ];

    /// Media name as the printer expects it, or `None` for [`PaperType::NotSet`].
    pub fn media_name(self) -> Option<&'static str> {
        match self {
            PaperType::NotSet => None,
            PaperType::Plain => Some("Plain"),
            PaperType::Preprinted => Some("Preprinted"),
            PaperType::Letterhead => Some("Letterhead"),
            PaperType::Transparency => Some("Transparency"),
            PaperType::Bond => Some("Bond"),
            PaperType::Recycled => Some("Recycled"),
            PaperType::Labels => Some("Labels"),
            PaperType::Cardstock => Some("Card Stock"),
        }
    }

    /// Parse a media type name (CLI args, config files).
    pub fn parse(s: &str) -> Result<Self, String> {
        let wanted = s.to_lowercase().replace(['-', '_', ' '], "");
        if wanted == "notset" || wanted == "none" {
            return Ok(PaperType::NotSet);
        }
        Self::ALL
            .into_iter()
            .find(|t| {
                t.media_name()
                    .is_some_and(|n| n.to_lowercase().replace(' ', "") == wanted)
            })
            .ok_or_else(|| format!("Unknown paper type '{}'", s))
    }
}

/// Resolved geometry of one logical page, in session units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageGeometry {
    pub logical_width: u16,
    pub logical_height: u16,
    pub paper_width: u16,
    pub paper_height: u16,
    pub logical_x_offset: u16,
}

/// Source of page geometry for a paper size and orientation.
pub trait GeometryProvider {
    /// Resolve geometry for a PCL page-size id.
    ///
    /// Unknown ids resolve to a documented fallback instead of failing.
    fn resolve(&self, paper_size_id: u16, orientation: Orientation) -> PageGeometry;
}

/// Built-in geometry tables; unknown ids fall back to Letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPaperTable;

impl StandardPaperTable {
    pub const FALLBACK: PaperSize = PaperSize::Letter;

    /// Geometry for a known paper size.
    pub fn geometry(paper: PaperSize, orientation: Orientation) -> PageGeometry {
        let spec = paper.spec();
        let (paper_width, paper_height, logical_x_offset) = match orientation.aspect() {
            Aspect::Portrait => (spec.short_edge, spec.long_edge, spec.offset_portrait),
            Aspect::Landscape => (spec.long_edge, spec.short_edge, spec.offset_landscape),
        };

        PageGeometry {
            logical_width: paper_width - 2 * logical_x_offset,
            logical_height: paper_height,
            paper_width,
            paper_height,
            logical_x_offset,
        }
    }
}

impl GeometryProvider for StandardPaperTable {
    fn resolve(&self, paper_size_id: u16, orientation: Orientation) -> PageGeometry {
        let paper = PaperSize::from_pcl_id(paper_size_id).unwrap_or_else(|| {
            warn!(
                paper_size_id,
                fallback = Self::FALLBACK.name(),
                "unknown paper size id, using fallback"
            );
            Self::FALLBACK
        });
        Self::geometry(paper, orientation)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_portrait() {
        let g = StandardPaperTable.resolve(2, Orientation::Portrait);
        assert_eq!(
            g,
            PageGeometry {
                logical_width: 4800,
                logical_height: 6600,
                paper_width: 5100,
                paper_height: 6600,
                logical_x_offset: 150,
            }
        );
    }

    #[test]
    fn test_a4_landscape() {
        let g = StandardPaperTable.resolve(26, Orientation::Landscape);
        assert_eq!(g.paper_width, 7016);
        assert_eq!(g.paper_height, 4961);
        assert_eq!(g.logical_x_offset, 118);
        assert_eq!(g.logical_width, 7016 - 236);
    }

    #[test]
    fn test_geometry_consistent_for_all_pairs() {
        for paper in PaperSize::ALL {
            for orientation in Orientation::ALL {
                let g = StandardPaperTable.resolve(paper.pcl_id(), orientation);
                assert_eq!(
                    g.logical_width + 2 * g.logical_x_offset,
                    g.paper_width,
                    "{:?} {:?}",
                    paper,
                    orientation
                );
                assert_eq!(g.logical_height, g.paper_height);
                match orientation.aspect() {
                    Aspect::Portrait => assert!(g.paper_width < g.paper_height),
                    Aspect::Landscape => assert!(g.paper_width > g.paper_height),
                }
            }
        }
    }

    #[test]
    fn test_reverse_orientation_matches_base() {
        for paper in PaperSize::ALL {
            assert_eq!(
                StandardPaperTable::geometry(paper, Orientation::Portrait),
                StandardPaperTable::geometry(paper, Orientation::ReversePortrait)
            );
            assert_eq!(
                StandardPaperTable::geometry(paper, Orientation::Landscape),
                StandardPaperTable::geometry(paper, Orientation::ReverseLandscape)
            );
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_letter() {
        assert_eq!(
            StandardPaperTable.resolve(999, Orientation::Portrait),
            StandardPaperTable::geometry(PaperSize::Letter, Orientation::Portrait)
        );
    }

    #[test]
    fn test_pcl_ids_unique() {
        for a in PaperSize::ALL {
            assert_eq!(PaperSize::from_pcl_id(a.pcl_id()), Some(a));
        }
    }

    #[test]
    fn test_parse_paper_size() {
        assert_eq!(PaperSize::parse("letter"), Ok(PaperSize::Letter));
        assert_eq!(PaperSize::parse("A4"), Ok(PaperSize::A4));
        assert_eq!(PaperSize::parse("jis-b5"), Ok(PaperSize::JisB5));
        assert!(PaperSize::parse("tabloid").is_err());
    }

    #[test]
    fn test_parse_paper_type() {
        assert_eq!(PaperType::parse("plain"), Ok(PaperType::Plain));
        assert_eq!(PaperType::parse("card-stock"), Ok(PaperType::Cardstock));
        assert_eq!(PaperType::parse("none"), Ok(PaperType::NotSet));
        assert!(PaperType::parse("papyrus").is_err());
    }
}
