use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable identifier of a figure within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureId(String);

impl FigureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FigureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FigureKind {
    /// A single outline (circle, star, arrow, ...)
    Geometric,
    /// Several parts drawn together (concentric shapes, pictures, mazes)
    Compound,
    /// Letters and digits drawn with the stroke font
    Glyph,
    /// A bitmap recolored to the stroke color
    Image,
}

/// How a figure is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderParams {
    /// A stencil registered in the shape catalog
    Shape { shape: String },
    /// Text drawn with the built-in stroke font
    Glyph { text: String },
    /// A bitmap file, thresholded and recolored at load time
    Image { path: PathBuf },
    /// Hand-drawn polylines in unit-box coordinates ([-1, 1] around the origin)
    Strokes { paths: Vec<Vec<[f64; 2]>> },
}

/// A reference figure. Descriptors are immutable; per-session state such as
/// the render offset lives in side tables keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub id: FigureId,
    pub kind: FigureKind,
    pub difficulty: Difficulty,
    pub render: RenderParams,
}

impl Figure {
    pub fn shape(id: &str, kind: FigureKind, difficulty: Difficulty) -> Self {
        Self {
            id: FigureId::new(id),
            kind,
            difficulty,
            render: RenderParams::Shape {
                shape: id.to_string(),
            },
        }
    }

    pub fn glyph(text: &str, difficulty: Difficulty) -> Self {
        Self {
            id: FigureId::new(format!("glyph-{text}")),
            kind: FigureKind::Glyph,
            difficulty,
            render: RenderParams::Glyph {
                text: text.to_string(),
            },
        }
    }

    /// Human readable label used in headers and summaries
    pub fn label(&self) -> String {
        match &self.render {
            RenderParams::Glyph { text } => format!("\"{text}\""),
            _ => self.id.to_string(),
        }
    }
}
