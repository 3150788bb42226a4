//! Single-stroke vector font for letter and digit figures.
//!
//! Each glyph is SVG path data on a 6 x 10 grid with the origin at the top
//! left. Text is laid out on a fixed advance and scaled so that the cap
//! height equals twice the figure size, which makes a one-character glyph
//! occupy the same box as the other stencils.

use kurbo::{Affine, BezPath, Point};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const GLYPH_WIDTH: f64 = 6.0;
pub const GLYPH_HEIGHT: f64 = 10.0;
const ADVANCE: f64 = 8.0;

const GLYPHS: &[(char, &str)] = &[
    ('0', "M3 0 C0.5 0 0.5 10 3 10 C5.5 10 5.5 0 3 0 Z M4.5 2 L1.5 8"),
    ('1', "M1 2 L3 0 L3 10 M1 10 L5 10"),
    ('2', "M0.5 2.5 C0.5 -0.5 5.5 -0.5 5.5 2.5 C5.5 5 0 7 0 10 L6 10"),
    (
        '3',
        "M0.5 1 C2 -0.5 5.5 0 5.5 2.5 C5.5 4.5 3.5 5 2 5 C4 5 6 5.5 6 7.5 C6 10.5 1.5 10.5 0 9",
    ),
    ('4', "M4.5 10 L4.5 0 L0 7 L6 7"),
    ('5', "M5.5 0 L0.5 0 L0 4.5 C2 3.5 6 3.5 6 7 C6 10.5 1.5 10.5 0 9"),
    ('6', "M5 0.5 C2 -0.5 0 2 0 6.5 C0 10.5 6 10.5 6 7 C6 4 1 3.5 0 6.5"),
    ('7', "M0 0 L6 0 L2 10"),
    ('8', "M3 5 C0 5 0.5 0 3 0 C5.5 0 6 5 3 5 C-0.5 5 0 10 3 10 C6 10 6.5 5 3 5 Z"),
    ('9', "M6 3.5 C5 6.5 0 6 0 3 C0 -0.5 6 -0.5 6 3.5 C6 8 4 10.5 1 9.5"),
    ('A', "M0 10 L3 0 L6 10 M1 6.5 L5 6.5"),
    ('B', "M0 0 L0 10 L3.5 10 C6.5 10 6.5 5 3.5 5 L0 5 M0 0 L3 0 C6 0 6 5 3 5"),
    ('C', "M6 1.5 C4.5 -0.5 0 -0.5 0 5 C0 10.5 4.5 10.5 6 8.5"),
    ('D', "M0 0 L0 10 L2.5 10 C7 10 7 0 2.5 0 Z"),
    ('E', "M6 0 L0 0 L0 10 L6 10 M0 5 L4.5 5"),
    ('F', "M6 0 L0 0 L0 10 M0 5 L4.5 5"),
    ('G', "M6 1.5 C4.5 -0.5 0 -0.5 0 5 C0 10.5 6 10.5 6 6 L3.5 6"),
    ('H', "M0 0 L0 10 M6 0 L6 10 M0 5 L6 5"),
    ('I', "M1.5 0 L4.5 0 M3 0 L3 10 M1.5 10 L4.5 10"),
    ('J', "M6 0 L6 7 C6 10.5 0.5 10.5 0 7.5"),
    ('K', "M0 0 L0 10 M6 0 L0 6 M2 4 L6 10"),
    ('L', "M0 0 L0 10 L6 10"),
    ('M', "M0 10 L0 0 L3 6 L6 0 L6 10"),
    ('N', "M0 10 L0 0 L6 10 L6 0"),
    ('O', "M3 0 C-1 0 -1 10 3 10 C7 10 7 0 3 0 Z"),
    ('P', "M0 10 L0 0 L3.5 0 C6.5 0 6.5 5.5 3.5 5.5 L0 5.5"),
    ('Q', "M3 0 C-1 0 -1 10 3 10 C7 10 7 0 3 0 Z M3.5 7 L6 10"),
    ('R', "M0 10 L0 0 L3.5 0 C6.5 0 6.5 5.5 3.5 5.5 L0 5.5 M3 5.5 L6 10"),
    (
        'S',
        "M5.5 1.5 C4 -0.5 0.5 -0.5 0.5 2.5 C0.5 5 5.5 5 5.5 7.5 C5.5 10.5 1.5 10.5 0 8.5",
    ),
    ('T', "M0 0 L6 0 M3 0 L3 10"),
    ('U', "M0 0 L0 7 C0 10.5 6 10.5 6 7 L6 0"),
    ('V', "M0 0 L3 10 L6 0"),
    ('W', "M0 0 L1.5 10 L3 4 L4.5 10 L6 0"),
    ('X', "M0 0 L6 10 M6 0 L0 10"),
    ('Y', "M0 0 L3 5 L6 0 M3 5 L3 10"),
    ('Z', "M0 0 L6 0 L0 10 L6 10"),
];

fn font() -> &'static HashMap<char, BezPath> {
    static FONT: OnceLock<HashMap<char, BezPath>> = OnceLock::new();
    FONT.get_or_init(|| {
        GLYPHS
            .iter()
            .filter_map(|&(c, data)| match BezPath::from_svg(data) {
                Ok(path) => Some((c, path)),
                Err(e) => {
                    tracing::warn!(glyph = %c, error = %e, "invalid glyph outline");
                    None
                }
            })
            .collect()
    })
}

/// Outline of one character on the font grid, if the font has it
pub fn glyph(c: char) -> Option<&'static BezPath> {
    font().get(&c.to_ascii_uppercase())
}

/// Lay out `text` centered on `origin`, cap height `2 * size`.
/// Characters missing from the font keep their advance but draw nothing.
pub fn layout(text: &str, origin: Point, size: f64) -> BezPath {
    let count = text.chars().count();
    let mut out = BezPath::new();
    if count == 0 {
        return out;
    }

    let scale = 2.0 * size / GLYPH_HEIGHT;
    let width = (count as f64 - 1.0) * ADVANCE + GLYPH_WIDTH;
    let left = origin.x - width * scale / 2.0;
    let top = origin.y - size;

    for (i, c) in text.chars().enumerate() {
        let Some(outline) = glyph(c) else {
            continue;
        };
        let placement =
            Affine::translate((left + i as f64 * ADVANCE * scale, top)) * Affine::scale(scale);
        out.extend((placement * outline.clone()).elements().iter().copied());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    #[test]
    fn test_font_is_complete() {
        for c in ('0'..='9').chain('A'..='Z') {
            assert!(glyph(c).is_some(), "missing glyph {c}");
        }
        assert_eq!(font().len(), GLYPHS.len());
    }

    #[test]
    fn test_glyphs_stay_on_grid() {
        for (c, path) in font() {
            let b = path.bounding_box();
            assert!(
                b.x0 >= -1e-6 && b.x1 <= GLYPH_WIDTH + 1e-6,
                "{c} x {b:?}"
            );
            assert!(
                b.y0 >= -1e-6 && b.y1 <= GLYPH_HEIGHT + 1e-6,
                "{c} y {b:?}"
            );
        }
    }

    #[test]
    fn test_lowercase_maps_to_uppercase() {
        assert_eq!(glyph('a'), glyph('A'));
        assert!(glyph('?').is_none());
    }

    #[test]
    fn test_single_glyph_box() {
        let b = layout("H", Point::new(540.0, 405.0), 180.0).bounding_box();

        assert!((b.y0 - 225.0).abs() < 1e-9);
        assert!((b.y1 - 585.0).abs() < 1e-9);
        assert!((b.center().x - 540.0).abs() < 1e-9);
        assert!((b.width() - 216.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_is_centered() {
        let b = layout("HH", Point::ORIGIN, 10.0).bounding_box();

        // two advances of 8 minus the trailing 2 of spacing, at scale 2
        assert!((b.width() - 28.0).abs() < 1e-9);
        assert!(b.center().x.abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_unknown_text() {
        assert!(layout("", Point::ORIGIN, 10.0).elements().is_empty());
        assert!(layout("??", Point::ORIGIN, 10.0).elements().is_empty());
    }
}
