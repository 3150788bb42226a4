//! Replays a [`DisplayList`] onto a ratatui Braille canvas.

use crate::render::{DisplayList, DrawCommand, StrokeStyle, Surface};
use image::RgbaImage;
use itertools::Itertools;
use kurbo::{BezPath, PathEl, Point, Rect as KRect};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Line, Points};
use ratatui::widgets::Widget;

/// Flattening tolerance in surface units. A Braille dot covers several.
const FLATTEN_TOLERANCE: f64 = 0.5;
/// Upper bound on sampled pixels per side when painting a bitmap
const BITMAP_SAMPLES: u32 = 160;

/// Break a path into polylines, one per subpath. Closed subpaths end on
/// their starting point.
pub fn polylines(path: &BezPath, tolerance: f64) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    kurbo::flatten(path, tolerance, |el| match el {
        PathEl::MoveTo(p) => lines.push(vec![p]),
        PathEl::LineTo(p) => match lines.last_mut() {
            Some(line) => line.push(p),
            None => lines.push(vec![p]),
        },
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut() {
                if let Some(&start) = line.first() {
                    line.push(start);
                }
            }
        }
        // flatten only yields lines
        _ => {}
    });
    lines.retain(|line| line.len() > 1);
    lines
}

/// Split a polyline into the "on" pieces of an `[on, off]` dash pattern.
/// The pattern carries across vertices.
pub fn dash(points: &[Point], pattern: [f64; 2]) -> Vec<(Point, Point)> {
    let [on, off] = pattern;
    if on <= 0.0 || off < 0.0 {
        return points.iter().copied().tuple_windows().collect();
    }
    let mut pieces = Vec::new();
    let mut drawing = true;
    let mut left = on;
    for (a, b) in points.iter().copied().tuple_windows() {
        let length = a.distance(b);
        let mut t = 0.0;
        while length - t > 1e-9 {
            let step = left.min(length - t);
            let from = a.lerp(b, t / length);
            let to = a.lerp(b, (t + step) / length);
            if drawing {
                pieces.push((from, to));
            }
            t += step;
            left -= step;
            if left <= 1e-9 {
                drawing = !drawing;
                left = if drawing { on } else { off };
            }
        }
    }
    pieces
}

/// Dots of a bitmap drawn into `dest`, sampled on a coarse grid
/// Sample the opaque pixels of `image` into surface points inside `dest`.
/// A dash pattern drops the samples falling in the "off" part of diagonal
/// bands, so a dashed reference reads as broken like a dashed outline.
pub fn bitmap_points(
    image: &RgbaImage,
    dest: KRect,
    dash: Option<[f64; 2]>,
) -> (Vec<(f64, f64)>, Option<Color>) {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return (Vec::new(), None);
    }
    let step = (w.max(h) / BITMAP_SAMPLES).max(1);
    let mut color = None;
    let mut coords = Vec::new();
    for y in (0..h).step_by(step as usize) {
        for x in (0..w).step_by(step as usize) {
            let px = image.get_pixel(x, y);
            if px[3] == 0 {
                continue;
            }
            color.get_or_insert(Color::Rgb(px[0], px[1], px[2]));
            let at = (
                dest.x0 + (x as f64 + 0.5) / w as f64 * dest.width(),
                dest.y0 + (y as f64 + 0.5) / h as f64 * dest.height(),
            );
            if let Some([on, off]) = dash {
                if on > 0.0 && off > 0.0 && (at.0 + at.1).rem_euclid(on + off) >= on {
                    continue;
                }
            }
            coords.push(at);
        }
    }
    (coords, color)
}

enum Mark {
    Segment(Point, Point, Color),
    Ring(Point, f64, Color),
    Dots(Vec<(f64, f64)>, Color),
}

fn stroke_marks(path: &BezPath, style: &StrokeStyle, marks: &mut Vec<Mark>) {
    let color = Color::from(style.color);
    for line in polylines(path, FLATTEN_TOLERANCE) {
        match style.dash {
            Some(pattern) => marks.extend(
                dash(&line, pattern)
                    .into_iter()
                    .map(|(a, b)| Mark::Segment(a, b, color)),
            ),
            None => marks.extend(
                line.iter()
                    .copied()
                    .tuple_windows()
                    .map(|(a, b)| Mark::Segment(a, b, color)),
            ),
        }
    }
}

/// Canvas widget for one frame of the scene. Surface y grows downwards,
/// the canvas grows upwards, so every point is flipped.
pub struct SceneCanvas<'a> {
    scene: &'a DisplayList,
}

impl<'a> SceneCanvas<'a> {
    pub fn new(scene: &'a DisplayList) -> Self {
        Self { scene }
    }

    fn marks(&self) -> Vec<Mark> {
        let mut marks = Vec::new();
        for command in self.scene.commands() {
            match command {
                DrawCommand::Fill(_) => {}
                DrawCommand::Stroke { path, style } => stroke_marks(path, style, &mut marks),
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                } => {
                    // Braille has no fill; concentric rings read as a disc
                    let color = Color::from(*color);
                    let mut r = *radius;
                    while r > 0.0 {
                        marks.push(Mark::Ring(*center, r, color));
                        r -= 3.0;
                    }
                    marks.push(Mark::Dots(vec![(center.x, center.y)], color));
                }
                DrawCommand::Bitmap { image, dest, dash } => {
                    if let (coords, Some(color)) = bitmap_points(image, *dest, *dash) {
                        marks.push(Mark::Dots(coords, color));
                    }
                }
            }
        }
        marks
    }
}

impl Widget for SceneCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.scene.size();
        let background = self.scene.background().map(Color::from).unwrap_or_default();
        let marks = self.marks();
        let flip = move |p: Point| (p.x, height - p.y);

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(background)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for mark in &marks {
                    match mark {
                        Mark::Segment(a, b, color) => {
                            let (x1, y1) = flip(*a);
                            let (x2, y2) = flip(*b);
                            ctx.draw(&Line::new(x1, y1, x2, y2, *color));
                        }
                        Mark::Ring(center, radius, color) => {
                            let (x, y) = flip(*center);
                            ctx.draw(&Circle {
                                x,
                                y,
                                radius: *radius,
                                color: *color,
                            });
                        }
                        Mark::Dots(coords, color) => {
                            let flipped: Vec<(f64, f64)> =
                                coords.iter().map(|&(x, y)| (x, height - y)).collect();
                            ctx.draw(&Points {
                                coords: &flipped,
                                color: *color,
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}
