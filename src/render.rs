//! Scene composition. The renderer turns session state into drawing
//! commands on a [`Surface`]; hosts decide how the commands reach a screen.

use crate::capture::TracePath;
use crate::catalog::bitmap::{placement, ImageCache};
use crate::catalog::ShapeCatalog;
use crate::color::Rgb;
use crate::config::SessionConfig;
use crate::figure::{Figure, RenderParams};
use image::RgbaImage;
use kurbo::{BezPath, Point, Rect};
use std::sync::Arc;

pub const SURFACE_WIDTH: f64 = 1080.0;
pub const SURFACE_HEIGHT: f64 = 810.0;
pub const FIGURE_CENTER: Point = Point::new(540.0, 405.0);
pub const FIGURE_SIZE: f64 = 180.0;

pub const FIGURE_LINE_WIDTH: f64 = 4.0;
pub const TRACE_LINE_WIDTH: f64 = 3.0;
pub const COMPARISON_DASH: [f64; 2] = [10.0, 10.0];
pub const INDICATOR_RADIUS: f64 = 12.0;
pub const INDICATOR_CORE_RADIUS: f64 = 4.0;
const INDICATOR_CORE_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: f64,
    /// `[on, off]` lengths in surface units; `None` is a solid line
    pub dash: Option<[f64; 2]>,
}

impl StrokeStyle {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgb, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// A drawing target in surface coordinates (origin top left, y down).
pub trait Surface {
    fn size(&self) -> (f64, f64);
    /// Paint the whole surface, discarding what was drawn before
    fn fill(&mut self, color: Rgb);
    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb);
    /// Draw a recolored bitmap figure; `dash` breaks it up like a dashed stroke
    fn blit(&mut self, image: Arc<RgbaImage>, dest: Rect, dash: Option<[f64; 2]>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgb),
    Stroke { path: BezPath, style: StrokeStyle },
    Disc { center: Point, radius: f64, color: Rgb },
    Bitmap {
        image: Arc<RgbaImage>,
        dest: Rect,
        dash: Option<[f64; 2]>,
    },
}

/// Retained surface: records commands for a host to replay.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    size: (f64, f64),
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: (width, height),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn background(&self) -> Option<Rgb> {
        self.commands.iter().find_map(|cmd| match cmd {
            DrawCommand::Fill(color) => Some(*color),
            _ => None,
        })
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new(SURFACE_WIDTH, SURFACE_HEIGHT)
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn fill(&mut self, color: Rgb) {
        self.commands.clear();
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: *style,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn blit(&mut self, image: Arc<RgbaImage>, dest: Rect, dash: Option<[f64; 2]>) {
        self.commands.push(DrawCommand::Bitmap { image, dest, dash });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Background only, behind the instructions overlay
    Blank,
    /// Live two-color view
    Tracing,
    /// Reference dashed and strokes solid, one shared color
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub figure: Rgb,
    pub trace: Rgb,
    pub background: Rgb,
}

impl Palette {
    pub fn comparison(&self) -> Rgb {
        self.background.contrast()
    }
}

impl From<&SessionConfig> for Palette {
    fn from(config: &SessionConfig) -> Self {
        Self {
            figure: config.color1,
            trace: config.color2,
            background: config.background_color,
        }
    }
}

/// Everything the renderer reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub mode: RenderMode,
    pub figure: Option<&'a Figure>,
    pub origin: Point,
    pub strokes: &'a [TracePath],
    pub active: Option<&'a TracePath>,
    pub pointer: Option<Point>,
}

pub struct Renderer {
    shapes: ShapeCatalog,
    images: ImageCache,
}

impl Renderer {
    pub fn new(shapes: ShapeCatalog) -> Self {
        Self {
            shapes,
            images: ImageCache::new(),
        }
    }

    pub fn shapes(&self) -> &ShapeCatalog {
        &self.shapes
    }

    /// Draw `frame`. A missing surface makes this a no-op.
    pub fn render(&mut self, frame: &Frame<'_>, palette: &Palette, surface: Option<&mut dyn Surface>) {
        let Some(surface) = surface else {
            return;
        };
        surface.fill(palette.background);

        match frame.mode {
            RenderMode::Blank => {}
            RenderMode::Tracing => {
                self.draw_figure(
                    surface,
                    frame,
                    &StrokeStyle::solid(palette.figure, FIGURE_LINE_WIDTH),
                );
                let trace = StrokeStyle::solid(palette.trace, TRACE_LINE_WIDTH);
                for stroke in frame.strokes.iter().chain(frame.active) {
                    draw_trace(surface, stroke, &trace);
                }
                if let Some(at) = frame.pointer {
                    draw_indicator(surface, at, palette.trace);
                }
            }
            RenderMode::Comparison => {
                let color = palette.comparison();
                self.draw_figure(
                    surface,
                    frame,
                    &StrokeStyle::dashed(color, FIGURE_LINE_WIDTH, COMPARISON_DASH),
                );
                let trace = StrokeStyle::solid(color, TRACE_LINE_WIDTH);
                for stroke in frame.strokes {
                    draw_trace(surface, stroke, &trace);
                }
            }
        }
    }

    fn draw_figure(&mut self, surface: &mut dyn Surface, frame: &Frame<'_>, style: &StrokeStyle) {
        let Some(figure) = frame.figure else {
            return;
        };
        if let RenderParams::Image { path } = &figure.render {
            if let Some(image) = self.images.get(path, style.color) {
                let dest = placement(&image, frame.origin, FIGURE_SIZE);
                surface.blit(image, dest, style.dash);
            }
            return;
        }
        match self.shapes.outline(figure, frame.origin, FIGURE_SIZE) {
            Some(path) => surface.stroke(&path, style),
            None => tracing::debug!(id = %figure.id, "figure has no outline"),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ShapeCatalog::builtin())
    }
}

pub fn trace_path(stroke: &TracePath) -> BezPath {
    let mut path = BezPath::new();
    let mut points = stroke.points().iter();
    if let Some(first) = points.next() {
        path.move_to(*first);
        for p in points {
            path.line_to(*p);
        }
    }
    path
}

fn draw_trace(surface: &mut dyn Surface, stroke: &TracePath, style: &StrokeStyle) {
    if stroke.is_drawable() {
        surface.stroke(&trace_path(stroke), style);
    }
}

fn draw_indicator(surface: &mut dyn Surface, at: Point, color: Rgb) {
    let (w, h) = surface.size();
    if at.x > 0.0 && at.y > 0.0 && at.x < w && at.y < h {
        surface.fill_circle(at, INDICATOR_RADIUS, color);
        surface.fill_circle(
            at,
            INDICATOR_CORE_RADIUS,
            color.blend(Rgb::WHITE, INDICATOR_CORE_ALPHA),
        );
    }
}
