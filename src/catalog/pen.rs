use kurbo::{Arc, BezPath, Point, Vec2};
use std::f64::consts::TAU;

// Flattening tolerance as a fraction of the size unit
const ARC_TOLERANCE: f64 = 1e-3;

/// Builds a path in figure units: every coordinate is a multiple of `size`
/// measured from `origin`, so `(0.5, -1.0)` is half a size right of the
/// origin and one size above it.
///
/// The operations follow the 2D canvas path model: `arc` and `ellipse`
/// connect to their start point from the current point, `rect` adds a
/// separate closed subpath, `close` returns the current point to the start
/// of the subpath, and a segment with no current point starts a new one.
pub struct Pen {
    path: BezPath,
    origin: Point,
    size: f64,
    current: Option<Point>,
    subpath_start: Option<Point>,
    open: bool,
}

impl Pen {
    pub fn new(origin: Point, size: f64) -> Self {
        Self {
            path: BezPath::new(),
            origin,
            size,
            current: None,
            subpath_start: None,
            open: false,
        }
    }

    pub fn at(&self, u: f64, v: f64) -> Point {
        Point::new(self.origin.x + u * self.size, self.origin.y + v * self.size)
    }

    pub fn move_to(&mut self, u: f64, v: f64) -> &mut Self {
        let p = self.at(u, v);
        self.move_abs(p);
        self
    }

    pub fn line_to(&mut self, u: f64, v: f64) -> &mut Self {
        let p = self.at(u, v);
        self.line_abs(p);
        self
    }

    /// Convenience for a run of straight segments from the current point
    pub fn polyline(&mut self, points: &[(f64, f64)]) -> &mut Self {
        for &(u, v) in points {
            self.line_to(u, v);
        }
        self
    }

    pub fn quad_to(&mut self, cu: f64, cv: f64, u: f64, v: f64) -> &mut Self {
        let c = self.at(cu, cv);
        let p = self.at(u, v);
        self.ensure_current(c);
        self.path.quad_to(c, p);
        self.current = Some(p);
        self
    }

    pub fn curve_to(
        &mut self,
        c1u: f64,
        c1v: f64,
        c2u: f64,
        c2v: f64,
        u: f64,
        v: f64,
    ) -> &mut Self {
        let c1 = self.at(c1u, c1v);
        let c2 = self.at(c2u, c2v);
        let p = self.at(u, v);
        self.ensure_current(c1);
        self.path.curve_to(c1, c2, p);
        self.current = Some(p);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if self.open {
            self.path.close_path();
            self.open = false;
        }
        self.current = self.subpath_start;
        self
    }

    pub fn rect(&mut self, u: f64, v: f64, w: f64, h: f64) -> &mut Self {
        self.move_to(u, v);
        self.line_to(u + w, v);
        self.line_to(u + w, v + h);
        self.line_to(u, v + h);
        self.close();
        self
    }

    /// Clockwise (in screen space) arc from `start` to `end` radians
    pub fn arc(&mut self, u: f64, v: f64, r: f64, start: f64, end: f64) -> &mut Self {
        self.ellipse_impl(u, v, r, r, 0.0, start, end, false)
    }

    pub fn arc_ccw(&mut self, u: f64, v: f64, r: f64, start: f64, end: f64) -> &mut Self {
        self.ellipse_impl(u, v, r, r, 0.0, start, end, true)
    }

    pub fn circle(&mut self, u: f64, v: f64, r: f64) -> &mut Self {
        self.arc(u, v, r, 0.0, TAU)
    }

    pub fn ellipse(&mut self, u: f64, v: f64, rx: f64, ry: f64, rotation: f64) -> &mut Self {
        self.ellipse_impl(u, v, rx, ry, rotation, 0.0, TAU, false)
    }

    pub fn finish(self) -> BezPath {
        self.path
    }

    #[allow(clippy::too_many_arguments)]
    fn ellipse_impl(
        &mut self,
        u: f64,
        v: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start: f64,
        end: f64,
        anticlockwise: bool,
    ) -> &mut Self {
        let arc = Arc {
            center: self.at(u, v),
            radii: Vec2::new(rx * self.size, ry * self.size),
            start_angle: start,
            sweep_angle: canvas_sweep(start, end, anticlockwise),
            x_rotation: rotation,
        };
        let first = arc_point(&arc, start);
        match self.current {
            Some(_) => self.line_abs(first),
            None => self.move_abs(first),
        }
        self.path
            .extend(arc.append_iter(ARC_TOLERANCE * self.size.abs().max(1.0)));
        self.current = Some(arc_point(&arc, start + arc.sweep_angle));
        self
    }

    fn move_abs(&mut self, p: Point) {
        self.path.move_to(p);
        self.current = Some(p);
        self.subpath_start = Some(p);
        self.open = true;
    }

    fn line_abs(&mut self, p: Point) {
        match self.current {
            Some(_) => {
                self.reopen();
                self.path.line_to(p);
                self.current = Some(p);
            }
            None => self.move_abs(p),
        }
    }

    fn ensure_current(&mut self, fallback: Point) {
        match self.current {
            Some(_) => self.reopen(),
            None => self.move_abs(fallback),
        }
    }

    // Segments after a close continue from the closed subpath's start.
    fn reopen(&mut self) {
        if !self.open {
            if let Some(p) = self.current {
                self.path.move_to(p);
                self.subpath_start = Some(p);
                self.open = true;
            }
        }
    }
}

/// Sweep angle for a canvas-style `arc(start, end, anticlockwise)` call
pub fn canvas_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start - end >= TAU {
            -TAU
        } else {
            -(start - end).rem_euclid(TAU)
        }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

fn arc_point(arc: &Arc, angle: f64) -> Point {
    let local = Vec2::new(arc.radii.x * angle.cos(), arc.radii.y * angle.sin());
    let (sin_r, cos_r) = arc.x_rotation.sin_cos();
    arc.center
        + Vec2::new(
            local.x * cos_r - local.y * sin_r,
            local.x * sin_r + local.y * cos_r,
        )
}
