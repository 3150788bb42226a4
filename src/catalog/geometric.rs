//! Single-outline figures: basic shapes, stars, polygons, arrows, lines.

use super::pen::Pen;
use super::{ShapeCatalog, Sketch, Stencil};
use kurbo::{BezPath, Point};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Regular polygon with its first vertex on the positive x axis
pub struct RegularPolygon {
    pub sides: usize,
}

impl Stencil for RegularPolygon {
    fn draw(&self, origin: Point, size: f64) -> BezPath {
        let mut pen = Pen::new(origin, size);
        let step = TAU / self.sides as f64;
        pen.move_to(1.0, 0.0);
        for i in 1..=self.sides {
            let angle = step * i as f64;
            pen.line_to(angle.cos(), angle.sin());
        }
        pen.close();
        pen.finish()
    }
}

/// Star with `spikes` points, the first one straight up, inner radius half
/// of the outer one
pub struct Star {
    pub spikes: usize,
}

impl Stencil for Star {
    fn draw(&self, origin: Point, size: f64) -> BezPath {
        let mut pen = Pen::new(origin, size);
        let step = PI / self.spikes as f64;
        let mut rot = 3.0 * FRAC_PI_2;
        pen.move_to(0.0, -1.0);
        for _ in 0..self.spikes {
            pen.line_to(rot.cos(), rot.sin());
            rot += step;
            pen.line_to(rot.cos() * 0.5, rot.sin() * 0.5);
            rot += step;
        }
        pen.line_to(0.0, -1.0);
        pen.close();
        pen.finish()
    }
}

pub fn register(catalog: &mut ShapeCatalog) {
    catalog.register("circle", Sketch(circle));
    catalog.register("square", Sketch(square));
    catalog.register("triangle", Sketch(triangle));
    catalog.register("rectangle", Sketch(rectangle));
    catalog.register("oval", Sketch(oval));
    catalog.register("diamond", Sketch(diamond));
    catalog.register("star4", Star { spikes: 4 });
    catalog.register("star5", Star { spikes: 5 });
    catalog.register("star6", Star { spikes: 6 });
    catalog.register("star8", Star { spikes: 8 });
    catalog.register("heart", Sketch(heart));
    catalog.register("pentagon", RegularPolygon { sides: 5 });
    catalog.register("hexagon", RegularPolygon { sides: 6 });
    catalog.register("octagon", RegularPolygon { sides: 8 });
    catalog.register("semicircle", Sketch(semicircle));
    catalog.register("quartercircle", Sketch(quartercircle));
    catalog.register("cross", Sketch(cross));
    catalog.register("plus", Sketch(plus));
    catalog.register("arrowup", Sketch(arrow_up));
    catalog.register("arrowright", Sketch(arrow_right));
    catalog.register("arrowdown", Sketch(arrow_down));
    catalog.register("arrowleft", Sketch(arrow_left));
    catalog.register("parallelogram", Sketch(parallelogram));
    catalog.register("trapezoid", Sketch(trapezoid));
    catalog.register("rightTriangle", Sketch(right_triangle));
    catalog.register("crescent", Sketch(crescent));
    catalog.register("drop", Sketch(drop));
    catalog.register("eight", Sketch(eight));
    catalog.register("infinity", Sketch(infinity));
    catalog.register("zigzag", Sketch(zigzag));
    catalog.register("wave", Sketch(wave));
    catalog.register("sine", Sketch(sine));
    catalog.register("spiralSquare", Sketch(spiral_square));
    catalog.register("spiralRound", Sketch(spiral_round));
    catalog.register("crossX", Sketch(cross_x));
    catalog.register("lightning", Sketch(lightning));
    catalog.register("arch", Sketch(arch));
    catalog.register("letterL", Sketch(letter_l));
    catalog.register("letterT", Sketch(letter_t));
    catalog.register("letterH", Sketch(letter_h));
}

fn circle(p: &mut Pen) {
    p.circle(0.0, 0.0, 1.0);
}

fn square(p: &mut Pen) {
    p.rect(-1.0, -1.0, 2.0, 2.0);
}

fn triangle(p: &mut Pen) {
    p.move_to(0.0, -1.0).line_to(1.0, 1.0).line_to(-1.0, 1.0).close();
}

fn rectangle(p: &mut Pen) {
    p.rect(-1.3, -0.7, 2.6, 1.4);
}

fn oval(p: &mut Pen) {
    p.ellipse(0.0, 0.0, 1.3, 0.7, 0.0);
}

fn diamond(p: &mut Pen) {
    p.move_to(0.0, -1.0)
        .polyline(&[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)])
        .close();
}

fn heart(p: &mut Pen) {
    p.move_to(0.0, 0.25)
        .curve_to(0.0, 0.0, -0.5, -0.3, -0.5, 0.25)
        .curve_to(-0.5, 0.5, 0.0, 0.75, 0.0, 1.0)
        .curve_to(0.0, 0.75, 0.5, 0.5, 0.5, 0.25)
        .curve_to(0.5, -0.3, 0.0, 0.0, 0.0, 0.25);
}

fn semicircle(p: &mut Pen) {
    p.arc(0.0, 0.0, 1.0, 0.0, PI).line_to(-1.0, 0.0);
}

fn quartercircle(p: &mut Pen) {
    p.arc(0.0, 0.0, 1.0, 0.0, FRAC_PI_2).line_to(0.0, 0.0).close();
}

fn cross(p: &mut Pen) {
    p.move_to(-0.8, -0.3)
        .polyline(&[
            (-0.3, -0.3),
            (-0.3, -0.8),
            (0.3, -0.8),
            (0.3, -0.3),
            (0.8, -0.3),
            (0.8, 0.3),
            (0.3, 0.3),
            (0.3, 0.8),
            (-0.3, 0.8),
            (-0.3, 0.3),
            (-0.8, 0.3),
        ])
        .close();
}

fn plus(p: &mut Pen) {
    p.move_to(0.0, -1.0).line_to(0.0, 1.0);
    p.move_to(-1.0, 0.0).line_to(1.0, 0.0);
}

// Arrows share one outline, rotated by quarter turns.
const ARROW: [(f64, f64); 7] = [
    (0.0, -1.0),
    (0.5, -0.3),
    (0.2, -0.3),
    (0.2, 1.0),
    (-0.2, 1.0),
    (-0.2, -0.3),
    (-0.5, -0.3),
];

fn arrow(p: &mut Pen, turn: fn((f64, f64)) -> (f64, f64)) {
    let (u, v) = turn(ARROW[0]);
    p.move_to(u, v);
    for &point in &ARROW[1..] {
        let (u, v) = turn(point);
        p.line_to(u, v);
    }
    p.close();
}

fn arrow_up(p: &mut Pen) {
    arrow(p, |(u, v)| (u, v));
}

fn arrow_right(p: &mut Pen) {
    arrow(p, |(u, v)| (-v, u));
}

fn arrow_down(p: &mut Pen) {
    arrow(p, |(u, v)| (-u, -v));
}

fn arrow_left(p: &mut Pen) {
    arrow(p, |(u, v)| (v, -u));
}

fn parallelogram(p: &mut Pen) {
    p.move_to(-0.8, -0.5)
        .polyline(&[(0.4, -0.5), (0.8, 0.5), (-0.4, 0.5)])
        .close();
}

fn trapezoid(p: &mut Pen) {
    p.move_to(-0.5, -0.6)
        .polyline(&[(0.5, -0.6), (1.0, 0.6), (-1.0, 0.6)])
        .close();
}

fn right_triangle(p: &mut Pen) {
    p.move_to(-1.0, 1.0).line_to(1.0, 1.0).line_to(1.0, -1.0).close();
}

fn crescent(p: &mut Pen) {
    p.circle(0.0, 0.0, 1.0);
    p.move_to(0.3, -0.6).circle(0.3, 0.0, 0.7);
}

fn drop(p: &mut Pen) {
    p.move_to(0.0, -1.0)
        .quad_to(0.7, -0.3, 0.5, 0.3)
        .quad_to(0.3, 0.7, 0.0, 1.0)
        .quad_to(-0.3, 0.7, -0.5, 0.3)
        .quad_to(-0.7, -0.3, 0.0, -1.0);
}

fn eight(p: &mut Pen) {
    p.circle(0.0, -0.4, 0.4);
    p.move_to(0.5, 0.5).circle(0.0, 0.5, 0.5);
}

fn infinity(p: &mut Pen) {
    p.move_to(-0.5, 0.0)
        .curve_to(-0.5, -0.5, -0.1, -0.5, 0.0, 0.0)
        .curve_to(0.1, 0.5, 0.5, 0.5, 0.5, 0.0)
        .curve_to(0.5, -0.5, 0.1, -0.5, 0.0, 0.0)
        .curve_to(-0.1, 0.5, -0.5, 0.5, -0.5, 0.0);
}

fn zigzag(p: &mut Pen) {
    p.move_to(-1.0, -0.5)
        .polyline(&[(-0.5, 0.5), (0.0, -0.5), (0.5, 0.5), (1.0, -0.5)]);
}

fn wave(p: &mut Pen) {
    p.move_to(-1.0, 0.0)
        .quad_to(-0.75, -0.5, -0.5, 0.0)
        .quad_to(-0.25, 0.5, 0.0, 0.0)
        .quad_to(0.25, -0.5, 0.5, 0.0)
        .quad_to(0.75, 0.5, 1.0, 0.0);
}

fn sine(p: &mut Pen) {
    p.move_to(-1.0, 0.0);
    for i in 0..=100 {
        let t = i as f64 / 100.0;
        p.line_to(-1.0 + 2.0 * t, (t * 4.0 * PI).sin() * 0.5);
    }
}

fn spiral_square(p: &mut Pen) {
    let (mut x, mut y) = (1.0, 1.0);
    let mut side = 1.0;
    p.move_to(x, y);
    for _ in 0..4 {
        p.line_to(x - side * 2.0, y);
        y -= side * 2.0;
        side *= 0.7;
        p.line_to(x - side * 2.0, y);
        x -= side * 2.0;
        side *= 0.7;
        p.line_to(x, y + side * 2.0);
        y += side * 2.0;
        side *= 0.7;
        p.line_to(x + side * 2.0, y);
        x += side * 2.0;
        side *= 0.7;
    }
}

fn spiral_round(p: &mut Pen) {
    p.move_to(0.0, 0.0);
    let (mut angle, mut radius) = (0.0_f64, 0.0);
    for _ in 0..300 {
        angle += 0.1;
        radius += 1.0 / 150.0;
        p.line_to(angle.cos() * radius, angle.sin() * radius);
    }
}

fn cross_x(p: &mut Pen) {
    p.move_to(-1.0, -1.0).line_to(1.0, 1.0);
    p.move_to(1.0, -1.0).line_to(-1.0, 1.0);
}

fn lightning(p: &mut Pen) {
    p.move_to(-0.3, -1.0)
        .polyline(&[(0.2, -0.2), (-0.1, -0.2), (0.3, 1.0), (0.0, 0.2), (0.1, 0.2)])
        .close();
}

fn arch(p: &mut Pen) {
    p.arc_ccw(0.0, 0.0, 1.0, 0.0, PI)
        .polyline(&[(-1.0, 0.3), (1.0, 0.3), (1.0, 0.0)]);
}

fn letter_l(p: &mut Pen) {
    p.move_to(-0.5, -1.0).line_to(-0.5, 1.0).line_to(0.5, 1.0);
}

fn letter_t(p: &mut Pen) {
    p.move_to(-1.0, -1.0).line_to(1.0, -1.0);
    p.move_to(0.0, -1.0).line_to(0.0, 1.0);
}

fn letter_h(p: &mut Pen) {
    p.move_to(-0.5, -1.0).line_to(-0.5, 1.0);
    p.move_to(0.5, -1.0).line_to(0.5, 1.0);
    p.move_to(-0.5, 0.0).line_to(0.5, 0.0);
}
