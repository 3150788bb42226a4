//! Multi-part figures: nested outlines, mazes and small pictures.

use super::pen::Pen;
use super::{ShapeCatalog, Sketch, Stencil};
use kurbo::{BezPath, Point};
use std::f64::consts::TAU;

/// Circles sharing one center, outermost first
pub struct Concentric {
    pub radii: &'static [f64],
}

impl Stencil for Concentric {
    fn draw(&self, origin: Point, size: f64) -> BezPath {
        let mut pen = Pen::new(origin, size);
        for &r in self.radii {
            pen.move_to(r, 0.0).circle(0.0, 0.0, r);
        }
        pen.finish()
    }
}

pub fn register(catalog: &mut ShapeCatalog) {
    catalog.register("circles2", Concentric { radii: &[0.8, 0.5] });
    catalog.register("circles3", Concentric { radii: &[1.0, 0.65, 0.3] });
    catalog.register("squares2", Sketch(squares2));
    catalog.register("triangles2", Sketch(triangles2));
    catalog.register("cloud", Sketch(cloud));
    catalog.register("maze1", Sketch(maze1));
    catalog.register("maze2", Sketch(maze2));
    catalog.register("maze3", Sketch(maze3));
    catalog.register("grid", Sketch(grid));
    catalog.register("sun", Sketch(sun));
    catalog.register("flower", Sketch(flower));
    catalog.register("fish", Sketch(fish));
    catalog.register("tree", Sketch(tree));
    catalog.register("car", Sketch(car));
    catalog.register("house", Sketch(house));
    catalog.register("dog", Sketch(dog));
    catalog.register("horse", Sketch(horse));
    catalog.register("bear", Sketch(bear));
    catalog.register("chicken", Sketch(chicken));
    catalog.register("boat", Sketch(boat));
    catalog.register("cow", Sketch(cow));
    catalog.register("kangaroo", Sketch(kangaroo));
    catalog.register("piglet", Sketch(piglet));
    catalog.register("rabbit", Sketch(rabbit));
    catalog.register("teddy", Sketch(teddy));
    catalog.register("elephant", Sketch(elephant));
    catalog.register("butterfly", Sketch(butterfly));
    catalog.register("snail", Sketch(snail));
    catalog.register("apple", Sketch(apple));
    catalog.register("mushroom", Sketch(mushroom));
    catalog.register("cup", Sketch(cup));
}

/// Straight segments, each its own subpath
fn segments(p: &mut Pen, lines: &[((f64, f64), (f64, f64))]) {
    for &((u0, v0), (u1, v1)) in lines {
        p.move_to(u0, v0).line_to(u1, v1);
    }
}

/// Circle entered from an explicit point, so the connecting line is part of the figure
fn dot(p: &mut Pen, from: (f64, f64), u: f64, v: f64, r: f64) {
    p.move_to(from.0, from.1).circle(u, v, r);
}

fn squares2(p: &mut Pen) {
    p.rect(-1.0, -1.0, 2.0, 2.0).rect(-0.6, -0.6, 1.2, 1.2);
}

fn triangles2(p: &mut Pen) {
    p.move_to(0.0, -1.0).line_to(1.0, 1.0).line_to(-1.0, 1.0).close();
    p.move_to(0.0, -0.5).line_to(0.5, 0.5).line_to(-0.5, 0.5).close();
}

fn cloud(p: &mut Pen) {
    p.circle(-0.5, 0.0, 0.4);
    dot(p, (0.1, -0.4), 0.0, -0.3, 0.4);
    dot(p, (0.9, 0.0), 0.5, 0.0, 0.4);
    dot(p, (0.6, 0.3), 0.2, 0.3, 0.4);
}

fn maze1(p: &mut Pen) {
    p.rect(-1.0, -1.0, 2.0, 2.0);
    segments(
        p,
        &[
            ((-1.0, -0.3), (0.5, -0.3)),
            ((0.5, -0.3), (0.5, 0.5)),
            ((-0.5, 0.5), (1.0, 0.5)),
        ],
    );
}

fn maze2(p: &mut Pen) {
    p.rect(-1.0, -1.0, 2.0, 2.0);
    segments(
        p,
        &[
            ((-1.0, -0.5), (0.3, -0.5)),
            ((0.3, -1.0), (0.3, 0.0)),
            ((-0.3, 0.0), (0.7, 0.0)),
            ((0.7, -0.3), (0.7, 1.0)),
            ((-0.7, 0.5), (1.0, 0.5)),
        ],
    );
}

fn maze3(p: &mut Pen) {
    p.rect(-1.0, -1.0, 2.0, 2.0);
    segments(
        p,
        &[
            ((-1.0, -0.6), (0.2, -0.6)),
            ((0.2, -1.0), (0.2, -0.2)),
            ((-0.5, -0.2), (0.6, -0.2)),
            ((0.6, -0.6), (0.6, 0.3)),
            ((-0.7, 0.3), (0.2, 0.3)),
            ((0.2, 0.0), (0.2, 1.0)),
            ((-0.3, 0.7), (1.0, 0.7)),
        ],
    );
}

fn grid(p: &mut Pen) {
    for i in [-1.0, 0.0, 1.0] {
        p.move_to(i * 0.6, -1.0).line_to(i * 0.6, 1.0);
    }
    for i in [-1.0, 0.0, 1.0] {
        p.move_to(-1.0, i * 0.6).line_to(1.0, i * 0.6);
    }
}

fn sun(p: &mut Pen) {
    p.circle(0.0, 0.0, 0.5);
    for i in 0..8 {
        let angle = i as f64 / 8.0 * TAU;
        let (sin, cos) = angle.sin_cos();
        p.move_to(cos * 0.6, sin * 0.6).line_to(cos, sin);
    }
}

fn flower(p: &mut Pen) {
    p.circle(0.0, 0.0, 0.3);
    for i in 0..5 {
        let angle = i as f64 / 5.0 * TAU;
        let (sin, cos) = angle.sin_cos();
        dot(p, (0.0, 0.0), cos * 0.5, sin * 0.5, 0.3);
    }
    p.move_to(0.0, 0.0).line_to(0.0, 1.0);
}

fn fish(p: &mut Pen) {
    p.move_to(-0.8, 0.0)
        .quad_to(-0.4, -0.5, 0.3, 0.0)
        .quad_to(-0.4, 0.5, -0.8, 0.0);
    p.move_to(0.3, -0.4).line_to(0.8, 0.0).line_to(0.3, 0.4);
    p.move_to(-0.2, -0.4).line_to(-0.1, -0.6).line_to(0.0, -0.4);
    dot(p, (-0.42, -0.15), -0.45, -0.15, 0.08);
}

fn tree(p: &mut Pen) {
    p.move_to(-0.15, 0.8)
        .polyline(&[(-0.15, 0.2), (0.15, 0.2), (0.15, 0.8)])
        .close();
    dot(p, (0.6, 0.0), 0.0, 0.0, 0.6);
    dot(p, (-0.2, -0.6), -0.5, -0.3, 0.4);
    dot(p, (0.7, -0.6), 0.5, -0.3, 0.4);
}

fn car(p: &mut Pen) {
    p.move_to(-0.8, 0.3)
        .polyline(&[
            (-0.6, -0.1),
            (-0.3, -0.3),
            (0.3, -0.3),
            (0.6, -0.1),
            (0.8, 0.3),
            (0.8, 0.5),
            (-0.8, 0.5),
        ])
        .close();
    p.move_to(-0.5, -0.05)
        .polyline(&[(-0.35, -0.25), (-0.05, -0.25), (-0.05, -0.05)])
        .close();
    p.move_to(0.05, -0.05)
        .polyline(&[(0.05, -0.25), (0.35, -0.25), (0.5, -0.05)])
        .close();
    dot(p, (-0.45, 0.5), -0.5, 0.5, 0.2);
    dot(p, (0.65, 0.5), 0.5, 0.5, 0.2);
}

fn house(p: &mut Pen) {
    p.rect(-0.6, 0.0, 1.2, 0.8);
    p.move_to(0.0, -0.5).line_to(0.8, 0.0).line_to(-0.8, 0.0).close();
    p.move_to(-0.15, 0.3)
        .polyline(&[(-0.15, 0.8), (0.15, 0.8), (0.15, 0.3)])
        .close();
    p.rect(0.25, 0.3, 0.25, 0.25);
}

fn dog(p: &mut Pen) {
    p.ellipse(0.0, 0.0, 0.5, 0.35, 0.0);
    dot(p, (-0.3, -0.55), -0.5, -0.5, 0.3);
    p.move_to(-0.65, -0.7).line_to(-0.75, -0.5).line_to(-0.6, -0.5);
    p.move_to(-0.35, -0.7).line_to(-0.25, -0.5).line_to(-0.4, -0.5);
    dot(p, (-0.68, -0.45), -0.72, -0.45, 0.08);
    segments(
        p,
        &[
            ((-0.3, 0.35), (-0.3, 0.6)),
            ((0.0, 0.35), (0.0, 0.6)),
            ((0.25, 0.35), (0.25, 0.6)),
        ],
    );
    p.move_to(0.5, 0.0).quad_to(0.7, -0.2, 0.6, -0.4);
}

fn horse(p: &mut Pen) {
    p.ellipse(0.0, 0.1, 0.6, 0.4, 0.0);
    p.move_to(-0.5, -0.2)
        .polyline(&[(-0.7, -0.6), (-0.5, -0.7), (-0.3, -0.3)]);
    p.move_to(-0.5, -0.7)
        .quad_to(-0.8, -0.8, -0.85, -0.6)
        .quad_to(-0.82, -0.5, -0.7, -0.6);
    segments(
        p,
        &[
            ((-0.65, -0.7), (-0.6, -0.8)),
            ((-0.6, -0.65), (-0.55, -0.75)),
            ((-0.3, 0.5), (-0.3, 0.8)),
            ((0.0, 0.5), (0.0, 0.8)),
            ((0.3, 0.5), (0.3, 0.8)),
            ((0.5, 0.5), (0.5, 0.8)),
        ],
    );
    p.move_to(0.6, 0.0).quad_to(0.8, 0.2, 0.7, 0.5);
}

fn bear(p: &mut Pen) {
    p.circle(0.0, 0.2, 0.5);
    dot(p, (0.4, -0.5), 0.0, -0.5, 0.4);
    dot(p, (-0.25, -0.85), -0.3, -0.8, 0.15);
    dot(p, (0.45, -0.85), 0.3, -0.8, 0.15);
    dot(p, (0.25, -0.35), 0.0, -0.35, 0.25);
    dot(p, (0.08, -0.4), 0.0, -0.4, 0.08);
    dot(p, (-0.12, -0.55), -0.15, -0.55, 0.06);
    dot(p, (0.18, -0.55), 0.15, -0.55, 0.06);
    segments(
        p,
        &[((-0.35, 0.7), (-0.35, 0.9)), ((0.35, 0.7), (0.35, 0.9))],
    );
}

fn chicken(p: &mut Pen) {
    p.circle(0.0, 0.1, 0.45);
    dot(p, (-0.15, -0.5), -0.3, -0.5, 0.25);
    p.move_to(-0.55, -0.5).line_to(-0.7, -0.45).line_to(-0.55, -0.55);
    dot(p, (-0.25, -0.52), -0.28, -0.52, 0.05);
    p.move_to(-0.4, -0.75)
        .polyline(&[(-0.35, -0.8), (-0.3, -0.75), (-0.25, -0.78), (-0.2, -0.75)]);
    p.move_to(-0.1, 0.0).quad_to(-0.3, 0.25, -0.15, 0.4);
    segments(
        p,
        &[((-0.15, 0.55), (-0.15, 0.75)), ((0.1, 0.55), (0.1, 0.75))],
    );
}

fn boat(p: &mut Pen) {
    p.move_to(-0.8, 0.3)
        .quad_to(-0.7, 0.5, 0.0, 0.6)
        .quad_to(0.7, 0.5, 0.8, 0.3)
        .line_to(0.6, 0.1)
        .line_to(-0.6, 0.1)
        .close();
    p.move_to(0.0, 0.1).line_to(0.0, -0.7);
    p.move_to(0.0, -0.7).line_to(0.5, -0.3).line_to(0.0, 0.1).close();
    p.move_to(-1.0, 0.7)
        .quad_to(-0.75, 0.65, -0.5, 0.7)
        .quad_to(-0.25, 0.75, 0.0, 0.7)
        .quad_to(0.25, 0.65, 0.5, 0.7)
        .quad_to(0.75, 0.75, 1.0, 0.7);
}

fn cow(p: &mut Pen) {
    p.ellipse(0.0, 0.0, 0.6, 0.4, 0.0);
    p.move_to(-0.4, -0.5)
        .polyline(&[
            (-0.7, -0.6),
            (-0.85, -0.4),
            (-0.85, -0.1),
            (-0.7, 0.0),
            (-0.5, -0.1),
        ])
        .close();
    segments(
        p,
        &[((-0.75, -0.6), (-0.8, -0.75)), ((-0.65, -0.6), (-0.6, -0.75))],
    );
    dot(p, (-0.75, -0.15), -0.85, -0.15, 0.12);
    dot(p, (-0.15, -0.2), -0.2, -0.2, 0.15);
    dot(p, (0.35, 0.1), 0.3, 0.1, 0.12);
    segments(
        p,
        &[
            ((-0.35, 0.4), (-0.35, 0.7)),
            ((-0.1, 0.4), (-0.1, 0.7)),
            ((0.15, 0.4), (0.15, 0.7)),
            ((0.4, 0.4), (0.4, 0.7)),
        ],
    );
    p.move_to(0.6, 0.0).quad_to(0.7, 0.2, 0.65, 0.35);
}

fn kangaroo(p: &mut Pen) {
    p.ellipse(0.0, 0.0, 0.4, 0.5, 0.0);
    dot(p, (-0.25, -0.7), -0.35, -0.7, 0.25);
    p.move_to(-0.45, -0.95).line_to(-0.5, -1.1).line_to(-0.4, -0.95);
    p.move_to(-0.25, -0.95).line_to(-0.2, -1.1).line_to(-0.3, -0.95);
    dot(p, (-0.5, -0.65), -0.55, -0.65, 0.08);
    p.move_to(-0.2, -0.1).line_to(-0.4, 0.1).line_to(-0.35, 0.15);
    p.move_to(0.1, 0.5)
        .polyline(&[(0.2, 0.8), (0.5, 0.85), (0.5, 0.75)]);
    p.move_to(-0.1, 0.5).line_to(0.0, 0.8).line_to(0.3, 0.85);
    p.move_to(0.35, 0.35).quad_to(0.6, 0.5, 0.7, 0.75);
}

fn piglet(p: &mut Pen) {
    p.circle(0.0, -0.5, 0.35);
    p.move_to(0.12, -0.48).ellipse(0.0, -0.48, 0.12, 0.08, 0.0);
    dot(p, (-0.05, -0.48), -0.05, -0.48, 0.02);
    dot(p, (0.07, -0.48), 0.05, -0.48, 0.02);
    dot(p, (-0.12, -0.6), -0.12, -0.6, 0.04);
    dot(p, (0.14, -0.6), 0.12, -0.6, 0.04);
    p.move_to(-0.25, -0.8).line_to(-0.3, -0.95).line_to(-0.2, -0.85);
    p.move_to(-0.15, -0.38).quad_to(0.0, -0.32, 0.15, -0.38);
    p.rect(-0.25, -0.2, 0.5, 0.6);
    segments(
        p,
        &[((-0.25, -0.05), (-0.4, 0.1)), ((0.25, -0.05), (0.4, 0.1))],
    );
    p.move_to(-0.12, 0.4)
        .polyline(&[(-0.12, 0.65), (-0.18, 0.7), (-0.06, 0.7)]);
    p.move_to(0.12, 0.4)
        .polyline(&[(0.12, 0.65), (0.06, 0.7), (0.18, 0.7)]);
}

fn rabbit(p: &mut Pen) {
    p.circle(0.0, 0.0, 0.5);
    dot(p, (0.3, -0.6), 0.0, -0.6, 0.3);
    p.move_to(-0.1, -0.85).ellipse(-0.15, -1.0, 0.1, 0.25, -0.1);
    p.move_to(0.25, -0.85).ellipse(0.15, -1.0, 0.1, 0.25, 0.1);
    dot(p, (0.06, -0.55), 0.0, -0.55, 0.06);
    dot(p, (-0.08, -0.68), -0.08, -0.68, 0.03);
    dot(p, (0.11, -0.68), 0.08, -0.68, 0.03);
    p.move_to(-0.2, 0.3).ellipse(-0.25, 0.4, 0.12, 0.18, 0.0);
    p.move_to(0.35, 0.3).ellipse(0.25, 0.4, 0.12, 0.18, 0.0);
    p.move_to(0.52, 0.6).ellipse(0.42, 0.65, 0.18, 0.12, 0.0);
    dot(p, (0.55, 0.05), 0.52, 0.05, 0.08);
}

fn teddy(p: &mut Pen) {
    p.circle(0.0, 0.0, 0.45);
    dot(p, (0.35, -0.5), 0.0, -0.5, 0.35);
    dot(p, (-0.2, -0.8), -0.25, -0.75, 0.12);
    dot(p, (0.37, -0.8), 0.25, -0.75, 0.12);
    p.move_to(0.2, -0.4).ellipse(0.0, -0.38, 0.2, 0.15, 0.0);
    dot(p, (0.06, -0.42), 0.0, -0.42, 0.06);
    dot(p, (-0.1, -0.55), -0.1, -0.55, 0.04);
    dot(p, (0.14, -0.55), 0.1, -0.55, 0.04);
    p.move_to(0.6, 0.0)
        .line_to(0.55, -0.25)
        .quad_to(0.65, -0.35, 0.75, -0.25)
        .line_to(0.7, 0.0)
        .close();
    segments(
        p,
        &[((-0.3, 0.45), (-0.3, 0.65)), ((0.3, 0.45), (0.3, 0.65))],
    );
}

fn elephant(p: &mut Pen) {
    p.ellipse(0.0, 0.0, 0.6, 0.5, 0.0);
    dot(p, (-0.4, -0.6), -0.5, -0.5, 0.35);
    p.move_to(-0.8, -0.5)
        .quad_to(-1.0, -0.3, -1.05, 0.0)
        .quad_to(-1.0, 0.2, -0.95, 0.35);
    p.move_to(-0.55, -0.75)
        .quad_to(-0.75, -0.65, -0.7, -0.4)
        .quad_to(-0.6, -0.45, -0.5, -0.6);
    dot(p, (-0.42, -0.55), -0.45, -0.55, 0.05);
    segments(
        p,
        &[
            ((-0.35, 0.5), (-0.35, 0.8)),
            ((-0.1, 0.5), (-0.1, 0.8)),
            ((0.15, 0.5), (0.15, 0.8)),
            ((0.4, 0.5), (0.4, 0.8)),
            ((0.6, 0.0), (0.75, 0.3)),
        ],
    );
}

fn butterfly(p: &mut Pen) {
    p.move_to(0.0, -0.6).line_to(0.0, 0.6);
    for side in [-1.0, 1.0] {
        p.move_to(0.0, -0.3)
            .quad_to(side * 0.5, -0.7, side * 0.3, -0.1)
            .quad_to(side * 0.1, -0.2, 0.0, -0.3);
    }
    for side in [-1.0, 1.0] {
        p.move_to(0.0, 0.1)
            .quad_to(side * 0.6, 0.5, side * 0.35, 0.3)
            .quad_to(side * 0.1, 0.2, 0.0, 0.1);
    }
    segments(
        p,
        &[((0.0, -0.6), (-0.1, -0.75)), ((0.0, -0.6), (0.1, -0.75))],
    );
}

fn snail(p: &mut Pen) {
    p.circle(0.2, -0.2, 0.4);
    dot(p, (0.35, -0.2), 0.2, -0.2, 0.25);
    p.move_to(-0.5, 0.3)
        .quad_to(-0.3, 0.1, 0.0, 0.15)
        .polyline(&[(0.2, 0.2), (0.15, 0.35), (-0.4, 0.4)])
        .close();
    segments(
        p,
        &[((-0.4, 0.1), (-0.45, -0.05)), ((-0.3, 0.1), (-0.3, -0.05))],
    );
}

fn apple(p: &mut Pen) {
    p.move_to(0.0, -0.7)
        .quad_to(-0.8, -0.5, -0.7, 0.2)
        .quad_to(-0.4, 0.7, 0.0, 0.75)
        .quad_to(0.4, 0.7, 0.7, 0.2)
        .quad_to(0.8, -0.5, 0.0, -0.7);
    p.move_to(0.0, -0.7).line_to(0.05, -0.85);
    p.move_to(0.05, -0.85).quad_to(0.2, -0.85, 0.15, -0.75);
}

fn mushroom(p: &mut Pen) {
    p.move_to(-0.6, -0.2)
        .quad_to(-0.7, -0.7, 0.0, -0.8)
        .quad_to(0.7, -0.7, 0.6, -0.2)
        .line_to(0.3, -0.2)
        .line_to(-0.3, -0.2)
        .close();
    p.rect(-0.2, -0.2, 0.4, 0.8);
    dot(p, (-0.25, -0.5), -0.3, -0.5, 0.08);
    dot(p, (0.2, -0.55), 0.15, -0.55, 0.07);
    dot(p, (0.05, -0.65), 0.0, -0.65, 0.06);
}

fn cup(p: &mut Pen) {
    p.move_to(-0.5, -0.3)
        .line_to(-0.6, 0.5)
        .quad_to(0.0, 0.6, 0.6, 0.5)
        .line_to(0.5, -0.3)
        .close();
    p.move_to(0.5, 0.0).quad_to(0.85, 0.1, 0.65, 0.3);
    p.move_to(-0.7, 0.6)
        .polyline(&[(0.7, 0.6), (0.6, 0.7), (-0.6, 0.7)])
        .close();
}
