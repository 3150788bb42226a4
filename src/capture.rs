use kurbo::{Point, Rect, Vec2};

/// One continuous pointer-down to pointer-up stroke, in surface coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TracePath {
    points: Vec<Point>,
}

impl TracePath {
    pub fn start(at: Point) -> Self {
        Self { points: vec![at] }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke needs two points to leave a mark
    pub fn is_drawable(&self) -> bool {
        self.points.len() > 1
    }
}

/// Converts host pointer positions into drawing-surface coordinates:
/// `local = (screen - offset) * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    pub offset: Vec2,
    pub scale: Vec2,
}

impl SurfaceMapping {
    pub const IDENTITY: SurfaceMapping = SurfaceMapping {
        offset: Vec2::ZERO,
        scale: Vec2::new(1.0, 1.0),
    };

    pub fn new(offset: Vec2, scale: Vec2) -> Self {
        Self { offset, scale }
    }

    /// Map a host rectangle onto a surface of `surface` logical size
    pub fn fit(host: Rect, surface: (f64, f64)) -> Self {
        let (w, h) = (host.width().max(1.0), host.height().max(1.0));
        Self {
            offset: host.origin().to_vec2(),
            scale: Vec2::new(surface.0 / w, surface.1 / h),
        }
    }

    pub fn to_surface(&self, screen: Point) -> Point {
        let local = screen - self.offset;
        Point::new(local.x * self.scale.x, local.y * self.scale.y)
    }
}

impl Default for SurfaceMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Strokes recorded for the current figure plus the one in progress.
#[derive(Debug, Clone, Default)]
pub struct PathCapture {
    strokes: Vec<TracePath>,
    active: Option<TracePath>,
    pointer: Option<Point>,
}

impl PathCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.pointer = Some(at);
        if let Some(open) = self.active.take() {
            self.strokes.push(open);
        }
        self.active = Some(TracePath::start(at));
    }

    /// Tracks the pointer and extends the active stroke, if any.
    pub fn pointer_move(&mut self, at: Point) {
        self.pointer = Some(at);
        if let Some(active) = self.active.as_mut() {
            active.push(at);
        }
    }

    /// Moves the pointer without recording, for hover outside a trace.
    pub fn hover(&mut self, at: Point) {
        self.pointer = Some(at);
    }

    pub fn pointer_up(&mut self) {
        if let Some(done) = self.active.take() {
            self.strokes.push(done);
        }
    }

    /// Pointer left the surface: close the stroke and hide the indicator
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
        self.pointer = None;
    }

    pub fn is_tracing(&self) -> bool {
        self.active.is_some()
    }

    pub fn strokes(&self) -> &[TracePath] {
        &self.strokes
    }

    pub fn active(&self) -> Option<&TracePath> {
        self.active.as_ref()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Drop every stroke, keeping the pointer position
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_records_k_plus_one_points() {
        let mut capture = PathCapture::new();
        capture.pointer_down(Point::new(0.0, 0.0));
        for k in 1..=5 {
            capture.pointer_move(Point::new(k as f64, 2.0 * k as f64));
        }
        capture.pointer_up();

        assert_eq!(capture.strokes().len(), 1);
        let stroke = &capture.strokes()[0];
        assert_eq!(stroke.len(), 6);
        assert_eq!(stroke.points()[0], Point::new(0.0, 0.0));
        assert_eq!(stroke.points()[5], Point::new(5.0, 10.0));
        assert!(capture.active().is_none());
    }

    #[test]
    fn test_moves_without_press_only_track_pointer() {
        let mut capture = PathCapture::new();
        capture.pointer_move(Point::new(3.0, 4.0));
        capture.pointer_up();

        assert!(capture.strokes().is_empty());
        assert_eq!(capture.pointer(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_click_without_drag_is_degenerate() {
        let mut capture = PathCapture::new();
        capture.pointer_down(Point::new(1.0, 1.0));
        capture.pointer_up();

        assert_eq!(capture.strokes().len(), 1);
        assert!(!capture.strokes()[0].is_drawable());
    }

    #[test]
    fn test_multiple_strokes_accumulate() {
        let mut capture = PathCapture::new();
        for start in [0.0, 10.0, 20.0] {
            capture.pointer_down(Point::new(start, 0.0));
            capture.pointer_move(Point::new(start + 1.0, 0.0));
            capture.pointer_up();
        }
        assert_eq!(capture.strokes().len(), 3);
        assert!(capture.strokes().iter().all(TracePath::is_drawable));
    }

    #[test]
    fn test_leave_closes_stroke_and_hides_pointer() {
        let mut capture = PathCapture::new();
        capture.pointer_down(Point::new(0.0, 0.0));
        capture.pointer_move(Point::new(1.0, 0.0));
        capture.pointer_leave();

        assert_eq!(capture.strokes().len(), 1);
        assert!(!capture.is_tracing());
        assert_eq!(capture.pointer(), None);
    }

    #[test]
    fn test_clear_keeps_pointer() {
        let mut capture = PathCapture::new();
        capture.pointer_down(Point::new(0.0, 0.0));
        capture.pointer_move(Point::new(1.0, 0.0));
        capture.clear();

        assert!(capture.strokes().is_empty());
        assert!(capture.active().is_none());
        assert_eq!(capture.pointer(), Some(Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_mapping_subtracts_offset_then_scales() {
        let mapping = SurfaceMapping::new(Vec2::new(10.0, 5.0), Vec2::new(2.0, 4.0));
        assert_eq!(mapping.to_surface(Point::new(15.0, 7.0)), Point::new(10.0, 8.0));

        let fit = SurfaceMapping::fit(Rect::new(2.0, 1.0, 110.0, 82.0), (1080.0, 810.0));
        assert_eq!(fit.to_surface(Point::new(2.0, 1.0)), Point::ORIGIN);
        assert_eq!(fit.to_surface(Point::new(110.0, 82.0)), Point::new(1080.0, 810.0));
    }
}
