//! Binds the session to terminal input and keeps the rendered scene current.

use crate::capture::SurfaceMapping;
use crate::render::{DisplayList, Palette, Renderer, SURFACE_HEIGHT, SURFACE_WIDTH};
use crate::runtime::{EventSource, Runner, Ticker, TraceEvent};
use crate::session::{EndReason, Session};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use kurbo::Point;
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Redraw,
    Quit,
}

pub struct App {
    pub session: Session,
    renderer: Renderer,
    palette: Palette,
    scene: DisplayList,
    canvas: Option<Rect>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let palette = Palette::from(session.config());
        let mut app = Self {
            session,
            renderer: Renderer::default(),
            palette,
            scene: DisplayList::default(),
            canvas: None,
        };
        app.refresh_scene();
        app
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn scene(&self) -> &DisplayList {
        &self.scene
    }

    /// Rebuild the display list from the session state
    pub fn refresh_scene(&mut self) {
        let frame = self.session.frame();
        self.renderer.render(&frame, &self.palette, Some(&mut self.scene));
    }

    /// Record where the canvas landed on screen so mouse cells map onto the
    /// drawing surface.
    pub fn set_canvas_area(&mut self, area: Rect) {
        if self.canvas == Some(area) {
            return;
        }
        self.canvas = Some(area);
        let host = kurbo::Rect::new(
            area.x as f64,
            area.y as f64,
            (area.x + area.width) as f64,
            (area.y + area.height) as f64,
        );
        self.session
            .set_surface_mapping(SurfaceMapping::fit(host, (SURFACE_WIDTH, SURFACE_HEIGHT)));
    }

    pub fn handle(&mut self, event: TraceEvent) -> Control {
        let control = match event {
            TraceEvent::Tick => {
                let was_ended = self.session.is_ended();
                self.session.tick();
                if self.session.is_ended() && !was_ended {
                    tracing::info!("session time is up");
                }
                Control::Redraw
            }
            TraceEvent::Key(key) => self.on_key(key),
            TraceEvent::Mouse(mouse) => self.on_mouse(mouse),
            TraceEvent::FocusLost => {
                self.session.pointer_leave();
                Control::Redraw
            }
            TraceEvent::Resize => Control::Redraw,
        };
        if control == Control::Redraw {
            self.refresh_scene();
        }
        control
    }

    /// Handle the runner's next event. With the input gone nothing could
    /// dismiss the end screen, so an ended session quits on its own.
    pub fn step<E: EventSource, T: Ticker>(&mut self, runner: &Runner<E, T>) -> Control {
        let control = self.handle(runner.step());
        if control != Control::Quit && runner.is_disconnected() && self.session.is_ended() {
            tracing::info!("no input left, leaving the end screen");
            return Control::Quit;
        }
        control
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.session.terminate(EndReason::Terminated);
            return Control::Quit;
        }
        if self.session.is_ended() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q') => {
                    Control::Quit
                }
                _ => Control::Continue,
            };
        }
        match key.code {
            KeyCode::Char(' ') => {
                self.session.proceed();
                Control::Redraw
            }
            KeyCode::Esc => {
                self.session.terminate(EndReason::Terminated);
                Control::Quit
            }
            _ => Control::Continue,
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) -> Control {
        let Some(area) = self.canvas else {
            return Control::Continue;
        };
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        // cell centers, so the first and last cells do not sit on the edge
        let at = Point::new(mouse.column as f64 + 0.5, mouse.row as f64 + 0.5);

        match mouse.kind {
            _ if !inside => self.session.pointer_leave(),
            MouseEventKind::Down(MouseButton::Left) => self.session.pointer_down(at),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                self.session.pointer_move(at)
            }
            MouseEventKind::Up(MouseButton::Left) => self.session.pointer_up(),
            _ => return Control::Continue,
        }
        Control::Redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::figure::{Difficulty, Figure, FigureKind};
    use crate::render::DrawCommand;
    use crate::sequencer::FigureSequence;
    use crate::session::{CollectingSink, Phase};
    use crossterm::event::KeyEventState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn app(n: usize) -> (App, CollectingSink) {
        let sink = CollectingSink::new();
        let figures = ["circle", "square", "star5"]
            .iter()
            .take(n)
            .map(|id| Figure::shape(id, FigureKind::Geometric, Difficulty::Easy))
            .collect();
        let session = Session::new(
            SessionConfig::default(),
            FigureSequence::ordered(figures),
            Box::new(sink.clone()),
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        (App::new(session), sink)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn strokes(app: &App) -> usize {
        app.scene()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count()
    }

    #[test]
    fn space_walks_the_phases() {
        let (mut app, _) = app(2);
        assert_eq!(app.handle(TraceEvent::Key(key(KeyCode::Char(' ')))), Control::Redraw);
        assert_eq!(app.session.phase(), Phase::Tracing);
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        assert_eq!(app.session.phase(), Phase::Result);
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        assert_eq!(app.session.current_index(), 1);
    }

    #[test]
    fn key_release_is_ignored() {
        let (mut app, _) = app(1);
        let release = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(app.on_key(release), Control::Continue);
        assert_eq!(app.session.phase(), Phase::Instructions);
    }

    #[test]
    fn escape_terminates_and_quits() {
        let (mut app, sink) = app(2);
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        assert_eq!(app.handle(TraceEvent::Key(key(KeyCode::Esc))), Control::Quit);
        assert!(app.session.is_ended());
        assert_eq!(sink.delivered().len(), 1);
        assert_eq!(sink.delivered()[0].reason, EndReason::Terminated);
    }

    #[test]
    fn ctrl_c_terminates_once() {
        let (mut app, sink) = app(1);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c), Control::Quit);
        assert_eq!(app.on_key(ctrl_c), Control::Quit);
        assert_eq!(sink.delivered().len(), 1);
    }

    #[test]
    fn mouse_drag_records_a_stroke() {
        let (mut app, _) = app(1);
        app.set_canvas_area(Rect::new(0, 1, 108, 81));
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        let before = strokes(&app);

        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)));
        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 11)));
        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Up(MouseButton::Left), 12, 11)));

        assert_eq!(app.session.capture().strokes().len(), 1);
        assert_eq!(
            app.session.capture().strokes()[0].points()[0],
            Point::new(105.0, 95.0)
        );
        assert_eq!(strokes(&app), before + 1);
    }

    #[test]
    fn leaving_the_canvas_closes_the_stroke() {
        let (mut app, _) = app(1);
        app.set_canvas_area(Rect::new(0, 1, 108, 81));
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)));
        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 200, 10)));

        assert!(!app.session.capture().is_tracing());
        assert_eq!(app.session.capture().pointer(), None);

        app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)));
        app.handle(TraceEvent::FocusLost);
        assert!(!app.session.capture().is_tracing());
        assert_eq!(app.session.capture().strokes().len(), 2);
    }

    #[test]
    fn mouse_before_layout_is_ignored() {
        let (mut app, _) = app(1);
        app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        let control =
            app.handle(TraceEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1)));
        assert_eq!(control, Control::Continue);
        assert!(app.session.capture().strokes().is_empty());
    }

    #[test]
    fn ended_session_quits_on_any_exit_key() {
        let (mut app, sink) = app(1);
        for _ in 0..3 {
            app.handle(TraceEvent::Key(key(KeyCode::Char(' '))));
        }
        assert!(app.session.is_ended());
        assert_eq!(app.on_key(key(KeyCode::Char('x'))), Control::Continue);
        assert_eq!(app.on_key(key(KeyCode::Enter)), Control::Quit);
        assert_eq!(sink.delivered()[0].reason, EndReason::Completed);
    }
}
