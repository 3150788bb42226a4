pub mod canvas;
pub mod screen;

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    app::App,
    clock::format_clock,
    session::{Phase, Session},
};

const HORIZONTAL_MARGIN: u16 = 1;
/// Width over height of the canvas in cells, as a ratio: a 4:3 surface on
/// cells twice as tall as they are wide.
const CANVAS_ASPECT: (u32, u32) = (8, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub canvas: Rect,
    pub footer: Rect,
}

/// Header line, aspect-correct centered canvas, footer line
pub fn layout(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    Areas {
        header: rows[0],
        canvas: canvas_area(rows[1]),
        footer: rows[2],
    }
}

/// Largest rectangle with the surface's aspect ratio centered in `area`
pub fn canvas_area(area: Rect) -> Rect {
    let (num, den) = CANVAS_ASPECT;
    let by_height = area.height as u32 * num / den;
    let (width, height) = if by_height <= area.width as u32 {
        ((by_height as u16).max(1), area.height)
    } else {
        (area.width, ((area.width as u32 * den / num) as u16).max(1))
    };
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub fn header_line(session: &Session) -> Line<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let position = if session.figure_count() == 0 {
        "No figures".to_string()
    } else {
        format!(
            "Figure {} of {}",
            session.current_index() + 1,
            session.figure_count()
        )
    };
    let label = match (session.phase(), session.current_figure()) {
        (Phase::Tracing | Phase::Result, Some(figure)) => figure.label(),
        _ => String::new(),
    };

    Line::from(vec![
        Span::styled(position, bold),
        Span::raw("   "),
        Span::styled(format_clock(session.figure_seconds()), bold),
        Span::raw("   "),
        Span::styled(
            format!("{} left", format_clock(session.remaining_seconds())),
            dim,
        ),
        Span::raw("   "),
        Span::styled(label, dim),
    ])
}

pub fn footer_hint(phase: Phase, has_next: bool) -> &'static str {
    match phase {
        Phase::Instructions => "(space) start / (esc) quit",
        Phase::Tracing => "trace with the mouse / (space) done / (esc) end session",
        Phase::Result if has_next => "(space) next figure / (esc) end session",
        Phase::Result => "(space) results / (esc) end session",
        Phase::Ended => "(enter) quit",
    }
}

/// Draw the whole screen for the current phase
pub fn draw(app: &mut App, f: &mut Frame) {
    let areas = layout(f.area());
    app.set_canvas_area(areas.canvas);
    // pick up session changes made outside App::handle
    app.refresh_scene();

    f.render_widget(Paragraph::new(header_line(&app.session)), areas.header);
    f.render_widget(canvas::SceneCanvas::new(app.scene()), areas.canvas);
    f.render_widget(
        Paragraph::new(Span::styled(
            footer_hint(app.session.phase(), app.session.has_next()),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        areas.footer,
    );

    screen::current_screen(app.session.phase()).render(app, f, areas.canvas);
}
