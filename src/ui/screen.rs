use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{app::App, clock::format_clock, session::Phase};

/// A UI Screen boundary: draws whatever sits on top of the canvas
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame, canvas: Rect);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn popup(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16 + 2;
    let width = lines.iter().map(|l| l.width() as u16).max().unwrap_or(0) + 4;
    let area = centered(area, width, height);
    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Shown once, before the first figure
pub struct InstructionsScreen;

impl Screen for InstructionsScreen {
    fn render(&self, app: &App, f: &mut Frame, canvas: Rect) {
        let key = Style::default().add_modifier(Modifier::BOLD);
        let config = app.session.config();
        let lines = vec![
            Line::from("Put on your red/cyan glasses."),
            Line::from("Trace over each figure with the mouse."),
            Line::from(""),
            Line::from(vec![
                Span::styled("SPACE", key),
                Span::raw("  start / finish figure / next figure"),
            ]),
            Line::from(vec![Span::styled("ESC", key), Span::raw("  end the session")]),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{} figures, {} minutes, {}",
                    app.session.figure_count(),
                    config.duration,
                    config.difficulty
                ),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        popup(f, canvas, "vistrace", lines);
    }
}

/// Live tracing needs nothing on top of the canvas
pub struct TracingScreen;

impl Screen for TracingScreen {
    fn render(&self, _app: &App, _f: &mut Frame, _canvas: Rect) {}
}

/// Banner along the top of the canvas with the finished figure's time
pub struct ResultScreen;

impl Screen for ResultScreen {
    fn render(&self, app: &App, f: &mut Frame, canvas: Rect) {
        let Some(stat) = app.session.attempts().last() else {
            return;
        };
        let next = if app.session.has_next() {
            "space for the next figure"
        } else {
            "space for the results"
        };
        let banner = Line::from(vec![
            Span::styled(
                format!(
                    " {} traced in {} ",
                    stat.figure.label(),
                    format_clock(stat.elapsed_seconds)
                ),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {next}"),
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]);
        let area = Rect {
            height: canvas.height.min(1),
            ..canvas
        };
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), area);
    }
}

/// Summary once the session is over
pub struct EndedScreen;

impl Screen for EndedScreen {
    fn render(&self, app: &App, f: &mut Frame, canvas: Rect) {
        let Some(stats) = app.session.outcome() else {
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Session {}", stats.reason),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} figures traced in {}",
                stats.completed_count(),
                format_clock(stats.total_seconds())
            )),
        ];
        if let Some(avg) = stats.average_seconds() {
            lines.push(Line::from(format!("{avg:.1} s per figure")));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "press enter to quit",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
        popup(f, canvas, "results", lines);
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Instructions => Box::new(InstructionsScreen),
        Phase::Tracing => Box::new(TracingScreen),
        Phase::Result => Box::new(ResultScreen),
        Phase::Ended => Box::new(EndedScreen),
    }
}
