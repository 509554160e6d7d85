pub mod widgets;

use crate::app::{App, Focus};
use crate::ui::widgets::PanelWidget;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_input(frame, app, chunks[0]);
    app.analysis().render(frame, chunks[1], false);
    app.news()
        .render(frame, chunks[2], app.focus() == Focus::News);
    draw_help(frame, app, chunks[3]);

    app.toasts().render(frame, frame.area());
}

fn draw_input(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let focused = app.focus() == Focus::Input;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let title = if app.analyze_in_flight() {
        " Headline (analyzing...) "
    } else {
        " Headline "
    };

    let mut spans = vec![Span::styled(
        app.input().to_string(),
        Style::default().fg(Color::White),
    )];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(input, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let text = match app.focus() {
        Focus::Input => "Enter: analyze | Tab: news list | Esc: quit",
        Focus::News => {
            "r: refresh | o: open link | s: sample headline | j/k: scroll | Tab: input | q: quit"
        }
    };

    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
