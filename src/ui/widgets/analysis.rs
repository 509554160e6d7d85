use crate::api::{Analysis, ApiData};
use crate::sanitize;
use crate::ui::widgets::{verdict_color, PanelWidget};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Shows the classification of the last submitted headline.
/// Holds at most one result; a failed call leaves it untouched.
#[derive(Debug, Default)]
pub struct AnalysisWidget {
    analysis: Option<Analysis>,
}

impl AnalysisWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }
}

impl PanelWidget for AnalysisWidget {
    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let block = Block::default()
            .title(" Headline Analysis ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let analysis = match &self.analysis {
            Some(analysis) => analysis,
            None => {
                let placeholder =
                    Paragraph::new("Type a headline and press Enter to analyze it.")
                        .style(Style::default().fg(Color::DarkGray))
                        .block(block);
                frame.render_widget(placeholder, area);
                return;
            }
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let color = verdict_color(analysis.verdict);
        let badge_line = Line::from(vec![
            Span::styled(
                format!(" {} ", analysis.label.to_uppercase()),
                Style::default()
                    .fg(Color::Black)
                    .bg(color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {:.1}% confidence", analysis.confidence),
                Style::default().fg(Color::White),
            ),
        ]);
        frame.render_widget(Paragraph::new(badge_line), chunks[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
            .ratio(analysis.confidence / 100.0)
            .label(format!("{:.0}%", analysis.confidence));
        frame.render_widget(gauge, chunks[1]);

        let headline = Paragraph::new(sanitize::clean_text(&analysis.headline))
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        frame.render_widget(headline, chunks[2]);
    }

    fn update_data(&mut self, data: ApiData) {
        match data {
            ApiData::Analysis(analysis) => {
                self.analysis = Some(analysis);
            }
            // Failures never overwrite a displayed result
            ApiData::Error(_) | ApiData::Loading | ApiData::LiveNews(_) => {}
        }
    }

    fn scroll_up(&mut self) {}

    fn scroll_down(&mut self) {}
}
