pub mod analysis;
pub mod live_news;
pub mod toast;

use crate::api::{ApiData, Verdict};
use ratatui::{layout::Rect, style::Color, Frame};

/// A rendered panel fed by background fetch results.
pub trait PanelWidget {
    fn render(&self, frame: &mut Frame, area: Rect, selected: bool);
    fn update_data(&mut self, data: ApiData);
    fn scroll_up(&mut self);
    fn scroll_down(&mut self);
}

/// The binary visual treatment: green for real, red for fake.
pub fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Real => Color::Green,
        Verdict::Fake => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_colors_are_distinct() {
        assert_eq!(verdict_color(Verdict::Real), Color::Green);
        assert_eq!(verdict_color(Verdict::Fake), Color::Red);
    }
}
