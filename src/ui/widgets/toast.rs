use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_millis(5000);

const MAX_TOAST_WIDTH: u16 = 46;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created: Instant,
}

/// Ephemeral notifications, append-only, oldest first.
#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.push_at(message, kind, Instant::now());
    }

    fn push_at(&mut self, message: impl Into<String>, kind: ToastKind, created: Instant) {
        self.toasts.push(Toast {
            message: message.into(),
            kind,
            created,
        });
    }

    /// Drop toasts older than the TTL. Safe to call at any cadence,
    /// on an already-empty stack included.
    pub fn sweep(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.duration_since(toast.created) < TOAST_TTL);
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Overlay the stack in the top-right corner, one row per toast.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for (row, toast) in self.toasts.iter().enumerate() {
            let width = (toast.message.len() as u16 + 4)
                .min(MAX_TOAST_WIDTH)
                .min(area.width);
            let y = area.y + 1 + row as u16;
            if y >= area.y + area.height {
                break;
            }

            let toast_area = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, 1);

            let (marker, color) = match toast.kind {
                ToastKind::Info => ("i", Color::Cyan),
                ToastKind::Success => ("+", Color::Green),
                ToastKind::Error => ("!", Color::Red),
            };

            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", marker),
                    Style::default()
                        .fg(Color::Black)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", toast.message),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
            ]);

            frame.render_widget(Clear, toast_area);
            frame.render_widget(Paragraph::new(line), toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_call_order() {
        let mut stack = ToastStack::new();
        stack.push("first", ToastKind::Info);
        stack.push("second", ToastKind::Success);
        stack.push("third", ToastKind::Error);

        let messages: Vec<&str> = stack.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sweep_expires_after_ttl() {
        let start = Instant::now();
        let mut stack = ToastStack::new();
        stack.push_at("old", ToastKind::Info, start);

        stack.sweep(start + Duration::from_millis(4999));
        assert_eq!(stack.len(), 1);

        stack.sweep(start + Duration::from_millis(5000));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_sweep_keeps_younger_toasts() {
        let start = Instant::now();
        let mut stack = ToastStack::new();
        stack.push_at("old", ToastKind::Info, start);
        stack.push_at("new", ToastKind::Info, start + Duration::from_secs(3));

        stack.sweep(start + Duration::from_secs(6));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.iter().next().unwrap().message, "new");
    }

    #[test]
    fn test_sweep_on_empty_stack_is_noop() {
        let mut stack = ToastStack::new();
        stack.sweep(Instant::now());
        stack.sweep(Instant::now());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_multiple_toasts_coexist() {
        let mut stack = ToastStack::new();
        for i in 0..5 {
            stack.push(format!("toast {}", i), ToastKind::Info);
        }
        assert_eq!(stack.len(), 5);
    }
}
