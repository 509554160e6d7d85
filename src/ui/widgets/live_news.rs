use crate::api::{ApiData, NewsArticle};
use crate::sanitize;
use crate::timefmt;
use crate::ui::widgets::{verdict_color, PanelWidget};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// The batch of server-classified live news. Every refresh replaces
/// the whole list; there is no merging.
pub struct LiveNewsWidget {
    articles: Vec<NewsArticle>,
    loading: bool,
    error: Option<String>,
    scroll_state: ListState,
}

impl LiveNewsWidget {
    pub fn new() -> Self {
        let mut scroll_state = ListState::default();
        scroll_state.select(Some(0));

        Self {
            articles: Vec::new(),
            loading: true,
            error: None,
            scroll_state,
        }
    }

    /// Called when a refresh starts: the old batch is discarded
    /// immediately and the loading placeholder takes its place.
    pub fn set_loading(&mut self) {
        self.articles.clear();
        self.loading = true;
        self.error = None;
        self.scroll_state.select(Some(0));
    }

    pub fn count(&self) -> usize {
        self.articles.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    pub fn selected_article(&self) -> Option<&NewsArticle> {
        let idx = self.scroll_state.selected()?;
        self.articles.get(idx)
    }

    /// Meta line under an article title: source, relative age, link marker.
    fn meta_text(article: &NewsArticle, now: DateTime<Utc>) -> String {
        let source = article.source.as_deref().unwrap_or("Unknown source");
        let age = match article.published_at {
            Some(published) => timefmt::time_ago(now, published),
            None => "Unknown time".to_string(),
        };

        let mut meta = format!("{} | {}", sanitize::clean_text(source), age);
        if article
            .url
            .as_deref()
            .and_then(sanitize::safe_link)
            .is_some()
        {
            meta.push_str(" | link");
        }
        meta
    }
}

impl Default for LiveNewsWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelWidget for LiveNewsWidget {
    fn render(&self, frame: &mut Frame, area: Rect, selected: bool) {
        let border_style = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };

        let title = if self.articles.is_empty() {
            " Live News ".to_string()
        } else {
            format!(" Live News ({} articles analyzed) ", self.articles.len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.loading && self.articles.is_empty() {
            let loading_text =
                List::new(vec![ListItem::new("Fetching and analyzing live news...")]).block(block);
            frame.render_widget(loading_text, area);
            return;
        }

        if self.error.is_some() {
            let error_text =
                List::new(vec![ListItem::new("Failed to load news articles")]).block(block);
            frame.render_widget(error_text, area);
            return;
        }

        if self.articles.is_empty() {
            let empty_text =
                List::new(vec![ListItem::new("No news articles available")]).block(block);
            frame.render_widget(empty_text, area);
            return;
        }

        let now = Utc::now();
        let title_width = area.width.saturating_sub(14).max(20) as usize;

        let items: Vec<ListItem> = self
            .articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let color = verdict_color(article.verdict);
                let clean_title = sanitize::clean_text(&article.title);
                let shown_title = textwrap::wrap(&clean_title, title_width)
                    .into_iter()
                    .next()
                    .map(|line| line.into_owned())
                    .unwrap_or_default();

                let title_line = Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("[{} {:.0}%] ", article.label.to_uppercase(), article.confidence),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(shown_title, Style::default().fg(Color::White)),
                ]);

                let meta_line = Line::from(vec![
                    Span::styled("   ", Style::default()),
                    Span::styled(
                        Self::meta_text(article, now),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);

                ListItem::new(vec![title_line, meta_line])
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = self.scroll_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn update_data(&mut self, data: ApiData) {
        self.loading = false;
        match data {
            ApiData::LiveNews(articles) => {
                self.articles = articles;
                self.error = None;
                self.scroll_state.select(Some(0));
            }
            ApiData::Error(e) => {
                self.error = Some(e);
            }
            ApiData::Loading => {
                self.loading = true;
            }
            ApiData::Analysis(_) => {}
        }
    }

    fn scroll_up(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected > 0 {
                self.scroll_state.select(Some(selected - 1));
            }
        }
    }

    fn scroll_down(&mut self) {
        if let Some(selected) = self.scroll_state.selected() {
            if selected < self.articles.len().saturating_sub(1) {
                self.scroll_state.select(Some(selected + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Verdict;
    use chrono::Duration;

    fn make_article(idx: usize) -> NewsArticle {
        NewsArticle {
            title: format!("Article {}", idx),
            source: Some("Test Wire".to_string()),
            published_at: Some(Utc::now() - Duration::hours(idx as i64)),
            label: "Real".to_string(),
            verdict: Verdict::Real,
            confidence: 75.0,
            url: Some(format!("https://example.com/{}", idx)),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let widget = LiveNewsWidget::new();
        assert!(widget.is_loading());
        assert_eq!(widget.count(), 0);
        assert!(!widget.is_failed());
    }

    #[test]
    fn test_update_replaces_batch() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(vec![make_article(0), make_article(1)]));
        assert_eq!(widget.count(), 2);

        widget.update_data(ApiData::LiveNews(vec![make_article(7)]));
        assert_eq!(widget.count(), 1);
        assert_eq!(widget.selected_article().unwrap().title, "Article 7");
    }

    #[test]
    fn test_set_loading_clears_list() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(vec![make_article(0)]));
        assert_eq!(widget.count(), 1);

        widget.set_loading();
        assert!(widget.is_loading());
        assert_eq!(widget.count(), 0);
    }

    #[test]
    fn test_error_after_clear_leaves_failed_state() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(vec![make_article(0)]));
        widget.set_loading();
        widget.update_data(ApiData::Error("HTTP 500".to_string()));

        assert!(widget.is_failed());
        assert!(!widget.is_loading());
        assert_eq!(widget.count(), 0);
    }

    #[test]
    fn test_success_clears_failed_state() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::Error("HTTP 500".to_string()));
        widget.update_data(ApiData::LiveNews(vec![make_article(0)]));
        assert!(!widget.is_failed());
        assert_eq!(widget.count(), 1);
    }

    #[test]
    fn test_empty_batch_is_not_failure() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(Vec::new()));
        assert!(!widget.is_failed());
        assert!(!widget.is_loading());
        assert_eq!(widget.count(), 0);
    }

    #[test]
    fn test_scroll_bounds() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(vec![
            make_article(0),
            make_article(1),
            make_article(2),
        ]));

        assert_eq!(widget.scroll_state.selected(), Some(0));
        widget.scroll_up();
        assert_eq!(widget.scroll_state.selected(), Some(0));

        widget.scroll_down();
        widget.scroll_down();
        assert_eq!(widget.scroll_state.selected(), Some(2));
        widget.scroll_down();
        assert_eq!(widget.scroll_state.selected(), Some(2));
    }

    #[test]
    fn test_selection_resets_on_new_batch() {
        let mut widget = LiveNewsWidget::new();
        widget.update_data(ApiData::LiveNews(vec![
            make_article(0),
            make_article(1),
            make_article(2),
        ]));
        widget.scroll_down();
        widget.scroll_down();

        widget.update_data(ApiData::LiveNews(vec![make_article(5), make_article(6)]));
        assert_eq!(widget.selected_article().unwrap().title, "Article 5");
    }

    #[test]
    fn test_meta_text_full() {
        let now = Utc::now();
        let mut article = make_article(0);
        article.published_at = Some(now - Duration::hours(3));

        assert_eq!(
            LiveNewsWidget::meta_text(&article, now),
            "Test Wire | 3 hours ago | link"
        );
    }

    #[test]
    fn test_meta_text_missing_fields() {
        let now = Utc::now();
        let article = NewsArticle {
            title: "Bare".to_string(),
            source: None,
            published_at: None,
            label: "Fake".to_string(),
            verdict: Verdict::Fake,
            confidence: 50.0,
            url: None,
        };

        assert_eq!(
            LiveNewsWidget::meta_text(&article, now),
            "Unknown source | Unknown time"
        );
    }

    #[test]
    fn test_meta_text_unsafe_link_not_marked() {
        let now = Utc::now();
        let mut article = make_article(0);
        article.url = Some("javascript:alert(1)".to_string());

        assert_eq!(
            LiveNewsWidget::meta_text(&article, now),
            "Test Wire | Just now"
        );
    }
}
