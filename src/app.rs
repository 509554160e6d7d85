use crate::api::{ApiData, ApiFetcher, ApiMessage, Panel};
use crate::api::{live::LiveNewsFetcher, predict::PredictFetcher};
use crate::config::Config;
use crate::sanitize;
use crate::ui::widgets::analysis::AnalysisWidget;
use crate::ui::widgets::live_news::LiveNewsWidget;
use crate::ui::widgets::toast::{ToastKind, ToastStack};
use crate::ui::widgets::PanelWidget;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Example headlines cycled into the input field for quick testing.
const SAMPLE_HEADLINES: [&str; 6] = [
    "SHOCKING: Scientists Discover Cure for Aging That Doctors Don't Want You to Know!",
    "Local Government Announces New Infrastructure Development Plan",
    "You Won't Believe This One Weird Trick to Lose Weight Fast!",
    "Study Shows Benefits of Regular Exercise on Mental Health",
    "BREAKING: Celebrity Spotted with Secret Twin Nobody Knew About!",
    "Research Team Publishes Findings on Climate Change Impact",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    News,
}

/// A prepared remote call for the event loop to spawn.
pub struct Command {
    pub panel: Panel,
    pub fetcher: Box<dyn ApiFetcher>,
}

/// All view state. Key handling and fetch completions mutate it;
/// rendering reads it. Each of the two remote operations carries its
/// own in-flight guard, so neither can be re-entered while pending,
/// while the two remain free to overlap each other.
pub struct App {
    base_url: String,
    client: reqwest::Client,
    input: String,
    focus: Focus,
    analysis: AnalysisWidget,
    news: LiveNewsWidget,
    toasts: ToastStack,
    analyze_in_flight: bool,
    fetch_in_flight: bool,
    sample_index: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_secs))
            .user_agent(concat!("veritui/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: config.server.base_url.trim_end_matches('/').to_string(),
            client,
            input: String::new(),
            focus: Focus::Input,
            analysis: AnalysisWidget::new(),
            news: LiveNewsWidget::new(),
            toasts: ToastStack::new(),
            analyze_in_flight: false,
            fetch_in_flight: false,
            sample_index: 0,
            should_quit: false,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn analysis(&self) -> &AnalysisWidget {
        &self.analysis
    }

    pub fn news(&self) -> &LiveNewsWidget {
        &self.news
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    pub fn analyze_in_flight(&self) -> bool {
        self.analyze_in_flight
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Route one key press. Returns a remote call when the key
    /// triggered one.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.should_quit = true;
            return None;
        }

        if key.code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Input => Focus::News,
                Focus::News => Focus::Input,
            };
            return None;
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Enter => self.submit_headline(),
                KeyCode::Backspace => {
                    self.input.pop();
                    None
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.input.push(c);
                    None
                }
                _ => None,
            },
            Focus::News => match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    None
                }
                KeyCode::Char('r') => self.refresh_news(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.news.scroll_up();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.news.scroll_down();
                    None
                }
                KeyCode::Char('o') | KeyCode::Enter => {
                    self.open_selected();
                    None
                }
                KeyCode::Char('s') => {
                    self.insert_sample();
                    None
                }
                _ => None,
            },
        }
    }

    /// Submit the current input for classification. Empty input is
    /// rejected with a toast before any request exists; a pending
    /// analysis makes this a no-op.
    pub fn submit_headline(&mut self) -> Option<Command> {
        if self.analyze_in_flight {
            return None;
        }

        let headline = self.input.trim().to_string();
        if headline.is_empty() {
            self.toasts
                .push("Please enter a headline to analyze", ToastKind::Error);
            return None;
        }

        self.analyze_in_flight = true;
        Some(Command {
            panel: Panel::Analysis,
            fetcher: Box::new(PredictFetcher::new(
                self.base_url.clone(),
                headline,
                self.client.clone(),
            )),
        })
    }

    /// Start a live news refresh: the displayed batch is cleared
    /// right away and the loading placeholder shows until the call
    /// resolves. A pending refresh makes this a no-op.
    pub fn refresh_news(&mut self) -> Option<Command> {
        if self.fetch_in_flight {
            return None;
        }

        self.fetch_in_flight = true;
        self.news.set_loading();
        Some(Command {
            panel: Panel::LiveNews,
            fetcher: Box::new(LiveNewsFetcher::new(self.base_url.clone(), self.client.clone())),
        })
    }

    /// Apply one completed fetch. The matching in-flight guard is
    /// cleared on every path, success or failure.
    pub fn apply_message(&mut self, message: ApiMessage) {
        match message.panel {
            Panel::Analysis => {
                self.analyze_in_flight = false;
                match message.data {
                    ApiData::Analysis(_) => {
                        self.analysis.update_data(message.data);
                        self.toasts
                            .push("Analysis completed successfully", ToastKind::Success);
                    }
                    ApiData::Error(_) => {
                        // Previous result stays on screen
                        self.toasts.push(
                            "Error analyzing headline. Please try again.",
                            ToastKind::Error,
                        );
                    }
                    ApiData::Loading | ApiData::LiveNews(_) => {}
                }
            }
            Panel::LiveNews => {
                self.fetch_in_flight = false;
                match message.data {
                    ApiData::LiveNews(ref articles) => {
                        let count = articles.len();
                        self.news.update_data(message.data);
                        self.toasts.push(
                            format!("Fetched and analyzed {} news articles", count),
                            ToastKind::Success,
                        );
                    }
                    ApiData::Error(_) => {
                        self.news.update_data(message.data);
                        self.toasts
                            .push("Error fetching news. Please try again.", ToastKind::Error);
                    }
                    ApiData::Loading | ApiData::Analysis(_) => {}
                }
            }
        }
    }

    /// Periodic housekeeping from the event loop tick.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.sweep(now);
    }

    /// Open the selected article in the system browser, if its URL
    /// passes the scheme check.
    fn open_selected(&mut self) {
        let Some(article) = self.news.selected_article() else {
            return;
        };

        let safe = article.url.as_deref().and_then(sanitize::safe_link);
        match safe {
            Some(url) => {
                if let Err(error) = open::that(&url) {
                    tracing::warn!(%error, url, "failed to open article link");
                    self.toasts
                        .push("Could not open the article link", ToastKind::Error);
                }
            }
            None => {
                self.toasts
                    .push("Article has no usable link", ToastKind::Info);
            }
        }
    }

    /// Cycle the next sample headline into the input field.
    fn insert_sample(&mut self) {
        self.input = SAMPLE_HEADLINES[self.sample_index % SAMPLE_HEADLINES.len()].to_string();
        self.sample_index += 1;
        self.focus = Focus::Input;
    }
}
