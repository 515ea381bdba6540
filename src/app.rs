use std::future::Future;
use std::time::Duration;

use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::chapter::{Chapter, SurahContent};
use crate::config::Config;
use crate::emotion::{classify, Emotion};
use crate::quran::{self, ChapterListing, QuranClient};
use crate::recommendation::{advisor_message, recommendations_for, Recommendation};
use crate::selection::{SelectOutcome, Selection};
use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chapters,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Results delivered back to the event loop by background tasks.
#[derive(Debug)]
pub enum Fetched {
    Chapters(ChapterListing),
    Content { token: u64, content: SurahContent },
    Recommendations { request: u64, emotion: Emotion, message: String },
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub show_help: bool,

    // Chapter list
    pub chapters: Vec<Chapter>,
    pub chapter_state: ListState,
    pub chapters_loading: bool,
    pub chapters_error: Option<String>,

    // Search state
    pub search_input: String,
    pub search_cursor: usize, // cursor position in search_input, in chars
    pub searching: bool,
    pub has_searched: bool,
    search_request: u64,
    pub emotion: Option<Emotion>,
    pub advisor_message: String,
    pub recommendations: Vec<Recommendation>,
    pub recommendation_state: ListState,

    // Modal
    pub selection: Selection,
    pub modal_scroll: u16,
    pub modal_height: u16,
    pub modal_lines: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    client: QuranClient,
    thinking_delay: Duration,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(config: &Config, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Chapters,
            input_mode: InputMode::Normal,
            show_help: false,

            chapters: Vec::new(),
            chapter_state: ListState::default(),
            chapters_loading: false,
            chapters_error: None,

            search_input: String::new(),
            search_cursor: 0,
            searching: false,
            has_searched: false,
            search_request: 0,
            emotion: None,
            advisor_message: String::new(),
            recommendations: Vec::new(),
            recommendation_state: ListState::default(),

            selection: Selection::new(),
            modal_scroll: 0,
            modal_height: 0,
            modal_lines: 0,

            animation_frame: 0,

            client: QuranClient::from_config(config),
            thinking_delay: Duration::from_millis(config.thinking_delay_ms),
            events,
        }
    }

    fn spawn_fetch<F>(&self, fetch: F)
    where
        F: Future<Output = Fetched> + Send + 'static,
    {
        let events = self.events.clone();
        tokio::spawn(async move {
            // The receiver is gone once the UI has quit
            let _ = events.send(AppEvent::Fetched(fetch.await));
        });
    }

    pub fn load_chapters(&mut self) {
        self.chapters_loading = true;
        self.chapters_error = None;
        let client = self.client.clone();
        self.spawn_fetch(async move { Fetched::Chapters(quran::load_chapters(&client).await) });
    }

    /// Apply a finished background fetch.
    pub fn apply(&mut self, fetched: Fetched) {
        match fetched {
            Fetched::Chapters(listing) => {
                info!(count = listing.chapters.len(), "chapters loaded");
                self.chapters_loading = false;
                self.chapters_error = listing.error;
                self.chapters = listing.chapters;
                let selected = (!self.chapters.is_empty()).then_some(0);
                self.chapter_state.select(selected);
            }
            Fetched::Content { token, content } => {
                let id = content.header.id;
                if self.selection.resolve(token, content) {
                    self.modal_scroll = 0;
                } else {
                    debug!(chapter = id, token, "discarding stale surah content");
                }
            }
            Fetched::Recommendations { request, emotion, message } => {
                if request != self.search_request {
                    debug!(request, "discarding stale recommendations");
                    return;
                }
                info!(%emotion, "recommendations ready");
                self.searching = false;
                self.has_searched = true;
                self.emotion = Some(emotion);
                self.advisor_message = message;
                self.recommendations = recommendations_for(emotion).to_vec();
                self.recommendation_state.select(Some(0));
            }
        }
    }

    // Screen switching
    pub fn switch_screen(&mut self, screen: Screen) {
        self.close_modal();
        self.screen = screen;
        self.input_mode = match screen {
            Screen::Search if !self.has_searched => InputMode::Editing,
            _ => InputMode::Normal,
        };
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // List navigation on the active screen
    fn active_list(&mut self) -> (&mut ListState, usize) {
        match self.screen {
            Screen::Chapters => (&mut self.chapter_state, self.chapters.len()),
            Screen::Search => (&mut self.recommendation_state, self.recommendations.len()),
        }
    }

    pub fn nav_down(&mut self) {
        let (state, len) = self.active_list();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| (i + 1).min(len - 1));
        state.select(Some(i));
    }

    pub fn nav_up(&mut self) {
        let (state, len) = self.active_list();
        if len == 0 {
            return;
        }
        let i = state.selected().map_or(0, |i| i.saturating_sub(1));
        state.select(Some(i));
    }

    pub fn nav_first(&mut self) {
        let (state, len) = self.active_list();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn nav_last(&mut self) {
        let (state, len) = self.active_list();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }

    pub fn selected_chapter(&self) -> Option<&Chapter> {
        self.chapter_state.selected().and_then(|i| self.chapters.get(i))
    }

    pub fn selected_recommendation(&self) -> Option<&Recommendation> {
        self.recommendation_state
            .selected()
            .and_then(|i| self.recommendations.get(i))
    }

    /// Open the highlighted chapter or card, or close it if it is already open.
    pub fn open_selected(&mut self) {
        match self.screen {
            Screen::Chapters => {
                if let Some(chapter) = self.selected_chapter().cloned() {
                    self.open_chapter(chapter);
                }
            }
            Screen::Search => {
                if let Some(rec) = self.selected_recommendation().copied() {
                    self.open_recommendation(rec);
                }
            }
        }
    }

    pub fn open_chapter(&mut self, chapter: Chapter) {
        if let SelectOutcome::Fetch(token) = self.selection.toggle(chapter.id) {
            self.modal_scroll = 0;
            let client = self.client.clone();
            self.spawn_fetch(async move {
                let content = quran::load_chapter_content(&client, &chapter).await;
                Fetched::Content { token, content }
            });
        }
    }

    pub fn open_recommendation(&mut self, rec: Recommendation) {
        if let SelectOutcome::Fetch(token) = self.selection.toggle(rec.id) {
            self.modal_scroll = 0;
            let client = self.client.clone();
            self.spawn_fetch(async move {
                let content = quran::load_recommendation_content(&client, &rec).await;
                Fetched::Content { token, content }
            });
        }
    }

    pub fn close_modal(&mut self) {
        self.selection.close();
        self.modal_scroll = 0;
    }

    // Search
    pub fn submit_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            return;
        }

        self.search_request += 1;
        self.searching = true;
        self.has_searched = false;
        self.input_mode = InputMode::Normal;
        self.close_modal();

        let request = self.search_request;
        let delay = self.thinking_delay;
        self.spawn_fetch(async move {
            tokio::time::sleep(delay).await;
            let emotion = classify(&query);
            Fetched::Recommendations {
                request,
                emotion,
                message: advisor_message(),
            }
        });
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_cursor = 0;
        self.searching = false;
        self.has_searched = false;
        self.search_request += 1;
        self.emotion = None;
        self.advisor_message.clear();
        self.recommendations.clear();
        self.recommendation_state.select(None);
    }

    // Modal scrolling, in rendered rows
    pub fn max_modal_scroll(&self) -> u16 {
        self.modal_lines.saturating_sub(self.modal_height)
    }

    pub fn scroll_down(&mut self) {
        if self.modal_scroll < self.max_modal_scroll() {
            self.modal_scroll = self.modal_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.modal_scroll = self.modal_scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half_page = self.modal_height / 2;
        self.modal_scroll = self.modal_scroll.saturating_add(half_page).min(self.max_modal_scroll());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.modal_scroll = self.max_modal_scroll();
    }

    pub fn scroll_half_page_up(&mut self) {
        let half_page = self.modal_height / 2;
        self.modal_scroll = self.modal_scroll.saturating_sub(half_page);
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.searching || self.chapters_loading || self.selection.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn ellipsis(&self) -> &'static str {
        match self.animation_frame {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    /// App pointed at a port nothing listens on, so every fetch falls back.
    async fn offline_app() -> (App, UnboundedReceiver<AppEvent>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut config = Config::new();
        config.api_base_url = format!("http://{}", addr);
        config.thinking_delay_ms = 0;

        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(&config, tx), rx)
    }

    async fn next_fetched(rx: &mut UnboundedReceiver<AppEvent>) -> Fetched {
        match rx.recv().await {
            Some(AppEvent::Fetched(fetched)) => fetched,
            other => panic!("expected a fetch result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_chapter_list_shows_fallback_and_error_text() {
        let (mut app, mut rx) = offline_app().await;
        app.load_chapters();
        assert!(app.chapters_loading);

        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        assert!(!app.chapters_loading);
        assert_eq!(app.chapters.len(), 5);
        assert_eq!(app.chapters_error.as_deref(), Some("Failed to load chapters"));
        assert_eq!(app.selected_chapter().unwrap().name_simple, "Al-Fatihah");
    }

    #[tokio::test]
    async fn test_open_chapter_twice_closes_modal() {
        let (mut app, mut rx) = offline_app().await;
        app.load_chapters();
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        app.open_selected();
        assert!(app.selection.is_loading());
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        let content = app.selection.content().unwrap();
        assert_eq!(content.header.name, "Al-Fatihah");
        assert_eq!(content.verses.len(), 7);

        app.open_selected();
        assert!(!app.selection.is_open());
    }

    #[tokio::test]
    async fn test_stale_content_does_not_overwrite_newer_selection() {
        let (mut app, mut rx) = offline_app().await;
        app.load_chapters();
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        app.open_selected();
        app.nav_down();
        app.open_selected();

        // Both fetches complete; only chapter 2 may land
        for _ in 0..2 {
            let fetched = next_fetched(&mut rx).await;
            app.apply(fetched);
        }
        assert_eq!(app.selection.content().unwrap().header.id, 2);
    }

    #[tokio::test]
    async fn test_search_recommends_for_anxiety() {
        let (mut app, mut rx) = offline_app().await;
        app.switch_screen(Screen::Search);
        assert_eq!(app.input_mode, InputMode::Editing);

        app.search_input = "I feel anxious about tomorrow".to_string();
        app.submit_search();
        assert!(app.searching);

        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        assert!(!app.searching);
        assert!(app.has_searched);
        assert_eq!(app.emotion, Some(Emotion::Anxiety));
        let ids: Vec<u32> = app.recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 113, 114]);
        assert!(!app.advisor_message.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let (mut app, _rx) = offline_app().await;
        app.search_input = "   ".to_string();
        app.submit_search();
        assert!(!app.searching);
        assert!(!app.has_searched);
    }

    #[tokio::test]
    async fn test_stale_search_is_discarded() {
        let (mut app, mut rx) = offline_app().await;
        app.search_input = "so sad".to_string();
        app.submit_search();
        let first = next_fetched(&mut rx).await;

        app.search_input = "scared".to_string();
        app.submit_search();
        let second = next_fetched(&mut rx).await;

        app.apply(second);
        app.apply(first);
        assert_eq!(app.emotion, Some(Emotion::Fear));
    }

    #[tokio::test]
    async fn test_recommendation_card_opens_fallback_content() {
        let (mut app, mut rx) = offline_app().await;
        app.switch_screen(Screen::Search);
        app.search_input = "I need help".to_string();
        app.submit_search();
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        app.nav_down();
        app.open_selected();
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        let content = app.selection.content().unwrap();
        assert_eq!(content.header.name, "Ya-Sin");
        assert_eq!(content.verses[0].translation_text(), "Verse 1 from Ya Sin");
    }

    #[tokio::test]
    async fn test_nav_is_clamped() {
        let (mut app, mut rx) = offline_app().await;
        app.nav_down();
        assert!(app.chapter_state.selected().is_none());

        app.load_chapters();
        let fetched = next_fetched(&mut rx).await;
        app.apply(fetched);

        app.nav_up();
        assert_eq!(app.chapter_state.selected(), Some(0));
        app.nav_last();
        app.nav_down();
        assert_eq!(app.chapter_state.selected(), Some(4));
    }
}
