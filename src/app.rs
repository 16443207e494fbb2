//! Application state management for Crabby
//!
//! This module holds the current forecast snapshot and the interaction state
//! around it: the search field, the daily cursor and the expanded day.

use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::StartupConfig;
use crate::clock::{Clock, SystemClock};
use crate::data::{FetchError, ForecastService};
use crate::forecast::{hours_for, ForecastSnapshot, Selection, WeatherSample};

/// Application state enum representing what the main view shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// A forecast request is in flight
    Loading,
    /// A snapshot is available
    Ready,
    /// The last request failed; holds the message shown to the user
    Error(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Snapshot of the last successful fetch, cleared on failure
    pub snapshot: Option<ForecastSnapshot>,
    /// Last searched location term
    pub location: String,
    /// Text typed into the search field
    pub search_input: String,
    /// Whether keystrokes go to the search field
    pub editing: bool,
    /// Index of the highlighted day in the daily overview
    pub cursor: usize,
    /// Day expanded to hourly detail
    pub selection: Selection,
    /// First visible row of the hourly panel; the renderer clamps it
    pub hour_scroll: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Search waiting for the event loop to run it
    pending_search: Option<String>,
    clock: Box<dyn Clock>,
    service: ForecastService,
}

impl App {
    /// Creates an App that will search `config.location` first
    pub fn with_startup_config(config: &StartupConfig) -> Self {
        Self::with_service(&config.location, ForecastService::new(), Box::new(SystemClock))
    }

    /// Creates an App with an explicit service and clock
    ///
    /// # Arguments
    /// * `location` - Location searched first
    /// * `service` - Forecast loader
    /// * `clock` - Source of "now" for the hourly drill-down
    pub fn with_service(location: &str, service: ForecastService, clock: Box<dyn Clock>) -> Self {
        Self {
            state: AppState::Loading,
            snapshot: None,
            location: location.to_string(),
            search_input: String::new(),
            editing: false,
            cursor: 0,
            selection: Selection::default(),
            hour_scroll: 0,
            show_help: false,
            should_quit: false,
            pending_search: Some(location.to_string()),
            clock,
            service,
        }
    }

    /// Queues a search for `term`.
    ///
    /// Blank terms and terms equal to the current location (ignoring case)
    /// are ignored.
    ///
    /// # Returns
    /// * `true` if a search was queued
    pub fn submit_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() || term.to_lowercase() == self.location.to_lowercase() {
            tracing::debug!("Ignoring search for {:?}", term);
            return false;
        }

        self.location = term.to_string();
        self.pending_search = Some(term.to_string());
        true
    }

    /// Queues the current location again, bypassing the same-term check
    pub fn request_refresh(&mut self) {
        self.pending_search = Some(self.location.clone());
    }

    /// Takes the queued search, if any, and switches to Loading
    pub fn take_pending_search(&mut self) -> Option<String> {
        let query = self.pending_search.take()?;
        self.state = AppState::Loading;
        Some(query)
    }

    /// Loads the forecast for `query` and applies the outcome
    pub async fn load_forecast(&mut self, query: &str) {
        let result = self.service.load(query).await;
        self.apply(query, result);
    }

    /// Applies the outcome of a forecast request.
    ///
    /// A snapshot replaces the previous one wholesale and resets the cursor
    /// and the expanded day. An error clears the snapshot.
    pub fn apply(&mut self, query: &str, result: Result<ForecastSnapshot, FetchError>) {
        match result {
            Ok(snapshot) => {
                tracing::info!("Showing forecast for {} ({:?})", snapshot.location, query);
                self.snapshot = Some(snapshot);
                self.selection.reset();
                self.cursor = 0;
                self.hour_scroll = 0;
                self.state = AppState::Ready;
            }
            Err(e) => {
                tracing::warn!("Forecast request for {:?} failed: {}", query, e);
                self.snapshot = None;
                self.selection.reset();
                self.cursor = 0;
                self.hour_scroll = 0;
                self.state = AppState::Error(e.to_string());
            }
        }
    }

    /// Returns the remaining hours of the expanded day, empty if none is expanded
    pub fn selected_hours(&self) -> Vec<WeatherSample> {
        match (&self.snapshot, self.selection.selected()) {
            (Some(snapshot), Some(date)) => hours_for(&snapshot.hourly, date, self.clock.now()),
            _ => Vec::new(),
        }
    }

    /// Number of days in the daily overview
    pub fn day_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.daily.len())
    }

    /// Handles a keyboard event and updates state accordingly
    ///
    /// While editing the search field:
    /// - printable characters: Append to the search term
    /// - `Backspace`: Delete the last character
    /// - `Enter`: Submit the search
    /// - `Esc`: Cancel editing
    ///
    /// Otherwise:
    /// - `/` or `s`: Start editing the search field
    /// - `Up`/`k`, `Down`/`j`: Move the daily cursor
    /// - `Enter` or `Space`: Expand or collapse the day under the cursor
    /// - `PageDown`/`J`, `PageUp`/`K`: Scroll the expanded day's hours
    /// - `r`: Reload the current location
    /// - `?`: Toggle help
    /// - `q` or `Esc`: Quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.editing {
            self.handle_search_key(key_event);
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search_input.clear();
                self.editing = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor_down();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_day_under_cursor();
            }
            KeyCode::PageDown | KeyCode::Char('J') => {
                self.scroll_hours_down();
            }
            KeyCode::PageUp | KeyCode::Char('K') => {
                self.scroll_hours_up();
            }
            KeyCode::Char('r') => {
                self.request_refresh();
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.editing = false;
                self.search_input.clear();
            }
            KeyCode::Enter => {
                self.editing = false;
                let term = std::mem::take(&mut self.search_input);
                self.submit_search(&term);
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }

    fn toggle_day_under_cursor(&mut self) {
        let date = self
            .snapshot
            .as_ref()
            .and_then(|s| s.daily.get(self.cursor))
            .map(|day| day.date);
        if let Some(date) = date {
            self.selection.toggle(date);
            self.hour_scroll = 0;
        }
    }

    /// Scrolls the hourly panel down one row, stopping at the last hour
    pub fn scroll_hours_down(&mut self) {
        let last = self.selected_hours().len().saturating_sub(1);
        let last = u16::try_from(last).unwrap_or(u16::MAX);
        if self.hour_scroll < last {
            self.hour_scroll += 1;
        }
    }

    /// Scrolls the hourly panel up one row
    pub fn scroll_hours_up(&mut self) {
        self.hour_scroll = self.hour_scroll.saturating_sub(1);
    }

    /// Moves the cursor up, wrapping to the last day if at top
    fn move_cursor_up(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        if self.cursor == 0 {
            self.cursor = count - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor down, wrapping to the first day if at bottom
    fn move_cursor_down(&mut self) {
        let count = self.day_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
    }
}
