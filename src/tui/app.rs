use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::widgets::ListState;
use tracing::debug;

use crate::api::ArticlePage;
use crate::app::Result;
use crate::config::{ColorConfig, Config};
use crate::domain::{Article, Catalog, FilterIntent};
use crate::feed::{FeedController, FetchOutcome, FetchTicket};
use crate::refresh::{PullRelease, PullToRefresh};

pub const PAGE_SIZE: usize = 5;

/// Rows from the end of the list at which the next page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 3;

const TOAST_DURATION: Duration = Duration::from_secs(2);

struct Toast {
    message: String,
    shown_at: Instant,
}

pub struct TuiApp {
    pub feed: FeedController,
    pub catalog: Catalog,
    catalog_generation: u64,
    /// Present only when touch input is wired up.
    pub pull: Option<PullToRefresh>,
    pub dark_mode: bool,
    pub item_index: usize,
    pub item_list_state: ListState,
    pub should_quit: bool,
    min_score_options: Vec<u8>,
    row_height_px: f32,
    dark_colors: ColorConfig,
    light_colors: ColorConfig,
    toast: Option<Toast>,
}

impl TuiApp {
    pub fn new(config: &Config, dark_mode: bool) -> Self {
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            feed: FeedController::new(config.feed.page_size),
            catalog: Catalog::default(),
            catalog_generation: 0,
            pull: config.touch.enabled.then(PullToRefresh::new),
            dark_mode,
            item_index: 0,
            item_list_state,
            should_quit: false,
            min_score_options: config.feed.min_score_options.clone(),
            row_height_px: config.touch.row_height_px.max(1.0),
            dark_colors: config.colors.clone(),
            light_colors: ColorConfig::light(),
            toast: None,
        }
    }

    pub fn colors(&self) -> &ColorConfig {
        if self.dark_mode {
            &self.dark_colors
        } else {
            &self.light_colors
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.feed.state().articles
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles().get(self.item_index)
    }

    pub fn move_up(&mut self) {
        if self.item_index > 0 {
            self.item_index -= 1;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn move_down(&mut self) {
        let len = self.articles().len();
        if len > 0 && self.item_index < len - 1 {
            self.item_index += 1;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn next_page(&mut self) {
        let max_index = self.articles().len().saturating_sub(1);
        self.item_index = (self.item_index + PAGE_SIZE).min(max_index);
        self.item_list_state.select(Some(self.item_index));
    }

    pub fn prev_page(&mut self) {
        self.item_index = self.item_index.saturating_sub(PAGE_SIZE);
        self.item_list_state.select(Some(self.item_index));
    }

    pub fn scroll_to_top(&mut self) {
        self.item_index = 0;
        self.item_list_state.select(Some(0));
        *self.item_list_state.offset_mut() = 0;
    }

    /// The selection is close enough to the end to fetch the next page.
    pub fn should_load_more(&self) -> bool {
        let state = self.feed.state();
        !state.articles.is_empty()
            && state.has_more
            && !state.loading
            && state.error.is_none()
            && self.item_index + LOAD_MORE_THRESHOLD >= state.articles.len()
    }

    /// Vertical scroll of the feed in logical pixels.
    pub fn scroll_offset(&self) -> f32 {
        self.item_list_state.offset() as f32 * self.row_height_px
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn next_category(&self) -> FilterIntent {
        let names: Vec<String> = self.catalog.categories.iter().map(|c| c.name.clone()).collect();
        FilterIntent::Category(cycle(&names, &self.feed.filters().category))
    }

    pub fn next_region(&self) -> FilterIntent {
        let names: Vec<String> = self.catalog.regions.iter().map(|r| r.name.clone()).collect();
        FilterIntent::Region(cycle(&names, &self.feed.filters().region))
    }

    pub fn next_min_score(&self) -> FilterIntent {
        FilterIntent::MinScore(cycle(&self.min_score_options, &self.feed.filters().min_score))
    }

    /// Tag for a new catalog load; older loads still in flight lose.
    pub fn begin_catalog_load(&mut self) -> u64 {
        self.catalog_generation += 1;
        self.catalog_generation
    }

    pub fn apply_catalog(&mut self, generation: u64, catalog: Catalog) -> bool {
        if generation != self.catalog_generation {
            debug!(
                "Discarding stale catalog {} (current {})",
                generation, self.catalog_generation
            );
            return false;
        }
        self.catalog = catalog;
        true
    }

    /// Merge a finished fetch and settle the pull gesture.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, result: Result<ArticlePage>) -> FetchOutcome {
        let outcome = self.feed.complete_fetch(ticket, result);
        if outcome == FetchOutcome::Stale {
            return outcome;
        }

        let len = self.articles().len();
        if self.item_index >= len {
            self.item_index = len.saturating_sub(1);
            self.item_list_state.select(Some(self.item_index));
        }

        let refreshing = self.pull.as_ref().is_some_and(|p| p.is_refreshing());
        if refreshing && !self.feed.state().loading {
            if let Some(pull) = self.pull.as_mut() {
                pull.finish_refresh();
            }
            self.scroll_to_top();
        }
        outcome
    }

    /// Feed a mouse event to the pull gesture. Returns a ticket when the
    /// gesture triggered a refresh.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<FetchTicket> {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.move_down();
                return None;
            }
            MouseEventKind::ScrollUp => {
                self.move_up();
                return None;
            }
            _ => {}
        }

        let y = mouse.row as f32 * self.row_height_px;
        let scroll_offset = self.scroll_offset();
        let pull = self.pull.as_mut()?;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                pull.touch_start(y, scroll_offset);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                pull.touch_move(y, scroll_offset);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => match pull.touch_end() {
                PullRelease::Refresh => Some(self.feed.refresh()),
                PullRelease::Cancelled | PullRelease::Ignored => None,
            },
            _ => None,
        }
    }

    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            shown_at: Instant::now(),
        });
    }

    pub fn toast_text(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| t.shown_at.elapsed() < TOAST_DURATION)
            .map(|t| t.message.as_str())
    }

    /// Drop an expired toast.
    pub fn tick(&mut self) {
        if self.toast.is_some() && self.toast_text().is_none() {
            self.toast = None;
        }
    }
}

/// Next value in the cycle `None → options[0] → … → options[n-1] → None`.
/// A current value that is no longer offered restarts the cycle.
fn cycle<T: Clone + PartialEq>(options: &[T], current: &Option<T>) -> Option<T> {
    match current {
        None => options.first().cloned(),
        Some(value) => match options.iter().position(|o| o == value) {
            Some(i) => options.get(i + 1).cloned(),
            None => options.first().cloned(),
        },
    }
}
