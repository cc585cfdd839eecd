//! Feed loading, pagination and refresh.
//!
//! The controller is a plain owned state object. A fetch is split in two
//! halves so the UI can run the network call on a background task:
//! [`FeedController::begin_fetch`] mutates the state and hands out a
//! [`FetchTicket`], [`FeedController::complete_fetch`] merges the result.
//!
//! Every fetch gets a fresh generation number. Only the newest ticket can
//! change the state; a late response from a superseded request is dropped.
//! Reset fetches (mount, filter change, refresh) always supersede whatever
//! is in flight. Append fetches are ignored while anything is loading.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ArticlePage, ArticleQuery, DEFAULT_PAGE_SIZE};
use crate::app::Result;
use crate::domain::{FilterIntent, FilterState};
use crate::feed::FeedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Start over at page 1 and replace the article list.
    Reset,
    /// Fetch the current page and append it.
    Append,
}

/// Handed out when a fetch starts; required to complete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub mode: FetchMode,
    pub query: ArticleQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result merged; `added` new unique articles.
    Loaded { added: usize },
    /// Request failed; `error` is set and existing articles are kept.
    Failed,
    /// A newer request superseded this one. State unchanged.
    Stale,
    /// The fetch was never issued (append while loading).
    Skipped,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    mode: FetchMode,
    previous_page: u32,
}

pub struct FeedController {
    filters: FilterState,
    state: FeedState,
    page_size: usize,
    generation: u64,
    in_flight: Option<InFlight>,
    failed: Option<FetchMode>,
}

impl FeedController {
    pub fn new(page_size: usize) -> Self {
        Self::with_filters(page_size, FilterState::default())
    }

    pub fn with_filters(page_size: usize, filters: FilterState) -> Self {
        Self {
            filters,
            state: FeedState::default(),
            page_size: page_size.max(1),
            generation: 0,
            in_flight: None,
            failed: None,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the last fetch succeeded with nothing to show.
    pub fn is_empty_result(&self) -> bool {
        self.state.is_empty_result()
    }

    /// Start a fetch. `reset` clears the list and supersedes any in-flight
    /// request; a non-reset fetch of the current page is ignored while
    /// loading.
    pub fn begin_fetch(&mut self, reset: bool) -> Option<FetchTicket> {
        if reset {
            return Some(self.begin_reset());
        }
        if self.state.loading {
            debug!("Ignoring append fetch while a fetch is in flight");
            return None;
        }
        let page = self.state.page;
        Some(self.start(FetchMode::Append, page))
    }

    /// Fetch the next page. No-op unless `has_more` and not loading.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.state.has_more || self.state.loading {
            return None;
        }
        let previous_page = self.state.page;
        self.state.page += 1;
        Some(self.start(FetchMode::Append, previous_page))
    }

    /// Change one filter dimension and start over.
    pub fn set_filter(&mut self, intent: FilterIntent) -> FetchTicket {
        debug!("Filter change: {:?}", intent);
        self.filters.apply(intent);
        self.begin_reset()
    }

    pub fn clear_filters(&mut self) -> FetchTicket {
        self.filters = FilterState::default();
        self.begin_reset()
    }

    /// Reload from page 1 with the current filters.
    pub fn refresh(&mut self) -> FetchTicket {
        debug!("Refreshing feed");
        self.begin_reset()
    }

    /// Re-issue the request that failed last, if any.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        match self.failed {
            Some(FetchMode::Reset) => Some(self.begin_reset()),
            Some(FetchMode::Append) => self.load_more(),
            None => None,
        }
    }

    /// Merge the result of `ticket`'s request.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ArticlePage>,
    ) -> FetchOutcome {
        let in_flight = match self.in_flight {
            Some(f) if f.generation == ticket.generation && ticket.generation == self.generation => f,
            _ => {
                debug!(
                    "Discarding stale response for generation {} (current {})",
                    ticket.generation, self.generation
                );
                return FetchOutcome::Stale;
            }
        };
        self.in_flight = None;
        self.state.loading = false;

        match result {
            Ok(page) => {
                self.failed = None;
                let received = page.articles.len();
                let heuristic = received >= self.page_size;
                if let Some(reported) = page.has_more {
                    if reported != heuristic {
                        debug!(
                            "Backend has_more={} disagrees with page-full heuristic={}",
                            reported, heuristic
                        );
                    }
                }

                if in_flight.mode == FetchMode::Reset {
                    self.state.articles.clear();
                }
                let added = self.state.append_unique(page.articles);
                self.state.has_more = heuristic;
                self.state.total = page.total;

                info!(
                    "Loaded page {} ({} received, {} new, {} total)",
                    self.state.page, received, added, page.total
                );
                FetchOutcome::Loaded { added }
            }
            Err(e) => {
                warn!("Failed to fetch page {}: {}", self.state.page, e);
                self.state.error = Some(e.user_message());
                if in_flight.mode == FetchMode::Append {
                    self.state.page = in_flight.previous_page;
                }
                self.failed = Some(in_flight.mode);
                FetchOutcome::Failed
            }
        }
    }

    /// Run a ticket's request inline and merge the result.
    pub async fn execute(
        &mut self,
        api: &(dyn ApiClient + Send + Sync),
        ticket: FetchTicket,
    ) -> FetchOutcome {
        let result = api.get_articles(&ticket.query).await;
        self.complete_fetch(&ticket, result)
    }

    /// `begin_fetch` followed by the request and `complete_fetch`.
    pub async fn fetch_articles(
        &mut self,
        api: &(dyn ApiClient + Send + Sync),
        reset: bool,
    ) -> FetchOutcome {
        match self.begin_fetch(reset) {
            Some(ticket) => self.execute(api, ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    fn begin_reset(&mut self) -> FetchTicket {
        if self.in_flight.is_some() {
            debug!("Reset supersedes in-flight generation {}", self.generation);
        }
        self.state.page = 1;
        self.state.articles.clear();
        self.state.has_more = false;
        self.failed = None;
        self.start(FetchMode::Reset, 1)
    }

    fn start(&mut self, mode: FetchMode, previous_page: u32) -> FetchTicket {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;
        self.in_flight = Some(InFlight {
            generation: self.generation,
            mode,
            previous_page,
        });

        FetchTicket {
            generation: self.generation,
            mode,
            query: ArticleQuery {
                filters: self.filters.clone(),
                page: self.state.page,
                page_size: self.page_size,
            },
        }
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
