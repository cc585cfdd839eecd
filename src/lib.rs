//! # Hopeful
//!
//! A terminal reader for the Hopeful News feed: positive stories, scored for
//! hopefulness, paged in from a REST backend.
//!
//! ## Architecture
//!
//! ```text
//! ApiClient → FeedController → TuiApp → layout
//!                  ↑
//!            PullToRefresh
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse the feed
//! hopeful
//!
//! # Print two pages of science stories scoring 80 or more
//! hopeful list --category Science --min-score 80 --pages 2
//!
//! # Point at another backend
//! hopeful --api-url https://hopeful.example/api stats
//! ```

/// REST client for the backend and the `ApiClient` seam used in tests.
pub mod api;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the API client to the
/// preference store.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `list` - Print articles, optionally filtered
/// - `categories` / `regions` - Print facets with counts
/// - `stats` - Print feed statistics
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/hopeful/config.toml`, supporting:
/// - Backend URL and timeout
/// - Page size and score filter choices
/// - Pull-to-refresh input
/// - Custom colors (named or hex) and keybindings
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): A scored news story
/// - [`HopeTier`](domain::HopeTier): Display band for a score
/// - [`FilterState`](domain::FilterState): Category, region and score filters
/// - [`Catalog`](domain::Catalog): Facet counts and stats
pub mod domain;

/// Paginated feed state and the controller that owns it.
pub mod feed;

/// Pull-to-refresh gesture state machine.
pub mod refresh;

/// Copy, share and open-in-browser actions.
pub mod share;

/// Persisted user preferences.
pub mod store;

/// Terminal user interface built with ratatui.
pub mod tui;
