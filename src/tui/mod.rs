pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::{self, ArticlePage};
use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::Catalog;
use crate::feed::FetchTicket;
use crate::share::{self, SystemClipboard};
use crate::store::Preferences;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Results delivered from background tasks to the UI loop.
enum FeedMessage {
    Articles {
        ticket: FetchTicket,
        result: Result<ArticlePage>,
    },
    Catalog { generation: u64, catalog: Catalog },
}

/// Mouse capture for the lifetime of the feed view; released on drop.
struct MouseCapture;

impl MouseCapture {
    fn acquire() -> Result<Self> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), DisableMouseCapture) {
            warn!("Failed to release mouse capture: {}", e);
        }
    }
}

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let prefs = ctx.prefs.load().unwrap_or_else(|e| {
        warn!("Failed to read preferences, using defaults: {}", e);
        Preferences::default()
    });
    let mut tui_app = TuiApp::new(&config, prefs.dark_mode);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::channel(16);
    // Held for the whole session; some platforms drop copied text with the handle.
    let mut clipboard = SystemClipboard::default();

    // Touch input is only wired up when enabled; the guard lives as long as the view.
    let _mouse_capture = if tui_app.pull.is_some() {
        Some(MouseCapture::acquire()?)
    } else {
        None
    };

    spawn_catalog(&ctx, &tx, tui_app.begin_catalog_load());
    spawn_fetch(&ctx, &tx, tui_app.feed.refresh());

    loop {
        while let Ok(message) = rx.try_recv() {
            match message {
                FeedMessage::Articles { ticket, result } => {
                    tui_app.apply_fetch(&ticket, result);
                    maybe_load_more(&mut tui_app, &ctx, &tx);
                }
                FeedMessage::Catalog {
                    generation,
                    catalog,
                } => {
                    tui_app.apply_catalog(generation, catalog);
                }
            }
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = config.keybindings.get_action(&key);
                handle_action(&mut tui_app, action, &mut clipboard, &ctx, &tx);
            }
            AppEvent::Mouse(mouse) => {
                if let Some(ticket) = tui_app.handle_mouse(mouse) {
                    spawn_fetch(&ctx, &tx, ticket);
                }
                maybe_load_more(&mut tui_app, &ctx, &tx);
            }
            AppEvent::Tick => {
                tui_app.tick();
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(
    tui_app: &mut TuiApp,
    action: Action,
    clipboard: &mut SystemClipboard,
    ctx: &Arc<AppContext>,
    tx: &mpsc::Sender<FeedMessage>,
) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down();
            maybe_load_more(tui_app, ctx, tx);
        }
        Action::NextPage => {
            tui_app.next_page();
            maybe_load_more(tui_app, ctx, tx);
        }
        Action::PrevPage => {
            tui_app.prev_page();
        }
        Action::OpenInBrowser => {
            if let Some(article) = tui_app.selected_article() {
                let message = share::open_in_browser(article);
                tui_app.toast(message);
            }
        }
        Action::CopyLink => {
            if let Some(article) = tui_app.selected_article() {
                let message = share::copy_link(clipboard, article);
                tui_app.toast(message);
            }
        }
        Action::Share => {
            if let Some(article) = tui_app.selected_article() {
                let message = share::share(clipboard, article);
                tui_app.toast(message);
            }
        }
        Action::Refresh => {
            let ticket = tui_app.feed.refresh();
            spawn_fetch(ctx, tx, ticket);
            spawn_catalog(ctx, tx, tui_app.begin_catalog_load());
        }
        Action::Retry => match tui_app.feed.retry() {
            Some(ticket) => spawn_fetch(ctx, tx, ticket),
            None => tui_app.toast("Nothing to retry"),
        },
        Action::ToggleDarkMode => {
            let dark_mode = tui_app.toggle_dark_mode();
            if let Err(e) = ctx.prefs.save(&Preferences { dark_mode }) {
                warn!("Failed to save preferences: {}", e);
            }
            tui_app.toast(if dark_mode { "Dark mode" } else { "Light mode" });
        }
        Action::CycleCategory => {
            let intent = tui_app.next_category();
            let ticket = tui_app.feed.set_filter(intent);
            tui_app.scroll_to_top();
            spawn_fetch(ctx, tx, ticket);
        }
        Action::CycleRegion => {
            let intent = tui_app.next_region();
            let ticket = tui_app.feed.set_filter(intent);
            tui_app.scroll_to_top();
            spawn_fetch(ctx, tx, ticket);
        }
        Action::CycleMinScore => {
            let intent = tui_app.next_min_score();
            let ticket = tui_app.feed.set_filter(intent);
            tui_app.scroll_to_top();
            spawn_fetch(ctx, tx, ticket);
        }
        Action::ClearFilters => {
            let ticket = tui_app.feed.clear_filters();
            tui_app.scroll_to_top();
            spawn_fetch(ctx, tx, ticket);
        }
        Action::None => {}
    }
}

fn maybe_load_more(tui_app: &mut TuiApp, ctx: &Arc<AppContext>, tx: &mpsc::Sender<FeedMessage>) {
    if !tui_app.should_load_more() {
        return;
    }
    if let Some(ticket) = tui_app.feed.load_more() {
        spawn_fetch(ctx, tx, ticket);
    }
}

fn spawn_fetch(ctx: &Arc<AppContext>, tx: &mpsc::Sender<FeedMessage>, ticket: FetchTicket) {
    let api = ctx.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = api.get_articles(&ticket.query).await;
        if tx.send(FeedMessage::Articles { ticket, result }).await.is_err() {
            tracing::debug!("Feed view closed before fetch completed");
        }
    });
}

fn spawn_catalog(ctx: &Arc<AppContext>, tx: &mpsc::Sender<FeedMessage>, generation: u64) {
    let api = ctx.api.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let catalog = api::load_catalog(api.as_ref()).await;
        let message = FeedMessage::Catalog {
            generation,
            catalog,
        };
        if tx.send(message).await.is_err() {
            tracing::debug!("Feed view closed before catalog load completed");
        }
    });
}
