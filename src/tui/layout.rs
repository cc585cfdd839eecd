use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::Article;
use crate::refresh::PULL_THRESHOLD;
use crate::tui::app::TuiApp;

const SUMMARY_CHARS: usize = 160;

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let colors = app.colors().clone();
    let background = Block::default().style(Style::default().bg(colors.background));
    frame.render_widget(background, frame.area());

    let pull_rows = pull_indicator_rows(app);
    let banner_rows = if app.feed.state().error.is_some() { 1 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(1),           // Filter bar
            Constraint::Length(pull_rows),   // Pull indicator
            Constraint::Length(banner_rows), // Error banner
            Constraint::Min(5),              // Feed
            Constraint::Length(1),           // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], &colors);
    render_filter_bar(frame, app, chunks[1], &colors);
    if pull_rows > 0 {
        render_pull_indicator(frame, app, chunks[2], &colors);
    }
    if banner_rows > 0 {
        render_error_banner(frame, app, chunks[3], &colors);
    }
    render_feed(frame, app, chunks[4], &colors);
    render_status_bar(frame, app, chunks[5], &colors);
}

fn pull_indicator_rows(app: &TuiApp) -> u16 {
    match &app.pull {
        Some(pull) if pull.pull_distance() > 0.0 => {
            // One row per 20 logical pixels, at least one.
            ((pull.pull_distance() / 20.0).ceil() as u16).max(1)
        }
        _ => 0,
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut spans = vec![Span::styled(
        " ☀ Hopeful News ",
        Style::default()
            .fg(colors.title)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(stats) = app.catalog.stats {
        spans.push(Span::styled(
            format!(" {} new today", stats.fetched_today),
            Style::default().fg(colors.metadata),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let filters = app.feed.filters();
    let style_for = |active: bool| {
        if active {
            Style::default()
                .fg(colors.filter_active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.filter_inactive)
        }
    };

    let category = match &filters.category {
        Some(name) => facet_label(name, &app.catalog.categories),
        None => "All".to_string(),
    };
    let region = match &filters.region {
        Some(name) => facet_label(name, &app.catalog.regions),
        None => "All".to_string(),
    };
    let score = filters
        .min_score
        .map(|s| format!("≥{}", s))
        .unwrap_or_else(|| "Any".to_string());

    let line = Line::from(vec![
        Span::raw(" Category: "),
        Span::styled(category, style_for(filters.category.is_some())),
        Span::raw("  Region: "),
        Span::styled(region, style_for(filters.region.is_some())),
        Span::raw("  Score: "),
        Span::styled(score, style_for(filters.min_score.is_some())),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(colors.metadata)),
        area,
    );
}

fn facet_label(name: &str, facets: &[crate::domain::FacetCount]) -> String {
    match facets.iter().find(|f| f.name == name) {
        Some(facet) => format!("{} ({})", facet.name, facet.count),
        None => name.to_string(),
    }
}

fn render_pull_indicator(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(pull) = &app.pull else {
        return;
    };
    let text = if pull.is_refreshing() {
        "⟳ Refreshing…"
    } else if pull.pull_distance() >= PULL_THRESHOLD {
        "↑ Release to refresh"
    } else {
        "↓ Pull to refresh"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(colors.pull_indicator))
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_error_banner(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let message = app.feed.state().error.clone().unwrap_or_default();
    let paragraph = Paragraph::new(format!(" ⚠ {}  [r] Retry", message))
        .style(Style::default().fg(colors.error_fg).bg(colors.error_bg));
    frame.render_widget(paragraph, area);
}

fn render_feed(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let state = app.feed.state();
    let title = format!(
        " {} ({} of {}) ",
        app.feed.filters().describe(),
        state.articles.len(),
        state.total
    );
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(colors.title)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    if state.articles.is_empty() {
        let message = if state.loading {
            "Loading hopeful news…"
        } else if state.error.is_some() {
            "Couldn't load articles."
        } else {
            "No articles match these filters yet. Try widening them."
        };
        let paragraph = Paragraph::new(Text::from(message))
            .block(block)
            .style(Style::default().fg(colors.summary))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let mut items: Vec<ListItem> = state
        .articles
        .iter()
        .map(|article| article_item(article, width, colors))
        .collect();

    if state.loading {
        items.push(ListItem::new(Line::from(Span::styled(
            "  Loading more…",
            Style::default().fg(colors.metadata),
        ))));
    } else if !state.has_more {
        items.push(ListItem::new(Line::from(Span::styled(
            "  You're all caught up.",
            Style::default().fg(colors.metadata),
        ))));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg),
        )
        .highlight_symbol("▌");

    frame.render_stateful_widget(list, area, &mut app.item_list_state);
}

fn article_item<'a>(article: &'a Article, width: usize, colors: &ColorConfig) -> ListItem<'a> {
    let mut lines = vec![Line::from(Span::styled(
        article.headline.as_str(),
        Style::default()
            .fg(colors.headline)
            .add_modifier(Modifier::BOLD),
    ))];

    let mut meta = vec![Span::styled(
        article.source_name.as_str(),
        Style::default().fg(colors.metadata),
    )];
    if let Some(category) = &article.category {
        meta.push(Span::styled(
            format!(" · {}", category),
            Style::default().fg(colors.metadata),
        ));
    }
    if let Some(published) = article.published_at {
        meta.push(Span::styled(
            format!(" · {}", published.format("%b %d")),
            Style::default().fg(colors.metadata),
        ));
    }
    if let (Some(tier), Some(score)) = (article.tier(), article.hopefulness_score) {
        let meter = format!("{}{}", "●".repeat(tier.level()), "○".repeat(5 - tier.level()));
        meta.push(Span::styled(
            format!("  {} {} {}", meter, tier, score),
            Style::default().fg(colors.score),
        ));
    }
    lines.push(Line::from(meta));

    let summary = truncate(&article.plain_summary(), SUMMARY_CHARS.min(width.max(20) * 2));
    if !summary.is_empty() {
        lines.push(Line::from(Span::styled(
            summary,
            Style::default().fg(colors.summary),
        )));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(msg) = app.toast_text() {
        msg.to_string()
    } else if app.pull.as_ref().is_some_and(|p| p.is_refreshing()) {
        "Refreshing…".to_string()
    } else {
        "j/k:Nav  o:Open  y:Copy  s:Share  c/g/h:Filter  x:Clear  R:Refresh  t:Theme  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
