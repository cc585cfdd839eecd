use crate::api::ApiClient;
use crate::app::{AppContext, Result};
use crate::domain::{Article, FacetCount, FilterState};
use crate::feed::{FeedController, FetchOutcome};

/// Load `pages` pages through the feed controller and print them.
pub async fn list_articles(
    ctx: &AppContext,
    filters: FilterState,
    page_size: usize,
    pages: u32,
) -> Result<()> {
    let articles = collect_articles(ctx.api.as_ref(), filters, page_size, pages).await?;

    if articles.is_empty() {
        println!("No articles");
        return Ok(());
    }

    for article in &articles {
        println!("{}", format_article(article));
    }
    Ok(())
}

async fn collect_articles(
    api: &(dyn ApiClient + Send + Sync),
    filters: FilterState,
    page_size: usize,
    pages: u32,
) -> Result<Vec<Article>> {
    let mut controller = FeedController::with_filters(page_size, filters);

    // The first page has nothing to fall back on, so its error is fatal.
    let ticket = controller.refresh();
    let page = api.get_articles(&ticket.query).await?;
    controller.complete_fetch(&ticket, Ok(page));

    for _ in 1..pages {
        let Some(ticket) = controller.load_more() else {
            break;
        };
        if controller.execute(api, ticket).await == FetchOutcome::Failed {
            if let Some(error) = &controller.state().error {
                eprintln!("Stopped early: {}", error);
            }
            break;
        }
    }

    Ok(controller.state().articles.clone())
}

fn format_article(article: &Article) -> String {
    let date = article
        .published_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());
    let score = match (article.hopefulness_score, article.tier()) {
        (Some(score), Some(tier)) => format!("{:>3} {:<11}", score, tier.label()),
        _ => format!("{:>3} {:<11}", "-", ""),
    };
    format!(
        "{} {} {}\n    {} · {}",
        date, score, article.headline, article.source_name, article.source_url
    )
}

pub async fn list_categories(ctx: &AppContext) -> Result<()> {
    print_facets(&ctx.api.get_categories().await?, "No categories");
    Ok(())
}

pub async fn list_regions(ctx: &AppContext) -> Result<()> {
    print_facets(&ctx.api.get_regions().await?, "No regions");
    Ok(())
}

fn print_facets(facets: &[FacetCount], empty: &str) {
    if facets.is_empty() {
        println!("{}", empty);
        return;
    }
    for facet in facets {
        println!("{:>5}  {}", facet.count, facet.name);
    }
}

pub async fn show_stats(ctx: &AppContext) -> Result<()> {
    let stats = ctx.api.get_stats().await?;
    println!("Articles today: {}", stats.fetched_today);
    if let Some(total) = stats.total {
        println!("Articles total: {}", total);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_collect_articles_across_pages() {
        let api = MockApi::new();
        api.push_page(MockApi::page(&[1, 2], 5));
        api.push_page(MockApi::page(&[3, 4], 5));
        api.push_page(MockApi::page(&[5], 5));

        let articles = collect_articles(&api, FilterState::default(), 2, 5).await.unwrap();
        let ids: Vec<i64> = articles.iter().map(|a| a.id.0).collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        // The short third page ends pagination.
        assert_eq!(api.queries().len(), 3);
    }

    #[tokio::test]
    async fn test_collect_articles_passes_filters() {
        let api = MockApi::new();
        let filters = FilterState {
            category: Some("Science".into()),
            region: None,
            min_score: Some(80),
        };

        collect_articles(&api, filters.clone(), 20, 1).await.unwrap();
        assert_eq!(api.queries()[0].filters, filters);
    }

    #[tokio::test]
    async fn test_collect_articles_first_page_failure() {
        let api = MockApi::new();
        api.push_failure("offline");
        assert!(collect_articles(&api, FilterState::default(), 20, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_collect_articles_keeps_pages_before_failure() {
        let api = MockApi::new();
        api.push_page(MockApi::page(&[1, 2], 6));
        api.push_failure("offline");

        let articles = collect_articles(&api, FilterState::default(), 2, 3).await.unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_commands_through_context() {
        let api = Arc::new(MockApi::new());
        api.push_page(MockApi::page(&[1], 1));
        api.set_regions(vec![FacetCount {
            name: "Europe".into(),
            count: 2,
        }]);
        let ctx = AppContext::in_memory(api.clone());

        list_articles(&ctx, FilterState::default(), 20, 1).await.unwrap();
        list_regions(&ctx).await.unwrap();
        show_stats(&ctx).await.unwrap();
        assert_eq!(api.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_stats_command_propagates_failure() {
        let api = Arc::new(MockApi::new());
        api.fail_stats();
        let ctx = AppContext::in_memory(api);

        assert!(show_stats(&ctx).await.is_err());
    }

    #[test]
    fn test_format_article() {
        let mut article = Article::new(1, "Bees are back", "https://n.example/bees", "N");
        article.hopefulness_score = Some(91);
        let line = format_article(&article);
        assert!(line.contains(" 91 Radiant"));
        assert!(line.contains("Bees are back"));
        assert!(line.contains("N · https://n.example/bees"));
    }
}
