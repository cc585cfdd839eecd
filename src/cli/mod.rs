pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hopeful")]
#[command(about = "A terminal reader for Hopeful News", long_about = None)]
pub struct Cli {
    /// Base URL of the Hopeful News backend (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Print articles from the feed
    List {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
        /// Only show this region
        #[arg(long)]
        region: Option<String>,
        /// Minimum hopefulness score (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        min_score: Option<u8>,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// List categories with article counts
    Categories,
    /// List regions with article counts
    Regions,
    /// Show feed statistics
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["hopeful"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn test_list_with_filters() {
        let cli = Cli::try_parse_from([
            "hopeful",
            "list",
            "--category",
            "Science",
            "--min-score",
            "70",
            "--pages",
            "2",
            "--api-url",
            "http://localhost:9000",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(
            cli.command,
            Some(Commands::List {
                category: Some("Science".into()),
                region: None,
                min_score: Some(70),
                pages: 2,
            })
        );
    }

    #[test]
    fn test_min_score_out_of_range() {
        assert!(Cli::try_parse_from(["hopeful", "list", "--min-score", "101"]).is_err());
    }
}
