//! serp command line entry point.
//!
//! Prints search envelopes and articles as pretty JSON on stdout. Logs go to
//! stderr so the output can be piped.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use braveserp_client::{FetchConfig, HttpFetcher, SearchRequest, Searcher, extract_article};
use braveserp_core::AppConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Brave result page scraper with a 24h file cache
#[derive(Parser, Debug)]
#[command(name = "serp")]
#[command(version)]
#[command(about = "Search Brave and extract articles from the command line", long_about = None)]
struct Cli {
    /// Cache directory (overrides BRAVESERP_CACHE_DIR)
    #[arg(long, global = true, env = "BRAVESERP_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search and print the result envelope
    Search(SearchArgs),

    /// Fetch a page and print its title and text
    Article(ArticleArgs),
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query
    query: String,

    /// Maximum number of results
    #[arg(short, long)]
    limit: Option<usize>,

    /// Keep only results whose link contains this text
    #[arg(short = 'd', long)]
    filter_domain: Option<String>,

    /// Ignore any cached result
    #[arg(long)]
    force_refresh: bool,
}

#[derive(Args, Debug)]
struct ArticleArgs {
    /// Page URL
    url: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = dir;
    }
    tracing::debug!(cache_dir = %config.cache_dir.display(), "configuration loaded");

    match cli.command {
        Commands::Search(args) => search(&config, args).await,
        Commands::Article(args) => article(&config, args).await,
    }
}

async fn search(config: &AppConfig, args: SearchArgs) -> Result<ExitCode> {
    let searcher = Searcher::from_config(config)?;

    let mut request = SearchRequest::new(args.query)
        .with_limit(args.limit.unwrap_or(config.default_limit))
        .with_force_refresh(args.force_refresh);
    if let Some(domain) = args.filter_domain {
        request = request.with_filter_domain(domain);
    }

    let response = searcher.search(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn article(config: &AppConfig, args: ArticleArgs) -> Result<ExitCode> {
    let fetcher = HttpFetcher::new(FetchConfig::from(config))?;
    let article = extract_article(&fetcher, &args.url).await?;
    println!("{}", serde_json::to_string_pretty(&article)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "serp",
            "search",
            "sourdough bread recipe",
            "--limit",
            "5",
            "--filter-domain",
            "wikipedia.org",
            "--force-refresh",
        ])
        .unwrap();

        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "sourdough bread recipe");
                assert_eq!(args.limit, Some(5));
                assert_eq!(args.filter_domain.as_deref(), Some("wikipedia.org"));
                assert!(args.force_refresh);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_article_with_cache_dir() {
        let cli = Cli::try_parse_from(["serp", "article", "example.com/post", "--cache-dir", "/tmp/serp"]).unwrap();

        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/serp")));
        assert!(matches!(cli.command, Commands::Article(ArticleArgs { ref url }) if url == "example.com/post"));
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["serp", "search"]).is_err());
    }
}
