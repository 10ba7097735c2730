//! Readable text of a single article page.

use std::sync::LazyLock;

use braveserp_core::{Article, Error};
use scraper::{Html, Selector};
use url::Url;

use super::element_text;
use crate::fetch::{PageFetcher, canonicalize, display_host};
use crate::profile::RequestProfile;

/// User agent sent for article fetches.
pub const ARTICLE_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Title used when a page has no `<title>`.
pub const UNTITLED: &str = "(no title)";

static REGIONS: LazyLock<[Selector; 3]> = LazyLock::new(|| {
    ["article", "main", "body"].map(|s| Selector::parse(s).expect("invalid selector"))
});
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("invalid selector"));
static BLOCKS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p, h2, h3").expect("invalid selector"));

/// Fetch `url` and pull out its title and body text.
///
/// # Errors
///
/// - `Error::InvalidUrl` if `url` is empty or not http(s)
/// - `Error::FetchTimeout`, `Error::HttpError` or `Error::FetchFailed` when the fetch fails
pub async fn extract_article(fetcher: &dyn PageFetcher, url: &str) -> Result<Article, Error> {
    let url = canonicalize(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let profile = RequestProfile::fixed(ARTICLE_USER_AGENT);

    let page = fetcher.fetch(&url, &profile).await?;
    let article = parse_article(&page.text(), &url);

    tracing::debug!("extracted article from {} ({} chars)", url, article.content.len());
    Ok(article)
}

/// Parse an article out of `html`.
///
/// Content comes from the first `article`, else `main`, else `body`; each
/// `p`, `h2` and `h3` inside it becomes one line.
pub fn parse_article(html: &str, source: &Url) -> Article {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let region = REGIONS
        .iter()
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element());

    let content = region
        .select(&BLOCKS)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Article { title, content, source: source.to_string(), domain: display_host(source).unwrap_or_default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchConfig, HttpFetcher};

    fn source() -> Url {
        Url::parse("https://blog.example.com/posts/bread").unwrap()
    }

    #[test]
    fn test_parse_article_prefers_article_region() {
        let html = r#"
            <html>
                <head><title>  Baking Bread  </title></head>
                <body>
                    <p>Navigation text</p>
                    <main>
                        <p>Main intro</p>
                        <article>
                            <h2>Ingredients</h2>
                            <p>Flour, water,
                               and salt.</p>
                            <h3>Method</h3>
                            <p>   </p>
                            <p>Mix and wait.</p>
                        </article>
                    </main>
                </body>
            </html>
        "#;

        let article = parse_article(html, &source());

        assert_eq!(article.title, "Baking Bread");
        assert_eq!(article.content, "Ingredients\nFlour, water, and salt.\nMethod\nMix and wait.");
        assert_eq!(article.source, "https://blog.example.com/posts/bread");
        assert_eq!(article.domain, "blog.example.com");
    }

    #[test]
    fn test_parse_article_falls_back_to_main_then_body() {
        let html = "<html><body><p>Outside</p><main><p>Inside main</p></main></body></html>";
        assert_eq!(parse_article(html, &source()).content, "Inside main");

        let html = "<html><body><h2>Heading</h2><p>Body paragraph</p><div>ignored div</div></body></html>";
        assert_eq!(parse_article(html, &source()).content, "Heading\nBody paragraph");
    }

    #[test]
    fn test_parse_article_without_title() {
        let article = parse_article("<html><body><p>Text</p></body></html>", &source());
        assert_eq!(article.title, UNTITLED);

        let article = parse_article("<html><head><title> </title></head><body></body></html>", &source());
        assert_eq!(article.title, UNTITLED);
        assert_eq!(article.content, "");
    }

    #[test]
    fn test_parse_article_domain_keeps_port() {
        let source = Url::parse("http://localhost:8080/doc").unwrap();
        assert_eq!(parse_article("<p>x</p>", &source).domain, "localhost:8080");
    }

    #[tokio::test]
    async fn test_extract_article_fetches_with_fixed_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/post")
            .match_header("user-agent", ARTICLE_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><head><title>Post</title></head><body><article><p>Hello there</p></article></body></html>")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        let url = format!("{}/post#comments", server.url());
        let article = extract_article(&fetcher, &url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(article.title, "Post");
        assert_eq!(article.content, "Hello there");
        assert_eq!(article.source, format!("{}/post", server.url()));
        assert!(article.domain.starts_with("127.0.0.1:"));
    }

    #[tokio::test]
    async fn test_extract_article_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("GET", "/missing").with_status(404).create_async().await;

        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();
        let err = extract_article(&fetcher, &format!("{}/missing", server.url())).await.unwrap_err();

        assert!(matches!(err, Error::HttpError(_)));
    }

    #[tokio::test]
    async fn test_extract_article_invalid_url() {
        let fetcher = HttpFetcher::new(FetchConfig::default()).unwrap();

        let err = extract_article(&fetcher, "  ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = extract_article(&fetcher, "ftp://example.com/file").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
