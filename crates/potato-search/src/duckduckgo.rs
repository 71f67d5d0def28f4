//! DuckDuckGo HTML search client.
//!
//! Issues `GET <endpoint>?q=<query>` with a browser User-Agent and scrapes
//! the result page. The markup contract is:
//!
//! ```text
//! div.result
//!   a.result__a        title text, href = result URL (often a redirect)
//!   a.result__snippet  snippet text
//! ```

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use potato_core::config::SearchConfig;

use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::types::{SearchOutcome, SearchResult};

const CONTAINER_SELECTOR: &str = "div.result";
const TITLE_SELECTOR: &str = "a.result__a";
const SNIPPET_SELECTOR: &str = "a.result__snippet";

/// Upper bound on results per search, whatever the configuration asks for.
pub const MAX_RESULTS_LIMIT: usize = 5;

/// Search client for the DuckDuckGo HTML endpoint.
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

impl DuckDuckGoClient {
    /// Build a client from the `[search]` configuration section.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        let max_results = config.max_results.min(MAX_RESULTS_LIMIT);
        if max_results < config.max_results {
            tracing::warn!(
                configured = config.max_results,
                limit = MAX_RESULTS_LIMIT,
                "search.max_results above limit, capping"
            );
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_results,
        })
    }

    async fn fetch_html(&self, query: &str) -> Result<String, SearchError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        Ok(resp.text().await?)
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let html = self.fetch_html(query).await?;
        parse_results(&html, self.max_results)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        match self.try_search(query).await {
            Ok(results) => {
                tracing::debug!(results = results.len(), "Web search completed");
                SearchOutcome::from_results(results)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Web search failed, continuing without context");
                SearchOutcome::NoResults
            }
        }
    }
}

/// Extract up to `max_results` results from a DuckDuckGo HTML page.
///
/// Containers lacking either a title link or a snippet link are skipped.
/// Provider order is preserved.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let container = selector(CONTAINER_SELECTOR)?;
    let title = selector(TITLE_SELECTOR)?;
    let snippet = selector(SNIPPET_SELECTOR)?;

    let doc = Html::parse_document(html);
    let mut out = Vec::new();

    for result in doc.select(&container) {
        if out.len() >= max_results {
            break;
        }
        let (Some(title_el), Some(snippet_el)) = (
            result.select(&title).next(),
            result.select(&snippet).next(),
        ) else {
            continue;
        };

        out.push(SearchResult {
            title: element_text(title_el),
            snippet: element_text(snippet_el),
            url: title_el
                .value()
                .attr("href")
                .map(resolve_result_url)
                .unwrap_or_default(),
        });
    }

    Ok(out)
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("{}: {}", css, e)))
}

/// All descendant text with runs of whitespace collapsed to one space.
fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unwrap DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=<target>`).
///
/// Anything that is not a recognizable redirect is returned trimmed but
/// otherwise untouched.
pub fn resolve_result_url(href: &str) -> String {
    let href = href.trim();
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let Ok(parsed) = url::Url::parse(&absolute) else {
        return href.to_string();
    };

    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h == "duckduckgo.com" || h.ends_with(".duckduckgo.com"))
        && parsed.path() == "/l/";
    if !is_redirect {
        return href.to_string();
    }

    parsed
        .query_pairs()
        .find(|(k, _)| k == "uddg")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::extract::Query;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::Html as HtmlResponse;
    use axum::routing::get;
    use axum::Router;

    fn result_block(title: &str, href: &str, snippet: &str) -> String {
        format!(
            r#"<div class="result results_links web-result">
                 <div class="links_main">
                   <h2 class="result__title"><a class="result__a" href="{href}">{title}</a></h2>
                   <a class="result__snippet" href="{href}">{snippet}</a>
                 </div>
               </div>"#
        )
    }

    fn page(blocks: &[String]) -> String {
        format!(
            "<html><body><div id=\"links\">{}</div></body></html>",
            blocks.join("\n")
        )
    }

    fn config_for(endpoint: String) -> SearchConfig {
        SearchConfig {
            endpoint,
            timeout_secs: 1,
            ..SearchConfig::default()
        }
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    // ---- parse_results ----

    #[test]
    fn test_parse_extracts_title_snippet_url() {
        let html = page(&[result_block(
            "Rust Programming Language",
            "https://www.rust-lang.org/",
            "A language empowering everyone.",
        )]);
        let results = parse_results(&html, 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].snippet, "A language empowering everyone.");
        assert_eq!(results[0].url, "https://www.rust-lang.org/");
    }

    #[test]
    fn test_parse_caps_at_max_in_provider_order() {
        let blocks: Vec<String> = (1..=8)
            .map(|i| {
                result_block(
                    &format!("Title {}", i),
                    &format!("https://example.com/{}", i),
                    &format!("Snippet {}", i),
                )
            })
            .collect();
        let results = parse_results(&page(&blocks), 5).unwrap();
        assert_eq!(results.len(), 5);
        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Title 1", "Title 2", "Title 3", "Title 4", "Title 5"]
        );
    }

    #[test]
    fn test_parse_skips_incomplete_containers() {
        let html = page(&[
            r#"<div class="result"><a class="result__a" href="https://a.example">No snippet</a></div>"#
                .to_string(),
            r#"<div class="result"><a class="result__snippet">No title</a></div>"#.to_string(),
            result_block("Complete", "https://c.example/", "Has both"),
        ]);
        let results = parse_results(&html, 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Complete");
    }

    #[test]
    fn test_parse_no_containers_is_empty() {
        let html = "<html><body><div class=\"no-results\">No results.</div></body></html>";
        assert!(parse_results(html, 5).unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_input_is_empty() {
        assert!(parse_results("%%% not html <<<", 5).unwrap().is_empty());
        assert!(parse_results("", 5).unwrap().is_empty());
    }

    #[test]
    fn test_parse_collapses_nested_markup_whitespace() {
        let html = page(&[result_block(
            "The <b>Rust</b>\n   Book",
            "https://doc.rust-lang.org/book/",
            "Learn   <b>Rust</b> the\n easy way",
        )]);
        let results = parse_results(&html, 5).unwrap();
        assert_eq!(results[0].title, "The Rust Book");
        assert_eq!(results[0].snippet, "Learn Rust the easy way");
    }

    #[test]
    fn test_parse_missing_href_gives_empty_url() {
        let html = page(&[
            r#"<div class="result"><a class="result__a">Title</a><a class="result__snippet">Snip</a></div>"#
                .to_string(),
        ]);
        let results = parse_results(&html, 5).unwrap();
        assert_eq!(results[0].url, "");
    }

    #[test]
    fn test_parse_zero_max_returns_nothing() {
        let html = page(&[result_block("T", "https://t.example/", "S")]);
        assert!(parse_results(&html, 0).unwrap().is_empty());
    }

    // ---- resolve_result_url ----

    #[test]
    fn test_resolve_redirect_link() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2Flearn&rut=abc";
        assert_eq!(resolve_result_url(href), "https://www.rust-lang.org/learn");
    }

    #[test]
    fn test_resolve_plain_link_untouched() {
        assert_eq!(
            resolve_result_url("https://example.com/page?x=1"),
            "https://example.com/page?x=1"
        );
    }

    #[test]
    fn test_resolve_redirect_without_target_kept() {
        let href = "//duckduckgo.com/l/?rut=abc";
        assert_eq!(resolve_result_url(href), href);
    }

    #[test]
    fn test_resolve_relative_link_kept() {
        assert_eq!(resolve_result_url("/relative/path"), "/relative/path");
    }

    // ---- HTTP behaviour ----

    #[tokio::test]
    async fn test_search_sends_escaped_query_and_user_agent() {
        let app = Router::new().route(
            "/html/",
            get(
                |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    let q = params.get("q").cloned().unwrap_or_default();
                    let ua = headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    HtmlResponse(page(&[result_block(&q, "https://echo.example/", &ua)]))
                },
            ),
        );
        let addr = serve(app).await;

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        let outcome = client.search("qual o clima & hoje?").await;

        let results = outcome.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "qual o clima & hoje?");
        assert!(results[0].snippet.starts_with("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_search_returns_exactly_five_in_order() {
        let app = Router::new().route(
            "/html/",
            get(|| async {
                let blocks: Vec<String> = (1..=10)
                    .map(|i| {
                        result_block(
                            &format!("R{}", i),
                            &format!("https://r.example/{}", i),
                            "s",
                        )
                    })
                    .collect();
                HtmlResponse(page(&blocks))
            }),
        );
        let addr = serve(app).await;

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        let outcome = client.search("anything").await;
        let titles: Vec<_> = outcome.results().iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles, vec!["R1", "R2", "R3", "R4", "R5"]);
    }

    #[tokio::test]
    async fn test_configured_max_above_limit_is_capped() {
        let app = Router::new().route(
            "/html/",
            get(|| async {
                let blocks: Vec<String> = (1..=8)
                    .map(|i| {
                        result_block(
                            &format!("R{}", i),
                            &format!("https://r.example/{}", i),
                            "s",
                        )
                    })
                    .collect();
                HtmlResponse(page(&blocks))
            }),
        );
        let addr = serve(app).await;

        let config = SearchConfig {
            max_results: 8,
            ..config_for(format!("http://{}/html/", addr))
        };
        let client = DuckDuckGoClient::new(&config).unwrap();
        let outcome = client.search("anything").await;
        assert_eq!(outcome.results().len(), MAX_RESULTS_LIMIT);
        assert_eq!(outcome.results()[4].title, "R5");
    }

    #[tokio::test]
    async fn test_configured_max_below_limit_is_kept() {
        let app = Router::new().route(
            "/html/",
            get(|| async {
                let blocks: Vec<String> = (1..=8)
                    .map(|i| result_block(&format!("R{}", i), "https://r.example/", "s"))
                    .collect();
                HtmlResponse(page(&blocks))
            }),
        );
        let addr = serve(app).await;

        let config = SearchConfig {
            max_results: 2,
            ..config_for(format!("http://{}/html/", addr))
        };
        let client = DuckDuckGoClient::new(&config).unwrap();
        assert_eq!(client.search("anything").await.results().len(), 2);
    }

    #[tokio::test]
    async fn test_search_zero_containers_is_no_results() {
        let app = Router::new().route(
            "/html/",
            get(|| async { HtmlResponse("<html><body>No results found</body></html>") }),
        );
        let addr = serve(app).await;

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        assert_eq!(
            client.search("xyz-nonsense-query").await,
            SearchOutcome::NoResults
        );
    }

    #[tokio::test]
    async fn test_search_error_status_is_no_results() {
        let app = Router::new().route(
            "/html/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "rate limited") }),
        );
        let addr = serve(app).await;

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        assert_eq!(client.search("hoje").await, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn test_search_unreachable_endpoint_is_no_results() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        assert_eq!(client.search("agora").await, SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn test_search_timeout_is_no_results() {
        let app = Router::new().route(
            "/html/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                HtmlResponse(page(&[result_block("late", "https://late.example/", "late")]))
            }),
        );
        let addr = serve(app).await;

        let client = DuckDuckGoClient::new(&config_for(format!("http://{}/html/", addr))).unwrap();
        assert_eq!(client.search("onde").await, SearchOutcome::NoResults);
    }
}
