//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use sitemapper::config::{Config, CrawlConfig, HttpConfig, OutputConfig};
use sitemapper::crawler::{Crawler, ExtractorKind};
use sitemapper::output::write_sitemap;
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given seed
fn create_test_config(seed: &str, parallelism: usize, max_depth: u32) -> Config {
    Config {
        crawler: CrawlConfig {
            seed_url: seed.to_string(),
            parallelism,
            max_depth,
            extractor: ExtractorKind::Pattern,
        },
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        output: OutputConfig::default(),
    }
}

/// Mounts an HTML page at `route` that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn anchors(links: &[&str]) -> String {
    let body = links
        .iter()
        .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<html><body>\n{}\n</body></html>", body)
}

fn as_set(urls: &[String]) -> HashSet<String> {
    urls.iter().cloned().collect()
}

#[tokio::test]
async fn test_full_crawl_single_layer() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        anchors(&["/page1", "/page2?ref=home", "https://external.test/x"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", anchors(&["/page3", "/page2"]), 1).await;
    mount_page(&mock_server, "/page2", anchors(&["/"]), 1).await;
    mount_page(&mock_server, "/page3", anchors(&[]), 0).await;

    let config = create_test_config(&format!("{}/", base), 2, 1);
    let report = Crawler::from_config(&config)
        .expect("Failed to build crawler")
        .start()
        .await
        .expect("Crawl failed");

    assert_eq!(report.base_origin, format!("{}/", base));
    assert_eq!(
        as_set(&report.urls),
        as_set(&[
            format!("{}/page1", base),
            format!("{}/page2", base),
            "https://external.test/x".to_string(),
            format!("{}/page3", base),
            format!("{}/", base),
        ])
    );
    assert_eq!(report.stats.pages_fetched, 3);
    assert_eq!(report.stats.out_of_scope, 1);
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", anchors(&["/a", "/a", "/b"]), 1).await;
    mount_page(&mock_server, "/a", anchors(&["/c"]), 0).await;
    mount_page(&mock_server, "/b", anchors(&["/c"]), 0).await;

    let config = create_test_config(&format!("{}/", base), 3, 0);
    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .unwrap();

    assert_eq!(
        report.urls,
        vec![format!("{}/a", base), format!("{}/b", base)]
    );
}

#[tokio::test]
async fn test_failed_pages_do_not_stop_the_crawl() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", anchors(&["/broken", "/gone", "/fine"]), 1).await;
    mount_page(&mock_server, "/fine", anchors(&["/leaf"]), 1).await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // "/gone" has no mock, so wiremock answers 404

    let config = create_test_config(&format!("{}/", base), 3, 1);
    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .expect("fetch failures must not fail the crawl");

    assert_eq!(report.stats.fetch_failures, 2);
    assert!(report.urls.contains(&format!("{}/broken", base)));
    assert!(report.urls.contains(&format!("{}/gone", base)));
    assert!(report.urls.contains(&format!("{}/leaf", base)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_workers_fetch_each_page_once() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let pages: Vec<String> = (0..10).map(|i| format!("/p{}", i)).collect();
    let page_refs: Vec<&str> = pages.iter().map(String::as_str).collect();

    mount_page(&mock_server, "/", anchors(&page_refs), 1).await;
    for page in &pages {
        // Every page links to every other page and back to the root
        let mut links = page_refs.clone();
        links.push("/");
        mount_page(&mock_server, page, anchors(&links), 1).await;
    }

    let config = create_test_config(&format!("{}/", base), 4, 3);
    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .unwrap();

    let requests = mock_server
        .received_requests()
        .await
        .expect("request recording is enabled");
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    let unique: HashSet<&String> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len(), "duplicate fetch in {:?}", paths);

    assert_eq!(report.urls.len(), 11);
    assert_eq!(report.stats.pages_fetched, 11);
}

#[tokio::test]
async fn test_base_declaration_narrows_origin() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<html><head><base href="{}/docs/"></head><body>
            <a href="/intro">Intro</a>
            <a href="{}/other">Outside the base</a>
            </body></html>"#,
            base, base
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/docs/intro", anchors(&["setup"]), 1).await;
    mount_page(&mock_server, "/other", anchors(&[]), 0).await;

    let config = create_test_config(&format!("{}/", base), 1, 1);
    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .unwrap();

    assert_eq!(report.base_origin, format!("{}/docs/", base));
    assert_eq!(
        report.urls,
        vec![
            format!("{}/docs/intro", base),
            format!("{}/other", base),
            format!("{}/docs/setup", base),
        ]
    );
}

#[tokio::test]
async fn test_dom_extractor_crawl() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <!-- <a href="/commented">ignored</a> -->
            <a class="nav" href="/real">Real</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/real", anchors(&[]), 1).await;

    let mut config = create_test_config(&format!("{}/", base), 1, 1);
    config.crawler.extractor = ExtractorKind::Dom;

    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .unwrap();

    assert_eq!(report.urls, vec![format!("{}/real", base)]);
}

#[tokio::test]
async fn test_crawl_and_export_sitemap() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", anchors(&["/about", "/blog"]), 1).await;
    mount_page(&mock_server, "/about", anchors(&["/"]), 1).await;
    mount_page(&mock_server, "/blog", anchors(&["/blog/post-1"]), 1).await;

    let config = create_test_config(&format!("{}/", base), 2, 1);
    let report = Crawler::from_config(&config)
        .unwrap()
        .start()
        .await
        .unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let sitemap_path = dir.path().join("sitemap.xml");
    write_sitemap(&report.urls, &sitemap_path).expect("Failed to write sitemap");

    let xml = std::fs::read_to_string(&sitemap_path).unwrap();
    assert_eq!(xml.matches("<url>").count(), report.urls.len());
    assert!(xml.contains(&format!("<loc>{}/about</loc>", base)));
    assert!(xml.contains(&format!("<loc>{}/blog/post-1</loc>", base)));
}

#[tokio::test]
async fn test_empty_seed_makes_no_requests() {
    let mock_server = MockServer::start().await;

    let config = create_test_config("", 2, 2);
    let result = Crawler::from_config(&config).unwrap().start().await;

    assert!(matches!(
        result,
        Err(sitemapper::SitemapError::Config(
            sitemapper::ConfigError::MissingSeed
        ))
    ));
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}
