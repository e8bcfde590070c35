//! Crawler engine tests against a mock HTTP server

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dataharvest::config::CrawlerConfig;
use dataharvest::crawler::{CrawlEngine, HarvestPipeline, PageSpider};

fn test_settings() -> CrawlerConfig {
    CrawlerConfig {
        concurrent_requests: 4,
        download_delay_ms: 0,
        obey_robots_txt: false,
        ..CrawlerConfig::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_collects_items_with_titles() {
    let server = MockServer::start().await;
    mount_page(&server, "/page1", "<title>First</title>first body").await;
    mount_page(&server, "/page2", "<title>Second</title>second body").await;

    let spider = PageSpider::new(
        "test",
        vec![
            format!("{}/page1", server.uri()),
            format!("{}/page2", server.uri()),
        ],
    );
    let engine = CrawlEngine::new(test_settings()).unwrap();
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(pipeline.items_processed(), 2);
    let mut titles: Vec<&str> = items.iter().filter_map(|i| i.title.as_deref()).collect();
    titles.sort();
    assert_eq!(titles, vec!["First", "Second"]);
    assert!(items.iter().all(|i| i.processed_at.is_some()));
}

#[tokio::test]
async fn test_unreachable_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_page(&server, "/alive", "<title>Alive</title>content").await;

    let spider = PageSpider::new(
        "test",
        vec![
            format!("{}/alive", server.uri()),
            "http://127.0.0.1:1/unreachable".to_string(),
        ],
    );
    let engine = CrawlEngine::new(test_settings()).unwrap();
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.as_deref(), Some("Alive"));
}

#[tokio::test]
async fn test_empty_pages_are_dropped_by_pipeline() {
    let server = MockServer::start().await;
    mount_page(&server, "/empty", "").await;

    let spider = PageSpider::new("test", vec![format!("{}/empty", server.uri())]);
    let engine = CrawlEngine::new(test_settings()).unwrap();
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(pipeline.items_dropped(), 1);
}

#[tokio::test]
async fn test_robots_disallow_is_honored() {
    let server = MockServer::start().await;
    mount_page(&server, "/robots.txt", "User-agent: *\nDisallow: /private\n").await;
    mount_page(&server, "/private/data", "<title>Secret</title>secret").await;
    mount_page(&server, "/public/data", "<title>Open</title>open").await;

    let spider = PageSpider::new(
        "test",
        vec![
            format!("{}/private/data", server.uri()),
            format!("{}/public/data", server.uri()),
        ],
    );
    let settings = CrawlerConfig {
        obey_robots_txt: true,
        ..test_settings()
    };
    let engine = CrawlEngine::new(settings).unwrap();
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title.as_deref(), Some("Open"));
}

#[tokio::test]
async fn test_duplicate_seed_urls_fetch_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Once</title>body"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/once", server.uri());
    let spider = PageSpider::new("test", vec![url.clone(), url]);
    let engine = CrawlEngine::new(test_settings()).unwrap();
    let mut pipeline = HarvestPipeline::new();

    let items = engine.crawl(&spider, &mut pipeline).await.unwrap();
    assert_eq!(items.len(), 1);
}
