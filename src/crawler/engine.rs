//! Crawl engine
//!
//! Fetches a spider's seed URLs with bounded concurrency, honoring the
//! configured request delay and (optionally) each host's robots.txt
//! disallow rules, then routes parsed items through an item pipeline.
//! Fetch failures are logged and skipped; they never abort the crawl.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};
use url::Url;

use crate::config::CrawlerConfig;
use crate::crawler::items::ScrapedItem;
use crate::crawler::pipeline::ItemPipeline;
use crate::crawler::spider::{PageResponse, Spider};
use crate::utils::error::Result;

/// Drives spiders over HTTP
pub struct CrawlEngine {
    client: reqwest::Client,
    settings: CrawlerConfig,
}

impl CrawlEngine {
    /// Build an engine from crawler settings
    pub fn new(settings: CrawlerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Run one crawl: fetch the spider's seed URLs, parse each page, and
    /// feed items through the pipeline. Returns the surviving items.
    pub async fn crawl(
        &self,
        spider: &dyn Spider,
        pipeline: &mut dyn ItemPipeline,
    ) -> Result<Vec<ScrapedItem>> {
        info!("Spider opened: {}", spider.name());
        pipeline.open_spider(spider.name());

        let mut seen: HashSet<String> = HashSet::new();
        let urls: Vec<String> = spider
            .start_urls()
            .into_iter()
            .filter(|u| seen.insert(u.clone()))
            .collect();

        let urls = if self.settings.obey_robots_txt {
            self.filter_by_robots(urls).await
        } else {
            urls
        };

        let responses = self.fetch_all(urls).await;

        let mut items = Vec::new();
        for response in &responses {
            for item in spider.parse(response) {
                if let Some(item) = pipeline.process_item(item) {
                    items.push(item);
                }
            }
        }

        pipeline.close_spider(spider.name());
        info!(
            "Spider closed: {} ({} pages, {} items)",
            spider.name(),
            responses.len(),
            items.len()
        );
        Ok(items)
    }

    /// Fetch URLs. Without a request delay, fetches run with bounded
    /// concurrency; with one, they run sequentially with the delay between
    /// requests.
    async fn fetch_all(&self, urls: Vec<String>) -> Vec<PageResponse> {
        if self.settings.download_delay_ms == 0 {
            return stream::iter(urls)
                .map(|url| async move { self.fetch(&url).await })
                .buffer_unordered(self.settings.concurrent_requests.max(1))
                .filter_map(|response| async move { response })
                .collect()
                .await;
        }

        let delay = Duration::from_millis(self.settings.download_delay_ms);
        let mut responses = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }
            if let Some(response) = self.fetch(url).await {
                responses.push(response);
            }
        }
        responses
    }

    async fn fetch(&self, url: &str) -> Option<PageResponse> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Download exception: {}", e);
                return None;
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => Some(PageResponse {
                url: url.to_string(),
                status,
                body,
            }),
            Err(e) => {
                error!("Download exception: {}", e);
                None
            }
        }
    }

    /// Drop URLs disallowed for `User-agent: *` by their host's robots.txt.
    /// Hosts whose robots.txt cannot be fetched are treated as allowing
    /// everything.
    async fn filter_by_robots(&self, urls: Vec<String>) -> Vec<String> {
        let mut rules_by_origin: HashMap<String, Vec<String>> = HashMap::new();
        let mut allowed = Vec::with_capacity(urls.len());

        for url in urls {
            let Ok(parsed) = Url::parse(&url) else {
                warn!("Skipping unparseable URL: {}", url);
                continue;
            };
            let origin = parsed.origin().ascii_serialization();

            if !rules_by_origin.contains_key(&origin) {
                let robots_url = format!("{}/robots.txt", origin);
                let rules = match self.fetch(&robots_url).await {
                    Some(response) if response.status == 200 => {
                        robots_disallow_rules(&response.body)
                    }
                    _ => Vec::new(),
                };
                rules_by_origin.insert(origin.clone(), rules);
            }

            let blocked = rules_by_origin[&origin]
                .iter()
                .any(|prefix| parsed.path().starts_with(prefix.as_str()));
            if blocked {
                warn!("Skipping {} (disallowed by robots.txt)", url);
            } else {
                allowed.push(url);
            }
        }

        allowed
    }
}

/// Disallow prefixes from the `User-agent: *` groups of a robots.txt body.
fn robots_disallow_rules(body: &str) -> Vec<String> {
    let mut rules = Vec::new();
    let mut in_wildcard_group = false;

    for raw in body.lines() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_ascii_lowercase();
        if let Some(agent) = lower.strip_prefix("user-agent:") {
            in_wildcard_group = agent.trim() == "*";
        } else if in_wildcard_group {
            if let Some(rest) = lower.strip_prefix("disallow:") {
                let path = line[line.len() - rest.len()..].trim();
                if !path.is_empty() {
                    rules.push(path.to_string());
                }
            }
        }
    }

    rules
}
