//! Spider trait and fetched-page model

use once_cell::sync::Lazy;
use regex::Regex;

use crate::crawler::items::ScrapedItem;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title regex"));

/// A fetched page handed to a spider's `parse`
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// Final URL of the page
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl PageResponse {
    /// Page title from the body, trimmed, when present
    pub fn title(&self) -> Option<String> {
        TITLE_RE
            .captures(&self.body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// A crawl definition: where to start and how to turn pages into items.
///
/// Spiders hold no engine state; the same spider can drive many crawls.
pub trait Spider: Send + Sync {
    /// Spider name for logs and pipelines
    fn name(&self) -> &str;

    /// Seed URLs for the crawl
    fn start_urls(&self) -> Vec<String>;

    /// Turn a fetched page into zero or more items
    fn parse(&self, response: &PageResponse) -> Vec<ScrapedItem>;
}

/// Minimal spider: one item per page, carrying the page title and body.
#[derive(Debug, Clone)]
pub struct PageSpider {
    name: String,
    start_urls: Vec<String>,
}

impl PageSpider {
    /// Create a spider over a fixed set of seed URLs
    pub fn new(name: impl Into<String>, start_urls: Vec<String>) -> Self {
        Self {
            name: name.into(),
            start_urls,
        }
    }
}

impl Spider for PageSpider {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_urls(&self) -> Vec<String> {
        self.start_urls.clone()
    }

    fn parse(&self, response: &PageResponse) -> Vec<ScrapedItem> {
        let mut item = ScrapedItem::new(&response.url, &response.body);
        if let Some(title) = response.title() {
            item = item.with_title(title);
        }
        vec![item]
    }
}
