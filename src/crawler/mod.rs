//! Crawler skeleton
//!
//! A thin fetch-parse-pipeline loop: [`Spider`] defines where a crawl
//! starts and how pages become items, [`ItemPipeline`] post-processes
//! items, and [`CrawlEngine`] drives the loop over HTTP.
//!
//! [`Spider`]: spider::Spider
//! [`ItemPipeline`]: pipeline::ItemPipeline
//! [`CrawlEngine`]: engine::CrawlEngine

pub mod engine;
pub mod items;
pub mod pipeline;
pub mod spider;

pub use engine::CrawlEngine;
pub use items::ScrapedItem;
pub use pipeline::{HarvestPipeline, ItemPipeline};
pub use spider::{PageResponse, PageSpider, Spider};
