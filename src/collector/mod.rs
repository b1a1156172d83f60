// src/collector/mod.rs
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::{CollectionError, Result};
use crate::types::{ListingReference, PageCount, RawListing, ResultSet};

pub mod parser;

pub use parser::{parse_detail_page, parse_listing_links};

/// Walks list pages and fetches every listing's detail page, one request
/// at a time.
pub struct Collector {
    client: Client,
    config: ScraperConfig,
    base_url: Url,
}

impl Collector {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|source| {
            CollectionError::InvalidUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(CollectionError::Client)?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Collect raw listings from pages `1..=pages`, in discovery order.
    ///
    /// The first request-level failure aborts the run; nothing collected so
    /// far is returned.
    pub async fn collect(&self, pages: PageCount) -> Result<ResultSet<RawListing>> {
        info!("Collecting job postings from {} page(s)", pages);

        let mut listings = Vec::new();
        for page in pages.pages() {
            let references = self.discover(page).await?;
            info!("Page {}: found {} listings", page, references.len());

            for reference in &references {
                listings.push(self.fetch_listing(reference).await?);
            }
        }

        info!("Collected {} listings", listings.len());
        Ok(listings)
    }

    /// Fetch one list page and return the detail pages it links to
    pub async fn discover(&self, page: u32) -> Result<Vec<ListingReference>> {
        let path = self.config.list_path(page);
        let url = self
            .base_url
            .join(&path)
            .map_err(|source| CollectionError::InvalidUrl { url: path, source })?;

        let html = self.fetch_html(&url).await?;
        Ok(parse_listing_links(&html, &self.base_url, page)?)
    }

    pub async fn fetch_listing(&self, reference: &ListingReference) -> Result<RawListing> {
        let html = self.fetch_html(&reference.url).await?;

        let listing = parse_detail_page(&html).ok_or_else(|| {
            warn!("No job content at {} (list page {})", reference.url, reference.page);
            CollectionError::MissingContent {
                url: reference.url.to_string(),
            }
        })?;

        debug!(
            "Extracted listing '{}' from {} (list page {})",
            listing.title, reference.url, reference.page
        );
        Ok(listing)
    }

    async fn fetch_html(&self, url: &Url) -> std::result::Result<String, CollectionError> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CollectionError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CollectionError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| CollectionError::Body {
            url: url.to_string(),
            source,
        })
    }
}
