// src/lib.rs
//! Collects job postings from a paginated listing site and summarizes their
//! salaries.
//!
//! The pipeline is strictly linear: [`collector::Collector`] fetches list
//! pages and detail pages one at a time, [`normalizer::normalize`] turns the
//! raw salary text into numbers and bucket labels, and
//! [`normalizer::summarize`] derives the views rendered by [`report`].

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod report;
pub mod types;

pub use collector::Collector;
pub use config::ScraperConfig;
pub use error::{CollectionError, Result, ScrapeError};
pub use normalizer::{clean_salary, format_salary, normalize, summarize, Summary};
pub use types::{ListingReference, NormalizedListing, PageCount, RawListing, ResultSet, NOT_AVAILABLE};

/// Validate the page count, collect every listing and normalize it.
///
/// An invalid page count is rejected before any request is made. Any
/// collection failure aborts the run without a partial result.
pub async fn scrape_job_postings(
    config: ScraperConfig,
    page_count: i64,
) -> Result<ResultSet<NormalizedListing>> {
    let pages = PageCount::try_from(page_count)?;
    let collector = Collector::new(config)?;
    let raw = collector.collect(pages).await?;
    Ok(normalize(raw))
}
