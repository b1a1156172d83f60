// src/collector/parser.rs
//! HTML extraction for list and detail pages.
//!
//! Each field has its own extractor returning `Option<String>`; the record
//! builder falls back to the sentinel per field, so one absent element never
//! affects the others.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

use crate::error::CollectionError;
use crate::types::{ListingReference, RawListing, NOT_AVAILABLE};

static AD_BLOCK: LazyLock<Selector> = LazyLock::new(|| css("div.ad"));
static LINK: LazyLock<Selector> = LazyLock::new(|| css("a"));
static JOB_BODY: LazyLock<Selector> = LazyLock::new(|| css("div.job-body"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| css("h3"));
static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| css("ul"));
static SALARY: LazyLock<Selector> = LazyLock::new(|| css("div.salary"));
static DETAILS: LazyLock<Selector> = LazyLock::new(|| css("div.details"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| css("span"));

fn css(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector should be valid CSS")
}

/// Find every listing summary on a list page and resolve its detail URL.
///
/// Summaries without a usable link are skipped. A link that cannot be
/// resolved against `base` fails the page.
pub fn parse_listing_links(
    html: &str,
    base: &Url,
    page: u32,
) -> Result<Vec<ListingReference>, CollectionError> {
    let document = Html::parse_document(html);
    let mut references = Vec::new();

    for (index, ad) in document.select(&AD_BLOCK).enumerate() {
        let href = ad
            .select(&LINK)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let Some(href) = href else {
            warn!("Listing block {} on page {} has no link, skipping", index, page);
            continue;
        };

        let url = base.join(href).map_err(|source| CollectionError::InvalidUrl {
            url: href.to_string(),
            source,
        })?;
        references.push(ListingReference { url, page });
    }

    debug!("Page {}: {} listing links", page, references.len());
    Ok(references)
}

/// Extract the four listing fields from a detail page.
///
/// Returns `None` when the page has no job content block at all.
pub fn parse_detail_page(html: &str) -> Option<RawListing> {
    let document = Html::parse_document(html);
    let body = document.select(&JOB_BODY).next()?;
    Some(build_listing(body))
}

fn build_listing(body: ElementRef<'_>) -> RawListing {
    RawListing {
        title: or_sentinel(extract_title(body)),
        salary_text: or_sentinel(extract_salary(body)),
        sector: or_sentinel(extract_sector(body)),
        description: or_sentinel(extract_description(body)),
    }
}

fn or_sentinel(field: Option<String>) -> String {
    field.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn extract_title(body: ElementRef<'_>) -> Option<String> {
    first_text(body, &TITLE)
}

fn extract_description(body: ElementRef<'_>) -> Option<String> {
    first_text(body, &DESCRIPTION)
}

fn extract_salary(body: ElementRef<'_>) -> Option<String> {
    first_text(body, &SALARY)
}

/// Second label inside the details container
fn extract_sector(body: ElementRef<'_>) -> Option<String> {
    let details = body.select(&DETAILS).next()?;
    details.select(&LABEL).nth(1).map(element_text)
}

fn first_text(body: ElementRef<'_>, selector: &Selector) -> Option<String> {
    body.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// Collapse whitespace runs into single spaces and trim
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
