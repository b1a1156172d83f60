// src/types.rs
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::ScrapeError;

/// Placeholder for a field whose source element was absent
pub const NOT_AVAILABLE: &str = "N/A";

/// Number of list pages to walk. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCount(u32);

impl PageCount {
    pub fn new(pages: u32) -> Result<Self, ScrapeError> {
        if pages == 0 {
            return Err(ScrapeError::InvalidInput(
                "page count must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(Self(pages))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 1-based page indices, inclusive
    pub fn pages(self) -> impl Iterator<Item = u32> {
        1..=self.0
    }
}

impl TryFrom<i64> for PageCount {
    type Error = ScrapeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let pages = u32::try_from(value).map_err(|_| {
            ScrapeError::InvalidInput(format!(
                "page count must be a positive integer, got {}",
                value
            ))
        })?;
        Self::new(pages)
    }
}

impl FromStr for PageCount {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.trim().parse().map_err(|_| {
            ScrapeError::InvalidInput(format!(
                "page count must be a positive integer, got '{}'",
                s
            ))
        })?;
        Self::try_from(value)
    }
}

impl fmt::Display for PageCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A detail page discovered on a list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReference {
    pub url: Url,
    /// List page the link was found on
    pub page: u32,
}

/// Text fields as they were found on a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub title: String,
    pub salary_text: String,
    pub sector: String,
    pub description: String,
}

#[cfg(test)]
impl RawListing {
    /// A listing whose every field is the sentinel
    pub(crate) fn unavailable() -> Self {
        Self {
            title: NOT_AVAILABLE.to_string(),
            salary_text: NOT_AVAILABLE.to_string(),
            sector: NOT_AVAILABLE.to_string(),
            description: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedListing {
    pub raw: RawListing,
    /// Mean of the numbers found in `salary_text`
    pub salary_value: Option<f64>,
    /// Bucket label, present exactly when `salary_value` is
    pub formatted_salary: Option<String>,
}

impl NormalizedListing {
    pub fn title(&self) -> &str {
        &self.raw.title
    }
}

/// Listings in discovery order. Duplicates across pages are kept.
pub type ResultSet<T> = Vec<T>;
