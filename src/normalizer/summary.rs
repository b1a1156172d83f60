// src/normalizer/summary.rs
use serde::Serialize;

use crate::types::NormalizedListing;

pub const TOP_N: usize = 5;

/// Derived views over a finished result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean_salary: Option<f64>,
    pub distribution: Vec<DistributionEntry>,
    pub highest_paid: Vec<SalaryEntry>,
    pub lowest_paid: Vec<SalaryEntry>,
    pub longest_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryEntry {
    pub job_title: String,
    pub job_salary: f64,
}

pub fn summarize(listings: &[NormalizedListing]) -> Summary {
    Summary {
        count: listings.len(),
        mean_salary: mean_salary(listings),
        distribution: salary_distribution(listings),
        highest_paid: highest_paid(listings, TOP_N),
        lowest_paid: lowest_paid(listings, TOP_N),
        longest_title: longest_title(listings).map(|listing| listing.title().to_string()),
    }
}

pub fn mean_salary(listings: &[NormalizedListing]) -> Option<f64> {
    let values: Vec<f64> = listings.iter().filter_map(|l| l.salary_value).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// The `n` best paid listings, highest first. Equal salaries keep their
/// original order.
pub fn highest_paid(listings: &[NormalizedListing], n: usize) -> Vec<SalaryEntry> {
    let mut entries = salary_entries(listings);
    entries.sort_by(|a, b| b.job_salary.total_cmp(&a.job_salary));
    entries.truncate(n);
    entries
}

/// The `n` worst paid listings, lowest first. Equal salaries keep their
/// original order.
pub fn lowest_paid(listings: &[NormalizedListing], n: usize) -> Vec<SalaryEntry> {
    let mut entries = salary_entries(listings);
    entries.sort_by(|a, b| a.job_salary.total_cmp(&b.job_salary));
    entries.truncate(n);
    entries
}

fn salary_entries(listings: &[NormalizedListing]) -> Vec<SalaryEntry> {
    listings
        .iter()
        .filter_map(|listing| {
            listing.salary_value.map(|job_salary| SalaryEntry {
                job_title: listing.title().to_string(),
                job_salary,
            })
        })
        .collect()
}

/// Listing with the most characters in its title; the first one wins a tie.
pub fn longest_title(listings: &[NormalizedListing]) -> Option<&NormalizedListing> {
    listings.iter().fold(None, |best: Option<&NormalizedListing>, listing| {
        match best {
            Some(current) if current.title().chars().count() >= listing.title().chars().count() => {
                Some(current)
            }
            _ => Some(listing),
        }
    })
}

/// Listing count per bucket label, most common first. Listings without a
/// label are left out.
pub fn salary_distribution(listings: &[NormalizedListing]) -> Vec<DistributionEntry> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in listings.iter().filter_map(|l| l.formatted_salary.as_ref()) {
        match counts.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.clone(), 1)),
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .into_iter()
        .map(|(label, count)| DistributionEntry {
            label,
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}
