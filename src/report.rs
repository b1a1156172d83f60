// src/report.rs
//! Text, CSV and JSON renderings of a finished result set.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

use crate::normalizer::{SalaryEntry, Summary};
use crate::types::NormalizedListing;

/// One table row, using the exported column names
#[derive(Debug, Serialize)]
pub struct TableRow<'a> {
    pub job_title: &'a str,
    pub job_salary: Option<f64>,
    pub job_sector: &'a str,
    pub job_description: &'a str,
    pub formatted_salary: Option<&'a str>,
}

impl<'a> From<&'a NormalizedListing> for TableRow<'a> {
    fn from(listing: &'a NormalizedListing) -> Self {
        Self {
            job_title: &listing.raw.title,
            job_salary: listing.salary_value,
            job_sector: &listing.raw.sector,
            job_description: &listing.raw.description,
            formatted_salary: listing.formatted_salary.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    listings: Vec<TableRow<'a>>,
    summary: &'a Summary,
}

pub fn render_text(summary: &Summary) -> String {
    let mut out = String::new();

    if summary.count == 0 {
        out.push_str("No job postings were found.\n");
        return out;
    }

    let _ = writeln!(out, "Total number of job postings scraped: {}", summary.count);
    match summary.mean_salary {
        Some(mean) => {
            let _ = writeln!(out, "Average Salary: {:.2}", mean);
        }
        None => out.push_str("Average Salary: N/A\n"),
    }

    out.push_str("\nSalary Distribution\n");
    if summary.distribution.is_empty() {
        out.push_str("  (no salaries)\n");
    }
    for entry in &summary.distribution {
        let _ = writeln!(
            out,
            "  {:<12} {:>5} {:>6.1}%",
            entry.label, entry.count, entry.percent
        );
    }

    out.push_str("\nTop 5 Highest Paying Jobs\n");
    write_salary_table(&mut out, &summary.highest_paid);

    out.push_str("\nTop 5 Lowest Paying Jobs\n");
    write_salary_table(&mut out, &summary.lowest_paid);

    out.push_str("\nJob with the Longest Title\n");
    let _ = writeln!(out, "  {}", summary.longest_title.as_deref().unwrap_or("N/A"));

    out
}

fn write_salary_table(out: &mut String, entries: &[SalaryEntry]) {
    if entries.is_empty() {
        out.push_str("  (no salaries)\n");
        return;
    }
    let _ = writeln!(out, "  {:<50} {:>14}", "job_title", "job_salary");
    let _ = writeln!(out, "  {}", "-".repeat(65));
    for entry in entries {
        let _ = writeln!(out, "  {:<50} {:>14.1}", entry.job_title, entry.job_salary);
    }
}

pub fn render_csv(listings: &[NormalizedListing]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for listing in listings {
        writer
            .serialize(TableRow::from(listing))
            .context("Failed to write CSV row")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn render_json(listings: &[NormalizedListing], summary: &Summary) -> Result<String> {
    let report = JsonReport {
        listings: listings.iter().map(TableRow::from).collect(),
        summary,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize, summarize};
    use crate::types::{RawListing, NOT_AVAILABLE};

    fn sample() -> Vec<NormalizedListing> {
        normalize(vec![
            RawListing {
                title: "Accountant".to_string(),
                salary_text: "1,500,000".to_string(),
                sector: "Finance".to_string(),
                description: "Books, audits".to_string(),
            },
            RawListing {
                title: "Driver".to_string(),
                salary_text: NOT_AVAILABLE.to_string(),
                sector: "Transport".to_string(),
                description: NOT_AVAILABLE.to_string(),
            },
        ])
    }

    #[test]
    fn test_render_csv_columns_and_nulls() {
        let csv = render_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("job_title,job_salary,job_sector,job_description,formatted_salary")
        );
        assert_eq!(
            lines.next(),
            Some("Accountant,1500000.0,Finance,\"Books, audits\",1.5 mil")
        );
        assert_eq!(lines.next(), Some("Driver,,Transport,N/A,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_json_has_listings_and_summary() {
        let listings = sample();
        let summary = summarize(&listings);
        let json = render_json(&listings, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["listings"].as_array().unwrap().len(), 2);
        assert_eq!(value["listings"][1]["job_salary"], serde_json::Value::Null);
        assert_eq!(value["summary"]["count"], 2);
        assert_eq!(value["summary"]["longest_title"], "Accountant");
    }

    #[test]
    fn test_render_text_sections() {
        let listings = sample();
        let text = render_text(&summarize(&listings));
        assert!(text.contains("Total number of job postings scraped: 2"));
        assert!(text.contains("Average Salary: 1500000.00"));
        assert!(text.contains("1.5 mil"));
        assert!(text.contains("Top 5 Highest Paying Jobs"));
        assert!(text.contains("Top 5 Lowest Paying Jobs"));
        assert!(text.contains("Job with the Longest Title\n  Accountant"));
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&summarize(&[]));
        assert_eq!(text, "No job postings were found.\n");
    }
}
