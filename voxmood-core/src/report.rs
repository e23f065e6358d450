//! Sentiment report: record set, label frequencies, and CSV export

use crate::error::{Result, SentimentError};
use crate::records::{Sentiment, SentimentRecord};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Header row of the exported CSV
pub const CSV_HEADER: &str = "Time (Sec),Text,Sentiment,Confidence";

/// Result of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    /// Normalized records, in chronological order
    pub records: Vec<SentimentRecord>,

    /// Transcript id assigned by the service, when one was created
    pub transcript_id: Option<String>,

    /// Audio duration in seconds, when the service reports it
    pub audio_duration: Option<f64>,

    /// Wall time spent on the request, in seconds
    pub processing_time: f64,
}

/// Per-label frequency counts (the donut chart's data)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    /// Count for a single label
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Total number of records counted
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Counts in display order
    pub fn entries(&self) -> [(Sentiment, usize); 3] {
        [
            (Sentiment::Positive, self.positive),
            (Sentiment::Neutral, self.neutral),
            (Sentiment::Negative, self.negative),
        ]
    }
}

impl SentimentReport {
    /// Build a report from records alone, without service metadata
    pub fn from_records(records: Vec<SentimentRecord>) -> Self {
        Self {
            records,
            transcript_id: None,
            audio_duration: None,
            processing_time: 0.0,
        }
    }

    /// True when the service detected no sentiment markers at all.
    ///
    /// This is an informational condition, not a failure.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Count records per sentiment label
    pub fn frequency_counts(&self) -> SentimentCounts {
        let mut counts = SentimentCounts::default();
        for record in &self.records {
            match record.sentiment {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
        }
        counts
    }

    /// Serialize the records as CSV, one row per record in record order
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(64 + self.records.len() * 48);
        out.push_str(CSV_HEADER);
        out.push('\n');

        for record in &self.records {
            out.push_str(&format!(
                "{},{},{},{}\n",
                record.time_sec,
                csv_field(&record.text),
                record.sentiment,
                record.confidence
            ));
        }

        out
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Parse records back out of an exported CSV document
pub fn records_from_csv(input: &str) -> Result<Vec<SentimentRecord>> {
    let mut rows = parse_csv(input)?.into_iter();

    let header = rows
        .next()
        .ok_or_else(|| SentimentError::Response("CSV input is empty".to_string()))?;
    let expected: Vec<&str> = CSV_HEADER.split(',').collect();
    if header != expected {
        return Err(SentimentError::Response(format!(
            "unexpected CSV header: {}",
            header.join(",")
        )));
    }

    rows.enumerate()
        .map(|(i, row)| {
            if row.len() != 4 {
                return Err(SentimentError::Response(format!(
                    "CSV row {} has {} fields, expected 4",
                    i + 1,
                    row.len()
                )));
            }

            let time_sec: f64 = row[0].parse().map_err(|_| {
                SentimentError::Response(format!("CSV row {} has invalid time: {}", i + 1, row[0]))
            })?;
            let sentiment = Sentiment::from_str(&row[2]).map_err(|_| {
                SentimentError::Response(format!(
                    "CSV row {} has unknown sentiment: {}",
                    i + 1,
                    row[2]
                ))
            })?;
            let confidence: f64 = row[3].parse().map_err(|_| {
                SentimentError::Response(format!(
                    "CSV row {} has invalid confidence: {}",
                    i + 1,
                    row[3]
                ))
            })?;

            Ok(SentimentRecord {
                time_sec,
                text: row[1].clone(),
                sentiment,
                confidence,
            })
        })
        .collect()
}

/// Minimal RFC 4180 parser; quoted fields may contain delimiters and
/// newlines
fn parse_csv(input: &str) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(SentimentError::Response(
            "CSV input has an unterminated quoted field".to_string(),
        ));
    }

    // Trailing row without a final newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
