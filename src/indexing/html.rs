//! HTML heading buckets for weighted full-text fields
//!
//! The indexer stores heading text separately from body text so that a match
//! in an `<h1>` can be boosted above a match in a paragraph. A fragment such as
//!
//! ```text
//! Intro <h2>Head</h2> Rest
//! ```
//!
//! becomes `{ "h2": "Head", "text": "Intro Rest" }`.
//!
//! # Plain-text mode
//!
//! With plain-text mode off, `text` collects whatever lies between heading
//! elements while the fragment is scanned. With it on, `text` is computed once
//! from the whole fragment before the scan (headings included) and the scan
//! only fills heading buckets. Both behaviors are relied upon by existing index
//! mappings and are kept distinct.

use crate::indexing::cleanup::TextCleaner;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Bucket label → accumulated text
pub type Buckets = BTreeMap<String, String>;

/// Bucket that always exists for non-blank input
pub const TEXT_BUCKET: &str = "text";

/// Any markup construct: comments, declarations, processing instructions and tags.
/// Group 1 holds the element name of regular tags.
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[!?][^>]*>|</?([A-Za-z][A-Za-z0-9]*)[^>]*>").unwrap()
});

static HEADING_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)h[1-6]$").unwrap());

/// A complete heading element on a single line. The closing tag must repeat the
/// opening level, so each level is spelled out as its own alternative.
static HEADING_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = (1..=6)
        .map(|level| format!(r"<h{level}[^>]*>.*?</h{level}>"))
        .collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Splits an HTML fragment into a `text` bucket and one bucket per heading level.
///
/// Blank input yields an empty map. Otherwise the result holds `text` (possibly
/// empty) and an `h1`..`h6` entry for every level that occurs. All values are
/// tag-free with whitespace collapsed to single spaces.
pub fn extract_html_tags(input: &str, cleaner: &dyn TextCleaner, plain_text: bool) -> Buckets {
    if input.trim().is_empty() {
        return Buckets::new();
    }

    // Tags glued to words ("foo<br>bar") must not merge the words once stripped.
    let padded = input.replace('<', " <").replace('>', "> ");
    let cleaned = cleaner.clean(&padded);

    let mut buckets = Buckets::new();
    let mut text = if plain_text {
        strip_all_tags(&cleaned)
    } else {
        String::new()
    };

    let headings_only = keep_heading_tags(&cleaned);
    let mut rest = headings_only.as_str();
    loop {
        let Some(heading) = HEADING_ELEMENT.find(rest) else {
            if !plain_text {
                text.push_str(rest);
            }
            break;
        };

        if !plain_text {
            text.push_str(&rest[..heading.start()]);
        }

        let element = heading.as_str();
        let bucket = buckets.entry(element[1..3].to_ascii_lowercase()).or_default();
        bucket.push(' ');
        bucket.push_str(element);

        rest = &rest[heading.end()..];
    }
    buckets.insert(TEXT_BUCKET.to_string(), text);

    for value in buckets.values_mut() {
        *value = collapse_whitespace(&strip_all_tags(value));
    }
    buckets
}

/// Puts a pre-cleaned structured field into `bucket_name` without any markup handling.
///
/// In plain-text mode the same value is mirrored into `text`.
pub fn extract_into(
    bucket_name: &str,
    input: &str,
    cleaner: &dyn TextCleaner,
    plain_text: bool,
) -> Buckets {
    let cleaned = cleaner.clean(input);

    let mut buckets = Buckets::new();
    if plain_text {
        buckets.insert(TEXT_BUCKET.to_string(), cleaned.clone());
    }
    buckets.insert(bucket_name.to_string(), cleaned);
    buckets
}

/// Removes every tag and comment.
pub fn strip_all_tags(input: &str) -> String {
    MARKUP.replace_all(input, "").into_owned()
}

/// Removes every tag except `h1`..`h6`.
fn keep_heading_tags(input: &str) -> String {
    MARKUP
        .replace_all(input, |caps: &Captures| match caps.get(1) {
            Some(name) if HEADING_NAME.is_match(name.as_str()) => caps[0].to_string(),
            _ => String::new(),
        })
        .into_owned()
}

/// Collapses whitespace runs to one space and trims both ends.
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input, " ").trim().to_string()
}
