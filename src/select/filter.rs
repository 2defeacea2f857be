//! Derived result view and match segmentation
//!
//! Pure functions over the loaded dataset: a bounded case-insensitive
//! substring filter, and a segmenter that splits a display string into
//! matched/unmatched runs so the rendering layer can style matches without
//! any markup injection surface.

use crate::catalog::Record;

/// Hard truncation applied to the derived view
pub const RESULT_CAP: usize = 500;

/// Indices into `records` forming the derived view for `query`.
///
/// Empty query: the first `cap` records in dataset order. Otherwise every
/// record whose `name` or `datasource` contains `query` as a
/// case-insensitive substring, truncated to the first `cap` matches in
/// dataset order. Matching is unanchored containment; ties keep dataset
/// order.
pub fn filter_indices(records: &[Record], query: &str, cap: usize) -> Vec<usize> {
    if cap == 0 {
        return Vec::new();
    }
    if query.is_empty() {
        return (0..records.len().min(cap)).collect();
    }

    let needle = query.to_lowercase();
    let mut indices = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        if record.name.to_lowercase().contains(&needle)
            || record.datasource.to_lowercase().contains(&needle)
        {
            indices.push(idx);
            if indices.len() >= cap {
                break;
            }
        }
    }

    indices
}

/// One run of a display string, either inside or outside a query match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSegment {
    pub text: String,
    pub is_match: bool,
}

/// Split `text` into matched/unmatched runs for `query`.
///
/// Concatenating the segment texts reproduces `text` exactly. With an empty
/// query the whole string is one unmatched segment. Matching is
/// case-insensitive on a per-character basis.
pub fn match_segments(text: &str, query: &str) -> Vec<MatchSegment> {
    if text.is_empty() {
        return Vec::new();
    }
    if query.is_empty() {
        return vec![MatchSegment {
            text: text.to_string(),
            is_match: false,
        }];
    }

    let haystack: Vec<char> = text.chars().map(lower_char).collect();
    let needle: Vec<char> = query.chars().map(lower_char).collect();

    let mut matched = vec![false; haystack.len()];
    if needle.len() <= haystack.len() {
        for start in 0..=(haystack.len() - needle.len()) {
            if haystack[start..start + needle.len()] == needle[..] {
                for flag in &mut matched[start..start + needle.len()] {
                    *flag = true;
                }
            }
        }
    }

    let original: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut run_start = 0;

    for i in 1..=original.len() {
        if i == original.len() || matched[i] != matched[run_start] {
            segments.push(MatchSegment {
                text: original[run_start..i].iter().collect(),
                is_match: matched[run_start],
            });
            run_start = i;
        }
    }

    segments
}

/// Single-character lowercasing; multi-char expansions keep their first
/// character so offsets stay aligned with the original string
fn lower_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
