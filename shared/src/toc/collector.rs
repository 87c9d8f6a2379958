//! Turns scanned headings into the ordered entry list.
//!
//! Headings without an id get one derived from their text, or a positional
//! `heading-<index>` when the text has nothing to slug. The caller writes
//! the derived ids back onto the DOM so later scans are idempotent.

use tracing::trace;

use super::{slug::slugify, TocEntry};
use crate::config::CommentsEntry;

/// A heading element as read from the document, before id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedHeading {
    /// The element's current `id` attribute; empty when unset.
    pub id: String,
    /// The element's text content.
    pub text: String,
    /// Heading depth, 1..=6.
    pub level: u8,
}

impl ScannedHeading {
    /// Convenience constructor, mostly for tests and fakes.
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
        }
    }
}

/// Result of one full collection pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collection {
    /// Entries in document order, plus the comments entry when requested.
    pub entries: Vec<TocEntry>,
    /// `(heading index, id)` pairs that must be written back to elements.
    pub assigned: Vec<(usize, String)>,
}

/// Level of a heading tag name (`"H3"` / `"h3"` → 3).
pub fn heading_level(tag_name: &str) -> Option<u8> {
    let mut chars = tag_name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('h' | 'H'), Some(digit @ '1'..='6'), None) => digit.to_digit(10).map(|d| d as u8),
        _ => None,
    }
}

/// Build the entry list for `headings`, deriving ids where missing.
///
/// Duplicate slugs are kept as-is; two "Overview" headings both map to
/// `overview`.
pub fn collect_headings(headings: &[ScannedHeading], comments: Option<&CommentsEntry>) -> Collection {
    let mut collection = Collection {
        entries: Vec::with_capacity(headings.len() + usize::from(comments.is_some())),
        assigned: Vec::new(),
    };

    for (index, heading) in headings.iter().enumerate() {
        let id = if heading.id.is_empty() {
            let derived = match slugify(&heading.text) {
                slug if slug.is_empty() => format!("heading-{index}"),
                slug => slug,
            };
            collection.assigned.push((index, derived.clone()));
            derived
        } else {
            heading.id.clone()
        };

        collection
            .entries
            .push(TocEntry::new(id, heading.text.trim(), heading.level));
    }

    if let Some(comments) = comments {
        collection
            .entries
            .push(TocEntry::new(comments.id.clone(), comments.text.clone(), comments.level));
    }

    trace!(
        entries = collection.entries.len(),
        assigned = collection.assigned.len(),
        "collected toc headings"
    );
    collection
}

#[cfg(test)]
mod tests {
    use super::{collect_headings, heading_level, ScannedHeading};
    use crate::config::CommentsEntry;

    fn ids(headings: &[ScannedHeading], comments: Option<&CommentsEntry>) -> Vec<String> {
        collect_headings(headings, comments)
            .entries
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }

    #[test]
    fn parses_heading_tags() {
        assert_eq!(heading_level("H1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("H7"), None);
        assert_eq!(heading_level("HR"), None);
        assert_eq!(heading_level("H10"), None);
    }

    #[test]
    fn keeps_explicit_ids_and_derives_missing_ones() {
        let headings = vec![
            ScannedHeading::new("custom", "Intro", 1),
            ScannedHeading::new("", "Next Steps", 2),
        ];
        let collection = collect_headings(&headings, None);
        assert_eq!(collection.entries[0].id, "custom");
        assert_eq!(collection.entries[1].id, "next-steps");
        assert_eq!(collection.assigned, vec![(1, "next-steps".to_string())]);
    }

    #[test]
    fn falls_back_to_positional_id() {
        let headings = vec![
            ScannedHeading::new("", "Intro", 1),
            ScannedHeading::new("", "???", 2),
        ];
        assert_eq!(ids(&headings, None), vec!["intro", "heading-1"]);
    }

    #[test]
    fn duplicate_slugs_are_not_deduplicated() {
        let headings = vec![
            ScannedHeading::new("", "Overview", 2),
            ScannedHeading::new("", "Overview", 2),
        ];
        assert_eq!(ids(&headings, None), vec!["overview", "overview"]);
    }

    #[test]
    fn appends_comments_entry_last() {
        let headings = vec![ScannedHeading::new("", "Intro", 1)];
        let comments = CommentsEntry::default();
        let collection = collect_headings(&headings, Some(&comments));
        assert_eq!(collection.entries.len(), 2);
        let last = &collection.entries[1];
        assert_eq!((last.id.as_str(), last.text.as_str(), last.level), ("comments", "Comments", 2));
    }

    #[test]
    fn rescan_after_assignment_is_idempotent() {
        let mut headings = vec![
            ScannedHeading::new("", "Intro", 1),
            ScannedHeading::new("", "Setup", 2),
        ];
        let first = collect_headings(&headings, None);
        for (index, id) in &first.assigned {
            headings[*index].id = id.clone();
        }
        let second = collect_headings(&headings, None);
        assert_eq!(first.entries, second.entries);
        assert!(second.assigned.is_empty());
    }

    #[test]
    fn empty_document_yields_no_entries() {
        assert!(collect_headings(&[], None).entries.is_empty());
    }
}
