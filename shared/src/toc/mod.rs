//! Table-of-contents engine.
//!
//! Data flows one way: [`collector`] turns scanned headings into
//! [`TocEntry`] lists, [`tracker`] derives the active set from intersection
//! and scroll signals, and [`positioner`] turns the active set into thumb
//! geometry. [`engine::TocEngine`] is the single reducer the UI feeds
//! events into.

use serde::{Deserialize, Serialize};

pub mod collector;
pub mod engine;
pub mod geometry;
pub mod positioner;
pub mod scroll;
pub mod slug;
pub mod tracker;

pub use collector::{collect_headings, heading_level, Collection, ScannedHeading};
pub use engine::{Reaction, TocEngine, TocEvent, TocSnapshot};
pub use geometry::{GeometryProvider, Rect, ScrollMetrics, Viewport};
pub use positioner::{
    connector_path, dropdown_indent, item_indent, line_offset, thumb, AnchorBox, ConnectorPath, Thumb,
};
pub use scroll::{ScrollStep, ScrollToHeading};
pub use slug::slugify;
pub use tracker::{ActiveSetTracker, IntersectionRecord, LayoutMode};

/// One heading in the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TocEntry {
    /// Element id of the heading; the anchor target.
    pub id: String,
    /// Heading text as displayed.
    pub text: String,
    /// Heading depth, 1..=6.
    pub level: u8,
}

impl TocEntry {
    /// Build an entry, clamping `level` into 1..=6.
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level: level.clamp(1, 6),
        }
    }

    /// `#id`, the anchor href for this entry.
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}
