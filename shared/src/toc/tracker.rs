//! Active-set bookkeeping.
//!
//! Intersection ratios are the primary signal. When a batch leaves nothing
//! visible, [`ActiveSetTracker::recompute`] falls back to element positions,
//! and reaching the end of the scroll container always pins the last entry.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::{geometry::GeometryProvider, TocEntry};
use crate::config::TocConfig;

/// Which presentation the TOC is in, decided by viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    /// Dropdown bar; at most one active heading.
    Narrow,
    /// Sidebar with thumb; every visible heading is active.
    Wide,
}

impl LayoutMode {
    /// `Wide` at or above `breakpoint`, `Narrow` below.
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }

    /// Shorthand for `== LayoutMode::Wide`.
    pub fn is_wide(self) -> bool {
        self == LayoutMode::Wide
    }
}

/// One intersection observer report for a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionRecord {
    /// Element id of the observed heading.
    pub id: String,
    /// Visible fraction, 0..=1.
    pub ratio: f64,
}

impl IntersectionRecord {
    /// A record for `id` at `ratio`.
    pub fn new(id: impl Into<String>, ratio: f64) -> Self {
        Self {
            id: id.into(),
            ratio,
        }
    }
}

/// What a tracker step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerUpdate {
    /// The active set differs from before the step.
    pub changed: bool,
    /// No heading was visible; the caller should run [`ActiveSetTracker::recompute`]
    /// once layout has settled.
    pub needs_fallback: bool,
}

/// Maintains the active set from intersection reports and scroll position.
#[derive(Debug, Clone)]
pub struct ActiveSetTracker {
    mode: LayoutMode,
    ids: Vec<String>,
    ratios: HashMap<String, f64>,
    active: Vec<String>,
    narrow_activation_px: f64,
    fallback_viewport_ratio: f64,
    scroll_end_tolerance_px: f64,
}

impl ActiveSetTracker {
    /// An empty tracker in `mode`.
    pub fn new(mode: LayoutMode, config: &TocConfig) -> Self {
        Self {
            mode,
            ids: Vec::new(),
            ratios: HashMap::new(),
            active: Vec::new(),
            narrow_activation_px: config.narrow_activation_px,
            fallback_viewport_ratio: config.fallback_viewport_ratio,
            scroll_end_tolerance_px: config.scroll_end_tolerance_px,
        }
    }

    /// Current layout mode.
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Active ids, top to bottom.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Whether `id` is in the active set.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|active| active == id)
    }

    /// Track a new entry list. Ratios from the previous subscription are
    /// dropped; active ids that no longer exist are removed.
    pub fn reset_entries(&mut self, entries: &[TocEntry]) -> bool {
        self.ids = entries.iter().map(|entry| entry.id.clone()).collect();
        self.ratios.clear();
        let ids = &self.ids;
        let kept: Vec<String> = self
            .active
            .iter()
            .filter(|id| ids.contains(*id))
            .cloned()
            .collect();
        self.set_active(kept)
    }

    /// Switch layout mode. Returns `true` when the mode actually changed,
    /// in which case the intersection subscription must be rebuilt.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        if self.mode == mode {
            return false;
        }
        debug!(?mode, "toc layout mode changed");
        self.mode = mode;
        self.ratios.clear();
        true
    }

    /// Apply one batch of intersection reports.
    pub fn apply_intersections<G>(&mut self, records: &[IntersectionRecord], geometry: &G) -> TrackerUpdate
    where
        G: GeometryProvider + ?Sized,
    {
        for record in records {
            if record.id.is_empty() || !self.ids.contains(&record.id) {
                continue;
            }
            self.ratios.insert(record.id.clone(), record.ratio);
        }

        if let Some(changed) = self.pin_if_at_end(geometry) {
            return TrackerUpdate {
                changed,
                needs_fallback: false,
            };
        }

        let visible = self.visible_ids(geometry);
        if visible.is_empty() {
            trace!("no visible headings in batch, fallback requested");
            return TrackerUpdate {
                changed: false,
                needs_fallback: true,
            };
        }

        let next = match self.mode {
            LayoutMode::Wide => visible,
            LayoutMode::Narrow => visible.into_iter().take(1).collect(),
        };
        TrackerUpdate {
            changed: self.set_active(next),
            needs_fallback: false,
        }
    }

    /// Force the active set to the last entry when the scroll container has
    /// reached its end. Returns `None` when not at the end, otherwise
    /// whether the active set changed.
    pub fn pin_if_at_end<G>(&mut self, geometry: &G) -> Option<bool>
    where
        G: GeometryProvider + ?Sized,
    {
        let last = self.ids.last()?.clone();
        if !geometry.scroll_metrics().is_at_end(self.scroll_end_tolerance_px) {
            return None;
        }
        trace!(%last, "scrolled to end, pinning last heading");
        Some(self.set_active(vec![last]))
    }

    /// Ids with a nonzero ratio, sorted by their element's current top.
    /// Headings whose element vanished sort last.
    pub fn visible_ids<G>(&self, geometry: &G) -> Vec<String>
    where
        G: GeometryProvider + ?Sized,
    {
        let mut visible: Vec<(f64, &String)> = self
            .ids
            .iter()
            .filter(|id| self.ratios.get(*id).is_some_and(|ratio| *ratio > 0.0))
            .map(|id| {
                let top = geometry
                    .heading_rect(id)
                    .map_or(f64::INFINITY, |rect| rect.top);
                (top, id)
            })
            .collect();
        visible.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut ids: Vec<String> = visible.into_iter().map(|(_, id)| id.clone()).collect();
        ids.dedup();
        ids
    }

    /// Position-based recomputation used when intersection data is missing
    /// and on every scroll or resize. Never leaves the set empty while
    /// entries exist.
    pub fn recompute<G>(&mut self, geometry: &G) -> bool
    where
        G: GeometryProvider + ?Sized,
    {
        if self.ids.is_empty() {
            return self.set_active(Vec::new());
        }
        if let Some(changed) = self.pin_if_at_end(geometry) {
            return changed;
        }

        let viewport = geometry.viewport();
        let top_of = |id: &String| geometry.heading_rect(id).map(|rect| rect.top);

        let mut next: Vec<String> = match self.mode {
            LayoutMode::Narrow => self
                .ids
                .iter()
                .rev()
                .find(|id| top_of(*id).is_some_and(|top| top <= self.narrow_activation_px))
                .cloned()
                .into_iter()
                .collect(),
            LayoutMode::Wide => self
                .ids
                .iter()
                .filter(|id| {
                    geometry
                        .heading_rect(id)
                        .is_some_and(|rect| rect.intersects_viewport(viewport.height))
                })
                .cloned()
                .collect(),
        };

        if next.is_empty() {
            let line = viewport.height * self.fallback_viewport_ratio;
            if let Some(id) = self
                .ids
                .iter()
                .rev()
                .find(|id| top_of(*id).is_some_and(|top| top <= line))
            {
                next.push(id.clone());
            }
        }

        if next.is_empty() {
            next.extend(self.ids.first().cloned());
        }

        self.set_active(next)
    }

    fn set_active(&mut self, next: Vec<String>) -> bool {
        if self.active == next {
            return false;
        }
        self.active = next;
        true
    }
}
