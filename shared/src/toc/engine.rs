//! The reducer every TOC event goes through.

use tracing::debug;

use super::{
    geometry::GeometryProvider,
    scroll::ScrollToHeading,
    tracker::{ActiveSetTracker, IntersectionRecord, LayoutMode},
    TocEntry,
};
use crate::config::TocConfig;

/// Everything that can make the TOC state move.
///
/// Producers are independent (mutation observer, intersection observer,
/// window listeners, click handlers); none of them relies on the order of
/// the others because every event re-derives state from the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum TocEvent {
    /// A full heading scan finished.
    HeadingsCollected(Vec<TocEntry>),
    /// The intersection observer delivered a batch.
    Intersections(Vec<IntersectionRecord>),
    /// A fresh intersection subscription was attached.
    ObserverAttached,
    /// The window scrolled.
    Scrolled,
    /// The window resized to `width` logical pixels.
    Resized {
        /// New `innerWidth`.
        width: f64,
    },
    /// Explicit request to rerun the position fallback.
    Recompute,
}

/// What the host must do after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// The snapshot changed and should be re-rendered.
    pub changed: bool,
    /// The intersection subscription must be torn down and rebuilt.
    pub resubscribe: bool,
    /// Send [`TocEvent::Recompute`] on the next animation frame.
    pub schedule_recompute: bool,
}

/// Render-ready copy of the engine state.
#[derive(Debug, Clone, PartialEq)]
pub struct TocSnapshot {
    /// Entries in document order.
    pub entries: Vec<TocEntry>,
    /// Active ids, top to bottom.
    pub active: Vec<String>,
    /// Presentation to render.
    pub mode: LayoutMode,
    /// Bumped whenever the intersection subscription must be rebuilt.
    pub observer_epoch: u64,
}

impl TocSnapshot {
    /// Nothing to render.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `id` is highlighted.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|active| active == id)
    }

    /// Entry named in the narrow bar: the first active one, or the first
    /// entry when nothing is active yet.
    pub fn current_entry(&self) -> Option<&TocEntry> {
        match self.active.first() {
            Some(id) => self.entries.iter().find(|entry| entry.id == *id),
            None => self.entries.first(),
        }
    }
}

/// The single reducer behind one TOC instance.
#[derive(Debug, Clone)]
pub struct TocEngine {
    config: TocConfig,
    entries: Vec<TocEntry>,
    tracker: ActiveSetTracker,
    observer_epoch: u64,
}

impl TocEngine {
    /// Engine with no entries, in the mode implied by `viewport_width`.
    pub fn new(config: TocConfig, viewport_width: f64) -> Self {
        let mode = LayoutMode::from_width(viewport_width, config.wide_breakpoint_px);
        let tracker = ActiveSetTracker::new(mode, &config);
        Self {
            config,
            entries: Vec::new(),
            tracker,
            observer_epoch: 0,
        }
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    /// Current entries.
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Current active ids.
    pub fn active(&self) -> &[String] {
        self.tracker.active()
    }

    /// Current layout mode.
    pub fn mode(&self) -> LayoutMode {
        self.tracker.mode()
    }

    /// Copy of the state for rendering.
    pub fn snapshot(&self) -> TocSnapshot {
        TocSnapshot {
            entries: self.entries.clone(),
            active: self.tracker.active().to_vec(),
            mode: self.tracker.mode(),
            observer_epoch: self.observer_epoch,
        }
    }

    /// Scroll sequence for a click on entry `id`.
    pub fn scroll_plan(&self, id: &str) -> ScrollToHeading {
        ScrollToHeading::new(id, &self.config)
    }

    /// Apply one event and report what the host has to do next.
    pub fn dispatch<G>(&mut self, event: TocEvent, geometry: &G) -> Reaction
    where
        G: GeometryProvider + ?Sized,
    {
        match event {
            // Every scan may have produced fresh heading nodes, so the
            // subscription is rebuilt even when the list reads the same.
            TocEvent::HeadingsCollected(entries) => {
                let entries_changed = entries != self.entries;
                debug!(count = entries.len(), entries_changed, "toc entries replaced");
                self.entries = entries;
                let active_changed = self.tracker.reset_entries(&self.entries);
                self.observer_epoch += 1;
                Reaction {
                    changed: entries_changed || active_changed,
                    resubscribe: true,
                    schedule_recompute: true,
                }
            },
            TocEvent::Intersections(records) => {
                let update = self.tracker.apply_intersections(&records, geometry);
                Reaction {
                    changed: update.changed,
                    resubscribe: false,
                    schedule_recompute: update.needs_fallback,
                }
            },
            TocEvent::ObserverAttached => Reaction {
                changed: self.tracker.pin_if_at_end(geometry).unwrap_or(false),
                ..Reaction::default()
            },
            TocEvent::Scrolled | TocEvent::Recompute => Reaction {
                changed: self.tracker.recompute(geometry),
                ..Reaction::default()
            },
            TocEvent::Resized { width } => {
                let mode = LayoutMode::from_width(width, self.config.wide_breakpoint_px);
                let resubscribe = self.tracker.set_mode(mode);
                if resubscribe {
                    self.observer_epoch += 1;
                }
                let recomputed = self.tracker.recompute(geometry);
                Reaction {
                    changed: resubscribe || recomputed,
                    resubscribe,
                    schedule_recompute: false,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TocEngine, TocEvent};
    use crate::{
        config::TocConfig,
        toc::{
            geometry::{GeometryProvider, Rect, ScrollMetrics, Viewport},
            tracker::LayoutMode,
            IntersectionRecord, TocEntry,
        },
    };

    struct Flat;

    impl GeometryProvider for Flat {
        fn heading_rect(&self, id: &str) -> Option<Rect> {
            match id {
                "a" => Some(Rect::new(20.0, 60.0)),
                "b" => Some(Rect::new(400.0, 440.0)),
                _ => None,
            }
        }

        fn viewport(&self) -> Viewport {
            Viewport {
                width: 1600.0,
                height: 800.0,
            }
        }

        fn scroll_metrics(&self) -> ScrollMetrics {
            ScrollMetrics {
                scroll_top: 0.0,
                client_height: 800.0,
                scroll_height: 3000.0,
            }
        }
    }

    fn entries() -> Vec<TocEntry> {
        vec![TocEntry::new("a", "A", 1), TocEntry::new("b", "B", 2)]
    }

    #[test]
    fn new_entries_resubscribe_and_schedule_recompute() {
        let mut engine = TocEngine::new(TocConfig::default(), 1600.0);
        let reaction = engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        assert!(reaction.changed && reaction.resubscribe && reaction.schedule_recompute);
        assert_eq!(engine.snapshot().observer_epoch, 1);
    }

    #[test]
    fn identical_rescan_still_resubscribes() {
        let mut engine = TocEngine::new(TocConfig::default(), 1600.0);
        engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        engine.dispatch(TocEvent::Recompute, &Flat);
        let active = engine.active().to_vec();

        let reaction = engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        assert!(reaction.resubscribe && reaction.schedule_recompute);
        assert!(!reaction.changed);
        assert_eq!(engine.snapshot().observer_epoch, 2);
        assert_eq!(engine.active(), active.as_slice());
    }

    #[test]
    fn mode_change_bumps_epoch_once() {
        let mut engine = TocEngine::new(TocConfig::default(), 1600.0);
        engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        let reaction = engine.dispatch(TocEvent::Resized { width: 1200.0 }, &Flat);
        assert!(reaction.resubscribe);
        assert_eq!(engine.mode(), LayoutMode::Narrow);
        let reaction = engine.dispatch(TocEvent::Resized { width: 1100.0 }, &Flat);
        assert!(!reaction.resubscribe);
        assert_eq!(engine.snapshot().observer_epoch, 2);
    }

    #[test]
    fn invisible_batch_schedules_fallback() {
        let mut engine = TocEngine::new(TocConfig::default(), 1600.0);
        engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        let reaction = engine.dispatch(
            TocEvent::Intersections(vec![IntersectionRecord::new("a", 0.0)]),
            &Flat,
        );
        assert!(reaction.schedule_recompute);
        let reaction = engine.dispatch(TocEvent::Recompute, &Flat);
        assert!(reaction.changed);
        assert_eq!(engine.active(), ["a", "b"]);
    }

    #[test]
    fn current_entry_falls_back_to_first() {
        let mut engine = TocEngine::new(TocConfig::default(), 1200.0);
        engine.dispatch(TocEvent::HeadingsCollected(entries()), &Flat);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.current_entry().map(|entry| entry.id.as_str()), Some("a"));
        assert!(!snapshot.is_empty());
    }
}
