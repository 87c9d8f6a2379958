//! Click-to-heading scroll plan.

use crate::config::TocConfig;

/// One step of the scroll-to-heading sequence, in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollStep {
    /// `scrollIntoView` the heading, smoothly with an instant fallback.
    ScrollIntoView {
        /// Target element id.
        id: String,
    },
    /// Replace the location fragment without navigating.
    ReplaceFragment(String),
    /// Wait before continuing.
    Wait(u32),
    /// Scroll the window so the heading sits this far below the top.
    CompensateHeader(f64),
    /// Rerun the active-set fallback and fire a synthetic `resize`.
    Recompute,
}

/// The best-effort sequence run when a TOC entry is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollToHeading {
    id: String,
    header_offset_px: f64,
    settle_ms: u32,
    recompute_delay_ms: u32,
}

impl ScrollToHeading {
    /// Plan a scroll to heading `id`.
    pub fn new(id: impl Into<String>, config: &TocConfig) -> Self {
        Self {
            id: id.into(),
            header_offset_px: config.header_offset_px,
            settle_ms: config.scroll_settle_ms,
            recompute_delay_ms: config.recompute_delay_ms,
        }
    }

    /// Target heading id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fragment written to the location, `#id`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.id)
    }

    /// Delay between the initial scroll and the header compensation.
    pub fn settle_ms(&self) -> u32 {
        self.settle_ms
    }

    /// Delay between the compensation and the forced recomputation.
    pub fn recompute_delay_ms(&self) -> u32 {
        self.recompute_delay_ms
    }

    /// Window scroll target that leaves room for the fixed header, given
    /// the heading's current viewport top and the window's scroll offset.
    pub fn compensated_top(&self, heading_top: f64, page_y_offset: f64) -> f64 {
        (heading_top + page_y_offset - self.header_offset_px).max(0.0)
    }

    /// The full sequence.
    pub fn steps(&self) -> Vec<ScrollStep> {
        vec![
            ScrollStep::ScrollIntoView {
                id: self.id.clone(),
            },
            ScrollStep::ReplaceFragment(self.fragment()),
            ScrollStep::Wait(self.settle_ms),
            ScrollStep::CompensateHeader(self.header_offset_px),
            ScrollStep::Wait(self.recompute_delay_ms),
            ScrollStep::Recompute,
        ]
    }
}
