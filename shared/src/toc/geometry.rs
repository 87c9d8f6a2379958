//! Layout readings and the trait that supplies them.

/// Vertical extent of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top edge, may be negative when scrolled past.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Rect {
    /// A rect from its two edges.
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Height, never negative.
    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Whether any part of the rect lies inside `[0, viewport_height)`.
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

/// Size of the browser viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// `innerWidth`.
    pub width: f64,
    /// `innerHeight`.
    pub height: f64,
}

/// Scroll state of the container the article scrolls in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub scroll_top: f64,
    /// Visible height of the container.
    pub client_height: f64,
    /// Full content height.
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Distance still scrollable below the visible area.
    pub fn remaining(&self) -> f64 {
        self.scroll_height - (self.scroll_top + self.client_height)
    }

    /// Whether the container is within `tolerance` pixels of its end.
    pub fn is_at_end(&self, tolerance: f64) -> bool {
        self.remaining() <= tolerance
    }
}

/// Read-only view of the live layout.
///
/// The browser implementation queries the DOM on every call; tests use a
/// fixed table. Nothing is cached between calls.
pub trait GeometryProvider {
    /// Bounding rect of the heading with element id `id`, if it exists.
    fn heading_rect(&self, id: &str) -> Option<Rect>;

    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Scroll metrics of the article's scroll container (or the window).
    fn scroll_metrics(&self) -> ScrollMetrics;
}

#[cfg(test)]
mod tests {
    use super::{Rect, ScrollMetrics};

    #[test]
    fn rect_viewport_intersection_is_half_open() {
        assert!(Rect::new(-10.0, 1.0).intersects_viewport(800.0));
        assert!(!Rect::new(-10.0, 0.0).intersects_viewport(800.0));
        assert!(!Rect::new(800.0, 840.0).intersects_viewport(800.0));
        assert_eq!(Rect::new(10.0, 5.0).height(), 0.0);
    }

    #[test]
    fn scroll_end_respects_tolerance() {
        let metrics = ScrollMetrics {
            scroll_top: 1198.0,
            client_height: 800.0,
            scroll_height: 2000.0,
        };
        assert_eq!(metrics.remaining(), 2.0);
        assert!(metrics.is_at_end(2.0));
        assert!(!metrics.is_at_end(1.0));
    }
}
