//! Thumb and connector geometry for the wide sidebar.

use std::fmt::Write as _;

/// Rendered box of one TOC anchor, read from the sidebar container.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorBox {
    /// Entry id the anchor links to.
    pub id: String,
    /// Heading level of the entry.
    pub level: u8,
    /// `clientHeight` of the anchor.
    pub height: f64,
    /// Computed `padding-top`.
    pub padding_top: f64,
    /// Computed `padding-bottom`.
    pub padding_bottom: f64,
}

impl AnchorBox {
    /// An anchor box with no padding.
    pub fn new(id: impl Into<String>, level: u8, height: f64) -> Self {
        Self {
            id: id.into(),
            level,
            height,
            padding_top: 0.0,
            padding_bottom: 0.0,
        }
    }

    /// Same box with the given vertical padding.
    pub fn with_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding_top = top;
        self.padding_bottom = bottom;
        self
    }
}

/// Position of the moving highlight, relative to the container top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thumb {
    /// Offset from the container top.
    pub top: f64,
    /// Height; zero hides the thumb.
    pub height: f64,
}

impl Thumb {
    /// Whether the thumb covers nothing.
    pub fn is_hidden(&self) -> bool {
        self.height <= 0.0
    }
}

/// SVG path of the decorative connector line.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorPath {
    /// Path data, `M x y L x y ...`.
    pub d: String,
    /// View box width.
    pub width: f64,
    /// View box height.
    pub height: f64,
}

impl ConnectorPath {
    /// Standalone SVG document drawing the path, for use as a CSS mask.
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\"><path d=\"{}\" stroke=\"black\" stroke-width=\"3\" fill=\"none\" /></svg>",
            fmt_px(self.width),
            fmt_px(self.height),
            self.d
        )
    }
}

/// Left indentation of a sidebar entry by heading depth.
pub fn item_indent(level: u8) -> f64 {
    match level {
        0..=2 => 14.0,
        3 => 26.0,
        _ => 36.0,
    }
}

/// X offset of the connector segment beside an entry; steps right for
/// nested headings so the line follows the indentation.
pub fn line_offset(level: u8) -> f64 {
    if level >= 3 {
        10.0
    } else {
        0.0
    }
}

/// Left indentation of an entry in the narrow dropdown.
pub fn dropdown_indent(level: u8) -> f64 {
    12.0 + f64::from(level.max(1) - 1) * 16.0
}

/// Thumb spanning every active anchor.
///
/// Offsets come from summing the heights of preceding anchors rather than
/// from page coordinates, so transforms on the sidebar do not skew them.
pub fn thumb(anchors: &[AnchorBox], container_height: f64, active: &[String]) -> Thumb {
    if active.is_empty() || container_height <= 0.0 {
        return Thumb::default();
    }

    let mut upper = f64::INFINITY;
    let mut lower = 0.0_f64;
    let mut cumulative = 0.0;

    for anchor in anchors {
        if active.iter().any(|id| *id == anchor.id) {
            upper = upper.min(cumulative + anchor.padding_top);
            lower = lower.max(cumulative + anchor.height - anchor.padding_bottom);
        }
        cumulative += anchor.height;
    }

    if !upper.is_finite() {
        return Thumb::default();
    }

    Thumb {
        top: upper.max(0.0),
        height: (lower - upper).max(0.0),
    }
}

/// Connector path through every anchor, top to bottom. `None` while the
/// container has no height (collapsed or not laid out yet).
pub fn connector_path(anchors: &[AnchorBox], container_height: f64) -> Option<ConnectorPath> {
    if container_height <= 0.0 || anchors.is_empty() {
        return None;
    }

    let mut d = String::new();
    let mut width = 0.0_f64;
    let mut height = 0.0_f64;
    let mut cumulative = 0.0;

    for (index, anchor) in anchors.iter().enumerate() {
        let x = line_offset(anchor.level) + 1.0;
        let top = cumulative + anchor.padding_top;
        let bottom = cumulative + anchor.height - anchor.padding_bottom;

        width = width.max(x);
        height = height.max(bottom);

        if index > 0 {
            d.push(' ');
        }
        let verb = if index == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{verb}{} {} L{} {}", fmt_px(x), fmt_px(top), fmt_px(x), fmt_px(bottom));

        cumulative += anchor.height;
    }

    Some(ConnectorPath {
        d,
        width: width + 1.0,
        height,
    })
}

fn fmt_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::{connector_path, dropdown_indent, item_indent, thumb, AnchorBox, Thumb};

    fn anchors() -> Vec<AnchorBox> {
        vec![
            AnchorBox::new("intro", 1, 32.0).with_padding(6.0, 6.0),
            AnchorBox::new("setup", 2, 32.0).with_padding(6.0, 6.0),
            AnchorBox::new("details", 3, 52.0).with_padding(6.0, 6.0),
            AnchorBox::new("faq", 1, 32.0).with_padding(6.0, 6.0),
        ]
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn single_active_entry() {
        let thumb = thumb(&anchors(), 148.0, &ids(&["setup"]));
        assert_eq!(thumb, Thumb { top: 38.0, height: 20.0 });
    }

    #[test]
    fn spans_first_to_last_active_entry() {
        let thumb = thumb(&anchors(), 148.0, &ids(&["setup", "details"]));
        assert_eq!(thumb, Thumb { top: 38.0, height: 72.0 });
    }

    #[test]
    fn hidden_when_nothing_active_or_collapsed() {
        assert!(thumb(&anchors(), 148.0, &[]).is_hidden());
        assert_eq!(thumb(&anchors(), 0.0, &ids(&["intro"])), Thumb::default());
        assert_eq!(thumb(&anchors(), 148.0, &ids(&["missing"])), Thumb::default());
    }

    #[test]
    fn connector_steps_for_nested_levels() {
        let path = connector_path(&anchors(), 148.0).expect("path for laid out container");
        assert_eq!(path.d, "M1 6 L1 26 L1 38 L1 58 L11 70 L11 110 L1 122 L1 142");
        assert_eq!(path.width, 12.0);
        assert_eq!(path.height, 142.0);
        assert!(path.to_svg().contains("viewBox=\"0 0 12 142\""));
    }

    #[test]
    fn connector_skipped_for_collapsed_container() {
        assert!(connector_path(&anchors(), 0.0).is_none());
        assert!(connector_path(&[], 100.0).is_none());
    }

    #[test]
    fn indentation_by_depth() {
        assert_eq!(item_indent(1), 14.0);
        assert_eq!(item_indent(2), 14.0);
        assert_eq!(item_indent(3), 26.0);
        assert_eq!(item_indent(6), 36.0);
        assert_eq!(dropdown_indent(1), 12.0);
        assert_eq!(dropdown_indent(3), 44.0);
    }
}
