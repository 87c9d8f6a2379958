//! Tunables of the table of contents, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::TocError;

const DEFAULT_WIDE_BREAKPOINT_PX: f64 = 1500.0;
const DEFAULT_THRESHOLDS: [f64; 7] = [0.0, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0];
const DEFAULT_BOTTOM_MARGIN_RATIO: f64 = 0.2;
const DEFAULT_SCROLL_END_TOLERANCE_PX: f64 = 2.0;
const DEFAULT_NARROW_ACTIVATION_PX: f64 = 100.0;
const DEFAULT_FALLBACK_VIEWPORT_RATIO: f64 = 0.5;
const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;
const DEFAULT_SCROLL_SETTLE_MS: u32 = 300;
const DEFAULT_RECOMPUTE_DELAY_MS: u32 = 250;
const DEFAULT_STICKY_AFTER_PX: f64 = 50.0;

/// Tunables of the table of contents.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Viewport widths at or above this use the multi-active sidebar.
    pub wide_breakpoint_px: f64,
    /// Intersection ratios at which the observer reports.
    pub thresholds: Vec<f64>,
    /// Fraction of the viewport cut off at the bottom for visibility tests.
    pub bottom_margin_ratio: f64,
    /// Remaining scroll distance treated as "at the end".
    pub scroll_end_tolerance_px: f64,
    /// Narrow fallback: a heading counts once its top is above this line.
    pub narrow_activation_px: f64,
    /// Last-resort fallback: a heading counts once its top is above this
    /// fraction of the viewport height.
    pub fallback_viewport_ratio: f64,
    /// Height of the fixed header compensated after scrolling to a heading.
    pub header_offset_px: f64,
    /// Delay before the header compensation nudge.
    pub scroll_settle_ms: u32,
    /// Delay between the nudge and the forced recomputation.
    pub recompute_delay_ms: u32,
    /// Scroll distance after which the narrow bar becomes visible.
    pub sticky_after_px: f64,
    /// Synthetic trailing entry for the comments section.
    pub comments: CommentsEntry,
}

/// Shape of the synthetic "Comments" entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsEntry {
    /// Element id the entry scrolls to.
    pub id: String,
    /// Label shown in the TOC.
    pub text: String,
    /// Heading level the entry is rendered at.
    pub level: u8,
}

impl Default for CommentsEntry {
    fn default() -> Self {
        Self {
            id: "comments".to_string(),
            text: "Comments".to_string(),
            level: 2,
        }
    }
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            wide_breakpoint_px: DEFAULT_WIDE_BREAKPOINT_PX,
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            bottom_margin_ratio: DEFAULT_BOTTOM_MARGIN_RATIO,
            scroll_end_tolerance_px: DEFAULT_SCROLL_END_TOLERANCE_PX,
            narrow_activation_px: DEFAULT_NARROW_ACTIVATION_PX,
            fallback_viewport_ratio: DEFAULT_FALLBACK_VIEWPORT_RATIO,
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            scroll_settle_ms: DEFAULT_SCROLL_SETTLE_MS,
            recompute_delay_ms: DEFAULT_RECOMPUTE_DELAY_MS,
            sticky_after_px: DEFAULT_STICKY_AFTER_PX,
            comments: CommentsEntry::default(),
        }
    }
}

impl TocConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(raw: &str) -> Result<Self, TocError> {
        let config: TocConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the tracker misbehave.
    pub fn validate(&self) -> Result<(), TocError> {
        if !(self.wide_breakpoint_px.is_finite() && self.wide_breakpoint_px > 0.0) {
            return Err(TocError::InvalidConfig(format!(
                "wide_breakpoint_px must be positive, got {}",
                self.wide_breakpoint_px
            )));
        }
        if self.thresholds.is_empty() {
            return Err(TocError::InvalidConfig("thresholds must not be empty".to_string()));
        }
        if let Some(bad) = self.thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(TocError::InvalidConfig(format!(
                "threshold {bad} is outside [0, 1]"
            )));
        }
        if self.thresholds.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(TocError::InvalidConfig(
                "thresholds must be in ascending order".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.bottom_margin_ratio) {
            return Err(TocError::InvalidConfig(format!(
                "bottom_margin_ratio must be in [0, 1), got {}",
                self.bottom_margin_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.fallback_viewport_ratio) {
            return Err(TocError::InvalidConfig(format!(
                "fallback_viewport_ratio must be in [0, 1], got {}",
                self.fallback_viewport_ratio
            )));
        }
        if self.scroll_end_tolerance_px < 0.0 {
            return Err(TocError::InvalidConfig(
                "scroll_end_tolerance_px must not be negative".to_string(),
            ));
        }
        if !(1..=6).contains(&self.comments.level) {
            return Err(TocError::InvalidConfig(format!(
                "comments.level must be 1..=6, got {}",
                self.comments.level
            )));
        }
        if self.comments.id.trim().is_empty() {
            return Err(TocError::InvalidConfig("comments.id must not be empty".to_string()));
        }
        Ok(())
    }

    /// Observer root margin, e.g. `0px 0px -20% 0px`.
    pub fn root_margin(&self) -> String {
        let percent = self.bottom_margin_ratio * 100.0;
        format!("0px 0px -{}% 0px", trim_float(percent))
    }
}

fn trim_float(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

#[cfg(test)]
mod tests {
    use super::TocConfig;
    use crate::TocError;

    #[test]
    fn defaults_match_documented_values() {
        let config = TocConfig::default();
        assert_eq!(config.wide_breakpoint_px, 1500.0);
        assert_eq!(config.thresholds, vec![0.0, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(config.root_margin(), "0px 0px -20% 0px");
        assert_eq!(config.comments.id, "comments");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() -> anyhow::Result<()> {
        let config = TocConfig::from_json(r#"{"wide_breakpoint_px": 1200, "comments": {"text": "Replies"}}"#)?;
        assert_eq!(config.wide_breakpoint_px, 1200.0);
        assert_eq!(config.comments.text, "Replies");
        assert_eq!(config.comments.id, "comments");
        assert_eq!(config.header_offset_px, 80.0);
        Ok(())
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let err = TocConfig::from_json(r#"{"thresholds": [0.0, 1.5]}"#).unwrap_err();
        assert!(matches!(err, TocError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = TocConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TocError::ConfigParse(_)));
    }

    #[test]
    fn root_margin_formats_fractional_percent() {
        let config = TocConfig {
            bottom_margin_ratio: 0.125,
            ..TocConfig::default()
        };
        assert_eq!(config.root_margin(), "0px 0px -12.5% 0px");
    }
}
