//! Configuration for the frontend application

use asteria_shared::TocConfig;

/// Base URL for static assets
/// - For local development: "/"
/// - For the mock build served from a sub-path: "/asteria/"
#[cfg(not(feature = "mock"))]
pub const BASE_URL: &str = "/";

#[cfg(feature = "mock")]
pub const BASE_URL: &str = "/asteria/";

/// API base URL, read at compile time.
pub const API_BASE: &str = match option_env!("ASTERIA_API_BASE") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// Optional JSON overrides for the table of contents, read at compile time.
const TOC_CONFIG_JSON: Option<&str> = option_env!("ASTERIA_TOC_CONFIG");

/// Helper function to construct asset paths
pub fn asset_path(path: &str) -> String {
    // Remove leading slash if present
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}{}", BASE_URL, path)
}

/// Table-of-contents settings: compile-time overrides when present and
/// valid, defaults otherwise.
pub fn toc_config() -> TocConfig {
    parse_toc_config(TOC_CONFIG_JSON)
}

fn parse_toc_config(raw: Option<&str>) -> TocConfig {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return TocConfig::default();
    };
    match TocConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            crate::utils::log_warn(&format!("ASTERIA_TOC_CONFIG ignored: {err}"));
            TocConfig::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{asset_path, parse_toc_config, BASE_URL};

    #[test]
    fn asset_path_strips_leading_slash() {
        assert_eq!(asset_path("/images/a.png"), format!("{BASE_URL}images/a.png"));
        assert_eq!(asset_path("images/a.png"), format!("{BASE_URL}images/a.png"));
    }

    #[test]
    fn toc_config_overrides_apply() {
        let config = parse_toc_config(Some(r#"{"header_offset_px": 64}"#));
        assert_eq!(config.header_offset_px, 64.0);
        assert_eq!(parse_toc_config(None), asteria_shared::TocConfig::default());
        assert_eq!(parse_toc_config(Some("  ")), asteria_shared::TocConfig::default());
    }
}
