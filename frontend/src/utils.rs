use ammonia::Builder;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

use crate::config::asset_path;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Convert Markdown content into HTML with common extensions enabled.
/// Also transforms relative image paths to asset URLs.
///
/// `{#custom-id}` after a heading becomes its explicit id; headings
/// without one get ids from the table of contents at runtime.
pub fn markdown_to_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = Parser::new_ext(content, options);

    // Transform image paths
    let transformed_parser = parser.map(|event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = if dest_url.starts_with("images/") {
                CowStr::from(asset_path(&dest_url))
            } else {
                dest_url
            };
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        },
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, transformed_parser);
    sanitize(&html_output)
}

/// Strip scripts and event handlers while keeping heading anchors.
fn sanitize(html: &str) -> String {
    let mut builder = Builder::default();
    for tag in HEADING_TAGS {
        builder.add_tag_attributes(tag, &["id"]);
    }
    builder.clean(html).to_string()
}

/// Log a warning to the browser console.
pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

/// Log an error to the browser console.
pub fn log_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

#[cfg(test)]
mod tests {
    use super::markdown_to_html;
    use crate::config::BASE_URL;

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(markdown_to_html("  \n"), "");
    }

    #[test]
    fn explicit_heading_ids_survive_sanitizing() {
        let html = markdown_to_html("## Setup {#getting-set-up}\n\n## Usage\n");
        assert!(html.contains(r#"<h2 id="getting-set-up">Setup</h2>"#), "{html}");
        assert!(html.contains("<h2>Usage</h2>"), "{html}");
    }

    #[test]
    fn relative_images_point_at_assets() {
        let html = markdown_to_html("![cat](images/cat.png)");
        assert!(html.contains(&format!("src=\"{BASE_URL}images/cat.png\"")), "{html}");
    }

    #[test]
    fn scripts_are_removed() {
        let html = markdown_to_html("hello <script>alert(1)</script>");
        assert!(!html.contains("<script"), "{html}");
    }
}
