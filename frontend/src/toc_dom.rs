//! DOM reads and writes behind the table of contents.
//!
//! Everything here is stateless: each call queries the live document, so
//! the engine never works from a cached layout.

use asteria_shared::{
    toc::{heading_level, AnchorBox, GeometryProvider, Rect, ScannedHeading, ScrollMetrics, Viewport},
    TocConfig,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Selector for TOC anchors inside the sidebar container.
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// `data-` attribute carrying an anchor's heading level.
pub const LEVEL_ATTRIBUTE: &str = "data-level";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// `innerWidth`, or 0 when unavailable.
pub fn viewport_width() -> f64 {
    window()
        .and_then(|win| win.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    window().and_then(|win| win.scroll_y().ok()).unwrap_or(0.0)
}

/// The first `article` element.
pub fn article_root(document: &Document) -> Option<Element> {
    document.query_selector("article").ok().flatten()
}

/// Where headings are collected from: the article, else the body.
pub fn collection_root(document: &Document) -> Option<Element> {
    article_root(document).or_else(|| document.body().map(Element::from))
}

/// Heading elements under `root` in document order, with what the
/// collector needs to know about each.
pub fn scan_headings(root: &Element) -> (Vec<Element>, Vec<ScannedHeading>) {
    let mut elements = Vec::new();
    let mut scanned = Vec::new();

    let Ok(node_list) = root.query_selector_all(HEADING_SELECTOR) else {
        return (elements, scanned);
    };

    for idx in 0..node_list.length() {
        let Some(element) = node_list.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(level) = heading_level(&element.tag_name()) else {
            continue;
        };
        scanned.push(ScannedHeading {
            id: element.id(),
            text: element.text_content().unwrap_or_default(),
            level,
        });
        elements.push(element);
    }

    (elements, scanned)
}

/// Write derived ids back onto their heading elements.
pub fn assign_ids(elements: &[Element], assigned: &[(usize, String)]) {
    for (index, id) in assigned {
        if let Some(element) = elements.get(*index) {
            element.set_id(id);
        }
    }
}

/// Nearest ancestor of `article` that scrolls vertically, stopping before
/// the document element. `None` means the window scrolls.
pub fn find_scroll_root(article: &Element) -> Option<Element> {
    let win = window()?;
    let document_element = win.document().and_then(|doc| doc.document_element());
    let mut current = article.parent_element();

    while let Some(element) = current {
        if document_element.as_ref() == Some(&element) {
            break;
        }
        let overflow_y = win
            .get_computed_style(&element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("overflow-y").ok())
            .unwrap_or_default();
        if is_scrollable_overflow(&overflow_y) {
            return Some(element);
        }
        current = element.parent_element();
    }
    None
}

fn is_scrollable_overflow(value: &str) -> bool {
    value.contains("auto") || value.contains("scroll")
}

/// Intersection observer options for heading tracking.
pub fn intersection_init(config: &TocConfig, root: Option<&Element>) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_root_margin(&config.root_margin());
    let thresholds: js_sys::Array = config
        .thresholds
        .iter()
        .map(|threshold| JsValue::from_f64(*threshold))
        .collect();
    init.set_threshold(&thresholds);
    init.set_root(root);
    init
}

/// Rendered boxes of the TOC anchors inside `container`, top to bottom.
pub fn anchor_boxes(container: &Element) -> Vec<AnchorBox> {
    let Some(win) = window() else {
        return Vec::new();
    };
    let Ok(node_list) = container.query_selector_all(ANCHOR_SELECTOR) else {
        return Vec::new();
    };

    let mut boxes = Vec::with_capacity(node_list.length() as usize);
    for idx in 0..node_list.length() {
        let Some(anchor) = node_list.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let id = anchor
            .get_attribute("href")
            .map(|href| href.trim_start_matches('#').to_string())
            .unwrap_or_default();
        let level = anchor
            .get_attribute(LEVEL_ATTRIBUTE)
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(1);
        let (padding_top, padding_bottom) = win
            .get_computed_style(&anchor)
            .ok()
            .flatten()
            .map(|style| {
                (
                    parse_px(&style.get_property_value("padding-top").unwrap_or_default()),
                    parse_px(&style.get_property_value("padding-bottom").unwrap_or_default()),
                )
            })
            .unwrap_or((0.0, 0.0));

        boxes.push(
            AnchorBox::new(id, level, f64::from(anchor.client_height())).with_padding(padding_top, padding_bottom),
        );
    }
    boxes
}

/// `"6px"` → 6.0; anything unparsable → 0.
fn parse_px(value: &str) -> f64 {
    value
        .trim()
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// `scrollIntoView` aligned to the top.
pub fn scroll_into_view(element: &Element, smooth: bool) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Smoothly scroll the window to `top`.
pub fn scroll_window_to(top: f64) {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

/// Replace the location fragment without navigating.
pub fn replace_fragment(fragment: &str) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    win.history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(fragment))
}

/// Fire a synthetic `resize` on the window so size-driven listeners rerun.
pub fn dispatch_resize() {
    if let (Some(win), Ok(event)) = (window(), Event::new("resize")) {
        let _ = win.dispatch_event(&event);
    }
}

/// Run `f` on the next animation frame.
pub fn request_frame(f: impl FnOnce() + 'static) {
    if let Some(win) = window() {
        let callback = wasm_bindgen::closure::Closure::once_into_js(f);
        let _ = win.request_animation_frame(callback.unchecked_ref());
    }
}

/// Live layout of the current document.
pub struct DomGeometry {
    window: Window,
    document: Document,
    scroll_root: Option<Element>,
}

impl DomGeometry {
    /// `None` outside a browser document.
    pub fn new(scroll_root: Option<Element>) -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            scroll_root,
        })
    }

    fn inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }
}

impl GeometryProvider for DomGeometry {
    fn heading_rect(&self, id: &str) -> Option<Rect> {
        let rect = self.document.get_element_by_id(id)?.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.bottom()))
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self
                .window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(0.0),
            height: self.inner_height(),
        }
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        match &self.scroll_root {
            Some(root) => ScrollMetrics {
                scroll_top: f64::from(root.scroll_top()),
                client_height: f64::from(root.client_height()),
                scroll_height: f64::from(root.scroll_height()),
            },
            None => ScrollMetrics {
                scroll_top: self.window.scroll_y().unwrap_or(0.0),
                client_height: self.inner_height(),
                scroll_height: self
                    .document
                    .document_element()
                    .map(|element| f64::from(element.scroll_height()))
                    .unwrap_or(0.0),
            },
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use asteria_shared::TocConfig;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use super::{document, intersection_init};

    wasm_bindgen_test_configure!(run_in_browser);

    fn option(init: &web_sys::IntersectionObserverInit, key: &str) -> JsValue {
        js_sys::Reflect::get(init, &JsValue::from_str(key)).expect("readable option")
    }

    #[wasm_bindgen_test]
    fn observer_options_carry_the_scroll_container() {
        let config = TocConfig::default();
        let container = document()
            .expect("document")
            .create_element("div")
            .expect("div");

        let init = intersection_init(&config, Some(&container));
        assert_eq!(option(&init, "root"), JsValue::from(container));
        assert_eq!(option(&init, "rootMargin").as_string(), Some(config.root_margin()));

        let init = intersection_init(&config, None);
        let root = option(&init, "root");
        assert!(root.is_null() || root.is_undefined());
    }
}
