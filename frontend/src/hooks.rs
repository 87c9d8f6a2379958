use web_sys::{ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_router::prelude::use_location;

/// Scroll the window to the top whenever the route path changes.
///
/// Fragment-only changes are left alone: the table of contents rewrites
/// the fragment while scrolling and must not be yanked back to the top.
#[hook]
pub fn use_scroll_to_top() {
    let path = use_location().map(|location| location.path().to_string());

    use_effect_with(path, move |path| {
        if path.is_some() && !has_fragment() {
            scroll_window_to_top();
        }

        || ()
    });
}

fn has_fragment() -> bool {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .is_some_and(|hash| hash.len() > 1)
}

fn scroll_window_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Instant);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
