//! Blog post reader with a scroll-synchronized table of contents.

mod api;
mod components;
mod config;
mod hooks;
mod models;
mod pages;
mod router;
mod toc_dom;
mod toc_driver;
mod utils;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <>
            <router::AppRouter />
        </>
    }
}

/// Console verbosity: engine decisions in debug builds, problems only in
/// release builds.
#[cfg(feature = "console-logging")]
fn console_level(debug_build: bool) -> log::Level {
    if debug_build {
        log::Level::Debug
    } else {
        log::Level::Warn
    }
}

fn main() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(console_level(cfg!(debug_assertions))).ok();
    }

    yew::Renderer::<App>::new().render();
}

#[cfg(all(test, feature = "console-logging"))]
mod tests {
    use super::console_level;

    #[test]
    fn debug_builds_show_engine_decisions() {
        assert_eq!(console_level(true), log::Level::Debug);
        assert!(log::Level::Debug >= console_level(true));
    }

    #[test]
    fn release_builds_keep_warnings_only() {
        let level = console_level(false);
        assert_eq!(level, log::Level::Warn);
        assert!(log::Level::Error <= level);
        assert!(log::Level::Debug > level);
    }
}
