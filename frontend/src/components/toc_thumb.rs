use asteria_shared::toc::{thumb, Thumb};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Element, Event, ResizeObserver};
use yew::prelude::*;

use crate::toc_dom;

#[derive(Properties, Clone, PartialEq)]
pub struct TocThumbProps {
    /// Sidebar list holding the TOC anchors.
    pub container: NodeRef,
    /// Active ids, top to bottom.
    pub active: Vec<String>,
}

/// Highlight bar spanning the active entries of the sidebar.
///
/// Re-measured whenever the active set changes, the container or one of
/// its anchors resizes, or the window resizes.
#[function_component(TocThumb)]
pub fn toc_thumb(props: &TocThumbProps) -> Html {
    let position = use_state_eq(Thumb::default);

    {
        let position = position.clone();
        let container_ref = props.container.clone();
        use_effect_with(props.active.clone(), move |active| {
            let measure = {
                let active = active.clone();
                let container_ref = container_ref.clone();
                move || {
                    if let Some(container) = container_ref.cast::<Element>() {
                        let anchors = toc_dom::anchor_boxes(&container);
                        position.set(thumb(&anchors, f64::from(container.client_height()), &active));
                    }
                }
            };
            measure();

            let on_resize = {
                let measure = measure.clone();
                Closure::wrap(Box::new(move |_: js_sys::Array, _: ResizeObserver| measure())
                    as Box<dyn FnMut(js_sys::Array, ResizeObserver)>)
            };
            let on_window_resize =
                Closure::wrap(Box::new(move |_: Event| measure()) as Box<dyn FnMut(Event)>);

            let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).ok();
            if let (Some(observer), Some(container)) = (observer.as_ref(), container_ref.cast::<Element>()) {
                observer.observe(&container);
                if let Ok(anchors) = container.query_selector_all(toc_dom::ANCHOR_SELECTOR) {
                    for idx in 0..anchors.length() {
                        if let Some(anchor) = anchors.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) {
                            observer.observe(&anchor);
                        }
                    }
                }
            }

            let window = toc_dom::window();
            if let Some(window) = window.as_ref() {
                let _ = window
                    .add_event_listener_with_callback("resize", on_window_resize.as_ref().unchecked_ref());
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        on_window_resize.as_ref().unchecked_ref(),
                    );
                }
                drop(on_resize);
            }
        });
    }

    html! {
        <div
            class={classes!(
                "toc-thumb",
                "absolute",
                "left-0",
                "w-full",
                "bg-[var(--primary)]",
                "transition-[top,height]",
                "duration-200",
                position.is_hidden().then_some("opacity-0")
            )}
            style={thumb_style(&position)}
            aria-hidden="true"
        />
    }
}

fn thumb_style(position: &Thumb) -> String {
    let min_height = if position.is_hidden() { "" } else { "min-height:2px;" };
    format!(
        "top:{top}px;height:{height}px;{min_height}--toc-top:{top}px;--toc-height:{height}px;",
        top = position.top,
        height = position.height,
    )
}

#[cfg(test)]
mod tests {
    use asteria_shared::toc::Thumb;

    use super::thumb_style;

    #[test]
    fn style_exposes_css_variables() {
        let style = thumb_style(&Thumb {
            top: 26.0,
            height: 40.0,
        });
        assert_eq!(
            style,
            "top:26px;height:40px;min-height:2px;--toc-top:26px;--toc-height:40px;"
        );
    }

    #[test]
    fn hidden_thumb_has_no_min_height() {
        let style = thumb_style(&Thumb::default());
        assert!(!style.contains("min-height"), "{style}");
    }
}
