use std::rc::Rc;

use asteria_shared::toc::{
    collect_headings, connector_path, dropdown_indent, item_indent, ConnectorPath,
    IntersectionRecord, LayoutMode, TocEngine, TocEntry, TocEvent, TocSnapshot,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    Element, Event, IntersectionObserver, IntersectionObserverEntry, MutationObserver,
    MutationObserverInit, ResizeObserver,
};
use yew::prelude::*;
use yew_hooks::prelude::use_event_with_window;

use crate::{
    components::{
        icons::{Icon, IconName},
        toc_thumb::TocThumb,
    },
    config, toc_dom,
    toc_driver::TocDriver,
    utils::log_warn,
};

const DROPDOWN_FALLBACK_LABEL: &str = "Table of Contents";

#[derive(Properties, Clone, PartialEq)]
pub struct TableOfContentsProps {
    /// Append an entry for the `#comments` section.
    #[prop_or_default]
    pub has_comments: bool,
    #[prop_or_default]
    pub class: Classes,
}

/// Table of contents for the article on the page.
///
/// Narrow viewports get a sticky dropdown bar naming the current section;
/// wide viewports get a sidebar with a connector line and a thumb over the
/// sections in view. Renders nothing until headings are found.
#[function_component(TableOfContents)]
pub fn table_of_contents(props: &TableOfContentsProps) -> Html {
    let config = use_memo((), |_| config::toc_config());
    let engine = {
        let config = config.clone();
        use_mut_ref(move || TocEngine::new((*config).clone(), toc_dom::viewport_width()))
    };
    let snapshot = {
        let engine = engine.clone();
        use_state(move || engine.borrow().snapshot())
    };
    let driver = {
        let engine = engine.clone();
        let publish = snapshot.setter();
        use_memo((), move |_| TocDriver::new(engine, publish))
    };

    let show_sticky = use_state_eq(|| false);
    let dropdown_open = use_state_eq(|| false);
    let sidebar_open = use_state_eq(|| false);
    let container_ref = use_node_ref();
    let connector = use_state_eq(|| None::<ConnectorPath>);

    // Heading collection: now, on every subtree mutation and on window load.
    {
        let driver = driver.clone();
        let comments = config.comments.clone();
        use_effect_with(props.has_comments, move |has_comments| {
            let has_comments = *has_comments;
            let collect: Rc<dyn Fn()> = Rc::new(move || {
                let Some(root) = toc_dom::document().and_then(|doc| toc_dom::collection_root(&doc))
                else {
                    return;
                };
                let (elements, scanned) = toc_dom::scan_headings(&root);
                let collection = collect_headings(&scanned, has_comments.then_some(&comments));
                toc_dom::assign_ids(&elements, &collection.assigned);
                driver.dispatch(TocEvent::HeadingsCollected(collection.entries));
            });

            collect();

            let on_mutation = {
                let collect = collect.clone();
                Closure::wrap(Box::new(move |_: js_sys::Array, _: MutationObserver| {
                    let collect = collect.clone();
                    toc_dom::request_frame(move || collect());
                }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>)
            };
            let on_load = Closure::wrap(Box::new(move |_: Event| collect()) as Box<dyn FnMut(Event)>);

            let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref()).ok();
            let root = toc_dom::document().and_then(|doc| toc_dom::collection_root(&doc));
            if let (Some(observer), Some(root)) = (observer.as_ref(), root) {
                let init = MutationObserverInit::new();
                init.set_child_list(true);
                init.set_subtree(true);
                if let Err(err) = observer.observe_with_options(&root, &init) {
                    log_warn(&format!("toc: cannot watch headings: {err:?}"));
                }
            }

            let window = toc_dom::window();
            if let Some(window) = window.as_ref() {
                let _ = window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                if let Some(window) = window {
                    let _ = window
                        .remove_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
                }
                drop(on_mutation);
            }
        });
    }

    // Intersection subscription, rebuilt whenever the engine asks for it.
    {
        let driver = driver.clone();
        let config = config.clone();
        let entries = snapshot.entries.clone();
        use_effect_with(snapshot.observer_epoch, move |_| {
            let mut subscription = None;

            if let (false, Some(document)) = (entries.is_empty(), toc_dom::document()) {
                let scroll_root = toc_dom::article_root(&document).and_then(|article| toc_dom::find_scroll_root(&article));
                driver.set_scroll_root(scroll_root.clone());

                let on_intersect = {
                    let driver = driver.clone();
                    Closure::wrap(Box::new(move |records: js_sys::Array, _: IntersectionObserver| {
                        let records = records
                            .iter()
                            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                            .map(|entry| IntersectionRecord::new(entry.target().id(), entry.intersection_ratio()))
                            .collect();
                        driver.dispatch(TocEvent::Intersections(records));
                    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
                };

                let init = toc_dom::intersection_init(&config, scroll_root.as_ref());
                match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init) {
                    Ok(observer) => {
                        for entry in &entries {
                            if let Some(element) = document.get_element_by_id(&entry.id) {
                                observer.observe(&element);
                            }
                        }
                        subscription = Some((observer, on_intersect));
                        driver.dispatch(TocEvent::ObserverAttached);
                    },
                    Err(err) => log_warn(&format!("toc: intersection observer unavailable: {err:?}")),
                }
            }

            move || {
                if let Some((observer, _on_intersect)) = subscription {
                    observer.disconnect();
                }
            }
        });
    }

    {
        let driver = driver.clone();
        let show_sticky = show_sticky.clone();
        let sticky_after = config.sticky_after_px;
        use_event_with_window("scroll", move |_: Event| {
            driver.dispatch(TocEvent::Scrolled);
            show_sticky.set(toc_dom::scroll_y() > sticky_after);
        });
    }

    {
        let driver = driver.clone();
        use_event_with_window("resize", move |_: Event| {
            driver.dispatch(TocEvent::Resized {
                width: toc_dom::viewport_width(),
            });
        });
    }

    {
        let driver = driver.clone();
        use_effect_with((), move |_| {
            driver.dispatch(TocEvent::Resized {
                width: toc_dom::viewport_width(),
            });
            move || driver.cancel_pending()
        });
    }

    // Connector line geometry follows the rendered sidebar.
    {
        let connector = connector.clone();
        let container_ref = container_ref.clone();
        use_effect_with((snapshot.entries.clone(), snapshot.mode), move |_| {
            let measure = {
                let container_ref = container_ref.clone();
                move || {
                    let path = container_ref.cast::<Element>().and_then(|container| {
                        connector_path(&toc_dom::anchor_boxes(&container), f64::from(container.client_height()))
                    });
                    connector.set(path);
                }
            };
            measure();

            let on_resize = Closure::wrap(Box::new(move |_: js_sys::Array, _: ResizeObserver| measure())
                as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);
            let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref()).ok();
            if let (Some(observer), Some(container)) = (observer.as_ref(), container_ref.cast::<Element>()) {
                observer.observe(&container);
            }

            move || {
                if let Some(observer) = observer {
                    observer.disconnect();
                }
                drop(on_resize);
            }
        });
    }

    if snapshot.is_empty() {
        return html! {};
    }

    let on_select = {
        let driver = driver.clone();
        let dropdown_open = dropdown_open.clone();
        let sidebar_open = sidebar_open.clone();
        Callback::from(move |id: String| {
            dropdown_open.set(false);
            sidebar_open.set(false);
            driver.scroll_to_heading(&id);
        })
    };

    match snapshot.mode {
        LayoutMode::Narrow => {
            let toggle = {
                let dropdown_open = dropdown_open.clone();
                Callback::from(move |_: MouseEvent| dropdown_open.set(!*dropdown_open))
            };
            html! {
                <nav
                    class={classes!(
                        "toc-dropdown",
                        "fixed",
                        "top-0",
                        "left-0",
                        "right-0",
                        "z-30",
                        "border-b",
                        "border-[var(--border)]",
                        "bg-[var(--surface)]",
                        "shadow-[var(--shadow)]",
                        "transition-transform",
                        "duration-300",
                        sticky_bar_class(*show_sticky),
                        props.class.clone()
                    )}
                    aria-label="Table of contents"
                >
                    <button
                        type="button"
                        class={classes!("toc-dropdown-toggle", "flex", "w-full", "items-center", "gap-2", "px-4", "py-3")}
                        aria-expanded={dropdown_open.to_string()}
                        onclick={toggle}
                    >
                        <Icon name={IconName::List} size={16} />
                        <span class={classes!("flex-1", "truncate", "text-left")}>{ dropdown_label(&snapshot) }</span>
                        <Icon name={IconName::ChevronDown} size={16} class={classes!(dropdown_open.then_some("rotate-180"))} />
                    </button>
                    if *dropdown_open {
                        <ul class={classes!("toc-dropdown-list", "m-0", "list-none", "p-0", "pb-2")}>
                            { for snapshot.entries.iter().map(|entry| html! {
                                <li key={entry.id.clone()}>
                                    { entry_link(entry, snapshot.is_active(&entry.id), dropdown_indent(entry.level), &on_select) }
                                </li>
                            }) }
                        </ul>
                    }
                </nav>
            }
        },
        LayoutMode::Wide => {
            let toggle = {
                let sidebar_open = sidebar_open.clone();
                Callback::from(move |_: MouseEvent| sidebar_open.set(!*sidebar_open))
            };
            let track = (*connector).as_ref().map(|path| {
                html! {
                    <div
                        class={classes!("toc-track", "absolute", "left-0", "top-0", "bg-[var(--border)]")}
                        style={connector_mask_style(path)}
                        aria-hidden="true"
                    >
                        <TocThumb container={container_ref.clone()} active={snapshot.active.clone()} />
                    </div>
                }
            });

            html! {
                <nav
                    class={classes!("toc-sidebar", "text-sm", sidebar_open.then_some("is-open"), props.class.clone())}
                    aria-label="Table of contents"
                >
                    <button
                        type="button"
                        class={classes!("toc-sidebar-toggle", "flex", "items-center", "gap-2", "mb-3", "font-semibold")}
                        aria-expanded={sidebar_open.to_string()}
                        onclick={toggle}
                    >
                        <Icon name={IconName::List} size={16} />
                        { "On this page" }
                    </button>
                    <div class={classes!("relative")}>
                        { for track }
                        <ul ref={container_ref.clone()} class={classes!("toc-list", "relative", "m-0", "list-none", "p-0")}>
                            { for snapshot.entries.iter().map(|entry| html! {
                                <li key={entry.id.clone()}>
                                    { entry_link(entry, snapshot.is_active(&entry.id), item_indent(entry.level), &on_select) }
                                </li>
                            }) }
                        </ul>
                    </div>
                </nav>
            }
        },
    }
}

fn entry_link(entry: &TocEntry, active: bool, indent: f64, on_select: &Callback<String>) -> Html {
    let onclick = {
        let on_select = on_select.clone();
        let id = entry.id.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_select.emit(id.clone());
        })
    };

    html! {
        <a
            href={entry.href()}
            data-level={entry.level.to_string()}
            class={classes!(
                "toc-link",
                "block",
                "py-1.5",
                "pr-2",
                "no-underline",
                "transition-colors",
                if active { "text-[var(--primary)]" } else { "text-[var(--muted)]" },
                active.then_some("is-active")
            )}
            style={format!("padding-left:{indent}px;")}
            aria-current={active.then_some("location")}
            onclick={onclick}
        >
            { entry.text.clone() }
        </a>
    }
}

/// Slides the narrow bar in once the page has scrolled past the threshold.
fn sticky_bar_class(visible: bool) -> &'static str {
    if visible {
        "translate-y-0"
    } else {
        "-translate-y-full"
    }
}

/// Label of the narrow bar: first active entry, else the first entry.
fn dropdown_label(snapshot: &TocSnapshot) -> String {
    snapshot
        .current_entry()
        .map(|entry| entry.text.clone())
        .unwrap_or_else(|| DROPDOWN_FALLBACK_LABEL.to_string())
}

/// Inline style sizing the track to the connector and masking it with the
/// connector's SVG.
fn connector_mask_style(path: &ConnectorPath) -> String {
    let mask = format!(
        "url(\"data:image/svg+xml,{}\")",
        urlencoding::encode(&path.to_svg())
    );
    format!(
        "width:{}px;height:{}px;mask-image:{mask};-webkit-mask-image:{mask};",
        path.width, path.height
    )
}

#[cfg(test)]
mod tests {
    use asteria_shared::toc::{ConnectorPath, LayoutMode, TocEntry, TocSnapshot};

    use super::{connector_mask_style, dropdown_label, sticky_bar_class};

    fn snapshot(entries: &[(&str, &str)], active: &[&str]) -> TocSnapshot {
        TocSnapshot {
            entries: entries
                .iter()
                .map(|(id, text)| TocEntry::new(*id, *text, 2))
                .collect(),
            active: active.iter().map(|id| id.to_string()).collect(),
            mode: LayoutMode::Narrow,
            observer_epoch: 1,
        }
    }

    #[test]
    fn dropdown_label_prefers_active_entry() {
        let snap = snapshot(&[("intro", "Intro"), ("setup", "Setup")], &["setup"]);
        assert_eq!(dropdown_label(&snap), "Setup");

        let snap = snapshot(&[("intro", "Intro"), ("setup", "Setup")], &[]);
        assert_eq!(dropdown_label(&snap), "Intro");

        assert_eq!(dropdown_label(&snapshot(&[], &[])), "Table of Contents");
    }

    #[test]
    fn mask_style_embeds_encoded_svg() {
        let style = connector_mask_style(&ConnectorPath {
            d: "M1 0 L1 20".to_string(),
            width: 2.0,
            height: 20.0,
        });
        assert!(style.starts_with("width:2px;height:20px;"), "{style}");
        assert!(style.contains("mask-image:url(\"data:image/svg+xml,%3Csvg"), "{style}");
        assert!(!style.contains('<'), "{style}");
    }

    #[test]
    fn narrow_bar_slides_in_only_when_scrolled() {
        assert_eq!(sticky_bar_class(false), "-translate-y-full");
        assert_eq!(sticky_bar_class(true), "translate-y-0");
    }
}
