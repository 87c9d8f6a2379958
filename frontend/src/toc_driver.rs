//! Glue between the pure [`TocEngine`] and the browser.
//!
//! The driver owns the engine, feeds it DOM events measured through
//! [`DomGeometry`], publishes snapshots into Yew state and runs the
//! timed scroll-to-heading sequence.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use asteria_shared::toc::{ScrollStep, ScrollToHeading, TocEngine, TocEvent, TocSnapshot};
use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::functional::UseStateSetter;

use crate::{toc_dom, toc_dom::DomGeometry, utils::log_warn};

/// Cloneable handle shared by every listener of one TOC instance.
#[derive(Clone)]
pub struct TocDriver {
    engine: Rc<RefCell<TocEngine>>,
    scroll_root: Rc<RefCell<Option<Element>>>,
    publish: UseStateSetter<TocSnapshot>,
    // Bumped to invalidate scheduled scroll steps.
    scroll_generation: Rc<Cell<u64>>,
}

impl TocDriver {
    pub fn new(engine: Rc<RefCell<TocEngine>>, publish: UseStateSetter<TocSnapshot>) -> Self {
        Self {
            engine,
            scroll_root: Rc::new(RefCell::new(None)),
            publish,
            scroll_generation: Rc::new(Cell::new(0)),
        }
    }

    /// Scrolling container used for end-of-document detection.
    pub fn set_scroll_root(&self, root: Option<Element>) {
        *self.scroll_root.borrow_mut() = root;
    }

    /// Feed one event to the engine and act on its reaction.
    pub fn dispatch(&self, event: TocEvent) {
        let Some(geometry) = DomGeometry::new(self.scroll_root.borrow().clone()) else {
            return;
        };

        let (reaction, snapshot) = {
            let mut engine = self.engine.borrow_mut();
            let reaction = engine.dispatch(event, &geometry);
            let snapshot = (reaction.changed || reaction.resubscribe).then(|| engine.snapshot());
            (reaction, snapshot)
        };

        if let Some(snapshot) = snapshot {
            self.publish.set(snapshot);
        }
        if reaction.schedule_recompute {
            let driver = self.clone();
            toc_dom::request_frame(move || driver.dispatch(TocEvent::Recompute));
        }
    }

    /// Smoothly bring heading `id` into view, then compensate for the fixed
    /// header and force the active set to catch up. A newer call supersedes
    /// any sequence still waiting on a timer.
    pub fn scroll_to_heading(&self, id: &str) {
        let Some(target) = toc_dom::document().and_then(|doc| doc.get_element_by_id(id)) else {
            log_warn(&format!("toc: no heading with id {id:?}"));
            return;
        };

        let plan = self.engine.borrow().scroll_plan(id);
        let generation = self.scroll_generation.get().wrapping_add(1);
        self.scroll_generation.set(generation);

        let steps: VecDeque<ScrollStep> = plan.steps().into();
        self.run_steps(steps, target, Rc::new(plan), generation);
    }

    /// Drop scroll steps still waiting on a timer.
    pub fn cancel_pending(&self) {
        self.scroll_generation
            .set(self.scroll_generation.get().wrapping_add(1));
    }

    fn run_steps(
        &self,
        mut steps: VecDeque<ScrollStep>,
        target: Element,
        plan: Rc<ScrollToHeading>,
        generation: u64,
    ) {
        if self.scroll_generation.get() != generation {
            return;
        }

        while let Some(step) = steps.pop_front() {
            match step {
                ScrollStep::ScrollIntoView {
                    ..
                } => toc_dom::scroll_into_view(&target, true),
                ScrollStep::ReplaceFragment(fragment) => {
                    if let Err(err) = toc_dom::replace_fragment(&fragment) {
                        log_warn(&format!("toc: history update failed: {err:?}"));
                        toc_dom::scroll_into_view(&target, false);
                    }
                },
                ScrollStep::Wait(ms) => {
                    let driver = self.clone();
                    Timeout::new(ms, move || driver.run_steps(steps, target, plan, generation))
                        .forget();
                    return;
                },
                ScrollStep::CompensateHeader(_) => {
                    let page_y = toc_dom::window()
                        .and_then(|win| win.page_y_offset().ok())
                        .unwrap_or(0.0);
                    let heading_top = target.get_bounding_client_rect().top();
                    toc_dom::scroll_window_to(plan.compensated_top(heading_top, page_y));
                },
                ScrollStep::Recompute => {
                    self.dispatch(TocEvent::Recompute);
                    toc_dom::dispatch_resize();
                },
            }
        }
    }
}
