//! Browser bindings
//!
//! All DOM writes for the page live here. The simulation only sees these
//! through [`RenderTarget`] and [`ViewportProvider`].

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::{Clock, JsClock};
use crate::countdown::{CountdownStatus, countdown_status, pad2};
use crate::particles::ParticleSpec;
use crate::render::{RenderTarget, ViewportProvider};
use crate::sim::Viewport;

const ELIMINATED_CLASS: &str = "eliminated";
const SHOW_CLASS: &str = "show";

/// DOM id for a head (1-based, matches head ids)
pub fn head_element_id(id: u32) -> String {
    format!("flying-head-{}", id)
}

struct HeadElements {
    root: HtmlElement,
    health_fill: Option<HtmlElement>,
}

/// Writes head transforms and status into the page
pub struct DomTarget {
    document: Document,
    heads: HashMap<u32, HeadElements>,
    /// Heads we already warned about (log once, then stay quiet)
    missing: HashSet<u32>,
}

impl DomTarget {
    /// Bind each (id, name) to its element and write the name label.
    /// Heads without an element keep simulating but are never drawn.
    pub fn bind<'a>(document: Document, heads: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        let mut bound = HashMap::new();
        for (id, name) in heads {
            let Some(root) = document
                .get_element_by_id(&head_element_id(id))
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };

            if let Some(label) = root.query_selector(".head-name").ok().flatten() {
                label.set_text_content(Some(name));
            }
            let health_fill = root
                .query_selector(".health-fill")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            bound.insert(id, HeadElements { root, health_fill });
        }
        log::info!("Bound {} head elements", bound.len());

        Self {
            document,
            heads: bound,
            missing: HashSet::new(),
        }
    }

    fn head(&mut self, id: u32) -> Option<&HeadElements> {
        if !self.heads.contains_key(&id) {
            if self.missing.insert(id) {
                log::debug!("No element for head {}; skipping its output", id);
            }
            return None;
        }
        self.heads.get(&id)
    }

    fn show_banner(&self, text: &str) {
        if let Some(el) = self.document.get_element_by_id("winner-name") {
            el.set_text_content(Some(text));
        }
        if let Some(el) = self.document.get_element_by_id("winner-banner") {
            let _ = el.class_list().add_1(SHOW_CLASS);
        }
    }
}

impl RenderTarget for DomTarget {
    fn set_transform(&mut self, id: u32, x: f32, y: f32, rotation_deg: f32) {
        if let Some(head) = self.head(id) {
            let transform = format!("translate({}px, {}px) rotate({}deg)", x, y, rotation_deg);
            let _ = head.root.style().set_property("transform", &transform);
        }
    }

    fn set_health_ratio(&mut self, id: u32, ratio: f32) {
        if let Some(fill) = self.head(id).and_then(|h| h.health_fill.as_ref()) {
            let width = format!("{}%", (ratio.clamp(0.0, 1.0) * 100.0).round());
            let _ = fill.style().set_property("width", &width);
        }
    }

    fn mark_eliminated(&mut self, id: u32) {
        if let Some(head) = self.head(id) {
            let _ = head.root.class_list().add_1(ELIMINATED_CLASS);
        }
    }

    fn announce_winner(&mut self, _id: u32, name: &str) {
        self.show_banner(name);
    }

    fn announce_draw(&mut self) {
        self.show_banner("Nobody");
    }
}

/// Reads `innerWidth`/`innerHeight` every frame
pub struct WindowViewport {
    last: Cell<Viewport>,
}

impl WindowViewport {
    pub fn new() -> Self {
        let viewport = Self {
            last: Cell::new(Viewport::new(1280.0, 720.0)),
        };
        viewport.viewport();
        viewport
    }
}

impl Default for WindowViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportProvider for WindowViewport {
    fn viewport(&self) -> Viewport {
        let size = web_sys::window().and_then(|w| {
            let width = w.inner_width().ok()?.as_f64()?;
            let height = w.inner_height().ok()?.as_f64()?;
            Some(Viewport::new(width as f32, height as f32))
        });
        // Keep the last good size if the window can't be read
        if let Some(size) = size {
            self.last.set(size);
        }
        self.last.get()
    }
}

/// Countdown text elements
struct CountdownDom {
    days: Option<Element>,
    hours: Option<Element>,
    minutes: Option<Element>,
    seconds: Option<Element>,
    completed: Option<Element>,
}

impl CountdownDom {
    fn bind(document: &Document) -> Self {
        Self {
            days: document.get_element_by_id("days"),
            hours: document.get_element_by_id("hours"),
            minutes: document.get_element_by_id("minutes"),
            seconds: document.get_element_by_id("seconds"),
            completed: document.get_element_by_id("completed-message"),
        }
    }

    /// Refresh the text; returns false once the target has passed
    fn update(&self, now_ms: f64, target_ms: f64) -> bool {
        match countdown_status(now_ms, target_ms) {
            CountdownStatus::Remaining(t) => {
                let fields = [
                    (&self.days, t.days),
                    (&self.hours, t.hours.into()),
                    (&self.minutes, t.minutes.into()),
                    (&self.seconds, t.seconds.into()),
                ];
                for (el, value) in fields {
                    if let Some(el) = el {
                        el.set_text_content(Some(&pad2(value)));
                    }
                }
                true
            }
            CountdownStatus::Completed => {
                if let Some(el) = &self.completed {
                    let _ = el.class_list().add_1(SHOW_CLASS);
                }
                false
            }
        }
    }
}

/// Start the once-a-second countdown refresh
pub fn start_countdown(target_ms: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let display = CountdownDom::bind(&document);
    if !display.update(JsClock.now_ms(), target_ms) {
        log::info!("Countdown already complete");
        return;
    }

    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let closure = {
        let handle = handle.clone();
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            if !display.update(JsClock.now_ms(), target_ms) {
                if let Some(id) = handle.take() {
                    window.clear_interval_with_handle(id);
                    log::info!("Countdown complete");
                }
            }
        })
    };

    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        1000,
    ) {
        Ok(id) => handle.set(Some(id)),
        Err(e) => log::warn!("Failed to start countdown interval: {:?}", e),
    }
    closure.forget();
}

/// Append one `div.particle` per spec to `#particles`
pub fn spawn_particle_elements(document: &Document, particles: &[ParticleSpec]) {
    let Some(container) = document.get_element_by_id("particles") else {
        return;
    };

    for spec in particles {
        let Some(el) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        el.set_class_name("particle");

        let style = el.style();
        let _ = style.set_property("left", &format!("{}%", spec.left_percent));
        let _ = style.set_property("width", &format!("{}px", spec.size_px));
        let _ = style.set_property("height", &format!("{}px", spec.size_px));
        let _ = style.set_property("animation-duration", &format!("{}s", spec.duration_s));
        let _ = style.set_property("animation-delay", &format!("{}s", spec.delay_s));

        let _ = container.append_child(&el);
    }
}
