//! Content-script binding.
//!
//! JS creates one `HourvestHandle` per page, passing a renderer object with
//! `show`, `updatePosition` and `hide` methods plus the stored settings as JSON.
//! Storage change events are forwarded through `applySettings`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use js_sys::{Function, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, PointerEvent};

use crate::config::Settings;
use crate::domain::{DurationDescription, NormalizedAmount, Rect};
use crate::engine::{HoverEngine, MoveOutcome, PointerMove, RenderCommand, Renderer};
use crate::page::web::WebPage;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[hourvest {}] {}", record.level(), message))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::Output::call(|record| {
            let line = JsValue::from_str(&record.args().to_string());
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line),
                log::Level::Warn => web_sys::console::warn_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }))
        .apply();
    if result.is_err() {
        web_sys::console::warn_1(&"hourvest: logger already set".into());
    }
}

/// Forwards render calls to the JS overlay object.
struct JsRenderer {
    target: JsValue,
    show: Function,
    update_position: Function,
    hide: Function,
}

impl JsRenderer {
    fn from_object(target: JsValue) -> Result<Self, JsValue> {
        let method = |name: &str| -> Result<Function, JsValue> {
            Reflect::get(&target, &JsValue::from_str(name))?
                .dyn_into::<Function>()
                .map_err(|_| JsValue::from_str(&format!("renderer.{name} is not a function")))
        };
        Ok(Self {
            show: method("show")?,
            update_position: method("updatePosition")?,
            hide: method("hide")?,
            target,
        })
    }

    fn call(&self, function: &Function, command: &RenderCommand) {
        let payload = match command.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("render payload: {e}");
                return;
            }
        };
        if let Err(e) = function.call1(&self.target, &payload) {
            log::error!("renderer threw: {e:?}");
        }
    }
}

impl Renderer for JsRenderer {
    fn show(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
        rect: Rect,
    ) {
        let command = RenderCommand::Show {
            x,
            y,
            description: description.clone(),
            price,
            rect,
        };
        self.call(&self.show, &command);
    }

    fn update_position(
        &mut self,
        x: f64,
        y: f64,
        description: &DurationDescription,
        price: NormalizedAmount,
    ) {
        let command = RenderCommand::UpdatePosition {
            x,
            y,
            description: description.clone(),
            price,
        };
        self.call(&self.update_position, &command);
    }

    fn hide(&mut self) {
        self.call(&self.hide, &RenderCommand::Hide);
    }
}

struct Inner {
    engine: HoverEngine<Element, JsRenderer>,
    page: WebPage,
}

type Shared = Rc<RefCell<Inner>>;

#[wasm_bindgen]
pub struct HourvestHandle {
    inner: Shared,
    listener: Option<Closure<dyn FnMut(PointerEvent)>>,
}

#[wasm_bindgen]
impl HourvestHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(renderer: JsValue, settings_json: &str) -> Result<HourvestHandle, JsValue> {
        let page = WebPage::new().ok_or_else(|| JsValue::from_str("no document available"))?;
        let renderer = JsRenderer::from_object(renderer)?;
        let settings = Arc::new(Settings::from_json_str(settings_json));

        let inner = Rc::new(RefCell::new(Inner {
            engine: HoverEngine::new(settings, renderer),
            page,
        }));

        let shared = Rc::clone(&inner);
        let listener = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            on_pointer_move(&shared, &event);
        });

        // Capture phase: pages that stop propagation still reach us
        inner
            .borrow()
            .page
            .document()
            .add_event_listener_with_callback_and_bool(
                "pointermove",
                listener.as_ref().unchecked_ref(),
                true,
            )?;

        log::info!("hourvest attached");
        Ok(Self {
            inner,
            listener: Some(listener),
        })
    }

    /// Live settings update from storage.
    #[wasm_bindgen(js_name = applySettings)]
    pub fn apply_settings(&self, settings_json: &str) {
        let settings = Arc::new(Settings::from_json_str(settings_json));
        self.inner.borrow_mut().engine.apply_settings(settings);
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().engine.set_enabled(enabled);
    }

    #[wasm_bindgen(js_name = setDebug)]
    pub fn set_debug(&self, enabled: bool) {
        self.inner.borrow_mut().engine.set_debug(enabled);
    }

    /// `{ scans, nodesChecked, hits, lastScanMs }`
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        let inner = self.inner.borrow();
        serde_wasm_bindgen::to_value(inner.engine.stats())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Remove the listener and any visible tooltip.
    pub fn detach(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        let mut inner = self.inner.borrow_mut();
        let _ = inner.page.document().remove_event_listener_with_callback_and_bool(
            "pointermove",
            listener.as_ref().unchecked_ref(),
            true,
        );
        inner.engine.set_enabled(false);
        log::info!("hourvest detached");
    }
}

impl Drop for HourvestHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

fn on_pointer_move(shared: &Shared, event: &PointerEvent) {
    let path: Vec<Element> = event
        .composed_path()
        .iter()
        .filter_map(|target| target.dyn_into::<Element>().ok())
        .collect();
    let moved = PointerMove::new(f64::from(event.client_x()), f64::from(event.client_y()), path);

    let outcome = match shared.try_borrow_mut() {
        Ok(mut inner) => inner.engine.on_pointer_move(moved),
        Err(_) => return,
    };
    if outcome == MoveOutcome::FrameRequested {
        request_frame(shared);
    }
}

fn request_frame(shared: &Shared) {
    let Some(window) = web_sys::window() else {
        cancel_pending(shared);
        return;
    };
    let pending = Rc::clone(shared);
    let callback = Closure::once_into_js(move || run_frame(&pending));
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
        cancel_pending(shared);
    }
}

fn run_frame(shared: &Shared) {
    match shared.try_borrow_mut() {
        Ok(mut inner) => {
            let Inner { engine, page } = &mut *inner;
            engine.on_frame(page);
        }
        // Busy with a re-entrant JS callback: try again next frame
        Err(_) => request_frame(shared),
    }
}

fn cancel_pending(shared: &Shared) {
    if let Ok(mut inner) = shared.try_borrow_mut() {
        inner.engine.cancel_pending();
    }
}
