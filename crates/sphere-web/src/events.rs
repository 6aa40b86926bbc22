use crate::dom;
use crate::input::{pointer_input, POINTER_EVENTS};
use crate::render::GpuState;
use sphere_core::{HostClock, HostError, SphereEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct Registered {
    target: web::EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Every DOM listener the engine installs, kept so teardown can remove them.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Registered>,
}

impl Listeners {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        name: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.entries.push(Registered {
            target: target.clone(),
            name,
            closure,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove all listeners. Every entry is attempted; the first failure is
    /// reported after the rest are removed.
    pub fn detach(&mut self) -> Result<(), HostError> {
        let mut first_err = None;
        for r in self.entries.drain(..) {
            if let Err(e) = r
                .target
                .remove_event_listener_with_callback(r.name, r.closure.as_ref().unchecked_ref())
            {
                first_err.get_or_insert_with(|| HostError::Detached(format!("{}: {:?}", r.name, e)));
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// Wire pointer, click and resize input into the engine.
pub fn wire_input_handlers(
    listeners: &mut Listeners,
    canvas: &web::HtmlCanvasElement,
    engine: &Rc<RefCell<SphereEngine>>,
    gpu: &Rc<RefCell<Option<GpuState>>>,
    clock: HostClock,
) -> Result<(), JsValue> {
    let canvas_target: &web::EventTarget = canvas.as_ref();

    for (name, phase) in POINTER_EVENTS {
        let engine = engine.clone();
        let canvas = canvas.clone();
        listeners.listen(canvas_target, name, move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let input = pointer_input(ev, phase);
            let report = engine
                .borrow_mut()
                .handle_pointer(input, dom::canvas_rect(&canvas));
            if let Some(r) = report {
                if r.newly_frozen > 0 || r.released > 0 {
                    log::debug!("[freeze] +{} -{}", r.newly_frozen, r.released);
                }
            }
        })?;
    }

    {
        let engine = engine.clone();
        listeners.listen(canvas_target, "click", move |_ev: web::Event| {
            if engine.borrow_mut().handle_click(clock.elapsed()) {
                log::info!("[click] selection flight started");
            }
        })?;
    }

    {
        let engine = engine.clone();
        let gpu = gpu.clone();
        let canvas = canvas.clone();
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        listeners.listen(window.as_ref(), "resize", move |_ev: web::Event| {
            let (w, h) = dom::sync_canvas_backing_size(&canvas);
            engine.borrow_mut().resize(w, h);
            if let Some(g) = gpu.borrow_mut().as_mut() {
                g.resize_if_needed(w, h);
            }
        })?;
    }

    log::info!("[events] {} listeners attached", listeners.len());
    Ok(())
}
