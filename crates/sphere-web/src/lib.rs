#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;
mod host;
mod input;
mod render;

use sphere_core::{EngineConfig, HostClock, SphereEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::events::Listeners;
use crate::frame::{start_loop, FrameContext};
use crate::host::WebHost;
use crate::render::GpuState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sphere-web starting");
    Ok(())
}

/// A mounted sphere. Call `teardown` when the page section goes away.
#[wasm_bindgen]
pub struct SphereHandle {
    engine: Rc<RefCell<SphereEngine>>,
    host: WebHost,
}

#[wasm_bindgen]
impl SphereHandle {
    /// Detach listeners, stop the frame loop and free GPU buffers. Safe to
    /// call more than once.
    pub fn teardown(&mut self) -> bool {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.teardown(&mut self.host),
            Err(_) => {
                log::warn!("[teardown] engine busy; ignoring");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }
}

/// Mount onto the canvas with id `canvas_id`. `seed` pins the noise field.
#[wasm_bindgen(js_name = mountSphere)]
pub async fn mount_sphere(canvas_id: String, seed: Option<u64>) -> Result<SphereHandle, JsValue> {
    mount(&canvas_id, seed)
        .await
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

async fn mount(canvas_id: &str, seed: Option<u64>) -> anyhow::Result<SphereHandle> {
    let canvas = dom::canvas_by_id(canvas_id)?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let mut engine = SphereEngine::new(EngineConfig::default(), seed, width, height)?;
    engine.on_select(|id| dom::navigate_to_project(id));
    let engine = Rc::new(RefCell::new(engine));

    let gpu = match GpuState::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };
    let gpu = Rc::new(RefCell::new(gpu));
    let clock = HostClock::new();

    let mut listeners = Listeners::default();
    events::wire_input_handlers(&mut listeners, &canvas, &engine, &gpu, clock)
        .map_err(|e| anyhow::anyhow!(format!("listener wiring failed: {:?}", e)))?;

    let frame_ctx = Rc::new(RefCell::new(FrameContext::new(
        engine.clone(),
        gpu.clone(),
        clock,
    )));
    let frame = start_loop(frame_ctx);

    log::info!("[mount] #{canvas_id} {width}x{height} seed={seed:?}");
    Ok(SphereHandle {
        engine,
        host: WebHost {
            listeners,
            frame: Some(frame),
            gpu,
        },
    })
}
