use crate::render::GpuState;
use sphere_core::{build_scene_lines, scene_uniforms, HostClock, HostError, LineVertex, SphereEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<SphereEngine>>,
    pub gpu: Rc<RefCell<Option<GpuState>>>,
    pub clock: HostClock,
    lines: Vec<LineVertex>,
}

impl FrameContext {
    pub fn new(
        engine: Rc<RefCell<SphereEngine>>,
        gpu: Rc<RefCell<Option<GpuState>>>,
        clock: HostClock,
    ) -> Self {
        Self {
            engine,
            gpu,
            clock,
            lines: Vec::new(),
        }
    }

    pub fn frame(&mut self) {
        let uniforms = {
            let mut engine = self.engine.borrow_mut();
            if !engine.is_running() {
                return;
            }
            engine.tick(self.clock.elapsed());
            build_scene_lines(&engine, &mut self.lines);
            scene_uniforms(&engine)
        };
        let mut gpu = self.gpu.borrow_mut();
        let Some(g) = gpu.as_mut() else {
            return;
        };
        match g.render(&self.lines, &uniforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("[frame] render error: {:?}", e),
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to the running requestAnimationFrame chain.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl FrameLoop {
    /// Cancel the scheduled frame and drop the loop closure, which also
    /// breaks its self-reference.
    pub fn cancel(&self) -> Result<(), HostError> {
        let pending = self.pending.take();
        self.tick.borrow_mut().take();
        let Some(id) = pending else {
            return Ok(());
        };
        let w = web::window().ok_or_else(|| HostError::Detached("window".into()))?;
        w.cancel_animation_frame(id)
            .map_err(|e| HostError::Call(format!("cancelAnimationFrame: {:?}", e)))
    }
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let w = web::window()?;
    let guard = tick.borrow();
    let closure = guard.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.borrow_mut().frame();
        if frame_ctx.borrow().engine.borrow().is_running() {
            pending_clone.set(request_frame(&tick_clone));
        }
    }) as Box<dyn FnMut()>));

    pending.set(request_frame(&tick));
    FrameLoop { pending, tick }
}
