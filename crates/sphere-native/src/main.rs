mod gpu;

use gpu::GpuState;
use sphere_core::{
    build_scene_lines, scene_uniforms, EngineConfig, Host, HostClock, HostError, LineVertex,
    PointerInput, PointerPhase, SphereEngine, SurfaceRect,
};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

/// Desktop resources behind the engine. winit has no per-listener removal,
/// so detaching simply stops routing window events into the engine.
struct NativeHost<'w> {
    gpu: Option<GpuState<'w>>,
    routing_input: bool,
    redraw_pending: bool,
}

impl<'w> Host for NativeHost<'w> {
    fn detach_listeners(&mut self) -> Result<(), HostError> {
        self.routing_input = false;
        Ok(())
    }

    fn cancel_frame(&mut self) -> Result<(), HostError> {
        self.redraw_pending = false;
        Ok(())
    }

    fn release_buffers(&mut self) -> Result<(), HostError> {
        let gpu = self
            .gpu
            .take()
            .ok_or_else(|| HostError::Call("renderer already released".into()))?;
        gpu.release();
        Ok(())
    }
}

/// Tracks which touch id currently drives the pointer.
#[derive(Default)]
struct TouchState {
    primary: Option<u64>,
}

impl TouchState {
    fn input(&mut self, touch: &Touch) -> PointerInput {
        let phase = match touch.phase {
            TouchPhase::Started => PointerPhase::Down,
            TouchPhase::Moved => PointerPhase::Move,
            TouchPhase::Ended => PointerPhase::Up,
            TouchPhase::Cancelled => PointerPhase::Cancel,
        };
        if phase == PointerPhase::Down && self.primary.is_none() {
            self.primary = Some(touch.id);
        }
        let multi_touch = self.primary != Some(touch.id);
        if matches!(phase, PointerPhase::Up | PointerPhase::Cancel) && !multi_touch {
            self.primary = None;
        }
        PointerInput {
            phase,
            client_x: touch.location.x as f32,
            client_y: touch.location.y as f32,
            multi_touch,
        }
    }
}

fn parse_seed() -> anyhow::Result<Option<u64>> {
    match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("seed must be an unsigned integer, got {arg:?}: {e}")),
        None => Ok(None),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = parse_seed()?;
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Noise Sphere (native)")
        .build(&event_loop)?;

    let size = window.inner_size();
    let mut engine = SphereEngine::new(
        EngineConfig::default(),
        seed,
        size.width.max(1),
        size.height.max(1),
    )?;
    engine.on_select(|id| log::info!("[select] project /projects/{id}"));

    let mut host = NativeHost {
        gpu: Some(pollster::block_on(GpuState::new(&window))?),
        routing_input: true,
        redraw_pending: true,
    };
    let clock = HostClock::new();
    let mut lines: Vec<LineVertex> = Vec::new();
    let mut cursor = (0.0_f32, 0.0_f32);
    let mut touches = TouchState::default();
    let window = &window;
    log::info!("[native] started seed={seed:?}");

    event_loop.run(move |event, elwt| {
        let rect = {
            let s = window.inner_size();
            SurfaceRect::from_size(s.width as f32, s.height as f32)
        };
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                engine.teardown(&mut host);
                elwt.exit();
            }
            Event::WindowEvent { event, .. } if host.routing_input => match event {
                WindowEvent::Resized(size) => {
                    engine.resize(size.width, size.height);
                    if let Some(g) = host.gpu.as_mut() {
                        g.resize(size);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = (position.x as f32, position.y as f32);
                    engine.handle_pointer(
                        PointerInput::new(PointerPhase::Move, cursor.0, cursor.1),
                        rect,
                    );
                }
                WindowEvent::CursorLeft { .. } => {
                    engine.handle_pointer(
                        PointerInput::new(PointerPhase::Leave, cursor.0, cursor.1),
                        rect,
                    );
                }
                WindowEvent::MouseInput {
                    state,
                    button: MouseButton::Left,
                    ..
                } => {
                    let phase = match state {
                        ElementState::Pressed => PointerPhase::Down,
                        ElementState::Released => PointerPhase::Up,
                    };
                    engine.handle_pointer(PointerInput::new(phase, cursor.0, cursor.1), rect);
                    if phase == PointerPhase::Up {
                        engine.handle_click(clock.elapsed());
                    }
                }
                WindowEvent::Touch(touch) => {
                    let input = touches.input(&touch);
                    engine.handle_pointer(input, rect);
                    if input.phase == PointerPhase::Up && !input.multi_touch {
                        engine.handle_click(clock.elapsed());
                    }
                }
                _ => {}
            },
            Event::AboutToWait if host.redraw_pending => {
                let report = engine.tick(clock.elapsed());
                if report.completed.is_some() {
                    // No page to navigate to on desktop; fly back out.
                    engine.reset_view();
                }
                build_scene_lines(&engine, &mut lines);
                let uniforms = scene_uniforms(&engine);
                let mut out_of_memory = false;
                if let Some(g) = host.gpu.as_mut() {
                    match g.render(&lines, &uniforms) {
                        Ok(_) => window.request_redraw(),
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            g.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => out_of_memory = true,
                        Err(e) => log::warn!("[native] frame skipped: {e:?}"),
                    }
                }
                if out_of_memory {
                    log::error!("[native] GPU out of memory");
                    engine.teardown(&mut host);
                    elwt.exit();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}
