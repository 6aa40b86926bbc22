use crate::events::Listeners;
use crate::frame::FrameLoop;
use crate::render::GpuState;
use sphere_core::{Host, HostError};
use std::cell::RefCell;
use std::rc::Rc;

/// Browser resources owned on the engine's behalf.
pub struct WebHost {
    pub listeners: Listeners,
    pub frame: Option<FrameLoop>,
    pub gpu: Rc<RefCell<Option<GpuState>>>,
}

impl Host for WebHost {
    fn detach_listeners(&mut self) -> Result<(), HostError> {
        self.listeners.detach()
    }

    fn cancel_frame(&mut self) -> Result<(), HostError> {
        match self.frame.take() {
            Some(f) => f.cancel(),
            None => Ok(()),
        }
    }

    fn release_buffers(&mut self) -> Result<(), HostError> {
        let mut gpu = self
            .gpu
            .try_borrow_mut()
            .map_err(|_| HostError::Call("renderer busy".into()))?;
        if let Some(mut g) = gpu.take() {
            g.release();
        }
        Ok(())
    }
}
