use crate::error::HostError;

/// Host-side resources the engine must release on teardown.
///
/// Implemented by each frontend. Steps are called in this order:
/// listeners first, so no input callback can reach released buffers.
pub trait Host {
    fn detach_listeners(&mut self) -> Result<(), HostError>;
    fn cancel_frame(&mut self) -> Result<(), HostError>;
    fn release_buffers(&mut self) -> Result<(), HostError>;
}
