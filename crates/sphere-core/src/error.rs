use thiserror::Error;

/// Construction-time failures. Everything after construction is infallible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("position buffer length {len} is not a multiple of 3")]
    InvalidGeometry { len: usize },
    #[error("vertex {index} has a non-finite or zero-length rest position")]
    DegenerateVertex { index: usize },
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: u32, height: u32 },
    #[error("marker set is empty")]
    EmptyMarkerSet,
}

/// A host step that failed during teardown. Logged and skipped, never fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    #[error("host node already detached: {0}")]
    Detached(String),
    #[error("host call failed: {0}")]
    Call(String),
}
