use thiserror::Error;

/// Failures a caller can act on during lesson setup.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// Setup ran before the drawing surface existed.
    #[error("drawing surface is not available")]
    SurfaceUnavailable,

    /// A frame was requested before any successful setup.
    #[error("lesson has not been set up")]
    NotSetUp,
}
