use thiserror::Error;

/// Failure reported by a backend device call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("backend out of memory: {0}")]
    OutOfMemory(String),
    #[error("backend device was lost")]
    DeviceLost,
    #[error("backend call failed: {0}")]
    Backend(String),
}

/// Error returned by a draw call.
///
/// Skipped draws are not errors; see [`crate::DrawOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Client state the backend cannot express (e.g. a used but unbound uniform buffer).
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Client-visible error code for a [`DrawError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidOperation,
    OutOfMemory,
    ContextLost,
}

impl ErrorCode {
    pub const fn as_gl_enum(self) -> u32 {
        match self {
            Self::InvalidOperation => 0x0502,
            Self::OutOfMemory => 0x0505,
            Self::ContextLost => 0x0507,
        }
    }
}

impl DrawError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidOperation(_) => ErrorCode::InvalidOperation,
            Self::Device(DeviceError::DeviceLost) => ErrorCode::ContextLost,
            Self::Device(_) => ErrorCode::OutOfMemory,
        }
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}
