//! Draw-call translation from OpenGL ES client state to a backend device.
//!
//! For each `draw_arrays`/`draw_elements` call the [`Renderer`] walks the client state captured
//! in a [`DrawContext`] and pushes it to a [`Device`] in a fixed order: render target and
//! viewport, fixed-function state, vertex/index data, shaders, textures, uniform buffers, and
//! finally the draw itself. Textures that are incomplete or that are also bound as render
//! targets are replaced by 1x1 opaque-black placeholders.

pub mod caps;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod resources;
pub mod runtime;
pub mod state;
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use caps::{Caps, ClientVersion, Extensions, TextureCaps, TextureFormatCaps, MAX_DRAW_BUFFERS};
pub use config::{CoverageLadder, RendererConfig};
pub use context::{BoundResources, DrawContext};
pub use device::{
    ArraysDraw, Device, ElementsDraw, IndexRange, IndexSource, IndexType, IndexedDraw,
    TranslatedIndexData, ViewportParams,
};
pub use error::{DeviceError, DrawError, ErrorCode};
pub use resources::{
    Attachment, Buffer, BufferId, Framebuffer, ProgramBinary, SamplerParameters, SamplerStage,
    SamplerState, Texture, TextureSerial, TextureTarget, TransformFeedback,
};
pub use runtime::{DrawOutcome, Renderer};
pub use state::{ClientState, PrimitiveMode, SkipReason};
pub use stats::{DrawStats, DrawStatsSnapshot};
