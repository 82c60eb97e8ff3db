mod draw;
pub mod textures;
pub mod uniform_buffers;

pub use draw::{DrawOutcome, Renderer};
pub use textures::{
    apply_textures, generate_swizzles, resolve_sampler_binding, FramebufferTextureSerials,
    PlaceholderReason, ResolvedBinding,
};
pub use uniform_buffers::{apply_uniform_buffers, UNBOUND_UNIFORM_BUFFER_MESSAGE};
