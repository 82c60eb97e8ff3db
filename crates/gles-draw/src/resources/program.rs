use super::{Buffer, TextureTarget};
use crate::caps::Caps;
use crate::error::DeviceError;

/// Texture sampling stage; each has its own sampler slot limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerStage {
    Vertex,
    Pixel,
}

impl SamplerStage {
    /// Stages in the order the draw path visits them.
    pub const ALL: [Self; 2] = [Self::Vertex, Self::Pixel];

    pub fn sampler_limit(self, caps: &Caps) -> u32 {
        match self {
            Self::Vertex => caps.max_vertex_texture_image_units,
            Self::Pixel => caps.max_texture_image_units,
        }
    }
}

/// Linked program as exposed by the shader compiler.
///
/// Methods taking `&self` that update program state (sampler mapping, uniform upload) rely on
/// the program's own interior bookkeeping.
pub trait ProgramBinary {
    /// Re-read sampler uniforms into the sampler → texture unit mapping.
    fn refresh_sampler_mapping(&self);

    /// One past the highest sampler index the stage actually uses.
    fn used_sampler_range(&self, stage: SamplerStage) -> u32;

    fn sampler_texture_target(&self, stage: SamplerStage, sampler_index: u32) -> TextureTarget;

    /// Texture unit feeding the sampler, or `None` when the sampler is not mapped.
    fn sampler_texture_unit(&self, stage: SamplerStage, sampler_index: u32, caps: &Caps)
        -> Option<u32>;

    fn active_uniform_block_count(&self) -> u32;

    /// Indexed uniform-buffer binding point the client chose for the block.
    fn uniform_block_binding(&self, block_index: u32) -> u32;

    /// `buffers[i]` backs active uniform block `i`.
    fn apply_uniform_buffers(&self, buffers: &[&dyn Buffer], caps: &Caps) -> Result<(), DeviceError>;

    /// Upload dirty uniform values to the device.
    fn apply_uniforms(&self) -> Result<(), DeviceError>;

    /// Whether the vertex stage writes `gl_PointSize`.
    fn uses_point_size(&self) -> bool;
}
