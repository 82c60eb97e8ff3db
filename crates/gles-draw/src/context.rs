use crate::caps::{Caps, ClientVersion, Extensions, TextureCaps};
use crate::resources::{
    Buffer, Framebuffer, ProgramBinary, SamplerParameters, Texture, TextureTarget,
    TransformFeedback,
};
use crate::state::ClientState;

/// Object bindings of the client context, looked up by unit or binding point.
pub trait BoundResources {
    fn sampler_texture(&self, unit: u32, target: TextureTarget) -> Option<&dyn Texture>;

    /// Sampler object bound to `unit`, if any.
    fn sampler_object(&self, unit: u32) -> Option<SamplerParameters>;

    fn indexed_uniform_buffer(&self, binding: u32) -> Option<&dyn Buffer>;

    fn transform_feedback(&self) -> Option<&dyn TransformFeedback>;

    fn indexed_transform_feedback_buffer(&self, index: u32) -> Option<&dyn Buffer>;

    fn element_array_buffer(&self) -> Option<&dyn Buffer>;
}

/// Everything a single draw call reads from the client context.
///
/// A draw can only be built with a program attached; the client layer rejects draws without
/// one before they get here.
#[derive(Clone, Copy)]
pub struct DrawContext<'a> {
    pub state: &'a ClientState,
    pub program: &'a dyn ProgramBinary,
    pub framebuffer: &'a dyn Framebuffer,
    pub resources: &'a dyn BoundResources,
    pub caps: &'a Caps,
    pub texture_caps: &'a TextureCaps,
    pub extensions: Extensions,
    pub client_version: ClientVersion,
}

impl DrawContext<'_> {
    /// Transform feedback is bound, started and not paused.
    pub fn transform_feedback_active(&self) -> bool {
        self.resources
            .transform_feedback()
            .is_some_and(|xfb| xfb.is_started() && !xfb.is_paused())
    }
}
