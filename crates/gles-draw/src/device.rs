//! Backend device interface.
//!
//! The draw orchestrator pushes already-derived state through this trait in a fixed order; a
//! device implementation owns the backend objects (pipelines, bind groups, staging buffers)
//! and is free to defer the actual work until the draw call.

use crate::context::BoundResources;
use crate::error::DeviceError;
use crate::resources::{
    Buffer, Framebuffer, PlaceholderTextureDesc, ProgramBinary, SamplerStage, SamplerState,
    Texture,
};
use crate::state::{
    BlendState, ColorF, DepthRange, DepthStencilState, FrontFace, PrimitiveMode,
    PrimitiveTopologyTranslation, RasterizerState, Rect,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    pub const fn size_bytes(self) -> u32 {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Backend index format. Byte indices have no native format and are widened to 16 bits.
    pub const fn wgpu_format(self) -> wgpu::IndexFormat {
        match self {
            Self::U8 | Self::U16 => wgpu::IndexFormat::Uint16,
            Self::U32 => wgpu::IndexFormat::Uint32,
        }
    }
}

/// Inclusive range of index values referenced by a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: u32,
    pub end: u32,
}

impl IndexRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// `end - start`; one less than the number of vertices the range spans.
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn vertex_count(&self) -> u32 {
        self.len().saturating_add(1)
    }
}

/// Where an indexed draw reads its indices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource<'a> {
    /// Byte offset into the bound element array buffer.
    BufferOffset(usize),
    /// Client-memory indices; only legal with no element array buffer bound.
    ClientMemory(&'a [u8]),
}

/// Index data as requested by the client.
#[derive(Clone, Copy)]
pub struct IndexedDraw<'a> {
    pub mode: PrimitiveMode,
    pub count: u32,
    pub index_type: IndexType,
    pub indices: IndexSource<'a>,
    pub element_array_buffer: Option<&'a dyn Buffer>,
    pub index_range: IndexRange,
}

/// Index data after the device has staged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatedIndexData {
    pub index_range: IndexRange,
    pub start_index: u32,
    pub start_offset: u32,
    pub index_type: IndexType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportParams {
    pub viewport: Rect,
    pub depth_range: DepthRange,
    pub mode: PrimitiveMode,
    pub front_face: FrontFace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArraysDraw {
    pub topology: PrimitiveTopologyTranslation,
    pub count: u32,
    pub instances: u32,
    pub transform_feedback_active: bool,
}

#[derive(Clone, Copy)]
pub struct ElementsDraw<'a> {
    pub topology: PrimitiveTopologyTranslation,
    pub count: u32,
    pub index_type: IndexType,
    pub indices: IndexSource<'a>,
    pub element_array_buffer: Option<&'a dyn Buffer>,
    pub instances: u32,
}

pub trait Device {
    /// When true the device swizzles at sample time and textures never need a swizzled copy.
    fn supports_native_swizzle(&self) -> bool;

    fn apply_render_target(&mut self, framebuffer: &dyn Framebuffer) -> Result<(), DeviceError>;

    fn set_viewport(&mut self, params: &ViewportParams) -> Result<(), DeviceError>;

    fn set_scissor(&mut self, rect: Rect, enabled: bool) -> Result<(), DeviceError>;

    fn set_rasterizer_state(&mut self, state: &RasterizerState) -> Result<(), DeviceError>;

    fn set_blend_state(
        &mut self,
        framebuffer: &dyn Framebuffer,
        state: &BlendState,
        blend_color: ColorF,
        sample_mask: u32,
    ) -> Result<(), DeviceError>;

    fn set_depth_stencil_state(
        &mut self,
        state: &DepthStencilState,
        stencil_ref: i32,
        stencil_back_ref: i32,
        front_face_ccw: bool,
    ) -> Result<(), DeviceError>;

    fn apply_index_buffer(&mut self, draw: &IndexedDraw<'_>) -> Result<TranslatedIndexData, DeviceError>;

    fn apply_vertex_buffer(
        &mut self,
        resources: &dyn BoundResources,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<(), DeviceError>;

    fn apply_transform_feedback_buffers(&mut self, resources: &dyn BoundResources) -> Result<(), DeviceError>;

    fn apply_shaders(
        &mut self,
        program: &dyn ProgramBinary,
        framebuffer: &dyn Framebuffer,
        rasterizer_discard: bool,
        transform_feedback_active: bool,
    ) -> Result<(), DeviceError>;

    fn set_sampler_state(
        &mut self,
        stage: SamplerStage,
        index: u32,
        texture: &dyn Texture,
        sampler: &SamplerState,
    ) -> Result<(), DeviceError>;

    /// `None` unbinds the slot.
    fn set_texture(
        &mut self,
        stage: SamplerStage,
        index: u32,
        texture: Option<&dyn Texture>,
    ) -> Result<(), DeviceError>;

    fn create_placeholder_texture(
        &mut self,
        desc: &PlaceholderTextureDesc,
    ) -> Result<Box<dyn Texture>, DeviceError>;

    fn draw_arrays(&mut self, draw: &ArraysDraw) -> Result<(), DeviceError>;

    fn draw_elements(
        &mut self,
        draw: &ElementsDraw<'_>,
        indices: &TranslatedIndexData,
    ) -> Result<(), DeviceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_range_spans_inclusive_vertices() {
        let range = IndexRange::new(4, 9);
        assert_eq!(range.len(), 5);
        assert_eq!(range.vertex_count(), 6);
        assert_eq!(IndexRange::new(7, 7).vertex_count(), 1);
    }

    #[test]
    fn byte_indices_widen_to_u16() {
        assert_eq!(IndexType::U8.wgpu_format(), wgpu::IndexFormat::Uint16);
        assert_eq!(IndexType::U32.wgpu_format(), wgpu::IndexFormat::Uint32);
        assert_eq!(IndexType::U16.size_bytes(), 2);
    }
}
