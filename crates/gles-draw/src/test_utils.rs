//! In-memory device and GL object fakes for exercising the draw path without a GPU.
//!
//! [`RecordingDevice`] logs every call it receives so tests can assert on ordering and
//! arguments, and can be told to fail a particular kind of call. The `Fake*` objects implement
//! the collaborator traits with just enough behavior to drive texture resolution, uniform
//! buffer validation and transform feedback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hashbrown::HashMap;

use crate::caps::{Caps, ClientVersion, Extensions, TextureCaps};
use crate::context::{BoundResources, DrawContext};
use crate::device::{
    ArraysDraw, Device, ElementsDraw, IndexRange, IndexSource, IndexType, IndexedDraw,
    TranslatedIndexData, ViewportParams,
};
use crate::error::DeviceError;
use crate::resources::{
    Attachment, Buffer, BufferId, Framebuffer, PlaceholderTextureDesc, ProgramBinary,
    SamplerParameters, SamplerStage, SamplerState, Texture, TextureSerial, TextureTarget,
    TransformFeedback,
};
use crate::state::{
    BlendState, ClientState, ColorF, DepthStencilState, PrimitiveMode, RasterizerState, Rect,
};

/// Serials handed out to placeholder textures start here, well above any test texture.
pub const PLACEHOLDER_SERIAL_BASE: u32 = 0x8000_0000;

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    ApplyRenderTarget,
    SetViewport(ViewportParams),
    SetScissor {
        rect: Rect,
        enabled: bool,
    },
    SetRasterizerState(RasterizerState),
    SetBlendState {
        state: BlendState,
        blend_color: ColorF,
        sample_mask: u32,
    },
    SetDepthStencilState {
        state: DepthStencilState,
        stencil_ref: i32,
        stencil_back_ref: i32,
        front_face_ccw: bool,
    },
    ApplyIndexBuffer {
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        index_range: IndexRange,
        element_array_buffer: Option<BufferId>,
    },
    ApplyVertexBuffer {
        first: u32,
        count: u32,
        instances: u32,
    },
    ApplyTransformFeedbackBuffers,
    ApplyShaders {
        rasterizer_discard: bool,
        transform_feedback_active: bool,
    },
    SetSamplerState {
        stage: SamplerStage,
        index: u32,
        serial: TextureSerial,
        sampler: SamplerState,
    },
    SetTexture {
        stage: SamplerStage,
        index: u32,
        serial: Option<TextureSerial>,
    },
    CreatePlaceholderTexture(PlaceholderTextureDesc),
    DrawArrays {
        mode: PrimitiveMode,
        topology: wgpu::PrimitiveTopology,
        count: u32,
        instances: u32,
        transform_feedback_active: bool,
    },
    DrawElements {
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        instances: u32,
        index_range: IndexRange,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCallKind {
    ApplyRenderTarget,
    SetViewport,
    SetScissor,
    SetRasterizerState,
    SetBlendState,
    SetDepthStencilState,
    ApplyIndexBuffer,
    ApplyVertexBuffer,
    ApplyTransformFeedbackBuffers,
    ApplyShaders,
    SetSamplerState,
    SetTexture,
    CreatePlaceholderTexture,
    DrawArrays,
    DrawElements,
}

impl DeviceCall {
    pub fn kind(&self) -> DeviceCallKind {
        match self {
            Self::ApplyRenderTarget => DeviceCallKind::ApplyRenderTarget,
            Self::SetViewport(_) => DeviceCallKind::SetViewport,
            Self::SetScissor { .. } => DeviceCallKind::SetScissor,
            Self::SetRasterizerState(_) => DeviceCallKind::SetRasterizerState,
            Self::SetBlendState { .. } => DeviceCallKind::SetBlendState,
            Self::SetDepthStencilState { .. } => DeviceCallKind::SetDepthStencilState,
            Self::ApplyIndexBuffer { .. } => DeviceCallKind::ApplyIndexBuffer,
            Self::ApplyVertexBuffer { .. } => DeviceCallKind::ApplyVertexBuffer,
            Self::ApplyTransformFeedbackBuffers => DeviceCallKind::ApplyTransformFeedbackBuffers,
            Self::ApplyShaders { .. } => DeviceCallKind::ApplyShaders,
            Self::SetSamplerState { .. } => DeviceCallKind::SetSamplerState,
            Self::SetTexture { .. } => DeviceCallKind::SetTexture,
            Self::CreatePlaceholderTexture(_) => DeviceCallKind::CreatePlaceholderTexture,
            Self::DrawArrays { .. } => DeviceCallKind::DrawArrays,
            Self::DrawElements { .. } => DeviceCallKind::DrawElements,
        }
    }
}

/// [`Device`] that records calls instead of talking to a GPU.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
    pub native_swizzle: bool,
    /// Calls of this kind are recorded and then fail.
    pub fail_on: Option<DeviceCallKind>,
    placeholders_created: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(kind: DeviceCallKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    pub fn with_native_swizzle() -> Self {
        Self {
            native_swizzle: true,
            ..Self::default()
        }
    }

    pub fn kinds(&self) -> Vec<DeviceCallKind> {
        self.calls.iter().map(DeviceCall::kind).collect()
    }

    pub fn count(&self, kind: DeviceCallKind) -> usize {
        self.calls.iter().filter(|call| call.kind() == kind).count()
    }

    pub fn draw_count(&self) -> usize {
        self.count(DeviceCallKind::DrawArrays) + self.count(DeviceCallKind::DrawElements)
    }

    /// Last texture bound to the slot, `Some(None)` for an explicit unbind, `None` if the slot
    /// was never touched.
    pub fn bound_texture(&self, stage: SamplerStage, index: u32) -> Option<Option<TextureSerial>> {
        self.calls.iter().rev().find_map(|call| match *call {
            DeviceCall::SetTexture {
                stage: s,
                index: i,
                serial,
            } if s == stage && i == index => Some(serial),
            _ => None,
        })
    }

    pub fn sampler_state(&self, stage: SamplerStage, index: u32) -> Option<SamplerState> {
        self.calls.iter().rev().find_map(|call| match *call {
            DeviceCall::SetSamplerState {
                stage: s,
                index: i,
                sampler,
                ..
            } if s == stage && i == index => Some(sampler),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: DeviceCall) -> Result<(), DeviceError> {
        let kind = call.kind();
        self.calls.push(call);
        if self.fail_on == Some(kind) {
            return Err(DeviceError::Backend(format!("injected {kind:?} failure")));
        }
        Ok(())
    }
}

impl Device for RecordingDevice {
    fn supports_native_swizzle(&self) -> bool {
        self.native_swizzle
    }

    fn apply_render_target(&mut self, _framebuffer: &dyn Framebuffer) -> Result<(), DeviceError> {
        self.record(DeviceCall::ApplyRenderTarget)
    }

    fn set_viewport(&mut self, params: &ViewportParams) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetViewport(*params))
    }

    fn set_scissor(&mut self, rect: Rect, enabled: bool) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetScissor { rect, enabled })
    }

    fn set_rasterizer_state(&mut self, state: &RasterizerState) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetRasterizerState(*state))
    }

    fn set_blend_state(
        &mut self,
        _framebuffer: &dyn Framebuffer,
        state: &BlendState,
        blend_color: ColorF,
        sample_mask: u32,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetBlendState {
            state: *state,
            blend_color,
            sample_mask,
        })
    }

    fn set_depth_stencil_state(
        &mut self,
        state: &DepthStencilState,
        stencil_ref: i32,
        stencil_back_ref: i32,
        front_face_ccw: bool,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetDepthStencilState {
            state: *state,
            stencil_ref,
            stencil_back_ref,
            front_face_ccw,
        })
    }

    fn apply_index_buffer(&mut self, draw: &IndexedDraw<'_>) -> Result<TranslatedIndexData, DeviceError> {
        self.record(DeviceCall::ApplyIndexBuffer {
            mode: draw.mode,
            count: draw.count,
            index_type: draw.index_type,
            index_range: draw.index_range,
            element_array_buffer: draw.element_array_buffer.map(|buffer| buffer.id()),
        })?;

        let start_offset = match draw.indices {
            IndexSource::BufferOffset(offset) => offset as u32,
            IndexSource::ClientMemory(_) => 0,
        };
        Ok(TranslatedIndexData {
            index_range: draw.index_range,
            start_index: start_offset / draw.index_type.size_bytes(),
            start_offset,
            index_type: draw.index_type,
        })
    }

    fn apply_vertex_buffer(
        &mut self,
        _resources: &dyn BoundResources,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::ApplyVertexBuffer {
            first,
            count,
            instances,
        })
    }

    fn apply_transform_feedback_buffers(&mut self, _resources: &dyn BoundResources) -> Result<(), DeviceError> {
        self.record(DeviceCall::ApplyTransformFeedbackBuffers)
    }

    fn apply_shaders(
        &mut self,
        _program: &dyn ProgramBinary,
        _framebuffer: &dyn Framebuffer,
        rasterizer_discard: bool,
        transform_feedback_active: bool,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::ApplyShaders {
            rasterizer_discard,
            transform_feedback_active,
        })
    }

    fn set_sampler_state(
        &mut self,
        stage: SamplerStage,
        index: u32,
        texture: &dyn Texture,
        sampler: &SamplerState,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetSamplerState {
            stage,
            index,
            serial: texture.serial(),
            sampler: *sampler,
        })
    }

    fn set_texture(
        &mut self,
        stage: SamplerStage,
        index: u32,
        texture: Option<&dyn Texture>,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetTexture {
            stage,
            index,
            serial: texture.map(|texture| texture.serial()),
        })
    }

    fn create_placeholder_texture(
        &mut self,
        desc: &PlaceholderTextureDesc,
    ) -> Result<Box<dyn Texture>, DeviceError> {
        self.calls.push(DeviceCall::CreatePlaceholderTexture(*desc));
        if self.fail_on == Some(DeviceCallKind::CreatePlaceholderTexture) {
            return Err(DeviceError::OutOfMemory("placeholder texture".into()));
        }
        let serial = PLACEHOLDER_SERIAL_BASE + self.placeholders_created;
        self.placeholders_created += 1;
        Ok(Box::new(FakeTexture::new(desc.target, serial)))
    }

    fn draw_arrays(&mut self, draw: &ArraysDraw) -> Result<(), DeviceError> {
        self.record(DeviceCall::DrawArrays {
            mode: draw.topology.mode,
            topology: draw.topology.topology,
            count: draw.count,
            instances: draw.instances,
            transform_feedback_active: draw.transform_feedback_active,
        })
    }

    fn draw_elements(
        &mut self,
        draw: &ElementsDraw<'_>,
        indices: &TranslatedIndexData,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::DrawElements {
            mode: draw.topology.mode,
            count: draw.count,
            index_type: draw.index_type,
            instances: draw.instances,
            index_range: indices.index_range,
        })
    }
}

/// Texture with switchable completeness and a swizzle-regeneration counter.
#[derive(Debug)]
pub struct FakeTexture {
    pub target: TextureTarget,
    pub serial: TextureSerial,
    pub sampler: SamplerState,
    /// Complete for any sampling state that does not need more than the base level.
    pub base_level_complete: bool,
    /// Has a full mip chain.
    pub mipmapped: bool,
    pub fail_swizzle: bool,
    swizzle_stale: Cell<bool>,
    swizzle_regenerations: Cell<u32>,
}

impl FakeTexture {
    pub fn new(target: TextureTarget, serial: u32) -> Self {
        Self {
            target,
            serial: TextureSerial(serial),
            sampler: SamplerState::default(),
            base_level_complete: true,
            mipmapped: true,
            fail_swizzle: false,
            swizzle_stale: Cell::new(true),
            swizzle_regenerations: Cell::new(0),
        }
    }

    pub fn incomplete(mut self) -> Self {
        self.base_level_complete = false;
        self
    }

    pub fn without_mipmaps(mut self) -> Self {
        self.mipmapped = false;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerState) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn swizzle_regenerations(&self) -> u32 {
        self.swizzle_regenerations.get()
    }

    pub fn mark_swizzle_stale(&self) {
        self.swizzle_stale.set(true);
    }
}

impl Texture for FakeTexture {
    fn target(&self) -> TextureTarget {
        self.target
    }

    fn serial(&self) -> TextureSerial {
        self.serial
    }

    fn sampler_state(&self) -> SamplerState {
        self.sampler
    }

    fn is_sampler_complete(
        &self,
        sampler: &SamplerState,
        _texture_caps: &TextureCaps,
        _extensions: Extensions,
        _client_version: ClientVersion,
    ) -> bool {
        self.base_level_complete && (self.mipmapped || !sampler.min_filter.uses_mipmaps())
    }

    fn regenerate_swizzle(&self) -> Result<(), DeviceError> {
        if self.fail_swizzle {
            return Err(DeviceError::Backend("swizzle blit failed".into()));
        }
        if self.swizzle_stale.replace(false) {
            self.swizzle_regenerations
                .set(self.swizzle_regenerations.get() + 1);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeSampler {
    pub target: TextureTarget,
    pub unit: Option<u32>,
}

#[derive(Debug, Default)]
pub struct FakeProgram {
    pub vertex_samplers: Vec<FakeSampler>,
    pub pixel_samplers: Vec<FakeSampler>,
    /// Binding point of each active uniform block, in block order.
    pub uniform_block_bindings: Vec<u32>,
    pub uses_point_size: bool,
    pub fail_uniforms: bool,
    sampler_mapping_refreshes: Cell<u32>,
    uniform_uploads: Cell<u32>,
    applied_uniform_buffers: RefCell<Vec<Vec<BufferId>>>,
}

impl FakeProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sampler(mut self, stage: SamplerStage, target: TextureTarget, unit: Option<u32>) -> Self {
        self.samplers_mut(stage).push(FakeSampler { target, unit });
        self
    }

    pub fn with_uniform_block(mut self, binding: u32) -> Self {
        self.uniform_block_bindings.push(binding);
        self
    }

    pub fn writing_point_size(mut self) -> Self {
        self.uses_point_size = true;
        self
    }

    pub fn sampler_mapping_refreshes(&self) -> u32 {
        self.sampler_mapping_refreshes.get()
    }

    pub fn uniform_uploads(&self) -> u32 {
        self.uniform_uploads.get()
    }

    /// Buffer ids passed to each `apply_uniform_buffers` call.
    pub fn applied_uniform_buffers(&self) -> Vec<Vec<BufferId>> {
        self.applied_uniform_buffers.borrow().clone()
    }

    fn samplers(&self, stage: SamplerStage) -> &[FakeSampler] {
        match stage {
            SamplerStage::Vertex => &self.vertex_samplers,
            SamplerStage::Pixel => &self.pixel_samplers,
        }
    }

    fn samplers_mut(&mut self, stage: SamplerStage) -> &mut Vec<FakeSampler> {
        match stage {
            SamplerStage::Vertex => &mut self.vertex_samplers,
            SamplerStage::Pixel => &mut self.pixel_samplers,
        }
    }
}

impl ProgramBinary for FakeProgram {
    fn refresh_sampler_mapping(&self) {
        self.sampler_mapping_refreshes
            .set(self.sampler_mapping_refreshes.get() + 1);
    }

    fn used_sampler_range(&self, stage: SamplerStage) -> u32 {
        self.samplers(stage).len() as u32
    }

    fn sampler_texture_target(&self, stage: SamplerStage, sampler_index: u32) -> TextureTarget {
        self.samplers(stage)
            .get(sampler_index as usize)
            .map_or(TextureTarget::Texture2D, |sampler| sampler.target)
    }

    fn sampler_texture_unit(&self, stage: SamplerStage, sampler_index: u32, _caps: &Caps) -> Option<u32> {
        self.samplers(stage)
            .get(sampler_index as usize)
            .and_then(|sampler| sampler.unit)
    }

    fn active_uniform_block_count(&self) -> u32 {
        self.uniform_block_bindings.len() as u32
    }

    fn uniform_block_binding(&self, block_index: u32) -> u32 {
        self.uniform_block_bindings[block_index as usize]
    }

    fn apply_uniform_buffers(&self, buffers: &[&dyn Buffer], _caps: &Caps) -> Result<(), DeviceError> {
        self.applied_uniform_buffers
            .borrow_mut()
            .push(buffers.iter().map(|buffer| buffer.id()).collect());
        Ok(())
    }

    fn apply_uniforms(&self) -> Result<(), DeviceError> {
        if self.fail_uniforms {
            return Err(DeviceError::OutOfMemory("uniform upload".into()));
        }
        self.uniform_uploads.set(self.uniform_uploads.get() + 1);
        Ok(())
    }

    fn uses_point_size(&self) -> bool {
        self.uses_point_size
    }
}

#[derive(Debug, Clone)]
pub enum FakeAttachment {
    Texture(Rc<FakeTexture>),
    Renderbuffer,
}

impl FakeAttachment {
    fn as_attachment(&self) -> Attachment<'_> {
        match self {
            Self::Texture(texture) => Attachment::Texture(&**texture),
            Self::Renderbuffer => Attachment::Renderbuffer,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeFramebuffer {
    pub color: Vec<Option<FakeAttachment>>,
    pub depth_stencil: Option<FakeAttachment>,
    pub samples: u32,
}

impl FakeFramebuffer {
    /// Single-sampled, one renderbuffer color attachment.
    pub fn new() -> Self {
        Self {
            color: vec![Some(FakeAttachment::Renderbuffer)],
            depth_stencil: None,
            samples: 0,
        }
    }

    pub fn with_color(mut self, index: usize, attachment: FakeAttachment) -> Self {
        if self.color.len() <= index {
            self.color.resize(index + 1, None);
        }
        self.color[index] = Some(attachment);
        self
    }

    pub fn with_depth_stencil(mut self, attachment: FakeAttachment) -> Self {
        self.depth_stencil = Some(attachment);
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }
}

impl Framebuffer for FakeFramebuffer {
    fn color_attachment(&self, index: usize) -> Option<Attachment<'_>> {
        self.color
            .get(index)
            .and_then(Option::as_ref)
            .map(FakeAttachment::as_attachment)
    }

    fn depth_or_stencil_attachment(&self) -> Option<Attachment<'_>> {
        self.depth_stencil.as_ref().map(FakeAttachment::as_attachment)
    }

    fn samples(&self) -> u32 {
        self.samples
    }
}

#[derive(Debug)]
pub struct FakeBuffer {
    pub id: BufferId,
    transform_feedback_writes: Cell<u32>,
}

impl FakeBuffer {
    pub fn new(id: u32) -> Rc<Self> {
        Rc::new(Self {
            id: BufferId(id),
            transform_feedback_writes: Cell::new(0),
        })
    }

    pub fn transform_feedback_writes(&self) -> u32 {
        self.transform_feedback_writes.get()
    }
}

impl Buffer for FakeBuffer {
    fn id(&self) -> BufferId {
        self.id
    }

    fn mark_transform_feedback_usage(&self) {
        self.transform_feedback_writes
            .set(self.transform_feedback_writes.get() + 1);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeTransformFeedback {
    pub started: bool,
    pub paused: bool,
}

impl TransformFeedback for FakeTransformFeedback {
    fn is_started(&self) -> bool {
        self.started
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

#[derive(Debug, Default)]
pub struct FakeResources {
    textures: HashMap<(u32, TextureTarget), Rc<FakeTexture>>,
    samplers: HashMap<u32, SamplerParameters>,
    uniform_buffers: HashMap<u32, Rc<FakeBuffer>>,
    pub transform_feedback: Option<FakeTransformFeedback>,
    transform_feedback_buffers: HashMap<u32, Rc<FakeBuffer>>,
    element_array_buffer: Option<Rc<FakeBuffer>>,
}

impl FakeResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to `unit` under the texture's own target.
    pub fn bind_texture(&mut self, unit: u32, texture: Rc<FakeTexture>) {
        self.textures.insert((unit, texture.target), texture);
    }

    pub fn bind_sampler(&mut self, unit: u32, params: SamplerParameters) {
        self.samplers.insert(unit, params);
    }

    pub fn bind_uniform_buffer(&mut self, binding: u32, buffer: Rc<FakeBuffer>) {
        self.uniform_buffers.insert(binding, buffer);
    }

    pub fn bind_transform_feedback_buffer(&mut self, index: u32, buffer: Rc<FakeBuffer>) {
        self.transform_feedback_buffers.insert(index, buffer);
    }

    pub fn bind_element_array_buffer(&mut self, buffer: Rc<FakeBuffer>) {
        self.element_array_buffer = Some(buffer);
    }
}

impl BoundResources for FakeResources {
    fn sampler_texture(&self, unit: u32, target: TextureTarget) -> Option<&dyn Texture> {
        self.textures
            .get(&(unit, target))
            .map(|texture| &**texture as &dyn Texture)
    }

    fn sampler_object(&self, unit: u32) -> Option<SamplerParameters> {
        self.samplers.get(&unit).copied()
    }

    fn indexed_uniform_buffer(&self, binding: u32) -> Option<&dyn Buffer> {
        self.uniform_buffers
            .get(&binding)
            .map(|buffer| &**buffer as &dyn Buffer)
    }

    fn transform_feedback(&self) -> Option<&dyn TransformFeedback> {
        self.transform_feedback
            .as_ref()
            .map(|xfb| xfb as &dyn TransformFeedback)
    }

    fn indexed_transform_feedback_buffer(&self, index: u32) -> Option<&dyn Buffer> {
        self.transform_feedback_buffers
            .get(&index)
            .map(|buffer| &**buffer as &dyn Buffer)
    }

    fn element_array_buffer(&self) -> Option<&dyn Buffer> {
        self.element_array_buffer
            .as_ref()
            .map(|buffer| &**buffer as &dyn Buffer)
    }
}

/// Owns everything a [`DrawContext`] borrows.
#[derive(Debug)]
pub struct DrawFixture {
    pub state: ClientState,
    pub program: FakeProgram,
    pub framebuffer: FakeFramebuffer,
    pub resources: FakeResources,
    pub caps: Caps,
    pub texture_caps: TextureCaps,
    pub extensions: Extensions,
    pub client_version: ClientVersion,
}

impl Default for DrawFixture {
    fn default() -> Self {
        Self {
            state: ClientState::default(),
            program: FakeProgram::new(),
            framebuffer: FakeFramebuffer::new(),
            resources: FakeResources::new(),
            caps: Caps::default(),
            texture_caps: TextureCaps::new(),
            extensions: Extensions::empty(),
            client_version: ClientVersion::Es3,
        }
    }
}

impl DrawFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> DrawContext<'_> {
        DrawContext {
            state: &self.state,
            program: &self.program,
            framebuffer: &self.framebuffer,
            resources: &self.resources,
            caps: &self.caps,
            texture_caps: &self.texture_caps,
            extensions: self.extensions,
            client_version: self.client_version,
        }
    }
}
