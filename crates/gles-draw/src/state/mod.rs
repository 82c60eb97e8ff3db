//! Client-visible fixed-function state and its translation into backend terms.

pub mod coverage;
pub mod topology;
pub mod translate;
pub mod wgpu_state;

pub use coverage::sample_coverage_mask;
pub use topology::{apply_primitive_type, PrimitiveMode, PrimitiveTopologyTranslation};
pub use translate::{apply_fixed_function_state, derive_rasterizer_state, skip_draw, SkipReason};
pub use wgpu_state::{
    translate_blend_constant, translate_blend_factor, translate_blend_op,
    translate_color_target_state,
    translate_color_write_mask, translate_compare_func, translate_cull_and_front_face,
    translate_depth_stencil_state, translate_multisample_state, translate_primitive_state,
    translate_sampler_descriptor, translate_stencil_op,
};

use bitflags::bitflags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    /// Increment and clamp.
    Incr,
    /// Decrement and clamp.
    Decr,
    Invert,
    IncrWrap,
    DecrWrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorWriteMask: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontFace {
    Cw,
    Ccw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    Front,
    Back,
    FrontAndBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerState {
    pub cull_face: bool,
    pub cull_mode: CullFace,
    pub front_face: FrontFace,
    pub polygon_offset_fill: bool,
    pub polygon_offset_factor: f32,
    pub polygon_offset_units: f32,
    /// Backend-only: the draw renders points.
    pub point_draw_mode: bool,
    /// Backend-only: the draw framebuffer is multisampled.
    pub multi_sample: bool,
    pub rasterizer_discard: bool,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            cull_face: false,
            cull_mode: CullFace::Back,
            front_face: FrontFace::Ccw,
            polygon_offset_fill: false,
            polygon_offset_factor: 0.0,
            polygon_offset_units: 0.0,
            point_draw_mode: false,
            multi_sample: false,
            rasterizer_discard: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    pub blend: bool,
    pub source_blend_rgb: BlendFactor,
    pub dest_blend_rgb: BlendFactor,
    pub source_blend_alpha: BlendFactor,
    pub dest_blend_alpha: BlendFactor,
    pub blend_equation_rgb: BlendEquation,
    pub blend_equation_alpha: BlendEquation,
    pub color_mask: ColorWriteMask,
    pub sample_alpha_to_coverage: bool,
    pub dither: bool,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            blend: false,
            source_blend_rgb: BlendFactor::One,
            dest_blend_rgb: BlendFactor::Zero,
            source_blend_alpha: BlendFactor::One,
            dest_blend_alpha: BlendFactor::Zero,
            blend_equation_rgb: BlendEquation::Add,
            blend_equation_alpha: BlendEquation::Add,
            color_mask: ColorWriteMask::all(),
            sample_alpha_to_coverage: false,
            dither: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFaceState {
    pub func: CompareFunc,
    pub read_mask: u32,
    pub fail_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub write_mask: u32,
}

impl Default for StencilFaceState {
    fn default() -> Self {
        Self {
            func: CompareFunc::Always,
            read_mask: u32::MAX,
            fail_op: StencilOp::Keep,
            depth_fail_op: StencilOp::Keep,
            pass_op: StencilOp::Keep,
            write_mask: u32::MAX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    pub depth_test: bool,
    pub depth_func: CompareFunc,
    pub depth_mask: bool,
    pub stencil_test: bool,
    pub front: StencilFaceState,
    pub back: StencilFaceState,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test: false,
            depth_func: CompareFunc::Less,
            depth_mask: true,
            stencil_test: false,
            front: StencilFaceState::default(),
            back: StencilFaceState::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    pub near: f32,
    pub far: f32,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleCoverage {
    pub enabled: bool,
    /// Clamped to `[0, 1]` by the client layer.
    pub value: f32,
    pub invert: bool,
}

impl Default for SampleCoverage {
    fn default() -> Self {
        Self {
            enabled: false,
            value: 1.0,
            invert: false,
        }
    }
}

/// Snapshot of the client fixed-function state consumed by one draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientState {
    pub rasterizer: RasterizerState,
    pub blend: BlendState,
    pub blend_color: ColorF,
    pub depth_stencil: DepthStencilState,
    pub stencil_ref: i32,
    pub stencil_back_ref: i32,
    pub viewport: Rect,
    pub depth_range: DepthRange,
    pub scissor: Rect,
    pub scissor_test: bool,
    pub sample_coverage: SampleCoverage,
}
