//! Derived fixed-function state → wgpu pipeline descriptors.
//!
//! Used by wgpu-backed [`Device`](crate::device::Device) implementations when building render
//! pipelines and samplers for a draw.

use tracing::debug;

use super::{
    BlendEquation, BlendFactor, BlendState, ColorWriteMask, CompareFunc, CullFace,
    DepthStencilState, FrontFace, PrimitiveTopologyTranslation, RasterizerState, StencilFaceState,
    StencilOp,
};
use crate::resources::{CompareMode, FilterMode, SamplerState, WrapMode};

const MAX_ANISOTROPY: u16 = 16;

pub fn translate_compare_func(func: CompareFunc) -> wgpu::CompareFunction {
    match func {
        CompareFunc::Never => wgpu::CompareFunction::Never,
        CompareFunc::Less => wgpu::CompareFunction::Less,
        CompareFunc::Equal => wgpu::CompareFunction::Equal,
        CompareFunc::LessEqual => wgpu::CompareFunction::LessEqual,
        CompareFunc::Greater => wgpu::CompareFunction::Greater,
        CompareFunc::NotEqual => wgpu::CompareFunction::NotEqual,
        CompareFunc::GreaterEqual => wgpu::CompareFunction::GreaterEqual,
        CompareFunc::Always => wgpu::CompareFunction::Always,
    }
}

pub fn translate_stencil_op(op: StencilOp) -> wgpu::StencilOperation {
    match op {
        StencilOp::Keep => wgpu::StencilOperation::Keep,
        StencilOp::Zero => wgpu::StencilOperation::Zero,
        StencilOp::Replace => wgpu::StencilOperation::Replace,
        StencilOp::Incr => wgpu::StencilOperation::IncrementClamp,
        StencilOp::Decr => wgpu::StencilOperation::DecrementClamp,
        StencilOp::Invert => wgpu::StencilOperation::Invert,
        StencilOp::IncrWrap => wgpu::StencilOperation::IncrementWrap,
        StencilOp::DecrWrap => wgpu::StencilOperation::DecrementWrap,
    }
}

/// wgpu has a single constant color, so the alpha-only constant factors read the same
/// constant as the color ones. [`translate_blend_constant`] picks the matching constant.
pub fn translate_blend_factor(factor: BlendFactor) -> wgpu::BlendFactor {
    match factor {
        BlendFactor::Zero => wgpu::BlendFactor::Zero,
        BlendFactor::One => wgpu::BlendFactor::One,
        BlendFactor::SrcColor => wgpu::BlendFactor::Src,
        BlendFactor::OneMinusSrcColor => wgpu::BlendFactor::OneMinusSrc,
        BlendFactor::DstColor => wgpu::BlendFactor::Dst,
        BlendFactor::OneMinusDstColor => wgpu::BlendFactor::OneMinusDst,
        BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        BlendFactor::DstAlpha => wgpu::BlendFactor::DstAlpha,
        BlendFactor::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        BlendFactor::ConstantColor | BlendFactor::ConstantAlpha => wgpu::BlendFactor::Constant,
        BlendFactor::OneMinusConstantColor | BlendFactor::OneMinusConstantAlpha => {
            wgpu::BlendFactor::OneMinusConstant
        }
        BlendFactor::SrcAlphaSaturate => wgpu::BlendFactor::SrcAlphaSaturated,
    }
}

pub fn translate_blend_op(equation: BlendEquation) -> wgpu::BlendOperation {
    match equation {
        BlendEquation::Add => wgpu::BlendOperation::Add,
        BlendEquation::Subtract => wgpu::BlendOperation::Subtract,
        BlendEquation::ReverseSubtract => wgpu::BlendOperation::ReverseSubtract,
        BlendEquation::Min => wgpu::BlendOperation::Min,
        BlendEquation::Max => wgpu::BlendOperation::Max,
    }
}

pub fn translate_color_write_mask(mask: ColorWriteMask) -> wgpu::ColorWrites {
    let mut out = wgpu::ColorWrites::empty();
    if mask.contains(ColorWriteMask::RED) {
        out |= wgpu::ColorWrites::RED;
    }
    if mask.contains(ColorWriteMask::GREEN) {
        out |= wgpu::ColorWrites::GREEN;
    }
    if mask.contains(ColorWriteMask::BLUE) {
        out |= wgpu::ColorWrites::BLUE;
    }
    if mask.contains(ColorWriteMask::ALPHA) {
        out |= wgpu::ColorWrites::ALPHA;
    }
    out
}

/// `FrontAndBack` has no wgpu face; those draws are skipped before a pipeline is built, so it
/// maps to no culling.
pub fn translate_cull_and_front_face(
    rasterizer: &RasterizerState,
) -> (wgpu::FrontFace, Option<wgpu::Face>) {
    let front_face = match rasterizer.front_face {
        FrontFace::Cw => wgpu::FrontFace::Cw,
        FrontFace::Ccw => wgpu::FrontFace::Ccw,
    };
    let cull_mode = if rasterizer.cull_face {
        match rasterizer.cull_mode {
            CullFace::Front => Some(wgpu::Face::Front),
            CullFace::Back => Some(wgpu::Face::Back),
            CullFace::FrontAndBack => None,
        }
    } else {
        None
    };
    (front_face, cull_mode)
}

pub fn translate_primitive_state(
    topology: &PrimitiveTopologyTranslation,
    rasterizer: &RasterizerState,
) -> wgpu::PrimitiveState {
    let (front_face, cull_mode) = translate_cull_and_front_face(rasterizer);
    // Culling only applies to filled primitives.
    let cull_mode = if topology.mode.is_triangle_mode() {
        cull_mode
    } else {
        None
    };
    wgpu::PrimitiveState {
        topology: topology.topology,
        strip_index_format: None,
        front_face,
        cull_mode,
        unclipped_depth: false,
        polygon_mode: wgpu::PolygonMode::Fill,
        conservative: false,
    }
}

pub fn translate_color_target_state(
    format: wgpu::TextureFormat,
    blend: &BlendState,
) -> wgpu::ColorTargetState {
    let blend_state = blend.blend.then(|| wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: translate_blend_factor(blend.source_blend_rgb),
            dst_factor: translate_blend_factor(blend.dest_blend_rgb),
            operation: translate_blend_op(blend.blend_equation_rgb),
        },
        alpha: wgpu::BlendComponent {
            src_factor: translate_blend_factor(blend.source_blend_alpha),
            dst_factor: translate_blend_factor(blend.dest_blend_alpha),
            operation: translate_blend_op(blend.blend_equation_alpha),
        },
    });
    wgpu::ColorTargetState {
        format,
        blend: blend_state,
        write_mask: translate_color_write_mask(blend.color_mask),
    }
}

/// Blend constant to pair with [`translate_color_target_state`].
///
/// When the color factors read only the constant's alpha, the alpha is splatted so the RGBA
/// `Constant` factor sees it in every channel. Mixing constant-color and constant-alpha color
/// factors cannot be expressed; the color is kept as-is.
pub fn translate_blend_constant(blend: &BlendState, color: [f32; 4]) -> wgpu::Color {
    let [r, g, b, a] = color.map(f64::from);
    let rgb_factors = [blend.source_blend_rgb, blend.dest_blend_rgb];
    let reads_alpha = rgb_factors.iter().any(|factor| {
        matches!(
            factor,
            BlendFactor::ConstantAlpha | BlendFactor::OneMinusConstantAlpha
        )
    });
    let reads_color = rgb_factors.iter().any(|factor| {
        matches!(
            factor,
            BlendFactor::ConstantColor | BlendFactor::OneMinusConstantColor
        )
    });

    if !blend.blend || !reads_alpha {
        return wgpu::Color { r, g, b, a };
    }
    if reads_color {
        debug!(
            src = ?blend.source_blend_rgb,
            dst = ?blend.dest_blend_rgb,
            "constant color and constant alpha blend factors share one constant"
        );
        return wgpu::Color { r, g, b, a };
    }
    wgpu::Color {
        r: a,
        g: a,
        b: a,
        a,
    }
}

fn translate_stencil_face(face: &StencilFaceState) -> wgpu::StencilFaceState {
    wgpu::StencilFaceState {
        compare: translate_compare_func(face.func),
        fail_op: translate_stencil_op(face.fail_op),
        depth_fail_op: translate_stencil_op(face.depth_fail_op),
        pass_op: translate_stencil_op(face.pass_op),
    }
}

/// wgpu carries a single read/write mask for both faces; the front face's masks win.
pub fn translate_depth_stencil_state(
    format: wgpu::TextureFormat,
    depth_stencil: &DepthStencilState,
    rasterizer: &RasterizerState,
) -> wgpu::DepthStencilState {
    let (depth_compare, depth_write_enabled) = if depth_stencil.depth_test {
        (
            translate_compare_func(depth_stencil.depth_func),
            depth_stencil.depth_mask,
        )
    } else {
        // Depth writes are disabled along with the depth test.
        (wgpu::CompareFunction::Always, false)
    };

    let stencil = if depth_stencil.stencil_test {
        wgpu::StencilState {
            front: translate_stencil_face(&depth_stencil.front),
            back: translate_stencil_face(&depth_stencil.back),
            read_mask: depth_stencil.front.read_mask,
            write_mask: depth_stencil.front.write_mask,
        }
    } else {
        wgpu::StencilState::default()
    };

    let bias = if rasterizer.polygon_offset_fill {
        wgpu::DepthBiasState {
            constant: rasterizer.polygon_offset_units.round() as i32,
            slope_scale: rasterizer.polygon_offset_factor,
            clamp: 0.0,
        }
    } else {
        wgpu::DepthBiasState::default()
    };

    wgpu::DepthStencilState {
        format,
        depth_write_enabled,
        depth_compare,
        stencil,
        bias,
    }
}

/// `samples == 0` is a single-sampled target, where sample coverage has no effect and
/// `sample_mask` is ignored. An all-ones 32-bit mask widens to all ones.
pub fn translate_multisample_state(
    samples: u32,
    sample_mask: u32,
    blend: &BlendState,
) -> wgpu::MultisampleState {
    let count = samples.max(1);
    let mask = if samples == 0 || sample_mask == u32::MAX {
        u64::MAX
    } else {
        u64::from(sample_mask)
    };
    wgpu::MultisampleState {
        count,
        mask,
        alpha_to_coverage_enabled: blend.sample_alpha_to_coverage && count > 1,
    }
}

fn translate_wrap(mode: WrapMode) -> wgpu::AddressMode {
    match mode {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        WrapMode::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
    }
}

/// (filter, mipmap filter); non-mipmapped filters sample the base level only.
fn split_filter(filter: FilterMode) -> (wgpu::FilterMode, Option<wgpu::FilterMode>) {
    use wgpu::FilterMode as F;
    match filter {
        FilterMode::Nearest => (F::Nearest, None),
        FilterMode::Linear => (F::Linear, None),
        FilterMode::NearestMipmapNearest => (F::Nearest, Some(F::Nearest)),
        FilterMode::LinearMipmapNearest => (F::Linear, Some(F::Nearest)),
        FilterMode::NearestMipmapLinear => (F::Nearest, Some(F::Linear)),
        FilterMode::LinearMipmapLinear => (F::Linear, Some(F::Linear)),
    }
}

pub fn translate_sampler_descriptor(sampler: &SamplerState) -> wgpu::SamplerDescriptor<'static> {
    let (min_filter, mipmap_filter) = split_filter(sampler.min_filter);
    let (mag_filter, _) = split_filter(sampler.mag_filter);

    let (lod_min_clamp, lod_max_clamp) = match mipmap_filter {
        Some(_) => {
            let min = sampler.min_lod.max(0.0);
            (min, sampler.max_lod.max(min))
        }
        None => (0.0, 0.0),
    };
    let mipmap_filter = mipmap_filter.unwrap_or(wgpu::FilterMode::Nearest);

    // wgpu rejects anisotropy unless every filter is linear.
    let all_linear = min_filter == wgpu::FilterMode::Linear
        && mag_filter == wgpu::FilterMode::Linear
        && mipmap_filter == wgpu::FilterMode::Linear;
    let anisotropy_clamp = if all_linear {
        (sampler.max_anisotropy.max(1.0) as u16).min(MAX_ANISOTROPY)
    } else {
        1
    };

    let compare = match sampler.compare_mode {
        CompareMode::None => None,
        CompareMode::CompareRefToTexture => Some(translate_compare_func(sampler.compare_func)),
    };

    wgpu::SamplerDescriptor {
        label: None,
        address_mode_u: translate_wrap(sampler.wrap_s),
        address_mode_v: translate_wrap(sampler.wrap_t),
        address_mode_w: translate_wrap(sampler.wrap_r),
        mag_filter,
        min_filter,
        mipmap_filter,
        lod_min_clamp,
        lod_max_clamp,
        compare,
        anisotropy_clamp,
        border_color: None,
    }
}
