use gles_draw::resources::{CompareMode, FilterMode, SamplerState, WrapMode};
use gles_draw::state::{
    apply_primitive_type, sample_coverage_mask, translate_blend_constant, translate_blend_factor,
    translate_blend_op, translate_color_target_state, translate_color_write_mask,
    translate_compare_func, translate_cull_and_front_face, translate_depth_stencil_state,
    translate_multisample_state, translate_primitive_state, translate_sampler_descriptor,
    translate_stencil_op, BlendEquation, BlendFactor, BlendState, ColorWriteMask, CompareFunc,
    CullFace, DepthStencilState, FrontFace, PrimitiveMode, RasterizerState, SampleCoverage,
    StencilOp,
};
use gles_draw::CoverageLadder;

#[test]
fn cull_mode_is_relative_to_front_face() {
    let mut raster = RasterizerState {
        cull_face: true,
        cull_mode: CullFace::Back,
        front_face: FrontFace::Cw,
        ..RasterizerState::default()
    };
    let (front_face, cull_mode) = translate_cull_and_front_face(&raster);
    assert_eq!(front_face, wgpu::FrontFace::Cw);
    assert_eq!(cull_mode, Some(wgpu::Face::Back));

    raster.cull_mode = CullFace::Front;
    raster.front_face = FrontFace::Ccw;
    let (front_face, cull_mode) = translate_cull_and_front_face(&raster);
    assert_eq!(front_face, wgpu::FrontFace::Ccw);
    assert_eq!(cull_mode, Some(wgpu::Face::Front));

    raster.cull_face = false;
    assert_eq!(translate_cull_and_front_face(&raster).1, None);
}

#[test]
fn front_and_back_culling_has_no_face() {
    let raster = RasterizerState {
        cull_face: true,
        cull_mode: CullFace::FrontAndBack,
        ..RasterizerState::default()
    };
    assert_eq!(translate_cull_and_front_face(&raster).1, None);
}

#[test]
fn compare_func_maps_correctly() {
    assert_eq!(
        translate_compare_func(CompareFunc::LessEqual),
        wgpu::CompareFunction::LessEqual
    );
    assert_eq!(
        translate_compare_func(CompareFunc::NotEqual),
        wgpu::CompareFunction::NotEqual
    );
    assert_eq!(
        translate_compare_func(CompareFunc::Always),
        wgpu::CompareFunction::Always
    );
}

#[test]
fn stencil_op_maps_correctly() {
    assert_eq!(
        translate_stencil_op(StencilOp::Incr),
        wgpu::StencilOperation::IncrementClamp
    );
    assert_eq!(
        translate_stencil_op(StencilOp::DecrWrap),
        wgpu::StencilOperation::DecrementWrap
    );
    assert_eq!(
        translate_stencil_op(StencilOp::Invert),
        wgpu::StencilOperation::Invert
    );
}

#[test]
fn blend_factor_maps_correctly() {
    assert_eq!(
        translate_blend_factor(BlendFactor::SrcAlpha),
        wgpu::BlendFactor::SrcAlpha
    );
    assert_eq!(
        translate_blend_factor(BlendFactor::OneMinusDstColor),
        wgpu::BlendFactor::OneMinusDst
    );
    assert_eq!(
        translate_blend_factor(BlendFactor::ConstantAlpha),
        wgpu::BlendFactor::Constant
    );
    assert_eq!(
        translate_blend_factor(BlendFactor::SrcAlphaSaturate),
        wgpu::BlendFactor::SrcAlphaSaturated
    );
}

#[test]
fn blend_op_maps_correctly() {
    assert_eq!(
        translate_blend_op(BlendEquation::ReverseSubtract),
        wgpu::BlendOperation::ReverseSubtract
    );
    assert_eq!(translate_blend_op(BlendEquation::Max), wgpu::BlendOperation::Max);
}

#[test]
fn color_write_mask_maps_correctly() {
    let translated = translate_color_write_mask(ColorWriteMask::RED | ColorWriteMask::BLUE);
    assert!(translated.contains(wgpu::ColorWrites::RED));
    assert!(!translated.contains(wgpu::ColorWrites::GREEN));
    assert!(translated.contains(wgpu::ColorWrites::BLUE));
    assert!(!translated.contains(wgpu::ColorWrites::ALPHA));
}

#[test]
fn disabled_blending_has_no_blend_state() {
    let target = translate_color_target_state(wgpu::TextureFormat::Rgba8Unorm, &BlendState::default());
    assert_eq!(target.blend, None);
    assert_eq!(target.write_mask, wgpu::ColorWrites::ALL);

    let blend = BlendState {
        blend: true,
        source_blend_rgb: BlendFactor::SrcAlpha,
        dest_blend_rgb: BlendFactor::OneMinusSrcAlpha,
        blend_equation_alpha: BlendEquation::Max,
        ..BlendState::default()
    };
    let target = translate_color_target_state(wgpu::TextureFormat::Rgba8Unorm, &blend);
    let state = target.blend.unwrap();
    assert_eq!(state.color.src_factor, wgpu::BlendFactor::SrcAlpha);
    assert_eq!(state.color.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    assert_eq!(state.alpha.operation, wgpu::BlendOperation::Max);
}

#[test]
fn primitive_state_only_culls_triangles() {
    let raster = RasterizerState {
        cull_face: true,
        cull_mode: CullFace::Back,
        ..RasterizerState::default()
    };

    let tris = apply_primitive_type(PrimitiveMode::TriangleStrip, 4).unwrap();
    let state = translate_primitive_state(&tris, &raster);
    assert_eq!(state.topology, wgpu::PrimitiveTopology::TriangleStrip);
    assert_eq!(state.cull_mode, Some(wgpu::Face::Back));
    assert_eq!(state.front_face, wgpu::FrontFace::Ccw);

    let lines = apply_primitive_type(PrimitiveMode::Lines, 2).unwrap();
    let state = translate_primitive_state(&lines, &raster);
    assert_eq!(state.topology, wgpu::PrimitiveTopology::LineList);
    assert_eq!(state.cull_mode, None);
}

#[test]
fn depth_test_disabled_disables_depth_writes() {
    let state = translate_depth_stencil_state(
        wgpu::TextureFormat::Depth24PlusStencil8,
        &DepthStencilState::default(),
        &RasterizerState::default(),
    );
    assert_eq!(state.depth_compare, wgpu::CompareFunction::Always);
    assert!(!state.depth_write_enabled);
    assert!(!state.stencil.is_enabled());
    assert_eq!(state.bias.constant, 0);
}

#[test]
fn depth_stencil_and_polygon_offset() {
    let mut ds = DepthStencilState {
        depth_test: true,
        depth_func: CompareFunc::GreaterEqual,
        stencil_test: true,
        ..DepthStencilState::default()
    };
    ds.front.func = CompareFunc::Equal;
    ds.front.pass_op = StencilOp::Replace;
    ds.front.read_mask = 0x0f;
    ds.back.fail_op = StencilOp::Zero;
    let raster = RasterizerState {
        polygon_offset_fill: true,
        polygon_offset_factor: 1.5,
        polygon_offset_units: 4.0,
        ..RasterizerState::default()
    };

    let state =
        translate_depth_stencil_state(wgpu::TextureFormat::Depth24PlusStencil8, &ds, &raster);

    assert_eq!(state.depth_compare, wgpu::CompareFunction::GreaterEqual);
    assert!(state.depth_write_enabled);
    assert_eq!(state.stencil.front.compare, wgpu::CompareFunction::Equal);
    assert_eq!(state.stencil.front.pass_op, wgpu::StencilOperation::Replace);
    assert_eq!(state.stencil.back.fail_op, wgpu::StencilOperation::Zero);
    assert_eq!(state.stencil.read_mask, 0x0f);
    assert_eq!(state.bias.constant, 4);
    assert_eq!(state.bias.slope_scale, 1.5);
}

#[test]
fn multisample_mask_widens() {
    let blend = BlendState {
        sample_alpha_to_coverage: true,
        ..BlendState::default()
    };

    let state = translate_multisample_state(4, 0b1010, &blend);
    assert_eq!(state.count, 4);
    assert_eq!(state.mask, 0b1010);
    assert!(state.alpha_to_coverage_enabled);

    let state = translate_multisample_state(0, u32::MAX, &blend);
    assert_eq!(state.count, 1);
    assert_eq!(state.mask, u64::MAX);
    assert!(!state.alpha_to_coverage_enabled);
}

#[test]
fn single_sampled_target_ignores_sample_coverage() {
    let coverage = SampleCoverage {
        enabled: true,
        value: 0.5,
        invert: false,
    };
    let sample_mask = sample_coverage_mask(&coverage, 0, CoverageLadder::Float);

    let state = translate_multisample_state(0, sample_mask, &BlendState::default());
    assert_eq!(state.count, 1);
    assert_eq!(state.mask, u64::MAX);

    let state = translate_multisample_state(4, 0b0011, &BlendState::default());
    assert_eq!(state.mask, 0b0011);
}

#[test]
fn polygon_offset_units_round_to_nearest() {
    let mut raster = RasterizerState {
        polygon_offset_fill: true,
        polygon_offset_units: 0.5,
        ..RasterizerState::default()
    };
    let bias = |raster: &RasterizerState| {
        translate_depth_stencil_state(
            wgpu::TextureFormat::Depth32Float,
            &DepthStencilState::default(),
            raster,
        )
        .bias
        .constant
    };
    assert_eq!(bias(&raster), 1);

    raster.polygon_offset_units = 2.4;
    assert_eq!(bias(&raster), 2);

    raster.polygon_offset_units = -1.6;
    assert_eq!(bias(&raster), -2);
}

#[test]
fn constant_alpha_factors_splat_the_blend_constant() {
    let color = [0.25, 0.5, 0.75, 0.1];
    let mut blend = BlendState {
        blend: true,
        source_blend_rgb: BlendFactor::ConstantAlpha,
        dest_blend_rgb: BlendFactor::OneMinusConstantAlpha,
        ..BlendState::default()
    };
    let constant = translate_blend_constant(&blend, color);
    let a = f64::from(0.1f32);
    assert_eq!(
        (constant.r, constant.g, constant.b, constant.a),
        (a, a, a, a)
    );

    // Mixed with a constant-color factor, the color is kept.
    blend.dest_blend_rgb = BlendFactor::OneMinusConstantColor;
    let constant = translate_blend_constant(&blend, color);
    assert_eq!(constant.r, 0.25);
    assert_eq!(constant.g, 0.5);

    // Alpha-channel factors already read the constant's alpha.
    let blend = BlendState {
        blend: true,
        source_blend_alpha: BlendFactor::ConstantAlpha,
        ..BlendState::default()
    };
    let constant = translate_blend_constant(&blend, color);
    assert_eq!(constant.b, 0.75);
}

#[test]
fn sampler_descriptor_from_default_state() {
    let desc = translate_sampler_descriptor(&SamplerState::default());
    assert_eq!(desc.address_mode_u, wgpu::AddressMode::Repeat);
    assert_eq!(desc.min_filter, wgpu::FilterMode::Nearest);
    assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.mipmap_filter, wgpu::FilterMode::Linear);
    assert_eq!(desc.lod_min_clamp, 0.0);
    assert_eq!(desc.lod_max_clamp, 1000.0);
    assert_eq!(desc.compare, None);
    assert_eq!(desc.anisotropy_clamp, 1);
}

#[test]
fn sampler_descriptor_without_mipmaps_samples_base_level() {
    let sampler = SamplerState {
        min_filter: FilterMode::Linear,
        wrap_t: WrapMode::MirroredRepeat,
        compare_mode: CompareMode::CompareRefToTexture,
        compare_func: CompareFunc::Less,
        ..SamplerState::default()
    };
    let desc = translate_sampler_descriptor(&sampler);
    assert_eq!(desc.address_mode_v, wgpu::AddressMode::MirrorRepeat);
    assert_eq!(desc.lod_min_clamp, 0.0);
    assert_eq!(desc.lod_max_clamp, 0.0);
    assert_eq!(desc.compare, Some(wgpu::CompareFunction::Less));
}

#[test]
fn anisotropy_requires_linear_filtering() {
    let linear = SamplerState {
        min_filter: FilterMode::LinearMipmapLinear,
        max_anisotropy: 8.0,
        ..SamplerState::default()
    };
    assert_eq!(translate_sampler_descriptor(&linear).anisotropy_clamp, 8);

    let nearest = SamplerState {
        min_filter: FilterMode::NearestMipmapNearest,
        max_anisotropy: 8.0,
        ..SamplerState::default()
    };
    assert_eq!(translate_sampler_descriptor(&nearest).anisotropy_clamp, 1);

    let excessive = SamplerState {
        min_filter: FilterMode::LinearMipmapLinear,
        max_anisotropy: 64.0,
        ..SamplerState::default()
    };
    assert_eq!(translate_sampler_descriptor(&excessive).anisotropy_clamp, 16);
}
