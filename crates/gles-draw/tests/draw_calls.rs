use pretty_assertions::assert_eq;

use gles_draw::resources::{FilterMode, WrapMode};
use gles_draw::test_utils::{
    DeviceCall, DeviceCallKind, DrawFixture, FakeAttachment, FakeBuffer, FakeFramebuffer,
    FakeProgram, FakeTexture, FakeTransformFeedback, RecordingDevice, PLACEHOLDER_SERIAL_BASE,
};
use gles_draw::{
    DrawOutcome, IndexRange, IndexSource, IndexType, PrimitiveMode, Renderer, SamplerParameters,
    SamplerStage, TextureSerial, TextureTarget,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[test]
fn textured_fan_binds_both_stages() {
    init_tracing();

    let heightmap = FakeTexture::new(TextureTarget::Texture2D, 1).shared();
    let skybox = FakeTexture::new(TextureTarget::CubeMap, 2).shared();

    let mut fixture = DrawFixture::new();
    fixture.caps.max_vertex_texture_image_units = 2;
    fixture.caps.max_texture_image_units = 2;
    fixture.resources.bind_texture(0, heightmap);
    fixture.resources.bind_texture(1, skybox);
    fixture.resources.bind_sampler(
        1,
        SamplerParameters {
            wrap_s: WrapMode::ClampToEdge,
            wrap_t: WrapMode::ClampToEdge,
            min_filter: FilterMode::Linear,
            ..SamplerParameters::default()
        },
    );
    fixture.program = FakeProgram::new()
        .with_sampler(SamplerStage::Vertex, TextureTarget::Texture2D, Some(0))
        .with_sampler(SamplerStage::Pixel, TextureTarget::CubeMap, Some(1));

    let mut renderer = Renderer::new(RecordingDevice::new());
    let outcome = renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::TriangleFan, 0, 4, 1)
        .unwrap();
    assert_eq!(outcome, DrawOutcome::Issued);

    let device = renderer.device();
    assert_eq!(
        device.bound_texture(SamplerStage::Vertex, 0),
        Some(Some(TextureSerial(1)))
    );
    assert_eq!(device.bound_texture(SamplerStage::Vertex, 1), Some(None));
    assert_eq!(
        device.bound_texture(SamplerStage::Pixel, 0),
        Some(Some(TextureSerial(2)))
    );
    assert_eq!(device.bound_texture(SamplerStage::Pixel, 1), Some(None));

    let cube_sampler = device.sampler_state(SamplerStage::Pixel, 0).unwrap();
    assert_eq!(cube_sampler.wrap_s, WrapMode::ClampToEdge);
    assert_eq!(cube_sampler.min_filter, FilterMode::Linear);

    let draw = device.calls.last().unwrap();
    assert_eq!(
        *draw,
        DeviceCall::DrawArrays {
            mode: PrimitiveMode::TriangleFan,
            topology: wgpu::PrimitiveTopology::TriangleList,
            count: 4,
            instances: 1,
            transform_feedback_active: false,
        }
    );
    assert_eq!(device.count(DeviceCallKind::CreatePlaceholderTexture), 0);
}

#[test]
fn render_to_texture_then_sample_it() {
    init_tracing();

    let target = FakeTexture::new(TextureTarget::Texture2D, 7).shared();
    let mut fixture = DrawFixture::new();
    fixture.resources.bind_texture(0, target.clone());
    fixture.program =
        FakeProgram::new().with_sampler(SamplerStage::Pixel, TextureTarget::Texture2D, Some(0));
    let mut renderer = Renderer::new(RecordingDevice::new());

    // Pass 1 renders into the texture it also samples.
    fixture.framebuffer =
        FakeFramebuffer::new().with_color(0, FakeAttachment::Texture(target.clone()));
    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Triangles, 0, 6, 1)
        .unwrap();
    assert_eq!(
        renderer.device().bound_texture(SamplerStage::Pixel, 0),
        Some(Some(TextureSerial(PLACEHOLDER_SERIAL_BASE)))
    );

    // Pass 2 samples it from the default framebuffer.
    fixture.framebuffer = FakeFramebuffer::new();
    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Triangles, 0, 6, 1)
        .unwrap();
    assert_eq!(
        renderer.device().bound_texture(SamplerStage::Pixel, 0),
        Some(Some(TextureSerial(7)))
    );

    let stats = renderer.stats().snapshot();
    assert_eq!(stats.draws_issued, 2);
    assert_eq!(stats.feedback_loops_avoided, 1);
}

#[test]
fn client_memory_indices_without_element_buffer() {
    init_tracing();

    let indices: [u8; 6] = [0, 1, 2, 2, 1, 3];
    let fixture = DrawFixture::new();
    let mut renderer = Renderer::new(RecordingDevice::new());

    let outcome = renderer
        .draw_elements(
            &fixture.context(),
            PrimitiveMode::Triangles,
            6,
            IndexType::U8,
            IndexSource::ClientMemory(&indices),
            3,
            IndexRange::new(0, 3),
        )
        .unwrap();
    assert_eq!(outcome, DrawOutcome::Issued);

    let device = renderer.device();
    let index_call = device
        .calls
        .iter()
        .find(|call| call.kind() == DeviceCallKind::ApplyIndexBuffer)
        .unwrap();
    assert_eq!(
        *index_call,
        DeviceCall::ApplyIndexBuffer {
            mode: PrimitiveMode::Triangles,
            count: 6,
            index_type: IndexType::U8,
            index_range: IndexRange::new(0, 3),
            element_array_buffer: None,
        }
    );
    assert_eq!(
        *device.calls.last().unwrap(),
        DeviceCall::DrawElements {
            mode: PrimitiveMode::Triangles,
            count: 6,
            index_type: IndexType::U8,
            instances: 3,
            index_range: IndexRange::new(0, 3),
        }
    );
}

#[test]
fn indexed_draw_with_paused_transform_feedback_is_allowed() {
    init_tracing();

    let mut fixture = DrawFixture::new();
    fixture.resources.transform_feedback = Some(FakeTransformFeedback {
        started: true,
        paused: true,
    });
    fixture.resources.bind_element_array_buffer(FakeBuffer::new(3));
    let mut renderer = Renderer::new(RecordingDevice::new());

    let outcome = renderer
        .draw_elements(
            &fixture.context(),
            PrimitiveMode::LineLoop,
            4,
            IndexType::U32,
            IndexSource::BufferOffset(16),
            1,
            IndexRange::new(10, 13),
        )
        .unwrap();

    assert_eq!(outcome, DrawOutcome::Issued);
    assert!(renderer
        .device()
        .calls
        .contains(&DeviceCall::ApplyVertexBuffer {
            first: 10,
            count: 4,
            instances: 1,
        }));
}

#[test]
fn stats_summarize_a_frame() {
    init_tracing();

    let mut fixture = DrawFixture::new();
    let mut renderer = Renderer::new(RecordingDevice::new());

    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Triangles, 0, 3, 1)
        .unwrap();
    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Triangles, 0, 1, 1)
        .unwrap();
    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Points, 0, 1, 1)
        .unwrap();
    fixture.program = FakeProgram::new().with_uniform_block(2);
    renderer
        .draw_arrays(&fixture.context(), PrimitiveMode::Triangles, 0, 3, 1)
        .unwrap_err();

    let stats = renderer.stats().snapshot();
    assert_eq!(stats.draws_issued, 1);
    assert_eq!(stats.draws_without_geometry, 1);
    assert_eq!(stats.draws_skipped, 1);
    assert_eq!(stats.draws_failed, 1);
    assert!(stats.to_json().contains("\"draws_skipped\":1"));
}
