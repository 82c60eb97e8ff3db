use tracing::{debug, warn};

use super::{sample_coverage_mask, CullFace, FrontFace, PrimitiveMode, RasterizerState};
use crate::config::CoverageLadder;
use crate::context::DrawContext;
use crate::device::Device;
use crate::error::DeviceError;

/// Why a draw was dropped without reaching the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Point rendering with a vertex stage that never writes `gl_PointSize`; the point size is
    /// undefined, so nothing is drawn.
    PointsWithoutPointSize,
    /// Every triangle is culled.
    CullFrontAndBack,
}

/// Client rasterizer state plus the backend-only flags that depend on the draw.
///
/// `samples` is the draw framebuffer's sample count; zero means single-sampled.
pub fn derive_rasterizer_state(
    state: &RasterizerState,
    mode: PrimitiveMode,
    samples: u32,
) -> RasterizerState {
    RasterizerState {
        point_draw_mode: mode == PrimitiveMode::Points,
        multi_sample: samples != 0,
        ..*state
    }
}

/// Push rasterizer, blend and depth-stencil state, in that order.
pub fn apply_fixed_function_state<D: Device + ?Sized>(
    device: &mut D,
    ctx: &DrawContext<'_>,
    mode: PrimitiveMode,
    ladder: CoverageLadder,
) -> Result<(), DeviceError> {
    let state = ctx.state;
    let samples = ctx.framebuffer.samples();

    let rasterizer = derive_rasterizer_state(&state.rasterizer, mode, samples);
    device.set_rasterizer_state(&rasterizer)?;

    let mask = sample_coverage_mask(&state.sample_coverage, samples, ladder);
    device.set_blend_state(ctx.framebuffer, &state.blend, state.blend_color, mask)?;

    device.set_depth_stencil_state(
        &state.depth_stencil,
        state.stencil_ref,
        state.stencil_back_ref,
        rasterizer.front_face == FrontFace::Ccw,
    )?;

    Ok(())
}

/// Draws the backend cannot or need not perform.
pub fn skip_draw(ctx: &DrawContext<'_>, mode: PrimitiveMode) -> Option<SkipReason> {
    let rasterizer = &ctx.state.rasterizer;

    if mode == PrimitiveMode::Points {
        if !ctx.program.uses_point_size() {
            warn!("Point rendering without writing to gl_PointSize.");
            return Some(SkipReason::PointsWithoutPointSize);
        }
    } else if mode.is_triangle_mode()
        && rasterizer.cull_face
        && rasterizer.cull_mode == CullFace::FrontAndBack
    {
        debug!(?mode, "skipping draw: front and back faces culled");
        return Some(SkipReason::CullFrontAndBack);
    }

    None
}
