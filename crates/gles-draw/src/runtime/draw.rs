use std::mem;

use tracing::{debug, trace};

use super::textures::{apply_textures, generate_swizzles};
use super::uniform_buffers::apply_uniform_buffers;
use crate::config::RendererConfig;
use crate::context::DrawContext;
use crate::device::{
    ArraysDraw, Device, ElementsDraw, IndexRange, IndexSource, IndexType, IndexedDraw,
    ViewportParams,
};
use crate::error::{DeviceError, DrawError};
use crate::resources::IncompleteTextureCache;
use crate::state::{
    apply_fixed_function_state, apply_primitive_type, skip_draw, PrimitiveMode,
    PrimitiveTopologyTranslation, SkipReason,
};
use crate::stats::DrawStats;

/// Result of a draw call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawOutcome {
    /// The backend draw was issued.
    Issued,
    /// The mode/count pair assembles no primitives; the device was never touched.
    NoGeometry,
    /// State was applied but the draw itself was dropped.
    Skipped(SkipReason),
}

/// Drives a [`Device`] through the state setup of each client draw call.
///
/// Draws are serialized through `&mut self`. Device state applied by a draw that later fails
/// is left in place; the next draw re-applies everything it needs.
pub struct Renderer<D> {
    device: D,
    config: RendererConfig,
    incomplete_textures: IncompleteTextureCache,
    stats: DrawStats,
}

impl<D: Device> Renderer<D> {
    pub fn new(device: D) -> Self {
        Self::with_config(device, RendererConfig::default())
    }

    pub fn with_config(device: D, config: RendererConfig) -> Self {
        Self {
            device,
            config,
            incomplete_textures: IncompleteTextureCache::new(),
            stats: DrawStats::new(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn stats(&self) -> &DrawStats {
        &self.stats
    }

    pub fn incomplete_textures(&self) -> &IncompleteTextureCache {
        &self.incomplete_textures
    }

    /// Swap in a new backend device (e.g. after device loss) and return the old one.
    ///
    /// Placeholder textures belong to the old device and are dropped.
    pub fn replace_device(&mut self, device: D) -> D {
        let dropped = self.incomplete_textures.len();
        self.incomplete_textures.clear();
        debug!(dropped_placeholders = dropped, "replaced backend device");
        mem::replace(&mut self.device, device)
    }

    pub fn draw_arrays(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<DrawOutcome, DrawError> {
        let result = self.draw_arrays_impl(ctx, mode, first, count, instances);
        self.record(result)
    }

    /// Indexed draw. `index_range` is the range of index values the client indices reference.
    ///
    /// # Panics
    ///
    /// If transform feedback is active. The client layer rejects indexed draws while transform
    /// feedback is active.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_elements(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        indices: IndexSource<'_>,
        instances: u32,
        index_range: IndexRange,
    ) -> Result<DrawOutcome, DrawError> {
        let result =
            self.draw_elements_impl(ctx, mode, count, index_type, indices, instances, index_range);
        self.record(result)
    }

    fn record(&self, result: Result<DrawOutcome, DrawError>) -> Result<DrawOutcome, DrawError> {
        match &result {
            Ok(DrawOutcome::Issued) => self.stats.inc_draws_issued(),
            Ok(DrawOutcome::NoGeometry) => self.stats.inc_draws_without_geometry(),
            Ok(DrawOutcome::Skipped(_)) => self.stats.inc_draws_skipped(),
            Err(err) => {
                debug!(error = %err, code = ?err.code(), "draw failed");
                self.stats.inc_draws_failed();
            }
        }
        result
    }

    fn draw_arrays_impl(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
        first: u32,
        count: u32,
        instances: u32,
    ) -> Result<DrawOutcome, DrawError> {
        let Some(topology) = self.prepare(ctx, mode, count)? else {
            return Ok(DrawOutcome::NoGeometry);
        };

        self.device
            .apply_vertex_buffer(ctx.resources, first, count, instances)?;

        let transform_feedback_active = self.apply_transform_feedback(ctx)?;
        self.apply_program_resources(ctx, transform_feedback_active)?;

        if let Some(reason) = skip_draw(ctx, mode) {
            return Ok(DrawOutcome::Skipped(reason));
        }

        self.device.draw_arrays(&ArraysDraw {
            topology,
            count,
            instances,
            transform_feedback_active,
        })?;
        trace!(%mode, first, count, instances, "issued draw_arrays");

        if transform_feedback_active {
            mark_transform_feedback_usage(ctx);
        }
        Ok(DrawOutcome::Issued)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_elements_impl(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
        count: u32,
        index_type: IndexType,
        indices: IndexSource<'_>,
        instances: u32,
        index_range: IndexRange,
    ) -> Result<DrawOutcome, DrawError> {
        let Some(topology) = self.prepare(ctx, mode, count)? else {
            return Ok(DrawOutcome::NoGeometry);
        };

        let element_array_buffer = ctx.resources.element_array_buffer();
        let translated = self.device.apply_index_buffer(&IndexedDraw {
            mode,
            count,
            index_type,
            indices,
            element_array_buffer,
            index_range,
        })?;

        let vertex_range = translated.index_range;
        self.device.apply_vertex_buffer(
            ctx.resources,
            vertex_range.start,
            vertex_range.vertex_count(),
            instances,
        )?;

        let transform_feedback_active = self.apply_transform_feedback(ctx)?;
        assert!(
            !transform_feedback_active,
            "indexed draws are not allowed while transform feedback is active"
        );
        self.apply_program_resources(ctx, transform_feedback_active)?;

        if let Some(reason) = skip_draw(ctx, mode) {
            return Ok(DrawOutcome::Skipped(reason));
        }

        self.device.draw_elements(
            &ElementsDraw {
                topology,
                count,
                index_type,
                indices,
                element_array_buffer,
                instances,
            },
            &translated,
        )?;
        trace!(%mode, count, ?index_type, instances, "issued draw_elements");
        Ok(DrawOutcome::Issued)
    }

    /// Everything up to and including fixed-function state. `None` means the draw produces no
    /// primitives and nothing reached the device.
    fn prepare(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
        count: u32,
    ) -> Result<Option<PrimitiveTopologyTranslation>, DrawError> {
        ctx.program.refresh_sampler_mapping();
        generate_swizzles(ctx, self.device.supports_native_swizzle(), &self.stats)?;

        let Some(topology) = apply_primitive_type(mode, count) else {
            debug!(?mode, count, "draw produces no primitives");
            return Ok(None);
        };

        self.apply_render_target(ctx, mode)?;
        apply_fixed_function_state(&mut self.device, ctx, mode, self.config.coverage_ladder)?;
        Ok(Some(topology))
    }

    fn apply_render_target(
        &mut self,
        ctx: &DrawContext<'_>,
        mode: PrimitiveMode,
    ) -> Result<(), DeviceError> {
        let framebuffer = ctx.framebuffer;
        debug_assert!(framebuffer.is_complete(), "draw framebuffer must be complete");
        self.device.apply_render_target(framebuffer)?;

        let state = ctx.state;
        self.device.set_viewport(&ViewportParams {
            viewport: state.viewport,
            depth_range: state.depth_range,
            mode,
            front_face: state.rasterizer.front_face,
        })?;
        self.device.set_scissor(state.scissor, state.scissor_test)
    }

    fn apply_transform_feedback(&mut self, ctx: &DrawContext<'_>) -> Result<bool, DeviceError> {
        let active = ctx.transform_feedback_active();
        if active {
            self.device.apply_transform_feedback_buffers(ctx.resources)?;
        }
        Ok(active)
    }

    /// Shaders, uniforms, textures and uniform buffers, in that order.
    fn apply_program_resources(
        &mut self,
        ctx: &DrawContext<'_>,
        transform_feedback_active: bool,
    ) -> Result<(), DrawError> {
        self.device.apply_shaders(
            ctx.program,
            ctx.framebuffer,
            ctx.state.rasterizer.rasterizer_discard,
            transform_feedback_active,
        )?;
        ctx.program.apply_uniforms()?;

        apply_textures(
            ctx,
            &mut self.device,
            &mut self.incomplete_textures,
            &self.stats,
        )?;
        apply_uniform_buffers(ctx)
    }
}

fn mark_transform_feedback_usage(ctx: &DrawContext<'_>) {
    for index in 0..ctx.caps.max_transform_feedback_separate_attributes {
        if let Some(buffer) = ctx.resources.indexed_transform_feedback_buffer(index) {
            buffer.mark_transform_feedback_usage();
        }
    }
}
