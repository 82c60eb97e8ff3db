//! Sampler → texture binding for a draw.
//!
//! Two passes run per draw. The swizzle pass runs before anything is pushed to the device and
//! makes sure every sampled texture that needs a channel swizzle has an up-to-date swizzled
//! copy. The binding pass resolves each sampler slot to a texture, substituting a placeholder
//! for incomplete textures and for textures that are also bound as render targets (a
//! rendering feedback loop).

use smallvec::SmallVec;
use tracing::debug;

use crate::caps::MAX_DRAW_BUFFERS;
use crate::context::DrawContext;
use crate::device::Device;
use crate::error::DeviceError;
use crate::resources::{
    Framebuffer, IncompleteTextureCache, SamplerStage, SamplerState, Texture, TextureSerial,
    TextureTarget,
};
use crate::stats::DrawStats;

const MAX_FRAMEBUFFER_TEXTURES: usize = MAX_DRAW_BUFFERS + 1;

/// Serials of the textures attached to the draw framebuffer, strictly ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FramebufferTextureSerials {
    serials: SmallVec<[TextureSerial; MAX_FRAMEBUFFER_TEXTURES]>,
}

impl FramebufferTextureSerials {
    /// Only the first `max_draw_buffers` color attachments are considered.
    pub fn from_framebuffer(framebuffer: &dyn Framebuffer, max_draw_buffers: u32) -> Self {
        let mut serials = SmallVec::new();

        let color_attachments = (max_draw_buffers as usize).min(MAX_DRAW_BUFFERS);
        for index in 0..color_attachments {
            if let Some(texture) = framebuffer
                .color_attachment(index)
                .and_then(|attachment| attachment.texture())
            {
                serials.push(texture.serial());
            }
        }
        if let Some(texture) = framebuffer
            .depth_or_stencil_attachment()
            .and_then(|attachment| attachment.texture())
        {
            serials.push(texture.serial());
        }

        serials.sort_unstable();
        serials.dedup();
        Self { serials }
    }

    pub fn contains(&self, serial: TextureSerial) -> bool {
        self.serials.binary_search(&serial).is_ok()
    }

    pub fn as_slice(&self) -> &[TextureSerial] {
        &self.serials
    }

    pub fn len(&self) -> usize {
        self.serials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serials.is_empty()
    }
}

/// Regenerate stale swizzled copies for every texture the program samples.
///
/// Nothing to do on devices that swizzle natively.
pub fn generate_swizzles(
    ctx: &DrawContext<'_>,
    native_swizzle: bool,
    stats: &DrawStats,
) -> Result<(), DeviceError> {
    if native_swizzle {
        return Ok(());
    }

    let program = ctx.program;
    for stage in SamplerStage::ALL {
        for sampler_index in 0..program.used_sampler_range(stage) {
            let Some(unit) = program.sampler_texture_unit(stage, sampler_index, ctx.caps) else {
                continue;
            };
            let target = program.sampler_texture_target(stage, sampler_index);
            let Some(texture) = ctx.resources.sampler_texture(unit, target) else {
                continue;
            };
            if texture.sampler_state().swizzle_required() {
                texture.regenerate_swizzle()?;
                stats.inc_swizzles_regenerated();
            }
        }
    }
    Ok(())
}

/// Why a slot gets the placeholder instead of its bound texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderReason {
    /// No texture object bound for the sampler's target.
    Unbound,
    /// The texture is not complete under the effective sampling state.
    Incomplete,
    /// The texture is attached to the draw framebuffer.
    FeedbackLoop,
}

/// Resolution of one used sampler slot.
#[derive(Clone, Copy)]
pub enum ResolvedBinding<'a> {
    /// The sampler is not mapped to a texture unit.
    Unmapped,
    Texture {
        texture: &'a dyn Texture,
        sampler: SamplerState,
    },
    Placeholder {
        target: TextureTarget,
        reason: PlaceholderReason,
    },
}

/// Decide what slot `sampler_index` of `stage` samples from.
pub fn resolve_sampler_binding<'a>(
    ctx: &DrawContext<'a>,
    stage: SamplerStage,
    sampler_index: u32,
    framebuffer_serials: &FramebufferTextureSerials,
) -> ResolvedBinding<'a> {
    let program = ctx.program;
    let Some(unit) = program.sampler_texture_unit(stage, sampler_index, ctx.caps) else {
        return ResolvedBinding::Unmapped;
    };
    let target = program.sampler_texture_target(stage, sampler_index);

    let Some(texture) = ctx.resources.sampler_texture(unit, target) else {
        return ResolvedBinding::Placeholder {
            target,
            reason: PlaceholderReason::Unbound,
        };
    };

    let mut sampler = texture.sampler_state();
    if let Some(params) = ctx.resources.sampler_object(unit) {
        params.apply_to(&mut sampler);
    }

    if !texture.is_sampler_complete(&sampler, ctx.texture_caps, ctx.extensions, ctx.client_version)
    {
        return ResolvedBinding::Placeholder {
            target,
            reason: PlaceholderReason::Incomplete,
        };
    }
    if framebuffer_serials.contains(texture.serial()) {
        return ResolvedBinding::Placeholder {
            target,
            reason: PlaceholderReason::FeedbackLoop,
        };
    }

    ResolvedBinding::Texture { texture, sampler }
}

/// Resolve and bind every sampler slot of both stages.
pub fn apply_textures<D: Device + ?Sized>(
    ctx: &DrawContext<'_>,
    device: &mut D,
    placeholders: &mut IncompleteTextureCache,
    stats: &DrawStats,
) -> Result<(), DeviceError> {
    let framebuffer_serials = FramebufferTextureSerials::from_framebuffer(ctx.framebuffer, ctx.caps.max_draw_buffers);

    for stage in SamplerStage::ALL {
        apply_stage_textures(ctx, stage, &framebuffer_serials, device, placeholders, stats)?;
    }
    Ok(())
}

fn apply_stage_textures<D: Device + ?Sized>(
    ctx: &DrawContext<'_>,
    stage: SamplerStage,
    framebuffer_serials: &FramebufferTextureSerials,
    device: &mut D,
    placeholders: &mut IncompleteTextureCache,
    stats: &DrawStats,
) -> Result<(), DeviceError> {
    let used = ctx.program.used_sampler_range(stage);

    for sampler_index in 0..used {
        match resolve_sampler_binding(ctx, stage, sampler_index, framebuffer_serials) {
            ResolvedBinding::Unmapped => device.set_texture(stage, sampler_index, None)?,
            ResolvedBinding::Texture { texture, sampler } => {
                device.set_sampler_state(stage, sampler_index, texture, &sampler)?;
                device.set_texture(stage, sampler_index, Some(texture))?;
            }
            ResolvedBinding::Placeholder { target, reason } => {
                match reason {
                    PlaceholderReason::FeedbackLoop => {
                        debug!(
                            ?stage,
                            sampler_index,
                            ?target,
                            "texture is a render target; binding placeholder"
                        );
                        stats.inc_feedback_loops_avoided();
                    }
                    PlaceholderReason::Incomplete | PlaceholderReason::Unbound => {
                        debug!(
                            ?stage,
                            sampler_index,
                            ?target,
                            ?reason,
                            "binding incomplete-texture placeholder"
                        );
                        stats.inc_incomplete_texture_substitutions();
                    }
                }
                let created = !placeholders.contains(target);
                let placeholder = placeholders.get_or_create(target, device)?;
                if created {
                    stats.inc_placeholder_textures_created();
                }
                device.set_texture(stage, sampler_index, Some(placeholder))?;
            }
        }
    }

    for sampler_index in used..stage.sampler_limit(ctx.caps) {
        device.set_texture(stage, sampler_index, None)?;
    }
    Ok(())
}
