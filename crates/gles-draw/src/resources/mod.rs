//! Views of the client GL objects the draw path reads.
//!
//! The objects themselves (storage, images, compiled programs) are owned by the resource
//! manager; the draw path only borrows them for the duration of one call.

pub mod incomplete;
pub mod program;

pub use incomplete::{IncompleteTextureCache, PlaceholderTextureDesc, PLACEHOLDER_TEXEL};
pub use program::{ProgramBinary, SamplerStage};

use crate::caps::{ClientVersion, Extensions, TextureCaps};
use crate::error::DeviceError;
use crate::state::CompareFunc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureTarget {
    Texture2D,
    CubeMap,
    Texture3D,
    Texture2DArray,
}

/// Immutable identity of a texture object, unique for the lifetime of the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureSerial(pub u32);

/// Client buffer name. Name zero means "no buffer".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u32);

impl BufferId {
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl FilterMode {
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareMode {
    None,
    CompareRefToTexture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Swizzle {
    Red,
    Green,
    Blue,
    Alpha,
    Zero,
    One,
}

/// Effective sampling parameters for one texture binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerState {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub wrap_r: WrapMode,
    pub max_anisotropy: f32,
    pub base_level: u32,
    pub max_level: u32,
    pub min_lod: f32,
    pub max_lod: f32,
    pub compare_mode: CompareMode,
    pub compare_func: CompareFunc,
    pub swizzle_red: Swizzle,
    pub swizzle_green: Swizzle,
    pub swizzle_blue: Swizzle,
    pub swizzle_alpha: Swizzle,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            min_filter: FilterMode::NearestMipmapLinear,
            mag_filter: FilterMode::Linear,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            wrap_r: WrapMode::Repeat,
            max_anisotropy: 1.0,
            base_level: 0,
            max_level: 1000,
            min_lod: -1000.0,
            max_lod: 1000.0,
            compare_mode: CompareMode::None,
            compare_func: CompareFunc::LessEqual,
            swizzle_red: Swizzle::Red,
            swizzle_green: Swizzle::Green,
            swizzle_blue: Swizzle::Blue,
            swizzle_alpha: Swizzle::Alpha,
        }
    }
}

impl SamplerState {
    pub fn swizzle_required(&self) -> bool {
        self.swizzle_red != Swizzle::Red
            || self.swizzle_green != Swizzle::Green
            || self.swizzle_blue != Swizzle::Blue
            || self.swizzle_alpha != Swizzle::Alpha
    }
}

/// State carried by a sampler object bound to a texture unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerParameters {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub wrap_r: WrapMode,
    pub max_anisotropy: f32,
    pub min_lod: f32,
    pub max_lod: f32,
    pub compare_mode: CompareMode,
    pub compare_func: CompareFunc,
}

impl Default for SamplerParameters {
    fn default() -> Self {
        let defaults = SamplerState::default();
        Self {
            min_filter: defaults.min_filter,
            mag_filter: defaults.mag_filter,
            wrap_s: defaults.wrap_s,
            wrap_t: defaults.wrap_t,
            wrap_r: defaults.wrap_r,
            max_anisotropy: defaults.max_anisotropy,
            min_lod: defaults.min_lod,
            max_lod: defaults.max_lod,
            compare_mode: defaults.compare_mode,
            compare_func: defaults.compare_func,
        }
    }
}

impl SamplerParameters {
    /// Override the sampler-object fields of a texture's state. Swizzles and the level range
    /// stay with the texture.
    pub fn apply_to(&self, state: &mut SamplerState) {
        state.min_filter = self.min_filter;
        state.mag_filter = self.mag_filter;
        state.wrap_s = self.wrap_s;
        state.wrap_t = self.wrap_t;
        state.wrap_r = self.wrap_r;
        state.max_anisotropy = self.max_anisotropy;
        state.min_lod = self.min_lod;
        state.max_lod = self.max_lod;
        state.compare_mode = self.compare_mode;
        state.compare_func = self.compare_func;
    }
}

pub trait Texture {
    fn target(&self) -> TextureTarget;

    fn serial(&self) -> TextureSerial;

    /// The texture's own sampling parameters (no sampler object applied).
    fn sampler_state(&self) -> SamplerState;

    fn is_sampler_complete(
        &self,
        sampler: &SamplerState,
        texture_caps: &TextureCaps,
        extensions: Extensions,
        client_version: ClientVersion,
    ) -> bool;

    /// Bring the swizzled copy of the texture up to date. A no-op when it is already current.
    fn regenerate_swizzle(&self) -> Result<(), DeviceError>;
}

/// Framebuffer attachment as seen by the draw path.
#[derive(Clone, Copy)]
pub enum Attachment<'a> {
    Texture(&'a dyn Texture),
    Renderbuffer,
}

impl<'a> Attachment<'a> {
    pub fn texture(self) -> Option<&'a dyn Texture> {
        match self {
            Self::Texture(texture) => Some(texture),
            Self::Renderbuffer => None,
        }
    }
}

pub trait Framebuffer {
    fn color_attachment(&self, index: usize) -> Option<Attachment<'_>>;

    /// Depth attachment, or the stencil attachment when there is no depth attachment.
    fn depth_or_stencil_attachment(&self) -> Option<Attachment<'_>>;

    /// Zero for single-sampled framebuffers.
    fn samples(&self) -> u32;

    fn is_complete(&self) -> bool {
        true
    }
}

pub trait Buffer {
    fn id(&self) -> BufferId;

    fn mark_transform_feedback_usage(&self);
}

pub trait TransformFeedback {
    fn is_started(&self) -> bool;

    fn is_paused(&self) -> bool;
}
