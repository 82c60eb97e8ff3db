//! Device limits and capability sets consulted by the draw path.
//!
//! These are queried once by the surrounding context layer; the draw path only reads them.

use bitflags::bitflags;
use hashbrown::HashMap;

/// Upper bound on simultaneously bound color attachments.
pub const MAX_DRAW_BUFFERS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps {
    /// Sampler slots available to the vertex stage.
    pub max_vertex_texture_image_units: u32,
    /// Sampler slots available to the pixel stage.
    pub max_texture_image_units: u32,
    pub max_transform_feedback_separate_attributes: u32,
    /// Color attachments scanned for feedback loops, capped at [`MAX_DRAW_BUFFERS`].
    pub max_draw_buffers: u32,
}

impl Default for Caps {
    /// OpenGL ES 3.0 minimum limits.
    fn default() -> Self {
        Self {
            max_vertex_texture_image_units: 16,
            max_texture_image_units: 16,
            max_transform_feedback_separate_attributes: 4,
            max_draw_buffers: 4,
        }
    }
}

/// Per-format texture support, keyed by sized internal format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureFormatCaps {
    pub texturable: bool,
    pub filterable: bool,
    pub renderable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TextureCaps {
    formats: HashMap<u32, TextureFormatCaps>,
}

impl TextureCaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, internal_format: u32, caps: TextureFormatCaps) {
        self.formats.insert(internal_format, caps);
    }

    /// Unknown formats report no support.
    pub fn get(&self, internal_format: u32) -> TextureFormatCaps {
        self.formats
            .get(&internal_format)
            .copied()
            .unwrap_or_default()
    }
}

bitflags! {
    /// Client extensions that change sampler completeness rules.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Extensions: u32 {
        const TEXTURE_NPOT = 1 << 0;
        const TEXTURE_FLOAT_LINEAR = 1 << 1;
        const TEXTURE_HALF_FLOAT_LINEAR = 1 << 2;
        const TEXTURE_FILTER_ANISOTROPIC = 1 << 3;
        const DEPTH_TEXTURES = 1 << 4;
        const TEXTURE_STORAGE = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClientVersion {
    Es2,
    Es3,
}

impl ClientVersion {
    pub const fn major(self) -> u32 {
        match self {
            Self::Es2 => 2,
            Self::Es3 => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_format_is_unsupported() {
        let mut caps = TextureCaps::new();
        caps.insert(
            0x8058, // RGBA8
            TextureFormatCaps {
                texturable: true,
                filterable: true,
                renderable: true,
            },
        );
        assert!(caps.get(0x8058).filterable);
        assert_eq!(caps.get(0x8814), TextureFormatCaps::default());
    }

    #[test]
    fn client_versions_order() {
        assert!(ClientVersion::Es2 < ClientVersion::Es3);
        assert_eq!(ClientVersion::Es3.major(), 3);
    }
}
