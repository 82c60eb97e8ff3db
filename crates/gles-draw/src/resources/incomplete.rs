use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use tracing::debug;

use super::{Texture, TextureTarget};
use crate::device::Device;
use crate::error::DeviceError;

/// Opaque black. Sampling an incomplete texture must return `(0, 0, 0, 1)`.
pub const PLACEHOLDER_TEXEL: [u8; 4] = [0, 0, 0, 255];

/// Creation parameters for the 1x1 texture substituted for incomplete bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderTextureDesc {
    pub target: TextureTarget,
    pub width: u32,
    pub height: u32,
    pub depth_or_layers: u32,
    /// Faces to fill with `texel`; 6 for cube maps.
    pub faces: u32,
    pub texel: [u8; 4],
}

impl PlaceholderTextureDesc {
    pub fn for_target(target: TextureTarget) -> Self {
        Self {
            target,
            width: 1,
            height: 1,
            depth_or_layers: 1,
            faces: if target == TextureTarget::CubeMap { 6 } else { 1 },
            texel: PLACEHOLDER_TEXEL,
        }
    }
}

/// At most one placeholder texture per target, created on first use and kept until the device
/// is replaced.
#[derive(Default)]
pub struct IncompleteTextureCache {
    textures: HashMap<TextureTarget, Box<dyn Texture>>,
}

impl IncompleteTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, target: TextureTarget) -> bool {
        self.textures.contains_key(&target)
    }

    pub fn get_or_create<D: Device + ?Sized>(
        &mut self,
        target: TextureTarget,
        device: &mut D,
    ) -> Result<&dyn Texture, DeviceError> {
        let texture = match self.textures.entry(target) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let desc = PlaceholderTextureDesc::for_target(target);
                let texture = device.create_placeholder_texture(&desc)?;
                debug!(
                    ?target,
                    serial = texture.serial().0,
                    "created incomplete-texture placeholder"
                );
                entry.insert(texture)
            }
        };
        Ok(&**texture)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drop every placeholder. Called when the device they were created on goes away.
    pub fn clear(&mut self) {
        self.textures.clear();
    }
}
