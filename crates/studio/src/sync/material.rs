//! Material properties → renderer material

use shared::{MaterialProperties, TextureSlot};

use super::texture_cache::{TextureCache, TextureHandle};

/// Texture bound to one material slot, remembered by its source key
#[derive(Debug, Clone, Default)]
pub struct TextureBinding {
    pub key: Option<String>,
    pub handle: Option<TextureHandle>,
}

impl TextureBinding {
    fn is_loaded_for(&self, key: Option<&str>) -> bool {
        self.key.as_deref() == key && (key.is_none() || self.handle.is_some())
    }
}

/// Mutable renderer-side material
#[derive(Debug, Clone)]
pub struct RenderMaterial {
    /// Properties this material was last synced from
    pub source: MaterialProperties,
    pub textures: [TextureBinding; 5],
}

impl RenderMaterial {
    pub fn texture(&self, slot: TextureSlot) -> Option<&TextureHandle> {
        self.textures[slot.index()].handle.as_ref()
    }
}

/// Bring `previous` in line with `material`. A slot only touches the cache
/// when its key changed or its texture is missing; failed loads leave the
/// slot empty.
pub fn sync_material(
    material: &MaterialProperties,
    previous: Option<RenderMaterial>,
    cache: &mut TextureCache,
) -> RenderMaterial {
    let mut render = previous.unwrap_or_else(|| RenderMaterial {
        source: material.clone(),
        textures: Default::default(),
    });

    for slot in TextureSlot::ALL {
        let key = material.maps.get(slot);
        let binding = &mut render.textures[slot.index()];
        if binding.is_loaded_for(key) {
            continue;
        }
        *binding = TextureBinding {
            key: key.map(str::to_string),
            handle: key.and_then(|k| cache.get_or_load(k)),
        };
    }

    render.source = material.clone();
    render
}
