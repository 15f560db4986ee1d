use crate::api::types::TextureId;
use crate::components::mesh::Color;

/// Shading model, mirrored by the WebGPU pipelines on the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Lit by ambient + directional lights, plus emissive term.
    Standard = 0,
    /// Unlit: output is `color` (times texture, if any).
    Basic = 1,
    /// Screen-aligned point sprites.
    Points = 2,
}

/// Load state of a texture bound to a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Pending,
    Ready,
    Failed,
}

/// What a material does when its texture fails to load.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureFallback {
    /// Keep rendering with the flat `color`.
    KeepColor,
    /// Swap the whole material for another one.
    Replace(Box<Material>),
}

/// Effect of a texture load outcome on one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureApplied {
    /// Not bound to that texture, or already resolved.
    Unbound,
    Ready,
    /// Load failed; the flat color stays.
    KeptColor,
    /// Load failed; the material was swapped for its fallback.
    Replaced,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub id: TextureId,
    pub state: TextureState,
    pub fallback: TextureFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub color: Color,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub double_sided: bool,
    /// Point size in world units (Points only).
    pub point_size: f32,
    pub texture: Option<TextureBinding>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            color: Color::WHITE,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            opacity: 1.0,
            double_sided: false,
            point_size: 1.0,
            texture: None,
        }
    }
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn basic(color: Color) -> Self {
        Self {
            kind: MaterialKind::Basic,
            color,
            ..Default::default()
        }
    }

    pub fn points(color: Color, size: f32) -> Self {
        Self {
            kind: MaterialKind::Points,
            color,
            point_size: size,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    /// Bind a texture that is still loading; the flat color is used until then.
    pub fn with_texture(mut self, id: TextureId, fallback: TextureFallback) -> Self {
        self.texture = Some(TextureBinding {
            id,
            state: TextureState::Pending,
            fallback,
        });
        self
    }

    /// Bind a texture that is already available (procedural pixels).
    pub fn with_ready_texture(mut self, id: TextureId) -> Self {
        self.texture = Some(TextureBinding {
            id,
            state: TextureState::Ready,
            fallback: TextureFallback::KeepColor,
        });
        self
    }

    /// Texture the renderer should sample, if one is bound and loaded.
    pub fn active_texture(&self) -> Option<TextureId> {
        match &self.texture {
            Some(binding) if binding.state == TextureState::Ready => Some(binding.id),
            _ => None,
        }
    }

    /// Apply a load outcome for texture `id` in place.
    pub fn apply_texture(&mut self, id: TextureId, loaded: bool) -> TextureApplied {
        let Some(binding) = self.texture.as_mut() else {
            return TextureApplied::Unbound;
        };
        if binding.id != id || binding.state != TextureState::Pending {
            return TextureApplied::Unbound;
        }
        if loaded {
            binding.state = TextureState::Ready;
            return TextureApplied::Ready;
        }
        binding.state = TextureState::Failed;
        if let TextureFallback::Replace(replacement) = &binding.fallback {
            *self = (**replacement).clone();
            return TextureApplied::Replaced;
        }
        TextureApplied::KeptColor
    }
}
