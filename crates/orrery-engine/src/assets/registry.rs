use std::collections::HashMap;
use std::fmt;
use crate::api::types::TextureId;
use crate::assets::manifest::{TextureManifest, TextureRequest, TextureSource};
use crate::components::material::TextureState;

#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    /// The host could not fetch or decode the image.
    Load { path: String, reason: String },
    UnknownTexture { id: TextureId },
    AlreadyResolved { id: TextureId },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Load { path, reason } => write!(f, "texture {path} failed to load: {reason}"),
            TextureError::UnknownTexture { id } => write!(f, "no texture with id {}", id.0),
            TextureError::AlreadyResolved { id } => write!(f, "texture {} was already resolved", id.0),
        }
    }
}

impl std::error::Error for TextureError {}

#[derive(Debug, Clone)]
struct TextureEntry {
    label: String,
    state: TextureState,
    pixels: Option<Vec<u8>>,
}

/// Tracks every texture the scene uses and its load state.
///
/// Image files are requested from the host and start `Pending`; the host
/// reports back through `resolve`. Procedural textures are `Ready` at once
/// but are still announced so the host uploads them.
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_path: HashMap<String, TextureId>,
    outgoing: Vec<TextureRequest>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_path: HashMap::new(),
            outgoing: Vec::new(),
        }
    }

    /// Request an image file. Repeated paths share one texture.
    pub fn request(&mut self, path: &str) -> TextureId {
        if let Some(&id) = self.by_path.get(path) {
            return id;
        }
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            label: path.to_string(),
            state: TextureState::Pending,
            pixels: None,
        });
        self.by_path.insert(path.to_string(), id);
        self.outgoing.push(TextureRequest {
            id: id.0,
            source: TextureSource::Url { path: path.to_string() },
        });
        id
    }

    /// Register RGBA8 pixels generated in wasm.
    pub fn register_pixels(&mut self, name: &str, width: u32, height: u32, rgba: Vec<u8>) -> TextureId {
        let id = TextureId(self.entries.len() as u32);
        self.entries.push(TextureEntry {
            label: name.to_string(),
            state: TextureState::Ready,
            pixels: Some(rgba),
        });
        self.outgoing.push(TextureRequest {
            id: id.0,
            source: TextureSource::Pixels { width, height },
        });
        id
    }

    /// Drain requests the host has not seen yet.
    pub fn take_requests(&mut self) -> TextureManifest {
        if !self.outgoing.is_empty() {
            log::info!("issuing {} texture request(s)", self.outgoing.len());
        }
        TextureManifest { textures: std::mem::take(&mut self.outgoing) }
    }

    /// Record the host's load outcome for a pending texture.
    ///
    /// A failed load still moves the texture to `Failed` and is reported as
    /// `TextureError::Load` so the caller can apply material fallbacks.
    pub fn resolve(&mut self, id: TextureId, outcome: Result<(), String>) -> Result<(), TextureError> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(TextureError::UnknownTexture { id })?;
        if entry.state != TextureState::Pending {
            return Err(TextureError::AlreadyResolved { id });
        }
        match outcome {
            Ok(()) => {
                entry.state = TextureState::Ready;
                Ok(())
            }
            Err(reason) => {
                entry.state = TextureState::Failed;
                Err(TextureError::Load { path: entry.label.clone(), reason })
            }
        }
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    pub fn label(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.label.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.state == TextureState::Pending).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pixels_ptr(&self, id: TextureId) -> *const u8 {
        self.pixels(id).map_or(std::ptr::null(), |p| p.as_ptr())
    }

    pub fn pixels_len(&self, id: TextureId) -> u32 {
        self.pixels(id).map_or(0, |p| p.len() as u32)
    }

    fn pixels(&self, id: TextureId) -> Option<&[u8]> {
        self.entries.get(id.0 as usize)?.pixels.as_deref()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Soft round point sprite: opaque white core fading to transparent at
/// the edge. Returns `size * size` RGBA8 pixels.
pub fn radial_sprite(size: u32) -> Vec<u8> {
    let half = size as f32 / 2.0;
    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let t = (dx * dx + dy * dy).sqrt() / half;
            let alpha = if t <= 0.2 {
                1.0
            } else if t >= 1.0 {
                0.0
            } else {
                1.0 - (t - 0.2) / 0.8
            };
            rgba.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
        }
    }
    rgba
}
