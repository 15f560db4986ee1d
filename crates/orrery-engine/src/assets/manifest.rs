use serde::{Deserialize, Serialize};

/// Where the host gets a texture's pixels from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum TextureSource {
    /// Fetch and decode an image file, relative to the page.
    Url { path: String },
    /// RGBA8 pixels already in wasm memory, read via the pixel accessors.
    Pixels { width: u32, height: u32 },
}

/// One texture the host should upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRequest {
    pub id: u32,
    #[serde(flatten)]
    pub source: TextureSource,
}

/// Batch of texture requests handed to the host as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(default)]
    pub textures: Vec<TextureRequest>,
}

impl TextureManifest {
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
