pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, GeometryId, TextureId, Viewport};
pub use components::entity::Entity;
pub use components::material::{Material, MaterialKind, TextureApplied, TextureFallback, TextureState};
pub use components::mesh::{Color, MeshComponent, Shape};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{FrameThrottle, ThrottleConfig};
pub use renderer::camera::{Camera3D, CameraConfig};
pub use renderer::controls::{ControlsConfig, OrbitControls};
pub use renderer::geometry::{GeometryError, GeometryLibrary, MeshVertex, Topology, RING_SEGMENTS};
pub use renderer::instance::{FrameUniforms, MeshInstance, RenderBuffer};
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use assets::manifest::{TextureManifest, TextureRequest, TextureSource};
pub use assets::registry::{radial_sprite, TextureError, TextureRegistry};
pub use bridge::protocol::{ProtocolLayout, LIGHT_FLOATS, DEFAULT_MAX_LIGHTS};
pub use systems::lighting::{AmbientLight, DirectionalLight, LightState};
pub use systems::picking::{PickHit, Ray, Tooltip};

pub use extensions::{TransformGraph, LocalTransform};
