use glam::Vec2;
use crate::api::types::{EntityId, GameEvent, TextureId, Viewport};
use crate::assets::registry::{TextureError, TextureRegistry};
use crate::components::material::TextureApplied;
use crate::components::mesh::{Color, Shape};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::ThrottleConfig;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{Camera3D, CameraConfig};
use crate::renderer::controls::{ControlsConfig, OrbitControls};
use crate::renderer::geometry::GeometryLibrary;
use crate::bridge::protocol::DEFAULT_MAX_LIGHTS;
use crate::systems::lighting::LightState;
use crate::systems::picking::{pick_nearest, pointer_to_ndc, PickHit, Tooltip};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport, replaced by the first host resize.
    pub viewport: Viewport,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of directional lights (default: 4).
    pub max_lights: usize,
    /// Fixed RNG seed. `None` lets the host pick one (wall clock).
    pub seed: Option<u64>,
    pub throttle: ThrottleConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            max_instances: 512,
            max_events: 32,
            max_lights: DEFAULT_MAX_LIGHTS,
            seed: None,
            throttle: ThrottleConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame tick. Only called for frames the throttle admits.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Pointer moved to `pointer` (canvas CSS px). Runs outside the frame
    /// loop so hover feedback reflects the latest transforms.
    fn hover(&mut self, _ctx: &mut EngineContext, _pointer: Vec2) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub geometry: GeometryLibrary,
    pub textures: TextureRegistry,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    pub lights: LightState,
    pub background: Color,
    pub viewport: Viewport,
    pub tooltip: Tooltip,
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let camera = Camera3D::new(&config.camera, config.viewport.aspect());
        let controls = OrbitControls::new(config.controls, &camera);
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            geometry: GeometryLibrary::new(),
            textures: TextureRegistry::new(),
            camera,
            controls,
            lights: LightState::with_capacity(config.max_lights),
            background: Color::BLACK,
            viewport: config.viewport,
            tooltip: Tooltip::default(),
            rng: Rng::new(seed),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.camera.resize(width, height);
    }

    /// Reset the camera to the pose the controls saved at startup.
    pub fn reset_view(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    /// Apply a host texture load outcome to the registry and to every
    /// material bound to that texture. Returns how many materials were
    /// swapped for their fallback.
    pub fn resolve_texture(&mut self, id: TextureId, outcome: Result<(), String>) -> usize {
        let loaded = match self.textures.resolve(id, outcome) {
            Ok(()) => {
                log::debug!("texture {} ready", self.textures.label(id).unwrap_or("?"));
                true
            }
            Err(err @ TextureError::Load { .. }) => {
                log::error!("{err}");
                false
            }
            Err(err) => {
                log::error!("{err}");
                return 0;
            }
        };
        let mut replaced = 0;
        for entity in self.scene.iter_mut() {
            let Some(mesh) = entity.mesh.as_mut() else {
                continue;
            };
            if mesh.material.apply_texture(id, loaded) == TextureApplied::Replaced {
                log::warn!("{}: fallback material in place of texture {}", entity.tag, id.0);
                replaced += 1;
            }
        }
        replaced
    }

    /// Nearest of `candidates` under the pointer, tested against each
    /// entity's current world position and bounding sphere.
    pub fn pick(&self, pointer: Vec2, candidates: &[EntityId]) -> Option<PickHit> {
        let ray = self.camera.ray_from_ndc(pointer_to_ndc(pointer, self.viewport));
        let spheres = candidates.iter().filter_map(|&id| {
            let entity = self.scene.get(id)?;
            let mesh = entity.mesh.as_ref()?;
            if !entity.visible {
                return None;
            }
            let radius = match mesh.shape {
                Shape::Sphere { radius } => radius * entity.scale.max_element(),
                _ => return None,
            };
            Some((id, entity.pos, radius))
        });
        pick_nearest(&ray, spheres)
    }
}
