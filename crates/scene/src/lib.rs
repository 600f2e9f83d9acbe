//! Shared showroom scene for Vitrine
//!
//! This crate provides the 3D scene used by both the native Bevy app and
//! the WASM build: a textured wall, reflective floor, HDR-lit glTF model,
//! orbit camera, and the grab-and-rotate interaction driven by the mouse or
//! host-forwarded XR controllers.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use vitrine_config::VitrineConfig;
use vitrine_ipc::SceneToHost;

mod assets;
mod camera;
mod floor;
mod interaction;
mod lighting;
mod model;
mod picking;
mod pulse;
mod wall;
mod xr;

pub use assets::{AssetWatchPlugin, WatchOutcome, WatchedAssets, ASSET_LOAD_FAILED};
pub use camera::{CameraControllerPlugin, MainCamera, OrbitCamera};
pub use floor::{FloorPlugin, ReflectiveFloor};
pub use interaction::{
    apply_drag_rotation, ControllerSelectEnd, ControllerSelectStart, DragRotation, GrabEnd,
    GrabSource, GrabStart, InteractionPhase, InteractionPlugin, InteractionSession,
    InteractionSystems,
};
pub use lighting::{KeyLight, LightingPlugin, LightingSettings};
pub use model::ModelPlugin;
pub use picking::{
    controller_ray, ndc_to_ray, pointer_to_ndc, resolve_target, screen_ray, InteractiveModel,
    ModelPicker, PickHit, SceneHierarchy, INTERACTIVE_MODEL_NAME,
};
pub use pulse::{pulse_factor, EmissivePulse, PulsePlugin};
pub use wall::{wall_size_for_aspect, WallPlane, WallPlugin};
pub use xr::{ControllerRegistry, HostMessage, TrackedController, XrPlugin, XrSessionState};

/// Resource for queuing messages to send to the host
/// The platform layer (app or app-wasm crate) should drain this and deliver it
#[derive(Resource, Default)]
pub struct OutboundHostMessages {
    pub messages: Vec<SceneToHost>,
}

impl OutboundHostMessages {
    /// Queue a message to be sent to the host
    pub fn send(&mut self, msg: SceneToHost) {
        self.messages.push(msg);
    }

    /// Take all queued messages, leaving the queue empty
    pub fn drain(&mut self) -> Vec<SceneToHost> {
        std::mem::take(&mut self.messages)
    }
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VitrineConfig>();
        app.init_resource::<OutboundHostMessages>();

        app.add_plugins(AssetWatchPlugin);
        app.add_plugins(CameraControllerPlugin);
        app.add_plugins(LightingPlugin);
        app.add_plugins(WallPlugin);
        app.add_plugins(FloorPlugin);
        app.add_plugins(ModelPlugin);
        app.add_plugins(PulsePlugin);
        app.add_plugins(InteractionPlugin);
        app.add_plugins(XrPlugin);

        app.add_systems(Startup, setup_camera);
    }
}

/// Spawn the main camera with orbit controls and image-based lighting
fn setup_camera(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<VitrineConfig>,
    lighting_settings: Res<LightingSettings>,
    mut watched: ResMut<WatchedAssets>,
) {
    // Reinhard needs no tonemapping LUTs, so the same camera works on WebGL2
    let orbit_camera = OrbitCamera::from_settings(&config.orbit);
    let camera_position = orbit_camera.calculate_position();
    let camera = (
        Camera3d::default(),
        Transform::from_translation(camera_position).looking_at(orbit_camera.target, Vec3::Y),
        Tonemapping::Reinhard,
        lighting::environment_map_light(&asset_server, &config.assets, &lighting_settings, &mut watched),
        MainCamera,
        orbit_camera,
    );

    #[cfg(feature = "reflections")]
    let camera = (camera, floor::reflection_camera_bundle());

    commands.spawn(camera);

    info!("Showroom scene initialized");
}
