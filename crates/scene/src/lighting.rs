//! Showroom lighting: key light, ambient fill, and the HDR environment map

use bevy::light::{EnvironmentMapLight, GlobalAmbientLight};
use bevy::prelude::*;
use vitrine_config::AssetPaths;

use crate::assets::WatchedAssets;

/// Marker component for the key directional light
#[derive(Component)]
pub struct KeyLight;

/// Lighting parameters for the showroom, read once when the scene starts
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LightingSettings {
    /// Direction towards the light (normalized on use)
    pub key_direction: [f32; 3],
    pub key_color: [f32; 3],
    /// Illuminance in lux
    pub key_intensity: f32,
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Scale applied to the environment map
    pub environment_intensity: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            key_direction: [0.4, 1.0, 0.6],
            key_color: [1.0, 0.96, 0.9],
            key_intensity: 8_000.0,
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 150.0,
            environment_intensity: 900.0,
        }
    }
}

impl LightingSettings {
    /// Key light transform; the light shines along `-key_direction`
    pub fn key_transform(&self) -> Transform {
        let direction = Vec3::from_array(self.key_direction).normalize_or(Vec3::Y);
        Transform::default().looking_to(-direction, Vec3::Y)
    }
}

/// Plugin for scene lighting
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LightingSettings>()
            .add_systems(Startup, setup_lighting);
    }
}

/// Spawn the key light and set the ambient fill
fn setup_lighting(mut commands: Commands, settings: Res<LightingSettings>) {
    let [r, g, b] = settings.key_color;
    commands.spawn((
        DirectionalLight {
            illuminance: settings.key_intensity,
            color: Color::srgb(r, g, b),
            shadows_enabled: true,
            ..default()
        },
        settings.key_transform(),
        KeyLight,
        Name::new("Key Light"),
    ));

    // Global ambient light is a resource, not an entity
    let [r, g, b] = settings.ambient_color;
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(r, g, b),
        brightness: settings.ambient_intensity,
        ..default()
    });

    info!("Scene lighting initialized");
}

/// Image-based lighting from the configured prefiltered cubemaps
pub fn environment_map_light(
    asset_server: &AssetServer,
    paths: &AssetPaths,
    settings: &LightingSettings,
    watched: &mut WatchedAssets,
) -> EnvironmentMapLight {
    let diffuse_map: Handle<Image> = asset_server.load(paths.environment_diffuse.clone());
    let specular_map: Handle<Image> = asset_server.load(paths.environment_specular.clone());
    watched.watch("environment diffuse", diffuse_map.id().untyped());
    watched.watch("environment specular", specular_map.id().untyped());

    EnvironmentMapLight {
        diffuse_map,
        specular_map,
        intensity: settings.environment_intensity,
        ..default()
    }
}
