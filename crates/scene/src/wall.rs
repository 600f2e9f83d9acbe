//! Textured backdrop wall that tracks the window aspect ratio

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use vitrine_config::VitrineConfig;

use crate::assets::WatchedAssets;
use crate::pulse::EmissivePulse;

/// Backdrop wall. Width is derived from the window aspect ratio.
#[derive(Component, Debug, Clone, Copy)]
pub struct WallPlane {
    pub height: f32,
}

impl Default for WallPlane {
    fn default() -> Self {
        Self { height: 6.0 }
    }
}

/// Distance of the wall behind the model along -Z
const WALL_DEPTH: f32 = -4.0;

/// Wall dimensions for a viewport aspect ratio (width / height).
///
/// `None` for a non-finite or non-positive aspect or height.
pub fn wall_size_for_aspect(height: f32, aspect: f32) -> Option<Vec2> {
    if !(height.is_finite() && aspect.is_finite()) || height <= 0.0 || aspect <= 0.0 {
        return None;
    }
    Some(Vec2::new(height * aspect, height))
}

pub struct WallPlugin;

impl Plugin for WallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_wall)
            .add_systems(Update, resize_wall);
    }
}

fn spawn_wall(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<VitrineConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut watched: ResMut<WatchedAssets>,
) {
    let wall = WallPlane::default();
    let aspect = windows
        .single()
        .ok()
        .map(|window| window.width() / window.height())
        .filter(|aspect| aspect.is_finite() && *aspect > 0.0)
        .or_else(|| config.display.aspect_ratio())
        .unwrap_or(16.0 / 9.0);
    let size = wall_size_for_aspect(wall.height, aspect).unwrap_or(Vec2::splat(wall.height));

    let texture: Handle<Image> = asset_server.load(config.assets.wall_texture.clone());
    watched.watch("wall texture", texture.id().untyped());

    let pulse = EmissivePulse::default();
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(size.x, size.y))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            emissive: pulse.base,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, wall.height / 2.0, WALL_DEPTH),
        wall,
        pulse,
        Name::new("Wall"),
    ));

    info!("Wall spawned at {}x{}", size.x, size.y);
}

/// Rebuild the wall geometry when the primary window changes size
fn resize_wall(
    mut resize_events: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut walls: Query<(&WallPlane, &mut Mesh3d)>,
) {
    let Ok(primary) = primary.single() else {
        resize_events.clear();
        return;
    };

    // Only the final size this frame matters
    let Some(event) = resize_events.read().filter(|e| e.window == primary).last() else {
        return;
    };

    let aspect = event.width / event.height;
    for (wall, mut mesh) in walls.iter_mut() {
        let Some(size) = wall_size_for_aspect(wall.height, aspect) else {
            debug!("Ignoring resize to {}x{}", event.width, event.height);
            continue;
        };
        mesh.0 = meshes.add(Rectangle::new(size.x, size.y));
        debug!("Wall resized to {}x{}", size.x, size.y);
    }
}
