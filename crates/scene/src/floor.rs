//! Reflective showroom floor
//!
//! The floor itself is a glossy metallic plane that picks up the environment
//! map everywhere. With the `reflections` feature the main camera also gets
//! screen-space reflections, which need the deferred prepass and are not
//! available on WebGL2.

use bevy::prelude::*;

/// Marker for the floor plane
#[derive(Component)]
pub struct ReflectiveFloor;

const FLOOR_SIZE: f32 = 40.0;

pub struct FloorPlugin;

impl Plugin for FloorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_floor);
    }
}

fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.05, 0.06),
            metallic: 0.9,
            perceptual_roughness: 0.08,
            reflectance: 0.8,
            ..default()
        })),
        ReflectiveFloor,
        Name::new("Floor"),
    ));
}

/// Camera components enabling screen-space reflections
#[cfg(feature = "reflections")]
pub fn reflection_camera_bundle() -> impl Bundle {
    use bevy::core_pipeline::prepass::{DeferredPrepass, DepthPrepass};
    use bevy::pbr::ScreenSpaceReflections;

    (
        ScreenSpaceReflections::default(),
        DepthPrepass,
        DeferredPrepass,
        // Deferred rendering does not support MSAA
        Msaa::Off,
    )
}
