//! Orbit camera controller
//!
//! Controls:
//! - Left mouse drag: Orbit around target
//! - Right mouse drag: Pan
//! - Scroll wheel: Dolly (zoom)
//!
//! The controller is the "ambient" camera control that a grab disables:
//! while [`OrbitCamera::enabled`] is false, mouse motion and scroll are
//! drained without moving the camera.

use bevy::input::mouse::{MouseButton, MouseMotion, MouseWheel};
use bevy::prelude::*;
use vitrine_config::OrbitSettings;

use crate::interaction::InteractionSystems;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Camera orbit controller state
#[derive(Component)]
pub struct OrbitCamera {
    /// Whether mouse input drives the camera
    pub enabled: bool,
    /// Point the camera orbits around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Horizontal angle (yaw) in radians
    pub yaw: f32,
    /// Vertical angle (pitch) in radians
    pub pitch: f32,
    /// Orbit sensitivity (radians per pixel)
    pub orbit_sensitivity: f32,
    /// Pan sensitivity (units per pixel, scaled by distance)
    pub pan_sensitivity: f32,
    /// Zoom sensitivity (distance units per scroll line)
    pub zoom_sensitivity: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_settings(&OrbitSettings::default())
    }
}

impl OrbitCamera {
    /// Camera facing the wall, slightly above the model, at the given tuning
    pub fn from_settings(settings: &OrbitSettings) -> Self {
        Self {
            enabled: true,
            target: Vec3::new(0.0, 1.0, 0.0),
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.2,
            orbit_sensitivity: settings.orbit_sensitivity,
            pan_sensitivity: settings.pan_sensitivity,
            zoom_sensitivity: settings.zoom_sensitivity,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
        }
    }

    /// Calculate camera position from orbit parameters
    pub fn calculate_position(&self) -> Vec3 {
        // Pitch is measured from the horizontal, yaw around Y
        let horizontal_distance = self.distance * self.pitch.cos();
        let y = self.distance * self.pitch.sin();
        let x = horizontal_distance * self.yaw.sin();
        let z = horizontal_distance * self.yaw.cos();

        self.target + Vec3::new(x, y, z)
    }

    /// Apply an orbit drag in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.orbit_sensitivity;
        self.pitch -= delta.y * self.orbit_sensitivity;
        // Just below straight up/down so the view never flips
        self.pitch = self.pitch.clamp(-1.5, 1.5);
    }

    /// Apply a scroll amount in lines (positive = zoom in)
    pub fn zoom(&mut self, scroll: f32) {
        let zoom_amount = scroll * self.zoom_sensitivity * (self.distance * 0.1);
        self.distance = (self.distance - zoom_amount).clamp(self.min_distance, self.max_distance);
    }
}

/// Plugin for orbit camera controls
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        // Orbit and pan both read MouseMotion, so they run sequentially.
        // Everything runs after interaction so a grab started this frame
        // already blocks the camera.
        app.add_systems(
            Update,
            (
                camera_orbit_system,
                camera_pan_system.after(camera_orbit_system),
                camera_zoom_system,
                update_camera_transform
                    .after(camera_orbit_system)
                    .after(camera_pan_system)
                    .after(camera_zoom_system),
            )
                .after(InteractionSystems),
        );
    }
}

/// Handle orbit (left mouse drag)
fn camera_orbit_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    if !mouse_button.pressed(MouseButton::Left) {
        motion_events.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        if orbit.enabled {
            orbit.orbit(delta);
        }
    }
}

/// Handle pan (right mouse drag)
fn camera_pan_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut OrbitCamera, &Transform)>,
) {
    if !mouse_button.pressed(MouseButton::Right) {
        motion_events.clear();
        return;
    }

    let mut delta = Vec2::ZERO;
    for event in motion_events.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO {
        return;
    }

    for (mut orbit, transform) in camera_query.iter_mut() {
        if !orbit.enabled {
            continue;
        }

        // Pan in camera's local XY plane
        let right = transform.rotation * Vec3::X;
        let up = transform.rotation * Vec3::Y;

        // Scale by distance so panning feels the same at every zoom level
        let pan_scale = orbit.pan_sensitivity * orbit.distance;

        // Negative so it feels like dragging the scene
        let pan_offset = (-right * delta.x + up * delta.y) * pan_scale;
        orbit.target += pan_offset;
    }
}

/// Handle zoom (scroll wheel)
fn camera_zoom_system(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut OrbitCamera>,
) {
    let mut scroll_delta = 0.0;
    for event in scroll_events.read() {
        scroll_delta += event.y;
    }

    if scroll_delta == 0.0 {
        return;
    }

    for mut orbit in camera_query.iter_mut() {
        if orbit.enabled {
            orbit.zoom(scroll_delta);
        }
    }
}

/// Update camera transform from orbit state
fn update_camera_transform(
    mut camera_query: Query<(&OrbitCamera, &mut Transform), With<MainCamera>>,
) {
    for (orbit, mut transform) in camera_query.iter_mut() {
        let position = orbit.calculate_position();
        *transform = Transform::from_translation(position).looking_at(orbit.target, Vec3::Y);
    }
}
