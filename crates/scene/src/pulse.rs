//! Time-driven emissive pulse for materials

use bevy::prelude::*;

/// Modulates the emissive colour of the entity's `StandardMaterial` over time
#[derive(Component, Debug, Clone, Copy)]
pub struct EmissivePulse {
    /// Emissive colour at the top of the pulse
    pub base: LinearRgba,
    /// Angular speed in radians per second
    pub speed: f32,
}

impl Default for EmissivePulse {
    fn default() -> Self {
        Self {
            base: LinearRgba::rgb(0.15, 0.12, 0.08),
            speed: 1.5,
        }
    }
}

/// Pulse strength in [0, 1] at `elapsed` seconds
pub fn pulse_factor(elapsed: f32, speed: f32) -> f32 {
    0.5 + 0.5 * (elapsed * speed).sin()
}

pub struct PulsePlugin;

impl Plugin for PulsePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_emissive_pulse);
    }
}

fn animate_emissive_pulse(
    time: Res<Time>,
    pulses: Query<(&EmissivePulse, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let elapsed = time.elapsed_secs();
    for (pulse, material) in pulses.iter() {
        if let Some(material) = materials.get_mut(&material.0) {
            material.emissive = pulse.base * pulse_factor(elapsed, pulse.speed);
        }
    }
}
