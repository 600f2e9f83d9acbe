//! Vitrine - native Bevy showroom

use bevy::prelude::*;
use bevy::window::WindowResolution;
use vitrine_config::VitrineConfig;
use vitrine_scene::{OutboundHostMessages, ScenePlugin};

fn main() {
    // Parse configuration from environment
    let config = VitrineConfig::from_env();

    info!("Starting Vitrine with model {}", config.assets.model);

    let window_config = Window {
        title: "Vitrine".into(),
        resolution: WindowResolution::new(config.display.width, config.display.height)
            .with_scale_factor_override(config.display.scale),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    App::new()
        .insert_resource(config)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window_config),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .add_plugins(ScenePlugin)
        .add_systems(PostUpdate, log_outbound_messages)
        .run();
}

/// There is no host page natively; report what would have been sent
fn log_outbound_messages(mut outbound: ResMut<OutboundHostMessages>) {
    for msg in outbound.drain() {
        match msg.to_json() {
            Ok(json) => info!("scene -> host: {}", json),
            Err(e) => warn!("Failed to encode {:?}: {}", msg, e),
        }
    }
}
