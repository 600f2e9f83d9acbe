//! Vitrine Bevy WASM Build
//!
//! This crate compiles the showroom to WebAssembly. The scene renders into a
//! canvas on the host page; the page runs the WebXR session and exchanges
//! JSON messages with the scene through the bridge.

use bevy::prelude::*;
use vitrine_config::VitrineConfig;
use vitrine_scene::{HostMessage, OutboundHostMessages, ScenePlugin};
use wasm_bindgen::prelude::*;

mod bridge;

const CANVAS_SELECTOR: &str = "#vitrine-canvas";

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if let Err(e) = bridge::init_bridge() {
        web_sys::console::error_2(&"Failed to initialize host bridge:".into(), &e);
    }

    App::new()
        .insert_resource(load_config())
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        canvas: Some(CANVAS_SELECTOR.to_string()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .add_plugins(ScenePlugin)
        .add_plugins(HostBridgePlugin)
        .run();
}

/// Configuration embedded by the host page, falling back to defaults
fn load_config() -> VitrineConfig {
    let Some(json) = bridge::canvas_config(CANVAS_SELECTOR) else {
        return VitrineConfig::default();
    };
    match VitrineConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("Ignoring invalid data-config: {e}").into());
            VitrineConfig::default()
        }
    }
}

/// Plugin moving messages between the host page and the scene
pub struct HostBridgePlugin;

impl Plugin for HostBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, forward_host_messages)
            .add_systems(PostUpdate, flush_outbound_messages);
    }
}

/// Feed queued host messages into the scene
fn forward_host_messages(mut host_messages: MessageWriter<HostMessage>) {
    while let Some(msg) = bridge::poll_host_message() {
        host_messages.write(HostMessage(msg));
    }
}

/// Deliver everything the scene queued this frame
fn flush_outbound_messages(mut outbound: ResMut<OutboundHostMessages>) {
    for msg in outbound.drain() {
        if let Err(e) = bridge::send_to_host(&msg) {
            warn!("Failed to send {:?} to host: {:?}", msg, e);
        }
    }
}
