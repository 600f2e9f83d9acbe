//! Tracked XR controllers
//!
//! The host page owns the WebXR session and forwards controller state as
//! [`HostToScene`] messages. This module turns those into entities: one per
//! host input source index, posed at the controller's target ray space, and
//! translates select presses into [`ControllerSelectStart`] /
//! [`ControllerSelectEnd`] for the interaction session.

use std::collections::HashMap;

use bevy::prelude::*;
use vitrine_ipc::{Handedness, HostToScene, XrSessionMode};

use crate::interaction::{ControllerSelectEnd, ControllerSelectStart, InteractionSystems};

/// A controller driven by host pose updates
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedController {
    /// Host input source index
    pub index: u32,
    pub handedness: Handedness,
}

/// Message wrapping one decoded host message
#[derive(Message, Debug, Clone)]
pub struct HostMessage(pub HostToScene);

/// Current XR session as reported by the host
#[derive(Resource, Debug, Default)]
pub struct XrSessionState {
    pub active: bool,
    pub mode: Option<XrSessionMode>,
}

/// Host input source index -> controller entity
#[derive(Resource, Debug, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<u32, Entity>,
}

impl ControllerRegistry {
    pub fn get(&self, index: u32) -> Option<Entity> {
        self.controllers.get(&index).copied()
    }
}

/// Convert a host pose into a transform. The orientation is renormalized.
pub fn pose_transform(position: [f32; 3], orientation: [f32; 4]) -> Transform {
    Transform::from_translation(Vec3::from_array(position))
        .with_rotation(Quat::from_array(orientation).normalize())
}

/// Plugin for host-driven XR controllers
pub struct XrPlugin;

impl Plugin for XrPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<XrSessionState>()
            .init_resource::<ControllerRegistry>()
            .add_message::<HostMessage>()
            .add_systems(Update, apply_host_messages.before(InteractionSystems));
    }
}

fn apply_host_messages(
    mut commands: Commands,
    mut host_messages: MessageReader<HostMessage>,
    mut session: ResMut<XrSessionState>,
    mut registry: ResMut<ControllerRegistry>,
    mut poses: Query<&mut Transform, With<TrackedController>>,
    mut select_start: MessageWriter<ControllerSelectStart>,
    mut select_end: MessageWriter<ControllerSelectEnd>,
) {
    for HostMessage(message) in host_messages.read() {
        match message {
            HostToScene::XrSessionStarted { mode } => {
                session.active = true;
                session.mode = Some(*mode);
                info!("XR session started ({:?})", mode);
            }
            HostToScene::XrSessionEnded => {
                // Every controller goes away; any grab they hold is released
                for (index, controller) in registry.controllers.drain() {
                    select_end.write(ControllerSelectEnd { controller, index });
                    commands.entity(controller).despawn();
                }
                session.active = false;
                session.mode = None;
                info!("XR session ended");
            }
            HostToScene::ControllerPose {
                index,
                handedness,
                position,
                orientation,
            } => {
                let pose = pose_transform(*position, *orientation);
                match registry.get(*index) {
                    Some(controller) => {
                        if let Ok(mut transform) = poses.get_mut(controller) {
                            *transform = pose;
                        } else {
                            // Spawned this frame; overwrite the pending transform
                            commands.entity(controller).insert(pose);
                        }
                    }
                    None => {
                        let controller = commands
                            .spawn((
                                TrackedController {
                                    index: *index,
                                    handedness: *handedness,
                                },
                                pose,
                                Name::new(format!("controller {index}")),
                            ))
                            .id();
                        registry.controllers.insert(*index, controller);
                        info!("Controller {} connected ({:?})", index, handedness);
                    }
                }
            }
            HostToScene::ControllerSelectStart { index } => match registry.get(*index) {
                Some(controller) => {
                    select_start.write(ControllerSelectStart {
                        controller,
                        index: *index,
                    });
                }
                None => warn!("Select-start from controller {} before any pose", index),
            },
            HostToScene::ControllerSelectEnd { index } => {
                if let Some(controller) = registry.get(*index) {
                    select_end.write(ControllerSelectEnd {
                        controller,
                        index: *index,
                    });
                }
            }
            HostToScene::ControllerDisconnected { index } => {
                if let Some(controller) = registry.controllers.remove(index) {
                    select_end.write(ControllerSelectEnd {
                        controller,
                        index: *index,
                    });
                    commands.entity(controller).despawn();
                    info!("Controller {} disconnected", index);
                }
            }
        }
    }
}
