//! The grabbable glTF model

use bevy::prelude::*;
use vitrine_config::VitrineConfig;

use crate::assets::WatchedAssets;
use crate::picking::{INTERACTIVE_MODEL_NAME, InteractiveModel};

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_model);
    }
}

/// Spawn the model's first glTF scene under the tagged root
fn spawn_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<VitrineConfig>,
    mut watched: ResMut<WatchedAssets>,
) {
    let path = config.assets.model.clone();
    let scene: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
    watched.watch(format!("model {path}"), scene.id().untyped());

    commands.spawn((
        SceneRoot(scene),
        Transform::from_xyz(0.0, 1.0, 0.0),
        InteractiveModel,
        Name::new(INTERACTIVE_MODEL_NAME),
    ));

    info!("Loading interactive model from {}", path);
}
