//! Load-failure reporting for scene assets
//!
//! Handles registered with [`WatchedAssets`] are polled each frame. A failed
//! load is logged and reported to the host exactly once, then the handle is
//! forgotten; successfully loaded handles are dropped from the watch list too.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;
use vitrine_ipc::SceneToHost;

use crate::OutboundHostMessages;

/// Error code reported to the host for a failed asset load
pub const ASSET_LOAD_FAILED: &str = "asset_load_failed";

/// Result of checking one watched asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchOutcome {
    Pending,
    Loaded,
    Failed(String),
}

impl From<&LoadState> for WatchOutcome {
    fn from(state: &LoadState) -> Self {
        match state {
            LoadState::NotLoaded | LoadState::Loading => WatchOutcome::Pending,
            LoadState::Loaded => WatchOutcome::Loaded,
            LoadState::Failed(err) => WatchOutcome::Failed(err.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatchedAsset {
    pub label: String,
    pub id: UntypedAssetId,
}

/// Assets whose load outcome has not been seen yet
#[derive(Resource, Debug, Default)]
pub struct WatchedAssets {
    pending: Vec<WatchedAsset>,
}

impl WatchedAssets {
    pub fn watch(&mut self, label: impl Into<String>, id: UntypedAssetId) {
        self.pending.push(WatchedAsset {
            label: label.into(),
            id,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Check every pending asset. Returns `(label, reason)` for each newly
    /// failed one; loaded and failed assets stop being watched.
    pub fn poll(
        &mut self,
        mut outcome_of: impl FnMut(&WatchedAsset) -> WatchOutcome,
    ) -> Vec<(String, String)> {
        let mut failures = Vec::new();
        self.pending.retain(|asset| match outcome_of(asset) {
            WatchOutcome::Pending => true,
            WatchOutcome::Loaded => false,
            WatchOutcome::Failed(reason) => {
                failures.push((asset.label.clone(), reason));
                false
            }
        });
        failures
    }
}

pub struct AssetWatchPlugin;

impl Plugin for AssetWatchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WatchedAssets>()
            .add_systems(Update, report_failed_assets);
    }
}

fn report_failed_assets(
    asset_server: Res<AssetServer>,
    mut watched: ResMut<WatchedAssets>,
    mut outbound: ResMut<OutboundHostMessages>,
) {
    if watched.is_empty() {
        return;
    }

    let failures = watched.poll(|asset| WatchOutcome::from(&asset_server.load_state(asset.id)));
    for (label, reason) in failures {
        error!("Failed to load {}: {}", label, reason);
        outbound.send(SceneToHost::Error {
            code: ASSET_LOAD_FAILED.to_string(),
            message: format!("{label}: {reason}"),
        });
    }
}
