//! Message enums for communication between the scene and its host.

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::types::{GrabSourceInfo, Handedness, XrSessionMode};

/// Messages from the host page to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum HostToScene {
    /// The host entered an XR session
    XrSessionStarted { mode: XrSessionMode },

    /// The XR session ended (user exit or device loss)
    XrSessionEnded,

    /// World-space pose of a tracked controller's target ray space
    ControllerPose {
        index: u32,
        #[serde(default)]
        handedness: Handedness,
        position: [f32; 3],
        /// Quaternion (x, y, z, w)
        orientation: [f32; 4],
    },

    /// Primary action pressed on a controller
    ControllerSelectStart { index: u32 },

    /// Primary action released on a controller
    ControllerSelectEnd { index: u32 },

    /// Controller removed from the session's input sources
    ControllerDisconnected { index: u32 },
}

impl HostToScene {
    /// Parse a message from its JSON encoding
    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let msg: Self = serde_json::from_str(json)?;
        msg.validate()?;
        Ok(msg)
    }

    fn validate(&self) -> Result<(), IpcError> {
        if let HostToScene::ControllerPose {
            position,
            orientation,
            ..
        } = self
        {
            if position.iter().chain(orientation).any(|v| !v.is_finite()) {
                return Err(IpcError::InvalidFormat(
                    "controller pose contains non-finite values".to_string(),
                ));
            }
            let len_sq: f32 = orientation.iter().map(|v| v * v).sum();
            if len_sq < 1e-6 {
                return Err(IpcError::InvalidFormat(
                    "controller orientation is a zero quaternion".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Messages from the scene to the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SceneToHost {
    /// The interactive model was grabbed
    GrabStarted { source: GrabSourceInfo },

    /// The active grab was released
    GrabEnded { source: GrabSourceInfo },

    /// Error notification (asset failures and the like)
    Error { code: String, message: String },
}

impl SceneToHost {
    /// Encode the message as JSON
    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }
}
