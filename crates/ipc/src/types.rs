//! Shared XR and interaction types.

use serde::{Deserialize, Serialize};

/// Which hand a tracked input source is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    #[default]
    None,
    Left,
    Right,
}

/// Kind of XR session the host negotiated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum XrSessionMode {
    #[default]
    ImmersiveVr,
    ImmersiveAr,
    Inline,
}

/// What started a grab, as reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GrabSourceInfo {
    Mouse,
    Controller { index: u32 },
}
