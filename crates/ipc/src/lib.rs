//! Host message protocol for Vitrine
//!
//! Defines the messages exchanged between the Bevy scene and the host page.
//! The host owns the XR session and forwards controller poses and select
//! events; the scene reports grab state and asset failures back.

mod error;
mod messages;
mod types;

pub use error::IpcError;
pub use messages::{HostToScene, SceneToHost};
pub use types::{GrabSourceInfo, Handedness, XrSessionMode};
