//! JavaScript bridge to the host page
//!
//! The host page owns the WebXR session. It forwards controller state as
//! `vitrine:host-to-scene` CustomEvents whose `detail` is a JSON-encoded
//! `HostToScene`; the scene answers with `vitrine:scene-to-host` events.

use std::cell::RefCell;
use std::collections::VecDeque;

use vitrine_ipc::{HostToScene, SceneToHost};
use wasm_bindgen::prelude::*;

const HOST_TO_SCENE_EVENT: &str = "vitrine:host-to-scene";
const SCENE_TO_HOST_EVENT: &str = "vitrine:scene-to-host";

thread_local! {
    /// Queue of messages received from the host
    static MESSAGE_QUEUE: RefCell<VecDeque<HostToScene>> = RefCell::new(VecDeque::new());
}

fn global_window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Register the host event listener
pub fn init_bridge() -> Result<(), JsValue> {
    let window = global_window()?;

    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            web_sys::console::warn_1(&"Host message without a string detail".into());
            return;
        };
        match HostToScene::from_json(&detail) {
            Ok(msg) => MESSAGE_QUEUE.with(|queue| queue.borrow_mut().push_back(msg)),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to parse host message: {}", e).into());
            }
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(HOST_TO_SCENE_EVENT, closure.as_ref().unchecked_ref())?;

    // The listener lives as long as the page
    closure.forget();

    web_sys::console::log_1(&"Vitrine host bridge initialized".into());
    Ok(())
}

/// Poll for the next message from the host (non-blocking)
pub fn poll_host_message() -> Option<HostToScene> {
    MESSAGE_QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

/// Dispatch a message to the host page
pub fn send_to_host(msg: &SceneToHost) -> Result<(), JsValue> {
    let json = msg
        .to_json()
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize scene message: {e}")))?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));
    let event = web_sys::CustomEvent::new_with_event_init_dict(SCENE_TO_HOST_EVENT, &init)?;

    global_window()?.dispatch_event(&event)?;
    Ok(())
}

/// JSON configuration from the canvas element's `data-config` attribute
pub fn canvas_config(selector: &str) -> Option<String> {
    global_window()
        .ok()?
        .document()?
        .query_selector(selector)
        .ok()??
        .get_attribute("data-config")
}
