use thiserror::Error;
use wasm_bindgen::JsValue;

/// Reasons the background could not attach to the page. None of these
/// reach the page: `start` logs them and hands back an inert handle.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a <canvas>")]
    NotACanvas(String),
    #[error("canvas has no 2d rendering context")]
    NoContext,
    #[error("particle field refused to start")]
    NotStarted,
    #[error("javascript exception: {0}")]
    Js(String),
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("drawing call failed: {0}")]
    Draw(String),
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("could not request an animation frame: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Best effort text for a thrown javascript value.
pub fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Js(js_message(&value))
    }
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        SurfaceError::Draw(js_message(&value))
    }
}

impl From<JsValue> for ScheduleError {
    fn from(value: JsValue) -> Self {
        ScheduleError::Rejected(js_message(&value))
    }
}
