use std::fmt;

use card_reveal_core::SettingsError;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug)]
pub enum RevealError {
    Settings(SettingsError),
    MissingGlobal(&'static str),
    Selector { selector: String, detail: String },
    Dom(String),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealError::Settings(err) => write!(f, "invalid settings: {err}"),
            RevealError::MissingGlobal(name) => write!(f, "{name} is not available"),
            RevealError::Selector { selector, detail } => {
                write!(f, "bad selector '{selector}': {detail}")
            }
            RevealError::Dom(detail) => write!(f, "dom error: {detail}"),
        }
    }
}

impl std::error::Error for RevealError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RevealError::Settings(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingsError> for RevealError {
    fn from(err: SettingsError) -> Self {
        RevealError::Settings(err)
    }
}

impl From<JsValue> for RevealError {
    fn from(err: JsValue) -> Self {
        RevealError::Dom(js_err(err))
    }
}

impl From<RevealError> for JsValue {
    fn from(err: RevealError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        if let Some(message) = err.message().as_string() {
            return message;
        }
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
