//! First-party half of the Google sign-in flow.
//!
//! The third-party sign-in widget hands over an ID token or an error. A token
//! is POSTed as JSON (`{"token": ...}`) to the current page with the CSRF
//! header, and on `success` the browser follows the page's `next` block.
//! Any failure restores the controls that a `.google-sign-in` click hid and
//! alerts, unless the user closed the popup themselves.
//!
//! Page scripts reach this module through two exports:
//! `completeSignIn(idToken)` and `signInFailed(errorCode)`.

#[cfg(test)]
#[path = "sign_in_test.rs"]
mod sign_in_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::{dialog, visibility};

pub const NEXT_BLOCK: &str = "next";
pub const POPUP_CLOSED: &str = "popup_closed_by_user";
pub const SIGN_IN_ALERT: &str = "There was an issue when signing into Google. Please contact Technology.";

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignInReply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignInOutcome {
    /// Signed in; follow the `next` URL.
    Redirect,
    Failed { error: Option<String> },
}

/// Decode the sign-in endpoint's answer.
pub fn decode_reply(status: u16, body: &str) -> SignInOutcome {
    if !(200..300).contains(&status) {
        log::warn!("sign-in endpoint answered HTTP {status}");
        return SignInOutcome::Failed { error: None };
    }
    match serde_json::from_str::<SignInReply>(body) {
        Ok(reply) if reply.success => SignInOutcome::Redirect,
        Ok(reply) => SignInOutcome::Failed {
            error: reply.error.as_ref().and_then(error_code),
        },
        Err(e) => {
            log::warn!("undecodable sign-in reply: {e}");
            SignInOutcome::Failed { error: None }
        }
    }
}

/// Error code carried either as a bare string or as an object's `error` field.
pub fn error_code(value: &Value) -> Option<String> {
    match value {
        Value::String(code) => Some(code.clone()),
        Value::Object(fields) => fields.get("error").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

pub fn should_alert(error: Option<&str>) -> bool {
    error != Some(POPUP_CLOSED)
}

/// Restore the sign-in controls and alert unless the popup was closed by
/// the user. Returns whether an alert was shown.
pub fn fail(error: Option<&str>) -> bool {
    visibility::set_sign_in_pending(false);
    if !should_alert(error) {
        log::info!("sign-in popup closed by user");
        return false;
    }
    log::warn!("sign-in failed: {}", error.unwrap_or("no error code"));
    dialog::alert(SIGN_IN_ALERT);
    true
}

/// Error hook for the sign-in widget; pass its error code (e.g. `err.error`).
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = signInFailed)]
pub fn sign_in_failed(error: Option<String>) {
    fail(error.as_deref());
}

/// Success hook for the sign-in widget.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = completeSignIn)]
pub fn complete_sign_in(id_token: String) {
    leptos::task::spawn_local(async move {
        if let Err(e) = run_sign_in(&id_token).await {
            log::error!("sign-in aborted: {e:?}");
            fail(None);
        }
    });
}

#[cfg(feature = "csr")]
async fn run_sign_in(id_token: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsValue;

    use crate::page::config::{read_block, read_csrf_token, script_blocks};

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let (csrf_token, next) = {
        let blocks = script_blocks(&document);
        let config_error = |e: crate::page::config::PageError| JsValue::from_str(&e.to_string());
        (
            read_csrf_token(&blocks).map_err(config_error)?,
            read_block::<String>(&blocks, NEXT_BLOCK).map_err(config_error)?,
        )
    };
    let url = window.location().href()?;

    let request = gloo_net::http::Request::post(&url)
        .header(slots::CSRF_HEADER, &csrf_token)
        .header("Accept", "application/json")
        .json(&SignInRequest { token: id_token })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let response = request.send().await.map_err(|e| JsValue::from_str(&e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| JsValue::from_str(&e.to_string()))?;

    match decode_reply(status, &body) {
        SignInOutcome::Redirect => window.location().set_href(&next),
        SignInOutcome::Failed { error } => {
            fail(error.as_deref());
            Ok(())
        }
    }
}
