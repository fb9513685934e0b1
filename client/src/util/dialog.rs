//! Blocking user notifications.

/// Show `message` in a blocking browser alert.
///
/// Outside the browser the message is only logged.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
            return;
        }
    }
    log::warn!("alert: {message}");
}
