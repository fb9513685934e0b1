//! # client
//!
//! Leptos + WASM behavior for server-rendered assignment grids.
//!
//! The server renders plain HTML: every assignable cell is a
//! `.slot-grid-item.editable` element carrying `data-*` attributes, and the
//! page embeds its option mapping, save URL and CSRF token as JSON `<script>`
//! blocks. On load this module reads that configuration once, mounts a
//! [`components::slot_grid_item::SlotGridItem`] into each cell, and wires the
//! small page helpers in [`util`].
//!
//! Browser-only code sits behind the `csr` feature so the pure helpers and
//! the cell model compile and test natively.

pub mod attach;
pub mod components;
pub mod net;
pub mod page;
pub mod util;

#[cfg(feature = "csr")]
use wasm_bindgen::JsValue;

/// WASM entry point: attach everything once the document is parsed.
///
/// # Errors
///
/// Malformed page configuration or cell attributes are template bugs; they
/// are logged and thrown to JS instead of being papered over.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| fatal(&page::config::PageError::NoDocument))?;

    if document.ready_state() == web_sys::DocumentReadyState::Loading {
        let deferred = document.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = boot(&deferred) {
                wasm_bindgen::throw_val(fatal(&e));
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }

    boot(&document).map_err(|e| fatal(&e))
}

#[cfg(feature = "csr")]
fn boot(document: &web_sys::Document) -> Result<(), page::config::PageError> {
    util::post_link::attach(document);
    util::upload_form::attach(document);
    util::dialog_launcher::attach(document);
    util::visibility::attach(document);

    let cells = attach::attach_cells(document)?;
    log::info!("attached {cells} assignment cells");
    Ok(())
}

#[cfg(feature = "csr")]
fn fatal(error: &page::config::PageError) -> JsValue {
    log::error!("page init failed: {error}");
    JsValue::from_str(&error.to_string())
}
