//! Links that open an in-page `<dialog>` as a modal.
//!
//! `a.dialogLauncher` names its dialog with `href="#<id>"`. The modal is
//! sized to the window less a fixed margin, and `.dialogHide` elements stay
//! hidden until it closes. `div#content` starts hidden in the page template
//! and is revealed once launchers are wired.

#[cfg(test)]
#[path = "dialog_launcher_test.rs"]
mod dialog_launcher_test;

use std::collections::BTreeSet;

pub const LAUNCHER_SELECTOR: &str = "a.dialogLauncher";
pub const HIDE_WHILE_OPEN_SELECTOR: &str = ".dialogHide";
pub const CONTENT_SELECTOR: &str = "div#content";
pub const WINDOW_MARGIN_PX: f64 = 50.0;

/// Dialog id named by a launcher's raw `href` attribute.
pub fn target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Distinct dialog ids named by a set of launcher hrefs, in id order.
pub fn dialog_ids<'a>(hrefs: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    hrefs
        .into_iter()
        .filter_map(target_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Modal `(width, height)` in px for a window of the given size.
pub fn modal_size(window_width: f64, window_height: f64) -> (f64, f64) {
    (
        (window_width - WINDOW_MARGIN_PX).max(0.0),
        (window_height - WINDOW_MARGIN_PX).max(0.0),
    )
}

#[cfg(feature = "csr")]
pub fn attach(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;

    use crate::util::{dom, visibility};

    let launchers = match dom::elements::<web_sys::Element>(document, LAUNCHER_SELECTOR) {
        Ok(launchers) => launchers,
        Err(e) => {
            log::warn!("dialog launchers: {e}");
            return;
        }
    };

    let hrefs = launchers
        .iter()
        .map(|launcher| launcher.get_attribute("href").unwrap_or_default())
        .collect::<Vec<_>>();
    for id in dialog_ids(hrefs.iter().map(String::as_str)) {
        match document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlDialogElement>().ok())
        {
            Some(dialog) => dom::listen(&dialog, "close", |_| {
                visibility::show_matching(HIDE_WHILE_OPEN_SELECTOR, true);
            }),
            None => log::warn!("dialog launcher target #{id} is not a <dialog>"),
        }
    }

    for (launcher, href) in launchers.iter().zip(hrefs) {
        dom::listen(launcher, "click", move |ev| {
            ev.prevent_default();
            if let Err(e) = open(&href) {
                log::warn!("could not open dialog '{href}': {e:?}");
            }
        });
    }

    visibility::show_matching(CONTENT_SELECTOR, true);
}

#[cfg(feature = "csr")]
fn open(href: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let id = target_id(href).ok_or_else(|| JsValue::from_str("href does not name a dialog"))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let dialog = window
        .document()
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| JsValue::from_str("no such element"))?
        .dyn_into::<web_sys::HtmlDialogElement>()?;

    let (width, height) = modal_size(
        window.inner_width()?.as_f64().unwrap_or_default(),
        window.inner_height()?.as_f64().unwrap_or_default(),
    );
    let style = dialog.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{height}px"))?;

    if !dialog.open() {
        dialog.show_modal()?;
    }
    crate::util::visibility::show_matching(HIDE_WHILE_OPEN_SELECTOR, false);
    Ok(())
}
