//! Show/hide element pairs toggled while a page action is pending.
//!
//! Elements marked `hide-during-*` are hidden and `show-during-*` shown while
//! the action is active, and the reverse afterwards.

#[cfg(test)]
#[path = "visibility_test.rs"]
mod visibility_test;

/// Class pair toggled together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TogglePair {
    pub hide_class: &'static str,
    pub show_class: &'static str,
}

pub const SIGN_IN: TogglePair = TogglePair {
    hide_class: "hide-during-sign-in",
    show_class: "show-during-sign-in",
};

pub const SORT: TogglePair = TogglePair {
    hide_class: "hide-during-sort",
    show_class: "show-during-sort",
};

pub const SIGN_IN_TRIGGER: &str = ".google-sign-in";
pub const SORT_ENABLE_TRIGGER: &str = ".enable-icon-sort";
pub const SORT_SAVE_TRIGGER: &str = ".save-icon-order";

/// CSS `display` value for a visible or hidden element.
pub fn display_value(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

impl TogglePair {
    /// `(selector, display)` to apply to each class of the pair.
    pub fn displays(&self, active: bool) -> [(String, &'static str); 2] {
        [
            (format!(".{}", self.hide_class), display_value(!active)),
            (format!(".{}", self.show_class), display_value(active)),
        ]
    }
}

pub fn set_sign_in_pending(pending: bool) {
    apply(SIGN_IN, pending);
}

pub fn set_sort_active(active: bool) {
    apply(SORT, active);
}

/// Set inline `display` on every element of `pair`.
pub fn apply(pair: TogglePair, active: bool) {
    for (selector, display) in pair.displays(active) {
        set_display(&selector, display);
    }
}

/// Show or hide every element matching `selector`.
pub fn show_matching(selector: &str, visible: bool) {
    set_display(selector, display_value(visible));
}

fn set_display(selector: &str, display: &str) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for index in 0..nodes.length() {
            if let Some(el) = nodes.item(index).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) {
                let _ = el.style().set_property("display", display);
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (selector, display);
    }
}

/// Hook the trigger elements up to their toggles.
#[cfg(feature = "csr")]
pub fn attach(document: &web_sys::Document) {
    on_click(document, SIGN_IN_TRIGGER, false, || set_sign_in_pending(true));
    on_click(document, SORT_ENABLE_TRIGGER, true, || set_sort_active(true));
    on_click(document, SORT_SAVE_TRIGGER, true, || set_sort_active(false));
}

#[cfg(feature = "csr")]
fn on_click(document: &web_sys::Document, selector: &'static str, prevent_default: bool, action: fn()) {
    let triggers = match crate::util::dom::elements::<web_sys::Element>(document, selector) {
        Ok(triggers) => triggers,
        Err(e) => {
            log::warn!("visibility trigger: {e}");
            return;
        }
    };
    for trigger in &triggers {
        crate::util::dom::listen(trigger, "click", move |ev| {
            if prevent_default {
                ev.prevent_default();
            }
            action();
        });
    }
}
