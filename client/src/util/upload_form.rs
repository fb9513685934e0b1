//! Upload form that submits as soon as a file is picked.
//!
//! The visible button opens the hidden file input; choosing a file submits
//! the form. Most pages have no such form, which is not an error.

pub const FORM_ID: &str = "uploadconfig-upload-form";
pub const FILE_INPUT_ID: &str = "uploadconfig-upload-form-file";
pub const BUTTON_ID: &str = "uploadconfig-upload-button";

#[cfg(feature = "csr")]
pub fn attach(document: &web_sys::Document) {
    use wasm_bindgen::JsCast;

    use crate::util::dom;

    let Some(form) = document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
    else {
        return;
    };
    let Some(input) = document
        .get_element_by_id(FILE_INPUT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        log::warn!("#{FORM_ID} has no #{FILE_INPUT_ID} input");
        return;
    };

    dom::listen(&input, "change", move |_| {
        if let Err(e) = form.submit() {
            log::error!("upload submit failed: {e:?}");
        }
    });

    match document.get_element_by_id(BUTTON_ID) {
        Some(button) => dom::listen(&button, "click", move |ev| {
            ev.prevent_default();
            input.click();
        }),
        None => log::warn!("#{FORM_ID} has no #{BUTTON_ID} button"),
    }
}
