//! Links that submit a POST form instead of navigating.
//!
//! A click on `a.link-form-post` builds a throwaway
//! `<form method="POST" action=href>` carrying the page CSRF token in a
//! hidden `csrfmiddlewaretoken` input, appends it to `<body>` and submits it.

#[cfg(test)]
#[path = "post_link_test.rs"]
mod post_link_test;

pub const POST_LINK_SELECTOR: &str = "a.link-form-post";
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";

/// Hidden `(name, value)` inputs carried by the generated form.
pub fn hidden_fields(csrf_token: &str) -> Vec<(&'static str, String)> {
    vec![(CSRF_FIELD_NAME, csrf_token.to_owned())]
}

/// Wire every POST link on the page.
///
/// Pages without such links do not need a CSRF block. Pages with links but
/// no usable token keep plain links and log a warning.
#[cfg(feature = "csr")]
pub fn attach(document: &web_sys::Document) {
    use crate::page::config::{read_csrf_token, script_blocks};
    use crate::util::dom;

    let links = match dom::elements::<web_sys::HtmlAnchorElement>(document, POST_LINK_SELECTOR) {
        Ok(links) if !links.is_empty() => links,
        Ok(_) => return,
        Err(e) => {
            log::warn!("post links: {e}");
            return;
        }
    };
    let token = match read_csrf_token(&script_blocks(document)) {
        Ok(token) => token,
        Err(e) => {
            log::warn!("post links left as plain links: {e}");
            return;
        }
    };

    for link in &links {
        let href_source = link.clone();
        let token = token.clone();
        dom::listen(link, "click", move |ev| {
            ev.prevent_default();
            if let Err(e) = submit_post(&href_source.href(), &token) {
                log::error!("could not submit POST link: {e:?}");
            }
        });
    }
    log::debug!("wired {} POST links", links.len());
}

#[cfg(feature = "csr")]
fn submit_post(action: &str, csrf_token: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no <body>"))?;

    let form = document.create_element("form")?.dyn_into::<web_sys::HtmlFormElement>()?;
    form.set_method("POST");
    form.set_action(action);
    for (name, value) in hidden_fields(csrf_token) {
        let input = document.create_element("input")?.dyn_into::<web_sys::HtmlInputElement>()?;
        input.set_type("hidden");
        input.set_name(name);
        input.set_value(&value);
        form.append_child(&input)?;
    }

    body.append_child(&form)?;
    form.submit()
}
