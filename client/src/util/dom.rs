//! Small DOM query and listener helpers shared by the attach code.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::page::config::PageError;

/// All elements matching `selector` that cast to `T`, in document order.
///
/// # Errors
///
/// [`PageError::Selector`] if the browser rejects the selector.
pub fn elements<T: JsCast>(document: &web_sys::Document, selector: &'static str) -> Result<Vec<T>, PageError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| PageError::Selector(selector))?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub fn listen(target: &web_sys::EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("could not listen for {event}: {e:?}");
    }
    closure.forget();
}
