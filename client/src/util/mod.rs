//! Page helpers that live outside the cell widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each helper is one-shot event wiring attached at page load. Browser calls
//! are gated on the `csr` feature; the pure parts (selectors, field lists,
//! display values) compile and test natively.

#[cfg(feature = "csr")]
pub mod dom;

pub mod dialog;
pub mod dialog_launcher;
pub mod post_link;
pub mod sign_in;
pub mod upload_form;
pub mod visibility;
