//! Page-embedded configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server template renders widget configuration into JSON `<script>`
//! blocks. `config` reads them exactly once at startup into an explicit
//! [`config::PageConfig`] that is handed to every widget; nothing looks the
//! DOM up again afterwards.

pub mod config;
