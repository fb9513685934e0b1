//! Networking for the assignment widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the single save call a cell makes. Wire types and reply
//! decoding live in the `slots` crate so the CLI shares them.

pub mod api;
