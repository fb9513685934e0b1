//! Leptos components mounted into server-rendered elements.

pub mod slot_grid_item;
