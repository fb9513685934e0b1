//! Shared model for the editable slot-assignment cell.
//!
//! This crate owns everything about a cell that does not touch the browser or
//! the network: parsing the server-rendered data attributes, the
//! `AtRest -> Editing -> Saving` lifecycle, the grouped edit menu, the at-rest
//! render model, and the save endpoint's wire types. Both the `client` widget
//! and the `slotgrid` CLI drive cells through this API.

pub mod cell;
pub mod dataset;
pub mod menu;
pub mod option;
pub mod render;
pub mod wire;

pub use cell::{Assignment, Cell, CellError, CellView, Phase, SaveResolution};
pub use dataset::{CellDataset, ParseError};
pub use menu::{EditMenu, MenuEntry, MenuGroup};
pub use option::{OptionCatalog, SlotOption};
pub use render::Glyph;
pub use wire::{AssignRequest, CSRF_HEADER, SaveFailure, SaveOutcome};
