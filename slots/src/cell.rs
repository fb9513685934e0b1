//! One editable assignment cell and its interaction lifecycle.
//!
//! SYSTEM CONTEXT
//! ==============
//! A cell is built once per server-rendered element and lives for the page.
//! It moves through `AtRest -> Editing -> Saving -> AtRest` (or
//! `Editing -> AtRest` when the menu is dismissed). The committed assignment
//! changes only in [`Cell::finish_save`] on a confirmed success, never
//! optimistically, so a failed or timed-out save leaves the prior value in
//! place.
//!
//! The cell performs no I/O. [`Cell::choose`] hands back the request to send
//! and the caller reports the result through [`Cell::finish_save`].

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::sync::Arc;

use crate::dataset::{
    self, ATTR_CURRENT_ITEM_ID, ATTR_PREFERRED_OPTIONS, ATTR_REMAINING_OPTIONS, ATTR_SLOT_ID, ATTR_STUDENT_ID,
    CellDataset, ParseError,
};
use crate::menu::{self, EditMenu};
use crate::option::{OptionCatalog, SlotOption};
use crate::render::{self, Glyph};
use crate::wire::{AssignRequest, SaveFailure, SaveOutcome};

/// An option assignment together with its admin-lock flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    /// `None` (or `Some(0)` from older templates) means unassigned.
    pub option_id: Option<i64>,
    pub locked: bool,
}

impl Assignment {
    pub const UNASSIGNED: Self = Self {
        option_id: None,
        locked: false,
    };

    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.option_id.is_some_and(|id| id != 0)
    }
}

/// Interaction phase. Only `AtRest` accepts a new interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    AtRest,
    Editing,
    /// A save for the contained choice is in flight.
    Saving(Assignment),
}

/// What a renderer should show for the current phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    AtRest(Vec<Glyph>),
    Editing(EditMenu),
    Saving,
}

/// Error from invoking a transition in the wrong phase or with a bad value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    #[error("cell is not being edited")]
    NotEditing,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// How a finished save was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveResolution {
    /// The new assignment was committed.
    Committed(Assignment),
    /// Nothing changed; the failure should be shown to the user.
    Reverted(SaveFailure),
    /// The cell was not saving, so the outcome was dropped.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    slot_id: i64,
    student_id: i64,
    current: Assignment,
    preferred: Vec<SlotOption>,
    remaining: Vec<SlotOption>,
    allow_locking: bool,
    catalog: Arc<OptionCatalog>,
    phase: Phase,
}

impl Cell {
    /// Build a cell from its element's attributes and the page option mapping.
    ///
    /// # Errors
    ///
    /// Fails on any malformed or missing attribute, and on option ids that
    /// the mapping does not contain.
    pub fn from_dataset(data: &CellDataset, catalog: Arc<OptionCatalog>) -> Result<Self, ParseError> {
        let slot_id = dataset::required_id(data.slot_id.as_deref(), ATTR_SLOT_ID)?;
        let student_id = dataset::required_id(data.student_id.as_deref(), ATTR_STUDENT_ID)?;
        let current_id = dataset::nullable_id(data.current_item_id.as_deref(), ATTR_CURRENT_ITEM_ID)?;
        let locked = parse_optional_flag(data.locked.as_deref())?;
        let allow_locking = parse_optional_flag(data.allow_locking.as_deref())?;

        let preferred = resolve_all(
            &dataset::required_id_list(data.preferred_options.as_deref(), ATTR_PREFERRED_OPTIONS)?,
            &catalog,
        )?;
        let remaining = resolve_all(
            &dataset::required_id_list(data.remaining_options.as_deref(), ATTR_REMAINING_OPTIONS)?,
            &catalog,
        )?;

        let current = Assignment {
            option_id: current_id,
            locked,
        };
        if let Some(id) = current.option_id.filter(|id| *id != 0) {
            catalog.resolve(id)?;
        }

        Ok(Self {
            slot_id,
            student_id,
            current,
            preferred,
            remaining,
            allow_locking,
            catalog,
            phase: Phase::AtRest,
        })
    }

    #[must_use]
    pub fn slot_id(&self) -> i64 {
        self.slot_id
    }

    #[must_use]
    pub fn student_id(&self) -> i64 {
        self.student_id
    }

    /// The last confirmed assignment.
    #[must_use]
    pub fn current(&self) -> Assignment {
        self.current
    }

    #[must_use]
    pub fn allow_locking(&self) -> bool {
        self.allow_locking
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.phase == Phase::Editing
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        matches!(self.phase, Phase::Saving(_))
    }

    /// Start editing. Returns `None` (and changes nothing) unless at rest.
    pub fn begin_edit(&mut self) -> Option<EditMenu> {
        if self.phase != Phase::AtRest {
            log::debug!(
                "slot {} student {}: edit ignored while {:?}",
                self.slot_id,
                self.student_id,
                self.phase
            );
            return None;
        }
        self.phase = Phase::Editing;
        Some(self.edit_menu())
    }

    /// Close the menu without choosing. Returns whether the cell was editing.
    pub fn dismiss(&mut self) -> bool {
        if self.phase != Phase::Editing {
            return false;
        }
        self.phase = Phase::AtRest;
        true
    }

    /// Apply a menu choice: move to `Saving` and return the request to send.
    ///
    /// # Errors
    ///
    /// [`CellError::NotEditing`] outside the editing phase (the cell is left
    /// untouched). A value that does not decode, or that names an entry the
    /// menu does not offer, returns the cell to rest with no save.
    pub fn choose(&mut self, value: &str) -> Result<AssignRequest, CellError> {
        if self.phase != Phase::Editing {
            return Err(CellError::NotEditing);
        }
        let choice = match menu::decode_choice(value) {
            Ok(choice) if self.offers(choice) => choice,
            Ok(_) => {
                self.phase = Phase::AtRest;
                return Err(ParseError::InvalidMenuValue(value.to_owned()).into());
            }
            Err(e) => {
                self.phase = Phase::AtRest;
                return Err(e.into());
            }
        };

        let request = AssignRequest::new(self.slot_id, self.student_id, choice);
        self.phase = Phase::Saving(request.assignment());
        log::debug!(
            "slot {} student {}: saving option {:?} (locked: {})",
            self.slot_id,
            self.student_id,
            request.option_id,
            request.admin_lock
        );
        Ok(request)
    }

    /// Whether `choice` is one of the entries this cell's menu offers.
    fn offers(&self, choice: Assignment) -> bool {
        let Some(id) = choice.option_id else {
            return !choice.locked;
        };
        if choice.locked && !self.allow_locking {
            return false;
        }
        self.preferred.iter().chain(&self.remaining).any(|option| option.id == id)
    }

    /// Apply the outcome of the in-flight save and return to rest.
    pub fn finish_save(&mut self, outcome: SaveOutcome) -> SaveResolution {
        if !self.is_saving() {
            log::warn!(
                "slot {} student {}: save outcome arrived while {:?}; dropped",
                self.slot_id,
                self.student_id,
                self.phase
            );
            return SaveResolution::Ignored;
        }
        self.phase = Phase::AtRest;
        match outcome {
            SaveOutcome::Success { option_id, locked } => {
                self.current = Assignment { option_id, locked };
                SaveResolution::Committed(self.current)
            }
            SaveOutcome::Failure(failure) => {
                log::warn!(
                    "slot {} student {}: save failed: {failure}",
                    self.slot_id,
                    self.student_id
                );
                SaveResolution::Reverted(failure)
            }
        }
    }

    /// Menu for the current assignment, independent of phase.
    #[must_use]
    pub fn edit_menu(&self) -> EditMenu {
        EditMenu::build(&self.preferred, &self.remaining, self.allow_locking, self.current)
    }

    #[must_use]
    pub fn at_rest_glyphs(&self) -> Vec<Glyph> {
        render::at_rest_glyphs(self.current, &self.catalog)
    }

    #[must_use]
    pub fn view(&self) -> CellView {
        match self.phase {
            Phase::AtRest => CellView::AtRest(self.at_rest_glyphs()),
            Phase::Editing => CellView::Editing(self.edit_menu()),
            Phase::Saving(_) => CellView::Saving,
        }
    }
}

fn parse_optional_flag(value: Option<&str>) -> Result<bool, ParseError> {
    dataset::parse_flag(value.unwrap_or_default())
}

fn resolve_all(ids: &[i64], catalog: &OptionCatalog) -> Result<Vec<SlotOption>, ParseError> {
    ids.iter().map(|id| catalog.resolve(*id).cloned()).collect()
}
