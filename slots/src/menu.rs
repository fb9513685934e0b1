//! The grouped selection menu shown while a cell is being edited.
//!
//! DESIGN
//! ======
//! The menu is plain data (groups of value/text/selected entries) so any
//! selection control can render it. Entry values encode the choice:
//! `"0"` is Unassigned, `"<id>"` an unlocked option and `"<id>-locked"` its
//! locked variant. [`decode_choice`] is the only way back from a value.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::cell::Assignment;
use crate::dataset::ParseError;
use crate::option::SlotOption;

pub const UNASSIGNED_VALUE: &str = "0";
pub const UNASSIGNED_TEXT: &str = "Unassigned";
pub const LOCKED_SUFFIX: &str = "-locked";

pub const PREFERRED_LABEL: &str = "Preferred";
pub const PREFERRED_LOCKED_LABEL: &str = "Preferred (locked)";
pub const OTHER_LABEL: &str = "Other";
pub const OTHER_LOCKED_LABEL: &str = "Other (locked)";

/// One selectable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub value: String,
    pub text: String,
    pub selected: bool,
}

/// A labelled group of entries (rendered as an `<optgroup>`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuGroup {
    pub label: &'static str,
    pub entries: Vec<MenuEntry>,
}

/// Unassigned entry followed by the option groups, exactly one entry selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditMenu {
    pub unassigned: MenuEntry,
    pub groups: Vec<MenuGroup>,
}

impl EditMenu {
    /// Build the menu for a cell.
    ///
    /// Locked groups are only present when `allow_locking` is set. The entry
    /// matching `current` is pre-selected; a locked assignment falls back to
    /// its unlocked entry when locked variants are not offered, and anything
    /// not offered at all falls back to Unassigned.
    #[must_use]
    pub fn build(preferred: &[SlotOption], remaining: &[SlotOption], allow_locking: bool, current: Assignment) -> Self {
        let mut groups = vec![option_group(PREFERRED_LABEL, preferred, false)];
        if allow_locking {
            groups.push(option_group(PREFERRED_LOCKED_LABEL, preferred, true));
        }
        groups.push(option_group(OTHER_LABEL, remaining, false));
        if allow_locking {
            groups.push(option_group(OTHER_LOCKED_LABEL, remaining, true));
        }

        let mut menu = Self {
            unassigned: MenuEntry {
                value: UNASSIGNED_VALUE.to_owned(),
                text: UNASSIGNED_TEXT.to_owned(),
                selected: false,
            },
            groups,
        };
        menu.preselect(current);
        menu
    }

    fn preselect(&mut self, current: Assignment) {
        let mut candidates = Vec::with_capacity(2);
        if current.is_assigned() {
            candidates.push(encode_choice(current));
            if current.locked {
                candidates.push(encode_choice(Assignment {
                    locked: false,
                    ..current
                }));
            }
        }

        for candidate in &candidates {
            let hit = self
                .groups
                .iter_mut()
                .flat_map(|group| group.entries.iter_mut())
                .find(|entry| &entry.value == candidate);
            if let Some(entry) = hit {
                entry.selected = true;
                return;
            }
        }
        self.unassigned.selected = true;
    }

    /// Every entry in display order, Unassigned first.
    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        std::iter::once(&self.unassigned).chain(self.groups.iter().flat_map(|group| group.entries.iter()))
    }

    /// The pre-selected entry.
    #[must_use]
    pub fn selected(&self) -> Option<&MenuEntry> {
        self.entries().find(|entry| entry.selected)
    }

    #[must_use]
    pub fn group(&self, label: &str) -> Option<&MenuGroup> {
        self.groups.iter().find(|group| group.label == label)
    }
}

fn option_group(label: &'static str, options: &[SlotOption], locked: bool) -> MenuGroup {
    MenuGroup {
        label,
        entries: options
            .iter()
            .map(|option| MenuEntry {
                value: encode_choice(Assignment {
                    option_id: Some(option.id),
                    locked,
                }),
                text: option.display.clone(),
                selected: false,
            })
            .collect(),
    }
}

/// Encode a choice as a menu entry value.
#[must_use]
pub fn encode_choice(choice: Assignment) -> String {
    match choice.option_id.filter(|id| *id != 0) {
        None => UNASSIGNED_VALUE.to_owned(),
        Some(id) if choice.locked => format!("{id}{LOCKED_SUFFIX}"),
        Some(id) => id.to_string(),
    }
}

/// Decode a menu entry value into `(option id, locked)`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidMenuValue`] for anything [`encode_choice`]
/// could not have produced.
pub fn decode_choice(value: &str) -> Result<Assignment, ParseError> {
    let invalid = || ParseError::InvalidMenuValue(value.to_owned());
    let (token, locked) = match value.strip_suffix(LOCKED_SUFFIX) {
        Some(token) => (token, true),
        None => (value, false),
    };
    let id = token.parse::<i64>().map_err(|_| invalid())?;
    if id == 0 {
        return if locked {
            Err(invalid())
        } else {
            Ok(Assignment::UNASSIGNED)
        };
    }
    Ok(Assignment {
        option_id: Some(id),
        locked,
    })
}
