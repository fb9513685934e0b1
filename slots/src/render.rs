//! At-rest rendering of a cell as an ordered list of glyphs.
//!
//! The order is fixed: edit icon, then (when locked) a separator and the lock
//! icon, then a separator and the label. Renderers map each glyph to markup;
//! [`plain_text`] maps them to a terminal-friendly line.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::cell::Assignment;
use crate::option::OptionCatalog;

pub const NO_ASSIGNMENT: &str = "No assignment";

pub const EDIT_ICON_CLASS: &str = "fa-solid fa-edit";
pub const LOCK_ICON_CLASS: &str = "fa-solid fa-lock";
pub const SPINNER_ICON_CLASS: &str = "fa-solid fa-spinner fa-spin";
pub const LABEL_CLASS: &str = "current-selection";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    EditIcon,
    LockIcon,
    Separator,
    Label(String),
}

impl Glyph {
    /// CSS classes for icon glyphs.
    #[must_use]
    pub fn icon_class(&self) -> Option<&'static str> {
        match self {
            Self::EditIcon => Some(EDIT_ICON_CLASS),
            Self::LockIcon => Some(LOCK_ICON_CLASS),
            Self::Separator | Self::Label(_) => None,
        }
    }
}

/// Compose the at-rest glyphs for `current`.
#[must_use]
pub fn at_rest_glyphs(current: Assignment, catalog: &OptionCatalog) -> Vec<Glyph> {
    let mut glyphs = vec![Glyph::EditIcon];
    if current.locked {
        glyphs.push(Glyph::Separator);
        glyphs.push(Glyph::LockIcon);
    }
    glyphs.push(Glyph::Separator);
    glyphs.push(Glyph::Label(label_for(current, catalog)));
    glyphs
}

/// Display text of the assigned option, or [`NO_ASSIGNMENT`].
#[must_use]
pub fn label_for(current: Assignment, catalog: &OptionCatalog) -> String {
    current
        .option_id
        .filter(|id| *id != 0)
        .and_then(|id| catalog.get(id))
        .map_or_else(|| NO_ASSIGNMENT.to_owned(), |option| option.display.clone())
}

/// Render glyphs as one line of text, e.g. `[edit] [lock] Robotics`.
#[must_use]
pub fn plain_text(glyphs: &[Glyph]) -> String {
    glyphs
        .iter()
        .map(|glyph| match glyph {
            Glyph::EditIcon => "[edit]",
            Glyph::LockIcon => "[lock]",
            Glyph::Separator => " ",
            Glyph::Label(text) => text.as_str(),
        })
        .collect()
}
