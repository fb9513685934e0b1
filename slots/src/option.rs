//! Assignable options and the page-wide id -> option mapping.

#[cfg(test)]
#[path = "option_test.rs"]
mod option_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::ParseError;

/// One assignable choice with its display label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOption {
    pub id: i64,
    pub display: String,
}

/// Every option a page can offer, keyed by id.
///
/// Deserializes from the `all-options` JSON block, an object keyed by
/// stringified ids. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct OptionCatalog {
    by_id: BTreeMap<i64, SlotOption>,
}

impl OptionCatalog {
    /// Parse the JSON mapping rendered by the server.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not an id -> option object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&SlotOption> {
        self.by_id.get(&id)
    }

    /// Look up an id that the page claims exists.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownOption`] when the id is missing.
    pub fn resolve(&self, id: i64) -> Result<&SlotOption, ParseError> {
        self.get(id).ok_or(ParseError::UnknownOption(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<SlotOption> for OptionCatalog {
    fn from_iter<I: IntoIterator<Item = SlotOption>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().map(|option| (option.id, option)).collect(),
        }
    }
}
