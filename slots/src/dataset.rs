//! Parsing of the `data-*` attributes a server template renders onto each cell.
//!
//! ERROR HANDLING
//! ==============
//! Attribute values come from our own templates, so anything malformed is a
//! template bug. Every parser here fails fast with a [`ParseError`] instead of
//! coercing, and list parsing never returns a partial result.

#[cfg(test)]
#[path = "dataset_test.rs"]
mod dataset_test;

/// Attribute names (without the `data-` prefix) read from a cell element.
pub const ATTR_SLOT_ID: &str = "slot-id";
pub const ATTR_STUDENT_ID: &str = "student-id";
pub const ATTR_CURRENT_ITEM_ID: &str = "current-item-id";
pub const ATTR_LOCKED: &str = "locked";
pub const ATTR_PREFERRED_OPTIONS: &str = "preferred-options";
pub const ATTR_REMAINING_OPTIONS: &str = "remaining-options";
pub const ATTR_ALLOW_LOCKING: &str = "allow-locking";

/// Error raised while reading cell attributes or menu values.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A token that should be an integer (or `""`/`"null"`) is not.
    #[error("could not parse '{0}' as int")]
    InvalidInt(String),
    /// A boolean attribute holds something other than `true`/`false`/`1`/`0`/empty.
    #[error("could not parse '{0}' as bool")]
    InvalidFlag(String),
    /// A required attribute is absent, or null where a value is required.
    #[error("missing required attribute `data-{0}`")]
    MissingAttribute(&'static str),
    /// An option list contains an empty or `null` entry.
    #[error("attribute `data-{0}` contains a null entry")]
    NullInList(&'static str),
    /// An option id referenced by the cell is not in the page option mapping.
    #[error("option {0} is not in the page option mapping")]
    UnknownOption(i64),
    /// A value coming back from the edit menu does not decode to a choice.
    #[error("invalid menu value '{0}'")]
    InvalidMenuValue(String),
}

/// Parse one id token. `""` and `"null"` mean "no value".
///
/// # Errors
///
/// Returns [`ParseError::InvalidInt`] for any other non-integer token.
pub fn parse_id(token: &str) -> Result<Option<i64>, ParseError> {
    if token.is_empty() || token == "null" {
        return Ok(None);
    }
    token
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ParseError::InvalidInt(token.to_owned()))
}

/// Parse a comma-separated list of id tokens. The empty string is an empty list.
///
/// # Errors
///
/// Returns the first token's [`ParseError`]; no partial list is produced.
pub fn parse_id_list(value: &str) -> Result<Vec<Option<i64>>, ParseError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }
    value.split(',').map(parse_id).collect()
}

/// Join ids back into the comma-separated attribute form.
#[must_use]
pub fn join_id_list(ids: &[Option<i64>]) -> String {
    ids.iter()
        .map(|id| id.map_or_else(|| "null".to_owned(), |id| id.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a boolean attribute. Missing values should be passed as `""`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidFlag`] for anything but `true`, `false`,
/// `1`, `0` (ASCII case-insensitive) or the empty string.
pub fn parse_flag(token: &str) -> Result<bool, ParseError> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(ParseError::InvalidFlag(token.to_owned())),
    }
}

/// Raw attribute values of one cell element, exactly as found in the DOM.
///
/// `None` means the attribute is absent; validation happens when the
/// dataset is turned into a [`crate::Cell`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellDataset {
    pub slot_id: Option<String>,
    pub student_id: Option<String>,
    pub current_item_id: Option<String>,
    pub locked: Option<String>,
    pub preferred_options: Option<String>,
    pub remaining_options: Option<String>,
    pub allow_locking: Option<String>,
}

impl CellDataset {
    /// Collect the attributes through `lookup`, which receives names such as
    /// `"slot-id"` (the `data-` prefix is the caller's concern).
    pub fn read(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            slot_id: lookup(ATTR_SLOT_ID),
            student_id: lookup(ATTR_STUDENT_ID),
            current_item_id: lookup(ATTR_CURRENT_ITEM_ID),
            locked: lookup(ATTR_LOCKED),
            preferred_options: lookup(ATTR_PREFERRED_OPTIONS),
            remaining_options: lookup(ATTR_REMAINING_OPTIONS),
            allow_locking: lookup(ATTR_ALLOW_LOCKING),
        }
    }
}

/// Read an attribute that must be present and hold a non-null id.
pub(crate) fn required_id(value: Option<&str>, name: &'static str) -> Result<i64, ParseError> {
    let raw = value.ok_or(ParseError::MissingAttribute(name))?;
    parse_id(raw)?.ok_or(ParseError::MissingAttribute(name))
}

/// Read an attribute that must be present but may hold `""`/`"null"`.
pub(crate) fn nullable_id(value: Option<&str>, name: &'static str) -> Result<Option<i64>, ParseError> {
    parse_id(value.ok_or(ParseError::MissingAttribute(name))?)
}

/// Read a required option-id list; null entries are rejected.
pub(crate) fn required_id_list(value: Option<&str>, name: &'static str) -> Result<Vec<i64>, ParseError> {
    let raw = value.ok_or(ParseError::MissingAttribute(name))?;
    parse_id_list(raw)?
        .into_iter()
        .map(|id| id.ok_or(ParseError::NullInList(name)))
        .collect()
}
