//! Reading the JSON `<script>` configuration blocks.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use slots::{OptionCatalog, ParseError};

pub const OPTIONS_BLOCK: &str = "all-options";
pub const ASSIGN_URL_BLOCK: &str = "assign-url";
pub const CSRF_TOKEN_BLOCK: &str = "csrf-token";
pub const SAVE_TIMEOUT_BLOCK: &str = "save-timeout-ms";

pub const DEFAULT_SAVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Fatal page initialization errors.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("missing <script id=\"{0}\"> config block")]
    MissingBlock(&'static str),
    #[error("invalid JSON in <script id=\"{id}\">: {source}")]
    InvalidJson {
        id: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell #{index}: {source}")]
    Cell {
        index: u32,
        #[source]
        source: ParseError,
    },
    #[error("invalid selector `{0}`")]
    Selector(&'static str),
    #[error("no document available")]
    NoDocument,
}

/// Everything a cell widget needs from the page.
#[derive(Clone, Debug)]
pub struct PageConfig {
    pub options: Arc<OptionCatalog>,
    pub assign_url: String,
    pub csrf_token: String,
    pub save_timeout: Duration,
}

impl PageConfig {
    /// Build the config from block contents; `read` maps a block id to its text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when a required block is missing or any block
    /// holds invalid JSON.
    pub fn from_blocks(read: impl Fn(&str) -> Option<String>) -> Result<Self, PageError> {
        let options = read_block::<OptionCatalog>(&read, OPTIONS_BLOCK)?;
        let assign_url = read_block::<String>(&read, ASSIGN_URL_BLOCK)?;
        let csrf_token = read_csrf_token(&read)?;
        let save_timeout = read_optional_block::<u64>(&read, SAVE_TIMEOUT_BLOCK)?
            .map_or(DEFAULT_SAVE_TIMEOUT, Duration::from_millis);

        Ok(Self {
            options: Arc::new(options),
            assign_url,
            csrf_token,
            save_timeout,
        })
    }
}

/// Read the page CSRF token (also used by POST links outside any grid).
///
/// # Errors
///
/// Returns [`PageError`] when the block is missing or not a JSON string.
pub fn read_csrf_token(read: &impl Fn(&str) -> Option<String>) -> Result<String, PageError> {
    read_block(read, CSRF_TOKEN_BLOCK)
}

/// Decode a required block.
///
/// # Errors
///
/// [`PageError::MissingBlock`] or [`PageError::InvalidJson`].
pub fn read_block<T: DeserializeOwned>(
    read: &impl Fn(&str) -> Option<String>,
    id: &'static str,
) -> Result<T, PageError> {
    read_optional_block(read, id)?.ok_or(PageError::MissingBlock(id))
}

/// Decode a block that may be absent.
///
/// # Errors
///
/// [`PageError::InvalidJson`] when the block is present but malformed.
pub fn read_optional_block<T: DeserializeOwned>(
    read: &impl Fn(&str) -> Option<String>,
    id: &'static str,
) -> Result<Option<T>, PageError> {
    let Some(raw) = read(id) else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PageError::InvalidJson { id, source })
}

/// Block reader backed by `document.getElementById(id).textContent`.
#[cfg(feature = "csr")]
pub fn script_blocks(document: &web_sys::Document) -> impl Fn(&str) -> Option<String> + '_ {
    move |id| document.get_element_by_id(id).and_then(|el| el.text_content())
}
