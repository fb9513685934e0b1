//! Save-endpoint wire types and reply decoding.
//!
//! DESIGN
//! ======
//! The endpoint answers with a loosely-shaped JSON object
//! (`{"success": bool, "code": "...", ...}`). It is decoded once, here, into a
//! tagged [`SaveOutcome`]; callers never probe reply fields themselves.
//! Transport problems (HTTP status, network, timeout) fold into the same
//! [`SaveFailure`] type so a cell handles every failure on one path.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cell::Assignment;

/// Header carrying the page's CSRF token on every save request.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Body of a save request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignRequest {
    pub slot_id: i64,
    pub student_id: i64,
    /// `None` clears the assignment.
    pub option_id: Option<i64>,
    pub admin_lock: bool,
}

impl AssignRequest {
    #[must_use]
    pub fn new(slot_id: i64, student_id: i64, choice: Assignment) -> Self {
        let option_id = choice.option_id.filter(|id| *id != 0);
        Self {
            slot_id,
            student_id,
            option_id,
            admin_lock: choice.locked && option_id.is_some(),
        }
    }

    /// The assignment this request would commit.
    #[must_use]
    pub fn assignment(&self) -> Assignment {
        Assignment {
            option_id: self.option_id,
            locked: self.admin_lock,
        }
    }
}

/// Reply body as sent by the server. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct AssignReply {
    #[serde(default)]
    success: bool,
    #[serde(default, deserialize_with = "code_text")]
    code: Option<String>,
}

/// Accept any JSON `code`; only `success` decides the outcome.
fn code_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(code)) => Some(code),
        Some(other) => Some(other.to_string()),
    })
}

/// Only a JSON object counts as a reply; arrays and scalars are rejected.
fn decode_reply(body: &str) -> Result<AssignReply, serde_json::Error> {
    let object = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(body)?;
    serde_json::from_value(serde_json::Value::Object(object))
}

/// Why a save did not go through.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveFailure {
    /// The server answered but reported `success: false` (or omitted it).
    #[error("server rejected the assignment")]
    Rejected { code: Option<String> },
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Http { status: u16, code: Option<String> },
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not a JSON object of the expected shape.
    #[error("could not decode reply: {0}")]
    Decode(String),
    /// No response arrived within the configured timeout.
    #[error("no reply within {0:?}")]
    TimedOut(Duration),
}

impl SaveFailure {
    /// The server-supplied error code, when there is one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code } | Self::Http { code, .. } => code.as_deref(),
            Self::Network(_) | Self::Decode(_) | Self::TimedOut(_) => None,
        }
    }

    /// Text for the blocking alert shown to the user.
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self.code() {
            Some(code) => format!("Something went wrong during save: {code}"),
            None => format!("Something went wrong during save: {self}"),
        }
    }
}

/// Result of one save attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Success { option_id: Option<i64>, locked: bool },
    Failure(SaveFailure),
}

impl SaveOutcome {
    /// Decode an HTTP response to `request`.
    ///
    /// A non-2xx status is a failure regardless of the body, but a `code` in a
    /// JSON body is still picked up for the alert.
    #[must_use]
    pub fn from_response(request: &AssignRequest, status: u16, body: &str) -> Self {
        if !(200..300).contains(&status) {
            let code = decode_reply(body)
                .ok()
                .and_then(|reply| reply.code);
            return Self::Failure(SaveFailure::Http { status, code });
        }
        Self::from_reply_body(request, body)
    }

    /// Decode a reply body that arrived with a success status.
    #[must_use]
    pub fn from_reply_body(request: &AssignRequest, body: &str) -> Self {
        match decode_reply(body) {
            Ok(reply) if reply.success => Self::Success {
                option_id: request.option_id,
                locked: request.admin_lock,
            },
            Ok(reply) => Self::Failure(SaveFailure::Rejected { code: reply.code }),
            Err(e) => Self::Failure(SaveFailure::Decode(e.to_string())),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
