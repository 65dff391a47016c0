//! Capture request and response message types.
//!
//! Defines the payloads exchanged between an embedded frame and its parent
//! over the cross-document messaging channel.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::identifiers::RequestId;

// ============================================================================
// Constants
// ============================================================================

/// Discriminator carried by every capture request.
pub const GET_SCREEN: &str = "getScreen";

// ============================================================================
// CaptureRequest
// ============================================================================

/// A capture request from the embedded frame to its parent.
///
/// # Format
///
/// ```json
/// {
///   "type": "getScreen",
///   "installOnly": false,
///   "id": "uuid",
///   "url": "https://frame.example"
/// }
/// ```
///
/// `kind` and `originUrl` are accepted as aliases when parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRequest {
    /// Message discriminator; [`GET_SCREEN`] for capture requests.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    /// Only provision the extension, do not capture.
    #[serde(rename = "installOnly", default)]
    pub install_only: bool,

    /// Diagnostic request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    /// Origin of the requesting frame, diagnostic only.
    #[serde(
        rename = "url",
        alias = "originUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_url: Option<String>,
}

impl CaptureRequest {
    /// Creates a new capture request with auto-generated ID.
    #[inline]
    #[must_use]
    pub fn new(install_only: bool, origin_url: impl Into<String>) -> Self {
        Self {
            kind: GET_SCREEN.to_string(),
            install_only,
            id: Some(RequestId::generate()),
            origin_url: Some(origin_url.into()),
        }
    }

    /// Parses a capture request out of arbitrary message data.
    ///
    /// Only the discriminator decides acceptance. Returns `None` for
    /// anything that is not a `getScreen` request; such messages belong
    /// to other senders and are ignored.
    ///
    /// The remaining fields are informative and read leniently: a
    /// non-boolean `installOnly` counts as `false`, an `id` that is not a
    /// UUID is dropped, and a non-string `url` is dropped.
    #[must_use]
    pub fn parse(data: &Value) -> Option<Self> {
        let fields = data.as_object()?;
        let field = |name: &str, alias: &str| fields.get(name).or_else(|| fields.get(alias));

        let kind = field("type", "kind")?.as_str()?;
        if kind != GET_SCREEN {
            return None;
        }

        Some(Self {
            kind: kind.to_string(),
            install_only: fields
                .get("installOnly")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
            id: fields
                .get("id")
                .and_then(|id| RequestId::deserialize(id).ok()),
            origin_url: field("url", "originUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Returns `true` if the discriminator is [`GET_SCREEN`].
    #[inline]
    #[must_use]
    pub fn is_capture_request(&self) -> bool {
        self.kind == GET_SCREEN
    }

    /// Serializes the request into message data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

// ============================================================================
// CaptureResponse
// ============================================================================

/// A response from the parent to the requesting frame.
///
/// The parent forwards whatever the extension returned, so parsing is
/// lenient: unknown fields are ignored and non-object data parses as an
/// empty response.
///
/// # Format
///
/// ```json
/// { "sourceId": "..." }
/// { "error": ... }
/// { "installOnly": true, ... }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureResponse {
    /// Capture source chosen through the extension.
    #[serde(rename = "sourceId", default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Failure detail.
    #[serde(alias = "err", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Provisioning acknowledgement.
    #[serde(rename = "installOnly", default, skip_serializing_if = "Option::is_none")]
    pub install_only: Option<bool>,
}

impl CaptureResponse {
    /// Parses response data, treating malformed data as empty.
    #[must_use]
    pub fn parse(data: &Value) -> Self {
        Self::deserialize(data).unwrap_or_default()
    }

    /// Builds the error response posted for a failed request.
    #[must_use]
    pub fn failure(err: &Error) -> Value {
        json!({ "error": err.to_wire() })
    }

    /// Classifies the response.
    ///
    /// A non-empty `sourceId` wins, then `error`, then the install
    /// acknowledgement. Anything else counts as a cancellation.
    #[must_use]
    pub fn classify(&self) -> ResponseKind {
        if let Some(source_id) = self.source_id.as_deref()
            && !source_id.is_empty()
        {
            return ResponseKind::Source(source_id.to_string());
        }

        if let Some(detail) = &self.error {
            return ResponseKind::Failed(detail.clone());
        }

        if self.install_only.unwrap_or_default() {
            return ResponseKind::Installed;
        }

        ResponseKind::Cancelled
    }
}

// ============================================================================
// ResponseKind
// ============================================================================

/// What a response means to the requesting frame.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseKind {
    /// Capture the given source.
    Source(String),
    /// Request failed with this detail.
    Failed(Value),
    /// The extension is installed; nothing was captured.
    Installed,
    /// The user dismissed the prompt.
    Cancelled,
}

// ============================================================================
// Tests
// ============================================================================
