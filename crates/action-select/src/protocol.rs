//! Wire messages exchanged with the external action service.
//!
//! Messages are newline-delimited JSON objects tagged by a `type` field.
//! Every request carries an explicit [`RequestId`] and every response echoes
//! it back, so responses are correlated through the pending request table
//! instead of by listener registration order.
//!
//! ```json
//! {"type":"query","id":1}
//! {"type":"catalog","id":1,"actions":{"files":{"name":"files","isInvocable":false,"actions":{}}}}
//! {"type":"invocation","id":2,"key":"files.open","args":{}}
//! {"type":"response","id":2,"argumentRequests":[{"param":"path","info":{"type":"string","presets":[{"id":"p1","name":"Recent"}]}}]}
//! ```

use crate::model::Catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Collected arguments of an invocation, keyed by parameter name.
pub type Arguments = BTreeMap<String, String>;

/// Message types the palette understands on the incoming side.
const KNOWN_MESSAGE_TYPES: &[&str] = &["catalog", "response"];

/// Identifier correlating a request with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Requests sent from the palette to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServiceRequest {
    /// Ask for the full action catalog.
    Query { id: RequestId },
    /// Invoke an action with the arguments collected so far.
    Invocation {
        id: RequestId,
        key: String,
        args: Arguments,
    },
}

impl ServiceRequest {
    pub fn id(&self) -> RequestId {
        match self {
            Self::Query { id } | Self::Invocation { id, .. } => *id,
        }
    }
}

/// Messages received from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServiceMessage {
    /// Answer to [`ServiceRequest::Query`]. An empty catalog means the
    /// service is not ready yet.
    Catalog {
        id: RequestId,
        #[serde(default)]
        actions: Catalog,
    },
    /// Answer to [`ServiceRequest::Invocation`]. Only the first argument
    /// request is consulted; none means the invocation is complete.
    Response {
        id: RequestId,
        #[serde(default, rename = "argumentRequests")]
        argument_requests: Vec<Option<ArgumentRequest>>,
    },
}

impl ServiceMessage {
    pub fn id(&self) -> RequestId {
        match self {
            Self::Catalog { id, .. } | Self::Response { id, .. } => *id,
        }
    }

    /// Wire name of the message type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Catalog { .. } => "catalog",
            Self::Response { .. } => "response",
        }
    }
}

/// A request for one more invocation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentRequest {
    /// Name of the parameter being collected.
    pub param: String,
    pub info: ArgumentInfo,
}

/// Declared type and suggested values of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentInfo {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
}

impl ArgumentInfo {
    /// Numeric parameters are offered the fixed range of numeric choices.
    pub fn is_number(&self) -> bool {
        self.kind == "number"
    }
}

/// A named value suggested by the service for a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Preset {
    /// Display label: the name, or the id when the name is empty.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Errors raised while reading or writing wire messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Message is not a JSON object with a type field")]
    MissingType,

    #[error("Invalid {message_type} payload: {source}")]
    InvalidPayload {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decode one line received from the service.
///
/// Returns `Ok(None)` for well-formed messages of a type the palette does not
/// handle; those are ignored without side effects.
pub fn decode_message(line: &str) -> Result<Option<ServiceMessage>, ProtocolError> {
    // Only used to read the type; its maps are sorted, so the payload is
    // decoded from the line itself to keep catalog key order.
    let header: serde_json::Value = serde_json::from_str(line)?;

    let message_type = header
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(ProtocolError::MissingType)?
        .to_string();

    if !KNOWN_MESSAGE_TYPES.contains(&message_type.as_str()) {
        log::debug!("Ignoring message of unknown type '{}'", message_type);
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .map_err(|source| ProtocolError::InvalidPayload {
            message_type,
            source,
        })
}

/// Encode a request as a single JSON line (without the trailing newline).
pub fn encode_request(request: &ServiceRequest) -> Result<String, ProtocolError> {
    serde_json::to_string(request).map_err(ProtocolError::Encode)
}
