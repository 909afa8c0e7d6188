//! Table of requests awaiting a response from the service.

use crate::protocol::{RequestId, ServiceMessage};
use std::collections::HashMap;

/// What a pending request expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Query,
    Invocation,
}

impl RequestKind {
    /// Whether `message` is the response type this request waits for.
    pub fn accepts(self, message: &ServiceMessage) -> bool {
        matches!(
            (self, message),
            (Self::Query, ServiceMessage::Catalog { .. })
                | (Self::Invocation, ServiceMessage::Response { .. })
        )
    }
}

/// Pending requests keyed by id. Ids are allocated here and never reused.
#[derive(Debug, Clone, Default)]
pub struct PendingRequests {
    last_id: u64,
    pending: HashMap<RequestId, RequestKind>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and register it as awaiting a response of `kind`.
    pub fn register(&mut self, kind: RequestKind) -> RequestId {
        self.last_id += 1;
        let id = RequestId(self.last_id);
        self.pending.insert(id, kind);
        id
    }

    /// Check `message` against the table without consuming anything.
    pub fn matches(&self, message: &ServiceMessage) -> bool {
        match self.pending.get(&message.id()) {
            Some(kind) if kind.accepts(message) => true,
            Some(kind) => {
                log::debug!(
                    "Ignoring {} message for {} (awaiting {:?})",
                    message.type_name(),
                    message.id(),
                    kind
                );
                false
            }
            None => {
                log::debug!(
                    "Ignoring {} message for unknown request {}",
                    message.type_name(),
                    message.id()
                );
                false
            }
        }
    }

    /// Remove the entry answered by `message`. Returns `false`, leaving the
    /// table untouched, when the id is unknown or the type does not match.
    pub fn resolve(&mut self, message: &ServiceMessage) -> bool {
        if !self.matches(message) {
            return false;
        }
        self.pending.remove(&message.id()).is_some()
    }

    pub fn has_pending(&self, kind: RequestKind) -> bool {
        self.pending.values().any(|pending| *pending == kind)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
