//! Navigation history

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

/// Error raised when a replayed history entry has no recognizable payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// The entry payload is missing or does not match any known shape.
    #[error("history entry payload is missing or malformed")]
    MalformedEntry,
}

/// Application payload attached to one navigation-stack entry.
///
/// Every view state serializes to exactly one of these shapes and
/// deserializes back deterministically; anything else degrades to the
/// browsing view via [`ReplayError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum HistoryEntry {
    /// The browsing view.
    Home,

    /// Contact confirmation, redacted to the shareable fields.
    Contact {
        /// Submitter name
        name: String,
        /// Submitter email
        email: String,
    },

    /// Order confirmation, order reference only.
    Order {
        /// Order reference
        order: String,
    },
}

impl HistoryEntry {
    /// Encode this entry as the state object attached to the stack entry.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Decode the state object delivered by a back/forward navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::MalformedEntry`] if the payload is absent,
    /// null, or not one of the known entry shapes.
    pub fn decode(payload: Option<&Value>) -> Result<Self, ReplayError> {
        let value = match payload {
            Some(value) if !value.is_null() => value,
            _ => return Err(ReplayError::MalformedEntry),
        };

        serde_json::from_value(value.clone()).map_err(|error| {
            tracing::debug!(%error, "unrecognized history entry payload");
            ReplayError::MalformedEntry
        })
    }

    /// Deep-link query string for this entry, if it is bookmarkable.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        match self {
            HistoryEntry::Home => None,
            HistoryEntry::Contact { name, email } => Some(
                form_urlencoded::Serializer::new(String::new())
                    .append_pair("view", "contact")
                    .append_pair("name", name)
                    .append_pair("email", email)
                    .finish(),
            ),
            HistoryEntry::Order { order } => Some(
                form_urlencoded::Serializer::new(String::new())
                    .append_pair("view", "order")
                    .append_pair("order", order)
                    .finish(),
            ),
        }
    }

    /// Parse the recognized deep-link query parameters into an entry.
    ///
    /// Returns `None` when no recognized key carries a value. An order
    /// reference takes precedence over contact fields, as on the page.
    #[must_use]
    pub fn from_query(query: &str) -> Option<Self> {
        let mut name = None;
        let mut email = None;
        let mut order = None;

        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match &*key {
                "name" => name = Some(value),
                "email" => email = Some(value),
                "order" => order = Some(value),
                _ => {}
            }
        }

        let name = name.filter(|value| !value.is_empty());
        let email = email.filter(|value| !value.is_empty());
        let order = order.filter(|value| !value.is_empty());

        if let Some(order) = order {
            return Some(HistoryEntry::Order { order });
        }

        if name.is_some() || email.is_some() {
            return Some(HistoryEntry::Contact {
                name: name.unwrap_or_default(),
                email: email.unwrap_or_default(),
            });
        }

        None
    }
}

/// The browser's back/forward stack, as seen by the engine.
///
/// The browser shell backs this with `history.pushState` /
/// `history.replaceState`; tests and native shells use [`StackHistory`].
pub trait NavigationStack {
    /// Push a new entry after the current one, dropping any forward entries.
    fn push(&mut self, entry: &HistoryEntry);

    /// Replace the current entry in place.
    fn replace(&mut self, entry: &HistoryEntry);
}

/// In-memory navigation stack with browser back/forward semantics.
#[derive(Debug)]
pub struct StackHistory {
    entries: Vec<Value>,
    cursor: usize,
}

impl StackHistory {
    /// Create a stack holding the initial (payload-less) page entry.
    #[must_use]
    pub fn new() -> Self {
        StackHistory {
            entries: vec![Value::Null],
            cursor: 0,
        }
    }

    /// Navigate one entry back, returning the payload to replay.
    pub fn back(&mut self) -> Option<Value> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        self.current().cloned()
    }

    /// Navigate one entry forward, returning the payload to replay.
    pub fn forward(&mut self) -> Option<Value> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }

        self.cursor += 1;
        self.current().cloned()
    }

    /// Payload of the current entry.
    #[must_use]
    pub fn current(&self) -> Option<&Value> {
        self.entries.get(self.cursor)
    }

    /// Number of entries on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A navigation stack is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for StackHistory {
    fn default() -> Self {
        StackHistory::new()
    }
}

impl NavigationStack for StackHistory {
    fn push(&mut self, entry: &HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry.to_payload());
        self.cursor = self.entries.len() - 1;
    }

    fn replace(&mut self, entry: &HistoryEntry) {
        if let Some(current) = self.entries.get_mut(self.cursor) {
            *current = entry.to_payload();
        }
    }
}
