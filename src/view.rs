//! View state

use jiff::Timestamp;
use serde_json::Value;

use crate::{
    checkout::OrderRecord,
    contact::ContactCard,
    history::HistoryEntry,
};

/// Which view the page is showing. Exactly one is active.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// The catalogue/browsing view.
    Browsing,

    /// Contact confirmation view.
    ContactConfirmed(ContactCard),

    /// Order confirmation view.
    OrderConfirmed(OrderRecord),
}

/// Events the view/history state machine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// A contact submission completed its send window.
    ContactAccepted(ContactCard),

    /// A checkout completed its processing window.
    OrderPlaced(OrderRecord),

    /// The visitor asked to go back to browsing.
    ReturnToBrowsing,

    /// A back/forward navigation delivered a stack entry payload.
    Replay(Option<Value>),
}

/// Navigation-stack side effect of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavDirective {
    /// Push a new entry.
    Push(HistoryEntry),

    /// Replace the current entry in place.
    Replace(HistoryEntry),
}

impl ViewState {
    /// The navigation-stack entry this state serializes to.
    ///
    /// The mapping is total: every state has exactly one entry shape.
    /// Contact confirmations are redacted to name and email; order
    /// confirmations carry the reference only.
    #[must_use]
    pub fn entry(&self) -> HistoryEntry {
        match self {
            ViewState::Browsing => HistoryEntry::Home,
            ViewState::ContactConfirmed(card) => HistoryEntry::Contact {
                name: card.name.clone(),
                email: card.email.clone(),
            },
            ViewState::OrderConfirmed(order) => HistoryEntry::Order {
                order: order.order_id.clone(),
            },
        }
    }

    /// Apply an event, producing the next state and its stack effect.
    ///
    /// User actions push; replays replace in place, never push. A
    /// malformed replay payload degrades to [`ViewState::Browsing`].
    #[must_use]
    pub fn apply(self, event: ViewEvent, now: Timestamp) -> (ViewState, NavDirective) {
        match event {
            ViewEvent::ContactAccepted(card) => {
                let state = ViewState::ContactConfirmed(card);
                let entry = state.entry();
                (state, NavDirective::Push(entry))
            }
            ViewEvent::OrderPlaced(order) => {
                let state = ViewState::OrderConfirmed(order);
                let entry = state.entry();
                (state, NavDirective::Push(entry))
            }
            ViewEvent::ReturnToBrowsing => {
                (ViewState::Browsing, NavDirective::Push(HistoryEntry::Home))
            }
            ViewEvent::Replay(payload) => {
                let state = match HistoryEntry::decode(payload.as_ref()) {
                    Ok(entry) => ViewState::for_entry(entry, now),
                    Err(error) => {
                        tracing::debug!(%error, "replayed entry degraded to browsing");
                        ViewState::Browsing
                    }
                };
                let entry = state.entry();
                (state, NavDirective::Replace(entry))
            }
        }
    }

    /// Reconstruct the state a stack entry stands for.
    ///
    /// A contact entry yields a redacted card; an order entry yields the
    /// degraded placeholder record, full detail being unrecoverable.
    #[must_use]
    pub fn for_entry(entry: HistoryEntry, now: Timestamp) -> ViewState {
        match entry {
            HistoryEntry::Home => ViewState::Browsing,
            HistoryEntry::Contact { name, email } => ViewState::ContactConfirmed(ContactCard {
                name,
                email,
                message: None,
            }),
            HistoryEntry::Order { order } => {
                ViewState::OrderConfirmed(OrderRecord::placeholder(order, now))
            }
        }
    }
}

/// Resolve the state the page loads into from its address.
///
/// Recognized query parameters reconstruct a confirmation view
/// (deep-linking a bookmark) and replace the current stack entry rather
/// than pushing a redundant one. With no recognized keys, the page is
/// browsing; the entry is normalized in place unless an address
/// fragment is steering in-page navigation.
#[must_use]
pub fn initial_state(
    query: &str,
    has_fragment: bool,
    now: Timestamp,
) -> (ViewState, Option<NavDirective>) {
    if let Some(entry) = HistoryEntry::from_query(query) {
        let state = ViewState::for_entry(entry, now);
        let entry = state.entry();
        return (state, Some(NavDirective::Replace(entry)));
    }

    if has_fragment {
        (ViewState::Browsing, None)
    } else {
        (
            ViewState::Browsing,
            Some(NavDirective::Replace(HistoryEntry::Home)),
        )
    }
}
