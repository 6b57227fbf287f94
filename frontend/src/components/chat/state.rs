//! Component state for the chat assistant.
//!
//! Holds the live input string and its parsed segment list, the chat
//! history, the picker catalogs and the currently active token selection.
//! The token core itself (`common::tokens`) keeps no state between calls;
//! everything it needs is passed in from here on each event.

use yew::prelude::*;

use common::model::chat::{ChatEntry, Sender};
use common::model::dataset::DatasetSummary;
use common::model::suggestion::SuggestionGroup;
use common::tokens::{Catalog, Role, Segment};

use super::helpers::new_entry;

/// The token occurrence the user clicked, plus everything the picker needs
/// to render: the resolved role, its candidate values, and the screen
/// anchor. The anchor is presentation-only and never feeds back into
/// resolution.
pub struct ActivePick {
    pub literal: String,
    pub ordinal: usize,
    pub role: Role,
    pub candidates: Vec<String>,
    pub anchor: (i32, i32),
}

pub struct ChatComponent {
    /// Current content of the query textarea.
    pub input: String,

    /// Segments re-derived from `input` on every change; never patched in
    /// place.
    pub segments: Vec<Segment>,

    /// Chat history, oldest first.
    pub history: Vec<ChatEntry>,

    /// Suggestion groups loaded from the backend.
    pub suggestions: Vec<SuggestionGroup>,

    /// Candidate catalogs: dataset-derived lists over the static fallback.
    pub catalogs: Catalog,

    /// Dataset availability shown in the header.
    pub dataset: DatasetSummary,

    /// True while a query is in flight.
    pub sending: bool,

    /// The open picker, if a token chip was clicked.
    pub active_pick: Option<ActivePick>,

    /// Reference to the query textarea.
    pub input_ref: NodeRef,

    /// Guard to avoid running first-render loading more than once.
    pub loaded: bool,
}

impl ChatComponent {
    pub fn new(greeting: Option<String>) -> Self {
        let greeting = greeting.unwrap_or_else(|| {
            "Hi! Upload a sales CSV and ask away — try one of the suggestions below.".to_string()
        });
        Self {
            input: String::new(),
            segments: Vec::new(),
            history: vec![new_entry(Sender::Assistant, greeting)],
            suggestions: Vec::new(),
            catalogs: Catalog::default(),
            dataset: DatasetSummary::waiting(),
            sending: false,
            active_pick: None,
            input_ref: NodeRef::default(),
            loaded: false,
        }
    }
}
