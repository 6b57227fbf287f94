//! Update function for the chat component.
//!
//! Elm-style: receives the current state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Re-parses the input into segments on every text change.
//! - Resolves a clicked token to a role and opens the picker with the
//!   matching candidate list.
//! - Applies a picked value through the selection applier, replacing
//!   exactly one token occurrence, then clears the active selection.
//! - Sends completed queries to the backend and appends the answer to the
//!   history; queries with unfilled tokens are rejected with a toast.

use gloo_net::http::Request;
use web_sys::HtmlTextAreaElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::chat::{QueryResponse, Sender};
use common::requests::QueryRequest;
use common::tokens::{apply_selection, parse, resolve, Catalog};

use super::helpers::{byte_to_utf16_idx, new_entry, show_toast, utf16_to_byte_idx};
use super::messages::Msg;
use super::state::{ActivePick, ChatComponent};

pub fn update(component: &mut ChatComponent, ctx: &Context<ChatComponent>, msg: Msg) -> bool {
    match msg {
        Msg::UpdateInput(new_text) => {
            if component.input != new_text {
                component.input = new_text;
                component.segments = parse(&component.input);
                // Token positions may have shifted; a stale pick must not
                // be applied to the new text.
                component.active_pick = None;
            }
            true
        }
        Msg::TokenClicked {
            literal,
            ordinal,
            x,
            y,
        } => {
            let role = resolve(&literal, &component.input, ordinal);
            let candidates = component.catalogs.candidates(role);
            component.active_pick = Some(ActivePick {
                literal,
                ordinal,
                role,
                candidates,
                anchor: (x, y),
            });
            true
        }
        Msg::DismissPicker => {
            component.active_pick = None;
            true
        }
        Msg::PickValue(value) => {
            if let Some(pick) = component.active_pick.take() {
                component.input =
                    apply_selection(&component.input, &pick.literal, pick.ordinal, &value);
                component.segments = parse(&component.input);
                if let Some(textarea) = component.input_ref.cast::<HtmlTextAreaElement>() {
                    textarea.set_value(&component.input);
                    textarea.focus().ok();
                }
            }
            true
        }
        Msg::Send => {
            let query = component.input.trim().to_string();
            if query.is_empty() || component.sending {
                return false;
            }
            if component.segments.iter().any(|s| s.is_token()) {
                show_toast("Pick a value for every bracketed token before sending.");
                return false;
            }

            component.history.push(new_entry(Sender::User, query.clone()));
            component.input.clear();
            component.segments.clear();
            component.active_pick = None;
            if let Some(textarea) = component.input_ref.cast::<HtmlTextAreaElement>() {
                textarea.set_value("");
            }
            component.sending = true;

            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/chat/query")
                    .json(&QueryRequest { query })
                    .unwrap()
                    .send()
                    .await
                {
                    Ok(response) if response.status() == 200 => {
                        match response.json::<QueryResponse>().await {
                            Ok(payload) => link.send_message(Msg::QueryAnswered(payload.response)),
                            Err(err) => link.send_message(Msg::QueryFailed(err.to_string())),
                        }
                    }
                    Ok(response) => {
                        let body = response.text().await.unwrap_or_default();
                        link.send_message(Msg::QueryFailed(body));
                    }
                    Err(err) => link.send_message(Msg::QueryFailed(err.to_string())),
                }
            });
            true
        }
        Msg::QueryAnswered(text) => {
            component.sending = false;
            component.history.push(new_entry(Sender::Assistant, text));
            true
        }
        Msg::QueryFailed(err) => {
            component.sending = false;
            gloo_console::error!(format!("query failed: {}", err));
            component
                .history
                .push(new_entry(Sender::Assistant, friendly_error(&err)));
            true
        }
        Msg::StatusLoaded(summary) => {
            component.dataset = summary;
            true
        }
        Msg::SuggestionsLoaded(groups) => {
            component.suggestions = groups;
            true
        }
        Msg::CatalogsLoaded(map) => {
            component.catalogs = Catalog::from_dynamic(map);
            true
        }
        Msg::UseSuggestion(text) => {
            insert_at_cursor(component, &text);
            true
        }
        Msg::DatasetLoaded(message) => {
            show_toast(&message);
            super::fetch_status(ctx.link().clone());
            super::fetch_catalogs(ctx.link().clone());
            true
        }
    }
}

/// Inserts a suggestion at the textarea cursor and moves the cursor behind
/// it. Falls back to replacing the whole input when the textarea is not
/// mounted yet.
fn insert_at_cursor(component: &mut ChatComponent, text: &str) {
    if let Some(textarea) = component.input_ref.cast::<HtmlTextAreaElement>() {
        let utf16_pos = textarea.selection_start().unwrap_or(Some(0)).unwrap_or(0) as usize;
        let byte_pos = utf16_to_byte_idx(&component.input, utf16_pos);

        let mut new_text = component.input.clone();
        new_text.insert_str(byte_pos, text);
        component.input = new_text;
        component.segments = parse(&component.input);
        component.active_pick = None;
        textarea.set_value(&component.input);

        let new_utf16_pos = byte_to_utf16_idx(&component.input, byte_pos + text.len());
        let textarea_ref = component.input_ref.clone();
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(10).await;
            if let Some(textarea) = textarea_ref.cast::<HtmlTextAreaElement>() {
                textarea
                    .set_selection_range(new_utf16_pos, new_utf16_pos)
                    .ok();
                textarea.focus().ok();
            }
        });
    } else {
        component.input = text.to_string();
        component.segments = parse(&component.input);
        component.active_pick = None;
    }
}

/// The backend wraps refusals in `{"error": "..."}`; unwrap that when
/// possible so the bubble reads naturally.
fn friendly_error(raw: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw) {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return message.to_string();
        }
    }
    if raw.trim().is_empty() {
        "The request failed. Is the backend running?".to_string()
    } else {
        raw.to_string()
    }
}
