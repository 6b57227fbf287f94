//! Sales-analytics chat: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `ChatProps`, `ChatComponent`).
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - On first render, load the dataset status, the suggestion groups and
//!   the dataset-derived catalogs from the backend.

use gloo_net::http::Request;
use std::collections::HashMap;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::dataset::DatasetSummary;
use common::model::suggestion::SuggestionGroup;

pub(crate) mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ChatProps;
pub use state::ChatComponent;

impl Component for ChatComponent {
    type Message = Msg;
    type Properties = ChatProps;

    fn create(ctx: &Context<Self>) -> Self {
        ChatComponent::new(ctx.props().greeting.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            fetch_status(ctx.link().clone());
            fetch_suggestions(ctx.link().clone());
            fetch_catalogs(ctx.link().clone());
        }
    }
}

/// Refreshes the dataset summary shown in the header.
pub(super) fn fetch_status(link: Scope<ChatComponent>) {
    spawn_local(async move {
        if let Ok(response) = Request::get("/api/dataset/status").send().await {
            if response.status() == 200 {
                if let Ok(summary) = response.json::<DatasetSummary>().await {
                    link.send_message(Msg::StatusLoaded(summary));
                }
            }
        }
    });
}

/// Loads the suggestion groups once; they are static on the server.
pub(super) fn fetch_suggestions(link: Scope<ChatComponent>) {
    spawn_local(async move {
        if let Ok(response) = Request::get("/api/chat/suggestions").send().await {
            if response.status() == 200 {
                if let Ok(groups) = response.json::<Vec<SuggestionGroup>>().await {
                    link.send_message(Msg::SuggestionsLoaded(groups));
                }
            }
        }
    });
}

/// Pulls the dataset-derived candidate lists; an empty map keeps the
/// static fallback catalog in place.
pub(super) fn fetch_catalogs(link: Scope<ChatComponent>) {
    spawn_local(async move {
        if let Ok(response) = Request::get("/api/dataset/catalogs").send().await {
            if response.status() == 200 {
                if let Ok(map) = response.json::<HashMap<String, Vec<String>>>().await {
                    link.send_message(Msg::CatalogsLoaded(map));
                }
            }
        }
    });
}
