//! View rendering for the chat component.
//!
//! Layout, top to bottom: header with dataset status and the upload
//! control, the message list, the suggestion panel, and the query input
//! with its token strip. The role picker renders last as a fixed-position
//! overlay anchored at the recorded click coordinates.
//!
//! Assistant answers that embed `<table` markup are injected via
//! `Html::from_html_unchecked`; everything else renders as plain text.

use yew::html::Scope;
use yew::prelude::*;
use yew::virtual_dom::AttrValue;
use web_sys::{HtmlTextAreaElement, MouseEvent};

use common::model::chat::{ChatEntry, Sender};
use common::tokens::token_ordinal;

use super::helpers::format_count;
use super::messages::Msg;
use super::state::ChatComponent;
use crate::components::dataset::DatasetUploadComponent;

pub fn view(component: &ChatComponent, ctx: &Context<ChatComponent>) -> Html {
    let link = ctx.link();
    html! {
        <div style="max-width:860px;margin:0 auto;padding:16px;font-family:Arial, sans-serif;">
            { build_header(component, link) }
            { build_message_list(component) }
            { build_suggestions(component, link) }
            { build_input_area(component, link) }
            { build_role_picker(component, link) }
        </div>
    }
}

/// Title row with the dataset chip and the upload control.
fn build_header(component: &ChatComponent, link: &Scope<ChatComponent>) -> Html {
    let chip = if component.dataset.data_loaded {
        format!(
            "{} rows · {} columns",
            format_count(component.dataset.rows),
            component.dataset.columns
        )
    } else {
        component.dataset.message.clone()
    };
    let chip_color = if component.dataset.data_loaded { "#2e7d32" } else { "#9e9e9e" };

    html! {
        <div style="display:flex;align-items:center;gap:12px;margin-bottom:12px;">
            <h2 style="margin:0;flex:1;">{"Sales Analytics Assistant"}</h2>
            <span style={format!("color:#fff;background:{};padding:4px 10px;border-radius:12px;font-size:12px;", chip_color)}>
                { chip }
            </span>
            <DatasetUploadComponent on_dataset_loaded={link.callback(Msg::DatasetLoaded)} />
        </div>
    }
}

fn build_message_list(component: &ChatComponent) -> Html {
    html! {
        <div style="border:1px solid #e0e0e0;border-radius:8px;padding:12px;min-height:240px;max-height:50vh;overflow-y:auto;background:#fafafa;">
            { for component.history.iter().map(message_bubble) }
            {
                if component.sending {
                    html! { <div style="color:#9e9e9e;font-style:italic;">{"Thinking..."}</div> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn message_bubble(entry: &ChatEntry) -> Html {
    let (align, background) = match entry.sender {
        Sender::User => ("flex-end", "#1565c0"),
        Sender::Assistant => ("flex-start", "#ffffff"),
    };
    let color = match entry.sender {
        Sender::User => "#fff",
        Sender::Assistant => "#212121",
    };
    html! {
        <div key={entry.id.clone()} style={format!("display:flex;justify-content:{};margin:6px 0;", align)}>
            <div style={format!(
                "max-width:80%;padding:8px 12px;border-radius:8px;background:{};color:{};border:1px solid #e0e0e0;",
                background, color
            )}>
                { entry_body(entry) }
            </div>
        </div>
    }
}

fn entry_body(entry: &ChatEntry) -> Html {
    if entry.text.contains("<table") {
        Html::from_html_unchecked(AttrValue::from(entry.text.clone()))
    } else {
        html! { <span style="white-space:pre-wrap;">{ entry.text.clone() }</span> }
    }
}

fn build_suggestions(component: &ChatComponent, link: &Scope<ChatComponent>) -> Html {
    if component.suggestions.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin:12px 0;">
            {
                for component.suggestions.iter().map(|group| html! {
                    <div style="margin-bottom:6px;">
                        <span style="font-size:12px;color:#757575;margin-right:8px;">{ group.title.clone() }</span>
                        {
                            for group.queries.iter().map(|query| {
                                let q = query.clone();
                                html! {
                                    <button
                                        style="margin:2px 4px 2px 0;padding:4px 10px;border:1px solid #bdbdbd;border-radius:14px;background:#fff;cursor:pointer;font-size:12px;"
                                        onclick={link.callback(move |_| Msg::UseSuggestion(q.clone()))}
                                    >
                                        { query.clone() }
                                    </button>
                                }
                            })
                        }
                    </div>
                })
            }
        </div>
    }
}

fn build_input_area(component: &ChatComponent, link: &Scope<ChatComponent>) -> Html {
    html! {
        <>
            <div style="display:flex;gap:8px;align-items:flex-start;margin-top:8px;">
                <textarea
                    ref={component.input_ref.clone()}
                    value={component.input.clone()}
                    placeholder="Ask about revenue, partners, OEMs... use [tokens] from the suggestions"
                    spellcheck="false"
                    rows={2}
                    style="flex:1;padding:8px;border:1px solid #bdbdbd;border-radius:6px;resize:vertical;"
                    oninput={link.callback(|e: InputEvent| {
                        let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
                        Msg::UpdateInput(value)
                    })}
                    onkeydown={link.batch_callback(|e: KeyboardEvent| {
                        if e.key() == "Enter" && !e.shift_key() {
                            e.prevent_default();
                            vec![Msg::Send]
                        } else {
                            vec![]
                        }
                    })}
                />
                <button
                    disabled={component.sending}
                    style="padding:8px 20px;border:none;border-radius:6px;background:#1565c0;color:#fff;cursor:pointer;"
                    onclick={link.callback(|_| Msg::Send)}
                >
                    {"Send"}
                </button>
            </div>
            { build_token_strip(component, link) }
        </>
    }
}

/// Clickable chips for every token in the current input. Clicking one
/// reports the normalized literal, its rank among same-literal tokens, and
/// the click coordinates for anchoring the picker.
fn build_token_strip(component: &ChatComponent, link: &Scope<ChatComponent>) -> Html {
    let chips: Vec<Html> = component
        .segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.is_token())
        .map(|(idx, segment)| {
            let literal = segment.content.clone();
            let ordinal = token_ordinal(&component.segments, idx);
            html! {
                <button
                    style="margin-right:6px;padding:2px 10px;border:1px dashed #1565c0;border-radius:12px;background:#e3f2fd;color:#1565c0;cursor:pointer;font-size:12px;"
                    onclick={link.callback(move |e: MouseEvent| Msg::TokenClicked {
                        literal: literal.clone(),
                        ordinal,
                        x: e.client_x(),
                        y: e.client_y(),
                    })}
                >
                    { segment.raw.clone() }
                </button>
            }
        })
        .collect();

    if chips.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin-top:6px;font-size:12px;color:#757575;">
            <span style="margin-right:8px;">{"Fill in:"}</span>
            { for chips.into_iter() }
        </div>
    }
}

/// The role dropdown, anchored at the recorded click position. A full
/// screen transparent backdrop dismisses it.
fn build_role_picker(component: &ChatComponent, link: &Scope<ChatComponent>) -> Html {
    let Some(pick) = &component.active_pick else {
        return html! {};
    };
    let (x, y) = pick.anchor;

    html! {
        <>
            <div
                style="position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:999;"
                onclick={link.callback(|_| Msg::DismissPicker)}
            />
            <div style={format!(
                "position:fixed;left:{}px;top:{}px;z-index:1000;background:#fff;border:1px solid #bdbdbd;border-radius:6px;box-shadow:0 2px 8px rgba(0,0,0,0.2);min-width:220px;max-height:260px;overflow-y:auto;",
                x, y
            )}>
                <div style="padding:6px 10px;background:#f5f5f5;border-bottom:1px solid #e0e0e0;font-size:12px;color:#616161;">
                    { format!("Select {}", pick.role.display_name()) }
                </div>
                {
                    for pick.candidates.iter().map(|candidate| {
                        let value = candidate.clone();
                        html! {
                            <div
                                style="padding:6px 10px;cursor:pointer;font-size:13px;border-bottom:1px solid #f5f5f5;"
                                onclick={link.callback(move |_| Msg::PickValue(value.clone()))}
                            >
                                { candidate.clone() }
                            </div>
                        }
                    })
                }
            </div>
        </>
    }
}
