//! Utility functions for the chat component.
//!
//! Covers UTF-16/UTF-8 index conversion for textarea cursor work, toast
//! notifications, chat-entry construction and count formatting.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use common::model::chat::{ChatEntry, Sender};

/// Builds a history entry with a fresh id.
pub fn new_entry(sender: Sender, text: String) -> ChatEntry {
    ChatEntry {
        id: uuid::Uuid::new_v4().to_string(),
        sender,
        text,
    }
}

/// Thousands-separated row count for the header chip.
pub fn format_count(count: usize) -> String {
    (count as u64).to_formatted_string(&Locale::en)
}

/// Converts a UTF-8 byte index to its corresponding UTF-16 code unit
/// index, for programmatically positioning the textarea cursor.
pub fn byte_to_utf16_idx(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx].encode_utf16().count() as u32
}

/// Converts a UTF-16 code unit index (as reported by `selectionStart`)
/// to a UTF-8 byte index usable for slicing.
pub fn utf16_to_byte_idx(s: &str, utf16_idx: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in s.char_indices() {
        if units >= utf16_idx {
            return byte_idx;
        }
        units += ch.len_utf16();
    }
    s.len()
}

/// Displays a temporary notification message at the bottom of the screen.
/// The toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_inner_html(message);
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_conversions_round_trip_ascii() {
        let s = "plain ascii";
        assert_eq!(utf16_to_byte_idx(s, 5), 5);
        assert_eq!(byte_to_utf16_idx(s, 5), 5);
    }

    #[test]
    fn utf16_conversions_handle_multibyte() {
        // 'é' is 2 UTF-8 bytes but 1 UTF-16 unit.
        let s = "héllo";
        assert_eq!(utf16_to_byte_idx(s, 2), 3);
        assert_eq!(byte_to_utf16_idx(s, 3), 2);
        // Emoji: 4 UTF-8 bytes, 2 UTF-16 units.
        let s = "a😀b";
        assert_eq!(utf16_to_byte_idx(s, 3), 5);
        assert_eq!(byte_to_utf16_idx(s, 5), 3);
    }

    #[test]
    fn out_of_range_utf16_index_clamps_to_len() {
        let s = "ab";
        assert_eq!(utf16_to_byte_idx(s, 99), 2);
    }

    #[test]
    fn counts_format_with_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12_345), "12,345");
    }
}
