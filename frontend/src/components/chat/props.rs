use yew::prelude::*;

/// Properties for the `ChatComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct ChatProps {
    /// Optional opening assistant message. When `None`, a default greeting
    /// inviting the user to upload a dataset is shown.
    #[prop_or_default]
    pub greeting: Option<String>,
}
