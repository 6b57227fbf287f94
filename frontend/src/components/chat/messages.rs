use common::model::dataset::DatasetSummary;
use common::model::suggestion::SuggestionGroup;
use std::collections::HashMap;

#[derive(Clone)]
pub enum Msg {
    UpdateInput(String),
    /// A token chip was clicked. `literal` is the normalized bracket
    /// content, `ordinal` its rank among same-literal tokens, `x`/`y` the
    /// click coordinates used purely to anchor the picker.
    TokenClicked {
        literal: String,
        ordinal: usize,
        x: i32,
        y: i32,
    },
    DismissPicker,
    PickValue(String),
    Send,
    QueryAnswered(String),
    QueryFailed(String),
    StatusLoaded(DatasetSummary),
    SuggestionsLoaded(Vec<SuggestionGroup>),
    CatalogsLoaded(HashMap<String, Vec<String>>),
    UseSuggestion(String),
    /// Fired by the upload control once an ingest job completes.
    DatasetLoaded(String),
}
