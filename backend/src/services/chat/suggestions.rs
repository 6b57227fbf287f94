use actix_web::{HttpResponse, Responder};
use common::model::suggestion::SuggestionGroup;

/// Fixed suggestion groups for the chat sidebar. Entries carry bracketed
/// placeholder tokens on purpose: the frontend parses them into clickable
/// chips that open the role picker.
pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok().json(suggestion_groups())
}

pub fn suggestion_groups() -> Vec<SuggestionGroup> {
    [
        (
            "basic",
            "Basics",
            vec![
                "What's the total revenue?",
                "Show me top regions",
                "How many transactions do we have?",
            ],
        ),
        (
            "comparisons",
            "Comparisons",
            vec![
                "Compare sales between years",
                "What's the revenue growth year over year?",
                "Compare [Business Head] [Name] with [OEM] [Name]",
            ],
        ),
        (
            "partners",
            "Partners",
            vec![
                "Show top partners by revenue",
                "Show regional performance for [Partner]",
            ],
        ),
        (
            "oems",
            "OEMs",
            vec![
                "Show top OEMs by margin",
                "Show regional performance for [OEM]",
            ],
        ),
        (
            "verticals",
            "Verticals",
            vec![
                "Show top verticals by revenue",
                "Show regional performance for [Vertical Account]",
            ],
        ),
        (
            "customers",
            "Customers",
            vec![
                "Show top customers by revenue",
                "Show regional performance for [End Customer]",
            ],
        ),
    ]
    .into_iter()
    .map(|(key, title, queries)| SuggestionGroup {
        key: key.to_string(),
        title: title.to_string(),
        queries: queries.into_iter().map(|q| q.to_string()).collect(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_match_the_advertised_families() {
        let groups = suggestion_groups();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            ["basic", "comparisons", "partners", "oems", "verticals", "customers"]
        );
        assert!(groups.iter().all(|g| !g.queries.is_empty()));
    }

    #[test]
    fn tokenized_entries_parse_into_tokens() {
        use common::tokens::segment;
        let groups = suggestion_groups();
        let tokenized = groups
            .iter()
            .flat_map(|g| g.queries.iter())
            .filter(|q| q.contains('['))
            .count();
        assert!(tokenized >= 4, "suggestions should exercise the token input");
        for query in groups.iter().flat_map(|g| g.queries.iter()) {
            let segments = segment::parse(query);
            let rejoined: String = segments.iter().map(|s| s.raw.as_str()).collect();
            assert_eq!(&rejoined, query);
        }
    }
}
