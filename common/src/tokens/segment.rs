//! Splits a query string into an interleaved sequence of text and token
//! segments, preserving the original string byte-for-byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one bracketed token: a `[`, one or more non-`]` characters, and a
/// closing `]`. An unterminated `[` never matches and therefore stays plain
/// text.
pub(crate) static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]+\]").expect("valid token regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Token,
}

/// One contiguous slice of the input string.
///
/// Concatenating the `raw` fields of a parse result, in order, reproduces
/// the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// The literal substring, brackets included for tokens.
    pub raw: String,
    /// For tokens, the bracket interior trimmed and lower-cased for
    /// matching. For text, identical to `raw`.
    pub content: String,
    /// Position in the full segment list. Stable only within one parse.
    pub ordinal: usize,
}

impl Segment {
    pub fn is_token(&self) -> bool {
        self.kind == SegmentKind::Token
    }
}

/// Parses `input` into its segment list. Pure and deterministic; the same
/// input always yields the same segments, and malformed bracket sequences
/// degrade to plain text rather than failing.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in TOKEN_RE.find_iter(input) {
        if m.start() > last {
            push_text(&mut segments, &input[last..m.start()]);
        }
        let raw = m.as_str();
        let inner = &raw[1..raw.len() - 1];
        segments.push(Segment {
            kind: SegmentKind::Token,
            raw: raw.to_string(),
            content: inner.trim().to_lowercase(),
            ordinal: segments.len(),
        });
        last = m.end();
    }
    if last < input.len() {
        push_text(&mut segments, &input[last..]);
    }

    segments
}

fn push_text(segments: &mut Vec<Segment>, raw: &str) {
    if raw.is_empty() {
        return;
    }
    segments.push(Segment {
        kind: SegmentKind::Text,
        raw: raw.to_string(),
        content: raw.to_string(),
        ordinal: segments.len(),
    });
}

/// 0-based rank of the token at `index` among all tokens sharing its
/// normalized content, counted left to right. Tokens are matched by literal
/// content equality, never by resolved role.
///
/// Returns 0 when `index` does not point at a token segment.
pub fn token_ordinal(segments: &[Segment], index: usize) -> usize {
    let Some(target) = segments.get(index) else {
        return 0;
    };
    if !target.is_token() {
        return 0;
    }
    segments[..index]
        .iter()
        .filter(|s| s.is_token() && s.content == target.content)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.raw.as_str()).collect()
    }

    #[test]
    fn round_trip_is_lossless() {
        let inputs = [
            "Compare [Business Head] [Name] with [OEM] [Name]",
            "no tokens at all",
            "[OEM]",
            "trailing [OEM",
            "  [ Spaced ]  text [X]",
            "",
        ];
        for input in inputs {
            assert_eq!(rejoin(&parse(input)), input, "round trip for {input:?}");
        }
    }

    #[test]
    fn classifies_tokens_and_text() {
        let segments = parse("[Business Head] vs [OEM]");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].kind, SegmentKind::Token);
        assert_eq!(segments[0].content, "business head");
        assert_eq!(segments[0].raw, "[Business Head]");
        assert_eq!(segments[1].kind, SegmentKind::Text);
        assert_eq!(segments[1].raw, " vs ");
        assert_eq!(segments[2].content, "oem");
    }

    #[test]
    fn token_content_is_trimmed_and_lowercased() {
        let segments = parse("[  OEM Name ]");
        assert_eq!(segments[0].content, "oem name");
        assert_eq!(segments[0].raw, "[  OEM Name ]");
    }

    #[test]
    fn no_empty_segments_at_boundaries() {
        let segments = parse("[A][B]");
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| !s.raw.is_empty()));
    }

    #[test]
    fn unterminated_bracket_stays_text() {
        let segments = parse("revenue for [OEM and more");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Text);
    }

    #[test]
    fn parse_is_idempotent() {
        let input = "Compare [Business Head] [Name] with [OEM] [Name]";
        assert_eq!(parse(input), parse(input));
    }

    #[test]
    fn ordinal_counts_same_literal_only() {
        let segments = parse("[Name] and [OEM] then [Name] and [name]");
        // segment indexes: 0=[Name] 1=text 2=[OEM] 3=text 4=[Name] 5=text 6=[name]
        assert_eq!(token_ordinal(&segments, 0), 0);
        assert_eq!(token_ordinal(&segments, 2), 0);
        assert_eq!(token_ordinal(&segments, 4), 1);
        assert_eq!(token_ordinal(&segments, 6), 2);
        // non-token index
        assert_eq!(token_ordinal(&segments, 1), 0);
    }
}
