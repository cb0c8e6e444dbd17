//! Tokenizer + stop-list (C3), shared between the index builder and the
//! query path so ranking stays consistent (spec §4.3).

/// Fixed English stop-list, ~60 entries, matching spec §4.3.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "use", "can", "will", "you",
    "your", "are", "was", "were", "been", "from", "have", "has", "had", "not",
    "but", "all", "any", "its", "our", "out", "into", "over", "under", "then",
    "than", "also", "more", "most", "some", "such", "each", "both", "few",
    "only", "own", "same", "too", "very", "just", "now", "here", "there",
    "when", "where", "why", "how", "what", "who", "which", "while", "about",
    "above", "after", "again", "against", "once",
];

/// `tokenize(text) -> [String]`: lowercase, collapse non-`[a-z0-9]` runs to
/// a single separator, split, drop tokens shorter than 2 chars, drop
/// stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch);
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, token: String) {
    if token.len() < 2 {
        return;
    }
    if STOPWORDS.contains(&token.as_str()) {
        return;
    }
    tokens.push(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stopwords_and_short_tokens() {
        let tokens = tokenize("The Button and a Card for forms");
        assert_eq!(tokens, vec!["button", "card", "forms"]);
    }

    #[test]
    fn splits_on_punctuation() {
        let tokens = tokenize("Data-Grid: sortable/column!");
        assert_eq!(tokens, vec!["data", "grid", "sortable", "column"]);
    }

    #[test]
    fn empty_and_all_stopword_queries_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("the and for").is_empty());
    }
}
