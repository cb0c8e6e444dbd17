//! §4.6.7 `get_foundation({topic?})`
//!
//! Topics and their aliases are a fixed closed set, represented as static
//! literal tables rather than a dynamic map (spec §9 redesign note).

use crate::context::Index;
use crate::model::{Module, normalize};

use super::shared::capitalize_words;

const TOPICS: &[(&str, &str)] = &[
    ("getting-started", "Introductory setup, installation, and project wiring."),
    ("fluent-provider", "The root provider component and its configuration."),
    ("theming", "Custom themes, brand ramps, and design tokens."),
    ("styling-griffel", "Component styling with Griffel (`makeStyles`)."),
    (
        "component-architecture",
        "How Fluent UI components are structured internally (slots, state hooks, render functions).",
    ),
    ("accessibility", "Accessibility guidelines and built-in a11y behavior."),
];

const ALIASES: &[(&str, &str)] = &[
    ("theme", "theming"),
    ("theming", "theming"),
    ("tokens", "theming"),
    ("a11y", "accessibility"),
    ("accessibility", "accessibility"),
    ("css", "styling-griffel"),
    ("styles", "styling-griffel"),
    ("styling", "styling-griffel"),
    ("griffel", "styling-griffel"),
    ("styling-griffel", "styling-griffel"),
    ("provider", "fluent-provider"),
    ("fluentprovider", "fluent-provider"),
    ("fluent-provider", "fluent-provider"),
    ("architecture", "component-architecture"),
    ("component-architecture", "component-architecture"),
    ("start", "getting-started"),
    ("setup", "getting-started"),
    ("intro", "getting-started"),
    ("getting-started", "getting-started"),
];

fn resolve_topic(input: &str) -> Option<&'static str> {
    let key = normalize(input);
    ALIASES
        .iter()
        .find(|(alias, _)| normalize(alias) == key)
        .map(|(_, canonical)| *canonical)
}

fn aliases_for(canonical: &str) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(alias, target)| *target == canonical && normalize(alias) != canonical)
        .map(|(alias, _)| *alias)
        .collect()
}

pub fn run(index: &Index, topic: Option<&str>) -> String {
    match topic.map(str::trim).filter(|t| !t.is_empty()) {
        None => overview(),
        Some(raw_topic) => match resolve_topic(raw_topic) {
            None => format!(
                "Unknown foundation topic \"{raw_topic}\". {}",
                overview()
            ),
            Some(canonical) => match find_document(index, canonical) {
                Some(doc) => format!(
                    "# {}\n\n**Module:** {}\n\n---\n\n{}",
                    doc.title, doc.module, doc.content
                ),
                None => format!(
                    "The \"{}\" foundation topic is recognized but not currently indexed.",
                    capitalize_words(canonical)
                ),
            },
        },
    }
}

fn find_document<'a>(index: &'a Index, canonical: &str) -> Option<&'a crate::model::DocumentEntry> {
    index
        .store
        .get_by_module(Module::Foundation)
        .into_iter()
        .find(|doc| doc.id.rsplit('/').next() == Some(canonical))
}

fn overview() -> String {
    let mut out = "## Foundation Topics\n\n".to_string();
    for (topic, description) in TOPICS {
        let aliases = aliases_for(topic);
        let alias_note = if aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", aliases.join(", "))
        };
        out.push_str(&format!(
            "- **{}**{} — {}\n",
            capitalize_words(topic),
            alias_note,
            description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    fn index_with_theming() -> Index {
        let mut store = DocumentStore::new();
        let engine = SearchEngine::new();
        store.add(parse_document(
            "01-foundation/03-theming.md",
            "# Theming\n\nDesign tokens and brand ramps.\n",
        ));
        Index { store, engine }
    }

    #[test]
    fn aliases_resolve_to_the_same_document() {
        let index = index_with_theming();
        let a = run(&index, Some("theme"));
        let b = run(&index, Some("theming"));
        let c = run(&index, Some("THEMING"));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(a.starts_with("# Theming"));
    }

    #[test]
    fn empty_topic_gives_overview_with_aliases() {
        let index = index_with_theming();
        let response = run(&index, None);
        assert!(response.contains("Theming"));
        assert!(response.contains("aliases:"));
    }

    #[test]
    fn recognized_topic_not_indexed_gets_a_note() {
        let index = index_with_theming();
        let response = run(&index, Some("a11y"));
        assert!(response.contains("not currently indexed"));
    }
}
