//! §4.6.9 `get_enterprise({topic})`
//!
//! Enterprise topics are defined by predicate keywords matched against
//! filenames within the `enterprise` module, not by a folder layout.

use crate::context::Index;
use crate::model::{DocumentEntry, Module, normalize};

use super::shared::capitalize_words;

const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("app-shell", &["shell", "app-shell", "layout"]),
    ("dashboard", &["dashboard", "kpi", "widgets"]),
    ("admin", &["admin", "crud"]),
    ("data", &["data", "table", "grid"]),
    ("accessibility", &["accessibility", "a11y", "wcag"]),
];

const ALIASES: &[(&str, &str)] = &[
    ("app-shell", "app-shell"),
    ("shell", "app-shell"),
    ("dashboard", "dashboard"),
    ("kpi", "dashboard"),
    ("admin", "admin"),
    ("crud", "admin"),
    ("data", "data"),
    ("accessibility", "accessibility"),
    ("a11y", "accessibility"),
    ("wcag", "accessibility"),
];

fn resolve_topic(input: &str) -> Option<&'static str> {
    let key = normalize(input);
    ALIASES
        .iter()
        .find(|(alias, _)| normalize(alias) == key)
        .map(|(_, canonical)| *canonical)
}

fn filename_stem(doc: &DocumentEntry) -> String {
    let filename = doc.relative_path.rsplit('/').next().unwrap_or("");
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    stem.to_lowercase()
}

fn matches_topic(doc: &DocumentEntry, canonical: &str) -> bool {
    let Some((_, keywords)) = TOPIC_KEYWORDS.iter().find(|(t, _)| *t == canonical) else {
        return false;
    };
    let stem = filename_stem(doc);
    keywords.iter().any(|kw| stem.contains(kw))
}

pub fn run(index: &Index, topic: &str) -> String {
    let topic = topic.trim();
    if topic.is_empty() {
        return overview();
    }

    let Some(canonical) = resolve_topic(topic) else {
        return format!("Unknown enterprise topic \"{topic}\". {}", overview());
    };

    let mut matches: Vec<&DocumentEntry> = index
        .store
        .get_by_module(Module::Enterprise)
        .into_iter()
        .filter(|d| matches_topic(d, canonical))
        .collect();
    matches.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    if matches.is_empty() {
        return format!(
            "The \"{}\" enterprise topic is recognized but no matching documents are currently indexed.",
            capitalize_words(canonical)
        );
    }

    let mut out = format!("# {}\n\n", capitalize_words(canonical));

    if matches.len() > 1 {
        out.push_str("## Contents\n\n");
        for doc in &matches {
            out.push_str(&format!("- {}\n", doc.title));
        }
        out.push_str("\n---\n\n");
    }

    for (i, doc) in matches.iter().enumerate() {
        if i > 0 {
            out.push_str("\n---\n\n");
        }
        out.push_str(&format!("## {}\n\n{}\n", doc.title, doc.content));
    }

    out
}

fn overview() -> String {
    let mut out = "## Enterprise Topics\n\n".to_string();
    for (topic, _) in TOPIC_KEYWORDS {
        let aliases: Vec<&str> = ALIASES
            .iter()
            .filter(|(alias, target)| target == topic && alias != topic)
            .map(|(alias, _)| *alias)
            .collect();
        let alias_note = if aliases.is_empty() {
            String::new()
        } else {
            format!(" (aliases: {})", aliases.join(", "))
        };
        out.push_str(&format!("- **{}**{}\n", capitalize_words(topic), alias_note));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    fn sample_index() -> Index {
        let mut store = DocumentStore::new();
        let engine = SearchEngine::new();
        store.add(parse_document(
            "04-enterprise/01-app-shell.md",
            "# Application Shell\n\nLayout scaffolding.\n",
        ));
        store.add(parse_document(
            "04-enterprise/02-dashboard-kpi.md",
            "# KPI Dashboard\n\nWidget layout for KPIs.\n",
        ));
        Index { store, engine }
    }

    #[test]
    fn alias_resolves_and_single_doc_has_no_toc() {
        let index = sample_index();
        let response = run(&index, "shell");
        assert!(response.contains("Application Shell"));
        assert!(!response.contains("## Contents"));
    }

    #[test]
    fn kpi_alias_resolves_to_dashboard() {
        let index = sample_index();
        let response = run(&index, "kpi");
        assert!(response.contains("KPI Dashboard"));
    }

    #[test]
    fn empty_topic_is_overview() {
        let index = sample_index();
        let response = run(&index, "");
        assert!(response.starts_with("## Enterprise Topics"));
    }
}
