//! §4.6.10 `suggest_components({uiDescription})`
//!
//! Combines three static-table-driven strategies (keyword map, search
//! engine, category inference) and merges contributions by component id
//! (spec §9 redesign note: sum-typed literal tables, not hash maps of
//! loose values).

use std::collections::HashMap;

use crate::context::Index;
use crate::model::{DocumentEntry, Module};

use super::shared::{error, hint, traffic_light};

const MAX_SUGGESTIONS: usize = 10;
const MIN_RELEVANCE: f64 = 5.0;
const CATEGORY_RELEVANCE: f64 = 15.0;

/// `(keywords, components, base relevance)`
const KEYWORD_MAP: &[(&[&str], &[&str], f64)] = &[
    (&["login", "sign in", "signin", "authentication"], &["Input", "Field", "Button"], 35.0),
    (&["checkbox", "remember me", "remember-me"], &["Checkbox"], 45.0),
    (&["toggle", "switch", "on/off"], &["Switch"], 45.0),
    (&["form", "input field", "text field", "signup", "register"], &["Input", "Field"], 40.0),
    (&["button", "cta", "submit", "action"], &["Button"], 50.0),
    (&["table", "grid", "sortable", "rows", "columns"], &["DataGrid", "Table"], 45.0),
    (&["dialog", "modal", "popup", "confirm"], &["Dialog"], 50.0),
    (&["menu", "dropdown", "options list"], &["Menu", "MenuList"], 45.0),
    (&["notification", "toast", "alert", "message"], &["Toast", "MessageBar"], 45.0),
    (&["navigation", "tabs", "breadcrumb"], &["TabList", "Breadcrumb"], 40.0),
    (&["card", "container", "panel"], &["Card"], 35.0),
    (&["tooltip", "hint", "help text"], &["Tooltip"], 35.0),
    (&["avatar", "profile", "user icon"], &["Avatar", "Persona"], 35.0),
    (&["spinner", "loading", "progress"], &["Spinner", "ProgressBar"], 35.0),
];

/// `(keywords, inferred category)`
const CATEGORY_MAP: &[(&[&str], &str)] = &[
    (&["form", "login", "input", "field", "checkbox", "signup", "register"], "forms"),
    (&["button", "cta", "action", "submit"], "buttons"),
    (&["table", "grid", "data", "sort"], "data-display"),
    (&["dialog", "modal", "toast", "alert", "notification"], "feedback"),
    (&["menu", "popover", "dropdown", "overlay"], "overlays"),
    (&["nav", "tabs", "breadcrumb", "navigation"], "navigation"),
    (&["layout", "card", "panel", "container"], "layout"),
];

struct Contribution {
    relevance: f64,
    reason: String,
}

pub fn run(index: &Index, ui_description: &str) -> String {
    let ui_description = ui_description.trim();
    if ui_description.is_empty() {
        return error("uiDescription is required.");
    }
    let lower = ui_description.to_lowercase();

    let mut contributions: HashMap<String, Vec<Contribution>> = HashMap::new();

    // Strategy 1: keyword map.
    for (keywords, components, relevance) in KEYWORD_MAP {
        for keyword in *keywords {
            if lower.contains(keyword) {
                for component_name in *components {
                    if let Some(doc) = index.store.find_by_name(component_name) {
                        contributions.entry(doc.id.clone()).or_default().push(Contribution {
                            relevance: *relevance,
                            reason: format!("matched: \"{keyword}\""),
                        });
                    }
                }
            }
        }
    }

    // Strategy 2: search engine, top 2*N in the components module.
    let hits = index
        .engine
        .search(&index.store, ui_description, Some(Module::Components), MAX_SUGGESTIONS * 2);
    for hit in hits {
        contributions
            .entry(hit.document.id.clone())
            .or_default()
            .push(Contribution {
                relevance: hit.relevance as f64,
                reason: "search match".to_string(),
            });
    }

    // Strategy 3: category inference.
    for (keywords, category) in CATEGORY_MAP {
        if keywords.iter().any(|k| lower.contains(k)) {
            for doc in index.store.get_by_category(category) {
                contributions
                    .entry(doc.id.clone())
                    .or_default()
                    .push(Contribution {
                        relevance: CATEGORY_RELEVANCE,
                        reason: format!("category: {category}"),
                    });
            }
        }
    }

    let mut suggestions: Vec<(f64, Vec<String>, &DocumentEntry)> = contributions
        .into_iter()
        .filter_map(|(id, mut contribs)| {
            let doc = index.store.get_by_id(&id)?;
            contribs.sort_by(|a, b| {
                b.relevance
                    .partial_cmp(&a.relevance)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let primary = contribs[0].relevance;
            let extra: f64 = contribs[1..].iter().map(|c| c.relevance * 0.5).sum();
            let relevance = (primary + extra).min(100.0);
            let reasons = contribs.into_iter().map(|c| c.reason).collect();
            Some((relevance, reasons, doc))
        })
        .filter(|(relevance, _, _)| *relevance >= MIN_RELEVANCE)
        .collect();

    suggestions.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.2.title.cmp(&b.2.title))
    });
    suggestions.truncate(MAX_SUGGESTIONS);

    if suggestions.is_empty() {
        return format!(
            "No component suggestions matched \"{ui_description}\". Try `search_docs(\"{ui_description}\")` \
             or `list_by_category()` to browse available components."
        );
    }

    let mut out = format!("## Suggested Components for: \"{ui_description}\"\n\n");
    for (relevance, reasons, doc) in suggestions {
        let relevance = relevance.round() as u32;
        out.push_str(&format!(
            "{} **{}** ({relevance}%)\n",
            traffic_light(relevance),
            doc.title
        ));
        if let Some(description) = &doc.metadata.description {
            out.push_str(&format!("   {description}\n"));
        }
        out.push_str(&format!("   Why: {}\n", reasons.join("; ")));
        let category = doc.category.as_deref().unwrap_or("uncategorized");
        let package = doc.metadata.package_name.as_deref().unwrap_or("unknown");
        out.push_str(&format!("   Category: {category} · Package: `{package}`\n"));
        out.push_str(&format!(
            "   {} · {}\n\n",
            hint(format!("query_component(\"{}\")", doc.title)),
            hint(format!("get_component_examples(\"{}\")", doc.title)),
        ));
    }

    out.trim_end().to_string() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    fn sample_index() -> Index {
        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        for (path, content) in [
            (
                "02-components/forms/Input.md",
                "# Input\n\nA single-line text field for forms.\n",
            ),
            (
                "02-components/forms/Checkbox.md",
                "# Checkbox\n\nA tri-state input used to remember choices.\n",
            ),
            (
                "02-components/buttons/Button.md",
                "# Button\n\nA clickable call to action.\n",
            ),
        ] {
            let entry = parse_document(path, content);
            engine.index_document(&entry);
            store.add(entry);
        }
        Index { store, engine }
    }

    #[test]
    fn login_form_suggestion_surfaces_relevant_components() {
        let index = sample_index();
        let response = run(&index, "login form with remember me checkbox");
        assert!(response.contains("Checkbox") || response.contains("Input") || response.contains("Button"));
        assert!(response.contains("Category: forms") || response.contains("Category: buttons"));
    }

    #[test]
    fn caps_result_count_and_enforces_min_relevance() {
        let index = sample_index();
        let response = run(&index, "login form with remember me checkbox");
        let bullet_count = response.matches("🟢").count()
            + response.matches("🟡").count()
            + response.matches("⚪").count();
        assert!(bullet_count <= MAX_SUGGESTIONS);
    }

    #[test]
    fn empty_description_is_input_error() {
        let index = sample_index();
        assert!(run(&index, "  ").starts_with("**Error:**"));
    }
}
