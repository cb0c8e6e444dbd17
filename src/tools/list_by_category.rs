//! §4.6.3 `list_by_category({category?})`

use crate::context::Index;

use super::shared::{capitalize_words, indicator_glyphs};

pub fn run(index: &Index, category: Option<&str>) -> String {
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        None => overview(index),
        Some(category) => {
            let key = category.to_lowercase();
            let mut docs = index.store.get_by_category(&key);
            if docs.is_empty() {
                return unknown_category(index, category);
            }
            docs.sort_by(|a, b| a.title.cmp(&b.title));

            let mut out = format!("## {} Components\n\n", capitalize_words(category));
            for doc in docs {
                out.push_str(&format!("- **{}** {}\n", doc.title, indicator_glyphs(doc)));
                if let Some(description) = &doc.metadata.description {
                    out.push_str(&format!("  {description}\n"));
                }
                if let Some(import) = &doc.metadata.import_statement {
                    out.push_str(&format!("  `{import}`\n"));
                }
                out.push_str(&format!(
                    "  Use `query_component(\"{}\")` to view full details.\n\n",
                    doc.title
                ));
            }
            out.trim_end().to_string() + "\n"
        }
    }
}

fn overview(index: &Index) -> String {
    let categories = index.store.categories_with_counts();
    if categories.is_empty() {
        return "No component categories are currently indexed.".to_string();
    }
    let mut out = "## Component Categories\n\n".to_string();
    for (category, count) in categories {
        out.push_str(&format!("- **{}** ({count})\n", capitalize_words(&category)));
    }
    out
}

fn unknown_category(index: &Index, category: &str) -> String {
    let mut out = format!("Unknown category \"{category}\". Available categories:\n\n");
    for (category, count) in index.store.categories_with_counts() {
        out.push_str(&format!("- **{}** ({count})\n", capitalize_words(&category)));
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
        for (path, content) in [
            (
                "02-components/forms/Input.md",
                "# Input\n\n**Import:** `import { Input } from '@fluentui/react-components'`\n\nA single-line text field.\n",
            ),
            (
                "02-components/forms/Checkbox.md",
                "# Checkbox\n\nA tri-state input.\n",
            ),
        ] {
            store.add(parse_document(path, content));
        }
        Index { store, engine }
    }

    #[test]
    fn category_listing_has_expected_title_and_hints() {
        let index = sample_index();
        let response = run(&index, Some("forms"));
        assert!(response.starts_with("## Forms Components"));
        assert!(response.contains("Use `query_component(\"Checkbox\")`"));
        assert!(response.contains("Use `query_component(\"Input\")`"));
    }

    #[test]
    fn unknown_category_lists_valid_ones() {
        let index = sample_index();
        let response = run(&index, Some("not-a-real-category"));
        assert!(response.contains("Forms"));
    }

    #[test]
    fn no_category_gives_overview() {
        let index = sample_index();
        let response = run(&index, None);
        assert!(response.starts_with("## Component Categories"));
    }
}
