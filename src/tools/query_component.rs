//! §4.6.1 `query_component({componentName})`

use crate::context::Index;
use crate::model::Module;

use super::shared::{did_you_mean, error, metadata_header};

pub fn run(index: &Index, component_name: &str) -> String {
    let component_name = component_name.trim();
    if component_name.is_empty() {
        return error("componentName is required.");
    }

    match index.store.find_by_name(component_name) {
        Some(doc) => format!("{}\n\n---\n\n{}", metadata_header(doc), doc.content),
        None => not_found(index, component_name),
    }
}

fn not_found(index: &Index, component_name: &str) -> String {
    let mut components: Vec<_> = index.store.get_by_module(Module::Components);
    components.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.title.cmp(&b.title))
    });

    let mut out = format!("No component found matching \"{component_name}\".");
    if let Some(suggestion) = did_you_mean(&index.store, component_name, 3) {
        out.push_str(&format!(" {suggestion}"));
    }
    out.push_str(" Known components, grouped by category:\n");

    let mut current_category: Option<&str> = None;
    for doc in &components {
        let category = doc.category.as_deref().unwrap_or("uncategorized");
        if current_category != Some(category) {
            out.push_str(&format!("\n### {category}\n"));
            current_category = Some(category);
        }
        out.push_str(&format!("- {}\n", doc.title));
    }

    if components.is_empty() {
        out.push_str("\n(no components are currently indexed)\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    fn index_with_button() -> Index {
        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        let entry = parse_document(
            "02-components/buttons/Button.md",
            "# Button\n\n**Package:** `@fluentui/react-components`\n\nA clickable control.\n",
        );
        engine.index_document(&entry);
        store.add(entry);
        Index { store, engine }
    }

    #[test]
    fn resolves_and_emits_header_then_body() {
        let index = index_with_button();
        let response = run(&index, "button");
        assert!(response.starts_with("# Button"));
        assert!(response.contains("**Package:** `@fluentui/react-components`"));
        assert!(response.ends_with("A clickable control.\n"));
    }

    #[test]
    fn missing_component_lists_known_ones() {
        let index = index_with_button();
        let response = run(&index, "totally-unknown-thing");
        assert!(!response.starts_with("**Error:**"));
        assert!(response.contains("Button"));
    }

    #[test]
    fn empty_name_is_an_input_error() {
        let index = index_with_button();
        let response = run(&index, "   ");
        assert!(response.starts_with("**Error:**"));
    }
}
