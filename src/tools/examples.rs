//! §4.6.5 `get_component_examples({componentName})`

use crate::context::Index;
use crate::extractor::extract_labeled_code_blocks;

use super::shared::{did_you_mean, error};

pub fn run(index: &Index, component_name: &str) -> String {
    let component_name = component_name.trim();
    if component_name.is_empty() {
        return error("componentName is required.");
    }

    let Some(doc) = index.store.find_by_name(component_name) else {
        let suggestion = did_you_mean(&index.store, component_name, 3)
            .map(|s| format!(" {s}"))
            .unwrap_or_default();
        return format!(
            "No component found matching \"{component_name}\".{suggestion} Use `list_all_docs()` to browse what is indexed."
        );
    };

    let blocks = extract_labeled_code_blocks(&doc.content);
    if blocks.is_empty() {
        return format!(
            "No code examples found for \"{}\". Try `get_props_reference(\"{}\")` for prop documentation, \
             or `search_docs(\"{}\")` for related docs.",
            doc.title, doc.title, doc.title
        );
    }

    let mut out = format!("# Examples: {}\n\n", doc.title);
    for (i, block) in blocks.iter().enumerate() {
        out.push_str(&format!(
            "## Example {}: {}\n\n```{}\n{}\n```\n\n",
            i + 1,
            block.section_heading,
            block.language,
            block.code
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

    fn index_with(content: &str) -> Index {
        let mut store = DocumentStore::new();
        let engine = SearchEngine::new();
        store.add(parse_document("02-components/buttons/Button.md", content));
        Index { store, engine }
    }

    #[test]
    fn emits_numbered_examples_with_language_preserved() {
        let index = index_with(
            "# Button\n\n## Basic Usage\n\n```tsx\n<Button>Click me</Button>\n```\n",
        );
        let response = run(&index, "Button");
        assert!(response.contains("Example 1: Basic Usage"));
        assert!(response.contains("```tsx"));
    }

    #[test]
    fn no_examples_suggests_alternatives() {
        let index = index_with("# Button\n\nNo code here.\n");
        let response = run(&index, "Button");
        assert!(response.contains("No code examples found"));
        assert!(response.contains("get_props_reference"));
    }
}
