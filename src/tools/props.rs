//! §4.6.6 `get_props_reference({componentName})`
//!
//! The fallback table scan always runs regardless of the resolved
//! document's module (spec §9 open question, resolved: yes, always).

use crate::extractor::{extract_props_section, find_prop_like_tables};
use crate::context::Index;

use super::shared::{did_you_mean, error, metadata_header};

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
            "No document found matching \"{component_name}\".{suggestion} Use `list_all_docs()` to browse what is indexed."
        );
    };

    if let Some(section) = extract_props_section(&doc.content) {
        return format!("{}\n\n---\n\n{}", metadata_header(doc), section);
    }

    let fallback_tables = find_prop_like_tables(&doc.content);
    if !fallback_tables.is_empty() {
        let mut out = format!(
            "{}\n\n---\n\nExtracted from inline tables (no dedicated Props section was found):\n\n",
            metadata_header(doc)
        );
        for (i, table) in fallback_tables.iter().enumerate() {
            out.push_str(&format!("### Table {}\n\n{}\n\n", i + 1, table));
        }
        return out.trim_end().to_string() + "\n";
    }

    let module_note = if doc.category.is_none() {
        format!(" Note: \"{}\" is not a component document.", doc.title)
    } else {
        String::new()
    };
    format!(
        "No props reference found for \"{}\".{} Try `get_component_examples(\"{}\")` for usage instead.",
        doc.title, module_note, doc.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    fn index_with(path: &str, content: &str) -> Index {
        let mut store = DocumentStore::new();
        let engine = SearchEngine::new();
        store.add(parse_document(path, content));
        Index { store, engine }
    }

    #[test]
    fn emits_dedicated_props_section() {
        let index = index_with(
            "02-components/overlays/Dialog.md",
            "# Dialog\n\n## Dialog Props\n\n| Prop | Type |\n|---|---|\n| open | boolean |\n",
        );
        let response = run(&index, "Dialog");
        assert!(response.contains("| Prop | Type |"));
        assert!(response.starts_with("# Dialog"));
    }

    #[test]
    fn falls_back_to_inline_tables_with_note() {
        let index = index_with(
            "02-components/overlays/Dialog.md",
            "# Dialog\n\n## Layout\n\n| Name | Description |\n|---|---|\n| header | top slot |\n",
        );
        let response = run(&index, "Dialog");
        assert!(response.contains("Extracted from inline tables"));
        assert!(response.contains("Table 1"));
    }

    #[test]
    fn non_component_without_table_mentions_it_is_not_a_component() {
        let index = index_with("03-patterns/forms/01-login.md", "# Login Form\n\nNo table here.\n");
        let response = run(&index, "Login Form");
        assert!(response.contains("not a component document"));
    }
}
