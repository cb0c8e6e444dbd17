//! §4.6.2 `search_docs({query, module?, limit?})`

use crate::context::Index;
use crate::model::Module;

use super::shared::{clamp_limit, error, hint, tag_line};

fn parse_module(name: &str) -> Option<Module> {
    match name.to_lowercase().as_str() {
        "foundation" => Some(Module::Foundation),
        "components" => Some(Module::Components),
        "patterns" => Some(Module::Patterns),
        "enterprise" => Some(Module::Enterprise),
        "quick-reference" => Some(Module::QuickReference),
        "other" => Some(Module::Other),
        _ => None,
    }
}

pub fn run(index: &Index, query: &str, module: Option<&str>, limit: Option<usize>) -> String {
    let query = query.trim();
    if query.is_empty() {
        return error("query is required.");
    }

    let limit = clamp_limit(limit);

    let module_filter = match module.filter(|m| !m.trim().is_empty()) {
        None => None,
        Some(m) => match parse_module(m) {
            Some(parsed) => Some(parsed),
            None => return no_results(query, module),
        },
    };

    let hits = index.engine.search(&index.store, query, module_filter, limit);
    if hits.is_empty() {
        return no_results(query, module);
    }

    let mut out = format!("## Search Results for \"{query}\"\n\n");
    for (i, hit) in hits.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** ({}% relevant)\n   {}\n   > {}\n   {}\n\n",
            i + 1,
            hit.document.title,
            hit.relevance,
            tag_line(hit.document),
            hit.excerpt,
            hint(format!("query_component(\"{}\")", hit.document.title)),
        ));
    }
    out.trim_end().to_string() + "\n"
}

fn no_results(query: &str, module: Option<&str>) -> String {
    let module_clause = match module.filter(|m| !m.trim().is_empty()) {
        Some(m) => format!(" in module \"{m}\""),
        None => String::new(),
    };
    format!(
        "No results found for \"{query}\"{module_clause}.\n\n\
         Try:\n\
         - Using simpler or fewer terms\n\
         - Removing the module filter\n\
         - Checking `list_all_docs()` for an overview of what is indexed"
    )
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
                "02-components/data-display/Table.md",
                "# Table\n\n## Sorting\n\nA sortable table supports column sorting.\n",
            ),
            (
                "02-components/buttons/Button.md",
                "# Button\n\nA clickable control.\n",
            ),
        ] {
            let entry = parse_document(path, content);
            engine.index_document(&entry);
            store.add(entry);
        }
        Index { store, engine }
    }

    #[test]
    fn returns_numbered_results_with_hints() {
        let index = sample_index();
        let response = run(&index, "sortable table column", None, Some(3));
        assert!(response.contains("1. **Table**") || response.contains("**Table**"));
        assert!(response.contains("query_component(\"Table\")"));
    }

    #[test]
    fn empty_query_is_input_error() {
        let index = sample_index();
        assert!(run(&index, "", None, None).starts_with("**Error:**"));
    }

    #[test]
    fn unknown_module_returns_no_results_message() {
        let index = sample_index();
        let response = run(&index, "table", Some("nonexistent-module"), None);
        assert!(!response.starts_with("**Error:**"));
        assert!(response.contains("No results found"));
    }
}
