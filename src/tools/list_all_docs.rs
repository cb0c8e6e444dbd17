//! §4.6.4 `list_all_docs()`

use std::collections::BTreeMap;

use crate::context::Index;
use crate::model::Module;

use super::shared::{capitalize_words, indicator_glyphs};

pub fn run(index: &Index) -> String {
    let mut out = String::from("# Documentation Index\n\n");

    for &module in Module::ordered() {
        let docs = index.store.get_by_module(module);
        if docs.is_empty() {
            continue;
        }

        out.push_str(&format!("## {}\n\n", capitalize_words(module.as_str())));

        if module == Module::Components {
            let mut by_category: BTreeMap<String, Vec<_>> = BTreeMap::new();
            for doc in docs {
                let category = doc
                    .category
                    .clone()
                    .unwrap_or_else(|| "uncategorized".to_string());
                by_category.entry(category).or_default().push(doc);
            }
            for (category, mut entries) in by_category {
                entries.sort_by(|a, b| a.title.cmp(&b.title));
                out.push_str(&format!("### {}\n\n", capitalize_words(&category)));
                for doc in entries {
                    out.push_str(&format!(
                        "- {} (`{}`) {}\n",
                        doc.title,
                        doc.id,
                        indicator_glyphs(doc)
                    ));
                }
                out.push('\n');
            }
        } else {
            let mut docs = docs;
            docs.sort_by(|a, b| a.title.cmp(&b.title));
            for doc in docs {
                out.push_str(&format!(
                    "- {} (`{}`) {}\n",
                    doc.title,
                    doc.id,
                    indicator_glyphs(doc)
                ));
            }
            out.push('\n');
        }
    }

    out.trim_end().to_string() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;
    use crate::search::SearchEngine;
    use crate::store::DocumentStore;

    #[test]
    fn groups_components_by_category_and_keeps_module_order() {
        let mut store = DocumentStore::new();
        let engine = SearchEngine::new();
        store.add(parse_document("01-foundation/01-getting-started.md", "# Getting Started\n"));
        store.add(parse_document("02-components/buttons/Button.md", "# Button\n"));
        store.add(parse_document("02-components/forms/Input.md", "# Input\n"));
        let index = Index { store, engine };

        let response = run(&index);
        let foundation_pos = response.find("## Foundation").unwrap();
        let components_pos = response.find("## Components").unwrap();
        assert!(foundation_pos < components_pos);
        assert!(response.contains("### Buttons"));
        assert!(response.contains("### Forms"));
    }
}
