//! Document Store (C2): owns the parsed corpus, indexed by id, module,
//! category, and normalized title. Pure in-memory, read-mostly after
//! build (spec §4.2).

use std::collections::HashMap;

use crate::model::{DocumentEntry, Module, normalize};

#[derive(Debug, Default)]
pub struct DocumentStore {
    by_id: HashMap<String, DocumentEntry>,
    /// Insertion order of ids, preserved for stable `getByModule`/`getByCategory` views.
    insertion_order: Vec<String>,
    by_module: HashMap<Module, Vec<String>>,
    by_category: HashMap<String, Vec<String>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry into all indexes. A duplicate `id` overwrites the
    /// previous entry (used by reindex) without duplicating its position
    /// in the per-module/category ordering.
    pub fn add(&mut self, entry: DocumentEntry) {
        let id = entry.id.clone();
        let is_new = !self.by_id.contains_key(&id);

        if is_new {
            self.insertion_order.push(id.clone());
            self.by_module.entry(entry.module).or_default().push(id.clone());
            if let Some(category) = &entry.category {
                self.by_category
                    .entry(category.clone())
                    .or_default()
                    .push(id.clone());
            }
        }

        self.by_id.insert(id, entry);
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.insertion_order.clear();
        self.by_module.clear();
        self.by_category.clear();
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&DocumentEntry> {
        self.by_id.get(id)
    }

    pub fn get_by_module(&self, module: Module) -> Vec<&DocumentEntry> {
        self.by_module
            .get(&module)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn get_by_category(&self, category: &str) -> Vec<&DocumentEntry> {
        let key = category.to_lowercase();
        self.by_category
            .get(&key)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn all(&self) -> Vec<&DocumentEntry> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    /// Sorted list of `(module, count)`.
    pub fn modules_with_counts(&self) -> Vec<(Module, usize)> {
        let mut out: Vec<_> = self
            .by_module
            .iter()
            .map(|(m, ids)| (*m, ids.len()))
            .collect();
        out.sort_by_key(|(m, _)| m.as_str().to_string());
        out
    }

    /// Sorted list of `(category, count)`.
    pub fn categories_with_counts(&self) -> Vec<(String, usize)> {
        let mut out: Vec<_> = self
            .by_category
            .iter()
            .map(|(c, ids)| (c.clone(), ids.len()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Deterministic fuzzy-name cascade (spec §4.2):
    /// 1. exact case-insensitive title match
    /// 2. normalized title equality
    /// 3. normalized query is a prefix of a normalized title
    /// 4. normalized query is a substring of a normalized title
    /// 5. any title word starts with the normalized query
    ///
    /// Ties are broken by module priority (`components` first), then
    /// shorter title, then lexicographic title.
    pub fn find_by_name(&self, query: &str) -> Option<&DocumentEntry> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let normalized_query = normalize(query);
        if normalized_query.is_empty() {
            return None;
        }

        let candidates = self.all();

        if let Some(found) = Self::best_of(
            candidates
                .iter()
                .copied()
                .filter(|e| e.title.eq_ignore_ascii_case(query)),
        ) {
            return Some(found);
        }

        if let Some(found) = Self::best_of(
            candidates
                .iter()
                .copied()
                .filter(|e| e.normalized_title() == normalized_query),
        ) {
            return Some(found);
        }

        if let Some(found) = Self::best_of(
            candidates
                .iter()
                .copied()
                .filter(|e| e.normalized_title().starts_with(&normalized_query)),
        ) {
            return Some(found);
        }

        if let Some(found) = Self::best_of(
            candidates
                .iter()
                .copied()
                .filter(|e| e.normalized_title().contains(&normalized_query)),
        ) {
            return Some(found);
        }

        Self::best_of(candidates.iter().copied().filter(|e| {
            e.title
                .split_whitespace()
                .any(|word| normalize(word).starts_with(&normalized_query))
        }))
    }

    /// Pick the best tie-break winner from a tier's candidate set:
    /// `components` module first, then shorter title, then lexicographic.
    fn best_of<'a>(
        candidates: impl Iterator<Item = &'a DocumentEntry>,
    ) -> Option<&'a DocumentEntry> {
        candidates.min_by(|a, b| {
            let priority = |m: Module| if m == Module::Components { 0 } else { 1 };
            priority(a.module)
                .cmp(&priority(b.module))
                .then(a.title.len().cmp(&b.title.len()))
                .then(a.title.cmp(&b.title))
        })
    }

    /// Closest title by Levenshtein distance, used to produce "did you
    /// mean" hints in not-found tool responses. Returns `None` if the
    /// store is empty.
    pub fn closest_titles(&self, query: &str, limit: usize) -> Vec<&DocumentEntry> {
        let mut scored: Vec<(usize, &DocumentEntry)> = self
            .all()
            .into_iter()
            .map(|e| (strsim::levenshtein(&query.to_lowercase(), &e.title.to_lowercase()), e))
            .collect();
        scored.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.title.cmp(&b.1.title)));
        scored.into_iter().take(limit).map(|(_, e)| e).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;

    fn sample_store() -> DocumentStore {
        let mut store = DocumentStore::new();
        store.add(parse_document(
            "02-components/buttons/Button.md",
            "# Button\n\nA clickable control.\n",
        ));
        store.add(parse_document(
            "02-components/forms/Checkbox.md",
            "# Checkbox\n\nA tri-state input.\n",
        ));
        store.add(parse_document(
            "01-foundation/02-theming.md",
            "# Theming\n\nDesign tokens.\n",
        ));
        store
    }

    #[test]
    fn exact_case_insensitive_title_match() {
        let store = sample_store();
        let found = store.find_by_name("button").unwrap();
        assert_eq!(found.title, "Button");
    }

    #[test]
    fn prefix_and_substring_tiers_resolve() {
        let store = sample_store();
        assert_eq!(store.find_by_name("Butt").unwrap().title, "Button");
        assert_eq!(store.find_by_name("heck").unwrap().title, "Checkbox");
    }

    #[test]
    fn unmatched_query_returns_none() {
        let store = sample_store();
        assert!(store.find_by_name("zzz-nonexistent").is_none());
    }

    #[test]
    fn duplicate_id_overwrite_keeps_single_insertion_slot() {
        let mut store = sample_store();
        let before = store.len();
        store.add(parse_document(
            "02-components/buttons/Button.md",
            "# Button\n\nUpdated copy.\n",
        ));
        assert_eq!(store.len(), before);
        assert!(
            store
                .get_by_id("components/buttons/button")
                .unwrap()
                .content
                .contains("Updated")
        );
    }
}
