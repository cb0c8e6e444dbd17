//! Search Engine (C4): inverted index over tokenized document bodies,
//! weighted by field, ranked by a TF-IDF/length-normalized score (spec
//! §4.4). Operates on an explicit `&DocumentStore` back-reference rather
//! than a captured closure, per the redesign note in spec §9.

use std::collections::HashMap;

use crate::model::{DocumentEntry, Module};
use crate::store::DocumentStore;
use crate::tokenizer::tokenize;

const TITLE_WEIGHT: f64 = 5.0;
const HEADING_WEIGHT: f64 = 3.0;
const BODY_WEIGHT: f64 = 1.0;
const EXCERPT_WINDOW: usize = 200;
const EXCERPT_LEAD: usize = 40;

#[derive(Debug, Default)]
pub struct SearchEngine {
    /// term -> docId -> weighted term frequency
    postings: HashMap<String, HashMap<String, f64>>,
    /// docId -> total weighted token count, for length normalization
    doc_lengths: HashMap<String, f64>,
    /// term -> number of documents containing it
    doc_freq: HashMap<String, usize>,
    doc_count: usize,
}

/// One ranked search result (spec §4.4 "Result shape").
pub struct SearchHit<'a> {
    pub document: &'a DocumentEntry,
    pub score: f64,
    pub relevance: u32,
    pub excerpt: String,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.postings.clear();
        self.doc_lengths.clear();
        self.doc_freq.clear();
        self.doc_count = 0;
    }

    /// Index one document's title/headings/body field streams at their
    /// respective weights.
    pub fn index_document(&mut self, entry: &DocumentEntry) {
        let mut term_weights: HashMap<String, f64> = HashMap::new();
        for t in tokenize(&entry.title) {
            *term_weights.entry(t).or_insert(0.0) += TITLE_WEIGHT;
        }

        let mut heading_text = String::new();
        let mut body_text = String::new();
        for line in entry.content.lines() {
            if line.trim_start().starts_with('#') {
                heading_text.push_str(line);
                heading_text.push(' ');
            } else {
                body_text.push_str(line);
                body_text.push(' ');
            }
        }
        for t in tokenize(&heading_text) {
            *term_weights.entry(t).or_insert(0.0) += HEADING_WEIGHT;
        }
        for t in tokenize(&body_text) {
            *term_weights.entry(t).or_insert(0.0) += BODY_WEIGHT;
        }

        let doc_len: f64 = term_weights.values().sum();
        let is_new_doc = !self.doc_lengths.contains_key(&entry.id);
        self.doc_lengths.insert(entry.id.clone(), doc_len);

        for (term, weight) in term_weights {
            let postings_for_term = self.postings.entry(term.clone()).or_default();
            let new_for_term = !postings_for_term.contains_key(&entry.id);
            postings_for_term.insert(entry.id.clone(), weight);
            if new_for_term {
                *self.doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if is_new_doc {
            self.doc_count += 1;
        }
    }

    fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0);
        ((self.doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln()
    }

    /// Rank documents for `query`, optionally restricted to `module`.
    /// Empty or all-stopword queries, and unknown modules, yield an empty
    /// result list rather than an error.
    pub fn search<'a>(
        &self,
        store: &'a DocumentStore,
        query: &str,
        module: Option<Module>,
        limit: usize,
    ) -> Vec<SearchHit<'a>> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<String, f64> = HashMap::new();
        for term in &terms {
            let Some(postings) = self.postings.get(term) else {
                continue;
            };
            let idf = self.idf(term);
            for (doc_id, tf) in postings {
                let len = self.doc_lengths.get(doc_id).copied().unwrap_or(1.0).max(1.0);
                let contribution = tf * idf * (1.0 / len.sqrt());
                *scores.entry(doc_id.clone()).or_insert(0.0) += contribution;
            }
        }

        let mut ranked: Vec<(String, f64)> = scores.into_iter().collect();

        if let Some(module) = module {
            ranked.retain(|(doc_id, _)| {
                store
                    .get_by_id(doc_id)
                    .map(|e| e.module == module)
                    .unwrap_or(false)
            });
        }

        ranked.retain(|(doc_id, _)| store.get_by_id(doc_id).is_some());

        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    let ea = store.get_by_id(&a.0).unwrap();
                    let eb = store.get_by_id(&b.0).unwrap();
                    ea.title
                        .len()
                        .cmp(&eb.title.len())
                        .then_with(|| ea.title.cmp(&eb.title))
                })
        });

        let top_score = ranked.first().map(|(_, s)| *s).unwrap_or(0.0);

        ranked
            .into_iter()
            .take(limit)
            .filter_map(|(doc_id, score)| {
                let document = store.get_by_id(&doc_id)?;
                let relevance = if top_score > 0.0 {
                    ((100.0 * score / top_score).round()) as u32
                } else {
                    0
                };
                let excerpt = self.excerpt(document, &terms);
                Some(SearchHit {
                    document,
                    score,
                    relevance,
                    excerpt,
                })
            })
            .collect()
    }

    /// Locate the earliest window containing the highest-df query term
    /// present in the document, padded to a sentence/word boundary.
    fn excerpt(&self, document: &DocumentEntry, query_terms: &[String]) -> String {
        let body = strip_title_line(&document.content);
        let lower_body = body.to_lowercase();

        let mut best_term: Option<&str> = None;
        let mut best_df = -1i64;
        for term in query_terms {
            if lower_body.contains(term.as_str()) {
                let df = self.doc_freq.get(term).copied().unwrap_or(0) as i64;
                if df > best_df {
                    best_df = df;
                    best_term = Some(term);
                }
            }
        }

        let Some(term) = best_term else {
            return default_excerpt(body);
        };

        let Some(byte_pos) = lower_body.find(term) else {
            return default_excerpt(body);
        };

        let start = byte_pos.saturating_sub(EXCERPT_LEAD);
        let start = floor_char_boundary(body, start);
        let mut end = (start + EXCERPT_WINDOW).min(body.len());
        end = ceil_char_boundary(body, end);

        let start = expand_to_word_boundary_start(body, start);
        let end = expand_to_word_boundary_end(body, end);

        let mut excerpt = body[start..end].trim().to_string();
        if start > 0 {
            excerpt = format!("…{excerpt}");
        }
        if end < body.len() {
            excerpt = format!("{excerpt}…");
        }
        excerpt
    }
}

fn strip_title_line(content: &str) -> &str {
    match content.find('\n') {
        Some(idx) if content[..idx].trim_start().starts_with('#') => &content[idx + 1..],
        _ => content,
    }
}

fn default_excerpt(body: &str) -> String {
    let end = ceil_char_boundary(body, EXCERPT_WINDOW.min(body.len()));
    let end = expand_to_word_boundary_end(body, end);
    let excerpt = body[..end].trim().to_string();
    if end < body.len() {
        format!("{excerpt}…")
    } else {
        excerpt
    }
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn expand_to_word_boundary_start(body: &str, mut start: usize) -> usize {
    while start > 0 {
        let ch = body[..start].chars().next_back();
        match ch {
            Some(c) if c.is_whitespace() || ".!?".contains(c) => break,
            _ => start -= body[..start].chars().next_back().map(|c| c.len_utf8()).unwrap_or(1),
        }
    }
    start
}

fn expand_to_word_boundary_end(body: &str, mut end: usize) -> usize {
    while end < body.len() {
        let ch = body[end..].chars().next();
        match ch {
            Some(c) if c.is_whitespace() || ".!?".contains(c) => break,
            _ => end += ch.map(|c| c.len_utf8()).unwrap_or(1),
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::parse_document;

    fn sample_engine_and_store() -> (SearchEngine, DocumentStore) {
        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();

        let docs = [
            (
                "02-components/data-display/Table.md",
                "# Table\n\n## Sorting\n\nA sortable table supports column sorting.\n",
            ),
            (
                "02-components/buttons/Button.md",
                "# Button\n\nA clickable control with no sorting behavior.\n",
            ),
            (
                "03-patterns/data/09-sorting.md",
                "# Sortable Lists\n\nPatterns for sortable column headers.\n",
            ),
        ];

        for (path, content) in docs {
            let entry = parse_document(path, content);
            engine.index_document(&entry);
            store.add(entry);
        }

        (engine, store)
    }

    #[test]
    fn title_match_outranks_body_only_match() {
        let (engine, store) = sample_engine_and_store();
        let hits = engine.search(&store, "sortable table column", None, 10);
        assert!(!hits.is_empty());
        assert!(hits[0].document.title.contains("Table") || hits[0].document.title.contains("Sort"));
    }

    #[test]
    fn module_filter_excludes_other_modules() {
        let (engine, store) = sample_engine_and_store();
        let hits = engine.search(&store, "sorting", Some(Module::Components), 10);
        assert!(hits.iter().all(|h| h.document.module == Module::Components));
    }

    #[test]
    fn empty_query_returns_no_results() {
        let (engine, store) = sample_engine_and_store();
        assert!(engine.search(&store, "", None, 10).is_empty());
        assert!(engine.search(&store, "the and for", None, 10).is_empty());
    }

    #[test]
    fn unknown_module_filter_returns_empty() {
        let (engine, store) = sample_engine_and_store();
        let hits = engine.search(&store, "sorting", Some(Module::Enterprise), 10);
        assert!(hits.is_empty());
    }
}
