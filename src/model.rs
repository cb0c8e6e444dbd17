//! Core data model: the typed document corpus entries and their derived
//! metadata (spec §3).

use serde::{Deserialize, Serialize};

/// Top-level documentation area, inferred from the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    Foundation,
    Components,
    Patterns,
    Enterprise,
    QuickReference,
    Other,
}

impl Module {
    /// Map a docs-root top-level folder name (numeric prefix already
    /// stripped) to its module enum, defaulting unknown segments to
    /// `Other`.
    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "foundation" => Module::Foundation,
            "components" => Module::Components,
            "patterns" => Module::Patterns,
            "enterprise" => Module::Enterprise,
            "quick-reference" => Module::QuickReference,
            _ => Module::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Foundation => "foundation",
            Module::Components => "components",
            Module::Patterns => "patterns",
            Module::Enterprise => "enterprise",
            Module::QuickReference => "quick-reference",
            Module::Other => "other",
        }
    }

    /// Canonical display order used by `list_all_docs`.
    pub fn ordered() -> &'static [Module] {
        &[
            Module::Foundation,
            Module::Components,
            Module::Patterns,
            Module::Enterprise,
            Module::QuickReference,
            Module::Other,
        ]
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata derived from a document's content by the extractor (C1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    pub package_name: Option<String>,
    pub import_statement: Option<String>,
    pub description: Option<String>,
    pub has_props_table: bool,
    pub has_code_examples: bool,
}

/// One parsed Markdown document (spec §3 `DocumentEntry`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: String,
    pub title: String,
    pub relative_path: String,
    pub content: String,
    pub module: Module,
    pub category: Option<String>,
    pub metadata: DocMetadata,
}

impl DocumentEntry {
    /// Lowercase, non-alphanumerics-collapsed form of the title, used for
    /// fuzzy title matching (store tier 2+) and as the normalized-title
    /// index key.
    pub fn normalized_title(&self) -> String {
        normalize(&self.title)
    }
}

/// Strip everything but ASCII alphanumerics and lowercase the rest. Shared
/// by the store's fuzzy resolver and the search engine's query comparisons.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_from_segment_unknown_is_other() {
        assert_eq!(Module::from_segment("weird-folder"), Module::Other);
        assert_eq!(Module::from_segment("components"), Module::Components);
    }

    #[test]
    fn normalize_strips_punctuation_and_lowercases() {
        assert_eq!(normalize("Data Grid (v2)!"), "datagridv2");
    }
}
