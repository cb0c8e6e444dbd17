//! §4.6.8 `get_pattern({patternCategory?, patternName?})`

use crate::context::Index;
use crate::model::{DocumentEntry, Module, normalize};

use super::shared::{capitalize_words, metadata_header};

const PATTERN_CATEGORIES: &[&str] = &[
    "composition",
    "data",
    "forms",
    "layout",
    "modals",
    "navigation",
    "state",
];

/// The sub-folder directly under the `patterns` module, lowercased, for
/// documents that live in the `patterns` module. `None` for anything else
/// or for a pattern file sitting directly under the module root.
fn pattern_category_of(doc: &DocumentEntry) -> Option<String> {
    if doc.module != Module::Patterns {
        return None;
    }
    let mut segments = doc.relative_path.replace('\\', "/");
    segments = segments.trim_start_matches('/').to_string();
    let mut parts = segments.split('/');
    let _module_segment = parts.next();
    let category_segment = parts.next()?;
    parts.next()?; // require at least one more segment (the file itself)
    Some(strip_numeric_prefix(category_segment).to_lowercase())
}

fn strip_numeric_prefix(segment: &str) -> &str {
    let digits: usize = segment.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && segment[digits..].starts_with('-') {
        &segment[digits + 1..]
    } else {
        segment
    }
}

pub fn run(index: &Index, pattern_category: Option<&str>, pattern_name: Option<&str>) -> String {
    match pattern_category.map(str::trim).filter(|c| !c.is_empty()) {
        None => overview(),
        Some(category) => {
            let key = category.to_lowercase();
            if !PATTERN_CATEGORIES.contains(&key.as_str()) {
                return format!(
                    "Unknown pattern category \"{category}\". Valid categories: {}.",
                    PATTERN_CATEGORIES.join(", ")
                );
            }

            let mut docs: Vec<&DocumentEntry> = index
                .store
                .get_by_module(Module::Patterns)
                .into_iter()
                .filter(|d| pattern_category_of(d).as_deref() == Some(key.as_str()))
                .collect();
            docs.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

            match pattern_name.map(str::trim).filter(|n| !n.is_empty()) {
                None => list_category(&category, &docs),
                Some(name) => match find_in_category(&docs, name) {
                    Some(doc) => format!("{}\n\n---\n\n{}", metadata_header(doc), doc.content),
                    None => format!(
                        "No pattern named \"{name}\" found in category \"{category}\". Available patterns:\n\n{}",
                        list_titles(&docs)
                    ),
                },
            }
        }
    }
}

fn find_in_category<'a>(docs: &[&'a DocumentEntry], name: &str) -> Option<&'a DocumentEntry> {
    let normalized_name = normalize(name);
    let lower_name = name.to_lowercase();

    if let Some(doc) = docs
        .iter()
        .find(|d| d.title.to_lowercase().contains(&lower_name))
    {
        return Some(doc);
    }
    if let Some(doc) = docs.iter().find(|d| {
        let filename = d.relative_path.rsplit('/').next().unwrap_or("");
        let stem = filename.strip_suffix(".md").unwrap_or(filename);
        strip_numeric_prefix(stem)
            .to_lowercase()
            .contains(&lower_name)
    }) {
        return Some(doc);
    }
    docs.iter()
        .find(|d| normalize(&d.id).contains(&normalized_name))
        .copied()
}

fn list_category(category: &str, docs: &[&DocumentEntry]) -> String {
    if docs.is_empty() {
        return format!("No patterns are currently indexed in category \"{category}\".");
    }
    format!(
        "## {} Patterns\n\n{}",
        capitalize_words(category),
        list_titles(docs)
    )
}

fn list_titles(docs: &[&DocumentEntry]) -> String {
    docs.iter()
        .map(|d| format!("- {} (`{}`)", d.title, d.id))
        .collect::<Vec<_>>()
        .join("\n")
}

fn overview() -> String {
    let mut out = "## Pattern Categories\n\n".to_string();
    for category in PATTERN_CATEGORIES {
        out.push_str(&format!("- **{}**\n", capitalize_words(category)));
    }
    out.push_str("\nUse `get_pattern(\"<category>\")` to list patterns in a category.");
    out
}
