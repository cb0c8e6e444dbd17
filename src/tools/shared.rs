//! Small formatting helpers shared by every tool handler: the Markdown
//! output conventions fixed by spec §6 (header lines, separators, tool
//! hints, error prefix, indicator glyphs).

use crate::model::DocumentEntry;
use crate::store::DocumentStore;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 25;

pub fn error(message: impl AsRef<str>) -> String {
    format!("**Error:** {}", message.as_ref())
}

pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// `` `query_component("Title")` `` style follow-up hint.
pub fn hint(call: impl AsRef<str>) -> String {
    format!("`{}`", call.as_ref())
}

/// `📁 module · 🏷️ category · 💻 has examples · 📋 has props` tag line.
pub fn tag_line(doc: &DocumentEntry) -> String {
    let mut parts = vec![format!("📁 {}", doc.module)];
    if let Some(category) = &doc.category {
        parts.push(format!("🏷️ {category}"));
    }
    if doc.metadata.has_code_examples {
        parts.push("💻 has examples".to_string());
    }
    if doc.metadata.has_props_table {
        parts.push("📋 has props".to_string());
    }
    parts.join(" · ")
}

pub fn indicator_glyphs(doc: &DocumentEntry) -> String {
    let mut glyphs = String::new();
    if doc.metadata.has_props_table {
        glyphs.push('📋');
    }
    if doc.metadata.has_code_examples {
        glyphs.push('💻');
    }
    glyphs
}

pub fn metadata_header(doc: &DocumentEntry) -> String {
    let mut lines = vec![format!("# {}", doc.title)];
    if let Some(package) = &doc.metadata.package_name {
        lines.push(format!("**Package:** `{package}`"));
    }
    if let Some(import) = &doc.metadata.import_statement {
        lines.push(format!("**Import:** `{import}`"));
    }
    lines.push(format!("**Module:** {}", doc.module));
    if let Some(category) = &doc.category {
        lines.push(format!("**Category:** {category}"));
    }
    lines.join("\n")
}

pub fn traffic_light(relevance: u32) -> &'static str {
    if relevance >= 70 {
        "🟢"
    } else if relevance >= 40 {
        "🟡"
    } else {
        "⚪"
    }
}

pub fn star_if_high(relevance: u32) -> &'static str {
    if relevance >= 50 { " ⭐" } else { "" }
}

/// "Did you mean ...?" line built from the store's Levenshtein-ranked
/// closest titles, for not-found responses. `None` when the store is empty.
pub fn did_you_mean(store: &DocumentStore, query: &str, limit: usize) -> Option<String> {
    let suggestions = store.closest_titles(query, limit);
    if suggestions.is_empty() {
        return None;
    }
    let titles: Vec<&str> = suggestions.iter().map(|d| d.title.as_str()).collect();
    Some(format!("Did you mean: {}?", titles.join(", ")))
}

/// Title-case a kebab-case category/topic name for display, e.g.
/// `data-display` -> `Data Display`.
pub fn capitalize_words(s: &str) -> String {
    s.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
