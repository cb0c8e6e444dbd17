//! Metadata Extractor (C1): a pure function from `(relativePath, rawContent)`
//! to a `DocumentEntry`, plus the two section-extraction helpers consumed by
//! the tool layer. Line-oriented and defensive: malformed Markdown never
//! aborts, missing fields become `None`/`false` (spec §4.1).

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{DocMetadata, DocumentEntry, Module};

static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(.+?)\s*$").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").unwrap());
static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```\s*([A-Za-z0-9_+-]*)").unwrap());
static PACKAGE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Package:\*\*\s*`([^`]+)`").unwrap());
static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Import:\*\*\s*`([^`]+)`").unwrap());
static IMPORT_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*\{[^}]*\}\s*from\s*['"](@[^'"]+)['"]"#).unwrap()
});

const FLUENT_PACKAGE: &str = "@fluentui/react-components";

/// Parse one Markdown file into a `DocumentEntry`.
pub fn parse_document(relative_path: &str, raw_content: &str) -> DocumentEntry {
    let segments = path_segments(relative_path);
    let module = infer_module(&segments);
    let (id, category, title_basis) = infer_id_category_and_title_basis(&segments, module);

    let title = extract_title(raw_content).unwrap_or_else(|| title_from_basis(&title_basis));
    let description = extract_description(raw_content);
    let (package_name, import_statement) = extract_package_and_import(raw_content);
    let has_props_table = detect_props_table(raw_content);
    let has_code_examples = detect_code_examples(raw_content);

    DocumentEntry {
        id,
        title,
        relative_path: relative_path.to_string(),
        content: raw_content.to_string(),
        module,
        category,
        metadata: DocMetadata {
            package_name,
            import_statement,
            description,
            has_props_table,
            has_code_examples,
        },
    }
}

/// Split a relative path into its segments, normalizing separators.
fn path_segments(relative_path: &str) -> Vec<String> {
    relative_path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip a leading `NN-` numeric prefix from a path segment.
fn strip_numeric_prefix(segment: &str) -> &str {
    let mut chars = segment.char_indices();
    let mut last_digit_end = None;
    for (idx, ch) in chars.by_ref() {
        if ch.is_ascii_digit() {
            last_digit_end = Some(idx + ch.len_utf8());
        } else {
            break;
        }
    }
    match last_digit_end {
        Some(end) if segment[end..].starts_with('-') => &segment[end + 1..],
        _ => segment,
    }
}

/// A leading version directory such as `v9` is skipped when inferring the
/// module from the top-level folder.
fn is_version_segment(segment: &str) -> bool {
    let stripped = strip_numeric_prefix(segment);
    let lower = stripped.to_lowercase();
    lower.len() >= 2
        && lower.starts_with('v')
        && lower[1..].chars().all(|c| c.is_ascii_digit())
}

fn infer_module(segments: &[String]) -> Module {
    let mut iter = segments.iter();
    let mut first = iter.next().map(|s| strip_numeric_prefix(s).to_lowercase());
    if let Some(seg) = &first
        && is_version_segment(seg)
    {
        first = iter.next().map(|s| strip_numeric_prefix(s).to_lowercase());
    }
    match first {
        Some(seg) => Module::from_segment(&seg),
        None => Module::Other,
    }
}

fn is_index_filename(filename_no_ext: &str) -> bool {
    let stripped = strip_numeric_prefix(filename_no_ext);
    stripped.eq_ignore_ascii_case("index") || filename_no_ext.to_lowercase().contains("-index")
}

/// Returns `(id, category, title_basis)`. `title_basis` is the segment the
/// fallback title (when no H1 is present) should be derived from: the
/// filename normally, or the component folder name for an index file.
fn infer_id_category_and_title_basis(
    segments: &[String],
    module: Module,
) -> (String, Option<String>, String) {
    if segments.is_empty() {
        return (String::new(), None, String::new());
    }

    // Drop a leading module segment (and an optional version segment before it).
    let mut rest: Vec<&str> = segments.iter().map(String::as_str).collect();
    if !rest.is_empty() && is_version_segment(rest[0]) {
        rest.remove(0);
    }
    if !rest.is_empty() {
        rest.remove(0); // module segment
    }

    let file_seg = rest.last().copied().unwrap_or("");
    let file_stem = file_seg.strip_suffix(".md").unwrap_or(file_seg);
    let file_stem_clean = strip_numeric_prefix(file_stem);

    let category = if module == Module::Components && rest.len() >= 2 {
        Some(strip_numeric_prefix(rest[0]).to_lowercase())
    } else {
        None
    };

    let is_index = is_index_filename(file_stem);
    let mut id_parts: Vec<String> = vec![module.as_str().to_string()];

    if is_index && rest.len() >= 2 {
        // Promote the component folder: id stops at the parent folder,
        // title basis is the component folder name.
        for seg in &rest[..rest.len() - 1] {
            id_parts.push(strip_numeric_prefix(seg).to_lowercase());
        }
        let component_folder = strip_numeric_prefix(rest[rest.len() - 2]);
        (id_parts.join("/"), category, component_folder.to_string())
    } else {
        for seg in &rest[..rest.len() - 1] {
            id_parts.push(strip_numeric_prefix(seg).to_lowercase());
        }
        id_parts.push(file_stem_clean.to_lowercase());
        (id_parts.join("/"), category, file_stem_clean.to_string())
    }
}

fn title_from_basis(basis: &str) -> String {
    let spaced = basis.replace(['-', '_'], " ");
    spaced
        .split_whitespace()
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

fn extract_title(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        H1.captures(line)
            .map(|caps| caps[1].trim().to_string())
    })
}

/// First non-blank, non-heading, non-blockquote paragraph after the title,
/// with inline emphasis markers stripped.
fn extract_description(content: &str) -> Option<String> {
    let mut seen_title = false;
    let mut in_fence = false;
    for line in content.lines() {
        if FENCE_OPEN.is_match(line.trim_start()) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let trimmed = line.trim();
        if !seen_title {
            if H1.is_match(line) {
                seen_title = true;
            }
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('>') {
            continue;
        }
        return Some(strip_inline_emphasis(trimmed));
    }
    None
}

fn strip_inline_emphasis(text: &str) -> String {
    text.replace(['*', '_', '`'], "")
}

fn extract_package_and_import(content: &str) -> (Option<String>, Option<String>) {
    let package = PACKAGE_LINE
        .captures(content)
        .map(|c| c[1].trim().to_string());
    let import = IMPORT_LINE
        .captures(content)
        .map(|c| c[1].trim().to_string());

    let package = package.or_else(|| {
        if IMPORT_FENCE
            .captures(content)
            .map(|c| c[1].starts_with(FLUENT_PACKAGE))
            .unwrap_or(false)
        {
            Some(FLUENT_PACKAGE.to_string())
        } else {
            None
        }
    });

    let import = import.or_else(|| IMPORT_FENCE.find(content).map(|m| m.as_str().to_string()));

    (package, import)
}

fn detect_props_table(content: &str) -> bool {
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;
    let mut in_fence = false;
    while i < lines.len() {
        let line = lines[i];
        if FENCE_OPEN.is_match(line.trim_start()) {
            in_fence = !in_fence;
            i += 1;
            continue;
        }
        if !in_fence
            && let Some(caps) = HEADING.captures(line)
            && caps[2].to_lowercase().contains("props")
        {
            let level = caps[1].len();
            let mut j = i + 1;
            let mut fence_here = false;
            while j < lines.len() {
                if FENCE_OPEN.is_match(lines[j].trim_start()) {
                    fence_here = !fence_here;
                    j += 1;
                    continue;
                }
                if !fence_here
                    && let Some(next_caps) = HEADING.captures(lines[j])
                    && next_caps[1].len() <= level
                {
                    break;
                }
                if !fence_here && is_table_header_row(lines[j]) {
                    return true;
                }
                j += 1;
            }
        }
        i += 1;
    }
    false
}

fn is_table_header_row(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') {
        return false;
    }
    let lower = trimmed.to_lowercase();
    let mentions_prop_or_slot = lower.contains("prop") || lower.contains("slot");
    let mentions_name_and_description = lower.contains("name") && lower.contains("description");
    mentions_prop_or_slot || mentions_name_and_description
}

fn detect_code_examples(content: &str) -> bool {
    let mut in_fence = false;
    for line in content.lines() {
        if let Some(caps) = FENCE_OPEN.captures(line.trim_start()) {
            if !in_fence {
                let lang = caps[1].to_lowercase();
                if lang.starts_with("ts")
                    || lang.starts_with("tsx")
                    || lang.starts_with("typescript")
                    || lang.starts_with("jsx")
                {
                    return true;
                }
            }
            in_fence = !in_fence;
        }
    }
    false
}

/// Scan the whole document (regardless of section) for any pipe table
/// whose header row mentions `Prop`/`Type`/`Slot` or (`Name` and
/// `Description`). Used as the fallback when no `## Props` section
/// exists.
pub fn find_prop_like_tables(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tables = Vec::new();
    let mut in_fence = false;
    let mut i = 0;
    while i < lines.len() {
        if FENCE_OPEN.is_match(lines[i].trim_start()) {
            in_fence = !in_fence;
            i += 1;
            continue;
        }
        if !in_fence
            && is_table_header_row(lines[i])
            && i + 1 < lines.len()
            && is_table_separator_row(lines[i + 1])
        {
            let start = i;
            let mut end = i + 1;
            while end < lines.len() && lines[end].trim_start().starts_with('|') {
                end += 1;
            }
            tables.push(lines[start..end].join("\n"));
            i = end;
            continue;
        }
        i += 1;
    }
    tables
}

fn is_table_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Returns the Markdown slice from the Props heading through (excluding)
/// the next heading of equal-or-higher level.
pub fn extract_props_section(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let mut in_fence = false;
    for (i, line) in lines.iter().enumerate() {
        if FENCE_OPEN.is_match(line.trim_start()) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(caps) = HEADING.captures(line)
            && caps[2].to_lowercase().contains("props")
        {
            let level = caps[1].len();
            let mut end = lines.len();
            let mut fence_here = false;
            for (j, inner) in lines.iter().enumerate().skip(i + 1) {
                if FENCE_OPEN.is_match(inner.trim_start()) {
                    fence_here = !fence_here;
                    continue;
                }
                if !fence_here
                    && let Some(next_caps) = HEADING.captures(inner)
                    && next_caps[1].len() <= level
                {
                    end = j;
                    break;
                }
            }
            return Some(lines[i..end].join("\n"));
        }
    }
    None
}

/// A single labeled code fence captured by `extract_labeled_code_blocks`.
#[derive(Debug, Clone)]
pub struct LabeledCodeBlock {
    pub section_heading: String,
    pub language: String,
    pub code: String,
}

const CODE_LANGS: &[&str] = &["ts", "tsx", "typescript", "jsx", "js", "javascript"];

/// Walk the content tracking the last-seen heading of level >= 2 as the
/// current section; capture the body of every TS/TSX/JSX/JS fenced block.
/// Heading tracking pauses while inside a fence.
pub fn extract_labeled_code_blocks(content: &str) -> Vec<LabeledCodeBlock> {
    let mut blocks = Vec::new();
    let mut current_heading = "General".to_string();
    let mut in_fence = false;
    let mut fence_lang = String::new();
    let mut fence_body: Vec<&str> = Vec::new();

    for line in content.lines() {
        if let Some(caps) = FENCE_OPEN.captures(line.trim_start()) {
            if in_fence {
                let lang_lower = fence_lang.to_lowercase();
                if CODE_LANGS.iter().any(|l| lang_lower.starts_with(l)) {
                    blocks.push(LabeledCodeBlock {
                        section_heading: current_heading.clone(),
                        language: fence_lang.clone(),
                        code: fence_body.join("\n"),
                    });
                }
                in_fence = false;
                fence_body.clear();
            } else {
                in_fence = true;
                fence_lang = caps[1].to_string();
            }
            continue;
        }

        if in_fence {
            fence_body.push(line);
            continue;
        }

        if let Some(caps) = HEADING.captures(line)
            && caps[1].len() >= 2
        {
            current_heading = caps[2].trim().to_string();
        }
    }

    blocks
}
