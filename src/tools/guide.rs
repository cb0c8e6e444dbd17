//! §4.6.11 `get_implementation_guide({goal})` — the highest-level tool,
//! composing search results from two modules into a single build plan.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::Index;
use crate::model::{DocumentEntry, Module};

use super::shared::{error, hint, star_if_high};

const COMPONENT_SEARCH_LIMIT: usize = 16;
const COMPONENT_KEEP: usize = 8;
const PATTERN_SEARCH_LIMIT: usize = 8;
const PATTERN_KEEP: usize = 4;

static IMPORT_PARSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s*\{\s*([^}]*)\s*\}\s*from\s*['"]([^'"]+)['"]"#).unwrap());

pub fn run(index: &Index, goal: &str) -> String {
    let goal = goal.trim();
    if goal.is_empty() {
        return error("goal is required.");
    }

    let component_hits = index
        .engine
        .search(&index.store, goal, Some(Module::Components), COMPONENT_SEARCH_LIMIT);
    let components: Vec<(&DocumentEntry, u32)> = component_hits
        .into_iter()
        .take(COMPONENT_KEEP)
        .map(|h| (h.document, h.relevance))
        .collect();

    let pattern_hits = index
        .engine
        .search(&index.store, goal, Some(Module::Patterns), PATTERN_SEARCH_LIMIT);
    let patterns: Vec<&DocumentEntry> = pattern_hits
        .into_iter()
        .take(PATTERN_KEEP)
        .map(|h| h.document)
        .collect();

    if components.is_empty() && patterns.is_empty() {
        return fallback(index, goal);
    }

    let mut out = format!("# Implementation Guide: {goal}\n\n");
    out.push_str(&format!(
        "## Overview\n\nThis guide recommends components and patterns for: \"{goal}\".\n\n"
    ));

    out.push_str(&recommended_components_section(&components));
    out.push_str(&patterns_section(&patterns));
    out.push_str(&implementation_steps_section(&components, &patterns));
    out.push_str(&accessibility_section(&components));
    out.push_str(&next_steps_section(&components));

    out.trim_end().to_string() + "\n"
}

fn fallback(index: &Index, goal: &str) -> String {
    let modules: Vec<String> = Module::ordered()
        .iter()
        .filter(|m| !index.store.get_by_module(**m).is_empty())
        .map(|m| m.as_str().to_string())
        .collect();
    format!(
        "No components or patterns matched \"{goal}\". Indexed modules: {}.\n\n\
         Try `search_docs(\"{goal}\")` with broader terms, or `list_all_docs()` for a full overview.",
        modules.join(", ")
    )
}

fn recommended_components_section(components: &[(&DocumentEntry, u32)]) -> String {
    if components.is_empty() {
        return String::new();
    }
    let mut out = String::from("## Recommended Components\n\n");
    out.push_str(&quick_import_block(components));
    out.push('\n');
    for (doc, relevance) in components {
        out.push_str(&format!(
            "- **{}**{} ({relevance}%)",
            doc.title,
            star_if_high(*relevance)
        ));
        if let Some(description) = &doc.metadata.description {
            out.push_str(&format!(" — {description}"));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Parse each top component's import statement, merge identifiers per
/// package, and emit one `import { ... } from '...'` block per package.
fn quick_import_block(components: &[(&DocumentEntry, u32)]) -> String {
    let mut by_package: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (doc, _) in components {
        let Some(import) = &doc.metadata.import_statement else {
            continue;
        };
        let Some(caps) = IMPORT_PARSE.captures(import) else {
            continue;
        };
        let package = caps[2].to_string();
        let entry = by_package.entry(package).or_default();
        for ident in caps[1].split(',') {
            let ident = ident.trim().to_string();
            if !ident.is_empty() && !entry.contains(&ident) {
                entry.push(ident);
            }
        }
    }

    if by_package.is_empty() {
        return String::new();
    }

    let mut out = String::from("### Quick Import\n\n```tsx\n");
    for (package, idents) in &by_package {
        if idents.len() >= 5 {
            out.push_str("import {\n");
            for ident in idents {
                out.push_str(&format!("  {ident},\n"));
            }
            out.push_str(&format!("}} from '{package}';\n"));
        } else {
            out.push_str(&format!("import {{ {} }} from '{package}';\n", idents.join(", ")));
        }
    }
    out.push_str("```\n\n");
    out
}

fn patterns_section(patterns: &[&DocumentEntry]) -> String {
    if patterns.is_empty() {
        return String::new();
    }
    let mut out = String::from("## Relevant Patterns\n\n");
    for doc in patterns {
        out.push_str(&format!(
            "- **{}** — {}\n",
            doc.title,
            hint(format!("get_pattern(\"{}\", \"{}\")", pattern_category_label(doc), doc.title))
        ));
    }
    out.push('\n');
    out
}

fn pattern_category_label(doc: &DocumentEntry) -> String {
    doc.relative_path
        .split('/')
        .nth(1)
        .unwrap_or("patterns")
        .to_string()
}

fn implementation_steps_section(components: &[(&DocumentEntry, u32)], patterns: &[&DocumentEntry]) -> String {
    let packages: Vec<&str> = {
        let mut pkgs: Vec<&str> = components
            .iter()
            .filter_map(|(d, _)| d.metadata.package_name.as_deref())
            .collect();
        pkgs.sort();
        pkgs.dedup();
        pkgs
    };

    let mut out = String::from("## Implementation Steps\n\n");
    out.push_str(
        "1. Wrap the application root with a `FluentProvider`:\n\n```tsx\n\
         import { FluentProvider, webLightTheme } from '@fluentui/react-components';\n\n\
         <FluentProvider theme={webLightTheme}>\n  <App />\n</FluentProvider>\n```\n\n",
    );
    out.push_str(&format!(
        "2. Install the required package(s): `npm install {}`\n\n",
        if packages.is_empty() {
            "@fluentui/react-components"
        } else {
            packages[0]
        }
    ));
    out.push_str("3. Import the components listed in Quick Import above.\n\n");

    let titles: Vec<String> = components.iter().map(|(d, _)| d.title.to_lowercase()).collect();
    let joined = titles.join(" ");
    let mut tip_num = 4;
    for (keyword, tip) in [
        ("form", "Wire form fields through a single controlled state object or a form library; validate on blur and on submit."),
        ("button", "Use `appearance=\"primary\"` for the single primary action per view; keep secondary actions as `appearance=\"secondary\"` or `\"subtle\"`."),
        ("dialog", "Manage `open` state in the parent and return focus to the trigger element on close."),
        ("toast", "Mount a single `Toaster` near the app root and dispatch toasts via `useId`-scoped `toastId`s."),
        ("table", "For sortable columns, keep sort state external to the table and pass it down as props."),
        ("menu", "Close the menu on selection and restore focus to the `MenuTrigger` element."),
    ] {
        if joined.contains(keyword) {
            out.push_str(&format!("{tip_num}. {tip}\n\n"));
            tip_num += 1;
        }
    }

    out.push_str(&format!(
        "{tip_num}. Style with design tokens rather than hardcoded values:\n\n```tsx\n\
         import { tokens, makeStyles } from '@fluentui/react-components';\n\n\
         const useStyles = makeStyles({{\n  root: {{ color: tokens.colorNeutralForeground1 }},\n}});\n```\n\n"
    ));
    tip_num += 1;

    if !patterns.is_empty() {
        out.push_str(&format!(
            "{tip_num}. Review the patterns listed above before finalizing the layout.\n\n"
        ));
    }

    out
}

fn accessibility_section(components: &[(&DocumentEntry, u32)]) -> String {
    let mut out = String::from("## Accessibility Checklist\n\n");
    out.push_str("- [ ] Every interactive element is reachable by keyboard alone\n");
    out.push_str("- [ ] Focus order follows visual reading order\n");
    out.push_str("- [ ] Color is never the only signal conveying state\n");

    let titles: Vec<String> = components.iter().map(|(d, _)| d.title.to_lowercase()).collect();
    let joined = titles.join(" ");
    for (keyword, item) in [
        ("form", "- [ ] Every form field has an associated, visible `<Label>`\n"),
        ("dialog", "- [ ] Focus moves into the dialog on open and is trapped until it closes\n"),
        ("table", "- [ ] Column headers use `scope`/`aria-sort` where sortable\n"),
        ("menu", "- [ ] Menu items are reachable via arrow keys and `Escape` closes the menu\n"),
        ("toast", "- [ ] Toasts use `role=\"status\"` or `\"alert\"` matching their urgency\n"),
    ] {
        if joined.contains(keyword) {
            out.push_str(item);
        }
    }
    out.push('\n');
    out
}

fn next_steps_section(components: &[(&DocumentEntry, u32)]) -> String {
    let mut out = String::from("## Next Steps\n\n");
    for (doc, _) in components.iter().take(3) {
        out.push_str(&format!(
            "- {} · {}\n",
            hint(format!("query_component(\"{}\")", doc.title)),
            hint(format!("get_component_examples(\"{}\")", doc.title)),
        ));
    }
    out.push_str(&format!(
        "- {} · {}\n",
        hint("get_foundation(\"fluent-provider\")"),
        hint("get_foundation(\"theming\")"),
    ));
    out
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
                "02-components/forms/Input.md",
                "# Input\n\n**Package:** `@fluentui/react-components`\n**Import:** `import { Input } from '@fluentui/react-components'`\n\nA single-line text field for login forms.\n",
            ),
            (
                "02-components/forms/Checkbox.md",
                "# Checkbox\n\n**Package:** `@fluentui/react-components`\n**Import:** `import { Checkbox } from '@fluentui/react-components'`\n\nA checkbox used to remember choices in login forms.\n",
            ),
            (
                "02-components/buttons/Button.md",
                "# Button\n\n**Package:** `@fluentui/react-components`\n**Import:** `import { Button } from '@fluentui/react-components'`\n\nA clickable action button for form submission.\n",
            ),
            (
                "03-patterns/forms/01-login-form.md",
                "# Login Form\n\nA pattern for building login forms.\n",
            ),
        ] {
            let entry = parse_document(path, content);
            engine.index_document(&entry);
            store.add(entry);
        }
        Index { store, engine }
    }

    #[test]
    fn builds_guide_with_quick_import_and_steps() {
        let index = sample_index();
        let response = run(&index, "login form");
        assert!(response.starts_with("# Implementation Guide: login form"));
        assert!(response.contains("### Quick Import"));
        assert!(response.contains("Recommended Components"));
        assert!(response.contains("Accessibility Checklist"));
        assert!(response.contains("Next Steps"));
    }

    #[test]
    fn form_keyword_triggers_conditional_tips_and_checklist_items() {
        let index = sample_index();
        let response = run(&index, "login form");
        assert!(response.contains("associated, visible `<Label>`"));
    }

    #[test]
    fn empty_goal_is_input_error() {
        let index = sample_index();
        assert!(run(&index, "  ").starts_with("**Error:**"));
    }

    #[test]
    fn no_matches_falls_back_to_module_listing() {
        let index = sample_index();
        let response = run(&index, "zzz-totally-unrelated-xyz");
        assert!(response.contains("No components or patterns matched"));
    }
}
