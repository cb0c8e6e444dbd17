//! Index Builder (C5): walks the docs directory, invokes the extractor for
//! every Markdown file, and populates the store and search engine (spec
//! §4.5). Used at startup and by the `reindex` tool.

use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use walkdir::WalkDir;

use crate::extractor::parse_document;
use crate::model::Module;
use crate::search::SearchEngine;
use crate::store::DocumentStore;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("docs root '{path}' does not exist or is not a directory")]
    RootNotFound { path: String },
    #[error("failed to read docs root '{path}': {source}")]
    RootUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-run statistics returned by `build_index` (spec §4.5).
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub indexed_files: usize,
    pub failed_files: usize,
    pub duration_ms: u128,
    pub by_module: Vec<(Module, usize)>,
    pub by_category: Vec<(String, usize)>,
}

/// Clears `store` and `engine`, walks `docs_root` depth-first for `.md`
/// files, parses each with the extractor, and populates both indexes.
///
/// A per-file failure (unreadable file) is counted in `failed_files` and
/// the walk continues; a failure to open the root directory itself (missing
/// or unreadable) aborts with an error surfaced to the caller.
pub fn build_index(
    docs_root: &Path,
    store: &mut DocumentStore,
    engine: &mut SearchEngine,
) -> Result<IndexStats, IndexError> {
    if !docs_root.is_dir() {
        return Err(IndexError::RootNotFound {
            path: docs_root.display().to_string(),
        });
    }

    if let Err(source) = std::fs::read_dir(docs_root) {
        return Err(IndexError::RootUnreadable {
            path: docs_root.display().to_string(),
            source,
        });
    }

    store.clear();
    engine.clear();

    let start = Instant::now();
    let mut indexed_files = 0usize;
    let mut failed_files = 0usize;

    let walker = WalkDir::new(docs_root).into_iter();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("docs walk error: {err}");
                failed_files += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let relative = match path.strip_prefix(docs_root) {
            Ok(p) => p.to_string_lossy().replace('\\', "/"),
            Err(_) => path.to_string_lossy().replace('\\', "/"),
        };

        let raw_bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!("failed to read {}: {err}", path.display());
                failed_files += 1;
                continue;
            }
        };
        let content = String::from_utf8_lossy(&raw_bytes).into_owned();

        let document = parse_document(&relative, &content);
        engine.index_document(&document);
        store.add(document);
        indexed_files += 1;
    }

    let by_module = store.modules_with_counts();
    let by_category = store.categories_with_counts();

    Ok(IndexStats {
        indexed_files,
        failed_files,
        duration_ms: start.elapsed().as_millis(),
        by_module,
        by_category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builds_index_from_temp_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let components = dir.path().join("02-components/buttons");
        fs::create_dir_all(&components).unwrap();
        fs::write(
            components.join("Button.md"),
            "# Button\n\n**Package:** `@fluentui/react-components`\n\nA clickable control.\n",
        )
        .unwrap();

        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        let stats = build_index(dir.path(), &mut store, &mut engine).unwrap();

        assert_eq!(stats.indexed_files, 1);
        assert_eq!(stats.failed_files, 0);
        assert_eq!(store.len(), 1);
        assert!(store.get_by_id("components/buttons/button").is_some());
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        let result = build_index(Path::new("/does/not/exist"), &mut store, &mut engine);
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_root_surfaces_as_root_unreadable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o000)).unwrap();

        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        let result = build_index(dir.path(), &mut store, &mut engine);

        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o700)).unwrap();

        assert!(matches!(result, Err(IndexError::RootUnreadable { .. })));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("00-intro.md"), "# Intro\n\nHello.\n").unwrap();

        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        build_index(dir.path(), &mut store, &mut engine).unwrap();
        let first_count = store.len();

        build_index(dir.path(), &mut store, &mut engine).unwrap();
        assert_eq!(store.len(), first_count);
    }
}
