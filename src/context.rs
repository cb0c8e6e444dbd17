//! `ServerContext`: the explicit, passed-by-reference aggregate of store +
//! engine + docs root that replaces the teacher's module-level handles
//! (spec §9 redesign note). Reindex builds a fresh `Index` off to the side
//! and swaps it in under a single exclusion point, so concurrent readers
//! either see the whole old snapshot or the whole new one, never a partial
//! mix (spec §5).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::builder::{self, IndexError, IndexStats};
use crate::search::SearchEngine;
use crate::store::DocumentStore;

/// A consistent store + engine pair, built together by one `build_index`
/// call.
#[derive(Default)]
pub struct Index {
    pub store: DocumentStore,
    pub engine: SearchEngine,
}

impl Index {
    fn build(docs_root: &Path) -> Result<(Self, IndexStats), IndexError> {
        let mut store = DocumentStore::new();
        let mut engine = SearchEngine::new();
        let stats = builder::build_index(docs_root, &mut store, &mut engine)?;
        Ok((Self { store, engine }, stats))
    }
}

pub struct ServerContext {
    docs_root: PathBuf,
    index: RwLock<Arc<Index>>,
}

impl ServerContext {
    /// Build the initial index synchronously at startup. A corpus error
    /// here aborts process init, per spec §7.
    pub fn new(docs_root: PathBuf) -> Result<Self, IndexError> {
        let (index, stats) = Index::build(&docs_root)?;
        tracing::info!(
            "indexed {} documents ({} failed) from {:?} in {}ms",
            stats.indexed_files,
            stats.failed_files,
            docs_root,
            stats.duration_ms
        );
        Ok(Self {
            docs_root,
            index: RwLock::new(Arc::new(index)),
        })
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Take a cheap, consistent snapshot of the current store + engine.
    /// Readers operate on the returned `Arc` without holding any lock, so
    /// a concurrent reindex can swap the live pointer without blocking
    /// them or handing them a half-built index.
    pub async fn snapshot(&self) -> Arc<Index> {
        Arc::clone(&self.index.read().await)
    }

    /// Rebuild the index from the current state of `docs_root` and swap
    /// it in atomically. Readers mid-flight keep the snapshot they
    /// already took; new readers see either the old or the new index,
    /// never a mix.
    pub async fn reindex(&self) -> Result<(Arc<Index>, IndexStats), IndexError> {
        let (new_index, stats) = Index::build(&self.docs_root)?;
        let new_index = Arc::new(new_index);
        {
            let mut guard = self.index.write().await;
            *guard = Arc::clone(&new_index);
        }
        Ok((new_index, stats))
    }
}
