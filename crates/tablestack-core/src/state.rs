//! Multi-tenant state management.
//!
//! Provides [`ProjectStore`], a thread-safe concurrent store that partitions
//! state by project ID so that one tenant can never observe another tenant's
//! resources.

use std::sync::Arc;

use dashmap::DashMap;

use crate::types::ProjectId;

/// Thread-safe, per-project state store.
///
/// Each project gets its own isolated state instance of type `T`.
///
/// # Examples
///
/// ```
/// use tablestack_core::{ProjectId, ProjectStore};
///
/// #[derive(Debug, Default)]
/// struct Catalog {
///     counter: std::sync::atomic::AtomicU64,
/// }
///
/// let store = ProjectStore::<Catalog>::new();
/// let project = ProjectId::new("tenant-a").unwrap();
/// let state = store.get_or_create(&project);
/// state.counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
/// ```
#[derive(Debug)]
pub struct ProjectStore<T: Default + Send + Sync> {
    inner: DashMap<ProjectId, Arc<T>>,
}

impl<T: Default + Send + Sync> ProjectStore<T> {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    /// Get or create the state for the given project.
    ///
    /// If the state does not exist, a new default instance is created atomically.
    #[must_use]
    pub fn get_or_create(&self, project: &ProjectId) -> Arc<T> {
        self.inner
            .entry(project.clone())
            .or_insert_with(|| Arc::new(T::default()))
            .clone()
    }

    /// Get the state for the given project, if it exists.
    #[must_use]
    pub fn get(&self, project: &ProjectId) -> Option<Arc<T>> {
        self.inner.get(project).map(|v| Arc::clone(v.value()))
    }
}

impl<T: Default + Send + Sync> Default for ProjectStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
