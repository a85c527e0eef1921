//! Session-scoped caching wrapper for document loaders.
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use veristat_core::verifier::{DocumentLoader, DocumentLoaderError};

/// A [`DocumentLoader`] memoizing successful fetches by URL.
///
/// The cache is an explicit collaborator intended to live for a single
/// verification session: it never evicts, and only successful fetches are
/// cached (a failed fetch is retried on the next request). The interior lock
/// is never held across an await point.
pub struct CachedDocumentLoader<L: DocumentLoader> {
    inner: L,
    cache: RwLock<HashMap<String, Value>>,
}

impl<L: DocumentLoader> CachedDocumentLoader<L> {
    /// Wraps a loader with an empty cache.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Whether a document for `url` is cached.
    pub fn is_cached(&self, url: &str) -> bool {
        self.cache
            .read()
            .expect("document cache lock poisoned")
            .contains_key(url)
    }
}

#[async_trait]
impl<L: DocumentLoader> DocumentLoader for CachedDocumentLoader<L> {
    async fn fetch_document(&self, url: &str) -> Result<Value, DocumentLoaderError> {
        {
            let cache = self.cache.read().expect("document cache lock poisoned");
            if let Some(document) = cache.get(url) {
                debug!("Document cache hit: {}", url);
                return Ok(document.clone());
            }
        }
        let document = self.inner.fetch_document(url).await?;
        self.cache
            .write()
            .expect("document cache lock poisoned")
            .insert(url.to_string(), document.clone());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Counts fetches; fails while `failing` is set.
    struct CountingLoader {
        fetches: AtomicUsize,
        failing: AtomicUsize,
    }

    impl CountingLoader {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                failing: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DocumentLoader for CountingLoader {
        async fn fetch_document(&self, url: &str) -> Result<Value, DocumentLoaderError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) != 0 {
                return Err(DocumentLoaderError::NotFound(url.to_string()));
            }
            Ok(json!({ "id": url }))
        }
    }

    #[tokio::test]
    async fn repeated_fetches_hit_the_cache() {
        let loader = CachedDocumentLoader::new(CountingLoader::new());
        let url = "https://example.com/credentials/status/3";

        assert!(!loader.is_cached(url));
        let first = loader.fetch_document(url).await.unwrap();
        assert!(loader.is_cached(url));
        let second = loader.fetch_document(url).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(loader.inner.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_urls_are_cached_separately() {
        let loader = CachedDocumentLoader::new(CountingLoader::new());
        loader
            .fetch_document("https://example.com/credentials/status/3")
            .await
            .unwrap();
        loader
            .fetch_document("https://example.com/credentials/status/4")
            .await
            .unwrap();
        assert_eq!(loader.inner.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_fetches_are_not_cached() {
        let inner = CountingLoader::new();
        inner.failing.store(1, Ordering::SeqCst);
        let loader = CachedDocumentLoader::new(inner);
        let url = "https://example.com/credentials/status/3";

        assert!(loader.fetch_document(url).await.is_err());
        assert!(!loader.is_cached(url));

        loader.inner.failing.store(0, Ordering::SeqCst);
        assert!(loader.fetch_document(url).await.is_ok());
        assert!(loader.is_cached(url));
        assert_eq!(loader.inner.fetches.load(Ordering::SeqCst), 2);
    }
}
