#![forbid(unsafe_code)]

//! Registry of grapheme clusters too long for a glyph token.
//!
//! A [`Glyph`](crate::glyph::Glyph) holds up to seven bytes of UTF-8 inline.
//! Longer clusters (family emoji, long combining sequences) are stored here
//! under a content hash and the token keeps only the hash.
//!
//! - Content-addressed: the same text always maps to the same key.
//! - Insert-if-absent: [`Jumbos::add`] never replaces an entry.
//! - No eviction: entries live as long as the registry.
//! - Lookups of unknown keys return `""` and are remembered in
//!   [`Jumbos::missing`] for diagnostics.
//!
//! The registry is a cheap cloneable handle. Every clone sees the same
//! table, so canvases that exchange cells should share one handle.
//!
//! # Usage
//!
//! ```
//! use tessera_render::jumbo::Jumbos;
//!
//! let jumbos = Jumbos::new();
//! jumbos.add(42, "👨‍👩‍👧‍👦");
//! assert_eq!(&*jumbos.get(42), "👨‍👩‍👧‍👦");
//! assert_eq!(&*jumbos.get(7), "");
//! assert_eq!(jumbos.missing(), vec![7]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Default)]
struct Registry {
    map: FxHashMap<u64, Arc<str>>,
    undef: FxHashSet<u64>,
}

/// Shared handle to a jumbo cluster table.
#[derive(Debug, Clone, Default)]
pub struct Jumbos {
    inner: Arc<Mutex<Registry>>,
}

impl Jumbos {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        // A panic while holding the lock cannot leave the maps inconsistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cluster text for `key`, or `""` if unknown.
    pub fn get(&self, key: u64) -> Arc<str> {
        let mut reg = self.lock();
        if let Some(text) = reg.map.get(&key) {
            return Arc::clone(text);
        }
        reg.undef.insert(key);
        tessera_core::debug!(key, "jumbo cluster missing");
        Arc::from("")
    }

    /// Register `text` under `key`, replacing any previous entry.
    pub fn set(&self, key: u64, text: &str) {
        self.lock().map.insert(key, Arc::from(text));
    }

    /// Register `text` under `key` unless the key is already present.
    pub fn add(&self, key: u64, text: &str) {
        let mut reg = self.lock();
        if !reg.map.contains_key(&key) {
            tessera_core::trace!(key, len = text.len(), "jumbo cluster registered");
            reg.map.insert(key, Arc::from(text));
        }
    }

    /// Whether `key` is registered. Unknown keys are remembered as missing.
    pub fn exists(&self, key: u64) -> bool {
        let mut reg = self.lock();
        let okay = reg.map.contains_key(&key);
        if !okay {
            reg.undef.insert(key);
        }
        okay
    }

    /// Keys that were looked up but never registered, sorted.
    pub fn missing(&self) -> Vec<u64> {
        let mut keys: Vec<u64> = self.lock().undef.iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of registered clusters.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles share the same table.
    pub fn same_registry(&self, other: &Jumbos) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_insert_if_absent() {
        let jumbos = Jumbos::new();
        jumbos.add(1, "first");
        jumbos.add(1, "second");
        assert_eq!(&*jumbos.get(1), "first");
        assert_eq!(jumbos.len(), 1);
    }

    #[test]
    fn set_overwrites() {
        let jumbos = Jumbos::new();
        jumbos.add(1, "first");
        jumbos.set(1, "second");
        assert_eq!(&*jumbos.get(1), "second");
    }

    #[test]
    fn miss_returns_empty_and_records() {
        let jumbos = Jumbos::new();
        assert_eq!(&*jumbos.get(9), "");
        assert!(!jumbos.exists(5));
        assert_eq!(jumbos.missing(), vec![5, 9]);
        assert!(jumbos.is_empty());
    }

    #[test]
    fn exists_hit_is_not_recorded() {
        let jumbos = Jumbos::new();
        jumbos.add(3, "x");
        assert!(jumbos.exists(3));
        assert!(jumbos.missing().is_empty());
    }

    #[test]
    fn clones_share_the_table() {
        let a = Jumbos::new();
        let b = a.clone();
        b.add(7, "shared");
        assert_eq!(&*a.get(7), "shared");
        assert!(a.same_registry(&b));
        assert!(!a.same_registry(&Jumbos::new()));
    }

    #[test]
    fn concurrent_registration() {
        let jumbos = Jumbos::new();
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let j = jumbos.clone();
                std::thread::spawn(move || {
                    for i in 0..100u64 {
                        j.add(t * 1000 + i, "cluster");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker panicked");
        }
        assert_eq!(jumbos.len(), 400);
    }
}
