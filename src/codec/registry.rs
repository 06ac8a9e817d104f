//! Process-wide codec registry.
//!
//! Codecs are singletons keyed by [`CodecKey`], populated lazily. Concurrent
//! first use converges on a single published instance; after publication the
//! map is read-mostly and instances are immutable.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use super::{CodecKey, MappingType};

static REGISTRY: OnceLock<RwLock<HashMap<CodecKey, Arc<MappingType>>>> = OnceLock::new();

/// Look up (or build and publish) the codec for a key.
pub fn codec_for(key: &CodecKey) -> Arc<MappingType> {
    let cache = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    if let Some(hit) = cache.read().expect("codec registry poisoned").get(key) {
        return hit.clone();
    }
    // Build outside the write lock; losers of the publication race drop
    // their instance and take the published one.
    let built = Arc::new(MappingType::from_key(key));
    let mut map = cache.write().expect("codec registry poisoned");
    let published = map.entry(key.clone()).or_insert_with(|| {
        debug!(?key, "publishing codec");
        built
    });
    published.clone()
}
