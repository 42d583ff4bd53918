use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

static REGISTRY: OnceLock<Mutex<HashMap<String, Arc<Mutex<()>>>>> = OnceLock::new();

/// Process-wide mutual exclusion for one backing resource.
///
/// Every store instance pointing at the same resource key shares one mutex, so
/// a read-modify-write cycle on that resource never interleaves with another
/// one in this process. The guard releases on drop, including on error paths.
#[derive(Clone, Debug)]
pub struct ResourceLock {
    key: String,
    inner: Arc<Mutex<()>>,
}

impl ResourceLock {
    pub fn for_resource(key: impl Into<String>) -> Self {
        let key = key.into();
        let registry = REGISTRY.get_or_init(|| Mutex::new(HashMap::new()));
        let mut map = registry.lock().unwrap_or_else(|e| e.into_inner());
        let inner = map.entry(key.clone()).or_default().clone();
        Self { key, inner }
    }

    pub fn acquire(&self) -> MutexGuard<'_, ()> {
        tracing::trace!(resource = %self.key, "acquiring resource lock");
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
