use std::collections::HashMap;
use std::io;
use std::sync::Arc;

pub struct ContentCache<T> {
    cache: Option<CacheMap<T>>,
}

type CacheMap<T> = HashMap<String, Arc<T>>;

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        ContentCache {
            cache: Some(HashMap::new()),
        }
    }

    /// Every lookup misses, values are built on each call.
    pub fn non_caching() -> Self {
        ContentCache {
            cache: None,
        }
    }

    pub fn add(&mut self, key: &str, content: T) -> Arc<T> {
        let value = Arc::new(content);
        if let Some(ref mut cache) = self.cache {
            cache.insert(key.to_string(), value.clone());
        }
        value
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.cache.as_ref()?.get(key).cloned()
    }

    pub fn get_or<F>(&mut self, key: &str, build: F) -> io::Result<Arc<T>>
        where F: FnOnce() -> io::Result<T>
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let content = build()?;
        Ok(self.add(key, content))
    }
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
