//! Key-value storage for preferences and best scores

use std::collections::HashMap;

use crate::error::Result;

/// A string key-value store (LocalStorage-shaped)
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Process-local storage used on native builds and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Storage;
    use crate::error::{Error, Result};

    /// The browser's `window.localStorage`
    pub struct LocalStorage {
        inner: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self> {
            let inner = web_sys::window()
                .ok_or_else(|| Error::Storage("no window".into()))?
                .local_storage()
                .map_err(|e| Error::Storage(format!("{e:?}")))?
                .ok_or_else(|| Error::Storage("localStorage disabled".into()))?;
            Ok(Self { inner })
        }
    }

    impl Storage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner
                .get_item(key)
                .map_err(|e| Error::Storage(format!("{e:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.inner
                .set_item(key, value)
                .map_err(|e| Error::Storage(format!("{e:?}")))
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            self.inner
                .remove_item(key)
                .map_err(|e| Error::Storage(format!("{e:?}")))
        }
    }
}
