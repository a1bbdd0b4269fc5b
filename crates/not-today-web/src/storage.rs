use not_today_engine::{Error, KeyValueStore, Result};

/// `window.localStorage`, when the browser grants it.
///
/// Private browsing or disabled storage leaves `storage` empty; every call
/// then fails and the engine falls back to in-memory depth.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, depth will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| Error::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| Error::Storage(format!("get {key}: {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("set {key}: {e:?}")))
    }
}
