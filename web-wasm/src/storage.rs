//! localStorage ストア

use top100_common::selection::KeyValueStore;
use top100_common::{Error, Result};

/// ブラウザの localStorage（呼び出しのたびに取得する）
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

impl KeyValueStore for LocalStorageStore {
    fn read(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let storage =
            local_storage().ok_or_else(|| Error::Storage("localStorage is unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}
