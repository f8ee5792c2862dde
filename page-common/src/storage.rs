use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::Storage;

use crate::dom;
use crate::error::PageError;

/// 偏好设置的键值存储
pub trait PreferenceStore {
    /// 读取键值，不存在或读取失败时返回 None
    fn get(&self, key: &str) -> Option<String>;

    /// 写入键值
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

/// 基于浏览器 localStorage 的存储
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// 获取当前窗口的 localStorage
    pub fn new() -> Result<Self, PageError> {
        let storage = dom::window()?
            .local_storage()
            .map_err(PageError::from)?
            .ok_or_else(|| PageError::Storage("localStorage 未启用".to_string()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| PageError::Storage(format!("写入 {} 失败: {:?}", key, e)))
    }
}

/// 内存存储，用于没有 localStorage 的环境和测试
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置若干键值
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store.values.borrow_mut().extend(
            values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_reads_back_written_values() {
        let store = MemoryStore::with_values([("theme", "dark")]);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.get("layoutWidth"), None);

        store.set("layoutWidth", "wide").unwrap();
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("layoutWidth").as_deref(), Some("wide"));
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }
}
