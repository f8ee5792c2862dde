pub mod dom;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

// 重新导出常用类型，方便直接使用
pub use error::PageError;
pub use models::{LayoutWidth, Theme, LAYOUT_WIDTH_KEY, THEME_KEY};
pub use storage::{LocalStorageStore, MemoryStore, PreferenceStore};
