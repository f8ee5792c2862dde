use thiserror::Error;
use wasm_bindgen::JsValue;

/// 页面脚本的通用错误
#[derive(Debug, Error)]
pub enum PageError {
    /// 没有 window 对象（非浏览器环境）
    #[error("无法获取 window 对象")]
    NoWindow,

    /// 没有 document 对象
    #[error("无法获取 document 对象")]
    NoDocument,

    /// 本地存储不可用
    #[error("本地存储不可用: {0}")]
    Storage(String),

    /// 配置解析失败
    #[error("解析配置失败: {0}")]
    Config(#[from] serde_json::Error),

    /// JS 侧抛出的异常
    #[error("JS 调用失败: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        Self::Js(message)
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
