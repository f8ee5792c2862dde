use serde::Deserialize;

use page_common::PageError;

/// 页面控件配置，所有字段都有默认值
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PageConfig {
    /// 标签页按钮选择器，按钮通过 data-tab 指向内容 ID
    pub tab_button_selector: String,
    /// 标签页内容选择器
    pub tab_content_selector: String,
    /// 主题切换按钮 ID
    pub theme_button_id: String,
    /// 宽度切换按钮 ID
    pub width_button_id: String,
    /// 页面主容器选择器
    pub wrap_selector: String,
    /// 年份元素 ID
    pub year_id: String,
    /// 可展开条目的选择器
    pub item_selector: String,
    /// 详情展开按钮选择器
    pub details_button_selector: String,
    /// "See CV" 按钮 ID
    pub see_cv_button_id: String,
    /// 站内链接点击后滚动的延迟（毫秒）
    pub link_scroll_delay_ms: u32,
    /// URL 哈希导航后滚动的延迟（毫秒）
    pub hash_scroll_delay_ms: u32,
    /// 显示完整简历后滚动的延迟（毫秒）
    pub reveal_scroll_delay_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            tab_button_selector: ".tab-btn".to_string(),
            tab_content_selector: ".tab-content".to_string(),
            theme_button_id: "theme-toggle-btn".to_string(),
            width_button_id: "width-toggle-btn".to_string(),
            wrap_selector: ".wrap".to_string(),
            year_id: "y".to_string(),
            item_selector: ".item, .timeline-item".to_string(),
            details_button_selector: ".toggle-btn".to_string(),
            see_cv_button_id: "see-cv-btn".to_string(),
            link_scroll_delay_ms: 50,
            hash_scroll_delay_ms: 100,
            reveal_scroll_delay_ms: 100,
        }
    }
}

impl PageConfig {
    /// 解析 JS 传入的配置，空参数使用默认值
    pub fn from_json(json: Option<&str>) -> Result<Self, PageError> {
        match json.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(serde_json::from_str(text)?),
            _ => Ok(Self::default()),
        }
    }
}
