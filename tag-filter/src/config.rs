use serde::Deserialize;

use page_common::PageError;

/// 筛选面板的页面结构配置，所有字段都有默认值
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// 面板容器 ID
    pub panel_id: String,
    /// 标签列表容器 ID
    pub tag_list_id: String,
    /// 标签搜索框 ID
    pub search_id: String,
    /// 打开/关闭面板按钮 ID
    pub toggle_button_id: String,
    /// 关闭按钮 ID
    pub close_button_id: String,
    /// 清除筛选按钮 ID
    pub clear_button_id: String,
    /// 遮罩 ID
    pub overlay_id: String,
    /// 可筛选条目的选择器
    pub item_selector: String,
    /// 条目内标签的选择器
    pub tag_selector: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            panel_id: "tag-filter-panel".to_string(),
            tag_list_id: "tag-list".to_string(),
            search_id: "tag-search".to_string(),
            toggle_button_id: "filter-toggle-btn".to_string(),
            close_button_id: "close-filter-btn".to_string(),
            clear_button_id: "clear-filters-btn".to_string(),
            overlay_id: "tag-filter-overlay".to_string(),
            item_selector: ".item, .timeline-item".to_string(),
            tag_selector: ".tag".to_string(),
        }
    }
}

impl FilterConfig {
    /// 解析 JS 传入的配置，空参数使用默认值
    pub fn from_json(json: Option<&str>) -> Result<Self, PageError> {
        match json.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(serde_json::from_str(text)?),
            _ => Ok(Self::default()),
        }
    }
}
