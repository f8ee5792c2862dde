use tracing::debug;
use web_sys::{Document, Element};

use page_common::dom;

const ACTIVE_CLASS: &str = "active";

/// 按内容 ID 查找标签页按钮的选择器
pub fn button_selector(tab_id: &str) -> String {
    format!("[data-tab=\"{}\"]", tab_id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// 按钮 `data-tab` 属性对应的内容 ID，空值视为没有
pub fn content_id(data_tab: Option<String>) -> Option<String> {
    data_tab
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// 页面中的标签页
#[derive(Clone)]
pub struct Tabs {
    document: Document,
    button_selector: String,
    content_selector: String,
}

impl Tabs {
    pub fn new(document: Document, button_selector: &str, content_selector: &str) -> Self {
        Self {
            document,
            button_selector: button_selector.to_string(),
            content_selector: content_selector.to_string(),
        }
    }

    pub fn buttons(&self) -> Vec<Element> {
        dom::select_all(&self.document, &self.button_selector)
    }

    pub fn content_selector(&self) -> &str {
        &self.content_selector
    }

    /// 激活被点击的按钮及其对应内容
    pub fn select(&self, button: &Element) {
        self.deactivate_all();
        dom::add_class(button, ACTIVE_CLASS);
        if let Some(content) = content_id(button.get_attribute("data-tab"))
            .and_then(|id| self.document.get_element_by_id(&id))
        {
            dom::add_class(&content, ACTIVE_CLASS);
        }
    }

    /// 切换到指定标签页，按钮或内容不存在时不做任何事
    pub fn switch_to(&self, tab_id: &str) -> bool {
        let Some(tab_id) = content_id(Some(tab_id.to_string())) else {
            return false;
        };
        let tab_id = tab_id.as_str();
        let button = dom::select_one(&self.document, &button_selector(tab_id));
        let content = self.document.get_element_by_id(tab_id);
        let (Some(button), Some(content)) = (button, content) else {
            debug!(tab = tab_id, "标签页不存在");
            return false;
        };

        self.deactivate_all();
        dom::add_class(&button, ACTIVE_CLASS);
        dom::add_class(&content, ACTIVE_CLASS);
        true
    }

    fn deactivate_all(&self) {
        for element in dom::select_all(&self.document, &self.button_selector)
            .into_iter()
            .chain(dom::select_all(&self.document, &self.content_selector))
        {
            dom::remove_class(&element, ACTIVE_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_quotes_tab_id() {
        assert_eq!(button_selector("experience"), "[data-tab=\"experience\"]");
        assert_eq!(button_selector("a\"b"), "[data-tab=\"a\\\"b\"]");
    }

    #[test]
    fn blank_data_tab_has_no_content() {
        assert_eq!(content_id(Some("skills".into())), Some("skills".to_string()));
        assert_eq!(content_id(Some(" skills ".into())), Some("skills".to_string()));
        assert_eq!(content_id(Some("   ".into())), None);
        assert_eq!(content_id(None), None);
    }
}
