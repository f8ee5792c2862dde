use web_sys::Element;

use page_common::{dom, PageError};

pub const MORE_INFO_LABEL: &str = "More info ▼";
pub const LESS_INFO_LABEL: &str = "Less info ▲";

/// 详情按钮在展开/收起状态下的文本
pub fn toggle_label(expanded: bool) -> &'static str {
    if expanded {
        LESS_INFO_LABEL
    } else {
        MORE_INFO_LABEL
    }
}

/// 一次切换后详情区的显示方式和按钮文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsToggle {
    pub expanded: bool,
    pub display: &'static str,
    pub label: &'static str,
}

impl DetailsToggle {
    /// 隐藏的详情区会被展开，其余情况收起
    pub fn from_hidden(hidden: bool) -> Self {
        Self {
            expanded: hidden,
            display: if hidden { "block" } else { "none" },
            label: toggle_label(hidden),
        }
    }
}

/// 只有存在且处于隐藏状态的详情区才需要展开
pub fn needs_expand(details_hidden: Option<bool>) -> bool {
    details_hidden.unwrap_or(false)
}

/// 切换按钮后紧邻的详情区，返回切换后是否展开
pub fn toggle_details(button: &Element) -> Result<bool, PageError> {
    let Some(details) = button.next_element_sibling() else {
        return Ok(false);
    };

    let toggle = DetailsToggle::from_hidden(dom::is_display_none(&details));
    dom::set_display(&details, toggle.display)?;
    button.set_text_content(Some(toggle.label));
    Ok(toggle.expanded)
}

/// 展开目标所在条目的详情区，已展开时不做任何事
///
/// 返回是否发生了展开。
pub fn expand_details(
    target: &Element,
    item_selector: &str,
    button_selector: &str,
) -> Result<bool, PageError> {
    let item = dom::closest(target, item_selector).unwrap_or_else(|| target.clone());
    let Some(button) = dom::select_one_in(&item, button_selector) else {
        return Ok(false);
    };

    let hidden = button
        .next_element_sibling()
        .map(|details| dom::is_display_none(&details));
    if needs_expand(hidden) {
        toggle_details(&button)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_describe_next_action() {
        assert_eq!(toggle_label(true), "Less info ▲");
        assert_eq!(toggle_label(false), "More info ▼");
    }

    #[test]
    fn hidden_details_open_and_visible_details_close() {
        assert_eq!(
            DetailsToggle::from_hidden(true),
            DetailsToggle {
                expanded: true,
                display: "block",
                label: LESS_INFO_LABEL,
            }
        );
        assert_eq!(
            DetailsToggle::from_hidden(false),
            DetailsToggle {
                expanded: false,
                display: "none",
                label: MORE_INFO_LABEL,
            }
        );
    }

    #[test]
    fn expanding_leaves_open_or_missing_details_alone() {
        assert!(needs_expand(Some(true)));
        assert!(!needs_expand(Some(false)));
        assert!(!needs_expand(None));
    }
}
