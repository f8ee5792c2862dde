//! DOM 查询辅助函数
//!
//! 可选元素一律以 `Option` 返回，调用方在元素缺失时跳过对应功能。

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::PageError;

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::NoDocument)
}

/// 将 NodeList 转为元素列表，跳过非元素节点
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// 在整个文档中按选择器查找，选择器无效时返回空列表
pub fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

/// 在某个元素内按选择器查找
pub fn select_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub fn select_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn select_one_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// 向上查找最近的匹配祖先（包括自身）
pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

/// 设置内联 display 样式
pub fn set_display(element: &Element, value: &str) -> Result<(), PageError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style().set_property("display", value)?;
    }
    Ok(())
}

/// 内联 display 样式是否为 none
pub fn is_display_none(element: &Element) -> bool {
    element
        .dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value("display").ok())
        .map(|value| value == "none")
        .unwrap_or(false)
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

/// 强制设置类名的有无
pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// 切换类名，返回切换后是否存在
pub fn toggle_class(element: &Element, class: &str) -> bool {
    element.class_list().toggle(class).unwrap_or(false)
}
