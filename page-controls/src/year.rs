use chrono::{Datelike, Local};
use web_sys::Document;

/// 当前本地年份
pub fn current_year() -> i32 {
    Local::now().year()
}

/// 将年份写入页脚元素，元素不存在时返回 false
pub fn stamp_year(document: &Document, element_id: &str) -> bool {
    match document.get_element_by_id(element_id) {
        Some(element) => {
            element.set_text_content(Some(&current_year().to_string()));
            true
        }
        None => false,
    }
}
