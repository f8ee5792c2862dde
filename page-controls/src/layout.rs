use tracing::warn;
use web_sys::Element;

use page_common::{dom, LayoutWidth, PreferenceStore, LAYOUT_WIDTH_KEY};

const WIDE_LAYOUT_CLASS: &str = "wide-layout";
const WIDE_BUTTON_CLASS: &str = "wide";

/// 读取保存的布局宽度，没有或无法识别时为窄布局
pub fn saved_width<S: PreferenceStore + ?Sized>(store: &S) -> LayoutWidth {
    store
        .get(LAYOUT_WIDTH_KEY)
        .as_deref()
        .and_then(LayoutWidth::parse)
        .unwrap_or_default()
}

/// 从当前宽度切换并保存
pub fn toggle_width<S: PreferenceStore + ?Sized>(current: LayoutWidth, store: &S) -> LayoutWidth {
    let next = current.toggled();
    if let Err(e) = store.set(LAYOUT_WIDTH_KEY, next.storage_value()) {
        warn!(error = %e, "保存布局宽度失败");
    }
    next
}

/// 按钮文本，显示的是可切换到的宽度
pub fn button_label(width: LayoutWidth) -> &'static str {
    match width {
        LayoutWidth::Wide => "Narrow",
        LayoutWidth::Narrow => "Wide",
    }
}

/// 宽度切换按钮和页面容器
pub struct WidthToggle {
    wrap: Element,
    button: Element,
}

impl WidthToggle {
    pub fn new(wrap: Element, button: Element) -> Self {
        Self { wrap, button }
    }

    /// 以页面容器上的类名为准
    pub fn current(&self) -> LayoutWidth {
        if self.wrap.class_list().contains(WIDE_LAYOUT_CLASS) {
            LayoutWidth::Wide
        } else {
            LayoutWidth::Narrow
        }
    }

    pub fn apply(&self, width: LayoutWidth) {
        dom::set_class(&self.wrap, WIDE_LAYOUT_CLASS, width.is_wide());
        dom::set_class(&self.button, WIDE_BUTTON_CLASS, width.is_wide());
        if let Some(text) = dom::select_one_in(&self.button, "span") {
            text.set_text_content(Some(button_label(width)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_common::MemoryStore;

    #[test]
    fn missing_or_unknown_value_is_narrow() {
        assert_eq!(saved_width(&MemoryStore::new()), LayoutWidth::Narrow);
        let store = MemoryStore::with_values([(LAYOUT_WIDTH_KEY, "huge")]);
        assert_eq!(saved_width(&store), LayoutWidth::Narrow);
    }

    #[test]
    fn toggle_round_trips_through_store() {
        let store = MemoryStore::with_values([(LAYOUT_WIDTH_KEY, "wide")]);
        let width = saved_width(&store);
        assert_eq!(width, LayoutWidth::Wide);
        assert_eq!(button_label(width), "Narrow");

        let width = toggle_width(width, &store);
        assert_eq!(width, LayoutWidth::Narrow);
        assert_eq!(store.get(LAYOUT_WIDTH_KEY).as_deref(), Some("narrow"));
        assert_eq!(button_label(width), "Wide");

        let width = toggle_width(width, &store);
        assert_eq!(saved_width(&store), width);
    }
}
