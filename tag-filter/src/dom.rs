//! 筛选面板的 DOM 实现

use std::collections::HashMap;

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use page_common::{dom, PageError};

use crate::builder::TagIndexBuilder;
use crate::config::FilterConfig;
use crate::models::{SelectionMode, TagRow};
use crate::panel::{ModeControl, PanelView};

/// 面板行的样式类
pub const ROW_CLASS: &str = "tag-filter-item";
/// 模式按钮的样式类
pub const MODE_TOGGLE_CLASS: &str = "tag-mode-toggle";
/// 被筛掉条目的样式类
pub const FILTERED_OUT_CLASS: &str = "filtered-out";

const MODE_TOGGLE_TITLE: &str = "Click to cycle: ANY → MUST → NONE";

/// 一行中需要更新的元素
struct RowElements {
    row: Element,
    checkbox: HtmlInputElement,
    mode: Element,
}

/// 基于页面元素的面板视图
pub struct DomPanelView {
    document: Document,
    panel: Element,
    tag_list: Element,
    search: Option<HtmlInputElement>,
    toggle_button: Option<Element>,
    overlay: Option<Element>,
    items: Vec<Element>,
    rows: HashMap<String, RowElements>,
}

impl DomPanelView {
    pub fn new(
        document: Document,
        config: &FilterConfig,
        panel: Element,
        tag_list: Element,
        items: Vec<Element>,
    ) -> Self {
        let search = document
            .get_element_by_id(&config.search_id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let toggle_button = document.get_element_by_id(&config.toggle_button_id);
        let overlay = document.get_element_by_id(&config.overlay_id);

        Self {
            document,
            panel,
            tag_list,
            search,
            toggle_button,
            overlay,
            items,
            rows: HashMap::new(),
        }
    }

    fn build_row(&self, row: &TagRow) -> Result<RowElements, PageError> {
        let container = self.document.create_element("div")?;
        container.set_class_name(ROW_CLASS);
        container.set_attribute("data-tag", &row.label)?;

        let checkbox = self
            .document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| PageError::Js("无法创建复选框".to_string()))?;
        checkbox.set_type("checkbox");
        checkbox.set_id(&row.control_id);
        checkbox.set_value(&row.label);

        let label = self.document.create_element("label")?;
        label.set_attribute("for", &row.control_id)?;
        label.set_text_content(Some(&row.label));

        let count = self.document.create_element("span")?;
        count.set_class_name("tag-count");
        count.set_text_content(Some(&row.count.to_string()));

        let mode = self.document.create_element("button")?;
        mode.set_class_name(MODE_TOGGLE_CLASS);
        mode.set_attribute("title", MODE_TOGGLE_TITLE)?;
        mode.set_text_content(Some(SelectionMode::Any.label()));
        dom::set_display(&mode, "none")?;

        container.append_child(&checkbox)?;
        container.append_child(&label)?;
        container.append_child(&mode)?;
        container.append_child(&count)?;
        self.tag_list.append_child(&container)?;

        Ok(RowElements {
            row: container,
            checkbox,
            mode,
        })
    }
}

impl PanelView for DomPanelView {
    fn render_rows(&mut self, rows: &[TagRow]) {
        self.tag_list.set_inner_html("");
        self.rows.clear();

        for row in rows {
            match self.build_row(row) {
                Ok(elements) => {
                    self.rows.insert(row.label.clone(), elements);
                }
                Err(e) => warn!(tag = %row.label, error = %e, "创建标签行失败"),
            }
        }
    }

    fn set_checked(&mut self, label: &str, checked: bool) {
        if let Some(row) = self.rows.get(label) {
            row.checkbox.set_checked(checked);
        }
    }

    fn set_mode_control(&mut self, label: &str, control: ModeControl) {
        let Some(row) = self.rows.get(label) else {
            return;
        };

        let (mode, display) = match control {
            ModeControl::Hidden => (SelectionMode::Any, "none"),
            ModeControl::Shown(mode) => (mode, "inline-flex"),
        };

        row.mode.set_text_content(Some(mode.label()));
        dom::remove_class(&row.mode, "must-mode");
        dom::remove_class(&row.mode, "none-mode");
        if let Some(class) = mode.css_class() {
            dom::add_class(&row.mode, class);
        }
        if let Err(e) = dom::set_display(&row.mode, display) {
            warn!(tag = label, error = %e, "更新模式按钮失败");
        }
    }

    fn set_row_visible(&mut self, label: &str, visible: bool) {
        if let Some(row) = self.rows.get(label) {
            let display = if visible { "flex" } else { "none" };
            if let Err(e) = dom::set_display(&row.row, display) {
                warn!(tag = label, error = %e, "更新标签行失败");
            }
        }
    }

    fn apply_visibility(&mut self, visible: &[bool]) {
        for (item, shown) in self.items.iter().zip(visible) {
            dom::set_class(item, FILTERED_OUT_CLASS, !shown);
        }
    }

    fn set_panel_open(&mut self, open: bool) {
        dom::set_class(&self.panel, "open", open);
        if let Some(button) = &self.toggle_button {
            dom::set_class(button, "active", open);
        }
        if let Some(overlay) = &self.overlay {
            dom::set_class(overlay, "active", open);
        }
    }

    fn clear_search(&mut self) {
        if let Some(search) = &self.search {
            search.set_value("");
        }
    }
}

/// 收集页面中的可筛选条目及其标签
pub fn collect_items(document: &Document, config: &FilterConfig) -> (Vec<Element>, TagIndexBuilder) {
    let elements = dom::select_all(document, &config.item_selector);
    let mut builder = TagIndexBuilder::new();

    for element in &elements {
        let tags = dom::select_all_in(element, &config.tag_selector)
            .into_iter()
            .map(|tag| tag.text_content().unwrap_or_default());
        builder.add_tags(tags);
    }

    (elements, builder)
}
