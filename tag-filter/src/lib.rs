use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement};

use page_common::{dom as page_dom, logging};

// 导出模块
pub mod builder;
pub mod config;
pub mod dom;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod panel;

pub use builder::{build_index, TagIndexBuilder};
pub use config::FilterConfig;
pub use error::FilterError;
pub use evaluator::{compute_visibility, Buckets};
pub use models::{FilterState, Item, ItemId, SelectionMode, TagIndex, TagRecord, TagRow};
pub use panel::{FilterPanel, ModeControl, PanelView};

use crate::dom::{DomPanelView, MODE_TOGGLE_CLASS, ROW_CLASS};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

type SharedPanel = Rc<RefCell<FilterPanel<DomPanelView>>>;

/// 初始化函数 - 设置错误处理和日志
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 标签筛选器JS接口
///
/// 持有面板控制器和全部事件监听器，JS 侧释放句柄后监听器随之移除。
#[wasm_bindgen]
pub struct TagFilterJS {
    panel: SharedPanel,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl TagFilterJS {
    /// 初始化筛选器，页面没有筛选面板时返回 undefined
    #[wasm_bindgen]
    pub fn init(config_json: Option<String>) -> Result<Option<TagFilterJS>, JsValue> {
        logging::init();

        let config = FilterConfig::from_json(config_json.as_deref())?;
        let document = page_dom::document()?;

        let (Some(panel_el), Some(tag_list)) = (
            document.get_element_by_id(&config.panel_id),
            document.get_element_by_id(&config.tag_list_id),
        ) else {
            debug!("页面没有筛选面板，跳过标签筛选");
            return Ok(None);
        };

        let (elements, builder) = crate::dom::collect_items(&document, &config);
        let (index, items) = builder.finish();
        let view = DomPanelView::new(document.clone(), &config, panel_el, tag_list.clone(), elements);

        let mut panel = FilterPanel::with_index(index, items, view);
        panel.render_tag_list();
        info!(
            items = panel.items().len(),
            tags = panel.index().len(),
            "标签筛选器已初始化"
        );

        let panel = Rc::new(RefCell::new(panel));
        let mut listeners = vec![
            on_row_change(&tag_list, panel.clone()),
            on_mode_click(&tag_list, panel.clone()),
        ];

        let buttons: [(&str, fn(&mut FilterPanel<DomPanelView>)); 4] = [
            (config.toggle_button_id.as_str(), |p| {
                p.toggle_panel();
            }),
            (config.close_button_id.as_str(), FilterPanel::close_panel),
            (config.clear_button_id.as_str(), FilterPanel::clear_all),
            (config.overlay_id.as_str(), FilterPanel::close_panel),
        ];
        for (id, action) in buttons {
            if let Some(button) = document.get_element_by_id(id) {
                let panel = panel.clone();
                listeners.push(EventListener::new(&button, "click", move |_| {
                    action(&mut panel.borrow_mut());
                }));
            }
        }

        if let Some(search) = document.get_element_by_id(&config.search_id) {
            let panel = panel.clone();
            listeners.push(EventListener::new(&search, "input", move |event| {
                if let Some(input) = target_as::<HtmlInputElement>(event) {
                    panel.borrow_mut().on_search(&input.value());
                }
            }));
        }

        Ok(Some(TagFilterJS {
            panel,
            _listeners: listeners,
        }))
    }

    /// 获取面板中的所有标签行
    #[wasm_bindgen]
    pub fn tags(&self) -> Result<JsValue, JsValue> {
        let rows = self.panel.borrow().rows();
        serde_wasm_bindgen::to_value(&rows)
            .map_err(|e| JsValue::from_str(&format!("序列化标签失败: {}", e)))
    }

    #[wasm_bindgen]
    pub fn select(&self, label: &str) -> Result<(), JsValue> {
        self.panel
            .borrow_mut()
            .on_toggle(label, true)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn deselect(&self, label: &str) -> Result<(), JsValue> {
        self.panel
            .borrow_mut()
            .on_toggle(label, false)
            .map_err(to_js_error)
    }

    /// 切换标签模式，返回新模式的文本
    #[wasm_bindgen(js_name = cycleMode)]
    pub fn cycle_mode(&self, label: &str) -> Result<String, JsValue> {
        self.panel
            .borrow_mut()
            .on_mode_cycle(label)
            .map(|mode| mode.label().to_string())
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn search(&self, text: &str) {
        self.panel.borrow_mut().on_search(text);
    }

    #[wasm_bindgen]
    pub fn clear(&self) {
        self.panel.borrow_mut().clear_all();
    }

    #[wasm_bindgen(js_name = togglePanel)]
    pub fn toggle_panel(&self) -> bool {
        self.panel.borrow_mut().toggle_panel()
    }

    #[wasm_bindgen(js_name = closePanel)]
    pub fn close_panel(&self) {
        self.panel.borrow_mut().close_panel();
    }

    /// 当前可见的条目数
    #[wasm_bindgen(js_name = visibleCount)]
    pub fn visible_count(&self) -> usize {
        self.panel.borrow().visible_count()
    }
}

fn to_js_error(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn target_as<T: JsCast>(event: &Event) -> Option<T> {
    event.target().and_then(|target| target.dyn_into::<T>().ok())
}

/// 复选框勾选变化（事件委托到标签列表）
fn on_row_change(tag_list: &Element, panel: SharedPanel) -> EventListener {
    EventListener::new(tag_list, "change", move |event| {
        let Some(input) = target_as::<HtmlInputElement>(event) else {
            return;
        };
        if input.type_() != "checkbox" {
            return;
        }
        if let Err(e) = panel.borrow_mut().on_toggle(&input.value(), input.checked()) {
            warn!(error = %e, "忽略标签勾选");
        }
    })
}

/// 模式按钮点击（事件委托到标签列表）
fn on_mode_click(tag_list: &Element, panel: SharedPanel) -> EventListener {
    let options = EventListenerOptions::enable_prevent_default();
    EventListener::new_with_options(tag_list, "click", options, move |event| {
        let Some(target) = target_as::<Element>(event) else {
            return;
        };
        if page_dom::closest(&target, &format!(".{}", MODE_TOGGLE_CLASS)).is_none() {
            return;
        }
        event.prevent_default();

        let label = page_dom::closest(&target, &format!(".{}", ROW_CLASS))
            .and_then(|row| row.get_attribute("data-tag"));
        if let Some(label) = label {
            if let Err(e) = panel.borrow_mut().on_mode_cycle(&label) {
                warn!(error = %e, "忽略模式切换");
            }
        }
    })
}
