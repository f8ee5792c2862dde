use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use page_common::{dom, logging, LayoutWidth, LocalStorageStore, MemoryStore, PreferenceStore};

// 导出模块
pub mod config;
pub mod details;
pub mod layout;
pub mod navigation;
pub mod reveal;
pub mod schedule;
pub mod tabs;
pub mod theme;
pub mod year;

pub use config::PageConfig;
pub use navigation::{Navigation, NavigationSurface, Navigator, Trigger};
pub use schedule::{Scheduler, TimeoutScheduler};

use crate::layout::WidthToggle;
use crate::navigation::DomNavigation;
use crate::reveal::CvReveal;
use crate::tabs::Tabs;
use crate::theme::ThemeToggle;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

type PageNavigator = Navigator<DomNavigation, TimeoutScheduler>;

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

/// 页面控件JS接口
#[wasm_bindgen]
pub struct PageControlsJS {
    navigator: Rc<PageNavigator>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl PageControlsJS {
    /// 初始化页面上的全部控件，缺失的元素对应的功能会被跳过
    #[wasm_bindgen]
    pub fn init(config_json: Option<String>) -> Result<PageControlsJS, JsValue> {
        logging::init();

        let config = PageConfig::from_json(config_json.as_deref())?;
        let window = dom::window()?;
        let document = dom::document()?;
        let store = preference_store();
        let mut listeners = Vec::new();

        if !year::stamp_year(&document, &config.year_id) {
            debug!("页面没有年份元素");
        }

        let tabs = Tabs::new(
            document.clone(),
            &config.tab_button_selector,
            &config.tab_content_selector,
        );
        listeners.extend(init_tabs(&tabs));
        listeners.extend(init_width_toggle(&document, &config, store.clone()));
        listeners.extend(init_theme_toggle(&window, &document, &config, store));

        let navigator = Rc::new(Navigator::new(
            DomNavigation::new(
                document.clone(),
                tabs,
                &config.item_selector,
                &config.details_button_selector,
            ),
            TimeoutScheduler,
            config.link_scroll_delay_ms,
            config.hash_scroll_delay_ms,
        ));
        listeners.extend(init_hash_navigation(&window, &document, navigator.clone()));
        listeners.extend(init_cv_reveal(&document, &config));

        expose_toggle_details(&window)?;

        info!(listeners = listeners.len(), "页面控件已初始化");
        Ok(PageControlsJS {
            navigator,
            _listeners: listeners,
        })
    }

    /// 导航到 `#id` 目标，返回是否找到了所在的标签页
    #[wasm_bindgen]
    pub fn navigate(&self, hash: &str) -> bool {
        self.navigator
            .navigate(hash, Trigger::HashChange)
            .is_scheduled()
    }
}

/// 优先使用 localStorage，不可用时退回内存存储
fn preference_store() -> Rc<dyn PreferenceStore> {
    match LocalStorageStore::new() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!(error = %e, "本地存储不可用，偏好设置不会被保存");
            Rc::new(MemoryStore::new())
        }
    }
}

fn init_tabs(tabs: &Tabs) -> Vec<EventListener> {
    tabs.buttons()
        .into_iter()
        .map(|button| {
            let tabs = tabs.clone();
            let target = button.clone();
            EventListener::new(&button, "click", move |_| tabs.select(&target))
        })
        .collect()
}

fn init_width_toggle(
    document: &Document,
    config: &PageConfig,
    store: Rc<dyn PreferenceStore>,
) -> Option<EventListener> {
    let button = document.get_element_by_id(&config.width_button_id)?;
    let wrap = dom::select_one(document, &config.wrap_selector)?;
    let toggle = WidthToggle::new(wrap, button.clone());

    if layout::saved_width(&*store) == LayoutWidth::Wide {
        toggle.apply(LayoutWidth::Wide);
    }

    Some(EventListener::new(&button, "click", move |_| {
        let next = layout::toggle_width(toggle.current(), &*store);
        toggle.apply(next);
    }))
}

fn init_theme_toggle(
    window: &Window,
    document: &Document,
    config: &PageConfig,
    store: Rc<dyn PreferenceStore>,
) -> Option<EventListener> {
    let button = document.get_element_by_id(&config.theme_button_id)?;
    let toggle = ThemeToggle::new(document, &button)?;

    let choice = theme::resolve_theme(&*store, theme::prefers_dark(window));
    if choice.saved {
        toggle.apply_root_class(choice.theme);
    }
    toggle.apply_button(choice.theme);

    let window = window.clone();
    Some(EventListener::new(&button, "click", move |_| {
        let next = theme::toggle_theme(&*store, theme::prefers_dark(&window));
        toggle.apply_root_class(next);
        toggle.apply_button(next);
    }))
}

fn init_hash_navigation(
    window: &Window,
    document: &Document,
    navigator: Rc<PageNavigator>,
) -> Vec<EventListener> {
    let link_navigator = navigator.clone();
    let options = EventListenerOptions::enable_prevent_default();
    let on_link = EventListener::new_with_options(document, "click", options, move |event| {
        let Some(href) = event.target().as_ref().and_then(navigation::link_href) else {
            return;
        };
        if link_navigator
            .navigate(&href, Trigger::LinkClick)
            .is_scheduled()
        {
            event.prevent_default();
        }
    });

    let current_hash = |window: &Window| window.location().hash().unwrap_or_default();

    let hash = current_hash(window);
    if !hash.is_empty() {
        navigator.navigate(&hash, Trigger::HashChange);
    }

    let hash_window = window.clone();
    let on_hash = EventListener::new(window, "hashchange", move |_| {
        navigator.navigate(&current_hash(&hash_window), Trigger::HashChange);
    });

    vec![on_link, on_hash]
}

fn init_cv_reveal(document: &Document, config: &PageConfig) -> Option<EventListener> {
    let reveal = CvReveal::find(document, &config.see_cv_button_id, &config.wrap_selector)?;
    let delay_ms = config.reveal_scroll_delay_ms;
    let button = reveal.button().clone();

    Some(EventListener::new(&button, "click", move |_| {
        reveal.reveal(&TimeoutScheduler, delay_ms);
    }))
}

/// 页面中的按钮通过 `onclick="toggleDetails(this)"` 调用
fn expose_toggle_details(window: &Window) -> Result<(), JsValue> {
    let handler = Closure::<dyn Fn(Element) -> bool>::new(|button: Element| {
        details::toggle_details(&button).unwrap_or_else(|e| {
            warn!(error = %e, "切换详情失败");
            false
        })
    });
    js_sys::Reflect::set(window, &JsValue::from_str("toggleDetails"), handler.as_ref())?;
    // 全局函数与页面同生命周期
    handler.forget();
    Ok(())
}
