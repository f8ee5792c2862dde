//! 站内锚点导航
//!
//! 导航分两步：先切换到目标所在的标签页，再经调度器延迟后滚动到目标并展开详情。
//! 延迟是为了让新标签页先变为可见。

use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use page_common::dom;

use crate::details::expand_details;
use crate::schedule::Scheduler;
use crate::tabs::Tabs;

/// 导航由什么触发
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// 点击页面内 `#id` 链接
    LinkClick,
    /// 页面加载时的 URL 哈希或 hashchange 事件
    HashChange,
}

/// 一次导航请求的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// 不是可处理的站内目标，保持浏览器默认行为
    Ignored,
    /// 已切换标签页，滚动已调度
    Scheduled { tab: String, delay_ms: u32 },
}

impl Navigation {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Navigation::Scheduled { .. })
    }
}

/// 导航所需的页面操作
pub trait NavigationSurface {
    /// 目标元素所在标签页的 ID，目标不存在或不在标签页内时返回 None
    fn tab_containing(&self, target_id: &str) -> Option<String>;

    fn switch_tab(&self, tab_id: &str);

    /// 平滑滚动到目标
    fn scroll_to(&self, target_id: &str);

    /// 展开目标所在条目的详情
    fn expand_details(&self, target_id: &str);
}

/// 从 `#id` 形式的链接或哈希中取出目标 ID
pub fn parse_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// 锚点导航器
pub struct Navigator<S, C> {
    surface: Rc<S>,
    scheduler: C,
    link_delay_ms: u32,
    hash_delay_ms: u32,
}

impl<S, C> Navigator<S, C>
where
    S: NavigationSurface + 'static,
    C: Scheduler,
{
    pub fn new(surface: S, scheduler: C, link_delay_ms: u32, hash_delay_ms: u32) -> Self {
        Self {
            surface: Rc::new(surface),
            scheduler,
            link_delay_ms,
            hash_delay_ms,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// 处理一次导航请求
    pub fn navigate(&self, href: &str, trigger: Trigger) -> Navigation {
        let Some(target_id) = parse_fragment(href) else {
            return Navigation::Ignored;
        };
        let Some(tab) = self.surface.tab_containing(target_id) else {
            debug!(target = target_id, "目标不在任何标签页中");
            return Navigation::Ignored;
        };

        self.surface.switch_tab(&tab);

        let delay_ms = match trigger {
            Trigger::LinkClick => self.link_delay_ms,
            Trigger::HashChange => self.hash_delay_ms,
        };
        let surface = Rc::clone(&self.surface);
        let target = target_id.to_string();
        self.scheduler.schedule(
            delay_ms,
            Box::new(move || {
                surface.scroll_to(&target);
                surface.expand_details(&target);
            }),
        );

        debug!(target = target_id, tab = %tab, delay_ms, "导航已调度");
        Navigation::Scheduled { tab, delay_ms }
    }
}

/// 基于 DOM 的导航实现
pub struct DomNavigation {
    document: Document,
    tabs: Tabs,
    item_selector: String,
    details_button_selector: String,
}

impl DomNavigation {
    pub fn new(
        document: Document,
        tabs: Tabs,
        item_selector: &str,
        details_button_selector: &str,
    ) -> Self {
        Self {
            document,
            tabs,
            item_selector: item_selector.to_string(),
            details_button_selector: details_button_selector.to_string(),
        }
    }
}

/// 平滑滚动到元素顶部
pub fn smooth_scroll(element: &web_sys::Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

impl NavigationSurface for DomNavigation {
    fn tab_containing(&self, target_id: &str) -> Option<String> {
        let target = self.document.get_element_by_id(target_id)?;
        let tab = dom::closest(&target, self.tabs.content_selector())?;
        Some(tab.id()).filter(|id| !id.is_empty())
    }

    fn switch_tab(&self, tab_id: &str) {
        self.tabs.switch_to(tab_id);
    }

    fn scroll_to(&self, target_id: &str) {
        if let Some(target) = self.document.get_element_by_id(target_id) {
            smooth_scroll(&target);
        }
    }

    fn expand_details(&self, target_id: &str) {
        let Some(target) = self.document.get_element_by_id(target_id) else {
            return;
        };
        if let Err(e) = expand_details(&target, &self.item_selector, &self.details_button_selector) {
            warn!(target = target_id, error = %e, "展开详情失败");
        }
    }
}

/// 点击目标所在的站内链接的 href
pub fn link_href(target: &web_sys::EventTarget) -> Option<String> {
    let element = target.dyn_ref::<web_sys::Element>()?;
    let link = dom::closest(element, "a[href^='#']")?;
    link.get_attribute("href")
}
