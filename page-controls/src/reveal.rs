use web_sys::{Document, Element};

use page_common::dom;

use crate::navigation::smooth_scroll;
use crate::schedule::Scheduler;

const CV_HIDDEN_CLASS: &str = "cv-hidden";
const HIDDEN_CLASS: &str = "hidden";

/// 展开简历时涉及的页面部件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPart {
    TabContainer,
    Wrap,
    Button,
    DownloadButton,
    ControlButtons,
    Footer,
}

/// 对某个部件添加或移除类名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassChange {
    pub part: RevealPart,
    pub class: &'static str,
    pub add: bool,
}

/// 展开简历时的全部类名变更，按应用顺序排列
pub fn reveal_changes() -> [ClassChange; 6] {
    let change = |part, class, add| ClassChange { part, class, add };
    [
        change(RevealPart::TabContainer, CV_HIDDEN_CLASS, false),
        change(RevealPart::Wrap, CV_HIDDEN_CLASS, false),
        change(RevealPart::Button, HIDDEN_CLASS, true),
        change(RevealPart::DownloadButton, HIDDEN_CLASS, false),
        change(RevealPart::ControlButtons, HIDDEN_CLASS, false),
        change(RevealPart::Footer, HIDDEN_CLASS, false),
    ]
}

/// "See CV" 按钮：从精简视图切换到完整简历
pub struct CvReveal {
    button: Element,
    tab_container: Element,
    wrap: Element,
    download_button: Option<Element>,
    control_buttons: Option<Element>,
    footer: Option<Element>,
}

impl CvReveal {
    /// 按钮、标签页容器或主容器缺失时返回 None
    pub fn find(document: &Document, button_id: &str, wrap_selector: &str) -> Option<Self> {
        Some(Self {
            button: document.get_element_by_id(button_id)?,
            tab_container: dom::select_one(document, ".tab-container")?,
            wrap: dom::select_one(document, wrap_selector)?,
            download_button: dom::select_one(document, ".download-cv-btn"),
            control_buttons: dom::select_one(document, ".control-buttons"),
            footer: dom::select_one(document, "footer"),
        })
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    fn part(&self, part: RevealPart) -> Option<&Element> {
        match part {
            RevealPart::TabContainer => Some(&self.tab_container),
            RevealPart::Wrap => Some(&self.wrap),
            RevealPart::Button => Some(&self.button),
            RevealPart::DownloadButton => self.download_button.as_ref(),
            RevealPart::ControlButtons => self.control_buttons.as_ref(),
            RevealPart::Footer => self.footer.as_ref(),
        }
    }

    /// 显示完整内容，延迟后滚动到标签页容器
    pub fn reveal(&self, scheduler: &impl Scheduler, delay_ms: u32) {
        for change in reveal_changes() {
            if let Some(element) = self.part(change.part) {
                dom::set_class(element, change.class, change.add);
            }
        }

        let container = self.tab_container.clone();
        scheduler.schedule(delay_ms, Box::new(move || smooth_scroll(&container)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_unhides_content_and_hides_only_the_button() {
        let changes = reveal_changes();
        let added: Vec<RevealPart> = changes.iter().filter(|c| c.add).map(|c| c.part).collect();
        assert_eq!(added, vec![RevealPart::Button]);

        for part in [RevealPart::TabContainer, RevealPart::Wrap] {
            assert!(changes
                .iter()
                .any(|c| c.part == part && c.class == CV_HIDDEN_CLASS && !c.add));
        }
        for part in [
            RevealPart::DownloadButton,
            RevealPart::ControlButtons,
            RevealPart::Footer,
        ] {
            assert!(changes
                .iter()
                .any(|c| c.part == part && c.class == HIDDEN_CLASS && !c.add));
        }
    }
}
