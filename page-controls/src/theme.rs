use tracing::warn;
use web_sys::{Document, Element, Window};

use page_common::{dom, PreferenceStore, Theme, THEME_KEY};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// 解析出的主题及其来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChoice {
    pub theme: Theme,
    /// 是否来自已保存的偏好
    pub saved: bool,
}

/// 已保存的偏好优先，否则跟随系统
pub fn resolve_theme<S: PreferenceStore + ?Sized>(store: &S, prefers_dark: bool) -> ThemeChoice {
    match store.get(THEME_KEY).as_deref().and_then(Theme::parse) {
        Some(theme) => ThemeChoice { theme, saved: true },
        None => ThemeChoice {
            theme: if prefers_dark { Theme::Dark } else { Theme::Light },
            saved: false,
        },
    }
}

/// 切换到相反主题并保存，返回新主题
pub fn toggle_theme<S: PreferenceStore + ?Sized>(store: &S, prefers_dark: bool) -> Theme {
    let next = resolve_theme(store, prefers_dark).theme.opposite();
    if let Err(e) = store.set(THEME_KEY, next.storage_value()) {
        warn!(error = %e, "保存主题失败");
    }
    next
}

/// 切换按钮的文本，显示的是可切换到的主题
pub fn button_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "Light",
        Theme::Light => "Dark",
    }
}

/// 系统是否偏好深色
pub fn prefers_dark(window: &Window) -> bool {
    window
        .match_media(DARK_SCHEME_QUERY)
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// 主题切换按钮及根元素
pub struct ThemeToggle {
    root: Element,
    sun: Option<Element>,
    moon: Option<Element>,
    text: Option<Element>,
}

impl ThemeToggle {
    pub fn new(document: &Document, button: &Element) -> Option<Self> {
        Some(Self {
            root: document.document_element()?,
            sun: dom::select_one_in(button, ".sun-icon"),
            moon: dom::select_one_in(button, ".moon-icon"),
            text: dom::select_one_in(button, "span"),
        })
    }

    /// 在根元素上设置 `<theme>-mode` 类
    pub fn apply_root_class(&self, theme: Theme) {
        dom::remove_class(&self.root, Theme::Light.root_class());
        dom::remove_class(&self.root, Theme::Dark.root_class());
        dom::add_class(&self.root, theme.root_class());
    }

    /// 更新按钮图标和文本
    pub fn apply_button(&self, theme: Theme) {
        let (sun, moon) = match theme {
            Theme::Dark => ("none", "block"),
            Theme::Light => ("block", "none"),
        };
        for (icon, display) in [(&self.sun, sun), (&self.moon, moon)] {
            if let Some(icon) = icon {
                if let Err(e) = dom::set_display(icon, display) {
                    warn!(error = %e, "更新主题图标失败");
                }
            }
        }
        if let Some(text) = &self.text {
            text.set_text_content(Some(button_label(theme)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_common::MemoryStore;
    use rstest::rstest;

    #[rstest]
    #[case(Some("dark"), false, Theme::Dark, true)]
    #[case(Some("light"), true, Theme::Light, true)]
    #[case(None, true, Theme::Dark, false)]
    #[case(None, false, Theme::Light, false)]
    #[case(Some("sepia"), true, Theme::Dark, false)]
    fn resolves_saved_then_system(
        #[case] saved: Option<&str>,
        #[case] prefers_dark: bool,
        #[case] theme: Theme,
        #[case] from_store: bool,
    ) {
        let store = MemoryStore::new();
        if let Some(value) = saved {
            store.set(THEME_KEY, value).unwrap();
        }
        assert_eq!(
            resolve_theme(&store, prefers_dark),
            ThemeChoice {
                theme,
                saved: from_store
            }
        );
    }

    #[test]
    fn toggle_flips_and_persists() {
        let store = MemoryStore::new();
        assert_eq!(toggle_theme(&store, true), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));

        // 已保存后不再参考系统偏好
        assert_eq!(toggle_theme(&store, true), Theme::Dark);
        assert_eq!(toggle_theme(&store, true), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn button_names_the_other_theme() {
        assert_eq!(button_label(Theme::Dark), "Light");
        assert_eq!(button_label(Theme::Light), "Dark");
    }
}
