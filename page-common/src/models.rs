use serde::{Deserialize, Serialize};

/// 主题偏好的存储键
pub const THEME_KEY: &str = "theme";
/// 布局宽度偏好的存储键
pub const LAYOUT_WIDTH_KEY: &str = "layoutWidth";

/// 页面主题
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// 深色
    Dark,
    /// 浅色
    Light,
}

impl Theme {
    /// 从存储值解析，未知值返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// 写入本地存储的值
    pub fn storage_value(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// 根元素上对应的 CSS 类名
    pub fn root_class(self) -> &'static str {
        match self {
            Theme::Dark => "dark-mode",
            Theme::Light => "light-mode",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// 页面布局宽度
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutWidth {
    Wide,
    #[default]
    Narrow,
}

impl LayoutWidth {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "wide" => Some(LayoutWidth::Wide),
            "narrow" => Some(LayoutWidth::Narrow),
            _ => None,
        }
    }

    pub fn storage_value(self) -> &'static str {
        match self {
            LayoutWidth::Wide => "wide",
            LayoutWidth::Narrow => "narrow",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            LayoutWidth::Wide => LayoutWidth::Narrow,
            LayoutWidth::Narrow => LayoutWidth::Wide,
        }
    }

    pub fn is_wide(self) -> bool {
        self == LayoutWidth::Wide
    }
}
